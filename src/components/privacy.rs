use leptos::prelude::*;
use lab_core::binders::privacy::{self, AuditView};
use lab_core::{ChartSlot, ChartSpec};
use crate::components::shared::{dispatch_chart, first_file, read_upload, region_status, ChartCanvas};
use crate::state::AppState;

fn split_audit(view: AuditView) -> (AuditView, ChartSpec) {
    let chart = view.chart.clone();
    (view, chart)
}

#[component]
pub fn PrivacySection() -> impl IntoView {
    let state = expect_context::<AppState>();
    let region = state.privacy;
    let file_input = NodeRef::<leptos::html::Input>::new();

    let on_audit = move |_: web_sys::MouseEvent| {
        let file = first_file(file_input);
        dispatch_chart(
            state,
            region,
            ChartSlot::Privacy,
            move |client| async move {
                let file = read_upload(file).await?;
                privacy::audit(&client, file.as_ref()).await
            },
            split_audit,
        );
    };

    view! {
        <div class="upload-row">
            <input node_ref=file_input type="file" id="privacyFileInput" accept=".csv" />
            <button on:click=on_audit>"Run Audit"</button>
        </div>
        {region_status(region)}
        <ChartCanvas slot=ChartSlot::Privacy />

        <div id="privacyDetails">
            {move || region.with(|r| r.ready().map(|audit| {
                let rows = audit
                    .details
                    .iter()
                    .map(|d| view! { <p><strong>{d.label.clone()}</strong>{format!(": {}", d.value)}</p> })
                    .collect_view();
                let risk = audit.risk_level.clone().map(|level| view! { <p>{format!("Risk Level: {level}")}</p> });
                view! {
                    <h4>"Detected PII"</h4>
                    {rows}
                    {risk}
                }
            }))}
        </div>

        <div id="privacyRecommendations">
            {move || region.with(|r| r.ready().map(|audit| {
                let items = audit
                    .recommendations
                    .iter()
                    .map(|rec| view! { <li>{rec.clone()}</li> })
                    .collect_view();
                view! {
                    <h4>"Recommendations"</h4>
                    <ul>{items}</ul>
                }
            }))}
        </div>
    }
}
