use leptos::prelude::*;
use lab_core::binders::bias::{self, MissingView, NumericEntry, NumericView};
use lab_core::binders::Field;
use lab_core::{ChartSlot, ChartSpec, SelectorId};
use crate::components::shared::{dispatch, dispatch_chart, fields_view, list_view, region_status, ChartCanvas, DatasetSelect};
use crate::state::AppState;

fn split_missing(view: MissingView) -> (Vec<Field>, ChartSpec) {
    (view.entries, view.chart)
}

fn split_numeric(view: NumericView) -> (Vec<NumericEntry>, ChartSpec) {
    (view.entries, view.chart)
}

#[component]
pub fn BiasSection() -> impl IntoView {
    let state = expect_context::<AppState>();
    let regions = state.bias;
    let selected = move || state.bias_select.with_untracked(|s| s.selected().map(str::to_string));

    let on_overview = move |_: web_sys::MouseEvent| {
        let name = selected();
        dispatch(state, regions.overview, move |client| async move {
            bias::overview(&client, name.as_deref()).await
        });
    };
    let on_imbalance = move |_: web_sys::MouseEvent| {
        let name = selected();
        let target = state.imbalance_target.get_untracked();
        dispatch_chart(
            state,
            regions.imbalance,
            ChartSlot::Imbalance,
            move |client| async move { bias::class_imbalance(&client, name.as_deref(), Some(&target)).await },
            |chart| ((), chart),
        );
    };
    let on_missing = move |_: web_sys::MouseEvent| {
        let name = selected();
        dispatch_chart(
            state,
            regions.missing,
            ChartSlot::Missing,
            move |client| async move { bias::missing(&client, name.as_deref()).await },
            split_missing,
        );
    };
    let on_numeric = move |_: web_sys::MouseEvent| {
        let name = selected();
        dispatch_chart(
            state,
            regions.numeric,
            ChartSlot::Numeric,
            move |client| async move { bias::numeric(&client, name.as_deref()).await },
            split_numeric,
        );
    };

    view! {
        <div class="controls">
            <DatasetSelect which=SelectorId::Bias />
            <button on:click=on_overview>"Overview"</button>
        </div>
        <div id="biasOverview">
            {region_status(regions.overview)}
            {move || regions.overview.with(|r| r.ready().map(|f| fields_view(f)))}
        </div>

        <div class="controls">
            <input
                type="text"
                id="targetColumn"
                placeholder="Target column"
                prop:value=move || state.imbalance_target.get()
                on:input=move |ev| state.imbalance_target.set(event_target_value(&ev))
            />
            <button on:click=on_imbalance>"Class Imbalance"</button>
        </div>
        {region_status(regions.imbalance)}
        <ChartCanvas slot=ChartSlot::Imbalance />

        <button on:click=on_missing>"Missing Value Bias"</button>
        <div id="missingBias">
            {region_status(regions.missing)}
            {move || regions.missing.with(|r| r.ready().map(|entries| view! {
                <h4>"Columns with Missing Values"</h4>
                {list_view(entries)}
            }))}
        </div>
        <ChartCanvas slot=ChartSlot::Missing />

        <button on:click=on_numeric>"Numeric Bias"</button>
        <div id="numericBias">
            {region_status(regions.numeric)}
            {move || regions.numeric.with(|r| r.ready().map(|entries| {
                let items = entries
                    .iter()
                    .map(|e| view! {
                        <li>{format!("{} - Skewness: {}, Outliers: {}", e.column, e.skewness, e.outliers)}</li>
                    })
                    .collect_view();
                view! {
                    <h4>"Numeric Columns Bias"</h4>
                    <ul>{items}</ul>
                }
            }))}
        </div>
        <ChartCanvas slot=ChartSlot::Numeric />
    }
}
