use leptos::prelude::*;
use lab_core::binders::preprocess;
use lab_core::SelectorId;
use crate::components::shared::{dispatch, list_view, region_status, table_view, DatasetSelect};
use crate::state::AppState;

#[component]
pub fn PreprocessSection() -> impl IntoView {
    let state = expect_context::<AppState>();
    let regions = state.preprocess;
    let selected = move || state.preprocess_select.with_untracked(|s| s.selected().map(str::to_string));

    let on_preview = move |_: web_sys::MouseEvent| {
        let name = selected();
        dispatch(state, regions.preview, move |client| async move {
            preprocess::preview(&client, name.as_deref()).await
        });
    };
    let on_summary = move |_: web_sys::MouseEvent| {
        let name = selected();
        dispatch(state, regions.summary, move |client| async move {
            preprocess::summary(&client, name.as_deref()).await
        });
    };
    let on_clean = move |_: web_sys::MouseEvent| {
        let name = selected();
        dispatch(state, regions.clean, move |client| async move {
            preprocess::clean(&client, name.as_deref()).await
        });
    };
    let on_convert = move |_: web_sys::MouseEvent| {
        let name = selected();
        dispatch(state, regions.convert, move |client| async move {
            preprocess::convert(&client, name.as_deref()).await
        });
    };

    view! {
        <div class="controls">
            <DatasetSelect which=SelectorId::Preprocess />
            <button on:click=on_preview>"Preview"</button>
            <button on:click=on_summary>"Summary"</button>
            <button on:click=on_clean>"Clean"</button>
            <button on:click=on_convert>"Convert to CSV"</button>
        </div>
        {region_status(regions.convert)}
        {move || regions.convert.with(|r| r.ready().map(|notice| view! { <p class="notice">{notice.clone()}</p> }))}

        <div id="preprocessPreview">
            {region_status(regions.preview)}
            {move || regions.preview.with(|r| r.ready().map(|v| view! {
                <h4>{v.title.clone()}</h4>
                <p>{format!("Rows: {}, Columns: {}", v.rows, v.column_count)}</p>
                {table_view(&v.table)}
            }))}
        </div>

        <div id="preprocessSummary">
            {region_status(regions.summary)}
            {move || regions.summary.with(|r| r.ready().map(|v| view! {
                <h4>{v.title.clone()}</h4>
                <p>{format!("Rows: {}, Columns: {}", v.rows, v.columns)}</p>
                <h5>"Missing Values:"</h5>
                {list_view(&v.missing_values)}
                <h5>"Column Types:"</h5>
                {list_view(&v.column_types)}
            }))}
        </div>

        <div id="preprocessResult">
            {region_status(regions.clean)}
            {move || regions.clean.with(|r| r.ready().map(|c| view! {
                <p>{c.message.clone()}</p>
                <p>{format!("Saved as: {}", c.saved_as)}</p>
                <p>{format!("Rows before: {}, Rows after: {}", c.rows_before, c.rows_after)}</p>
            }))}
        </div>
    }
}
