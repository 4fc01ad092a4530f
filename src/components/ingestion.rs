use leptos::prelude::*;
use lab_core::binders::ingestion;
use lab_core::BinderError;
use crate::components::shared::{dispatch, first_file, read_upload, region_status, settle, table_view};
use crate::state::AppState;

#[component]
pub fn IngestionSection() -> impl IntoView {
    let state = expect_context::<AppState>();
    let regions = state.ingestion;
    let file_input = NodeRef::<leptos::html::Input>::new();

    let on_upload = move |_: web_sys::MouseEvent| {
        let file = first_file(file_input);
        dispatch(state, regions.upload, move |client| async move {
            let file = read_upload(file).await?;
            let outcome = ingestion::upload(&client, file.as_ref()).await?;
            if let Some(ticket) = regions.datasets.try_update(|r| r.begin()) {
                if let Ok(files) = &outcome.listing {
                    state.apply_listing(files.clone());
                }
                settle(regions.datasets, ticket, outcome.listing);
            }
            Ok::<_, BinderError>(outcome.message)
        });
    };

    let preview = move |name: String| {
        dispatch(state, regions.preview, move |client| async move {
            ingestion::preview_dataset(&client, Some(&name)).await
        });
    };

    view! {
        <div class="upload-row">
            <input node_ref=file_input type="file" id="fileInput" accept=".csv,.xlsx,.xls,.json" />
            <button on:click=on_upload>"Upload"</button>
        </div>
        {region_status(regions.upload)}
        {move || regions.upload.with(|r| r.ready().map(|msg| view! { <p class="notice">{msg.clone()}</p> }))}

        <table id="datasetTable">
            <thead>
                <tr><th>"File"</th><th>"Rows"</th><th>"Columns"</th><th></th></tr>
            </thead>
            <tbody>
                {move || regions.datasets.with(|r| {
                    r.ready()
                        .map(|files| {
                            files
                                .iter()
                                .map(|f| {
                                    let name = f.name.clone();
                                    let label = name.clone();
                                    view! {
                                        <tr>
                                            <td>{label}</td>
                                            <td>"—"</td>
                                            <td>"—"</td>
                                            <td>
                                                <button on:click=move |_| preview(name.clone())>"Preview"</button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })
                })}
            </tbody>
        </table>
        {region_status(regions.datasets)}

        <div id="previewDiv">
            {region_status(regions.preview)}
            {move || regions.preview.with(|r| r.ready().map(table_view))}
        </div>
    }
}
