use std::future::Future;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lab_client::{ApiError, LabClient, UploadFile};
use lab_core::binders::{show_chart, Field, Table};
use lab_core::{BinderError, ChartSlot, ChartSpec, Region, RegionState, SelectorId, Ticket};
use wasm_bindgen_futures::JsFuture;
use web_sys::File;
use crate::state::AppState;

// ── Dispatch ─────────────────────────────────────────────────────────

/// Apply a binder result to its region, unless a newer request owns it.
pub fn settle<T: Send + Sync + 'static>(
    region: RwSignal<Region<T>>,
    ticket: Ticket,
    result: Result<T, BinderError>,
) {
    if let Err(e) = &result {
        log::error!("{e}");
    }
    region.update(|r| {
        if !r.settle(ticket, result) {
            log::debug!("Dropping stale response (generation {})", ticket.generation);
        }
    });
}

/// Start a binder for one text region.
pub fn dispatch<T, F, Fut>(state: AppState, region: RwSignal<Region<T>>, task: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(LabClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, BinderError>> + 'static,
{
    let Some(client) = state.client.try_get_value() else { return };
    let Some(ticket) = region.try_update(|r| r.begin()) else { return };
    spawn_local(async move {
        let result = task(client).await;
        settle(region, ticket, result);
    });
}

pub fn begin_chart(state: AppState, slot: ChartSlot) -> Option<Ticket<ChartSlot>> {
    state.charts.try_update_value(|board| board.begin(slot))
}

/// Draw (or, on `None`, clear) the slot for `ticket`.
pub fn settle_chart(state: AppState, ticket: Ticket<ChartSlot>, spec: Option<ChartSpec>) -> Result<(), BinderError> {
    state
        .charts
        .try_update_value(|board| show_chart(board, ticket, spec))
        .unwrap_or(Ok(()))
}

/// Like [`dispatch`], for binders that also produce a chart. `split` pulls
/// the chart out of the view model and returns what the region keeps.
pub fn dispatch_chart<V, T, F, Fut>(
    state: AppState,
    region: RwSignal<Region<T>>,
    slot: ChartSlot,
    task: F,
    split: fn(V) -> (T, ChartSpec),
) where
    V: 'static,
    T: Send + Sync + 'static,
    F: FnOnce(LabClient) -> Fut + 'static,
    Fut: Future<Output = Result<V, BinderError>> + 'static,
{
    let Some(client) = state.client.try_get_value() else { return };
    let Some(chart_ticket) = begin_chart(state, slot) else { return };
    let Some(ticket) = region.try_update(|r| r.begin()) else { return };
    spawn_local(async move {
        let result = task(client).await.map(split);
        apply_chart(state, region, (ticket, chart_ticket), result);
    });
}

/// Settle a region together with its chart slot. A failure also wipes the
/// slot's previous chart.
pub fn apply_chart<T: Send + Sync + 'static>(
    state: AppState,
    region: RwSignal<Region<T>>,
    tickets: (Ticket, Ticket<ChartSlot>),
    result: Result<(T, ChartSpec), BinderError>,
) {
    let (ticket, chart_ticket) = tickets;
    let result = match result {
        Ok((kept, spec)) => settle_chart(state, chart_ticket, Some(spec)).map(|()| kept),
        Err(e) => {
            let _ = settle_chart(state, chart_ticket, None);
            Err(e)
        }
    };
    settle(region, ticket, result);
}

// ── Files ────────────────────────────────────────────────────────────

pub fn first_file(input: NodeRef<leptos::html::Input>) -> Option<File> {
    let input = input.get_untracked()?;
    input.files()?.get(0)
}

pub async fn read_upload(file: Option<File>) -> Result<Option<UploadFile>, BinderError> {
    let Some(file) = file else { return Ok(None) };
    let name = file.name();
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::transport(format!("Could not read {name}: {e:?}")))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(Some(UploadFile { name, bytes }))
}

// ── Views ────────────────────────────────────────────────────────────

/// Pending and error line for a region. Ready content is rendered by the caller.
pub fn region_status<T: Send + Sync + 'static>(region: RwSignal<Region<T>>) -> impl IntoView {
    move || {
        region.with(|r| {
            if let RegionState::Failed(msg) = r.state() {
                view! { <p class="error">{msg.clone()}</p> }.into_any()
            } else if r.is_pending() {
                view! { <p class="pending">"Loading..."</p> }.into_any()
            } else {
                ().into_any()
            }
        })
    }
}

pub fn fields_view(fields: &[Field]) -> impl IntoView {
    fields
        .iter()
        .map(|f| view! { <p>{format!("{}: {}", f.label, f.value)}</p> })
        .collect_view()
}

pub fn list_view(fields: &[Field]) -> impl IntoView {
    let items = fields
        .iter()
        .map(|f| view! { <li>{format!("{}: {}", f.label, f.value)}</li> })
        .collect_view();
    view! { <ul>{items}</ul> }
}

pub fn table_view(table: &Table) -> impl IntoView {
    let headers = table.headers.iter().map(|h| view! { <th>{h.clone()}</th> }).collect_view();
    let rows = table
        .rows
        .iter()
        .map(|row| {
            let cells = row.iter().map(|c| view! { <td>{c.clone()}</td> }).collect_view();
            view! { <tr>{cells}</tr> }
        })
        .collect_view();
    view! {
        <table class="preview-table">
            <thead><tr>{headers}</tr></thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

/// Dropdown bound to one of the three independent dataset selectors.
#[component]
pub fn DatasetSelect(which: SelectorId) -> impl IntoView {
    let state = expect_context::<AppState>();
    let selector = state.selector(which);

    let on_change = move |ev: web_sys::Event| {
        let name = event_target_value(&ev);
        selector.update(|s| {
            if !s.select(&name) {
                log::warn!("{name} is not in the {which:?} list");
            }
        });
    };

    view! {
        <select
            id=which.element_id()
            on:change=on_change
            prop:value=move || selector.with(|s| s.selected().unwrap_or_default().to_string())
        >
            {move || selector.with(|s| {
                let current = s.selected().map(str::to_string);
                s.options()
                    .iter()
                    .map(|f| {
                        let name = f.name.clone();
                        let is_selected = current.as_deref() == Some(name.as_str());
                        view! { <option value=name.clone() selected=is_selected>{name.clone()}</option> }
                    })
                    .collect_view()
            })}
        </select>
    }
}

/// Canvas for a chart slot. Always in the DOM so binders can draw into it.
#[component]
pub fn ChartCanvas(slot: ChartSlot) -> impl IntoView {
    view! {
        <div class="chart-container">
            <canvas id=slot.canvas_id() />
        </div>
    }
}
