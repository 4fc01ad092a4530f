use leptos::prelude::*;
use leptos::task::spawn_local;
use lab_core::binders::dashboard::{self, DashboardReport};
use lab_core::{BinderError, ChartSlot, SelectorId};
use crate::components::shared::{apply_chart, begin_chart, fields_view, region_status, settle, ChartCanvas, DatasetSelect};
use crate::state::AppState;

/// A report in which every region failed with `err`.
fn all_failed(err: BinderError) -> DashboardReport {
    DashboardReport {
        summary: Err(err.clone()),
        vehicles: Err(err.clone()),
        collision: Err(err.clone()),
        environment: Err(err.clone()),
        speed: Err(err.clone()),
        vru: Err(err),
    }
}

#[component]
pub fn DashboardSection() -> impl IntoView {
    let state = expect_context::<AppState>();
    let regions = state.dashboard;

    let on_load = move |_: web_sys::MouseEvent| {
        let name = state.dashboard_select.with_untracked(|s| s.selected().map(str::to_string));
        let Some(client) = state.client.try_get_value() else { return };

        // Every region and slot is claimed before the first request goes out.
        let summary = regions.summary.try_update(|r| r.begin());
        let vehicles = regions.vehicles.try_update(|r| r.begin()).zip(begin_chart(state, ChartSlot::Vehicle));
        let collision = regions.collision.try_update(|r| r.begin()).zip(begin_chart(state, ChartSlot::Collision));
        let environment = regions
            .environment
            .try_update(|r| r.begin())
            .zip(begin_chart(state, ChartSlot::Environment));
        let speed = regions.speed.try_update(|r| r.begin());
        let vru = regions.vru.try_update(|r| r.begin());
        let (Some(summary), Some(vehicles), Some(collision), Some(environment), Some(speed), Some(vru)) =
            (summary, vehicles, collision, environment, speed, vru)
        else {
            return;
        };

        spawn_local(async move {
            let report = dashboard::load(&client, name.as_deref()).await.unwrap_or_else(all_failed);
            settle(regions.summary, summary, report.summary);
            apply_chart(state, regions.vehicles, vehicles, report.vehicles.map(|c| ((), c)));
            apply_chart(state, regions.collision, collision, report.collision.map(|c| ((), c)));
            apply_chart(
                state,
                regions.environment,
                environment,
                report.environment.map(|e| (e.label, e.chart)),
            );
            settle(regions.speed, speed, report.speed);
            settle(regions.vru, vru, report.vru);
        });
    };

    view! {
        <div class="controls">
            <DatasetSelect which=SelectorId::Dashboard />
            <button on:click=on_load>"Load Dashboard"</button>
        </div>

        <div id="dashboardSummary">
            {region_status(regions.summary)}
            {move || regions.summary.with(|r| r.ready().map(|f| fields_view(f)))}
        </div>

        <div class="chart-grid">
            <div>
                <h4>"Vehicle Distribution"</h4>
                {region_status(regions.vehicles)}
                <ChartCanvas slot=ChartSlot::Vehicle />
            </div>
            <div>
                <h4>"Collision Risk"</h4>
                {region_status(regions.collision)}
                <ChartCanvas slot=ChartSlot::Collision />
            </div>
            <div>
                <h4>{move || regions.environment.with(|r| r.ready().copied().unwrap_or("Environment"))}</h4>
                {region_status(regions.environment)}
                <ChartCanvas slot=ChartSlot::Environment />
            </div>
        </div>

        <div id="speedStats">
            {region_status(regions.speed)}
            {move || regions.speed.with(|r| r.ready().map(|line| view! { <p>{line.clone()}</p> }))}
        </div>
        <div id="vruStats">
            {region_status(regions.vru)}
            {move || regions.vru.with(|r| r.ready().map(|line| view! { <p>{line.clone()}</p> }))}
        </div>
    }
}
