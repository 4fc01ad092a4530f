use std::str::FromStr;
use leptos::prelude::*;
use lab_client::{Lighting, VruType, Weather};
use lab_core::binders::simulation;
use crate::components::shared::{dispatch, region_status};
use crate::state::AppState;

/// `<option>`s for a closed wire enumeration.
fn options<E: Copy + std::fmt::Display + 'static>(all: &'static [E]) -> impl IntoView {
    all.iter()
        .map(|v| {
            let wire = v.to_string();
            view! { <option value=wire.clone()>{wire.clone()}</option> }
        })
        .collect_view()
}

/// Parse a dropdown value, keeping the previous choice if it doesn't parse.
fn parse_into<E: FromStr<Err = String>>(raw: &str, slot: &mut E) {
    match raw.parse() {
        Ok(v) => *slot = v,
        Err(e) => log::warn!("{e}"),
    }
}

#[component]
pub fn SimulationSection() -> impl IntoView {
    let state = expect_context::<AppState>();
    let form = state.simulation_form;
    let region = state.simulation;

    let on_run = move |_: web_sys::MouseEvent| {
        let form = form.get_untracked();
        dispatch(state, region, move |client| async move { simulation::run(&client, &form).await });
    };

    view! {
        <div class="sim-form">
            <label>"Vehicle speed (km/h)"
                <input
                    type="number"
                    id="vehicleSpeed"
                    prop:value=move || form.with(|f| f.vehicle_speed.clone())
                    on:input=move |ev| form.update(|f| f.vehicle_speed = event_target_value(&ev))
                />
            </label>
            <label>"VRU distance (m)"
                <input
                    type="number"
                    id="vruDistance"
                    prop:value=move || form.with(|f| f.vru_distance.clone())
                    on:input=move |ev| form.update(|f| f.vru_distance = event_target_value(&ev))
                />
            </label>
            <label>"VRU type"
                <select
                    id="vruType"
                    prop:value=move || form.with(|f| f.vru_type.to_string())
                    on:change=move |ev| form.update(|f| parse_into(&event_target_value(&ev), &mut f.vru_type))
                >
                    {options(VruType::ALL)}
                </select>
            </label>
            <label>"Weather"
                <select
                    id="weather"
                    prop:value=move || form.with(|f| f.weather.to_string())
                    on:change=move |ev| form.update(|f| parse_into(&event_target_value(&ev), &mut f.weather))
                >
                    {options(Weather::ALL)}
                </select>
            </label>
            <label>"Lighting"
                <select
                    id="lighting"
                    prop:value=move || form.with(|f| f.lighting.to_string())
                    on:change=move |ev| form.update(|f| parse_into(&event_target_value(&ev), &mut f.lighting))
                >
                    {options(Lighting::ALL)}
                </select>
            </label>
            <button on:click=on_run>"Run Simulation"</button>
        </div>

        <div id="simulationResult">
            {region_status(region)}
            {move || region.with(|r| r.ready().map(|v| view! {
                <h4>"Simulation Results"</h4>
                <p>{format!("Reaction Distance: {} m", v.reaction_distance)}</p>
                <p>{format!("Braking Distance: {} m", v.braking_distance)}</p>
                <p>{format!("Total Stopping Distance: {} m", v.total_stopping_distance)}</p>
                <p>{format!("Risk Score: {}", v.risk_score)}</p>
                <p>"Risk Level: "<strong>{v.risk_level.clone()}</strong></p>
                <p>{format!("Collision Likely: {}", v.collision_likely)}</p>
            }))}
        </div>
    }
}
