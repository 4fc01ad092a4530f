use leptos::prelude::*;
use lab_client::LabClient;
use lab_core::binders::ingestion;
use lab_core::BinderError;
use crate::components::bias::BiasSection;
use crate::components::dashboard::DashboardSection;
use crate::components::ingestion::IngestionSection;
use crate::components::preprocess::PreprocessSection;
use crate::components::privacy::PrivacySection;
use crate::components::shared::dispatch;
use crate::components::simulation::SimulationSection;
use crate::config;
use crate::state::{AppState, Section};

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new(LabClient::new(config::resolve()));
    provide_context(state);

    refresh_datasets(state);

    view! {
        <div class="app">
            <Nav />
            <main>
                <SectionFrame section=Section::Ingestion><IngestionSection /></SectionFrame>
                <SectionFrame section=Section::Preprocess><PreprocessSection /></SectionFrame>
                <SectionFrame section=Section::Bias><BiasSection /></SectionFrame>
                <SectionFrame section=Section::Privacy><PrivacySection /></SectionFrame>
                <SectionFrame section=Section::Simulation><SimulationSection /></SectionFrame>
                <SectionFrame section=Section::Dashboard><DashboardSection /></SectionFrame>
            </main>
        </div>
    }
}

/// Load the dataset list into the ingestion table and every dropdown.
pub fn refresh_datasets(state: AppState) {
    dispatch(state, state.ingestion.datasets, move |client| async move {
        let files = ingestion::load_datasets(&client).await?;
        state.apply_listing(files.clone());
        Ok::<_, BinderError>(files)
    });
}

#[component]
fn Nav() -> impl IntoView {
    let state = expect_context::<AppState>();
    let buttons = Section::ALL
        .into_iter()
        .map(|section| {
            view! {
                <button
                    class=move || if state.section.get() == section { "nav-btn active" } else { "nav-btn" }
                    on:click=move |_| state.section.set(section)
                >
                    {section.title()}
                </button>
            }
        })
        .collect_view();

    view! {
        <nav class="sidebar">
            <h2>"V2V Bias Safety Lab"</h2>
            {buttons}
        </nav>
    }
}

/// Sections stay mounted and are only hidden, so their canvases always exist.
#[component]
fn SectionFrame(section: Section, children: Children) -> impl IntoView {
    let state = expect_context::<AppState>();
    view! {
        <section class=move || if state.section.get() == section { "active" } else { "" }>
            <h3>{section.title()}</h3>
            {children()}
        </section>
    }
}
