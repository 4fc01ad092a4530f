use leptos::prelude::*;
use lab_client::{CleanReport, DatasetRef, LabClient};
use lab_core::binders::bias::NumericEntry;
use lab_core::binders::preprocess::{PreviewView, SummaryView};
use lab_core::binders::privacy::AuditView;
use lab_core::binders::simulation::{SimulationForm, SimulationView};
use lab_core::binders::{Field, Table};
use lab_core::{ChartBoard, DatasetSelector, Region, SelectorId};
use crate::canvas::surface::CanvasSurface;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Ingestion,
    Preprocess,
    Bias,
    Privacy,
    Simulation,
    Dashboard,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Self::Ingestion,
        Self::Preprocess,
        Self::Bias,
        Self::Privacy,
        Self::Simulation,
        Self::Dashboard,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Ingestion => "Data Ingestion",
            Self::Preprocess => "Preprocessing",
            Self::Bias => "Bias Detection",
            Self::Privacy => "Privacy Audit",
            Self::Simulation => "Safety Simulation",
            Self::Dashboard => "Dashboard",
        }
    }
}

#[derive(Clone, Copy)]
pub struct IngestionRegions {
    pub datasets: RwSignal<Region<Vec<DatasetRef>>>,
    pub preview: RwSignal<Region<Table>>,
    pub upload: RwSignal<Region<String>>,
}

#[derive(Clone, Copy)]
pub struct PreprocessRegions {
    pub preview: RwSignal<Region<PreviewView>>,
    pub summary: RwSignal<Region<SummaryView>>,
    pub clean: RwSignal<Region<CleanReport>>,
    pub convert: RwSignal<Region<String>>,
}

#[derive(Clone, Copy)]
pub struct BiasRegions {
    pub overview: RwSignal<Region<Vec<Field>>>,
    pub imbalance: RwSignal<Region<()>>,
    pub missing: RwSignal<Region<Vec<Field>>>,
    pub numeric: RwSignal<Region<Vec<NumericEntry>>>,
}

#[derive(Clone, Copy)]
pub struct DashboardRegions {
    pub summary: RwSignal<Region<Vec<Field>>>,
    pub vehicles: RwSignal<Region<()>>,
    pub collision: RwSignal<Region<()>>,
    pub environment: RwSignal<Region<&'static str>>,
    pub speed: RwSignal<Region<String>>,
    pub vru: RwSignal<Region<String>>,
}

/// Page-wide handles. Every field is a cheap reactive handle, so the whole
/// thing is `Copy` and lives in context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub client: StoredValue<LabClient, LocalStorage>,
    pub charts: StoredValue<ChartBoard<CanvasSurface>, LocalStorage>,
    pub section: RwSignal<Section>,
    pub preprocess_select: RwSignal<DatasetSelector>,
    pub bias_select: RwSignal<DatasetSelector>,
    pub dashboard_select: RwSignal<DatasetSelector>,
    pub imbalance_target: RwSignal<String>,
    pub simulation_form: RwSignal<SimulationForm>,
    pub ingestion: IngestionRegions,
    pub preprocess: PreprocessRegions,
    pub bias: BiasRegions,
    pub privacy: RwSignal<Region<AuditView>>,
    pub simulation: RwSignal<Region<SimulationView>>,
    pub dashboard: DashboardRegions,
}

impl AppState {
    pub fn new(client: LabClient) -> Self {
        Self {
            client: StoredValue::new_local(client),
            charts: StoredValue::new_local(ChartBoard::new(CanvasSurface)),
            section: RwSignal::new(Section::default()),
            preprocess_select: RwSignal::new(DatasetSelector::new()),
            bias_select: RwSignal::new(DatasetSelector::new()),
            dashboard_select: RwSignal::new(DatasetSelector::new()),
            imbalance_target: RwSignal::new(String::new()),
            simulation_form: RwSignal::new(SimulationForm::default()),
            ingestion: IngestionRegions {
                datasets: RwSignal::new(Region::new()),
                preview: RwSignal::new(Region::new()),
                upload: RwSignal::new(Region::new()),
            },
            preprocess: PreprocessRegions {
                preview: RwSignal::new(Region::new()),
                summary: RwSignal::new(Region::new()),
                clean: RwSignal::new(Region::new()),
                convert: RwSignal::new(Region::new()),
            },
            bias: BiasRegions {
                overview: RwSignal::new(Region::new()),
                imbalance: RwSignal::new(Region::new()),
                missing: RwSignal::new(Region::new()),
                numeric: RwSignal::new(Region::new()),
            },
            privacy: RwSignal::new(Region::new()),
            simulation: RwSignal::new(Region::new()),
            dashboard: DashboardRegions {
                summary: RwSignal::new(Region::new()),
                vehicles: RwSignal::new(Region::new()),
                collision: RwSignal::new(Region::new()),
                environment: RwSignal::new(Region::new()),
                speed: RwSignal::new(Region::new()),
                vru: RwSignal::new(Region::new()),
            },
        }
    }

    pub fn selector(&self, id: SelectorId) -> RwSignal<DatasetSelector> {
        match id {
            SelectorId::Preprocess => self.preprocess_select,
            SelectorId::Bias => self.bias_select,
            SelectorId::Dashboard => self.dashboard_select,
        }
    }

    /// Push a fresh server listing into every dataset dropdown.
    pub fn apply_listing(&self, files: Vec<DatasetRef>) {
        for id in SelectorId::ALL {
            let files = files.clone();
            self.selector(id).update(|s| s.apply(files));
        }
    }
}
