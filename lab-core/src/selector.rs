use lab_client::{DatasetRef, LabClient, Transport};
use crate::binders::ingestion::load_datasets;
use crate::error::BinderError;

/// The feature areas that carry their own dataset dropdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectorId {
    Preprocess,
    Bias,
    Dashboard,
}

impl SelectorId {
    pub const ALL: [SelectorId; 3] = [Self::Preprocess, Self::Bias, Self::Dashboard];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::Preprocess => "preprocessFileSelect",
            Self::Bias => "biasFileSelect",
            Self::Dashboard => "dashboardFileSelect",
        }
    }
}

/// One dataset dropdown: the server's file list plus the current pick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetSelector {
    options: Vec<DatasetRef>,
    selected: Option<String>,
}

impl DatasetSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[DatasetRef] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replace the option set wholesale. The pick survives if the name is
    /// still listed, otherwise it falls to the first entry (or none).
    pub fn apply(&mut self, files: Vec<DatasetRef>) {
        let keep = self
            .selected
            .take()
            .filter(|name| files.iter().any(|f| f.name == *name));
        self.selected = keep.or_else(|| files.first().map(|f| f.name.clone()));
        self.options = files;
    }

    /// Pick `name`. Names not currently listed are refused.
    pub fn select(&mut self, name: &str) -> bool {
        if self.options.iter().any(|f| f.name == name) {
            self.selected = Some(name.to_string());
            true
        } else {
            false
        }
    }
}

/// Re-fetch the file list and apply it to `selector`.
pub async fn refresh<T: Transport>(
    client: &LabClient<T>,
    selector: &mut DatasetSelector,
) -> Result<(), BinderError> {
    let files = load_datasets(client).await?;
    selector.apply(files);
    Ok(())
}
