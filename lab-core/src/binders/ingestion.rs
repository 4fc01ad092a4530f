use lab_client::{DatasetRef, LabClient, Transport, UploadFile};
use crate::binders::{require_dataset, Table};
use crate::error::BinderError;

pub async fn load_datasets<T: Transport>(client: &LabClient<T>) -> Result<Vec<DatasetRef>, BinderError> {
    Ok(client.files().await?.files)
}

pub async fn preview_dataset<T: Transport>(
    client: &LabClient<T>,
    dataset: Option<&str>,
) -> Result<Table, BinderError> {
    let name = require_dataset(dataset)?;
    let preview = client.data_preview(name).await?;
    Ok(Table::from_first_record(&preview.preview))
}

/// Result of a successful upload. The listing is fetched fresh afterwards;
/// if that second call fails the upload itself still succeeded.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadOutcome {
    pub message: String,
    pub listing: Result<Vec<DatasetRef>, BinderError>,
}

pub async fn upload<T: Transport>(
    client: &LabClient<T>,
    file: Option<&UploadFile>,
) -> Result<UploadOutcome, BinderError> {
    let Some(file) = file else {
        return Err(BinderError::missing(vec!["file"]));
    };

    log::info!("Uploading {} ({} bytes)", file.name, file.bytes.len());
    let receipt = client.upload(file).await?;
    let listing = load_datasets(client).await;
    if let Err(e) = &listing {
        log::warn!("Dataset list refresh after upload failed: {e}");
    }
    Ok(UploadOutcome { message: receipt.message, listing })
}
