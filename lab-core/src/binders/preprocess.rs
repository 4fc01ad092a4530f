use lab_client::{CleanReport, LabClient, Transport};
use crate::binders::{require_dataset, Field, Table};
use crate::error::BinderError;

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewView {
    pub title: String,
    pub rows: u64,
    pub column_count: usize,
    /// Headers follow the response's `columns` order.
    pub table: Table,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryView {
    pub title: String,
    pub rows: u64,
    pub columns: u64,
    pub missing_values: Vec<Field>,
    pub column_types: Vec<Field>,
}

pub async fn preview<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<PreviewView, BinderError> {
    let name = require_dataset(dataset)?;
    let resp = client.preprocess_preview(name).await?;
    Ok(PreviewView {
        title: format!("Preview of {}", resp.filename),
        rows: resp.rows,
        column_count: resp.columns.len(),
        table: Table::from_records(resp.columns, &resp.sample_data),
    })
}

pub async fn summary<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<SummaryView, BinderError> {
    let name = require_dataset(dataset)?;
    let resp = client.preprocess_summary(name).await?;
    Ok(SummaryView {
        title: format!("Summary of {name}"),
        rows: resp.rows,
        columns: resp.columns,
        missing_values: resp.missing_values.iter().map(|(col, n)| Field::new(col, n)).collect(),
        column_types: resp.column_types.iter().map(|(col, ty)| Field::new(col, ty)).collect(),
    })
}

pub async fn clean<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<CleanReport, BinderError> {
    let name = require_dataset(dataset)?;
    let report = client.clean(name).await?;
    log::info!("Cleaned {name}: {} -> {} rows", report.rows_before, report.rows_after);
    Ok(report)
}

/// Returns the one-line notice shown after conversion.
pub async fn convert<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<String, BinderError> {
    let name = require_dataset(dataset)?;
    let report = client.convert_to_csv(name).await?;
    Ok(format!("{}. Saved as: {}", report.message, report.saved_as))
}
