//! Feature binders: validate inputs, call the backend, build view models.
//!
//! Binders never touch the page. Charts come back as [`ChartSpec`]s and are
//! drawn by whoever owns the [`ChartBoard`].

pub mod bias;
pub mod dashboard;
pub mod ingestion;
pub mod preprocess;
pub mod privacy;
pub mod simulation;

use serde::Serialize;
use serde_json::Value;
use lab_client::PreviewRow;
use crate::chart::{ChartBoard, ChartSlot, ChartSpec, ChartSurface};
use crate::error::{BinderError, Required};
use crate::generation::Ticket;

/// A `label: value` line in an output region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self { label: label.into(), value: value.to_string() }
    }
}

/// Rendered rows of string cells under a header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// One row per record, cells looked up by header. Absent keys render empty.
    pub fn from_records(headers: Vec<String>, records: &[PreviewRow]) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|h| record.get(h).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    /// Headers are the first record's keys, in order.
    pub fn from_first_record(records: &[PreviewRow]) -> Self {
        let headers = records
            .first()
            .map(|r| r.keys().map(str::to_string).collect())
            .unwrap_or_default();
        Self::from_records(headers, records)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compact JSON, as shown for nested payloads.
pub fn compact_json<V: Serialize + ?Sized>(value: &V) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// The selected dataset name, or `InputMissing(["dataset"])`.
pub(crate) fn require_dataset(dataset: Option<&str>) -> Result<&str, BinderError> {
    let mut req = Required::default();
    let name = req.text("dataset", dataset);
    req.finish()?;
    Ok(name)
}

/// Draw the chart a binder produced into its slot, or clear the slot when the
/// binder failed. Stale tickets change nothing.
pub fn show_chart<S: ChartSurface>(
    board: &mut ChartBoard<S>,
    ticket: Ticket<ChartSlot>,
    spec: Option<ChartSpec>,
) -> Result<(), BinderError> {
    match spec {
        Some(spec) => board.render_for(ticket, spec).map(|_| ()),
        None => {
            board.clear_for(&ticket);
            Ok(())
        }
    }
}
