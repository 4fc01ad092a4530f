use lab_client::{LabClient, PrivacyReport, Transport, UploadFile};
use crate::binders::{compact_json, Field};
use crate::chart::{ChartKind, ChartSpec, EXPOSURE_PALETTE};
use crate::error::BinderError;

/// Denominator used when the audit does not report a usable cell count.
pub const DEFAULT_TOTAL_CELLS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exposure {
    pub exposed: u64,
    pub safe: u64,
}

impl Exposure {
    pub fn from_report(report: &PrivacyReport) -> Self {
        let total = match report.total_cells {
            Some(n) if n > 0 => n,
            _ => DEFAULT_TOTAL_CELLS,
        };
        let exposed = report.total_hits.unwrap_or(0);
        Self { exposed, safe: total.saturating_sub(exposed) }
    }

    pub fn chart(&self) -> ChartSpec {
        ChartSpec::from_pairs(
            ChartKind::Pie,
            [("Exposed", self.exposed as f64), ("Safe", self.safe as f64)],
            EXPOSURE_PALETTE,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuditView {
    pub exposure: Exposure,
    pub chart: ChartSpec,
    /// Column name with its detected PII as compact JSON.
    pub details: Vec<Field>,
    pub recommendations: Vec<String>,
    pub risk_level: Option<String>,
}

pub async fn audit<T: Transport>(client: &LabClient<T>, file: Option<&UploadFile>) -> Result<AuditView, BinderError> {
    let Some(file) = file else {
        return Err(BinderError::missing(vec!["file"]));
    };

    log::info!("Auditing {} for PII", file.name);
    let report = client.privacy_audit(file).await?;
    let exposure = Exposure::from_report(&report);
    let details = report
        .pii_detected
        .iter()
        .map(|(col, hits)| Field::new(col, compact_json(hits)))
        .collect();
    Ok(AuditView {
        exposure,
        chart: exposure.chart(),
        details,
        recommendations: report.recommendations,
        risk_level: report.risk_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::testing::FakeBackend;

    fn report(v: serde_json::Value) -> PrivacyReport {
        serde_json::from_value(v).unwrap()
    }

    fn csv() -> UploadFile {
        UploadFile { name: "drivers.csv".into(), bytes: b"name,email\n".to_vec() }
    }

    #[test]
    fn test_zero_cells_uses_default_denominator() {
        let r = report(json!({"total_cells": 0, "total_hits": 5, "pii_detected": {}, "recommendations": []}));
        let exposure = Exposure::from_report(&r);
        assert_eq!(exposure, Exposure { exposed: 5, safe: 95 });
        let chart = exposure.chart();
        assert_eq!(chart.labels, ["Exposed", "Safe"]);
        assert_eq!(chart.series, [5.0, 95.0]);
        assert!(chart.series.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_absent_counts() {
        let r = report(json!({"pii_detected": {}, "recommendations": []}));
        assert_eq!(Exposure::from_report(&r), Exposure { exposed: 0, safe: 100 });
    }

    #[test]
    fn test_safe_never_goes_negative() {
        let r = report(json!({"total_cells": 10, "total_hits": 40, "pii_detected": {}, "recommendations": []}));
        assert_eq!(Exposure::from_report(&r), Exposure { exposed: 40, safe: 0 });
    }

    #[tokio::test]
    async fn test_audit_without_file_sends_nothing() {
        let client = FakeBackend::new().client();
        assert_eq!(audit(&client, None).await.unwrap_err(), BinderError::missing(vec!["file"]));
        assert_eq!(client.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn test_audit_view() {
        let client = FakeBackend::new()
            .on(
                "/privacy/audit",
                json!({
                    "total_cells": 200,
                    "total_hits": 3,
                    "pii_detected": {"email": ["a@b.io", "c@d.io"], "phone": ["555-0101"]},
                    "recommendations": ["Mask email addresses"],
                    "risk_level": "Medium"
                }),
            )
            .client();
        let view = audit(&client, Some(&csv())).await.unwrap();
        assert_eq!(view.exposure, Exposure { exposed: 3, safe: 197 });
        assert_eq!(view.details[0], Field::new("email", r#"["a@b.io","c@d.io"]"#));
        assert_eq!(view.details[1].label, "phone");
        assert_eq!(view.recommendations, ["Mask email addresses"]);
        assert_eq!(view.risk_level.as_deref(), Some("Medium"));
        assert_eq!(*client.transport().uploads.borrow(), ["drivers.csv"]);
    }
}
