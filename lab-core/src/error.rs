use lab_client::ApiError;
use crate::chart::ChartSlot;

/// Everything a binder can fail with. Binders are the error boundary: the
/// UI turns this into text for the one region the binder owns.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BinderError {
    /// Raised before any request is sent.
    #[error("Missing input: {}", join_fields(.fields))]
    InputMissing { fields: Vec<&'static str> },

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A binder ran before its canvas was mounted. A wiring bug, not a user error.
    #[error("Chart canvas '{}' is not mounted", canvas_of(.slot))]
    ViewNotReady { slot: ChartSlot },
}

fn join_fields(fields: &[&'static str]) -> String {
    fields.join(", ")
}

fn canvas_of(slot: &ChartSlot) -> &'static str {
    slot.canvas_id()
}

impl BinderError {
    pub fn missing(fields: Vec<&'static str>) -> Self {
        Self::InputMissing { fields }
    }

    /// Text shown in the failing region.
    pub fn user_message(&self) -> String {
        match self {
            Self::InputMissing { fields } => format!("Please provide: {}", fields.join(", ")),
            Self::Api(err @ ApiError::Network { .. }) => err.to_string(),
            Self::Api(ApiError::Decode { .. }) => {
                "The server sent a response this page could not read.".to_string()
            }
            Self::Api(err @ ApiError::Config { .. }) => err.to_string(),
            Self::ViewNotReady { .. } => "This view is not ready yet.".to_string(),
        }
    }
}

/// Collects the names of absent inputs so one error can list them all.
#[derive(Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub(crate) fn text<'a>(&mut self, field: &'static str, value: Option<&'a str>) -> &'a str {
        // Blank means missing, but names are sent exactly as given.
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                self.missing.push(field);
                ""
            }
        }
    }

    pub(crate) fn number(&mut self, field: &'static str, raw: &str) -> f64 {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.missing.push(field);
                0.0
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), BinderError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(BinderError::missing(self.missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors_shown_verbatim() {
        let err = BinderError::from(ApiError::from_status(400, r#"{"detail": "Target column 'x' not found"}"#));
        assert_eq!(err.user_message(), "HTTP 400: Target column 'x' not found");
    }

    #[test]
    fn test_decode_errors_are_generic() {
        let err = BinderError::from(ApiError::decode("/bias/numeric/a.csv: missing field `skewness`"));
        assert!(!err.user_message().contains("skewness"));
    }

    #[test]
    fn test_required_lists_every_missing_field() {
        let mut req = Required::default();
        assert_eq!(req.text("dataset", Some("  ")), "");
        assert_eq!(req.text("column", Some(" speed")), " speed");
        assert_eq!(req.number("vehicle_speed", "fast"), 0.0);
        assert_eq!(req.number("vru_distance", "12.5"), 12.5);
        assert_eq!(req.text("target", None), "");
        assert_eq!(
            req.finish(),
            Err(BinderError::InputMissing { fields: vec!["dataset", "vehicle_speed", "target"] })
        );
    }

    #[test]
    fn test_required_rejects_non_finite_numbers() {
        let mut req = Required::default();
        req.number("vehicle_speed", "NaN");
        req.number("vru_distance", "inf");
        assert_eq!(
            req.finish().unwrap_err().to_string(),
            "Missing input: vehicle_speed, vru_distance"
        );
    }
}
