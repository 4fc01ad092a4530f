use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use crate::series::KeyedSeries;

/// A filename known to the backend. Opaque: never split or parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetRef {
    pub name: String,
}

impl DatasetRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A file picked in the browser, ready to be sent as the `file` form part.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// One displayed table row: column → cell, in column order.
pub type PreviewRow = KeyedSeries<Value>;

// ── /data ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadReceipt {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FileList {
    pub files: Vec<DatasetRef>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DataPreview {
    pub preview: Vec<PreviewRow>,
}

// ── /preprocess ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PreprocessPreview {
    pub filename: String,
    pub rows: u64,
    pub columns: Vec<String>,
    pub sample_data: Vec<PreviewRow>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SummaryReport {
    pub rows: u64,
    pub columns: u64,
    pub missing_values: KeyedSeries<u64>,
    pub column_types: KeyedSeries<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CleanReport {
    pub message: String,
    pub saved_as: String,
    pub rows_before: u64,
    pub rows_after: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ConvertReport {
    pub message: String,
    pub saved_as: String,
}

// ── /bias ────────────────────────────────────────────────────────────

/// Scalars are kept as JSON numbers so they display exactly as sent.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BiasOverview {
    pub bias_score: Number,
    pub missing_value_rate: Number,
    pub avg_skewness: Number,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClassImbalance {
    pub distribution_percent: KeyedSeries<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MissingBias {
    pub columns_with_missing: Vec<String>,
    pub missing_by_column: KeyedSeries<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NumericBias {
    pub numeric_columns: Vec<String>,
    pub skewness: KeyedSeries<f64>,
    pub outliers_per_column: KeyedSeries<f64>,
}

// ── /privacy ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PrivacyReport {
    #[serde(default)]
    pub total_cells: Option<u64>,
    #[serde(default)]
    pub total_hits: Option<u64>,
    pub pii_detected: KeyedSeries<Value>,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
}

// ── /sim ─────────────────────────────────────────────────────────────

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            #[default]
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == lower)
                    .ok_or_else(|| format!("Unknown {}: {s}", stringify!($name)))
            }
        }
    };
}

wire_enum! {
    /// Kind of vulnerable road user in the scenario.
    VruType {
        Pedestrian => "pedestrian",
        Cyclist => "cyclist",
        TwoWheeler => "2-wheeler",
        Animal => "animal",
    }
}

wire_enum! {
    Weather {
        Clear => "clear",
        Rain => "rain",
        Fog => "fog",
        Snow => "snow",
    }
}

wire_enum! {
    Lighting {
        Day => "day",
        Night => "night",
    }
}

/// Body of `POST /sim/run`. Speed in km/h, distance in metres.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationInput {
    pub vehicle_speed: f64,
    pub vru_distance: f64,
    pub vru_type: VruType,
    pub weather: Weather,
    pub lighting: Lighting,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SimulationResult {
    pub reaction_distance: Number,
    pub braking_distance: Number,
    pub total_stopping_distance: Number,
    pub risk_score: Number,
    pub risk_level: String,
    pub collision_likely: bool,
}

// ── /dashboard ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DashboardSummary {
    pub total_records: u64,
    pub columns: Vec<String>,
    pub missing_values: KeyedSeries<Value>,
    pub dtypes: KeyedSeries<Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VehicleDistribution {
    pub vehicle_distribution: KeyedSeries<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CollisionRiskDistribution {
    pub collision_risk_distribution: KeyedSeries<f64>,
}

/// Wire shape of `/dashboard/environment`; see [`EnvironmentBreakdown`].
#[derive(Deserialize)]
pub struct EnvironmentPayload {
    #[serde(default)]
    pub weather: Option<KeyedSeries<f64>>,
    #[serde(default)]
    pub light_condition: Option<KeyedSeries<f64>>,
}

/// Environment counts. A response carries one breakdown or the other;
/// `weather` wins if a server ever sends both.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "EnvironmentPayload")]
pub enum EnvironmentBreakdown {
    Weather(KeyedSeries<f64>),
    LightCondition(KeyedSeries<f64>),
}

impl TryFrom<EnvironmentPayload> for EnvironmentBreakdown {
    type Error = String;

    fn try_from(raw: EnvironmentPayload) -> Result<Self, Self::Error> {
        match (raw.weather, raw.light_condition) {
            (Some(weather), _) => Ok(Self::Weather(weather)),
            (None, Some(light)) => Ok(Self::LightCondition(light)),
            (None, None) => Err("neither `weather` nor `light_condition` present".into()),
        }
    }
}

impl EnvironmentBreakdown {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weather(_) => "Weather",
            Self::LightCondition(_) => "Light condition",
        }
    }

    pub fn series(&self) -> &KeyedSeries<f64> {
        match self {
            Self::Weather(s) | Self::LightCondition(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SpeedStats {
    pub min_speed: Number,
    pub max_speed: Number,
    pub avg_speed: Number,
    pub median_speed: Number,
    pub std_speed: Number,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VruDistanceStats {
    pub average_distance: Number,
    pub min_distance: Number,
    pub max_distance: Number,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_environment_prefers_weather() {
        let env: EnvironmentBreakdown = serde_json::from_value(json!({
            "weather": {"rain": 3, "clear": 7},
            "light_condition": {"day": 5}
        }))
        .unwrap();
        assert_eq!(env.label(), "Weather");
        assert_eq!(env.series().keys().collect::<Vec<_>>(), ["rain", "clear"]);
    }

    #[test]
    fn test_environment_light_only() {
        let env: EnvironmentBreakdown =
            serde_json::from_value(json!({"light_condition": {"day": 5}})).unwrap();
        assert!(matches!(env, EnvironmentBreakdown::LightCondition(_)));
    }

    #[test]
    fn test_environment_requires_a_breakdown() {
        let err = serde_json::from_value::<EnvironmentBreakdown>(json!({"col": "x"})).unwrap_err();
        assert!(err.to_string().contains("light_condition"));
    }

    #[test]
    fn test_simulation_input_wire_names() {
        let input = SimulationInput {
            vehicle_speed: 50.0,
            vru_distance: 20.0,
            vru_type: VruType::TwoWheeler,
            weather: Weather::Fog,
            lighting: Lighting::Night,
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "vehicle_speed": 50.0,
                "vru_distance": 20.0,
                "vru_type": "2-wheeler",
                "weather": "fog",
                "lighting": "night"
            })
        );
    }

    #[test]
    fn test_wire_enum_parse() {
        assert_eq!("Cyclist".parse::<VruType>(), Ok(VruType::Cyclist));
        assert_eq!(" snow ".parse::<Weather>(), Ok(Weather::Snow));
        assert!("dusk".parse::<Lighting>().is_err());
        assert_eq!(VruType::default(), VruType::Pedestrian);
    }

    #[test]
    fn test_privacy_counts_optional() {
        let report: PrivacyReport = serde_json::from_value(json!({
            "filename": "people.csv",
            "pii_detected": {"contact": {"email": ["a@b.io"]}},
            "total_hits": 1,
            "risk_level": "Medium",
            "recommendations": ["Remove or mask email addresses."]
        }))
        .unwrap();
        assert_eq!(report.total_cells, None);
        assert_eq!(report.total_hits, Some(1));
        assert_eq!(report.pii_detected.keys().collect::<Vec<_>>(), ["contact"]);
    }

    #[test]
    fn test_scalar_numbers_keep_their_text() {
        let result: SimulationResult = serde_json::from_value(json!({
            "reaction_distance": 20.83,
            "braking_distance": 16.08,
            "total_stopping_distance": 36.91,
            "risk_score": 48.2,
            "risk_level": "HIGH",
            "collision_likely": true
        }))
        .unwrap();
        assert_eq!(result.reaction_distance.to_string(), "20.83");
        assert_eq!(result.risk_score.to_string(), "48.2");
    }
}
