use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::config::LabConfig;
use crate::endpoint::{Endpoint, Method, Service};
use crate::error::ApiError;
use crate::types::*;

/// Request payload.
#[derive(Clone, Copy, Debug)]
pub enum RequestBody<'a> {
    Empty,
    Json(&'a Value),
    /// Sent as multipart form data with a single `file` part.
    File(&'a UploadFile),
}

/// Carries one request to the backend and returns the parsed JSON body.
///
/// No caching and no retries.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn request(&self, endpoint: &Endpoint, body: RequestBody<'_>) -> Result<Value, ApiError>;
}

/// `reqwest`-backed transport. Works natively and in the browser.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    config: LabConfig,
}

impl HttpTransport {
    pub fn new(config: LabConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    async fn request(&self, endpoint: &Endpoint, body: RequestBody<'_>) -> Result<Value, ApiError> {
        let url = endpoint.url(&self.config)?;
        log::debug!("{} {}", endpoint.method, url);

        let builder = match endpoint.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        };
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::File(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.name.clone());
                builder.multipart(reqwest::multipart::Form::new().part("file", part))
            }
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("HTTP request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| ApiError::decode(format!("Failed to parse JSON: {e}")))
    }
}

/// Typed access to every backend endpoint.
#[derive(Clone, Debug)]
pub struct LabClient<T = HttpTransport> {
    transport: T,
}

impl LabClient<HttpTransport> {
    pub fn new(config: LabConfig) -> Self {
        Self::with_transport(HttpTransport::new(config))
    }
}

impl<T: Transport> LabClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Untyped request; the typed methods below all go through here.
    pub async fn request(&self, endpoint: &Endpoint, body: RequestBody<'_>) -> Result<Value, ApiError> {
        self.transport.request(endpoint, body).await
    }

    async fn fetch<R: DeserializeOwned>(&self, endpoint: Endpoint, body: RequestBody<'_>) -> Result<R, ApiError> {
        let value = self.request(&endpoint, body).await?;
        serde_json::from_value(value).map_err(|e| {
            log::warn!("{endpoint}: response did not match schema: {e}");
            ApiError::decode(format!("{}: {e}", endpoint.route()))
        })
    }

    // ── /data ────────────────────────────────────────────────────────

    pub async fn upload(&self, file: &UploadFile) -> Result<UploadReceipt, ApiError> {
        self.fetch(Endpoint::post(Service::Data, ["upload"]), RequestBody::File(file)).await
    }

    pub async fn files(&self) -> Result<FileList, ApiError> {
        self.fetch(Endpoint::get(Service::Data, ["files"]), RequestBody::Empty).await
    }

    pub async fn data_preview(&self, name: &str) -> Result<DataPreview, ApiError> {
        self.fetch(Endpoint::get(Service::Data, ["preview", name]), RequestBody::Empty).await
    }

    // ── /preprocess ──────────────────────────────────────────────────

    pub async fn preprocess_preview(&self, name: &str) -> Result<PreprocessPreview, ApiError> {
        self.fetch(Endpoint::get(Service::Preprocess, ["preview", name]), RequestBody::Empty).await
    }

    pub async fn preprocess_summary(&self, name: &str) -> Result<SummaryReport, ApiError> {
        self.fetch(Endpoint::get(Service::Preprocess, ["summary", name]), RequestBody::Empty).await
    }

    pub async fn clean(&self, name: &str) -> Result<CleanReport, ApiError> {
        self.fetch(Endpoint::post(Service::Preprocess, ["clean", name]), RequestBody::Empty).await
    }

    pub async fn convert_to_csv(&self, name: &str) -> Result<ConvertReport, ApiError> {
        self.fetch(Endpoint::post(Service::Preprocess, ["convert", "csv", name]), RequestBody::Empty)
            .await
    }

    // ── /bias ────────────────────────────────────────────────────────

    pub async fn bias_overview(&self, name: &str) -> Result<BiasOverview, ApiError> {
        self.fetch(Endpoint::get(Service::Bias, ["overview", name]), RequestBody::Empty).await
    }

    pub async fn class_imbalance(&self, name: &str, target: &str) -> Result<ClassImbalance, ApiError> {
        let endpoint = Endpoint::get(Service::Bias, ["imbalance", name]).with_query("target", target);
        self.fetch(endpoint, RequestBody::Empty).await
    }

    pub async fn missing_bias(&self, name: &str) -> Result<MissingBias, ApiError> {
        self.fetch(Endpoint::get(Service::Bias, ["missing", name]), RequestBody::Empty).await
    }

    pub async fn numeric_bias(&self, name: &str) -> Result<NumericBias, ApiError> {
        self.fetch(Endpoint::get(Service::Bias, ["numeric", name]), RequestBody::Empty).await
    }

    // ── /privacy ─────────────────────────────────────────────────────

    pub async fn privacy_audit(&self, file: &UploadFile) -> Result<PrivacyReport, ApiError> {
        self.fetch(Endpoint::post(Service::Privacy, ["audit"]), RequestBody::File(file)).await
    }

    // ── /sim ─────────────────────────────────────────────────────────

    pub async fn run_simulation(&self, input: &SimulationInput) -> Result<SimulationResult, ApiError> {
        let body = serde_json::to_value(input)
            .map_err(|e| ApiError::decode(format!("Failed to encode simulation input: {e}")))?;
        self.fetch(Endpoint::post(Service::Simulation, ["run"]), RequestBody::Json(&body)).await
    }

    // ── /dashboard ───────────────────────────────────────────────────

    pub async fn dashboard_summary(&self, name: &str) -> Result<DashboardSummary, ApiError> {
        self.fetch(Endpoint::get(Service::Dashboard, ["summary", name]), RequestBody::Empty).await
    }

    pub async fn vehicle_distribution(&self, name: &str) -> Result<VehicleDistribution, ApiError> {
        self.fetch(Endpoint::get(Service::Dashboard, ["vehicle-distribution", name]), RequestBody::Empty)
            .await
    }

    pub async fn collision_risk(&self, name: &str) -> Result<CollisionRiskDistribution, ApiError> {
        self.fetch(Endpoint::get(Service::Dashboard, ["collision-risk", name]), RequestBody::Empty)
            .await
    }

    pub async fn environment(&self, name: &str) -> Result<EnvironmentBreakdown, ApiError> {
        self.fetch(Endpoint::get(Service::Dashboard, ["environment", name]), RequestBody::Empty).await
    }

    pub async fn speed_stats(&self, name: &str) -> Result<SpeedStats, ApiError> {
        self.fetch(Endpoint::get(Service::Dashboard, ["speed-stats", name]), RequestBody::Empty).await
    }

    pub async fn vru_distance(&self, name: &str) -> Result<VruDistanceStats, ApiError> {
        self.fetch(Endpoint::get(Service::Dashboard, ["vru-distance", name]), RequestBody::Empty).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use serde_json::json;

    /// Answers every request with the same body and records what was asked.
    struct Canned {
        body: Result<Value, ApiError>,
        seen: RefCell<Vec<(String, bool)>>,
    }

    impl Transport for Canned {
        async fn request(&self, endpoint: &Endpoint, body: RequestBody<'_>) -> Result<Value, ApiError> {
            let has_file = matches!(body, RequestBody::File(_));
            self.seen.borrow_mut().push((endpoint.to_string(), has_file));
            self.body.clone()
        }
    }

    fn client(body: Result<Value, ApiError>) -> LabClient<Canned> {
        LabClient::with_transport(Canned { body, seen: RefCell::new(Vec::new()) })
    }

    #[tokio::test]
    async fn test_typed_call_targets_expected_endpoint() {
        let client = client(Ok(json!({"distribution_percent": {"high": 12.5, "low": 87.5}})));
        let report = client.class_imbalance("trips.csv", "collision_risk").await.unwrap();
        assert_eq!(report.distribution_percent.keys().collect::<Vec<_>>(), ["high", "low"]);
        assert_eq!(
            client.transport().seen.borrow().as_slice(),
            [("GET /bias/imbalance/trips.csv?target=collision_risk".to_string(), false)]
        );
    }

    #[tokio::test]
    async fn test_upload_sends_file_part() {
        let client = client(Ok(json!({"message": "File uploaded successfully"})));
        let file = UploadFile { name: "trips.csv".into(), bytes: b"a,b\n1,2\n".to_vec() };
        let receipt = client.upload(&file).await.unwrap();
        assert_eq!(receipt.message, "File uploaded successfully");
        assert_eq!(
            client.transport().seen.borrow().as_slice(),
            [("POST /data/upload".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let client = client(Ok(json!({"files": "not-a-list"})));
        match client.files().await {
            Err(ApiError::Decode { message }) => assert!(message.starts_with("/data/files")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_network_error_passes_through() {
        let err = ApiError::from_status(404, r#"{"detail": "File not found"}"#);
        let client = client(Err(err.clone()));
        assert_eq!(client.bias_overview("gone.csv").await, Err(err));
    }
}
