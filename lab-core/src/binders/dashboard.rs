use lab_client::{LabClient, Transport};
use crate::binders::{compact_json, require_dataset, Field};
use crate::chart::{ChartSpec, CATEGORY_PALETTE};
use crate::error::BinderError;

#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentView {
    /// Which breakdown the server sent.
    pub label: &'static str,
    pub chart: ChartSpec,
}

pub async fn summary<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<Vec<Field>, BinderError> {
    let name = require_dataset(dataset)?;
    let resp = client.dashboard_summary(name).await?;
    Ok(vec![
        Field::new("Total Records", resp.total_records),
        Field::new("Columns", resp.columns.join(", ")),
        Field::new("Missing Values", compact_json(&resp.missing_values)),
        Field::new("Column Types", compact_json(&resp.dtypes)),
    ])
}

pub async fn vehicle_distribution<T: Transport>(
    client: &LabClient<T>,
    dataset: Option<&str>,
) -> Result<ChartSpec, BinderError> {
    let name = require_dataset(dataset)?;
    let resp = client.vehicle_distribution(name).await?;
    Ok(ChartSpec::pie(&resp.vehicle_distribution, CATEGORY_PALETTE))
}

pub async fn collision_risk<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<ChartSpec, BinderError> {
    let name = require_dataset(dataset)?;
    let resp = client.collision_risk(name).await?;
    Ok(ChartSpec::pie(&resp.collision_risk_distribution, CATEGORY_PALETTE))
}

pub async fn environment<T: Transport>(
    client: &LabClient<T>,
    dataset: Option<&str>,
) -> Result<EnvironmentView, BinderError> {
    let name = require_dataset(dataset)?;
    let breakdown = client.environment(name).await?;
    Ok(EnvironmentView {
        label: breakdown.label(),
        chart: ChartSpec::pie(breakdown.series(), CATEGORY_PALETTE),
    })
}

pub async fn speed_stats<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<String, BinderError> {
    let name = require_dataset(dataset)?;
    let s = client.speed_stats(name).await?;
    Ok(format!(
        "Min: {}, Max: {}, Avg: {}, Median: {}, Std: {}",
        s.min_speed, s.max_speed, s.avg_speed, s.median_speed, s.std_speed
    ))
}

pub async fn vru_distance<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<String, BinderError> {
    let name = require_dataset(dataset)?;
    let d = client.vru_distance(name).await?;
    Ok(format!("Avg: {}, Min: {}, Max: {}", d.average_distance, d.min_distance, d.max_distance))
}

/// Every dashboard region for one dataset. Each result stands alone.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardReport {
    pub summary: Result<Vec<Field>, BinderError>,
    pub vehicles: Result<ChartSpec, BinderError>,
    pub collision: Result<ChartSpec, BinderError>,
    pub environment: Result<EnvironmentView, BinderError>,
    pub speed: Result<String, BinderError>,
    pub vru: Result<String, BinderError>,
}

/// Fetch the six dashboard endpoints one after another. A failing endpoint
/// does not stop the ones after it.
pub async fn load<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<DashboardReport, BinderError> {
    let dataset = Some(require_dataset(dataset)?);
    let report = DashboardReport {
        summary: summary(client, dataset).await,
        vehicles: vehicle_distribution(client, dataset).await,
        collision: collision_risk(client, dataset).await,
        environment: environment(client, dataset).await,
        speed: speed_stats(client, dataset).await,
        vru: vru_distance(client, dataset).await,
    };
    let failed = report.failures();
    if failed > 0 {
        log::warn!("Dashboard for {}: {failed} of 6 regions failed", dataset.unwrap_or_default());
    }
    Ok(report)
}

impl DashboardReport {
    pub fn failures(&self) -> usize {
        [
            self.summary.is_err(),
            self.vehicles.is_err(),
            self.collision.is_err(),
            self.environment.is_err(),
            self.speed.is_err(),
            self.vru.is_err(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }
}
