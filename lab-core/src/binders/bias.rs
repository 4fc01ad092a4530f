use lab_client::{ApiError, KeyedSeries, LabClient, Transport};
use crate::binders::{require_dataset, Field};
use crate::chart::{ChartKind, ChartSpec, BAR_PALETTE, CATEGORY_PALETTE, MISSING_PALETTE};
use crate::error::{BinderError, Required};

#[derive(Clone, Debug, PartialEq)]
pub struct MissingView {
    /// `column: count`, in `columns_with_missing` order.
    pub entries: Vec<Field>,
    pub chart: ChartSpec,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NumericEntry {
    pub column: String,
    pub skewness: f64,
    pub outliers: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NumericView {
    pub entries: Vec<NumericEntry>,
    pub chart: ChartSpec,
}

pub async fn overview<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<Vec<Field>, BinderError> {
    let name = require_dataset(dataset)?;
    let resp = client.bias_overview(name).await?;
    Ok(vec![
        Field::new("Bias Score", resp.bias_score),
        Field::new("Missing Value Rate", resp.missing_value_rate),
        Field::new("Average Skewness", resp.avg_skewness),
    ])
}

pub async fn class_imbalance<T: Transport>(
    client: &LabClient<T>,
    dataset: Option<&str>,
    target: Option<&str>,
) -> Result<ChartSpec, BinderError> {
    let mut req = Required::default();
    let name = req.text("dataset", dataset);
    let target = req.text("target", target);
    req.finish()?;

    let resp = client.class_imbalance(name, target).await?;
    Ok(ChartSpec::pie(&resp.distribution_percent, CATEGORY_PALETTE))
}

pub async fn missing<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<MissingView, BinderError> {
    let name = require_dataset(dataset)?;
    let resp = client.missing_bias(name).await?;

    let pairs = lookup_all(&resp.columns_with_missing, &resp.missing_by_column, "missing_by_column")?;
    let entries = pairs.iter().map(|(col, n)| Field::new(*col, n)).collect();
    Ok(MissingView {
        entries,
        chart: ChartSpec::from_pairs(ChartKind::Pie, pairs, MISSING_PALETTE),
    })
}

pub async fn numeric<T: Transport>(client: &LabClient<T>, dataset: Option<&str>) -> Result<NumericView, BinderError> {
    let name = require_dataset(dataset)?;
    let resp = client.numeric_bias(name).await?;

    let skew = lookup_all(&resp.numeric_columns, &resp.skewness, "skewness")?;
    let outliers = lookup_all(&resp.numeric_columns, &resp.outliers_per_column, "outliers_per_column")?;
    let entries = skew
        .iter()
        .zip(&outliers)
        .map(|((column, skewness), (_, outliers))| NumericEntry {
            column: column.to_string(),
            skewness: *skewness,
            outliers: *outliers,
        })
        .collect();
    let chart = ChartSpec::from_pairs(ChartKind::Bar, skew, BAR_PALETTE).with_series_label("Skewness");
    Ok(NumericView { entries, chart })
}

/// Values for `columns`, in that order. A column the map doesn't carry means
/// the response is inconsistent with itself.
fn lookup_all<'a>(
    columns: &'a [String],
    values: &KeyedSeries<f64>,
    map_name: &str,
) -> Result<Vec<(&'a str, f64)>, BinderError> {
    columns
        .iter()
        .map(|col| match values.get(col) {
            Some(v) => Ok((col.as_str(), *v)),
            None => Err(ApiError::decode(format!("{map_name} has no entry for column '{col}'")).into()),
        })
        .collect()
}
