use std::fmt;
use url::Url;
use crate::config::LabConfig;
use crate::error::ApiError;

/// The six backend services, each mounted under its own path prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Service {
    Data,
    Preprocess,
    Bias,
    Privacy,
    Simulation,
    Dashboard,
}

impl Service {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Preprocess => "preprocess",
            Self::Bias => "bias",
            Self::Privacy => "privacy",
            Self::Simulation => "sim",
            Self::Dashboard => "dashboard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// A concrete request target: service, path segments and query pairs.
///
/// Segments are stored raw. A dataset name is always one segment no matter
/// what characters it contains; encoding happens in [`Endpoint::url`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub service: Service,
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, String)>,
}

impl Endpoint {
    pub fn new<I, S>(method: Method, service: Service, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            service,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    pub fn get<I, S>(service: Service, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Get, service, segments)
    }

    pub fn post<I, S>(service: Service, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Post, service, segments)
    }

    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Unencoded route, e.g. `/bias/missing/run 1.csv`. Used for logging and
    /// for matching requests in tests.
    pub fn route(&self) -> String {
        let mut route = format!("/{}", self.service.prefix());
        for seg in &self.segments {
            route.push('/');
            route.push_str(seg);
        }
        route
    }

    /// Absolute URL under `config`'s base, with every segment percent-encoded.
    pub fn url(&self, config: &LabConfig) -> Result<Url, ApiError> {
        let mut url = config.base_url().clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| ApiError::Config {
                url: config.base_url().to_string(),
                reason: "not a base URL".into(),
            })?;
            path.pop_if_empty();
            path.push(self.service.prefix());
            for seg in &self.segments {
                path.push(seg);
            }
        }
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.route())?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            write!(f, "{}{k}={v}", if i == 0 { '?' } else { '&' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_service_prefix() {
        let config = LabConfig::default();
        let url = Endpoint::get(Service::Data, ["files"]).url(&config).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/data/files");
    }

    #[test]
    fn test_base_path_is_preserved() {
        let config = LabConfig::parse("https://lab.example.org/api/").unwrap();
        let url = Endpoint::post(Service::Simulation, ["run"]).url(&config).unwrap();
        assert_eq!(url.as_str(), "https://lab.example.org/api/sim/run");
    }

    #[test]
    fn test_filename_is_a_single_opaque_segment() {
        let config = LabConfig::default();
        let url = Endpoint::get(Service::Data, ["preview", "a b/c?d#e.csv"])
            .url(&config)
            .unwrap();
        assert_eq!(url.path(), "/data/preview/a%20b%2Fc%3Fd%23e.csv");
        assert_eq!(url.query(), None);
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn test_query_value_is_encoded() {
        let config = LabConfig::default();
        let endpoint = Endpoint::get(Service::Bias, ["imbalance", "trips.csv"])
            .with_query("target", "risk & class");
        let url = endpoint.url(&config).unwrap();
        assert_eq!(url.query(), Some("target=risk+%26+class"));
        assert_eq!(endpoint.to_string(), "GET /bias/imbalance/trips.csv?target=risk & class");
    }

    #[test]
    fn test_route_is_unencoded() {
        let endpoint = Endpoint::get(Service::Dashboard, ["vru-distance", "run 1.csv"]);
        assert_eq!(endpoint.route(), "/dashboard/vru-distance/run 1.csv");
    }
}
