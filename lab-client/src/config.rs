use url::Url;
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Where the backend lives. Service prefixes (`/data`, `/bias`, ...) are
/// joined onto this base.
#[derive(Clone, Debug, PartialEq)]
pub struct LabConfig {
    base_url: Url,
}

impl LabConfig {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let raw = raw.trim();
        let fail = |reason: &str| ApiError::Config { url: raw.to_string(), reason: reason.to_string() };

        let base_url = Url::parse(raw).map_err(|e| fail(&e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(fail("scheme must be http or https"));
        }
        if base_url.cannot_be_a_base() {
            return Err(fail("not a base URL"));
        }
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(fail("must not carry a query or fragment"));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Pick the first candidate that parses, in priority order.
    ///
    /// Unparseable candidates are logged and skipped; with no usable
    /// candidate the default base is returned.
    pub fn resolve<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        for raw in candidates.into_iter().flatten() {
            if raw.trim().is_empty() {
                continue;
            }
            match Self::parse(&raw) {
                Ok(config) => return config,
                Err(e) => log::warn!("Ignoring API base: {e}"),
            }
        }
        Self::default()
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL parses"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        assert_eq!(LabConfig::default().base_url().as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(matches!(LabConfig::parse("ftp://example.org"), Err(ApiError::Config { .. })));
        assert!(LabConfig::parse("mailto:someone@example.org").is_err());
        assert!(LabConfig::parse("http://host:8000/?x=1").is_err());
    }

    #[test]
    fn test_resolve_takes_first_valid_candidate() {
        let config = LabConfig::resolve([
            None,
            Some("not a url".to_string()),
            Some("  ".to_string()),
            Some("https://lab.example.org/api".to_string()),
            Some("http://ignored:1".to_string()),
        ]);
        assert_eq!(config.base_url().as_str(), "https://lab.example.org/api");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let config = LabConfig::resolve([Some("::".to_string()), None]);
        assert_eq!(config, LabConfig::default());
    }
}
