use lab_client::LabConfig;
use web_sys::Storage;

/// localStorage key holding the last backend base URL passed via `?api=`.
pub const STORAGE_KEY: &str = "v2v-lab.api-base";

/// Backend base URL, first match wins: `?api=`, localStorage, the
/// `V2V_LAB_API` build variable, then the default.
pub fn resolve() -> LabConfig {
    let window = web_sys::window();
    let from_query = window
        .as_ref()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| query_param(&search, "api"));
    let storage = window.as_ref().and_then(|w| w.local_storage().ok().flatten());

    if let (Some(api), Some(storage)) = (&from_query, &storage) {
        remember(storage, api);
    }
    let stored = storage.as_ref().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());

    let config = LabConfig::resolve([from_query, stored, option_env!("V2V_LAB_API").map(String::from)]);
    log::info!("Backend: {}", config.base_url());
    config
}

fn remember(storage: &Storage, api: &str) {
    if LabConfig::parse(api).is_err() {
        return;
    }
    if storage.set_item(STORAGE_KEY, api.trim()).is_err() {
        log::warn!("Could not persist API base to localStorage");
    }
}

/// Value of `key` in a `?a=b&c=d` search string.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
