//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[api]
; Falling Fruit server root
base_url = {}
; API key sent with every request
api_key = {}
; Locale for type names and descriptions
locale = {}
; Maximum locations returned per map request
location_limit = {}
; Include municipal tree inventories (true/false)
include_muni = {}
; Request timeout in seconds
timeout = {}

[map]
; Zoom at which the map switches from clusters to individual locations.
; Keep this at or below the server's own location zoom floor.
location_zoom_threshold = {}
; How much larger than the visible region to fetch, per item kind
location_prefetch_multiplier = {}
cluster_prefetch_multiplier = {}
; What the region cache does with an entry that misses:
;   retain - keep it until the next fetch at that zoom replaces it
;   evict  - drop it immediately
stale_entry_policy = {}

[logging]
directory = {}
file = {}
"#,
        config.api.base_url,
        config.api.api_key,
        config.api.locale,
        config.api.location_limit,
        config.api.include_muni,
        config.api.timeout,
        config.map.location_zoom_threshold,
        config.map.location_prefetch_multiplier,
        config.map.cluster_prefetch_multiplier,
        config.map.stale_entry_policy,
        config.logging.directory.to_string_lossy(),
        config.logging.file,
    )
}
