//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;
use reqwest::Url;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::geo::MAX_ZOOM;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [api] section
    if let Some(section) = ini.section(Some("api")) {
        if let Some(v) = section.get("base_url") {
            let v = v.trim();
            let valid = Url::parse(v)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                return Err(invalid("api", "base_url", v, "must be an http or https URL"));
            }
            config.api.base_url = v.to_string();
        }
        if let Some(v) = section.get("api_key") {
            let v = v.trim();
            if v.is_empty() {
                return Err(invalid("api", "api_key", v, "must not be empty"));
            }
            config.api.api_key = v.to_string();
        }
        if let Some(v) = section.get("locale") {
            let v = v.trim();
            if !v.is_empty() {
                config.api.locale = v.to_string();
            }
        }
        if let Some(v) = section.get("location_limit") {
            config.api.location_limit = match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(invalid(
                        "api",
                        "location_limit",
                        v,
                        "must be a positive integer",
                    ))
                }
            };
        }
        if let Some(v) = section.get("include_muni") {
            config.api.include_muni = parse_bool(v)
                .ok_or_else(|| invalid("api", "include_muni", v, "must be true or false"))?;
        }
        if let Some(v) = section.get("timeout") {
            config.api.timeout = match v.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(invalid(
                        "api",
                        "timeout",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("location_zoom_threshold") {
            config.map.location_zoom_threshold = match v.trim().parse::<u8>() {
                Ok(n) if n <= MAX_ZOOM => n,
                _ => {
                    return Err(invalid(
                        "map",
                        "location_zoom_threshold",
                        v,
                        &format!("must be an integer between 0 and {}", MAX_ZOOM),
                    ))
                }
            };
        }
        if let Some(v) = section.get("location_prefetch_multiplier") {
            config.map.location_prefetch_multiplier =
                parse_multiplier(v).ok_or_else(|| {
                    invalid(
                        "map",
                        "location_prefetch_multiplier",
                        v,
                        "must be a number of at least 1.0",
                    )
                })?;
        }
        if let Some(v) = section.get("cluster_prefetch_multiplier") {
            config.map.cluster_prefetch_multiplier =
                parse_multiplier(v).ok_or_else(|| {
                    invalid(
                        "map",
                        "cluster_prefetch_multiplier",
                        v,
                        "must be a number of at least 1.0",
                    )
                })?;
        }
        if let Some(v) = section.get("stale_entry_policy") {
            config.map.stale_entry_policy = v.parse().map_err(|_| {
                invalid("map", "stale_entry_policy", v, "must be 'retain' or 'evict'")
            })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if v.is_empty() || v.contains(['/', '\\']) {
                return Err(invalid(
                    "logging",
                    "file",
                    v,
                    "must be a plain file name",
                ));
            }
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn parse_multiplier(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite() && *m >= 1.0)
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::StaleEntryPolicy;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    fn assert_invalid(content: &str, expected_key: &str) {
        match parse(content) {
            Err(ConfigFileError::InvalidValue { key, .. }) => assert_eq!(key, expected_key),
            other => panic!("expected invalid {}, got {:?}", expected_key, other),
        }
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = parse(
            r#"
[api]
base_url = http://localhost:3000
api_key = TESTKEY
locale = de
location_limit = 100
include_muni = no
timeout = 10

[map]
location_zoom_threshold = 15
location_prefetch_multiplier = 1.25
cluster_prefetch_multiplier = 3
stale_entry_policy = evict

[logging]
directory = /tmp/fruitwalk-logs
file = map.log
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.api_key, "TESTKEY");
        assert_eq!(config.api.locale, "de");
        assert_eq!(config.api.location_limit, 100);
        assert!(!config.api.include_muni);
        assert_eq!(config.api.timeout, 10);
        assert_eq!(config.map.location_zoom_threshold, 15);
        assert_eq!(config.map.location_prefetch_multiplier, 1.25);
        assert_eq!(config.map.cluster_prefetch_multiplier, 3.0);
        assert_eq!(config.map.stale_entry_policy, StaleEntryPolicy::Evict);
        assert_eq!(
            config.logging.directory,
            PathBuf::from("/tmp/fruitwalk-logs")
        );
        assert_eq!(config.logging.file, "map.log");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert_invalid("[api]\nbase_url = ftp://example.com", "base_url");
        assert_invalid("[api]\nbase_url = not a url", "base_url");
        assert_invalid("[api]\napi_key = ", "api_key");
        assert_invalid("[api]\nlocation_limit = 0", "location_limit");
        assert_invalid("[api]\ninclude_muni = maybe", "include_muni");
        assert_invalid("[api]\ntimeout = -5", "timeout");
        assert_invalid("[map]\nlocation_zoom_threshold = 30", "location_zoom_threshold");
        assert_invalid(
            "[map]\nlocation_prefetch_multiplier = 0.5",
            "location_prefetch_multiplier",
        );
        assert_invalid(
            "[map]\ncluster_prefetch_multiplier = NaN",
            "cluster_prefetch_multiplier",
        );
        assert_invalid("[map]\nstale_entry_policy = lru", "stale_entry_policy");
        assert_invalid("[logging]\nfile = logs/map.log", "file");
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/var/log"), PathBuf::from("/var/log"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/logs"), home.join("logs"));
        }
    }
}
