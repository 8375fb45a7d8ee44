use std::path::PathBuf;

use showcase_core::error::CoreError;
use showcase_db::StoreNames;
use showcase_events::bus::DEFAULT_CAPACITY;

/// Placement engine configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct PlacementConfig {
    /// Named store per vertical.
    pub store_names: StoreNames,
    /// Root directory for the directory-backed store (default: `./data/kv`).
    pub local_store_dir: PathBuf,
    /// Broadcast buffer for placement events (default: `1024`).
    pub event_bus_capacity: usize,
}

impl PlacementConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var              | Default             |
    /// |----------------------|---------------------|
    /// | `CLASSIFIEDS_STORE`  | `classifieds-store` |
    /// | `SERVICES_STORE`     | `services-store`    |
    /// | `LOCAL_STORE_DIR`    | `./data/kv`         |
    /// | `EVENT_BUS_CAPACITY` | `1024`              |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = StoreNames::default();

        let store_names = StoreNames {
            classifieds: non_empty("CLASSIFIEDS_STORE").unwrap_or(defaults.classifieds),
            services: non_empty("SERVICES_STORE").unwrap_or(defaults.services),
        };
        if store_names.classifieds == store_names.services {
            return Err(CoreError::Validation(format!(
                "CLASSIFIEDS_STORE and SERVICES_STORE must differ, both are '{}'",
                store_names.services
            )));
        }

        let local_store_dir = non_empty("LOCAL_STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/kv"));

        let event_bus_capacity = match non_empty("EVENT_BUS_CAPACITY") {
            Some(raw) => raw.parse::<usize>().ok().filter(|c| *c > 0).ok_or_else(|| {
                CoreError::Validation(format!(
                    "EVENT_BUS_CAPACITY must be a positive integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_CAPACITY,
        };

        Ok(Self {
            store_names,
            local_store_dir,
            event_bus_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<PlacementConfig, CoreError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlacementConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.store_names, StoreNames::default());
        assert_eq!(config.local_store_dir, PathBuf::from("./data/kv"));
        assert_eq!(config.event_bus_capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("CLASSIFIEDS_STORE", "cls"),
            ("SERVICES_STORE", " svc "),
            ("LOCAL_STORE_DIR", "/var/lib/showcase"),
            ("EVENT_BUS_CAPACITY", "16"),
        ])
        .unwrap();
        assert_eq!(config.store_names.classifieds, "cls");
        assert_eq!(config.store_names.services, "svc");
        assert_eq!(config.local_store_dir, PathBuf::from("/var/lib/showcase"));
        assert_eq!(config.event_bus_capacity, 16);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("CLASSIFIEDS_STORE", "   ")]).unwrap();
        assert_eq!(config.store_names.classifieds, "classifieds-store");
    }

    #[test]
    fn invalid_capacity_is_rejected() {
        for raw in ["zero", "-4", "0"] {
            let err = load(&[("EVENT_BUS_CAPACITY", raw)]).unwrap_err();
            assert!(err.to_string().contains("EVENT_BUS_CAPACITY"));
        }
    }

    #[test]
    fn shared_store_name_is_rejected() {
        let err = load(&[("CLASSIFIEDS_STORE", "kv"), ("SERVICES_STORE", "kv")]).unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }
}
