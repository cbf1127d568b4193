use std::path::PathBuf;

/// Dataset file name published by the ward.
pub const DEFAULT_DATASET: &str = "20250601_hoikuen_utf8.csv";

pub const DATASET_ENV: &str = "NURSERY_MAP_DATA";
pub const STORE_ENV: &str = "NURSERY_MAP_STORE";

/// Meguro ward centre (latitude, longitude); frames the map when nothing is shown.
pub const MAP_CENTER: (f64, f64) = (35.6339, 139.6917);

/// Runtime configuration resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub store_path: PathBuf,
}

impl AppConfig {
    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::resolve(
            &args,
            std::env::var_os(DATASET_ENV).map(PathBuf::from),
            std::env::var_os(STORE_ENV).map(PathBuf::from),
        )
    }

    /// Dataset: first positional argument, then `NURSERY_MAP_DATA`, then the
    /// default file in the working directory. Store: `NURSERY_MAP_STORE`, then
    /// the platform data directory.
    pub fn resolve(args: &[String], dataset_env: Option<PathBuf>, store_env: Option<PathBuf>) -> Self {
        let dataset_path = args
            .get(1)
            .map(PathBuf::from)
            .or(dataset_env)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));
        let store_path = store_env.unwrap_or_else(default_store_path);
        Self {
            dataset_path,
            store_path,
        }
    }
}

/// Default store location following platform conventions.
///
/// - Linux: `~/.local/share/nursery-map/storage.json`
/// - macOS: `~/Library/Application Support/nursery-map/storage.json`
/// - Windows: `C:\Users\<user>\AppData\Local\nursery-map\storage.json`
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nursery-map")
        .join("storage.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve(&args(&["nursery-map"]), None, None);
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET));
        assert_eq!(config.store_path, default_store_path());
        assert!(config.store_path.ends_with("nursery-map/storage.json"));
    }

    #[test]
    fn test_argument_beats_environment() {
        let config = AppConfig::resolve(
            &args(&["nursery-map", "data/june.csv"]),
            Some(PathBuf::from("env.csv")),
            Some(PathBuf::from("/tmp/store.json")),
        );
        assert_eq!(config.dataset_path, PathBuf::from("data/june.csv"));
        assert_eq!(config.store_path, PathBuf::from("/tmp/store.json"));
    }

    #[test]
    fn test_environment_used_without_argument() {
        let config = AppConfig::resolve(&args(&["nursery-map"]), Some(PathBuf::from("env.csv")), None);
        assert_eq!(config.dataset_path, PathBuf::from("env.csv"));
    }
}
