use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "gapfill")
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("gapfill_config.json"))
    }

    /// Where the last exercise is kept between runs.
    pub fn snapshot_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("gapfill")
                .join("exercise.json")
        } else {
            ProjectDirs::from("", "", "gapfill")
                .map(|pd| pd.data_local_dir().join("exercise.json"))
                .unwrap_or_else(|| PathBuf::from("gapfill_exercise.json"))
        }
    }
}
