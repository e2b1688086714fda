use crate::app_dirs::AppDirs;
use crate::cloze::{Mode, OffsetPolicy};
use crate::passage::Difficulty;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SLIDER_MIN: u8 = 1;
pub const SLIDER_MAX: u8 = 10;
pub const MAX_DECOY_MULTIPLIER: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub difficulty: Difficulty,
    pub percentage: u8,
    pub min_percentage: u8,
    pub max_percentage: u8,
    pub mode: Mode,
    pub include_decoys: bool,
    pub decoy_multiplier: f64,
    pub min_core_len: usize,
    pub letters_only: bool,
    pub offset_policy: OffsetPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Beginner,
            percentage: 15,
            min_percentage: 5,
            max_percentage: 25,
            mode: Mode::Full,
            include_decoys: false,
            decoy_multiplier: 0.5,
            min_core_len: crate::cloze::population::DEFAULT_MIN_CORE_LEN,
            letters_only: true,
            offset_policy: OffsetPolicy::Edges,
        }
    }
}

fn ordered(min: u8, max: u8) -> (u8, u8) {
    let (min, max) = (min.min(100), max.min(100));
    if min > max {
        warn!(min, max, "percentage bounds reversed, swapping");
        (max, min)
    } else {
        (min, max)
    }
}

/// Clamp an explicit percentage into the configured range.
pub fn clamp_percentage(percentage: u8, min: u8, max: u8) -> u8 {
    let (min, max) = ordered(min, max);
    percentage.clamp(min, max)
}

/// Keep the decoy multiplier within `0.0..=MAX_DECOY_MULTIPLIER`. NaN disables decoys.
pub fn clamp_decoy_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_nan() {
        warn!("decoy multiplier is not a number, using 0");
        return 0.0;
    }
    let clamped = multiplier.clamp(0.0, MAX_DECOY_MULTIPLIER);
    if clamped != multiplier {
        warn!(multiplier, clamped, "decoy multiplier out of range");
    }
    clamped
}

/// Map a 1-10 slider position linearly onto `min..=max` percent.
pub fn percentage_from_slider(slider: u8, min: u8, max: u8) -> u8 {
    let (min, max) = ordered(min, max);
    let step = f64::from(slider.clamp(SLIDER_MIN, SLIDER_MAX) - SLIDER_MIN);
    let span = f64::from(SLIDER_MAX - SLIDER_MIN);
    let percentage = f64::from(min) + step / span * f64::from(max - min);
    percentage.round() as u8
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err, "ignoring unreadable config")
                }
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
