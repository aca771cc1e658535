use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assets::{AssetCatalog, DEFAULT_AUDIO};
use crate::constants::*;
use crate::error::{ShowError, ShowResult};

pub const MAX_FPS: u32 = 240;
/// Longest synthetic run `simulate` accepts, in show seconds.
pub const MAX_UNTIL: f32 = SHOW_LENGTH * 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ShowConfig {
    pub assets_dir: PathBuf,
    /// Defaults to `song.mp3` inside `assets_dir`.
    pub audio: Option<PathBuf>,
    /// Fixed seed for caption placement and entrances; OS entropy when unset.
    pub seed: Option<u64>,
    pub fps: u32,
    pub record: Option<PathBuf>,
    /// Show clock time a synthetic run stops at.
    pub until: f32,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            audio: None,
            seed: None,
            fps: FPS,
            record: None,
            until: SHOW_LENGTH,
        }
    }
}

impl ShowConfig {
    pub fn validate(&self) -> ShowResult<()> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ShowError::config(format!("frame rate must be within 1..={MAX_FPS}, got {}", self.fps)));
        }
        if !(0.0..=MAX_UNTIL).contains(&self.until) {
            return Err(ShowError::config(format!("--until must be within 0..={MAX_UNTIL} seconds, got {}", self.until)));
        }
        if let Some(record) = &self.record {
            if record.extension().and_then(|e| e.to_str()) != Some("mp4") {
                return Err(ShowError::config(format!("recording must be an .mp4 file, got {}", record.display())));
            }
        }
        Ok(())
    }

    /// Validation for runs that load assets.
    pub fn validate_assets(&self) -> ShowResult<()> {
        self.validate()?;
        if !self.assets_dir.is_dir() {
            return Err(ShowError::config(format!(
                "assets directory {} does not exist",
                self.assets_dir.display()
            )));
        }
        Ok(())
    }

    pub fn audio_path(&self) -> PathBuf {
        self.audio.clone().unwrap_or_else(|| self.assets_dir.join(DEFAULT_AUDIO))
    }

    pub fn frame_time(&self) -> f32 {
        1.0 / self.fps as f32
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn catalog(&self) -> AssetCatalog {
        AssetCatalog::probe(&self.assets_dir, &self.audio_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_and_points_at_assets() {
        let config = ShowConfig::default();
        config.validate().unwrap();
        assert_eq!(config.audio_path(), PathBuf::from("assets").join("song.mp3"));
        assert!((config.frame_time() - FRAME_TIME).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_frame_rates_and_recordings() {
        let config = ShowConfig { fps: 0, ..ShowConfig::default() };
        assert!(config.validate().is_err());
        let config = ShowConfig { fps: 1000, ..ShowConfig::default() };
        assert!(config.validate().is_err());
        let config = ShowConfig { record: Some(PathBuf::from("out.gif")), ..ShowConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unbounded_simulation_lengths() {
        for until in [f32::INFINITY, f32::NAN, -1.0, 1e9, MAX_UNTIL + 1.0] {
            let config = ShowConfig { until, ..ShowConfig::default() };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("--until"), "{until}: {err}");
        }
        let config = ShowConfig { until: MAX_UNTIL, ..ShowConfig::default() };
        config.validate().unwrap();
    }

    #[test]
    fn missing_assets_dir_is_a_config_error() {
        let config = ShowConfig { assets_dir: PathBuf::from("/definitely/not/here"), ..ShowConfig::default() };
        let err = config.validate_assets().unwrap_err();
        assert!(err.to_string().starts_with("config error:"));
    }

    #[test]
    fn seeded_rngs_repeat() {
        use rand::Rng;
        let config = ShowConfig { seed: Some(42), ..ShowConfig::default() };
        let a: u32 = config.rng().random();
        let b: u32 = config.rng().random();
        assert_eq!(a, b);
    }
}
