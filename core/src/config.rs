use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_path_to_error as spte;

use crate::column::{DEFAULT_COLUMN_WIDTH, DEFAULT_DATA_START_X};
use crate::detect::{DetectionPolicy, DetectorParams};
use crate::error::{ProfilerError, Result};
use crate::source::DEFAULT_PROFILER_URL;

/// Alle innstillinger for én kjøring. Manglende felt i JSON får default.
///
/// `column_width` og `data_start_x` beskriver layouten til kildebildet; endres
/// layouten der, blir deteksjonen stille dårligere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilerConfig {
    pub url: String,
    pub column_width: u32,
    pub data_start_x: u32,
    pub top_alt_ft: f64,
    pub base_alt_ft: f64,
    pub detection_max_ft: f64,
    /// 1 = strict (første ikke-marine rad avslutter laget)
    pub required_nonmarine: usize,
    pub timeout_secs: u64,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PROFILER_URL.to_string(),
            column_width: DEFAULT_COLUMN_WIDTH,
            data_start_x: DEFAULT_DATA_START_X,
            top_alt_ft: 5000.0,
            base_alt_ft: 0.0,
            detection_max_ft: 3500.0,
            required_nonmarine: 3,
            timeout_secs: 10,
        }
    }
}

impl ProfilerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.column_width == 0 {
            return Err(ProfilerError::Config("column_width must be > 0".into()));
        }
        if !self.top_alt_ft.is_finite()
            || !self.base_alt_ft.is_finite()
            || !self.detection_max_ft.is_finite()
        {
            return Err(ProfilerError::Config("altitudes must be finite".into()));
        }
        if self.top_alt_ft == self.base_alt_ft {
            return Err(ProfilerError::Config(
                "top_alt_ft and base_alt_ft must differ".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ProfilerError::Config("timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    pub fn policy(&self) -> DetectionPolicy {
        if self.required_nonmarine <= 1 {
            DetectionPolicy::Strict
        } else {
            DetectionPolicy::Debounced { required_nonmarine: self.required_nonmarine }
        }
    }

    pub fn detector_params(&self) -> DetectorParams {
        DetectorParams {
            base_alt_ft: self.base_alt_ft,
            top_alt_ft: self.top_alt_ft,
            detection_max_ft: self.detection_max_ft,
            policy: self.policy(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parser config fra JSON; feilmeldingen peker på feltet som feilet.
pub fn parse_config(json: &str) -> Result<ProfilerConfig> {
    let de = &mut serde_json::Deserializer::from_str(json);
    let cfg: ProfilerConfig = spte::deserialize(de)
        .map_err(|e| ProfilerError::Config(format!("{}: {}", e.path(), e.inner())))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Leser config fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-config.
pub fn load_config(path: &Path) -> Result<ProfilerConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let cfg = parse_config(&contents)?;
        info!("config loaded from {}", path.display());
        Ok(cfg)
    } else {
        warn!("config {} not found, using defaults", path.display());
        Ok(ProfilerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = parse_config(r#"{ "required_nonmarine": 1, "data_start_x": 140 }"#).unwrap();
        assert_eq!(cfg.data_start_x, 140);
        assert_eq!(cfg.column_width, 5);
        assert_eq!(cfg.policy(), DetectionPolicy::Strict);
    }

    #[test]
    fn bad_field_names_path() {
        let err = parse_config(r#"{ "column_width": "wide" }"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("column_width"), "{msg}");
    }

    #[test]
    fn equal_altitudes_rejected() {
        let err = parse_config(r#"{ "top_alt_ft": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ProfilerError::Config(_)));
    }

    #[test]
    fn nan_detection_max_rejected() {
        let cfg = ProfilerConfig { detection_max_ft: f64::NAN, ..ProfilerConfig::default() };
        assert!(matches!(cfg.validate(), Err(ProfilerError::Config(_))));
        let cfg = ProfilerConfig { detection_max_ft: f64::INFINITY, ..ProfilerConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_is_debounced_three() {
        let p = ProfilerConfig::default().detector_params();
        assert_eq!(p.policy.required_nonmarine(), 3);
        assert_eq!(p.detection_max_ft, 3500.0);
    }
}
