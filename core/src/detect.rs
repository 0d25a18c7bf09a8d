use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::classify::classify_color;
use crate::models::{AltitudeScale, Label, Rgb, RowReading};

/// Hvor mange ikke-marine rader som kreves før toppen bekreftes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPolicy {
    /// Første ikke-marine rad over et marint lag avslutter laget.
    Strict,
    /// Krever `required_nonmarine` ikke-marine rader på rad (støydemping).
    Debounced { required_nonmarine: usize },
}

impl DetectionPolicy {
    /// Strict er det samme som Debounced med 1. 0 tolkes som 1.
    pub fn required_nonmarine(&self) -> usize {
        match self {
            DetectionPolicy::Strict => 1,
            DetectionPolicy::Debounced { required_nonmarine } => (*required_nonmarine).max(1),
        }
    }
}

impl Default for DetectionPolicy {
    fn default() -> Self {
        DetectionPolicy::Debounced { required_nonmarine: 3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorParams {
    pub base_alt_ft: f64,
    pub top_alt_ft: f64,
    /// Rader over denne høyden ignoreres.
    pub detection_max_ft: f64,
    pub policy: DetectionPolicy,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            base_alt_ft: 0.0,
            top_alt_ft: 5000.0,
            detection_max_ft: 3500.0,
            policy: DetectionPolicy::default(),
        }
    }
}

impl DetectorParams {
    pub fn strict() -> Self {
        Self { policy: DetectionPolicy::Strict, ..Self::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopKind {
    /// Overgang marine -> ikke-marine funnet.
    Transition,
    /// Skanningen sluttet inne i laget.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarineTop {
    pub altitude_ft: i64,
    pub row: usize,
    pub kind: TopKind,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Detection {
    pub top: Option<MarineTop>,
    /// Radene som faktisk ble skannet, nedenfra og opp.
    pub rows: Vec<RowReading>,
}

impl Detection {
    pub fn altitude_ft(&self) -> Option<i64> {
        self.top.map(|t| t.altitude_ft)
    }
}

/// Skanner kolonnen fra bakken og opp og finner toppen av det marine laget.
///
/// Toppen rapporteres som høyden til øverste marine rad før
/// `required_nonmarine` sammenhengende ikke-marine rader. Slutter skanningen
/// inne i laget brukes øverste marine rad som fallback. `None` betyr at ingen
/// marin rad ble funnet under `detection_max_ft`.
pub fn detect_marine_layer_top(column: &[Rgb], params: &DetectorParams) -> Detection {
    let scale = AltitudeScale::new(params.top_alt_ft, params.base_alt_ft, column.len());
    let required = params.policy.required_nonmarine();

    let mut rows = Vec::new();
    let mut in_marine = false;
    let mut nonmarine_streak = 0usize;
    let mut last_marine_row: Option<usize> = None;

    for i in (0..column.len()).rev() {
        let alt = scale.altitude_ft(i);
        if alt as f64 > params.detection_max_ft {
            continue;
        }

        let rgb = column[i];
        let label = classify_color(rgb);
        debug!("{:5} ft: {} => {}", alt, rgb, label);
        rows.push(RowReading { row: i, altitude_ft: alt, rgb, label });

        if label == Label::Marine {
            in_marine = true;
            nonmarine_streak = 0;
            last_marine_row = Some(i);
        } else if in_marine {
            nonmarine_streak += 1;
            if nonmarine_streak >= required {
                let row = i + required;
                let top = MarineTop {
                    altitude_ft: scale.altitude_ft(row),
                    row,
                    kind: TopKind::Transition,
                };
                info!("detected marine layer top at {} ft", top.altitude_ft);
                return Detection { top: Some(top), rows };
            }
        }
    }

    match last_marine_row {
        Some(row) => {
            let top = MarineTop {
                altitude_ft: scale.altitude_ft(row),
                row,
                kind: TopKind::Fallback,
            };
            info!("fallback: marine layer top at {} ft (no transition found)", top.altitude_ft);
            Detection { top: Some(top), rows }
        }
        None => {
            warn!("no marine layer detected below {} ft", params.detection_max_ft);
            Detection { top: None, rows }
        }
    }
}
