use std::fmt;

use serde::{Deserialize, Serialize};

/// Én piksel fra profiler-bildet (0–255 per kanal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Marine,
    Inversion,
    Other,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Marine => "marine",
            Label::Inversion => "inversion",
            Label::Other => "other",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lineær mapping rad -> høyde (fot). Rad 0 = toppen av bildet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeScale {
    pub top_alt_ft: f64,
    pub base_alt_ft: f64,
    pub rows: usize,
}

impl AltitudeScale {
    pub fn new(top_alt_ft: f64, base_alt_ft: f64, rows: usize) -> Self {
        Self { top_alt_ft, base_alt_ft, rows }
    }

    /// Eksakt høyde for rad `row` (samme fordeling som et linspace top..base).
    pub fn altitude_at(&self, row: usize) -> f64 {
        if self.rows <= 1 {
            return self.top_alt_ft;
        }
        if row + 1 == self.rows {
            return self.base_alt_ft;
        }
        let step = (self.base_alt_ft - self.top_alt_ft) / (self.rows - 1) as f64;
        self.top_alt_ft + row as f64 * step
    }

    /// Høyde avkortet mot null til hele fot.
    #[inline]
    pub fn altitude_ft(&self, row: usize) -> i64 {
        self.altitude_at(row).trunc() as i64
    }
}

/// Én klassifisert rad slik detektoren så den.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowReading {
    pub row: usize,
    pub altitude_ft: i64,
    pub rgb: Rgb,
    pub label: Label,
}
