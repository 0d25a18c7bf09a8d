use crate::models::{Label, Rgb};

// Empirisk tunede terskler for fargekodingen i profiler-bildet
pub const MARINE_BLUE_FRAC: f64 = 0.45;
pub const MARINE_BLUE_MIN: u8 = 50;
pub const INVERSION_RG_FRAC: f64 = 0.35;
pub const INVERSION_RG_MIN: u8 = 90;

const EPS: f64 = 1e-5;

/// Klassifiser én piksel: marine (blå), inversion (gul/oransje) eller other.
pub fn classify_color(rgb: Rgb) -> Label {
    let (r, g, b) = (rgb.r as f64, rgb.g as f64, rgb.b as f64);
    let total = r + g + b + EPS;
    let r_norm = r / total;
    let g_norm = g / total;
    let b_norm = b / total;

    if b_norm > MARINE_BLUE_FRAC && rgb.b > MARINE_BLUE_MIN {
        Label::Marine
    } else if r_norm > INVERSION_RG_FRAC
        && g_norm > INVERSION_RG_FRAC
        && rgb.r > INVERSION_RG_MIN
        && rgb.g > INVERSION_RG_MIN
    {
        Label::Inversion
    } else {
        Label::Other
    }
}
