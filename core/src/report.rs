use std::path::Path;

use chrono::{DateTime, Utc};
use image::{Rgb as Px, RgbImage};
use log::info;
use serde::Serialize;

use crate::detect::{Detection, DetectorParams, TopKind};
use crate::error::Result;
use crate::models::{Rgb, RowReading};

/// Samlet resultat for én kjøring (brukes av `--json`).
#[derive(Debug, Clone, Serialize)]
pub struct MarineLayerReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub params: DetectorParams,
    pub marine_layer_top_ft: Option<i64>,
    #[serde(flatten)]
    pub detection: Detection,
}

impl MarineLayerReport {
    pub fn new(source: String, params: DetectorParams, detection: Detection) -> Self {
        Self {
            source,
            generated_at: Utc::now(),
            params,
            marine_layer_top_ft: detection.altitude_ft(),
            detection,
        }
    }

    pub fn to_json(&self, with_rows: bool) -> Result<String> {
        let mut v = serde_json::to_value(self)?;
        if !with_rows {
            if let Some(obj) = v.as_object_mut() {
                obj.remove("rows");
            }
        }
        Ok(serde_json::to_string_pretty(&v)?)
    }
}

/// Linjene verbose-modus skriver til stdout.
pub fn render_verbose(detection: &Detection, params: &DetectorParams) -> Vec<String> {
    let mut lines = Vec::with_capacity(detection.rows.len() + 3);
    lines.push(format!(
        "--- RGB Classification (0-{} ft) ---",
        params.detection_max_ft
    ));
    for r in &detection.rows {
        lines.push(format!("{:5} ft: {} => {}", r.altitude_ft, r.rgb, r.label));
    }
    lines.push(String::new());
    lines.push(match detection.top {
        Some(top) if top.kind == TopKind::Transition => {
            format!("Detected marine layer top at {} ft", top.altitude_ft)
        }
        Some(top) => format!(
            "Fallback: marine layer top at {} ft (no transition found)",
            top.altitude_ft
        ),
        None => format!(
            "No marine layer detected below {} ft.",
            params.detection_max_ft
        ),
    });
    lines
}

/// Skriver de skannede radene som CSV.
pub fn write_rows_csv(rows: &[RowReading], path: &Path) -> Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["row", "altitude_ft", "r", "g", "b", "label"])?;
    for r in rows {
        w.write_record([
            r.row.to_string(),
            r.altitude_ft.to_string(),
            r.rgb.r.to_string(),
            r.rgb.g.to_string(),
            r.rgb.b.to_string(),
            r.label.to_string(),
        ])?;
    }
    w.flush()?;
    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Lagrer den snittede kolonnen som en PNG-stripe (`strip_width` px bred).
pub fn save_column_png(column: &[Rgb], strip_width: u32, path: &Path) -> Result<()> {
    let w = strip_width.max(1);
    let img = RgbImage::from_fn(w, column.len() as u32, |_, y| {
        let p = column[y as usize];
        Px([p.r, p.g, p.b])
    });
    img.save(path)?;
    info!("saved column strip to {}", path.display());
    Ok(())
}
