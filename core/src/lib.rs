pub mod classify;
pub mod cli;
pub mod column;
pub mod config;
pub mod detect;
pub mod error;
pub mod models;
pub mod report;
pub mod source;

pub use classify::classify_color;
pub use column::extract_latest_column;
pub use config::{load_config, parse_config, ProfilerConfig};
pub use detect::{
    detect_marine_layer_top, Detection, DetectionPolicy, DetectorParams, MarineTop, TopKind,
};
pub use error::{ProfilerError, Result};
pub use models::{AltitudeScale, Label, Rgb, RowReading};
pub use source::{FileProfilerSource, HttpProfilerSource, ProfilerSource, StaticProfilerSource};
