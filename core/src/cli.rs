use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use crate::column::extract_latest_column;
use crate::config::{load_config, ProfilerConfig};
use crate::detect::{detect_marine_layer_top, Detection};
use crate::report::{render_verbose, save_column_png, write_rows_csv, MarineLayerReport};
use crate::source::{FileProfilerSource, HttpProfilerSource, ProfilerSource};

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "marinelayer",
    about = "estimate marine layer top from the latest profiler column"
)]
pub struct Args {
    /// JSON config file (missing fields get defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// profiler image URL
    #[arg(long)]
    pub url: Option<String>,

    /// read the image from a local file instead of fetching it
    #[arg(long, conflicts_with = "url")]
    pub image: Option<PathBuf>,

    /// x pixel of the most recent reading
    #[arg(long)]
    pub offset: Option<u32>,

    /// number of pixel columns to average
    #[arg(long)]
    pub width: Option<u32>,

    /// altitude (ft) of the top image row
    #[arg(long)]
    pub top_alt: Option<f64>,

    /// altitude (ft) of the bottom image row
    #[arg(long)]
    pub base_alt: Option<f64>,

    /// ignore rows above this altitude (ft)
    #[arg(long)]
    pub max_alt: Option<f64>,

    /// consecutive non-marine rows needed to confirm the top
    #[arg(long)]
    pub required_nonmarine: Option<usize>,

    /// stop at the first non-marine row (same as --required-nonmarine 1)
    #[arg(long, conflicts_with = "required_nonmarine")]
    pub strict: bool,

    /// print per-row classification and a result message
    #[arg(short, long)]
    pub verbose: bool,

    /// print a JSON report instead of the bare altitude
    #[arg(long)]
    pub json: bool,

    /// write the scanned rows to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// save the averaged column as a PNG strip
    #[arg(long)]
    pub column_png: Option<PathBuf>,
}

impl Args {
    /// Config-fil (eller default) med CLI-flagg lagt over.
    pub fn resolve_config(&self) -> Result<ProfilerConfig> {
        let mut cfg = match &self.config {
            // eksplisitt oppgitt fil må finnes; skrivefeil i stien skal ikke gi default
            Some(path) if !path.exists() => bail!("config file {} not found", path.display()),
            Some(path) => load_config(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ProfilerConfig::default(),
        };

        if let Some(url) = &self.url {
            cfg.url = url.clone();
        }
        if let Some(v) = self.offset {
            cfg.data_start_x = v;
        }
        if let Some(v) = self.width {
            cfg.column_width = v;
        }
        if let Some(v) = self.top_alt {
            cfg.top_alt_ft = v;
        }
        if let Some(v) = self.base_alt {
            cfg.base_alt_ft = v;
        }
        if let Some(v) = self.max_alt {
            cfg.detection_max_ft = v;
        }
        if let Some(v) = self.required_nonmarine {
            cfg.required_nonmarine = v;
        }
        if self.strict {
            cfg.required_nonmarine = 1;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn source(&self, cfg: &ProfilerConfig) -> Box<dyn ProfilerSource> {
        match &self.image {
            Some(path) => Box::new(FileProfilerSource::new(path.clone())),
            None => Box::new(HttpProfilerSource::new(cfg.url.clone(), cfg.timeout())),
        }
    }
}

/// Hele kjøringen: hent bilde, trekk ut kolonne, detekter, skriv resultat til `out`.
pub fn run_with_source(
    args: &Args,
    cfg: &ProfilerConfig,
    source: &dyn ProfilerSource,
    out: &mut dyn Write,
) -> Result<Detection> {
    let image = source
        .fetch_image()
        .with_context(|| format!("fetching profiler image from {}", source.describe()))?;
    let column = extract_latest_column(&image, cfg.column_width, cfg.data_start_x)?;

    let params = cfg.detector_params();
    let detection = detect_marine_layer_top(&column, &params);

    if let Some(path) = &args.column_png {
        save_column_png(&column, cfg.column_width, path)
            .with_context(|| format!("saving column strip {}", path.display()))?;
    }
    if let Some(path) = &args.csv {
        write_rows_csv(&detection.rows, path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if args.json {
        let report = MarineLayerReport::new(source.describe(), params, detection.clone());
        writeln!(out, "{}", report.to_json(args.verbose)?)?;
    } else if args.verbose {
        for line in render_verbose(&detection, &params) {
            writeln!(out, "{line}")?;
        }
    } else if let Some(alt) = detection.altitude_ft() {
        writeln!(out, "{alt}")?;
    }

    info!("marine layer top: {:?}", detection.altitude_ft());
    Ok(detection)
}

pub fn run(args: &Args) -> Result<Option<i64>> {
    let cfg = args.resolve_config()?;
    let source = args.source(&cfg);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let detection = run_with_source(args, &cfg, source.as_ref(), &mut out)?;
    Ok(detection.altitude_ft())
}
