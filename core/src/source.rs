// core/src/source.rs
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use image::DynamicImage;
use log::{debug, info};
use ureq::Agent;

use crate::error::{ProfilerError, Result};

pub const DEFAULT_PROFILER_URL: &str = "https://met.nps.edu/~lind/profiler/ord_mix.gif";

// Profiler-gif'en er noen titalls kB; dette er bare en øvre grense
const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

/// Kilde for profiler-bildet (prod: HttpProfilerSource, test: StaticProfilerSource)
pub trait ProfilerSource {
    fn fetch_image(&self) -> Result<DynamicImage>;

    /// Kort beskrivelse til logging/rapport (URL eller filsti).
    fn describe(&self) -> String;
}

/// Henter bildet over HTTP – enkel blocking-versjon (ureq), ingen retry.
pub struct HttpProfilerSource {
    agent: Agent,
    url: String,
}

impl HttpProfilerSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent, url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpProfilerSource {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILER_URL, Duration::from_secs(10))
    }
}

impl ProfilerSource for HttpProfilerSource {
    fn fetch_image(&self) -> Result<DynamicImage> {
        info!("fetching profiler image from {}", self.url);

        let resp = match self.agent.get(&self.url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, _)) => {
                return Err(ProfilerError::Http { status, url: self.url.clone() });
            }
            Err(e) => return Err(ProfilerError::Network(e.to_string())),
        };

        let mut bytes = Vec::new();
        resp.into_reader()
            .take(MAX_IMAGE_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| ProfilerError::Network(format!("reading body from {}: {e}", self.url)))?;
        debug!("received {} bytes", bytes.len());

        decode_image(&bytes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Leser bildet fra disk (offline kjøring).
pub struct FileProfilerSource {
    pub path: PathBuf,
}

impl FileProfilerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProfilerSource for FileProfilerSource {
    fn fetch_image(&self) -> Result<DynamicImage> {
        info!("reading profiler image from {}", self.path.display());
        let bytes = std::fs::read(&self.path)?;
        decode_image(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Ferdig dekodet bilde i minnet (tester).
pub struct StaticProfilerSource {
    pub image: DynamicImage,
}

impl ProfilerSource for StaticProfilerSource {
    fn fetch_image(&self) -> Result<DynamicImage> {
        Ok(self.image.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// Dekoder gif/png/jpeg; formatet gjettes fra innholdet.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}
