// ⚙️ Configuration
// Input file locations and server address

use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const MODEL_FILE: &str = "mumbai_model.json";
pub const COORDS_FILE: &str = "mumbai_region_coords.csv";
pub const LISTINGS_FILE: &str = "mumbai_cleaned.csv";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub coords_path: PathBuf,
    pub listings_path: PathBuf,
    pub bind_addr: String,
}

impl AppConfig {
    /// Default file names inside `dir`
    pub fn from_data_dir(dir: &Path) -> Self {
        AppConfig {
            model_path: dir.join(MODEL_FILE),
            coords_path: dir.join(COORDS_FILE),
            listings_path: dir.join(LISTINGS_FILE),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }

    /// Replace whichever paths were given explicitly
    pub fn with_overrides(
        mut self,
        model: Option<PathBuf>,
        coords: Option<PathBuf>,
        listings: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = model {
            self.model_path = path;
        }
        if let Some(path) = coords {
            self.coords_path = path;
        }
        if let Some(path) = listings {
            self.listings_path = path;
        }
        self
    }

    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_data_dir(Path::new(DEFAULT_DATA_DIR))
    }
}
