// Mumbai Housing Dashboard - Core Library
// Exposes all modules for use in the terminal dashboard, CLI, API server, and tests

pub mod catalog;
pub mod encoder;
pub mod error;
pub mod model;
pub mod tables;
pub mod aggregate;
pub mod colormap;
pub mod map;
pub mod format;
pub mod config;
pub mod context;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use catalog::{normalize_region, AgeCategory, RegionCatalog, MUMBAI_REGIONS, OTHER_REGION};
pub use encoder::{FeatureSchema, FeatureVector, PropertyInput, AREA_RANGE, BHK_RANGE};
pub use error::{LoadError, PredictError};
pub use model::{check_schema, LinearModel, ModelArtifact, PricePredictor};
pub use tables::{CoordRow, CoordsTable, ListingRow, ListingsTable};
pub use aggregate::{aggregate, median, RegionPrice, RegionPriceView};
pub use colormap::{LinearColormap, Rgb};
pub use map::{markers, MapMarker, MapStyle, ViewMode, MUMBAI_CENTER};
pub use config::AppConfig;
pub use context::{AppContext, ContextSummary, Prediction};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
