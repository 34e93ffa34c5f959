// 🧭 Application Context
// Model + tables + derived view, loaded once and shared read-only

use crate::aggregate::{aggregate, RegionPriceView};
use crate::catalog::RegionCatalog;
use crate::config::AppConfig;
use crate::encoder::{FeatureSchema, FeatureVector, PropertyInput};
use crate::error::{LoadError, PredictError};
use crate::format::estimate_line;
use crate::model::{check_schema, LinearModel, PricePredictor};
use crate::tables::{CoordsTable, ListingsTable};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// Result of one prediction request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub price: f64,
    pub units: String,
    /// Inputs outside the form bounds; the estimate is still computed
    pub warnings: Vec<String>,
    pub display: String,
}

/// What was loaded, for health checks and the `schema` command
#[derive(Debug, Clone, Serialize)]
pub struct ContextSummary {
    pub feature_count: usize,
    pub region_count: usize,
    pub listing_count: usize,
    pub mapped_regions: usize,
    pub priced_regions: usize,
    pub model_fingerprint: Option<String>,
    pub units: String,
    pub loaded_at: DateTime<Utc>,
}

pub struct AppContext {
    schema: FeatureSchema,
    model: Box<dyn PricePredictor>,
    model_fingerprint: Option<String>,
    view: RegionPriceView,
    listing_count: usize,
    loaded_at: DateTime<Utc>,
}

impl AppContext {
    /// Read every input named by `config`. Any failure here is fatal.
    pub fn load(config: &AppConfig) -> Result<Self, LoadError> {
        let model = LinearModel::load(&config.model_path)?;
        let fingerprint = model.fingerprint().map(str::to_string);
        let coords = CoordsTable::load(&config.coords_path)?;
        let listings = ListingsTable::load(&config.listings_path)?;

        let mut context = Self::from_parts(
            FeatureSchema::new(RegionCatalog::mumbai()),
            Box::new(model),
            &listings,
            &coords,
        )?;
        context.model_fingerprint = fingerprint;

        Ok(context)
    }

    /// Assemble a context from already-loaded pieces, checking that the
    /// model consumes exactly the encoder's feature layout.
    pub fn from_parts(
        schema: FeatureSchema,
        model: Box<dyn PricePredictor>,
        listings: &ListingsTable,
        coords: &CoordsTable,
    ) -> Result<Self, LoadError> {
        check_schema(&schema, model.as_ref())?;
        let view = aggregate(listings, coords);

        info!(
            features = schema.len(),
            regions = view.rows.len(),
            listings = listings.rows.len(),
            "dashboard context ready"
        );

        Ok(AppContext {
            schema,
            model,
            model_fingerprint: None,
            view,
            listing_count: listings.rows.len(),
            loaded_at: Utc::now(),
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn catalog(&self) -> &RegionCatalog {
        self.schema.catalog()
    }

    pub fn view(&self) -> &RegionPriceView {
        &self.view
    }

    pub fn units(&self) -> &str {
        self.model.units()
    }

    pub fn encode(&self, input: &PropertyInput) -> FeatureVector {
        let vector = self.schema.encode_input(input);
        debug!(bhk = input.bhk, area = input.area, age = %input.age, region = ?input.region, "encoded property");
        vector
    }

    pub fn predict(&self, input: &PropertyInput) -> Result<Prediction, PredictError> {
        let vector = self.encode(input);
        let price = self
            .model
            .predict(std::slice::from_ref(&vector))?
            .into_iter()
            .next()
            .ok_or(PredictError::EmptyBatch)?;

        let units = self.model.units().to_string();
        Ok(Prediction {
            price,
            display: estimate_line(price, &units),
            units,
            warnings: input.range_warnings(),
        })
    }

    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            feature_count: self.schema.len(),
            region_count: self.catalog().len(),
            listing_count: self.listing_count,
            mapped_regions: self.view.rows.len(),
            priced_regions: self.view.heat_points().len(),
            model_fingerprint: self.model_fingerprint.clone(),
            units: self.units().to_string(),
            loaded_at: self.loaded_at,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::AgeCategory;
    use crate::model::ModelArtifact;
    use crate::tables::{CoordRow, ListingRow};

    /// Small catalog with a model that prices `bhk * 10 + region bonus`
    pub(crate) fn test_context() -> AppContext {
        let schema = FeatureSchema::new(RegionCatalog::new(["powai", "worli"]));
        let model = LinearModel::from_artifact(ModelArtifact {
            feature_names: schema.names().to_vec(),
            coefficients: vec![10.0, 0.0, 0.0, 40.0, 80.0, 5.0],
            intercept: 0.0,
            units: "Lakhs".to_string(),
        })
        .unwrap();

        let listings = ListingsTable {
            rows: vec![
                ListingRow { region: "powai".to_string(), price_per_sqft: Some(20000.0) },
                ListingRow { region: "powai".to_string(), price_per_sqft: Some(24000.0) },
                ListingRow { region: "worli".to_string(), price_per_sqft: Some(45000.0) },
            ],
        };
        let coords = CoordsTable {
            rows: vec![
                CoordRow { region: "powai".to_string(), label: "Powai".to_string(), latitude: 19.1176, longitude: 72.9060 },
                CoordRow { region: "worli".to_string(), label: "Worli".to_string(), latitude: 19.0176, longitude: 72.8172 },
                CoordRow { region: "sion".to_string(), label: "Sion".to_string(), latitude: 19.0390, longitude: 72.8619 },
            ],
        };

        AppContext::from_parts(schema, Box::new(model), &listings, &coords).unwrap()
    }

    #[test]
    fn test_predict_formats_estimate() {
        let context = test_context();
        let input = PropertyInput {
            bhk: 2,
            area: 900.0,
            age: AgeCategory::New,
            region: Some("Worli".to_string()),
        };

        let prediction = context.predict(&input).unwrap();
        assert_eq!(prediction.price, 100.0);
        assert_eq!(prediction.display, "Estimated Price: ₹ 100.00 Lakhs");
        assert!(prediction.warnings.is_empty());
    }

    #[test]
    fn test_predict_reports_range_warnings() {
        let context = test_context();
        let input = PropertyInput {
            bhk: 5,
            ..PropertyInput::default()
        };

        let prediction = context.predict(&input).unwrap();
        assert_eq!(prediction.price, 50.0);
        assert_eq!(prediction.warnings.len(), 1);
    }

    #[test]
    fn test_context_rejects_mismatched_model() {
        let schema = FeatureSchema::new(RegionCatalog::new(["powai"]));
        let model = LinearModel::from_artifact(ModelArtifact {
            feature_names: vec!["bhk".to_string(), "area".to_string()],
            coefficients: vec![1.0, 1.0],
            intercept: 0.0,
            units: "Lakhs".to_string(),
        })
        .unwrap();

        let result = AppContext::from_parts(
            schema,
            Box::new(model),
            &ListingsTable::default(),
            &CoordsTable::default(),
        );
        assert!(matches!(result, Err(LoadError::SchemaMismatch { position: 2, .. })));
    }

    #[test]
    fn test_summary_counts() {
        let summary = test_context().summary();

        assert_eq!(summary.feature_count, 6);
        assert_eq!(summary.region_count, 3);
        assert_eq!(summary.listing_count, 3);
        assert_eq!(summary.mapped_regions, 3);
        assert_eq!(summary.priced_regions, 2);
        assert_eq!(summary.model_fingerprint, None);
    }

    #[test]
    fn test_view_is_derived_on_load() {
        let context = test_context();
        assert_eq!(context.view().get("powai").unwrap().median_price, Some(22000.0));
        assert_eq!(context.view().get("sion").unwrap().median_price, None);
    }
}
