// 🔢 Feature Encoder
// Property attributes → fixed-order numeric vector for the price model

use crate::catalog::{AgeCategory, RegionCatalog};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scalar fields that precede the region indicators, in vector order
pub const SCALAR_FEATURES: [&str; 3] = ["bhk", "area", "age"];

pub const BHK_RANGE: (u32, u32) = (1, 3);
pub const AREA_RANGE: (f64, f64) = (100.0, 3000.0);

// ============================================================================
// SCHEMA
// ============================================================================

/// FeatureSchema - the named layout every encoded vector follows
///
/// `[bhk, area, age, region_1, ..., region_N]` where the region segment is
/// the catalog in slot order. The model artifact declares its own list of
/// names; the two are compared once at startup.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    catalog: RegionCatalog,
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(catalog: RegionCatalog) -> Self {
        let names = SCALAR_FEATURES
            .iter()
            .map(|s| s.to_string())
            .chain(catalog.names().iter().cloned())
            .collect();

        FeatureSchema { catalog, names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Vector length: `3 + |catalog|`
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// Position of the indicator for `region`, if it is a known region
    pub fn region_index(&self, region: &str) -> Option<usize> {
        self.catalog
            .slot_of(region)
            .map(|slot| SCALAR_FEATURES.len() + slot)
    }

    /// Encode one property into a vector laid out by this schema.
    ///
    /// Values are copied as-is: no range checks happen here, see
    /// [`PropertyInput::range_warnings`].
    pub fn encode(
        &self,
        bhk: f64,
        area: f64,
        age: AgeCategory,
        region: Option<&str>,
    ) -> FeatureVector {
        let mut values = vec![0.0; self.len()];
        values[0] = bhk;
        values[1] = area;
        values[2] = f64::from(age.code());

        if let Some(region) = region {
            match self.region_index(region) {
                Some(i) => values[i] = 1.0,
                None => debug!(region, "region not in catalog, no indicator set"),
            }
        }

        FeatureVector(values)
    }

    pub fn encode_input(&self, input: &PropertyInput) -> FeatureVector {
        self.encode(
            f64::from(input.bhk),
            input.area,
            input.age,
            input.region.as_deref(),
        )
    }
}

// ============================================================================
// VECTOR & INPUT
// ============================================================================

/// FeatureVector - one encoded property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The one-hot region segment
    pub fn region_segment(&self) -> &[f64] {
        &self.0[SCALAR_FEATURES.len().min(self.0.len())..]
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        FeatureVector(values)
    }
}

/// PropertyInput - what the user enters in the prediction form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    pub bhk: u32,
    pub area: f64,
    #[serde(default)]
    pub age: AgeCategory,
    /// `None` means "Any / Not Sure"
    #[serde(default)]
    pub region: Option<String>,
}

impl Default for PropertyInput {
    fn default() -> Self {
        // Form starts at 1 BHK, 1000 sqft, new build
        PropertyInput {
            bhk: 1,
            area: 1000.0,
            age: AgeCategory::New,
            region: None,
        }
    }
}

impl PropertyInput {
    /// Values outside the form's bounds. Encoding still proceeds with them.
    pub fn range_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.bhk < BHK_RANGE.0 || self.bhk > BHK_RANGE.1 {
            warnings.push(format!(
                "bhk {} is outside the expected range {}-{}",
                self.bhk, BHK_RANGE.0, BHK_RANGE.1
            ));
        }

        if !(AREA_RANGE.0..=AREA_RANGE.1).contains(&self.area) {
            warnings.push(format!(
                "area {} sqft is outside the expected range {}-{}",
                self.area, AREA_RANGE.0, AREA_RANGE.1
            ));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OTHER_REGION;
    use proptest::prelude::*;

    fn mumbai() -> FeatureSchema {
        FeatureSchema::new(RegionCatalog::mumbai())
    }

    #[test]
    fn test_schema_layout() {
        let schema = mumbai();

        assert_eq!(schema.len(), 3 + 104);
        assert_eq!(&schema.names()[..4], &["bhk", "area", "age", "agripada"]);
        assert_eq!(schema.names().last().map(String::as_str), Some(OTHER_REGION));
    }

    #[test]
    fn test_encode_known_region() {
        let schema = mumbai();
        let v = schema.encode(1.0, 1000.0, AgeCategory::New, Some("bandra west"));
        let slot = schema.region_index("bandra west").unwrap();

        assert_eq!(v.values()[0], 1.0);
        assert_eq!(v.values()[1], 1000.0);
        assert_eq!(v.values()[2], 1.0);
        assert_eq!(v.values()[slot], 1.0);
        let nonzero: Vec<usize> = (0..v.len()).filter(|&i| v.values()[i] != 0.0).collect();
        assert_eq!(nonzero, vec![0, 1, 2, slot]);
    }

    #[test]
    fn test_encode_unknown_age_not_sure_region() {
        let schema = mumbai();
        let v = schema.encode(2.0, 650.0, AgeCategory::Unknown, None);

        assert_eq!(v.values()[2], 0.0);
        assert!(v.region_segment().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_encode_other_sets_sentinel_slot() {
        let schema = mumbai();
        let v = schema.encode(1.0, 500.0, AgeCategory::Resale, Some("other"));

        assert_eq!(v.values()[2], 2.0);
        assert_eq!(v.values().last(), Some(&1.0));
    }

    #[test]
    fn test_encode_unlisted_region_is_all_zero() {
        let schema = mumbai();
        let v = schema.encode(1.0, 500.0, AgeCategory::New, Some("Any / Not Sure"));

        assert!(v.region_segment().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_out_of_range_values_written_as_is() {
        let schema = mumbai();
        let input = PropertyInput {
            bhk: 7,
            area: 25.0,
            age: AgeCategory::New,
            region: None,
        };

        let v = schema.encode_input(&input);
        assert_eq!(v.values()[0], 7.0);
        assert_eq!(v.values()[1], 25.0);
        assert_eq!(input.range_warnings().len(), 2);
    }

    #[test]
    fn test_default_input_has_no_warnings() {
        assert!(PropertyInput::default().range_warnings().is_empty());
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let input: PropertyInput = serde_json::from_str(r#"{"bhk": 2, "area": 800}"#).unwrap();

        assert_eq!(input.age, AgeCategory::Unknown);
        assert_eq!(input.region, None);
    }

    proptest! {
        #[test]
        fn prop_encode_shape_and_one_hot(
            bhk in 1u32..=3,
            area in 100.0f64..=3000.0,
            age_idx in 0usize..3,
            region_idx in proptest::option::of(0usize..104),
        ) {
            let schema = mumbai();
            let region = region_idx.map(|i| schema.catalog().names()[i].clone());
            let v = schema.encode(f64::from(bhk), area, AgeCategory::ALL[age_idx], region.as_deref());

            prop_assert_eq!(v.len(), 3 + schema.catalog().len());
            let hot = v.region_segment().iter().filter(|&&x| x != 0.0).count();
            prop_assert_eq!(hot, usize::from(region.is_some()));
            prop_assert_eq!(v.values()[0], f64::from(bhk));
            prop_assert_eq!(v.values()[1], area);
        }

        #[test]
        fn prop_encode_is_deterministic(bhk in 0u32..10, area in -10.0f64..5000.0) {
            let schema = mumbai();
            let a = schema.encode(f64::from(bhk), area, AgeCategory::Resale, Some("powai"));
            let b = schema.encode(f64::from(bhk), area, AgeCategory::Resale, Some("powai"));
            prop_assert_eq!(a, b);
        }
    }
}
