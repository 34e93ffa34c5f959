// 📍 Region Catalog & Age Categories
// The closed vocabulary the prediction model was trained on

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Catch-all region slot. It is a real model feature, not "not sure".
pub const OTHER_REGION: &str = "other";

/// Known Mumbai regions in the order the model was trained on.
/// `other` is appended after these by [`RegionCatalog::mumbai`].
pub const MUMBAI_REGIONS: [&str; 103] = [
    "agripada", "airoli", "ambarnath", "ambernath east", "ambernath west", "andheri east",
    "andheri west", "anjurdive", "badlapur east", "badlapur west", "bandra east",
    "bandra kurla complex", "bandra west", "belapur", "bhandup east", "bhandup west",
    "bhayandar east", "bhayandar west", "bhiwandi", "boisar", "borivali east",
    "borivali west", "byculla", "chembur", "colaba", "dadar east", "dadar west", "dahisar",
    "deonar", "diva", "dombivali", "dombivali east", "dronagiri", "ghansoli",
    "ghatkopar east", "ghatkopar west", "girgaon", "goregaon east", "goregaon west",
    "jogeshwari east", "jogeshwari west", "juhu", "juinagar", "kalamboli", "kalyan east",
    "kalyan west", "kamothe", "kandivali east", "kandivali west", "kanjurmarg",
    "karanjade", "karjat", "khar", "kharghar", "khopoli", "koper khairane", "kurla",
    "lower parel", "mahalaxmi", "mahim", "malad east", "malad west", "marine lines",
    "matunga", "mazagaon", "mira road east", "mulund east", "mulund west", "nahur east",
    "naigaon east", "nala sopara", "neral", "nerul", "nilje gaon", "palghar", "panvel",
    "parel", "powai", "prabhadevi", "rasayani", "sanpada", "santacruz east",
    "santacruz west", "seawoods", "sewri", "shil phata", "sion", "taloja", "tardeo",
    "thane east", "thane west", "titwala", "ulhasnagar", "ulwe", "umroli", "vasai",
    "vashi", "vikhroli", "ville parle east", "ville parle west", "virar", "wadala",
    "worli",
];

/// Canonical form used for every region comparison: trimmed, lowercased,
/// inner whitespace collapsed to single spaces.
pub fn normalize_region(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ============================================================================
// REGION CATALOG
// ============================================================================

/// RegionCatalog - ordered set of region names plus the `other` sentinel
///
/// Ordering is a hard invariant: slot `i` of the catalog is feature
/// `3 + i` of every encoded vector.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl RegionCatalog {
    /// Build a catalog from names in model order.
    ///
    /// Names are normalized, duplicates keep their first position, and the
    /// `other` sentinel is moved to (or added at) the end.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = RegionCatalog {
            names: Vec::new(),
            index: HashMap::new(),
        };

        for name in names {
            let key = normalize_region(name.as_ref());
            if key.is_empty() || key == OTHER_REGION {
                continue;
            }
            catalog.push(key);
        }
        catalog.push(OTHER_REGION.to_string());

        catalog
    }

    /// The catalog the bundled Mumbai model was trained against
    pub fn mumbai() -> Self {
        Self::new(MUMBAI_REGIONS)
    }

    fn push(&mut self, key: String) {
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key.clone(), self.names.len());
        self.names.push(key);
    }

    /// Number of region slots, sentinel included
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Region names in slot order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The single membership test deciding whether a region sets an indicator
    pub fn slot_of(&self, region: &str) -> Option<usize> {
        self.index.get(&normalize_region(region)).copied()
    }

    pub fn contains(&self, region: &str) -> bool {
        self.slot_of(region).is_some()
    }

    /// Names sorted for display in a picker, `other` included
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// ============================================================================
// AGE CATEGORY
// ============================================================================

/// AgeCategory - property age as the model encodes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgeCategory {
    New,
    Resale,
    #[default]
    Unknown,
}

impl AgeCategory {
    pub const ALL: [AgeCategory; 3] = [AgeCategory::New, AgeCategory::Resale, AgeCategory::Unknown];

    /// Integer code written into the `age` feature
    pub fn code(&self) -> u8 {
        match self {
            AgeCategory::New => 1,
            AgeCategory::Resale => 2,
            AgeCategory::Unknown => 0,
        }
    }

    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            AgeCategory::New => "New",
            AgeCategory::Resale => "Resale",
            AgeCategory::Unknown => "Unknown",
        }
    }

    /// Next category in picker order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            AgeCategory::New => AgeCategory::Resale,
            AgeCategory::Resale => AgeCategory::Unknown,
            AgeCategory::Unknown => AgeCategory::New,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            AgeCategory::New => AgeCategory::Unknown,
            AgeCategory::Resale => AgeCategory::New,
            AgeCategory::Unknown => AgeCategory::Resale,
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(AgeCategory::New),
            "resale" => Ok(AgeCategory::Resale),
            "unknown" => Ok(AgeCategory::Unknown),
            other => Err(format!("unknown age category '{}' (expected new, resale or unknown)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mumbai_catalog_has_sentinel_last() {
        let catalog = RegionCatalog::mumbai();

        assert_eq!(catalog.len(), 104);
        assert_eq!(catalog.names().last().map(String::as_str), Some(OTHER_REGION));
        assert_eq!(catalog.slot_of("agripada"), Some(0));
        assert_eq!(catalog.slot_of("worli"), Some(102));
        assert_eq!(catalog.slot_of("other"), Some(103));
    }

    #[test]
    fn test_slot_lookup_is_normalized() {
        let catalog = RegionCatalog::mumbai();

        assert_eq!(catalog.slot_of("  Bandra   West "), catalog.slot_of("bandra west"));
        assert!(catalog.contains("ANDHERI EAST"));
        assert!(!catalog.contains("Any / Not Sure"));
    }

    #[test]
    fn test_custom_catalog_moves_other_to_end_and_dedupes() {
        let catalog = RegionCatalog::new(["b", "other", "a", "B "]);

        assert_eq!(catalog.names(), &["b", "a", "other"]);
    }

    #[test]
    fn test_sorted_names_for_picker() {
        let catalog = RegionCatalog::new(["worli", "agripada"]);
        assert_eq!(catalog.sorted_names(), vec!["agripada", "other", "worli"]);
    }

    #[test]
    fn test_age_codes() {
        assert_eq!(AgeCategory::New.code(), 1);
        assert_eq!(AgeCategory::Resale.code(), 2);
        assert_eq!(AgeCategory::Unknown.code(), 0);
    }

    #[test]
    fn test_age_parse_and_cycle() {
        assert_eq!("Resale".parse::<AgeCategory>(), Ok(AgeCategory::Resale));
        assert!("old".parse::<AgeCategory>().is_err());

        for age in AgeCategory::ALL {
            assert_eq!(age.next().previous(), age);
        }
    }
}
