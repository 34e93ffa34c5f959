// 📊 Region Price Aggregator
// Median price/sqft per region, left-joined onto region coordinates

use crate::catalog::normalize_region;
use crate::tables::{CoordsTable, ListingsTable};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Median of a sample; the mean of the middle pair for even counts.
/// NaNs are ignored, an empty sample has no median.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Median price per sqft for every region that has at least one priced listing
pub fn median_by_region(listings: &ListingsTable) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in &listings.rows {
        let prices = groups.entry(row.region.as_str()).or_default();
        if let Some(price) = row.price_per_sqft {
            prices.push(price);
        }
    }

    groups
        .into_iter()
        .filter_map(|(region, prices)| median(&prices).map(|m| (region.to_string(), m)))
        .collect()
}

// ============================================================================
// REGION PRICE VIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPrice {
    pub region: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `None` means no price data, which is not the same as a zero price
    pub median_price: Option<f64>,
}

/// RegionPriceView - coordinates with their median price, in coords order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionPriceView {
    pub rows: Vec<RegionPrice>,
}

/// Left-join per-region medians onto every coordinates row
pub fn aggregate(listings: &ListingsTable, coords: &CoordsTable) -> RegionPriceView {
    let medians = median_by_region(listings);

    let rows: Vec<RegionPrice> = coords
        .rows
        .iter()
        .map(|c| RegionPrice {
            region: c.region.clone(),
            label: c.label.clone(),
            latitude: c.latitude,
            longitude: c.longitude,
            median_price: medians.get(&c.region).copied(),
        })
        .collect();

    let mapped: HashSet<&str> = coords.rows.iter().map(|c| c.region.as_str()).collect();
    let unmapped: Vec<&str> = medians
        .keys()
        .map(String::as_str)
        .filter(|r| !mapped.contains(r))
        .collect();
    if !unmapped.is_empty() {
        warn!(count = unmapped.len(), regions = ?unmapped, "priced regions have no coordinates");
    }

    let unpriced = rows.iter().filter(|r| r.median_price.is_none()).count();
    if unpriced > 0 {
        warn!(count = unpriced, "regions on the map have no price data");
    }

    RegionPriceView { rows }
}

impl RegionPriceView {
    /// Rows whose region is selected. An empty selection keeps every row.
    pub fn filter<S: AsRef<str>>(&self, selected: &[S]) -> Vec<&RegionPrice> {
        if selected.is_empty() {
            return self.rows.iter().collect();
        }

        let wanted: HashSet<String> = selected.iter().map(|s| normalize_region(s.as_ref())).collect();
        self.rows
            .iter()
            .filter(|row| wanted.contains(&row.region))
            .collect()
    }

    /// Mean of the selected regions' medians, skipping regions without data
    pub fn mean_median<S: AsRef<str>>(&self, selected: &[S]) -> Option<f64> {
        let known: Vec<f64> = self
            .filter(selected)
            .into_iter()
            .filter_map(|row| row.median_price)
            .collect();

        if known.is_empty() {
            None
        } else {
            Some(known.iter().sum::<f64>() / known.len() as f64)
        }
    }

    /// Lowest and highest known median
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.median_price)
            .fold(None, |range, price| match range {
                None => Some((price, price)),
                Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
            })
    }

    /// `(latitude, longitude, median)` for rows with price data
    pub fn heat_points(&self) -> Vec<(f64, f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.median_price.map(|m| (row.latitude, row.longitude, m)))
            .collect()
    }

    pub fn get(&self, region: &str) -> Option<&RegionPrice> {
        let key = normalize_region(region);
        self.rows.iter().find(|row| row.region == key)
    }

    /// Distinct region keys in map order, for the region filter
    pub fn regions(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| row.region.as_str())
            .filter(|r| seen.insert(*r))
            .collect()
    }
}
