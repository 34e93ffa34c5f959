// 📂 Tabular Inputs
// CSV → listings & coordinates, with normalized headers and region keys

use crate::catalog::normalize_region;
use crate::error::LoadError;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REGION_COLUMN: &str = "region";
pub const PRICE_COLUMN: &str = "price_per_sqft";
pub const LATITUDE_COLUMN: &str = "latitude";
pub const LONGITUDE_COLUMN: &str = "longitude";

const LISTINGS: &str = "listings table";
const COORDS: &str = "coordinates table";

// ============================================================================
// ROW TYPES
// ============================================================================

/// One listing; only the fields the map needs are kept
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRow {
    pub region: String,
    /// `None` for blank or NaN cells
    pub price_per_sqft: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordRow {
    /// Normalized join key
    pub region: String,
    /// Title-cased name for display
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingsTable {
    pub rows: Vec<ListingRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordsTable {
    pub rows: Vec<CoordRow>,
}

// ============================================================================
// LOADERS
// ============================================================================

impl ListingsTable {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let table = Self::from_reader(open(path)?, path)?;
        info!(path = %path.display(), rows = table.rows.len(), "loaded listings");
        Ok(table)
    }

    /// Parse from any CSV source; `source` is only used in error messages
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self, LoadError> {
        let mut table = Table::read(reader, source, LISTINGS)?;
        let region = table.column(REGION_COLUMN)?;
        let price = table.column(PRICE_COLUMN)?;

        let mut rows = Vec::new();
        while let Some(record) = table.next_record()? {
            rows.push(ListingRow {
                region: record.key(region)?,
                price_per_sqft: record.optional_number(price, PRICE_COLUMN)?,
            });
        }

        Ok(ListingsTable { rows })
    }
}

impl CoordsTable {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let table = Self::from_reader(open(path)?, path)?;
        info!(path = %path.display(), regions = table.rows.len(), "loaded region coordinates");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self, LoadError> {
        let mut table = Table::read(reader, source, COORDS)?;
        let region = table.column(REGION_COLUMN)?;
        let latitude = table.column(LATITUDE_COLUMN)?;
        let longitude = table.column(LONGITUDE_COLUMN)?;

        let mut rows = Vec::new();
        while let Some(record) = table.next_record()? {
            let key = record.key(region)?;
            rows.push(CoordRow {
                label: title_case(&key),
                region: key,
                latitude: record.number(latitude, LATITUDE_COLUMN)?,
                longitude: record.number(longitude, LONGITUDE_COLUMN)?,
            });
        }

        Ok(CoordsTable { rows })
    }
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// CSV PLUMBING
// ============================================================================

/// A CSV reader whose header names have been normalized
struct Table<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    source: PathBuf,
    name: &'static str,
}

struct Record {
    fields: Vec<String>,
    line: u64,
    table: &'static str,
}

impl<R: Read> Table<R> {
    fn read(reader: R, source: &Path, name: &'static str) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .byte_headers()
            .map_err(|e| csv_error(source, e))?
            .iter()
            .map(|h| decode_field(h).trim().to_lowercase())
            .collect();

        Ok(Table {
            reader,
            headers,
            source: source.to_path_buf(),
            name,
        })
    }

    fn column(&self, column: &'static str) -> Result<usize, LoadError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| LoadError::MissingColumn {
                table: self.name,
                column,
                found: self.headers.join(", "),
            })
    }

    fn next_record(&mut self) -> Result<Option<Record>, LoadError> {
        let mut record = csv::ByteRecord::new();
        let more = self
            .reader
            .read_byte_record(&mut record)
            .map_err(|e| csv_error(&self.source, e))?;

        if !more {
            return Ok(None);
        }

        Ok(Some(Record {
            fields: record.iter().map(decode_field).collect(),
            line: record.position().map(|p| p.line()).unwrap_or(0),
            table: self.name,
        }))
    }
}

impl Record {
    fn get(&self, index: usize) -> &str {
        self.fields.get(index).map(|s| s.trim()).unwrap_or("")
    }

    fn key(&self, index: usize) -> Result<String, LoadError> {
        let key = normalize_region(self.get(index));
        if key.is_empty() {
            return Err(LoadError::EmptyKey {
                table: self.table,
                line: self.line,
            });
        }
        Ok(key)
    }

    fn optional_number(&self, index: usize, column: &'static str) -> Result<Option<f64>, LoadError> {
        let raw = self.get(index);
        if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        self.parse(raw, column).map(Some)
    }

    fn number(&self, index: usize, column: &'static str) -> Result<f64, LoadError> {
        self.parse(self.get(index), column)
    }

    fn parse(&self, raw: &str, column: &'static str) -> Result<f64, LoadError> {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LoadError::MalformedValue {
                table: self.table,
                line: self.line,
                column,
                value: raw.to_string(),
            })
    }
}

fn csv_error(source: &Path, error: csv::Error) -> LoadError {
    LoadError::Csv {
        path: source.to_path_buf(),
        source: error,
    }
}

/// UTF-8 when valid, Latin-1 otherwise (the exported files are Latin-1)
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// "bandra west" → "Bandra West"
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn source() -> PathBuf {
        PathBuf::from("test.csv")
    }

    #[test]
    fn test_listings_headers_are_normalized() {
        let csv = " Region ,BHK, Price_Per_Sqft \nPowai,2,21000\n  Bandra  West ,1,\nsion,3,NaN\n";
        let table = ListingsTable::from_reader(csv.as_bytes(), &source()).unwrap();

        assert_eq!(
            table.rows,
            vec![
                ListingRow { region: "powai".to_string(), price_per_sqft: Some(21000.0) },
                ListingRow { region: "bandra west".to_string(), price_per_sqft: None },
                ListingRow { region: "sion".to_string(), price_per_sqft: None },
            ]
        );
    }

    #[test]
    fn test_listings_missing_price_column_is_fatal() {
        let csv = "region,price\npowai,100\n";
        let err = ListingsTable::from_reader(csv.as_bytes(), &source()).unwrap_err();

        match err {
            LoadError::MissingColumn { column, found, .. } => {
                assert_eq!(column, PRICE_COLUMN);
                assert_eq!(found, "region, price");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_listings_malformed_price_is_fatal() {
        let csv = "region,price_per_sqft\npowai,100\nworli,abc\n";
        let err = ListingsTable::from_reader(csv.as_bytes(), &source()).unwrap_err();

        assert!(matches!(
            err,
            LoadError::MalformedValue { line: 3, column: PRICE_COLUMN, .. }
        ));
    }

    #[test]
    fn test_empty_region_key_is_fatal() {
        let csv = "region,latitude,longitude\n  ,19.1,72.9\n";
        let err = CoordsTable::from_reader(csv.as_bytes(), &source()).unwrap_err();

        assert!(matches!(err, LoadError::EmptyKey { line: 2, .. }));
    }

    #[test]
    fn test_coords_parse_and_label() {
        let csv = "REGION,Latitude,LONGITUDE\nbandra west,19.0596,72.8295\n";
        let table = CoordsTable::from_reader(csv.as_bytes(), &source()).unwrap();

        assert_eq!(
            table.rows,
            vec![CoordRow {
                region: "bandra west".to_string(),
                label: "Bandra West".to_string(),
                latitude: 19.0596,
                longitude: 72.8295,
            }]
        );
    }

    #[test]
    fn test_coords_require_numeric_coordinates() {
        let csv = "region,latitude,longitude\npowai,,72.9\n";
        let err = CoordsTable::from_reader(csv.as_bytes(), &source()).unwrap_err();

        assert!(matches!(err, LoadError::MalformedValue { column: LATITUDE_COLUMN, .. }));
    }

    #[test]
    fn test_latin1_bytes_are_decoded() {
        let mut csv = b"region,latitude,longitude\n".to_vec();
        csv.extend_from_slice(b"vil\xe9,19.0,72.0\n");
        let table = CoordsTable::from_reader(csv.as_slice(), &source()).unwrap();

        assert_eq!(table.rows[0].region, "vilé");
    }

    #[test]
    fn test_load_from_disk_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "region,price_per_sqft").unwrap();
        writeln!(file, "powai,100").unwrap();

        let table = ListingsTable::load(file.path()).unwrap();
        assert_eq!(table.rows.len(), 1);

        let missing = Path::new("/nonexistent/listings.csv");
        assert!(matches!(ListingsTable::load(missing), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("bandra kurla complex"), "Bandra Kurla Complex");
        assert_eq!(title_case(""), "");
    }
}
