use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataUnavailable;
use super::model::{Dataset, Measure, WorkforceRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a workforce table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one row per (state, district, industry)
/// * `.json`    – `[{ "State Name": "...", "District": "...", ... }, ...]`
/// * `.parquet` – flat table with the same column names as the CSV
///
/// Headers are matched after trimming, lower-casing and collapsing runs of
/// whitespace, so `"Main Workers - Total -  Persons"` is recognised.
pub fn load_file(path: &Path) -> Result<Dataset, DataUnavailable> {
    if !path.is_file() {
        return Err(DataUnavailable::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let loaded = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => {
            return Err(DataUnavailable::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };

    let records = loaded.map_err(|err| match err.downcast::<DataUnavailable>() {
        Ok(unavailable) => unavailable,
        Err(other) => DataUnavailable::Malformed {
            path: path.to_path_buf(),
            reason: format!("{other:#}"),
        },
    })?;

    let dataset = Dataset::from_records(records);
    if dataset.is_empty() {
        return Err(DataUnavailable::Empty {
            path: path.to_path_buf(),
        });
    }

    log::info!(
        "Loaded {} records ({} states, {} industries) from {}",
        dataset.len(),
        dataset.distinct_regions().len(),
        dataset.distinct_categories().len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Trim, lower-case and collapse internal whitespace of a header.
pub(crate) fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

const REGION_HEADERS: &[&str] = &["state name", "india/states", "state"];
const DISTRICT_HEADERS: &[&str] = &["district", "district name"];
const CATEGORY_HEADERS: &[&str] = &["nic name", "industry"];

/// Source column index of every field the record schema knows about.
#[derive(Debug)]
struct ColumnMap {
    region: usize,
    district: usize,
    category: usize,
    counts: Vec<(usize, Measure)>,
}

impl ColumnMap {
    fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, DataUnavailable> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();

        let find_key = |aliases: &[&str], column: &'static str| {
            aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h == alias))
                .ok_or(DataUnavailable::MissingColumn { column })
        };

        let region = find_key(REGION_HEADERS, "state name")?;
        let district = find_key(DISTRICT_HEADERS, "district")?;
        let category = find_key(CATEGORY_HEADERS, "nic name")?;

        let by_name: HashMap<String, Measure> =
            Measure::all().map(|m| (m.column_name(), m)).collect();

        let mut counts: Vec<(usize, Measure)> = Vec::new();
        for (idx, name) in normalized.iter().enumerate() {
            if let Some(&measure) = by_name.get(name) {
                // First occurrence wins on duplicated headers.
                if !counts.iter().any(|(_, m)| *m == measure) {
                    counts.push((idx, measure));
                }
            }
        }
        if counts.len() < by_name.len() {
            log::debug!(
                "{} of {} count columns absent; treating them as zero",
                by_name.len() - counts.len(),
                by_name.len()
            );
        }

        Ok(ColumnMap {
            region,
            district,
            category,
            counts,
        })
    }

    /// Assemble one record from per-column accessors.
    ///
    /// `count` returns `None` for cells that are empty or not a valid
    /// non-negative number; those are stored as zero and tallied in `invalid`.
    fn record<K, C>(&self, mut key: K, mut count: C, invalid: &mut usize) -> WorkforceRecord
    where
        K: FnMut(usize) -> String,
        C: FnMut(usize) -> Option<u64>,
    {
        let mut rec = WorkforceRecord::new(key(self.region), key(self.district), key(self.category));
        for &(idx, measure) in &self.counts {
            match count(idx) {
                Some(v) => rec.set(measure, v),
                None => *invalid += 1,
            }
        }
        rec
    }
}

/// Parse a count cell: unsigned integer, or a non-negative finite decimal
/// (truncated).
pub(crate) fn parse_count(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<u64>() {
        return Some(v);
    }
    s.parse::<f64>().ok().and_then(float_count)
}

fn float_count(v: f64) -> Option<u64> {
    (v.is_finite() && v >= 0.0).then(|| v.trunc() as u64)
}

fn int_count(v: i64) -> Option<u64> {
    u64::try_from(v).ok()
}

fn report_invalid(invalid: usize, path: &Path) {
    if invalid > 0 {
        log::debug!(
            "{invalid} empty or invalid count cells in {} read as zero",
            path.display()
        );
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<WorkforceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut invalid = 0;

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let rec = columns.record(
            |idx| row.get(idx).unwrap_or("").trim().to_string(),
            |idx| row.get(idx).and_then(parse_count),
            &mut invalid,
        );
        records.push(rec);
    }

    report_invalid(invalid, path);
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "State Name": "Kerala",
///     "District": "Idukki",
///     "NIC Name": "Weaving",
///     "Main Workers - Total - Persons": 120,
///     ...
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<WorkforceRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    // Union of keys across all rows, in first-seen order.
    let mut headers: Vec<String> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut invalid = 0;

    for row in rows {
        let cell = |idx: usize| row.get(&headers[idx]);
        let rec = columns.record(
            |idx| cell(idx).map(json_text).unwrap_or_default(),
            |idx| cell(idx).and_then(json_count),
            &mut invalid,
        );
        records.push(rec);
    }

    report_invalid(invalid, path);
    Ok(records)
}

fn json_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_count(val: &JsonValue) -> Option<u64> {
    match val {
        JsonValue::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().and_then(int_count))
            .or_else(|| n.as_f64().and_then(float_count)),
        JsonValue::String(s) => parse_count(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table.
///
/// Key columns may be `Utf8` or `LargeUtf8`; count columns may be any
/// integer or float type, or text holding numbers.
fn load_parquet(path: &Path) -> Result<Vec<WorkforceRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut invalid = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if batch.num_columns() != headers.len() {
            bail!(
                "record batch has {} columns, schema has {}",
                batch.num_columns(),
                headers.len()
            );
        }
        for row in 0..batch.num_rows() {
            let rec = columns.record(
                |idx| arrow_text(batch.column(idx), row),
                |idx| arrow_count(batch.column(idx), row),
                &mut invalid,
            );
            records.push(rec);
        }
    }

    report_invalid(invalid, path);
    Ok(records)
}

// -- Arrow helpers --

fn arrow_text(col: &ArrayRef, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).trim().to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).trim().to_string(),
        _ => arrow::util::display::array_value_to_string(col, row).unwrap_or_default(),
    }
}

fn arrow_count(col: &ArrayRef, row: usize) -> Option<u64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::UInt64 => Some(col.as_primitive::<UInt64Type>().value(row)),
        DataType::UInt32 => Some(col.as_primitive::<UInt32Type>().value(row) as u64),
        DataType::Int64 => int_count(col.as_primitive::<Int64Type>().value(row)),
        DataType::Int32 => int_count(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Float64 => float_count(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => float_count(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Utf8 | DataType::LargeUtf8 => parse_count(&arrow_text(col, row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::aggregate::aggregate;

    const HEADER: &str = "State Code,District Code,State Name,District,NIC Name,\
Main Workers - Total -  Persons,Main Workers - Rural -  Persons,Main Workers - Urban -  Persons,\
Main Workers - Total - Males,Main Workers - Total - Females,\
Marginal Workers - Total -  Persons,Marginal Workers - Rural -  Persons,Marginal Workers - Urban -  Persons,\
Marginal Workers - Total - Males,Marginal Workers - Total - Females";

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn header_normalization_collapses_whitespace() {
        assert_eq!(
            normalize_header("  Main Workers - Total -  Persons "),
            "main workers - total - persons"
        );
        assert_eq!(normalize_header("NIC Name"), "nic name");
    }

    #[test]
    fn parse_count_accepts_integers_and_truncates_decimals() {
        assert_eq!(parse_count(" 42 "), Some(42));
        assert_eq!(parse_count("12.9"), Some(12));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("n/a"), None);
        assert_eq!(parse_count("NaN"), None);
    }

    #[test]
    fn loads_census_style_csv() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             32,1,Kerala,Idukki,Weaving,10,6,4,7,3,2,2,0,1,1\n\
             32,2,Kerala,Kollam,Weaving,5,5,0,3,2,1,1,0,1,0\n\
             18,3,Assam,Dhubri,Weaving,9,9,0,9,0,0,0,0,0,0\n"
        );
        let path = write(&dir, "workers.csv", &csv);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        let rec = &ds.records()[0];
        assert_eq!(rec.region, "Kerala");
        assert_eq!(rec.district, "Idukki");
        assert_eq!(rec.category, "Weaving");
        assert_eq!(rec.main.total.persons, 10);
        assert_eq!(rec.main.total.females, 3);
        assert_eq!(rec.marginal.total.persons, 2);
        // Column not present in the file.
        assert_eq!(rec.main.rural.males, 0);

        let r = aggregate(&ds, "Kerala", "Weaving");
        assert_eq!(r.main.total, 15);
        assert_eq!(r.main.rural, 11);
        assert_eq!(r.marginal.total, 3);
    }

    #[test]
    fn invalid_cells_read_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let csv = "State Name,District,NIC Name,Main Workers - Total - Persons,Marginal Workers - Total - Persons\n\
                   Goa, North Goa ,Fishing,abc,4\n\
                   Goa,South Goa,Fishing,,-2\n";
        let path = write(&dir, "goa.csv", csv);

        let ds = load_file(&path).unwrap();
        let recs = ds.records();
        assert_eq!(recs[0].district, "North Goa");
        assert_eq!(recs[0].main.total.persons, 0);
        assert_eq!(recs[0].marginal.total.persons, 4);
        assert_eq!(recs[1].main.total.persons, 0);
        assert_eq!(recs[1].marginal.total.persons, 0);
    }

    #[test]
    fn missing_key_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "no_nic.csv",
            "State Name,District,Main Workers - Total - Persons\nGoa,North Goa,3\n",
        );
        assert_eq!(
            load_file(&path).unwrap_err(),
            DataUnavailable::MissingColumn { column: "nic name" }
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        assert!(matches!(
            load_file(&path),
            Err(DataUnavailable::NotFound { .. })
        ));
    }

    #[test]
    fn header_only_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "empty.csv", "State Name,District,NIC Name\n");
        assert!(matches!(
            load_file(&path),
            Err(DataUnavailable::Empty { .. })
        ));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "workers.xlsx", "");
        assert_eq!(
            load_file(&path).unwrap_err(),
            DataUnavailable::UnsupportedFormat {
                extension: "xlsx".into()
            }
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "broken.json", "{ not json");
        assert!(matches!(
            load_file(&path),
            Err(DataUnavailable::Malformed { .. })
        ));
    }

    #[test]
    fn loads_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[
            {"State Name": "Kerala", "District": "Idukki", "NIC Name": "Weaving",
             "Main Workers - Total -  Persons": 10, "Marginal Workers - Total - Persons": "2"},
            {"State Name": "Kerala", "District": "Kollam", "NIC Name": "Weaving",
             "Main Workers - Total -  Persons": 5.0}
        ]"#;
        let path = write(&dir, "workers.json", json);

        let ds = load_file(&path).unwrap();
        let r = aggregate(&ds, "Kerala", "Weaving");
        assert_eq!(r.main.total, 15);
        assert_eq!(r.marginal.total, 2);
        assert_eq!(r.by_district.len(), 2);
    }

    #[test]
    fn loads_parquet_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workers.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("State Name", DataType::Utf8, false),
            Field::new("District", DataType::Utf8, false),
            Field::new("NIC Name", DataType::Utf8, false),
            Field::new("Main Workers - Total -  Persons", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Assam", "Assam"])),
                Arc::new(StringArray::from(vec!["Dhubri", "Goalpara"])),
                Arc::new(StringArray::from(vec!["Tea", "Tea"])),
                Arc::new(Int64Array::from(vec![Some(40), None])),
            ],
        )
        .unwrap();
        let file = fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        let r = aggregate(&ds, "assam", "tea");
        assert_eq!(r.main.total, 40);
        assert_eq!(r.district("Goalpara").map(|d| d.main), Some(0));
    }
}
