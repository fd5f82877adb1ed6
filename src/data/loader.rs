use std::fs::File;
use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{
    LaunchDataset, LaunchRecord, Outcome, SiteSelector, COL_BOOSTER_CATEGORY, COL_CLASS,
    COL_LAUNCH_SITE, COL_PAYLOAD_MASS, REQUIRED_COLUMNS,
};
use super::DatasetError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, required columns looked up by name (recommended)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Extra columns are ignored.
pub fn load_file(path: &Path) -> Result<LaunchDataset, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} launches from {} ({} sites, payload {:.0}..={:.0} kg)",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.payload_bounds().low,
        dataset.payload_bounds().high,
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Column binding
// ---------------------------------------------------------------------------

/// Positions of the required columns in a header / schema.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    site: usize,
    payload: usize,
    class: usize,
    booster: usize,
}

impl ColumnIndex {
    fn locate(find: impl Fn(&str) -> Option<usize>) -> Result<Self, DatasetError> {
        let [site, payload, class, booster] =
            REQUIRED_COLUMNS.map(|col| find(col).ok_or(DatasetError::MissingColumn(col)));
        Ok(ColumnIndex {
            site: site?,
            payload: payload?,
            class: class?,
            booster: booster?,
        })
    }
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

fn invalid(row: usize, column: &'static str, value: impl Into<String>) -> DatasetError {
    DatasetError::InvalidValue {
        row,
        column,
        value: value.into(),
    }
}

/// Site codes must be non-empty and must not collide with the "every site"
/// sentinel, or the site could never be selected on its own.
fn check_site(row: usize, site: &str) -> Result<String, DatasetError> {
    let site = site.trim();
    if site.is_empty() || site == SiteSelector::ALL {
        return Err(invalid(row, COL_LAUNCH_SITE, site));
    }
    Ok(site.to_string())
}

fn check_payload(row: usize, value: f64, raw: &str) -> Result<f64, DatasetError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid(row, COL_PAYLOAD_MASS, raw))
    }
}

/// `class` arrives as `1`, `1.0` or `true` depending on who wrote the file.
fn outcome_from_number(row: usize, value: f64, raw: &str) -> Result<Outcome, DatasetError> {
    if value.fract() == 0.0 {
        if let Some(outcome) = Outcome::from_flag(value as i64) {
            return Ok(outcome);
        }
    }
    Err(invalid(row, COL_CLASS, raw))
}

fn parse_payload(row: usize, s: &str) -> Result<f64, DatasetError> {
    let v = s
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid(row, COL_PAYLOAD_MASS, s))?;
    check_payload(row, v, s)
}

fn parse_outcome(row: usize, s: &str) -> Result<Outcome, DatasetError> {
    match s.trim() {
        "true" | "True" => Ok(Outcome::Success),
        "false" | "False" => Ok(Outcome::Failure),
        t => {
            let v = t.parse::<f64>().map_err(|_| invalid(row, COL_CLASS, s))?;
            outcome_from_number(row, v, s)
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row, e.g. the
/// `spacex_launch_dash.csv` export:
///
/// ```text
/// Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
/// 1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
/// ```
fn load_csv(path: &Path) -> Result<LaunchDataset, DatasetError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers = reader.headers()?.clone();
    let idx = ColumnIndex::locate(|name| headers.iter().position(|h| h.trim() == name))?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |i: usize| record.get(i).unwrap_or("");

        records.push(LaunchRecord {
            launch_site: check_site(row_no, cell(idx.site))?,
            payload_mass_kg: parse_payload(row_no, cell(idx.payload))?,
            outcome: parse_outcome(row_no, cell(idx.class))?,
            booster_version_category: cell(idx.booster).trim().to_string(),
        });
    }

    LaunchDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 1,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset, DatasetError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;

    let rows = match root.as_array() {
        Some(rows) => rows,
        None => return Err(invalid(0, COL_LAUNCH_SITE, "top-level value is not an array")),
    };

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| invalid(i, COL_LAUNCH_SITE, row.to_string()))?;

        let site = json_field(obj, COL_LAUNCH_SITE)?;
        let payload = json_field(obj, COL_PAYLOAD_MASS)?;
        let class = json_field(obj, COL_CLASS)?;
        let booster = json_field(obj, COL_BOOSTER_CATEGORY)?;

        let launch_site = match site.as_str() {
            Some(s) => check_site(i, s)?,
            None => return Err(invalid(i, COL_LAUNCH_SITE, site.to_string())),
        };
        let payload_mass_kg = match payload.as_f64() {
            Some(v) => check_payload(i, v, &payload.to_string())?,
            None => return Err(invalid(i, COL_PAYLOAD_MASS, payload.to_string())),
        };
        let outcome = match class {
            JsonValue::Bool(true) => Outcome::Success,
            JsonValue::Bool(false) => Outcome::Failure,
            JsonValue::Number(n) => match n.as_f64() {
                Some(v) => outcome_from_number(i, v, &n.to_string())?,
                None => return Err(invalid(i, COL_CLASS, n.to_string())),
            },
            JsonValue::String(s) => parse_outcome(i, s)?,
            other => return Err(invalid(i, COL_CLASS, other.to_string())),
        };
        let booster_version_category = match booster {
            JsonValue::String(s) => s.trim().to_string(),
            other => other.to_string(),
        };

        records.push(LaunchRecord {
            launch_site,
            payload_mass_kg,
            outcome,
            booster_version_category,
        });
    }

    LaunchDataset::from_records(records)
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    col: &'static str,
) -> Result<&'a JsonValue, DatasetError> {
    obj.get(col).ok_or(DatasetError::MissingColumn(col))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same flat columns as the CSV export.
///
/// Column types are normalised with Arrow casts, so files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`) work:
/// - site / booster category: Utf8 or LargeUtf8
/// - payload: any integer or float type
/// - `class`: integer, float or boolean
fn load_parquet(path: &Path) -> Result<LaunchDataset, DatasetError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    // Bind columns from the file schema up front so an empty file still
    // reports a missing column.
    let schema = builder.schema().clone();
    let idx = ColumnIndex::locate(|name| schema.index_of(name).ok())?;

    let reader = builder.build()?;
    let mut records = Vec::new();
    let mut row_base = 0usize;

    for batch_result in reader {
        let batch = batch_result?;

        let sites = cast(batch.column(idx.site), &DataType::Utf8)?;
        let payloads = cast(batch.column(idx.payload), &DataType::Float64)?;
        let classes = cast(batch.column(idx.class), &DataType::Float64)?;
        let boosters = cast(batch.column(idx.booster), &DataType::Utf8)?;

        let sites = sites.as_string::<i32>();
        let payloads = payloads.as_primitive::<Float64Type>();
        let classes = classes.as_primitive::<Float64Type>();
        let boosters = boosters.as_string::<i32>();

        for row in 0..batch.num_rows() {
            let global = row_base + row;
            require_value(sites, row, global, COL_LAUNCH_SITE)?;
            require_value(payloads, row, global, COL_PAYLOAD_MASS)?;
            require_value(classes, row, global, COL_CLASS)?;

            let payload = payloads.value(row);
            let class = classes.value(row);
            records.push(LaunchRecord {
                launch_site: check_site(global, sites.value(row))?,
                payload_mass_kg: check_payload(global, payload, &payload.to_string())?,
                outcome: outcome_from_number(global, class, &class.to_string())?,
                booster_version_category: if boosters.is_null(row) {
                    String::new()
                } else {
                    boosters.value(row).trim().to_string()
                },
            });
        }

        row_base += batch.num_rows();
    }

    LaunchDataset::from_records(records)
}

fn require_value(
    col: &dyn Array,
    row: usize,
    global_row: usize,
    column: &'static str,
) -> Result<(), DatasetError> {
    if col.is_null(row) {
        Err(invalid(global_row, column, "null"))
    } else {
        Ok(())
    }
}
