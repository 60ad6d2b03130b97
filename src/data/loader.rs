use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Date32Type, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use csv::StringRecord;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{
    SaleRecord, SalesTable, COL_COSTS, COL_ORDER_DATE, COL_ORDER_TIME, COL_PRODUCT_LINE,
    COL_QUANTITY, COL_RATING, COL_TOTAL_PRICE,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a sales file could not be turned into a [`SalesTable`].
/// Row numbers count data rows from 1, header excluded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed delimited file: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("invalid column data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: no value in column '{column}'")]
    EmptyValue { row: usize, column: &'static str },
    #[error("row {row}, column '{column}': '{value}' is not {expected}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma-delimited text with a header row
/// * `.tsv`          – tab-delimited text with a header row
/// * `.parquet`      – columns named like the text header, any compatible Arrow type
///
/// Columns beyond the required ones are ignored.
pub fn load_file(path: &Path) -> Result<SalesTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => load_delimited(path, b','),
        "tsv" => load_delimited(path, b'\t'),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with the exact column names, one invoice per line.
/// A row with a different field count than the header is rejected.
/// Text cells are kept verbatim, so `"Food "` and `"Food"` are distinct lines.
fn load_delimited(path: &Path, delimiter: u8) -> Result<SalesTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(open(path)?);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        records.push(columns.parse_record(&record, i + 1)?);
    }

    Ok(SalesTable::from_records(records))
}

/// Position of every required column in the header.
struct ColumnIndex {
    product_line: usize,
    rating: usize,
    order_time: usize,
    order_date: usize,
    quantity: usize,
    total_price: usize,
    costs: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(ColumnIndex {
            product_line: find(COL_PRODUCT_LINE)?,
            rating: find(COL_RATING)?,
            order_time: find(COL_ORDER_TIME)?,
            order_date: find(COL_ORDER_DATE)?,
            quantity: find(COL_QUANTITY)?,
            total_price: find(COL_TOTAL_PRICE)?,
            costs: find(COL_COSTS)?,
        })
    }

    fn parse_record(&self, record: &StringRecord, row: usize) -> Result<SaleRecord, LoadError> {
        let date_raw = field(record, self.order_date, COL_ORDER_DATE, row)?;

        Ok(SaleRecord {
            product_line: field(record, self.product_line, COL_PRODUCT_LINE, row)?.to_string(),
            rating: parse_number(field(record, self.rating, COL_RATING, row)?, row, COL_RATING)?,
            order_time: field(record, self.order_time, COL_ORDER_TIME, row)?.to_string(),
            order_date: parse_order_date(date_raw).ok_or_else(|| LoadError::InvalidValue {
                row,
                column: COL_ORDER_DATE,
                value: date_raw.to_string(),
                expected: "a date",
            })?,
            quantity: parse_quantity(field(record, self.quantity, COL_QUANTITY, row)?, row)?,
            total_price: parse_number(
                field(record, self.total_price, COL_TOTAL_PRICE, row)?,
                row,
                COL_TOTAL_PRICE,
            )?,
            costs: parse_number(field(record, self.costs, COL_COSTS, row)?, row, COL_COSTS)?,
        })
    }
}

fn field<'r>(
    record: &'r StringRecord,
    idx: usize,
    column: &'static str,
    row: usize,
) -> Result<&'r str, LoadError> {
    match record.get(idx) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoadError::EmptyValue { row, column }),
    }
}

fn parse_number(raw: &str, row: usize, column: &'static str) -> Result<f64, LoadError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidValue {
            row,
            column,
            value: raw.to_string(),
            expected: "a finite number",
        })
}

fn parse_quantity(raw: &str, row: usize) -> Result<u32, LoadError> {
    raw.trim().parse::<u32>().map_err(|_| LoadError::InvalidValue {
        row,
        column: COL_QUANTITY,
        value: raw.to_string(),
        expected: "a non-negative integer",
    })
}

/// Parse the textual order date. Accepts `YYYY-MM-DD`, `YYYY/MM/DD`,
/// `M/D/YYYY` and `M/D/YY`; a trailing time component is discarded.
pub(crate) fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(|c: char| c == ' ' || c == 'T').next()?;

    // %Y would happily read "19" as year 19, so month-first two-digit years are routed explicitly.
    let segments: Vec<&str> = date_part.split('/').collect();
    let two_digit_year = matches!(segments.as_slice(), [m, _, y] if m.len() <= 2 && y.len() == 2);
    if two_digit_year {
        return NaiveDate::parse_from_str(date_part, "%m/%d/%y").ok();
    }

    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Load a Parquet file containing sales rows.
///
/// Columns are cast to the expected types, so integers may stand in for
/// floats and `Order_date` may be a Date32/Date64/Timestamp or a string
/// in any of the text formats.  Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<SalesTable, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        append_batch(&batch?, &mut records)?;
    }

    Ok(SalesTable::from_records(records))
}

fn append_batch(batch: &RecordBatch, records: &mut Vec<SaleRecord>) -> Result<(), LoadError> {
    let row_offset = records.len();

    let lines = cast_column(batch, COL_PRODUCT_LINE, &DataType::Utf8)?;
    let ratings = cast_column(batch, COL_RATING, &DataType::Float64)?;
    let times = cast_column(batch, COL_ORDER_TIME, &DataType::Utf8)?;
    let quantities = cast_column(batch, COL_QUANTITY, &DataType::Int64)?;
    let prices = cast_column(batch, COL_TOTAL_PRICE, &DataType::Float64)?;
    let costs = cast_column(batch, COL_COSTS, &DataType::Float64)?;
    let dates = DateColumn::new(batch)?;

    let lines = lines.as_string::<i32>();
    let ratings = ratings.as_primitive::<Float64Type>();
    let times = times.as_string::<i32>();
    let quantities = quantities.as_primitive::<Int64Type>();
    let prices = prices.as_primitive::<Float64Type>();
    let costs = costs.as_primitive::<Float64Type>();

    for i in 0..batch.num_rows() {
        let row = row_offset + i + 1;
        require(lines, i, row, COL_PRODUCT_LINE)?;
        require(ratings, i, row, COL_RATING)?;
        require(times, i, row, COL_ORDER_TIME)?;
        require(quantities, i, row, COL_QUANTITY)?;
        require(prices, i, row, COL_TOTAL_PRICE)?;
        require(costs, i, row, COL_COSTS)?;

        let quantity = quantities.value(i);
        let quantity = u32::try_from(quantity).map_err(|_| LoadError::InvalidValue {
            row,
            column: COL_QUANTITY,
            value: quantity.to_string(),
            expected: "a non-negative integer",
        })?;

        records.push(SaleRecord {
            product_line: lines.value(i).to_string(),
            rating: ratings.value(i),
            order_time: times.value(i).to_string(),
            order_date: dates.get(i, row)?,
            quantity,
            total_price: prices.value(i),
            costs: costs.value(i),
        });
    }

    Ok(())
}

fn cast_column(batch: &RecordBatch, name: &'static str, to: &DataType) -> Result<ArrayRef, LoadError> {
    let col = batch
        .column_by_name(name)
        .ok_or(LoadError::MissingColumn(name))?;
    // Unsafe casts error out instead of silently producing nulls.
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    Ok(cast_with_options(col, to, &options)?)
}

fn require(arr: &dyn Array, i: usize, row: usize, column: &'static str) -> Result<(), LoadError> {
    if arr.is_null(i) {
        return Err(LoadError::EmptyValue { row, column });
    }
    Ok(())
}

/// `Order_date` either as native days-since-epoch or as text.
enum DateColumn {
    Days(ArrayRef),
    Text(ArrayRef),
}

impl DateColumn {
    fn new(batch: &RecordBatch) -> Result<Self, LoadError> {
        let col = batch
            .column_by_name(COL_ORDER_DATE)
            .ok_or(LoadError::MissingColumn(COL_ORDER_DATE))?;
        match col.data_type() {
            DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => Ok(DateColumn::Days(
                cast_column(batch, COL_ORDER_DATE, &DataType::Date32)?,
            )),
            _ => Ok(DateColumn::Text(cast_column(
                batch,
                COL_ORDER_DATE,
                &DataType::Utf8,
            )?)),
        }
    }

    fn get(&self, i: usize, row: usize) -> Result<NaiveDate, LoadError> {
        match self {
            DateColumn::Days(arr) => {
                let days = arr.as_primitive::<Date32Type>();
                require(days, i, row, COL_ORDER_DATE)?;
                let value = days.value(i);
                value
                    .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
                    .and_then(NaiveDate::from_num_days_from_ce_opt)
                    .ok_or_else(|| LoadError::InvalidValue {
                        row,
                        column: COL_ORDER_DATE,
                        value: value.to_string(),
                        expected: "a representable date",
                    })
            }
            DateColumn::Text(arr) => {
                let text = arr.as_string::<i32>();
                require(text, i, row, COL_ORDER_DATE)?;
                let raw = text.value(i);
                parse_order_date(raw).ok_or_else(|| LoadError::InvalidValue {
                    row,
                    column: COL_ORDER_DATE,
                    value: raw.to_string(),
                    expected: "a date",
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "Invoice_id,Product_line,Rating,Order_time,Order_date,Quantity,Total_price,costs";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let file = write_temp(
            ".csv",
            &format!(
                "{HEADER}\n\
                 750-67-8428,Health and beauty,9.1,1:08 PM,1/5/2019,7,548.97,522.83\n\
                 226-31-3081,Electronic accessories,9.6,10:29 AM,3/8/2019,5,80.22,76.4\n"
            ),
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.product_line, "Health and beauty");
        assert_eq!(first.rating, 9.1);
        assert_eq!(first.order_time, "1:08 PM");
        assert_eq!(first.order_date, date(2019, 1, 5));
        assert_eq!(first.quantity, 7);
        assert_eq!(first.total_price, 548.97);
        assert_eq!(first.costs, 522.83);
        assert_eq!(table.product_lines(), ["Health and beauty", "Electronic accessories"]);
    }

    #[test]
    fn loads_tab_delimited() {
        let file = write_temp(
            ".tsv",
            "Product_line\tRating\tOrder_time\tOrder_date\tQuantity\tTotal_price\tcosts\n\
             Food\t7\t13:08\t2019-03-02\t3\t30\t20\n",
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.records()[0].order_date, date(2019, 3, 2));
        assert_eq!(table.records()[0].rating, 7.0);
    }

    #[test]
    fn loads_year_first_slash_dates() {
        let file = write_temp(
            ".csv",
            &format!("{HEADER}\nx,Food,7,13:08,2019/03/31,3,30,20\ny,Food,7,13:08,2019/3/1,1,10,5\n"),
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.records()[0].order_date, date(2019, 3, 31));
        assert_eq!(table.records()[1].order_date, date(2019, 3, 1));
    }

    #[test]
    fn text_cells_keep_surrounding_spaces() {
        let file = write_temp(
            ".csv",
            &format!(
                "{HEADER}\n\
                 x,Food ,7,13:08,2019-03-02, 3 ,30,20\n\
                 y,Food,7, 13:08,2019-03-02,3,30,20\n"
            ),
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.product_lines(), ["Food ", "Food"]);
        assert_eq!(table.records()[0].quantity, 3);
        assert_eq!(table.records()[1].order_time, " 13:08");
    }

    #[test]
    fn header_only_file_is_empty_table() {
        let file = write_temp(".csv", &format!("{HEADER}\n"));
        let table = load_file(file.path()).unwrap();
        assert!(table.is_empty());
        assert!(table.product_lines().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "{err}");
    }

    #[test]
    fn missing_column_is_reported() {
        let file = write_temp(
            ".csv",
            "Product_line,Rating,Order_time,Order_date,Quantity,Total_price\n\
             Food,7,13:08,2019-03-02,3,30\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("costs")), "{err}");
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let file = write_temp(
            ".csv",
            "Product_line,Rating,Order_time,Order_date,Quantity,Total_price,Costs\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("costs")), "{err}");
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let file = write_temp(
            ".csv",
            &format!("{HEADER}\nx,Food,7,13:08,2019-03-02,3,30\n"),
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)), "{err}");
    }

    #[test]
    fn empty_cell_is_rejected() {
        let file = write_temp(
            ".csv",
            &format!("{HEADER}\nx,Food,,13:08,2019-03-02,3,30,20\n"),
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(
            matches!(err, LoadError::EmptyValue { row: 1, column: "Rating" }),
            "{err}"
        );
    }

    #[test]
    fn unparseable_values_are_rejected() {
        let cases = [
            ("x,Food,high,13:08,2019-03-02,3,30,20", "Rating"),
            ("x,Food,7,13:08,not-a-date,3,30,20", "Order_date"),
            ("x,Food,7,13:08,2019-03-02,-1,30,20", "Quantity"),
            ("x,Food,7,13:08,2019-03-02,2.5,30,20", "Quantity"),
            ("x,Food,7,13:08,2019-03-02,3,NaN,20", "Total_price"),
        ];
        for (line, bad_column) in cases {
            let file = write_temp(".csv", &format!("{HEADER}\n{line}\n"));
            match load_file(file.path()).unwrap_err() {
                LoadError::InvalidValue { row, column, .. } => {
                    assert_eq!(row, 1);
                    assert_eq!(column, bad_column);
                }
                other => panic!("unexpected error for {line}: {other}"),
            }
        }
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ref e) if e == "xlsx"));
    }

    #[test]
    fn order_date_formats() {
        assert_eq!(parse_order_date("2019-03-31"), Some(date(2019, 3, 31)));
        assert_eq!(parse_order_date("2019/03/31"), Some(date(2019, 3, 31)));
        assert_eq!(parse_order_date("2019/3/1"), Some(date(2019, 3, 1)));
        assert_eq!(parse_order_date("2019/12/12"), Some(date(2019, 12, 12)));
        assert_eq!(parse_order_date("3/31/2019"), Some(date(2019, 3, 31)));
        assert_eq!(parse_order_date("03/01/19"), Some(date(2019, 3, 1)));
        assert_eq!(parse_order_date("2019-03-31 14:42:00"), Some(date(2019, 3, 31)));
        assert_eq!(parse_order_date("2019-03-31T14:42:00"), Some(date(2019, 3, 31)));
        assert_eq!(parse_order_date("31/3/2019"), None);
        assert_eq!(parse_order_date(""), None);
    }

    fn write_parquet(dates: ArrayRef) -> tempfile::NamedTempFile {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Product_line", DataType::Utf8, false),
            Field::new("Rating", DataType::Float64, false),
            Field::new("Order_time", DataType::Utf8, false),
            Field::new("Order_date", dates.data_type().clone(), false),
            Field::new("Quantity", DataType::Int64, false),
            Field::new("Total_price", DataType::Float64, false),
            Field::new("costs", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Food", "Sports"])),
                Arc::new(Float64Array::from(vec![4.5, 8.0])),
                Arc::new(StringArray::from(vec!["10:00", "19:48"])),
                dates,
                Arc::new(Int64Array::from(vec![3, 9])),
                Arc::new(Float64Array::from(vec![31.5, 94.5])),
                Arc::new(Float64Array::from(vec![30.0, 90.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn loads_parquet_with_native_dates() {
        let epoch = date(1970, 1, 1);
        let days: Vec<i32> = [date(2019, 3, 1), date(2019, 3, 31)]
            .iter()
            .map(|d| (*d - epoch).num_days() as i32)
            .collect();
        let file = write_parquet(Arc::new(Date32Array::from(days)));

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].order_date, date(2019, 3, 1));
        assert_eq!(table.records()[1].order_date, date(2019, 3, 31));
        assert_eq!(table.records()[1].quantity, 9);
        assert_eq!(table.records()[1].product_line, "Sports");
    }

    #[test]
    fn loads_parquet_with_text_dates() {
        let file = write_parquet(Arc::new(StringArray::from(vec!["3/1/2019", "2019-03-31"])));
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.records()[0].order_date, date(2019, 3, 1));
        assert_eq!(table.records()[1].order_date, date(2019, 3, 31));
    }
}
