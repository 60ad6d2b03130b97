use std::sync::Arc;

use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Days, NaiveDate};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const PRODUCT_LINES: [&str; 6] = [
    "Health and beauty",
    "Electronic accessories",
    "Home and lifestyle",
    "Sports and travel",
    "Food and beverages",
    "Fashion accessories",
];

const CITIES: [&str; 3] = ["Yangon", "Naypyitaw", "Mandalay"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.range(0, items.len() as u64 - 1) as usize]
    }
}

/// One invoice in the layout of the supermarket sales export.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Invoice_id")]
    invoice_id: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Product_line")]
    product_line: String,
    #[serde(rename = "Unit_price")]
    unit_price: f64,
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[serde(rename = "Total_price")]
    total_price: f64,
    costs: f64,
    #[serde(rename = "Order_date")]
    order_date: String,
    #[serde(rename = "Order_time")]
    order_time: String,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(skip)]
    date: NaiveDate,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate_rows(n: usize, rng: &mut SimpleRng) -> Vec<Row> {
    let first_day = NaiveDate::from_ymd_opt(2019, 1, 1).expect("valid start date");

    (0..n)
        .map(|i| {
            // Jan 1 .. Mar 30, 2019
            let date = first_day + Days::new(rng.range(0, 88));
            let unit_price = round2(10.0 + rng.next_f64() * 90.0);
            let quantity = rng.range(1, 10) as i64;
            let costs = round2(unit_price * quantity as f64);
            let total_price = round2(costs * 1.05);
            let hour = rng.range(10, 20);
            let minute = rng.range(0, 59);

            Row {
                invoice_id: format!(
                    "{:03}-{:02}-{:04}",
                    rng.range(100, 899),
                    rng.range(10, 99),
                    i
                ),
                city: rng.pick(&CITIES).to_string(),
                product_line: rng.pick(&PRODUCT_LINES).to_string(),
                unit_price,
                quantity,
                total_price,
                costs,
                order_date: date.format("%-m/%-d/%Y").to_string(),
                order_time: format!("{hour}:{minute:02}"),
                rating: (40.0 + rng.next_f64() * 60.0).round() / 10.0,
                date,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    for row in rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(rows: &[Row], path: &str) {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch");

    let schema = Arc::new(Schema::new(vec![
        Field::new("Invoice_id", DataType::Utf8, false),
        Field::new("Product_line", DataType::Utf8, false),
        Field::new("Quantity", DataType::Int64, false),
        Field::new("Total_price", DataType::Float64, false),
        Field::new("costs", DataType::Float64, false),
        Field::new("Order_date", DataType::Date32, false),
        Field::new("Order_time", DataType::Utf8, false),
        Field::new("Rating", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.invoice_id.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.product_line.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.quantity))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.total_price))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.costs))),
            Arc::new(Date32Array::from_iter_values(
                rows.iter().map(|r| (r.date - epoch).num_days() as i32),
            )),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.order_time.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.rating))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(1000, &mut rng);

    std::fs::create_dir_all("data").expect("Failed to create data directory");
    write_csv(&rows, "data/superSales.csv");
    write_parquet(&rows, "data/superSales.parquet");

    println!(
        "Wrote {} invoices to data/superSales.csv and data/superSales.parquet",
        rows.len()
    );
}
