use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Column names as they appear in the source file header
// ---------------------------------------------------------------------------

pub const COL_PRODUCT_LINE: &str = "Product_line";
pub const COL_RATING: &str = "Rating";
pub const COL_ORDER_TIME: &str = "Order_time";
pub const COL_ORDER_DATE: &str = "Order_date";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_TOTAL_PRICE: &str = "Total_price";
pub const COL_COSTS: &str = "costs";

/// Label of the synthetic first selector entry meaning "all product lines".
pub const NO_SELECTION_LABEL: &str = "Choose the Product Line";

// ---------------------------------------------------------------------------
// SaleRecord – one invoice row
// ---------------------------------------------------------------------------

/// A single invoice (one row of the sales file).
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub product_line: String,
    /// Customer rating, expected on a 0–10 scale.
    pub rating: f64,
    /// Time-of-day label kept verbatim (e.g. `13:08` or `1:08 PM`).
    pub order_time: String,
    pub order_date: NaiveDate,
    pub quantity: u32,
    pub total_price: f64,
    pub costs: f64,
}

// ---------------------------------------------------------------------------
// SalesTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built; filtering produces views.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    records: Vec<SaleRecord>,
    /// Distinct product lines in order of first appearance.
    product_lines: Vec<String>,
}

impl SalesTable {
    /// Build the product-line index from the loaded records.
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut product_lines = Vec::new();
        for rec in &records {
            if seen.insert(rec.product_line.as_str()) {
                product_lines.push(rec.product_line.clone());
            }
        }
        SalesTable {
            records,
            product_lines,
        }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    /// Distinct product lines, first-seen order.
    pub fn product_lines(&self) -> &[String] {
        &self.product_lines
    }

    pub fn has_product_line(&self, line: &str) -> bool {
        self.product_lines.iter().any(|l| l == line)
    }

    /// Entries for a product-line selector: the "no selection" sentinel first.
    pub fn selector_options(&self) -> Vec<LineSelection> {
        std::iter::once(LineSelection::All)
            .chain(self.product_lines.iter().cloned().map(LineSelection::Line))
            .collect()
    }

    /// Number of invoices.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LineSelection – the user's current product-line choice
// ---------------------------------------------------------------------------

/// Current selector value: everything, or one product line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum LineSelection {
    #[default]
    All,
    Line(String),
}

impl LineSelection {
    /// Interpret a selector label; the sentinel label maps to [`LineSelection::All`].
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            None | Some(NO_SELECTION_LABEL) => LineSelection::All,
            Some(line) => LineSelection::Line(line.to_string()),
        }
    }

    pub fn as_line(&self) -> Option<&str> {
        match self {
            LineSelection::All => None,
            LineSelection::Line(l) => Some(l),
        }
    }
}

impl fmt::Display for LineSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineSelection::All => write!(f, "{NO_SELECTION_LABEL}"),
            LineSelection::Line(l) => write!(f, "{l}"),
        }
    }
}

impl Serialize for LineSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_line().serialize(serializer)
    }
}
