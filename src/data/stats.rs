use std::collections::HashMap;

use serde::Serialize;

use super::filter::FilteredView;

// ---------------------------------------------------------------------------
// SummaryStats – the scalar figures shown on the stat cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_invoices: usize,
    /// Mean rating; `0.0` for an empty view.
    pub average_rating: f64,
    /// Most frequent order time; empty string for an empty view.
    pub most_active_time: String,
    pub income: f64,
    pub costs: f64,
    pub profit: f64,
}

/// Compute all summary figures over `view` in one pass.
pub fn summarize(view: &FilteredView<'_>) -> SummaryStats {
    let mut rating_sum = 0.0;
    let mut income = 0.0;
    let mut costs = 0.0;
    let mut time_counts: HashMap<&str, usize> = HashMap::new();

    for rec in view.iter() {
        rating_sum += rec.rating;
        income += rec.total_price;
        costs += rec.costs;
        *time_counts.entry(rec.order_time.as_str()).or_default() += 1;
    }

    let total_invoices = view.len();
    let average_rating = if total_invoices == 0 {
        0.0
    } else {
        rating_sum / total_invoices as f64
    };

    SummaryStats {
        total_invoices,
        average_rating,
        most_active_time: mode(&time_counts).unwrap_or_default().to_string(),
        income,
        costs,
        profit: income - costs,
    }
}

/// Most frequent key; ties resolve to the lexicographically smallest value.
fn mode<'a>(counts: &HashMap<&'a str, usize>) -> Option<&'a str> {
    counts
        .iter()
        .max_by(|(a_val, a_n), (b_val, b_n)| a_n.cmp(b_n).then_with(|| b_val.cmp(a_val)))
        .map(|(val, _)| *val)
}
