use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::filter::FilteredView;

/// Total quantity sold on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuantity {
    pub date: NaiveDate,
    pub total_quantity: u64,
}

/// Ascending by date, one entry per date present in the data.
pub type DailyQuantitySeries = Vec<DailyQuantity>;

/// Sum `Quantity` per order date over the rows of `view` dated in `month`.
///
/// Only the month of year is compared, so the same month of different years
/// is aggregated together. Dates without sales are absent rather than zero.
pub fn daily_quantity(view: &FilteredView<'_>, month: u32) -> DailyQuantitySeries {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for rec in view.iter().filter(|r| r.order_date.month() == month) {
        *per_day.entry(rec.order_date).or_default() += u64::from(rec.quantity);
    }

    per_day
        .into_iter()
        .map(|(date, total_quantity)| DailyQuantity {
            date,
            total_quantity,
        })
        .collect()
}
