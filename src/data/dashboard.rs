use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::filter::filter_by_selection;
use super::model::{LineSelection, SalesTable};
use super::series::{daily_quantity, DailyQuantitySeries};
use super::stats::{summarize, SummaryStats};

// ---------------------------------------------------------------------------
// Dashboard – everything the presentation layer needs for one selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Selected product line, `null` for all lines.
    pub product_line: LineSelection,
    pub month: u32,
    pub summary: SummaryStats,
    pub daily_quantity: DailyQuantitySeries,
}

impl Dashboard {
    /// Filter once, then derive both the stat cards and the chart series.
    pub fn compute(table: &SalesTable, selection: &LineSelection, month: u32) -> Self {
        let view = filter_by_selection(table, selection);
        let dashboard = Dashboard {
            product_line: selection.clone(),
            month,
            summary: summarize(&view),
            daily_quantity: daily_quantity(&view, month),
        };
        log::debug!(
            "Computed dashboard for {selection} (month {month}): {} invoices, {} chart points",
            dashboard.summary.total_invoices,
            dashboard.daily_quantity.len()
        );
        dashboard
    }
}

// ---------------------------------------------------------------------------
// DashboardCache – memoised per (selection, month) for one dataset version
// ---------------------------------------------------------------------------

/// Computes each distinct `(selection, month)` at most once per dataset
/// version. Call [`DashboardCache::invalidate`] whenever the table changes.
#[derive(Debug, Default)]
pub struct DashboardCache {
    version: u64,
    entries: HashMap<(LineSelection, u32), Arc<Dashboard>>,
    computations: usize,
}

impl DashboardCache {
    pub fn get_or_compute(
        &mut self,
        table: &SalesTable,
        selection: &LineSelection,
        month: u32,
    ) -> Arc<Dashboard> {
        let key = (selection.clone(), month);
        if let Some(hit) = self.entries.get(&key) {
            return Arc::clone(hit);
        }

        let dashboard = Arc::new(Dashboard::compute(table, selection, month));
        self.computations += 1;
        self.entries.insert(key, Arc::clone(&dashboard));
        dashboard
    }

    /// Drop every entry; the next lookup recomputes against the new table.
    pub fn invalidate(&mut self) {
        self.version += 1;
        self.entries.clear();
        log::debug!("Dashboard cache invalidated (dataset version {})", self.version);
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of dashboards computed since creation.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::rec;
    use crate::data::model::NO_SELECTION_LABEL;

    fn table() -> SalesTable {
        SalesTable::from_records(vec![
            rec("A", 4.0, "10:00", (2019, 3, 1), 2),
            rec("B", 9.0, "11:00", (2019, 3, 2), 3),
            rec("A", 6.0, "12:00", (2019, 2, 3), 4),
        ])
    }

    #[test]
    fn compute_combines_stats_and_series() {
        let t = table();
        let dash = Dashboard::compute(&t, &LineSelection::Line("A".into()), 3);
        assert_eq!(dash.summary.total_invoices, 2);
        assert_eq!(dash.summary.average_rating, 5.0);
        assert_eq!(dash.daily_quantity.len(), 1);
        assert_eq!(dash.daily_quantity[0].total_quantity, 2);
    }

    #[test]
    fn line_named_like_the_sentinel_is_not_all() {
        let mut records = vec![rec("A", 4.0, "10:00", (2019, 3, 1), 2)];
        records.push(rec(NO_SELECTION_LABEL, 8.0, "11:00", (2019, 3, 2), 3));
        let t = SalesTable::from_records(records);
        let dash = Dashboard::compute(&t, &LineSelection::Line(NO_SELECTION_LABEL.into()), 3);
        assert_eq!(dash.summary.total_invoices, 1);
        assert_eq!(dash.summary.average_rating, 8.0);
    }

    #[test]
    fn cache_computes_each_key_once() {
        let t = table();
        let mut cache = DashboardCache::default();
        let a = LineSelection::Line("A".into());

        let first = cache.get_or_compute(&t, &a, 3);
        let second = cache.get_or_compute(&t, &a, 3);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.computations(), 1);

        cache.get_or_compute(&t, &LineSelection::All, 3);
        cache.get_or_compute(&t, &a, 2);
        cache.get_or_compute(&t, &LineSelection::All, 3);
        assert_eq!(cache.computations(), 3);
    }

    #[test]
    fn invalidate_forces_recompute_on_new_table() {
        let old = table();
        let mut cache = DashboardCache::default();
        let before = cache.get_or_compute(&old, &LineSelection::All, 3);
        assert_eq!(before.summary.total_invoices, 3);

        let new = SalesTable::from_records(vec![rec("C", 1.0, "09:00", (2019, 3, 5), 1)]);
        cache.invalidate();
        assert_eq!(cache.version(), 1);
        let after = cache.get_or_compute(&new, &LineSelection::All, 3);
        assert_eq!(after.summary.total_invoices, 1);
        assert_eq!(cache.computations(), 2);
    }

    #[test]
    fn serializes_to_json() {
        let t = table();
        let dash = Dashboard::compute(&t, &LineSelection::Line("B".into()), 3);
        let json = serde_json::to_value(&dash).unwrap();
        assert_eq!(json["productLine"], "B");
        assert_eq!(json["month"], 3);
        assert_eq!(json["summary"]["totalInvoices"], 1);
        assert_eq!(json["summary"]["mostActiveTime"], "11:00");
        assert_eq!(json["dailyQuantity"][0]["date"], "2019-03-02");
        assert_eq!(json["dailyQuantity"][0]["totalQuantity"], 3);

        let all = serde_json::to_value(Dashboard::compute(&t, &LineSelection::All, 3)).unwrap();
        assert!(all["productLine"].is_null());
    }
}
