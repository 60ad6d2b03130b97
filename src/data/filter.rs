use super::model::{LineSelection, SaleRecord, SalesTable};

// ---------------------------------------------------------------------------
// FilteredView – read-only projection over a SalesTable
// ---------------------------------------------------------------------------

/// Rows of a [`SalesTable`] that passed the product-line filter.
/// Holds indices only; the table itself is never copied or mutated.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a SalesTable,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every row of `table`.
    pub fn all(table: &'a SalesTable) -> Self {
        FilteredView {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    /// Iterate the visible records in original row order.
    pub fn iter(&self) -> impl Iterator<Item = &'a SaleRecord> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// Narrow `table` to rows whose product line equals `selected`.
///
/// * `None` or the "no selection" sentinel label → every row
/// * a line absent from the dataset → empty view, not an error
pub fn filter_by_line<'a>(table: &'a SalesTable, selected: Option<&str>) -> FilteredView<'a> {
    filter_by_selection(table, &LineSelection::from_label(selected))
}

/// Same as [`filter_by_line`] for an already-interpreted selection.
pub fn filter_by_selection<'a>(table: &'a SalesTable, selection: &LineSelection) -> FilteredView<'a> {
    let Some(line) = selection.as_line() else {
        return FilteredView::all(table);
    };

    if !table.has_product_line(line) {
        log::warn!("Product line {line:?} is not present in the dataset");
    }

    let indices = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.product_line == line)
        .map(|(i, _)| i)
        .collect();

    FilteredView { table, indices }
}
