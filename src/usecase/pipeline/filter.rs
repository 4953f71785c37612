use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::query::{DateRange, ListQuery};
use crate::domain::entities::row::ListRow;

fn matches_text<R: ListRow>(row: &R, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    needle.is_empty() || row.search_surface().contains(&needle)
}

fn matches_facets<R: ListRow>(row: &R, facets: &BTreeMap<String, BTreeSet<String>>) -> bool {
    facets
        .iter()
        .filter(|(_, selected)| !selected.is_empty())
        .all(|(group, selected)| {
            row.facet(group)
                .is_some_and(|value| selected.contains(value))
        })
}

fn matches_date_range<R: ListRow>(row: &R, range: Option<&DateRange>) -> bool {
    match range {
        None => true,
        Some(range) => row
            .timestamp()
            .is_some_and(|ts| range.contains(ts.date_naive())),
    }
}

fn matches_assoc<R: ListRow>(row: &R, assoc_id: Option<&str>) -> bool {
    match assoc_id {
        None => true,
        Some(expected) => row.assoc_id() == Some(expected),
    }
}

pub fn matches<R: ListRow>(row: &R, query: &ListQuery) -> bool {
    matches_text(row, &query.text)
        && matches_facets(row, &query.facets)
        && matches_date_range(row, query.date_range.as_ref())
        && matches_assoc(row, query.assoc_id.as_deref())
}

/// Keeps the rows that satisfy every constraint, in input order.
pub fn filter_rows<R: ListRow>(rows: &[R], query: &ListQuery) -> Vec<R> {
    if query.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| matches(*row, query))
        .cloned()
        .collect()
}
