use std::cmp::Ordering;

use crate::domain::entities::query::SortOption;
use crate::domain::entities::row::ListRow;

// Undated rows go last in both directions.
fn by_timestamp<R: ListRow>(a: &R, b: &R, newest_first: bool) -> Ordering {
    match (a.timestamp(), b.timestamp()) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn newest_first<R: ListRow>(a: &R, b: &R) -> Ordering {
    by_timestamp(a, b, true)
}

fn oldest_first<R: ListRow>(a: &R, b: &R) -> Ordering {
    by_timestamp(a, b, false)
}

fn name_asc<R: ListRow>(a: &R, b: &R) -> Ordering {
    a.display_name()
        .to_lowercase()
        .cmp(&b.display_name().to_lowercase())
}

fn natural<R: ListRow>(_a: &R, _b: &R) -> Ordering {
    Ordering::Equal
}

pub fn comparator_for<R: ListRow>(option: SortOption) -> fn(&R, &R) -> Ordering {
    match option {
        SortOption::NewestFirst => newest_first::<R>,
        SortOption::OldestFirst => oldest_first::<R>,
        SortOption::NameAsc => name_asc::<R>,
        SortOption::Unsorted => natural::<R>,
    }
}

/// Stable: rows that compare equal keep their input order.
pub fn sort_rows<R: ListRow>(mut rows: Vec<R>, option: SortOption) -> Vec<R> {
    if option != SortOption::Unsorted {
        rows.sort_by(comparator_for::<R>(option));
    }
    rows
}
