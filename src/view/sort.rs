use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use crate::types::{Direction, Record, SortSpec};

/// Comparable projection of one record field.
///
/// A missing date orders before every real instant. Missing text sorts as
/// the empty string.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Missing,
    Instant(DateTime<Utc>),
    Text(String),
}

fn sort_key(record: &Record, field: &str, is_date: bool) -> SortKey {
    if is_date {
        record
            .instant(field)
            .map_or(SortKey::Missing, SortKey::Instant)
    } else {
        SortKey::Text(
            record
                .text(field)
                .map(|t| t.to_lowercase())
                .unwrap_or_default(),
        )
    }
}

/// Stable-sort `indices` (into `records`) by `spec`.
///
/// Descending order reverses the key rather than the output, so records
/// with equal keys keep their relative order in both directions.
pub(crate) fn sort_indices<S: AsRef<str>>(
    records: &[Record],
    indices: &mut [usize],
    spec: &SortSpec,
    date_fields: &[S],
) {
    let field = spec.field.as_str();
    let is_date = date_fields.iter().any(|f| f.as_ref() == field);
    match spec.direction {
        Direction::Asc => indices.sort_by_cached_key(|&i| sort_key(&records[i], field, is_date)),
        Direction::Desc => {
            indices.sort_by_cached_key(|&i| Reverse(sort_key(&records[i], field, is_date)));
        }
    }
}
