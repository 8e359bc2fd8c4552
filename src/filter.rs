use crate::types::{Criteria, Dimension, Record};

/// Record field the date-range dimensions bound.
pub const DATE_FIELD: &str = "created_at";

// ---------------------------------------------------------------------------
// Record filter
// ---------------------------------------------------------------------------

/// Whether `record` satisfies every set dimension of `criteria`.
///
/// String dimensions match case-insensitively as substrings of any bound
/// field; date dimensions are inclusive bounds on [`DATE_FIELD`]. A record
/// missing the field never matches a set dimension.
pub fn matches(record: &Record, criteria: &Criteria) -> bool {
    criteria.iter().all(|(dimension, value)| match dimension {
        Dimension::DateFrom => match criteria.date_bound(dimension) {
            Some(from) => record.instant(DATE_FIELD).is_some_and(|at| at >= from),
            None => true,
        },
        Dimension::DateTo => match criteria.date_bound(dimension) {
            Some(to) => record.instant(DATE_FIELD).is_some_and(|at| at <= to),
            None => true,
        },
        _ => {
            let fields = dimension.fields();
            if fields.is_empty() {
                return true;
            }
            let needle = value.to_lowercase();
            fields.iter().any(|field| {
                record
                    .text(field)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        }
    })
}

/// Filter records conjunctively by `criteria`.
/// Returns indices of matching records in source order.
pub fn filter_records(records: &[Record], criteria: &Criteria) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..records.len()).collect();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, criteria))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Name filter (suggestion lists)
// ---------------------------------------------------------------------------

/// Case-insensitive substring filter over plain names, in source order.
pub fn filter_names<'a>(
    names: &'a [String],
    query: &str,
) -> impl Iterator<Item = &'a str> + use<'a> {
    let lower = query.trim().to_lowercase();
    names
        .iter()
        .filter(move |name| lower.is_empty() || name.to_lowercase().contains(&lower))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(name: &str, repo: &str, author: &str, created_at: &str) -> Record {
        Record::new()
            .with("name", name)
            .with("tag_name", name.to_lowercase())
            .with("repo_name", repo)
            .with("author", author)
            .with("created_at", created_at)
    }

    fn sample() -> Vec<Record> {
        vec![
            release("V1.0", "igloo-api", "alice", "2024-01-10T12:00:00Z"),
            release("V1.1", "igloo-web", "bob", "2024-02-10T12:00:00Z"),
            release("V2.0", "igloo-api", "bob", "2024-03-10T12:00:00Z"),
        ]
    }

    fn criteria(pairs: &[(Dimension, &str)]) -> Criteria {
        let mut c = Criteria::new();
        for (d, v) in pairs {
            c.set(*d, v);
        }
        c
    }

    #[test]
    fn empty_criteria_returns_all() {
        assert_eq!(filter_records(&sample(), &Criteria::new()), vec![0, 1, 2]);
    }

    #[test]
    fn empty_records_returns_none() {
        let c = criteria(&[(Dimension::Repo, "api")]);
        assert!(filter_records(&[], &c).is_empty());
    }

    #[test]
    fn repo_is_case_insensitive_substring() {
        let c = criteria(&[(Dimension::Repo, "API")]);
        assert_eq!(filter_records(&sample(), &c), vec![0, 2]);
    }

    #[test]
    fn tag_matches_tag_name_or_name() {
        let records = vec![
            Record::new().with("tag_name", "v3.0.0"),
            Record::new().with("name", "Winter v3 release"),
            Record::new().with("tag_name", "v4.0.0"),
        ];
        let c = criteria(&[(Dimension::Tag, "v3")]);
        assert_eq!(filter_records(&records, &c), vec![0, 1]);
    }

    #[test]
    fn dimensions_combine_conjunctively() {
        let c = criteria(&[(Dimension::Repo, "igloo-api"), (Dimension::Author, "bob")]);
        assert_eq!(filter_records(&sample(), &c), vec![2]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let c = criteria(&[
            (Dimension::DateFrom, "2024-02-10T12:00:00Z"),
            (Dimension::DateTo, "2024-03-10T12:00:00Z"),
        ]);
        assert_eq!(filter_records(&sample(), &c), vec![1, 2]);
    }

    #[test]
    fn plain_date_bound_is_midnight_utc() {
        let c = criteria(&[(Dimension::DateTo, "2024-02-10")]);
        assert_eq!(filter_records(&sample(), &c), vec![0]);
    }

    #[test]
    fn missing_field_does_not_match_set_dimension() {
        let records = vec![Record::new().with("repo_name", "igloo-api")];
        let c = criteria(&[(Dimension::Author, "alice")]);
        assert!(filter_records(&records, &c).is_empty());
        let c = criteria(&[(Dimension::DateFrom, "2020-01-01")]);
        assert!(filter_records(&records, &c).is_empty());
    }

    #[test]
    fn username_is_not_a_local_predicate() {
        let c = criteria(&[(Dimension::Username, "carol")]);
        assert_eq!(filter_records(&sample(), &c), vec![0, 1, 2]);
    }

    #[test]
    fn null_field_is_treated_as_missing() {
        let records = vec![Record::new().with("state", serde_json::Value::Null)];
        let c = criteria(&[(Dimension::State, "open")]);
        assert!(filter_records(&records, &c).is_empty());
    }

    #[test]
    fn filter_names_matches_substring() {
        let names = vec!["alice".to_owned(), "Bob".to_owned(), "carol".to_owned()];
        let hits: Vec<&str> = filter_names(&names, "O").collect();
        assert_eq!(hits, vec!["Bob", "carol"]);
        assert_eq!(filter_names(&names, "  ").count(), 3);
    }
}
