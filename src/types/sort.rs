use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Column sort. `None` at the use site means source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: Direction,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Next sort state after a click on `field`'s column header.
    pub fn next(current: Option<&SortSpec>, field: &str) -> SortSpec {
        match current {
            Some(spec) if spec.field == field => SortSpec {
                field: spec.field.clone(),
                direction: spec.direction.toggled(),
            },
            _ => SortSpec::ascending(field),
        }
    }
}
