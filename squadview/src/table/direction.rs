use std::cmp::Ordering;

use pagedom::Element;

/// Sort direction of a column, mirrored on its header as a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const ALL: [SortDirection; 2] = [SortDirection::Ascending, SortDirection::Descending];

    /// The class a header carries while sorted in this direction.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// Current direction shown on a header, if any.
    pub fn of_header(header: &Element) -> Option<Self> {
        Self::ALL.into_iter().find(|d| header.has_class(d.css_class()))
    }

    /// Direction the next click on `header` sorts in. An ascending header
    /// flips to descending; anything else sorts ascending.
    pub fn next_for(header: &Element) -> Self {
        match Self::of_header(header) {
            Some(Self::Ascending) => Self::Descending,
            _ => Self::Ascending,
        }
    }

    /// Orient a natural (ascending) comparison. Equal stays equal, which
    /// keeps the sort stable in both directions.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}
