use std::cmp::Ordering;

/// Sort key of a cell in an ordinary column.
///
/// Cell text is classified once, up front: finite numbers compare
/// numerically, everything else compares as case-sensitive text. In a column
/// that mixes the two, numbers order before text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellKey {
    Number(f64),
    Text(String),
}

impl CellKey {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(text.to_string()),
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
        }
    }
}
