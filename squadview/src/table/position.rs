use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::SecondaryTieBreak;

/// Precedence of position codes: lower ranks sort first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionRanks(HashMap<String, u32>);

impl Default for PositionRanks {
    fn default() -> Self {
        Self::new([("GK", 1), ("DF", 2), ("MF", 3), ("FW", 4)])
    }
}

impl PositionRanks {
    pub fn new<K: Into<String>>(ranks: impl IntoIterator<Item = (K, u32)>) -> Self {
        Self(ranks.into_iter().map(|(code, rank)| (code.into(), rank)).collect())
    }

    pub fn rank(&self, code: &str) -> Option<u32> {
        self.0.get(code).copied()
    }

    fn resolve(&self, code: &str) -> Rank {
        self.rank(code).map_or(Rank::Unknown, Rank::Known)
    }
}

/// Rank of a single code. Codes missing from the table order after every
/// known code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Known(u32),
    Unknown,
}

/// Sort key of a cell in a position column, e.g. `"MF, FW"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionKey {
    pub primary: Rank,
    pub secondary: Option<Rank>,
}

impl PositionKey {
    /// Parse comma-separated codes. Only the first two codes count; an empty
    /// second code is treated as absent.
    pub fn parse(text: &str, ranks: &PositionRanks) -> Self {
        let mut codes = text.split(',').map(str::trim);
        let primary = ranks.resolve(codes.next().unwrap_or_default());
        let secondary = codes
            .next()
            .filter(|code| !code.is_empty())
            .map(|code| ranks.resolve(code));
        Self { primary, secondary }
    }

    /// Totally ordered key for the given tie-break rule.
    pub fn ordering_key(&self, tie_break: SecondaryTieBreak) -> (Rank, Option<Rank>) {
        match tie_break {
            SecondaryTieBreak::None => (self.primary, None),
            SecondaryTieBreak::WhenPresent => (self.primary, self.secondary),
            SecondaryTieBreak::OwnPrimary => {
                (self.primary, Some(self.secondary.unwrap_or(self.primary)))
            }
        }
    }
}
