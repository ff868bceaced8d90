//! Ordered rule tables mapping a neighborhood pattern to a [`TileVariant`].
//!
//! Matching is a linear scan: the first entry whose nine constraints are all
//! satisfied wins, and a table with no match yields [`TileVariant::Fill`].

use crate::pattern::NeighborhoodPattern;
use crate::variant::TileVariant;
use serde::{Deserialize, Serialize};

/// Constraint on a single pattern cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellConstraint {
    /// The cell must be unoccupied.
    Absent,
    /// The cell must be occupied.
    Present,
    /// Always matches.
    Wildcard,
    /// All `Linked` cells of one entry must share the same state, whatever it is.
    Linked,
}

/// One pattern → variant mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Row-major constraints, same layout as [`NeighborhoodPattern`].
    pub pattern: [CellConstraint; 9],
    pub variant: TileVariant,
}

impl RuleEntry {
    pub fn new(pattern: [CellConstraint; 9], variant: TileVariant) -> Self {
        Self { pattern, variant }
    }

    /// Whether every constraint holds for `pattern`.
    pub fn matches(&self, pattern: &NeighborhoodPattern) -> bool {
        let mut linked: Option<bool> = None;
        for (constraint, &occupied) in self.pattern.iter().zip(pattern.cells()) {
            match constraint {
                CellConstraint::Absent if occupied => return false,
                CellConstraint::Present if !occupied => return false,
                CellConstraint::Linked => match linked {
                    None => linked = Some(occupied),
                    Some(required) if required != occupied => return false,
                    Some(_) => {}
                },
                _ => {}
            }
        }
        true
    }

    pub fn linked_count(&self) -> usize {
        self.pattern
            .iter()
            .filter(|c| **c == CellConstraint::Linked)
            .count()
    }
}

/// Ordered list of rule entries. Declaration order is the only tie-breaker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub entries: Vec<RuleEntry>,
}

impl RuleTable {
    pub fn new(entries: Vec<RuleEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: RuleEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First matching entry's variant, or `Fill` when nothing matches.
    pub fn match_variant(&self, pattern: &NeighborhoodPattern) -> TileVariant {
        self.entries
            .iter()
            .find(|entry| entry.matches(pattern))
            .map(|entry| entry.variant)
            .unwrap_or(TileVariant::Fill)
    }

    /// The default authored table.
    ///
    /// Exterior corners, then edges, then interior corners. Patterns that fit
    /// none of these (isolated tiles, one-wide strips, fully surrounded cells)
    /// fall through to `Fill`.
    pub fn standard() -> Self {
        use CellConstraint::{Absent as A, Present as P, Wildcard as W};

        Self::new(vec![
            RuleEntry::new([W, A, W, A, W, P, W, P, W], TileVariant::ExteriorTopLeft),
            RuleEntry::new([W, A, W, P, W, A, W, P, W], TileVariant::ExteriorTopRight),
            RuleEntry::new([W, P, W, P, W, A, W, A, W], TileVariant::ExteriorBottomRight),
            RuleEntry::new([W, P, W, A, W, P, W, A, W], TileVariant::ExteriorBottomLeft),
            RuleEntry::new([W, A, W, P, W, P, W, P, W], TileVariant::EdgeTop),
            RuleEntry::new([W, P, W, P, W, A, W, P, W], TileVariant::EdgeRight),
            RuleEntry::new([W, P, W, P, W, P, W, A, W], TileVariant::EdgeBottom),
            RuleEntry::new([W, P, W, A, W, P, W, P, W], TileVariant::EdgeLeft),
            RuleEntry::new([A, P, W, P, W, P, W, P, W], TileVariant::InteriorTopLeft),
            RuleEntry::new([W, P, A, P, W, P, W, P, W], TileVariant::InteriorTopRight),
            RuleEntry::new([W, P, W, P, W, P, W, P, A], TileVariant::InteriorBottomRight),
            RuleEntry::new([W, P, W, P, W, P, A, P, W], TileVariant::InteriorBottomLeft),
        ])
    }
}
