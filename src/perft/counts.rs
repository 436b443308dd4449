use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

use crate::{
    consts::NUM_COLUMNS,
    perft::{Classification, MoveKind},
};

/// Per-dimension counters for a perft subtree.
///
/// `captures` includes en passant captures, so `captures >= en_passants`, and
/// `checks` includes checkmating moves. Combining is pointwise addition with
/// [`PerftCounts::default`] as the identity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub checks: u64,
    pub checkmates: u64,
    pub promotions: u64,
}

impl PerftCounts {
    /// The position itself, counted as a single node.
    pub const fn leaf() -> Self {
        Self {
            nodes: 1,
            captures: 0,
            en_passants: 0,
            castles: 0,
            checks: 0,
            checkmates: 0,
            promotions: 0,
        }
    }

    /// Counts one frontier move.
    pub fn record(&mut self, class: &Classification) {
        self.nodes += 1;
        match class.kind {
            MoveKind::EnPassant => {
                self.en_passants += 1;
                self.captures += 1;
            }
            MoveKind::Capture => self.captures += 1,
            MoveKind::Castling => self.castles += 1,
            MoveKind::Quiet => {}
        }
        self.checks += u64::from(class.check);
        self.checkmates += u64::from(class.checkmate);
        self.promotions += u64::from(class.promotion);
    }

    pub const fn combine(a: Self, b: Self) -> Self {
        Self {
            nodes: a.nodes + b.nodes,
            captures: a.captures + b.captures,
            en_passants: a.en_passants + b.en_passants,
            castles: a.castles + b.castles,
            checks: a.checks + b.checks,
            checkmates: a.checkmates + b.checkmates,
            promotions: a.promotions + b.promotions,
        }
    }

    /// Fixture column order: nodes, captures, en passants, castles, checks,
    /// checkmates, promotions.
    pub const fn columns(&self) -> [u64; NUM_COLUMNS] {
        [
            self.nodes,
            self.captures,
            self.en_passants,
            self.castles,
            self.checks,
            self.checkmates,
            self.promotions,
        ]
    }
}

impl Add for PerftCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::combine(self, rhs)
    }
}

impl AddAssign for PerftCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = Self::combine(*self, rhs);
    }
}

impl Sum for PerftCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::combine)
    }
}

impl<'a> Sum<&'a PerftCounts> for PerftCounts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for PerftCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.columns().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(seed: u64) -> PerftCounts {
        PerftCounts {
            nodes: 10 * seed + 7,
            captures: 3 * seed + 2,
            en_passants: seed,
            castles: seed + 1,
            checks: 2 * seed,
            checkmates: seed / 2,
            promotions: seed % 3,
        }
    }

    #[test]
    fn test_identity_and_algebra() {
        let (a, b, c) = (sample(1), sample(4), sample(9));

        assert_eq!(a + PerftCounts::default(), a);
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + c, a + (b + c));
        assert_eq!([a, b, c].iter().sum::<PerftCounts>(), a + b + c);
    }

    #[test]
    fn test_record_en_passant_counts_as_capture() {
        let mut counts = PerftCounts::default();
        counts.record(&Classification {
            kind: MoveKind::EnPassant,
            check: true,
            ..Default::default()
        });

        assert_eq!(counts.nodes, 1);
        assert_eq!(counts.captures, 1);
        assert_eq!(counts.en_passants, 1);
        assert_eq!(counts.checks, 1);
        assert_eq!(counts.castles + counts.checkmates + counts.promotions, 0);
    }

    #[test]
    fn test_record_overlays() {
        let mut counts = PerftCounts::default();
        counts.record(&Classification {
            kind: MoveKind::Capture,
            check: true,
            checkmate: true,
            promotion: true,
        });
        counts.record(&Classification::default());
        counts.record(&Classification {
            kind: MoveKind::Castling,
            ..Default::default()
        });

        assert_eq!(counts.columns(), [3, 1, 0, 1, 1, 1, 1]);
        assert_eq!(counts.to_string(), "3 1 0 1 1 1 1");
    }

    #[test]
    fn test_leaf() {
        assert_eq!(PerftCounts::leaf().columns(), [1, 0, 0, 0, 0, 0, 0]);
    }
}
