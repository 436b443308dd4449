//! Perft enumeration over a [`RulesProvider`].
//!
//! Every operation takes the one live position by `&mut` and walks it with
//! push/pop, so the position is back in its starting state when the call
//! returns. Classification only happens at the frontier (the last ply).

pub mod classify;
pub mod config;
pub mod counts;
pub mod divide;
pub mod report;


pub use classify::{Classification, MoveKind, Tag, classify, classify_moves};
pub use config::ClassifyConfig;
pub use counts::PerftCounts;
pub use divide::{Divide, DivideMismatch, compare_divides};
pub use report::{PerftResult, run_perft_suite};

use tracing::{debug, instrument};

use crate::rules::RulesProvider;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Remaining plies to enumerate.
pub type Depth = u8;

/// Plain leaf count of the legal move tree.
pub fn perft<P: RulesProvider>(pos: &mut P, depth: Depth) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.into_iter().count() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        pos.push(&mv);
        nodes += perft(pos, depth - 1);
        pos.pop();
    }
    nodes
}

/// Enumeration engine with a fixed set of classification dimensions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftEngine {
    config: ClassifyConfig,
}

impl PerftEngine {
    pub const fn new(config: ClassifyConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ClassifyConfig {
        &self.config
    }

    pub fn count<P: RulesProvider>(&self, pos: &mut P, depth: Depth) -> u64 {
        perft(pos, depth)
    }

    /// Classified leaf count. `depth == 0` is the position itself: one node,
    /// nothing to classify.
    pub fn classified_count<P: RulesProvider>(&self, pos: &mut P, depth: Depth) -> PerftCounts {
        if depth == 0 {
            return PerftCounts::leaf();
        }

        let mut counts = PerftCounts::default();
        for mv in pos.legal_moves() {
            if depth == 1 {
                counts.record(&classify(pos, &mv, &self.config));
            } else {
                pos.push(&mv);
                counts += self.classified_count(pos, depth - 1);
                pos.pop();
            }
        }
        counts
    }

    /// Classified counts per root move: push, `classified_count(depth - 1)`,
    /// pop. From depth 2 the values sum to
    /// [`classified_count`](Self::classified_count) at the same depth. At
    /// depth 1 every row is a bare leaf; use [`classify_moves`] for the
    /// classified root moves.
    #[instrument(level = "debug", skip(self, pos))]
    pub fn divide<P: RulesProvider>(&self, pos: &mut P, depth: Depth) -> Divide<PerftCounts> {
        let mut result = Divide::default();
        if depth == 0 {
            return result;
        }

        for mv in pos.legal_moves() {
            let name = pos.move_to_string(&mv);
            let counts = self.root_subtree(pos, &mv, depth);
            debug!("{name}: {counts}");
            result.push(name, counts);
        }
        result
    }

    /// Plain node counts per root move.
    #[instrument(level = "debug", skip(self, pos))]
    pub fn divide_counts<P: RulesProvider>(&self, pos: &mut P, depth: Depth) -> Divide<u64> {
        let mut result = Divide::default();
        if depth == 0 {
            return result;
        }

        for mv in pos.legal_moves() {
            let name = pos.move_to_string(&mv);
            pos.push(&mv);
            let nodes = perft(pos, depth - 1);
            pos.pop();
            debug!("{name}: {nodes}");
            result.push(name, nodes);
        }
        result
    }

    /// Same result as [`divide`](Self::divide), with root moves spread over the
    /// rayon pool. Each worker walks its own clone of `pos`.
    #[cfg(feature = "parallel")]
    #[instrument(level = "debug", skip(self, pos))]
    pub fn divide_parallel<P>(&self, pos: &P, depth: Depth) -> Divide<PerftCounts>
    where
        P: RulesProvider + Clone + Send + Sync,
        P::Move: Send + Sync,
    {
        if depth == 0 {
            return Divide::default();
        }

        let moves: Vec<P::Move> = pos.legal_moves().into_iter().collect();
        moves
            .par_iter()
            .map(|mv| {
                let mut worker = pos.clone();
                let name = worker.move_to_string(mv);
                let counts = self.root_subtree(&mut worker, mv, depth);
                debug!("{name}: {counts}");
                (name, counts)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    /// Every move string on every path, depth-first pre-order.
    pub fn enumerate_sequences<P: RulesProvider>(
        &self,
        pos: &mut P,
        depth: Depth,
    ) -> Vec<String> {
        let mut out = Vec::new();
        collect_sequences(pos, depth, &mut out);
        out
    }

    // `depth >= 1`
    fn root_subtree<P: RulesProvider>(
        &self,
        pos: &mut P,
        mv: &P::Move,
        depth: Depth,
    ) -> PerftCounts {
        pos.push(mv);
        let counts = self.classified_count(pos, depth - 1);
        pos.pop();
        counts
    }
}

fn collect_sequences<P: RulesProvider>(pos: &mut P, depth: Depth, out: &mut Vec<String>) {
    if depth == 0 {
        return;
    }

    for mv in pos.legal_moves() {
        out.push(pos.move_to_string(&mv));
        if depth > 1 {
            pos.push(&mv);
            collect_sequences(pos, depth - 1, out);
            pos.pop();
        }
    }
}
