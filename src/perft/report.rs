use std::time::{Duration, Instant};

use tracing::{info, instrument};

use crate::{
    perft::{Depth, PerftCounts, PerftEngine},
    rules::RulesProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    pub depth: Depth,
    /// Classified counts for the whole tree
    pub counts: PerftCounts,
    /// Time taken
    pub duration: Duration,
    /// Nodes per second
    pub nps: u64,
}

impl PerftResult {
    pub fn new(depth: Depth, counts: PerftCounts, duration: Duration) -> Self {
        let nanos = duration.as_nanos();
        let nps = if nanos > 0 {
            (u128::from(counts.nodes) * 1_000_000_000 / nanos) as u64
        } else {
            0
        };

        Self {
            depth,
            counts,
            duration,
            nps,
        }
    }

    /// Runs a single timed classified count.
    pub fn measure<P: RulesProvider>(engine: &PerftEngine, pos: &mut P, depth: Depth) -> Self {
        let start = Instant::now();
        let counts = engine.classified_count(pos, depth);
        Self::new(depth, counts, start.elapsed())
    }
}

/// Runs classified counts for depths `1..=max_depth`.
#[instrument(skip(engine, pos))]
pub fn run_perft_suite<P: RulesProvider>(
    engine: &PerftEngine,
    pos: &mut P,
    max_depth: Depth,
) -> Vec<PerftResult> {
    (1..=max_depth)
        .map(|depth| {
            let result = PerftResult::measure(engine, pos, depth);
            info!(
                "Depth {}: {} nodes in {} ms ({} nps) [{}]",
                depth,
                result.counts.nodes,
                result.duration.as_millis(),
                result.nps,
                result.counts
            );
            result
        })
        .collect()
}
