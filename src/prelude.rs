pub use crate::consts::*;
pub use crate::perft::{
    self, ClassifyConfig, Classification, Depth, Divide, DivideMismatch, MoveKind, PerftCounts,
    PerftEngine, PerftResult, Tag, classify, classify_moves, compare_divides, perft,
    run_perft_suite,
};
pub use crate::rules::{self, ChessPosition, RulesProvider, Snapshot};
pub use crate::utils::{self, log::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
