//! The rules contract the perft engine walks.
//!
//! The engine never looks inside a position. Everything it needs (legal moves,
//! apply/undo, the per-move predicates and the checkmate test) goes through
//! [`RulesProvider`]. [`ChessPosition`] is the standard chess implementation.

pub mod chess;

pub use chess::{ChessPosition, Snapshot};

/// A mutable position together with the rules that drive it.
///
/// `push`/`pop` follow stack discipline: `pop` undoes exactly the most recent
/// unmatched `push`, and pushes nest arbitrarily deep. Moves handed out by
/// [`legal_moves`](RulesProvider::legal_moves) are only valid against the state
/// that produced them.
pub trait RulesProvider {
    type Move;
    type MoveList: IntoIterator<Item = Self::Move>;

    /// All legal moves from the current state, in provider order.
    fn legal_moves(&self) -> Self::MoveList;

    fn push(&mut self, mv: &Self::Move);

    fn pop(&mut self);

    // Move predicates, evaluated against the state before `mv` is applied.
    fn is_capture(&self, mv: &Self::Move) -> bool;
    fn is_en_passant(&self, mv: &Self::Move) -> bool;
    fn is_castling(&self, mv: &Self::Move) -> bool;
    fn gives_check(&self, mv: &Self::Move) -> bool;

    /// Structural check on the move encoding: does it carry a promotion piece.
    fn is_promotion(&self, mv: &Self::Move) -> bool;

    /// Checkmate test on the current state (the side to move is mated).
    fn is_checkmate(&self) -> bool;

    /// Coordinate notation, e.g. `e2e4` or `a7a8q`.
    fn move_to_string(&self, mv: &Self::Move) -> String;
}
