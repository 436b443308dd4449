use miette::{Context, IntoDiagnostic, miette};
use shakmaty::{
    Bitboard, Board, CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Position, Square,
    fen::Fen,
};
use tracing::trace;

use super::RulesProvider;

/// Standard chess position with an undo stack.
///
/// Legality comes from `shakmaty`, which only offers copy-make. `push` saves the
/// state it is about to leave and `pop` restores it, which gives the engine the
/// make/unmake discipline it expects.
#[derive(Debug, Clone, Default)]
pub struct ChessPosition {
    current: Chess,
    history: Vec<Chess>,
}

/// Externally observable state of a [`ChessPosition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub turn: Color,
    pub castling_rights: Bitboard,
    pub ep_square: Option<Square>,
    pub halfmoves: u32,
    pub fullmoves: u32,
    pub ply: usize,
}

impl ChessPosition {
    /// The standard starting position.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> miette::Result<Self> {
        let parsed: Fen = fen
            .trim()
            .parse()
            .into_diagnostic()
            .wrap_err_with(|| format!("Parsing FEN: {fen}"))?;
        let current: Chess = parsed
            .into_position(CastlingMode::Standard)
            .into_diagnostic()
            .wrap_err_with(|| format!("Setting up position from FEN: {fen}"))?;

        Ok(Self {
            current,
            history: Vec::new(),
        })
    }

    /// Applies a move given in coordinate notation.
    pub fn push_uci(&mut self, uci: &str) -> miette::Result<()> {
        let uci = uci.trim();
        let mv = self
            .legal_moves()
            .into_iter()
            .find(|mv| self.move_to_string(mv) == uci)
            .ok_or_else(|| miette!("{uci} is not a legal move in this position"))?;
        trace!("push_uci {uci}");
        self.push(&mv);
        Ok(())
    }

    /// Applies a whitespace separated line of coordinate moves.
    pub fn push_line(&mut self, line: &str) -> miette::Result<()> {
        for (idx, uci) in line.split_whitespace().enumerate() {
            self.push_uci(uci)
                .wrap_err_with(|| format!("Applying move #{} of line: {line}", idx + 1))?;
        }
        Ok(())
    }

    /// Number of pushes not yet undone.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn turn(&self) -> Color {
        self.current.turn()
    }

    pub fn inner(&self) -> &Chess {
        &self.current
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.current.board().clone(),
            turn: self.current.turn(),
            castling_rights: self.current.castles().castling_rights(),
            ep_square: self.current.ep_square(EnPassantMode::Legal),
            halfmoves: self.current.halfmoves(),
            fullmoves: u32::from(self.current.fullmoves()),
            ply: self.history.len(),
        }
    }
}

impl RulesProvider for ChessPosition {
    type Move = Move;
    type MoveList = MoveList;

    fn legal_moves(&self) -> MoveList {
        self.current.legal_moves()
    }

    fn push(&mut self, mv: &Move) {
        self.history.push(self.current.clone());
        self.current.play_unchecked(mv);
    }

    fn pop(&mut self) {
        match self.history.pop() {
            Some(previous) => self.current = previous,
            None => panic!("pop without a matching push"),
        }
    }

    fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    fn is_en_passant(&self, mv: &Move) -> bool {
        mv.is_en_passant()
    }

    fn is_castling(&self, mv: &Move) -> bool {
        mv.is_castle()
    }

    fn gives_check(&self, mv: &Move) -> bool {
        let mut after = self.current.clone();
        after.play_unchecked(mv);
        after.is_check()
    }

    fn is_promotion(&self, mv: &Move) -> bool {
        mv.promotion().is_some()
    }

    fn is_checkmate(&self) -> bool {
        self.current.is_checkmate()
    }

    fn move_to_string(&self, mv: &Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }
}
