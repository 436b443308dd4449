use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{perft::ClassifyConfig, rules::RulesProvider};

/// The primary kind of a move. Exactly one applies to every move.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    #[default]
    Quiet,
    Capture,
    EnPassant,
    Castling,
}

/// A classification tag, as written into fixture files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    Push,
    Capture,
    EnPassant,
    Castling,
    Promotion,
    Check,
    Checkmate,
}

impl Tag {
    pub const ALL: [Tag; 7] = [
        Tag::Push,
        Tag::Capture,
        Tag::EnPassant,
        Tag::Castling,
        Tag::Promotion,
        Tag::Check,
        Tag::Checkmate,
    ];

    /// Bit in the move-result mask read by the fixture consumers. `0x20` is
    /// taken by their illegal-move flag and never produced here.
    pub const fn bit(self) -> u8 {
        match self {
            Tag::Push => 0x01,
            Tag::Capture => 0x02,
            Tag::EnPassant => 0x04,
            Tag::Castling => 0x08,
            Tag::Check => 0x10,
            Tag::Promotion => 0x40,
            Tag::Checkmate => 0x80,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tag::Push => "push",
            Tag::Capture => "capture",
            Tag::EnPassant => "en_passant",
            Tag::Castling => "castling",
            Tag::Promotion => "promotion",
            Tag::Check => "check",
            Tag::Checkmate => "checkmate",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind plus the independent overlays.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    pub kind: MoveKind,
    pub check: bool,
    pub checkmate: bool,
    pub promotion: bool,
}

impl Classification {
    /// A quiet move with no overlay.
    pub const fn is_push(&self) -> bool {
        matches!(self.kind, MoveKind::Quiet) && !self.check && !self.checkmate && !self.promotion
    }

    pub const fn has(&self, tag: Tag) -> bool {
        match tag {
            Tag::Push => self.is_push(),
            Tag::Capture => matches!(self.kind, MoveKind::Capture),
            Tag::EnPassant => matches!(self.kind, MoveKind::EnPassant),
            Tag::Castling => matches!(self.kind, MoveKind::Castling),
            Tag::Promotion => self.promotion,
            Tag::Check => self.check,
            Tag::Checkmate => self.checkmate,
        }
    }

    pub fn tags(&self) -> impl Iterator<Item = Tag> + use<> {
        let this = *self;
        Tag::ALL.into_iter().filter(move |tag| this.has(*tag))
    }

    /// Move-result mask. En passant also sets the capture bit.
    pub fn bits(&self) -> u8 {
        let bits = self.tags().fold(0, |acc, tag| acc | tag.bit());
        match self.kind {
            MoveKind::EnPassant => bits | Tag::Capture.bit(),
            _ => bits,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.tags().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}

/// Classifies `mv` against the position it was generated from.
///
/// Kind, check and promotion are answered on the pre-move state. Checkmate needs
/// the resulting state, so the move is pushed and popped again before returning;
/// `pos` is unchanged afterwards.
pub fn classify<P: RulesProvider>(
    pos: &mut P,
    mv: &P::Move,
    config: &ClassifyConfig,
) -> Classification {
    let kind = if config.en_passant && pos.is_en_passant(mv) {
        MoveKind::EnPassant
    } else if config.captures && pos.is_capture(mv) {
        MoveKind::Capture
    } else if config.castling && pos.is_castling(mv) {
        MoveKind::Castling
    } else {
        MoveKind::Quiet
    };
    let check = config.checks && pos.gives_check(mv);
    let promotion = config.promotions && pos.is_promotion(mv);

    let checkmate = config.checkmates && {
        pos.push(mv);
        let mated = pos.is_checkmate();
        pos.pop();
        mated
    };

    let classification = Classification {
        kind,
        check,
        checkmate,
        promotion,
    };
    trace!("{} => {classification}", pos.move_to_string(mv));
    classification
}

/// Classifies every legal move at the root, in provider order.
pub fn classify_moves<P: RulesProvider>(
    pos: &mut P,
    config: &ClassifyConfig,
) -> Vec<(String, Classification)> {
    pos.legal_moves()
        .into_iter()
        .map(|mv| (pos.move_to_string(&mv), classify(pos, &mv, config)))
        .collect()
}
