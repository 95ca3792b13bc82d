use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use bitflags::bitflags;

use crate::{
    coordinates::Square,
    notation::parse_coordinate_notation,
    piece::{Color, PieceType},
};

/// The two sides of the board a king can castle towards.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CastlingSide {
    Kingside = 0,
    Queenside = 1,
}

impl CastlingSide {
    pub const ALL_SIDES: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];
}

bitflags! {
    /// The castling rights of both players, one bit per color and side.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CastlingRights: u8 {
        const WHITE_KINGSIDE = 0b0001;
        const WHITE_QUEENSIDE = 0b0010;
        const BLACK_KINGSIDE = 0b0100;
        const BLACK_QUEENSIDE = 0b1000;
        const WHITE = Self::WHITE_KINGSIDE.bits() | Self::WHITE_QUEENSIDE.bits();
        const BLACK = Self::BLACK_KINGSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
    }
}

impl CastlingRights {
    /// Returns the single right for a color and a side.
    pub fn new(color: Color, side: CastlingSide) -> Self {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => CastlingRights::WHITE_KINGSIDE,
            (Color::White, CastlingSide::Queenside) => CastlingRights::WHITE_QUEENSIDE,
            (Color::Black, CastlingSide::Kingside) => CastlingRights::BLACK_KINGSIDE,
            (Color::Black, CastlingSide::Queenside) => CastlingRights::BLACK_QUEENSIDE,
        }
    }

    /// Returns the rights lost when a piece leaves or lands on `square`.
    ///
    /// Moving the king from its home square loses both of its rights, while a rook leaving its corner (or being captured
    /// there) only loses the right of its own side.
    pub fn lost_on(square: Square) -> Self {
        match square {
            Square::E1 => CastlingRights::WHITE,
            Square::H1 => CastlingRights::WHITE_KINGSIDE,
            Square::A1 => CastlingRights::WHITE_QUEENSIDE,
            Square::E8 => CastlingRights::BLACK,
            Square::H8 => CastlingRights::BLACK_KINGSIDE,
            Square::A8 => CastlingRights::BLACK_QUEENSIDE,
            _ => CastlingRights::empty(),
        }
    }
}

impl Display for CastlingRights {
    /// Formats the rights as the castling field of a FEN string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }

        for (right, c) in [
            (CastlingRights::WHITE_KINGSIDE, 'K'),
            (CastlingRights::WHITE_QUEENSIDE, 'Q'),
            (CastlingRights::BLACK_KINGSIDE, 'k'),
            (CastlingRights::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.contains(right) {
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}

/// A chess move: an origin, a destination and an optional promotion.
///
/// The move also carries a transient score, used only while ordering moves. The score is ignored by equality and
/// hashing, so two moves between the same squares with the same promotion are the same move.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    from_square: Square,
    to_square: Square,
    promotion: Option<PieceType>,
    score: i32,
}

impl Move {
    /// Placeholder used to fill fixed-size move buffers.
    pub const NULL: Move = Move { from_square: Square::A1, to_square: Square::A1, promotion: None, score: 0 };

    /// Creates a new move without promotion.
    pub fn new(from_square: Square, to_square: Square) -> Self {
        Self { from_square, to_square, promotion: None, score: 0 }
    }

    /// Creates a new move that promotes the pawn to `promotion`.
    pub fn new_promotion(from_square: Square, to_square: Square, promotion: PieceType) -> Self {
        Self { from_square, to_square, promotion: Some(promotion), score: 0 }
    }

    /// Parses a move written in coordinate notation ("e2e4", "e7e8q"). Returns `None` if the text is malformed.
    pub fn from_uci(notation: &str) -> Option<Move> {
        parse_coordinate_notation(notation).ok()
    }

    /// Returns the origin square of the move.
    pub fn from_square(&self) -> Square {
        self.from_square
    }

    /// Returns the destination square of the move.
    pub fn to_square(&self) -> Square {
        self.to_square
    }

    /// Returns the piece type the pawn is promoted to, if any.
    pub fn promotion(&self) -> Option<PieceType> {
        self.promotion
    }

    /// Returns the ordering score of the move.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Sets the ordering score of the move.
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    /// Returns the move in coordinate notation.
    pub fn to_uci_string(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from_square == other.from_square && self.to_square == other.to_square && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from_square.hash(state);
        self.to_square.hash(state);
        self.promotion.hash(state);
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from_square, self.to_square)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", char::from(promotion).to_ascii_lowercase())?;
        }
        Ok(())
    }
}
