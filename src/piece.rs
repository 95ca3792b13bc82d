use std::{fmt::Display, ops::Not};

use thiserror::Error;

/// Represents an error that occurs when converting a character to a piece.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PieceError {
    #[error("Invalid piece character: {0:?}")]
    InvalidCharacter(char),
}

/// Represents the color of a chess piece.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Represents all colors of chess pieces.
    pub const ALL_COLORS: [Color; 2] = [Color::White, Color::Black];

    /// Returns the direction in which the pawns of this color advance, as a rank delta.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Color;

    /// Returns the opposite color.
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// The type of a chess piece, independently of its color.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    /// Represents all piece types.
    pub const ALL_PIECE_TYPES: [PieceType; 6] =
        [PieceType::Pawn, PieceType::Knight, PieceType::Bishop, PieceType::Rook, PieceType::Queen, PieceType::King];

    /// Returns the material value of the piece type. The king is priceless and counts for nothing.
    pub const fn value(self) -> i32 {
        match self {
            PieceType::Pawn => 10,
            PieceType::Knight => 30,
            PieceType::Bishop => 30,
            PieceType::Rook => 50,
            PieceType::Queen => 90,
            PieceType::King => 0,
        }
    }
}

impl From<PieceType> for char {
    /// Converts a `PieceType` to its uppercase letter.
    fn from(piece_type: PieceType) -> Self {
        match piece_type {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

impl TryFrom<char> for PieceType {
    type Error = PieceError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'p' => Ok(PieceType::Pawn),
            'n' => Ok(PieceType::Knight),
            'b' => Ok(PieceType::Bishop),
            'r' => Ok(PieceType::Rook),
            'q' => Ok(PieceType::Queen),
            'k' => Ok(PieceType::King),
            _ => Err(PieceError::InvalidCharacter(value)),
        }
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "Pawn"),
            PieceType::Knight => write!(f, "Knight"),
            PieceType::Bishop => write!(f, "Bishop"),
            PieceType::Rook => write!(f, "Rook"),
            PieceType::Queen => write!(f, "Queen"),
            PieceType::King => write!(f, "King"),
        }
    }
}

/// Represents a chess piece.
///
/// A `Piece` is a combination of a `Color` and a `PieceType` packed in a single byte: the lowest bit holds the color and
/// the higher bits hold the piece type. Pieces are immutable values and are freely copied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece(u8);

#[allow(dead_code)]
impl Piece {
    pub const WHITE_PAWN: Piece = Piece(0);
    pub const WHITE_KNIGHT: Piece = Piece(2);
    pub const WHITE_BISHOP: Piece = Piece(4);
    pub const WHITE_ROOK: Piece = Piece(6);
    pub const WHITE_QUEEN: Piece = Piece(8);
    pub const WHITE_KING: Piece = Piece(10);
    pub const BLACK_PAWN: Piece = Piece(1);
    pub const BLACK_KNIGHT: Piece = Piece(3);
    pub const BLACK_BISHOP: Piece = Piece(5);
    pub const BLACK_ROOK: Piece = Piece(7);
    pub const BLACK_QUEEN: Piece = Piece(9);
    pub const BLACK_KING: Piece = Piece(11);

    /// Creates a new `Piece` with the given `Color` and `PieceType`.
    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        Piece((piece_type as u8) << 1 | color as u8)
    }

    /// Returns the color of the piece.
    pub fn color(self) -> Color {
        Color::ALL_COLORS[(self.0 & 1) as usize]
    }

    /// Returns the type of the piece.
    pub fn piece_type(self) -> PieceType {
        PieceType::ALL_PIECE_TYPES[(self.0 >> 1) as usize]
    }

    /// Returns the material value of the piece.
    pub fn value(self) -> i32 {
        self.piece_type().value()
    }
}

impl From<Piece> for char {
    /// Converts a `Piece` to its FEN letter: uppercase for White, lowercase for Black.
    fn from(piece: Piece) -> Self {
        match piece.color() {
            Color::White => char::from(piece.piece_type()),
            Color::Black => char::from(piece.piece_type()).to_ascii_lowercase(),
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceError;

    /// Converts a FEN letter to a `Piece`.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        let color = if value.is_ascii_uppercase() { Color::White } else { Color::Black };
        Ok(Piece::new(color, PieceType::try_from(value)?))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color(), self.piece_type())
    }
}
