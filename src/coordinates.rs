use std::fmt::Display;

use thiserror::Error;

use crate::piece::Color;

/// Errors raised when parsing coordinates from text or moving off the board.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoordinatesError {
    #[error("Invalid file character: {0:?}")]
    InvalidFile(char),

    #[error("Invalid rank character: {0:?}")]
    InvalidRank(char),

    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("The coordinates fall outside of the board")]
    OutOfBoard,
}

/// Represents a file (column) on a chess board.
///
/// Files are labeled from A to H, going from left to right when viewing the board from White's perspective.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const COUNT: usize = 8;

    /// Represents all files on a chess board.
    pub const ALL_FILES: [File; File::COUNT] = [File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H];

    /// Returns the file `delta` columns away, or an error if it falls off the board.
    pub fn shift(self, delta: i8) -> Result<File, CoordinatesError> {
        let value = self as i8 + delta;
        if (0..File::COUNT as i8).contains(&value) {
            Ok(File::ALL_FILES[value as usize])
        } else {
            Err(CoordinatesError::OutOfBoard)
        }
    }
}

impl Display for File {
    /// Formats the file as a single lowercase character.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + u8::from(*self)) as char)
    }
}

impl From<File> for u8 {
    fn from(file: File) -> Self {
        file as u8
    }
}

impl TryFrom<char> for File {
    type Error = CoordinatesError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'a'..='h' => Ok(File::ALL_FILES[(value as u8 - b'a') as usize]),
            _ => Err(CoordinatesError::InvalidFile(value)),
        }
    }
}

/// Represents a rank (row) on a chess board.
///
/// Ranks are labeled from 1 to 8, going from the bottom to the top when viewing the board from White's perspective.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    pub const COUNT: usize = 8;

    /// Represents all ranks on a chess board.
    pub const ALL_RANKS: [Rank; Rank::COUNT] =
        [Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8];

    /// Returns the rank as seen from the given color's side of the board. `Rank::R2` is White's pawn rank and, relative
    /// to Black, becomes `Rank::R7`.
    pub fn relative_to_color(self, color: Color) -> Rank {
        match color {
            Color::White => self,
            Color::Black => Rank::ALL_RANKS[Rank::COUNT - 1 - self as usize],
        }
    }

    /// Returns the rank `delta` rows away, or an error if it falls off the board.
    pub fn shift(self, delta: i8) -> Result<Rank, CoordinatesError> {
        let value = self as i8 + delta;
        if (0..Rank::COUNT as i8).contains(&value) {
            Ok(Rank::ALL_RANKS[value as usize])
        } else {
            Err(CoordinatesError::OutOfBoard)
        }
    }
}

impl Display for Rank {
    /// Formats the rank as a single digit.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'1' + u8::from(*self)) as char)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank as u8
    }
}

impl TryFrom<char> for Rank {
    type Error = CoordinatesError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '1'..='8' => Ok(Rank::ALL_RANKS[(value as u8 - b'1') as usize]),
            _ => Err(CoordinatesError::InvalidRank(value)),
        }
    }
}

/// Represents a square on a chess board.
///
/// Squares are indexed from 0 to 63, starting from A1 and ending at H8 with B1 being at index 1. In other words, the
/// file value is stored in the lower 3 bits and the rank value is stored in the next 3 bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

#[allow(dead_code)]
impl Square {
    pub const COUNT: usize = 64;

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);
    pub const B2: Square = Square(9);
    pub const C2: Square = Square(10);
    pub const D2: Square = Square(11);
    pub const E2: Square = Square(12);
    pub const F2: Square = Square(13);
    pub const G2: Square = Square(14);
    pub const H2: Square = Square(15);
    pub const A3: Square = Square(16);
    pub const B3: Square = Square(17);
    pub const C3: Square = Square(18);
    pub const D3: Square = Square(19);
    pub const E3: Square = Square(20);
    pub const F3: Square = Square(21);
    pub const G3: Square = Square(22);
    pub const H3: Square = Square(23);
    pub const A4: Square = Square(24);
    pub const B4: Square = Square(25);
    pub const C4: Square = Square(26);
    pub const D4: Square = Square(27);
    pub const E4: Square = Square(28);
    pub const F4: Square = Square(29);
    pub const G4: Square = Square(30);
    pub const H4: Square = Square(31);
    pub const A5: Square = Square(32);
    pub const B5: Square = Square(33);
    pub const C5: Square = Square(34);
    pub const D5: Square = Square(35);
    pub const E5: Square = Square(36);
    pub const F5: Square = Square(37);
    pub const G5: Square = Square(38);
    pub const H5: Square = Square(39);
    pub const A6: Square = Square(40);
    pub const B6: Square = Square(41);
    pub const C6: Square = Square(42);
    pub const D6: Square = Square(43);
    pub const E6: Square = Square(44);
    pub const F6: Square = Square(45);
    pub const G6: Square = Square(46);
    pub const H6: Square = Square(47);
    pub const A7: Square = Square(48);
    pub const B7: Square = Square(49);
    pub const C7: Square = Square(50);
    pub const D7: Square = Square(51);
    pub const E7: Square = Square(52);
    pub const F7: Square = Square(53);
    pub const G7: Square = Square(54);
    pub const H7: Square = Square(55);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    #[rustfmt::skip]
    pub const ALL_SQUARES: [Square; Square::COUNT] = [
        Square::A1,Square::B1,Square::C1,Square::D1,Square::E1,Square::F1,Square::G1,Square::H1,
        Square::A2,Square::B2,Square::C2,Square::D2,Square::E2,Square::F2,Square::G2,Square::H2,
        Square::A3,Square::B3,Square::C3,Square::D3,Square::E3,Square::F3,Square::G3,Square::H3,
        Square::A4,Square::B4,Square::C4,Square::D4,Square::E4,Square::F4,Square::G4,Square::H4,
        Square::A5,Square::B5,Square::C5,Square::D5,Square::E5,Square::F5,Square::G5,Square::H5,
        Square::A6,Square::B6,Square::C6,Square::D6,Square::E6,Square::F6,Square::G6,Square::H6,
        Square::A7,Square::B7,Square::C7,Square::D7,Square::E7,Square::F7,Square::G7,Square::H7,
        Square::A8,Square::B8,Square::C8,Square::D8,Square::E8,Square::F8,Square::G8,Square::H8,
    ];

    /// Creates a new square from a file and a rank.
    pub fn new(file: File, rank: Rank) -> Square {
        Square(u8::from(rank) << 3 | u8::from(file))
    }

    /// Returns the rank of the square.
    pub fn rank(self) -> Rank {
        Rank::ALL_RANKS[(self.0 >> 3) as usize]
    }

    /// Returns the file of the square.
    pub fn file(self) -> File {
        File::ALL_FILES[(self.0 & 0b111) as usize]
    }

    /// Returns the index of the square, between 0 and 63.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the square `file_delta` files and `rank_delta` ranks away from this one.
    ///
    /// # Errors
    /// `CoordinatesError::OutOfBoard` if the target square would fall outside of the board.
    pub fn shift(self, file_delta: i8, rank_delta: i8) -> Result<Square, CoordinatesError> {
        Ok(Square::new(self.file().shift(file_delta)?, self.rank().shift(rank_delta)?))
    }

    /// Returns how many steps can be taken from this square in the direction (`file_delta`, `rank_delta`) before
    /// leaving the board. Each delta must be -1, 0 or 1.
    pub fn squares_to_edge(self, file_delta: i8, rank_delta: i8) -> u8 {
        debug_assert!((-1..=1).contains(&file_delta) && (-1..=1).contains(&rank_delta));

        let file = u8::from(self.file());
        let rank = u8::from(self.rank());
        let along = |value: u8, delta: i8| match delta {
            1 => 7 - value,
            -1 => value,
            _ => u8::MAX,
        };

        match along(file, file_delta).min(along(rank, rank_delta)) {
            u8::MAX => 0,
            distance => distance,
        }
    }

    /// Returns the squares reached by walking from this square in the direction (`file_delta`, `rank_delta`) until the
    /// edge of the board. The starting square is not included.
    pub fn ray(self, file_delta: i8, rank_delta: i8) -> impl Iterator<Item = Square> {
        let distance = self.squares_to_edge(file_delta, rank_delta) as i8;
        let file = u8::from(self.file()) as i8;
        let rank = u8::from(self.rank()) as i8;

        (1..=distance).map(move |step| Square(((rank + rank_delta * step) * 8 + file + file_delta * step) as u8))
    }
}

impl Display for Square {
    /// Formats the square as a two-character string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl TryFrom<&str> for Square {
    type Error = CoordinatesError;

    /// Parses a square written as a file letter followed by a rank digit, like "e4".
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Ok(Square::new(File::try_from(file)?, Rank::try_from(rank)?)),
            _ => Err(CoordinatesError::InvalidSquare(value.to_string())),
        }
    }
}
