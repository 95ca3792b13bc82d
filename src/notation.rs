use thiserror::Error;

use crate::{
    coordinates::{CoordinatesError, Square},
    piece::{PieceError, PieceType},
    r#move::Move,
};

/// Represents errors that can occur when parsing chess move notation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotationError {
    /// Error when the source square coordinates in the notation are invalid.
    #[error("Invalid from square: {0}")]
    InvalidFromSquare(CoordinatesError),

    /// Error when the destination square coordinates in the notation are invalid.
    #[error("Invalid to square: {0}")]
    InvalidToSquare(CoordinatesError),

    /// Error when the promotion piece is not a knight, a bishop, a rook or a queen.
    #[error("Invalid promotion: {0}")]
    InvalidPromotion(PieceError),

    /// Error when the overall notation format is incorrect.
    #[error("Invalid notation: {0:?}")]
    InvalidNotation(String),
}

/// Parses a chess move in coordinate notation.
///
/// Coordinate notation represents moves as the source square followed by the destination square, optionally followed by
/// a promotion piece (e.g., "e2e4", "e7e8q"). The notation carries no information about the position, so the parsed move
/// is not checked against any board.
///
/// # Parameters
/// * `notation` - The move in coordinate notation
///
/// # Returns
/// * `Ok(Move)` - The parsed move
/// * `Err(NotationError)` - An error indicating why the notation could not be parsed
///
/// # Errors
/// * `InvalidNotation` - If the notation is not 4 or 5 characters long
/// * `InvalidFromSquare` / `InvalidToSquare` - If one of the squares is invalid
/// * `InvalidPromotion` - If the promotion letter is not one of `n`, `b`, `r` or `q`
pub fn parse_coordinate_notation(notation: &str) -> Result<Move, NotationError> {
    let chars: Vec<char> = notation.chars().collect();
    if !(4..=5).contains(&chars.len()) {
        return Err(NotationError::InvalidNotation(notation.to_string()));
    }

    let from: String = chars[0..2].iter().collect();
    let from = Square::try_from(from.as_str()).map_err(NotationError::InvalidFromSquare)?;
    let to: String = chars[2..4].iter().collect();
    let to = Square::try_from(to.as_str()).map_err(NotationError::InvalidToSquare)?;

    match chars.get(4) {
        None => Ok(Move::new(from, to)),
        Some(&c) => {
            let promotion = PieceType::try_from(c).map_err(NotationError::InvalidPromotion)?;
            match promotion {
                PieceType::Knight | PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
                    Ok(Move::new_promotion(from, to, promotion))
                }
                PieceType::Pawn | PieceType::King => {
                    Err(NotationError::InvalidPromotion(PieceError::InvalidCharacter(c)))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_move() {
        assert_eq!(parse_coordinate_notation("g1f3"), Ok(Move::new(Square::G1, Square::F3)));
    }

    #[test]
    fn test_parse_promotion() {
        assert_eq!(
            parse_coordinate_notation("a2a1q"),
            Ok(Move::new_promotion(Square::A2, Square::A1, PieceType::Queen))
        );
        assert_eq!(
            parse_coordinate_notation("a7a8R"),
            Ok(Move::new_promotion(Square::A7, Square::A8, PieceType::Rook))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_coordinate_notation("e2e"), Err(NotationError::InvalidNotation("e2e".to_string())));
        assert_eq!(parse_coordinate_notation(""), Err(NotationError::InvalidNotation(String::new())));
        assert_eq!(
            parse_coordinate_notation("x2e4"),
            Err(NotationError::InvalidFromSquare(CoordinatesError::InvalidFile('x')))
        );
        assert_eq!(
            parse_coordinate_notation("e2e0"),
            Err(NotationError::InvalidToSquare(CoordinatesError::InvalidRank('0')))
        );
        assert_eq!(
            parse_coordinate_notation("e7e8p"),
            Err(NotationError::InvalidPromotion(PieceError::InvalidCharacter('p')))
        );
        assert!(parse_coordinate_notation("é2e4").is_err());
    }
}
