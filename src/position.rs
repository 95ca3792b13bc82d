use std::{fmt::Display, ops::Index};

use thiserror::Error;

use crate::{
    coordinates::{File, Rank, Square},
    move_gen::attacks::is_square_attacked,
    piece::{Color, Piece, PieceType},
    r#move::{CastlingRights, CastlingSide, Move},
};

/// Error type for parsing a FEN (Forsyth-Edwards Notation) string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FenError {
    #[error("Invalid piece placement: {0:?}")]
    InvalidPiecePlacement(String),

    #[error("Invalid active color: {0:?}")]
    InvalidActiveColor(String),

    #[error("Invalid castling availability: {0:?}")]
    InvalidCastlingAvailability(String),

    #[error("Invalid en passant square: {0:?}")]
    InvalidEnPassantSquare(String),

    #[error("Invalid halfmove clock: {0:?}")]
    InvalidHalfmoveClock(String),

    #[error("Invalid fullmove number: {0:?}")]
    InvalidFullmoveNumber(String),

    #[error("Missing field in FEN string")]
    MissingField,

    #[error("Too many {0} pieces, at most {max} are allowed", max = Position::MAX_PIECES_PER_COLOR)]
    TooManyPieces(Color),
}

//======================================================================================================================
// Undo log
//======================================================================================================================

/// Everything needed to take back one move.
///
/// One record is pushed by `Position::make` and popped by `Position::unmake`, so the log always mirrors the sequence of
/// moves applied to the position.
#[derive(Debug, Clone, Copy)]
struct Undo {
    mv: Move,
    moved: Piece,
    captured: Option<(Piece, Square)>,
    rook_move: Option<(Square, Square)>,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

//======================================================================================================================
// Position implementation
//======================================================================================================================

/// A chess position.
///
/// The board is a 64 slot array indexed by square. The position is meant to be shared by the whole search and mutated
/// in place with `make` and `unmake`.
#[derive(Debug, Clone)]
pub struct Position {
    board: [Option<Piece>; Square::COUNT],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    history: Vec<Undo>,
}

impl Position {
    /// The number of pieces a side starts the game with, and the most a FEN may give it. This bounds the number of
    /// pseudo-legal moves a position can have.
    pub const MAX_PIECES_PER_COLOR: usize = 16;

    fn read_piece_placement(&mut self, piece_placement: &str) -> Result<(), FenError> {
        let error = || FenError::InvalidPiecePlacement(piece_placement.to_string());

        let ranks: Vec<&str> = piece_placement.split('/').collect();
        if ranks.len() != Rank::COUNT {
            return Err(error());
        }

        for (rank, description) in Rank::ALL_RANKS.iter().rev().zip(ranks) {
            let mut file_index = 0usize;
            for c in description.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file_index += skip as usize;
                } else {
                    let piece = Piece::try_from(c).map_err(|_| error())?;
                    let file = *File::ALL_FILES.get(file_index).ok_or_else(error)?;
                    self.put_piece(piece, Square::new(file, *rank));
                    file_index += 1;
                }
            }

            if file_index != File::COUNT {
                return Err(error());
            }
        }

        for color in Color::ALL_COLORS {
            if self.pieces(color).count() > Self::MAX_PIECES_PER_COLOR {
                return Err(FenError::TooManyPieces(color));
            }
        }

        Ok(())
    }

    fn read_active_color(&mut self, active_color: &str) -> Result<(), FenError> {
        self.side_to_move = match active_color {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::InvalidActiveColor(active_color.to_string())),
        };
        Ok(())
    }

    fn read_castling(&mut self, castling_availability: &str) -> Result<(), FenError> {
        if castling_availability == "-" {
            return Ok(());
        }

        for c in castling_availability.chars() {
            self.castling_rights |= match c {
                'K' => CastlingRights::WHITE_KINGSIDE,
                'Q' => CastlingRights::WHITE_QUEENSIDE,
                'k' => CastlingRights::BLACK_KINGSIDE,
                'q' => CastlingRights::BLACK_QUEENSIDE,
                _ => return Err(FenError::InvalidCastlingAvailability(castling_availability.to_string())),
            };
        }
        Ok(())
    }

    fn read_en_passant_square(&mut self, en_passant_square: &str) -> Result<(), FenError> {
        self.en_passant_square = match en_passant_square {
            "-" => None,
            _ => Some(
                Square::try_from(en_passant_square)
                    .map_err(|_| FenError::InvalidEnPassantSquare(en_passant_square.to_string()))?,
            ),
        };
        Ok(())
    }

    /// Creates a new chess position from a FEN (Forsyth-Edwards Notation) string.
    ///
    /// A FEN string contains 6 fields separated by spaces:
    ///
    /// 1. Piece placement: Each rank is described from 8 to 1, separated by '/'. Letters represent pieces (P=pawn,
    ///    N=knight, B=bishop, R=rook, Q=queen, K=king). Uppercase is white, lowercase is black. Numbers represent empty
    ///    squares.
    /// 2. Active color: "w" means White moves next, "b" means Black moves next.
    /// 3. Castling availability: Combination of "K", "Q", "k", "q", or "-" if no castling is possible.
    /// 4. En passant target square, or "-".
    /// 5. Halfmove clock: Number of halfmoves since the last pawn advance or piece capture.
    /// 6. Fullmove number: Starts at 1 and increments after Black's move.
    ///
    /// Only the first two fields are mandatory; the others default to "- - 0 1".
    pub fn new_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut position = Position::default();

        let mut fields = fen.split_whitespace();
        position.read_piece_placement(fields.next().ok_or(FenError::MissingField)?)?;
        position.read_active_color(fields.next().ok_or(FenError::MissingField)?)?;
        position.read_castling(fields.next().unwrap_or("-"))?;
        position.read_en_passant_square(fields.next().unwrap_or("-"))?;

        let halfmove_clock = fields.next().unwrap_or("0");
        position.halfmove_clock =
            halfmove_clock.parse().map_err(|_| FenError::InvalidHalfmoveClock(halfmove_clock.to_string()))?;

        let fullmove_number = fields.next().unwrap_or("1");
        position.fullmove_number =
            fullmove_number.parse().map_err(|_| FenError::InvalidFullmoveNumber(fullmove_number.to_string()))?;

        Ok(position)
    }

    /// Creates a new chess position with the standard initial board setup.
    pub fn new() -> Self {
        const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        Self::new_from_fen(INITIAL_POSITION)
            .expect("This can not fail because the INITIAL_POSITION fen will always be successfully parsed.")
    }

    fn write_piece_placement(&self) -> String {
        let mut result = String::with_capacity(70);
        for rank in Rank::ALL_RANKS.iter().rev() {
            let mut empty_count = 0;
            for file in File::ALL_FILES {
                match self[Square::new(file, *rank)] {
                    Some(piece) => {
                        if empty_count > 0 {
                            result.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        result.push(piece.into());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if *rank != Rank::R1 {
                result.push('/');
            }
        }
        result
    }

    /// Returns the FEN (Forsyth-Edwards Notation) representation of the position.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.write_piece_placement(),
            match self.side_to_move {
                Color::White => 'w',
                Color::Black => 'b',
            },
            self.castling_rights,
            self.en_passant_square.map_or(String::from("-"), |square| square.to_string()),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Generates a compact string representation of the current chess position.
    ///
    /// The board is displayed from white's perspective with rank numbers on the left edge and file letters on the
    /// bottom. Empty squares are represented by dots.
    ///
    /// ```text
    /// 8  r n b q k b n r
    /// 7  p p p p p p p p
    /// 6  . . . . . . . .
    /// 5  . . . . . . . .
    /// 4  . . . . . . . .
    /// 3  . . . . . . . .
    /// 2  P P P P P P P P
    /// 1  R N B Q K B N R
    ///    a b c d e f g h
    /// ```
    pub fn to_compact_string(&self) -> String {
        let mut board = String::with_capacity(171);
        for rank in Rank::ALL_RANKS.iter().rev() {
            board.push_str(&format!("{}  ", rank));
            for file in File::ALL_FILES {
                match self[Square::new(file, *rank)] {
                    Some(piece) => board.push(piece.into()),
                    None => board.push('.'),
                }
                board.push(if file != File::H { ' ' } else { '\n' });
            }
        }
        board.push_str("   a b c d e f g h");

        board
    }

    /// Returns the color of the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the castling rights still held by both players.
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Returns the castling rights that are not currently obstructed.
    ///
    /// A right is kept only if the king and the rook stand on their home squares and every square between them is
    /// empty. Whether the king would cross an attacked square is left to the move generator.
    pub fn castling_availability(&self) -> CastlingRights {
        let mut availability = CastlingRights::empty();
        for color in Color::ALL_COLORS {
            for side in CastlingSide::ALL_SIDES {
                let right = CastlingRights::new(color, side);
                if self.castling_rights.contains(right) && self.is_castling_path_clear(color, side) {
                    availability |= right;
                }
            }
        }
        availability
    }

    fn is_castling_path_clear(&self, color: Color, side: CastlingSide) -> bool {
        let rank = Rank::R1.relative_to_color(color);
        let (rook_file, between): (File, &[File]) = match side {
            CastlingSide::Kingside => (File::H, &[File::F, File::G]),
            CastlingSide::Queenside => (File::A, &[File::B, File::C, File::D]),
        };

        self[Square::new(File::E, rank)] == Some(Piece::new(color, PieceType::King))
            && self[Square::new(rook_file, rank)] == Some(Piece::new(color, PieceType::Rook))
            && between.iter().all(|file| self[Square::new(*file, rank)].is_none())
    }

    /// Returns the en passant target square, if the last move was a two-square pawn advance.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    /// Returns the number of halfmoves since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Returns the number of the current full move.
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Returns the most recently applied move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|undo| undo.mv)
    }

    /// Returns the square of the king of the given color, or `None` if that king is not on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceType::King);
        Square::ALL_SQUARES.into_iter().find(|square| self[*square] == Some(king))
    }

    /// Returns an iterator over the squares and pieces of one color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL_SQUARES
            .into_iter()
            .filter_map(move |square| self[square].filter(|piece| piece.color() == color).map(|piece| (square, piece)))
    }

    /// Places a chess piece on an empty square.
    pub fn put_piece(&mut self, piece: Piece, square: Square) {
        debug_assert_eq!(self.board[square.index()], None);

        self.board[square.index()] = Some(piece);
    }

    /// Removes a piece from a specific square and returns it.
    pub fn remove_piece(&mut self, square: Square) -> Piece {
        self.board[square.index()].take().expect("It is not possible to remove a piece from an empty square.")
    }

    /// Moves the piece on `from` to the empty square `to`.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.remove_piece(from);
        self.put_piece(piece, to);
    }

    /// Determines whether a square is attacked by any piece of `color`.
    pub fn is_attacked(&self, square: Square, color: Color) -> bool {
        is_square_attacked(self, square, color)
    }

    /// Returns true if the king of `color` is attacked. A missing king is never in check.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.king_square(color).is_some_and(|square| self.is_attacked(square, !color))
    }

    /// Applies a move to the position.
    ///
    /// The move must be pseudo-legal for the piece standing on its origin square. Everything needed to take the move
    /// back is recorded in the undo log before the board is modified.
    ///
    /// # Parameters
    /// * `mv` - The move to apply
    ///
    /// # Panics
    /// Panics if the origin square of the move is empty.
    pub fn make(&mut self, mv: Move) {
        let from = mv.from_square();
        let to = mv.to_square();
        let piece = self[from].expect("There should be a piece on the origin square of the move.");
        let color = piece.color();
        let is_pawn = piece.piece_type() == PieceType::Pawn;

        debug_assert_eq!(color, self.side_to_move, "Tried to move a piece of the side not to move: {mv}");

        let mut undo = Undo {
            mv,
            moved: piece,
            captured: None,
            rook_move: None,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        };

        let placed = mv.promotion().map_or(piece, |promotion| Piece::new(color, promotion));

        // A pawn moving diagonally onto the en passant target captures the pawn that just passed it.
        if is_pawn && Some(to) == self.en_passant_square && from.file() != to.file() && self[to].is_none() {
            let captured_square = Square::new(to.file(), from.rank());
            if self[captured_square].is_some() {
                undo.captured = Some((self.remove_piece(captured_square), captured_square));
            }
        }

        self.en_passant_square = None;
        if is_pawn && from.rank() == Rank::R2.relative_to_color(color) && to.rank() == Rank::R4.relative_to_color(color)
        {
            self.en_passant_square = Some(Square::new(from.file(), Rank::R3.relative_to_color(color)));
        }

        if self[to].is_some() {
            let captured = self.remove_piece(to);
            debug_assert_ne!(captured.color(), color, "Tried to capture a friendly piece: {mv}");
            undo.captured = Some((captured, to));
        }

        self.remove_piece(from);
        self.put_piece(placed, to);

        // A king moving two files is castling, the rook jumps over it.
        if piece.piece_type() == PieceType::King && (from.file() as i8 - to.file() as i8).abs() == 2 {
            let (rook_from_file, rook_to_file) =
                if to.file() > from.file() { (File::H, File::F) } else { (File::A, File::D) };
            let rook_from = Square::new(rook_from_file, from.rank());
            let rook_to = Square::new(rook_to_file, from.rank());
            if self[rook_from].is_some() {
                self.move_piece(rook_from, rook_to);
                undo.rook_move = Some((rook_from, rook_to));
            }
        }

        self.castling_rights &= !(CastlingRights::lost_on(from) | CastlingRights::lost_on(to));

        if is_pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = !self.side_to_move;
        self.history.push(undo);
    }

    /// Takes back a move, restoring the position exactly as it was before the move was made.
    ///
    /// # Parameters
    /// * `mv` - The move to take back. It must be the most recently applied move.
    ///
    /// # Panics
    /// Panics if no move was applied. In debug builds, also panics if `mv` is not the last applied move.
    pub fn unmake(&mut self, mv: Move) {
        let undo = self.history.pop().expect("There should be a move to unmake.");
        debug_assert_eq!(undo.mv, mv, "Moves must be unmade in the reverse order they were made.");

        self.remove_piece(undo.mv.to_square());
        self.put_piece(undo.moved, undo.mv.from_square());

        if let Some((rook_from, rook_to)) = undo.rook_move {
            self.move_piece(rook_to, rook_from);
        }

        if let Some((captured, square)) = undo.captured {
            self.put_piece(captured, square);
        }

        self.castling_rights = undo.castling_rights;
        self.en_passant_square = undo.en_passant_square;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.side_to_move = !self.side_to_move;
    }
}

impl Default for Position {
    /// Creates an empty board with White to move and no castling rights.
    fn default() -> Self {
        Self {
            board: [None; Square::COUNT],
            side_to_move: Color::White,
            castling_rights: CastlingRights::empty(),
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }
}

impl Index<Square> for Position {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.board[index.index()]
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_compact_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(position: &mut Position, moves: &[&str]) -> Vec<Move> {
        moves
            .iter()
            .map(|notation| {
                let mv = Move::from_uci(notation).unwrap();
                position.make(mv);
                mv
            })
            .collect()
    }

    #[test]
    fn test_position_default() {
        let position = Position::default();
        assert_eq!(position.side_to_move(), Color::White);
        assert!(position.board.iter().all(|square| square.is_none()));
        assert_eq!(position.castling_rights(), CastlingRights::empty());
    }

    #[test]
    fn test_new_initial_position() {
        let position = Position::new();

        assert_eq!(position[Square::A1], Some(Piece::WHITE_ROOK));
        assert_eq!(position[Square::D1], Some(Piece::WHITE_QUEEN));
        assert_eq!(position[Square::E1], Some(Piece::WHITE_KING));
        assert_eq!(position[Square::G8], Some(Piece::BLACK_KNIGHT));
        for file in File::ALL_FILES {
            assert_eq!(position[Square::new(file, Rank::R2)], Some(Piece::WHITE_PAWN));
            assert_eq!(position[Square::new(file, Rank::R7)], Some(Piece::BLACK_PAWN));
            for rank in &Rank::ALL_RANKS[2..6] {
                assert_eq!(position[Square::new(file, *rank)], None);
            }
        }

        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.castling_rights(), CastlingRights::all());
        assert_eq!(position.castling_availability(), CastlingRights::empty());
        assert_eq!(position.en_passant_square(), None);
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.fullmove_number(), 1);
    }

    #[test]
    fn test_to_fen() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "r3k2r/pppbqppp/2n1bn2/3pp3/3PP3/2N1BN2/PPPBQPPP/R3K2R w - - 0 7",
            "r3k2R/8/8/8/8/8/8/R3K3 b Qq - 0 1",
        ];

        for fen in fens {
            assert_eq!(fen, Position::new_from_fen(fen).unwrap().to_fen());
        }
    }

    #[test]
    fn test_new_from_fen_minimal_fields() {
        let position = Position::new_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b").unwrap();

        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.castling_rights(), CastlingRights::empty());
        assert_eq!(position.en_passant_square(), None);
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.fullmove_number(), 1);
    }

    #[test]
    fn test_new_from_fen_errors() {
        assert!(matches!(Position::new_from_fen(""), Err(FenError::MissingField)));
        assert!(matches!(Position::new_from_fen("8/8/8/8/8/8/8/8"), Err(FenError::MissingField)));
        assert!(matches!(Position::new_from_fen("8/8/8/8/8/8/8 w"), Err(FenError::InvalidPiecePlacement(_))));
        assert!(matches!(Position::new_from_fen("9/8/8/8/8/8/8/8 w"), Err(FenError::InvalidPiecePlacement(_))));
        assert!(matches!(Position::new_from_fen("ppppppppp/8/8/8/8/8/8/8 w"), Err(FenError::InvalidPiecePlacement(_))));
        assert!(matches!(Position::new_from_fen("x7/8/8/8/8/8/8/8 w"), Err(FenError::InvalidPiecePlacement(_))));
        assert!(matches!(Position::new_from_fen("8/8/8/8/8/8/8/8 x"), Err(FenError::InvalidActiveColor(_))));
        assert!(matches!(
            Position::new_from_fen("8/8/8/8/8/8/8/8 w KX"),
            Err(FenError::InvalidCastlingAvailability(_))
        ));
        assert!(matches!(Position::new_from_fen("8/8/8/8/8/8/8/8 w - e9"), Err(FenError::InvalidEnPassantSquare(_))));
        assert!(matches!(Position::new_from_fen("8/8/8/8/8/8/8/8 w - - x"), Err(FenError::InvalidHalfmoveClock(_))));
        assert!(matches!(Position::new_from_fen("8/8/8/8/8/8/8/8 w - - 0 x"), Err(FenError::InvalidFullmoveNumber(_))));
    }

    #[test]
    fn test_new_from_fen_too_many_pieces() {
        assert_eq!(
            Position::new_from_fen("QQQQQQQQ/QQQQQQQQ/8/8/8/8/8/k6K w").err(),
            Some(FenError::TooManyPieces(Color::White))
        );
        assert!(Position::new_from_fen("QQQQQQQQ/QQQQQQQ1/8/8/8/8/8/k6K w").is_ok());
    }

    #[test]
    fn test_clocks_saturate() {
        let mut position = Position::new_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 65535 65535").unwrap();
        let white_move = Move::new(Square::E1, Square::D1);
        let black_move = Move::new(Square::E8, Square::D8);

        position.make(white_move);
        position.make(black_move);
        assert_eq!(position.halfmove_clock(), u16::MAX);
        assert_eq!(position.fullmove_number(), u16::MAX);

        position.unmake(black_move);
        position.unmake(white_move);
        assert_eq!(position.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 65535 65535");
    }

    #[test]
    fn test_to_compact_string() {
        let position = Position::new();

        assert_eq!(
            position.to_compact_string(),
            "8  r n b q k b n r\n7  p p p p p p p p\n6  . . . . . . . .\n5  . . . . . . . .\n4  . . . . . . . .\n3  . . . . . . . .\n2  P P P P P P P P\n1  R N B Q K B N R\n   a b c d e f g h"
        );
    }

    #[test]
    fn test_put_remove_and_move_piece() {
        let mut position = Position::default();
        position.put_piece(Piece::WHITE_PAWN, Square::A2);
        position.move_piece(Square::A2, Square::A3);

        assert_eq!(position[Square::A2], None);
        assert_eq!(position[Square::A3], Some(Piece::WHITE_PAWN));
        assert_eq!(position.remove_piece(Square::A3), Piece::WHITE_PAWN);
        assert_eq!(position[Square::A3], None);
    }

    #[test]
    fn test_king_square() {
        let position = Position::new_from_fen("8/8/4k3/8/8/8/3K4/8 w - - 0 1").unwrap();

        assert_eq!(position.king_square(Color::Black), Some(Square::E6));
        assert_eq!(position.king_square(Color::White), Some(Square::D2));
        assert_eq!(Position::new_from_fen("8/8/4k3/8/8/8/8/8 w").unwrap().king_square(Color::White), None);
    }

    #[test]
    fn test_is_king_attacked() {
        assert!(Position::new_from_fen("4k3/8/8/1B6/8/8/8/4K3 b - - 0 1").unwrap().is_king_attacked(Color::Black));
        assert!(!Position::new_from_fen("4k3/2Q3Q1/8/2BR1RB1/8/8/8/4K3 b - - 0 1")
            .unwrap()
            .is_king_attacked(Color::Black));
        assert!(Position::new_from_fen("4k3/5P2/8/8/8/8/8/4K3 b - - 0 1").unwrap().is_king_attacked(Color::Black));
    }

    #[test]
    fn test_make_two_square_push_sets_en_passant() {
        let mut position = Position::new();
        play(&mut position, &["e2e4"]);

        assert_eq!(position.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");

        play(&mut position, &["g8f6"]);
        assert_eq!(position.en_passant_square(), None);
        assert_eq!(position.halfmove_clock(), 1);
        assert_eq!(position.fullmove_number(), 2);
    }

    #[test]
    fn test_make_en_passant() {
        let original = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let mut position = Position::new_from_fen(original).unwrap();
        let mv = Move::new(Square::E5, Square::F6);

        position.make(mv);
        assert_eq!(position.to_fen(), "rnbqkbnr/ppp1p1pp/5P2/3p4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3");

        position.unmake(mv);
        assert_eq!(position.to_fen(), original);
    }

    #[test]
    fn test_make_castling() {
        let original = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut position = Position::new_from_fen(original).unwrap();

        let kingside = Move::new(Square::E1, Square::G1);
        position.make(kingside);
        assert_eq!(position.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
        position.unmake(kingside);
        assert_eq!(position.to_fen(), original);

        let queenside = Move::new(Square::E1, Square::C1);
        position.make(queenside);
        assert_eq!(position.to_fen(), "r3k2r/8/8/8/8/8/8/2KR3R b kq - 1 1");
        position.unmake(queenside);
        assert_eq!(position.to_fen(), original);
    }

    #[test]
    fn test_rook_move_and_capture_clear_castling_rights() {
        let mut position = Position::new_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

        play(&mut position, &["a1a8"]);
        assert_eq!(position.castling_rights(), CastlingRights::WHITE_KINGSIDE | CastlingRights::BLACK_KINGSIDE);

        play(&mut position, &["h8h1"]);
        assert_eq!(position.castling_rights(), CastlingRights::empty());
    }

    #[test]
    fn test_make_promotion_and_capture() {
        let original = "1n2k3/P7/8/8/8/8/8/4K3 w - - 5 40";
        let mut position = Position::new_from_fen(original).unwrap();
        let mv = Move::new_promotion(Square::A7, Square::B8, PieceType::Queen);

        position.make(mv);
        assert_eq!(position.to_fen(), "1Q2k3/8/8/8/8/8/8/4K3 b - - 0 40");
        assert_eq!(position.last_move(), Some(mv));

        position.unmake(mv);
        assert_eq!(position.to_fen(), original);
        assert_eq!(position.last_move(), None);
    }

    #[test]
    fn test_make_unmake_sequence_restores_position() {
        let mut position = Position::new();
        let original = position.to_fen();

        let moves = play(&mut position, &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "c7c5", "d4c5"]);
        assert_eq!(position.to_fen(), "rnb1kbnr/pp2pppp/8/q1P5/8/2N5/PPP2PPP/R1BQKBNR b KQkq - 0 5");

        for mv in moves.into_iter().rev() {
            position.unmake(mv);
        }
        assert_eq!(position.to_fen(), original);
    }

    #[test]
    #[should_panic]
    fn test_unmake_out_of_order_panics_in_debug() {
        let mut position = Position::new();
        play(&mut position, &["e2e4", "e7e5"]);
        position.unmake(Move::new(Square::E2, Square::E4));
    }
}
