// This file is part of the pgn-tree library.
// Copyright (C) 2017-2026 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! ```
//! use pgn_tree::{fen::Fen, Color, Square};
//!
//! let fen: Fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse()?;
//! let state = fen.into_state();
//! assert_eq!(state.turn, Color::Black);
//! assert_eq!(state.ep_square, Some(Square::E3));
//! # Ok::<_, pgn_tree::fen::ParseFenError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    board::Board,
    color::Color,
    square::Square,
    state::{Castles, GameState},
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    /// A FEN has exactly six whitespace separated fields.
    WrongFieldCount,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::WrongFieldCount => "wrong number of fen fields",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl Error for ParseFenError {}

/// A FEN like `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct Fen(pub GameState);

impl Fen {
    /// Parses a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if the input does not consist of exactly
    /// six fields or any field is malformed.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen
            .split(|ch| ch.is_ascii_whitespace())
            .filter(|part| !part.is_empty());

        let mut fields = [&b""[..]; 6];
        for field in &mut fields {
            *field = parts.next().ok_or(ParseFenError::WrongFieldCount)?;
        }
        if parts.next().is_some() {
            return Err(ParseFenError::WrongFieldCount);
        }
        let [board_part, turn_part, castling_part, ep_part, halfmoves_part, fullmoves_part] =
            fields;

        let board = Board::from_board_fen(board_part).ok_or(ParseFenError::InvalidBoard)?;

        let turn = match turn_part {
            [ch] => Color::from_char(char::from(*ch)).ok_or(ParseFenError::InvalidTurn)?,
            _ => return Err(ParseFenError::InvalidTurn),
        };

        let castles = Castles::from_ascii(castling_part).ok_or(ParseFenError::InvalidCastling)?;

        let ep_square = match ep_part {
            b"-" => None,
            _ => Some(Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?),
        };

        let halfmoves = btoi::btou(halfmoves_part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;

        let fullmoves = btoi::btou(fullmoves_part)
            .ok()
            .filter(|&n: &u32| n > 0)
            .ok_or(ParseFenError::InvalidFullmoves)?;

        Ok(Fen(GameState {
            board,
            turn,
            castles,
            ep_square,
            halfmoves,
            fullmoves,
        }))
    }

    pub fn as_state(&self) -> &GameState {
        &self.0
    }

    pub fn into_state(self) -> GameState {
        self.0
    }
}

impl From<GameState> for Fen {
    fn from(state: GameState) -> Fen {
        Fen(state)
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = &self.0;
        write!(
            f,
            "{} {} {} ",
            state.board.board_fen(),
            state.turn.char(),
            state.castles
        )?;
        match state.ep_square {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", state.halfmoves, state.fullmoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_position() {
        let fen: Fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .expect("valid fen");
        assert_eq!(fen.as_state(), &GameState::new());
        assert_eq!(
            Fen::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn test_write_read() {
        for fen in [
            "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 12 40",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
            "8/8/8/8/8/8/8/8 b - - 0 1",
        ] {
            let parsed: Fen = fen.parse().expect("valid fen");
            assert_eq!(parsed.to_string(), fen);
        }
    }

    #[test]
    fn test_extra_whitespace() {
        let fen: Fen = "  8/8/8/8/8/8/8/K6k   b  -  -  3 9 ".parse().expect("valid fen");
        assert_eq!(fen.to_string(), "8/8/8/8/8/8/8/K6k b - - 3 9");
    }

    #[test]
    fn test_invalid_fen() {
        for (fen, err) in [
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -", ParseFenError::WrongFieldCount),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 x", ParseFenError::WrongFieldCount),
            ("", ParseFenError::WrongFieldCount),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1", ParseFenError::InvalidBoard),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1", ParseFenError::InvalidTurn),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1", ParseFenError::InvalidCastling),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1", ParseFenError::InvalidEpSquare),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1", ParseFenError::InvalidHalfmoveClock),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0", ParseFenError::InvalidFullmoves),
        ] {
            assert_eq!(fen.parse::<Fen>(), Err(err), "{fen}");
        }
    }
}
