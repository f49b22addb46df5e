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

use std::{error::Error, fmt};

use crate::{fen::ParseFenError, san::SanError};

/// Error when a game cannot be parsed.
///
/// Parsing stops at the first error. Each variant names the token or
/// fragment of text that caused it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The token is not a move, castle, termination marker or annotation.
    MalformedToken { token: String },
    /// No piece of the side to move can make the move.
    AmbiguousOrUnresolvedMove { token: String },
    /// A pawn capture onto an empty square without an enemy pawn to take
    /// en passant.
    InvalidEnPassant { token: String },
    /// A `{` without a closing `}`.
    UnterminatedComment { fragment: String },
    /// A `(` without a matching `)`.
    UnterminatedVariation { fragment: String },
    /// A comment or annotation before the first move of its line.
    DanglingComment { comment: String },
    /// A variation before the first move of its line.
    DanglingVariation { fragment: String },
    /// A line starting with `[` that is not `[Name "Value"]`.
    MalformedTag { line: String },
    /// The `FEN` tag does not describe a position.
    InvalidStartingPosition(ParseFenError),
}

/// The kind of a [`ParseError`], without its context.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    MalformedToken,
    AmbiguousOrUnresolvedMove,
    InvalidEnPassant,
    UnterminatedComment,
    UnterminatedVariation,
    DanglingComment,
    DanglingVariation,
    MalformedTag,
    InvalidStartingPosition,
}

impl ParseError {
    pub const fn kind(&self) -> ParseErrorKind {
        match *self {
            ParseError::MalformedToken { .. } => ParseErrorKind::MalformedToken,
            ParseError::AmbiguousOrUnresolvedMove { .. } => {
                ParseErrorKind::AmbiguousOrUnresolvedMove
            }
            ParseError::InvalidEnPassant { .. } => ParseErrorKind::InvalidEnPassant,
            ParseError::UnterminatedComment { .. } => ParseErrorKind::UnterminatedComment,
            ParseError::UnterminatedVariation { .. } => ParseErrorKind::UnterminatedVariation,
            ParseError::DanglingComment { .. } => ParseErrorKind::DanglingComment,
            ParseError::DanglingVariation { .. } => ParseErrorKind::DanglingVariation,
            ParseError::MalformedTag { .. } => ParseErrorKind::MalformedTag,
            ParseError::InvalidStartingPosition(_) => ParseErrorKind::InvalidStartingPosition,
        }
    }

    pub(crate) fn unresolved(token: &str, err: SanError) -> ParseError {
        let token = token.to_owned();
        match err {
            SanError::Unresolved => ParseError::AmbiguousOrUnresolvedMove { token },
            SanError::InvalidEnPassant => ParseError::InvalidEnPassant { token },
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedToken { token } => write!(f, "malformed token: {token}"),
            ParseError::AmbiguousOrUnresolvedMove { token } => {
                write!(f, "no piece can make the move {token}")
            }
            ParseError::InvalidEnPassant { token } => {
                write!(f, "no pawn to capture en passant with {token}")
            }
            ParseError::UnterminatedComment { fragment } => {
                write!(f, "unterminated comment: {fragment}")
            }
            ParseError::UnterminatedVariation { fragment } => {
                write!(f, "unterminated variation: {fragment}")
            }
            ParseError::DanglingComment { comment } => {
                write!(f, "comment before the first move: {comment}")
            }
            ParseError::DanglingVariation { fragment } => {
                write!(f, "variation before the first move: {fragment}")
            }
            ParseError::MalformedTag { line } => write!(f, "malformed tag: {line}"),
            ParseError::InvalidStartingPosition(err) => write!(f, "invalid starting position: {err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::InvalidStartingPosition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseFenError> for ParseError {
    fn from(err: ParseFenError) -> ParseError {
        ParseError::InvalidStartingPosition(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_source() {
        let err = ParseError::from(ParseFenError::WrongFieldCount);
        assert_eq!(err.kind(), ParseErrorKind::InvalidStartingPosition);
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "invalid starting position: wrong number of fen fields"
        );

        let err = ParseError::unresolved("exf6", SanError::InvalidEnPassant);
        assert_eq!(err.kind(), ParseErrorKind::InvalidEnPassant);
        assert!(err.source().is_none());
        assert!(err.to_string().contains("exf6"));
    }
}
