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

//! Read Standard Algebraic Notation as it appears in movetext.
//!
//! Parsing is purely syntactic. Turning a [`San`] into a [`Move`](crate::Move)
//! needs a [`GameState`](crate::GameState), see [`San::to_move()`].
//!
//! # Examples
//!
//! ```
//! use pgn_tree::{san::{San, SanPlus, Suffix}, Role, Square};
//!
//! let san: SanPlus = "Nxf3+".parse()?;
//! assert_eq!(san.suffix, Some(Suffix::Check));
//! assert_eq!(san.san, San::Normal {
//!     role: Role::Knight,
//!     file: None,
//!     rank: None,
//!     capture: true,
//!     to: Square::F3,
//!     promotion: None,
//! });
//! assert_eq!(san.to_string(), "Nxf3+");
//! # Ok::<_, pgn_tree::san::ParseSanError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use arrayvec::ArrayVec;

use crate::{
    castling_side::CastlingSide,
    role::Role,
    square::{File, Rank, Square},
    types::{Nag, Outcome},
};

/// Error when parsing a syntactically invalid SAN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSanError;

impl fmt::Display for ParseSanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid san")
    }
}

impl Error for ParseSanError {}

/// `Unresolved` or `InvalidEnPassant`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SanError {
    /// No piece of the side to move can make the move.
    Unresolved,
    /// A pawn capture onto an empty square, without an enemy pawn to take
    /// en passant.
    InvalidEnPassant,
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            SanError::Unresolved => "unresolved san",
            SanError::InvalidEnPassant => "invalid en passant capture",
        })
    }
}

impl Error for SanError {}

/// A move token in Standard Algebraic Notation, or a game termination
/// marker.
///
/// `file` and `rank` hold the disambiguation hints. Both are set when the
/// token names the full origin square, like `Ng1f3`. A pawn with only a
/// file hint, like `exd5` or `ed5`, is a capture.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum San {
    Normal {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
    Outcome(Outcome),
}

impl San {
    /// Parses a SAN. Ignores check and checkmate markers anywhere in the
    /// token.
    ///
    /// `x` may appear anywhere and is dropped after noting the capture.
    /// A promotion is `=` followed by an uppercase piece letter. What
    /// remains must have one of these shapes:
    ///
    /// | Shape | Example |
    /// |-------|---------|
    /// | destination | `e4` |
    /// | piece, destination | `Nf3` |
    /// | pawn file, destination | `ed5` |
    /// | piece, file, destination | `Nbd2` |
    /// | piece, rank, destination | `R1a3` |
    /// | piece, origin, destination | `Qh4e1` |
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if `san` is not syntactically valid.
    pub fn from_ascii(san: &[u8]) -> Result<San, ParseSanError> {
        if let Some(outcome) = Outcome::from_ascii(san) {
            return Ok(San::Outcome(outcome));
        }

        let mut capture = false;
        let mut promotion = None;
        let mut stripped: ArrayVec<u8, 5> = ArrayVec::new();

        let mut chars = san.iter().copied();
        while let Some(ch) = chars.next() {
            match ch {
                b'x' => capture = true,
                b'+' | b'#' => (),
                b'=' if promotion.is_none() => {
                    promotion = Some(
                        chars
                            .next()
                            .and_then(|r| Role::from_upper_char(char::from(r)))
                            .ok_or(ParseSanError)?,
                    );
                }
                _ => stripped.try_push(ch).map_err(|_| ParseSanError)?,
            }
        }

        if let Some(side) = CastlingSide::from_ascii(&stripped) {
            return Ok(San::Castle(side));
        }

        let role = |ch: u8| Role::from_upper_char(char::from(ch));
        let file = |ch: u8| File::from_char(char::from(ch));
        let rank = |ch: u8| Rank::from_char(char::from(ch));
        let square = |f: u8, r: u8| Square::from_ascii(&[f, r]).map_err(|_| ParseSanError);

        let (role, file, rank, to) = match *stripped.as_slice() {
            [f, r] => (Role::Pawn, None, None, square(f, r)?),
            [p, f, r] if role(p).is_some() => (role(p).ok_or(ParseSanError)?, None, None, square(f, r)?),
            [h, f, r] => (Role::Pawn, Some(file(h).ok_or(ParseSanError)?), None, square(f, r)?),
            [p, h, f, r] => {
                let role = role(p).ok_or(ParseSanError)?;
                if let Some(file) = file(h) {
                    (role, Some(file), None, square(f, r)?)
                } else if role != Role::Pawn {
                    (role, None, Some(rank(h).ok_or(ParseSanError)?), square(f, r)?)
                } else {
                    return Err(ParseSanError);
                }
            }
            [p, hf, hr, f, r] => (
                role(p).ok_or(ParseSanError)?,
                Some(file(hf).ok_or(ParseSanError)?),
                Some(rank(hr).ok_or(ParseSanError)?),
                square(f, r)?,
            ),
            _ => return Err(ParseSanError),
        };

        Ok(San::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        })
    }

    /// The shape that identifies the origin square, without capture,
    /// promotion and check markers. For example `Nf3` for `Nxf3+`.
    pub fn pattern(&self) -> String {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                to,
                ..
            } => {
                let mut pattern = String::with_capacity(5);
                if role != Role::Pawn {
                    pattern.push(role.upper_char());
                }
                pattern.extend(file.map(File::char));
                pattern.extend(rank.map(Rank::char));
                pattern.push_str(&to.to_string());
                pattern
            }
            San::Castle(side) => side.as_str().to_owned(),
            San::Outcome(outcome) => outcome.as_str().to_owned(),
        }
    }
}

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<San, ParseSanError> {
        San::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    write!(f, "{}", role.upper_char())?;
                }
                if let Some(file) = file {
                    write!(f, "{}", file.char())?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank.char())?;
                }
                if capture {
                    write!(f, "x")?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, "={}", promotion.upper_char())?;
                }
                Ok(())
            }
            San::Castle(side) => f.write_str(side.as_str()),
            San::Outcome(outcome) => write!(f, "{outcome}"),
        }
    }
}

/// Check (`+`) or checkmate (`#`) suffix.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    pub const fn from_char(ch: char) -> Option<Suffix> {
        match ch {
            '+' => Some(Suffix::Check),
            '#' => Some(Suffix::Checkmate),
            _ => None,
        }
    }

    /// Finds the strongest marker anywhere in a token.
    fn scan(san: &[u8]) -> Option<Suffix> {
        if san.contains(&b'#') {
            Some(Suffix::Checkmate)
        } else if san.contains(&b'+') {
            Some(Suffix::Check)
        } else {
            None
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A [`San`] and possible check and checkmate suffixes.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    /// Parses a SAN and possible check and checkmate suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if `san` is not syntactically valid.
    pub fn from_ascii(san: &[u8]) -> Result<SanPlus, ParseSanError> {
        San::from_ascii(san).map(|result| SanPlus {
            suffix: match result {
                San::Outcome(_) => None,
                _ => Suffix::scan(san),
            },
            san: result,
        })
    }
}

impl FromStr for SanPlus {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<SanPlus, ParseSanError> {
        SanPlus::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

/// Splits trailing annotation glyphs like `!?` off a move token.
///
/// # Errors
///
/// Returns [`ParseSanError`] if the trailing run of `!` and `?` is not a
/// known glyph.
///
/// # Examples
///
/// ```
/// use pgn_tree::{san::split_glyph, Nag};
///
/// assert_eq!(split_glyph(b"Nf3!?"), Ok((&b"Nf3"[..], Some(Nag::SPECULATIVE_MOVE))));
/// assert_eq!(split_glyph(b"e4"), Ok((&b"e4"[..], None)));
/// assert!(split_glyph(b"e4?!?").is_err());
/// ```
pub fn split_glyph(token: &[u8]) -> Result<(&[u8], Option<Nag>), ParseSanError> {
    let split = token
        .iter()
        .rposition(|&ch| ch != b'!' && ch != b'?')
        .map_or(0, |i| i + 1);
    let (san, glyph) = token.split_at(split);
    if glyph.is_empty() {
        Ok((san, None))
    } else {
        Nag::from_ascii(glyph)
            .map(|nag| (san, Some(nag)))
            .map_err(|_| ParseSanError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        for san in [
            "a1", "a8", "h1", "h8", "e4", "b6", "e8=Q", "f1=N#", "hxg7", "bxc1", "bxc1+",
            "bxa8=R+", "Nf3", "Ba5", "Qh8", "Kh1", "Bba5", "N2c4", "Red3", "Ra1a8", "O-O",
            "O-O-O+", "1-0", "0-1", "1/2-1/2", "*",
        ] {
            let result = san.parse::<SanPlus>().expect("valid san").to_string();
            assert_eq!(san, result, "read {san} write {result}");
        }
    }

    #[test]
    fn test_lax_spellings() {
        assert_eq!(
            "0-0-0".parse::<San>(),
            Ok(San::Castle(CastlingSide::QueenSide))
        );
        assert_eq!("O-O+".parse::<San>(), Ok(San::Castle(CastlingSide::KingSide)));
        assert_eq!(
            "ed5".parse::<San>(),
            Ok(San::Normal {
                role: Role::Pawn,
                file: Some(File::E),
                rank: None,
                capture: false,
                to: Square::D5,
                promotion: None,
            })
        );
        assert_eq!(
            "Pe4".parse::<San>(),
            Ok(San::Normal {
                role: Role::Pawn,
                file: None,
                rank: None,
                capture: false,
                to: Square::E4,
                promotion: None,
            })
        );
        assert_eq!(
            "Nx+f3".parse::<SanPlus>().map(|san| san.to_string()),
            Ok("Nxf3+".to_owned())
        );
    }

    #[test]
    fn test_full_origin() {
        assert_eq!(
            "Qh4xe1#".parse::<San>(),
            Ok(San::Normal {
                role: Role::Queen,
                file: Some(File::H),
                rank: Some(Rank::Fourth),
                capture: true,
                to: Square::E1,
                promotion: None,
            })
        );
    }

    #[test]
    fn test_malformed() {
        for san in [
            "", "Zf3", "e9", "i4", "nf3", "P2e4", "e8=X", "e8=q", "Nbd2d4", "e4e5", "xx", "O-O-O-O",
            "Kxe", "--",
        ] {
            assert_eq!(san.parse::<San>(), Err(ParseSanError), "{san}");
        }
    }

    #[test]
    fn test_pattern() {
        let san: San = "Nbxd2+".parse().expect("valid san");
        assert_eq!(san.pattern(), "Nbd2");
        let san: San = "exd6".parse().expect("valid san");
        assert_eq!(san.pattern(), "ed6");
        let san: San = "e8=Q".parse().expect("valid san");
        assert_eq!(san.pattern(), "e8");
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(split_glyph(b"e4!!"), Ok((&b"e4"[..], Some(Nag::BRILLIANT_MOVE))));
        assert_eq!(split_glyph(b"Qxf7#?"), Ok((&b"Qxf7#"[..], Some(Nag::MISTAKE))));
        assert_eq!(split_glyph(b"?"), Ok((&b""[..], Some(Nag::MISTAKE))));
    }
}
