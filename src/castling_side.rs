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

use std::ops;

use crate::{
    color::Color,
    square::{File, Square},
};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    /// The side a rook castles on, relative to its king.
    #[inline]
    pub fn of(king: Square, rook: Square) -> CastlingSide {
        if rook < king {
            CastlingSide::QueenSide
        } else {
            CastlingSide::KingSide
        }
    }

    /// Parses `O-O`, `O-O-O` or the zero-digit spellings `0-0`, `0-0-0`.
    pub fn from_ascii(s: &[u8]) -> Option<CastlingSide> {
        match s {
            b"O-O" | b"0-0" => Some(CastlingSide::KingSide),
            b"O-O-O" | b"0-0-0" => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }

    pub const fn king_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    pub const fn rook_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    /// The corner the rook castles from.
    pub const fn rook_from_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    /// The king always castles from the e-file.
    pub const fn king_from(color: Color) -> Square {
        Square::from_coords(File::E, color.backrank())
    }

    pub const fn king_to(self, color: Color) -> Square {
        Square::from_coords(self.king_to_file(), color.backrank())
    }

    pub const fn rook_from(self, color: Color) -> Square {
        Square::from_coords(self.rook_from_file(), color.backrank())
    }

    pub const fn rook_to(self, color: Color) -> Square {
        Square::from_coords(self.rook_to_file(), color.backrank())
    }

    /// Squares strictly between king and rook, which must be empty.
    pub fn path(self, color: Color) -> impl Iterator<Item = Square> {
        let files: &'static [File] = match self {
            CastlingSide::KingSide => &[File::F, File::G],
            CastlingSide::QueenSide => &[File::B, File::C, File::D],
        };
        let rank = color.backrank();
        files
            .iter()
            .map(move |&file| Square::from_coords(file, rank))
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// FEN letter, `k` or `q`.
    pub const fn char(self) -> char {
        match self {
            CastlingSide::KingSide => 'k',
            CastlingSide::QueenSide => 'q',
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CastlingSide::KingSide => "O-O",
            CastlingSide::QueenSide => "O-O-O",
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castling_squares() {
        let ks = CastlingSide::KingSide;
        assert_eq!(CastlingSide::king_from(Color::White), Square::E1);
        assert_eq!(ks.king_to(Color::White), Square::G1);
        assert_eq!(ks.rook_from(Color::White), Square::H1);
        assert_eq!(ks.rook_to(Color::White), Square::F1);

        let qs = CastlingSide::QueenSide;
        assert_eq!(CastlingSide::king_from(Color::Black), Square::E8);
        assert_eq!(qs.king_to(Color::Black), Square::C8);
        assert_eq!(qs.rook_from(Color::Black), Square::A8);
        assert_eq!(qs.rook_to(Color::Black), Square::D8);
    }

    #[test]
    fn test_path() {
        let path: Vec<Square> = CastlingSide::QueenSide.path(Color::White).collect();
        assert_eq!(path, [Square::B1, Square::C1, Square::D1]);
        let path: Vec<Square> = CastlingSide::KingSide.path(Color::Black).collect();
        assert_eq!(path, [Square::F8, Square::G8]);
    }

    #[test]
    fn test_from_ascii() {
        assert_eq!(CastlingSide::from_ascii(b"0-0"), Some(CastlingSide::KingSide));
        assert_eq!(CastlingSide::from_ascii(b"O-O-O"), Some(CastlingSide::QueenSide));
        assert_eq!(CastlingSide::from_ascii(b"O-O-O-O"), None);
        assert_eq!(!CastlingSide::KingSide, CastlingSide::QueenSide);
    }
}
