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

use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;

use crate::{
    color::Color,
    role::Role,
    square::{File, Rank, Square},
    types::Piece,
};

/// Piece positions on a board.
///
/// A plain square-indexed array. Cloning yields a fully independent copy.
///
/// # Examples
///
/// ```
/// use pgn_tree::{Board, Color, Role, Square};
///
/// let board = Board::new();
/// assert_eq!(board.piece_at(Square::E1), Some(Role::King.of(Color::White)));
/// assert_eq!(board.piece_at(Square::E4), None);
///
/// assert_eq!(board.board_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        const BACKRANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            let pawn_rank = color.fold(Rank::Second, Rank::Seventh);
            for (file, role) in File::ALL.into_iter().zip(BACKRANK) {
                board.set_piece_at(Square::from_coords(file, color.backrank()), role.of(color));
                board.set_piece_at(Square::from_coords(file, pawn_rank), color.pawn());
            }
        }
        board
    }

    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_some()
    }

    /// Puts a piece on a square, replacing any previous occupant.
    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    /// Clears a square, returning its previous occupant.
    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// All squares holding `piece`, in ascending order from `a1`.
    pub fn find_all(&self, piece: Piece) -> ArrayVec<Square, 64> {
        self.iter()
            .filter(|&(_, p)| p == piece)
            .map(|(sq, _)| sq)
            .collect()
    }

    /// The first king of the given color, scanning upwards from `a1`.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.iter()
            .find(|&(_, p)| p == color.king())
            .map(|(sq, _)| sq)
    }

    /// Iterates over occupied squares, in ascending order from `a1`.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(|(index, piece)| {
            Some((Square::new(index as u32)?, (*piece)?))
        })
    }

    /// Parses the piece placement field of a FEN, like
    /// `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR`.
    ///
    /// Returns `None` unless there are exactly 8 ranks, each covering
    /// exactly 8 files.
    pub fn from_board_fen(board_fen: &[u8]) -> Option<Board> {
        let mut board = Board::empty();

        let mut ranks = 0;
        for (row, rank_fen) in board_fen.split(|&ch| ch == b'/').enumerate() {
            let rank = Rank::new(7u32.checked_sub(row as u32)?)?;
            let mut file = 0;
            for &ch in rank_fen {
                if (b'1'..=b'8').contains(&ch) {
                    file += u32::from(ch - b'0');
                } else {
                    let piece = Piece::from_char(char::from(ch))?;
                    board.set_piece_at(Square::from_coords(File::new(file)?, rank), piece);
                    file += 1;
                }
                if file > 8 {
                    return None;
                }
            }
            if file != 8 {
                return None;
            }
            ranks += 1;
        }

        (ranks == 8).then_some(board)
    }

    /// Renders the piece placement field of a FEN.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(15);

        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0u8;

            for file in File::ALL {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }

            if rank > Rank::First {
                fen.push('/');
            }
        }

        fen
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                f.write_char(
                    self.piece_at(Square::from_coords(file, rank))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_at() {
        let board = Board::new();
        assert_eq!(board.piece_at(Square::A2), Some(Color::White.pawn()));
        assert_eq!(board.piece_at(Square::B1), Some(Role::Knight.of(Color::White)));
        assert_eq!(board.piece_at(Square::D8), Some(Role::Queen.of(Color::Black)));
        assert_eq!(board.piece_at(Square::D4), None);
    }

    #[test]
    fn test_set_and_remove() {
        let mut board = Board::new();
        board.set_piece_at(Square::A3, Color::White.pawn());
        assert_eq!(board.piece_at(Square::A3), Some(Color::White.pawn()));
        assert_eq!(board.remove_piece_at(Square::A3), Some(Color::White.pawn()));
        assert_eq!(board.remove_piece_at(Square::A3), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new();
        let mut copy = board.clone();
        copy.remove_piece_at(Square::E2);
        assert!(board.is_occupied(Square::E2));
        assert!(!copy.is_occupied(Square::E2));
    }

    #[test]
    fn test_find_all() {
        let board = Board::new();
        assert_eq!(
            board.find_all(Role::Knight.of(Color::Black)).as_slice(),
            [Square::B8, Square::G8]
        );
        assert_eq!(board.find_all(Color::White.pawn()).len(), 8);
        assert_eq!(board.king_of(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().king_of(Color::White), None);
    }

    #[test]
    fn test_board_fen() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "4k3/8/8/8/8/8/8/4K2R",
            "8/8/8/8/8/8/8/8",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
        ] {
            let board = Board::from_board_fen(fen.as_bytes()).expect("valid board fen");
            assert_eq!(board.board_fen(), fen);
        }
    }

    #[test]
    fn test_invalid_board_fen() {
        for fen in [
            "",
            "8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "7/8/8/8/8/8/8/8",
            "ppppppppp/8/8/8/8/8/8/8",
            "z7/8/8/8/8/8/8/8",
        ] {
            assert_eq!(Board::from_board_fen(fen.as_bytes()), None, "{fen}");
        }
    }
}
