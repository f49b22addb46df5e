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

//! The simulated game: board, side to move, castling rights, en passant
//! target and move counters, and how moves change them.

use std::fmt;

use bitflags::bitflags;

use crate::{
    board::Board,
    castling_side::CastlingSide,
    color::Color,
    m::Move,
    role::Role,
    square::Square,
};

bitflags! {
    /// Castling availability, one flag per color and side.
    ///
    /// The flags only record that neither king nor rook has moved. Whether
    /// the path is clear is checked when a castling move is resolved.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct Castles: u8 {
        const WHITE_KING_SIDE = 1;
        const WHITE_QUEEN_SIDE = 2;
        const BLACK_KING_SIDE = 4;
        const BLACK_QUEEN_SIDE = 8;

        const WHITE = Self::WHITE_KING_SIDE.bits() | Self::WHITE_QUEEN_SIDE.bits();
        const BLACK = Self::BLACK_KING_SIDE.bits() | Self::BLACK_QUEEN_SIDE.bits();
    }
}

impl Castles {
    pub const fn flag(color: Color, side: CastlingSide) -> Castles {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => Castles::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => Castles::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => Castles::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => Castles::BLACK_QUEEN_SIDE,
        }
    }

    pub fn has(self, color: Color, side: CastlingSide) -> bool {
        self.contains(Castles::flag(color, side))
    }

    pub fn discard_color(&mut self, color: Color) {
        self.remove(color.fold(Castles::WHITE, Castles::BLACK));
    }

    /// Discards the right tied to a rook corner, if `sq` is one.
    pub fn discard_corner(&mut self, sq: Square) {
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if side.rook_from(color) == sq {
                    self.remove(Castles::flag(color, side));
                }
            }
        }
    }

    /// Parses the castling field of a FEN, like `KQkq` or `-`.
    pub fn from_ascii(s: &[u8]) -> Option<Castles> {
        if s == b"-" {
            return Some(Castles::empty());
        }
        if s.is_empty() {
            return None;
        }

        let mut castles = Castles::empty();
        for &ch in s {
            let flag = match ch {
                b'K' => Castles::WHITE_KING_SIDE,
                b'Q' => Castles::WHITE_QUEEN_SIDE,
                b'k' => Castles::BLACK_KING_SIDE,
                b'q' => Castles::BLACK_QUEEN_SIDE,
                _ => return None,
            };
            if castles.contains(flag) {
                return None;
            }
            castles.insert(flag);
        }
        Some(castles)
    }
}

impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if self.has(color, side) {
                    let ch = side.char();
                    write!(f, "{}", color.fold(ch.to_ascii_uppercase(), ch))?;
                }
            }
        }
        Ok(())
    }
}

/// The part of a [`GameState`] that cannot be recomputed when taking a
/// move back.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Undo {
    pub turn: Color,
    pub castles: Castles,
    pub ep_square: Option<Square>,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

/// A board together with everything needed to interpret the next move.
///
/// # Examples
///
/// ```
/// use pgn_tree::{Color, GameState, Move, Role, Square};
///
/// let mut state = GameState::new();
/// let m = Move::Normal {
///     role: Role::Pawn,
///     from: Square::E2,
///     capture: None,
///     to: Square::E4,
///     promotion: None,
/// };
///
/// let undo = state.play(m);
/// assert_eq!(state.turn, Color::Black);
/// assert_eq!(state.ep_square, Some(Square::E3));
///
/// state.unplay(m, &undo);
/// assert_eq!(state, GameState::new());
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub castles: Castles,
    pub ep_square: Option<Square>,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

impl GameState {
    /// The standard starting position: white to move, all castling rights,
    /// no en passant target, clocks at `0` and `1`.
    pub fn new() -> GameState {
        GameState {
            board: Board::new(),
            turn: Color::White,
            castles: Castles::all(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// An empty board with white to move.
    pub fn empty() -> GameState {
        GameState {
            board: Board::empty(),
            castles: Castles::empty(),
            ..GameState::new()
        }
    }

    fn undo(&self) -> Undo {
        Undo {
            turn: self.turn,
            castles: self.castles,
            ep_square: self.ep_square,
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
        }
    }

    /// Applies a resolved move for the side to move and passes the turn.
    ///
    /// The move is not validated. Returns what is needed to take it back
    /// with [`GameState::unplay()`].
    pub fn play(&mut self, m: Move) -> Undo {
        let undo = self.undo();
        let us = self.turn;

        self.ep_square = None;

        match m {
            Move::Normal {
                role,
                from,
                to,
                promotion,
                ..
            } => {
                self.board.remove_piece_at(from);
                self.board.set_piece_at(to, promotion.unwrap_or(role).of(us));

                if role == Role::King {
                    self.castles.discard_color(us);
                }
                self.castles.discard_corner(from);
                self.castles.discard_corner(to);

                if role == Role::Pawn && from.rank().distance(to.rank()) == 2 {
                    self.ep_square = from.offset(0, us.pawn_direction());
                }
            }
            Move::EnPassant { from, to } => {
                self.board.remove_piece_at(from);
                self.board.remove_piece_at(to.with_rank_of(from));
                self.board.set_piece_at(to, us.pawn());
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::of(king, rook);
                self.board.remove_piece_at(king);
                self.board.remove_piece_at(rook);
                self.board.set_piece_at(side.king_to(us), us.king());
                self.board.set_piece_at(side.rook_to(us), us.rook());
                self.castles.discard_color(us);
            }
        }

        if m.is_zeroing() {
            self.halfmoves = 0;
        } else {
            self.halfmoves = self.halfmoves.saturating_add(1);
        }

        if us.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }

        self.turn = !us;
        undo
    }

    /// Takes back a move previously applied with [`GameState::play()`],
    /// restoring captured pieces, the pre-promotion pawn and the rook of a
    /// castling move.
    pub fn unplay(&mut self, m: Move, undo: &Undo) {
        let us = undo.turn;

        match m {
            Move::Normal {
                role,
                from,
                capture,
                to,
                ..
            } => {
                self.board.remove_piece_at(to);
                self.board.set_piece_at(from, role.of(us));
                if let Some(captured) = capture {
                    self.board.set_piece_at(to, captured.of(!us));
                }
            }
            Move::EnPassant { from, to } => {
                self.board.remove_piece_at(to);
                self.board.set_piece_at(from, us.pawn());
                self.board.set_piece_at(to.with_rank_of(from), (!us).pawn());
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::of(king, rook);
                self.board.remove_piece_at(side.king_to(us));
                self.board.remove_piece_at(side.rook_to(us));
                self.board.set_piece_at(king, us.king());
                self.board.set_piece_at(rook, us.rook());
            }
        }

        self.turn = undo.turn;
        self.castles = undo.castles;
        self.ep_square = undo.ep_square;
        self.halfmoves = undo.halfmoves;
        self.fullmoves = undo.fullmoves;
    }

    /// Checks if castling is still allowed and the king and rook stand on
    /// their original squares with nothing in between.
    pub fn can_castle(&self, side: CastlingSide) -> bool {
        let us = self.turn;
        self.castles.has(us, side)
            && self.board.piece_at(CastlingSide::king_from(us)) == Some(us.king())
            && self.board.piece_at(side.rook_from(us)) == Some(us.rook())
            && side.path(us).all(|sq| !self.board.is_occupied(sq))
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::new()
    }
}
