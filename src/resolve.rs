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

//! Finds the origin square of a [`San`] on the current board.
//!
//! Candidates are searched outwards from the destination square in a fixed
//! order, and the first one that survives the filters is taken. Two pieces
//! that could both make the move are not reported as ambiguous.
//!
//! Knights, bishops, rooks and queens are rejected if moving them would
//! open a line from an enemy bishop, rook or queen to their own king.
//! Attacks by knights and pawns are not considered.

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    castling_side::CastlingSide,
    color::Color,
    m::Move,
    role::Role,
    san::{San, SanError},
    square::{File, Rank, Square},
    state::GameState,
    types::Piece,
};

/// `(file, rank)` steps, in search order.
type Steps<const N: usize> = [(i32, i32); N];

const KNIGHT_STEPS: Steps<8> = [
    (-1, 2),
    (1, 2),
    (-1, -2),
    (1, -2),
    (-2, 1),
    (-2, -1),
    (2, -1),
    (2, 1),
];

const BISHOP_DIRECTIONS: Steps<4> = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

const ROOK_DIRECTIONS: Steps<4> = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const QUEEN_DIRECTIONS: Steps<8> = [
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
];

impl San {
    /// Resolves the SAN to a move of the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`SanError`] if no piece can make the move, or if an implied
    /// en passant capture has no pawn to take. Termination markers never
    /// resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_tree::{san::San, GameState, Move, Role, Square};
    ///
    /// let san: San = "Nf3".parse()?;
    /// assert_eq!(san.to_move(&GameState::new()), Ok(Move::Normal {
    ///     role: Role::Knight,
    ///     from: Square::G1,
    ///     capture: None,
    ///     to: Square::F3,
    ///     promotion: None,
    /// }));
    /// # Ok::<_, pgn_tree::san::ParseSanError>(())
    /// ```
    pub fn to_move(&self, state: &GameState) -> Result<Move, SanError> {
        match *self {
            San::Normal {
                role: Role::Pawn,
                file,
                rank,
                to,
                promotion,
                ..
            } => resolve_pawn(state, file, rank, to, promotion),
            San::Normal {
                role,
                file,
                rank,
                to,
                promotion: None,
                ..
            } => resolve_piece(state, role, file, rank, to),
            San::Normal { .. } | San::Outcome(_) => Err(SanError::Unresolved),
            San::Castle(side) => {
                let us = state.turn;
                if state.can_castle(side) {
                    Ok(Move::Castle {
                        king: CastlingSide::king_from(us),
                        rook: side.rook_from(us),
                    })
                } else {
                    Err(SanError::Unresolved)
                }
            }
        }
    }
}

fn resolve_piece(
    state: &GameState,
    role: Role,
    file: Option<File>,
    rank: Option<Rank>,
    to: Square,
) -> Result<Move, SanError> {
    let us = state.turn;
    let piece = role.of(us);

    let capture = match state.board.piece_at(to) {
        Some(p) if p.color == us => return Err(SanError::Unresolved),
        occupant => occupant.map(|p| p.role),
    };

    let from = match (file, rank) {
        (Some(file), Some(rank)) => {
            let from = Square::from_coords(file, rank);
            if !candidates(&state.board, piece, to).contains(&from) {
                return Err(SanError::Unresolved);
            }
            from
        }
        _ => candidates(&state.board, piece, to)
            .into_iter()
            .filter(|from| file.map_or(true, |f| f == from.file()))
            .filter(|from| rank.map_or(true, |r| r == from.rank()))
            .find(|&from| role == Role::King || !exposes_king(&state.board, us, from, to))
            .ok_or(SanError::Unresolved)?,
    };

    Ok(Move::Normal {
        role,
        from,
        capture,
        to,
        promotion: None,
    })
}

fn resolve_pawn(
    state: &GameState,
    file: Option<File>,
    rank: Option<Rank>,
    to: Square,
    promotion: Option<Role>,
) -> Result<Move, SanError> {
    let us = state.turn;
    let back = -us.pawn_direction();

    match promotion {
        Some(Role::Pawn | Role::King) => return Err(SanError::Unresolved),
        Some(_) if to.rank() != (!us).backrank() => return Err(SanError::Unresolved),
        _ => (),
    }

    let from = match (file, rank) {
        (Some(file), Some(rank)) => {
            let from = Square::from_coords(file, rank);
            let single = to.offset(0, back);
            let reachable = if from.file() == to.file() {
                Some(from) == single || Some(from) == to.offset(0, 2 * back)
            } else {
                from.file().distance(to.file()) == 1
                    && single.map(Square::rank) == Some(from.rank())
            };
            if !reachable {
                return Err(SanError::Unresolved);
            }
            from
        }
        (Some(file), None) => {
            if file.distance(to.file()) != 1 {
                return Err(SanError::Unresolved);
            }
            Square::from_coords(file, to.rank())
                .offset(0, back)
                .ok_or(SanError::Unresolved)?
        }
        (None, Some(_)) => return Err(SanError::Unresolved),
        (None, None) => {
            let single = to.offset(0, back).ok_or(SanError::Unresolved)?;
            if state.board.piece_at(single) == Some(us.pawn()) {
                single
            } else {
                to.offset(0, 2 * back).ok_or(SanError::Unresolved)?
            }
        }
    };

    if state.board.piece_at(from) != Some(us.pawn()) {
        return Err(SanError::Unresolved);
    }

    if from.file() == to.file() {
        if state.board.is_occupied(to) {
            return Err(SanError::Unresolved);
        }
        return Ok(Move::Normal {
            role: Role::Pawn,
            from,
            capture: None,
            to,
            promotion,
        });
    }

    match state.board.piece_at(to) {
        Some(Piece { color, role }) if color != us => Ok(Move::Normal {
            role: Role::Pawn,
            from,
            capture: Some(role),
            to,
            promotion,
        }),
        Some(_) => Err(SanError::Unresolved),
        None if state.board.piece_at(to.with_rank_of(from)) == Some((!us).pawn()) => {
            Ok(Move::EnPassant { from, to })
        }
        None => Err(SanError::InvalidEnPassant),
    }
}

/// Squares holding `piece` that could move to `to`, in search order.
fn candidates(board: &Board, piece: Piece, to: Square) -> ArrayVec<Square, 8> {
    let mut found = ArrayVec::new();
    match piece.role {
        Role::Knight => steps(board, piece, to, &KNIGHT_STEPS, &mut found),
        Role::King => steps(board, piece, to, &QUEEN_DIRECTIONS, &mut found),
        Role::Bishop => rays(board, piece, to, &BISHOP_DIRECTIONS, &mut found),
        Role::Rook => rays(board, piece, to, &ROOK_DIRECTIONS, &mut found),
        Role::Queen => rays(board, piece, to, &QUEEN_DIRECTIONS, &mut found),
        Role::Pawn => (),
    }
    found
}

fn steps(
    board: &Board,
    piece: Piece,
    to: Square,
    steps: &[(i32, i32)],
    found: &mut ArrayVec<Square, 8>,
) {
    for &(df, dr) in steps {
        if let Some(sq) = to.offset(df, dr) {
            if board.piece_at(sq) == Some(piece) {
                found.push(sq);
            }
        }
    }
}

fn rays(
    board: &Board,
    piece: Piece,
    to: Square,
    directions: &[(i32, i32)],
    found: &mut ArrayVec<Square, 8>,
) {
    for &(df, dr) in directions {
        let mut sq = to;
        while let Some(next) = sq.offset(df, dr) {
            sq = next;
            if let Some(occupant) = board.piece_at(sq) {
                if occupant == piece {
                    found.push(sq);
                }
                break;
            }
        }
    }
}

/// Checks if moving a piece of `us` from `from` to `to` would uncover a
/// bishop, rook or queen line onto the king of `us`.
fn exposes_king(board: &Board, us: Color, from: Square, to: Square) -> bool {
    let Some(king) = board.king_of(us) else {
        return false;
    };

    QUEEN_DIRECTIONS.iter().enumerate().any(|(i, &(df, dr))| {
        let slider = if i < BISHOP_DIRECTIONS.len() {
            Role::Bishop
        } else {
            Role::Rook
        };

        let mut sq = king;
        while let Some(next) = sq.offset(df, dr) {
            sq = next;
            if sq == to {
                return false;
            }
            if sq == from {
                continue;
            }
            if let Some(Piece { color, role }) = board.piece_at(sq) {
                return color != us && (role == slider || role == Role::Queen);
            }
        }
        false
    })
}
