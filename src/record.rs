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

//! The move tree: sequences of resolved moves, each of which may branch
//! into alternative lines.

use std::{ops, slice, vec};

use crate::{
    castling_side::CastlingSide,
    color::Color,
    m::Move,
    role::Role,
    san::{SanPlus, Suffix},
    square::Square,
    state::{GameState, Undo},
    types::{Nag, Outcome},
};

/// What a single token did to the game.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Ply {
    /// A move by `color`.
    Move {
        color: Color,
        m: Move,
        #[cfg_attr(feature = "serde", serde(skip_serializing))]
        undo: Undo,
    },
    /// A termination marker. It does not change the game state.
    End(Outcome),
}

/// One resolved token of movetext.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MoveRecord {
    /// The token as written, without its move number.
    pub san: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub san_plus: SanPlus,
    pub ply: Ply,
    pub nags: Vec<Nag>,
    /// Comments following the move, trimmed. Several comments are joined
    /// with a single space, and empty comments are dropped.
    pub comment: Option<String>,
    /// Alternatives to this move, each starting from the position before it.
    pub variations: Vec<Variation>,
}

impl MoveRecord {
    pub(crate) fn new(san: &str, san_plus: SanPlus, ply: Ply) -> MoveRecord {
        MoveRecord {
            san: san.to_owned(),
            san_plus,
            ply,
            nags: Vec::new(),
            comment: None,
            variations: Vec::new(),
        }
    }

    /// The side that moved, or `None` for a termination marker.
    pub fn color(&self) -> Option<Color> {
        match self.ply {
            Ply::Move { color, .. } => Some(color),
            Ply::End(_) => None,
        }
    }

    pub fn m(&self) -> Option<Move> {
        match self.ply {
            Ply::Move { m, .. } => Some(m),
            Ply::End(_) => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.m().map(Move::role)
    }

    pub fn from(&self) -> Option<Square> {
        self.m().map(Move::from)
    }

    pub fn to(&self) -> Option<Square> {
        self.m().map(Move::to)
    }

    pub fn is_capture(&self) -> bool {
        self.m().is_some_and(Move::is_capture)
    }

    pub fn captured(&self) -> Option<Role> {
        self.m().and_then(Move::capture)
    }

    pub fn is_en_passant(&self) -> bool {
        self.m().is_some_and(Move::is_en_passant)
    }

    /// The square of the pawn taken en passant.
    pub fn ep_square(&self) -> Option<Square> {
        self.m().and_then(Move::ep_capture_square)
    }

    pub fn castle(&self) -> Option<CastlingSide> {
        self.m().and_then(Move::castling_side)
    }

    pub fn promotion(&self) -> Option<Role> {
        self.m().and_then(Move::promotion)
    }

    pub fn is_check(&self) -> bool {
        self.san_plus.suffix == Some(Suffix::Check)
    }

    pub fn is_checkmate(&self) -> bool {
        self.san_plus.suffix == Some(Suffix::Checkmate)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.ply {
            Ply::End(outcome) => Some(outcome),
            Ply::Move { .. } => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self.ply, Ply::End(_))
    }

    /// Applies the move to the state it was resolved in.
    pub fn replay(&self, state: &mut GameState) {
        if let Ply::Move { m, .. } = self.ply {
            state.play(m);
        }
    }

    /// Takes the move back, restoring the state it was resolved in.
    pub fn rewind(&self, state: &mut GameState) {
        if let Ply::Move { m, ref undo, .. } = self.ply {
            state.unplay(m, undo);
        }
    }
}

/// A line of play: moves in order, each possibly owning sub-lines.
///
/// The main line of a game is a `Variation` as well.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Variation(Vec<MoveRecord>);

impl Variation {
    pub fn new() -> Variation {
        Variation::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.0.push(record);
    }

    pub fn last_mut(&mut self) -> Option<&mut MoveRecord> {
        self.0.last_mut()
    }

    /// Number of moves, not counting a termination marker.
    pub fn plies(&self) -> usize {
        self.0.iter().filter(|record| !record.is_end()).count()
    }

    /// The termination marker, if the line has one.
    pub fn outcome(&self) -> Option<Outcome> {
        self.0.iter().rev().find_map(MoveRecord::outcome)
    }

    /// Replays all moves onto `state`.
    pub fn replay(&self, state: &mut GameState) {
        for record in &self.0 {
            record.replay(state);
        }
    }

    pub fn into_inner(self) -> Vec<MoveRecord> {
        self.0
    }
}

impl ops::Deref for Variation {
    type Target = [MoveRecord];

    fn deref(&self) -> &[MoveRecord] {
        &self.0
    }
}

impl From<Vec<MoveRecord>> for Variation {
    fn from(records: Vec<MoveRecord>) -> Variation {
        Variation(records)
    }
}

impl IntoIterator for Variation {
    type Item = MoveRecord;
    type IntoIter = vec::IntoIter<MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Variation {
    type Item = &'a MoveRecord;
    type IntoIter = slice::Iter<'a, MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &mut GameState, san: &str) -> MoveRecord {
        let san_plus: SanPlus = san.parse().expect("valid san");
        let color = state.turn;
        let m = san_plus.san.to_move(state).expect("legal move");
        let undo = state.play(m);
        MoveRecord::new(san, san_plus, Ply::Move { color, m, undo })
    }

    #[test]
    fn test_rewind_replay() {
        let mut state = GameState::new();
        let e4 = record(&mut state, "e4");
        let d5 = record(&mut state, "d5");
        let exd5 = record(&mut state, "exd5");
        assert_eq!(exd5.captured(), Some(Role::Pawn));
        let after = state.clone();

        exd5.rewind(&mut state);
        assert_eq!(state.turn, Color::White);
        assert_eq!(state.board.piece_at(Square::D5), Some(Color::Black.pawn()));
        assert_eq!(state.ep_square, Some(Square::D6));

        exd5.replay(&mut state);
        assert_eq!(state, after);

        exd5.rewind(&mut state);
        d5.rewind(&mut state);
        e4.rewind(&mut state);
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_accessors() {
        let mut state = GameState::new();
        let nf3 = record(&mut state, "Nf3+");
        assert_eq!(nf3.color(), Some(Color::White));
        assert_eq!(nf3.role(), Some(Role::Knight));
        assert_eq!(nf3.from(), Some(Square::G1));
        assert_eq!(nf3.to(), Some(Square::F3));
        assert!(nf3.is_check());
        assert!(!nf3.is_checkmate());
        assert!(!nf3.is_capture());
        assert_eq!(nf3.outcome(), None);

        let end = MoveRecord::new(
            "1-0",
            "1-0".parse().expect("valid san"),
            Ply::End(Outcome::WhiteWins),
        );
        assert_eq!(end.color(), None);
        assert_eq!(end.from(), None);
        assert!(end.is_end());

        let before = state.clone();
        end.rewind(&mut state);
        end.replay(&mut state);
        assert_eq!(state, before);

        let line = Variation::from(vec![nf3, end]);
        assert_eq!(line.plies(), 1);
        assert_eq!(line.outcome(), Some(Outcome::WhiteWins));
    }
}
