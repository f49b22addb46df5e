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

//! A library for reading PGN movetext into a tree of fully resolved moves.
//!
//! Every move token is resolved against a simulated board to the exact
//! squares it moves between. Variations become child lines of the move
//! they are alternatives to.
//!
//! # Examples
//!
//! Parse movetext:
//!
//! ```
//! use pgn_tree::{parse_game, Role, Square};
//!
//! let game = parse_game("1. e4 e5 2. Nf3 Nc6 3. Bb5 (3. Bc4 Bc5) a6 *", None)?;
//!
//! let bb5 = &game.moves()[4];
//! assert_eq!(bb5.role(), Some(Role::Bishop));
//! assert_eq!(bb5.from(), Some(Square::F1));
//! assert_eq!(bb5.to(), Some(Square::B5));
//!
//! let italian = &bb5.variations[0];
//! assert_eq!(italian[1].to(), Some(Square::C5));
//! # Ok::<_, pgn_tree::ParseError>(())
//! ```
//!
//! Start from a position:
//!
//! ```
//! use pgn_tree::{fen::Fen, parse_game, Square};
//!
//! let fen: Fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2".parse()?;
//! let game = parse_game("2. exd6 Kd7", Some(fen.into_state()))?;
//!
//! let exd6 = &game.moves()[0];
//! assert!(exd6.is_en_passant());
//! assert_eq!(exd6.ep_square(), Some(Square::D5));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Failures name the offending token:
//!
//! ```
//! use pgn_tree::{parse_game, ParseError};
//!
//! assert_eq!(
//!     parse_game("1. e4 e5 2. Nf6", None),
//!     Err(ParseError::AmbiguousOrUnresolvedMove { token: "Nf6".to_owned() })
//! );
//! ```
//!
//! Also reads complete [game records](Game::from_pgn) and
//! [files with many games](PgnSource), [FEN](fen) and [SAN](san).
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   for the vocabulary types and the move tree.
//! * `parallel`: Enables [`PgnSource::par_parse_games`] to parse games on
//!   a [`rayon`](https://docs.rs/rayon/1/rayon/) thread pool.

#![doc(html_root_url = "https://docs.rs/pgn-tree/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod board;
mod castling_side;
mod color;
mod errors;
mod game;
mod m;
mod movetext;
mod record;
mod resolve;
mod role;
mod source;
mod square;
mod state;
mod tag;
mod types;

pub mod fen;
pub mod san;

pub use board::Board;
pub use castling_side::CastlingSide;
pub use color::{Color, ParseColorError};
pub use errors::{ParseError, ParseErrorKind};
pub use game::Game;
pub use m::Move;
pub use movetext::{parse_game, parse_sequence};
pub use record::{MoveRecord, Ply, Variation};
pub use role::Role;
pub use source::{Games, PgnSource};
pub use square::{File, ParseSquareError, Rank, Square};
pub use state::{Castles, GameState, Undo};
pub use tag::{RawTag, Tags};
pub use types::{InvalidNag, Nag, Outcome, Piece};
