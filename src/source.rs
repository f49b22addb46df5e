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

//! Splitting multi-game text into games.
//!
//! # Examples
//!
//! ```
//! use pgn_tree::PgnSource;
//!
//! let source = PgnSource::new(
//!     "[Event \"A\"]\n1. e4 e5 1-0\n\n[Event \"B\"]\n1. d4 Zz9 0-1\n\n1. c4 *\n",
//! );
//! assert_eq!(source.games().count(), 3);
//!
//! assert!(source.parse_games().is_err());
//!
//! let games = source.parse_games_lossy();
//! assert_eq!(games.len(), 2);
//! assert_eq!(games[0].tag("Event"), Some("A"));
//! ```

use std::{fs, io, path::Path, str::Lines};

use tracing::warn;

use crate::{errors::ParseError, game::Game, types::Outcome};

/// Text holding any number of games.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PgnSource {
    text: String,
}

impl PgnSource {
    pub fn new(text: impl Into<String>) -> PgnSource {
        PgnSource { text: text.into() }
    }

    /// Reads all of `reader`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error, including invalid UTF-8.
    pub fn from_reader<R: io::Read>(mut reader: R) -> io::Result<PgnSource> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(PgnSource { text })
    }

    /// Reads a file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<PgnSource> {
        fs::read_to_string(path).map(PgnSource::new)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Iterates over the text of each game.
    ///
    /// A game ends at a line ending with a termination marker. Text after
    /// the last such line is not a game.
    pub fn games(&self) -> Games<'_> {
        Games {
            lines: self.text.lines(),
        }
    }

    /// Parses all games.
    ///
    /// # Errors
    ///
    /// Returns the error of the first game that fails to parse.
    pub fn parse_games(&self) -> Result<Vec<Game>, ParseError> {
        self.games().map(|text| Game::from_pgn(&text)).collect()
    }

    /// Parses all games, skipping those that fail to parse.
    pub fn parse_games_lossy(&self) -> Vec<Game> {
        self.games()
            .enumerate()
            .filter_map(|(index, text)| match Game::from_pgn(&text) {
                Ok(game) => Some(game),
                Err(err) => {
                    warn!(index, %err, "skipping game");
                    None
                }
            })
            .collect()
    }

    /// Parses all games in parallel. Results are in source order.
    #[cfg(feature = "parallel")]
    pub fn par_parse_games(&self) -> Vec<Result<Game, ParseError>> {
        use rayon::prelude::*;

        let games: Vec<String> = self.games().collect();
        games
            .into_par_iter()
            .map(|text| Game::from_pgn(&text))
            .collect()
    }
}

impl From<String> for PgnSource {
    fn from(text: String) -> PgnSource {
        PgnSource { text }
    }
}

/// Iterator over the games of a [`PgnSource`].
#[derive(Clone, Debug)]
pub struct Games<'a> {
    lines: Lines<'a>,
}

impl Iterator for Games<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut game = String::new();
        for line in self.lines.by_ref().map(str::trim) {
            if line.is_empty() {
                continue;
            }
            game.push_str(line);
            game.push('\n');
            if Outcome::terminates(line) {
                return Some(game);
            }
        }
        None
    }
}
