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

use std::{borrow::Cow, fmt};

use crate::errors::ParseError;

/// A tag value, as it appears between the quotes of a tag line.
#[derive(Clone, Eq, PartialEq)]
pub struct RawTag<'a>(pub &'a str);

impl<'a> RawTag<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Decodes escaped quotes and backslashes. Allocates only when the
    /// value actually contains escape sequences.
    pub fn decode(&self) -> Cow<'a, str> {
        let raw = self.0;
        let bytes = raw.as_bytes();
        let mut head = 0;
        let mut unescaped = 0;
        let mut decoded = String::new();
        for escape in memchr::memchr_iter(b'\\', bytes) {
            if escape < unescaped {
                continue;
            }
            if matches!(bytes.get(escape + 1), Some(b'\\' | b'"')) {
                decoded.push_str(&raw[head..escape]);
                head = escape + 1;
                unescaped = escape + 2;
            }
        }
        if head == 0 {
            Cow::Borrowed(raw)
        } else {
            decoded.push_str(&raw[head..]);
            Cow::Owned(decoded)
        }
    }

    /// Splits a line like `[White "Fischer, Robert J."]` into the trimmed
    /// name and the raw value between the first and the last quote.
    pub(crate) fn parse_line(line: &'a str) -> Result<(&'a str, RawTag<'a>), ParseError> {
        let malformed = || ParseError::MalformedTag {
            line: line.to_owned(),
        };

        let inner = line.strip_prefix('[').ok_or_else(malformed)?;
        let first = memchr::memchr(b'"', inner.as_bytes()).ok_or_else(malformed)?;
        let last = memchr::memrchr(b'"', inner.as_bytes()).ok_or_else(malformed)?;
        if first == last {
            return Err(malformed());
        }

        let name = inner[..first].trim();
        if name.is_empty() {
            return Err(malformed());
        }
        Ok((name, RawTag(&inner[first + 1..last])))
    }
}

impl fmt::Debug for RawTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.decode())
    }
}

/// Tags of a game, in the order they were first inserted.
///
/// # Examples
///
/// ```
/// use pgn_tree::Tags;
///
/// let mut tags = Tags::new();
/// tags.insert("White", "Morphy");
/// tags.insert("Black", "Duke Karl / Count Isouard");
/// tags.insert("White", "Paul Morphy");
///
/// assert_eq!(tags.get("White"), Some("Paul Morphy"));
/// assert_eq!(tags.keys().collect::<Vec<_>>(), ["White", "Black"]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tags {
    entries: Vec<(String, String)>,
}

impl Tags {
    pub fn new() -> Tags {
        Tags::default()
    }

    /// Sets a tag. Replacing an existing value keeps its position and
    /// returns the old value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => Some(std::mem::replace(old, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Parses and stores a tag line.
    pub(crate) fn push_line(&mut self, line: &str) -> Result<(), ParseError> {
        let (name, value) = RawTag::parse_line(line)?;
        self.insert(name, value.decode());
        Ok(())
    }
}
