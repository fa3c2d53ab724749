// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Thin adapter over the ECMAScript regex engine (crate `regress`).
//
// Only the flags understood by the engine are passed through:
// `i`, `m`, `s`, `u` and `v`. The remaining flags (`d`, `g` and `y`)
// describe how a pattern is used rather than what it matches,
// they are handled by `Pattern`.

use std::{fmt, ops::Range, sync::Arc};

use crate::flags::Flags;

const ENGINE_FLAGS: [(char, Flags); 5] = [
    ('i', Flags::IGNORE_CASE),
    ('m', Flags::MULTILINE),
    ('s', Flags::DOT_ALL),
    ('u', Flags::UNICODE),
    ('v', Flags::UNICODE_SETS),
];

#[derive(Debug, Clone)]
pub(crate) struct NativeRegex {
    backend: Arc<regress::Regex>,
}

impl NativeRegex {
    pub(crate) fn new(source: &str, flags: Flags) -> Result<Self, NativeError> {
        let engine_flags = engine_flags(flags);
        let backend = regress::Regex::with_flags(source, engine_flags.as_str())
            .map_err(NativeError::from)?;
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.backend.find(text).is_some()
    }

    /// Returns the byte range of the first match that starts
    /// at or after `start`.
    pub(crate) fn find_from(&self, text: &str, start: usize) -> Option<Range<usize>> {
        self.backend
            .find_from(text, start)
            .next()
            .map(|matched| matched.range())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NativeError {
    message: String,
}

impl NativeError {
    pub(crate) fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NativeError {}

impl From<regress::Error> for NativeError {
    fn from(value: regress::Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

fn engine_flags(flags: Flags) -> String {
    ENGINE_FLAGS
        .iter()
        .filter(|(_, flag)| flags.contains(*flag))
        .map(|(letter, _)| *letter)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::flags::Flags;

    use super::{engine_flags, NativeRegex};

    #[test]
    fn test_engine_flags() {
        assert_eq!(engine_flags(Flags::parse("dgimsuy").unwrap()), "imsu");
        assert_eq!(engine_flags(Flags::parse("gv").unwrap()), "v");
        assert_eq!(engine_flags(Flags::empty()), "");
    }

    #[test]
    fn test_compile_and_match() {
        let re = NativeRegex::new(r"\d{4}", Flags::empty()).unwrap();
        assert!(re.is_match("2024-01"));
        assert!(!re.is_match("24-01"));

        let re = NativeRegex::new("abc", Flags::IGNORE_CASE).unwrap();
        assert!(re.is_match("xABCx"));
    }

    #[test]
    fn test_compile_error() {
        assert!(NativeRegex::new("[", Flags::empty()).is_err());
        assert!(NativeRegex::new("(", Flags::UNICODE).is_err());
        assert!(NativeRegex::new("a)", Flags::empty()).is_err());
        assert!(NativeRegex::new("(?:)", Flags::empty()).is_ok());
    }

    #[test]
    fn test_find_from() {
        let re = NativeRegex::new("a", Flags::empty()).unwrap();
        assert_eq!(re.find_from("banana", 0), Some(1..2));
        assert_eq!(re.find_from("banana", 2), Some(3..4));
        assert_eq!(re.find_from("banana", 6), None);
    }
}
