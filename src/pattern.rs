// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{fmt::Display, ops::Range};

use tracing::{debug, trace};

use crate::{
    error::Error,
    flags::{Flags, IntoFlags},
    native::NativeRegex,
};

// The source of a pattern which matches the empty string,
// used in place of an empty source.
const EMPTY_SOURCE: &str = "(?:)";

/// A compiled regular expression together with its source and flags.
///
/// Two patterns are equal when both their sources and their flags are equal.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: Flags,
    native: NativeRegex,
}

impl Pattern {
    /// Compiles `source` as is, without any template processing.
    pub fn new(source: &str, flags: impl IntoFlags) -> Result<Self, Error> {
        let flags = flags.into_flags()?;

        let source = if source.is_empty() {
            EMPTY_SOURCE
        } else {
            source
        };

        let native = NativeRegex::new(source, flags).map_err(|e| {
            debug!(source, flags = %flags, error = %e, "pattern rejected by the regex engine");

            Error::Syntax {
                pattern: source.to_owned(),
                flags: flags.to_string(),
                message: e.into_message(),
            }
        })?;

        trace!(source, flags = %flags, "compiled pattern");

        Ok(Pattern {
            source: source.to_owned(),
            flags,
            native,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether the pattern matches somewhere in `text`,
    /// or at the start of `text` if the pattern is sticky.
    pub fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// Returns the first match, ignoring the global flag.
    pub fn find<'a>(&self, text: &'a str) -> Option<Match<'a>> {
        self.find_iter(text).next()
    }

    /// Iterates over successive non-overlapping matches, ignoring the global flag.
    ///
    /// A sticky pattern stops at the first position where
    /// no match starts exactly.
    pub fn find_iter<'a, 'b>(&'a self, text: &'b str) -> Matches<'a, 'b> {
        Matches::new(
            &self.native,
            text,
            self.flags.contains(Flags::STICKY),
        )
    }

    /// Returns every matched string if the pattern is global,
    /// otherwise at most the first one.
    pub fn matches<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let matches = self.find_iter(text).map(|m| m.as_str());

        if self.flags.contains(Flags::GLOBAL) {
            matches.collect()
        } else {
            matches.take(1).collect()
        }
    }

    /// Replaces every match if the pattern is global, otherwise only
    /// the first one. The replacement is inserted literally.
    pub fn replace(&self, text: &str, replacement: &str) -> String {
        let limit = if self.flags.contains(Flags::GLOBAL) {
            usize::MAX
        } else {
            1
        };

        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;

        for m in self.find_iter(text).take(limit) {
            result.push_str(&text[last_end..m.start]);
            result.push_str(replacement);
            last_end = m.end;
        }

        result.push_str(&text[last_end..]);
        result
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for Pattern {}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

pub struct Matches<'a, 'b> {
    native: &'a NativeRegex,
    text: &'b str,
    sticky: bool,
    last_position: Option<usize>,
}

impl<'a, 'b> Matches<'a, 'b> {
    fn new(native: &'a NativeRegex, text: &'b str, sticky: bool) -> Self {
        Matches {
            native,
            text,
            sticky,
            last_position: Some(0),
        }
    }
}

impl<'b> Iterator for Matches<'_, 'b> {
    type Item = Match<'b>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.last_position?;

        let found = self
            .native
            .find_from(self.text, position)
            .filter(|range| !self.sticky || range.start == position);

        let Some(range) = found else {
            self.last_position = None;
            return None;
        };

        // an empty match moves on by one character
        self.last_position = if range.is_empty() {
            self.text[range.end..]
                .chars()
                .next()
                .map(|ch| range.end + ch.len_utf8())
        } else {
            Some(range.end)
        };

        Some(Match::new(
            range.start,
            range.end,
            &self.text[range.start..range.end],
        ))
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Match<'a> {
    pub start: usize, // byte position in the text (value included)
    pub end: usize,   // byte position in the text (value excluded)
    pub value: &'a str,
}

impl<'a> Match<'a> {
    pub fn new(start: usize, end: usize, value: &'a str) -> Self {
        Match { start, end, value }
    }

    // the following methods are intended to
    // be compatible with the 'Match' API of crate 'regex':
    // https://docs.rs/regex/latest/regex/struct.Match.html

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn as_str(&self) -> &'a str {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{error::Error, flags::Flags};

    use super::{Match, Pattern};

    #[test]
    fn test_new_pattern() {
        let re = Pattern::new(r"a\.b", "gi").unwrap();
        assert_eq!(re.source(), r"a\.b");
        assert_eq!(re.flags(), Flags::GLOBAL | Flags::IGNORE_CASE);
        assert_eq!(re.to_string(), r"/a\.b/gi");

        // the canonical flag order
        assert_eq!(Pattern::new("a", "yg").unwrap().to_string(), "/a/gy");

        // empty source
        let re = Pattern::new("", "").unwrap();
        assert_eq!(re.source(), "(?:)");
        assert!(re.is_match(""));
    }

    #[test]
    fn test_new_pattern_error() {
        assert!(matches!(
            Pattern::new("[", ""),
            Err(Error::Syntax { .. })
        ));

        assert!(matches!(
            Pattern::new("a", "_"),
            Err(Error::InvalidFlag { flag: '_', .. })
        ));

        assert!(matches!(
            Pattern::new("a", "gg"),
            Err(Error::DuplicateFlag { flag: 'g', .. })
        ));

        assert!(Pattern::new("[", "").unwrap_err().is_syntax_error());
    }

    #[test]
    fn test_equality() {
        assert_eq!(Pattern::new("a", "gi").unwrap(), Pattern::new("a", "ig").unwrap());
        assert_ne!(Pattern::new("a", "g").unwrap(), Pattern::new("a", "").unwrap());
        assert_ne!(Pattern::new("a", "").unwrap(), Pattern::new("(?:a)", "").unwrap());
    }

    #[test]
    fn test_find() {
        let re = Pattern::new("an", "").unwrap();

        assert_eq!(re.find("banana"), Some(Match::new(1, 3, "an")));
        assert_eq!(
            re.find_iter("banana").map(|m| m.range()).collect::<Vec<_>>(),
            vec![1..3, 3..5]
        );
        assert_eq!(re.find("apple"), None);
    }

    #[test]
    fn test_find_empty_matches() {
        let re = Pattern::new("x*", "").unwrap();

        assert_eq!(
            re.find_iter("axé").map(|m| m.range()).collect::<Vec<_>>(),
            vec![0..0, 1..2, 2..2, 4..4]
        );
    }

    #[test]
    fn test_sticky() {
        let re = Pattern::new("a", "gy").unwrap();
        assert_eq!(re.matches("aab"), vec!["a", "a"]);
        assert_eq!(re.matches("baa"), Vec::<&str>::new());
        assert!(!re.is_match("ba"));

        let re = Pattern::new("a", "g").unwrap();
        assert_eq!(re.matches("baa"), vec!["a", "a"]);
    }

    #[test]
    fn test_matches() {
        let text = "a1b22c333";

        let re = Pattern::new(r"\d+", "g").unwrap();
        assert_eq!(re.matches(text), vec!["1", "22", "333"]);

        let re = Pattern::new(r"\d+", "").unwrap();
        assert_eq!(re.matches(text), vec!["1"]);
    }

    #[test]
    fn test_replace() {
        let re = Pattern::new(r"\.", "g").unwrap();
        assert_eq!(re.replace("a.b.c", "$&"), "a$&b$&c");

        let re = Pattern::new(r"\.", "").unwrap();
        assert_eq!(re.replace("a.b.c", "-"), "a-b.c");

        let re = Pattern::new("x", "g").unwrap();
        assert_eq!(re.replace("abc", "-"), "abc");
    }

    #[test]
    fn test_ignore_case() {
        let re = Pattern::new("abc", "i").unwrap();
        assert!(re.is_match("xABCx"));
        assert!(!Pattern::new("abc", "").unwrap().is_match("xABCx"));
    }
}
