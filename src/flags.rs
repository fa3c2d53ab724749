// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Flag letters and their meanings:
//
// - d  has indices
// - g  global
// - i  ignore case
// - m  multiline
// - s  dot all
// - u  unicode
// - v  unicode sets
// - y  sticky
//
// `u` and `v` are the two variants of the "extended mode" and
// can not be set at the same time.
//
// The canonical string form lists the letters in the order above,
// which is also the order used by `RegExp.prototype.flags`.

use std::{fmt::Display, str::FromStr};

use bitflags::bitflags;

use crate::error::Error;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        const HAS_INDICES = 1 << 0;
        const GLOBAL = 1 << 1;
        const IGNORE_CASE = 1 << 2;
        const MULTILINE = 1 << 3;
        const DOT_ALL = 1 << 4;
        const UNICODE = 1 << 5;
        const UNICODE_SETS = 1 << 6;
        const STICKY = 1 << 7;
    }
}

const FLAG_LETTERS: [(char, Flags); 8] = [
    ('d', Flags::HAS_INDICES),
    ('g', Flags::GLOBAL),
    ('i', Flags::IGNORE_CASE),
    ('m', Flags::MULTILINE),
    ('s', Flags::DOT_ALL),
    ('u', Flags::UNICODE),
    ('v', Flags::UNICODE_SETS),
    ('y', Flags::STICKY),
];

impl Flags {
    /// Parses a flags string, e.g. "gimsuy".
    ///
    /// Fails on unknown letters, duplicated letters and on
    /// the `u` + `v` combination. The order of letters is not significant.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let mut flags = Flags::empty();

        for ch in s.chars() {
            let flag = Flags::from_letter(ch).ok_or_else(|| Error::InvalidFlag {
                flags: s.to_owned(),
                flag: ch,
            })?;

            if flags.contains(flag) {
                return Err(Error::DuplicateFlag {
                    flags: s.to_owned(),
                    flag: ch,
                });
            }

            flags.insert(flag);
        }

        flags.validated()
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        FLAG_LETTERS
            .iter()
            .find(|(c, _)| *c == letter)
            .map(|(_, flag)| *flag)
    }

    /// Checks the invariant that at most one extended mode is enabled.
    pub fn validated(self) -> Result<Self, Error> {
        if self.contains(Flags::UNICODE | Flags::UNICODE_SETS) {
            Err(Error::ConflictingFlags(self.to_string()))
        } else {
            Ok(self)
        }
    }

    /// Whether the "extended mode" (`u` or `v`) is enabled.
    pub fn is_extended(&self) -> bool {
        self.intersects(Flags::UNICODE | Flags::UNICODE_SETS)
    }

    /// The slot of this flag set in a table with one entry
    /// for every possible combination.
    pub(crate) fn index(&self) -> usize {
        self.bits() as usize
    }
}

impl Display for Flags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (letter, flag) in FLAG_LETTERS.iter() {
            if self.contains(*flag) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Flags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flags::parse(s)
    }
}

/// The named-option alternative to a flags string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegexOptions {
    pub has_indices: bool,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub unicode_sets: bool,
    pub sticky: bool,
}

impl From<RegexOptions> for Flags {
    fn from(options: RegexOptions) -> Self {
        let pairs = [
            (options.has_indices, Flags::HAS_INDICES),
            (options.global, Flags::GLOBAL),
            (options.ignore_case, Flags::IGNORE_CASE),
            (options.multiline, Flags::MULTILINE),
            (options.dot_all, Flags::DOT_ALL),
            (options.unicode, Flags::UNICODE),
            (options.unicode_sets, Flags::UNICODE_SETS),
            (options.sticky, Flags::STICKY),
        ];

        pairs
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .fold(Flags::empty(), |acc, (_, flag)| acc | flag)
    }
}

/// Anything that can be resolved into a validated flag set:
/// a flags string, a `RegexOptions` record or a `Flags` value.
pub trait IntoFlags {
    fn into_flags(self) -> Result<Flags, Error>;
}

impl IntoFlags for Flags {
    fn into_flags(self) -> Result<Flags, Error> {
        self.validated()
    }
}

impl IntoFlags for RegexOptions {
    fn into_flags(self) -> Result<Flags, Error> {
        Flags::from(self).validated()
    }
}

impl IntoFlags for &str {
    fn into_flags(self) -> Result<Flags, Error> {
        Flags::parse(self)
    }
}

impl IntoFlags for String {
    fn into_flags(self) -> Result<Flags, Error> {
        Flags::parse(&self)
    }
}

impl IntoFlags for &String {
    fn into_flags(self) -> Result<Flags, Error> {
        Flags::parse(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::Error;

    use super::{Flags, IntoFlags, RegexOptions};

    #[test]
    fn test_parse_flags() {
        assert_eq!(Flags::parse("").unwrap(), Flags::empty());
        assert_eq!(Flags::parse("g").unwrap(), Flags::GLOBAL);
        assert_eq!(
            Flags::parse("im").unwrap(),
            Flags::IGNORE_CASE | Flags::MULTILINE
        );
        assert_eq!(
            Flags::parse("dgimsvy").unwrap(),
            Flags::all() - Flags::UNICODE
        );
    }

    #[test]
    fn test_canonical_flags_string() {
        assert_eq!(Flags::parse("gimsuy").unwrap().to_string(), "gimsuy");
        assert_eq!(Flags::parse("yusmig").unwrap().to_string(), "gimsuy");
        assert_eq!(Flags::parse("vd").unwrap().to_string(), "dv");
        assert_eq!(Flags::empty().to_string(), "");
    }

    #[test]
    fn test_reject_invalid_flags() {
        assert_eq!(
            Flags::parse("_"),
            Err(Error::InvalidFlag {
                flags: "_".to_owned(),
                flag: '_'
            })
        );

        // upper case letters are not flags
        assert!(matches!(
            Flags::parse("gI"),
            Err(Error::InvalidFlag { flag: 'I', .. })
        ));
    }

    #[test]
    fn test_reject_duplicate_flags() {
        assert_eq!(
            Flags::parse("gg"),
            Err(Error::DuplicateFlag {
                flags: "gg".to_owned(),
                flag: 'g'
            })
        );

        assert!(matches!(
            Flags::parse("gimg"),
            Err(Error::DuplicateFlag { flag: 'g', .. })
        ));
    }

    #[test]
    fn test_reject_conflicting_flags() {
        assert_eq!(
            Flags::parse("vu"),
            Err(Error::ConflictingFlags("uv".to_owned()))
        );

        assert!(RegexOptions {
            unicode: true,
            unicode_sets: true,
            ..Default::default()
        }
        .into_flags()
        .is_err());
    }

    #[test]
    fn test_options_to_flags() {
        assert_eq!(RegexOptions::default().into_flags().unwrap(), Flags::empty());

        let flags = RegexOptions {
            global: true,
            ignore_case: true,
            multiline: true,
            sticky: true,
            dot_all: true,
            unicode: true,
            ..Default::default()
        }
        .into_flags()
        .unwrap();
        assert_eq!(flags.to_string(), "gimsuy");

        let flags = RegexOptions {
            has_indices: true,
            unicode_sets: true,
            ..Default::default()
        }
        .into_flags()
        .unwrap();
        assert_eq!(flags.to_string(), "dv");
    }

    #[test]
    fn test_extended_mode() {
        assert!(!Flags::parse("gimsy").unwrap().is_extended());
        assert!(Flags::parse("u").unwrap().is_extended());
        assert!(Flags::parse("v").unwrap().is_extended());
    }
}
