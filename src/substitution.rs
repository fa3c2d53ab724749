// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

use crate::{
    alternation::build_alternation,
    escaper::{escape_str, reescape},
    flags::Flags,
    pattern::Pattern,
};

/// A piece of regex source which is inserted verbatim, without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Fragment {
    source: String,
}

impl Fragment {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn into_string(self) -> String {
        self.source
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// A list of values rendered as a non-capturing group of branches.
///
/// Branches are ordered longest first, so that a shorter branch which is
/// a prefix of a longer one can not shadow it. A lazy alternation orders
/// them shortest first instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternation {
    pub items: Vec<Substitution>,
    pub lazy: bool,
}

impl Alternation {
    pub fn new<T: Into<Substitution>>(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().map(|item| item.into()).collect(),
            lazy: false,
        }
    }

    pub fn lazy<T: Into<Substitution>>(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().map(|item| item.into()).collect(),
            lazy: true,
        }
    }
}

/// A value interpolated between two template segments.
#[derive(Debug, Clone, PartialEq)]
pub enum Substitution {
    /// Inserted verbatim.
    Fragment(Fragment),

    /// Always escaped, so it matches literally.
    Text(String),

    /// A compiled pattern, only its source is used.
    Pattern(Pattern),

    Alternation(Alternation),
    Integer(i128),
    Float(f64),

    /// `true` renders as the text "true", `false` renders as nothing.
    Bool(bool),

    /// Renders as nothing, and is dropped from alternations.
    Absent,
}

impl Substitution {
    /// Whether this value is dropped from an alternation.
    pub fn is_absent(&self) -> bool {
        matches!(self, Substitution::Absent | Substitution::Bool(false))
    }

    /// Renders this value into regex source suitable for a pattern
    /// compiled with `flags`.
    pub fn render(&self, flags: Flags) -> String {
        match self {
            Substitution::Fragment(fragment) => fragment.as_str().to_owned(),
            Substitution::Text(text) => escape_str(text, flags),
            Substitution::Pattern(pattern) => {
                if pattern.flags() == flags {
                    pattern.source().to_owned()
                } else {
                    reescape(pattern.source(), pattern.flags(), flags)
                }
            }
            Substitution::Alternation(alternation) => build_alternation(alternation, flags),
            Substitution::Integer(value) => value.to_string(),
            Substitution::Float(value) => number_to_string(*value),
            Substitution::Bool(true) => "true".to_owned(),
            Substitution::Bool(false) | Substitution::Absent => String::new(),
        }
    }
}

/// Formats a number the way the ECMAScript `Number::toString` does.
pub(crate) fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }

    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    if value == 0.0 {
        // also covers `-0`
        return "0".to_owned();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // Rust prints the shortest round-trip digits, without an exponent
        return value.to_string();
    }

    // e.g. "1e21" becomes "1e+21"
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

impl From<Fragment> for Substitution {
    fn from(value: Fragment) -> Self {
        Substitution::Fragment(value)
    }
}

impl From<&str> for Substitution {
    fn from(value: &str) -> Self {
        Substitution::Text(value.to_owned())
    }
}

impl From<String> for Substitution {
    fn from(value: String) -> Self {
        Substitution::Text(value)
    }
}

impl From<&String> for Substitution {
    fn from(value: &String) -> Self {
        Substitution::Text(value.clone())
    }
}

impl From<char> for Substitution {
    fn from(value: char) -> Self {
        Substitution::Text(value.to_string())
    }
}

impl From<Pattern> for Substitution {
    fn from(value: Pattern) -> Self {
        Substitution::Pattern(value)
    }
}

impl From<&Pattern> for Substitution {
    fn from(value: &Pattern) -> Self {
        Substitution::Pattern(value.clone())
    }
}

impl From<Alternation> for Substitution {
    fn from(value: Alternation) -> Self {
        Substitution::Alternation(value)
    }
}

impl From<bool> for Substitution {
    fn from(value: bool) -> Self {
        Substitution::Bool(value)
    }
}

impl From<f64> for Substitution {
    fn from(value: f64) -> Self {
        Substitution::Float(value)
    }
}

impl From<f32> for Substitution {
    fn from(value: f32) -> Self {
        Substitution::Float(value as f64)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Substitution {
                fn from(value: $t) -> Self {
                    Substitution::Integer(value as i128)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl<T: Into<Substitution>> From<Vec<T>> for Substitution {
    fn from(value: Vec<T>) -> Self {
        Substitution::Alternation(Alternation::new(value))
    }
}

impl<T: Into<Substitution>> From<Option<T>> for Substitution {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Substitution::Absent,
        }
    }
}
