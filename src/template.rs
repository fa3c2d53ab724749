// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{error::Error, flags::Flags, substitution::Substitution, transformer::build_source};

/// Literal segments interleaved with interpolated values.
///
/// There is always one segment more than there are substitutions:
///
/// ```text
/// segment, substitution, segment, substitution, ..., segment
/// ```
///
/// A template is usually written with the `template!` macro:
///
/// ```rust
/// use regex_fancy::{template, Template};
///
/// let word = "foo.bar";
/// let t = template!["^ ", word, " $  # a comment"];
///
/// assert_eq!(t, Template::new("^ ").interpolate(word, " $  # a comment"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<String>,
    substitutions: Vec<Substitution>,
}

impl Template {
    pub fn new(first_segment: impl Into<String>) -> Self {
        Self {
            segments: vec![first_segment.into()],
            substitutions: vec![],
        }
    }

    /// Appends a value followed by the next literal segment.
    pub fn interpolate(
        mut self,
        substitution: impl Into<Substitution>,
        next_segment: impl Into<String>,
    ) -> Self {
        self.substitutions.push(substitution.into());
        self.segments.push(next_segment.into());
        self
    }

    /// Builds a template from separately collected parts.
    ///
    /// Fails unless there is exactly one substitution less than segments.
    pub fn from_parts<S: Into<String>>(
        segments: Vec<S>,
        substitutions: Vec<Substitution>,
    ) -> Result<Self, Error> {
        if segments.is_empty() || substitutions.len() + 1 != segments.len() {
            return Err(Error::TemplateArity {
                segments: segments.len(),
                substitutions: substitutions.len(),
            });
        }

        Ok(Self {
            segments: segments.into_iter().map(|s| s.into()).collect(),
            substitutions,
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    /// Assembles the regex source for a pattern compiled with `flags`.
    pub fn to_source(&self, flags: Flags) -> String {
        build_source(&self.segments, &self.substitutions, flags)
    }
}

impl From<&str> for Template {
    fn from(value: &str) -> Self {
        Template::new(value)
    }
}

impl From<String> for Template {
    fn from(value: String) -> Self {
        Template::new(value)
    }
}

/// Creates a `Template` from alternating segments and values.
///
/// The items at even positions are the literal segments, the items at
/// odd positions are the interpolated values, so the number of items
/// is always odd.
///
/// ```rust
/// use regex_fancy::{build, template};
///
/// let re = build(&template!["^", "a.b", "$"]).unwrap();
/// assert_eq!(re.source(), r"^a\.b$");
/// ```
#[macro_export]
macro_rules! template {
    ($first:expr $(, $substitution:expr, $segment:expr)*) => {
        $crate::Template::new($first)$(.interpolate($substitution, $segment))*
    };
}
