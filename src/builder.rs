// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use tracing::debug;

use crate::{
    error::Error,
    flags::{Flags, IntoFlags},
    pattern::Pattern,
    substitution::Fragment,
    template::Template,
};

/// Builds patterns from templates, all with the same flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builder {
    flags: Flags,
}

impl Builder {
    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn build(&self, template: &Template) -> Result<Pattern, Error> {
        let source = template.to_source(self.flags);

        debug!(
            segments = template.segments().len(),
            source = %source,
            flags = %self.flags,
            "assembled pattern source"
        );

        Pattern::new(&source, self.flags)
    }
}

/// Returns a builder bound to the given flags.
///
/// The flags are validated here, before any template is processed.
///
/// ```rust
/// use regex_fancy::{regex, template};
///
/// let re = regex("gi")
///     .unwrap()
///     .build(&template![r"hello , \  world  # matches 'hello, world'"])
///     .unwrap();
///
/// assert_eq!(re.to_string(), "/hello, world/gi");
/// ```
pub fn regex(flags: impl IntoFlags) -> Result<Builder, Error> {
    let flags = flags.into_flags()?;
    Ok(Builder { flags })
}

/// Builds a pattern without flags.
pub fn build(template: &Template) -> Result<Pattern, Error> {
    Builder {
        flags: Flags::empty(),
    }
    .build(template)
}

/// Builds a pattern which matches `input` literally.
pub fn exact(input: &str, flags: impl IntoFlags) -> Result<Pattern, Error> {
    regex(flags)?.build(&Template::new("").interpolate(input, ""))
}

/// Removes a leading `^` and a trailing `$` from the pattern source,
/// keeping the flags of the pattern.
pub fn unwrap(pattern: &Pattern) -> Result<Pattern, Error> {
    unwrap_with(pattern, pattern.flags())
}

/// Removes a leading `^` and a trailing `$` from the pattern source,
/// and rebuilds it with the given flags.
///
/// Only one anchor is removed from each end, so wrapping the result
/// in `^...$` again yields the original pattern. A trailing `\$` is
/// a literal dollar sign and is kept.
///
/// Two sources are not restored by re-wrapping: `^^a` loses only one
/// `^` per call, and `^$` unwraps to the empty pattern `(?:)`, which
/// wraps back into `^(?:)$`.
pub fn unwrap_with(pattern: &Pattern, flags: impl IntoFlags) -> Result<Pattern, Error> {
    let interior = strip_anchors(pattern.source());
    regex(flags)?.build(&Template::new("").interpolate(Fragment::new(interior), ""))
}

fn strip_anchors(source: &str) -> &str {
    let inner = source.strip_prefix('^').unwrap_or(source);

    match inner.strip_suffix('$') {
        Some(rest) if trailing_backslashes(rest) % 2 == 0 => rest,
        _ => inner,
    }
}

fn trailing_backslashes(s: &str) -> usize {
    s.chars().rev().take_while(|c| *c == '\\').count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        error::Error,
        flags::{Flags, RegexOptions},
        pattern::Pattern,
        template,
        template::Template,
    };

    use super::{build, exact, regex, strip_anchors, unwrap, unwrap_with};

    #[test]
    fn test_build_without_flags() {
        let re = build(&template!["^ a . b $"]).unwrap();
        assert_eq!(re, Pattern::new("^a.b$", "").unwrap());

        let re = build(&Template::from("")).unwrap();
        assert_eq!(re.source(), "(?:)");
    }

    #[test]
    fn test_build_with_flags() {
        let builder = regex("ig").unwrap();
        assert_eq!(builder.flags().to_string(), "gi");

        let re = builder.build(&template!["a"]).unwrap();
        assert_eq!(re.to_string(), "/a/gi");

        let re = regex(RegexOptions {
            multiline: true,
            sticky: true,
            ..Default::default()
        })
        .unwrap()
        .build(&template!["a"])
        .unwrap();
        assert_eq!(re.to_string(), "/a/my");
    }

    #[test]
    fn test_invalid_flags() {
        assert!(matches!(regex("_"), Err(Error::InvalidFlag { .. })));
        assert!(matches!(regex("gg"), Err(Error::DuplicateFlag { .. })));
        assert!(matches!(regex("uv"), Err(Error::ConflictingFlags(_))));
    }

    #[test]
    fn test_invalid_source() {
        let result = build(&template!["["]);
        assert!(matches!(result, Err(Error::Syntax { .. })));

        // interpolated strings are escaped, so they can not break the pattern
        assert!(build(&template!["", "[", ""]).is_ok());
    }

    #[test]
    fn test_exact() {
        let text = "a.b*c";

        let re = exact(".", "g").unwrap();
        assert_eq!(re.matches(text), vec!["."]);
        assert_eq!(re.replace("a.b.c", "-"), "a-b-c");

        let re = exact("A.B", "i").unwrap();
        assert!(re.is_match("xa.bx"));
        assert!(!re.is_match("xaxbx"));

        let re = exact("$()*+-.?[\\]^{|}", Flags::UNICODE).unwrap();
        assert!(re.is_match("$()*+-.?[\\]^{|}"));
    }

    #[test]
    fn test_strip_anchors() {
        assert_eq!(strip_anchors("^.$"), ".");
        assert_eq!(strip_anchors("^."), ".");
        assert_eq!(strip_anchors(".$"), ".");
        assert_eq!(strip_anchors("."), ".");
        assert_eq!(strip_anchors("^^a$$"), "^a$");
        assert_eq!(strip_anchors(r"^a\$"), r"a\$");
        assert_eq!(strip_anchors(r"^a\\$"), r"a\\");
    }

    #[test]
    fn test_unwrap() {
        let re = Pattern::new("^.$", "").unwrap();
        assert_eq!(unwrap(&re).unwrap(), Pattern::new(".", "").unwrap());

        // no-op on an unwrapped pattern
        let re = Pattern::new(".", "").unwrap();
        assert_eq!(unwrap(&re).unwrap(), re);

        // idempotent
        let re = Pattern::new("^.$", "").unwrap();
        let once = unwrap(&re).unwrap();
        let twice = unwrap(&unwrap(&once).unwrap()).unwrap();
        assert_eq!(once, twice);

        // reversible
        let wrapped = build(&template!["^", unwrap(&re).unwrap(), "$"]).unwrap();
        assert_eq!(wrapped, re);
    }

    #[test]
    fn test_unwrap_flags() {
        let re = Pattern::new("^.$", "gimsuy").unwrap();
        assert_eq!(unwrap(&re).unwrap(), Pattern::new(".", "gimsuy").unwrap());

        let re = Pattern::new("^.$", "gim").unwrap();
        assert_eq!(
            unwrap_with(&re, "suy").unwrap(),
            Pattern::new(".", "suy").unwrap()
        );

        let options = RegexOptions {
            dot_all: true,
            unicode: true,
            sticky: true,
            ..Default::default()
        };
        assert_eq!(
            unwrap_with(&re, options).unwrap(),
            Pattern::new(".", "suy").unwrap()
        );

        let re = Pattern::new("^[0-9a-f]$", "i").unwrap();
        assert_eq!(unwrap(&re).unwrap().to_string(), "/[0-9a-f]/i");
    }

    #[test]
    fn test_unwrap_empty_interior() {
        let re = Pattern::new("^$", "").unwrap();
        let unwrapped = unwrap(&re).unwrap();
        assert_eq!(unwrapped.source(), "(?:)");

        let wrapped = build(&template!["^", &unwrapped, "$"]).unwrap();
        assert_eq!(wrapped.source(), "^(?:)$");
        assert_ne!(wrapped, re);

        // both match the empty string only
        assert!(wrapped.is_match(""));
        assert!(!wrapped.is_match("a"));
    }
}
