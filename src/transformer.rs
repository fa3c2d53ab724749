// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Turns the literal segments of a template into regex source.
//
// Each segment goes through three passes, in this order:
//
// 1. comments are removed (see `commentremover`)
// 2. an escaped backtick becomes a literal backtick
// 3. whitespace runs are removed, unless escaped
//
// The substitution following each segment is then rendered for the
// target flag set and appended as-is, so none of the passes apply to it.

use crate::{commentremover, flags::Flags, substitution::Substitution};

/// Assembles the final pattern source.
///
/// `substitutions` holds the values between the segments,
/// so it is expected to have one item less than `segments`.
pub fn build_source<S: AsRef<str>>(
    segments: &[S],
    substitutions: &[Substitution],
    flags: Flags,
) -> String {
    let mut source = String::new();

    for (idx, segment) in segments.iter().enumerate() {
        source.push_str(&transform_segment(segment.as_ref()));

        if let Some(substitution) = substitutions.get(idx) {
            source.push_str(&substitution.render(flags));
        }
    }

    source
}

pub fn transform_segment(segment: &str) -> String {
    let without_comments = commentremover::clean(segment);
    let unescaped = unescape_backticks(&without_comments);
    collapse_whitespace(&unescaped)
}

// "\`" becomes "`".
//
// Only a backslash which is itself unescaped is consumed, so "\\`" is kept.
// An escaped `${` is left untouched, the backslash keeps the `$` literal.
fn unescape_backticks(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len());
    let mut backslashes: usize = 0;

    for ch in segment.chars() {
        match ch {
            '\\' => {
                backslashes += 1;
                result.push(ch);
            }
            '`' if backslashes % 2 == 1 => {
                result.pop();
                result.push(ch);
                backslashes = 0;
            }
            _ => {
                result.push(ch);
                backslashes = 0;
            }
        }
    }

    result
}

// Removes every run of whitespace.
//
// A run preceded by an odd number of backslashes is escaped instead:
// the escape character is consumed and the first character of the run
// is kept, e.g. "a\  b" becomes "a b".
fn collapse_whitespace(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len());
    let mut backslashes: usize = 0;
    let mut chars = segment.chars().peekable();

    while let Some(ch) = chars.next() {
        if is_whitespace(ch) {
            if backslashes % 2 == 1 {
                result.pop();
                result.push(ch);
            }

            while chars.next_if(|next| is_whitespace(*next)).is_some() {
                // skip the rest of the run
            }

            backslashes = 0;
            continue;
        }

        if ch == '\\' {
            backslashes += 1;
        } else {
            backslashes = 0;
        }
        result.push(ch);
    }

    result
}

/// The characters of the regex class `\s`.
pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{0b}'
            | '\u{0c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}
