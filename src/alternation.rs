// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::cmp::Reverse;

use tracing::trace;

use crate::{commentremover::is_line_terminator, flags::Flags, substitution::Alternation};

/// Renders the items of an alternation as `(?:branch|branch|...)`.
///
/// Absent items (and `false`) are dropped, duplicated branches keep only
/// their first occurrence, and the branches are stably sorted by
/// their approximate length.
pub(crate) fn build_alternation(alternation: &Alternation, flags: Flags) -> String {
    let mut branches: Vec<String> = vec![];

    for item in alternation.items.iter().filter(|item| !item.is_absent()) {
        let branch = item.render(flags);
        if !branches.contains(&branch) {
            branches.push(branch);
        }
    }

    if alternation.lazy {
        branches.sort_by_key(|branch| pattern_length(branch));
    } else {
        branches.sort_by_key(|branch| Reverse(pattern_length(branch)));
    }

    trace!(
        branches = branches.len(),
        lazy = alternation.lazy,
        "built alternation"
    );

    format!("(?:{})", branches.join("|"))
}

/// The approximate number of characters matched by a piece of regex source.
///
/// Each escape sequence counts as a single character:
///
/// - `\p{...}` and other `\w{...}` forms
/// - `\uHHHH` and `\xHH`
/// - three-digit octal, e.g. `\101`
/// - `\cX`
/// - any other backslash followed by a character which
///   is not a line terminator
///
/// Quantifiers, groups and character classes are not interpreted,
/// so `a+` has length 2.
pub(crate) fn pattern_length(source: &str) -> usize {
    let chars: Vec<char> = source.chars().collect();

    let mut length = 0;
    let mut idx = 0;

    while idx < chars.len() {
        if chars[idx] == '\\' {
            idx += 1 + escape_width(&chars[idx + 1..]);
        } else {
            idx += 1;
        }
        length += 1;
    }

    length
}

// Returns the number of characters following a backslash which
// belong to the same escape sequence.
fn escape_width(rest: &[char]) -> usize {
    let Some(&first) = rest.first() else {
        return 0;
    };

    if is_word_char(first) && rest.get(1) == Some(&'{') {
        if let Some(close) = rest[2..].iter().position(|c| *c == '}') {
            if close > 0 {
                return close + 3;
            }
        }
    }

    let hex_digits = |from: usize, count: usize| {
        rest.len() >= from + count
            && rest[from..from + count]
                .iter()
                .all(|c| c.is_ascii_hexdigit())
    };

    if first.eq_ignore_ascii_case(&'u') && hex_digits(1, 4) {
        return 5;
    }

    if first.eq_ignore_ascii_case(&'x') && hex_digits(1, 2) {
        return 3;
    }

    if rest.len() >= 3 && rest[..3].iter().all(|c| ('0'..='8').contains(c)) {
        return 3;
    }

    if first.eq_ignore_ascii_case(&'c') && rest.get(1).is_some_and(|c| c.is_ascii_alphabetic()) {
        return 2;
    }

    if is_line_terminator(first) {
        0
    } else {
        1
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
