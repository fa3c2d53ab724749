// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

/// Removes the comments from a template segment.
///
/// A comment starts at a `#` and runs to the end of the line, the line
/// terminator itself is kept. A `#` preceded by an odd number of
/// backslashes is a literal `#` instead, and the last backslash of that
/// run is consumed as the escape character, e.g.
///
/// - `a\#b` becomes `a#b`
/// - `a\\#b` becomes `a\\`
/// - `a\\\#b` becomes `a\\#b`
///
/// Every `#` on a line is checked on its own, so `a\#b#c` becomes `a#b`.
pub fn clean(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len());
    let mut backslashes: usize = 0;
    let mut chars = segment.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                backslashes += 1;
                result.push(ch);
            }
            '#' if backslashes % 2 == 1 => {
                result.pop();
                result.push('#');
                backslashes = 0;
            }
            '#' => {
                for next in chars.by_ref() {
                    if is_line_terminator(next) {
                        result.push(next);
                        break;
                    }
                }
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

pub(crate) fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
