// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Per-flag-set escaping table for the ASCII characters.
//
// The escape form of each character is discovered by probing the regex
// engine with trial patterns rather than hard-coded, because the set of
// characters which are allowed unescaped (or allowed to be escaped with a
// single backslash) differs between the basic mode and the two extended
// modes (`u` and `v`).
//
// For every character three candidate forms are tried, shortest first:
//
// - the bare character, e.g. `a`
// - the identity escape, e.g. `\.`
// - the two-digit hex escape, e.g. `\x2e`, which is always valid
//
// A form is accepted in a context only if every trial pattern compiles and
// matches exactly the expected set of ASCII characters.

use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, trace};

use crate::{flags::Flags, native::NativeRegex};

pub const ASCII_COUNT: usize = 0x80;

// Meta characters `( ) { } [ ] + * ? . | ^ $ \` must be escaped when used
// as literal characters outside a character class. Probing alone can not
// tell e.g. a literal `{` from the start of a `{m,n}` repetition.
const META_CHARS: [char; 14] = [
    '(', ')', '{', '}', '[', ']', '+', '*', '?', '.', '|', '^', '$', '\\',
];

static ESCAPE_TABLES: Lazy<Vec<OnceCell<EscapeTable>>> =
    Lazy::new(|| (0..=u8::MAX).map(|_| OnceCell::new()).collect());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapedForms {
    pub in_class: String,
    pub outside_class: String,
    /// The form valid both inside and outside a character class.
    pub agnostic: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeTable {
    entries: Vec<Option<EscapedForms>>,
}

impl EscapeTable {
    /// Returns `None` for characters that need no escaping in any context
    /// and for non-ASCII characters.
    pub fn get(&self, ch: char) -> Option<&EscapedForms> {
        self.entries
            .get(ch as usize)
            .and_then(|entry| entry.as_ref())
    }

    pub fn agnostic(&self, ch: char) -> Option<&str> {
        self.get(ch).map(|forms| forms.agnostic.as_str())
    }

    /// The characters which have an entry in the table, in code point order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_some())
            .map(|(idx, _)| idx as u8 as char)
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the escape table of the given flag set, building it on first use.
///
/// Tables live for the rest of the process. There is one slot per flag
/// combination, so the cache never grows beyond 256 tables. Concurrent
/// first calls wait for a single build.
pub fn get_escape_table(flags: Flags) -> &'static EscapeTable {
    let slot = &ESCAPE_TABLES[flags.index()];

    if let Some(table) = slot.get() {
        trace!(flags = %flags, "escape table cache hit");
        return table;
    }

    slot.get_or_init(|| build_escape_table(flags))
}

fn build_escape_table(flags: Flags) -> EscapeTable {
    // case-insensitivity does not change which forms are valid,
    // but it does make e.g. `[a]` match 'A'.
    let probe_flags = flags - Flags::IGNORE_CASE;
    let prober = Prober::new(probe_flags);

    let entries: Vec<Option<EscapedForms>> = (0..ASCII_COUNT)
        .map(|code| {
            let ch = code as u8 as char;
            let forms = prober.escaped_forms(ch);

            let bare = ch.to_string();
            if forms.in_class == bare && forms.outside_class == bare {
                None
            } else {
                Some(forms)
            }
        })
        .collect();

    let table = EscapeTable { entries };

    debug!(
        flags = %flags,
        probe_flags = %probe_flags,
        entries = table.len(),
        "built escape table"
    );

    table
}

struct Prober {
    flags: Flags,
    samples: Vec<(char, String)>,
}

impl Prober {
    fn new(flags: Flags) -> Self {
        let samples = (0..ASCII_COUNT)
            .map(|code| {
                let ch = code as u8 as char;
                (ch, ch.to_string())
            })
            .collect();

        Self { flags, samples }
    }

    fn escaped_forms(&self, ch: char) -> EscapedForms {
        let candidates = candidate_forms(ch);

        let in_class = candidates
            .iter()
            .find(|form| self.is_valid_in_class(ch, form))
            .cloned()
            .unwrap_or_else(|| hex_escape(ch));

        let outside_class = candidates
            .iter()
            .find(|form| self.is_valid_outside_class(ch, form))
            .cloned()
            .unwrap_or_else(|| hex_escape(ch));

        let agnostic = if in_class == outside_class {
            in_class.clone()
        } else {
            candidates
                .iter()
                .find(|form| {
                    self.is_valid_in_class(ch, form) && self.is_valid_outside_class(ch, form)
                })
                .cloned()
                .unwrap_or_else(|| hex_escape(ch))
        };

        EscapedForms {
            in_class,
            outside_class,
            agnostic,
        }
    }

    fn is_valid_in_class(&self, ch: char, form: &str) -> bool {
        // `[ff]` catches the doubled punctuators reserved by the `v` mode,
        // `[\x00f\x00]` catches forms that turn into a range (e.g. a bare `-`).
        self.matches_exactly(&format!("[{}]", form), &[ch])
            && self.matches_exactly(&format!("[{}{}]", form, form), &[ch])
            && self.matches_exactly(&format!(r"[\x00{}\x00]", form), &[ch, '\0'])
    }

    fn is_valid_outside_class(&self, ch: char, form: &str) -> bool {
        if form.len() == 1 && META_CHARS.contains(&ch) {
            return false;
        }

        self.matches_exactly(&format!("^{}$", form), &[ch])
    }

    /// Checks that the trial pattern compiles, and that it matches each
    /// single-character ASCII string if and only if the character is expected.
    fn matches_exactly(&self, source: &str, expected: &[char]) -> bool {
        let Ok(re) = NativeRegex::new(source, self.flags) else {
            return false;
        };

        self.samples
            .iter()
            .all(|(ch, text)| re.is_match(text) == expected.contains(ch))
    }
}

fn candidate_forms(ch: char) -> [String; 3] {
    [ch.to_string(), format!("\\{}", ch), hex_escape(ch)]
}

fn hex_escape(ch: char) -> String {
    format!("\\x{:02x}", ch as u32)
}
