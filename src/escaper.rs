// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    error::Error,
    escapetable::{get_escape_table, EscapeTable, ASCII_COUNT},
    flags::{Flags, IntoFlags},
    substitution::Fragment,
};

/// Escapes `input` so that it matches literally, both when inserted
/// outside a character class and when inserted inside one.
pub fn escape(input: &str, flags: impl IntoFlags) -> Result<Fragment, Error> {
    let flags = flags.into_flags()?;
    Ok(Fragment::new(escape_str(input, flags)))
}

pub(crate) fn escape_str(input: &str, flags: Flags) -> String {
    let table = get_escape_table(flags);

    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match table.agnostic(ch) {
            Some(form) => escaped.push_str(form),
            None => escaped.push(ch),
        }
    }
    escaped
}

/// A character whose context-agnostic form differs between two flag sets.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DiffEntry {
    pub from: String,
    pub to: String,
}

impl DiffEntry {
    fn is_bare(&self) -> bool {
        !self.from.starts_with('\\')
    }
}

pub(crate) fn escape_diff(from: Flags, to: Flags) -> Vec<DiffEntry> {
    if from == to {
        return vec![];
    }

    let from_table = get_escape_table(from);
    let to_table = get_escape_table(to);

    (0..ASCII_COUNT)
        .map(|code| code as u8 as char)
        .filter_map(|ch| {
            let from_form = agnostic_or_bare(from_table, ch);
            let to_form = agnostic_or_bare(to_table, ch);

            (from_form != to_form).then_some(DiffEntry {
                from: from_form,
                to: to_form,
            })
        })
        .collect()
}

/// Rewrites the source of a pattern compiled under `from` so that it can be
/// embedded in a pattern compiled under `to`.
///
/// The source is walked in escape units, so that e.g. the `-` of `\-` is
/// never seen as a bare `-`. Escaped characters of the escape diff are
/// rewritten everywhere. Bare characters are rewritten only inside a
/// character class, outside of one they may be group syntax such as
/// the `:` of `(?:`.
pub(crate) fn reescape(source: &str, from: Flags, to: Flags) -> String {
    if from == to {
        return source.to_owned();
    }

    let escaped_entries: Vec<DiffEntry> = escape_diff(from, to)
        .into_iter()
        .filter(|entry| !entry.is_bare())
        .collect();
    let from_table = get_escape_table(from);
    let to_table = get_escape_table(to);

    // only the `v` mode allows nested classes, elsewhere a `[` inside
    // a class is a literal character
    let nested_classes = from.contains(Flags::UNICODE_SETS);

    let mut result = String::with_capacity(source.len());
    let mut rest = source;
    let mut class_depth = 0usize;

    while let Some(ch) = rest.chars().next() {
        if ch == '\\' {
            if let Some(entry) = escaped_entries
                .iter()
                .find(|entry| rest.starts_with(entry.from.as_str()))
            {
                result.push_str(&entry.to);
                rest = &rest[entry.from.len()..];
                continue;
            }

            // copy the escape pair verbatim
            let pair_length = 1 + rest[1..].chars().next().map_or(0, |next| next.len_utf8());
            result.push_str(&rest[..pair_length]);
            rest = &rest[pair_length..];
            continue;
        }

        match ch {
            '[' if class_depth == 0 || nested_classes => {
                class_depth += 1;
                result.push(ch);
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                result.push(ch);
            }
            _ if class_depth > 0 => match in_class_form(from_table, to_table, ch) {
                Some(form) => result.push_str(form),
                None => result.push(ch),
            },
            _ => result.push(ch),
        }
        rest = &rest[ch.len_utf8()..];
    }

    result
}

// The escaped in-class form under the target table of a character
// which is written bare inside a class of the source.
fn in_class_form<'a>(from: &EscapeTable, to: &'a EscapeTable, ch: char) -> Option<&'a str> {
    let bare_in_source = from
        .get(ch)
        .map_or(true, |forms| !forms.in_class.starts_with('\\'));

    if !bare_in_source {
        return None;
    }

    to.get(ch)
        .map(|forms| forms.in_class.as_str())
        .filter(|form| form.starts_with('\\'))
}

fn agnostic_or_bare(table: &EscapeTable, ch: char) -> String {
    table
        .agnostic(ch)
        .map(|form| form.to_owned())
        .unwrap_or_else(|| ch.to_string())
}
