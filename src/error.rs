// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// A flags string contains a letter outside of `dgimsuvy`.
    #[error("Invalid regular expression flags \"{flags}\": unknown flag '{flag}'.")]
    InvalidFlag { flags: String, flag: char },

    /// A flags string repeats a letter.
    #[error("Invalid regular expression flags \"{flags}\": duplicate flag '{flag}'.")]
    DuplicateFlag { flags: String, flag: char },

    /// Both extended modes (`u` and `v`) were requested.
    #[error("Invalid regular expression flags \"{0}\": flags 'u' and 'v' are mutually exclusive.")]
    ConflictingFlags(String),

    /// The assembled source was rejected by the regex engine.
    #[error("Invalid regular expression: /{pattern}/{flags}: {message}")]
    Syntax {
        pattern: String,
        flags: String,
        message: String,
    },

    #[error(
        "Template with {segments} segment(s) cannot take {substitutions} substitution(s), expected one less substitution than segments."
    )]
    TemplateArity {
        segments: usize,
        substitutions: usize,
    },
}

impl Error {
    /// Whether this is the "syntax error" condition of the ECMAScript
    /// `RegExp` constructor, which covers both malformed flags
    /// and malformed pattern source.
    pub fn is_syntax_error(&self) -> bool {
        !matches!(self, Error::TemplateArity { .. })
    }
}
