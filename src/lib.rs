// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

mod alternation;
mod builder;
mod commentremover;
mod error;
mod escaper;
mod escapetable;
mod flags;
mod native;
mod pattern;
mod substitution;
mod template;
mod transformer;

pub use builder::{build, exact, regex, unwrap, unwrap_with, Builder};
pub use error::Error;
pub use escaper::escape;
pub use escapetable::{get_escape_table, EscapeTable, EscapedForms};
pub use flags::{Flags, IntoFlags, RegexOptions};
pub use pattern::{Match, Matches, Pattern};
pub use substitution::{Alternation, Fragment, Substitution};
pub use template::Template;
