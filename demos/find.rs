// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_fancy::{exact, regex, template, Alternation};

pub fn main() {
    let colors = vec!["red", "green", "blue", "light blue"];

    let re = regex("gi")
        .unwrap()
        .build(&template![
            r"
            \b
            ",
            colors,
            r"      # longest first, so 'light blue' wins over 'blue'
            \b
            "
        ])
        .unwrap();

    println!("Pattern: {}", re);

    let text = "Red, Light Blue and blue.";

    // find all
    for m in re.find_iter(text) {
        println!("Found match: {}", m.as_str());
    }

    // shortest first
    let lazy = regex("g")
        .unwrap()
        .build(&template!["", Alternation::lazy(["a", "ab", "abc"]), ""])
        .unwrap();
    println!("Lazy: {} -> {:?}", lazy, lazy.matches("abc"));

    // literal replacement
    let dots = exact("...", "g").unwrap();
    println!("{}", dots.replace("wait... what...", "!"));
}
