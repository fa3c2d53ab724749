// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_fancy::{build, template, unwrap, unwrap_with, Pattern};

pub fn main() {
    let single_hex = Pattern::new("^[0-9a-f]$", "i").unwrap();
    let hex = unwrap(&single_hex).unwrap();

    let single_uuid = build(&template![
        "
        ^
            ",
        &hex,
        "{8}    # time low
            -
            ",
        &hex,
        "{4}    # time mid
            -
            ",
        &hex,
        "{4}    # time high and version
            -
            ",
        &hex,
        "{4}    # clock sequence
            -
            ",
        &hex,
        "{12}   # node
        $
        "
    ])
    .unwrap();

    println!("Single: {}", single_uuid);

    let text = "00ac35a2-44ff-4694-84b3-f378d8f0cd0e edf9e977-1df2-45cc-8144-40572e9632ad";

    // check one
    let first = &text[..36];
    println!("{} is a uuid: {}", first, single_uuid.is_match(first));

    // find all
    let multiple_uuid = unwrap_with(&single_uuid, "g").unwrap();
    println!("Multiple: {}", multiple_uuid);

    for m in multiple_uuid.find_iter(text) {
        println!("Found uuid at {}..{}: {}", m.start(), m.end(), m.as_str());
    }
}
