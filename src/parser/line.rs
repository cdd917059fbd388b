// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Classification of single feature text lines.

use lazy_regex::{regex, regex_captures, regex_is_match};

/// Returns the matchable text of a step line (keyword and surrounding
/// whitespace stripped), or [`None`] if the `line` isn't a step.
pub(crate) fn step_text(line: &str) -> Option<&str> {
    regex_captures!(r"^\s*(?:Given|When|Then|And|But|\*)\s+(.*?)\s*$", line)
        .map(|(_, text)| text)
}

pub(crate) fn is_outline(line: &str) -> bool {
    regex_is_match!(r"^\s*Scenario Outline:", line)
}

pub(crate) fn is_scenario(line: &str) -> bool {
    regex_is_match!(r"^\s*Scenario:", line)
}

/// `Feature:` may appear anywhere in the line.
pub(crate) fn is_feature(line: &str) -> bool {
    line.contains("Feature:")
}

pub(crate) fn is_background(line: &str) -> bool {
    regex_is_match!(r"^\s*Background:", line)
}

pub(crate) fn is_examples(line: &str) -> bool {
    regex_is_match!(r"^\s*Examples:", line)
}

/// Splits a `|a|b|` table row into its trimmed fields, or returns [`None`]
/// if the `line` isn't a table row.
pub(crate) fn table_fields(line: &str) -> Option<Vec<String>> {
    let inner = regex!(r"^\s*\|(.*)\|\s*$").captures(line)?.get(1)?;
    Some(
        inner
            .as_str()
            .split('|')
            .map(|f| f.trim().to_owned())
            .collect(),
    )
}
