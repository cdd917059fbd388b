// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fatal errors aborting a run.
//!
//! Everything in here signals a defect either in a `.feature` file or in the
//! code registering [`Step`]s. Per-step outcomes (`failed`, `pending` and
//! friends) are never reported through these types, see [`Outcome`] instead.
//!
//! [`Outcome`]: crate::Outcome
//! [`Step`]: crate::Step

use std::io;

use derive_more::{Display, Error, From};

use crate::step::Kind;

/// Alias for a [`std::result::Result`] with [`Error`] as its default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error of a [`Runner`] run.
///
/// [`Runner`]: crate::Runner
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Malformed input text.
    #[display("Failed to parse feature: {_0}")]
    Parse(ParseError),

    /// Invalid [`Step`] registration.
    ///
    /// [`Step`]: crate::Step
    #[display("Invalid step definition: {_0}")]
    Registration(RegistrationError),

    /// Captured text couldn't be bound to a handler's parameters.
    #[display("Failed to bind step arguments: {_0}")]
    Coercion(CoercionError),

    /// Reading a `.feature` file or writing the trace failed.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),
}

/// Error of parsing a line-oriented feature text.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Table row has a different number of fields than its header.
    #[display(
        "Wrong number of fields in table row at line {line} `{text}`: \
         expected {expected} fields but found {found}"
    )]
    TableWidth {
        /// 1-based number of the offending line.
        line: usize,

        /// Offending line, as written.
        #[error(not(source))]
        text: String,

        /// Number of keys in the table header.
        expected: usize,

        /// Number of fields in the offending row.
        found: usize,
    },
}

/// Error of registering a [`Step`] handler.
///
/// [`Step`]: crate::Step
#[derive(Debug, Display, Error)]
pub enum RegistrationError {
    /// Pattern is not a valid [`Regex`].
    ///
    /// [`Regex`]: regex::Regex
    #[display("`{pattern}` is not a valid regular expression: {source}")]
    Pattern {
        /// Offending pattern.
        pattern: String,

        /// Underlying compilation error.
        source: regex::Error,
    },

    /// Handler declares a different number of parameters than the pattern
    /// has capture groups.
    #[display(
        "Function type mismatch: `{pattern}` has {groups} capture groups, \
         but the handler takes {params} arguments"
    )]
    Arity {
        /// Offending pattern.
        #[error(not(source))]
        pattern: String,

        /// Number of declared scalar parameters.
        params: usize,

        /// Number of capture groups (not counting the whole match).
        groups: usize,
    },
}

/// Error of converting captured text into handler arguments.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum CoercionError {
    /// Number of captures doesn't match the handler's parameters.
    #[display(
        "Function type mismatch: expected {params} captures, found {captures}"
    )]
    Arity {
        /// Number of declared scalar parameters.
        params: usize,

        /// Number of captures (not counting the whole match).
        captures: usize,
    },

    /// Capture can't be parsed as its parameter's [`Kind`].
    #[display("argument {index} `{value}` is not a valid {kind}: {reason}")]
    Invalid {
        /// 1-based index of the capture group.
        index: usize,

        /// Expected parameter kind.
        kind: Kind,

        /// Captured text.
        #[error(not(source))]
        value: String,

        /// Underlying parse error, rendered.
        reason: String,
    },
}
