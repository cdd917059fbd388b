// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-step execution context handed to every handler.

use std::fmt;

use crate::data_table::{DataTable, Row};

/// Name of a capturing group inside a [`Regex`].
///
/// [`Regex`]: regex::Regex
pub type CaptureName = Option<String>;

/// Context of a single step invocation.
///
/// A fresh [`World`] is created for every step: nothing recorded here leaks
/// into the next one. Use the runner's user state for that.
#[derive(Clone, Debug, Default)]
pub struct World {
    /// Whole match first, then every capture group in order. Groups that
    /// didn't participate in the match are empty.
    captures: Vec<(CaptureName, String)>,

    table: Option<DataTable>,

    failed: bool,

    pending: bool,

    /// Messages recorded with [`World::error()`].
    messages: Vec<String>,
}

impl World {
    /// Creates a new [`World`] out of a step match.
    #[must_use]
    pub fn new(
        captures: Vec<(CaptureName, String)>,
        table: Option<DataTable>,
    ) -> Self {
        Self {
            captures,
            table,
            ..Self::default()
        }
    }

    /// Returns the `index`th capture (`0` is the whole match).
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).map(|(_, v)| v.as_str())
    }

    /// Returns the capture of the group with the given `name`.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns all the captures, the whole match first.
    pub fn captures(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(|(_, v)| v.as_str())
    }

    /// Table attached to the step, if any.
    #[must_use]
    pub const fn table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    /// Data rows of the attached table. Empty if there is no table.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.table.as_ref().map(DataTable::rows).unwrap_or_default()
    }

    /// Marks the step as failed and records the `message`.
    ///
    /// May be called several times, every message is kept.
    pub fn error(&mut self, message: impl fmt::Display) {
        self.failed = true;
        self.messages.push(message.to_string());
    }

    /// Marks the step as failed without a message.
    pub fn fail(&mut self) {
        self.failed = true;
    }

    /// Fails the step with the `message` unless `cond` holds.
    ///
    /// Returns `cond`, so the handler may bail out early.
    pub fn check(&mut self, cond: bool, message: impl fmt::Display) -> bool {
        if !cond {
            self.error(message);
        }
        cond
    }

    /// Marks the step as pending: it isn't implemented yet, and the remaining
    /// steps of the scenario are skipped.
    ///
    /// Takes precedence over a failure recorded in the same step.
    pub fn pending(&mut self) {
        self.pending = true;
    }

    /// Indicates whether [`World::pending()`] was called.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Indicates whether the step failed.
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed
    }

    /// Messages recorded with [`World::error()`], in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}
