// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for writing output.

use std::{borrow::Cow, io};

use console::Style;
use itertools::Itertools as _;

use crate::{report::Outcome, Report};

use super::Coloring;

/// [`Style`]s for terminal output.
#[derive(Clone, Debug)]
pub struct Styles {
    /// [`Style`] for rendering passed steps.
    pub ok: Style,

    /// [`Style`] for rendering skipped steps.
    pub skipped: Style,

    /// [`Style`] for rendering failed steps and their messages.
    pub err: Style,

    /// [`Style`] for rendering pending and undefined steps.
    pub pending: Style,

    /// [`Style`] for rendering __bold__.
    pub bold: Style,

    /// Indicates whether styles are applied at all.
    pub is_present: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            ok: Style::new().green(),
            skipped: Style::new().cyan(),
            err: Style::new().red(),
            pending: Style::new().yellow(),
            bold: Style::new().bold(),
            is_present: console::user_attended() && console::colors_enabled(),
        }
    }
}

impl Styles {
    /// Creates new [`Styles`], detecting whether the terminal supports them.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates new [`Styles`] which are never applied.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            is_present: false,
            ..Self::default()
        }
    }

    /// Applies the given [`Coloring`] policy, [`Coloring::Auto`] keeping the
    /// current detection.
    pub fn apply_coloring(&mut self, color: Coloring) {
        match color {
            Coloring::Auto => {}
            Coloring::Always => {
                self.is_present = true;
                for style in [
                    &mut self.ok,
                    &mut self.skipped,
                    &mut self.err,
                    &mut self.pending,
                    &mut self.bold,
                ] {
                    *style = style.clone().force_styling(true);
                }
            }
            Coloring::Never => self.is_present = false,
        }
    }

    /// If styles are present colors `input` with [`Styles::ok`] color or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn ok<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.ok, input)
    }

    /// If styles are present colors `input` with [`Styles::skipped`] color or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn skipped<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.skipped, input)
    }

    /// If styles are present colors `input` with [`Styles::err`] color or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn err<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.err, input)
    }

    /// If styles are present colors `input` with [`Styles::pending`] color or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn pending<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.pending, input)
    }

    /// If styles are present makes `input` __bold__ or leaves "as is"
    /// otherwise.
    #[must_use]
    pub fn bold<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.bold, input)
    }

    /// Colors `input` according to the given [`Outcome`].
    #[must_use]
    pub fn outcome<'a>(
        &self,
        outcome: Outcome,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        match outcome {
            Outcome::Passed => self.ok(input),
            Outcome::Failed => self.err(input),
            Outcome::Skipped => self.skipped(input),
            Outcome::Pending | Outcome::Undefined => self.pending(input),
        }
    }

    /// Renders the `report` the same way its [`Display`] does, coloring every
    /// counter of the breakdown.
    ///
    /// [`Display`]: std::fmt::Display
    #[must_use]
    pub fn report(&self, report: &Report) -> String {
        let breakdown = report
            .breakdown()
            .map(|(o, n)| self.outcome(o, format!("{n} {o}")))
            .join(", ");
        let breakdown = if breakdown.is_empty() {
            breakdown
        } else {
            format!("({breakdown})")
        };
        format!(
            "{}\n{}{breakdown}",
            self.bold(format!("{} scenarios", report.scenarios)),
            self.bold(format!("{} steps", report.total_steps())),
        )
    }

    fn apply<'a>(
        &self,
        style: &Style,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        if self.is_present {
            style.apply_to(input.into()).to_string().into()
        } else {
            input.into()
        }
    }
}

/// [`io::Write`] extension for easier manipulation with strings.
pub trait WriteStrExt: io::Write {
    /// Writes the given `string` into this writer.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_str(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_all(string.as_ref().as_bytes())
    }

    /// Writes the given `string` into this writer followed by a newline.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_line(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_str(string.as_ref())
            .and_then(|()| self.write_str("\n"))
    }
}

impl<T: io::Write + ?Sized> WriteStrExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_styles_leave_input_as_is() {
        let styles = Styles::plain();

        assert_eq!(styles.err("boom"), "boom");
        assert_eq!(styles.outcome(Outcome::Pending, "later"), "later");
    }

    #[test]
    fn forced_coloring_applies_styles() {
        let mut styles = Styles::plain();
        styles.apply_coloring(Coloring::Always);

        assert_ne!(styles.ok("fine"), "fine");
        assert!(styles.ok("fine").contains("fine"));
    }

    #[test]
    fn plain_report_matches_display() {
        let mut report = Report::new();
        report.scenarios = 1;
        report.record(Outcome::Skipped);
        report.record(Outcome::Passed);

        assert_eq!(Styles::plain().report(&report), report.to_string());
    }

    #[test]
    fn writes_lines() {
        let mut out = Vec::new();
        out.write_line("a").unwrap();
        out.write_str("b").unwrap();

        assert_eq!(out, b"a\nb");
    }
}
