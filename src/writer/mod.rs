// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-line execution trace.

pub mod out;

use std::{fmt, io, str::FromStr};

use crate::{report::Outcome, Report};

pub use self::out::{Styles, WriteStrExt};

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] to decide, whether output should
    /// be colored.
    #[default]
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

/// Sink of the trace: every printable line, scenario declaration and step
/// outcome, as execution goes.
///
/// Without a sink (see [`Trace::silent()`]) every write is a no-op.
pub struct Trace {
    out: Option<Box<dyn io::Write>>,
    styles: Styles,

    /// Whether only [`Trace::summary()`] reaches the sink.
    summary_only: bool,
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trace")
            .field("out", &self.out.as_ref().map(|_| ".."))
            .field("styles", &self.styles)
            .field("summary_only", &self.summary_only)
            .finish()
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Trace {
    /// Creates a new [`Trace`] writing to [`io::Stdout`], styled whenever
    /// the terminal supports it.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            out: Some(Box::new(io::stdout())),
            styles: Styles::new(),
            summary_only: false,
        }
    }

    /// Creates a new [`Trace`] writing to the given `out`put, unstyled
    /// unless forced with [`Trace::apply_coloring()`].
    #[must_use]
    pub fn new(out: impl io::Write + 'static) -> Self {
        Self {
            out: Some(Box::new(out)),
            styles: Styles::plain(),
            summary_only: false,
        }
    }

    /// Creates a new [`Trace`] writing nowhere.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            out: None,
            styles: Styles::plain(),
            summary_only: false,
        }
    }

    /// Drops every line but the summary when `on`.
    pub fn set_summary_only(&mut self, on: bool) {
        self.summary_only = on;
    }

    /// Applies the given [`Coloring`] policy.
    pub fn apply_coloring(&mut self, color: Coloring) {
        self.styles.apply_coloring(color);
    }

    /// Echoes a line without executable semantics.
    ///
    /// # Errors
    ///
    /// If the sink fails to be written to.
    pub fn printable(&mut self, line: &str) -> io::Result<()> {
        self.detail(line)
    }

    /// Writes the declaration line of a scenario (or background) about to
    /// run.
    ///
    /// # Errors
    ///
    /// If the sink fails to be written to.
    pub fn scenario(&mut self, declaration: &str) -> io::Result<()> {
        let line = self.styles.bold(declaration).into_owned();
        self.detail(line)
    }

    /// Writes an executed step's `original` line, prefixed according to its
    /// [`Outcome`], followed by the `messages` recorded while running it.
    ///
    /// # Errors
    ///
    /// If the sink fails to be written to.
    pub fn step(
        &mut self,
        original: &str,
        outcome: Outcome,
        messages: &[String],
    ) -> io::Result<()> {
        let prefix = match outcome {
            Outcome::Passed | Outcome::Failed => "",
            Outcome::Pending => "PENDING - ",
            Outcome::Skipped => "Skipped - ",
            Outcome::Undefined => "UNDEFINED - ",
        };
        let line = self
            .styles
            .outcome(outcome, format!("{prefix}{original}"))
            .into_owned();
        self.detail(line)?;
        for msg in messages {
            let msg = self.styles.err(format!("\t{msg}")).into_owned();
            self.detail(msg)?;
        }
        Ok(())
    }

    /// Writes the summary of a finished run.
    ///
    /// # Errors
    ///
    /// If the sink fails to be written to.
    pub fn summary(&mut self, report: &Report) -> io::Result<()> {
        let summary = self.styles.report(report);
        self.line(summary)
    }

    fn detail(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        if self.summary_only {
            return Ok(());
        }
        self.line(line)
    }

    fn line(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        self.out.as_mut().map_or(Ok(()), |out| out.write_line(line))
    }
}
