// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcomes of executed steps and their aggregation.

use std::{fmt, ops::AddAssign};

use derive_more::Display;
use itertools::Itertools as _;

/// Outcome of a single executed step.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Outcome {
    /// Handler ran without flagging a failure.
    #[display("passed")]
    Passed,

    /// Handler flagged a failure through the [`World`].
    ///
    /// [`World`]: crate::World
    #[display("failed")]
    Failed,

    /// Handler signalled the step isn't implemented yet.
    #[display("pending")]
    Pending,

    /// Step followed a pending one in the same scenario, so wasn't run.
    #[display("skipped")]
    Skipped,

    /// No handler matched the step.
    #[display("undefined")]
    Undefined,
}

impl Outcome {
    /// All the [`Outcome`]s, in the order a [`Report`] lists them.
    pub const ALL: [Self; 5] = [
        Self::Skipped,
        Self::Passed,
        Self::Failed,
        Self::Pending,
        Self::Undefined,
    ];
}

/// Counters of executed scenarios and step [`Outcome`]s.
///
/// Only ever grows: [`Report`]s of several runs are combined with `+=`.
///
/// # Example
///
/// ```rust
/// use cuke::{Outcome, Report};
///
/// let mut report = Report::default();
/// report.scenarios += 1;
/// report.record(Outcome::Passed);
/// report.record(Outcome::Passed);
/// report.record(Outcome::Undefined);
///
/// assert_eq!(report.to_string(), "1 scenarios\n3 steps(2 passed, 1 undefined)");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Report {
    /// Number of executed concrete scenarios.
    pub scenarios: usize,

    /// Number of [`Outcome::Passed`] steps.
    pub passed: usize,

    /// Number of [`Outcome::Failed`] steps.
    pub failed: usize,

    /// Number of [`Outcome::Pending`] steps.
    pub pending: usize,

    /// Number of [`Outcome::Skipped`] steps.
    pub skipped: usize,

    /// Number of [`Outcome::Undefined`] steps.
    pub undefined: usize,
}

impl Report {
    /// Creates a new empty [`Report`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scenarios: 0,
            passed: 0,
            failed: 0,
            pending: 0,
            skipped: 0,
            undefined: 0,
        }
    }

    /// Counts a step with the given [`Outcome`].
    pub fn record(&mut self, outcome: Outcome) {
        *self.counter_mut(outcome) += 1;
    }

    /// Returns the number of steps with the given [`Outcome`].
    #[must_use]
    pub const fn count(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Passed => self.passed,
            Outcome::Failed => self.failed,
            Outcome::Pending => self.pending,
            Outcome::Skipped => self.skipped,
            Outcome::Undefined => self.undefined,
        }
    }

    /// Total number of counted steps.
    #[must_use]
    pub const fn total_steps(&self) -> usize {
        self.passed + self.failed + self.pending + self.skipped + self.undefined
    }

    /// Indicates whether any step failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Non-zero step counters, in [`Outcome::ALL`] order.
    pub fn breakdown(&self) -> impl Iterator<Item = (Outcome, usize)> + '_ {
        Outcome::ALL
            .into_iter()
            .map(|o| (o, self.count(o)))
            .filter(|(_, n)| *n > 0)
    }

    /// Adds the `other` [`Report`]'s counters to this one.
    pub fn merge(&mut self, other: &Self) {
        self.scenarios += other.scenarios;
        for o in Outcome::ALL {
            *self.counter_mut(o) += other.count(o);
        }
    }

    fn counter_mut(&mut self, outcome: Outcome) -> &mut usize {
        match outcome {
            Outcome::Passed => &mut self.passed,
            Outcome::Failed => &mut self.failed,
            Outcome::Pending => &mut self.pending,
            Outcome::Skipped => &mut self.skipped,
            Outcome::Undefined => &mut self.undefined,
        }
    }
}

impl AddAssign for Report {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} scenarios\n{} steps", self.scenarios, self.total_steps())?;
        let breakdown = self
            .breakdown()
            .map(|(o, n)| format!("{n} {o}"))
            .join(", ");
        if !breakdown.is_empty() {
            write!(f, "({breakdown})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_has_no_breakdown() {
        assert_eq!(Report::new().to_string(), "0 scenarios\n0 steps");
    }

    #[test]
    fn breakdown_follows_fixed_order() {
        let report = Report {
            scenarios: 2,
            passed: 3,
            failed: 1,
            pending: 1,
            skipped: 2,
            undefined: 4,
        };

        assert_eq!(
            report.to_string(),
            "2 scenarios\n11 steps(2 skipped, 3 passed, 1 failed, 1 pending, \
             4 undefined)",
        );
    }

    #[test]
    fn zero_categories_are_omitted() {
        let mut report = Report::new();
        report.record(Outcome::Failed);
        report.record(Outcome::Pending);

        assert_eq!(report.to_string(), "0 scenarios\n2 steps(1 failed, 1 pending)");
        assert!(report.has_failures());
    }

    #[test]
    fn merges_counters() {
        let mut total = Report {
            scenarios: 1,
            passed: 1,
            ..Report::default()
        };
        total += Report {
            scenarios: 2,
            passed: 2,
            undefined: 1,
            ..Report::default()
        };

        assert_eq!(total.scenarios, 3);
        assert_eq!(total.count(Outcome::Passed), 3);
        assert_eq!(total.total_steps(), 4);
        assert!(!total.has_failures());
    }
}
