// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Top-level executor of feature texts.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use tracing::{debug, error, warn};

use crate::{
    cli::{self, Args},
    error::{RegistrationError, Result},
    parser::{self, Document},
    report::Outcome,
    scenario::{Node, Scenario, Step},
    step::{Collection, Handler, World},
    writer::{Coloring, Trace},
    Report,
};

/// Hook run around every ordinary scenario.
type Hook<S> = Box<dyn Fn(&mut S)>;

/// State of a single scenario's run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Steps are matched and invoked.
    Running,

    /// Some step signalled it's pending, the remaining ones are skipped.
    Pending,
}

/// Top-level executor: owns step definitions, hooks and the trace.
///
/// `S` is the user state every handler and hook is handed, passed in by the
/// caller of [`Runner::execute()`].
///
/// # Example
///
/// ```rust
/// use cuke::{Runner, World};
///
/// let mut runner = Runner::new()
///     .quiet()
///     .step(r"^I have (\d+) cucumbers$", |_: &mut World, n: &mut i32, count: i32| {
///         *n = count;
///     })?
///     .step(r"^I eat (\d+)$", |_: &mut World, n: &mut i32, count: i32| {
///         *n -= count;
///     })?
///     .step(r"^I have (\d+) left$", |w: &mut World, n: &mut i32, left: i32| {
///         w.check(*n == left, format!("{n} left, not {left}"));
///     })?;
///
/// let mut cukes = 0;
/// let report = runner.execute(
///     "Feature: eating
///        Scenario: hungry
///          Given I have 12 cucumbers
///          When I eat 5
///          Then I have 7 left",
///     &mut cukes,
/// )?;
///
/// assert_eq!(report.passed, 3);
/// # Ok::<_, cuke::Error>(())
/// ```
///
/// Handler arguments are limited to the supported scalar types:
///
/// ```rust,compile_fail
/// use cuke::{Runner, World};
///
/// let _ = Runner::new().step("(\\d+)", |_: &mut World, _: &mut (), _: u32| {});
/// ```
pub struct Runner<S> {
    steps: Collection<S>,
    before: Option<Hook<S>>,
    after: Option<Hook<S>>,
    trace: Trace,
    coloring: Coloring,
    summary_only: bool,

    /// Directory [`Runner::run()`] looks for `.feature` files in.
    features: PathBuf,
}

impl<S> fmt::Debug for Runner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("steps", &self.steps)
            .field("before", &self.before.as_ref().map(|_| ".."))
            .field("after", &self.after.as_ref().map(|_| ".."))
            .field("trace", &self.trace)
            .field("coloring", &self.coloring)
            .field("summary_only", &self.summary_only)
            .field("features", &self.features)
            .finish()
    }
}

impl<S: 'static> Default for Runner<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> Runner<S> {
    /// Creates a new [`Runner`] without steps or hooks, tracing to
    /// [`io::Stdout`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Collection::new(),
            before: None,
            after: None,
            trace: Trace::stdout(),
            coloring: Coloring::Auto,
            summary_only: false,
            features: PathBuf::from("features"),
        }
    }

    /// Binds the `pattern` to the `handler`.
    ///
    /// Definitions are tried in registration order, the first one whose
    /// `pattern` matches anywhere in a step's text wins. Step keywords play no
    /// part in matching.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::Pattern`] if the `pattern` doesn't compile.
    /// - [`RegistrationError::Arity`] if the number of the `pattern`'s capture
    ///   groups differs from the number of the `handler`'s scalar parameters.
    #[track_caller]
    pub fn step<A, H>(
        mut self,
        pattern: &str,
        handler: H,
    ) -> Result<Self, RegistrationError>
    where
        A: 'static,
        H: Handler<S, A>,
    {
        self.steps.register(pattern, handler)?;
        Ok(self)
    }

    /// Alias of [`Runner::step()`] reading well for [Given] steps.
    ///
    /// # Errors
    ///
    /// See [`Runner::step()`].
    ///
    /// [Given]: https://cucumber.io/docs/gherkin/reference#given
    #[track_caller]
    pub fn given<A, H>(
        self,
        pattern: &str,
        handler: H,
    ) -> Result<Self, RegistrationError>
    where
        A: 'static,
        H: Handler<S, A>,
    {
        self.step(pattern, handler)
    }

    /// Alias of [`Runner::step()`] reading well for [When] steps.
    ///
    /// # Errors
    ///
    /// See [`Runner::step()`].
    ///
    /// [When]: https://cucumber.io/docs/gherkin/reference#when
    #[track_caller]
    pub fn when<A, H>(
        self,
        pattern: &str,
        handler: H,
    ) -> Result<Self, RegistrationError>
    where
        A: 'static,
        H: Handler<S, A>,
    {
        self.step(pattern, handler)
    }

    /// Alias of [`Runner::step()`] reading well for [Then] steps.
    ///
    /// # Errors
    ///
    /// See [`Runner::step()`].
    ///
    /// [Then]: https://cucumber.io/docs/gherkin/reference#then
    #[track_caller]
    pub fn then<A, H>(
        self,
        pattern: &str,
        handler: H,
    ) -> Result<Self, RegistrationError>
    where
        A: 'static,
        H: Handler<S, A>,
    {
        self.step(pattern, handler)
    }

    /// Sets a hook to run before every ordinary scenario, ahead of the
    /// background.
    #[must_use]
    pub fn before(mut self, hook: impl Fn(&mut S) + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    /// Sets a hook to run after every ordinary scenario, whatever its steps'
    /// outcomes.
    #[must_use]
    pub fn after(mut self, hook: impl Fn(&mut S) + 'static) -> Self {
        self.after = Some(Box::new(hook));
        self
    }

    /// Redirects the trace to the given `out`put.
    #[must_use]
    pub fn with_output(mut self, out: impl io::Write + 'static) -> Self {
        self.trace = Trace::new(out);
        self.trace.apply_coloring(self.coloring);
        self.trace.set_summary_only(self.summary_only);
        self
    }

    /// Keeps only the summaries written by [`Runner::run_feature()`] and
    /// friends in the trace.
    #[must_use]
    pub fn summary_only(mut self) -> Self {
        self.summary_only = true;
        self.trace.set_summary_only(true);
        self
    }

    /// Disables the trace altogether.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.trace = Trace::silent();
        self
    }

    /// Applies the given [`Coloring`] policy to the trace.
    #[must_use]
    pub fn with_coloring(mut self, coloring: Coloring) -> Self {
        self.coloring = coloring;
        self.trace.apply_coloring(coloring);
        self
    }

    /// Sets the directory [`Runner::run()`] looks for `.feature` files in.
    #[must_use]
    pub fn with_features(mut self, dir: impl Into<PathBuf>) -> Self {
        self.features = dir.into();
        self
    }

    /// Applies the given [`cli::Opts`].
    #[must_use]
    pub fn with_cli<C: Args>(self, opts: cli::Opts<C>) -> Self {
        let cli::Cli {
            color,
            features,
            quiet,
        } = opts.runner;
        let this = self.with_coloring(color).with_features(features);
        if quiet {
            this.summary_only()
        } else {
            this
        }
    }

    /// Registered step definitions.
    #[must_use]
    pub const fn steps(&self) -> &Collection<S> {
        &self.steps
    }

    /// Directory [`Runner::run()`] looks for `.feature` files in.
    #[must_use]
    pub fn features(&self) -> &Path {
        &self.features
    }

    /// Parses and runs the given feature `text`.
    ///
    /// # Errors
    ///
    /// On any fatal error, aborting the run right away: malformed tables,
    /// captures not fitting their handler's parameters or a failing trace
    /// sink. Failed, pending or undefined steps are not errors, see the
    /// returned [`Report`] for them.
    pub fn execute(&mut self, text: &str, state: &mut S) -> Result<Report> {
        let doc = parser::parse(text).map_err(|e| {
            error!(%e, "aborting run");
            e
        })?;
        self.execute_document(&doc, state)
    }

    /// Runs an already parsed [`Document`].
    ///
    /// # Errors
    ///
    /// See [`Runner::execute()`].
    pub fn execute_document(
        &mut self,
        doc: &Document,
        state: &mut S,
    ) -> Result<Report> {
        self.run_nodes(doc, state).map_err(|e| {
            error!(%e, "aborting run");
            e
        })
    }

    /// Writes the summary of a finished run to the trace.
    pub(crate) fn trace_summary(&mut self, report: &Report) -> io::Result<()> {
        self.trace.summary(report)
    }

    fn run_nodes(&mut self, doc: &Document, state: &mut S) -> Result<Report> {
        let mut report = Report::new();
        for node in doc.nodes() {
            match node {
                Node::Printable(p) => self.trace.printable(p.line())?,
                Node::Scenario(s) => {
                    report += self.run_scenario(s, doc.background(), state)?;
                }
                Node::Background(_) | Node::Outline(_) => {}
            }
        }
        Ok(report)
    }

    /// Runs an ordinary [`Scenario`] bracketed by the hooks, preceded by the
    /// `background`.
    fn run_scenario(
        &mut self,
        scenario: &Scenario,
        background: Option<&Scenario>,
        state: &mut S,
    ) -> Result<Report> {
        debug!(scenario = scenario.declaration().trim(), "running scenario");
        if let Some(hook) = &self.before {
            hook(state);
        }
        if let Some(bg) = background {
            self.trace.scenario(bg.declaration())?;
            let _background = self.run_steps(bg.steps(), state)?;
        }

        self.trace.scenario(scenario.declaration())?;
        let mut report = self.run_steps(scenario.steps(), state)?;
        report.scenarios = 1;

        if let Some(hook) = &self.after {
            hook(state);
        }
        Ok(report)
    }

    fn run_steps(&mut self, steps: &[Step], state: &mut S) -> Result<Report> {
        let mut report = Report::new();
        let mut current = State::Running;
        for step in steps {
            let (outcome, messages) = match current {
                State::Running => self.run_step(step, state)?,
                State::Pending => (Outcome::Skipped, Vec::new()),
            };
            if outcome == Outcome::Pending {
                current = State::Pending;
            }
            report.record(outcome);
            self.trace.step(step.original(), outcome, &messages)?;
        }
        Ok(report)
    }

    /// Matches the `step` and invokes its handler, if any.
    fn run_step(
        &self,
        step: &Step,
        state: &mut S,
    ) -> Result<(Outcome, Vec<String>)> {
        let Some(found) = self.steps.find(step.text()) else {
            warn!(step = step.text(), "undefined step");
            return Ok((Outcome::Undefined, Vec::new()));
        };

        let args = found.args()?;
        let definition = found.definition();
        let mut world = World::new(found.into_captures(), step.table().cloned());
        definition.invoke(&mut world, state, args)?;

        let outcome = if world.is_pending() {
            Outcome::Pending
        } else if world.has_failed() {
            Outcome::Failed
        } else {
            Outcome::Passed
        };
        debug!(
            step = step.text(),
            %outcome,
            location = %definition.location(),
            "step finished",
        );
        Ok((outcome, world.messages().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::Error;

    type Log = Vec<String>;

    fn runner() -> Runner<Log> {
        Runner::new()
            .quiet()
            .step("^(.*)$", |_: &mut World, log: &mut Log, text: String| {
                log.push(text);
            })
            .unwrap()
    }

    #[test]
    fn runs_background_between_hooks() {
        let mut runner = runner()
            .before(|log: &mut Log| log.push("before".into()))
            .after(|log: &mut Log| log.push("after".into()));
        let mut log = Vec::new();

        let report = runner
            .execute(
                "Feature:
            Background:
                Given bg
            Scenario: one
                Then first
            Scenario: two
                Then second",
                &mut log,
            )
            .unwrap();

        assert_eq!(
            log,
            [
                "before", "bg", "first", "after", "before", "bg", "second",
                "after",
            ],
        );
        assert_eq!(report.scenarios, 2);
        assert_eq!(report.passed, 2);
    }

    #[test]
    fn pending_skips_rest_of_scenario_only() {
        let mut runner = Runner::new()
            .quiet()
            .step("wait", |w: &mut World, _: &mut ()| w.pending())
            .unwrap()
            .step("go", |_: &mut World, _: &mut ()| {})
            .unwrap();

        let report = runner
            .execute(
                "Scenario: a
                    Given go
                    When wait
                    Then go
                    And go
                Scenario: b
                    Given go",
                &mut (),
            )
            .unwrap();

        assert_eq!(report.passed, 2);
        assert_eq!(report.pending, 1);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn failures_do_not_stop_scenario() {
        let mut runner = Runner::new()
            .quiet()
            .step("bad", |w: &mut World, _: &mut ()| w.error("nope"))
            .unwrap()
            .step("good", |_: &mut World, _: &mut ()| {})
            .unwrap();

        let report = runner
            .execute("Scenario:\n Given bad\n Then good\n And unknown", &mut ())
            .unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.passed, 1);
        assert_eq!(report.undefined, 1);
    }

    #[test]
    fn coercion_error_aborts_run() {
        let after = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&after);
        let mut runner = Runner::new()
            .quiet()
            .step("^I have (.*)$", |_: &mut World, _: &mut (), _: i32| {})
            .unwrap()
            .after(move |_| *counter.borrow_mut() += 1);

        let err = runner
            .execute("Scenario:\n Given I have x\nScenario:\n Given I have 1", &mut ())
            .unwrap_err();

        assert!(matches!(err, Error::Coercion(_)));
        assert_eq!(*after.borrow(), 0);
    }

    #[test]
    fn writes_trace() {
        let buf = Rc::new(RefCell::new(Vec::new()));
        struct Sink(Rc<RefCell<Vec<u8>>>);
        impl io::Write for Sink {
            fn write(&mut self, b: &[u8]) -> io::Result<usize> {
                self.0.borrow_mut().extend_from_slice(b);
                Ok(b.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let mut runner = Runner::new()
            .with_output(Sink(Rc::clone(&buf)))
            .with_coloring(Coloring::Never)
            .step("ok", |_: &mut World, _: &mut ()| {})
            .unwrap();

        runner
            .execute("Feature: f\nScenario: s\n  Given ok\n  Then what", &mut ())
            .unwrap();

        assert_eq!(
            String::from_utf8(buf.borrow().clone()).unwrap(),
            "Feature: f\nScenario: s\n  Given ok\nUNDEFINED -   Then what\n",
        );
    }
}
