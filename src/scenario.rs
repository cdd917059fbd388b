// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory model of a parsed feature text.

use std::collections::HashMap;

use lazy_regex::regex;

use crate::DataTable;

/// Single step line of a [`Scenario`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    /// Text matched against step patterns: keyword and surrounding
    /// whitespace stripped.
    text: String,

    /// Line as written, used for reporting.
    original: String,

    /// Table following this step, if any.
    table: Option<DataTable>,
}

impl Step {
    /// Creates a new [`Step`] out of its matchable `text` and the `original`
    /// line it was parsed from.
    #[must_use]
    pub fn new(text: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            original: original.into(),
            table: None,
        }
    }

    /// Creates a new [`Step`] whose original line is its matchable `text`.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text)
    }

    /// Text matched against step patterns.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line this [`Step`] was parsed from.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Table attached to this [`Step`], if any.
    #[must_use]
    pub const fn table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    /// Attaches the given `table`, replacing the existing one.
    #[must_use]
    pub fn with_table(mut self, table: DataTable) -> Self {
        self.table = Some(table);
        self
    }

    pub(crate) fn table_mut(&mut self) -> &mut Option<DataTable> {
        &mut self.table
    }
}

/// Concrete executable scenario (or background).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Scenario {
    declaration: String,
    steps: Vec<Step>,
}

impl Scenario {
    /// Creates a new empty [`Scenario`] declared by the given line.
    #[must_use]
    pub fn new(declaration: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
            steps: Vec::new(),
        }
    }

    /// Declaration line (`Scenario: …` or `Background: …`).
    #[must_use]
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// Steps in declaration order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Appends a [`Step`].
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Builder-style [`Scenario::push()`].
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.push(step);
        self
    }
}

/// Scenario template expanded once per row of its `Examples:` table.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Outline {
    declaration: String,
    steps: Vec<Step>,
    keys: Option<Vec<String>>,
}

impl Outline {
    /// Creates a new empty [`Outline`] declared by the given line.
    #[must_use]
    pub fn new(declaration: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
            steps: Vec::new(),
            keys: None,
        }
    }

    /// Declaration line (`Scenario Outline: …`).
    #[must_use]
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// Template steps, possibly containing `<placeholder>`s.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Appends a template [`Step`].
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Column keys of the `Examples:` table, once its header was seen.
    #[must_use]
    pub fn keys(&self) -> Option<&[String]> {
        self.keys.as_deref()
    }

    pub(crate) fn set_keys(&mut self, keys: Vec<String>) {
        self.keys = Some(keys);
    }

    /// Derives a concrete [`Scenario`] for the given `example` row.
    ///
    /// Every `<key>` in the template steps (their tables included) is
    /// replaced with the `example`'s value for `key`. Placeholders without a
    /// value are left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use std::collections::HashMap;
    /// use cuke::scenario::{Outline, Step};
    ///
    /// let mut outline = Outline::new("Scenario Outline: eating");
    /// outline.push(Step::from_text("<count> <name>"));
    ///
    /// let example = HashMap::from([
    ///     ("count".to_owned(), "5".to_owned()),
    ///     ("name".to_owned(), "pops".to_owned()),
    /// ]);
    /// assert_eq!(outline.instantiate(&example).steps()[0].text(), "5 pops");
    /// ```
    #[must_use]
    pub fn instantiate(&self, example: &HashMap<String, String>) -> Scenario {
        let substitute = |line: &str| -> String {
            regex!(r"<([^<>]+)>")
                .replace_all(line, |caps: &regex::Captures<'_>| {
                    example.get(&caps[1]).map_or_else(
                        || caps[0].to_owned(),
                        Clone::clone,
                    )
                })
                .into_owned()
        };

        let steps = self
            .steps
            .iter()
            .map(|step| Step {
                text: substitute(&step.text),
                original: substitute(&step.original),
                table: step.table.as_ref().map(|t| t.map_cells(&substitute)),
            })
            .collect();

        Scenario {
            declaration: self.declaration.clone(),
            steps,
        }
    }
}

/// Line without executable semantics, carried through so the trace
/// reproduces the input's structure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Printable {
    line: String,
}

impl Printable {
    /// Creates a new [`Printable`] line.
    #[must_use]
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }

    /// The line, as written.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }
}

/// Node of a parsed [`Document`].
///
/// [`Document`]: crate::parser::Document
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// Ordinary scenario, either declared or instantiated from an
    /// [`Outline`].
    Scenario(Scenario),

    /// Steps run before every ordinary [`Scenario`]. Never executed on its
    /// own.
    Background(Scenario),

    /// Template, never executed on its own.
    Outline(Outline),

    /// Inert text.
    Printable(Printable),
}

impl Node {
    /// Appends a [`Step`] to this node, if it accepts steps.
    pub(crate) fn push(&mut self, step: Step) {
        match self {
            Self::Scenario(s) | Self::Background(s) => s.push(step),
            Self::Outline(o) => o.push(step),
            Self::Printable(_) => {}
        }
    }

    /// Last [`Step`] of this node, if any.
    pub(crate) fn last_step(&self) -> Option<&Step> {
        match self {
            Self::Scenario(s) | Self::Background(s) => s.steps.last(),
            Self::Outline(o) => o.steps.last(),
            Self::Printable(_) => None,
        }
    }

    /// Mutable [`Node::last_step()`].
    pub(crate) fn last_step_mut(&mut self) -> Option<&mut Step> {
        match self {
            Self::Scenario(s) | Self::Background(s) => s.steps.last_mut(),
            Self::Outline(o) => o.steps.last_mut(),
            Self::Printable(_) => None,
        }
    }

    /// Indicates whether this node is an ordinary [`Scenario`].
    #[must_use]
    pub const fn is_executable(&self) -> bool {
        matches!(self, Self::Scenario(_))
    }
}
