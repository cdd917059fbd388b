// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for parsing [Gherkin]-like feature text.
//!
//! The [`Parser`] is a single-pass state machine: it consumes the text line by
//! line, classifies every line and mutates the [`Document`] being built.
//! There is no lookahead and no backtracking.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

mod line;

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    error::ParseError,
    scenario::{Node, Outline, Printable, Scenario, Step},
    DataTable,
};

/// Parses the whole `text` into a [`Document`].
///
/// # Errors
///
/// If a table row has a different number of fields than its header.
///
/// # Example
///
/// ```rust
/// let doc = cuke::parse(
///     "Feature: eating\n\
///      Scenario: hungry\n\
///        Given I have 5 cucumbers\n",
/// )?;
///
/// assert_eq!(doc.scenarios().count(), 1);
/// # Ok::<_, cuke::error::ParseError>(())
/// ```
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let mut parser = Parser::new();
    for line in text.lines() {
        parser.parse_line(line)?;
    }
    Ok(parser.finish())
}

/// Result of parsing a feature text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    /// All the nodes, in input order.
    nodes: Vec<Node>,

    /// Index of the [`Node::Background`] in effect, if any.
    background: Option<usize>,
}

impl Document {
    /// All the parsed nodes, in input order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The background run before every ordinary [`Scenario`], if declared.
    ///
    /// When several are declared, the last one wins.
    #[must_use]
    pub fn background(&self) -> Option<&Scenario> {
        match self.nodes.get(self.background?)? {
            Node::Background(bg) => Some(bg),
            _ => None,
        }
    }

    /// Ordinary [`Scenario`]s, those instantiated from outlines included, in
    /// execution order.
    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Scenario(s) => Some(s),
            _ => None,
        })
    }
}

/// Line-by-line [`Document`] builder.
#[derive(Debug, Default)]
pub struct Parser {
    doc: Document,

    /// Index of the node accepting steps.
    current: Option<usize>,

    /// Whether the rows being parsed belong to an `Examples:` table.
    in_examples: bool,

    /// 1-based number of the last parsed line.
    line_no: usize,
}

impl Parser {
    /// Creates a new [`Parser`] with nothing parsed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the next line of input.
    ///
    /// # Errors
    ///
    /// If the `line` is a table row with a different number of fields than
    /// its table's header.
    pub fn parse_line(&mut self, line: &str) -> Result<(), ParseError> {
        self.line_no += 1;

        if let Some(text) =
            line::step_text(line).filter(|_| self.current.is_some())
        {
            trace!(line = self.line_no, text, "step");
            if let Some(node) = self.current_node_mut() {
                node.push(Step::new(text, line));
            }
        } else if line::is_outline(line) {
            self.open(Node::Outline(Outline::new(line)));
        } else if line::is_scenario(line) {
            self.open(Node::Scenario(Scenario::new(line)));
        } else if line::is_feature(line) {
            self.print(line);
        } else if line::is_background(line) {
            self.open(Node::Background(Scenario::new(line)));
            self.doc.background = self.current;
        } else if line::is_examples(line) {
            self.print(line);
            self.in_examples = true;
        } else {
            self.print(line);
            match line::table_fields(line) {
                Some(fields) if self.in_examples => {
                    self.example_row(line, fields)?;
                }
                Some(fields) if self.has_open_step() => {
                    self.step_row(line, fields)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Finishes parsing, returning the built [`Document`].
    #[must_use]
    pub fn finish(self) -> Document {
        self.doc
    }

    fn open(&mut self, node: Node) {
        debug!(line = self.line_no, ?node, "opening node");
        self.in_examples = false;
        self.doc.nodes.push(node);
        self.current = Some(self.doc.nodes.len() - 1);
    }

    fn print(&mut self, line: &str) {
        trace!(line = self.line_no, "printable");
        self.doc.nodes.push(Node::Printable(Printable::new(line)));
    }

    fn current_node_mut(&mut self) -> Option<&mut Node> {
        self.doc.nodes.get_mut(self.current?)
    }

    fn has_open_step(&self) -> bool {
        self.current
            .and_then(|i| self.doc.nodes.get(i))
            .and_then(Node::last_step)
            .is_some()
    }

    /// Row of an `Examples:` table: the first one supplies the keys, every
    /// other one instantiates the open [`Outline`] right away.
    fn example_row(
        &mut self,
        text: &str,
        fields: Vec<String>,
    ) -> Result<(), ParseError> {
        let line = self.line_no;
        let Some(Node::Outline(outline)) = self.current_node_mut() else {
            return Ok(());
        };

        let Some(keys) = outline.keys().map(<[String]>::to_vec) else {
            outline.set_keys(fields);
            return Ok(());
        };
        if keys.len() != fields.len() {
            return Err(ParseError::TableWidth {
                line,
                text: text.to_owned(),
                expected: keys.len(),
                found: fields.len(),
            });
        }

        let example: HashMap<_, _> = keys.into_iter().zip(fields).collect();
        let scenario = outline.instantiate(&example);
        debug!(line, ?example, "instantiated outline");
        self.doc.nodes.push(Node::Scenario(scenario));
        Ok(())
    }

    /// Row of a step table: the first one supplies the keys, every other one
    /// has to match them in width.
    fn step_row(
        &mut self,
        text: &str,
        fields: Vec<String>,
    ) -> Result<(), ParseError> {
        let line = self.line_no;
        let Some(step) =
            self.current_node_mut().and_then(Node::last_step_mut)
        else {
            return Ok(());
        };

        let slot = step.table_mut();
        if let Some(table) = slot.as_mut() {
            if table.width() != fields.len() {
                return Err(ParseError::TableWidth {
                    line,
                    text: text.to_owned(),
                    expected: table.width(),
                    found: fields.len(),
                });
            }
            debug!(line, "table row");
            table.push(fields);
        } else {
            *slot = Some(DataTable::new(fields));
        }
        Ok(())
    }
}
