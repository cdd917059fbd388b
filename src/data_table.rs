// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Data tables attached to a [`Step`].
//!
//! [`Step`]: crate::scenario::Step

use std::collections::HashMap;

/// Single data row of a [`DataTable`], keyed by the header fields.
pub type Row = HashMap<String, String>;

/// Table following a step line.
///
/// The first row under a step supplies the keys, every subsequent row becomes
/// a [`Row`] keyed by them.
///
/// # Example
///
/// ```rust
/// use cuke::DataTable;
///
/// let mut table = DataTable::new(vec!["name".into(), "email".into()]);
/// table.push(vec!["Bob".into(), "bob@bob.com".into()]);
///
/// assert_eq!(table.rows()[0]["email"], "bob@bob.com");
/// assert_eq!(table.column("name"), vec!["Bob"]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DataTable {
    keys: Vec<String>,
    rows: Vec<Row>,
}

impl DataTable {
    /// Creates a new [`DataTable`] with the given header `keys` and no rows.
    #[must_use]
    pub const fn new(keys: Vec<String>) -> Self {
        Self { keys, rows: Vec::new() }
    }

    /// Header keys, in declaration order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of keys every row has to provide.
    #[must_use]
    pub fn width(&self) -> usize {
        self.keys.len()
    }

    /// Data rows, in declaration order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows (header excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Indicates whether this table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a data row.
    ///
    /// Callers must check the `fields` count against [`DataTable::width()`]
    /// first: surplus fields are dropped and missing keys are left out.
    pub fn push(&mut self, fields: Vec<String>) {
        let row = self.keys.iter().cloned().zip(fields).collect();
        self.rows.push(row);
    }

    /// Returns all the values of the given `key`, in row order.
    ///
    /// Empty if there is no such key.
    #[must_use]
    pub fn column(&self, key: &str) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.get(key).map(String::as_str))
            .collect()
    }

    /// Returns the table as written: header first, then every row with its
    /// values ordered by the header.
    #[must_use]
    pub fn raw(&self) -> Vec<Vec<String>> {
        std::iter::once(self.keys.clone())
            .chain(self.rows.iter().map(|row| {
                self.keys
                    .iter()
                    .map(|k| row.get(k).cloned().unwrap_or_default())
                    .collect()
            }))
            .collect()
    }

    /// Returns a copy of this table with `f` applied to every key and value.
    #[must_use]
    pub fn map_cells(&self, mut f: impl FnMut(&str) -> String) -> Self {
        let keys = self.keys.iter().map(|k| f(k)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(|(k, v)| (f(k), f(v))).collect())
            .collect();
        Self { keys, rows }
    }
}
