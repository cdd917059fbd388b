// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line-oriented [Gherkin] runner.
//!
//! Feature texts are parsed line by line into a [`Document`] of scenarios,
//! backgrounds, scenario outlines and inert printable lines. Every step of
//! every ordinary scenario is then matched against regex-bound handlers
//! registered on a [`Runner`], with captured text coerced into the handlers'
//! typed arguments. Outcomes are aggregated into a [`Report`].
//!
//! ```rust
//! use cuke::{Runner, World};
//!
//! let mut runner = Runner::new()
//!     .quiet()
//!     .step(r"^(\w+) is (\d+)$", |_: &mut World, total: &mut i64, _: String, n: i64| {
//!         *total += n;
//!     })?
//!     .step("nothing yet", |w: &mut World, _: &mut i64| w.pending())?;
//!
//! let mut total = 0;
//! let report = runner.execute(
//!     "Feature: counting
//!        Scenario Outline: adding
//!          Given <name> is <n>
//!          Then nothing yet
//!          And never checked
//!        Examples:
//!          | name | n |
//!          | one  | 1 |
//!          | two  | 2 |",
//!     &mut total,
//! )?;
//!
//! assert_eq!(total, 3);
//! assert_eq!(
//!     report.to_string(),
//!     "2 scenarios\n6 steps(2 skipped, 2 passed, 2 pending)",
//! );
//! # Ok::<_, cuke::Error>(())
//! ```
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(missing_debug_implementations, missing_docs)]

pub mod cli;
pub mod data_table;
pub mod error;
pub mod features;
pub mod parser;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod step;
pub mod writer;

#[doc(inline)]
pub use self::{
    data_table::{DataTable, Row},
    error::{Error, Result},
    parser::{parse, Document, Parser},
    report::{Outcome, Report},
    runner::Runner,
    scenario::{Node, Outline, Printable, Scenario, Step},
    step::{Kind, World},
};
