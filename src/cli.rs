// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI (command line interface) options of a [`Runner`].
//!
//! [`Runner`]: crate::Runner

use std::path::PathBuf;

use smart_default::SmartDefault;

use crate::writer::Coloring;

pub use clap::{Args, Parser};

/// Root CLI of a test binary driving a [`Runner`].
///
/// May be extended with custom CLI options.
///
/// # Example
///
/// ```rust
/// use cuke::cli::{self, Parser as _};
///
/// #[derive(cli::Args, Default)] // re-export of `clap::Args`
/// struct Custom {
///     /// Number of cucumbers in the basket.
///     #[arg(long, default_value_t = 12)]
///     basket: u32,
/// }
///
/// let opts = cli::Opts::<Custom>::parse_from(["test", "--color", "never"]);
///
/// assert_eq!(opts.runner.color, cuke::writer::Coloring::Never);
/// assert_eq!(opts.runner.features, std::path::Path::new("features"));
/// assert_eq!(opts.custom.basket, 12);
/// ```
///
/// [`Runner`]: crate::Runner
#[derive(Clone, Debug, Default, clap::Parser)]
#[command(name = "cuke", about = "Run the features, eat a cucumber!")]
pub struct Opts<Custom = Empty>
where
    Custom: Args,
{
    /// [`Runner`] CLI options.
    ///
    /// [`Runner`]: crate::Runner
    #[command(flatten)]
    pub runner: Cli,

    /// Additional custom CLI options.
    #[command(flatten)]
    pub custom: Custom,
}

impl<Custom: Args> Opts<Custom> {
    /// Shortcut for [`clap::Parser::parse()`], which doesn't require the trait
    /// being imported.
    #[must_use]
    pub fn parsed() -> Self {
        <Self as clap::Parser>::parse()
    }
}

/// CLI options of a [`Runner`].
///
/// [`Runner`]: crate::Runner
#[derive(Clone, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Coloring policy for a console output.
    #[arg(long, value_name = "auto|always|never", default_value = "auto")]
    #[default(Coloring::Auto)]
    pub color: Coloring,

    /// Directory to look for `.feature` files in.
    #[arg(long, value_name = "dir", default_value = "features")]
    #[default(PathBuf::from("features"))]
    pub features: PathBuf,

    /// Suppress the per-line trace, only the summary is printed.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Empty CLI options.
#[derive(Args, Clone, Copy, Debug, Default)]
#[group(skip)]
pub struct Empty;
