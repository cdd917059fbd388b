// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loading `.feature` files from the file system.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{error::Result, Report, Runner};

/// Returns the `.feature` files (extension matched case-insensitively) right
/// inside the `dir`, sorted by path. Sub-directories are not descended into.
///
/// # Errors
///
/// If the `dir` can't be walked.
pub fn feature_files(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("`{}` is not a directory", dir.display()),
        ));
    }

    let walker = globwalk::GlobWalkerBuilder::new(dir, "*.feature")
        .case_insensitive(true)
        .max_depth(1)
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut paths = walker
        .map(|entry| {
            entry
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
        })
        .filter(|entry| {
            entry.as_ref().map_or(true, |e| e.file_type().is_file())
        })
        .map(|entry| entry.map(|e| e.into_path()))
        .collect::<io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

impl<S: 'static> Runner<S> {
    /// Runs the feature file at the given `path`, writing its summary to the
    /// trace.
    ///
    /// # Errors
    ///
    /// If the file can't be read, or see [`Runner::execute()`].
    pub fn run_feature(
        &mut self,
        path: impl AsRef<Path>,
        state: &mut S,
    ) -> Result<Report> {
        let path = path.as_ref();
        debug!(path = %path.display(), "running feature file");
        let text = fs::read_to_string(path)?;
        let report = self.execute(&text, state)?;
        self.trace_summary(&report)?;
        Ok(report)
    }

    /// Runs every `.feature` file right inside the `dir` (see
    /// [`feature_files()`]) one after another, each parsed on its own.
    ///
    /// Returns the combined [`Report`] of all of them.
    ///
    /// # Errors
    ///
    /// If the `dir` can't be walked, or see [`Runner::run_feature()`].
    pub fn run_dir(
        &mut self,
        dir: impl AsRef<Path>,
        state: &mut S,
    ) -> Result<Report> {
        let files = feature_files(dir)?;
        info!(count = files.len(), "found feature files");

        let mut total = Report::new();
        for path in files {
            total += self.run_feature(&path, state)?;
        }
        Ok(total)
    }

    /// Runs every `.feature` file in the [`Runner::features()`] directory.
    ///
    /// # Errors
    ///
    /// See [`Runner::run_dir()`].
    pub fn run(&mut self, state: &mut S) -> Result<Report> {
        let dir = self.features().to_path_buf();
        self.run_dir(dir, state)
    }
}
