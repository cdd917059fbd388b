// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ordered registry of step definitions and the first-match matcher.

use derive_more::Debug;
use regex::Regex;
use tracing::debug;

use crate::error::{CoercionError, RegistrationError};

use super::{
    param::{self, Kind, Value},
    CaptureName, Handler, Location, World,
};

/// Type-erased handler invocation.
type Erased<S> =
    Box<dyn Fn(&mut World, &mut S, Vec<Value>) -> Result<(), CoercionError>>;

/// Registered step: a pattern bound to a handler.
#[derive(Debug)]
pub struct Definition<S> {
    regex: Regex,

    /// Declared parameter kinds, in order.
    kinds: Vec<Kind>,

    location: Location,

    #[debug(skip)]
    handler: Erased<S>,
}

impl<S> Definition<S> {
    /// Pattern this [`Definition`] matches step text against.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Descriptor of the handler's parameters.
    #[must_use]
    pub fn kinds(&self) -> &[Kind] {
        &self.kinds
    }

    /// Where this [`Definition`] was registered.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Invokes the handler with already coerced `args`.
    ///
    /// # Errors
    ///
    /// If `args` don't fit the handler's parameters.
    pub fn invoke(
        &self,
        world: &mut World,
        state: &mut S,
        args: Vec<Value>,
    ) -> Result<(), CoercionError> {
        (self.handler)(world, state, args)
    }
}

/// [`Definition`] matching some step text, along with its captures.
#[derive(Debug)]
pub struct Match<'c, S> {
    definition: &'c Definition<S>,

    /// Whole match first, then every group.
    captures: Vec<(CaptureName, String)>,
}

impl<'c, S> Match<'c, S> {
    /// The matched [`Definition`].
    #[must_use]
    pub const fn definition(&self) -> &'c Definition<S> {
        self.definition
    }

    /// Captures of the match, the whole match first.
    #[must_use]
    pub fn captures(&self) -> &[(CaptureName, String)] {
        &self.captures
    }

    /// Coerces the captured groups into the handler's arguments.
    ///
    /// # Errors
    ///
    /// See [`param::coerce()`].
    pub fn args(&self) -> Result<Vec<Value>, CoercionError> {
        let groups = self
            .captures
            .iter()
            .skip(1)
            .map(|(_, v)| v.clone())
            .collect::<Vec<_>>();
        param::coerce(&self.definition.kinds, &groups)
    }

    /// Consumes this [`Match`] returning its captures.
    #[must_use]
    pub fn into_captures(self) -> Vec<(CaptureName, String)> {
        self.captures
    }
}

/// Step [`Definition`]s, in registration order.
#[derive(Debug)]
pub struct Collection<S> {
    definitions: Vec<Definition<S>>,
}

// Implemented manually to omit redundant `S: Default` trait bound, imposed by
// `#[derive(Default)]`.
impl<S> Default for Collection<S> {
    fn default() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }
}

impl<S: 'static> Collection<S> {
    /// Creates a new empty [`Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered [`Definition`]s, in registration order.
    #[must_use]
    pub fn definitions(&self) -> &[Definition<S>] {
        &self.definitions
    }

    /// Binds the `pattern` to the `handler`.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::Pattern`] if the `pattern` doesn't compile.
    /// - [`RegistrationError::Arity`] if the `pattern`'s capture groups don't
    ///   match the `handler`'s parameters in number.
    #[track_caller]
    pub fn register<A, H>(
        &mut self,
        pattern: &str,
        handler: H,
    ) -> Result<(), RegistrationError>
    where
        A: 'static,
        H: Handler<S, A>,
    {
        let location = Location::caller();
        let regex =
            Regex::new(pattern).map_err(|source| RegistrationError::Pattern {
                pattern: pattern.to_owned(),
                source,
            })?;

        let kinds = H::kinds();
        let groups = regex.captures_len() - 1;
        if groups != kinds.len() {
            return Err(RegistrationError::Arity {
                pattern: pattern.to_owned(),
                params: kinds.len(),
                groups,
            });
        }

        debug!(pattern, %location, ?kinds, "registered step");
        self.definitions.push(Definition {
            regex,
            kinds,
            location,
            handler: Box::new(
                move |world: &mut World, state: &mut S, args: Vec<Value>| {
                    handler.invoke(world, state, args)
                },
            ),
        });
        Ok(())
    }

    /// Returns the first registered [`Definition`] whose pattern matches
    /// anywhere in the `text`.
    ///
    /// Groups that didn't participate in the match are captured as empty
    /// strings.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<Match<'_, S>> {
        self.definitions.iter().find_map(|definition| {
            let caps = definition.regex.captures(text)?;
            let captures = definition
                .regex
                .capture_names()
                .zip(caps.iter())
                .map(|(name, m)| {
                    (
                        name.map(str::to_owned),
                        m.map_or("", |m| m.as_str()).to_owned(),
                    )
                })
                .collect();
            Some(Match {
                definition,
                captures,
            })
        })
    }
}
