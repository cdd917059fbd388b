// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step definitions: patterns bound to typed handlers.
//!
//! - [`collection`]: ordered registry and the first-match matcher
//! - [`param`]: coercion of captured text into typed arguments
//! - [`handler`]: adapting typed closures to a uniform invocation
//! - [`world`]: per-step execution context

pub mod collection;
pub mod handler;
pub mod location;
pub mod param;
pub mod world;

pub use self::{
    collection::{Collection, Definition, Match},
    handler::Handler,
    location::Location,
    param::{Kind, Param, Value},
    world::{CaptureName, World},
};
