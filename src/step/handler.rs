// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Adapting typed closures into uniformly callable step handlers.

use crate::error::CoercionError;

use super::{
    param::{Kind, Param, Value},
    World,
};

/// Closure usable as a step handler.
///
/// Implemented for every `Fn(&mut World, &mut S, A1, …, An)` with `n <= 8`
/// and each `Ai` being a [`Param`]. `Args` is the tuple `(A1, …, An)`, only
/// there to tell the implementations apart.
///
/// # Example
///
/// ```rust
/// use cuke::step::{Handler, Kind, World};
///
/// fn kinds<S, A, H: Handler<S, A>>(_: &H) -> Vec<Kind> {
///     H::kinds()
/// }
///
/// let handler = |_: &mut World, _: &mut (), _: bool, _: i32| {};
/// assert_eq!(kinds(&handler), [Kind::Bool, Kind::I32]);
/// ```
pub trait Handler<S, Args>: 'static {
    /// Descriptor of the declared parameters, in order.
    fn kinds() -> Vec<Kind>;

    /// Invokes this handler with `args` coerced according to
    /// [`Handler::kinds()`].
    ///
    /// # Errors
    ///
    /// If `args` don't match [`Handler::kinds()`].
    fn invoke(
        &self,
        world: &mut World,
        state: &mut S,
        args: Vec<Value>,
    ) -> Result<(), CoercionError>;
}

macro_rules! impl_handler {
    ($($arg:ident),*) => {
        impl<S, F, $($arg: Param,)*> Handler<S, ($($arg,)*)> for F
        where
            F: Fn(&mut World, &mut S, $($arg),*) + 'static,
        {
            fn kinds() -> Vec<Kind> {
                vec![$($arg::KIND),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn invoke(
                &self,
                world: &mut World,
                state: &mut S,
                args: Vec<Value>,
            ) -> Result<(), CoercionError> {
                let arity = CoercionError::Arity {
                    params: Self::kinds().len(),
                    captures: args.len(),
                };
                if args.len() != Self::kinds().len() {
                    return Err(arity);
                }
                let mut args = args.into_iter();
                $(
                    let $arg = args
                        .next()
                        .and_then($arg::from_value)
                        .ok_or_else(|| arity.clone())?;
                )*
                self(world, state, $($arg),*);
                Ok(())
            }
        }
    };
}

impl_handler!();
impl_handler!(A1);
impl_handler!(A1, A2);
impl_handler!(A1, A2, A3);
impl_handler!(A1, A2, A3, A4);
impl_handler!(A1, A2, A3, A4, A5);
impl_handler!(A1, A2, A3, A4, A5, A6);
impl_handler!(A1, A2, A3, A4, A5, A6, A7);
impl_handler!(A1, A2, A3, A4, A5, A6, A7, A8);
