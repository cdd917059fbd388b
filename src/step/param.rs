// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Argument coercion: converting captured text into typed handler arguments.

use std::{fmt, str::FromStr};

use derive_more::Display;
use sealed::sealed;

use crate::error::CoercionError;

/// Scalar type a handler parameter is declared with.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Kind {
    /// [`bool`], accepting `true` and `false` only.
    #[display("bool")]
    Bool,

    /// [`i8`].
    #[display("i8")]
    I8,

    /// [`i16`].
    #[display("i16")]
    I16,

    /// [`i32`].
    #[display("i32")]
    I32,

    /// [`i64`].
    #[display("i64")]
    I64,

    /// [`isize`].
    #[display("isize")]
    Isize,

    /// [`f32`].
    #[display("f32")]
    F32,

    /// [`f64`].
    #[display("f64")]
    F64,

    /// [`String`], taken as is.
    #[display("string")]
    Str,
}

impl Kind {
    /// Converts the `text` captured by the `index`th group into a [`Value`] of
    /// this [`Kind`].
    ///
    /// # Errors
    ///
    /// If the `text` doesn't represent a value of this [`Kind`] (integer
    /// overflow included).
    pub fn coerce(self, index: usize, text: &str) -> Result<Value, CoercionError> {
        fn parse<T>(
            kind: Kind,
            index: usize,
            text: &str,
        ) -> Result<T, CoercionError>
        where
            T: FromStr,
            T::Err: fmt::Display,
        {
            text.parse().map_err(|e: T::Err| CoercionError::Invalid {
                index,
                kind,
                value: text.to_owned(),
                reason: e.to_string(),
            })
        }

        Ok(match self {
            Self::Bool => Value::Bool(parse(self, index, text)?),
            Self::I8 => Value::I8(parse(self, index, text)?),
            Self::I16 => Value::I16(parse(self, index, text)?),
            Self::I32 => Value::I32(parse(self, index, text)?),
            Self::I64 => Value::I64(parse(self, index, text)?),
            Self::Isize => Value::Isize(parse(self, index, text)?),
            Self::F32 => Value::F32(parse(self, index, text)?),
            Self::F64 => Value::F64(parse(self, index, text)?),
            Self::Str => Value::Str(text.to_owned()),
        })
    }
}

/// Coerced handler argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// [`Kind::Bool`] value.
    Bool(bool),

    /// [`Kind::I8`] value.
    I8(i8),

    /// [`Kind::I16`] value.
    I16(i16),

    /// [`Kind::I32`] value.
    I32(i32),

    /// [`Kind::I64`] value.
    I64(i64),

    /// [`Kind::Isize`] value.
    Isize(isize),

    /// [`Kind::F32`] value.
    F32(f32),

    /// [`Kind::F64`] value.
    F64(f64),

    /// [`Kind::Str`] value.
    Str(String),
}

/// Type allowed as a handler parameter.
///
/// Sealed: parameter types outside of the supported scalars are rejected at
/// compile time.
#[sealed]
pub trait Param: Sized + 'static {
    /// [`Kind`] recorded in the handler's descriptor.
    const KIND: Kind;

    /// Extracts `Self` out of a [`Value`] coerced with [`Param::KIND`].
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_param {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        #[sealed]
        impl Param for $ty {
            const KIND: Kind = Kind::$kind;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    )*};
}

impl_param! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    f32 => F32,
    f64 => F64,
    String => Str,
}

/// Coerces `captures` (the groups of a match, the whole match excluded) into
/// arguments described by `kinds`, in order.
///
/// # Errors
///
/// - [`CoercionError::Arity`] if the counts of `captures` and `kinds` differ.
/// - [`CoercionError::Invalid`] if any capture can't be parsed as its
///   [`Kind`].
///
/// # Example
///
/// ```rust
/// use cuke::step::{param, Kind, Value};
///
/// let args = param::coerce(
///     &[Kind::Bool, Kind::I32],
///     &["true".to_owned(), "42".to_owned()],
/// )?;
///
/// assert_eq!(args, [Value::Bool(true), Value::I32(42)]);
/// # Ok::<_, cuke::error::CoercionError>(())
/// ```
pub fn coerce(
    kinds: &[Kind],
    captures: &[String],
) -> Result<Vec<Value>, CoercionError> {
    if kinds.len() != captures.len() {
        return Err(CoercionError::Arity {
            params: kinds.len(),
            captures: captures.len(),
        });
    }
    kinds
        .iter()
        .zip(captures)
        .enumerate()
        .map(|(i, (kind, text))| kind.coerce(i + 1, text))
        .collect()
}
