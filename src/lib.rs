//! # Packson
//!
//! Packson is a binary serialization format for JSON-like values, built for
//! places where textual JSON is too large: URLs, QR-style payloads, and
//! other size-constrained transports. The encoded form is a bit-packed
//! stream compressed by a per-document adaptive entropy coder, with an
//! optional printable-character envelope on top.
//!
//! # Usage
//!
//! Build a [`Value`], marshall it, and get back a sequence of 16-bit cells;
//! demarshalling reverses the trip.
//!
//! ```
//! use packson::prelude::*;
//!
//! let v = Value::from(vec![
//!     Value::from(1),
//!     Value::from("one"),
//!     Value::Null,
//! ]);
//!
//! let cells = marshall(&v).unwrap();
//!
//! assert_eq!(demarshall(&cells).unwrap(), v);
//! ```
//!
//! For transports that want text rather than integers,
//! [`encoding::stringify`] packs 6-bit cells onto a URL-safe alphabet and
//! [`encoding::parse`] reads them back:
//!
//! ```
//! use packson::prelude::*;
//!
//! let url_safe = stringify(&Value::from(vec![1, 2, 3])).unwrap();
//!
//! assert_eq!(parse(&url_safe).unwrap(), Value::from(vec![1, 2, 3]));
//! ```
//!
//! # An overview of packson values
//!
//! [`Value`] covers the JSON data model plus `undefined`: [`Value::Undef`],
//! [`Value::Null`], booleans, numbers ([`Num`]: exact 64-bit integers or
//! doubles), strings, arrays, and insertion-ordered maps ([`VecMap`]).
//!
//! # Specification
//!
//! This section describes the packson wire format.
//!
//! ## Cells
//!
//! The output of `marshall` is a sequence of fixed-width *cells*, 16 bits
//! wide by default and configurable from 1 to 32. Bits fill a cell
//! least-significant first and values split across cell boundaries; the
//! final cell is zero-padded. There is no header, version tag, or length
//! prefix: a decoder must know the cell width out of band and walks the
//! stream structurally from the root element's tag.
//!
//! ## Varints
//!
//! Unsigned integers outside the adaptive coder travel as 7-bit groups,
//! least significant group first, each group followed by one continuation
//! bit (`1` = another group follows).
//!
//! ## Elements
//!
//! Every element starts with a 3-bit type tag:
//!
//! | Tag | Type      | Payload                                    |
//! | --- | ---       | ---                                        |
//! | 0   | Undefined | none                                       |
//! | 1   | Null      | none                                       |
//! | 2   | False     | none                                       |
//! | 3   | True      | none                                       |
//! | 4   | Number    | see below                                  |
//! | 5   | String    | table index or literal                     |
//! | 6   | Array     | varint count, then elements                |
//! | 7   | Map       | varint count, then key string + value each |
//!
//! ## Numbers
//!
//! One bit selects the branch. Integers (`0`): a sign bit, then the
//! magnitude as a varint. Doubles (`1`): a sign bit, then the IEEE-754
//! exponent re-biased to non-negative (unbiased + 1023) as a varint, then
//! the 52-bit significand as a varint. NaN and the infinities are not
//! representable; marshalling one fails with
//! [`errors::CodecError::UnsupportedNumber`].
//!
//! ## Strings
//!
//! Each document carries a string table of every distinct string in first
//! occurrence order, addressed 1-based. A string that has been written
//! before is just its table index as a varint. A new string is the marker
//! index 0, its length in characters as a varint, and each character pushed
//! through the document's adaptive coder, which rebalances toward the
//! document's hottest characters as it goes. Map keys use the same table as
//! string values, so repeated keys across objects cost a few bits each.
//!
//! ## Envelope
//!
//! [`encoding::stringify`] marshalls at width 6 and maps each cell onto
//! `A-Z a-z 0-9 - _`, yielding URL-safe text; [`encoding::parse`] inverts
//! it.

#![warn(
//    missing_docs,
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod adaptive;
pub mod bitstream;
pub mod encoding;
pub mod errors;
pub mod float;
pub mod num;
pub mod prelude;
mod util;
pub mod vecmap;

use failure::*;
use num::Num;
use std::convert::{TryFrom, TryInto};
use vecmap::*;

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// [`Value`] and its variants.
///
/// # Example
///
/// ```
/// use packson::prelude::*;
///
/// let b = Value::Bool(true);
///
/// let val = match b {
///     Value::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Value {
    /// Undefined: a value that exists but holds nothing.
    Undef,
    /// Null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number, either an exact integer or a double.
    ///
    /// # Example
    ///
    /// ```
    /// use packson::prelude::{Value::Number, *};
    ///
    /// let k_num = Number(Num::Int(1));
    /// ```
    Number(Num),
    /// String.
    Str(String),
    /// Array.
    ///
    /// # Example
    ///
    /// ```
    /// use packson::prelude::*;
    ///
    /// let k_array = Value::from(vec![1, 2, 3, 4]);
    /// ```
    Array(Vec<Value>),
    /// Map, in key insertion order.
    ///
    /// ```
    /// use packson::prelude::{Value::Map, *};
    ///
    /// let vmap = VecMap::from(vec![("greeting".to_string(), Value::from("hello"))]);
    ///
    /// let kmap = Map(vmap);
    /// ```
    Map(VecMap<String, Value>),
}

use Value::*;

impl Value {
    /// Converts a [`Value`] to a vector of [`Value`].
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    ///
    /// # Example
    ///
    /// ```
    /// use packson::prelude::*;
    ///
    /// let ks = Value::from(vec![1, 2, 3]);
    ///
    /// let k_numbers = ks.to_vec().unwrap();
    /// ```
    pub fn to_vec(&self) -> Result<&Vec<Value>, Error> {
        match self {
            Array(a) => Ok(a),
            _ => bail!("This value is not an `Array`"),
        }
    }

    /// Consumes a [`Value`], converting it into a vector of [`Value`]s.
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    pub fn into_vec(self) -> Result<Vec<Value>, Error> {
        match self.try_into() {
            Ok(v) => Ok(v),
            Err(_e) => bail!("This value is not an `Array`"),
        }
    }

    /// Converts a [`Value`] to a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Map`].
    pub fn to_vecmap(&self) -> Result<&VecMap<String, Value>, Error> {
        match self {
            Map(vmap) => Ok(vmap),
            _ => bail!("This value is not a `Map`"),
        }
    }

    /// Consumes a [`Value`], converting it into a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Map`].
    pub fn into_vecmap(self) -> Result<VecMap<String, Value>, Error> {
        match self.try_into() {
            Ok(v) => Ok(v),
            Err(_e) => bail!("This value is not a `Map`"),
        }
    }

    /// Indicates whether a value is [`Null`].
    ///
    /// # Example
    ///
    /// ```
    /// use packson::Value::Null;
    ///
    /// assert!(Null.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Indicates whether a value is [`Undef`].
    pub fn is_undef(&self) -> bool {
        match self {
            Undef => true,
            _ => false,
        }
    }

    /// Tries to convert a value to a [`Num`].
    /// This will return an [`Error`] if the value is not a [`Value::Number`].
    ///
    /// # Example
    ///
    /// ```
    /// use packson::prelude::*;
    ///
    /// let ks_num = Value::from(1);
    ///
    /// assert_eq!(ks_num.to_num().unwrap(), Num::Int(1));
    /// ```
    pub fn to_num(&self) -> Result<Num, Error> {
        match self {
            Number(n) => Ok(*n),
            _ => bail!("Value is not a `Number`"),
        }
    }

    /// Tries to convert a value to a [`bool`].
    /// This will return an [`Error`] if the value is not a [`Value::Bool`].
    ///
    /// # Example
    ///
    /// ```
    /// use packson::prelude::*;
    ///
    /// let b = Value::from(true);
    ///
    /// assert!(b.to_bool().unwrap());
    /// ```
    pub fn to_bool(&self) -> Result<bool, Error> {
        match self {
            Bool(b) => Ok(*b),
            _ => bail!("Value is not `Bool`"),
        }
    }

    /// Tries to view a value as a string slice.
    /// This will return an [`Error`] if the value is not a [`Value::Str`].
    ///
    /// # Example
    ///
    /// ```
    /// use packson::prelude::*;
    ///
    /// let foo = Value::from("foo");
    ///
    /// assert_eq!(foo.to_str().unwrap(), "foo");
    /// ```
    pub fn to_str(&self) -> Result<&str, Error> {
        match self {
            Str(s) => Ok(s),
            _ => bail!("Value is not a string"),
        }
    }
}

// TODO make the display nicer for recursive structures
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn fmt_map(m: &VecMap<String, Value>, indent: usize) -> String {
            let mut map_string: String = "{".to_owned();
            for (i, (k, v)) in m.iter().enumerate() {
                if i == 0 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                } else {
                    map_string.push_str(&format!(",\n{:indent$}", "", indent = indent + 2));
                }

                let value = fmt_helper(v, indent + 2);
                map_string.push_str(&format!("\"{key}\": {value}", key = k, value = value));

                // check if we're at last element
                if i == m.len() - 1 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent));
                }
            }
            map_string.push('}');

            map_string
        }

        fn fmt_helper(ks: &Value, indent: usize) -> String {
            match ks {
                Undef => "UNDEFINED".to_owned(),
                Null => "NULL".to_owned(),
                Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_owned(),
                Str(s) => format!("\"{}\"", s),
                Number(n) => format!("{}", n),
                Array(a) => {
                    let mut arr_string: String = "[".to_owned();
                    for (i, ks) in a.iter().enumerate() {
                        if i != 0 {
                            arr_string.push_str(", ");
                        }
                        arr_string.push_str(&format!("{}", ks));
                    }
                    arr_string.push(']');

                    arr_string
                }
                Map(m) => fmt_map(m, indent),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { Str(s.to_string()) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Array(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Value>> From<VecMap<String, T>> for Value {
    fn from(v: VecMap<String, T>) -> Value {
        Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

// bool -> Value, From
from_fn!(Value, bool, Bool);
// bool -> Value, TryFrom
try_from_ctor!(Value, bool, Bool);

// Num -> Value, From
from_fn!(Value, Num, Number);
// Num -> Value, TryFrom
try_from_ctor!(Value, Num, Number);

// String -> Value, From
from_fn!(Value, String, Str);
// String -> Value, TryFrom
try_from_ctor!(Value, String, Str);

try_from_ctor!(Value, Vec<Value>, Array);
try_from_ctor!(Value, VecMap<String, Value>, Map);

// Integers
compose_from!(Value, Num, i64);
compose_from!(Value, Num, i32);
compose_from!(Value, Num, i16);
compose_from!(Value, Num, i8);
compose_from!(Value, Num, u32);
compose_from!(Value, Num, u16);
compose_from!(Value, Num, u8);

// Floats
compose_from!(Value, Num, f64);
compose_from!(Value, Num, f32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Null.is_null());
        assert!(Undef.is_undef());

        assert!(Value::from(5).to_num().is_ok());

        assert!(Value::from(true).to_bool().unwrap());

        assert_eq!(Value::from("word").to_str().unwrap(), "word");
    }

    #[test]
    fn from_vec() {
        let v = vec![0u8, 1, 2, 3, 4];
        let val = Value::from(v.clone());

        assert_eq!(
            val.into_vec().unwrap(),
            v.into_iter().map(Value::from).collect::<Vec<Value>>()
        );
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Value::from(vec![1, 2])), "[1, 2]");
        assert_eq!(format!("{}", Null), "NULL");
    }
}
