//! Numbers carried by the document model.

use crate::{from_as, from_fn};
use std::convert::TryFrom;

/// `Num`s are either exact 64-bit integers or doubles.
///
/// Doubles are held by bit pattern so that equality, ordering, and hashing
/// derive structurally; [`Num::to_f64`] recovers the value. The wire format
/// keeps the two cases apart: an `Int` travels as sign plus magnitude, a
/// `Double` as its decomposed IEEE-754 fields, so `Int(3)` and
/// `Double(3.0)` are distinct values that each round-trip as themselves.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
pub enum Num {
    /// Exact integer.
    Int(i64),
    /// A double, stored as its IEEE-754 bit pattern.
    Double(u64),
}

use Num::*;

from_fn!(Num, i64, Int);
from_fn!(Num, f64, |f: f64| Double(f.to_bits()));

from_as!(Num, i32, i64);
from_as!(Num, i16, i64);
from_as!(Num, i8, i64);

from_as!(Num, u32, i64);
from_as!(Num, u16, i64);
from_as!(Num, u8, i64);

from_as!(Num, f32, f64);

impl TryFrom<Num> for i64 {
    type Error = Num;

    fn try_from(n: Num) -> Result<i64, Num> {
        match n {
            Int(i) => Ok(i),
            _ => Err(n),
        }
    }
}

impl TryFrom<Num> for f64 {
    type Error = Num;

    fn try_from(n: Num) -> Result<f64, Num> {
        match n {
            Double(bits) => Ok(f64::from_bits(bits)),
            _ => Err(n),
        }
    }
}

impl Num {
    /// Produces the integer if `self` is an `Int`, otherwise returns `None`.
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Int(i) => Some(i),
            _ => None,
        }
    }

    /// Produces the double if `self` is a `Double`, otherwise returns
    /// `None`.
    pub fn to_f64(self) -> Option<f64> {
        match self {
            Double(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    /// Whether the number can be marshalled: integers always, doubles
    /// unless they are NaN or infinite.
    pub fn is_finite(self) -> bool {
        match self {
            Int(_) => true,
            Double(bits) => f64::from_bits(bits).is_finite(),
        }
    }
}

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Int(i) => write!(f, "{}", i),
            Double(bits) => write!(f, "{}", f64::from_bits(*bits)),
        }
    }
}
