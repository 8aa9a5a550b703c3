pub use crate::{
    encoding::{demarshall, demarshall_width, marshall, marshall_width, parse, stringify},
    errors::CodecError,
    float::FloatParts,
    num::Num,
    vecmap::VecMap,
    Value,
};
pub use std::convert::{TryFrom, TryInto};
