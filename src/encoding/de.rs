use super::{constants::*, table::StringTable};
use crate::{
    adaptive::Adaptive,
    bitstream::BitReader,
    errors::CodecError,
    float::{FloatParts, EXP_BIAS},
    num::Num,
    vecmap::VecMap,
    Value::{self, *},
};
use std::convert::TryFrom;

/// Single-document demarshaller; mirrors [`super::ser::Marshaller`]'s
/// traversal bit for bit.
pub(crate) struct Demarshaller<'a> {
    stream: BitReader<'a>,
    chars: Adaptive,
    strings: StringTable,
    depth: usize,
}

impl<'a> Demarshaller<'a> {
    pub(crate) fn new(cells: &'a [u32], width: u32) -> Demarshaller<'a> {
        Demarshaller {
            stream: BitReader::new(cells, width),
            chars: Adaptive::new(),
            strings: StringTable::new(),
            depth: 0,
        }
    }

    pub(crate) fn read_element(&mut self) -> Result<Value, CodecError> {
        match self.stream.read(TAG_BITS)? {
            TAG_UNDEF => Ok(Undef),
            TAG_NULL => Ok(Null),
            TAG_TRUE => Ok(Bool(true)),
            TAG_FALSE => Ok(Bool(false)),
            TAG_NUM => self.read_num(),
            TAG_STR => Ok(Str(self.read_str()?)),
            TAG_ARR => self.read_array(),
            TAG_MAP => self.read_map(),
            tag => Err(CodecError::MalformedStream(format!(
                "unknown type tag {}",
                tag
            ))),
        }
    }

    fn read_num(&mut self) -> Result<Value, CodecError> {
        if self.stream.read_bool()? {
            let sign = self.stream.read_bool()?;

            let biased: u64 = self.stream.read_var()?;
            if biased > MAX_BIASED_EXP {
                return Err(CodecError::MalformedStream(format!(
                    "exponent {} is not a finite double's",
                    biased
                )));
            }

            let significand: u64 = self.stream.read_var()?;
            if significand >> SIG_BITS != 0 {
                return Err(CodecError::MalformedStream(format!(
                    "significand {} wider than {} bits",
                    significand, SIG_BITS
                )));
            }

            let parts = FloatParts {
                sign,
                exponent: biased as i32 - EXP_BIAS,
                significand,
            };
            Ok(Number(Num::Double(parts.to_bits())))
        } else {
            let neg = self.stream.read_bool()?;
            let magnitude: u64 = self.stream.read_var()?;

            let limit = i64::max_value() as u64 + neg as u64;
            if magnitude > limit {
                return Err(CodecError::MalformedStream(format!(
                    "integer magnitude {} does not fit",
                    magnitude
                )));
            }

            let n = if neg {
                (magnitude as i64).wrapping_neg()
            } else {
                magnitude as i64
            };
            Ok(Number(Num::Int(n)))
        }
    }

    fn read_str(&mut self) -> Result<String, CodecError> {
        let idx: u64 = self.stream.read_var()?;

        if idx == STR_LITERAL {
            let len: usize = self.stream.read_var()?;

            // the length is untrusted; preallocation is capped
            let mut s = String::with_capacity(len.min(LEN_CAP));
            for _ in 0..len {
                let code = self.chars.read(&mut self.stream)?;
                let c = u32::try_from(code)
                    .ok()
                    .and_then(std::char::from_u32)
                    .ok_or_else(|| {
                        CodecError::MalformedStream(format!("invalid character code {}", code))
                    })?;
                s.push(c);
            }

            self.strings.intern(&s);
            Ok(s)
        } else {
            match self.strings.get(idx) {
                Some(s) => Ok(s.to_string()),
                None => Err(CodecError::MalformedStream(format!(
                    "string table index {} out of range",
                    idx
                ))),
            }
        }
    }

    fn read_array(&mut self) -> Result<Value, CodecError> {
        self.enter()?;

        let len: u64 = self.stream.read_var()?;
        let mut items = Vec::with_capacity(len.min(LEN_CAP as u64) as usize);
        for _ in 0..len {
            items.push(self.read_element()?);
        }

        self.leave();
        Ok(Array(items))
    }

    fn read_map(&mut self) -> Result<Value, CodecError> {
        self.enter()?;

        let len: u64 = self.stream.read_var()?;
        let mut m = VecMap::with_capacity(len.min(LEN_CAP as u64) as usize);
        for _ in 0..len {
            let key = self.read_str()?;
            let value = self.read_element()?;
            // a repeated key replaces the earlier value in place
            m.insert(key, value);
        }

        self.leave();
        Ok(Map(m))
    }

    fn enter(&mut self) -> Result<(), CodecError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CodecError::InputTooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn leave(&mut self) { self.depth -= 1; }
}
