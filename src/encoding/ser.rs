use super::{constants::*, table::StringTable};
use crate::{
    adaptive::Adaptive,
    bitstream::BitWriter,
    errors::CodecError,
    float::{FloatParts, EXP_BIAS},
    num::Num,
    vecmap::VecMap,
    Value::{self, *},
};

/// Single-document marshaller.
///
/// Owns the stream, the character coder, and the string table for the
/// lifetime of one `marshall` call; nothing survives the call.
pub(crate) struct Marshaller {
    stream: BitWriter,
    chars: Adaptive,
    strings: StringTable,
    depth: usize,
}

impl Marshaller {
    pub(crate) fn new(width: u32) -> Marshaller {
        Marshaller {
            stream: BitWriter::new(width),
            chars: Adaptive::new(),
            strings: StringTable::new(),
            depth: 0,
        }
    }

    pub(crate) fn finish(self) -> Vec<u32> { self.stream.finish() }

    /// Writes one element: a 3-bit type tag, then the payload the tag
    /// calls for.
    pub(crate) fn put_element(&mut self, value: &Value) -> Result<(), CodecError> {
        match value {
            Undef => {
                self.stream.write(TAG_UNDEF, TAG_BITS);
                Ok(())
            }
            Null => {
                self.stream.write(TAG_NULL, TAG_BITS);
                Ok(())
            }
            Bool(true) => {
                self.stream.write(TAG_TRUE, TAG_BITS);
                Ok(())
            }
            Bool(false) => {
                self.stream.write(TAG_FALSE, TAG_BITS);
                Ok(())
            }
            Number(n) => {
                self.stream.write(TAG_NUM, TAG_BITS);
                self.put_num(*n)
            }
            Str(s) => {
                self.stream.write(TAG_STR, TAG_BITS);
                self.put_str(s);
                Ok(())
            }
            Array(items) => {
                self.stream.write(TAG_ARR, TAG_BITS);
                self.put_array(items)
            }
            Map(m) => {
                self.stream.write(TAG_MAP, TAG_BITS);
                self.put_map(m)
            }
        }
    }

    /// One bit selects the integer or floating branch; integers are sign
    /// plus magnitude, doubles travel as their decomposed IEEE-754 fields
    /// with the exponent re-biased so the varint stays non-negative.
    fn put_num(&mut self, n: Num) -> Result<(), CodecError> {
        match n {
            Num::Int(i) => {
                self.stream.write_bool(false);
                self.stream.write_bool(i < 0);
                self.stream.write_var(i.unsigned_abs());
            }
            Num::Double(bits) => {
                if !f64::from_bits(bits).is_finite() {
                    return Err(CodecError::UnsupportedNumber);
                }

                let parts = FloatParts::from_bits(bits);
                self.stream.write_bool(true);
                self.stream.write_bool(parts.sign);
                self.stream.write_var((parts.exponent + EXP_BIAS) as u64);
                self.stream.write_var(parts.significand);
            }
        }
        Ok(())
    }

    /// Back-references a previously written string by its 1-based table
    /// index; a first occurrence is the 0 marker, the length in characters,
    /// and each character through the adaptive coder.
    fn put_str(&mut self, s: &str) {
        match self.strings.lookup(s) {
            Some(idx) => self.stream.write_var(idx),
            None => {
                self.stream.write_var(STR_LITERAL);
                self.strings.intern(s);

                self.stream.write_var(s.chars().count());
                for c in s.chars() {
                    self.chars.write(&mut self.stream, u64::from(u32::from(c)));
                }
            }
        }
    }

    fn put_array(&mut self, items: &[Value]) -> Result<(), CodecError> {
        self.enter()?;
        self.stream.write_var(items.len());
        for item in items {
            self.put_element(item)?;
        }
        self.leave();
        Ok(())
    }

    fn put_map(&mut self, m: &VecMap<String, Value>) -> Result<(), CodecError> {
        self.enter()?;
        self.stream.write_var(m.len());
        for (k, v) in m.iter() {
            self.put_str(k);
            self.put_element(v)?;
        }
        self.leave();
        Ok(())
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
