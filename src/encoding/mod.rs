//! # Packson binary encoder and decoder
//!
//! Marshalling between [`Value`] trees and packed cell sequences.
//!
//! A `marshall` call owns a fresh bit stream, adaptive character coder, and
//! string table, walks the value tree writing a 3-bit type tag plus payload
//! per node, and returns the packed cells. `demarshall` replays the same
//! traversal in lock-step. The cell sequence is the whole wire format: no
//! header, no version tag, no length prefix. A decoder must know the cell
//! width out of band (16 unless stated otherwise).
//!
//! # Example
//!
//! ```
//! use packson::prelude::*;
//!
//! let v = Value::from(vec![1, 2, 3]);
//!
//! let cells = marshall(&v).unwrap();
//! let back = demarshall(&cells).unwrap();
//!
//! assert_eq!(back, v);
//! ```

use crate::{bitstream::CELL_WIDTH, errors::CodecError, Value};

mod constants;
mod de;
mod ser;
mod table;

use constants::{ENVELOPE_ALPHABET, ENVELOPE_WIDTH};
use de::Demarshaller;
use ser::Marshaller;

/// Marshalls `value` into a sequence of 16-bit cells.
///
/// # Example
///
/// ```
/// use packson::prelude::*;
///
/// // a tag fits one cell
/// assert_eq!(marshall(&Value::Null).unwrap().len(), 1);
/// ```
pub fn marshall(value: &Value) -> Result<Vec<u32>, CodecError> {
    marshall_width(value, CELL_WIDTH)
}

/// Marshalls `value` into cells of the given width (clamped to 1..=32).
pub fn marshall_width(value: &Value, width: u32) -> Result<Vec<u32>, CodecError> {
    let mut m = Marshaller::new(width);
    m.put_element(value)?;
    Ok(m.finish())
}

/// Demarshalls a sequence of 16-bit cells back into a [`Value`].
///
/// # Example
///
/// ```
/// use packson::prelude::*;
///
/// let cells = marshall(&Value::from(true)).unwrap();
///
/// assert_eq!(demarshall(&cells).unwrap(), Value::Bool(true));
/// ```
pub fn demarshall(cells: &[u32]) -> Result<Value, CodecError> {
    demarshall_width(cells, CELL_WIDTH)
}

/// Demarshalls cells of the given width (clamped to 1..=32).
pub fn demarshall_width(cells: &[u32], width: u32) -> Result<Value, CodecError> {
    Demarshaller::new(cells, width).read_element()
}

/// Marshalls at width 6 and maps each cell onto a URL-safe 64-character
/// alphabet.
///
/// # Example
///
/// ```
/// use packson::prelude::*;
///
/// let s = stringify(&Value::from(true)).unwrap();
///
/// assert_eq!(s, "D");
/// assert_eq!(parse(&s).unwrap(), Value::Bool(true));
/// ```
pub fn stringify(value: &Value) -> Result<String, CodecError> {
    let cells = marshall_width(value, ENVELOPE_WIDTH)?;
    Ok(cells
        .into_iter()
        .map(|c| char::from(ENVELOPE_ALPHABET[c as usize]))
        .collect())
}

/// Inverse of [`stringify`]. A character outside the alphabet is a
/// [`CodecError::MalformedStream`].
pub fn parse(s: &str) -> Result<Value, CodecError> {
    let cells = s
        .chars()
        .map(|c| {
            ENVELOPE_ALPHABET
                .iter()
                .position(|&a| char::from(a) == c)
                .map(|i| i as u32)
                .ok_or_else(|| {
                    CodecError::MalformedStream(format!(
                        "character {:?} outside the envelope alphabet",
                        c
                    ))
                })
        })
        .collect::<Result<Vec<u32>, CodecError>>()?;

    demarshall_width(&cells, ENVELOPE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bitstream::BitWriter, num::Num, vecmap::VecMap};

    fn trip(v: Value) {
        let cells = marshall(&v).expect("marshalling failed");
        assert_eq!(demarshall(&cells).expect("demarshalling failed"), v);
    }

    fn map(entries: Vec<(&str, Value)>) -> Value {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<VecMap<String, Value>>(),
        )
    }

    #[test]
    fn tag_only_constants() {
        assert_eq!(marshall(&Value::Undef).unwrap(), vec![0]);
        assert_eq!(marshall(&Value::Null).unwrap(), vec![1]);
        assert_eq!(marshall(&Value::Bool(false)).unwrap(), vec![2]);
        assert_eq!(marshall(&Value::Bool(true)).unwrap(), vec![3]);
    }

    #[test]
    fn int_wire_layout() {
        // tag 4 in bits 0..3, float flag bit 3, sign bit 4, varint from bit 5
        assert_eq!(marshall(&Value::from(0)).unwrap(), vec![4]);
        assert_eq!(marshall(&Value::from(1)).unwrap(), vec![4 | 1 << 5]);
        assert_eq!(marshall(&Value::from(-1)).unwrap(), vec![4 | 1 << 4 | 1 << 5]);
    }

    #[test]
    fn str_wire_layout() {
        // tag 5; literal marker varint 0 (bits 3..11); length varint 1
        // (bits 11..19); empty NYT code word; raw 'A' = 65 (bits 19..27)
        let cells = marshall(&Value::from("A")).unwrap();
        assert_eq!(cells, vec![5 | 1 << 11, 65 << 3]);
    }

    #[test]
    fn scenario_bool() {
        trip(Value::from(true));
    }

    #[test]
    fn scenario_array() {
        trip(Value::from(vec![1, 2, 3]));
    }

    #[test]
    fn scenario_repeated_string_is_backreferenced() {
        let repeated = map(vec![("a", Value::from("x")), ("b", Value::from("x"))]);
        let distinct = map(vec![("a", Value::from("x")), ("b", Value::from("y"))]);
        trip(repeated.clone());

        let repeated = marshall(&repeated).unwrap();
        let distinct = marshall(&distinct).unwrap();
        assert!(
            repeated.len() < distinct.len(),
            "a back-reference ({} cells) should beat a literal ({} cells)",
            repeated.len(),
            distinct.len()
        );
    }

    #[test]
    fn scenario_double() {
        let cells = marshall(&Value::from(3.5)).unwrap();
        match demarshall(&cells).unwrap() {
            Value::Number(n) => assert_eq!(n.to_f64(), Some(3.5)),
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn scenario_envelope() {
        let v = map(vec![("k", Value::Null)]);

        let s = stringify(&v).unwrap();
        assert!(
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "envelope output {:?} strayed off the alphabet",
            s
        );
        assert_eq!(parse(&s).unwrap(), v);
    }

    #[test]
    fn dedup_grows_sublinearly() {
        let one = Value::Array(vec![Value::from("repeated-string-payload")]);
        let many =
            Value::Array(vec![Value::from("repeated-string-payload"); 64]);

        let one = marshall(&one).unwrap();
        let many = marshall(&many).unwrap();

        // 63 extra occurrences cost one table-index varint each
        assert!(
            many.len() < one.len() + 64,
            "repeats should cost O(1) bits each: 1 -> {} cells, 64 -> {} cells",
            one.len(),
            many.len()
        );
    }

    #[test]
    fn boundary_values() {
        trip(Value::from(""));
        trip(Value::Array(vec![]));
        trip(map(vec![]));
        trip(Value::from(0));
        trip(Value::from(-1));
        trip(Value::from(i64::max_value()));
        trip(Value::from(i64::min_value()));
        trip(Value::from(0.0));
        trip(Value::from(-0.0));
        trip(Value::Undef);
        trip(Value::from("héllo, wörld"));
        trip(Value::from("\u{1F680}\u{1F680} astral"));
    }

    #[test]
    fn negative_zero_double_keeps_its_sign() {
        let cells = marshall(&Value::from(-0.0)).unwrap();
        match demarshall(&cells).unwrap() {
            Value::Number(Num::Double(bits)) => {
                assert!(f64::from_bits(bits).is_sign_negative())
            }
            other => panic!("expected a double, got {:?}", other),
        }
    }

    #[test]
    fn nested_structures() {
        trip(Value::from(vec![
            Value::Null,
            Value::from(vec![Value::from(1), Value::from("one")]),
            map(vec![
                ("list", Value::from(vec![2, 3])),
                ("empty", Value::Array(vec![])),
                ("deep", map(vec![("k", Value::Undef)])),
            ]),
        ]));
    }

    #[test]
    fn all_cell_widths() {
        let v = Value::from(vec![
            Value::from(12345),
            Value::from("width check"),
            Value::from(-2.25),
        ]);

        for width in &[1, 2, 5, 6, 7, 8, 13, 16, 24, 32] {
            let cells = marshall_width(&v, *width).unwrap();
            assert_eq!(
                demarshall_width(&cells, *width).unwrap(),
                v,
                "width {} failed",
                width
            );
        }
    }

    #[test]
    fn truncation_is_never_silent() {
        let values = vec![
            Value::from(true),
            Value::from(1234567),
            Value::from("truncate me"),
            Value::from(vec![1, 2, 3]),
            map(vec![("a", Value::from("x")), ("b", Value::from("x"))]),
        ];

        for v in values {
            let cells = marshall(&v).unwrap();
            let trunc = &cells[..cells.len() - 1];
            assert!(
                demarshall(trunc).is_err(),
                "truncating the encoding of {:?} decoded anyway",
                v
            );
        }
    }

    #[test]
    fn empty_input_underflows() {
        assert_eq!(demarshall(&[]), Err(CodecError::BufferUnderflow));
    }

    #[test]
    fn bad_table_index_is_malformed() {
        // tag STR, then a back-reference into an empty table
        let mut w = BitWriter::new(16);
        w.write(5, 3);
        w.write_var(4u64);
        let cells = w.finish();

        match demarshall(&cells) {
            Err(CodecError::MalformedStream(_)) => {}
            other => panic!("expected malformed stream, got {:?}", other),
        }
    }

    #[test]
    fn non_finite_exponent_is_malformed() {
        // tag NUM, float flag, positive sign, exponent field of an infinity
        let mut w = BitWriter::new(16);
        w.write(4, 3);
        w.write(1, 1);
        w.write(0, 1);
        w.write_var(0x7ffu64);
        w.write_var(0u64);
        let cells = w.finish();

        match demarshall(&cells) {
            Err(CodecError::MalformedStream(_)) => {}
            other => panic!("expected malformed stream, got {:?}", other),
        }
    }

    #[test]
    fn nan_and_infinity_are_rejected() {
        for &f in &[
            std::f64::NAN,
            std::f64::INFINITY,
            std::f64::NEG_INFINITY,
        ] {
            assert_eq!(
                marshall(&Value::from(f)),
                Err(CodecError::UnsupportedNumber)
            );
        }
    }

    #[test]
    fn deep_input_is_guarded() {
        let mut v = Value::from(0);
        for _ in 0..600 {
            v = Value::Array(vec![v]);
        }

        assert_eq!(marshall(&v), Err(CodecError::InputTooDeep(512)));

        // a stream nesting arrays past the guard trips it on the way in too
        let mut w = BitWriter::new(16);
        for _ in 0..600 {
            w.write(6, 3);
            w.write_var(1u64);
        }
        let cells = w.finish();
        assert_eq!(demarshall(&cells), Err(CodecError::InputTooDeep(512)));
    }
}
