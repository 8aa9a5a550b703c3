use failure::Fail;

#[derive(Clone, Debug, Eq, Fail, PartialEq)]
/// Errors surfaced by marshalling, demarshalling, and the bit streams they
/// drive. Decoding is all-or-nothing: bit-level misalignment after any of
/// these makes continued reading meaningless, so none are recoverable
/// mid-stream.
pub enum CodecError {
    /// A read ran past the end of the cell sequence. Always a corrupt or
    /// truncated input.
    #[fail(display = "buffer underflow")]
    BufferUnderflow,

    /// A tag, table index, or varint decoded to an out-of-range value.
    #[fail(display = "malformed stream: {}", _0)]
    MalformedStream(String),

    /// NaN or an infinity reached the number marshaller.
    #[fail(display = "cannot marshall a non-finite number")]
    UnsupportedNumber,

    /// The value tree or the stream nests deeper than the guard allows.
    #[fail(display = "input nests deeper than {} levels", _0)]
    InputTooDeep(usize),
}
