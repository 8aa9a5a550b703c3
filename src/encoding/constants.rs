/// Bits in a type tag.
pub(crate) const TAG_BITS: u32 = 3;

/// Undefined type tag.
pub(crate) const TAG_UNDEF: u32 = 0;
/// Null type tag.
pub(crate) const TAG_NULL: u32 = 1;
/// False type tag.
pub(crate) const TAG_FALSE: u32 = 2;
/// True type tag.
pub(crate) const TAG_TRUE: u32 = 3;
/// Number type tag.
pub(crate) const TAG_NUM: u32 = 4;
/// String type tag.
pub(crate) const TAG_STR: u32 = 5;
/// Array type tag.
pub(crate) const TAG_ARR: u32 = 6;
/// Map type tag.
pub(crate) const TAG_MAP: u32 = 7;

/// Table index meaning "new string, literal follows".
pub(crate) const STR_LITERAL: u64 = 0;

/// Biased exponents of 0x7ff are NaN or an infinity, which the format
/// excludes.
pub(crate) const MAX_BIASED_EXP: u64 = 0x7fe;

/// Bits in a double's significand.
pub(crate) const SIG_BITS: u32 = 52;

/// Nesting guard for both marshalling and demarshalling.
pub(crate) const MAX_DEPTH: usize = 512;

/// Preallocation cap for lengths read off the wire.
pub(crate) const LEN_CAP: usize = 1024;

/// Cell width used by the printable envelope.
pub(crate) const ENVELOPE_WIDTH: u32 = 6;

/// URL-safe alphabet of the printable envelope, one character per 6-bit
/// cell.
pub(crate) const ENVELOPE_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
