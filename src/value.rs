use super::{decode, encode};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A single CBOR data item, owning its children.
///
/// Composite variants hold fresh trees built bottom-up, so cycles cannot be
/// constructed. Maps are ordered by the canonical total order on `Value`
/// (see [`Ord`](#impl-Ord-for-Value)), which gives every tree exactly one
/// encoding.
///
/// `Break` is the framing sentinel that terminates indefinite-length items.
/// The decoder consumes it while reassembling composites and only ever
/// returns it for a bare `0xFF` input; it can be constructed and encoded,
/// but has no place inside a well-formed tree.
#[derive(Clone, Debug, Default)]
pub enum Value {
    Positive(u64),
    /// A negative integer, stored as `|n| - 1`: count 0 is the user integer
    /// -1, count 256 is -257. The full range is [-2^64, -1], wider than
    /// `i64`.
    Negative(u64),
    ByteString(Vec<u8>),
    Utf8String(String),
    Array(Vec<Value>),
    Map(BTreeMap<Value, Value>),
    SemanticTag(u64, Box<Value>),
    Boolean(bool),
    Null,
    #[default]
    Undefined,
    Float(f64),
    Break,
}

impl Value {
    /// Decodes a single value from the front of `data`.
    ///
    /// Trailing bytes are ignored; see [`decode::parse_prefix`] to learn how
    /// many bytes the value occupied.
    pub fn decode(data: &[u8]) -> Result<Self, decode::Error> {
        decode::parse(data)
    }

    /// Encodes this value to a fresh byte vector.
    pub fn encode(&self) -> Vec<u8> {
        encode::emit(self)
    }

    /// Wraps `value` in a semantic tag with the given id.
    pub fn tagged(id: u64, value: Value) -> Self {
        Value::SemanticTag(id, Box::new(value))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Positive(_) => "Positive Integer",
            Value::Negative(_) => "Negative Integer",
            Value::ByteString(_) => "Byte String",
            Value::Utf8String(_) => "Text String",
            Value::Array(_) => "Array",
            Value::Map(_) => "Map",
            Value::SemanticTag(..) => "Semantic Tag",
            Value::Boolean(_) => "Boolean",
            Value::Null => "Null",
            Value::Undefined => "Undefined",
            Value::Float(_) => "Float",
            Value::Break => "Break",
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Positive(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the integer as an `i64` if it is one and fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Positive(n) => i64::try_from(*n).ok(),
            Value::Negative(n) => i64::try_from(*n).ok().map(|n| -1 - n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteString(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Positive(_) => 0,
            Value::Negative(_) => 1,
            Value::ByteString(_) => 2,
            Value::Utf8String(_) => 3,
            Value::Array(_) => 4,
            Value::Map(_) => 5,
            Value::SemanticTag(..) => 6,
            Value::Boolean(_) => 7,
            Value::Null => 8,
            Value::Undefined => 9,
            Value::Float(_) => 10,
            Value::Break => 11,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Positive(a), Value::Positive(b)) => a == b,
            (Value::Negative(a), Value::Negative(b)) => a == b,
            (Value::ByteString(a), Value::ByteString(b)) => a == b,
            (Value::Utf8String(a), Value::Utf8String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::SemanticTag(id_a, a), Value::SemanticTag(id_b, b)) => id_a == id_b && a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null)
            | (Value::Undefined, Value::Undefined)
            | (Value::Break, Value::Break) => true,
            // Floats are equal when their encodings are: every NaN is one
            // value, and +0.0 and -0.0 are distinct.
            (Value::Float(a), Value::Float(b)) => {
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The canonical total order, compatible with CBOR canonical form.
///
/// Values of different variants order by variant declaration position.
/// Within a variant: integers numerically; strings, arrays, and maps by
/// length first, then lexicographically element-wise; tags by id then inner
/// value; floats by their encoded bytes, zero-padded on the right to a
/// common width (which puts float16-width values before float64-width ones
/// and gives all NaNs a single position).
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Positive(a), Value::Positive(b)) => a.cmp(b),
            (Value::Negative(a), Value::Negative(b)) => a.cmp(b),
            (Value::ByteString(a), Value::ByteString(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Value::Utf8String(a), Value::Utf8String(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.as_bytes().cmp(b.as_bytes())),
            (Value::Array(a), Value::Array(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Value::Map(a), Value::Map(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.iter().cmp(b.iter()))
            }
            (Value::SemanticTag(id_a, a), Value::SemanticTag(id_b, b)) => {
                id_a.cmp(id_b).then_with(|| a.cmp(b))
            }
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Null, Value::Null)
            | (Value::Undefined, Value::Undefined)
            | (Value::Break, Value::Break) => Ordering::Equal,
            (Value::Float(a), Value::Float(b)) => encode::float_cmp(*a, *b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Positive(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Positive(value as u64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Positive(value as u64)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Positive(value as u64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        if value >= 0 {
            Value::Positive(value as u64)
        } else {
            // The bitwise complement is -1 - value, without the overflow
            // that negating i64::MIN would hit.
            Value::Negative(!(value as u64))
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::from(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::from(value as i64)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::from(value as i64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Utf8String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Utf8String(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::ByteString(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::ByteString(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<BTreeMap<Value, Value>> for Value {
    fn from(value: BTreeMap<Value, Value>) -> Self {
        Value::Map(value)
    }
}
