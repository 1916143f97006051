use super::header::{Header, MajorType, Width};
use super::Value;
use std::cmp::Ordering;

/// Accumulates the encoded form of one or more values.
#[derive(Default)]
pub struct Encoder {
    data: Vec<u8>,
}

impl Encoder {
    /// Appends the encoding of `value`, returning the number of bytes
    /// written.
    pub fn emit(&mut self, value: &Value) -> usize {
        let start = self.data.len();
        self.emit_value(value);
        self.data.len() - start
    }

    /// Consumes the encoder, yielding the accumulated bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn emit_value(&mut self, value: &Value) {
        match value {
            Value::Positive(n) => {
                Header::with_count(MajorType::PositiveInteger, *n).write(&mut self.data)
            }
            Value::Negative(n) => {
                Header::with_count(MajorType::NegativeInteger, *n).write(&mut self.data)
            }
            Value::ByteString(bytes) => {
                Header::with_count(MajorType::ByteString, bytes.len() as u64)
                    .write(&mut self.data);
                self.data.extend_from_slice(bytes);
            }
            Value::Utf8String(s) => {
                Header::with_count(MajorType::Utf8String, s.len() as u64).write(&mut self.data);
                self.data.extend_from_slice(s.as_bytes());
            }
            Value::Array(items) => {
                Header::with_count(MajorType::Array, items.len() as u64).write(&mut self.data);
                for item in items {
                    self.emit_value(item);
                }
            }
            Value::Map(map) => {
                Header::with_count(MajorType::Map, map.len() as u64).write(&mut self.data);
                for (key, value) in map {
                    self.emit_value(key);
                    self.emit_value(value);
                }
            }
            Value::SemanticTag(id, inner) => {
                Header::with_count(MajorType::SemanticTag, *id).write(&mut self.data);
                self.emit_value(inner);
            }
            Value::Boolean(b) => {
                Header::with_width(MajorType::SpecialFloat, Width::Tiny, if *b { 21 } else { 20 })
                    .write(&mut self.data)
            }
            Value::Null => {
                Header::with_width(MajorType::SpecialFloat, Width::Tiny, 22).write(&mut self.data)
            }
            Value::Undefined => {
                Header::with_width(MajorType::SpecialFloat, Width::Tiny, 23).write(&mut self.data)
            }
            Value::Float(f) => float_header(*f).write(&mut self.data),
            Value::Break => Header::indefinite(MajorType::SpecialFloat).write(&mut self.data),
        }
    }
}

/// Encodes a single value to a fresh byte vector.
pub fn emit(value: &Value) -> Vec<u8> {
    let mut e = Encoder::default();
    e.emit(value);
    e.into_data()
}

fn lossless_float_coerce<T>(value: f64) -> Option<T>
where
    T: num_traits::FromPrimitive + Into<f64> + Copy,
{
    match <T as num_traits::FromPrimitive>::from_f64(value) {
        Some(f) if <T as Into<f64>>::into(f) == value => Some(f),
        _ => None,
    }
}

/// Narrows an f32 to binary16 only when no information is lost.
///
/// NaN collapses to the canonical quiet pattern 0x7E00. A finite value must
/// have a normal-range binary16 exponent and 13 trailing zero significand
/// bits; values that would only fit as binary16 subnormals are not narrowed.
pub(crate) fn lossless_f16(value: f32) -> Option<half::f16> {
    if value == 0.0 {
        return Some(half::f16::from_bits(if value.is_sign_negative() {
            0x8000
        } else {
            0x0000
        }));
    }
    if value.is_infinite() {
        return Some(half::f16::from_bits(if value.is_sign_negative() {
            0xFC00
        } else {
            0x7C00
        }));
    }
    if value.is_nan() {
        return Some(half::f16::from_bits(0x7E00));
    }
    let bits = value.to_bits();
    let exponent = ((bits >> 23) & 0xFF) as i32 - 127;
    let fraction = bits & 0x007F_FFFF;
    if (-14..=15).contains(&exponent) && fraction & 0x1FFF == 0 {
        let sign = ((bits >> 16) & 0x8000) as u16;
        let biased = ((exponent + 15) as u16) << 10;
        Some(half::f16::from_bits(sign | biased | (fraction >> 13) as u16))
    } else {
        None
    }
}

/// Selects the narrowest of the three float widths that represents `value`
/// exactly. NaN always takes the canonical 2-byte form.
pub(crate) fn float_header(value: f64) -> Header {
    if value.is_nan() {
        return Header::with_width(MajorType::SpecialFloat, Width::Two, 0x7E00);
    }
    match lossless_float_coerce::<f32>(value) {
        Some(f) => match lossless_f16(f) {
            Some(h) => Header::with_width(MajorType::SpecialFloat, Width::Two, h.to_bits() as u64),
            None => Header::with_width(MajorType::SpecialFloat, Width::Four, f.to_bits() as u64),
        },
        None => Header::with_width(MajorType::SpecialFloat, Width::Eight, value.to_bits()),
    }
}

/// Compares two floats by their encoded bytes, zero-padded on the right to
/// a common width.
///
/// The buffer spans the widest (float64) encoding so that doubles differing
/// only in their trailing mantissa bytes never compare equal.
pub(crate) fn float_cmp(a: f64, b: f64) -> Ordering {
    fn padded(value: f64) -> [u8; 9] {
        let mut data = Vec::with_capacity(9);
        float_header(value).write(&mut data);
        let mut out = [0u8; 9];
        out[..data.len()].copy_from_slice(&data);
        out
    }
    padded(a).cmp(&padded(b))
}
