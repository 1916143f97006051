use super::header::{Header, MajorType, Width};
use super::Value;
use std::collections::BTreeMap;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Default bound on nesting depth. Inputs nested deeper than this fail with
/// [`Error::MaxRecursion`] instead of overflowing the stack.
pub const MAX_RECURSION: usize = 1024;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not enough data for encoded value")]
    EndOfInput,

    #[error("Reserved additional-information value {0}")]
    ReservedCount(u8),

    #[error("Illegal special value {0}")]
    IllegalSpecial(u8),

    #[error("Incorrect type, expecting {0}, found {1}")]
    InvalidType(String, String),

    #[error(transparent)]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Maximum recursion depth reached")]
    MaxRecursion,
}

/// Decodes a single value from the front of `data`. Trailing bytes are
/// ignored.
pub fn parse(data: &[u8]) -> Result<Value, Error> {
    parse_prefix(data).map(|(value, _)| value)
}

/// Decodes a single value, additionally reporting how many bytes of `data`
/// it occupied.
pub fn parse_prefix(data: &[u8]) -> Result<(Value, usize), Error> {
    parse_with_limit(data, MAX_RECURSION)
}

/// As [`parse_prefix`], with a caller-chosen bound on nesting depth.
pub fn parse_with_limit(data: &[u8], max_recursion: usize) -> Result<(Value, usize), Error> {
    let mut offset = 0;
    let value = parse_value(data, &mut offset, max_recursion)?;
    Ok((value, offset))
}

fn recurse(max_recursion: usize) -> Result<usize, Error> {
    max_recursion.checked_sub(1).ok_or(Error::MaxRecursion)
}

fn parse_value(data: &[u8], offset: &mut usize, max_recursion: usize) -> Result<Value, Error> {
    let header = Header::read(data, offset)?;
    match header.major {
        MajorType::PositiveInteger => Ok(Value::Positive(header.definite_count()?)),
        MajorType::NegativeInteger => Ok(Value::Negative(header.definite_count()?)),
        MajorType::ByteString => {
            let bytes = match header.count()? {
                Some(count) => parse_definite_bytes(data, offset, count)?,
                None => {
                    let max_recursion = recurse(max_recursion)?;
                    let mut bytes = Vec::new();
                    loop {
                        match parse_value(data, offset, max_recursion)? {
                            Value::Break => break,
                            Value::ByteString(chunk) => bytes.extend(chunk),
                            value => {
                                return Err(Error::InvalidType(
                                    "Byte String".to_string(),
                                    value.type_name().to_string(),
                                ))
                            }
                        }
                    }
                    bytes
                }
            };
            Ok(Value::ByteString(bytes))
        }
        MajorType::Utf8String => {
            let string = match header.count()? {
                Some(count) => String::from_utf8(parse_definite_bytes(data, offset, count)?)?,
                None => {
                    let max_recursion = recurse(max_recursion)?;
                    let mut string = String::new();
                    loop {
                        match parse_value(data, offset, max_recursion)? {
                            Value::Break => break,
                            Value::Utf8String(chunk) => string.push_str(&chunk),
                            value => {
                                return Err(Error::InvalidType(
                                    "Text String".to_string(),
                                    value.type_name().to_string(),
                                ))
                            }
                        }
                    }
                    string
                }
            };
            Ok(Value::Utf8String(string))
        }
        MajorType::Array => {
            let max_recursion = recurse(max_recursion)?;
            let mut items = Vec::new();
            match header.count()? {
                Some(count) => {
                    for _ in 0..count {
                        items.push(parse_value(data, offset, max_recursion)?);
                    }
                }
                None => loop {
                    match parse_value(data, offset, max_recursion)? {
                        Value::Break => break,
                        value => items.push(value),
                    }
                },
            }
            Ok(Value::Array(items))
        }
        MajorType::Map => {
            let max_recursion = recurse(max_recursion)?;
            // Duplicate keys are not an error; the later pair wins.
            let mut map = BTreeMap::new();
            match header.count()? {
                Some(count) => {
                    for _ in 0..count {
                        let key = parse_value(data, offset, max_recursion)?;
                        let value = parse_value(data, offset, max_recursion)?;
                        map.insert(key, value);
                    }
                }
                None => loop {
                    let key = parse_value(data, offset, max_recursion)?;
                    if matches!(key, Value::Break) {
                        break;
                    }
                    let value = parse_value(data, offset, max_recursion)?;
                    map.insert(key, value);
                },
            }
            Ok(Value::Map(map))
        }
        MajorType::SemanticTag => {
            let id = header.definite_count()?;
            let max_recursion = recurse(max_recursion)?;
            let inner = parse_value(data, offset, max_recursion)?;
            Ok(Value::SemanticTag(id, Box::new(inner)))
        }
        MajorType::SpecialFloat => match header.width {
            Width::Tiny => match header.arg {
                20 => Ok(Value::Boolean(false)),
                21 => Ok(Value::Boolean(true)),
                22 => Ok(Value::Null),
                23 => Ok(Value::Undefined),
                31 => Ok(Value::Break),
                arg => Err(Error::IllegalSpecial(arg as u8)),
            },
            Width::One => Err(Error::IllegalSpecial(header.arg as u8)),
            Width::Two => {
                let arg = header.arg as u16;
                // A float16 NaN widens to the canonical quiet NaN; its
                // fraction bits are not carried into the payload.
                if arg & 0x7C00 == 0x7C00 && arg & 0x03FF != 0 {
                    Ok(Value::Float(f64::NAN))
                } else {
                    Ok(Value::Float(half::f16::from_bits(arg).into()))
                }
            }
            Width::Four => Ok(Value::Float(f32::from_bits(header.arg as u32).into())),
            Width::Eight => Ok(Value::Float(f64::from_bits(header.arg))),
        },
    }
}

fn parse_definite_bytes(data: &[u8], offset: &mut usize, count: u64) -> Result<Vec<u8>, Error> {
    let remaining = &data[*offset..];
    if count > remaining.len() as u64 {
        return Err(Error::EndOfInput);
    }
    let count = count as usize;
    *offset += count;
    Ok(remaining[..count].to_vec())
}
