use super::decode::Error;

/// The major type carried in the high 3 bits of every head byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MajorType {
    PositiveInteger = 0,
    NegativeInteger = 1,
    ByteString = 2,
    Utf8String = 3,
    Array = 4,
    Map = 5,
    SemanticTag = 6,
    SpecialFloat = 7,
}

/// The physical encoding of a header argument.
///
/// The width survives decoding because it is meaningful for major type 7: a
/// 2-byte argument is a float16 where a 4-byte argument is a float32, so two
/// headers with equal numeric arguments are not interchangeable. For every
/// other major type the width is purely a size optimization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Width {
    Tiny,
    One,
    Two,
    Four,
    Eight,
}

/// A decoded head byte plus its argument bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub major: MajorType,
    pub width: Width,
    pub arg: u64,
}

impl Header {
    /// Builds a header using the smallest width that can carry `count`.
    pub fn with_count(major: MajorType, count: u64) -> Self {
        let width = if count < 24 {
            Width::Tiny
        } else if count <= u8::MAX as u64 {
            Width::One
        } else if count <= u16::MAX as u64 {
            Width::Two
        } else if count <= u32::MAX as u64 {
            Width::Four
        } else {
            Width::Eight
        };
        Self { major, width, arg: count }
    }

    /// Builds a header with an explicit width, honored verbatim.
    pub fn with_width(major: MajorType, width: Width, arg: u64) -> Self {
        Self { major, width, arg }
    }

    /// Builds the indefinite-length introducer for `major`.
    pub fn indefinite(major: MajorType) -> Self {
        Self {
            major,
            width: Width::Tiny,
            arg: 31,
        }
    }

    /// Collapses the argument to a count, `None` meaning indefinite length.
    ///
    /// Tiny arguments 28-30 are reserved and refused.
    pub fn count(&self) -> Result<Option<u64>, Error> {
        match self.width {
            Width::Tiny => match self.arg {
                arg if arg < 24 => Ok(Some(arg)),
                31 => Ok(None),
                arg => Err(Error::ReservedCount(arg as u8)),
            },
            _ => Ok(Some(self.arg)),
        }
    }

    /// As [`count`](Self::count), for the major types that have no
    /// indefinite form (integers and tags).
    pub fn definite_count(&self) -> Result<u64, Error> {
        self.count()?.ok_or(Error::ReservedCount(31))
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        let major = (self.major as u8) << 5;
        match self.width {
            Width::Tiny => out.push(major | self.arg as u8),
            Width::One => {
                out.push(major | 24);
                out.push(self.arg as u8);
            }
            Width::Two => {
                out.push(major | 25);
                out.extend((self.arg as u16).to_be_bytes());
            }
            Width::Four => {
                out.push(major | 26);
                out.extend((self.arg as u32).to_be_bytes());
            }
            Width::Eight => {
                out.push(major | 27);
                out.extend(self.arg.to_be_bytes());
            }
        }
    }

    pub fn read(data: &[u8], offset: &mut usize) -> Result<Self, Error> {
        let byte = read_exact::<1>(data, offset)?[0];
        let major = match byte >> 5 {
            0 => MajorType::PositiveInteger,
            1 => MajorType::NegativeInteger,
            2 => MajorType::ByteString,
            3 => MajorType::Utf8String,
            4 => MajorType::Array,
            5 => MajorType::Map,
            6 => MajorType::SemanticTag,
            _ => MajorType::SpecialFloat,
        };
        let (width, arg) = match byte & 0x1F {
            24 => (Width::One, read_exact::<1>(data, offset)?[0] as u64),
            25 => (
                Width::Two,
                u16::from_be_bytes(read_exact(data, offset)?) as u64,
            ),
            26 => (
                Width::Four,
                u32::from_be_bytes(read_exact(data, offset)?) as u64,
            ),
            27 => (Width::Eight, u64::from_be_bytes(read_exact(data, offset)?)),
            tiny => (Width::Tiny, tiny as u64),
        };
        Ok(Self { major, width, arg })
    }
}

fn read_exact<const N: usize>(data: &[u8], offset: &mut usize) -> Result<[u8; N], Error> {
    let Some(bytes) = data.get(*offset..).and_then(|d| d.get(..N)) else {
        return Err(Error::EndOfInput);
    };
    *offset += N;
    Ok(bytes.try_into().unwrap())
}
