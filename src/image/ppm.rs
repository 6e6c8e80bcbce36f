/// Largest maxval a PPM header may declare, exclusive.
pub const MAX_VALUE_LIMIT: u32 = 65536;

/// Samples of written files always use the full 8 bit range.
pub const WRITTEN_MAX_VALUE: u32 = 255;

/// How the color samples following a PPM header are encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    /// `P6`: raw bytes, two bytes big endian per sample when maxval > 255.
    Binary,
    /// `P3`: whitespace separated decimal numbers.
    Ascii,
}

impl SampleFormat {
    pub fn magic_number(&self) -> &'static str {
        match self {
            Self::Binary => "P6",
            Self::Ascii => "P3",
        }
    }

    pub fn from_magic_number(magic: &[u8]) -> Option<Self> {
        match magic {
            b"P6" => Some(Self::Binary),
            b"P3" => Some(Self::Ascii),
            _ => None,
        }
    }
}
