use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    UnsupportedMagicNumber(String),
    InvalidHeaderValue(&'static str, u64),
    MissingWhitespaceAfterMaxValue,
    SampleExceedsMaxValue(u32, u32),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
    ReadOfInputFailed(std::io::Error),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWritePPMHeader(std::io::Error),
    FailedToWritePixelData(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::UnsupportedMagicNumber(magic) => {
                write!(
                    f,
                    "Unsupported magic number '{}', expected 'P6' or 'P3'",
                    magic
                )
            }
            Self::InvalidHeaderValue(token_name, value) => {
                write!(f, "Header value {} of '{}' is out of range", value, token_name)
            }
            Self::MissingWhitespaceAfterMaxValue => {
                write!(f, "Max value must be followed by exactly one whitespace")
            }
            Self::SampleExceedsMaxValue(sample, max_value) => {
                write!(
                    f,
                    "Color sample {} exceeds max value {} of the header",
                    sample, max_value
                )
            }
            Self::IncompletePixelParsed(number_of_samples_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_samples_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size provided in header"
                )
            }
            Self::ReadOfInputFailed(error) => {
                write!(f, "Reading of input failed: {}", error)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWritePPMHeader(error) => {
                write!(f, "Failed to write PPM header: {}", error)
            }
            Self::FailedToWritePixelData(error) => {
                write!(f, "Failed to write pixel data: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadOfInputFailed(error)
            | Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::FailedToWritePPMHeader(error)
            | Self::FailedToWritePixelData(error) => Some(error),
            _ => None,
        }
    }
}
