use std::io::{Bytes, Read};
use std::iter::Peekable;

use log::debug;

use super::super::ppm::{SampleFormat, MAX_VALUE_LIMIT};
use super::super::{ImageReader, TrueColorImage};
use crate::color::{ColorDepth, TrueColorDepth, TrueColorRgb};
use crate::Error;

/// Reads binary (`P6`) and ASCII (`P3`) PPM images with any maxval below
/// 65536, rescaling all samples to 8 bit.
pub struct PPMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader<TrueColorDepth> for PPMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<TrueColorImage> {
        let mut scanner = PPMScanner::new(&mut self.reader);
        let mut parser = PPMParser::new(&mut scanner);
        parser.parse_image()
    }
}

fn is_whitespace(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0B
}

struct PPMScanner<R: Read> {
    bytes: Peekable<Bytes<R>>,
}

impl<R: Read> PPMScanner<R> {
    fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes().peekable(),
        }
    }

    fn next_byte(&mut self) -> crate::Result<Option<u8>> {
        self.bytes.next().transpose().map_err(Error::ReadOfInputFailed)
    }

    fn peek_byte(&mut self) -> crate::Result<Option<u8>> {
        match self.bytes.peek() {
            Some(Ok(byte)) => Ok(Some(*byte)),
            Some(Err(_)) => self.next_byte(),
            None => Ok(None),
        }
    }

    fn skip_whitespace(&mut self) -> crate::Result<()> {
        while let Some(byte) = self.peek_byte()? {
            if !is_whitespace(byte) {
                break;
            }
            self.next_byte()?;
        }
        Ok(())
    }

    fn skip_whitespace_and_comments(&mut self) -> crate::Result<()> {
        loop {
            match self.peek_byte()? {
                Some(byte) if is_whitespace(byte) => {
                    self.next_byte()?;
                }
                Some(b'#') => self.skip_line()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) -> crate::Result<()> {
        while let Some(byte) = self.next_byte()? {
            if byte == b'\n' {
                break;
            }
        }
        Ok(())
    }

    fn read_magic_number(&mut self) -> crate::Result<[u8; 2]> {
        let mut magic = [0; 2];
        for byte in magic.iter_mut() {
            *byte = self
                .next_byte()?
                .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                    MAGIC_NUMBER_TOKEN_NAME,
                ))?;
        }
        Ok(magic)
    }

    /// Unsigned decimal made of ASCII digits only.
    fn read_decimal(&mut self, token_name: &'static str) -> crate::Result<u32> {
        let mut value: Option<u32> = None;
        while let Some(byte) = self.peek_byte()? {
            if !byte.is_ascii_digit() {
                break;
            }
            self.next_byte()?;
            let digit = u32::from(byte - b'0');
            let accumulated = value
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(Error::ParsingOfTokenFailed(token_name))?;
            value = Some(accumulated);
        }
        match value {
            Some(value) => Ok(value),
            None if self.peek_byte()?.is_none() => {
                Err(Error::PPMFileDoesNotContainRequiredToken(token_name))
            }
            None => Err(Error::ParsingOfTokenFailed(token_name)),
        }
    }
}

const MAGIC_NUMBER_TOKEN_NAME: &str = "Magic Number";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

/// Headers may claim far more pixels than the stream holds.
const PREALLOCATED_DOTS_LIMIT: usize = 1 << 20;

#[derive(Debug)]
struct PPMHeader {
    format: SampleFormat,
    width: usize,
    height: usize,
    max_value: u32,
}

#[derive(Clone, Copy)]
struct Dot {
    buffer: [u32; 3],
    index: usize,
}

impl Dot {
    fn new() -> Self {
        Self {
            buffer: [u32::default(); 3],
            index: 0,
        }
    }

    fn push_color_component(&mut self, component: u32) {
        if self.is_complete() {
            return;
        }
        self.buffer[self.index] = component;
        self.index += 1;
    }

    fn is_complete(&self) -> bool {
        self.index == 3
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }

    /// Samples must not exceed `max_value`.
    fn rescale(&self, max_value: u32) -> TrueColorRgb {
        let target = u32::from(TrueColorDepth::MAX_VALUE);
        let [red, green, blue] = self.buffer.map(|sample| (sample * target / max_value) as u8);
        TrueColorRgb::new(red, green, blue)
    }
}

struct PPMParser<'a, R: Read> {
    scanner: &'a mut PPMScanner<R>,
}

impl<'a, R: Read> PPMParser<'a, R> {
    fn new(scanner: &'a mut PPMScanner<R>) -> Self {
        Self { scanner }
    }

    fn parse_image(&mut self) -> crate::Result<TrueColorImage> {
        let header = self.parse_header()?;
        debug!("Parsed PPM header {:?}", header);
        let dots = self.parse_all_dots(&header)?;
        Ok(TrueColorImage::from_pixels(header.width, header.height, dots))
    }

    fn parse_header(&mut self) -> crate::Result<PPMHeader> {
        let format = self.parse_magic_number()?;
        let width = self.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.parse_max_value()?;
        self.check_single_whitespace_after_max_value()?;
        if width.checked_mul(height).is_none() {
            return Err(Error::InvalidHeaderValue(
                HEIGHT_HEADER_TOKEN_NAME,
                height as u64,
            ));
        }
        Ok(PPMHeader {
            format,
            width,
            height,
            max_value,
        })
    }

    fn parse_magic_number(&mut self) -> crate::Result<SampleFormat> {
        let magic = self.scanner.read_magic_number()?;
        SampleFormat::from_magic_number(&magic).ok_or_else(|| {
            Error::UnsupportedMagicNumber(String::from_utf8_lossy(&magic).into_owned())
        })
    }

    fn parse_dimension(&mut self, token_name: &'static str) -> crate::Result<usize> {
        self.scanner.skip_whitespace_and_comments()?;
        let value = self.scanner.read_decimal(token_name)?;
        if value == 0 {
            return Err(Error::InvalidHeaderValue(token_name, 0));
        }
        Ok(value as usize)
    }

    fn parse_max_value(&mut self) -> crate::Result<u32> {
        self.scanner.skip_whitespace_and_comments()?;
        let max_value = self.scanner.read_decimal(MAX_VALUE_HEADER_TOKEN_NAME)?;
        if max_value == 0 || max_value >= MAX_VALUE_LIMIT {
            return Err(Error::InvalidHeaderValue(
                MAX_VALUE_HEADER_TOKEN_NAME,
                u64::from(max_value),
            ));
        }
        Ok(max_value)
    }

    fn check_single_whitespace_after_max_value(&mut self) -> crate::Result<()> {
        match self.scanner.next_byte()? {
            Some(byte) if is_whitespace(byte) => Ok(()),
            _ => Err(Error::MissingWhitespaceAfterMaxValue),
        }
    }

    fn parse_all_dots(&mut self, header: &PPMHeader) -> crate::Result<Vec<TrueColorRgb>> {
        let number_of_dots = header.width * header.height;
        let mut dots = Vec::with_capacity(number_of_dots.min(PREALLOCATED_DOTS_LIMIT));
        let mut current_dot = Dot::new();
        while dots.len() < number_of_dots {
            match self.parse_color_value(header)? {
                Some(component) => current_dot.push_color_component(component),
                None => return Err(Self::truncation_error(&current_dot)),
            }
            if current_dot.is_complete() {
                dots.push(current_dot.rescale(header.max_value));
                current_dot.reset();
            }
        }
        Ok(dots)
    }

    fn truncation_error(dot: &Dot) -> Error {
        if dot.is_empty() {
            Error::MismatchOfSizeBetweenHeaderAndValues
        } else {
            Error::IncompletePixelParsed(dot.index)
        }
    }

    /// `None` once the input is exhausted.
    fn parse_color_value(&mut self, header: &PPMHeader) -> crate::Result<Option<u32>> {
        let sample = match header.format {
            SampleFormat::Binary => self.parse_binary_sample(header.max_value)?,
            SampleFormat::Ascii => self.parse_ascii_sample()?,
        };
        match sample {
            Some(sample) if sample > header.max_value => {
                Err(Error::SampleExceedsMaxValue(sample, header.max_value))
            }
            sample => Ok(sample),
        }
    }

    fn parse_binary_sample(&mut self, max_value: u32) -> crate::Result<Option<u32>> {
        let Some(first) = self.scanner.next_byte()? else {
            return Ok(None);
        };
        if max_value < 256 {
            return Ok(Some(u32::from(first)));
        }
        let sample = self
            .scanner
            .next_byte()?
            .map(|second| u32::from(u16::from_be_bytes([first, second])));
        Ok(sample)
    }

    fn parse_ascii_sample(&mut self) -> crate::Result<Option<u32>> {
        self.scanner.skip_whitespace()?;
        if self.scanner.peek_byte()?.is_none() {
            return Ok(None);
        }
        self.scanner
            .read_decimal(COLOR_COMPONENT_VALUE_TOKEN_NAME)
            .map(Some)
    }
}
