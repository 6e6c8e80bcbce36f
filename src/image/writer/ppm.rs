use std::io::{self, Write};

use super::super::ppm::{SampleFormat, WRITTEN_MAX_VALUE};
use super::super::{ImageWriter, TrueColorImage};
use crate::Error;

/// Writes a non-empty image as PPM with maxval 255.
pub struct PPMImageWriter<'a, T: Write> {
    writer: T,
    image: &'a TrueColorImage,
    sample_format: SampleFormat,
}

impl<'a, T: Write> PPMImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a TrueColorImage, sample_format: SampleFormat) -> Self {
        Self {
            writer,
            image,
            sample_format,
        }
    }

    fn write_header(&mut self) -> io::Result<()> {
        writeln!(
            self.writer,
            "{} {} {} {}",
            self.sample_format.magic_number(),
            self.image.width(),
            self.image.height(),
            WRITTEN_MAX_VALUE
        )
    }

    fn write_pixel_data(&mut self) -> io::Result<()> {
        let mut buffer = Vec::with_capacity(self.image.width() * 3);
        for row in self.image.rows() {
            buffer.clear();
            match self.sample_format {
                SampleFormat::Binary => {
                    for dot in row {
                        buffer.extend_from_slice(dot.components().as_array());
                    }
                }
                SampleFormat::Ascii => {
                    for dot in row {
                        writeln!(buffer, " {} {} {}", dot.red(), dot.green(), dot.blue())?;
                    }
                }
            }
            self.writer.write_all(&buffer)?;
        }
        self.writer.flush()
    }
}

impl<T: Write> ImageWriter for PPMImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        assert!(!self.image.is_empty(), "Cannot write an empty image");
        self.write_header().map_err(Error::FailedToWritePPMHeader)?;
        self.write_pixel_data()
            .map_err(Error::FailedToWritePixelData)
    }
}
