use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use log::{info, warn};

pub use cli::CLIParser;
pub use error::Error;
pub use image::ppm::SampleFormat;
use image::{
    filter::{FilterParameters, FilterPreset},
    reader::ppm::PPMImageReader,
    writer::ppm::PPMImageWriter,
    ImageReader, ImageWriter, TrueColorImage,
};

mod cli;
pub mod color;
mod error;
pub mod image;
mod logger;
pub mod math;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    filter: FilterPreset,
    radius: usize,
    scale_factor: f64,
    sample_format: SampleFormat,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

/// Replace `result` with the PPM image stored at `file_path`. On failure
/// `result` is left empty.
pub fn ppm_read(result: &mut TrueColorImage, file_path: &Path) -> Result<()> {
    let image = open_input_file(file_path)
        .and_then(|input_file| PPMImageReader::new(BufReader::new(input_file)).read_image());
    match image {
        Ok(image) => {
            info!(
                "Read {}x{} image from '{}'",
                image.width(),
                image.height(),
                file_path.display()
            );
            *result = image;
            Ok(())
        }
        Err(e) => {
            warn!("Reading '{}' failed: {}", file_path.display(), e);
            result.clear();
            Err(e)
        }
    }
}

/// Write a non-empty image to `file_path` with maxval 255. An empty image
/// panics before `file_path` is touched.
#[track_caller]
pub fn ppm_write(
    image: &TrueColorImage,
    file_path: &Path,
    sample_format: SampleFormat,
) -> Result<()> {
    assert!(!image.is_empty(), "Cannot write an empty image");
    let output_file = open_output_file(file_path)?;
    let mut writer = PPMImageWriter::new(BufWriter::new(output_file), image, sample_format);
    writer.write_image()?;
    info!(
        "Wrote {}x{} image to '{}' as {}",
        image.width(),
        image.height(),
        file_path.display(),
        sample_format.magic_number()
    );
    Ok(())
}

pub fn filter_ppm(arguments: &Arguments) -> Result<()> {
    let mut before = TrueColorImage::new();
    ppm_read(&mut before, &arguments.input_file)?;
    let mut after = TrueColorImage::new();
    info!("Applying filter {:?}", arguments.filter);
    arguments
        .filter
        .apply(&mut after, &before, &FilterParameters::from(arguments));
    ppm_write(&after, &arguments.output_file, arguments.sample_format)
}
