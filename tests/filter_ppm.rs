use raster_gfx::color::{TrueColorRgb, BLACK, BLUE, LIME, RED, SILVER, WHITE, YELLOW};
use raster_gfx::image::TrueColorImage;
use raster_gfx::{filter_ppm, ppm_read, ppm_write, CLIParser, Error, SampleFormat};
use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use tempfile::tempdir;

const PATTERN_IMAGE_PATH: &str = "tests/pattern.ppm";

fn get_project_root_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn get_pattern_image_path() -> PathBuf {
    let mut root_path = get_project_root_path();
    root_path.push(PATTERN_IMAGE_PATH);
    root_path
}

fn read_pattern() -> TrueColorImage {
    let mut image = TrueColorImage::new();
    ppm_read(&mut image, &get_pattern_image_path()).expect("Reading of pattern failed");
    image
}

#[test]
fn read_pattern_with_comments() {
    let image = read_pattern();
    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 2);
    assert_eq!(*image.pixel(0, 0), RED);
    assert_eq!(*image.pixel(1, 0), LIME);
    assert_eq!(*image.pixel(2, 0), BLUE);
    assert_eq!(*image.pixel(3, 0), WHITE);
    assert_eq!(*image.pixel(0, 1), BLACK);
    assert_eq!(*image.pixel(1, 1), TrueColorRgb::new(128, 128, 128));
    assert_eq!(*image.pixel(2, 1), SILVER);
    assert_eq!(*image.pixel(3, 1), YELLOW);
}

#[test]
fn round_trip_both_sample_formats() {
    let directory = tempdir().expect("Creation of temporary directory failed");
    let image = read_pattern();
    for (file_name, sample_format) in [
        ("binary.ppm", SampleFormat::Binary),
        ("ascii.ppm", SampleFormat::Ascii),
    ] {
        let path = directory.path().join(file_name);
        ppm_write(&image, &path, sample_format).expect("Writing failed");
        let written = fs::read(&path).expect("Output file was not created");
        assert!(written.starts_with(sample_format.magic_number().as_bytes()));

        let mut reread = TrueColorImage::new();
        ppm_read(&mut reread, &path).expect("Reading of written file failed");
        assert_eq!(reread, image);
    }
}

#[test]
fn failed_read_clears_result() {
    let directory = tempdir().expect("Creation of temporary directory failed");
    let path = directory.path().join("grayscale.pgm");
    fs::write(&path, b"P5 1 1 255\n\x00").expect("Writing of input failed");

    let mut image = read_pattern();
    let result = ppm_read(&mut image, &path);
    assert!(matches!(result, Err(Error::UnsupportedMagicNumber(_))));
    assert!(image.is_empty());

    let mut image = read_pattern();
    let result = ppm_read(&mut image, &directory.path().join("missing.ppm"));
    assert!(matches!(
        result,
        Err(Error::UnableToOpenInputFileForReading(_, _))
    ));
    assert!(image.is_empty());
}

#[test]
fn filter_ppm_clear_red_to_ascii() {
    let directory = tempdir().expect("Creation of temporary directory failed");
    let result_image_path = directory.path().join("result.ppm");
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        get_pattern_image_path().to_str().unwrap(),
        result_image_path.to_str().unwrap(),
        "--filter",
        "ClearRed",
        "--ascii",
    ]);
    filter_ppm(&arguments).expect("Filtering failed");

    let output = fs::read_to_string(&result_image_path).expect("Output file was not created");
    assert!(output.starts_with("P3 4 2 255\n"));
    let mut result = TrueColorImage::new();
    ppm_read(&mut result, &result_image_path).expect("Reading of result failed");
    assert!(result.pixels().all(|dot| dot.red() == 0));
    assert_eq!(*result.pixel(3, 0), TrueColorRgb::new(0, 255, 255));
}

#[test]
fn filter_ppm_box_blur_keeps_size() {
    let directory = tempdir().expect("Creation of temporary directory failed");
    let result_image_path = directory.path().join("blurred.ppm");
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        get_pattern_image_path().to_str().unwrap(),
        result_image_path.to_str().unwrap(),
        "-f",
        "BoxBlur",
        "-r",
        "2",
    ]);
    filter_ppm(&arguments).expect("Filtering failed");

    let mut result = TrueColorImage::new();
    ppm_read(&mut result, &result_image_path).expect("Reading of result failed");
    assert_eq!(result.width(), 4);
    assert_eq!(result.height(), 2);
}

#[test]
fn filter_ppm_missing_input() {
    let directory = tempdir().expect("Creation of temporary directory failed");
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        directory.path().join("missing.ppm").to_str().unwrap(),
        directory.path().join("result.ppm").to_str().unwrap(),
    ]);
    assert!(filter_ppm(&arguments).is_err());
    assert!(!directory.path().join("result.ppm").exists());
}

#[test]
fn write_to_unopenable_path() {
    let directory = tempdir().expect("Creation of temporary directory failed");
    let image = read_pattern();
    for path in [
        directory.path().to_path_buf(),
        directory.path().join("missing").join("result.ppm"),
    ] {
        let result = ppm_write(&image, &path, SampleFormat::Binary);
        assert!(matches!(
            result,
            Err(Error::UnableToOpenOutputFileForWriting(_, _))
        ));
    }
}

#[test]
fn write_empty_image_keeps_existing_file() {
    let directory = tempdir().expect("Creation of temporary directory failed");
    let path = directory.path().join("existing.ppm");
    let content = b"P3 1 1 255\n 1 2 3\n";
    fs::write(&path, content).expect("Writing of existing file failed");

    let result = catch_unwind(AssertUnwindSafe(|| {
        ppm_write(&TrueColorImage::new(), &path, SampleFormat::Binary)
    }));
    assert!(result.is_err(), "Writing an empty image must panic");
    assert_eq!(fs::read(&path).expect("Existing file vanished"), content);
}
