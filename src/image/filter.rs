use clap::{builder::PossibleValue, ValueEnum};
use log::debug;

use super::Image;
use crate::color::{ColorDepth, Rgb, RgbIndex};
use crate::math::{Matrix3x3, Scalar, Vector, Vector2, Vector3};
use crate::Arguments;

/// Luma weights of red, green and blue in tenths.
const LUMA_WEIGHTS: [f64; 3] = [2.0, 7.0, 1.0];
const LUMA_WEIGHT_SUM: f64 = 10.0;

const SOBEL_HORIZONTAL: Matrix3x3<f64> = Matrix3x3::from_rows([
    Vector::from_array([-1.0, 0.0, 1.0]),
    Vector::from_array([-2.0, 0.0, 2.0]),
    Vector::from_array([-1.0, 0.0, 1.0]),
]);

const SOBEL_VERTICAL: Matrix3x3<f64> = Matrix3x3::from_rows([
    Vector::from_array([-1.0, -2.0, -1.0]),
    Vector::from_array([0.0, 0.0, 0.0]),
    Vector::from_array([1.0, 2.0, 1.0]),
]);

/// Largest radius accepted from the command line.
pub const MAX_FILTER_RADIUS: usize = 1024;

#[track_caller]
fn check_source<D: ColorDepth>(before: &Image<D>) {
    assert!(!before.is_empty(), "Filter source image must not be empty");
}

#[track_caller]
fn check_radius(radius: usize) {
    assert!(radius > 0, "Filter radius must be positive");
}

/// Copy `before` with one channel set to zero.
#[track_caller]
pub fn clear_component<D: ColorDepth>(
    after: &mut Image<D>,
    before: &Image<D>,
    component_to_clear: RgbIndex,
) {
    check_source(before);
    debug!("Clearing {:?} channel", component_to_clear);
    after.clone_from(before);
    for dot in after.pixels_mut() {
        dot[component_to_clear] = D::Component::ZERO;
    }
}

/// Copy `before` with one channel multiplied by `scale_factor`, saturating at
/// the maximum intensity.
#[track_caller]
pub fn scale_component<D: ColorDepth>(
    after: &mut Image<D>,
    before: &Image<D>,
    component_to_scale: RgbIndex,
    scale_factor: f64,
) {
    check_source(before);
    assert!(
        scale_factor >= 0.0,
        "Scale factor must not be negative, but was {}",
        scale_factor
    );
    debug!(
        "Scaling {:?} channel by {}",
        component_to_scale, scale_factor
    );
    after.clone_from(before);
    for dot in after.pixels_mut() {
        let scaled = (D::normalize(dot[component_to_scale]) * scale_factor).min(1.0);
        dot[component_to_scale] = D::from_f64(scaled * D::MAX_VALUE_DOUBLE);
    }
}

/// Copy the `width` x `height` rectangle at (`left`, `top`) of `before`.
#[track_caller]
pub fn crop<D: ColorDepth>(
    after: &mut Image<D>,
    before: &Image<D>,
    left: usize,
    top: usize,
    width: usize,
    height: usize,
) {
    check_source(before);
    assert!(
        width > 0 && height > 0,
        "Crop size must be positive, but was {}x{}",
        width,
        height
    );
    assert!(
        before.is_x(left)
            && before.is_y(top)
            && before.is_x(left + width - 1)
            && before.is_y(top + height - 1),
        "Crop rectangle {}x{} at ({}, {}) exceeds {}x{} image",
        width,
        height,
        left,
        top,
        before.width(),
        before.height()
    );
    after.resize(width, height, Rgb::default());
    for y in 0..height {
        after
            .row_mut(y)
            .copy_from_slice(&before.row(top + y)[left..left + width]);
    }
}

#[track_caller]
fn padded_length(length: usize, pad_radius: usize) -> usize {
    pad_radius
        .checked_mul(2)
        .and_then(|border| border.checked_add(length))
        .unwrap_or_else(|| {
            panic!(
                "Padding of {} pixels overflows image length {}",
                pad_radius, length
            )
        })
}

fn clamp_to_source(padded: usize, pad_radius: usize, length: usize) -> usize {
    padded.saturating_sub(pad_radius).min(length - 1)
}

/// Surround `before` with a border of `pad_radius` pixels replicating the
/// nearest edge pixel.
#[track_caller]
pub fn extend_edges<D: ColorDepth>(after: &mut Image<D>, before: &Image<D>, pad_radius: usize) {
    check_source(before);
    check_radius(pad_radius);
    let width = padded_length(before.width(), pad_radius);
    let height = padded_length(before.height(), pad_radius);
    assert!(
        width.checked_mul(height).is_some(),
        "Padded image of {}x{} overflows",
        width,
        height
    );
    after.resize(width, height, Rgb::default());
    for y in 0..height {
        let source = before.row(clamp_to_source(y, pad_radius, before.height()));
        for (x, dot) in after.row_mut(y).iter_mut().enumerate() {
            *dot = source[clamp_to_source(x, pad_radius, before.width())];
        }
    }
}

/// Remove a border of `pad_radius` pixels from every side.
#[track_caller]
pub fn crop_extended_edges<D: ColorDepth>(
    after: &mut Image<D>,
    before: &Image<D>,
    pad_radius: usize,
) {
    check_source(before);
    check_radius(pad_radius);
    assert!(
        before.width() > 2 * pad_radius && before.height() > 2 * pad_radius,
        "Image of {}x{} too small to remove a border of {}",
        before.width(),
        before.height(),
        pad_radius
    );
    crop(
        after,
        before,
        pad_radius,
        pad_radius,
        before.width() - 2 * pad_radius,
        before.height() - 2 * pad_radius,
    );
}

fn luma<D: ColorDepth>(dot: &Rgb<D>) -> D::Component {
    let weighted = LUMA_WEIGHTS
        .iter()
        .zip(dot.components().iter())
        .map(|(weight, component)| weight * component.to_f64())
        .sum::<f64>()
        / LUMA_WEIGHT_SUM;
    D::from_f64(weighted.clamp(0.0, D::MAX_VALUE_DOUBLE))
}

/// Replace every pixel by its luma `0.2 red + 0.7 green + 0.1 blue` on all
/// three channels.
#[track_caller]
pub fn grayscale<D: ColorDepth>(after: &mut Image<D>, before: &Image<D>) {
    check_source(before);
    after.clone_from(before);
    for dot in after.pixels_mut() {
        let gray = luma(dot);
        dot.assign(gray, gray, gray);
    }
}

/// Normalized red intensities of the 3x3 neighborhood centered at (x, y).
fn neighborhood<D: ColorDepth>(image: &Image<D>, x: usize, y: usize) -> Matrix3x3<f64> {
    Matrix3x3::from_rows(std::array::from_fn(|dy| {
        Vector::from_array(std::array::from_fn(|dx| {
            D::normalize(image.pixel(x + dx - 1, y + dy - 1).red())
        }))
    }))
}

fn correlate(neighborhood: &Matrix3x3<f64>, kernel: &Matrix3x3<f64>) -> f64 {
    (0..3)
        .map(|row| neighborhood[row].dot(&kernel[row]))
        .sum()
}

/// Sobel gradient magnitude of the grayscale image, clamped to the maximum
/// intensity.
#[track_caller]
pub fn edge_detect<D: ColorDepth>(after: &mut Image<D>, before: &Image<D>) {
    check_source(before);
    debug!(
        "Detecting edges of {}x{} image",
        before.width(),
        before.height()
    );
    let mut gray = Image::new();
    grayscale(&mut gray, before);
    let mut padded = Image::new();
    extend_edges(&mut padded, &gray, 1);
    let mut gradient = padded.clone();
    for y in 1..=before.height() {
        for x in 1..=before.width() {
            let intensities = neighborhood(&padded, x, y);
            let gradient_vector = Vector2::from_array([
                correlate(&intensities, &SOBEL_HORIZONTAL),
                correlate(&intensities, &SOBEL_VERTICAL),
            ]);
            let magnitude = gradient_vector.magnitude().min(1.0);
            let value = D::from_f64(magnitude * D::MAX_VALUE_DOUBLE);
            gradient.pixel_mut(x, y).assign(value, value, value);
        }
    }
    crop_extended_edges(after, &gradient, 1);
}

/// Mean of the `(2 * radius + 1)` square around each pixel, replicating edge
/// pixels beyond the border.
#[track_caller]
pub fn box_blur<D: ColorDepth>(after: &mut Image<D>, before: &Image<D>, radius: usize) {
    check_source(before);
    check_radius(radius);
    debug!("Box blur with radius {}", radius);
    let mut padded = Image::new();
    extend_edges(&mut padded, before, radius);
    let side = 2 * radius + 1;
    let count = side as f64 * side as f64;
    after.resize(before.width(), before.height(), Rgb::default());
    for y in 0..before.height() {
        for x in 0..before.width() {
            let mut sum = Vector3::<f64>::default();
            for row in y..y + side {
                for dot in &padded.row(row)[x..x + side] {
                    sum = sum + Vector3::from_array(dot.components().as_array().map(Scalar::to_f64));
                }
            }
            let [red, green, blue] = (sum / count)
                .as_array()
                .map(|mean| D::from_f64(mean.clamp(0.0, D::MAX_VALUE_DOUBLE)));
            *after.pixel_mut(x, y) = Rgb::new(red, green, blue);
        }
    }
}

/// Filters selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterPreset {
    ClearRed,
    ClearGreen,
    ClearBlue,
    ScaleRed,
    ScaleGreen,
    ScaleBlue,
    ExtendEdges,
    Grayscale,
    EdgeDetect,
    BoxBlur,
}

impl ValueEnum for FilterPreset {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::ClearRed,
            Self::ClearGreen,
            Self::ClearBlue,
            Self::ScaleRed,
            Self::ScaleGreen,
            Self::ScaleBlue,
            Self::ExtendEdges,
            Self::Grayscale,
            Self::EdgeDetect,
            Self::BoxBlur,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::ClearRed => Some(PossibleValue::new("ClearRed")),
            Self::ClearGreen => Some(PossibleValue::new("ClearGreen")),
            Self::ClearBlue => Some(PossibleValue::new("ClearBlue")),
            Self::ScaleRed => Some(PossibleValue::new("ScaleRed")),
            Self::ScaleGreen => Some(PossibleValue::new("ScaleGreen")),
            Self::ScaleBlue => Some(PossibleValue::new("ScaleBlue")),
            Self::ExtendEdges => Some(PossibleValue::new("ExtendEdges")),
            Self::Grayscale => Some(PossibleValue::new("Grayscale")),
            Self::EdgeDetect => Some(PossibleValue::new("EdgeDetect")),
            Self::BoxBlur => Some(PossibleValue::new("BoxBlur")),
        }
    }
}

pub struct FilterParameters {
    pub radius: usize,
    pub scale_factor: f64,
}

impl From<&Arguments> for FilterParameters {
    fn from(value: &Arguments) -> Self {
        Self {
            radius: value.radius,
            scale_factor: value.scale_factor,
        }
    }
}

impl FilterPreset {
    pub fn apply<D: ColorDepth>(
        &self,
        after: &mut Image<D>,
        before: &Image<D>,
        parameters: &FilterParameters,
    ) {
        match self {
            Self::ClearRed => clear_component(after, before, RgbIndex::Red),
            Self::ClearGreen => clear_component(after, before, RgbIndex::Green),
            Self::ClearBlue => clear_component(after, before, RgbIndex::Blue),
            Self::ScaleRed => {
                scale_component(after, before, RgbIndex::Red, parameters.scale_factor)
            }
            Self::ScaleGreen => {
                scale_component(after, before, RgbIndex::Green, parameters.scale_factor)
            }
            Self::ScaleBlue => {
                scale_component(after, before, RgbIndex::Blue, parameters.scale_factor)
            }
            Self::ExtendEdges => extend_edges(after, before, parameters.radius),
            Self::Grayscale => grayscale(after, before),
            Self::EdgeDetect => edge_detect(after, before),
            Self::BoxBlur => box_blur(after, before, parameters.radius),
        }
    }
}
