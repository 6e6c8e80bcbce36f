use crate::color::{ColorDepth, HdrColorDepth, Rgb, TrueColorDepth};

pub mod filter;
pub mod ppm;
pub mod reader;
pub mod writer;

pub use reader::ImageReader;
pub use writer::ImageWriter;

/// A raster image of `width` x `height` pixels stored row by row.
///
/// An image is either empty (zero width, zero height, no pixels) or has a
/// positive width and height.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<D: ColorDepth> {
    width: usize,
    height: usize,
    dots: Vec<Rgb<D>>,
}

pub type TrueColorImage = Image<TrueColorDepth>;
pub type HdrImage = Image<HdrColorDepth>;

impl<D: ColorDepth> Image<D> {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            dots: Vec::new(),
        }
    }

    /// A black image of the given positive dimensions.
    #[track_caller]
    pub fn with_size(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgb::default())
    }

    #[track_caller]
    pub fn filled(width: usize, height: usize, color: Rgb<D>) -> Self {
        check_dimensions(width, height);
        Self {
            width,
            height,
            dots: vec![color; width * height],
        }
    }

    /// Build an image from pixels in row-major order. `pixels` must hold
    /// exactly `width * height` colors.
    #[track_caller]
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb<D>>) -> Self {
        check_dimensions(width, height);
        assert_eq!(
            pixels.len(),
            width * height,
            "Number of pixels does not match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            dots: pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn is_x(&self, x: usize) -> bool {
        !self.is_empty() && x < self.width
    }

    pub fn is_y(&self, y: usize) -> bool {
        !self.is_empty() && y < self.height
    }

    #[track_caller]
    fn index_of(&self, x: usize, y: usize) -> usize {
        assert!(!self.is_empty(), "Pixel access on an empty image");
        assert!(
            self.is_x(x) && self.is_y(y),
            "Pixel ({}, {}) outside of {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        x + y * self.width
    }

    #[track_caller]
    pub fn pixel(&self, x: usize, y: usize) -> &Rgb<D> {
        &self.dots[self.index_of(x, y)]
    }

    #[track_caller]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut Rgb<D> {
        let index = self.index_of(x, y);
        &mut self.dots[index]
    }

    #[track_caller]
    pub fn row(&self, y: usize) -> &[Rgb<D>] {
        let start = self.index_of(0, y);
        &self.dots[start..start + self.width]
    }

    #[track_caller]
    pub fn row_mut(&mut self, y: usize) -> &mut [Rgb<D>] {
        let start = self.index_of(0, y);
        let end = start + self.width;
        &mut self.dots[start..end]
    }

    /// Rows from top to bottom. Yields nothing for an empty image.
    pub fn rows(&self) -> std::slice::Chunks<'_, Rgb<D>> {
        self.dots.chunks(self.width.max(1))
    }

    pub fn pixels(&self) -> std::slice::Iter<'_, Rgb<D>> {
        self.dots.iter()
    }

    pub fn pixels_mut(&mut self) -> std::slice::IterMut<'_, Rgb<D>> {
        self.dots.iter_mut()
    }

    /// Change the dimensions, keeping the pixels of the overlapping
    /// top-left rectangle and setting new pixels to `default_color`.
    #[track_caller]
    pub fn resize(&mut self, new_width: usize, new_height: usize, default_color: Rgb<D>) {
        check_dimensions(new_width, new_height);
        if new_width == self.width && new_height == self.height {
            return;
        }
        let mut dots = Vec::with_capacity(new_width * new_height);
        for y in 0..new_height {
            for x in 0..new_width {
                let dot = if x < self.width && y < self.height {
                    self.dots[x + y * self.width]
                } else {
                    default_color
                };
                dots.push(dot);
            }
        }
        self.width = new_width;
        self.height = new_height;
        self.dots = dots;
    }

    pub fn fill(&mut self, color: Rgb<D>) {
        self.dots.fill(color);
    }

    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.dots.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Clear when `other` is empty, otherwise resize to its dimensions.
    pub fn same_size<O: ColorDepth>(&mut self, other: &Image<O>, default_color: Rgb<D>) {
        if other.is_empty() {
            self.clear();
        } else {
            self.resize(other.width, other.height, default_color);
        }
    }

    pub fn convert_to<O: ColorDepth>(&self, result: &mut Image<O>) {
        result.width = self.width;
        result.height = self.height;
        result.dots = self.dots.iter().map(Rgb::convert_to::<O>).collect();
    }

    /// Same emptiness, same dimensions and every pixel pair within `delta`.
    pub fn almost_equal(&self, rhs: &Self, delta: f64) -> bool {
        if self.is_empty() {
            return rhs.is_empty();
        }
        self.width == rhs.width
            && self.height == rhs.height
            && self
                .dots
                .iter()
                .zip(rhs.dots.iter())
                .all(|(lhs, rhs)| lhs.almost_equal(rhs, delta))
    }

    /// width * height * bytes per pixel, excluding container overhead.
    pub fn estimate_bytes(&self) -> usize {
        self.width * self.height * std::mem::size_of::<Rgb<D>>()
    }
}

impl<D: ColorDepth> Default for Image<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[track_caller]
fn check_dimensions(width: usize, height: usize) {
    assert!(
        width > 0 && height > 0,
        "Image dimensions must be positive, but were {}x{}",
        width,
        height
    );
}

#[cfg(test)]
mod test {
    use super::{HdrImage, TrueColorImage};
    use crate::color::{HdrColorDepth, HdrRgb, TrueColorRgb, BLUE, RED, WHITE};

    fn true_blue() -> TrueColorImage {
        TrueColorImage::filled(100, 200, BLUE)
    }

    fn hdr_black() -> HdrImage {
        HdrImage::with_size(300, 400)
    }

    #[test]
    fn construction() {
        let empty = TrueColorImage::new();
        assert!(empty.is_empty());
        assert_eq!(empty.width(), 0);
        assert_eq!(empty.height(), 0);

        let black = hdr_black();
        assert!(!black.is_empty());
        assert_eq!(black.width(), 300);
        assert_eq!(black.height(), 400);
        assert_eq!(*black.pixel(299, 399), HdrRgb::default());

        let blue = true_blue();
        assert_eq!(blue.width(), 100);
        assert_eq!(blue.height(), 200);
        assert_eq!(*blue.pixel(50, 50), BLUE);
    }

    #[test]
    #[should_panic]
    fn zero_width_is_rejected() {
        TrueColorImage::with_size(0, 10);
    }

    #[test]
    fn equality() {
        let empty = TrueColorImage::new();
        let blue = true_blue();
        assert_eq!(empty, TrueColorImage::default());
        assert_ne!(empty, blue);
        assert_eq!(blue, blue.clone());

        let mut one_white = blue.clone();
        *one_white.pixel_mut(99, 199) = WHITE;
        assert_ne!(one_white, blue);
    }

    #[test]
    fn almost_equal() {
        let empty = HdrImage::new();
        let black = hdr_black();
        assert!(empty.almost_equal(&empty, 0.01));
        assert!(black.almost_equal(&black, 0.01));
        assert!(!empty.almost_equal(&black, 0.01));
        assert!(!black.almost_equal(&empty, 0.01));
        assert!(!true_blue().almost_equal(&TrueColorImage::with_size(200, 100), 2.0));

        let mut one_dark_gray = black.clone();
        *one_dark_gray.pixel_mut(299, 399) = HdrRgb::new(0.0, 0.0, 0.001);
        assert_ne!(one_dark_gray, black);
        assert!(one_dark_gray.almost_equal(&black, 0.01));
    }

    #[test]
    fn clear_makes_empty() {
        let mut image = hdr_black();
        image.clear();
        assert!(image.is_empty());
        assert_eq!(image.width(), 0);
        assert_eq!(image.estimate_bytes(), 0);
    }

    #[test]
    fn convert_to_hdr_and_back() {
        let blue = true_blue();
        let mut hdr = HdrImage::new();
        blue.convert_to(&mut hdr);
        assert_eq!(hdr.width(), 100);
        assert_eq!(*hdr.pixel(0, 0), BLUE.convert_to::<HdrColorDepth>());
        let mut back = TrueColorImage::new();
        hdr.convert_to(&mut back);
        assert_eq!(back, blue);
    }

    #[test]
    fn convert_empty_clears_result() {
        let mut result = true_blue();
        HdrImage::new().convert_to(&mut result);
        assert!(result.is_empty());
    }

    #[test]
    fn estimate_bytes() {
        assert_eq!(TrueColorImage::new().estimate_bytes(), 0);
        assert_eq!(true_blue().estimate_bytes(), 100 * 200 * 3);
        assert_eq!(hdr_black().estimate_bytes(), 300 * 400 * 12);
    }

    #[test]
    fn fill_overwrites_every_pixel() {
        let mut red = true_blue();
        red.fill(RED);
        assert_eq!(red.width(), 100);
        assert_eq!(red.height(), 200);
        assert!(red.pixels().all(|&pixel| pixel == RED));
    }

    #[test]
    fn coordinate_checks() {
        let blue = true_blue();
        for i in 0..300 {
            assert_eq!(blue.is_x(i), i < 100);
            assert_eq!(blue.is_y(i), i < 200);
        }
        assert!(!TrueColorImage::new().is_x(0));
    }

    #[test]
    #[should_panic]
    fn pixel_outside_image() {
        true_blue().pixel(100, 0);
    }

    #[test]
    #[should_panic]
    fn pixel_of_empty_image() {
        TrueColorImage::new().pixel(0, 0);
    }

    #[test]
    fn resize_keeps_top_left() {
        let mut image = TrueColorImage::filled(2, 2, RED);
        *image.pixel_mut(1, 1) = BLUE;

        let mut smaller = image.clone();
        smaller.resize(1, 2, WHITE);
        assert_eq!(smaller.width(), 1);
        assert_eq!(*smaller.pixel(0, 1), RED);

        let mut bigger = image.clone();
        bigger.resize(3, 4, WHITE);
        assert_eq!(bigger.width(), 3);
        assert_eq!(bigger.height(), 4);
        assert_eq!(*bigger.pixel(1, 1), BLUE);
        assert_eq!(*bigger.pixel(0, 0), RED);
        assert_eq!(*bigger.pixel(2, 0), WHITE);
        assert_eq!(*bigger.pixel(2, 3), WHITE);
    }

    #[test]
    fn resize_from_empty() {
        let mut image = TrueColorImage::new();
        image.resize(3, 2, WHITE);
        assert!(image.pixels().all(|&pixel| pixel == WHITE));
        assert_eq!(image.rows().count(), 2);
    }

    #[test]
    fn same_size_across_depths() {
        let mut image = TrueColorImage::new();
        image.same_size(&true_blue(), TrueColorRgb::default());
        assert_eq!((image.width(), image.height()), (100, 200));
        image.same_size(&hdr_black(), TrueColorRgb::default());
        assert_eq!((image.width(), image.height()), (300, 400));
        image.same_size(&HdrImage::new(), TrueColorRgb::default());
        assert!(image.is_empty());
    }

    #[test]
    fn swap_contents() {
        let mut a = HdrImage::new();
        let mut b = hdr_black();
        a.swap(&mut b);
        assert!(b.is_empty());
        assert_eq!(a, hdr_black());
    }

    #[test]
    fn from_pixels_is_row_major() {
        let image = TrueColorImage::from_pixels(2, 2, vec![RED, WHITE, BLUE, RED]);
        assert_eq!(*image.pixel(1, 0), WHITE);
        assert_eq!(*image.pixel(0, 1), BLUE);
        assert_eq!(image.row(1), &[BLUE, RED]);
    }

    #[test]
    #[should_panic]
    fn from_pixels_with_wrong_count() {
        TrueColorImage::from_pixels(2, 2, vec![RED; 3]);
    }

    #[test]
    fn rows_of_empty_image() {
        assert_eq!(TrueColorImage::new().rows().count(), 0);
    }
}
