use super::Image;
use crate::color::ColorDepth;

pub mod ppm;

pub trait ImageReader<D: ColorDepth> {
    fn read_image(&mut self) -> crate::Result<Image<D>>;
}
