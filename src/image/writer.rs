pub mod ppm;

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}
