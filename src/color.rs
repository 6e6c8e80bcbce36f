use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::math::{Scalar, Vector3};

/// Encoding scheme for one color channel intensity: the type storing the
/// intensity and the maximum intensity of that type.
pub trait ColorDepth: Clone + Copy + Debug + PartialEq + 'static {
    type Component: Scalar;

    const MAX_VALUE: Self::Component;
    const MAX_VALUE_INT: i32;
    const MAX_VALUE_DOUBLE: f64;

    /// Project x into `[0, MAX_VALUE]`.
    fn clamp(x: Self::Component) -> Self::Component {
        if x < Self::Component::ZERO {
            Self::Component::ZERO
        } else if x > Self::MAX_VALUE {
            Self::MAX_VALUE
        } else {
            x
        }
    }

    fn is_value(x: Self::Component) -> bool {
        x >= Self::Component::ZERO && x <= Self::MAX_VALUE
    }

    /// x as a fraction of `MAX_VALUE`.
    fn normalize(x: Self::Component) -> f64 {
        x.to_f64() / Self::MAX_VALUE_DOUBLE
    }

    /// Store an intensity given in this depth's scale, truncating to the
    /// component type.
    fn from_f64(x: f64) -> Self::Component {
        Self::Component::from_f64(x)
    }

    fn convert_to<O: ColorDepth>(x: Self::Component) -> O::Component {
        O::from_f64(Self::normalize(x) * O::MAX_VALUE_DOUBLE)
    }
}

/// 8 bit integer channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrueColorDepth;

impl ColorDepth for TrueColorDepth {
    type Component = u8;

    const MAX_VALUE: u8 = 255;
    const MAX_VALUE_INT: i32 = 255;
    const MAX_VALUE_DOUBLE: f64 = 255.0;
}

/// Floating point channels normalized to 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HdrColorDepth;

impl ColorDepth for HdrColorDepth {
    type Component = f32;

    const MAX_VALUE: f32 = 1.0;
    const MAX_VALUE_INT: i32 = 1;
    const MAX_VALUE_DOUBLE: f64 = 1.0;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RgbIndex {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl RgbIndex {
    pub const ALL: [RgbIndex; 3] = [RgbIndex::Red, RgbIndex::Green, RgbIndex::Blue];

    pub fn index(self) -> usize {
        self as usize
    }
}

pub fn is_rgb_index(i: i32) -> bool {
    (0..=2).contains(&i)
}

impl TryFrom<i32> for RgbIndex {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Red),
            1 => Ok(Self::Green),
            2 => Ok(Self::Blue),
            _ => Err(value),
        }
    }
}

/// A (red, green, blue) triple encoded in color depth `D`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb<D: ColorDepth> {
    components: Vector3<D::Component>,
    depth: PhantomData<D>,
}

pub type TrueColorRgb = Rgb<TrueColorDepth>;
pub type HdrRgb = Rgb<HdrColorDepth>;

impl<D: ColorDepth> Rgb<D> {
    #[track_caller]
    pub fn new(red: D::Component, green: D::Component, blue: D::Component) -> Self {
        check_components::<D>(red, green, blue);
        Self {
            components: Vector3::from_array([red, green, blue]),
            depth: PhantomData,
        }
    }

    #[track_caller]
    pub fn assign(&mut self, red: D::Component, green: D::Component, blue: D::Component) {
        check_components::<D>(red, green, blue);
        self.components = Vector3::from_array([red, green, blue]);
    }

    pub fn red(&self) -> D::Component {
        self.components[RgbIndex::Red.index()]
    }

    pub fn green(&self) -> D::Component {
        self.components[RgbIndex::Green.index()]
    }

    pub fn blue(&self) -> D::Component {
        self.components[RgbIndex::Blue.index()]
    }

    pub fn red_mut(&mut self) -> &mut D::Component {
        &mut self.components[RgbIndex::Red.index()]
    }

    pub fn green_mut(&mut self) -> &mut D::Component {
        &mut self.components[RgbIndex::Green.index()]
    }

    pub fn blue_mut(&mut self) -> &mut D::Component {
        &mut self.components[RgbIndex::Blue.index()]
    }

    pub fn components(&self) -> &Vector3<D::Component> {
        &self.components
    }

    pub fn convert_to<O: ColorDepth>(&self) -> Rgb<O> {
        Rgb::new(
            D::convert_to::<O>(self.red()),
            D::convert_to::<O>(self.green()),
            D::convert_to::<O>(self.blue()),
        )
    }

    pub fn almost_equal(&self, rhs: &Self, delta: f64) -> bool {
        self.components.almost_equal(&rhs.components, delta)
    }
}

#[track_caller]
fn check_components<D: ColorDepth>(red: D::Component, green: D::Component, blue: D::Component) {
    for component in [red, green, blue] {
        assert!(
            D::is_value(component),
            "Color value {} must be in range 0..={}",
            component,
            D::MAX_VALUE
        );
    }
}

impl<D: ColorDepth> Default for Rgb<D> {
    fn default() -> Self {
        Self {
            components: Vector3::default(),
            depth: PhantomData,
        }
    }
}

impl<D: ColorDepth> Index<RgbIndex> for Rgb<D> {
    type Output = D::Component;

    fn index(&self, index: RgbIndex) -> &Self::Output {
        &self.components[index.index()]
    }
}

impl<D: ColorDepth> IndexMut<RgbIndex> for Rgb<D> {
    fn index_mut(&mut self, index: RgbIndex) -> &mut Self::Output {
        &mut self.components[index.index()]
    }
}

/// Decode a 24 bit HTML color code such as `0xC0C0C0`.
pub const fn hex_color(hex: u32) -> TrueColorRgb {
    assert!(hex <= 0xFFFFFF, "hex color must fit into 24 bits");
    let red = ((hex >> 16) & 0xFF) as u8;
    let green = ((hex >> 8) & 0xFF) as u8;
    let blue = (hex & 0xFF) as u8;
    Rgb {
        components: Vector3::from_array([red, green, blue]),
        depth: PhantomData,
    }
}

// https://en.wikipedia.org/wiki/Web_colors#HTML_color_names
pub const AQUA: TrueColorRgb = hex_color(0x00FFFF);
pub const BLACK: TrueColorRgb = hex_color(0x000000);
pub const BLUE: TrueColorRgb = hex_color(0x0000FF);
pub const FUSCIA: TrueColorRgb = hex_color(0xFF00FF);
pub const GRAY: TrueColorRgb = hex_color(0x808080);
pub const GREEN: TrueColorRgb = hex_color(0x008000);
pub const LIME: TrueColorRgb = hex_color(0x00FF00);
pub const MAROON: TrueColorRgb = hex_color(0x800000);
pub const NAVY: TrueColorRgb = hex_color(0x000080);
pub const OLIVE: TrueColorRgb = hex_color(0x808000);
pub const PURPLE: TrueColorRgb = hex_color(0x800080);
pub const RED: TrueColorRgb = hex_color(0xFF0000);
pub const SILVER: TrueColorRgb = hex_color(0xC0C0C0);
pub const TEAL: TrueColorRgb = hex_color(0x008080);
pub const WHITE: TrueColorRgb = hex_color(0xFFFFFF);
pub const YELLOW: TrueColorRgb = hex_color(0xFFFF00);
