use std::fmt::{self, Debug, Display};
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

pub const DEFAULT_DELTA: f64 = 0.001;

/// Numeric element of a [`Vector`] or [`Matrix`].
pub trait Scalar:
    Copy
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    fn to_f64(self) -> f64;

    /// Convert back from `f64`, truncating toward zero for integer types.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_scalar {
    ($($scalar:ty => $zero:expr, $one:expr);* $(;)?) => {
        $(
            impl Scalar for $scalar {
                const ZERO: Self = $zero;
                const ONE: Self = $one;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $scalar
                }
            }
        )*
    };
}

impl_scalar!(
    u8 => 0, 1;
    i32 => 0, 1;
    i64 => 0, 1;
    f32 => 0.0, 1.0;
    f64 => 0.0, 1.0;
);

/// Return true when lhs and rhs differ by at most delta.
///
/// Values that compare equal with `==` are always almost equal, which
/// covers matching infinities. delta must be positive.
#[track_caller]
pub fn almost_equal<T: Scalar>(lhs: T, rhs: T, delta: f64) -> bool {
    assert!(delta > 0.0, "delta must be positive, but was {}", delta);
    if lhs == rhs {
        return true;
    }
    (lhs.to_f64() - rhs.to_f64()).abs() <= delta
}

/// A mathematical vector with `N` elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<T, const N: usize> {
    elements: [T; N],
}

pub type Vector2<T> = Vector<T, 2>;
pub type Vector3<T> = Vector<T, 3>;
pub type Vector4<T> = Vector<T, 4>;

impl<T, const N: usize> Vector<T, N> {
    pub const fn from_array(elements: [T; N]) -> Self {
        Self { elements }
    }

    pub fn is_index(index: usize) -> bool {
        index < N
    }

    pub fn dimension(&self) -> usize {
        N
    }

    pub fn as_array(&self) -> &[T; N] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<T: Scalar, const N: usize> Vector<T, N> {
    pub fn new(default_value: T) -> Self {
        Self {
            elements: [default_value; N],
        }
    }

    /// Copy values into a new vector. Missing trailing elements are zero,
    /// surplus values are ignored.
    pub fn from_slice(values: &[T]) -> Self {
        let mut vector = Self::default();
        for (element, &value) in vector.elements.iter_mut().zip(values) {
            *element = value;
        }
        vector
    }

    pub fn fill(&mut self, value: T) {
        self.elements.fill(value);
    }

    fn map(self, f: impl Fn(T) -> T) -> Self {
        Self {
            elements: self.elements.map(f),
        }
    }

    fn zip_with(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        Self {
            elements: std::array::from_fn(|i| f(self.elements[i], rhs.elements[i])),
        }
    }

    pub fn dot(&self, rhs: &Self) -> T {
        self.elements
            .iter()
            .zip(rhs.elements.iter())
            .fold(T::ZERO, |acc, (&lhs, &rhs)| acc + lhs * rhs)
    }

    pub fn magnitude_squared(&self) -> T {
        self.dot(self)
    }

    pub fn magnitude(&self) -> T {
        T::from_f64(self.magnitude_squared().to_f64().sqrt())
    }

    /// Same direction, magnitude 1.
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        self.map(|element| element / magnitude)
    }

    pub fn almost_equal(&self, rhs: &Self, delta: f64) -> bool {
        self.elements
            .iter()
            .zip(rhs.elements.iter())
            .all(|(&lhs, &rhs)| almost_equal(lhs, rhs, delta))
    }

    /// `R` consecutive elements starting at `start_index`.
    #[track_caller]
    pub fn subvector<const R: usize>(&self, start_index: usize) -> Vector<T, R> {
        const { assert!(R <= N, "subvector cannot be larger than the source vector") };
        assert!(
            start_index + R <= N,
            "subvector of dimension {} starting at {} exceeds dimension {}",
            R,
            start_index,
            N
        );
        Vector {
            elements: std::array::from_fn(|i| self.elements[start_index + i]),
        }
    }

    /// The first `R` elements.
    pub fn shrink<const R: usize>(&self) -> Vector<T, R> {
        const { assert!(R < N, "shrunk vector must be smaller than the source vector") };
        Vector {
            elements: std::array::from_fn(|i| self.elements[i]),
        }
    }

    /// A copy extended to `R` elements, new elements set to `default_value`.
    pub fn grow<const R: usize>(&self, default_value: T) -> Vector<T, R> {
        const { assert!(R > N, "grown vector must be larger than the source vector") };
        Vector {
            elements: std::array::from_fn(|i| {
                if i < N {
                    self.elements[i]
                } else {
                    default_value
                }
            }),
        }
    }
}

impl<T: Scalar> Vector<T, 3> {
    /// Cross product `self × rhs`.
    pub fn cross(&self, rhs: &Self) -> Self {
        let [x1, y1, z1] = self.elements;
        let [x2, y2, z2] = rhs.elements;
        Self {
            elements: [y1 * z2 - z1 * y2, z1 * x2 - x1 * z2, x1 * y2 - y1 * x2],
        }
    }
}

impl<T: Scalar, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::new(T::ZERO)
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        assert!(Self::is_index(index), "index {} out of range 0..{}", index, N);
        &self.elements[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        assert!(Self::is_index(index), "index {} out of range 0..{}", index, N);
        &mut self.elements[index]
    }
}

impl<T: Scalar, const N: usize> Add for Vector<T, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |lhs, rhs| lhs + rhs)
    }
}

impl<T: Scalar, const N: usize> Sub for Vector<T, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |lhs, rhs| lhs - rhs)
    }
}

impl<T: Scalar, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.map(|element| T::ZERO - element)
    }
}

impl<T: Scalar, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|element| element * rhs)
    }
}

/// Dot product.
impl<T: Scalar, const N: usize> Mul for Vector<T, N> {
    type Output = T;

    fn mul(self, rhs: Self) -> Self::Output {
        self.dot(&rhs)
    }
}

impl<T: Scalar, const N: usize> Div<T> for Vector<T, N> {
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        self.map(|element| element / rhs)
    }
}

impl<T: Display, const N: usize> Display for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, ">")
    }
}

/// A matrix with `H` rows and `W` columns, stored as row vectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix<T, const H: usize, const W: usize> {
    rows: [Vector<T, W>; H],
}

pub type Matrix2x2<T> = Matrix<T, 2, 2>;
pub type Matrix3x3<T> = Matrix<T, 3, 3>;
pub type Matrix4x4<T> = Matrix<T, 4, 4>;

impl<T, const H: usize, const W: usize> Matrix<T, H, W> {
    pub const fn from_rows(rows: [Vector<T, W>; H]) -> Self {
        Self { rows }
    }

    pub const fn is_row(row: usize) -> bool {
        row < H
    }

    pub const fn is_column(column: usize) -> bool {
        column < W
    }

    pub const fn is_square() -> bool {
        H == W
    }

    pub const fn height() -> usize {
        H
    }

    pub const fn width() -> usize {
        W
    }
}

impl<T: Scalar, const H: usize, const W: usize> Matrix<T, H, W> {
    pub fn new(default_value: T) -> Self {
        Self {
            rows: [Vector::new(default_value); H],
        }
    }

    fn from_fn(f: impl Fn(usize, usize) -> T) -> Self {
        Self {
            rows: std::array::from_fn(|row| {
                Vector::from_array(std::array::from_fn(|column| f(row, column)))
            }),
        }
    }

    /// Fill in row-major order. Missing values are zero, surplus values
    /// are ignored.
    pub fn from_slice(values: &[T]) -> Self {
        Self::from_fn(|row, column| values.get(row * W + column).copied().unwrap_or(T::ZERO))
    }

    fn map(self, f: impl Fn(T) -> T) -> Self {
        Self::from_fn(|row, column| f(self.rows[row][column]))
    }

    fn zip_with(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        Self::from_fn(|row, column| f(self.rows[row][column], rhs.rows[row][column]))
    }

    pub fn fill(&mut self, value: T) {
        for row in self.rows.iter_mut() {
            row.fill(value);
        }
    }

    pub fn identity() -> Self {
        const { assert!(H == W, "identity matrix must be square") };
        Self::from_fn(|row, column| if row == column { T::ONE } else { T::ZERO })
    }

    /// The `RH`×`RW` block whose top-left element is at (`top`, `left`).
    #[track_caller]
    pub fn submatrix<const RH: usize, const RW: usize>(
        &self,
        top: usize,
        left: usize,
    ) -> Matrix<T, RH, RW> {
        const {
            assert!(RH > 0, "submatrix height must be positive");
            assert!(RW > 0, "submatrix width must be positive");
            assert!(RH <= H, "submatrix cannot be higher than the source matrix");
            assert!(RW <= W, "submatrix cannot be wider than the source matrix");
        };
        assert!(top + RH <= H, "submatrix rows {}..{} exceed height {}", top, top + RH, H);
        assert!(
            left + RW <= W,
            "submatrix columns {}..{} exceed width {}",
            left,
            left + RW,
            W
        );
        Matrix::from_fn(|row, column| self.rows[top + row][left + column])
    }

    /// Keep only the first `RH` rows and `RW` columns.
    pub fn shrink<const RH: usize, const RW: usize>(&self) -> Matrix<T, RH, RW> {
        const {
            assert!(RH <= H && RW <= W, "shrunk matrix cannot exceed the source matrix");
            assert!(RH < H || RW < W, "shrunk matrix must be strictly smaller");
        };
        Matrix::from_fn(|row, column| self.rows[row][column])
    }

    /// Enlarge to `RH`×`RW`, new elements set to `default_value`.
    pub fn grow<const RH: usize, const RW: usize>(&self, default_value: T) -> Matrix<T, RH, RW> {
        const {
            assert!(RH >= H && RW >= W, "grown matrix cannot be smaller than the source matrix");
            assert!(RH > H || RW > W, "grown matrix must be strictly larger");
        };
        Matrix::from_fn(|row, column| {
            if row < H && column < W {
                self.rows[row][column]
            } else {
                default_value
            }
        })
    }

    #[track_caller]
    pub fn row_vector(&self, row: usize) -> Vector<T, W> {
        assert!(Self::is_row(row), "row {} out of range 0..{}", row, H);
        self.rows[row]
    }

    #[track_caller]
    pub fn row_matrix(&self, row: usize) -> Matrix<T, 1, W> {
        Matrix::from_rows([self.row_vector(row)])
    }

    #[track_caller]
    pub fn column_vector(&self, column: usize) -> Vector<T, H> {
        assert!(Self::is_column(column), "column {} out of range 0..{}", column, W);
        Vector::from_array(std::array::from_fn(|row| self.rows[row][column]))
    }

    #[track_caller]
    pub fn column_matrix(&self, column: usize) -> Matrix<T, H, 1> {
        let column = self.column_vector(column);
        Matrix::from_fn(|row, _| column[row])
    }

    pub fn transpose(&self) -> Matrix<T, W, H> {
        Matrix::from_fn(|row, column| self.rows[column][row])
    }

    pub fn almost_equal(&self, rhs: &Self, delta: f64) -> bool {
        self.rows
            .iter()
            .zip(rhs.rows.iter())
            .all(|(lhs, rhs)| lhs.almost_equal(rhs, delta))
    }

    fn with_column(&self, column: usize, values: &Vector<T, H>) -> Self {
        Self::from_fn(|r, c| if c == column { values[r] } else { self.rows[r][c] })
    }
}

impl<T: Scalar> Matrix<T, 2, 2> {
    pub fn determinant(&self) -> T {
        let [a, b] = *self.rows[0].as_array();
        let [c, d] = *self.rows[1].as_array();
        a * d - b * c
    }

    /// Solve `self · x = b` with Cramer's rule. The matrix must not be
    /// singular.
    #[track_caller]
    pub fn solve(&self, b: &Vector<T, 2>) -> Vector<T, 2> {
        let determinant = self.determinant();
        assert!(determinant != T::ZERO, "cannot solve a singular linear system");
        Vector::from_array(std::array::from_fn(|i| {
            self.with_column(i, b).determinant() / determinant
        }))
    }
}

impl<T: Scalar> Matrix<T, 3, 3> {
    pub fn determinant(&self) -> T {
        let [a, b, c] = *self.rows[0].as_array();
        let [d, e, f] = *self.rows[1].as_array();
        let [g, h, i] = *self.rows[2].as_array();
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// Solve `self · x = b` with Cramer's rule. The matrix must not be
    /// singular.
    #[track_caller]
    pub fn solve(&self, b: &Vector<T, 3>) -> Vector<T, 3> {
        let determinant = self.determinant();
        assert!(determinant != T::ZERO, "cannot solve a singular linear system");
        Vector::from_array(std::array::from_fn(|i| {
            self.with_column(i, b).determinant() / determinant
        }))
    }
}

impl<T: Scalar, const H: usize, const W: usize> Default for Matrix<T, H, W> {
    fn default() -> Self {
        Self::new(T::ZERO)
    }
}

impl<T, const H: usize, const W: usize> Index<usize> for Matrix<T, H, W> {
    type Output = Vector<T, W>;

    #[track_caller]
    fn index(&self, row: usize) -> &Self::Output {
        assert!(Self::is_row(row), "row {} out of range 0..{}", row, H);
        &self.rows[row]
    }
}

impl<T, const H: usize, const W: usize> IndexMut<usize> for Matrix<T, H, W> {
    #[track_caller]
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        assert!(Self::is_row(row), "row {} out of range 0..{}", row, H);
        &mut self.rows[row]
    }
}

impl<T: Scalar, const H: usize, const W: usize> Add for Matrix<T, H, W> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |lhs, rhs| lhs + rhs)
    }
}

impl<T: Scalar, const H: usize, const W: usize> Sub for Matrix<T, H, W> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |lhs, rhs| lhs - rhs)
    }
}

impl<T: Scalar, const H: usize, const W: usize> Neg for Matrix<T, H, W> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.map(|element| T::ZERO - element)
    }
}

impl<T: Scalar, const H: usize, const W: usize> Mul<T> for Matrix<T, H, W> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|element| element * rhs)
    }
}

impl<T: Scalar, const H: usize, const W: usize, const R: usize> Mul<Matrix<T, W, R>>
    for Matrix<T, H, W>
{
    type Output = Matrix<T, H, R>;

    fn mul(self, rhs: Matrix<T, W, R>) -> Self::Output {
        Matrix::from_fn(|row, column| self.rows[row].dot(&rhs.column_vector(column)))
    }
}

impl<T: Scalar, const H: usize, const W: usize> Div<T> for Matrix<T, H, W> {
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        self.map(|element| element / rhs)
    }
}

impl<T: Display, const H: usize, const W: usize> Display for Matrix<T, H, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            write!(f, "|")?;
            for (index, element) in row.iter().enumerate() {
                if index > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", element)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
