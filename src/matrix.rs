//! Row-major matrix storage, non-owning views, and the local multiply kernel.

use std::fmt::Debug;
use std::ops::{AddAssign, Mul};

use crate::Error;
use crate::plan::Strip;

/// Numeric element types the engine can multiply.
///
/// Accumulation uses the type's native `+=` and `*`; integer wraparound and
/// floating-point rounding follow the element type with no extra policy.
pub trait Element:
    Copy + Send + Sync + Debug + PartialEq + AddAssign + Mul<Output = Self> + 'static
{
    const ZERO: Self;
    const ONE: Self;
}

macro_rules! impl_element {
    ($($t:ty => ($zero:expr, $one:expr)),* $(,)?) => {
        $(impl Element for $t {
            const ZERO: Self = $zero;
            const ONE: Self = $one;
        })*
    };
}

impl_element! {
    i32 => (0, 1),
    i64 => (0, 1),
    f32 => (0.0, 1.0),
    f64 => (0.0, 1.0),
}

/// An owned dense matrix in row-major order.
///
/// Invariant: `data.len() == rows * cols`, enforced at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<E> {
    rows: usize,
    cols: usize,
    data: Vec<E>,
}

impl<E: Element> Matrix<E> {
    /// Wraps a flattened row-major buffer as a `rows x cols` matrix.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<E>) -> Result<Self, Error> {
        if data.len() != rows * cols {
            return Err(Error::StorageShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// An all-zero `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![E::ZERO; rows * cols],
        }
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = E::ONE;
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> E {
        self.data[row * self.cols + col]
    }

    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<E> {
        self.data
    }

    /// A borrowed view of the whole matrix.
    pub fn view(&self) -> MatrixView<'_, E> {
        MatrixView::new(&self.data, self.rows, self.cols)
    }

    /// The contiguous storage of a band of whole rows.
    pub fn row_band(&self, strip: Strip) -> &[E] {
        &self.data[strip.offset * self.cols..(strip.offset + strip.len) * self.cols]
    }

    /// Appends a band of columns to `out`, packed row-major as a
    /// `rows x strip.len` block.
    pub fn pack_cols_into(&self, strip: Strip, out: &mut Vec<E>) {
        for row in 0..self.rows {
            let start = row * self.cols + strip.offset;
            out.extend_from_slice(&self.data[start..start + strip.len]);
        }
    }
}

/// A non-owning view of a contiguous buffer with a logical shape.
///
/// The borrow ties the view's lifetime to the backing buffer, so a view can
/// never be read after the buffer it overlays is gone.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, E> {
    rows: usize,
    cols: usize,
    data: &'a [E],
}

impl<'a, E: Element> MatrixView<'a, E> {
    /// Overlays `data` as a `rows x cols` view. The backing slice must match
    /// the shape exactly; a mismatch is a defect in the caller, not a
    /// recoverable condition.
    pub fn new(data: &'a [E], rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "view shape does not match buffer");
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn at(&self, row: usize, col: usize) -> E {
        self.data[row * self.cols + col]
    }

    /// Multiplies `self` (`r x t`) by `rhs` (`t x c`) and writes the `r x c`
    /// product into `out` at column `col_offset` of a row length `out_cols`.
    ///
    /// Distinct `col_offset` ranges write to disjoint regions of `out`, which
    /// is what lets the rotation rounds land in any order.
    pub fn multiply_into(
        &self,
        rhs: &MatrixView<'_, E>,
        out: &mut [E],
        out_cols: usize,
        col_offset: usize,
    ) {
        debug_assert_eq!(self.cols, rhs.rows);
        for row in 0..self.rows {
            for col in 0..rhs.cols {
                let mut acc = E::ZERO;
                for t in 0..self.cols {
                    acc += self.data[row * self.cols + t] * rhs.data[t * rhs.cols + col];
                }
                out[row * out_cols + col_offset + col] = acc;
            }
        }
    }
}
