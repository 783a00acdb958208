//! Flat f64 grid buffers for a square periodic domain.
//!
//! Two layouts are provided. [`Field`] is a plain `dim * dim` row-major
//! array with toroidal (wrap-around) coordinate access, used for the force
//! and density fields. [`PaddedField`] allocates `dim * (dim + 2)` values so
//! the same buffer can hold either spatial samples at row stride `dim` or
//! the packed half-complex spectrum at row stride `dim + 2`, matching the
//! in-place real-to-complex transform convention.

use crate::error::SimError;

/// A square 2D scalar field with toroidal coordinate wrapping.
///
/// Values are unbounded: forces and densities are physical quantities, not
/// normalized intensities.
#[derive(Debug, Clone)]
pub struct Field {
    dim: usize,
    data: Vec<f64>,
}

impl Field {
    /// Creates a zero-filled field of side `dim`.
    ///
    /// Returns `SimError::InvalidDimensions` if `dim` is zero or
    /// `dim * dim` overflows `usize`.
    pub fn new(dim: usize) -> Result<Self, SimError> {
        if dim == 0 {
            return Err(SimError::InvalidDimensions);
        }
        let len = dim.checked_mul(dim).ok_or(SimError::InvalidDimensions)?;
        Ok(Self {
            dim,
            data: vec![0.0; len],
        })
    }

    /// Side length in cells.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Converts signed coordinates to a flat index with toroidal wrapping.
    fn index(&self, x: isize, y: isize) -> usize {
        let d = self.dim as isize;
        let xi = x.rem_euclid(d) as usize;
        let yi = y.rem_euclid(d) as usize;
        yi * self.dim + xi
    }

    /// Gets the value at `(x, y)` with toroidal wrapping.
    pub fn get(&self, x: isize, y: isize) -> f64 {
        self.data[self.index(x, y)]
    }

    /// Sets the value at `(x, y)` with toroidal wrapping.
    pub fn set(&mut self, x: isize, y: isize, value: f64) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Sets every value to zero.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// In-place scaling of all values by `factor`.
    pub fn scale_assign(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|v| *v *= factor);
    }

    /// Overwrites this field with `src` scaled by `factor`.
    ///
    /// Both fields must have the same side; this is an internal invariant
    /// of the grid (all its fields share one `dim`), so it is debug-checked
    /// rather than surfaced as an error.
    pub fn copy_scaled_from(&mut self, src: &Field, factor: f64) {
        debug_assert_eq!(self.dim, src.dim);
        self.data
            .iter_mut()
            .zip(src.data.iter())
            .for_each(|(dst, &s)| *dst = factor * s);
    }
}

/// A square 2D buffer padded by two columns for the in-place spectral
/// transform.
///
/// Holds `dim * (dim + 2)` values. Spatial samples occupy the first
/// `dim * dim` elements at row stride `dim` (the padding is trailing
/// allocation only). The packed half-complex spectrum uses row stride
/// `dim + 2`: `dim / 2 + 1` interleaved `(re, im)` pairs per row.
#[derive(Debug, Clone)]
pub struct PaddedField {
    dim: usize,
    data: Vec<f64>,
}

impl PaddedField {
    /// Creates a zero-filled padded field of side `dim`.
    ///
    /// Returns `SimError::InvalidDimensions` if `dim` is zero, odd, or the
    /// padded length overflows `usize`. Odd sides are rejected because the
    /// half-complex packing assumes `dim / 2 + 1` pairs fit the `dim + 2`
    /// stride exactly.
    pub fn new(dim: usize) -> Result<Self, SimError> {
        if dim == 0 || dim % 2 != 0 {
            return Err(SimError::InvalidDimensions);
        }
        let len = dim
            .checked_mul(dim + 2)
            .ok_or(SimError::InvalidDimensions)?;
        Ok(Self {
            dim,
            data: vec![0.0; len],
        })
    }

    /// Side length in cells.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Row stride of the packed spectral layout.
    pub fn stride(&self) -> usize {
        self.dim + 2
    }

    /// The full padded buffer (packed spectral layout, stride `dim + 2`).
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the full padded buffer.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// The spatial region: `dim * dim` samples at row stride `dim`.
    pub fn spatial(&self) -> &[f64] {
        &self.data[..self.dim * self.dim]
    }

    /// Mutable access to the spatial region.
    pub fn spatial_mut(&mut self) -> &mut [f64] {
        let len = self.dim * self.dim;
        &mut self.data[..len]
    }

    /// Copies the spatial region of `src` (stride `dim`) into this buffer
    /// at the spectral stride `dim + 2`, staging it for a forward transform.
    pub fn pack_from_spatial(&mut self, src: &PaddedField) {
        debug_assert_eq!(self.dim, src.dim);
        let n = self.dim;
        let stride = n + 2;
        for j in 0..n {
            for i in 0..n {
                self.data[i + stride * j] = src.data[i + n * j];
            }
        }
    }

    /// Sets every value to zero.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Field --

    #[test]
    fn new_creates_zero_filled_field() {
        let field = Field::new(4).unwrap();
        assert_eq!(field.dim(), 4);
        assert_eq!(field.data().len(), 16);
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn new_with_zero_dim_returns_error() {
        assert!(matches!(Field::new(0), Err(SimError::InvalidDimensions)));
    }

    #[test]
    fn new_with_overflow_dim_returns_error() {
        assert!(Field::new(usize::MAX).is_err());
    }

    #[test]
    fn get_and_set_round_trip() {
        let mut field = Field::new(4).unwrap();
        field.set(2, 3, 0.42);
        assert!((field.get(2, 3) - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn values_are_not_clamped() {
        let mut field = Field::new(2).unwrap();
        field.set(0, 0, 10.0);
        field.set(1, 0, -3.5);
        assert!((field.get(0, 0) - 10.0).abs() < f64::EPSILON);
        assert!((field.get(1, 0) + 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn get_wraps_negative_coordinates() {
        let mut field = Field::new(4).unwrap();
        field.set(3, 3, 0.8);
        assert!((field.get(-1, -1) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn get_wraps_overflowing_coordinates() {
        let mut field = Field::new(4).unwrap();
        field.set(1, 2, 0.3);
        assert!((field.get(5, 6) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn scale_assign_multiplies_all_values() {
        let mut field = Field::new(2).unwrap();
        field.data_mut().fill(2.0);
        field.scale_assign(0.85);
        assert!(field.data().iter().all(|&v| (v - 1.7).abs() < 1e-12));
    }

    #[test]
    fn copy_scaled_from_overwrites_with_scaled_source() {
        let mut src = Field::new(3).unwrap();
        src.data_mut().fill(2.0);
        let mut dst = Field::new(3).unwrap();
        dst.data_mut().fill(99.0);
        dst.copy_scaled_from(&src, 0.995);
        assert!(dst.data().iter().all(|&v| (v - 1.99).abs() < 1e-12));
    }

    #[test]
    fn clear_zeroes_all_values() {
        let mut field = Field::new(3).unwrap();
        field.data_mut().fill(5.0);
        field.clear();
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn clone_produces_independent_copy() {
        let mut original = Field::new(3).unwrap();
        original.set(1, 1, 0.5);
        let copy = original.clone();
        original.set(1, 1, 0.9);
        assert!((copy.get(1, 1) - 0.5).abs() < f64::EPSILON);
    }

    // -- PaddedField --

    #[test]
    fn padded_new_allocates_two_extra_columns() {
        let buf = PaddedField::new(4).unwrap();
        assert_eq!(buf.dim(), 4);
        assert_eq!(buf.stride(), 6);
        assert_eq!(buf.data().len(), 4 * 6);
        assert_eq!(buf.spatial().len(), 16);
    }

    #[test]
    fn padded_new_rejects_zero_and_odd_dims() {
        assert!(matches!(
            PaddedField::new(0),
            Err(SimError::InvalidDimensions)
        ));
        assert!(matches!(
            PaddedField::new(5),
            Err(SimError::InvalidDimensions)
        ));
    }

    #[test]
    fn pack_from_spatial_restrides_rows() {
        let n = 4;
        let mut src = PaddedField::new(n).unwrap();
        for j in 0..n {
            for i in 0..n {
                src.data_mut()[i + n * j] = (i + 10 * j) as f64;
            }
        }
        let mut dst = PaddedField::new(n).unwrap();
        dst.pack_from_spatial(&src);
        for j in 0..n {
            for i in 0..n {
                assert_eq!(dst.data()[i + (n + 2) * j], (i + 10 * j) as f64);
            }
        }
    }

    #[test]
    fn spatial_mut_writes_land_in_prefix() {
        let mut buf = PaddedField::new(4).unwrap();
        buf.spatial_mut()[15] = 7.0;
        assert_eq!(buf.data()[15], 7.0);
        assert!(buf.data()[16..].iter().all(|&v| v == 0.0));
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn dimension() -> impl Strategy<Value = usize> {
            1_usize..=64
        }

        fn any_coord() -> impl Strategy<Value = isize> {
            -1000_isize..=1000
        }

        proptest! {
            #[test]
            fn get_after_set_returns_value(
                d in dimension(),
                x in any_coord(),
                y in any_coord(),
                v in -1e6_f64..=1e6,
            ) {
                let mut field = Field::new(d).unwrap();
                field.set(x, y, v);
                prop_assert!((field.get(x, y) - v).abs() < f64::EPSILON);
            }

            #[test]
            fn toroidal_equivalence(
                d in dimension(),
                x in any_coord(),
                y in any_coord(),
                v in -1e6_f64..=1e6,
            ) {
                let di = d as isize;
                let mut field = Field::new(d).unwrap();
                field.set(x, y, v);
                prop_assert!(
                    (field.get(x, y) - field.get(x + di, y + di)).abs() < f64::EPSILON,
                    "toroidal equivalence failed for ({x}, {y}) at side {d}"
                );
            }
        }
    }
}
