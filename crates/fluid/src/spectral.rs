//! 2D real-to-half-complex transform over the padded grid buffer.
//!
//! Reproduces the in-place `rfftw2d` convention the solver's spectral step
//! iterates over: after a forward transform, row `j` of a [`PaddedField`]
//! holds `dim / 2 + 1` interleaved `(re, im)` pairs at stride `dim + 2`,
//! with the column pair index `k` giving the x-wavenumber and `j` giving
//! the y-wavenumber (folded at `dim / 2`). Both directions are
//! unnormalized: a round trip multiplies every sample by `dim * dim`.
//!
//! Built from two 1D complex FFT passes (`rustfft`): rows first on the
//! forward path, columns first on the inverse path. The inverse row pass
//! reconstructs the full-length spectrum from the stored half via
//! conjugate symmetry before transforming back to real samples.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use smoke_engine_core::error::SimError;
use smoke_engine_core::field::PaddedField;
use std::sync::Arc;

/// Planned forward/inverse 2D transforms for one grid side.
pub struct SpectralTransform {
    dim: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    /// One row or column of complex samples, reused across passes.
    line: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl SpectralTransform {
    /// Plans transforms for a grid of side `dim`.
    ///
    /// Returns `SimError::InvalidDimensions` for a zero or odd side; the
    /// packed half-complex layout assumes `dim` is even.
    pub fn new(dim: usize) -> Result<Self, SimError> {
        if dim == 0 || dim % 2 != 0 {
            return Err(SimError::InvalidDimensions);
        }
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(dim);
        let inverse = planner.plan_fft_inverse(dim);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        Ok(Self {
            dim,
            forward,
            inverse,
            line: vec![Complex::new(0.0, 0.0); dim],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        })
    }

    /// Side length this transform was planned for.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// In-place forward transform: staged real samples to the packed
    /// half-complex spectrum.
    ///
    /// The caller stages real samples at stride `dim + 2` (see
    /// [`PaddedField::pack_from_spatial`]); on return each row holds
    /// `dim / 2 + 1` interleaved `(re, im)` pairs.
    pub fn forward(&mut self, buf: &mut PaddedField) {
        debug_assert_eq!(buf.dim(), self.dim);
        let n = self.dim;
        let stride = n + 2;
        let half = n / 2;
        let data = buf.data_mut();

        // Row pass: real samples to half spectrum, packed in place.
        for j in 0..n {
            let row = j * stride;
            for i in 0..n {
                self.line[i] = Complex::new(data[row + i], 0.0);
            }
            self.forward
                .process_with_scratch(&mut self.line, &mut self.scratch);
            for k in 0..=half {
                data[row + 2 * k] = self.line[k].re;
                data[row + 2 * k + 1] = self.line[k].im;
            }
        }

        // Column pass over each stored pair.
        for k in 0..=half {
            for j in 0..n {
                self.line[j] =
                    Complex::new(data[j * stride + 2 * k], data[j * stride + 2 * k + 1]);
            }
            self.forward
                .process_with_scratch(&mut self.line, &mut self.scratch);
            for j in 0..n {
                data[j * stride + 2 * k] = self.line[j].re;
                data[j * stride + 2 * k + 1] = self.line[j].im;
            }
        }
    }

    /// In-place inverse transform: packed half-complex spectrum back to
    /// real samples at stride `dim + 2`.
    ///
    /// Unnormalized; the caller divides by `dim * dim` when unpacking.
    pub fn inverse(&mut self, buf: &mut PaddedField) {
        debug_assert_eq!(buf.dim(), self.dim);
        let n = self.dim;
        let stride = n + 2;
        let half = n / 2;
        let data = buf.data_mut();

        // Column pass over each stored pair.
        for k in 0..=half {
            for j in 0..n {
                self.line[j] =
                    Complex::new(data[j * stride + 2 * k], data[j * stride + 2 * k + 1]);
            }
            self.inverse
                .process_with_scratch(&mut self.line, &mut self.scratch);
            for j in 0..n {
                data[j * stride + 2 * k] = self.line[j].re;
                data[j * stride + 2 * k + 1] = self.line[j].im;
            }
        }

        // Row pass: rebuild the full spectrum from the stored half by
        // conjugate symmetry, transform back, keep the real parts.
        for j in 0..n {
            let row = j * stride;
            for k in 0..=half {
                self.line[k] = Complex::new(data[row + 2 * k], data[row + 2 * k + 1]);
            }
            for k in half + 1..n {
                self.line[k] = self.line[n - k].conj();
            }
            self.inverse
                .process_with_scratch(&mut self.line, &mut self.scratch);
            for i in 0..n {
                data[row + i] = self.line[i].re;
            }
        }
    }
}
