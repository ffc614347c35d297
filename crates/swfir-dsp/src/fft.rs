//! FFT wrapper for fixed-size complex transforms

use rustfft::{FftPlanner, num_complex::Complex64};
use std::sync::Arc;

/// Forward/inverse FFT pair planned once for a fixed size.
///
/// Plans are shared `Arc`s, so one `Fft` can serve several threads.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    ifft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        Self { fft, ifft, size }
    }

    /// Forward FFT of real input, zero-padded or truncated to the FFT size
    ///
    /// Returns the full `size`-bin spectrum.
    pub fn forward_real(&self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));
        self.fft.process(&mut buffer);
        buffer
    }

    /// Perform inverse FFT on complex buffer (in-place, scaled by `1/size`)
    pub fn inverse_complex(&self, buffer: &mut [Complex64]) {
        self.ifft.process(buffer);

        let scale = 1.0 / self.size as f64;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }
}

impl std::fmt::Debug for Fft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft").field("size", &self.size).finish()
    }
}
