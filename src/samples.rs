use crate::error::{KMeansError, Result};
use crate::precision::Element;
use ndarray::ArrayView1;

/// Normalized single-channel intensities in raster order.
///
/// The buffer is read-only once built; a clustering run only ever borrows it.
#[derive(Clone, Debug)]
pub struct SampleBuffer<T = f32> {
    data: Vec<T>,
}

impl<T: Element> SampleBuffer<T> {
    /// Wraps already-normalized samples. Rejects an empty input and any
    /// value that is not a finite number in `[0, 1]`.
    pub fn new(samples: Vec<T>) -> Result<Self> {
        if samples.is_empty() {
            return Err(KMeansError::invalid("sample buffer cannot be empty"));
        }
        if let Some(pos) = samples
            .iter()
            .position(|&v| !(v.is_finite() && v >= T::zero() && v <= T::one()))
        {
            return Err(KMeansError::invalid(format!(
                "sample {} is not a finite value in [0, 1] ({})",
                pos, samples[pos]
            )));
        }
        Ok(SampleBuffer { data: samples })
    }

    /// Normalizes 8-bit grayscale pixels into `[0, 1]` (`byte / 255`).
    pub fn from_gray_bytes(pixels: &[u8]) -> Result<Self> {
        Self::new(pixels.iter().map(|&p| T::from_byte(p)).collect())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn view(&self) -> ArrayView1<'_, T> {
        ArrayView1::from(self.data.as_slice())
    }

    /// Smallest and largest sample value.
    pub fn bounds(&self) -> (T, T) {
        self.data
            .iter()
            .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
