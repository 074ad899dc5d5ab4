//! Channel statistics collector.
//!
//! Builds one 256-bin histogram per channel and derives the mean and
//! population standard deviation from it, which is exact for 8-bit data.

use crate::domain::{ChannelStatistics, ChannelStats, ComputeError, PixelBuffer};

/// 256-bin histogram of one channel's sample values.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            bins: [0; 256],
            total: 0,
        }
    }
}

impl Histogram {
    /// Records one sample.
    pub fn add(&mut self, value: u8) {
        self.bins[usize::from(value)] += 1;
        self.total += 1;
    }

    /// Returns the total sample count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the count for one bin.
    #[must_use]
    pub const fn count(&self, value: u8) -> u64 {
        self.bins[value as usize]
    }

    /// Calculate mean value.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Calculate population standard deviation.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let variance: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let diff = (i as f64) - mean;
                diff * diff * (count as f64)
            })
            .sum::<f64>()
            / (self.total as f64);
        variance.sqrt()
    }

    /// Mean and standard deviation together.
    #[must_use]
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            mean: self.mean(),
            stdev: self.std_dev(),
        }
    }
}

/// Builds one histogram per channel of `buffer`.
#[must_use]
pub fn channel_histograms(buffer: &PixelBuffer) -> Vec<Histogram> {
    let mut histograms = vec![Histogram::default(); usize::from(buffer.channels())];
    for pixel in buffer.pixels() {
        for (histogram, &sample) in histograms.iter_mut().zip(pixel) {
            histogram.add(sample);
        }
    }
    histograms
}

/// Computes per-channel mean and population standard deviation.
///
/// # Errors
///
/// Returns [`ComputeError::EmptyBuffer`] when the buffer has no pixels or
/// no channels.
pub fn collect(buffer: &PixelBuffer) -> Result<ChannelStatistics, ComputeError> {
    if buffer.pixel_count() == 0 || buffer.channels() == 0 {
        return Err(ComputeError::EmptyBuffer);
    }

    let channels = channel_histograms(buffer)
        .iter()
        .map(Histogram::stats)
        .collect();

    Ok(ChannelStatistics { channels })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    fn rgb_buffer(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> PixelBuffer {
        let mut samples = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y));
            }
        }
        PixelBuffer::new(width, height, 3, samples).expect("valid buffer")
    }

    #[test]
    fn test_histogram_uniform_values() {
        let mut hist = Histogram::default();
        for v in 0..=255u8 {
            hist.add(v);
        }
        assert_eq!(hist.total(), 256);
        assert_eq!(hist.count(0), 1);
        assert_eq!(hist.count(255), 1);
        assert!((hist.mean() - 127.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_histogram() {
        let hist = Histogram::default();
        assert!((hist.mean() - 0.0).abs() < f64::EPSILON);
        assert!((hist.std_dev() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_uniform_buffer_has_zero_stdev() {
        let buffer = rgb_buffer(100, 100, |_, _| [128, 128, 128]);
        let stats = collect(&buffer).expect("stats");

        assert_eq!(stats.channels.len(), 3);
        for channel in &stats.channels {
            assert!((channel.mean - 128.0).abs() < 1e-9);
            assert!(channel.stdev.abs() < 1e-9);
        }
    }

    #[test]
    fn test_channels_are_independent() {
        let buffer = rgb_buffer(10, 10, |_, _| [10, 100, 250]);
        let stats = collect(&buffer).expect("stats");

        assert!((stats.channels[0].mean - 10.0).abs() < 1e-9);
        assert!((stats.channels[1].mean - 100.0).abs() < 1e-9);
        assert!((stats.channels[2].mean - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_population_stdev_of_two_levels() {
        // Half 0, half 255: population stdev is 127.5.
        let buffer = rgb_buffer(10, 10, |x, _| if x < 5 { [0; 3] } else { [255; 3] });
        let stats = collect(&buffer).expect("stats");

        for channel in &stats.channels {
            assert!((channel.mean - 127.5).abs() < 1e-9);
            assert!((channel.stdev - 127.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_channel_buffer() {
        let buffer = PixelBuffer::new(2, 2, 1, vec![0, 2, 4, 6]).expect("valid buffer");
        let stats = collect(&buffer).expect("stats");

        assert_eq!(stats.channels.len(), 1);
        assert!((stats.channels[0].mean - 3.0).abs() < 1e-9);
        // sqrt((9 + 1 + 1 + 9) / 4)
        assert!((stats.channels[0].stdev - 5.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_buffer_is_compute_error() {
        let buffer = PixelBuffer::new(0, 0, 3, vec![]).expect("valid buffer");
        assert!(matches!(collect(&buffer), Err(ComputeError::EmptyBuffer)));
    }
}
