//! Running velocity average

/// Per-axis mean velocity (m/s)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityMean {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Cumulative velocity sums and sample count.
///
/// The sample count advances once per recorded snapshot even when some axes
/// are absent, so an intermittently missing axis is divided by the full count
/// and reads low. Kept that way for compatibility with existing logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct VelocityAverage {
    sum_x: f32,
    sum_y: f32,
    sum_z: f32,
    samples: u32,
}

impl VelocityAverage {
    pub const fn new() -> Self {
        Self {
            sum_x: 0.0,
            sum_y: 0.0,
            sum_z: 0.0,
            samples: 0,
        }
    }

    /// Accumulate the present components and return the updated mean
    pub fn record(&mut self, vx: Option<f32>, vy: Option<f32>, vz: Option<f32>) -> VelocityMean {
        if let Some(v) = vx {
            self.sum_x += v;
        }
        if let Some(v) = vy {
            self.sum_y += v;
        }
        if let Some(v) = vz {
            self.sum_z += v;
        }
        self.samples = self.samples.saturating_add(1);
        self.mean()
    }

    /// Mean over all recorded snapshots; zero before the first one
    pub fn mean(&self) -> VelocityMean {
        if self.samples == 0 {
            return VelocityMean::default();
        }
        let n = self.samples as f32;
        VelocityMean {
            x: self.sum_x / n,
            y: self.sum_y / n,
            z: self.sum_z / n,
        }
    }

    /// Number of snapshots recorded
    pub fn samples(&self) -> u32 {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_average_is_zero() {
        let average = VelocityAverage::new();
        assert_eq!(average.samples(), 0);
        assert_eq!(average.mean(), VelocityMean::default());
    }

    #[test]
    fn test_absent_components_still_count_toward_divisor() {
        let mut average = VelocityAverage::new();
        average.record(Some(1.0), None, None);
        average.record(None, Some(2.0), None);
        let mean = average.record(Some(3.0), None, None);

        assert_eq!(average.samples(), 3);
        assert!((mean.x - 4.0 / 3.0).abs() < 1e-6);
        assert!((mean.y - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(mean.z, 0.0);
    }

    #[test]
    fn test_full_samples_average_normally() {
        let mut average = VelocityAverage::new();
        average.record(Some(2.0), Some(-2.0), Some(0.5));
        let mean = average.record(Some(4.0), Some(-4.0), Some(1.5));
        assert!((mean.x - 3.0).abs() < 1e-6);
        assert!((mean.y + 3.0).abs() < 1e-6);
        assert!((mean.z - 1.0).abs() < 1e-6);
    }
}
