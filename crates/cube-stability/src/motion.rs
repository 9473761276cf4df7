//! Motion score over the sample window
//!
//! The score is the sum, over the three axes, of each axis's sum of squared
//! deviations from its mean across the window. It is deliberately left
//! unnormalized: its magnitude grows with window fullness, and the default
//! threshold assumes a full window of 10.

use crate::window::SampleWindow;
use cube_core::Axis;
use num_traits::AsPrimitive;

/// Scores how much the device moved across a window
pub trait MotionMetric {
    /// Non-negative score; 0 for a window of identical samples
    fn score(&self, window: &SampleWindow) -> f64;

    fn name(&self) -> &str;
}

/// Unnormalized variance summed over the three axes
#[derive(Copy, Clone, Debug, Default)]
pub struct VarianceSum;

impl VarianceSum {
    /// Per-axis contributions in x, y, z order
    pub fn per_axis(&self, window: &SampleWindow) -> [f64; 3] {
        Axis::ALL.map(|axis| sum_of_squared_deviations(window.axis_values(axis)))
    }
}

impl MotionMetric for VarianceSum {
    fn score(&self, window: &SampleWindow) -> f64 {
        self.per_axis(window).iter().sum()
    }

    fn name(&self) -> &str {
        "variance-sum"
    }
}

impl<M: MotionMetric + ?Sized> MotionMetric for &M {
    fn score(&self, window: &SampleWindow) -> f64 {
        (**self).score(window)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Sum of squared deviations from the mean, not divided by the count.
/// Empty input scores 0.
pub fn sum_of_squared_deviations<I, T>(values: I) -> f64
where
    I: IntoIterator<Item = T>,
    I::IntoIter: Clone,
    T: AsPrimitive<f64>,
{
    let values = values.into_iter();
    let (count, total) = values
        .clone()
        .fold((0usize, 0.0f64), |(n, sum), v| (n + 1, sum + v.as_()));
    if count == 0 {
        return 0.0;
    }
    let mean = total / count as f64;
    values
        .map(|v| {
            let d = v.as_() - mean;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cube_core::Sample;

    #[test]
    fn test_sum_of_squared_deviations() {
        assert_eq!(sum_of_squared_deviations(Vec::<i32>::new()), 0.0);
        assert_eq!(sum_of_squared_deviations([7]), 0.0);
        // mean 2.5, deviations ±1.5 and ±0.5
        assert_relative_eq!(sum_of_squared_deviations([1, 2, 3, 4]), 5.0);
        assert_relative_eq!(sum_of_squared_deviations([1.5f64, 1.5, 1.5]), 0.0);
    }

    #[test]
    fn test_still_window_scores_zero() {
        let mut window = SampleWindow::new(10);
        window.extend(std::iter::repeat(Sample::new(15000, 500, 300)).take(10));
        assert_eq!(VarianceSum.score(&window), 0.0);
    }

    #[test]
    fn test_flipping_window_scores_high() {
        let mut window = SampleWindow::new(10);
        for i in 0..10 {
            let x = if i % 2 == 0 { 15000 } else { -15000 };
            window.push(Sample::new(x, 0, 0));
        }
        // mean 0, ten deviations of 15000
        assert_relative_eq!(VarianceSum.score(&window), 10.0 * 15000.0 * 15000.0);
        assert_eq!(VarianceSum.per_axis(&window)[1], 0.0);
    }

    #[test]
    fn test_score_is_sum_of_axes() {
        let mut window = SampleWindow::new(4);
        window.extend([
            Sample::new(1, 10, 100),
            Sample::new(2, 20, 200),
            Sample::new(3, 30, 300),
        ]);
        let [x, y, z] = VarianceSum.per_axis(&window);
        assert_relative_eq!(x, 2.0);
        assert_relative_eq!(y, 200.0);
        assert_relative_eq!(z, 20000.0);
        assert_relative_eq!(VarianceSum.score(&window), 20202.0);
        assert_eq!(VarianceSum.name(), "variance-sum");
    }
}
