//! The sampler contract consumed by the stability classifier

use cube_core::{Result, Sample};

/// Outcome of one blocking read
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reading {
    /// A fresh sample
    Ready(Sample),
    /// The device had no data this tick
    NotReady,
}

impl Reading {
    pub fn sample(&self) -> Option<Sample> {
        match self {
            Reading::Ready(sample) => Some(*sample),
            Reading::NotReady => None,
        }
    }
}

impl From<Sample> for Reading {
    fn from(sample: Sample) -> Self {
        Reading::Ready(sample)
    }
}

/// Source of raw 3-axis readings.
///
/// `next_sample` is called exactly once per tick and may block. An `Err`
/// is fatal for the run: the classifier never retries.
pub trait Sampler {
    fn next_sample(&mut self) -> Result<Reading>;
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn next_sample(&mut self) -> Result<Reading> {
        (**self).next_sample()
    }
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn next_sample(&mut self) -> Result<Reading> {
        (**self).next_sample()
    }
}

/// Adapts a closure into a sampler
pub struct FnSampler<F>(pub F);

impl<F> Sampler for FnSampler<F>
where
    F: FnMut() -> Result<Reading>,
{
    fn next_sample(&mut self) -> Result<Reading> {
        (self.0)()
    }
}
