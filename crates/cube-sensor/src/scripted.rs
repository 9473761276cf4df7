//! In-memory sample streams for tests and simulations

use crate::sampler::{Reading, Sampler};
use cube_core::{Error, Result, Sample};
use std::collections::VecDeque;

/// Plays back a fixed script of readings and failures
#[derive(Debug, Default)]
pub struct ScriptedSampler {
    script: VecDeque<Result<Reading>>,
    served: u64,
}

impl ScriptedSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script of ready samples, zeros included verbatim
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Sample>,
    {
        let mut sampler = Self::new();
        for sample in samples {
            sampler.push(sample.into());
        }
        sampler
    }

    pub fn push(&mut self, sample: Sample) -> &mut Self {
        self.script.push_back(Ok(Reading::Ready(sample)));
        self
    }

    pub fn push_repeated(&mut self, sample: Sample, count: usize) -> &mut Self {
        for _ in 0..count {
            self.push(sample);
        }
        self
    }

    pub fn push_not_ready(&mut self) -> &mut Self {
        self.script.push_back(Ok(Reading::NotReady));
        self
    }

    /// Queue a sensor failure at this point of the script
    pub fn push_failure(&mut self, message: &str) -> &mut Self {
        self.script.push_back(Err(Error::SensorRead(message.to_string())));
        self
    }

    /// Readings handed out so far, failures included
    pub fn served(&self) -> u64 {
        self.served
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Sampler for ScriptedSampler {
    fn next_sample(&mut self) -> Result<Reading> {
        match self.script.pop_front() {
            Some(entry) => {
                self.served += 1;
                entry
            }
            None => Err(Error::StreamExhausted { ticks: self.served }),
        }
    }
}
