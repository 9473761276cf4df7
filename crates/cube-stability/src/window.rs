//! Bounded FIFO history of accepted samples

use cube_core::{Axis, Sample};
use std::collections::VecDeque;

/// The most recent samples, oldest first.
///
/// Holds at most `capacity` entries; pushing into a full window evicts the
/// oldest entry.
#[derive(Clone, Debug)]
pub struct SampleWindow {
    buffer: VecDeque<Sample>,
    capacity: usize,
}

impl SampleWindow {
    /// A capacity of 0 is raised to 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, returning the one evicted to make room
    pub fn push(&mut self, sample: Sample) -> Option<Sample> {
        let evicted = if self.buffer.len() == self.capacity {
            self.buffer.pop_front()
        } else {
            None
        };
        self.buffer.push_back(sample);
        evicted
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.buffer.back()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.buffer.front()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + Clone + '_ {
        self.buffer.iter()
    }

    /// Values of one axis, oldest to newest
    pub fn axis_values(&self, axis: Axis) -> impl Iterator<Item = i32> + Clone + '_ {
        self.buffer.iter().map(move |s| s.axis(axis))
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn to_vec(&self) -> Vec<Sample> {
        self.buffer.iter().copied().collect()
    }
}

impl Extend<Sample> for SampleWindow {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        for sample in iter {
            self.push(sample);
        }
    }
}
