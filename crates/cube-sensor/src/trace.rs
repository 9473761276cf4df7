//! Replay of recorded accelerometer traces
//!
//! A trace is a CSV file with an `x,y,z` header and one raw sample per row.
//! Rows are replayed verbatim, so a recorded `0,0,0` reaches the classifier
//! exactly as the device produced it.

use crate::sampler::{Reading, Sampler};
use cube_core::{Error, Result, Sample};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Sampler that replays rows of a CSV trace, one per tick
pub struct TraceSampler<R: Read> {
    rows: csv::DeserializeRecordsIntoIter<R, Sample>,
    ticks: u64,
}

impl TraceSampler<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> TraceSampler<R> {
    pub fn from_reader(reader: R) -> Self {
        let rows = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader)
            .into_deserialize();
        Self { rows, ticks: 0 }
    }

    /// Rows replayed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl<R: Read> Sampler for TraceSampler<R> {
    fn next_sample(&mut self) -> Result<Reading> {
        match self.rows.next() {
            Some(Ok(sample)) => {
                self.ticks += 1;
                Ok(Reading::Ready(sample))
            }
            Some(Err(e)) => Err(Error::sensor(format!("trace row {}: {e}", self.ticks + 1))),
            None => Err(Error::StreamExhausted { ticks: self.ticks }),
        }
    }
}

/// Load a whole trace into memory
pub fn read_trace<R: Read>(reader: R) -> Result<Vec<Sample>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader)
        .into_deserialize()
        .collect::<std::result::Result<Vec<Sample>, _>>()
        .map_err(Error::sensor)
}

/// Write samples in the trace format
pub fn write_trace<W: std::io::Write>(writer: W, samples: &[Sample]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for sample in samples {
        out.serialize(sample).map_err(Error::sensor)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "x,y,z\n# settling\n15000, 500, 300\n0,0,0\n-12001,1999,-1999\n";

    #[test]
    fn test_replay_in_order_then_exhaust() {
        let mut sampler = TraceSampler::from_reader(TRACE.as_bytes());
        assert_eq!(
            sampler.next_sample().unwrap(),
            Reading::Ready(Sample::new(15000, 500, 300))
        );
        assert_eq!(sampler.next_sample().unwrap(), Reading::Ready(Sample::ZERO));
        assert_eq!(
            sampler.next_sample().unwrap(),
            Reading::Ready(Sample::new(-12001, 1999, -1999))
        );
        assert_eq!(sampler.ticks(), 3);
        assert!(matches!(
            sampler.next_sample(),
            Err(Error::StreamExhausted { ticks: 3 })
        ));
    }

    #[test]
    fn test_malformed_row_is_sensor_error() {
        let mut sampler = TraceSampler::from_reader("x,y,z\n1,2,3\n4,five,6\n".as_bytes());
        assert!(sampler.next_sample().is_ok());
        let err = sampler.next_sample().unwrap_err();
        assert!(matches!(err, Error::SensorRead(ref msg) if msg.starts_with("trace row 2")));
    }

    #[test]
    fn test_write_then_read_preserves_rows() {
        let samples = vec![Sample::new(1, -2, 3), Sample::new(0, 16384, -7)];
        let mut buf = Vec::new();
        write_trace(&mut buf, &samples).unwrap();
        assert!(String::from_utf8_lossy(&buf).starts_with("x,y,z\n"));
        assert_eq!(read_trace(buf.as_slice()).unwrap(), samples);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let result = TraceSampler::open("/definitely/not/here.csv");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
