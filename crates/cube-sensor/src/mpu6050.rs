//! MPU-6050 register access over an abstract bus
//!
//! Only the two transactions orientation detection needs are implemented:
//! waking the device out of sleep, and burst-reading the 14-byte block of
//! accelerometer, temperature and gyroscope output registers starting at
//! `ACCEL_XOUT_H`. All values are big-endian `i16`.

use crate::sampler::{Reading, Sampler};
use cube_core::{Error, Result, Sample};
use std::fmt::Display;

/// Power Management 1 register. Writing 0 clears the sleep bit.
pub const PWR_MGMT_1: u8 = 0x6B;

/// First of the 14 data output registers
pub const ACCEL_XOUT_H: u8 = 0x3B;

/// Length of the accel + temperature + gyro burst read
pub const FRAME_LEN: usize = 14;

/// I2C address of the device, selected by the AD0 pin
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Address(pub u8);

impl Address {
    /// AD0 pulled high
    pub const ALTERNATE: Address = Address(0x69);
}

impl Default for Address {
    /// AD0 low or floating
    fn default() -> Self {
        Self(0x68)
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

/// Minimal register-level bus. Implement for the platform's I2C peripheral.
pub trait RegisterBus {
    type Error: Display;

    fn write_register(&mut self, address: u8, register: u8, value: u8)
        -> std::result::Result<(), Self::Error>;

    fn read_registers(
        &mut self,
        address: u8,
        start: u8,
        buf: &mut [u8],
    ) -> std::result::Result<(), Self::Error>;
}

/// One decoded burst of the data output registers
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SensorFrame {
    pub accel: [i16; 3],
    pub temperature: i16,
    pub gyro: [i16; 3],
}

impl SensorFrame {
    pub fn from_bytes(data: [u8; FRAME_LEN]) -> Self {
        let word = |i: usize| i16::from_be_bytes([data[2 * i], data[2 * i + 1]]);
        Self {
            accel: [word(0), word(1), word(2)],
            temperature: word(3),
            gyro: [word(4), word(5), word(6)],
        }
    }

    pub fn accel_sample(&self) -> Sample {
        Sample::from(self.accel)
    }

    /// Die temperature from the datasheet conversion
    pub fn celsius(&self) -> f32 {
        f32::from(self.temperature) / 340.0 + 36.53
    }
}

/// InvenSense MPU-6050 used as an accelerometer sampler
pub struct Mpu6050<B: RegisterBus> {
    bus: B,
    address: u8,
}

impl<B: RegisterBus> Mpu6050<B> {
    /// Wake the device and take ownership of the bus
    pub fn new(bus: B, address: Address) -> Result<Self> {
        let mut sensor = Self {
            bus,
            address: address.into(),
        };
        sensor.disable_sleep()?;
        tracing::debug!(address = sensor.address, "mpu6050 awake");
        Ok(sensor)
    }

    /// Returns the underlying bus, consuming this driver
    pub fn release(self) -> B {
        self.bus
    }

    pub fn disable_sleep(&mut self) -> Result<()> {
        self.bus
            .write_register(self.address, PWR_MGMT_1, 0)
            .map_err(Error::sensor)
    }

    pub fn read_frame(&mut self) -> Result<SensorFrame> {
        let mut buf = [0u8; FRAME_LEN];
        self.bus
            .read_registers(self.address, ACCEL_XOUT_H, &mut buf)
            .map_err(Error::sensor)?;
        Ok(SensorFrame::from_bytes(buf))
    }
}

impl<B: RegisterBus> Sampler for Mpu6050<B> {
    /// Every frame is reported as read, an all-zero accelerometer block
    /// included. Whether zeros count as data is the detector's call.
    fn next_sample(&mut self) -> Result<Reading> {
        let frame = self.read_frame()?;
        Ok(Reading::Ready(frame.accel_sample()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct FakeBus {
        writes: Vec<(u8, u8, u8)>,
        frames: VecDeque<[u8; FRAME_LEN]>,
        fail_reads: bool,
    }

    impl RegisterBus for FakeBus {
        type Error = String;

        fn write_register(&mut self, address: u8, register: u8, value: u8) -> std::result::Result<(), String> {
            self.writes.push((address, register, value));
            Ok(())
        }

        fn read_registers(&mut self, address: u8, start: u8, buf: &mut [u8]) -> std::result::Result<(), String> {
            if self.fail_reads {
                return Err(format!("nack from {address:#04x}"));
            }
            assert_eq!(start, ACCEL_XOUT_H);
            let frame = self.frames.pop_front().unwrap_or([0; FRAME_LEN]);
            buf.copy_from_slice(&frame);
            Ok(())
        }
    }

    fn encode(words: [i16; 7]) -> [u8; FRAME_LEN] {
        let mut out = [0u8; FRAME_LEN];
        for (i, w) in words.iter().enumerate() {
            out[2 * i..2 * i + 2].copy_from_slice(&w.to_be_bytes());
        }
        out
    }

    #[test]
    fn test_new_wakes_device() {
        let sensor = Mpu6050::new(FakeBus::default(), Address::default()).unwrap();
        let bus = sensor.release();
        assert_eq!(bus.writes, vec![(0x68, PWR_MGMT_1, 0)]);
    }

    #[test]
    fn test_frame_decoding_is_big_endian() {
        let frame = SensorFrame::from_bytes(encode([15000, -500, 16384, -1520, 1, -2, 3]));
        assert_eq!(frame.accel, [15000, -500, 16384]);
        assert_eq!(frame.temperature, -1520);
        assert_eq!(frame.gyro, [1, -2, 3]);
        assert_eq!(frame.accel_sample(), Sample::new(15000, -500, 16384));
        assert!((frame.celsius() - 32.0594).abs() < 1e-3);
    }

    #[test]
    fn test_sampler_passes_zero_accel_through() {
        let mut bus = FakeBus::default();
        bus.frames.push_back(encode([0, 0, 0, 1200, 5, 5, 5]));
        bus.frames.push_back(encode([100, 200, 16000, 1200, 5, 5, 5]));
        let mut sensor = Mpu6050::new(bus, Address::ALTERNATE).unwrap();
        assert_eq!(sensor.next_sample().unwrap(), Reading::Ready(Sample::ZERO));
        assert_eq!(
            sensor.next_sample().unwrap(),
            Reading::Ready(Sample::new(100, 200, 16000))
        );
    }

    #[test]
    fn test_bus_failure_is_sensor_error() {
        let bus = FakeBus {
            fail_reads: true,
            ..Default::default()
        };
        let mut sensor = Mpu6050::new(bus, Address::default()).unwrap();
        let err = sensor.next_sample().unwrap_err();
        assert!(matches!(err, Error::SensorRead(ref msg) if msg == "nack from 0x68"));
    }
}
