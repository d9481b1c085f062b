use crate::bus::{Bus, MAX_REG_BYTES};
use crate::register::{Readable, Reg, Writable};
use embedded_hal::delay::DelayNs;
use heapless::{LinearMap, Vec};

/// Calibration block from the worked example in the BMP180 datasheet (section 3.5).
pub const DATASHEET_CALIBRATION: [u8; 22] = [
    0x01, 0x98, 0xFF, 0xB8, 0xC7, 0xD1, 0x7F, 0xE5, 0x7F, 0xF5, 0x5A, 0x71, 0x18, 0x2E, 0x00,
    0x04, 0x80, 0x00, 0xDD, 0xF9, 0x0B, 0x34,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeBusError;

/// A single bus access as seen by [`FakeBus`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Access {
    /// Register address and number of bytes.
    Read(u8, usize),
    /// Register address and value.
    Write(u8, u8),
}

#[derive(Debug)]
enum RegisterValue {
    Data { bytes: [u8; MAX_REG_BYTES], len: usize },
    Fail,
}

pub struct FakeBus<const N: usize> {
    regs: LinearMap<(u8, usize), RegisterValue, N>,
    failing_writes: Vec<u8, 4>,
    accesses: Vec<Access, 32>,
}

pub struct FakeDelay {
    delays_ms: Vec<u32, 32>,
}

impl FakeDelay {
    pub fn new() -> Self {
        FakeDelay { delays_ms: Vec::new() }
    }

    pub fn delays_ms(&self) -> &[u32] {
        &self.delays_ms
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000).unwrap();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms).unwrap();
    }
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            regs: LinearMap::new(),
            failing_writes: Vec::new(),
            accesses: Vec::new(),
        }
    }

    pub fn with_response<R: Readable>(&mut self, data: &[u8]) {
        let mut register_value = [0u8; MAX_REG_BYTES];
        register_value[..data.len()].copy_from_slice(data);
        self.regs.insert((R::ADDR, R::N), RegisterValue::Data { bytes: register_value, len: data.len() }).unwrap();
    }

    pub fn with_failure<R: Readable>(&mut self) {
        self.regs.insert((R::ADDR, R::N), RegisterValue::Fail).unwrap();
    }

    pub fn with_write_failure<W: Writable>(&mut self) {
        self.failing_writes.push(W::ADDR).unwrap();
    }

    /// Every read and write the driver attempted, in order.
    pub fn accesses(&self) -> &[Access] {
        &self.accesses
    }
}

impl<const N: usize> Bus for FakeBus<N> {
    type Error = FakeBusError;

    fn read_register(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.accesses.push(Access::Read(reg, data.len())).unwrap();

        if let Some(value) = self.regs.get(&(reg, data.len())) {
            match value {
                RegisterValue::Data { bytes, len } => {
                    if *len == data.len() {
                        data.copy_from_slice(&bytes[..*len]);
                        return Ok(());
                    }
                }
                RegisterValue::Fail => return Err(FakeBusError),
            }
        }

        panic!("No mocked value for register 0x{:x} and length {}", reg, data.len())
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.accesses.push(Access::Write(reg, value)).unwrap();

        if self.failing_writes.contains(&reg) {
            return Err(FakeBusError);
        }

        Ok(())
    }
}

#[test]
fn fake_bus_serves_by_address_and_length() {
    use crate::register::out::{PressureOut, TemperatureOut};

    let mut bus: FakeBus<4> = FakeBus::new();
    bus.with_response::<TemperatureOut>(&[0x6C, 0xFA]);
    bus.with_response::<PressureOut>(&[0x5D, 0x23, 0x00]);

    assert_eq!(Ok(0x6CFA), bus.read::<TemperatureOut>());
    assert_eq!(Ok(0x5D2300), bus.read::<PressureOut>());
    assert_eq!(
        &[Access::Read(TemperatureOut::ADDR, 2), Access::Read(PressureOut::ADDR, 3)],
        bus.accesses()
    );
}
