//! In-memory transport for tests

use super::error::TransportError;
use super::transport::{BondedDevice, SerialLink, SerialTransport};
use async_trait::async_trait;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeFailure {
    AdapterOff,
    Open,
    Write,
    Close,
}

#[derive(Default)]
struct FakeState {
    devices: Vec<BondedDevice>,
    failures: Vec<FakeFailure>,
    writes: Vec<Vec<u8>>,
    opens: usize,
    closes: usize,
}

/// Clones share state so a test can inspect what the session did
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Rc<RefCell<FakeState>>,
}

impl FakeTransport {
    pub fn with_devices(names: &[&str]) -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().devices = names
            .iter()
            .enumerate()
            .map(|(i, n)| BondedDevice::new(*n, format!("fake-{}", i)))
            .collect();
        fake
    }

    pub fn fail(&self, failure: FakeFailure) {
        self.state.borrow_mut().failures.push(failure);
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.borrow().writes.clone()
    }

    pub fn opens(&self) -> usize {
        self.state.borrow().opens
    }

    pub fn closes(&self) -> usize {
        self.state.borrow().closes
    }

    fn failing(&self, failure: FakeFailure) -> bool {
        self.state.borrow().failures.contains(&failure)
    }
}

#[async_trait(?Send)]
impl SerialTransport for FakeTransport {
    async fn bonded_devices(&self) -> Result<Vec<BondedDevice>, TransportError> {
        if self.failing(FakeFailure::AdapterOff) {
            return Err(TransportError::AdapterUnavailable("radio off".into()));
        }
        Ok(self.state.borrow().devices.clone())
    }

    async fn open(
        &self,
        _device: &BondedDevice,
        _service: Uuid,
    ) -> Result<Box<dyn SerialLink>, TransportError> {
        if self.failing(FakeFailure::Open) {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "read failed, socket might closed").into());
        }
        self.state.borrow_mut().opens += 1;
        Ok(Box::new(FakeLink {
            transport: self.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

struct FakeLink {
    transport: FakeTransport,
}

#[async_trait(?Send)]
impl SerialLink for FakeLink {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.transport.failing(FakeFailure::Write) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "Broken pipe").into());
        }
        self.transport.state.borrow_mut().writes.push(bytes.to_vec());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.transport.failing(FakeFailure::Close) {
            return Err(io::Error::other("close failed").into());
        }
        self.transport.state.borrow_mut().closes += 1;
        Ok(())
    }
}
