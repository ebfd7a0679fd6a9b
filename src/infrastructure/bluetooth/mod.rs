//! Bluetooth Module
//!
//! Serial (RFCOMM/SPP) link to the rover's HC-05 module.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    BluetoothService                      │
//! │   (worker-thread coordinator, UI requests -> AppEvents)  │
//! └─────────────────────┬───────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐     ┌───────────┐
//!               │  RoverSession │────▶│ discovery │
//!               └───────┬───────┘     └───────────┘
//!                       │ SerialTransport / SerialLink
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!  ┌──────────────┐          ┌──────────────┐
//!  │    rfcomm    │          │  simulated   │
//!  │ (WinRT SPP)  │          │  (desktop)   │
//!  └──────────────┘          └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`protocol`] - SPP service UUID and wire format notes
//! - [`transport`] - transport traits implemented per platform
//! - [`discovery`] - bonded device filtering and name resolution
//! - [`session`] - the single open link and its state
//! - [`service`] - worker coordinator

pub mod discovery;
pub mod error;
pub mod protocol;
#[cfg(windows)]
pub mod rfcomm;
pub mod service;
pub mod session;
pub mod simulated;
pub mod transport;

#[cfg(test)]
pub(crate) mod fake;

pub use service::BluetoothService;

use transport::SerialTransport;

/// Pick the transport for this platform
pub fn platform_transport(simulate: bool) -> Box<dyn SerialTransport> {
    #[cfg(windows)]
    {
        if !simulate {
            return Box::new(rfcomm::RfcommTransport::new());
        }
    }

    if !simulate {
        tracing::warn!("No native RFCOMM backend on this platform, running simulated");
    }
    Box::new(simulated::SimulatedTransport::new())
}
