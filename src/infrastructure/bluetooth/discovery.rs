//! Bonded device filtering
//!
//! There is no live scan: the picker is filled from the OS list of paired
//! devices, narrowed to names that look like a serial module.

use super::transport::BondedDevice;

/// Keep devices whose name contains any of `filters`, in their original order
pub fn filter_rover_modules<'a>(
    devices: &'a [BondedDevice],
    filters: &[String],
) -> Vec<&'a BondedDevice> {
    devices
        .iter()
        .filter(|d| filters.iter().any(|f| d.name.contains(f.as_str())))
        .collect()
}

/// Resolve a picker entry back to a device. First exact match wins.
pub fn resolve_device<'a>(devices: &'a [BondedDevice], name: &str) -> Option<&'a BondedDevice> {
    devices.iter().find(|d| d.name == name)
}
