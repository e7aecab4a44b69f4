//! MIDI plumbing for switching an Akai APC40/APC20 between its
//! onboard modes.  Find the controller among the MIDI ports, build
//! the mode SysEx and send it.
pub mod applicator;
pub mod device;
pub mod error;
pub mod mode;
pub mod platform;
pub mod sysex;

#[cfg(test)]
pub(crate) mod testing;

pub use applicator::{ModeApplicator, ModeStatus};
pub use device::{
    DeviceDescriptor, DeviceResolver, MidiBackend, MidirBackend, OutputConnection, PortDirection,
};
pub use error::MidiError;
pub use mode::ApcMode;
pub use platform::{apply_if_supported, current_os_name, is_supported_os};
pub use sysex::SysExFrame;
