use log::{debug, warn};
use midir::{MidiInput, MidiOutput, MidiOutputConnection};

use crate::error::MidiError;

/// Substrings that identify a supported controller in a port name
pub const SUPPORTED_DEVICE_NAMES: [&str; 2] = ["APC40", "APC20"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

/// A MIDI port as the platform reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub name: String,
    pub direction: PortDirection,
}

impl DeviceDescriptor {
    pub fn new(name: impl Into<String>, direction: PortDirection) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    /// Can messages be sent to this port
    pub fn is_output(&self) -> bool {
        self.direction == PortDirection::Output
    }

    /// Does the name look like an APC40 or APC20
    pub fn is_supported_controller(&self) -> bool {
        SUPPORTED_DEVICE_NAMES
            .iter()
            .any(|n| self.name.contains(*n))
    }
}

/// An open, exclusively held, output port
pub trait OutputConnection {
    /// Send `msg` straight away.  There is no scheduled delivery.
    fn send(&mut self, msg: &[u8]) -> Result<(), MidiError>;
    fn close(self);
}

/// The platform MIDI layer
pub trait MidiBackend {
    type Connection: OutputConnection;

    /// Every input and output port, in the order the platform lists
    /// them.  Asked afresh on every call.
    fn descriptors(&self) -> Result<Vec<DeviceDescriptor>, MidiError>;

    fn open(&self, device: &DeviceDescriptor) -> Result<Self::Connection, MidiError>;
}

/// Names of all the ports of `midi_io`.  Ports whose name cannot be
/// read are skipped.
fn port_names<T: midir::MidiIO>(midi_io: &T) -> Vec<String> {
    let mut result = Vec::new();
    for port in midi_io.ports().iter() {
        match midi_io.port_name(port) {
            Ok(name) => result.push(name),
            Err(err) => warn!("Skipping MIDI port: {}", err),
        }
    }
    result
}

/// `MidiBackend` using `midir`.  `client_name` is the name this
/// program is known by to the MIDI system.
#[derive(Debug, Clone)]
pub struct MidirBackend {
    client_name: String,
}

impl MidirBackend {
    pub fn new(client_name: &str) -> Self {
        Self {
            client_name: client_name.to_string(),
        }
    }
}

pub struct MidirConnection {
    name: String,
    conn: MidiOutputConnection,
}

impl std::fmt::Debug for MidirConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MidirConnection").field(&self.name).finish()
    }
}

impl OutputConnection for MidirConnection {
    fn send(&mut self, msg: &[u8]) -> Result<(), MidiError> {
        self.conn.send(msg).map_err(|err| MidiError::Send {
            name: self.name.clone(),
            reason: err.to_string(),
        })
    }

    fn close(self) {
        // Hands back the `MidiOutput`, which is not wanted
        let _ = self.conn.close();
    }
}

impl MidiBackend for MidirBackend {
    type Connection = MidirConnection;

    fn descriptors(&self) -> Result<Vec<DeviceDescriptor>, MidiError> {
        let midi_in = MidiInput::new(&format!("{}-in", self.client_name))?;
        let midi_out = MidiOutput::new(&format!("{}-out", self.client_name))?;

        let inputs = port_names(&midi_in)
            .into_iter()
            .map(|n| DeviceDescriptor::new(n, PortDirection::Input));
        let outputs = port_names(&midi_out)
            .into_iter()
            .map(|n| DeviceDescriptor::new(n, PortDirection::Output));
        Ok(inputs.chain(outputs).collect())
    }

    fn open(&self, device: &DeviceDescriptor) -> Result<Self::Connection, MidiError> {
        if !device.is_output() {
            return Err(MidiError::Open {
                name: device.name.clone(),
                reason: "not an output port".to_string(),
            });
        }
        let midi_out = MidiOutput::new(&self.client_name)?;

        // The port list may have changed since it was enumerated so
        // find the port again by name
        let port = midi_out
            .ports()
            .into_iter()
            .find(|p| {
                midi_out
                    .port_name(p)
                    .map(|n| n == device.name)
                    .unwrap_or(false)
            })
            .ok_or_else(|| MidiError::Open {
                name: device.name.clone(),
                reason: "port has gone away".to_string(),
            })?;

        let conn = midi_out
            .connect(&port, &format!("{}-out", self.client_name))
            .map_err(|err| MidiError::Open {
                name: device.name.clone(),
                reason: err.to_string(),
            })?;
        Ok(MidirConnection {
            name: device.name.clone(),
            conn,
        })
    }
}

/// Finds the controller among the ports a `MidiBackend` reports
#[derive(Debug)]
pub struct DeviceResolver<'a, B: MidiBackend> {
    backend: &'a B,
}

impl<'a, B: MidiBackend> DeviceResolver<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// The first port that is named like an APC40/APC20 and can be
    /// sent to.  `None` if there is no such port.  If more than one
    /// controller is connected the first listed wins.
    pub fn resolve(&self) -> Result<Option<DeviceDescriptor>, MidiError> {
        debug!("Searching MIDI devices...");
        for device in self.backend.descriptors()? {
            debug!("MIDI device {:?} ({:?})", device.name, device.direction);
            if device.is_supported_controller() && device.is_output() {
                return Ok(Some(device));
            }
        }
        Ok(None)
    }

    /// All ports, inputs and outputs
    pub fn list(&self) -> Result<Vec<DeviceDescriptor>, MidiError> {
        self.backend.descriptors()
    }
}
