use std::fmt;
use std::sync::{Mutex, PoisonError};

use log::{debug, info, warn};

use crate::device::{DeviceDescriptor, DeviceResolver, MidiBackend, OutputConnection};
use crate::error::MidiError;
use crate::mode::ApcMode;
use crate::sysex::SysExFrame;

/// What happened when a mode was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeStatus {
    Applied(ApcMode),
    NoDevice,
}

impl fmt::Display for ModeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeStatus::Applied(mode) => write!(f, "\"{}\" is turned on", mode),
            ModeStatus::NoDevice => f.write_str("No supported device found"),
        }
    }
}

/// An open output port.  It is closed when this is dropped, so an
/// error part way through still releases the device.
struct OpenDevice<C: OutputConnection> {
    name: String,
    conn: Option<C>,
}

impl<C: OutputConnection> OpenDevice<C> {
    fn open<B>(backend: &B, device: &DeviceDescriptor) -> Result<Self, MidiError>
    where
        B: MidiBackend<Connection = C>,
    {
        let conn = backend.open(device)?;
        debug!("Opened {:?}", device.name);
        Ok(Self {
            name: device.name.clone(),
            conn: Some(conn),
        })
    }

    fn send(&mut self, msg: &[u8]) -> Result<(), MidiError> {
        match self.conn.as_mut() {
            Some(conn) => conn.send(msg),
            None => Err(MidiError::Send {
                name: self.name.clone(),
                reason: "port is closed".to_string(),
            }),
        }
    }

    fn close(mut self) {
        if let Some(conn) = self.conn.take() {
            conn.close();
            debug!("Closed {:?}", self.name);
        }
    }
}

impl<C: OutputConnection> Drop for OpenDevice<C> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            warn!("Closing {:?} after a failure", self.name);
            conn.close();
        }
    }
}

/// Sets the mode of the first APC40/APC20 found.  Only one mode
/// change runs at a time: the port is opened, sent to and closed
/// while holding `lock`.
#[derive(Debug)]
pub struct ModeApplicator<B: MidiBackend> {
    backend: B,
    lock: Mutex<()>,
}

impl<B: MidiBackend> ModeApplicator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn apply_mode(&self, mode: ApcMode) -> Result<ModeStatus, MidiError> {
        // Nothing is guarded but the critical section so a poisoned
        // lock is still usable
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let device = match DeviceResolver::new(&self.backend).resolve()? {
            Some(device) => device,
            None => {
                info!("No APC40 or APC20 among the MIDI outputs");
                return Ok(ModeStatus::NoDevice);
            }
        };

        let frame = SysExFrame::mode_change(mode);
        let mut open_device = OpenDevice::open(&self.backend, &device)?;
        debug!("{:?} <- [{}]", device.name, frame);
        open_device.send(frame.as_bytes())?;
        open_device.close();

        info!("{:?} set to {}", device.name, mode);
        Ok(ModeStatus::Applied(mode))
    }

    /// As `apply_mode` but any error becomes its message, ready to
    /// show the user
    pub fn apply_mode_status(&self, mode: ApcMode) -> String {
        match self.apply_mode(mode) {
            Ok(status) => status.to_string(),
            Err(err) => {
                warn!("Setting {} failed: {}", mode, err);
                err.to_string()
            }
        }
    }
}
