//! A `MidiBackend` that records what is done to it
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::device::{DeviceDescriptor, MidiBackend, OutputConnection};
use crate::error::MidiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Enumerate,
    Open(String),
    Send(Vec<u8>),
    Close(String),
}

#[derive(Debug, Default)]
struct Shared {
    events: Mutex<Vec<Event>>,
    open: AtomicBool,
    overlaps: AtomicUsize,
}

impl Shared {
    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Debug)]
pub struct RecordingBackend {
    devices: Vec<DeviceDescriptor>,
    unavailable: bool,
    fail_open: bool,
    fail_send: bool,
    send_delay: Duration,
    shared: Arc<Shared>,
}

impl RecordingBackend {
    pub fn new(devices: Vec<DeviceDescriptor>) -> Self {
        Self {
            devices,
            unavailable: false,
            fail_open: false,
            fail_send: false,
            send_delay: Duration::ZERO,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Enumeration fails as if there were no MIDI system
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new(vec![])
        }
    }

    pub fn fail_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn fail_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = delay;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.shared.events.lock().unwrap().clone()
    }

    /// How many times a port was opened while another was still open
    pub fn overlaps(&self) -> usize {
        self.shared.overlaps.load(Ordering::SeqCst)
    }

    pub fn is_open(&self) -> bool {
        self.shared.open.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct RecordingConnection {
    name: String,
    fail_send: bool,
    send_delay: Duration,
    shared: Arc<Shared>,
}

impl OutputConnection for RecordingConnection {
    fn send(&mut self, msg: &[u8]) -> Result<(), MidiError> {
        thread::sleep(self.send_delay);
        if self.fail_send {
            return Err(MidiError::Send {
                name: self.name.clone(),
                reason: "cable unplugged".to_string(),
            });
        }
        self.shared.push(Event::Send(msg.to_vec()));
        Ok(())
    }

    fn close(self) {
        self.shared.push(Event::Close(self.name.clone()));
        self.shared.open.store(false, Ordering::SeqCst);
    }
}

impl MidiBackend for RecordingBackend {
    type Connection = RecordingConnection;

    fn descriptors(&self) -> Result<Vec<DeviceDescriptor>, MidiError> {
        if self.unavailable {
            return Err(MidiError::Unavailable("no MIDI system".to_string()));
        }
        self.shared.push(Event::Enumerate);
        Ok(self.devices.clone())
    }

    fn open(&self, device: &DeviceDescriptor) -> Result<Self::Connection, MidiError> {
        if self.fail_open {
            return Err(MidiError::Open {
                name: device.name.clone(),
                reason: "device busy".to_string(),
            });
        }
        if self.shared.open.swap(true, Ordering::SeqCst) {
            self.shared.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        self.shared.push(Event::Open(device.name.clone()));
        Ok(RecordingConnection {
            name: device.name.clone(),
            fail_send: self.fail_send,
            send_delay: self.send_delay,
            shared: Arc::clone(&self.shared),
        })
    }
}
