use std::fmt;

use crate::error::MidiError;
use crate::mode::ApcMode;

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;

/// Length of the APC introduction message
pub const FRAME_LEN: usize = 12;

/// Position of the mode byte in the frame
const MODE_INDEX: usize = 7;

/// Manufacturer (Akai 47h), device ID, model (APC40 73h), message
/// type (60h), data length (00h 04h), then the mode byte and the
/// firmware version triple.
const FRAME_TEMPLATE: [u8; FRAME_LEN] = [
    SYSEX_START,
    0x47,
    0x00,
    0x73,
    0x60,
    0x00,
    0x04,
    0x00, // mode
    0x08,
    0x04,
    0x01,
    SYSEX_END,
];

/// A SysEx message that sets the mode of an APC controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysExFrame([u8; FRAME_LEN]);

impl SysExFrame {
    pub fn mode_change(mode: ApcMode) -> Self {
        let mut bytes = FRAME_TEMPLATE;
        bytes[MODE_INDEX] = mode.byte();
        SysExFrame(bytes)
    }

    /// Check `bytes` is a well formed frame: twelve bytes, framed by
    /// F0h..F7h, every data byte seven bit.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MidiError> {
        let frame: [u8; FRAME_LEN] = bytes.try_into().map_err(|_| {
            MidiError::InvalidSysEx(format!(
                "expected {} bytes, got {}",
                FRAME_LEN,
                bytes.len()
            ))
        })?;
        if frame[0] != SYSEX_START {
            return Err(MidiError::InvalidSysEx(format!(
                "starts with {:02X}h",
                frame[0]
            )));
        }
        if frame[FRAME_LEN - 1] != SYSEX_END {
            return Err(MidiError::InvalidSysEx(format!(
                "ends with {:02X}h",
                frame[FRAME_LEN - 1]
            )));
        }
        if let Some((i, b)) = frame[1..FRAME_LEN - 1]
            .iter()
            .enumerate()
            .find(|&(_, &b)| b & 0x80 != 0)
        {
            return Err(MidiError::InvalidSysEx(format!(
                "data byte {} is {:02X}h",
                i + 1,
                b
            )));
        }
        Ok(SysExFrame(frame))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn mode_byte(&self) -> u8 {
        self.0[MODE_INDEX]
    }
}

impl fmt::Display for SysExFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}
