use thiserror::Error;

/// Everything that can go wrong talking to the MIDI subsystem.  The
/// messages are shown to the user as status text.
#[derive(Debug, Error)]
pub enum MidiError {
    #[error("MIDI subsystem unavailable: {0}")]
    Unavailable(String),
    #[error("Could not read MIDI port name: {0}")]
    PortInfo(String),
    #[error("Could not open {name}: {reason}")]
    Open { name: String, reason: String },
    #[error("Could not send to {name}: {reason}")]
    Send { name: String, reason: String },
    #[error("Invalid SysEx message: {0}")]
    InvalidSysEx(String),
}

impl From<midir::InitError> for MidiError {
    fn from(err: midir::InitError) -> Self {
        MidiError::Unavailable(err.to_string())
    }
}

impl From<midir::PortInfoError> for MidiError {
    fn from(err: midir::PortInfoError) -> Self {
        MidiError::PortInfo(err.to_string())
    }
}
