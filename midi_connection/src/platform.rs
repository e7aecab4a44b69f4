use log::warn;

use crate::applicator::ModeApplicator;
use crate::device::MidiBackend;
use crate::mode::ApcMode;

/// Operating systems whose MIDI drivers can talk to the APC
const SUPPORTED_OS_PREFIXES: [&str; 3] = ["Windows", "Linux", "LINUX"];

pub fn is_supported_os(os_name: &str) -> bool {
    SUPPORTED_OS_PREFIXES
        .iter()
        .any(|prefix| os_name.starts_with(prefix))
}

/// A display name for the OS this was built for
pub fn current_os_name() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "linux" => "Linux",
        "macos" => "Mac OS X",
        other => other,
    }
}

/// Apply `mode` unless `os_name` is not supported, in which case
/// no MIDI call is made at all.  Returns the status to show.
pub fn apply_if_supported<B: MidiBackend>(
    os_name: &str,
    applicator: &ModeApplicator<B>,
    mode: ApcMode,
) -> String {
    if !is_supported_os(os_name) {
        warn!("Refusing to set {} on {}", mode, os_name);
        return format!("{} is not supported", os_name);
    }
    applicator.apply_mode_status(mode)
}
