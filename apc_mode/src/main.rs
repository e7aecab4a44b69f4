//! Sets the mode of an Akai APC40 or APC20
//! See "Introduction message" in the APC40 communications protocol
//! 40h (64): Generic Mode
//! 41h (65): Ableton Live Mode
//! 42h (66): Alternate Ableton Live Mode
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use midi_connection::{
    apply_if_supported, current_os_name, is_supported_os, ApcMode, DeviceResolver, MidirBackend,
    ModeApplicator, PortDirection, SysExFrame,
};

#[derive(Parser, Debug)]
#[command(about = "Switch an Akai APC40/APC20 between its onboard modes")]
struct Cli {
    /// The name this registers with the MIDI system
    #[arg(long, default_value = "apc-mode")]
    client_name: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send the mode change to the first APC40/APC20 found
    Set { mode: ModeArg },
    /// List MIDI ports.  `*` marks a port `set` would use
    List,
    /// Print the SysEx for a mode without sending it
    Frame { mode: ModeArg },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    Generic,
    AbletonLive,
    AlternateAbletonLive,
}

impl From<ModeArg> for ApcMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Generic => ApcMode::Generic,
            ModeArg::AbletonLive => ApcMode::AbletonLive,
            ModeArg::AlternateAbletonLive => ApcMode::AlternateAbletonLive,
        }
    }
}

fn list_ports(client_name: &str) -> Result<()> {
    let backend = MidirBackend::new(client_name);
    let devices = DeviceResolver::new(&backend)
        .list()
        .context("listing MIDI ports")?;
    for device in devices {
        let marker = if device.is_supported_controller() && device.is_output() {
            '*'
        } else {
            ' '
        };
        let direction = match device.direction {
            PortDirection::Input => "IN",
            PortDirection::Output => "OUT",
        };
        println!("{} {:<3} {}", marker, direction, device.name);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let os_name = current_os_name();

    match cli.command {
        Command::Frame { mode } => println!("{}", SysExFrame::mode_change(mode.into())),
        Command::Set { mode } => {
            let applicator = ModeApplicator::new(MidirBackend::new(&cli.client_name));
            println!("{}", apply_if_supported(os_name, &applicator, mode.into()));
        }
        Command::List => {
            if is_supported_os(os_name) {
                list_ports(&cli.client_name)?;
            } else {
                println!("{} is not supported", os_name);
            }
        }
    }
    Ok(())
}
