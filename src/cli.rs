/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use s9501_platform::ipmi::IpmiMaintenanceMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "s9501-platform",
    version,
    about = "S9501-28SMT platform base configuration",
    max_term_width = 100
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: MainCommand,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(short = 'v', action = ArgAction::Count, global = true, help = "Verbose (can use multiple times)")]
    pub verbose: u8,

    /// IPMI device number (/dev/ipmiN)
    #[arg(short = 'd', long, default_value_t = 0, global = true)]
    pub devnum: u8,

    /// Filesystem root that /sys and /etc paths are resolved under
    #[arg(long, default_value = "/", global = true)]
    pub root: PathBuf,

    /// Print every write, module load and ioctl instead of performing it
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum MainCommand {
    /// Run the full base configuration
    Init,
    /// Register the GPIO expanders and configure their lines
    Gpio,
    /// Decode the board id
    BoardId {
        /// Decode this value instead of reading the CPLD
        #[arg(long)]
        value: Option<u8>,
    },
    /// Show the driven GPIO lines for a hw/build revision
    GpioPlan {
        /// hw/build revision; read from the CPLD when omitted
        #[arg(long)]
        hw_build_rev: Option<u8>,
    },
    /// Get or set the BMC maintenance mode
    IpmiMode {
        #[command(subcommand)]
        subcmd: IpmiModeCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum IpmiModeCommand {
    Get,
    Set { mode: ModeArg },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Auto,
    Off,
    On,
}

impl From<ModeArg> for IpmiMaintenanceMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Auto => IpmiMaintenanceMode::Auto,
            ModeArg::Off => IpmiMaintenanceMode::Off,
            ModeArg::On => IpmiMaintenanceMode::On,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_init_defaults() {
        let cli = Cli::try_parse_from(["s9501-platform", "init"]).unwrap();
        assert_eq!(cli.global.verbose, 0);
        assert_eq!(cli.global.devnum, 0);
        assert_eq!(cli.global.root, PathBuf::from("/"));
        assert!(!cli.global.dry_run);
        assert!(matches!(cli.command, MainCommand::Init));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "s9501-platform",
            "gpio",
            "-vv",
            "--root",
            "/tmp/x",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.root, PathBuf::from("/tmp/x"));
        assert!(cli.global.dry_run);
    }

    #[test]
    fn test_parse_ipmi_mode_set() {
        let cli = Cli::try_parse_from(["s9501-platform", "-d", "1", "ipmi-mode", "set", "on"])
            .unwrap();
        assert_eq!(cli.global.devnum, 1);
        match cli.command {
            MainCommand::IpmiMode {
                subcmd: IpmiModeCommand::Set { mode },
            } => assert_eq!(IpmiMaintenanceMode::from(mode), IpmiMaintenanceMode::On),
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["s9501-platform", "ipmi-mode", "set", "maybe"]).is_err());
    }

    #[test]
    fn test_parse_board_id_value() {
        let cli = Cli::try_parse_from(["s9501-platform", "board-id", "--value", "16"]).unwrap();
        assert!(matches!(cli.command, MainCommand::BoardId { value: Some(16) }));
        assert!(Cli::try_parse_from(["s9501-platform", "board-id", "--value", "256"]).is_err());
    }
}
