/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
mod cli;
use clap::Parser;
use cli::{Cli, GlobalArgs, IpmiModeCommand, MainCommand};
use std::process::ExitCode;

use s9501_platform::board::{derive_pin_plan, BoardId, GpioDirection};
use s9501_platform::error::PlatformResult;
use s9501_platform::ipmi::{DryRunMaintenance, IpmiDevice, MaintenanceModeControl};
use s9501_platform::logging;
use s9501_platform::platform::topology::BOARD_ID_PATH;
use s9501_platform::platform::{Bringup, PlatformDriver, SysfsDriver};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logger(cli.global.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> PlatformResult<()> {
    let global = &cli.global;
    let mut driver = SysfsDriver::new(&global.root).with_dry_run(global.dry_run);

    match &cli.command {
        MainCommand::Init => {
            let mut bringup = Bringup::new(&mut driver);
            if global.dry_run {
                bringup.baseconfig(|| Ok(DryRunMaintenance::default()))
            } else {
                bringup.baseconfig(|| IpmiDevice::open(global.devnum))
            }
        }
        MainCommand::Gpio => {
            Bringup::new(&mut driver).init_gpio()?;
            Ok(())
        }
        MainCommand::BoardId { value } => {
            let board_id = match value {
                Some(v) => BoardId(*v),
                None => read_board_id(&mut driver)?,
            };
            let rev = board_id.decode();
            println!("Board ID          : {}", board_id.0);
            println!("Model ID          : {}", rev.model_id);
            println!("HW Revision       : {}", rev.hw_revision);
            println!("Build Revision    : {}", rev.build_revision);
            println!("HW/Build Revision : {} ({})", rev.hw_build_revision, rev.build_name());
            Ok(())
        }
        MainCommand::GpioPlan { hw_build_rev } => {
            let rev = match hw_build_rev {
                Some(r) => *r,
                None => read_board_id(&mut driver)?.decode().hw_build_revision,
            };
            let plan = derive_pin_plan(rev);
            for (pin, dir) in plan.exported().filter(|&(_, d)| d != GpioDirection::In) {
                println!("gpio{:<4} {}", pin, dir);
            }
            Ok(())
        }
        MainCommand::IpmiMode { subcmd } => ipmi_mode(global, subcmd),
    }
}

fn read_board_id(driver: &mut SysfsDriver) -> PlatformResult<BoardId> {
    let text = driver.read_sysfs_file(BOARD_ID_PATH)?;
    BoardId::parse(&text)
}

fn ipmi_mode(global: &GlobalArgs, subcmd: &IpmiModeCommand) -> PlatformResult<()> {
    let mut ctl: Box<dyn MaintenanceModeControl> = if global.dry_run {
        Box::new(DryRunMaintenance::default())
    } else {
        Box::new(IpmiDevice::open(global.devnum)?)
    };

    match subcmd {
        IpmiModeCommand::Get => {
            let mode = ctl.get_maintenance_mode()?;
            println!("{} ({})", mode, mode.as_i32());
        }
        IpmiModeCommand::Set { mode } => {
            ctl.set_maintenance_mode((*mode).into())?;
            let mode = ctl.get_maintenance_mode()?;
            println!("{} ({})", mode, mode.as_i32());
        }
    }
    Ok(())
}
