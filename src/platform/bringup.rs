/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use super::driver::PlatformDriver;
use super::topology::*;
use crate::board::{BoardId, BoardRevision, GpioPlan};
use crate::error::PlatformResult;
use crate::ipmi::{IpmiMaintenanceMode, MaintenanceModeControl};
use crate::{debug1, debug2};

/// Base configuration sequence for the S9501-28SMT.
pub struct Bringup<'a, D: PlatformDriver> {
    driver: &'a mut D,
}

impl<'a, D: PlatformDriver> Bringup<'a, D> {
    pub fn new(driver: &'a mut D) -> Self {
        Self { driver }
    }

    /// The BMC is always present on this model.
    pub fn check_bmc_enable(&self) -> bool {
        true
    }

    /// Run the whole bring-up. `open_ipmi` is only called once the I2C and
    /// GPIO setup is done, so the IPMI device is held for the last step only.
    pub fn baseconfig<M, F>(&mut self, open_ipmi: F) -> PlatformResult<()>
    where
        M: MaintenanceModeControl,
        F: FnOnce() -> PlatformResult<M>,
    {
        log::info!("{} base configuration ({})", MODEL, PLATFORM);

        let bmc_enable = self.check_bmc_enable();
        log::info!("bmc enable : {}", bmc_enable);
        // recorded for onlp
        self.driver
            .write_sysfs_file(BMC_ENABLE_PATH, if bmc_enable { "1" } else { "0" })?;

        // i2c_i801 is built-in
        self.driver.modprobe(MODULE_I2C_ISMT)?;
        self.driver.load_kernel_module(MODULE_LPC)?;

        self.register_devices(&I2C_MUXES)?;
        self.init_i2c_mux_idle_state(&I2C_MUXES);

        self.driver.load_kernel_module(MODULE_EEPROM_MB)?;
        self.driver.load_kernel_module(MODULE_OPTOE)?;
        self.register_devices(&SYS_EEPROMS)?;

        self.init_eeprom()?;

        self.driver.modprobe(MODULE_JC42)?;

        self.init_gpio()?;

        let mut ipmi = open_ipmi()?;
        enable_ipmi_maintenance_mode(&mut ipmi)?;

        Ok(())
    }

    fn register_devices(&mut self, devices: &[I2cDevice]) -> PlatformResult<()> {
        for dev in devices {
            debug1!("new_device {} 0x{:02x} on i2c-{}", dev.kind, dev.addr, dev.bus);
            self.driver.register_i2c_device(dev.kind, dev.addr, dev.bus)?;
        }
        Ok(())
    }

    /// Disconnect idle mux channels. Muxes without the attribute are skipped.
    pub fn init_i2c_mux_idle_state(&mut self, muxes: &[I2cDevice]) {
        let value = MUX_IDLE_STATE_DISCONNECT.to_string();
        for mux in muxes {
            let path = mux_idle_state_path(mux);
            if !self.driver.sysfs_exists(&path) {
                debug2!("{} not present, skipping", path);
                continue;
            }
            if let Err(e) = self.driver.write_sysfs_file(&path, &value) {
                log::warn!("Failed to set idle state of {}: {}", path, e);
            }
        }
    }

    /// Register the SFP EEPROMs and name them after their front-panel port.
    pub fn init_eeprom(&mut self) -> PlatformResult<()> {
        for sfp in sfp_ports() {
            let eeprom = sfp.eeprom();
            self.driver
                .register_i2c_device(eeprom.kind, eeprom.addr, eeprom.bus)?;
            self.driver
                .write_sysfs_file(&sfp.port_name_path(), &sfp.port.to_string())?;
        }
        Ok(())
    }

    /// Register the GPIO expanders and configure their lines for this board.
    ///
    /// Returns `None` when the board id cannot be read; the expanders are
    /// registered but no line is exported in that case.
    pub fn init_gpio(&mut self) -> PlatformResult<Option<BoardRevision>> {
        self.register_devices(&GPIO_EXPANDERS)?;

        let board_id = match self
            .driver
            .read_sysfs_file(BOARD_ID_PATH)
            .and_then(|text| BoardId::parse(&text))
        {
            Ok(id) => id,
            Err(e) => {
                log::error!("Get board id from LPC failed: {} ({})", e, BOARD_ID_PATH);
                return Ok(None);
            }
        };

        let revision = board_id.decode();
        debug1!("board id {}: {}", board_id.0, revision);

        let plan = revision.pin_plan();
        log::info!("{} GPIO init", revision.build_name());

        let failed = self.apply_gpio_plan(&plan);
        if failed > 0 {
            log::warn!("{} GPIO sysfs writes failed", failed);
        }
        Ok(Some(revision))
    }

    /// Export every expander line and write its direction. Failures are
    /// logged per line and do not stop the remaining lines.
    pub fn apply_gpio_plan(&mut self, plan: &GpioPlan) -> usize {
        let mut failed = 0;
        for (pin, dir) in plan.exported() {
            if let Err(e) = self.driver.write_sysfs_file(GPIO_EXPORT_PATH, &pin.to_string()) {
                log::warn!("Failed to export gpio{}: {}", pin, e);
                failed += 1;
            }
            if let Err(e) = self
                .driver
                .write_sysfs_file(&gpio_direction_path(pin), dir.as_sysfs_str())
            {
                log::warn!("Failed to set gpio{} direction {}: {}", pin, dir, e);
                failed += 1;
            }
        }
        failed
    }
}

/// Put the BMC into maintenance mode, logging the mode before and after.
pub fn enable_ipmi_maintenance_mode<M: MaintenanceModeControl>(
    ipmi: &mut M,
) -> PlatformResult<IpmiMaintenanceMode> {
    let mode = ipmi.get_maintenance_mode()?;
    log::info!("Current IPMI_MAINTENANCE_MODE={}", mode.as_i32());

    ipmi.set_maintenance_mode(IpmiMaintenanceMode::On)?;

    let mode = ipmi.get_maintenance_mode()?;
    log::info!("After IPMI_IOCTL IPMI_MAINTENANCE_MODE={}", mode.as_i32());
    Ok(mode)
}
