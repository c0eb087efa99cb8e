/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
//! Static hardware layout of the S9501-28SMT.

use crate::helper::i2c_client_name;

pub const PLATFORM: &str = "x86-64-ufispace-s9501-28smt-r0";
pub const MODEL: &str = "S9501-28SMT";
pub const PORT_COUNT: u32 = 28;

/// iSMT SMBus, root of the mux tree (i801 on bus 0 is unused)
pub const I2C_BUS_ISMT: u32 = 1;

/// An I2C client to instantiate through `new_device`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cDevice {
    pub kind: &'static str,
    pub addr: u16,
    pub bus: u32,
}

impl I2cDevice {
    pub const fn new(kind: &'static str, addr: u16, bus: u32) -> Self {
        Self { kind, addr, bus }
    }

    /// sysfs directory of the client once it is bound.
    pub fn sysfs_dir(&self) -> String {
        format!(
            "/sys/bus/i2c/devices/{}",
            i2c_client_name(self.bus, self.addr)
        )
    }
}

pub const I2C_MUXES: [I2cDevice; 5] = [
    I2cDevice::new("pca9546", 0x75, I2C_BUS_ISMT),     // ROOT_TIMING
    I2cDevice::new("pca9546", 0x76, I2C_BUS_ISMT),     // ROOT_SFP
    I2cDevice::new("pca9548", 0x71, I2C_BUS_ISMT + 8), // CHILD_SFP_4_11
    I2cDevice::new("pca9548", 0x72, I2C_BUS_ISMT + 8), // CHILD_SFP_12_19
    I2cDevice::new("pca9548", 0x73, I2C_BUS_ISMT + 8), // CHILD_SFP_20_27
];

/// Written to a mux `idle_state` so it disconnects all channels when idle.
pub const MUX_IDLE_STATE_DISCONNECT: i32 = -2;

pub const SYS_EEPROMS: [I2cDevice; 1] = [I2cDevice::new("mb_eeprom", 0x57, I2C_BUS_ISMT)];

pub const GPIO_EXPANDERS: [I2cDevice; 11] = [
    I2cDevice::new("pca9535", 0x20, 4), // BOARD_ID
    I2cDevice::new("pca9535", 0x22, 6), // TX_DIS_0_15
    I2cDevice::new("pca9535", 0x24, 6), // TX_DIS_16_31
    I2cDevice::new("pca9535", 0x26, 7), // TX_FLT_0_15
    I2cDevice::new("pca9535", 0x27, 7), // TX_FLT_16_31
    I2cDevice::new("pca9535", 0x25, 7), // RATE_SELECT_0_15
    I2cDevice::new("pca9535", 0x23, 7), // RATE_SELECT_16_31
    I2cDevice::new("pca9535", 0x20, 8), // MOD_ABS_0_15
    I2cDevice::new("pca9535", 0x22, 8), // MOD_ABS_16_31
    I2cDevice::new("pca9535", 0x21, 8), // RX_LOS_0_15
    I2cDevice::new("pca9535", 0x24, 8), // RX_LOS_16_31
];

pub const SFP_EEPROM_KIND: &str = "optoe2";
pub const SFP_EEPROM_ADDR: u16 = 0x50;
/// Front-panel ports 0..=3 are RJ45; SFP cages start at port 4.
pub const SFP_FIRST_PORT: u32 = 4;
pub const SFP_FIRST_BUS: u32 = I2C_BUS_ISMT + 9;
pub const SFP_BUS_COUNT: u32 = 24;

/// One SFP cage: the mux channel bus its EEPROM sits on and its port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SfpPort {
    pub bus: u32,
    pub port: u32,
}

impl SfpPort {
    pub fn eeprom(&self) -> I2cDevice {
        I2cDevice::new(SFP_EEPROM_KIND, SFP_EEPROM_ADDR, self.bus)
    }

    pub fn port_name_path(&self) -> String {
        format!("{}/port_name", self.eeprom().sysfs_dir())
    }
}

pub fn sfp_ports() -> impl Iterator<Item = SfpPort> {
    (0..SFP_BUS_COUNT).map(|i| SfpPort {
        bus: SFP_FIRST_BUS + i,
        port: SFP_FIRST_PORT + i,
    })
}

// Kernel modules
pub const MODULE_VENDOR: &str = "ufispace";
pub const MODULE_I2C_ISMT: &str = "i2c-ismt";
pub const MODULE_LPC: &str = "x86-64-ufispace-s9501-28smt-lpc";
pub const MODULE_EEPROM_MB: &str = "x86-64-ufispace-eeprom-mb";
pub const MODULE_OPTOE: &str = "optoe";
pub const MODULE_JC42: &str = "jc42";

// sysfs / filesystem paths
pub const BOARD_ID_PATH: &str =
    "/sys/devices/platform/x86_64_ufispace_s9501_28smt_lpc/mb_cpld/board_id_0";
pub const BMC_ENABLE_PATH: &str = "/etc/onl/bmc_en";
pub const GPIO_EXPORT_PATH: &str = "/sys/class/gpio/export";

pub fn gpio_direction_path(pin: usize) -> String {
    format!("/sys/class/gpio/gpio{}/direction", pin)
}

pub fn mux_idle_state_path(mux: &I2cDevice) -> String {
    format!("{}/idle_state", mux.sysfs_dir())
}
