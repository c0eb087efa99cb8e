/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::{PlatformError, PlatformResult};
use std::fmt;

// IOC commands (linux/ipmi.h)
pub const IPMI_IOC_MAGIC: u8 = b'i';
pub const IPMICTL_GET_MAINTENANCE_MODE_NR: u8 = 30;
pub const IPMICTL_SET_MAINTENANCE_MODE_NR: u8 = 31;

const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = 8;
const IOC_SIZESHIFT: u32 = 16;
const IOC_DIRSHIFT: u32 = 30;

/// Size of the `int` payload exchanged with the maintenance-mode ioctls.
pub const MODE_PAYLOAD_SIZE: usize = std::mem::size_of::<i32>();

/// Data transfer direction of an ioctl, as seen from userspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum IoctlDirection {
    None = 0,
    Write = 1,
    Read = 2,
}

/// Encode an ioctl request word: `dir << 30 | size << 16 | type << 8 | nr`.
pub const fn build_command(dir: IoctlDirection, size: u16, type_char: u8, number: u8) -> u32 {
    ((dir as u32) << IOC_DIRSHIFT)
        | ((size as u32) << IOC_SIZESHIFT)
        | ((type_char as u32) << IOC_TYPESHIFT)
        | ((number as u32) << IOC_NRSHIFT)
}

pub const IPMICTL_GET_MAINTENANCE_MODE_CMD: u32 = build_command(
    IoctlDirection::Read,
    MODE_PAYLOAD_SIZE as u16,
    IPMI_IOC_MAGIC,
    IPMICTL_GET_MAINTENANCE_MODE_NR,
);

pub const IPMICTL_SET_MAINTENANCE_MODE_CMD: u32 = build_command(
    IoctlDirection::Write,
    MODE_PAYLOAD_SIZE as u16,
    IPMI_IOC_MAGIC,
    IPMICTL_SET_MAINTENANCE_MODE_NR,
);

/// BMC maintenance mode as understood by the kernel IPMI message handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum IpmiMaintenanceMode {
    Auto = 0,
    Off = 1,
    On = 2,
}

impl IpmiMaintenanceMode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for IpmiMaintenanceMode {
    type Error = PlatformError;

    fn try_from(value: i32) -> PlatformResult<Self> {
        match value {
            0 => Ok(IpmiMaintenanceMode::Auto),
            1 => Ok(IpmiMaintenanceMode::Off),
            2 => Ok(IpmiMaintenanceMode::On),
            other => Err(PlatformError::Decode(format!(
                "unknown maintenance mode {}",
                other
            ))),
        }
    }
}

impl fmt::Display for IpmiMaintenanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IpmiMaintenanceMode::Auto => "auto",
            IpmiMaintenanceMode::Off => "off",
            IpmiMaintenanceMode::On => "on",
        };
        f.write_str(name)
    }
}

/// Input buffer for the GET ioctl; the driver ignores its content.
pub fn encode_mode_request() -> [u8; MODE_PAYLOAD_SIZE] {
    0i32.to_ne_bytes()
}

/// Interpret a GET response as a native-endian `int`.
pub fn decode_mode(buf: &[u8]) -> PlatformResult<i32> {
    let bytes: [u8; MODE_PAYLOAD_SIZE] = buf.try_into().map_err(|_| {
        PlatformError::Decode(format!(
            "expected {} bytes, got {}",
            MODE_PAYLOAD_SIZE,
            buf.len()
        ))
    })?;
    Ok(i32::from_ne_bytes(bytes))
}

pub fn encode_mode(mode: IpmiMaintenanceMode) -> [u8; MODE_PAYLOAD_SIZE] {
    mode.as_i32().to_ne_bytes()
}
