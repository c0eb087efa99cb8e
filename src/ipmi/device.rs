/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use super::codec::{
    decode_mode, encode_mode, encode_mode_request, IpmiMaintenanceMode,
    IPMICTL_GET_MAINTENANCE_MODE_CMD, IPMICTL_SET_MAINTENANCE_MODE_CMD, MODE_PAYLOAD_SIZE,
};
use crate::error::{PlatformError, PlatformResult};
use crate::helper::buf2str;
use crate::{debug2, debug3};

use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::{ioctl_read_bad, ioctl_write_ptr_bad};
use std::os::unix::io::RawFd;

ioctl_read_bad!(
    ipmi_ioctl_get_maintenance_mode,
    IPMICTL_GET_MAINTENANCE_MODE_CMD,
    [u8; MODE_PAYLOAD_SIZE]
);

ioctl_write_ptr_bad!(
    ipmi_ioctl_set_maintenance_mode,
    IPMICTL_SET_MAINTENANCE_MODE_CMD,
    [u8; MODE_PAYLOAD_SIZE]
);

/// Device nodes the OpenIPMI driver may create for interface `devnum`.
pub fn device_paths(devnum: u8) -> [String; 3] {
    [
        format!("/dev/ipmi{}", devnum),
        format!("/dev/ipmi/{}", devnum),
        format!("/dev/ipmidev/{}", devnum),
    ]
}

/// Read and change the BMC maintenance mode.
pub trait MaintenanceModeControl {
    fn get_maintenance_mode(&mut self) -> PlatformResult<IpmiMaintenanceMode>;
    fn set_maintenance_mode(&mut self, mode: IpmiMaintenanceMode) -> PlatformResult<()>;
}

impl<T: MaintenanceModeControl + ?Sized> MaintenanceModeControl for &mut T {
    fn get_maintenance_mode(&mut self) -> PlatformResult<IpmiMaintenanceMode> {
        (**self).get_maintenance_mode()
    }

    fn set_maintenance_mode(&mut self, mode: IpmiMaintenanceMode) -> PlatformResult<()> {
        (**self).set_maintenance_mode(mode)
    }
}

/// Open handle on the kernel IPMI device; closed when dropped.
#[derive(Debug)]
pub struct IpmiDevice {
    fd: RawFd,
}

impl IpmiDevice {
    pub fn open(devnum: u8) -> PlatformResult<Self> {
        debug2!("Using ipmi device {}", devnum);

        let paths = device_paths(devnum);
        for path in &paths {
            match open(path.as_str(), OFlag::O_RDWR, Mode::empty()) {
                Ok(fd) => {
                    debug3!("Opened {}", path);
                    return Ok(Self { fd });
                }
                Err(e) => debug3!("open {} failed: {}", path, e),
            }
        }

        Err(PlatformError::Interface(format!(
            "Could not open device at {} or {} or {}: No such file or directory",
            paths[0], paths[1], paths[2]
        )))
    }
}

impl MaintenanceModeControl for IpmiDevice {
    fn get_maintenance_mode(&mut self) -> PlatformResult<IpmiMaintenanceMode> {
        let mut buf = encode_mode_request();
        unsafe { ipmi_ioctl_get_maintenance_mode(self.fd, &mut buf) }.map_err(|e| {
            PlatformError::System(format!("IPMICTL_GET_MAINTENANCE_MODE_CMD failed: {}", e))
        })?;
        debug3!("Maintenance mode response: {}", buf2str(&buf, buf.len()));

        IpmiMaintenanceMode::try_from(decode_mode(&buf)?)
    }

    fn set_maintenance_mode(&mut self, mode: IpmiMaintenanceMode) -> PlatformResult<()> {
        let buf = encode_mode(mode);
        debug3!("Maintenance mode request: {}", buf2str(&buf, buf.len()));
        unsafe { ipmi_ioctl_set_maintenance_mode(self.fd, &buf) }.map_err(|e| {
            PlatformError::System(format!("IPMICTL_SET_MAINTENANCE_MODE_CMD failed: {}", e))
        })?;
        Ok(())
    }
}

/// Stand-in used with `--dry-run`: remembers the mode, never touches the BMC.
#[derive(Debug)]
pub struct DryRunMaintenance {
    mode: IpmiMaintenanceMode,
}

impl Default for DryRunMaintenance {
    fn default() -> Self {
        Self {
            mode: IpmiMaintenanceMode::Auto,
        }
    }
}

impl MaintenanceModeControl for DryRunMaintenance {
    fn get_maintenance_mode(&mut self) -> PlatformResult<IpmiMaintenanceMode> {
        Ok(self.mode)
    }

    fn set_maintenance_mode(&mut self, mode: IpmiMaintenanceMode) -> PlatformResult<()> {
        log::info!(
            "[dry-run] ioctl 0x{:08x} mode={}",
            IPMICTL_SET_MAINTENANCE_MODE_CMD,
            mode.as_i32()
        );
        self.mode = mode;
        Ok(())
    }
}

impl Drop for IpmiDevice {
    fn drop(&mut self) {
        if self.fd >= 0 {
            unsafe { nix::libc::close(self.fd) };
            self.fd = -1;
        }
    }
}
