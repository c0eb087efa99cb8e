/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::{with_context, PlatformError, PlatformResult};
use crate::helper::i2c_client_name;
use crate::platform::topology::{MODULE_VENDOR, PLATFORM};
use crate::{debug1, debug2};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Primitives the bring-up sequence needs from the running kernel.
///
/// Paths are absolute as they appear on the target (`/sys/...`, `/etc/...`);
/// implementations decide where they really live.
pub trait PlatformDriver {
    /// Load a platform kernel module shipped outside the stock module tree.
    fn load_kernel_module(&mut self, name: &str) -> PlatformResult<()>;

    /// Load a stock kernel module through `modprobe`.
    fn modprobe(&mut self, name: &str) -> PlatformResult<()>;

    /// Instantiate an I2C client on `bus` via the adapter's `new_device` file.
    ///
    /// A client that is already bound is left alone, so the sequence can be
    /// re-run on a configured system.
    fn register_i2c_device(&mut self, kind: &str, address: u16, bus: u32) -> PlatformResult<()> {
        let client = format!("/sys/bus/i2c/devices/{}", i2c_client_name(bus, address));
        if self.sysfs_exists(&client) {
            debug2!("{} already bound, skipping {}", client, kind);
            return Ok(());
        }

        let path = format!("/sys/bus/i2c/devices/i2c-{}/new_device", bus);
        self.write_sysfs_file(&path, &format!("{} 0x{:02x}", kind, address))
    }

    fn write_sysfs_file(&mut self, path: &str, value: &str) -> PlatformResult<()>;

    fn read_sysfs_file(&mut self, path: &str) -> PlatformResult<String>;

    fn sysfs_exists(&mut self, path: &str) -> bool;
}

/// Directories under `lib/modules/<release>/` searched for platform modules,
/// most specific first.
pub fn module_search_dirs() -> [String; 4] {
    let platform = PLATFORM.trim_end_matches("-r0");
    [
        format!("onl/{}/{}", MODULE_VENDOR, platform),
        format!("onl/{}/common", MODULE_VENDOR),
        "onl/onl/common".to_string(),
        ".".to_string(),
    ]
}

/// [`PlatformDriver`] backed by the real filesystem, `insmod` and `modprobe`.
#[derive(Debug, Clone)]
pub struct SysfsDriver {
    root: PathBuf,
    dry_run: bool,
    kernel_release: Option<String>,
}

impl Default for SysfsDriver {
    fn default() -> Self {
        Self::new("/")
    }
}

impl SysfsDriver {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            dry_run: false,
            kernel_release: None,
        }
    }

    /// Search modules of this release instead of the running kernel's.
    pub fn with_kernel_release<S: Into<String>>(mut self, release: S) -> Self {
        self.kernel_release = Some(release.into());
        self
    }

    /// Log mutating operations instead of performing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Map a target path under the driver's root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    fn release(&self) -> PlatformResult<String> {
        if let Some(release) = &self.kernel_release {
            return Ok(release.clone());
        }
        let uts = nix::sys::utsname::uname()?;
        Ok(uts.release().to_string_lossy().into_owned())
    }

    /// Locate `<name>.ko` for the current kernel under the driver's root.
    pub fn find_kernel_module(&self, name: &str) -> PlatformResult<PathBuf> {
        let base = self.resolve("/lib/modules").join(self.release()?);
        let file = format!("{}.ko", name);

        for dir in module_search_dirs() {
            let candidate = base.join(&dir).join(&file);
            debug2!("looking for {}", candidate.display());
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        Err(PlatformError::Command(format!(
            "kernel module {} not found under {}",
            name,
            base.display()
        )))
    }

    fn run(&self, program: &str, arg: &str) -> PlatformResult<()> {
        debug1!("{} {}", program, arg);
        let status = Command::new(program)
            .arg(arg)
            .status()
            .map_err(|e| PlatformError::Command(format!("{} {}: {}", program, arg, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(PlatformError::Command(format!(
                "{} {} exited with {}",
                program, arg, status
            )))
        }
    }
}

impl PlatformDriver for SysfsDriver {
    fn load_kernel_module(&mut self, name: &str) -> PlatformResult<()> {
        if self.dry_run {
            log::info!("[dry-run] insmod {}", name);
            return Ok(());
        }

        let path = self.find_kernel_module(name)?;
        self.run("insmod", &path.display().to_string())
    }

    fn modprobe(&mut self, name: &str) -> PlatformResult<()> {
        if self.dry_run {
            log::info!("[dry-run] modprobe {}", name);
            return Ok(());
        }

        self.run("modprobe", name)
    }

    fn write_sysfs_file(&mut self, path: &str, value: &str) -> PlatformResult<()> {
        if self.dry_run {
            log::info!("[dry-run] echo {} > {}", value, path);
            return Ok(());
        }

        let target = self.resolve(path);
        debug2!("echo {} > {}", value, target.display());
        let mut file = with_context(
            OpenOptions::new().write(true).create(true).truncate(true).open(&target),
            &target.display().to_string(),
        )?;
        with_context(
            file.write_all(format!("{}\n", value).as_bytes()),
            &target.display().to_string(),
        )
    }

    fn read_sysfs_file(&mut self, path: &str) -> PlatformResult<String> {
        let target = self.resolve(path);
        with_context(fs::read_to_string(&target), &target.display().to_string())
    }

    fn sysfs_exists(&mut self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_under_root() {
        let drv = SysfsDriver::new("/tmp/fake");
        assert_eq!(
            drv.resolve("/sys/class/gpio/export"),
            PathBuf::from("/tmp/fake/sys/class/gpio/export")
        );
        assert_eq!(
            SysfsDriver::default().resolve("/etc/onl/bmc_en"),
            PathBuf::from("/etc/onl/bmc_en")
        );
    }

    #[test]
    fn test_write_read_and_register() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sys/bus/i2c/devices/i2c-1")).unwrap();
        let mut drv = SysfsDriver::new(dir.path());

        drv.register_i2c_device("pca9546", 0x75, 1).unwrap();
        assert_eq!(
            drv.read_sysfs_file("/sys/bus/i2c/devices/i2c-1/new_device").unwrap(),
            "pca9546 0x75\n"
        );
        assert!(drv.sysfs_exists("/sys/bus/i2c/devices/i2c-1/new_device"));
        assert!(!drv.sysfs_exists("/sys/bus/i2c/devices/i2c-2/new_device"));
    }

    #[test]
    fn test_register_skips_bound_client() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sys/bus/i2c/devices/i2c-1")).unwrap();
        fs::create_dir_all(dir.path().join("sys/bus/i2c/devices/1-0075")).unwrap();
        let mut drv = SysfsDriver::new(dir.path());

        // a second new_device write would fail with EBUSY on a real kernel
        drv.register_i2c_device("pca9546", 0x75, 1).unwrap();
        assert!(!drv.sysfs_exists("/sys/bus/i2c/devices/i2c-1/new_device"));

        drv.register_i2c_device("pca9546", 0x76, 1).unwrap();
        assert_eq!(
            drv.read_sysfs_file("/sys/bus/i2c/devices/i2c-1/new_device").unwrap(),
            "pca9546 0x76\n"
        );
    }

    #[test]
    fn test_module_search_dirs() {
        assert_eq!(
            module_search_dirs(),
            [
                "onl/ufispace/x86-64-ufispace-s9501-28smt".to_string(),
                "onl/ufispace/common".to_string(),
                "onl/onl/common".to_string(),
                ".".to_string(),
            ]
        );
    }

    #[test]
    fn test_find_kernel_module() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("lib/modules/4.19.81-OpenNetworkLinux");
        let platform_dir = base.join("onl/ufispace/x86-64-ufispace-s9501-28smt");
        let common_dir = base.join("onl/onl/common");
        fs::create_dir_all(&platform_dir).unwrap();
        fs::create_dir_all(&common_dir).unwrap();
        fs::write(platform_dir.join("x86-64-ufispace-s9501-28smt-lpc.ko"), b"").unwrap();
        fs::write(common_dir.join("optoe.ko"), b"").unwrap();
        // the platform directory wins over the generic one
        fs::write(common_dir.join("x86-64-ufispace-s9501-28smt-lpc.ko"), b"").unwrap();

        let drv = SysfsDriver::new(dir.path()).with_kernel_release("4.19.81-OpenNetworkLinux");
        assert_eq!(
            drv.find_kernel_module("x86-64-ufispace-s9501-28smt-lpc").unwrap(),
            platform_dir.join("x86-64-ufispace-s9501-28smt-lpc.ko")
        );
        assert_eq!(
            drv.find_kernel_module("optoe").unwrap(),
            common_dir.join("optoe.ko")
        );
    }

    #[test]
    fn test_missing_kernel_module_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut drv = SysfsDriver::new(dir.path()).with_kernel_release("5.10.0");

        let err = drv.load_kernel_module("x86-64-ufispace-eeprom-mb").unwrap_err();
        assert!(matches!(err, PlatformError::Command(_)));
        assert!(err.to_string().contains("x86-64-ufispace-eeprom-mb not found"));
    }

    #[test]
    fn test_write_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut drv = SysfsDriver::new(dir.path());
        let err = drv.write_sysfs_file("/sys/class/gpio/export", "336").unwrap_err();
        assert!(matches!(err, PlatformError::System(_)));
        assert!(err.to_string().contains("sys/class/gpio/export"));
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut drv = SysfsDriver::new(dir.path()).with_dry_run(true);
        assert!(drv.is_dry_run());

        drv.write_sysfs_file("/etc/onl/bmc_en", "1").unwrap();
        drv.modprobe("does-not-exist").unwrap();
        drv.load_kernel_module("does-not-exist").unwrap();
        assert!(!drv.sysfs_exists("/etc/onl/bmc_en"));
    }
}
