/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
pub mod bringup;
pub mod driver;
pub mod topology;

pub use bringup::{enable_ipmi_maintenance_mode, Bringup};
pub use driver::{PlatformDriver, SysfsDriver};
