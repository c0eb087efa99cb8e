/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
pub mod codec;
pub mod device;

pub use codec::{IoctlDirection, IpmiMaintenanceMode};
pub use device::{DryRunMaintenance, IpmiDevice, MaintenanceModeControl};
