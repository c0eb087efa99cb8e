/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
pub fn buf2str(data: &[u8], len: usize) -> String {
    data.iter()
        .take(len)
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Kernel name of an I2C client: `<bus>-<addr as 4 hex digits>`, e.g. `1-0075`.
pub fn i2c_client_name(bus: u32, addr: u16) -> String {
    format!("{}-{:04x}", bus, addr)
}
