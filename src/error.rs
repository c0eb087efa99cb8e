/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use std::fmt;

/// Platform bring-up error types
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Malformed ioctl payload or unknown maintenance mode value
    Decode(String),
    /// Unparsable value read from sysfs
    InvalidData(String),
    /// External command (modprobe) failed or could not be spawned
    Command(String),
    /// Device not available (no /dev/ipmi node)
    Interface(String),
    /// System error (file I/O, kernel interactions)
    System(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Decode(msg) => write!(f, "Decode error: {}", msg),
            PlatformError::InvalidData(msg) => write!(f, "{}", msg),
            PlatformError::Command(msg) => write!(f, "Command failed: {}", msg),
            PlatformError::Interface(msg) => write!(f, "Interface error: {}", msg),
            PlatformError::System(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<std::io::Error> for PlatformError {
    fn from(error: std::io::Error) -> Self {
        PlatformError::System(error.to_string())
    }
}

impl From<nix::Error> for PlatformError {
    fn from(error: nix::Error) -> Self {
        PlatformError::System(error.to_string())
    }
}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Attach the failing path or operation to an I/O error.
pub fn with_context<T>(result: std::io::Result<T>, context: &str) -> PlatformResult<T> {
    result.map_err(|e| PlatformError::System(format!("{}: {}", context, e)))
}
