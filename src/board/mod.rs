/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::{PlatformError, PlatformResult};
use std::fmt;

pub mod gpio;

pub use gpio::{derive_pin_plan, GpioDirection, GpioPlan};

// Board id register layout (MB CPLD board_id_0)
pub const BOARD_ID_MODEL_MASK: u8 = 0b0000_1111;
pub const BOARD_ID_HW_REV_MASK: u8 = 0b0011_0000;
pub const BOARD_ID_HW_REV_SHIFT: u8 = 4;
pub const BOARD_ID_BUILD_REV_MASK: u8 = 0b1100_0000;
pub const BOARD_ID_BUILD_REV_SHIFT: u8 = 6;

/// hw/build revision of the first Alpha build
pub const HW_BUILD_REV_ALPHA1: u8 = 4;

/// Raw board identifier byte as exposed by the CPLD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardId(pub u8);

/// Fields decoded from a [`BoardId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRevision {
    pub model_id: u8,
    pub hw_revision: u8,
    pub build_revision: u8,
    /// `(hw_revision << 2) | build_revision`, always in 0..=15
    pub hw_build_revision: u8,
}

impl BoardId {
    /// Parse the decimal string read from the CPLD sysfs attribute.
    pub fn parse(text: &str) -> PlatformResult<Self> {
        let trimmed = text.trim();
        trimmed.parse::<u8>().map(BoardId).map_err(|e| {
            PlatformError::InvalidData(format!("Invalid board id '{}': {}", trimmed, e))
        })
    }

    pub fn decode(self) -> BoardRevision {
        let model_id = self.0 & BOARD_ID_MODEL_MASK;
        let hw_revision = (self.0 & BOARD_ID_HW_REV_MASK) >> BOARD_ID_HW_REV_SHIFT;
        let build_revision = (self.0 & BOARD_ID_BUILD_REV_MASK) >> BOARD_ID_BUILD_REV_SHIFT;

        BoardRevision {
            model_id,
            hw_revision,
            build_revision,
            hw_build_revision: (hw_revision << 2) | build_revision,
        }
    }
}

impl BoardRevision {
    pub fn is_alpha1(&self) -> bool {
        self.hw_build_revision == HW_BUILD_REV_ALPHA1
    }

    /// Name of the GPIO layout this revision uses.
    pub fn build_name(&self) -> &'static str {
        if self.is_alpha1() {
            "Alpha 1"
        } else {
            "Alpha 2 and later"
        }
    }

    pub fn pin_plan(&self) -> GpioPlan {
        derive_pin_plan(self.hw_build_revision)
    }
}

impl fmt::Display for BoardRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model_id={} hw_rev={} build_rev={} hw_build_rev={}",
            self.model_id, self.hw_revision, self.build_revision, self.hw_build_revision
        )
    }
}
