/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
//! GPIO direction planning for the pca9535 expanders.
//!
//! The expanders occupy the top of the 512-line GPIO space. Which of their
//! lines are driven (TX disable, rate select) and at what level depends on
//! the board hw/build revision; everything else stays an input.

use super::HW_BUILD_REV_ALPHA1;
use std::fmt;
use std::ops::RangeInclusive;

pub const GPIO_COUNT: usize = 512;
/// First GPIO line that belongs to the expanders and gets exported.
pub const GPIO_EXPORT_BASE: usize = 336;

const ALPHA1_LOW: [RangeInclusive<usize>; 3] = [488..=495, 476..=483, 464..=471];
const ALPHA1_HIGH: [RangeInclusive<usize>; 3] = [424..=431, 412..=419, 400..=407];

const ALPHA2_LOW: [RangeInclusive<usize>; 6] = [
    488..=495,
    476..=483,
    464..=471,
    424..=431,
    416..=419,
    404..=407,
];
const ALPHA2_HIGH: [RangeInclusive<usize>; 2] = [412..=415, 400..=403];

/// Direction written to `/sys/class/gpio/gpioN/direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpioDirection {
    #[default]
    In,
    /// Output, initially low
    Low,
    /// Output, initially high
    High,
}

impl GpioDirection {
    pub fn as_sysfs_str(self) -> &'static str {
        match self {
            GpioDirection::In => "in",
            GpioDirection::Low => "low",
            GpioDirection::High => "high",
        }
    }
}

impl fmt::Display for GpioDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sysfs_str())
    }
}

/// Per-line direction for the whole GPIO space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpioPlan {
    pins: [GpioDirection; GPIO_COUNT],
}

impl Default for GpioPlan {
    fn default() -> Self {
        Self {
            pins: [GpioDirection::In; GPIO_COUNT],
        }
    }
}

impl GpioPlan {
    fn assign(&mut self, ranges: &[RangeInclusive<usize>], dir: GpioDirection) {
        for range in ranges {
            for pin in range.clone() {
                self.pins[pin] = dir;
            }
        }
    }

    pub fn get(&self, pin: usize) -> Option<GpioDirection> {
        self.pins.get(pin).copied()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, GpioDirection)> + '_ {
        self.pins.iter().copied().enumerate()
    }

    /// Lines that are exported during bring-up, in ascending order.
    pub fn exported(&self) -> impl Iterator<Item = (usize, GpioDirection)> + '_ {
        self.iter().skip(GPIO_EXPORT_BASE)
    }

    pub fn count(&self, dir: GpioDirection) -> usize {
        self.pins.iter().filter(|&&d| d == dir).count()
    }
}

/// Compute the GPIO plan for a board hw/build revision.
///
/// Revision 4 is Alpha 1; every other value uses the Alpha 2 layout.
/// Lines not named by either table stay inputs.
pub fn derive_pin_plan(hw_build_revision: u8) -> GpioPlan {
    let mut plan = GpioPlan::default();

    if hw_build_revision == HW_BUILD_REV_ALPHA1 {
        plan.assign(&ALPHA1_LOW, GpioDirection::Low);
        plan.assign(&ALPHA1_HIGH, GpioDirection::High);
    } else {
        plan.assign(&ALPHA2_LOW, GpioDirection::Low);
        plan.assign(&ALPHA2_HIGH, GpioDirection::High);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn pins(ranges: &[RangeInclusive<usize>]) -> BTreeSet<usize> {
        ranges.iter().flat_map(|r| r.clone()).collect()
    }

    fn pins_with(plan: &GpioPlan, dir: GpioDirection) -> BTreeSet<usize> {
        plan.iter().filter(|&(_, d)| d == dir).map(|(i, _)| i).collect()
    }

    #[test]
    fn test_alpha1_plan() {
        let plan = derive_pin_plan(4);
        assert_eq!(plan.len(), GPIO_COUNT);

        let low = pins(&[488..=495, 476..=483, 464..=471]);
        let high = pins(&[424..=431, 412..=419, 400..=407]);
        assert_eq!(pins_with(&plan, GpioDirection::Low), low);
        assert_eq!(pins_with(&plan, GpioDirection::High), high);
        assert_eq!(plan.count(GpioDirection::Low), 24);
        assert_eq!(plan.count(GpioDirection::High), 24);
        assert_eq!(plan.count(GpioDirection::In), GPIO_COUNT - 48);

        for pin in 0..GPIO_EXPORT_BASE {
            assert_eq!(plan.get(pin), Some(GpioDirection::In));
        }
    }

    #[test]
    fn test_unlisted_lines_stay_input() {
        let plan = derive_pin_plan(4);
        for pin in [336, 399, 408, 409, 410, 411, 420, 423, 432, 463, 496, 511] {
            assert_eq!(plan.get(pin), Some(GpioDirection::In), "pin {}", pin);
        }
    }

    #[test]
    fn test_alpha2_plan_for_every_other_revision() {
        let low = pins(&[
            488..=495,
            476..=483,
            464..=471,
            424..=431,
            416..=419,
            404..=407,
        ]);
        let high = pins(&[412..=415, 400..=403]);

        for rev in (0..=15u8).chain([16, 255]).filter(|&r| r != 4) {
            let plan = derive_pin_plan(rev);
            assert_eq!(pins_with(&plan, GpioDirection::Low), low, "rev {}", rev);
            assert_eq!(pins_with(&plan, GpioDirection::High), high, "rev {}", rev);
            assert_eq!(plan.count(GpioDirection::Low), 40);
            assert_eq!(plan.count(GpioDirection::High), 8);
        }
    }

    #[test]
    fn test_range_boundaries() {
        let plan = derive_pin_plan(0);
        assert_eq!(plan.get(487), Some(GpioDirection::In));
        assert_eq!(plan.get(488), Some(GpioDirection::Low));
        assert_eq!(plan.get(495), Some(GpioDirection::Low));
        assert_eq!(plan.get(496), Some(GpioDirection::In));
        assert_eq!(plan.get(415), Some(GpioDirection::High));
        assert_eq!(plan.get(416), Some(GpioDirection::Low));
        assert_eq!(plan.get(399), Some(GpioDirection::In));
        assert_eq!(plan.get(400), Some(GpioDirection::High));
        assert_eq!(plan.get(511), Some(GpioDirection::In));
        assert_eq!(plan.get(512), None);
    }

    #[test]
    fn test_exported_range() {
        let plan = derive_pin_plan(4);
        let exported: Vec<usize> = plan.exported().map(|(i, _)| i).collect();
        assert_eq!(exported.len(), GPIO_COUNT - GPIO_EXPORT_BASE);
        assert_eq!(exported.first(), Some(&336));
        assert_eq!(exported.last(), Some(&511));
    }

    #[test]
    fn test_direction_strings() {
        assert_eq!(GpioDirection::In.as_sysfs_str(), "in");
        assert_eq!(GpioDirection::Low.to_string(), "low");
        assert_eq!(GpioDirection::High.to_string(), "high");
    }
}
