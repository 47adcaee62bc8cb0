// Copyright (C) 2025 The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # System UI
//!
//! `View.SYSTEM_UI_FLAG_*` values and the fullscreen flag set chosen for each
//! platform version.

use std::fmt;
use std::ops::BitOr;

/// Build.VERSION_CODES.HONEYCOMB.
pub const HONEYCOMB: i32 = 11;
/// Build.VERSION_CODES.ICE_CREAM_SANDWICH.
pub const ICE_CREAM_SANDWICH: i32 = 14;
/// Build.VERSION_CODES.KITKAT. Immersive mode is available from here on.
pub const KITKAT: i32 = 19;

/// A set of `View.SYSTEM_UI_FLAG_*` bits as passed to
/// `View.setSystemUiVisibility`.
#[derive(PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct SystemUiFlags(i32);

impl SystemUiFlags {
    pub const LOW_PROFILE: Self = Self(0x0000_0001);
    pub const HIDE_NAVIGATION: Self = Self(0x0000_0002);
    pub const FULLSCREEN: Self = Self(0x0000_0004);
    pub const LAYOUT_STABLE: Self = Self(0x0000_0100);
    pub const LAYOUT_HIDE_NAVIGATION: Self = Self(0x0000_0200);
    pub const LAYOUT_FULLSCREEN: Self = Self(0x0000_0400);
    pub const IMMERSIVE: Self = Self(0x0000_0800);
    pub const IMMERSIVE_STICKY: Self = Self(0x0000_1000);
    /// Pre-ICS name of `LOW_PROFILE` (`View.STATUS_BAR_HIDDEN`).
    pub const STATUS_BAR_HIDDEN: Self = Self::LOW_PROFILE;

    /// Wraps raw bits, e.g. the visibility reported to a listener.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// The raw bits.
    pub const fn bits(self) -> i32 {
        self.0
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SystemUiFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for SystemUiFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemUiFlags({:#06x})", self.0)
    }
}

/// Hides the status and navigation bars and lays the content out behind them.
/// The bars come back transiently on a swipe from the edge.
pub const fn immersive_flags() -> SystemUiFlags {
    SystemUiFlags(
        SystemUiFlags::FULLSCREEN.0
            | SystemUiFlags::HIDE_NAVIGATION.0
            | SystemUiFlags::IMMERSIVE_STICKY.0
            | SystemUiFlags::LAYOUT_FULLSCREEN.0
            | SystemUiFlags::LAYOUT_HIDE_NAVIGATION.0
            | SystemUiFlags::LAYOUT_STABLE.0,
    )
}

/// Whether `sdk_int` supports immersive mode.
pub fn supports_immersive(sdk_int: i32) -> bool {
    sdk_int >= KITKAT
}

/// The fullscreen flags applied on resume for a platform version, or `None`
/// when the platform predates system UI flags.
pub fn fullscreen_flags(sdk_int: i32) -> Option<SystemUiFlags> {
    match sdk_int {
        s if s < HONEYCOMB => None,
        s if s < ICE_CREAM_SANDWICH => Some(SystemUiFlags::STATUS_BAR_HIDDEN),
        s if s < KITKAT => Some(SystemUiFlags::FULLSCREEN | SystemUiFlags::LOW_PROFILE),
        _ => Some(immersive_flags()),
    }
}
