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

//! # Window
//!
//! The decor view of the activity window, which carries the system UI flags.

use crate::system_ui::SystemUiFlags;
use anyhow::Result;

/// The decor view of the activity window, as far as the bridge touches it.
pub trait DecorWindow {
    /// `Build.VERSION.SDK_INT` of the running platform.
    fn sdk_int(&self) -> i32;

    /// Calls `View.setSystemUiVisibility` on the decor view.
    fn set_system_ui_visibility(&self, flags: SystemUiFlags) -> Result<()>;
}

impl<W: DecorWindow + ?Sized> DecorWindow for &W {
    fn sdk_int(&self) -> i32 {
        (**self).sdk_int()
    }

    fn set_system_ui_visibility(&self, flags: SystemUiFlags) -> Result<()> {
        (**self).set_system_ui_visibility(flags)
    }
}
