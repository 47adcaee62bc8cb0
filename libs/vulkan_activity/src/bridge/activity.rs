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

//! # Activity
//!
//! The main entry point of the crate. `VulkanActivity` receives the callbacks
//! of an Android activity, its `SurfaceHolder` and its touch listener, and
//! relays each of them to a `NativeBoundary`.

use crate::boundary::NativeBoundary;
use crate::motion::PointerEvent;
use crate::system_ui::{fullscreen_flags, immersive_flags, supports_immersive, SystemUiFlags};
use crate::window::DecorWindow;
use log::{debug, error, info, trace};

/// Relays activity callbacks to a native boundary.
///
/// Every callback is expected after the platform's default handling of it has
/// completed, on the UI thread. The bridge introduces no state of its own: each
/// callback maps to at most one notification, issued before the call returns.
pub struct VulkanActivity<B, W> {
    boundary: B,
    window: W,
}

impl<B: NativeBoundary, W: DecorWindow> VulkanActivity<B, W> {
    /// Creates a bridge forwarding to `boundary` and decorating `window`.
    pub fn new(boundary: B, window: W) -> Self {
        Self { boundary, window }
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    /// `Activity.onCreate`. Goes fullscreen where immersive mode exists, hands
    /// the asset manager over and starts the renderer.
    pub fn on_create(&self, assets: B::Assets) {
        let sdk_int = self.window.sdk_int();
        info!("onCreate sdk_int={}", sdk_int);
        if supports_immersive(sdk_int) {
            self.apply_system_ui(immersive_flags());
        }
        self.boundary.set_asset_manager(assets);
        self.boundary.start();
    }

    pub fn on_start(&self) {
        info!("onStart");
        self.boundary.start();
    }

    /// `Activity.onResume`. Re-applies the fullscreen flags for this platform
    /// version, then resumes the renderer.
    pub fn on_resume(&self) {
        let sdk_int = self.window.sdk_int();
        info!("onResume");
        if let Some(flags) = fullscreen_flags(sdk_int) {
            self.apply_system_ui(flags);
        }
        self.boundary.resume();
    }

    pub fn on_pause(&self) {
        info!("onPause");
        self.boundary.pause();
    }

    pub fn on_stop(&self) {
        info!("onStop");
        self.boundary.stop();
    }

    pub fn on_restart(&self) {
        info!("onRestart");
        self.boundary.restart();
    }

    pub fn on_destroy(&self) {
        info!("onDestroy");
        self.boundary.destroy();
    }

    /// `Activity.onConfigurationChanged`. The new configuration is not
    /// forwarded.
    pub fn on_configuration_changed(&self) {
        info!("onConfigurationChanged");
        self.boundary.configuration_changed();
    }

    pub fn on_window_focus_changed(&self, has_focus: bool) {
        info!("onWindowFocusChanged has_focus={}", has_focus);
        self.boundary.window_focus_changed(has_focus);
    }

    /// `SurfaceHolder.Callback.surfaceCreated`. The renderer is told about the
    /// surface only once its geometry is known.
    pub fn surface_created(&self) {
        debug!("Surface Created");
    }

    /// `SurfaceHolder.Callback.surfaceChanged`.
    pub fn surface_changed(&self, surface: B::Surface, format: i32, width: i32, height: i32) {
        debug!("Surface Changed format={} size={}x{}", format, width, height);
        self.boundary.set_surface(Some(surface));
    }

    /// `SurfaceHolder.Callback.surfaceDestroyed`. The renderer must stop using
    /// the surface before this returns.
    pub fn surface_destroyed(&self) {
        debug!("Surface Destroyed");
        self.boundary.set_surface(None);
    }

    /// `View.OnTouchListener.onTouch`. Down, up and move are relayed, anything
    /// else is dropped. The event is always consumed.
    pub fn on_touch(&self, action: i32, x: f32, y: f32) -> bool {
        match PointerEvent::from_raw(action, x, y) {
            Some(event) => self.boundary.input(event.action.code(), event.x, event.y),
            None => trace!("Dropping motion action {}", action),
        }
        true
    }

    /// `View.OnSystemUiVisibilityChangeListener`. The system shows the bars
    /// again on some interactions; put them back to immersive.
    pub fn on_system_ui_visibility_change(&self, visibility: i32) {
        debug!("System UI visibility changed to {:?}", SystemUiFlags::from_bits(visibility));
        if supports_immersive(self.window.sdk_int()) {
            self.apply_system_ui(immersive_flags());
        }
    }

    fn apply_system_ui(&self, flags: SystemUiFlags) {
        if let Err(e) = self.window.set_system_ui_visibility(flags) {
            error!("Failed to set system UI visibility {:?}: {:#}", flags, e);
        }
    }
}
