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

//! # Boundary
//!
//! This module contains the outbound notification trait the host environment
//! must implement, and a logging decorator for it.

use log::debug;
use std::fmt::Debug;
use std::sync::Arc;

/// The fixed set of one-way notifications sent to the native renderer.
///
/// Notifications return nothing and are trusted not to fail observably. The
/// surface and asset handles are opaque; the bridge never inspects them.
pub trait NativeBoundary {
    /// Handle of the drawing surface.
    type Surface;
    /// Handle of the bundled resource accessor.
    type Assets;

    /// The application started.
    fn start(&self);

    /// The application resumed.
    fn resume(&self);

    /// The application paused.
    fn pause(&self);

    /// The application stopped.
    fn stop(&self);

    /// The application restarted after being stopped.
    fn restart(&self);

    /// The application is being destroyed.
    fn destroy(&self);

    /// A pointer went down, up or moved.
    fn input(&self, action: i32, x: f32, y: f32);

    /// The drawing surface changed, or went away when `surface` is `None`.
    fn set_surface(&self, surface: Option<Self::Surface>);

    /// The resource accessor is available. Sent once, before the first start.
    fn set_asset_manager(&self, assets: Self::Assets);

    /// The device configuration changed.
    fn configuration_changed(&self);

    /// The activity window gained or lost input focus.
    fn window_focus_changed(&self, has_focus: bool);
}

macro_rules! forward_boundary {
    () => {
        type Surface = B::Surface;
        type Assets = B::Assets;

        fn start(&self) {
            (**self).start();
        }

        fn resume(&self) {
            (**self).resume();
        }

        fn pause(&self) {
            (**self).pause();
        }

        fn stop(&self) {
            (**self).stop();
        }

        fn restart(&self) {
            (**self).restart();
        }

        fn destroy(&self) {
            (**self).destroy();
        }

        fn input(&self, action: i32, x: f32, y: f32) {
            (**self).input(action, x, y);
        }

        fn set_surface(&self, surface: Option<Self::Surface>) {
            (**self).set_surface(surface);
        }

        fn set_asset_manager(&self, assets: Self::Assets) {
            (**self).set_asset_manager(assets);
        }

        fn configuration_changed(&self) {
            (**self).configuration_changed();
        }

        fn window_focus_changed(&self, has_focus: bool) {
            (**self).window_focus_changed(has_focus);
        }
    };
}

impl<B: NativeBoundary + ?Sized> NativeBoundary for &B {
    forward_boundary!();
}

impl<B: NativeBoundary + ?Sized> NativeBoundary for Box<B> {
    forward_boundary!();
}

impl<B: NativeBoundary + ?Sized> NativeBoundary for Arc<B> {
    forward_boundary!();
}

/// Logs every notification before handing it to the wrapped boundary.
pub struct LoggingBoundary<B> {
    inner: B,
}

impl<B> LoggingBoundary<B> {
    /// Wraps `inner`.
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    /// Returns the wrapped boundary.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<B> NativeBoundary for LoggingBoundary<B>
where
    B: NativeBoundary,
    B::Surface: Debug,
    B::Assets: Debug,
{
    type Surface = B::Surface;
    type Assets = B::Assets;

    fn start(&self) {
        debug!("nativeOnStart");
        self.inner.start();
    }

    fn resume(&self) {
        debug!("nativeOnResume");
        self.inner.resume();
    }

    fn pause(&self) {
        debug!("nativeOnPause");
        self.inner.pause();
    }

    fn stop(&self) {
        debug!("nativeOnStop");
        self.inner.stop();
    }

    fn restart(&self) {
        debug!("nativeOnRestart");
        self.inner.restart();
    }

    fn destroy(&self) {
        debug!("nativeOnDestroy");
        self.inner.destroy();
    }

    fn input(&self, action: i32, x: f32, y: f32) {
        debug!("nativeOnInput {} {:.1} {:.1}", action, x, y);
        self.inner.input(action, x, y);
    }

    fn set_surface(&self, surface: Option<Self::Surface>) {
        debug!("nativeSetSurface {:?}", surface);
        self.inner.set_surface(surface);
    }

    fn set_asset_manager(&self, assets: Self::Assets) {
        debug!("nativeSetAssetManager {:?}", assets);
        self.inner.set_asset_manager(assets);
    }

    fn configuration_changed(&self) {
        debug!("nativeOnConfigurationChanged");
        self.inner.configuration_changed();
    }

    fn window_focus_changed(&self, has_focus: bool) {
        debug!("nativeOnWindowFocusChanged {}", has_focus);
        self.inner.window_focus_changed(has_focus);
    }
}
