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

//! # Renderer
//!
//! The native renderer library and its C entry points. The renderer exports
//! one function per notification, named `<prefix>_<entry point>`:
//!
//! ```c
//! void vulkansink_on_start(void);
//! void vulkansink_on_resume(void);
//! void vulkansink_on_pause(void);
//! void vulkansink_on_stop(void);
//! void vulkansink_on_restart(void);
//! void vulkansink_on_destroy(void);
//! void vulkansink_on_input(int32_t action, float x, float y);
//! void vulkansink_set_surface(ANativeWindow* window);   // NULL once destroyed
//! void vulkansink_set_asset_manager(AAssetManager* assets);
//! void vulkansink_on_configuration_changed(void);
//! void vulkansink_on_window_focus_changed(bool has_focus);
//! ```

use crate::boundary::NativeBoundary;
use crate::config::BridgeConfig;
use crate::library_loader::LoadedLibrary;
use anyhow::{Context, Result};
use log::info;
use std::ffi::c_void;
use std::ptr::NonNull;

type NotifyFn = unsafe extern "C" fn();
type InputFn = unsafe extern "C" fn(i32, f32, f32);
type HandleFn = unsafe extern "C" fn(*mut c_void);
type FocusFn = unsafe extern "C" fn(bool);

struct EntryPoints {
    on_start: NotifyFn,
    on_resume: NotifyFn,
    on_pause: NotifyFn,
    on_stop: NotifyFn,
    on_restart: NotifyFn,
    on_destroy: NotifyFn,
    on_input: InputFn,
    set_surface: HandleFn,
    set_asset_manager: HandleFn,
    on_configuration_changed: NotifyFn,
    on_window_focus_changed: FocusFn,
}

/// Resolves `<prefix>_<name>` and reinterprets it as the function pointer type
/// expected at the use site.
macro_rules! resolve {
    ($library:expr, $config:expr, $name:ident) => {{
        let symbol_name = $config.symbol_name(stringify!($name));
        let addr = $library.find_symbol(&symbol_name)?;
        // SAFETY: `addr` is a non-null function exported by the renderer library, and the
        // renderer is required to export it with the C signature documented in this module.
        unsafe { std::mem::transmute::<*mut c_void, _>(addr.as_ptr()) }
    }};
}

/// The renderer library loaded into the process, with all of its entry points
/// resolved.
pub struct RendererLibrary {
    entry_points: EntryPoints,
    // Keeps the entry points mapped.
    _library: LoadedLibrary,
}

// SAFETY: the library handle is only used to unload the library on drop, and the entry points are
// plain function pointers. Calls into them happen on the UI thread.
unsafe impl Send for RendererLibrary {}
// SAFETY: see above; the struct is immutable after loading.
unsafe impl Sync for RendererLibrary {}

impl RendererLibrary {
    /// Loads the renderer library named by `config` and resolves every entry
    /// point. A missing library or a missing entry point is an error.
    pub fn load(config: &BridgeConfig) -> Result<Self> {
        let file_name = config.library_file_name();
        // SAFETY: the renderer library is part of the application and is trusted to have safe
        // initialization and termination routines.
        let library = unsafe { LoadedLibrary::new(&file_name)? };
        let entry_points = Self::resolve_entry_points(&library, config)
            .with_context(|| format!("{} is not a renderer library", file_name))?;
        info!("Loaded renderer library {}", file_name);
        Ok(Self { entry_points, _library: library })
    }

    fn resolve_entry_points(library: &LoadedLibrary, config: &BridgeConfig) -> Result<EntryPoints> {
        Ok(EntryPoints {
            on_start: resolve!(library, config, on_start),
            on_resume: resolve!(library, config, on_resume),
            on_pause: resolve!(library, config, on_pause),
            on_stop: resolve!(library, config, on_stop),
            on_restart: resolve!(library, config, on_restart),
            on_destroy: resolve!(library, config, on_destroy),
            on_input: resolve!(library, config, on_input),
            set_surface: resolve!(library, config, set_surface),
            set_asset_manager: resolve!(library, config, set_asset_manager),
            on_configuration_changed: resolve!(library, config, on_configuration_changed),
            on_window_focus_changed: resolve!(library, config, on_window_focus_changed),
        })
    }
}

impl NativeBoundary for RendererLibrary {
    /// `ANativeWindow*`.
    type Surface = NonNull<c_void>;
    /// `AAssetManager*`.
    type Assets = NonNull<c_void>;

    fn start(&self) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.on_start)() }
    }

    fn resume(&self) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.on_resume)() }
    }

    fn pause(&self) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.on_pause)() }
    }

    fn stop(&self) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.on_stop)() }
    }

    fn restart(&self) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.on_restart)() }
    }

    fn destroy(&self) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.on_destroy)() }
    }

    fn input(&self, action: i32, x: f32, y: f32) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.on_input)(action, x, y) }
    }

    fn set_surface(&self, surface: Option<Self::Surface>) {
        let window = surface.map_or(std::ptr::null_mut(), NonNull::as_ptr);
        // SAFETY: resolved renderer entry point with this signature. The renderer accepts the
        // null pointer as "no surface".
        unsafe { (self.entry_points.set_surface)(window) }
    }

    fn set_asset_manager(&self, assets: Self::Assets) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.set_asset_manager)(assets.as_ptr()) }
    }

    fn configuration_changed(&self) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.on_configuration_changed)() }
    }

    fn window_focus_changed(&self, has_focus: bool) {
        // SAFETY: resolved renderer entry point with this signature.
        unsafe { (self.entry_points.on_window_focus_changed)(has_focus) }
    }
}

#[cfg(all(test, target_os = "linux", target_env = "gnu"))]
mod tests {
    use super::*;

    #[test]
    fn missing_renderer_library() {
        let config = BridgeConfig::default().with_library_name("vulkansink_missing");
        let err = RendererLibrary::load(&config).err().unwrap();
        assert!(err.to_string().contains("libvulkansink_missing.so"), "{:#}", err);
    }

    #[test]
    fn library_without_entry_points() {
        let config = BridgeConfig::default().with_library_name("libc.so.6");
        let err = RendererLibrary::load(&config).err().unwrap();
        assert_eq!(err.to_string(), "libc.so.6 is not a renderer library");
        assert!(format!("{:#}", err).contains("vulkansink_on_start"));
    }
}
