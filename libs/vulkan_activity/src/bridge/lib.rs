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

//! # Vulkan Activity Bridge
//!
//! This crate relays Android activity, surface and input callbacks to a native
//! renderer library through a fixed set of one-way notifications.
//!
//! The bridge itself holds no state. Each callback coming from the platform is
//! forwarded synchronously, in order, as at most one call into a
//! [`boundary::NativeBoundary`]. The only side effect owned by the bridge is the
//! immersive fullscreen chrome, whose flags depend on the platform version.
//!
//! The primary entry point for this library is the `VulkanActivity` struct.

/// Drives the outbound notifications from platform callbacks.
pub mod activity;
/// Defines the outbound notification capability.
pub mod boundary;
/// Runtime configuration of the bridge.
pub mod config;
/// Opens shared libraries and resolves their symbols.
#[cfg(unix)]
pub mod library_loader;
/// Pointer action filtering.
pub mod motion;
/// The renderer library reached through its exported entry points.
#[cfg(unix)]
pub mod renderer;
/// Drawing surfaces held per activity instance.
pub mod surfaces;
/// System UI visibility flags and their per-version tiers.
pub mod system_ui;
/// The window decoration the bridge applies system UI flags to.
pub mod window;
