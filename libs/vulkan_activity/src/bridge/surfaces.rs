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

//! # Surfaces
//!
//! Drawing surfaces held on behalf of the activity instances that acquired
//! them. Android may create a new instance of an activity before the previous
//! one is destroyed, so more than one instance can hold a surface at a time.
//! Every notification still reaches the renderer in callback order. A held
//! surface is released only after the renderer was told about its successor or
//! about the surface going away.

use std::cell::RefCell;

/// A reference to a drawing surface that stays valid until it is dropped.
pub trait NativeSurface {
    /// What the renderer is given for this surface.
    type Handle;

    fn handle(&self) -> Self::Handle;
}

/// The surfaces currently held, keyed by the activity instance that owns them.
pub struct SurfaceRegistry<K, S> {
    held: RefCell<Vec<(K, S)>>,
}

impl<K, S: NativeSurface> Default for SurfaceRegistry<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S: NativeSurface> SurfaceRegistry<K, S> {
    pub const fn new() -> Self {
        Self { held: RefCell::new(Vec::new()) }
    }

    /// `surfaceChanged` of the activity `owner`. `notify` hands the new surface
    /// to the renderer, after which the surface `owner` held before, if any, is
    /// released.
    pub fn surface_changed(
        &self,
        owner: K,
        surface: S,
        is_owner: impl Fn(&K) -> bool,
        notify: impl FnOnce(S::Handle),
    ) {
        notify(surface.handle());
        let replaced = self.take(&is_owner);
        self.held.borrow_mut().push((owner, surface));
        drop(replaced);
    }

    /// `surfaceDestroyed` of the activity matched by `is_owner`. `notify` tells
    /// the renderer the surface is gone, after which the activity's surface is
    /// released.
    pub fn surface_destroyed(&self, is_owner: impl Fn(&K) -> bool, notify: impl FnOnce()) {
        notify();
        drop(self.take(&is_owner));
    }

    /// Whether the activity matched by `is_owner` holds a surface.
    pub fn holds(&self, is_owner: impl Fn(&K) -> bool) -> bool {
        self.held.borrow().iter().any(|(owner, _)| is_owner(owner))
    }

    /// Number of activity instances holding a surface.
    pub fn len(&self) -> usize {
        self.held.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take(&self, is_owner: &impl Fn(&K) -> bool) -> Option<S> {
        let mut held = self.held.borrow_mut();
        let position = held.iter().position(|(owner, _)| is_owner(owner))?;
        Some(held.remove(position).1)
    }
}
