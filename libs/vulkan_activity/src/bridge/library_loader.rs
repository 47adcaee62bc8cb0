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

//! # Library loader
//!
//! A shared library opened with `dlopen` and kept mapped for as long as the
//! `LoadedLibrary` lives.

use anyhow::{anyhow, Context, Result};
use log::warn;
use std::ffi::{c_void, CStr, CString};
use std::ptr::NonNull;

/// The pending dynamic linker error, if any. Reading it clears it.
fn take_dl_error() -> Option<String> {
    // SAFETY: `dlerror` has no preconditions.
    let error = unsafe { libc::dlerror() };
    // SAFETY: a non-null result of `dlerror` is a valid C string that stays alive until the
    // next dl call on this thread, and it is copied out right away.
    (!error.is_null()).then(|| unsafe { CStr::from_ptr(error) }.to_string_lossy().into_owned())
}

/// `what` as an error, with the pending dynamic linker error as its cause.
fn dl_failure(what: String) -> anyhow::Error {
    match take_dl_error() {
        Some(cause) => anyhow!(cause).context(what),
        None => anyhow!(what),
    }
}

/// A library mapped into the process, unloaded when dropped.
#[derive(Debug)]
pub struct LoadedLibrary {
    handle: NonNull<c_void>,
}

impl LoadedLibrary {
    /// Opens `library_name`. All of its symbols are bound right away, so a
    /// missing dependency fails here instead of on the first call.
    ///
    /// # Safety
    ///
    /// The initialization and termination routines of the library must be safe to run.
    pub unsafe fn new(library_name: &str) -> Result<Self> {
        let name = CString::new(library_name).context("Invalid library name")?;
        // Drop any error left over from an earlier call so it is not reported as ours.
        take_dl_error();
        // SAFETY: `name` is a valid C string. The caller vouches for the library.
        let handle = unsafe { libc::dlopen(name.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        NonNull::new(handle)
            .map(|handle| Self { handle })
            .ok_or_else(|| dl_failure(format!("Failed to open the library {}", library_name)))
    }

    /// The address of the exported symbol `symbol_name`.
    pub fn find_symbol(&self, symbol_name: &str) -> Result<NonNull<c_void>> {
        let symbol = CString::new(symbol_name).context("Invalid symbol name")?;
        take_dl_error();
        // SAFETY: `self.handle` came from `dlopen` and is still open. `symbol` is a valid C
        // string.
        let address = unsafe { libc::dlsym(self.handle.as_ptr(), symbol.as_ptr()) };
        NonNull::new(address)
            .ok_or_else(|| dl_failure(format!("Failed to find the symbol {}", symbol_name)))
    }
}

impl Drop for LoadedLibrary {
    fn drop(&mut self) {
        // SAFETY: `self.handle` came from `dlopen` and is closed exactly once. The caller of
        // `new` vouched for the termination routines.
        if unsafe { libc::dlclose(self.handle.as_ptr()) } != 0 {
            warn!("dlclose failed: {}", take_dl_error().unwrap_or_default());
        }
    }
}
