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

//! # Config
//!
//! Where the renderer library is found, what its entry points are called and
//! how the bridge logs.

use log::LevelFilter;

const DEFAULT_LIBRARY_NAME: &str = "vulkansink";
const DEFAULT_SYMBOL_PREFIX: &str = "vulkansink";
const DEFAULT_LOG_TAG: &str = "vulkansink";

/// Configuration of the bridge. Built with the `with_*` methods on top of
/// `BridgeConfig::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    library_name: String,
    symbol_prefix: String,
    log_tag: String,
    max_log_level: LevelFilter,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            library_name: DEFAULT_LIBRARY_NAME.to_string(),
            symbol_prefix: DEFAULT_SYMBOL_PREFIX.to_string(),
            log_tag: DEFAULT_LOG_TAG.to_string(),
            max_log_level: LevelFilter::Debug,
        }
    }
}

impl BridgeConfig {
    /// Sets the renderer library, either as a bare name (`vulkansink`) or as a
    /// file name or path (`libvulkansink.so`).
    pub fn with_library_name(mut self, library_name: impl Into<String>) -> Self {
        self.library_name = library_name.into();
        self
    }

    /// Sets the prefix shared by the renderer entry point symbols.
    pub fn with_symbol_prefix(mut self, symbol_prefix: impl Into<String>) -> Self {
        self.symbol_prefix = symbol_prefix.into();
        self
    }

    /// Sets the tag logs are written with on device.
    pub fn with_log_tag(mut self, log_tag: impl Into<String>) -> Self {
        self.log_tag = log_tag.into();
        self
    }

    /// Sets the most verbose level that is logged.
    pub fn with_max_log_level(mut self, max_log_level: LevelFilter) -> Self {
        self.max_log_level = max_log_level;
        self
    }

    pub fn log_tag(&self) -> &str {
        &self.log_tag
    }

    pub fn max_log_level(&self) -> LevelFilter {
        self.max_log_level
    }

    /// The file name passed to the dynamic linker, mapped the way
    /// `System.mapLibraryName` does it.
    pub fn library_file_name(&self) -> String {
        let name = self.library_name.as_str();
        if name.contains('/') || name.ends_with(".so") || name.contains(".so.") {
            name.to_string()
        } else {
            format!("lib{}.so", name)
        }
    }

    /// The exported symbol of the renderer entry point `entry_point`.
    pub fn symbol_name(&self, entry_point: &str) -> String {
        format!("{}_{}", self.symbol_prefix, entry_point)
    }
}
