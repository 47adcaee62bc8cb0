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

//! # Motion
//!
//! Pointer actions forwarded to the renderer. Only down, up and move are
//! relayed; every other `MotionEvent` action is dropped.

/// The pointer actions relayed to the renderer, with their `MotionEvent` codes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MotionAction {
    /// `MotionEvent.ACTION_DOWN`.
    Down = 0,
    /// `MotionEvent.ACTION_UP`.
    Up = 1,
    /// `MotionEvent.ACTION_MOVE`.
    Move = 2,
}

impl MotionAction {
    /// Decodes a raw `MotionEvent` action. Returns `None` for actions that are
    /// not relayed.
    pub fn from_raw(action: i32) -> Option<Self> {
        match action {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            2 => Some(Self::Move),
            _ => None,
        }
    }

    /// The raw `MotionEvent` action code.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// A relayed pointer action and where it happened.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PointerEvent {
    pub action: MotionAction,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    /// Builds an event from raw callback arguments, or `None` when the action
    /// is filtered out.
    pub fn from_raw(action: i32, x: f32, y: f32) -> Option<Self> {
        MotionAction::from_raw(action).map(|action| Self { action, x, y })
    }
}
