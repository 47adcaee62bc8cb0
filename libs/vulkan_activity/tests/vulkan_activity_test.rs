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

#[cfg(test)]
mod vulkan_activity_tests {
    use anyhow::{bail, Result};
    use std::cell::{Cell, RefCell};
    use vulkan_activity_bridge::activity::VulkanActivity;
    use vulkan_activity_bridge::boundary::{LoggingBoundary, NativeBoundary};
    use vulkan_activity_bridge::surfaces::{NativeSurface, SurfaceRegistry};
    use vulkan_activity_bridge::system_ui::{immersive_flags, SystemUiFlags};
    use vulkan_activity_bridge::window::DecorWindow;

    const SURFACE: u32 = 0x5f;
    const ASSETS: u32 = 0xa5;

    #[derive(Debug, PartialEq, Clone, Copy)]
    enum Call {
        Start,
        Resume,
        Pause,
        Stop,
        Restart,
        Destroy,
        Input(i32, f32, f32),
        SetSurface(Option<u32>),
        SetAssetManager(u32),
        ConfigurationChanged,
        WindowFocusChanged(bool),
        Released(u32),
    }

    #[derive(Default)]
    struct RecordingBoundary {
        calls: RefCell<Vec<Call>>,
    }

    impl RecordingBoundary {
        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl NativeBoundary for RecordingBoundary {
        type Surface = u32;
        type Assets = u32;

        fn start(&self) {
            self.record(Call::Start);
        }

        fn resume(&self) {
            self.record(Call::Resume);
        }

        fn pause(&self) {
            self.record(Call::Pause);
        }

        fn stop(&self) {
            self.record(Call::Stop);
        }

        fn restart(&self) {
            self.record(Call::Restart);
        }

        fn destroy(&self) {
            self.record(Call::Destroy);
        }

        fn input(&self, action: i32, x: f32, y: f32) {
            self.record(Call::Input(action, x, y));
        }

        fn set_surface(&self, surface: Option<u32>) {
            self.record(Call::SetSurface(surface));
        }

        fn set_asset_manager(&self, assets: u32) {
            self.record(Call::SetAssetManager(assets));
        }

        fn configuration_changed(&self) {
            self.record(Call::ConfigurationChanged);
        }

        fn window_focus_changed(&self, has_focus: bool) {
            self.record(Call::WindowFocusChanged(has_focus));
        }
    }

    struct FakeWindow {
        sdk_int: i32,
        fail: Cell<bool>,
        applied: RefCell<Vec<SystemUiFlags>>,
    }

    impl FakeWindow {
        fn with_sdk(sdk_int: i32) -> Self {
            Self { sdk_int, fail: Cell::new(false), applied: RefCell::new(Vec::new()) }
        }

        fn applied(&self) -> Vec<SystemUiFlags> {
            self.applied.borrow().clone()
        }
    }

    impl DecorWindow for FakeWindow {
        fn sdk_int(&self) -> i32 {
            self.sdk_int
        }

        fn set_system_ui_visibility(&self, flags: SystemUiFlags) -> Result<()> {
            if self.fail.get() {
                bail!("decor view is gone");
            }
            self.applied.borrow_mut().push(flags);
            Ok(())
        }
    }

    /// A window reference that reports its release to the boundary log.
    struct HeldSurface<'a> {
        id: u32,
        boundary: &'a RecordingBoundary,
    }

    impl NativeSurface for HeldSurface<'_> {
        type Handle = u32;

        fn handle(&self) -> u32 {
            self.id
        }
    }

    impl Drop for HeldSurface<'_> {
        fn drop(&mut self) {
            self.boundary.record(Call::Released(self.id));
        }
    }

    type Activity<'a> = VulkanActivity<&'a RecordingBoundary, &'a FakeWindow>;

    fn fixtures(sdk_int: i32) -> (RecordingBoundary, FakeWindow) {
        let _ = env_logger::try_init();
        (RecordingBoundary::default(), FakeWindow::with_sdk(sdk_int))
    }

    #[test]
    fn test_each_lifecycle_transition_notifies_once() {
        let (boundary, window) = fixtures(34);
        let activity = VulkanActivity::new(&boundary, &window);
        let transitions: [(fn(&Activity<'_>), Call); 7] = [
            (|a| a.on_start(), Call::Start),
            (|a| a.on_pause(), Call::Pause),
            (|a| a.on_stop(), Call::Stop),
            (|a| a.on_restart(), Call::Restart),
            (|a| a.on_destroy(), Call::Destroy),
            (|a| a.on_configuration_changed(), Call::ConfigurationChanged),
            (|a| a.on_resume(), Call::Resume),
        ];

        for (transition, expected) in transitions {
            let before = boundary.calls().len();
            transition(&activity);
            let calls = boundary.calls();
            assert_eq!(calls.len(), before + 1, "{:?} must issue exactly one call", expected);
            assert_eq!(calls[before], expected);
        }
    }

    #[test]
    fn test_focus_changes_carry_the_flag() {
        let (boundary, window) = fixtures(34);
        let activity = VulkanActivity::new(&boundary, &window);
        activity.on_window_focus_changed(true);
        activity.on_window_focus_changed(false);
        assert_eq!(
            boundary.calls(),
            vec![Call::WindowFocusChanged(true), Call::WindowFocusChanged(false)]
        );
    }

    #[test]
    fn test_create_sends_assets_before_start() {
        let (boundary, window) = fixtures(34);
        let activity = VulkanActivity::new(&boundary, &window);
        activity.on_create(ASSETS);
        activity.on_start();
        activity.on_resume();

        let calls = boundary.calls();
        assert_eq!(
            calls,
            vec![Call::SetAssetManager(ASSETS), Call::Start, Call::Start, Call::Resume]
        );
        let asset_calls =
            calls.iter().filter(|call| matches!(call, Call::SetAssetManager(_))).count();
        assert_eq!(asset_calls, 1, "asset manager must be handed over exactly once");
    }

    #[test]
    fn test_pointer_down_is_forwarded() {
        let (boundary, window) = fixtures(34);
        let activity = VulkanActivity::new(&boundary, &window);
        assert!(activity.on_touch(0, 10.0, 20.0));
        assert_eq!(boundary.calls(), vec![Call::Input(0, 10.0, 20.0)]);
    }

    #[test]
    fn test_pointer_up_and_move_are_forwarded() {
        let (boundary, window) = fixtures(34);
        let activity = VulkanActivity::new(&boundary, &window);
        activity.on_touch(2, 11.5, 21.5);
        activity.on_touch(1, 12.0, 22.0);
        assert_eq!(
            boundary.calls(),
            vec![Call::Input(2, 11.5, 21.5), Call::Input(1, 12.0, 22.0)]
        );
    }

    #[test]
    fn test_other_motion_actions_are_consumed_and_dropped() {
        let (boundary, window) = fixtures(34);
        let activity = VulkanActivity::new(&boundary, &window);
        // ACTION_CANCEL and ACTION_POINTER_DOWN.
        assert!(activity.on_touch(3, 10.0, 20.0));
        assert!(activity.on_touch(5, 10.0, 20.0));
        assert!(boundary.calls().is_empty());
    }

    #[test]
    fn test_surface_lifecycle() {
        let (boundary, window) = fixtures(34);
        let activity = VulkanActivity::new(&boundary, &window);
        activity.surface_created();
        assert!(boundary.calls().is_empty(), "surface creation must not be relayed");

        activity.surface_changed(SURFACE, 1, 1080, 2400);
        activity.surface_changed(SURFACE + 1, 1, 2400, 1080);
        activity.surface_destroyed();
        assert_eq!(
            boundary.calls(),
            vec![
                Call::SetSurface(Some(SURFACE)),
                Call::SetSurface(Some(SURFACE + 1)),
                Call::SetSurface(None)
            ]
        );
    }

    #[test]
    fn test_resume_applies_flags_per_tier() {
        let cases = [
            (10, None),
            (11, Some(SystemUiFlags::STATUS_BAR_HIDDEN)),
            (13, Some(SystemUiFlags::STATUS_BAR_HIDDEN)),
            (14, Some(SystemUiFlags::FULLSCREEN | SystemUiFlags::LOW_PROFILE)),
            (18, Some(SystemUiFlags::FULLSCREEN | SystemUiFlags::LOW_PROFILE)),
            (19, Some(immersive_flags())),
            (34, Some(immersive_flags())),
        ];
        for (sdk_int, expected) in cases {
            let (boundary, window) = fixtures(sdk_int);
            let activity = VulkanActivity::new(&boundary, &window);
            activity.on_resume();
            assert_eq!(
                window.applied(),
                expected.into_iter().collect::<Vec<_>>(),
                "sdk_int {}",
                sdk_int
            );
            assert_eq!(boundary.calls(), vec![Call::Resume]);
        }
    }

    #[test]
    fn test_create_goes_immersive_only_on_kitkat_and_later() {
        let (boundary, window) = fixtures(19);
        let activity = VulkanActivity::new(&boundary, &window);
        activity.on_create(ASSETS);
        assert_eq!(window.applied(), vec![immersive_flags()]);

        let (boundary, window) = fixtures(18);
        let activity = VulkanActivity::new(&boundary, &window);
        activity.on_create(ASSETS);
        assert!(window.applied().is_empty());
    }

    #[test]
    fn test_visibility_change_reapplies_immersive() {
        let (boundary, window) = fixtures(21);
        let activity = VulkanActivity::new(&boundary, &window);
        activity.on_system_ui_visibility_change(0);
        activity.on_system_ui_visibility_change(SystemUiFlags::FULLSCREEN.bits());
        assert_eq!(window.applied(), vec![immersive_flags(), immersive_flags()]);
        assert!(boundary.calls().is_empty());

        let (boundary, window) = fixtures(16);
        let activity = VulkanActivity::new(&boundary, &window);
        activity.on_system_ui_visibility_change(0);
        assert!(window.applied().is_empty());
    }

    #[test]
    fn test_system_ui_failure_does_not_block_resume() {
        let (boundary, window) = fixtures(34);
        let activity = VulkanActivity::new(&boundary, &window);
        window.fail.set(true);
        activity.on_resume();
        assert!(window.applied().is_empty());
        assert_eq!(boundary.calls(), vec![Call::Resume]);
    }

    #[test]
    fn test_logging_boundary_forwards_unchanged() {
        let _ = env_logger::try_init();
        let recorder = RecordingBoundary::default();
        let window = FakeWindow::with_sdk(34);
        let activity = VulkanActivity::new(LoggingBoundary::new(&recorder), &window);

        activity.on_create(ASSETS);
        activity.surface_changed(SURFACE, 1, 64, 64);
        activity.on_touch(0, 1.0, 2.0);
        activity.on_window_focus_changed(true);
        activity.surface_destroyed();
        activity.on_destroy();

        assert_eq!(
            recorder.calls(),
            vec![
                Call::SetAssetManager(ASSETS),
                Call::Start,
                Call::SetSurface(Some(SURFACE)),
                Call::Input(0, 1.0, 2.0),
                Call::WindowFocusChanged(true),
                Call::SetSurface(None),
                Call::Destroy,
            ]
        );
        assert_eq!(activity.boundary().inner().calls().len(), 7);
    }

    #[test]
    fn test_full_session_preserves_callback_order() {
        let (boundary, window) = fixtures(34);
        let activity = VulkanActivity::new(&boundary, &window);
        activity.on_create(ASSETS);
        activity.on_start();
        activity.on_resume();
        activity.surface_created();
        activity.surface_changed(SURFACE, 1, 1080, 2400);
        activity.on_window_focus_changed(true);
        activity.on_touch(0, 5.0, 6.0);
        activity.on_touch(2, 7.0, 8.0);
        activity.on_touch(1, 7.0, 8.0);
        activity.on_window_focus_changed(false);
        activity.on_pause();
        activity.surface_destroyed();
        activity.on_stop();
        activity.on_restart();
        activity.on_start();
        activity.on_resume();
        activity.on_pause();
        activity.on_stop();
        activity.on_destroy();

        assert_eq!(
            boundary.calls(),
            vec![
                Call::SetAssetManager(ASSETS),
                Call::Start,
                Call::Start,
                Call::Resume,
                Call::SetSurface(Some(SURFACE)),
                Call::WindowFocusChanged(true),
                Call::Input(0, 5.0, 6.0),
                Call::Input(2, 7.0, 8.0),
                Call::Input(1, 7.0, 8.0),
                Call::WindowFocusChanged(false),
                Call::Pause,
                Call::SetSurface(None),
                Call::Stop,
                Call::Restart,
                Call::Start,
                Call::Resume,
                Call::Pause,
                Call::Stop,
                Call::Destroy,
            ]
        );
    }

    #[test]
    fn test_overlapping_instances_keep_forwarding() {
        const FIRST: u32 = 1;
        const SECOND: u32 = 2;
        let (boundary, first_window) = fixtures(34);
        let second_window = FakeWindow::with_sdk(34);
        let surfaces = SurfaceRegistry::new();
        let first = VulkanActivity::new(&boundary, &first_window);
        let second = VulkanActivity::new(&boundary, &second_window);

        first.on_create(ASSETS);
        first.on_start();
        first.on_resume();
        surfaces.surface_changed(
            FIRST,
            HeldSurface { id: SURFACE, boundary: &boundary },
            |owner| *owner == FIRST,
            |handle| first.surface_changed(handle, 1, 1080, 2400),
        );
        // finish() followed by startActivity() on the same class.
        first.on_pause();
        second.on_create(ASSETS);
        second.on_start();
        second.on_resume();
        surfaces.surface_changed(
            SECOND,
            HeldSurface { id: SURFACE + 1, boundary: &boundary },
            |owner| *owner == SECOND,
            |handle| second.surface_changed(handle, 1, 1080, 2400),
        );
        surfaces.surface_destroyed(|owner| *owner == FIRST, || first.surface_destroyed());
        first.on_stop();
        assert!(!surfaces.holds(|owner| *owner == FIRST));
        first.on_destroy();

        assert!(surfaces.holds(|owner| *owner == SECOND), "the live instance keeps its window");
        assert!(second.on_touch(0, 3.0, 4.0));
        second.on_pause();
        surfaces.surface_destroyed(|owner| *owner == SECOND, || second.surface_destroyed());
        second.on_stop();
        second.on_destroy();

        assert!(surfaces.is_empty());
        assert_eq!(
            boundary.calls(),
            vec![
                Call::SetAssetManager(ASSETS),
                Call::Start,
                Call::Start,
                Call::Resume,
                Call::SetSurface(Some(SURFACE)),
                Call::Pause,
                Call::SetAssetManager(ASSETS),
                Call::Start,
                Call::Start,
                Call::Resume,
                Call::SetSurface(Some(SURFACE + 1)),
                Call::SetSurface(None),
                Call::Released(SURFACE),
                Call::Stop,
                Call::Destroy,
                Call::Input(0, 3.0, 4.0),
                Call::Pause,
                Call::SetSurface(None),
                Call::Released(SURFACE + 1),
                Call::Stop,
                Call::Destroy,
            ]
        );
    }
}
