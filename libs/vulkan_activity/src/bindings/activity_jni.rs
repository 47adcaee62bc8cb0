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

//! # Vulkan activity java bindings
//!
//! Native side of `com.example.vulkansink.VulkanActivity`. The Java activity
//! forwards its callbacks, after calling `super`, to these native methods:
//!
//! ```java
//! native void nativeOnCreate(AssetManager assets);
//! native void nativeOnStart();
//! native void nativeOnResume();
//! native void nativeOnPause();
//! native void nativeOnStop();
//! native void nativeOnRestart();
//! native void nativeOnDestroy();
//! native void nativeOnConfigurationChanged();
//! native void nativeOnWindowFocusChanged(boolean hasFocus);
//! native void nativeSurfaceCreated();
//! native void nativeSurfaceChanged(Surface surface, int format, int width, int height);
//! native void nativeSurfaceDestroyed();
//! native boolean nativeOnTouch(int action, float x, float y);
//! native void nativeOnSystemUiVisibilityChange(int visibility);
//! ```
//!
//! All of them run on the UI thread.

#![cfg(target_os = "android")]

use anyhow::{Context, Result};
use jni::objects::{GlobalRef, JObject, JValue};
use jni::sys::{jboolean, jfloat, jint, JNI_FALSE, JNI_TRUE, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};
use log::{error, info, warn};
use std::cell::RefCell;
use std::ffi::c_void;
use std::ptr::NonNull;
use std::sync::OnceLock;
use vulkan_activity_bridge::activity::VulkanActivity;
use vulkan_activity_bridge::boundary::LoggingBoundary;
use vulkan_activity_bridge::config::BridgeConfig;
use vulkan_activity_bridge::renderer::RendererLibrary;
use vulkan_activity_bridge::surfaces::{NativeSurface, SurfaceRegistry};
use vulkan_activity_bridge::system_ui::SystemUiFlags;
use vulkan_activity_bridge::window::DecorWindow;

// The renderer library. Loaded once, when the VM loads this library.
static RENDERER: OnceLock<RendererLibrary> = OnceLock::new();
static VM: OnceLock<JavaVM> = OnceLock::new();
static SDK_INT: OnceLock<i32> = OnceLock::new();

thread_local! {
    // Windows handed to the renderer, held per activity instance.
    static SURFACES: SurfaceRegistry<GlobalRef, AcquiredWindow> = const { SurfaceRegistry::new() };
    // AAssetManager_fromJava requires the Java object to outlive the native pointer.
    static ASSET_MANAGER: RefCell<Option<GlobalRef>> = const { RefCell::new(None) };
}

/// The bridge as seen from one callback of one activity instance.
type Bridge<'a> = VulkanActivity<LoggingBoundary<&'static RendererLibrary>, JniDecorWindow<'a>>;

/// The decor view of the activity that made the current call.
struct JniDecorWindow<'a> {
    activity: &'a JObject<'a>,
    sdk_int: i32,
}

impl DecorWindow for JniDecorWindow<'_> {
    fn sdk_int(&self) -> i32 {
        self.sdk_int
    }

    fn set_system_ui_visibility(&self, flags: SystemUiFlags) -> Result<()> {
        let vm = VM.get().context("The VM is not known yet")?;
        let mut env = vm.get_env().context("The UI thread is not attached to the VM")?;
        let result = (|| -> jni::errors::Result<()> {
            let window = env
                .call_method(self.activity, "getWindow", "()Landroid/view/Window;", &[])?
                .l()?;
            let decor_view =
                env.call_method(&window, "getDecorView", "()Landroid/view/View;", &[])?.l()?;
            env.call_method(
                &decor_view,
                "setSystemUiVisibility",
                "(I)V",
                &[JValue::Int(flags.bits())],
            )?;
            Ok(())
        })();
        if result.is_err() {
            // Do not leave a pending exception behind for the Java caller.
            let _ = env.exception_clear();
        }
        result.context("Failed to call setSystemUiVisibility")
    }
}

/// A reference to an `ANativeWindow` acquired from a Java `Surface`.
struct AcquiredWindow(NonNull<ndk_sys::ANativeWindow>);

impl AcquiredWindow {
    fn from_surface(env: &JNIEnv<'_>, surface: &JObject<'_>) -> Option<Self> {
        // SAFETY: `env` is the JNIEnv of the current thread and `surface` is a live local
        // reference to an android.view.Surface.
        let window = unsafe {
            ndk_sys::ANativeWindow_fromSurface(env.get_raw() as *mut _, surface.as_raw() as _)
        };
        NonNull::new(window).map(Self)
    }
}

impl NativeSurface for AcquiredWindow {
    type Handle = NonNull<c_void>;

    fn handle(&self) -> NonNull<c_void> {
        self.0.cast()
    }
}

impl Drop for AcquiredWindow {
    fn drop(&mut self) {
        // SAFETY: the reference was acquired by `ANativeWindow_fromSurface` and is released once.
        unsafe { ndk_sys::ANativeWindow_release(self.0.as_ptr()) };
    }
}

fn sdk_int(env: &mut JNIEnv<'_>) -> Result<i32> {
    if let Some(sdk_int) = SDK_INT.get() {
        return Ok(*sdk_int);
    }
    let sdk_int = env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?.i()?;
    Ok(*SDK_INT.get_or_init(|| sdk_int))
}

fn bridge<'a>(env: &mut JNIEnv<'_>, activity: &'a JObject<'a>) -> Result<Bridge<'a>> {
    let renderer = RENDERER.get().context("The renderer library is not loaded")?;
    let window = JniDecorWindow { activity, sdk_int: sdk_int(env)? };
    Ok(VulkanActivity::new(LoggingBoundary::new(renderer), window))
}

fn is_same_activity(env: &JNIEnv<'_>, held: &GlobalRef, activity: &JObject<'_>) -> bool {
    env.is_same_object(held, activity).unwrap_or(false)
}

fn throw_on_error(env: &mut JNIEnv<'_>, result: Result<()>) {
    if let Err(e) = result {
        error!("{:#}", e);
        let _ = env.throw_new("java/lang/RuntimeException", format!("{:#}", e));
    }
}

/// Sets up logging and loads the renderer library. The process cannot run
/// without the renderer, so a load failure aborts it.
#[no_mangle]
pub extern "system" fn JNI_OnLoad(vm: JavaVM, _reserved: *mut c_void) -> jint {
    let config = BridgeConfig::default();
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag(config.log_tag())
            .with_max_level(config.max_log_level()),
    );

    match RendererLibrary::load(&config) {
        Ok(renderer) => {
            if RENDERER.set(renderer).is_err() {
                warn!("Renderer library was already loaded");
            }
        }
        Err(e) => {
            error!("Unable to load the renderer library: {:#}", e);
            std::process::abort();
        }
    }
    if VM.set(vm).is_err() {
        warn!("JNI_OnLoad called more than once");
    }
    info!("JNI_OnLoad complete!");
    JNI_VERSION_1_6
}

/// Goes fullscreen and hands the asset manager over before starting the
/// renderer.
#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnCreate<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
    asset_manager: JObject<'a>,
) {
    let result = (|| -> Result<()> {
        let bridge = bridge(&mut env, &obj)?;
        let assets_ref = env.new_global_ref(&asset_manager)?;
        // SAFETY: `env` is the JNIEnv of the current thread and `asset_manager` is a live
        // reference to an android.content.res.AssetManager, kept alive by `assets_ref`.
        let assets = unsafe {
            ndk_sys::AAssetManager_fromJava(env.get_raw() as *mut _, asset_manager.as_raw() as _)
        };
        let assets = NonNull::new(assets).context("AAssetManager_fromJava failed")?.cast::<c_void>();
        bridge.on_create(assets);
        // The previous asset manager goes only once the renderer has been given this one.
        let previous = ASSET_MANAGER.with(|slot| slot.replace(Some(assets_ref)));
        drop(previous);
        Ok(())
    })();
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnStart<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
) {
    let result = bridge(&mut env, &obj).map(|bridge| bridge.on_start());
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnResume<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
) {
    let result = bridge(&mut env, &obj).map(|bridge| bridge.on_resume());
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnPause<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
) {
    let result = bridge(&mut env, &obj).map(|bridge| bridge.on_pause());
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnStop<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
) {
    let result = bridge(&mut env, &obj).map(|bridge| bridge.on_stop());
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnRestart<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
) {
    let result = bridge(&mut env, &obj).map(|bridge| bridge.on_restart());
    throw_on_error(&mut env, result);
}

/// Notifies the renderer. A surface still held by this instance stays held,
/// since the renderer was never told to stop using it.
#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnDestroy<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
) {
    let result = bridge(&mut env, &obj).map(|bridge| {
        bridge.on_destroy();
        if SURFACES.with(|surfaces| surfaces.holds(|held| is_same_activity(&env, held, &obj))) {
            warn!("Activity destroyed while its surface is still held");
        }
    });
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnConfigurationChanged<
    'a,
>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
) {
    let result = bridge(&mut env, &obj).map(|bridge| bridge.on_configuration_changed());
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnWindowFocusChanged<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
    has_focus: jboolean,
) {
    let result =
        bridge(&mut env, &obj).map(|bridge| bridge.on_window_focus_changed(has_focus != 0));
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeSurfaceCreated<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
) {
    let result = bridge(&mut env, &obj).map(|bridge| bridge.surface_created());
    throw_on_error(&mut env, result);
}

/// Acquires the native window behind `surface` and hands it to the renderer.
/// The window this instance handed over before is released afterwards.
#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeSurfaceChanged<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
    surface: JObject<'a>,
    format: jint,
    width: jint,
    height: jint,
) {
    let result = (|| -> Result<()> {
        let bridge = bridge(&mut env, &obj)?;
        let Some(window) = AcquiredWindow::from_surface(&env, &surface) else {
            error!("ANativeWindow_fromSurface failed");
            return Ok(());
        };
        let owner = env.new_global_ref(&obj)?;
        SURFACES.with(|surfaces| {
            surfaces.surface_changed(
                owner,
                window,
                |held| is_same_activity(&env, held, &obj),
                |handle| bridge.surface_changed(handle, format, width, height),
            )
        });
        Ok(())
    })();
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeSurfaceDestroyed<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
) {
    let result = bridge(&mut env, &obj).map(|bridge| {
        SURFACES.with(|surfaces| {
            surfaces.surface_destroyed(
                |held| is_same_activity(&env, held, &obj),
                || bridge.surface_destroyed(),
            )
        })
    });
    throw_on_error(&mut env, result);
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnTouch<'a>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
    action: jint,
    x: jfloat,
    y: jfloat,
) -> jboolean {
    match bridge(&mut env, &obj) {
        Ok(bridge) if bridge.on_touch(action, x, y) => JNI_TRUE,
        Ok(_) => JNI_FALSE,
        Err(e) => {
            throw_on_error(&mut env, Err(e));
            JNI_FALSE
        }
    }
}

#[no_mangle]
pub extern "system" fn Java_com_example_vulkansink_VulkanActivity_nativeOnSystemUiVisibilityChange<
    'a,
>(
    mut env: JNIEnv<'a>,
    obj: JObject<'a>,
    visibility: jint,
) {
    let result =
        bridge(&mut env, &obj).map(|bridge| bridge.on_system_ui_visibility_change(visibility));
    throw_on_error(&mut env, result);
}
