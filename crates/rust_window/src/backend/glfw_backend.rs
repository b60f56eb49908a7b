//! GLFW window backend
//!
//! Wraps a single `glfw::Glfw` instance and every native window it created.
//! Input categories map onto glfw polling flags; [`WindowBackend::poll_events`]
//! pumps the native event loop and converts each flushed `WindowEvent` into an
//! [`InputEventRecord`].

use std::any::Any;
use std::collections::HashSet;

use ash::vk;
use glfw::{ClientApiHint, Context as _, PixelImage, WindowEvent, WindowHint, WindowMode};
use slotmap::SlotMap;

use super::{
    hints::{CLIENT_API_OPENGL, CLIENT_API_OPENGL_ES},
    IconImage, IntHint, MonitorHandle, NativeHandle, NativeWindowDesc, StringHint, VideoMode,
    WindowAttribute, WindowBackend, HINT_FALSE,
};
use crate::foundation::geometry::{Area, Coordinate};
use crate::input::{
    CharacterEvent, CursorEnterEvent, CursorPositionEvent, FileDropEvent, InputCategory,
    InputEventRecord, KeyEvent, Modifiers, MouseButtonEvent, ScrollEvent,
};
use crate::window::{WindowError, WindowResult};

struct GlfwWindowEntry {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    registered: HashSet<InputCategory>,
}

/// Native glfw backend
pub struct GlfwBackend {
    glfw: glfw::Glfw,
    windows: SlotMap<NativeHandle, GlfwWindowEntry>,
}

impl GlfwBackend {
    /// Initialize glfw
    ///
    /// glfw errors raised after initialization are logged, not fatal.
    pub fn init() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::log_errors).map_err(|_| WindowError::InitializationFailed)?;
        log::info!("Initialized glfw {}", glfw::get_version_string());

        Ok(Self {
            glfw,
            windows: SlotMap::with_key(),
        })
    }

    /// Vulkan instance extensions required to present to glfw windows
    pub fn required_instance_extensions(&self) -> Option<Vec<String>> {
        self.glfw.get_required_instance_extensions()
    }

    /// Whether the Vulkan loader and an ICD were found
    pub fn vulkan_supported(&self) -> bool {
        self.glfw.vulkan_supported()
    }

    fn entry(&self, handle: NativeHandle) -> Option<&GlfwWindowEntry> {
        self.windows.get(handle)
    }

    fn window_mut(&mut self, handle: NativeHandle) -> Option<&mut glfw::PWindow> {
        self.windows.get_mut(handle).map(|entry| &mut entry.window)
    }
}

fn flag(value: i32) -> bool {
    value != HINT_FALSE
}

fn bits(value: i32) -> Option<u32> {
    u32::try_from(value).ok()
}

fn to_window_hint(hint: IntHint, value: i32) -> Option<WindowHint> {
    let hint = match hint {
        IntHint::Resizable => WindowHint::Resizable(flag(value)),
        IntHint::Visible => WindowHint::Visible(flag(value)),
        IntHint::Decorated => WindowHint::Decorated(flag(value)),
        IntHint::Focused => WindowHint::Focused(flag(value)),
        IntHint::AutoIconify => WindowHint::AutoIconify(flag(value)),
        IntHint::Floating => WindowHint::Floating(flag(value)),
        IntHint::Maximized => WindowHint::Maximized(flag(value)),
        IntHint::CenterCursor => WindowHint::CenterCursor(flag(value)),
        IntHint::TransparentFramebuffer => WindowHint::TransparentFramebuffer(flag(value)),
        IntHint::FocusOnShow => WindowHint::FocusOnShow(flag(value)),
        IntHint::ScaleToMonitor => WindowHint::ScaleToMonitor(flag(value)),
        IntHint::RedBits => WindowHint::RedBits(bits(value)),
        IntHint::GreenBits => WindowHint::GreenBits(bits(value)),
        IntHint::BlueBits => WindowHint::BlueBits(bits(value)),
        IntHint::AlphaBits => WindowHint::AlphaBits(bits(value)),
        IntHint::DepthBits => WindowHint::DepthBits(bits(value)),
        IntHint::StencilBits => WindowHint::StencilBits(bits(value)),
        IntHint::AuxBuffers => WindowHint::AuxBuffers(bits(value)),
        IntHint::Stereo => WindowHint::Stereo(flag(value)),
        IntHint::Samples => WindowHint::Samples(bits(value)),
        IntHint::SrgbCapable => WindowHint::SRgbCapable(flag(value)),
        IntHint::DoubleBuffer => WindowHint::DoubleBuffer(flag(value)),
        IntHint::RefreshRate => WindowHint::RefreshRate(bits(value)),
        IntHint::ClientApi => WindowHint::ClientApi(match value {
            CLIENT_API_OPENGL => ClientApiHint::OpenGl,
            CLIENT_API_OPENGL_ES => ClientApiHint::OpenGlEs,
            _ => ClientApiHint::NoApi,
        }),
        IntHint::ContextVersionMajor => WindowHint::ContextVersionMajor(bits(value)?),
        IntHint::ContextVersionMinor => WindowHint::ContextVersionMinor(bits(value)?),
        IntHint::CocoaRetinaFramebuffer => WindowHint::CocoaRetinaFramebuffer(flag(value)),
    };
    Some(hint)
}

fn to_record(event: WindowEvent) -> Option<InputEventRecord> {
    let record = match event {
        WindowEvent::Key(key, scancode, action, mods) => InputEventRecord::Key(KeyEvent {
            key: key as i32,
            scancode,
            action: action as i32,
            modifiers: Modifiers::from_bits_retain(mods.bits()),
        }),
        WindowEvent::Char(character) => InputEventRecord::Character(CharacterEvent {
            codepoint: u32::from(character),
        }),
        WindowEvent::CursorPos(x, y) => {
            InputEventRecord::CursorPosition(CursorPositionEvent { x, y })
        }
        WindowEvent::CursorEnter(entered) => {
            InputEventRecord::CursorEnter(CursorEnterEvent { entered })
        }
        WindowEvent::MouseButton(button, action, mods) => {
            InputEventRecord::MouseButton(MouseButtonEvent {
                button: button as i32,
                action: action as i32,
                modifiers: Modifiers::from_bits_retain(mods.bits()),
            })
        }
        WindowEvent::Scroll(x_offset, y_offset) => {
            InputEventRecord::Scroll(ScrollEvent { x_offset, y_offset })
        }
        WindowEvent::FileDrop(paths) => InputEventRecord::FileDrop(FileDropEvent { paths }),
        _ => return None,
    };
    Some(record)
}

fn to_pixel_image(image: &IconImage) -> PixelImage {
    PixelImage {
        width: image.width,
        height: image.height,
        pixels: image
            .pixels
            .chunks_exact(4)
            .map(|rgba| u32::from_ne_bytes([rgba[0], rgba[1], rgba[2], rgba[3]]))
            .collect(),
    }
}

impl WindowBackend for GlfwBackend {
    fn set_int_hint(&mut self, hint: IntHint, value: i32) {
        match to_window_hint(hint, value) {
            Some(window_hint) => self.glfw.window_hint(window_hint),
            None => log::warn!("Ignoring {:?} hint with value {}", hint, value),
        }
    }

    fn set_string_hint(&mut self, hint: StringHint, value: &str) {
        let value = Some(value.to_string());
        self.glfw.window_hint(match hint {
            StringHint::X11ClassName => WindowHint::X11ClassName(value),
            StringHint::X11InstanceName => WindowHint::X11InstanceName(value),
            StringHint::CocoaFrameName => WindowHint::CocoaFrameName(value),
        });
    }

    fn create_window(&mut self, desc: &NativeWindowDesc<'_>) -> Option<NativeHandle> {
        let width = u32::try_from(desc.width).ok()?;
        let height = u32::try_from(desc.height).ok()?;
        let share = desc.share.and_then(|handle| self.windows.get(handle));

        let (window, events) = self.glfw.with_connected_monitors(|glfw, monitors| {
            let mode = match desc.monitor {
                Some(monitor) => WindowMode::FullScreen(&**monitors.get(monitor.0)?),
                None => WindowMode::Windowed,
            };
            match share {
                Some(entry) => entry.window.create_shared(width, height, desc.title, mode),
                None => glfw.create_window(width, height, desc.title, mode),
            }
        })?;

        Some(self.windows.insert(GlfwWindowEntry {
            window,
            events,
            registered: HashSet::new(),
        }))
    }

    fn destroy_window(&mut self, handle: NativeHandle) {
        // Dropping the PWindow destroys the native window
        self.windows.remove(handle);
    }

    fn register_input(&mut self, handle: NativeHandle, category: InputCategory) {
        let Some(entry) = self.windows.get_mut(handle) else {
            return;
        };

        match category {
            InputCategory::Key => entry.window.set_key_polling(true),
            InputCategory::Character => entry.window.set_char_polling(true),
            InputCategory::CursorPosition => entry.window.set_cursor_pos_polling(true),
            InputCategory::CursorEnter => entry.window.set_cursor_enter_polling(true),
            InputCategory::MouseButton => entry.window.set_mouse_button_polling(true),
            InputCategory::Scroll => entry.window.set_scroll_polling(true),
            InputCategory::FileDrop => entry.window.set_drag_and_drop_polling(true),
        }
        entry.registered.insert(category);
    }

    fn poll_events(&mut self, sink: &mut dyn FnMut(NativeHandle, InputEventRecord)) {
        self.glfw.poll_events();

        for (handle, entry) in &self.windows {
            for (_, event) in glfw::flush_messages(&entry.events) {
                if let Some(record) = to_record(event) {
                    if entry.registered.contains(&record.category()) {
                        sink(handle, record);
                    }
                }
            }
        }
    }

    fn window_position(&self, handle: NativeHandle) -> Coordinate<i32> {
        self.entry(handle)
            .map(|entry| entry.window.get_pos().into())
            .unwrap_or_default()
    }

    fn set_window_position(&mut self, handle: NativeHandle, position: Coordinate<i32>) {
        if let Some(window) = self.window_mut(handle) {
            window.set_pos(position.x, position.y);
        }
    }

    fn window_size(&self, handle: NativeHandle) -> Area<i32> {
        self.entry(handle)
            .map(|entry| entry.window.get_size().into())
            .unwrap_or_default()
    }

    fn set_window_size(&mut self, handle: NativeHandle, size: Area<i32>) {
        if let Some(window) = self.window_mut(handle) {
            window.set_size(size.width, size.height);
        }
    }

    fn framebuffer_size(&self, handle: NativeHandle) -> Area<i32> {
        self.entry(handle)
            .map(|entry| entry.window.get_framebuffer_size().into())
            .unwrap_or_default()
    }

    fn content_scale(&self, handle: NativeHandle) -> Coordinate<f32> {
        self.entry(handle)
            .map_or(Coordinate::new(1.0, 1.0), |entry| entry.window.get_content_scale().into())
    }

    fn set_size_limits(
        &mut self,
        handle: NativeHandle,
        minimum: Option<Area<i32>>,
        maximum: Option<Area<i32>>,
    ) {
        let limit = |area: Option<Area<i32>>| {
            area.map_or((None, None), |area| (bits(area.width), bits(area.height)))
        };
        let (min_width, min_height) = limit(minimum);
        let (max_width, max_height) = limit(maximum);

        if let Some(window) = self.window_mut(handle) {
            window.set_size_limits(min_width, min_height, max_width, max_height);
        }
    }

    fn set_aspect_ratio(&mut self, handle: NativeHandle, numerator: u32, denominator: u32) {
        if let Some(window) = self.window_mut(handle) {
            window.set_aspect_ratio(numerator, denominator);
        }
    }

    fn set_window_monitor(
        &mut self,
        handle: NativeHandle,
        monitor: Option<MonitorHandle>,
        position: Coordinate<i32>,
        size: Area<i32>,
        refresh_rate: Option<u32>,
    ) {
        let Some(entry) = self.windows.get_mut(handle) else {
            return;
        };
        let (Some(width), Some(height)) = (bits(size.width), bits(size.height)) else {
            log::warn!("Ignoring monitor change to negative size {:?}", size);
            return;
        };

        self.glfw.with_connected_monitors(|_, monitors| {
            let mode = match monitor {
                Some(monitor) => match monitors.get(monitor.0) {
                    Some(native) => WindowMode::FullScreen(&**native),
                    None => {
                        log::warn!("Monitor {} is no longer connected", monitor.0);
                        return;
                    }
                },
                None => WindowMode::Windowed,
            };
            entry
                .window
                .set_monitor(mode, position.x, position.y, width, height, refresh_rate);
        });
    }

    fn window_attribute(&self, handle: NativeHandle, attribute: WindowAttribute) -> bool {
        let Some(entry) = self.entry(handle) else {
            return false;
        };
        let window = &entry.window;

        match attribute {
            WindowAttribute::Decorated => window.is_decorated(),
            WindowAttribute::Resizable => window.is_resizable(),
            WindowAttribute::Floating => window.is_floating(),
            WindowAttribute::AutoIconify => window.is_auto_iconify(),
            WindowAttribute::FocusOnShow => window.is_focus_on_show(),
            WindowAttribute::Hovered => window.is_hovered(),
            WindowAttribute::Visible => window.is_visible(),
            WindowAttribute::Focused => window.is_focused(),
            WindowAttribute::Iconified => window.is_iconified(),
            WindowAttribute::Maximized => window.is_maximized(),
            WindowAttribute::TransparentFramebuffer => window.is_framebuffer_transparent(),
        }
    }

    fn set_window_attribute(&mut self, handle: NativeHandle, attribute: WindowAttribute, value: bool) {
        let Some(window) = self.window_mut(handle) else {
            return;
        };

        match attribute {
            WindowAttribute::Decorated => window.set_decorated(value),
            WindowAttribute::Resizable => window.set_resizable(value),
            WindowAttribute::Floating => window.set_floating(value),
            WindowAttribute::AutoIconify => window.set_auto_iconify(value),
            WindowAttribute::FocusOnShow => window.set_focus_on_show(value),
            other => log::warn!("Window attribute {:?} is read-only", other),
        }
    }

    fn primary_monitor(&mut self) -> Option<MonitorHandle> {
        // glfw always lists the primary monitor first
        self.glfw
            .with_connected_monitors(|_, monitors| (!monitors.is_empty()).then_some(MonitorHandle(0)))
    }

    fn monitors(&mut self) -> Vec<MonitorHandle> {
        self.glfw
            .with_connected_monitors(|_, monitors| (0..monitors.len()).map(MonitorHandle).collect())
    }

    fn video_mode(&mut self, monitor: MonitorHandle) -> Option<VideoMode> {
        self.glfw.with_connected_monitors(|_, monitors| {
            let mode = monitors.get(monitor.0)?.get_video_mode()?;
            Some(VideoMode {
                width: mode.width,
                height: mode.height,
                refresh_rate: mode.refresh_rate,
            })
        })
    }

    fn iconify(&mut self, handle: NativeHandle) {
        if let Some(window) = self.window_mut(handle) {
            window.iconify();
        }
    }

    fn maximize(&mut self, handle: NativeHandle) {
        if let Some(window) = self.window_mut(handle) {
            window.maximize();
        }
    }

    fn restore(&mut self, handle: NativeHandle) {
        if let Some(window) = self.window_mut(handle) {
            window.restore();
        }
    }

    fn show(&mut self, handle: NativeHandle) {
        if let Some(window) = self.window_mut(handle) {
            window.show();
        }
    }

    fn hide(&mut self, handle: NativeHandle) {
        if let Some(window) = self.window_mut(handle) {
            window.hide();
        }
    }

    fn focus(&mut self, handle: NativeHandle) {
        if let Some(window) = self.window_mut(handle) {
            window.focus();
        }
    }

    fn request_attention(&mut self, handle: NativeHandle) {
        if let Some(window) = self.window_mut(handle) {
            window.request_attention();
        }
    }

    fn set_opacity(&mut self, handle: NativeHandle, opacity: f32) {
        if let Some(window) = self.window_mut(handle) {
            window.set_opacity(opacity);
        }
    }

    fn set_title(&mut self, handle: NativeHandle, title: &str) {
        if let Some(window) = self.window_mut(handle) {
            window.set_title(title);
        }
    }

    fn set_icon(&mut self, handle: NativeHandle, images: &[IconImage]) {
        if let Some(window) = self.window_mut(handle) {
            window.set_icon_from_pixels(images.iter().map(to_pixel_image).collect());
        }
    }

    fn should_close(&self, handle: NativeHandle) -> bool {
        self.entry(handle).is_some_and(|entry| entry.window.should_close())
    }

    fn set_should_close(&mut self, handle: NativeHandle, value: bool) {
        if let Some(window) = self.window_mut(handle) {
            window.set_should_close(value);
        }
    }

    fn swap_buffers(&mut self, handle: NativeHandle) {
        if let Some(window) = self.window_mut(handle) {
            window.swap_buffers();
        }
    }

    fn create_surface(
        &mut self,
        handle: NativeHandle,
        instance: vk::Instance,
    ) -> Result<vk::SurfaceKHR, vk::Result> {
        let window = self
            .window_mut(handle)
            .ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)?;

        let mut surface = vk::SurfaceKHR::null();
        let result = window.create_window_surface(instance, std::ptr::null(), &mut surface);
        if result == vk::Result::SUCCESS {
            Ok(surface)
        } else {
            Err(result)
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
