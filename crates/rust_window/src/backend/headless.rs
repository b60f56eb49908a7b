//! In-memory window backend
//!
//! Simulates the native windowing system without a display: windows live in a
//! slot map, monitors and content scale are configured up front, and input is
//! queued with [`HeadlessBackend::push_input`] until the next poll. Queued input
//! is only delivered for categories the window registered, the same way native
//! callbacks only fire once they are installed.

use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};

use ash::vk::{self, Handle};
use slotmap::SlotMap;

use super::{
    IconImage, IntHint, MonitorHandle, NativeHandle, NativeWindowDesc, StringHint, VideoMode,
    WindowAttribute, WindowBackend, HINT_FALSE,
};
use crate::foundation::geometry::{Area, Coordinate, Scalar};
use crate::input::{InputCategory, InputEventRecord};

/// A simulated monitor
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMonitor {
    /// Human readable name
    pub name: String,
    /// Virtual desktop position of the top-left corner
    pub position: Coordinate<i32>,
    /// Current video mode, `None` for a disconnected output
    pub video_mode: Option<VideoMode>,
}

/// State of a simulated window
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    /// Last title set
    pub title: String,
    /// Position in screen coordinates
    pub position: Coordinate<i32>,
    /// Content-area size in screen coordinates
    pub size: Area<i32>,
    /// Monitor the window is full-screen on
    pub monitor: Option<MonitorHandle>,
    /// Refresh rate requested with the last monitor change
    pub refresh_rate: Option<u32>,
    /// Size limits in screen coordinates
    pub size_limits: (Option<Area<i32>>, Option<Area<i32>>),
    /// Locked aspect ratio
    pub aspect_ratio: Option<(u32, u32)>,
    /// Whole-window opacity
    pub opacity: f32,
    /// Icon candidates last set
    pub icons: Vec<IconImage>,
    /// Close flag
    pub should_close: bool,
    /// Window sharing its context
    pub share: Option<NativeHandle>,
    /// Categories registered for delivery
    pub registered: HashSet<InputCategory>,
    /// Number of buffer swaps
    pub swap_count: u64,
    /// Number of surfaces created
    pub surfaces_created: u32,
    attributes: HashMap<WindowAttribute, bool>,
}

impl HeadlessWindow {
    /// Current value of a boolean property
    pub fn attribute(&self, attribute: WindowAttribute) -> bool {
        self.attributes.get(&attribute).copied().unwrap_or(false)
    }

    fn set_attribute(&mut self, attribute: WindowAttribute, value: bool) {
        self.attributes.insert(attribute, value);
    }
}

/// Window backend that needs no display server
#[derive(Debug)]
pub struct HeadlessBackend {
    windows: SlotMap<NativeHandle, HeadlessWindow>,
    monitors: Vec<HeadlessMonitor>,
    content_scale: Coordinate<f32>,
    int_hints: HashMap<IntHint, i32>,
    string_hints: HashMap<StringHint, String>,
    pending: VecDeque<(NativeHandle, InputEventRecord)>,
    next_surface: u64,
    refuse_creation: bool,
}

impl HeadlessBackend {
    /// One 1920x1080 @ 60 Hz monitor and a content scale of 1.0
    pub fn new() -> Self {
        Self {
            windows: SlotMap::with_key(),
            monitors: vec![HeadlessMonitor {
                name: "Headless Primary".to_string(),
                position: Coordinate::new(0, 0),
                video_mode: Some(VideoMode {
                    width: 1920,
                    height: 1080,
                    refresh_rate: 60,
                }),
            }],
            content_scale: Coordinate::new(1.0, 1.0),
            int_hints: HashMap::new(),
            string_hints: HashMap::new(),
            pending: VecDeque::new(),
            next_surface: 1,
            refuse_creation: false,
        }
    }

    /// Use the same content scale on both axes for every window
    #[must_use]
    pub fn with_content_scale(mut self, scale: f32) -> Self {
        self.content_scale = Coordinate::new(scale, scale);
        self
    }

    /// Add a monitor after the existing ones
    #[must_use]
    pub fn with_monitor(mut self, monitor: HeadlessMonitor) -> Self {
        self.monitors.push(monitor);
        self
    }

    /// Remove every monitor
    #[must_use]
    pub fn without_monitors(mut self) -> Self {
        self.monitors.clear();
        self
    }

    /// Make every following `create_window` call fail
    pub fn refuse_window_creation(&mut self, refuse: bool) {
        self.refuse_creation = refuse;
    }

    /// Change the content scale reported for every window
    pub fn set_content_scale(&mut self, scale: Coordinate<f32>) {
        self.content_scale = scale;
    }

    /// Queue an input delivery for the next poll
    pub fn push_input(&mut self, handle: NativeHandle, record: InputEventRecord) {
        self.pending.push_back((handle, record));
    }

    /// Number of queued deliveries
    pub fn pending_input(&self) -> usize {
        self.pending.len()
    }

    /// Simulated window state
    pub fn window(&self, handle: NativeHandle) -> Option<&HeadlessWindow> {
        self.windows.get(handle)
    }

    /// Handles of every live window
    pub fn window_handles(&self) -> Vec<NativeHandle> {
        self.windows.keys().collect()
    }

    /// Number of live windows
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Last value set for an integer hint
    pub fn int_hint(&self, hint: IntHint) -> Option<i32> {
        self.int_hints.get(&hint).copied()
    }

    /// Last value set for a string hint
    pub fn string_hint(&self, hint: StringHint) -> Option<&str> {
        self.string_hints.get(&hint).map(String::as_str)
    }

    fn initial_flag(&self, hint: IntHint, default: bool) -> bool {
        self.int_hints
            .get(&hint)
            .map_or(default, |value| *value != HINT_FALSE)
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowBackend for HeadlessBackend {
    fn set_int_hint(&mut self, hint: IntHint, value: i32) {
        self.int_hints.insert(hint, value);
    }

    fn set_string_hint(&mut self, hint: StringHint, value: &str) {
        self.string_hints.insert(hint, value.to_string());
    }

    fn create_window(&mut self, desc: &NativeWindowDesc<'_>) -> Option<NativeHandle> {
        if self.refuse_creation {
            return None;
        }

        let (position, size, refresh_rate) = match desc.monitor {
            Some(monitor) => {
                let monitor = self.monitors.get(monitor.0)?;
                let mode = monitor.video_mode?;
                (
                    monitor.position,
                    Area::new(i32::try_from(mode.width).ok()?, i32::try_from(mode.height).ok()?),
                    Some(mode.refresh_rate),
                )
            }
            None => (Coordinate::new(0, 0), Area::new(desc.width, desc.height), None),
        };

        let mut attributes = HashMap::new();
        let flags = [
            (WindowAttribute::Decorated, IntHint::Decorated, true),
            (WindowAttribute::Resizable, IntHint::Resizable, true),
            (WindowAttribute::Floating, IntHint::Floating, false),
            (WindowAttribute::AutoIconify, IntHint::AutoIconify, true),
            (WindowAttribute::FocusOnShow, IntHint::FocusOnShow, true),
            (WindowAttribute::Visible, IntHint::Visible, true),
            (WindowAttribute::Focused, IntHint::Focused, true),
            (WindowAttribute::Maximized, IntHint::Maximized, false),
            (WindowAttribute::TransparentFramebuffer, IntHint::TransparentFramebuffer, false),
        ];
        for (attribute, hint, default) in flags {
            attributes.insert(attribute, self.initial_flag(hint, default));
        }

        let window = HeadlessWindow {
            title: desc.title.to_string(),
            position,
            size,
            monitor: desc.monitor,
            refresh_rate,
            size_limits: (None, None),
            aspect_ratio: None,
            opacity: 1.0,
            icons: Vec::new(),
            should_close: false,
            share: desc.share,
            registered: HashSet::new(),
            swap_count: 0,
            surfaces_created: 0,
            attributes,
        };
        Some(self.windows.insert(window))
    }

    fn destroy_window(&mut self, handle: NativeHandle) {
        self.windows.remove(handle);
        self.pending.retain(|(target, _)| *target != handle);
    }

    fn register_input(&mut self, handle: NativeHandle, category: InputCategory) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.registered.insert(category);
        }
    }

    fn poll_events(&mut self, sink: &mut dyn FnMut(NativeHandle, InputEventRecord)) {
        while let Some((handle, record)) = self.pending.pop_front() {
            let registered = self
                .windows
                .get(handle)
                .is_some_and(|window| window.registered.contains(&record.category()));
            if registered {
                sink(handle, record);
            } else {
                log::trace!("No callback installed for {:?}, discarding", record.category());
            }
        }
    }

    fn window_position(&self, handle: NativeHandle) -> Coordinate<i32> {
        self.windows.get(handle).map(|window| window.position).unwrap_or_default()
    }

    fn set_window_position(&mut self, handle: NativeHandle, position: Coordinate<i32>) {
        if let Some(window) = self.windows.get_mut(handle) {
            // Full-screen windows ignore moves, like native ones
            if window.monitor.is_none() {
                window.position = position;
            }
        }
    }

    fn window_size(&self, handle: NativeHandle) -> Area<i32> {
        self.windows.get(handle).map(|window| window.size).unwrap_or_default()
    }

    fn set_window_size(&mut self, handle: NativeHandle, size: Area<i32>) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.size = size;
        }
    }

    fn framebuffer_size(&self, handle: NativeHandle) -> Area<i32> {
        let size = self.window_size(handle);
        Area::new(
            size.width.scaled(self.content_scale.x),
            size.height.scaled(self.content_scale.y),
        )
    }

    fn content_scale(&self, handle: NativeHandle) -> Coordinate<f32> {
        if self.windows.contains_key(handle) {
            self.content_scale
        } else {
            Coordinate::new(1.0, 1.0)
        }
    }

    fn set_size_limits(
        &mut self,
        handle: NativeHandle,
        minimum: Option<Area<i32>>,
        maximum: Option<Area<i32>>,
    ) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.size_limits = (minimum, maximum);
        }
    }

    fn set_aspect_ratio(&mut self, handle: NativeHandle, numerator: u32, denominator: u32) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.aspect_ratio = Some((numerator, denominator));
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
        let monitor_position = monitor
            .and_then(|monitor| self.monitors.get(monitor.0))
            .map(|monitor| monitor.position);
        let Some(window) = self.windows.get_mut(handle) else {
            return;
        };

        window.monitor = monitor;
        window.size = size;
        window.refresh_rate = refresh_rate;
        window.position = monitor_position.unwrap_or(position);
    }

    fn window_attribute(&self, handle: NativeHandle, attribute: WindowAttribute) -> bool {
        self.windows
            .get(handle)
            .is_some_and(|window| window.attribute(attribute))
    }

    fn set_window_attribute(&mut self, handle: NativeHandle, attribute: WindowAttribute, value: bool) {
        if !attribute.is_settable() {
            log::warn!("Window attribute {:?} is read-only", attribute);
            return;
        }
        if let Some(window) = self.windows.get_mut(handle) {
            window.set_attribute(attribute, value);
        }
    }

    fn primary_monitor(&mut self) -> Option<MonitorHandle> {
        (!self.monitors.is_empty()).then_some(MonitorHandle(0))
    }

    fn monitors(&mut self) -> Vec<MonitorHandle> {
        (0..self.monitors.len()).map(MonitorHandle).collect()
    }

    fn video_mode(&mut self, monitor: MonitorHandle) -> Option<VideoMode> {
        self.monitors.get(monitor.0).and_then(|monitor| monitor.video_mode)
    }

    fn iconify(&mut self, handle: NativeHandle) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.set_attribute(WindowAttribute::Iconified, true);
            window.set_attribute(WindowAttribute::Maximized, false);
        }
    }

    fn maximize(&mut self, handle: NativeHandle) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.set_attribute(WindowAttribute::Iconified, false);
            window.set_attribute(WindowAttribute::Maximized, true);
        }
    }

    fn restore(&mut self, handle: NativeHandle) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.set_attribute(WindowAttribute::Iconified, false);
            window.set_attribute(WindowAttribute::Maximized, false);
        }
    }

    fn show(&mut self, handle: NativeHandle) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.set_attribute(WindowAttribute::Visible, true);
        }
    }

    fn hide(&mut self, handle: NativeHandle) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.set_attribute(WindowAttribute::Visible, false);
        }
    }

    fn focus(&mut self, handle: NativeHandle) {
        for (key, window) in &mut self.windows {
            window.set_attribute(WindowAttribute::Focused, key == handle);
        }
    }

    fn request_attention(&mut self, handle: NativeHandle) {
        log::debug!("Headless window {:?} requested attention", handle);
    }

    fn set_opacity(&mut self, handle: NativeHandle, opacity: f32) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn set_title(&mut self, handle: NativeHandle, title: &str) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.title = title.to_string();
        }
    }

    fn set_icon(&mut self, handle: NativeHandle, images: &[IconImage]) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.icons = images.to_vec();
        }
    }

    fn should_close(&self, handle: NativeHandle) -> bool {
        self.windows.get(handle).is_some_and(|window| window.should_close)
    }

    fn set_should_close(&mut self, handle: NativeHandle, value: bool) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.should_close = value;
        }
    }

    fn swap_buffers(&mut self, handle: NativeHandle) {
        if let Some(window) = self.windows.get_mut(handle) {
            window.swap_count += 1;
        }
    }

    fn create_surface(
        &mut self,
        handle: NativeHandle,
        _instance: vk::Instance,
    ) -> Result<vk::SurfaceKHR, vk::Result> {
        let window = self
            .windows
            .get_mut(handle)
            .ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)?;
        window.surfaces_created += 1;

        let surface = vk::SurfaceKHR::from_raw(self.next_surface);
        self.next_surface += 1;
        Ok(surface)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
