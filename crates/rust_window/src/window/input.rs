use crate::input::{
    CharacterEvent, CursorEnterEvent, CursorPositionEvent, FileDropEvent, InputCategory,
    InputEvent, KeyEvent, MouseButtonEvent, ScrollEvent,
};

use super::{Window, WindowResult};

impl Window {
    /// Start buffering one input category
    ///
    /// Re-arming an armed category forgets its buffered events.
    pub fn arm(&mut self, category: InputCategory) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.inputs.borrow_mut().arm(category);
        self.context.backend_mut().register_input(handle, category);
        log::debug!("Armed {:?} input for window '{}'", category, self.title());
        Ok(())
    }

    /// Start buffering every input category
    pub fn arm_all(&mut self) -> WindowResult<()> {
        InputCategory::ALL
            .into_iter()
            .try_for_each(|category| self.arm(category))
    }

    /// Whether a category is being buffered
    pub fn is_armed(&self, category: InputCategory) -> bool {
        self.inputs.borrow().is_armed(category)
    }

    /// Events of one type buffered since the last clear, in delivery order
    ///
    /// Empty for a category that was never armed.
    pub fn events<E: InputEvent>(&self) -> Vec<E> {
        self.inputs.borrow().drain::<E>()
    }

    /// Number of buffered events of one category
    pub fn stored_events(&self, category: InputCategory) -> usize {
        self.inputs.borrow().stored_count(category)
    }

    /// Buffered key presses, repeats and releases
    pub fn key_events(&self) -> Vec<KeyEvent> {
        self.events()
    }

    /// Buffered text input
    pub fn character_events(&self) -> Vec<CharacterEvent> {
        self.events()
    }

    /// Buffered cursor moves
    pub fn cursor_position_events(&self) -> Vec<CursorPositionEvent> {
        self.events()
    }

    /// Buffered cursor enter and leave events
    pub fn cursor_enter_events(&self) -> Vec<CursorEnterEvent> {
        self.events()
    }

    /// Buffered mouse button events
    pub fn mouse_button_events(&self) -> Vec<MouseButtonEvent> {
        self.events()
    }

    /// Buffered scroll offsets
    pub fn scroll_events(&self) -> Vec<ScrollEvent> {
        self.events()
    }

    /// Buffered file drops
    pub fn file_drop_events(&self) -> Vec<FileDropEvent> {
        self.events()
    }

    /// Empty every buffer, keeping categories armed
    ///
    /// Call once per frame before [`WindowContext::poll_events`](super::WindowContext::poll_events).
    pub fn clear_input_buffers(&mut self) {
        self.inputs.borrow_mut().clear_all();
    }
}
