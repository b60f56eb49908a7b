//! Buffered input
//!
//! Backends deliver input asynchronously from the application's point of view
//! (inside the poll call). Every delivery is recorded into the buffer of its
//! category; the application reads the buffers afterwards and clears them at
//! the start of the next polling cycle.

pub mod buffer;
pub mod events;

pub use buffer::{EventBuffer, INPUT_BUFFER_INITIAL_CAPACITY};
pub use events::{
    CharacterEvent, CursorEnterEvent, CursorPositionEvent, FileDropEvent, InputCategory,
    InputEventRecord, KeyEvent, Modifiers, MouseButtonEvent, ScrollEvent, ACTION_PRESS,
    ACTION_RELEASE, ACTION_REPEAT,
};

/// Event record types that own a buffer in [`InputBuffers`]
pub trait InputEvent: Clone + std::fmt::Debug + 'static {
    /// Category the record belongs to
    const CATEGORY: InputCategory;

    /// The buffer holding records of this type
    fn buffer(buffers: &InputBuffers) -> &EventBuffer<Self>;

    /// Mutable access to the buffer holding records of this type
    fn buffer_mut(buffers: &mut InputBuffers) -> &mut EventBuffer<Self>;
}

macro_rules! impl_input_event {
    ($event:ty, $category:ident, $field:ident) => {
        impl InputEvent for $event {
            const CATEGORY: InputCategory = InputCategory::$category;

            fn buffer(buffers: &InputBuffers) -> &EventBuffer<Self> {
                &buffers.$field
            }

            fn buffer_mut(buffers: &mut InputBuffers) -> &mut EventBuffer<Self> {
                &mut buffers.$field
            }
        }
    };
}

impl_input_event!(KeyEvent, Key, key);
impl_input_event!(CharacterEvent, Character, character);
impl_input_event!(CursorPositionEvent, CursorPosition, cursor_position);
impl_input_event!(CursorEnterEvent, CursorEnter, cursor_enter);
impl_input_event!(MouseButtonEvent, MouseButton, mouse_button);
impl_input_event!(ScrollEvent, Scroll, scroll);
impl_input_event!(FileDropEvent, FileDrop, file_drop);

/// One buffer per input category, owned by a window
#[derive(Debug, Default)]
pub struct InputBuffers {
    key: EventBuffer<KeyEvent>,
    character: EventBuffer<CharacterEvent>,
    cursor_position: EventBuffer<CursorPositionEvent>,
    cursor_enter: EventBuffer<CursorEnterEvent>,
    mouse_button: EventBuffer<MouseButtonEvent>,
    scroll: EventBuffer<ScrollEvent>,
    file_drop: EventBuffer<FileDropEvent>,
}

impl InputBuffers {
    /// Create a set of unarmed buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm one category at the default capacity
    pub fn arm(&mut self, category: InputCategory) {
        match category {
            InputCategory::Key => self.key.arm(),
            InputCategory::Character => self.character.arm(),
            InputCategory::CursorPosition => self.cursor_position.arm(),
            InputCategory::CursorEnter => self.cursor_enter.arm(),
            InputCategory::MouseButton => self.mouse_button.arm(),
            InputCategory::Scroll => self.scroll.arm(),
            InputCategory::FileDrop => self.file_drop.arm(),
        }
    }

    /// Whether a category is armed
    pub const fn is_armed(&self, category: InputCategory) -> bool {
        match category {
            InputCategory::Key => self.key.is_armed(),
            InputCategory::Character => self.character.is_armed(),
            InputCategory::CursorPosition => self.cursor_position.is_armed(),
            InputCategory::CursorEnter => self.cursor_enter.is_armed(),
            InputCategory::MouseButton => self.mouse_button.is_armed(),
            InputCategory::Scroll => self.scroll.is_armed(),
            InputCategory::FileDrop => self.file_drop.is_armed(),
        }
    }

    /// Stored count of one category
    pub fn stored_count(&self, category: InputCategory) -> usize {
        match category {
            InputCategory::Key => self.key.stored_count(),
            InputCategory::Character => self.character.stored_count(),
            InputCategory::CursorPosition => self.cursor_position.stored_count(),
            InputCategory::CursorEnter => self.cursor_enter.stored_count(),
            InputCategory::MouseButton => self.mouse_button.stored_count(),
            InputCategory::Scroll => self.scroll.stored_count(),
            InputCategory::FileDrop => self.file_drop.stored_count(),
        }
    }

    /// Record one backend delivery into its category buffer
    ///
    /// Returns `false` when the category is not armed.
    pub fn record(&mut self, record: InputEventRecord) -> bool {
        let category = record.category();
        let stored = match record {
            InputEventRecord::Key(event) => self.key.record(event),
            InputEventRecord::Character(event) => self.character.record(event),
            InputEventRecord::CursorPosition(event) => self.cursor_position.record(event),
            InputEventRecord::CursorEnter(event) => self.cursor_enter.record(event),
            InputEventRecord::MouseButton(event) => self.mouse_button.record(event),
            InputEventRecord::Scroll(event) => self.scroll.record(event),
            InputEventRecord::FileDrop(event) => self.file_drop.record(event),
        };

        if !stored {
            log::trace!("Dropped {:?} event for unarmed category", category);
        }
        stored
    }

    /// Record a typed event
    pub fn record_event<E: InputEvent>(&mut self, event: E) -> bool {
        E::buffer_mut(self).record(event)
    }

    /// Copy of the stored events of one category
    pub fn drain<E: InputEvent>(&self) -> Vec<E> {
        E::buffer(self).drain()
    }

    /// Reset every armed buffer to an empty, default-capacity state
    pub fn clear_all(&mut self) {
        self.key.clear();
        self.character.clear();
        self.cursor_position.clear();
        self.cursor_enter.clear();
        self.mouse_button.clear();
        self.scroll.clear();
        self.file_drop.clear();
    }

    /// Disarm every category and release storage
    pub fn disarm_all(&mut self) {
        self.key.disarm();
        self.character.disarm();
        self.cursor_position.disarm();
        self.cursor_enter.disarm();
        self.mouse_button.disarm();
        self.scroll.disarm();
        self.file_drop.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: i32) -> KeyEvent {
        KeyEvent {
            key: code,
            scancode: code + 100,
            action: ACTION_PRESS,
            modifiers: Modifiers::empty(),
        }
    }

    #[test]
    fn test_record_routes_to_category() {
        let mut buffers = InputBuffers::new();
        buffers.arm(InputCategory::Key);
        buffers.arm(InputCategory::Scroll);

        assert!(buffers.record(InputEventRecord::Key(key(65))));
        assert!(buffers.record(InputEventRecord::Scroll(ScrollEvent { x_offset: 0.0, y_offset: 1.0 })));

        assert_eq!(buffers.drain::<KeyEvent>(), vec![key(65)]);
        assert_eq!(buffers.stored_count(InputCategory::Scroll), 1);
        assert_eq!(buffers.stored_count(InputCategory::Character), 0);
    }

    #[test]
    fn test_unarmed_category_drops_records() {
        let mut buffers = InputBuffers::new();

        assert!(!buffers.record(InputEventRecord::CursorEnter(CursorEnterEvent { entered: true })));
        assert!(buffers.drain::<CursorEnterEvent>().is_empty());
    }

    #[test]
    fn test_clear_all_keeps_categories_armed() {
        let mut buffers = InputBuffers::new();
        for category in InputCategory::ALL {
            buffers.arm(category);
        }
        buffers.record_event(key(1));
        buffers.record_event(CharacterEvent { codepoint: 'x' as u32 });

        buffers.clear_all();

        for category in InputCategory::ALL {
            assert!(buffers.is_armed(category));
            assert_eq!(buffers.stored_count(category), 0);
        }
        assert!(buffers.record_event(key(2)));
    }

    #[test]
    fn test_disarm_all() {
        let mut buffers = InputBuffers::new();
        buffers.arm(InputCategory::FileDrop);
        buffers.disarm_all();

        assert!(!buffers.is_armed(InputCategory::FileDrop));
        assert!(!buffers.record_event(FileDropEvent { paths: Vec::new() }));
    }
}
