//! Window demo application
//!
//! Opens a glfw window, arms the configured input categories and logs every
//! buffered event once per frame. F11 toggles full screen, Escape quits.
//!
//! Usage: `window_demo [settings.toml|settings.ron]`

use glfw::Key;
use rust_window::foundation::logging;
use rust_window::input::ACTION_PRESS;
use rust_window::prelude::*;

struct DemoApp {
    context: WindowContext,
    window: Window,
    frame: u64,
}

impl DemoApp {
    fn new(settings: &WindowSettings) -> Result<Self, Box<dyn std::error::Error>> {
        let context = WindowContext::glfw()?;

        let mut window = context.create_window(&settings.descriptor())?;
        for category in &settings.armed_inputs {
            window.arm(*category)?;
        }
        if settings.full_screen {
            window.full_screen(&context.primary_monitor())?;
        }

        log::info!(
            "Window ready: {:?} at {:?}, content scale {:?}",
            window.size(),
            window.position(),
            window.content_scale()
        );
        Ok(Self {
            context,
            window,
            frame: 0,
        })
    }

    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        while !self.window.should_close() {
            self.window.clear_input_buffers();
            self.context.poll_events();
            self.handle_keys()?;
            self.log_input();
            self.frame += 1;
        }

        log::info!("Closing after {} frames", self.frame);
        Ok(())
    }

    fn handle_keys(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        for event in self.window.key_events() {
            if event.action != ACTION_PRESS {
                continue;
            }
            if event.key == Key::Escape as i32 {
                self.window.close()?;
            } else if event.key == Key::F11 as i32 {
                self.toggle_full_screen()?;
            }
        }
        Ok(())
    }

    fn toggle_full_screen(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.window.display_mode() == DisplayMode::FullScreen {
            self.window.exit_full_screen()?;
        } else {
            self.window.full_screen(&self.context.primary_monitor())?;
        }
        log::info!("Display mode is now {:?}", self.window.display_mode());
        Ok(())
    }

    fn log_input(&self) {
        for event in self.window.key_events() {
            log::debug!("key {:?}", event);
        }
        for event in self.window.character_events() {
            log::debug!("character {:?}", event.as_char());
        }
        for event in self.window.cursor_position_events() {
            log::trace!("cursor at ({:.1}, {:.1})", event.x, event.y);
        }
        for event in self.window.cursor_enter_events() {
            log::debug!("cursor {}", if event.entered { "entered" } else { "left" });
        }
        for event in self.window.mouse_button_events() {
            log::debug!("mouse button {:?}", event);
        }
        for event in self.window.scroll_events() {
            log::debug!("scroll ({}, {})", event.x_offset, event.y_offset);
        }
        for event in self.window.file_drop_events() {
            log::info!("dropped {:?}", event.paths);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = match std::env::args().nth(1) {
        Some(path) => WindowSettings::load_from_file(path)?,
        None => WindowSettings::default().with_title("Rust Window Demo"),
    };
    settings.validate()?;

    logging::init_with_level(&settings.log_level);
    log::info!("Starting window demo");

    let mut app = DemoApp::new(&settings)?;
    app.run()
}
