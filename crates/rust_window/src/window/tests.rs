use std::cell::RefCell;
use std::rc::Rc;

use ash::vk::{self, Handle};

use super::*;
use crate::backend::{HeadlessBackend, IconImage, IntHint, StringHint, WindowAttribute, WindowHints};
use crate::foundation::geometry::{Area, Coordinate};
use crate::input::{
    CharacterEvent, CursorPositionEvent, FileDropEvent, InputCategory, InputEventRecord, KeyEvent,
    Modifiers, ScrollEvent, ACTION_PRESS, ACTION_RELEASE, INPUT_BUFFER_INITIAL_CAPACITY,
};

fn context_with_scale(scale: f32) -> (WindowContext, Rc<RefCell<Vec<u32>>>) {
    let context = WindowContext::new(HeadlessBackend::new().with_content_scale(scale));
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    context.set_error_callback(move |code, _| sink.borrow_mut().push(code));
    (context, errors)
}

fn headless_context() -> (WindowContext, Rc<RefCell<Vec<u32>>>) {
    context_with_scale(1.0)
}

fn push(context: &WindowContext, window: &Window, record: InputEventRecord) {
    let handle = window.native_handle().expect("window is created");
    context
        .backend_as_mut::<HeadlessBackend>()
        .expect("headless backend")
        .push_input(handle, record);
}

fn key(code: i32, action: i32) -> InputEventRecord {
    InputEventRecord::Key(KeyEvent {
        key: code,
        scancode: 0,
        action,
        modifiers: Modifiers::SHIFT,
    })
}

#[test]
fn test_create_sets_windowed_mode_and_geometry() {
    let (context, errors) = headless_context();
    let window = context
        .create_window(&WindowDescriptor::new(800, 600, "Viewer"))
        .expect("create");

    assert!(window.is_created());
    assert_eq!(window.display_mode(), DisplayMode::Windowed);
    assert_eq!(window.size_in_screen_coordinates(), Area::new(800, 600));
    assert_eq!(window.saved_geometry().size, Area::new(800, 600));
    assert_eq!(window.title(), "Viewer");
    assert!(errors.borrow().is_empty());
}

#[test]
fn test_create_passes_class_and_instance_names() {
    let (context, _) = headless_context();
    let hints = WindowHints::default().with_flag(IntHint::Decorated, false);
    let window = context
        .create_window(
            &WindowDescriptor::new(320, 200, "Tool")
                .with_class_name("tools")
                .with_hints(hints),
        )
        .expect("create");

    let backend = context.backend_as::<HeadlessBackend>().expect("headless backend");
    assert_eq!(backend.string_hint(StringHint::X11ClassName), Some("tools"));
    assert_eq!(backend.string_hint(StringHint::X11InstanceName), Some("Tool"));
    drop(backend);
    assert!(!window.is_decorated());
}

#[test]
fn test_second_create_reports_already_created() {
    let (context, errors) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(640, 480, "Once"))
        .expect("create");
    let handle = window.native_handle();

    let result = window.create(&WindowDescriptor::new(640, 480, "Twice"));

    assert_eq!(result, Err(WindowError::AlreadyCreated));
    assert_eq!(window.native_handle(), handle);
    assert_eq!(window.title(), "Once");
    assert_eq!(errors.borrow().as_slice(), &[0x0001_1001]);
}

#[test]
fn test_create_rejects_empty_dimensions() {
    let (context, errors) = headless_context();

    let result = context.create_window(&WindowDescriptor::new(0, 480, "Empty"));

    assert_eq!(result.err(), Some(WindowError::InvalidDimensions));
    assert_eq!(errors.borrow().as_slice(), &[0x0001_1002]);
}

#[test]
fn test_create_reports_backend_failure() {
    let (context, errors) = headless_context();
    context
        .backend_as_mut::<HeadlessBackend>()
        .expect("headless backend")
        .refuse_window_creation(true);

    let result = context.create_window(&WindowDescriptor::new(640, 480, "Refused"));

    assert_eq!(result.err(), Some(WindowError::CreationFailed));
    assert_eq!(errors.borrow().as_slice(), &[0x0001_1006]);
}

#[test]
fn test_share_window_must_exist() {
    let (context, errors) = headless_context();
    let parent = Window::new(&context);

    let result = context.create_window(&WindowDescriptor::new(640, 480, "Child").with_share(&parent));

    assert_eq!(result.err(), Some(WindowError::ParentNotCreated));
    assert_eq!(errors.borrow().as_slice(), &[0x0001_1004]);
}

#[test]
fn test_create_full_screen_on_monitor() {
    let (context, _) = headless_context();
    let monitor = context.primary_monitor();

    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "Game").with_full_screen(&monitor))
        .expect("create");

    assert_eq!(window.display_mode(), DisplayMode::FullScreen);
    assert_eq!(window.size_in_screen_coordinates(), Area::new(1920, 1080));

    window.restore().expect("restore");
    assert_eq!(window.display_mode(), DisplayMode::Windowed);
}

#[test]
fn test_uncreated_window_reports_and_returns_sentinels() {
    let (context, errors) = headless_context();
    let mut window = Window::new(&context);

    assert_eq!(window.position(), Coordinate::new(-1, -1));
    assert_eq!(window.size(), Area::new(-1, -1));
    assert_eq!(window.framebuffer_size(), Area::new(-1, -1));
    assert_eq!(window.content_scale(), Coordinate::new(-1.0, -1.0));
    assert!(!window.is_focused());
    assert_eq!(window.set_position(Coordinate::new(5, 5)), Err(WindowError::NotCreated));
    assert_eq!(window.arm(InputCategory::Key), Err(WindowError::NotCreated));
    assert_eq!(window.full_screen(&context.primary_monitor()), Err(WindowError::NotCreated));

    assert_eq!(errors.borrow().len(), 8);
    assert!(errors.borrow().iter().all(|code| *code == 0x0001_1003));
    assert_eq!(window.display_mode(), DisplayMode::NotCreated);
    assert_eq!(context.backend_as::<HeadlessBackend>().map(|b| b.window_count()), Some(0));
}

#[test]
fn test_full_screen_round_trip_restores_geometry() {
    let (context, _) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "Round trip"))
        .expect("create");
    window.set_position(Coordinate::new(100, 100)).expect("move");

    window.full_screen(&context.primary_monitor()).expect("full screen");
    assert_eq!(window.display_mode(), DisplayMode::FullScreen);
    assert_eq!(window.size_in_screen_coordinates(), Area::new(1920, 1080));

    window.exit_full_screen().expect("exit full screen");
    assert_eq!(window.display_mode(), DisplayMode::Windowed);
    assert_eq!(window.position(), Coordinate::new(100, 100));
    assert_eq!(window.size(), Area::new(800, 600));
}

#[test]
fn test_full_screen_twice_keeps_first_snapshot() {
    let (context, _) = headless_context();
    let monitor = context.primary_monitor();
    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "Twice"))
        .expect("create");

    window.full_screen(&monitor).expect("full screen");
    window.full_screen(&monitor).expect("already full screen");
    window.exit_full_screen().expect("exit");

    assert_eq!(window.size_in_screen_coordinates(), Area::new(800, 600));
}

#[test]
fn test_full_screen_requires_initialized_monitor() {
    let (context, errors) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "No monitor"))
        .expect("create");

    let result = window.full_screen(&Monitor::uninitialized());

    assert_eq!(result, Err(WindowError::ParentNotCreated));
    assert_eq!(window.display_mode(), DisplayMode::Windowed);
    assert_eq!(errors.borrow().as_slice(), &[0x0001_1004]);
}

#[test]
fn test_exit_full_screen_to_converts_pixels() {
    let (context, _) = context_with_scale(2.0);
    let mut window = context
        .create_window(&WindowDescriptor::new(400, 300, "HiDPI"))
        .expect("create");
    window.full_screen(&context.primary_monitor()).expect("full screen");

    window
        .exit_full_screen_to(Coordinate::new(200, 100), Area::new(1280, 720))
        .expect("exit");

    assert_eq!(window.position_in_screen_coordinates(), Coordinate::new(100, 50));
    assert_eq!(window.size_in_screen_coordinates(), Area::new(640, 360));
    assert_eq!(window.size(), Area::new(1280, 720));
}

#[test]
fn test_exit_full_screen_when_windowed_is_noop() {
    let (context, errors) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "Windowed"))
        .expect("create");

    window
        .exit_full_screen_to(Coordinate::new(1, 1), Area::new(10, 10))
        .expect("no-op");

    assert_eq!(window.size_in_screen_coordinates(), Area::new(800, 600));
    assert!(errors.borrow().is_empty());
}

#[test]
fn test_minimize_then_restore() {
    let (context, _) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "Minimize"))
        .expect("create");

    window.minimize().expect("minimize");
    assert_eq!(window.display_mode(), DisplayMode::Minimized);
    assert!(window.attribute(WindowAttribute::Iconified));

    window.restore().expect("restore");
    assert_eq!(window.display_mode(), DisplayMode::Windowed);
    assert!(!window.attribute(WindowAttribute::Iconified));
}

#[test]
fn test_restore_after_minimized_full_screen_detaches() {
    let (context, _) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "Detach"))
        .expect("create");
    window.set_position(Coordinate::new(100, 100)).expect("move");
    window.full_screen(&context.primary_monitor()).expect("full screen");

    window.minimize().expect("minimize");
    window.restore().expect("restore");

    assert_eq!(window.display_mode(), DisplayMode::Windowed);
    assert_eq!(window.position(), Coordinate::new(100, 100));
    assert_eq!(window.size(), Area::new(800, 600));
    let handle = window.native_handle().expect("created");
    let backend = context.backend_as::<HeadlessBackend>().expect("headless backend");
    assert_eq!(backend.window(handle).and_then(|state| state.monitor), None);
}

#[test]
fn test_maximize_in_full_screen_is_noop() {
    let (context, _) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "Maximize"))
        .expect("create");
    window.full_screen(&context.primary_monitor()).expect("full screen");

    window.maximize().expect("no-op");
    assert_eq!(window.display_mode(), DisplayMode::FullScreen);

    window.restore().expect("restore");
    window.maximize().expect("maximize");
    assert_eq!(window.display_mode(), DisplayMode::Maximized);
    assert!(window.attribute(WindowAttribute::Maximized));
}

#[test]
fn test_geometry_round_trip_at_common_scales() {
    for scale in [1.0, 1.25, 2.0] {
        let (context, errors) = context_with_scale(scale);
        let mut window = context
            .create_window(&WindowDescriptor::new(640, 480, "Scaled"))
            .expect("create");

        window.set_position(Coordinate::new(200, 150)).expect("move");
        window.set_size(Area::new(1000, 800)).expect("resize");

        assert_eq!(window.position(), Coordinate::new(200, 150));
        assert_eq!(window.size(), Area::new(1000, 800));
        assert_eq!(window.content_scale(), Coordinate::new(scale, scale));
        assert!(errors.borrow().is_empty());
    }
}

#[test]
fn test_size_limits_are_converted() {
    let (context, _) = context_with_scale(2.0);
    let mut window = context
        .create_window(&WindowDescriptor::new(640, 480, "Limits"))
        .expect("create");
    let handle = window.native_handle().expect("created");

    window.set_minimum_size(Area::new(200, 100)).expect("minimum");
    assert_eq!(
        context.backend_as::<HeadlessBackend>().and_then(|b| b.window(handle).map(|w| w.size_limits)),
        Some((Some(Area::new(100, 50)), None))
    );

    window
        .set_size_limits(Some(Area::new(200, 100)), Some(Area::new(4000, 2000)))
        .expect("limits");
    assert_eq!(
        context.backend_as::<HeadlessBackend>().and_then(|b| b.window(handle).map(|w| w.size_limits)),
        Some((Some(Area::new(100, 50)), Some(Area::new(2000, 1000))))
    );
}

#[test]
fn test_framebuffer_size_is_physical() {
    let (context, _) = context_with_scale(2.0);
    let window = context
        .create_window(&WindowDescriptor::new(640, 480, "Framebuffer"))
        .expect("create");

    assert_eq!(window.framebuffer_size(), Area::new(1280, 960));
}

#[test]
fn test_armed_input_is_drained_in_order() {
    let (context, _) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(640, 480, "Input"))
        .expect("create");
    window.arm(InputCategory::Key).expect("arm");

    let count = INPUT_BUFFER_INITIAL_CAPACITY * 2 + 7;
    for code in 0..count {
        push(&context, &window, key(i32::try_from(code).expect("small"), ACTION_PRESS));
    }
    assert_eq!(context.poll_events(), count);

    let keys = window.key_events();
    assert_eq!(keys.len(), count);
    assert_eq!(keys.first().map(|event| event.key), Some(0));
    assert!(keys.iter().enumerate().all(|(index, event)| usize::try_from(event.key) == Ok(index)));
    assert_eq!(window.key_events(), keys);
}

#[test]
fn test_unarmed_categories_stay_empty() {
    let (context, _) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(640, 480, "Unarmed"))
        .expect("create");
    window.arm(InputCategory::Scroll).expect("arm");

    push(&context, &window, InputEventRecord::Scroll(ScrollEvent { x_offset: 0.0, y_offset: 2.0 }));
    push(&context, &window, InputEventRecord::Character(CharacterEvent { codepoint: 'q' as u32 }));
    context.poll_events();

    assert!(window.character_events().is_empty());
    assert!(window.cursor_position_events().is_empty());
    assert_eq!(window.scroll_events(), vec![ScrollEvent { x_offset: 0.0, y_offset: 2.0 }]);
}

#[test]
fn test_clear_input_buffers_between_frames() {
    let (context, _) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(640, 480, "Frames"))
        .expect("create");
    window.arm_all().expect("arm all");

    push(&context, &window, key(65, ACTION_PRESS));
    push(&context, &window, InputEventRecord::CursorPosition(CursorPositionEvent { x: 1.5, y: 2.5 }));
    context.poll_events();
    assert_eq!(window.stored_events(InputCategory::Key), 1);

    window.clear_input_buffers();
    assert!(window.key_events().is_empty());
    assert!(window.cursor_position_events().is_empty());

    push(&context, &window, key(65, ACTION_RELEASE));
    context.poll_events();
    assert_eq!(window.key_events().len(), 1);
    assert_eq!(window.key_events()[0].action, ACTION_RELEASE);
}

#[test]
fn test_input_is_routed_to_its_window() {
    let (context, _) = headless_context();
    let mut first = context
        .create_window(&WindowDescriptor::new(640, 480, "First"))
        .expect("create");
    let mut second = context
        .create_window(&WindowDescriptor::new(640, 480, "Second"))
        .expect("create");
    first.arm(InputCategory::FileDrop).expect("arm");
    second.arm(InputCategory::FileDrop).expect("arm");

    let drop_event = FileDropEvent { paths: vec!["scene.ron".into()] };
    push(&context, &second, InputEventRecord::FileDrop(drop_event.clone()));
    context.poll_events();

    assert!(first.file_drop_events().is_empty());
    assert_eq!(second.file_drop_events(), vec![drop_event]);
}

#[test]
fn test_destroy_is_idempotent_and_unregisters() {
    let (context, errors) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(640, 480, "Destroy"))
        .expect("create");
    window.arm(InputCategory::Key).expect("arm");
    assert_eq!(context.registered_windows(), 1);

    window.destroy();
    window.destroy();

    assert_eq!(window.display_mode(), DisplayMode::NotCreated);
    assert!(!window.is_armed(InputCategory::Key));
    assert_eq!(context.registered_windows(), 0);
    assert_eq!(context.backend_as::<HeadlessBackend>().map(|b| b.window_count()), Some(0));
    assert!(errors.borrow().is_empty());

    window
        .create(&WindowDescriptor::new(320, 240, "Again"))
        .expect("recreate");
    assert!(!window.is_armed(InputCategory::Key));
}

#[test]
fn test_drop_releases_native_window() {
    let (context, _) = headless_context();
    {
        let _window = context
            .create_window(&WindowDescriptor::new(640, 480, "Scoped"))
            .expect("create");
        assert_eq!(context.backend_as::<HeadlessBackend>().map(|b| b.window_count()), Some(1));
    }

    assert_eq!(context.backend_as::<HeadlessBackend>().map(|b| b.window_count()), Some(0));
    assert_eq!(context.registered_windows(), 0);
}

#[test]
fn test_surface_is_created_once() {
    let (context, errors) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(640, 480, "Surface"))
        .expect("create");
    let instance = vk::Instance::from_raw(1);

    let surface = window.create_surface(instance).expect("surface");
    assert_eq!(window.surface(), Some(surface));

    assert_eq!(window.create_surface(instance), Err(WindowError::SurfaceAlreadyCreated));
    assert_eq!(errors.borrow().as_slice(), &[0x0001_1005]);

    window.destroy();
    assert_eq!(window.surface(), None);
}

#[test]
fn test_close_request_round_trip() {
    let (context, _) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(640, 480, "Close"))
        .expect("create");

    assert!(!window.should_close());
    window.close().expect("close");
    assert!(window.should_close());
    window.cancel_close().expect("cancel");
    assert!(!window.should_close());
}

#[test]
fn test_window_properties_reach_backend() {
    let (context, errors) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(640, 480, "Properties"))
        .expect("create");
    let handle = window.native_handle().expect("created");

    window.set_title("Renamed").expect("title");
    window.set_opacity(1.5).expect("opacity");
    window.set_aspect_ratio(16, 9).expect("aspect");
    window.set_floating(true).expect("floating");
    window.hide().expect("hide");
    window.swap_buffers().expect("swap");
    assert_eq!(window.set_aspect_ratio(16, 0), Err(WindowError::InvalidDimensions));

    let backend = context.backend_as::<HeadlessBackend>().expect("headless backend");
    let state = backend.window(handle).expect("window state");
    assert_eq!(state.title, "Renamed");
    approx::assert_relative_eq!(state.opacity, 1.0);
    assert_eq!(state.aspect_ratio, Some((16, 9)));
    assert_eq!(state.swap_count, 1);
    drop(backend);

    assert!(window.is_floating());
    assert!(!window.is_visible());
    assert_eq!(errors.borrow().as_slice(), &[0x0001_1002]);
}

#[test]
fn test_uncreated_window_conversions_report_not_created() {
    let (context, errors) = headless_context();
    let window = Window::new(&context);

    assert_eq!(window.pixel_to_screen_coordinate(Coordinate::new(10, 10)), Coordinate::new(-1, -1));
    assert_eq!(window.screen_coordinate_to_pixel(Coordinate::new(10, 10)), Coordinate::new(-1, -1));
    assert_eq!(
        window.screen_coordinate_to_pixel(Coordinate::new(2.5_f64, 4.0)),
        Coordinate::new(-1.0, -1.0)
    );
    assert_eq!(*errors.borrow(), vec![0x0001_1003; 3]);
}

#[test]
fn test_created_window_conversions_use_content_scale() {
    let (context, errors) = context_with_scale(2.0);
    let window = context
        .create_window(&WindowDescriptor::new(640, 480, "Convert"))
        .expect("create");

    assert_eq!(window.pixel_to_screen_coordinate(Coordinate::new(10, 30)), Coordinate::new(5, 15));
    assert_eq!(window.screen_coordinate_to_pixel(Coordinate::new(5, 15)), Coordinate::new(10, 30));
    assert!(errors.borrow().is_empty());
}

#[test]
fn test_malformed_icon_is_rejected_before_backend() {
    let (context, errors) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(320, 240, "Icon"))
        .expect("create");
    let handle = window.native_handle().expect("window is created");
    let malformed = IconImage {
        width: 256,
        height: 256,
        pixels: vec![0; 4],
    };

    let result = window.set_icon_images(&[malformed]);

    assert!(matches!(result, Err(WindowError::IconLoadFailed(_))));
    assert_eq!(*errors.borrow(), vec![0x0001_1007]);
    let backend = context.backend_as::<HeadlessBackend>().expect("headless backend");
    assert!(backend.window(handle).expect("headless window").icons.is_empty());
}

#[test]
fn test_well_formed_icons_reach_backend() {
    let (context, errors) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(320, 240, "Icon"))
        .expect("create");
    let handle = window.native_handle().expect("window is created");
    let icon = IconImage {
        width: 1,
        height: 2,
        pixels: vec![255; 8],
    };

    window.set_icon_images(&[icon.clone()]).expect("set icon");

    assert!(errors.borrow().is_empty());
    let backend = context.backend_as::<HeadlessBackend>().expect("headless backend");
    assert_eq!(backend.window(handle).expect("headless window").icons, vec![icon]);
}

#[test]
fn test_full_screen_then_restore_keeps_geometry_at_fractional_scale() {
    let (context, errors) = context_with_scale(1.25);
    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "Restore"))
        .expect("create");
    window.set_position(Coordinate::new(100, 100)).expect("move");
    let position = window.position();
    let size = window.size();
    assert_eq!(size, Area::new(1000, 750));

    window.full_screen(&context.primary_monitor()).expect("full screen");
    assert_eq!(window.display_mode(), DisplayMode::FullScreen);
    window.restore().expect("restore");

    assert_eq!(window.display_mode(), DisplayMode::Windowed);
    assert_eq!(window.position(), position);
    assert_eq!(window.size(), size);
    assert!(errors.borrow().is_empty());
}

#[test]
fn test_restore_from_full_screen_clears_native_maximize() {
    let (context, errors) = headless_context();
    let mut window = context
        .create_window(&WindowDescriptor::new(800, 600, "Maximized"))
        .expect("create");
    window.maximize().expect("maximize");
    assert!(window.attribute(WindowAttribute::Maximized));

    window.full_screen(&context.primary_monitor()).expect("full screen");
    window.restore().expect("restore");

    assert_eq!(window.display_mode(), DisplayMode::Windowed);
    assert!(!window.attribute(WindowAttribute::Maximized));
    assert!(errors.borrow().is_empty());
}
