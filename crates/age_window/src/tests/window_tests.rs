use super::*;
use crate::core::config::WindowConfig;
use crate::foundation::geometry::Rect;
use crate::platform::backend::{NativeBackend, WindowStyle};

const SECOND_MONITOR: Rect = Rect::new(1920, 0, 2560, 1440);

#[test]
fn test_fullscreen_round_trip_restores_bounds() {
    let (mut platform, id) = platform_with_window();
    let mut window = platform.window_mut(id).unwrap();
    let before = window.bounds();

    window.set_fullscreen(true);
    assert!(window.is_fullscreen());
    assert_eq!(window.bounds(), MockBackend::DEFAULT_MONITOR);

    window.set_fullscreen(false);
    assert!(!window.is_fullscreen());
    assert_eq!(window.bounds(), before);
}

#[test]
fn test_fullscreen_restores_decoration() {
    let (mut platform, id) = platform_with_window();
    let handle = handle_of(&platform, id);
    let before = platform.backend().style(handle);

    platform.window_mut(id).unwrap().set_fullscreen(true);
    platform.window_mut(id).unwrap().set_fullscreen(false);

    assert_eq!(platform.backend().style(handle), before);
}

#[test]
fn test_windowed_set_bounds_applies_immediately() {
    let (mut platform, id) = platform_with_window();
    let rect = Rect::new(50, 60, 1024, 768);

    let mut window = platform.window_mut(id).unwrap();
    window.set_bounds(rect);

    assert_eq!(window.bounds(), rect);
    assert_eq!(window.saved_layout().rect, rect);
}

#[test]
fn test_fullscreen_set_bounds_is_deferred() {
    let (mut platform, id) = platform_with_window();
    let rect = Rect::new(200, 150, 640, 480);

    let mut window = platform.window_mut(id).unwrap();
    window.set_fullscreen(true);
    let fullscreen_bounds = window.bounds();

    window.set_bounds(rect);
    assert_eq!(window.bounds(), fullscreen_bounds);

    window.set_fullscreen(false);
    assert_eq!(window.bounds(), rect);
}

#[test]
fn test_set_visible_twice_makes_one_native_call() {
    let (mut platform, id) = platform_with_window();
    platform.backend_mut().reset_calls();

    let mut window = platform.window_mut(id).unwrap();
    window.set_visible(true);
    window.set_visible(true);
    assert!(window.is_visible());
    assert_eq!(platform.backend().call_count("set_visible"), 1);

    let mut window = platform.window_mut(id).unwrap();
    window.set_visible(false);
    window.set_visible(false);
    assert_eq!(platform.backend().call_count("set_visible"), 2);
}

#[test]
fn test_visibility_leaves_geometry_alone() {
    let (mut platform, id) = platform_with_window();
    let handle = handle_of(&platform, id);
    let bounds = platform.window_mut(id).unwrap().bounds();

    platform.window_mut(id).unwrap().set_visible(true);

    assert_eq!(platform.window_mut(id).unwrap().bounds(), bounds);
    assert!(platform.backend().style(handle).contains(WindowStyle::DECORATED));
}

#[test]
fn test_maximized_state_survives_fullscreen() {
    let (mut platform, id) = platform_with_window();
    let handle = handle_of(&platform, id);
    platform.backend_mut().set_maximized(handle, true);

    platform.window_mut(id).unwrap().set_fullscreen(true);
    assert!(!platform.backend().is_maximized(handle));
    assert_eq!(platform.window_mut(id).unwrap().bounds(), MockBackend::DEFAULT_MONITOR);

    platform.window_mut(id).unwrap().set_fullscreen(false);
    assert!(platform.backend().is_maximized(handle));
}

#[test]
fn test_deferred_bounds_drop_maximized_memory() {
    let (mut platform, id) = platform_with_window();
    let handle = handle_of(&platform, id);
    platform.backend_mut().set_maximized(handle, true);
    let rect = Rect::new(10, 10, 500, 400);

    let mut window = platform.window_mut(id).unwrap();
    window.set_fullscreen(true);
    window.set_bounds(rect);
    window.set_fullscreen(false);

    assert!(!platform.backend().is_maximized(handle));
    assert_eq!(platform.window_mut(id).unwrap().bounds(), rect);
}

#[test]
fn test_fullscreen_uses_monitor_at_transition_time() {
    let backend = MockBackend::new().with_monitors(vec![MockBackend::DEFAULT_MONITOR, SECOND_MONITOR]);
    let mut platform = platform_over(backend);
    let id = platform.create_window("moved", 100, 100, 800, 600).unwrap();
    let handle = handle_of(&platform, id);

    // Dragged onto the second monitor after creation.
    platform.backend_mut().move_window(handle, Rect::new(2000, 100, 816, 639));

    platform.window_mut(id).unwrap().set_fullscreen(true);
    assert_eq!(platform.window_mut(id).unwrap().bounds(), SECOND_MONITOR);

    platform.window_mut(id).unwrap().set_fullscreen(false);
    assert_eq!(platform.window_mut(id).unwrap().bounds(), Rect::new(2000, 100, 816, 639));
}

#[test]
fn test_fullscreen_unchanged_makes_no_native_calls() {
    let (mut platform, id) = platform_with_window();
    platform.window_mut(id).unwrap().set_fullscreen(true);
    platform.backend_mut().reset_calls();

    platform.window_mut(id).unwrap().set_fullscreen(true);
    assert!(platform.backend().calls().is_empty());
}

#[test]
fn test_inner_bounds_exclude_frame() {
    let (mut platform, id) = platform_with_window();
    let window = platform.window_mut(id).unwrap();

    assert_eq!(window.inner_bounds(), Rect::new(108, 131, 800, 600));
    assert_eq!(window.bounds(), Rect::new(100, 100, 816, 639));
}

#[test]
fn test_set_title_reaches_native_window() {
    let (mut platform, id) = platform_with_window();
    let handle = handle_of(&platform, id);

    platform.window_mut(id).unwrap().set_title("renamed");

    assert_eq!(platform.window(id).unwrap().title(), "renamed");
    assert_eq!(platform.backend().window(handle).unwrap().title, "renamed");
}

#[test]
fn test_window_from_config_applies_flags() {
    let mut platform = platform();
    let config = WindowConfig::new("configured").with_fullscreen(true);

    let id = platform.create_window_from_config(&config).unwrap();
    let window = platform.window_mut(id).unwrap();

    assert!(window.is_visible());
    assert!(window.is_fullscreen());
    assert_eq!(window.bounds(), MockBackend::DEFAULT_MONITOR);
    assert_eq!(window.title(), "configured");
}

#[test]
fn test_new_window_starts_hidden() {
    let (platform, id) = platform_with_window();
    let handle = handle_of(&platform, id);

    assert!(!platform.window(id).unwrap().is_visible());
    assert!(!platform.backend().style(handle).contains(WindowStyle::VISIBLE));
}
