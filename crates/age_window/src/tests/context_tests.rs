use super::*;
use crate::error::WindowError;

#[test]
fn test_make_current_twice_attaches_once() {
    let (mut platform, id) = platform_with_window();
    platform.backend_mut().reset_calls();

    platform.make_current(id).unwrap();
    platform.make_current(id).unwrap();

    assert_eq!(platform.current_window(), Some(id));
    assert_eq!(platform.backend().call_count("make_current"), 1);
}

#[test]
fn test_make_current_switches_windows() {
    let mut platform = platform();
    let first = platform.create_window("first", 0, 0, 320, 240).unwrap();
    let second = platform.create_window("second", 400, 0, 320, 240).unwrap();

    platform.make_current(first).unwrap();
    platform.make_current(second).unwrap();

    assert_eq!(platform.current_window(), Some(second));
    assert_eq!(platform.backend().current_context(), Some(handle_of(&platform, second)));
}

#[test]
fn test_attach_failure_keeps_register() {
    let mut platform = platform();
    let first = platform.create_window("first", 0, 0, 320, 240).unwrap();
    let second = platform.create_window("second", 400, 0, 320, 240).unwrap();
    platform.make_current(first).unwrap();

    platform.backend_mut().set_fail_make_current(true);
    let result = platform.make_current(second);

    assert!(matches!(result, Err(WindowError::Context(_))));
    assert_eq!(platform.current_window(), Some(first));
}

#[test]
fn test_functions_resolved_once_per_context() {
    let attempts = counter();
    let mut platform = platform().with_device(CountingDevice {
        names: vec!["glClear", "glViewport"],
        attempts: Rc::clone(&attempts),
    });
    let first = platform.create_window("first", 0, 0, 320, 240).unwrap();
    let second = platform.create_window("second", 400, 0, 320, 240).unwrap();

    platform.make_current(first).unwrap();
    platform.make_current(second).unwrap();
    platform.make_current(first).unwrap();
    platform.make_current(second).unwrap();

    assert_eq!(attempts.get(), 2);
}

#[test]
fn test_resolution_failure_is_retried() {
    let attempts = counter();
    let mut platform = platform().with_device(CountingDevice {
        names: vec!["glClear", "glViewport"],
        attempts: Rc::clone(&attempts),
    });
    let id = platform.create_window("gl", 0, 0, 320, 240).unwrap();
    platform.backend_mut().set_missing_proc("glViewport", true);

    match platform.make_current(id) {
        Err(WindowError::Context(message)) => assert!(message.contains("glViewport")),
        other => panic!("expected context error, got {other:?}"),
    }
    assert_eq!(platform.current_window(), Some(id));

    platform.backend_mut().set_missing_proc("glViewport", false);
    platform.clear_current().unwrap();
    platform.make_current(id).unwrap();
    platform.clear_current().unwrap();
    platform.make_current(id).unwrap();

    assert_eq!(attempts.get(), 2);
}

#[test]
fn test_proc_table_device_resolves_through_window() {
    let mut platform = platform().with_device(crate::context::ProcTable::new(["glClear", "glFlush"]));
    let id = platform.create_window("gl", 0, 0, 320, 240).unwrap();
    platform.backend_mut().reset_calls();

    platform.make_current(id).unwrap();

    assert_eq!(platform.backend().call_count("proc_address"), 2);
}

#[test]
fn test_destroying_current_window_empties_register() {
    let mut platform = platform();
    let id = platform.create_window("current", 0, 0, 320, 240).unwrap();
    let next = platform.create_window("next", 400, 0, 320, 240).unwrap();
    platform.make_current(id).unwrap();

    platform.destroy_window(id).unwrap();

    assert_eq!(platform.current_window(), None);
    assert_eq!(platform.backend().current_context(), None);

    platform.backend_mut().reset_calls();
    platform.make_current(next).unwrap();

    let next_handle = handle_of(&platform, next);
    assert_eq!(platform.backend().call_count("make_current"), 1);
    assert_eq!(platform.current_window(), Some(next));
    assert_eq!(platform.backend().current_context(), Some(next_handle));
}

#[test]
fn test_destroy_releases_in_order() {
    let (mut platform, id) = platform_with_window();
    let handle = handle_of(&platform, id);
    platform.make_current(id).unwrap();
    platform.backend_mut().reset_calls();

    platform.destroy_window(id).unwrap();

    let calls = platform.backend().calls();
    let operations: Vec<&str> = calls.iter().map(|call| call.operation).collect();
    assert_eq!(
        operations,
        vec![
            "make_current",
            "release_render_context",
            "release_device_context",
            "destroy_window"
        ]
    );
    assert_eq!(calls[0].handle, None);
    assert_eq!(platform.backend().live_windows(), 0);
    assert_eq!(platform.window_for_handle(handle), None);
}

#[test]
fn test_destroying_other_window_keeps_context() {
    let mut platform = platform();
    let current = platform.create_window("current", 0, 0, 320, 240).unwrap();
    let other = platform.create_window("other", 400, 0, 320, 240).unwrap();
    platform.make_current(current).unwrap();
    platform.backend_mut().reset_calls();

    platform.destroy_window(other).unwrap();

    assert_eq!(platform.current_window(), Some(current));
    assert_eq!(platform.backend().call_count("make_current"), 0);
}

#[test]
fn test_destroyed_window_is_unknown() {
    let (mut platform, id) = platform_with_window();
    platform.destroy_window(id).unwrap();

    assert!(!platform.contains(id));
    assert!(matches!(platform.window_mut(id), Err(WindowError::UnknownWindow(_))));
    assert_eq!(platform.destroy_window(id), Err(WindowError::UnknownWindow(id)));
    assert_eq!(platform.make_current(id), Err(WindowError::UnknownWindow(id)));
    assert_eq!(platform.swap_buffers(id), Err(WindowError::UnknownWindow(id)));
}

#[test]
fn test_swap_buffers_reports_present_failure() {
    let (mut platform, id) = platform_with_window();
    platform.make_current(id).unwrap();

    platform.swap_buffers(id).unwrap();
    assert_eq!(platform.backend().call_count("swap_buffers"), 1);

    platform.backend_mut().set_fail_swap_buffers(true);
    assert!(matches!(platform.swap_buffers(id), Err(WindowError::Present(_))));
}

#[test]
fn test_failed_registration_prevents_platform() {
    logging::init_for_tests();
    let result = Platform::initialize(MockBackend::new().with_failing_registration());

    assert!(matches!(result, Err(WindowError::PlatformInit(_))));
}

#[test]
fn test_failed_creation_registers_nothing() {
    let mut platform = platform();
    platform.backend_mut().set_fail_window_creation(true);

    let result = platform.create_window("broken", 0, 0, 320, 240);

    assert!(matches!(result, Err(WindowError::WindowCreate(_))));
    assert_eq!(platform.window_ids().count(), 0);
    assert_eq!(platform.backend().live_windows(), 0);
}
