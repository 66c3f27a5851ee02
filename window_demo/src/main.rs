//! Window demo application
//!
//! Opens one GLFW window through the age windowing core and runs a main loop
//! until the window is closed. F11 toggles fullscreen, F2 toggles the window
//! between two sizes, and Escape requests a close.
//!
//! An optional `window_demo.toml` (or `.ron`) next to the working directory
//! overrides the default window and logging configuration.

use std::path::Path;

use age_window::core::config::{ApplicationConfig, Config};
use age_window::foundation::geometry::Rect;
use age_window::foundation::logging;
use age_window::platform::glfw::GlfwBackend;
use age_window::{Platform, ProcTable, WindowResult};
use glfw::Key;

const CONFIG_CANDIDATES: [&str; 2] = ["window_demo.toml", "window_demo.ron"];

/// Entry points the demo expects every context to export
const GL_FUNCTIONS: [&str; 3] = ["glClear", "glClearColor", "glViewport"];

fn load_config() -> ApplicationConfig {
    for candidate in CONFIG_CANDIDATES {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match ApplicationConfig::load_from_file(path).and_then(|config| config.validate().map(|()| config)) {
            Ok(config) => return config,
            Err(e) => eprintln!("Ignoring {candidate}: {e}"),
        }
    }
    ApplicationConfig::new("age window demo")
}

fn run(config: &ApplicationConfig) -> WindowResult<()> {
    let mut platform = Platform::initialize(GlfwBackend::new())?.with_device(ProcTable::new(GL_FUNCTIONS));
    let window = platform.create_window_from_config(&config.window)?;

    let small = Rect::new(config.window.x, config.window.y, 640, 480);
    let mut enlarged = false;

    platform
        .events(window)?
        .on_key_down(move |window, key, _alt| {
            if key == Key::Escape as i32 {
                window.close();
            } else if key == Key::F11 as i32 {
                let fullscreen = window.is_fullscreen();
                window.set_fullscreen(!fullscreen);
            } else if key == Key::F2 as i32 {
                enlarged = !enlarged;
                let rect = if enlarged {
                    Rect::new(small.x, small.y, 1280, 960)
                } else {
                    small
                };
                window.set_bounds(rect);
                log::info!("Bounds now {:?}", window.bounds());
            }
        })
        .on_mouse_button_down(|_, x, y, button, mode| {
            log::debug!("Button {button} down at ({x}, {y}) with {mode:?}");
        })
        .on_char_print(|window, code, _| {
            if let Some(c) = char::from_u32(code) {
                let title = format!("{} {c}", window.title());
                window.set_title(&title);
            }
        })
        .on_close(|window| log::info!("Window '{}' closing", window.title()));

    platform.make_current(window)?;
    log::info!("Entering main loop");

    while !platform.should_close(window) {
        platform.pump_events(window)?;
        platform.swap_buffers(window)?;
    }

    platform.destroy_window(window)?;
    log::info!("Window demo finished");
    Ok(())
}

fn main() {
    let config = load_config();
    logging::init_from_config(&config.platform);

    if let Err(e) = run(&config) {
        log::error!("Window demo failed: {e}");
        std::process::exit(1);
    }
}
