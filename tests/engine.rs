mod common;

use common::{config, init_logs, wait_until};
use orbit_input::backends::{VirtualDevice, Win32Backend, Win32Message, X11Backend, X11Event};
use orbit_input::{
    InputEngine, InputState, InputStateExt, KeyCode, MouseButton, RawSample, RuntimeExt,
};

#[test]
fn w_goes_pressed_held_released_without_touching_other_keys() {
    init_logs();
    let (keyboard, keys) = VirtualDevice::new("virtual-keyboard");
    let mut engine = InputEngine::builder(config(4)).keyboard(keyboard).build();
    engine.initialize().unwrap();

    keys.press(KeyCode::A);
    assert!(wait_until(|| engine.is_key_pressed(KeyCode::A)));
    engine.update();

    keys.press(KeyCode::W);
    assert!(wait_until(|| engine.is_key_pressed(KeyCode::W)));
    assert_eq!(engine.key_state(KeyCode::A), InputState::Held);

    engine.update();
    assert_eq!(engine.key_state(KeyCode::W), InputState::Held);

    keys.release(KeyCode::W);
    assert!(wait_until(|| engine.is_key_released(KeyCode::W)));
    assert_eq!(engine.key_state(KeyCode::A), InputState::Held);
    assert_eq!(engine.keys_down(), vec![KeyCode::A]);

    engine.shutdown();
}

#[test]
fn two_updates_without_samples_only_zero_the_deltas() {
    let mut engine = InputEngine::builder(config(1)).build();
    engine.submit(RawSample::key(KeyCode::Space, true));
    engine.submit(RawSample::button(MouseButton::Left, true));
    engine.submit(RawSample::MouseMove { x: 30, y: 40 });
    engine.submit(RawSample::Scroll { dx: 0.0, dy: 1.0 });

    engine.update();
    assert_eq!(engine.mouse_delta(), (30, 40));
    assert_eq!(engine.scroll_delta(), (0.0, 1.0));
    let keys = engine.keys_down();
    let left = engine.mouse_button_state(MouseButton::Left);

    engine.update();
    assert_eq!(engine.keys_down(), keys);
    assert_eq!(engine.key_state(KeyCode::Space), InputState::Held);
    assert_eq!(engine.mouse_button_state(MouseButton::Left), left);
    assert_eq!(engine.mouse_position(), (30, 40));
    assert_eq!(engine.mouse_delta(), (0, 0));
    assert_eq!(engine.scroll_delta(), (0.0, 0.0));
}

#[test]
fn pointer_motion_from_a_polling_thread() {
    let (pointer, feed) = VirtualDevice::new("virtual-pointer");
    let mut engine = InputEngine::builder(config(1)).pointer(pointer).build();
    engine.initialize().unwrap();

    feed.move_to(100, 100);
    feed.send(RawSample::MouseMotion { dx: -10, dy: 5 });
    feed.button(MouseButton::Middle, true);
    assert!(wait_until(|| engine.is_mouse_button_pressed(MouseButton::Middle)));
    assert_eq!(engine.mouse_position(), (90, 105));
    assert!(engine.events_processed() >= 3);

    engine.update();
    assert_eq!(engine.mouse_delta(), (90, 105));
    assert!(engine.is_mouse_button_held(MouseButton::Middle));
}

#[test]
fn native_events_through_the_push_path() {
    let engine = InputEngine::builder(config(1)).build();

    let down = Win32Message {
        msg: 0x0100,
        wparam: 0x57,
        lparam: 0,
    };
    assert!(engine.process_event(&Win32Backend, &down));
    assert!(engine.is_key_pressed(KeyCode::W));
    assert!(!engine.modifiers().any());

    let unknown = Win32Message {
        msg: 0x0010,
        wparam: 0,
        lparam: 0,
    };
    assert!(!engine.process_event(&Win32Backend, &unknown));

    // Left Shift en X11: keycode 50, máscara de Shift.
    assert!(engine.process_event(&X11Backend, &X11Event::key(true, 50, 0x1)));
    assert!(engine.modifiers().shift);
    assert!(engine.is_key_pressed(KeyCode::LeftShift));

    assert!(engine.process_event(&X11Backend, &X11Event::motion(12, 34)));
    assert_eq!(engine.mouse_position(), (12, 34));
}

fn win32_key(msg: u32, vk: usize, scancode: isize, extended: bool) -> Win32Message {
    let extended = if extended { 1 << 24 } else { 0 };
    Win32Message {
        msg,
        wparam: vk,
        lparam: (scancode << 16) | extended | 1,
    }
}

#[test]
fn win32_right_modifiers_keep_their_own_state() {
    const WM_KEYDOWN: u32 = 0x0100;
    const WM_KEYUP: u32 = 0x0101;
    let engine = InputEngine::builder(config(1)).build();

    assert!(engine.process_event(&Win32Backend, &win32_key(WM_KEYDOWN, 0x11, 0x1D, true)));
    assert_eq!(engine.key_state(KeyCode::RightCtrl), InputState::Pressed);
    assert_eq!(engine.key_state(KeyCode::LeftCtrl), InputState::Released);

    // Shift izquierdo abajo, Shift derecho abajo y arriba: el izquierdo sigue pulsado.
    engine.process_event(&Win32Backend, &win32_key(WM_KEYDOWN, 0x10, 0x2A, false));
    engine.process_event(&Win32Backend, &win32_key(WM_KEYDOWN, 0x10, 0x36, false));
    engine.process_event(&Win32Backend, &win32_key(WM_KEYUP, 0x10, 0x36, false));
    assert_eq!(engine.key_state(KeyCode::LeftShift), InputState::Pressed);
    assert_eq!(engine.key_state(KeyCode::RightShift), InputState::Released);
    assert!(engine.modifiers().shift);
    assert!(engine.modifiers().ctrl);
}

#[test]
fn reset_state_keeps_running() {
    let (keyboard, keys) = VirtualDevice::new("virtual-keyboard");
    let mut engine = InputEngine::builder(config(1)).keyboard(keyboard).build();
    engine.initialize().unwrap();

    keys.press(KeyCode::Escape);
    assert!(wait_until(|| engine.any_key_down()));
    engine.reset_state();
    assert!(!engine.any_key_down());
    assert!(engine.is_running());

    keys.press(KeyCode::Enter);
    assert!(wait_until(|| engine.is_key_pressed(KeyCode::Enter)));
}

#[test]
fn shutdown_is_idempotent_and_restart_reuses_backends() {
    init_logs();
    let (keyboard, keys) = VirtualDevice::new("virtual-keyboard");
    let mut engine = InputEngine::builder(config(2)).keyboard(keyboard).build();

    engine.shutdown();
    engine.initialize().unwrap();
    engine.initialize().unwrap();
    engine.shutdown();
    engine.shutdown();
    assert!(!engine.is_running());

    engine.restart().unwrap();
    keys.press(KeyCode::Tab);
    assert!(wait_until(|| engine.is_key_pressed(KeyCode::Tab)));
}

#[test]
fn handles_read_from_other_threads() {
    let engine = InputEngine::builder(config(1)).build();
    let handle = engine.handle();
    engine.submit(RawSample::key(KeyCode::F5, true));

    let seen = std::thread::spawn(move || handle.key_state(KeyCode::F5))
        .join()
        .unwrap();
    assert_eq!(seen, InputState::Pressed);
}
