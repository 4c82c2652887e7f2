//! Backends push: traducen eventos de ventana que el bombeo de eventos ya
//! recibió. No abren nada ni tienen hilo propio.

use crate::model::{MouseButton, RawSample};
use crate::tables::x11::modifiers_from_mask;
use crate::tables::{VirtualKey, X11Keycode};
use crate::traits::{KeyExt, PushBackendExt};

// ==================== X11 ====================

/// Los campos de un `XEvent` que importan para la entrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct X11Event {
    /// `XEvent::type` (`KeyPress`, `ButtonPress`, ...).
    pub kind: i32,
    /// `keycode` para teclas, `button` para botones, sin uso en movimiento.
    pub detail: u32,
    /// Máscara de modificadores (`state`).
    pub state: u32,
    pub x: i32,
    pub y: i32,
}

impl X11Event {
    pub const KEY_PRESS: i32 = 2;
    pub const KEY_RELEASE: i32 = 3;
    pub const BUTTON_PRESS: i32 = 4;
    pub const BUTTON_RELEASE: i32 = 5;
    pub const MOTION_NOTIFY: i32 = 6;

    pub const fn key(pressed: bool, keycode: u32, state: u32) -> Self {
        Self {
            kind: if pressed { Self::KEY_PRESS } else { Self::KEY_RELEASE },
            detail: keycode,
            state,
            x: 0,
            y: 0,
        }
    }

    pub const fn button(pressed: bool, button: u32, x: i32, y: i32) -> Self {
        Self {
            kind: if pressed { Self::BUTTON_PRESS } else { Self::BUTTON_RELEASE },
            detail: button,
            state: 0,
            x,
            y,
        }
    }

    pub const fn motion(x: i32, y: i32) -> Self {
        Self {
            kind: Self::MOTION_NOTIFY,
            detail: 0,
            state: 0,
            x,
            y,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct X11Backend;

impl X11Backend {
    fn decode_button(event: &X11Event, pressed: bool) -> Option<RawSample> {
        let button = match event.detail {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            8 => MouseButton::X1,
            9 => MouseButton::X2,
            // La rueda llega como pares press/release; sólo cuenta el press.
            4..=7 if !pressed => return None,
            4 => return Some(RawSample::Scroll { dx: 0.0, dy: 1.0 }),
            5 => return Some(RawSample::Scroll { dx: 0.0, dy: -1.0 }),
            6 => return Some(RawSample::Scroll { dx: -1.0, dy: 0.0 }),
            7 => return Some(RawSample::Scroll { dx: 1.0, dy: 0.0 }),
            _ => return None,
        };
        Some(RawSample::MouseButton {
            button,
            pressed,
            position: Some((event.x, event.y)),
        })
    }
}

impl PushBackendExt for X11Backend {
    type Event = X11Event;

    fn name(&self) -> &'static str {
        "x11"
    }

    fn decode(&self, event: &X11Event) -> Option<RawSample> {
        match event.kind {
            X11Event::KEY_PRESS | X11Event::KEY_RELEASE => Some(RawSample::Key {
                key: X11Keycode::from_backend_key(X11Keycode(event.detail)),
                pressed: event.kind == X11Event::KEY_PRESS,
                modifiers: Some(modifiers_from_mask(event.state)),
            }),
            X11Event::BUTTON_PRESS => Self::decode_button(event, true),
            X11Event::BUTTON_RELEASE => Self::decode_button(event, false),
            X11Event::MOTION_NOTIFY => Some(RawSample::MouseMove {
                x: event.x,
                y: event.y,
            }),
            _ => None,
        }
    }
}

// ==================== Win32 ====================

/// Un mensaje de ventana tal como llega al `WndProc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win32Message {
    pub msg: u32,
    pub wparam: usize,
    pub lparam: isize,
}

pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;
pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_XBUTTONDOWN: u32 = 0x020B;
pub const WM_XBUTTONUP: u32 = 0x020C;
pub const WM_MOUSEHWHEEL: u32 = 0x020E;

/// Unidades de rueda por "notch".
pub const WHEEL_DELTA: f32 = 120.0;

const XBUTTON1: u16 = 0x0001;
const XBUTTON2: u16 = 0x0002;

fn low_word(value: isize) -> i16 {
    (value & 0xFFFF) as u16 as i16
}

fn high_word(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

fn position(lparam: isize) -> (i32, i32) {
    (
        i32::from(low_word(lparam)),
        i32::from(low_word(lparam >> 16)),
    )
}

/// Bit de tecla extendida en el `lParam` de los mensajes de teclado.
const KF_EXTENDED_BIT: isize = 1 << 24;

/// Virtual key del mensaje, con el lado de los modificadores ya resuelto.
fn key_from_message(message: &Win32Message) -> VirtualKey {
    let scancode = ((message.lparam >> 16) & 0xFF) as u8;
    let extended = message.lparam & KF_EXTENDED_BIT != 0;
    VirtualKey((message.wparam & 0xFF) as u8).resolve_side(scancode, extended)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Backend;

impl PushBackendExt for Win32Backend {
    type Event = Win32Message;

    fn name(&self) -> &'static str {
        "win32"
    }

    fn decode(&self, message: &Win32Message) -> Option<RawSample> {
        let click = |button, pressed| RawSample::MouseButton {
            button,
            pressed,
            position: Some(position(message.lparam)),
        };

        let sample = match message.msg {
            WM_KEYDOWN | WM_SYSKEYDOWN | WM_KEYUP | WM_SYSKEYUP => RawSample::key(
                VirtualKey::from_backend_key(key_from_message(message)),
                matches!(message.msg, WM_KEYDOWN | WM_SYSKEYDOWN),
            ),
            WM_MOUSEMOVE => {
                let (x, y) = position(message.lparam);
                RawSample::MouseMove { x, y }
            }
            WM_LBUTTONDOWN => click(MouseButton::Left, true),
            WM_LBUTTONUP => click(MouseButton::Left, false),
            WM_RBUTTONDOWN => click(MouseButton::Right, true),
            WM_RBUTTONUP => click(MouseButton::Right, false),
            WM_MBUTTONDOWN => click(MouseButton::Middle, true),
            WM_MBUTTONUP => click(MouseButton::Middle, false),
            WM_XBUTTONDOWN | WM_XBUTTONUP => {
                let which = match high_word(message.wparam) {
                    XBUTTON1 => MouseButton::X1,
                    XBUTTON2 => MouseButton::X2,
                    _ => return None,
                };
                click(which, message.msg == WM_XBUTTONDOWN)
            }
            WM_MOUSEWHEEL | WM_MOUSEHWHEEL => {
                let notches = f32::from(high_word(message.wparam) as i16) / WHEEL_DELTA;
                if message.msg == WM_MOUSEWHEEL {
                    RawSample::Scroll { dx: 0.0, dy: notches }
                } else {
                    RawSample::Scroll { dx: notches, dy: 0.0 }
                }
            }
            _ => return None,
        };
        Some(sample)
    }
}
