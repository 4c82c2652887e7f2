//! Códigos del subsistema de entrada de Linux (`linux/input-event-codes.h`).

use super::{lookup, reverse};
use crate::model::{KeyCode, MouseButton};
use crate::traits::{KeyExt, KeyStateExt};

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;

pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_WHEEL: u16 = 0x08;

pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const BTN_MIDDLE: u16 = 0x112;
pub const BTN_SIDE: u16 = 0x113;
pub const BTN_EXTRA: u16 = 0x114;

/// Código `KEY_*` de evdev.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvdevKey(pub u16);

/// Valor de un evento `EV_KEY`: 0 release, 1 press, 2 autorepeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvdevValue(pub i32);

pub(crate) const KEY_TABLE: &[(u16, KeyCode)] = &[
    (1, KeyCode::Escape),
    (2, KeyCode::Num1),
    (3, KeyCode::Num2),
    (4, KeyCode::Num3),
    (5, KeyCode::Num4),
    (6, KeyCode::Num5),
    (7, KeyCode::Num6),
    (8, KeyCode::Num7),
    (9, KeyCode::Num8),
    (10, KeyCode::Num9),
    (11, KeyCode::Num0),
    (12, KeyCode::Minus),
    (13, KeyCode::Equals),
    (14, KeyCode::Backspace),
    (15, KeyCode::Tab),
    (16, KeyCode::Q),
    (17, KeyCode::W),
    (18, KeyCode::E),
    (19, KeyCode::R),
    (20, KeyCode::T),
    (21, KeyCode::Y),
    (22, KeyCode::U),
    (23, KeyCode::I),
    (24, KeyCode::O),
    (25, KeyCode::P),
    (26, KeyCode::LeftBracket),
    (27, KeyCode::RightBracket),
    (28, KeyCode::Enter),
    (29, KeyCode::LeftCtrl),
    (30, KeyCode::A),
    (31, KeyCode::S),
    (32, KeyCode::D),
    (33, KeyCode::F),
    (34, KeyCode::G),
    (35, KeyCode::H),
    (36, KeyCode::J),
    (37, KeyCode::K),
    (38, KeyCode::L),
    (39, KeyCode::Semicolon),
    (40, KeyCode::Apostrophe),
    (41, KeyCode::Grave),
    (42, KeyCode::LeftShift),
    (43, KeyCode::Backslash),
    (44, KeyCode::Z),
    (45, KeyCode::X),
    (46, KeyCode::C),
    (47, KeyCode::V),
    (48, KeyCode::B),
    (49, KeyCode::N),
    (50, KeyCode::M),
    (51, KeyCode::Comma),
    (52, KeyCode::Period),
    (53, KeyCode::Slash),
    (54, KeyCode::RightShift),
    (55, KeyCode::NumpadMultiply),
    (56, KeyCode::LeftAlt),
    (57, KeyCode::Space),
    (58, KeyCode::CapsLock),
    (59, KeyCode::F1),
    (60, KeyCode::F2),
    (61, KeyCode::F3),
    (62, KeyCode::F4),
    (63, KeyCode::F5),
    (64, KeyCode::F6),
    (65, KeyCode::F7),
    (66, KeyCode::F8),
    (67, KeyCode::F9),
    (68, KeyCode::F10),
    (69, KeyCode::NumLock),
    (70, KeyCode::ScrollLock),
    (71, KeyCode::Numpad7),
    (72, KeyCode::Numpad8),
    (73, KeyCode::Numpad9),
    (74, KeyCode::NumpadSubtract),
    (75, KeyCode::Numpad4),
    (76, KeyCode::Numpad5),
    (77, KeyCode::Numpad6),
    (78, KeyCode::NumpadAdd),
    (79, KeyCode::Numpad1),
    (80, KeyCode::Numpad2),
    (81, KeyCode::Numpad3),
    (82, KeyCode::Numpad0),
    (83, KeyCode::NumpadDecimal),
    (87, KeyCode::F11),
    (88, KeyCode::F12),
    (96, KeyCode::NumpadEnter),
    (97, KeyCode::RightCtrl),
    (98, KeyCode::NumpadDivide),
    (99, KeyCode::PrintScreen),
    (100, KeyCode::RightAlt),
    (102, KeyCode::Home),
    (103, KeyCode::Up),
    (104, KeyCode::PageUp),
    (105, KeyCode::Left),
    (106, KeyCode::Right),
    (107, KeyCode::End),
    (108, KeyCode::Down),
    (109, KeyCode::PageDown),
    (110, KeyCode::Insert),
    (111, KeyCode::Delete),
    (119, KeyCode::Pause),
    (125, KeyCode::LeftSuper),
    (126, KeyCode::RightSuper),
    (127, KeyCode::Menu),
];

const BUTTON_TABLE: &[(u16, MouseButton)] = &[
    (BTN_LEFT, MouseButton::Left),
    (BTN_RIGHT, MouseButton::Right),
    (BTN_MIDDLE, MouseButton::Middle),
    (BTN_SIDE, MouseButton::X1),
    (BTN_EXTRA, MouseButton::X2),
];

impl KeyExt<EvdevKey, KeyCode> for EvdevKey {
    fn from_backend_key(key: EvdevKey) -> KeyCode {
        lookup(KEY_TABLE, key.0).unwrap_or(KeyCode::Unknown)
    }

    fn to_backend_key(code: KeyCode) -> EvdevKey {
        EvdevKey(reverse(KEY_TABLE, code).unwrap_or(0))
    }
}

impl KeyStateExt<EvdevValue, bool> for EvdevValue {
    fn from_external_state(state: EvdevValue) -> bool {
        state.0 != 0
    }

    fn to_external_state(state: bool) -> EvdevValue {
        EvdevValue(i32::from(state))
    }
}

/// Traduce un código `BTN_*` de puntero. `None` para botones no soportados.
pub fn mouse_button(code: u16) -> Option<MouseButton> {
    lookup(BUTTON_TABLE, code)
}
