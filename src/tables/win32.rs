//! Virtual-key codes de Win32 (`VK_*`).

use super::{lookup, reverse};
use crate::model::KeyCode;
use crate::traits::KeyExt;

/// Virtual-key code de Win32 (el `wParam` de `WM_KEYDOWN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualKey(pub u8);

// Las variantes izquierdas van antes que VK_SHIFT / VK_CONTROL / VK_MENU para
// que la traducción inversa devuelva el código específico.
const VK_TABLE: &[(u8, KeyCode)] = &[
    (0x41, KeyCode::A),
    (0x42, KeyCode::B),
    (0x43, KeyCode::C),
    (0x44, KeyCode::D),
    (0x45, KeyCode::E),
    (0x46, KeyCode::F),
    (0x47, KeyCode::G),
    (0x48, KeyCode::H),
    (0x49, KeyCode::I),
    (0x4A, KeyCode::J),
    (0x4B, KeyCode::K),
    (0x4C, KeyCode::L),
    (0x4D, KeyCode::M),
    (0x4E, KeyCode::N),
    (0x4F, KeyCode::O),
    (0x50, KeyCode::P),
    (0x51, KeyCode::Q),
    (0x52, KeyCode::R),
    (0x53, KeyCode::S),
    (0x54, KeyCode::T),
    (0x55, KeyCode::U),
    (0x56, KeyCode::V),
    (0x57, KeyCode::W),
    (0x58, KeyCode::X),
    (0x59, KeyCode::Y),
    (0x5A, KeyCode::Z),
    (0x30, KeyCode::Num0),
    (0x31, KeyCode::Num1),
    (0x32, KeyCode::Num2),
    (0x33, KeyCode::Num3),
    (0x34, KeyCode::Num4),
    (0x35, KeyCode::Num5),
    (0x36, KeyCode::Num6),
    (0x37, KeyCode::Num7),
    (0x38, KeyCode::Num8),
    (0x39, KeyCode::Num9),
    (0x70, KeyCode::F1),
    (0x71, KeyCode::F2),
    (0x72, KeyCode::F3),
    (0x73, KeyCode::F4),
    (0x74, KeyCode::F5),
    (0x75, KeyCode::F6),
    (0x76, KeyCode::F7),
    (0x77, KeyCode::F8),
    (0x78, KeyCode::F9),
    (0x79, KeyCode::F10),
    (0x7A, KeyCode::F11),
    (0x7B, KeyCode::F12),
    (0x25, KeyCode::Left),
    (0x26, KeyCode::Up),
    (0x27, KeyCode::Right),
    (0x28, KeyCode::Down),
    (0x1B, KeyCode::Escape),
    (0x09, KeyCode::Tab),
    (0x14, KeyCode::CapsLock),
    (0xA0, KeyCode::LeftShift),
    (0xA1, KeyCode::RightShift),
    (0xA2, KeyCode::LeftCtrl),
    (0xA3, KeyCode::RightCtrl),
    (0xA4, KeyCode::LeftAlt),
    (0xA5, KeyCode::RightAlt),
    (0x10, KeyCode::LeftShift),
    (0x11, KeyCode::LeftCtrl),
    (0x12, KeyCode::LeftAlt),
    (0x20, KeyCode::Space),
    (0x0D, KeyCode::Enter),
    (0x08, KeyCode::Backspace),
    (0x2E, KeyCode::Delete),
    (0x24, KeyCode::Home),
    (0x23, KeyCode::End),
    (0x21, KeyCode::PageUp),
    (0x22, KeyCode::PageDown),
    (0x2D, KeyCode::Insert),
    (0x60, KeyCode::Numpad0),
    (0x61, KeyCode::Numpad1),
    (0x62, KeyCode::Numpad2),
    (0x63, KeyCode::Numpad3),
    (0x64, KeyCode::Numpad4),
    (0x65, KeyCode::Numpad5),
    (0x66, KeyCode::Numpad6),
    (0x67, KeyCode::Numpad7),
    (0x68, KeyCode::Numpad8),
    (0x69, KeyCode::Numpad9),
    (0x6A, KeyCode::NumpadMultiply),
    (0x6B, KeyCode::NumpadAdd),
    (0x6D, KeyCode::NumpadSubtract),
    (0x6E, KeyCode::NumpadDecimal),
    (0x6F, KeyCode::NumpadDivide),
    (0x90, KeyCode::NumLock),
    (0xBA, KeyCode::Semicolon),
    (0xBB, KeyCode::Equals),
    (0xBC, KeyCode::Comma),
    (0xBD, KeyCode::Minus),
    (0xBE, KeyCode::Period),
    (0xBF, KeyCode::Slash),
    (0xC0, KeyCode::Grave),
    (0xDB, KeyCode::LeftBracket),
    (0xDC, KeyCode::Backslash),
    (0xDD, KeyCode::RightBracket),
    (0xDE, KeyCode::Apostrophe),
    (0x2C, KeyCode::PrintScreen),
    (0x91, KeyCode::ScrollLock),
    (0x13, KeyCode::Pause),
    (0x5B, KeyCode::LeftSuper),
    (0x5C, KeyCode::RightSuper),
    (0x5D, KeyCode::Menu),
];

const VK_SHIFT: u8 = 0x10;
const VK_CONTROL: u8 = 0x11;
const VK_MENU: u8 = 0x12;
const VK_LSHIFT: u8 = 0xA0;
const VK_RSHIFT: u8 = 0xA1;
const VK_LCONTROL: u8 = 0xA2;
const VK_RCONTROL: u8 = 0xA3;
const VK_LMENU: u8 = 0xA4;
const VK_RMENU: u8 = 0xA5;

/// Scancode del Shift derecho en el `lParam` de `WM_KEYDOWN`.
const SCANCODE_RSHIFT: u8 = 0x36;

impl VirtualKey {
    /// Resuelve los códigos genéricos (`VK_SHIFT`, `VK_CONTROL`, `VK_MENU`)
    /// a su lado físico.
    ///
    /// `WM_KEYDOWN` nunca trae `VK_LSHIFT`/`VK_RSHIFT` y compañía: el lado se
    /// saca del scancode (bits 16–23 del `lParam`) para Shift y del flag de
    /// tecla extendida (bit 24) para Ctrl y Alt.
    pub const fn resolve_side(self, scancode: u8, extended: bool) -> VirtualKey {
        let code = match self.0 {
            VK_SHIFT if scancode == SCANCODE_RSHIFT => VK_RSHIFT,
            VK_SHIFT => VK_LSHIFT,
            VK_CONTROL if extended => VK_RCONTROL,
            VK_CONTROL => VK_LCONTROL,
            VK_MENU if extended => VK_RMENU,
            VK_MENU => VK_LMENU,
            other => other,
        };
        VirtualKey(code)
    }
}

impl KeyExt<VirtualKey, KeyCode> for VirtualKey {
    fn from_backend_key(key: VirtualKey) -> KeyCode {
        lookup(VK_TABLE, key.0).unwrap_or(KeyCode::Unknown)
    }

    fn to_backend_key(code: KeyCode) -> VirtualKey {
        VirtualKey(reverse(VK_TABLE, code).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_are_ascii() {
        assert_eq!(VirtualKey::from_backend_key(VirtualKey(b'W')), KeyCode::W);
        assert_eq!(VirtualKey::from_backend_key(VirtualKey(b'7')), KeyCode::Num7);
    }

    #[test]
    fn generic_modifiers_alias_the_left_key() {
        assert_eq!(VirtualKey::from_backend_key(VirtualKey(0x10)), KeyCode::LeftShift);
        assert_eq!(VirtualKey::to_backend_key(KeyCode::LeftShift), VirtualKey(0xA0));
    }

    #[test]
    fn generic_modifiers_resolve_their_side() {
        assert_eq!(VirtualKey(0x10).resolve_side(0x2A, false), VirtualKey(0xA0));
        assert_eq!(VirtualKey(0x10).resolve_side(0x36, false), VirtualKey(0xA1));
        assert_eq!(VirtualKey(0x11).resolve_side(0x1D, true), VirtualKey(0xA3));
        assert_eq!(VirtualKey(0x12).resolve_side(0x38, false), VirtualKey(0xA4));
        assert_eq!(VirtualKey(0x12).resolve_side(0x38, true), VirtualKey(0xA5));
        assert_eq!(VirtualKey(b'W').resolve_side(0x11, true), VirtualKey(b'W'));
    }

    #[test]
    fn numpad_keys_have_their_own_codes() {
        assert_eq!(VirtualKey::from_backend_key(VirtualKey(0x60)), KeyCode::Numpad0);
        assert_eq!(VirtualKey::from_backend_key(VirtualKey(0x2D)), KeyCode::Insert);
        assert_eq!(VirtualKey::from_backend_key(VirtualKey(0xFF)), KeyCode::Unknown);
    }
}
