//! Keycodes y máscaras de X11.
//!
//! Con el driver `evdev` de Xorg (y en XWayland) el keycode de X11 es el código
//! evdev desplazado en 8, así que la tabla se comparte con [`super::evdev`].

use super::evdev::KEY_TABLE;
use super::{lookup, reverse};
use crate::model::{KeyCode, Modifiers};
use crate::traits::KeyExt;

/// Desplazamiento entre keycodes de X11 y códigos evdev.
pub const EVDEV_OFFSET: u32 = 8;

pub const SHIFT_MASK: u32 = 1 << 0;
pub const CONTROL_MASK: u32 = 1 << 2;
pub const MOD1_MASK: u32 = 1 << 3;
pub const MOD4_MASK: u32 = 1 << 6;

/// Keycode de X11 (`XKeyEvent::keycode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct X11Keycode(pub u32);

impl KeyExt<X11Keycode, KeyCode> for X11Keycode {
    fn from_backend_key(key: X11Keycode) -> KeyCode {
        key.0
            .checked_sub(EVDEV_OFFSET)
            .and_then(|code| u16::try_from(code).ok())
            .and_then(|code| lookup(KEY_TABLE, code))
            .unwrap_or(KeyCode::Unknown)
    }

    fn to_backend_key(code: KeyCode) -> X11Keycode {
        X11Keycode(reverse(KEY_TABLE, code).map_or(0, |c| u32::from(c) + EVDEV_OFFSET))
    }
}

/// Decodifica el campo `state` de un evento de teclado de X11.
pub fn modifiers_from_mask(mask: u32) -> Modifiers {
    Modifiers {
        shift: mask & SHIFT_MASK != 0,
        ctrl: mask & CONTROL_MASK != 0,
        alt: mask & MOD1_MASK != 0,
        super_key: mask & MOD4_MASK != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keycodes_are_evdev_plus_eight() {
        assert_eq!(X11Keycode::from_backend_key(X11Keycode(38)), KeyCode::A);
        assert_eq!(X11Keycode::from_backend_key(X11Keycode(25)), KeyCode::W);
        assert_eq!(X11Keycode::from_backend_key(X11Keycode(9)), KeyCode::Escape);
        assert_eq!(X11Keycode::from_backend_key(X11Keycode(113)), KeyCode::Left);
        assert_eq!(X11Keycode::to_backend_key(KeyCode::Space), X11Keycode(65));
    }

    #[test]
    fn low_keycodes_do_not_underflow() {
        assert_eq!(X11Keycode::from_backend_key(X11Keycode(3)), KeyCode::Unknown);
        assert_eq!(X11Keycode::from_backend_key(X11Keycode(u32::MAX)), KeyCode::Unknown);
    }

    #[test]
    fn modifier_mask() {
        let mods = modifiers_from_mask(SHIFT_MASK | MOD4_MASK);
        assert!(mods.shift && mods.super_key);
        assert!(!mods.ctrl && !mods.alt);
    }
}
