//! Teclas canónicas y modificadores.
//!
//! Soporte **básico**: teclas alfanuméricas, de función, navegación, numpad,
//! puntuación de un teclado US y teclas de sistema. No hay interpretación de
//! texto ni de layouts; eso queda fuera del runtime.

use super::canonical_enum;

canonical_enum! {
    /// Código de tecla normalizado, independiente de la plataforma.
    ///
    /// Los backends traducen sus códigos nativos a este tipo mediante
    /// [`KeyExt`](crate::KeyExt). Cualquier código sin traducción termina en
    /// [`KeyCode::Unknown`], que nunca se registra en las tablas de estado.
    pub enum KeyCode {
        A => "A", B => "B", C => "C", D => "D", E => "E", F => "F", G => "G",
        H => "H", I => "I", J => "J", K => "K", L => "L", M => "M", N => "N",
        O => "O", P => "P", Q => "Q", R => "R", S => "S", T => "T", U => "U",
        V => "V", W => "W", X => "X", Y => "Y", Z => "Z",

        Num0 => "0", Num1 => "1", Num2 => "2", Num3 => "3", Num4 => "4",
        Num5 => "5", Num6 => "6", Num7 => "7", Num8 => "8", Num9 => "9",

        F1 => "F1", F2 => "F2", F3 => "F3", F4 => "F4", F5 => "F5", F6 => "F6",
        F7 => "F7", F8 => "F8", F9 => "F9", F10 => "F10", F11 => "F11", F12 => "F12",

        Left => "Left Arrow", Right => "Right Arrow", Up => "Up Arrow", Down => "Down Arrow",

        Escape => "Escape", Tab => "Tab", CapsLock => "Caps Lock",
        LeftShift => "Left Shift", RightShift => "Right Shift",
        LeftCtrl => "Left Ctrl", RightCtrl => "Right Ctrl",
        LeftAlt => "Left Alt", RightAlt => "Right Alt",
        Space => "Space", Enter => "Enter", Backspace => "Backspace", Delete => "Delete",

        Home => "Home", End => "End", PageUp => "Page Up", PageDown => "Page Down",
        Insert => "Insert",

        Numpad0 => "Numpad 0", Numpad1 => "Numpad 1", Numpad2 => "Numpad 2",
        Numpad3 => "Numpad 3", Numpad4 => "Numpad 4", Numpad5 => "Numpad 5",
        Numpad6 => "Numpad 6", Numpad7 => "Numpad 7", Numpad8 => "Numpad 8",
        Numpad9 => "Numpad 9",
        NumpadAdd => "Numpad +", NumpadSubtract => "Numpad -",
        NumpadMultiply => "Numpad *", NumpadDivide => "Numpad /",
        NumpadEnter => "Numpad Enter", NumpadDecimal => "Numpad .",
        NumLock => "Num Lock",

        Semicolon => ";", Equals => "=", Comma => ",", Minus => "-", Period => ".",
        Slash => "/", Grave => "`", LeftBracket => "[", Backslash => "\\",
        RightBracket => "]", Apostrophe => "'",

        PrintScreen => "Print Screen", ScrollLock => "Scroll Lock", Pause => "Pause",
        LeftSuper => "Left Super", RightSuper => "Right Super", Menu => "Menu",

        Unknown => "Unknown",
    }
}

impl KeyCode {
    /// `true` si la tecla es uno de los ocho modificadores físicos.
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyCode::LeftShift
                | KeyCode::RightShift
                | KeyCode::LeftCtrl
                | KeyCode::RightCtrl
                | KeyCode::LeftAlt
                | KeyCode::RightAlt
                | KeyCode::LeftSuper
                | KeyCode::RightSuper
        )
    }
}

/// Banderas de modificadores del evento de teclado más reciente.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub super_key: bool,
}

impl Modifiers {
    /// Sin ningún modificador activo.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        super_key: false,
    };

    /// Deriva los modificadores a partir de una consulta "¿está abajo esta tecla?".
    ///
    /// Usado por backends que no entregan máscara de modificadores propia.
    pub fn from_keys(is_down: impl Fn(KeyCode) -> bool) -> Self {
        Self {
            shift: is_down(KeyCode::LeftShift) || is_down(KeyCode::RightShift),
            ctrl: is_down(KeyCode::LeftCtrl) || is_down(KeyCode::RightCtrl),
            alt: is_down(KeyCode::LeftAlt) || is_down(KeyCode::RightAlt),
            super_key: is_down(KeyCode::LeftSuper) || is_down(KeyCode::RightSuper),
        }
    }

    /// `true` si hay al menos un modificador activo.
    pub const fn any(self) -> bool {
        self.shift || self.ctrl || self.alt || self.super_key
    }
}
