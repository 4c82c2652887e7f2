//! Tablas de traducción de códigos nativos a identidades canónicas.
//!
//! Cada tabla es un slice plano de pares `(nativo, canónico)`; el orden no
//! importa salvo cuando varios códigos nativos apuntan a la misma tecla: el
//! primero de la tabla es el que devuelve la traducción inversa.

pub mod evdev;
pub mod joystick;
pub mod win32;
pub mod x11;

pub use evdev::{EvdevKey, EvdevValue};
pub use joystick::JoystickInput;
pub use win32::VirtualKey;
pub use x11::X11Keycode;

pub(crate) fn lookup<T, U>(table: &[(T, U)], native: T) -> Option<U>
where
    T: Copy + PartialEq,
    U: Copy,
{
    table.iter().find(|(n, _)| *n == native).map(|(_, c)| *c)
}

pub(crate) fn reverse<T, U>(table: &[(T, U)], canonical: U) -> Option<T>
where
    T: Copy,
    U: Copy + PartialEq,
{
    table.iter().find(|(_, c)| *c == canonical).map(|(n, _)| *n)
}
