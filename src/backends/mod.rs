//! Implementaciones de backend.
//!
//! | Backend | Tipo | Plataforma |
//! |---|---|---|
//! | [`X11Backend`] | push | cualquiera (eventos ya decodificados de Xlib/XCB) |
//! | [`Win32Backend`] | push | cualquiera (mensajes `WM_*`) |
//! | [`VirtualDevice`] | pull | cualquiera |
//! | [`VirtualGamepadHub`] | mandos | cualquiera |
//! | `linux::EvdevKeyboard` / `linux::EvdevPointer` | pull | Linux |
//! | `linux::JoystickProvider` | mandos | Linux |
//! | `GilrsProvider` | mandos | Windows, macOS y demás (vía `gilrs`) |

#[cfg(not(target_os = "linux"))]
mod gilrs_input;
#[cfg(target_os = "linux")]
pub mod linux;
pub mod native;
pub mod virtual_input;

#[cfg(not(target_os = "linux"))]
pub use gilrs_input::GilrsProvider;

pub use native::{Win32Backend, Win32Message, X11Backend, X11Event};
pub use virtual_input::{
    VirtualDevice, VirtualFeed, VirtualGamepad, VirtualGamepadHub, VirtualGamepadProvider,
};
