//! Muestras crudas: lo que un backend entrega al runtime antes de la detección
//! de flancos.

use super::{GamepadAxis, GamepadButton, KeyCode, Modifiers, MouseButton};

/// Una lectura decodificada de teclado o puntero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawSample {
    /// Cambio de una tecla. `modifiers` es `None` cuando el backend no entrega
    /// máscara propia; el runtime los deriva entonces de la tabla de teclas.
    Key {
        key: KeyCode,
        pressed: bool,
        modifiers: Option<Modifiers>,
    },
    /// Cambio de un botón de puntero, con la posición del evento si la hay.
    MouseButton {
        button: MouseButton,
        pressed: bool,
        position: Option<(i32, i32)>,
    },
    /// Posición absoluta (coordenadas de ventana).
    MouseMove { x: i32, y: i32 },
    /// Desplazamiento relativo (dispositivos crudos).
    MouseMotion { dx: i32, dy: i32 },
    /// Rueda, en "notches".
    Scroll { dx: f32, dy: f32 },
}

impl RawSample {
    /// Atajo para una tecla sin máscara de modificadores.
    pub const fn key(key: KeyCode, pressed: bool) -> Self {
        RawSample::Key {
            key,
            pressed,
            modifiers: None,
        }
    }

    /// Atajo para un botón de puntero sin posición.
    pub const fn button(button: MouseButton, pressed: bool) -> Self {
        RawSample::MouseButton {
            button,
            pressed,
            position: None,
        }
    }
}

/// Una lectura decodificada de un gamepad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamepadSample {
    Button { button: GamepadButton, pressed: bool },
    /// Valor ya normalizado (`[-1, 1]` sticks, `[0, 1]` gatillos), sin deadzone.
    Axis { axis: GamepadAxis, value: f32 },
}
