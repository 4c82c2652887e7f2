//! Índices de la API de joystick de Linux (`/dev/input/js*`) para mandos con
//! layout `xpad` (Xbox y compatibles).
//!
//! ```text
//! botones: 0 A, 1 B, 2 X, 3 Y, 4 LB, 5 RB, 6 Back, 7 Start, 8 Guide, 9 LThumb, 10 RThumb
//! ejes:    0 LX, 1 LY, 2 LT, 3 RX, 4 RY, 5 RT, 6 hat X, 7 hat Y
//! ```

use super::lookup;
use crate::model::{GamepadAxis, GamepadButton, GamepadSample};

pub const JS_EVENT_BUTTON: u8 = 0x01;
pub const JS_EVENT_AXIS: u8 = 0x02;
pub const JS_EVENT_INIT: u8 = 0x80;

/// Rango nativo de un eje de joystick.
pub const AXIS_MAX: f32 = 32767.0;

/// Umbral a partir del cual un eje de hat cuenta como dirección pulsada.
const HAT_THRESHOLD: i16 = 16384;

/// Destino canónico de un eje nativo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickInput {
    Axis(GamepadAxis),
    /// Eje digital (hat) que se traduce a un par de botones de la cruceta.
    Hat {
        negative: GamepadButton,
        positive: GamepadButton,
    },
}

const BUTTON_TABLE: &[(u8, GamepadButton)] = &[
    (0, GamepadButton::A),
    (1, GamepadButton::B),
    (2, GamepadButton::X),
    (3, GamepadButton::Y),
    (4, GamepadButton::LeftBumper),
    (5, GamepadButton::RightBumper),
    (6, GamepadButton::Back),
    (7, GamepadButton::Start),
    (8, GamepadButton::Guide),
    (9, GamepadButton::LeftThumb),
    (10, GamepadButton::RightThumb),
    (11, GamepadButton::DpadUp),
    (12, GamepadButton::DpadRight),
    (13, GamepadButton::DpadDown),
    (14, GamepadButton::DpadLeft),
];

const AXIS_TABLE: &[(u8, JoystickInput)] = &[
    (0, JoystickInput::Axis(GamepadAxis::LeftX)),
    (1, JoystickInput::Axis(GamepadAxis::LeftY)),
    (2, JoystickInput::Axis(GamepadAxis::LeftTrigger)),
    (3, JoystickInput::Axis(GamepadAxis::RightX)),
    (4, JoystickInput::Axis(GamepadAxis::RightY)),
    (5, JoystickInput::Axis(GamepadAxis::RightTrigger)),
    (
        6,
        JoystickInput::Hat {
            negative: GamepadButton::DpadLeft,
            positive: GamepadButton::DpadRight,
        },
    ),
    (
        7,
        JoystickInput::Hat {
            negative: GamepadButton::DpadUp,
            positive: GamepadButton::DpadDown,
        },
    ),
];

/// Botón xpad por número de `js_event`.
pub fn button(number: u8) -> Option<GamepadButton> {
    lookup(BUTTON_TABLE, number)
}

/// Eje xpad por número; 6 y 7 son el hat de la cruceta.
pub fn axis(number: u8) -> Option<JoystickInput> {
    lookup(AXIS_TABLE, number)
}

/// Normaliza un valor nativo de eje al rango canónico del eje destino.
///
/// Los gatillos reposan en `-32767` en la API de joystick; se remapean a `[0, 1]`.
pub fn normalize(axis: GamepadAxis, raw: i16) -> f32 {
    let value = f32::from(raw);
    if axis.is_trigger() {
        ((value + AXIS_MAX) / (2.0 * AXIS_MAX)).clamp(0.0, 1.0)
    } else {
        (value / AXIS_MAX).clamp(-1.0, 1.0)
    }
}

/// Decodifica un `js_event` ya separado en sus campos.
///
/// Devuelve hasta dos muestras (un hat cambia dos botones a la vez).
pub fn decode(kind: u8, number: u8, value: i16) -> [Option<GamepadSample>; 2] {
    match kind & !JS_EVENT_INIT {
        JS_EVENT_BUTTON => [
            button(number).map(|button| GamepadSample::Button {
                button,
                pressed: value != 0,
            }),
            None,
        ],
        JS_EVENT_AXIS => match axis(number) {
            Some(JoystickInput::Axis(axis)) => [
                Some(GamepadSample::Axis {
                    axis,
                    value: normalize(axis, value),
                }),
                None,
            ],
            Some(JoystickInput::Hat { negative, positive }) => [
                Some(GamepadSample::Button {
                    button: negative,
                    pressed: value <= -HAT_THRESHOLD,
                }),
                Some(GamepadSample::Button {
                    button: positive,
                    pressed: value >= HAT_THRESHOLD,
                }),
            ],
            None => [None, None],
        },
        _ => [None, None],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_flag_is_masked() {
        let [first, second] = decode(JS_EVENT_BUTTON | JS_EVENT_INIT, 0, 1);
        assert_eq!(
            first,
            Some(GamepadSample::Button {
                button: GamepadButton::A,
                pressed: true
            })
        );
        assert_eq!(second, None);
    }

    #[test]
    fn sticks_and_triggers_use_their_own_ranges() {
        assert_eq!(normalize(GamepadAxis::LeftX, 32767), 1.0);
        assert_eq!(normalize(GamepadAxis::LeftX, -32768), -1.0);
        assert_eq!(normalize(GamepadAxis::LeftTrigger, -32767), 0.0);
        assert_eq!(normalize(GamepadAxis::LeftTrigger, 32767), 1.0);
    }

    #[test]
    fn hat_becomes_dpad_buttons() {
        let [left, right] = decode(JS_EVENT_AXIS, 6, -32767);
        assert_eq!(
            left,
            Some(GamepadSample::Button {
                button: GamepadButton::DpadLeft,
                pressed: true
            })
        );
        assert_eq!(
            right,
            Some(GamepadSample::Button {
                button: GamepadButton::DpadRight,
                pressed: false
            })
        );
    }

    #[test]
    fn unknown_numbers_are_dropped() {
        assert_eq!(decode(JS_EVENT_BUTTON, 40, 1), [None, None]);
        assert_eq!(decode(JS_EVENT_AXIS, 12, 1000), [None, None]);
        assert_eq!(decode(0x04, 0, 1), [None, None]);
    }
}
