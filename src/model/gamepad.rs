//! Identidades de gamepad (layout tipo Xbox) y el registro público de estado
//! de cada mando conectado.

use super::canonical_enum;

/// Deadzone por defecto asignada a cada gamepad al conectarse.
pub const DEFAULT_DEADZONE: f32 = 0.15;

canonical_enum! {
    /// Botón de gamepad normalizado.
    pub enum GamepadButton {
        A => "A",
        B => "B",
        X => "X",
        Y => "Y",
        LeftBumper => "Left Bumper",
        RightBumper => "Right Bumper",
        Back => "Back",
        Start => "Start",
        Guide => "Guide",
        LeftThumb => "Left Stick",
        RightThumb => "Right Stick",
        DpadUp => "D-Pad Up",
        DpadRight => "D-Pad Right",
        DpadDown => "D-Pad Down",
        DpadLeft => "D-Pad Left",
    }
}

canonical_enum! {
    /// Eje analógico normalizado.
    ///
    /// Los sticks viven en `[-1, 1]`; los gatillos en `[0, 1]`.
    pub enum GamepadAxis {
        LeftX => "Left Stick X",
        LeftY => "Left Stick Y",
        RightX => "Right Stick X",
        RightY => "Right Stick Y",
        LeftTrigger => "Left Trigger",
        RightTrigger => "Right Trigger",
    }
}

impl GamepadAxis {
    /// `true` para los gatillos (rango `[0, 1]`).
    pub const fn is_trigger(self) -> bool {
        matches!(self, GamepadAxis::LeftTrigger | GamepadAxis::RightTrigger)
    }
}

/// Registro de estado crudo de un gamepad.
///
/// Los botones son booleanos tal como los entrega el dispositivo; el estado de
/// tres fases se consulta con
/// [`gamepad_button_state`](crate::InputStateExt::gamepad_button_state).
/// Los ejes se guardan **sin** deadzone aplicada; usa
/// [`gamepad_axis`](crate::InputStateExt::gamepad_axis) para la lectura final.
#[derive(Debug, Clone, PartialEq)]
pub struct GamepadState {
    pub connected: bool,
    pub name: String,
    pub buttons: [bool; GamepadButton::COUNT],
    pub axes: [f32; GamepadAxis::COUNT],
    pub deadzone: f32,
    /// Milisegundos desde la creación del motor en la última muestra aplicada.
    pub last_update_ms: u64,
}

impl Default for GamepadState {
    fn default() -> Self {
        Self {
            connected: false,
            name: String::new(),
            buttons: [false; GamepadButton::COUNT],
            axes: [0.0; GamepadAxis::COUNT],
            deadzone: DEFAULT_DEADZONE,
            last_update_ms: 0,
        }
    }
}

impl GamepadState {
    /// Estado recién conectado: todo a cero, con el nombre y la deadzone dados.
    pub fn fresh(name: impl Into<String>, deadzone: f32) -> Self {
        Self {
            connected: true,
            name: name.into(),
            deadzone,
            ..Self::default()
        }
    }

    #[inline]
    pub fn button(&self, button: GamepadButton) -> bool {
        self.buttons[button.index()]
    }

    /// Valor crudo del eje, sin deadzone.
    #[inline]
    pub fn raw_axis(&self, axis: GamepadAxis) -> f32 {
        self.axes[axis.index()]
    }
}
