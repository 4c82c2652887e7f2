//! Agregado de estado: todas las tablas de todos los dispositivos detrás de un
//! único lock.
//!
//! Los productores sólo llaman a [`InputAggregate::apply`] y
//! [`InputAggregate::apply_gamepad`]; el hilo de la aplicación llama a
//! [`InputAggregate::update`] una vez por frame.

use crate::deadzone::{clamp_deadzone, normalize_axis};
use crate::model::state::{apply_raw, settle_table};
use crate::model::{
    GamepadAxis, GamepadButton, GamepadSample, GamepadState, InputState, KeyCode, Modifiers,
    MouseButton, RawSample,
};

#[derive(Debug, Clone)]
pub(crate) struct KeyboardState {
    current: [InputState; KeyCode::COUNT],
    previous: [InputState; KeyCode::COUNT],
    modifiers: Modifiers,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self {
            current: [InputState::Released; KeyCode::COUNT],
            previous: [InputState::Released; KeyCode::COUNT],
            modifiers: Modifiers::NONE,
        }
    }
}

impl KeyboardState {
    fn apply(&mut self, key: KeyCode, pressed: bool, modifiers: Option<Modifiers>) {
        if key != KeyCode::Unknown {
            apply_raw(&mut self.current, &self.previous, key.index(), pressed);
        }
        self.modifiers = match modifiers {
            Some(mask) => mask,
            None => {
                let current = &self.current;
                Modifiers::from_keys(|k| current[k.index()].is_down())
            }
        };
    }

    pub(crate) fn state(&self, key: KeyCode) -> InputState {
        self.current[key.index()]
    }

    pub(crate) fn down(&self) -> Vec<KeyCode> {
        KeyCode::ALL
            .iter()
            .copied()
            .filter(|key| self.current[key.index()].is_down())
            .collect()
    }

    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MouseState {
    current: [InputState; MouseButton::COUNT],
    previous: [InputState; MouseButton::COUNT],
    position: (i32, i32),
    published: (i32, i32),
    delta: (i32, i32),
    scroll_pending: (f32, f32),
    scroll: (f32, f32),
    visible: bool,
    captured: bool,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            current: [InputState::Released; MouseButton::COUNT],
            previous: [InputState::Released; MouseButton::COUNT],
            position: (0, 0),
            published: (0, 0),
            delta: (0, 0),
            scroll_pending: (0.0, 0.0),
            scroll: (0.0, 0.0),
            visible: true,
            captured: false,
        }
    }
}

impl MouseState {
    pub(crate) fn state(&self, button: MouseButton) -> InputState {
        self.current[button.index()]
    }

    pub(crate) fn position(&self) -> (i32, i32) {
        self.position
    }

    pub(crate) fn delta(&self) -> (i32, i32) {
        self.delta
    }

    pub(crate) fn scroll(&self) -> (f32, f32) {
        self.scroll
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn is_captured(&self) -> bool {
        self.captured
    }

    pub(crate) fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }
}

/// Fase del ciclo de vida de un slot de gamepad.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// El hilo vio una desconexión permanente; espera a ser recogido.
    Lost,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct GamepadSlot {
    pub(crate) status: SlotStatus,
    pub(crate) state: GamepadState,
    current: [InputState; GamepadButton::COUNT],
    previous: [InputState; GamepadButton::COUNT],
}

impl GamepadSlot {
    fn connected(name: String, deadzone: f32) -> Self {
        Self {
            status: SlotStatus::Connected,
            state: GamepadState::fresh(name, deadzone),
            ..Self::default()
        }
    }

    fn is_connected(&self) -> bool {
        self.status == SlotStatus::Connected
    }
}

/// Todo el estado compartido del runtime.
#[derive(Debug, Clone)]
pub(crate) struct InputAggregate {
    pub(crate) keyboard: KeyboardState,
    pub(crate) mouse: MouseState,
    gamepads: Vec<GamepadSlot>,
}

impl InputAggregate {
    pub(crate) fn new(gamepad_slots: usize) -> Self {
        Self {
            keyboard: KeyboardState::default(),
            mouse: MouseState::default(),
            gamepads: vec![GamepadSlot::default(); gamepad_slots],
        }
    }

    /// Aplica una muestra de teclado o puntero.
    pub(crate) fn apply(&mut self, sample: RawSample) {
        match sample {
            RawSample::Key {
                key,
                pressed,
                modifiers,
            } => self.keyboard.apply(key, pressed, modifiers),
            RawSample::MouseButton {
                button,
                pressed,
                position,
            } => {
                let mouse = &mut self.mouse;
                apply_raw(&mut mouse.current, &mouse.previous, button.index(), pressed);
                if let Some(position) = position {
                    mouse.position = position;
                }
            }
            RawSample::MouseMove { x, y } => self.mouse.position = (x, y),
            RawSample::MouseMotion { dx, dy } => {
                let (x, y) = self.mouse.position;
                self.mouse.position = (x.saturating_add(dx), y.saturating_add(dy));
            }
            RawSample::Scroll { dx, dy } => {
                if dx.is_finite() && dy.is_finite() {
                    self.mouse.scroll_pending.0 += dx;
                    self.mouse.scroll_pending.1 += dy;
                }
            }
        }
    }

    /// Aplica una muestra a un slot. Devuelve `false` si el slot no está conectado.
    pub(crate) fn apply_gamepad(&mut self, slot: usize, sample: GamepadSample, now_ms: u64) -> bool {
        let Some(pad) = self.gamepads.get_mut(slot).filter(|pad| pad.is_connected()) else {
            return false;
        };
        match sample {
            GamepadSample::Button { button, pressed } => {
                apply_raw(&mut pad.current, &pad.previous, button.index(), pressed);
                pad.state.buttons[button.index()] = pressed;
            }
            GamepadSample::Axis { axis, value } => {
                let value = if !value.is_finite() {
                    0.0
                } else if axis.is_trigger() {
                    value.clamp(0.0, 1.0)
                } else {
                    value.clamp(-1.0, 1.0)
                };
                pad.state.axes[axis.index()] = value;
            }
        }
        pad.state.last_update_ms = now_ms;
        true
    }

    /// Paso de frame: colapsa `Pressed` a `Held`, publica las tablas previas y
    /// calcula los deltas del puntero.
    pub(crate) fn update(&mut self) {
        settle_table(&mut self.keyboard.current, &mut self.keyboard.previous);

        let mouse = &mut self.mouse;
        settle_table(&mut mouse.current, &mut mouse.previous);
        mouse.delta = (
            mouse.position.0.wrapping_sub(mouse.published.0),
            mouse.position.1.wrapping_sub(mouse.published.1),
        );
        mouse.published = mouse.position;
        mouse.scroll = std::mem::take(&mut mouse.scroll_pending);

        for pad in &mut self.gamepads {
            settle_table(&mut pad.current, &mut pad.previous);
        }
    }

    /// Suelta todo sin tocar la conexión de los mandos ni la posición del puntero.
    pub(crate) fn reset(&mut self) {
        self.keyboard = KeyboardState::default();
        let mouse = &mut self.mouse;
        mouse.current = [InputState::Released; MouseButton::COUNT];
        mouse.previous = [InputState::Released; MouseButton::COUNT];
        mouse.published = mouse.position;
        mouse.delta = (0, 0);
        mouse.scroll = (0.0, 0.0);
        mouse.scroll_pending = (0.0, 0.0);

        for pad in self.gamepads.iter_mut().filter(|pad| pad.is_connected()) {
            pad.current = [InputState::Released; GamepadButton::COUNT];
            pad.previous = [InputState::Released; GamepadButton::COUNT];
            pad.state.buttons = [false; GamepadButton::COUNT];
            pad.state.axes = [0.0; GamepadAxis::COUNT];
        }
    }

    // ==================== SLOTS ====================

    pub(crate) fn capacity(&self) -> usize {
        self.gamepads.len()
    }

    pub(crate) fn slot_status(&self, slot: usize) -> SlotStatus {
        self.gamepads
            .get(slot)
            .map_or(SlotStatus::Disconnected, |pad| pad.status)
    }

    pub(crate) fn set_connecting(&mut self, slot: usize) {
        if let Some(pad) = self.gamepads.get_mut(slot) {
            pad.status = SlotStatus::Connecting;
        }
    }

    /// Estado recién conectado: tablas a cero y la deadzone por defecto.
    pub(crate) fn set_connected(&mut self, slot: usize, name: String, deadzone: f32) {
        if let Some(pad) = self.gamepads.get_mut(slot) {
            *pad = GamepadSlot::connected(name, clamp_deadzone(deadzone));
        }
    }

    pub(crate) fn set_lost(&mut self, slot: usize) {
        if let Some(pad) = self.gamepads.get_mut(slot) {
            pad.status = SlotStatus::Lost;
            pad.state.connected = false;
        }
    }

    pub(crate) fn free(&mut self, slot: usize) {
        if let Some(pad) = self.gamepads.get_mut(slot) {
            *pad = GamepadSlot::default();
        }
    }

    pub(crate) fn connected_count(&self) -> usize {
        self.gamepads.iter().filter(|pad| pad.is_connected()).count()
    }

    pub(crate) fn is_connected(&self, slot: usize) -> bool {
        self.gamepads.get(slot).is_some_and(GamepadSlot::is_connected)
    }

    fn connected_pad(&self, slot: usize) -> Option<&GamepadSlot> {
        self.gamepads.get(slot).filter(|pad| pad.is_connected())
    }

    pub(crate) fn gamepad_state(&self, slot: usize) -> Option<GamepadState> {
        self.connected_pad(slot).map(|pad| pad.state.clone())
    }

    pub(crate) fn gamepad_button_state(&self, slot: usize, button: GamepadButton) -> InputState {
        self.connected_pad(slot)
            .map_or(InputState::Released, |pad| pad.current[button.index()])
    }

    pub(crate) fn gamepad_axis(&self, slot: usize, axis: GamepadAxis) -> f32 {
        self.connected_pad(slot).map_or(0.0, |pad| {
            normalize_axis(pad.state.raw_axis(axis), pad.state.deadzone)
        })
    }

    pub(crate) fn set_deadzone(&mut self, slot: usize, deadzone: f32) -> bool {
        match self.gamepads.get_mut(slot).filter(|pad| pad.is_connected()) {
            Some(pad) => {
                pad.state.deadzone = clamp_deadzone(deadzone);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(agg: &mut InputAggregate, key: KeyCode, down: bool) {
        agg.apply(RawSample::key(key, down));
    }

    #[test]
    fn key_goes_pressed_held_released() {
        let mut agg = InputAggregate::new(4);
        press(&mut agg, KeyCode::W, true);
        assert_eq!(agg.keyboard.state(KeyCode::W), InputState::Pressed);

        agg.update();
        assert_eq!(agg.keyboard.state(KeyCode::W), InputState::Held);

        // Autorepeat no reactiva el flanco.
        press(&mut agg, KeyCode::W, true);
        assert_eq!(agg.keyboard.state(KeyCode::W), InputState::Held);

        press(&mut agg, KeyCode::W, false);
        assert_eq!(agg.keyboard.state(KeyCode::W), InputState::Released);
    }

    #[test]
    fn sub_frame_tap_ends_released() {
        let mut agg = InputAggregate::new(1);
        press(&mut agg, KeyCode::Space, true);
        press(&mut agg, KeyCode::Space, false);
        agg.update();
        assert_eq!(agg.keyboard.state(KeyCode::Space), InputState::Released);
    }

    #[test]
    fn unknown_key_is_never_tracked() {
        let mut agg = InputAggregate::new(1);
        press(&mut agg, KeyCode::Unknown, true);
        assert_eq!(agg.keyboard.state(KeyCode::Unknown), InputState::Released);
        assert!(agg.keyboard.down().is_empty());
    }

    #[test]
    fn modifiers_follow_the_key_table_without_a_mask() {
        let mut agg = InputAggregate::new(1);
        press(&mut agg, KeyCode::RightShift, true);
        assert!(agg.keyboard.modifiers().shift);
        press(&mut agg, KeyCode::RightShift, false);
        assert!(!agg.keyboard.modifiers().shift);

        agg.apply(RawSample::Key {
            key: KeyCode::A,
            pressed: true,
            modifiers: Some(Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            }),
        });
        assert!(agg.keyboard.modifiers().ctrl);
    }

    #[test]
    fn mouse_delta_and_scroll_are_per_frame() {
        let mut agg = InputAggregate::new(1);
        agg.apply(RawSample::MouseMove { x: 10, y: 20 });
        agg.apply(RawSample::MouseMotion { dx: 5, dy: -3 });
        agg.apply(RawSample::Scroll { dx: 0.0, dy: 1.0 });
        agg.apply(RawSample::Scroll { dx: 0.0, dy: 2.0 });
        agg.update();
        assert_eq!(agg.mouse.position(), (15, 17));
        assert_eq!(agg.mouse.delta(), (15, 17));
        assert_eq!(agg.mouse.scroll(), (0.0, 3.0));

        agg.update();
        assert_eq!(agg.mouse.delta(), (0, 0));
        assert_eq!(agg.mouse.scroll(), (0.0, 0.0));
    }

    #[test]
    fn second_update_without_samples_changes_nothing() {
        let mut agg = InputAggregate::new(2);
        press(&mut agg, KeyCode::A, true);
        agg.apply(RawSample::button(MouseButton::Left, true));
        agg.update();
        let keys = agg.keyboard.current;
        let buttons = agg.mouse.current;
        agg.update();
        assert_eq!(agg.keyboard.current, keys);
        assert_eq!(agg.mouse.current, buttons);
        assert_eq!(agg.mouse.delta(), (0, 0));
    }

    #[test]
    fn gamepad_samples_need_a_connected_slot() {
        let mut agg = InputAggregate::new(2);
        let sample = GamepadSample::Button {
            button: GamepadButton::A,
            pressed: true,
        };
        assert!(!agg.apply_gamepad(0, sample, 1));
        assert!(!agg.apply_gamepad(7, sample, 1));

        agg.set_connected(0, "Pad".into(), 0.15);
        assert!(agg.apply_gamepad(0, sample, 42));
        assert_eq!(agg.gamepad_button_state(0, GamepadButton::A), InputState::Pressed);
        assert_eq!(agg.gamepad_state(0).map(|s| s.last_update_ms), Some(42));

        agg.update();
        assert_eq!(agg.gamepad_button_state(0, GamepadButton::A), InputState::Held);
    }

    #[test]
    fn lost_slots_read_as_disconnected() {
        let mut agg = InputAggregate::new(1);
        agg.set_connected(0, "Pad".into(), 0.15);
        agg.apply_gamepad(
            0,
            GamepadSample::Axis {
                axis: GamepadAxis::LeftX,
                value: 1.0,
            },
            0,
        );
        agg.set_lost(0);
        assert!(!agg.is_connected(0));
        assert_eq!(agg.gamepad_axis(0, GamepadAxis::LeftX), 0.0);
        assert_eq!(agg.gamepad_state(0), None);
        assert_eq!(agg.slot_status(0), SlotStatus::Lost);
    }

    #[test]
    fn deadzone_is_per_slot() {
        let mut agg = InputAggregate::new(2);
        agg.set_connected(0, "A".into(), 0.15);
        agg.set_connected(1, "B".into(), 0.15);
        for slot in 0..2 {
            agg.apply_gamepad(
                slot,
                GamepadSample::Axis {
                    axis: GamepadAxis::LeftX,
                    value: 0.25,
                },
                0,
            );
        }
        assert!(agg.set_deadzone(0, 0.3));
        assert_eq!(agg.gamepad_axis(0, GamepadAxis::LeftX), 0.0);
        assert!(agg.gamepad_axis(1, GamepadAxis::LeftX) > 0.0);
    }

    #[test]
    fn reset_releases_everything_but_keeps_pads() {
        let mut agg = InputAggregate::new(1);
        agg.set_connected(0, "Pad".into(), 0.15);
        press(&mut agg, KeyCode::Q, true);
        agg.apply_gamepad(
            0,
            GamepadSample::Button {
                button: GamepadButton::B,
                pressed: true,
            },
            0,
        );
        agg.reset();
        assert_eq!(agg.keyboard.state(KeyCode::Q), InputState::Released);
        assert_eq!(agg.gamepad_button_state(0, GamepadButton::B), InputState::Released);
        assert!(agg.is_connected(0));
    }
}
