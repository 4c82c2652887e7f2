use std::hash::Hash;

use crate::model::{GamepadAxis, GamepadButton, GamepadState, InputState, Modifiers, MouseButton};

/// # Trait `InputStateExt`
///
/// Define la interfaz de **consulta del estado de entrada** en el frame actual.
///
/// Este trait representa la vista de solo lectura que la aplicación usa una
/// vez por frame (o las veces que quiera entre dos `update()`): qué teclas
/// están activas, recién presionadas o soltadas, dónde está el puntero y qué
/// hacen los gamepads conectados.
///
/// Lo implementan tanto [`InputEngine`](crate::InputEngine) como su vista
/// clonable [`InputHandle`](crate::InputHandle), de modo que el código de juego
/// puede escribirse contra `impl InputStateExt` sin saber desde qué hilo lee.
///
/// ## Propósito
/// - Ofrecer una vista directa y consistente del estado de todos los dispositivos.
/// - Permitir consultas rápidas sin exponer los locks internos.
/// - Devolver valores seguros para índices inválidos: `Released`, `0.0`,
///   `false` o `None`, nunca un pánico.
///
/// ## Parámetros genéricos
/// - `K`: Tipo de tecla (por defecto [`KeyCode`](crate::KeyCode)).
/// - `S`: Tipo de estado (por defecto [`InputState`]).
///
/// ## Ejemplo de uso
/// ```rust
/// use orbit_input::{InputStateExt, KeyCode};
///
/// fn check_player_jump(input: &impl InputStateExt) {
///     if input.is_key_pressed(KeyCode::Space) {
///         println!("El jugador saltó!");
///     }
///
///     if input.active_combo(&[KeyCode::LeftCtrl, KeyCode::S]) {
///         println!("Guardando partida...");
///     }
/// }
/// ```
pub trait InputStateExt<K = crate::KeyCode, S = InputState>
where
    K: Copy + PartialEq + Hash,
    S: Copy + PartialEq + From<InputState>,
{
    // ==================== TECLADO ====================

    /// Estado de tres fases de una tecla.
    fn key_state(&self, key: K) -> S;

    /// Teclas actualmente abajo (`Pressed` o `Held`), en orden de índice.
    fn keys_down(&self) -> Vec<K>;

    /// Modificadores del evento de teclado más reciente.
    fn modifiers(&self) -> Modifiers;

    /// Retorna `true` sólo en el frame en que la tecla pasó a pulsada.
    fn is_key_pressed(&self, key: K) -> bool {
        self.key_state(key) == S::from(InputState::Pressed)
    }

    /// Retorna `true` mientras la tecla siga pulsada tras su primer frame.
    fn is_key_held(&self, key: K) -> bool {
        self.key_state(key) == S::from(InputState::Held)
    }

    /// Retorna `true` si la tecla está **completamente liberada**.
    fn is_key_released(&self, key: K) -> bool {
        self.key_state(key) == S::from(InputState::Released)
    }

    /// Retorna `true` si **cualquier tecla** se encuentra abajo.
    fn any_key_down(&self) -> bool {
        !self.keys_down().is_empty()
    }

    /// Verifica si una combinación de teclas se encuentra activa (todas abajo).
    ///
    /// Un combo vacío nunca está activo.
    ///
    /// # Ejemplo
    /// ```rust,ignore
    /// if input.active_combo(&[KeyCode::LeftCtrl, KeyCode::C]) {
    ///     copy_to_clipboard();
    /// }
    /// ```
    fn active_combo(&self, combo: &[K]) -> bool {
        !combo.is_empty() && combo.iter().all(|key| !self.is_key_released(*key))
    }

    // ==================== PUNTERO ====================

    fn mouse_button_state(&self, button: MouseButton) -> InputState;

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_button_state(button) == InputState::Pressed
    }

    fn is_mouse_button_held(&self, button: MouseButton) -> bool {
        self.mouse_button_state(button) == InputState::Held
    }

    fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        self.mouse_button_state(button) == InputState::Released
    }

    /// Posición del puntero en coordenadas de ventana.
    fn mouse_position(&self) -> (i32, i32);

    /// Desplazamiento desde el `update()` anterior.
    fn mouse_delta(&self) -> (i32, i32);

    /// Rueda acumulada durante el último frame, en "notches" `(horizontal, vertical)`.
    fn scroll_delta(&self) -> (f32, f32);

    fn is_mouse_visible(&self) -> bool;

    fn is_mouse_captured(&self) -> bool;

    // ==================== GAMEPADS ====================

    /// Número de slots con un mando conectado.
    fn connected_gamepad_count(&self) -> usize;

    /// `false` también para slots fuera de capacidad.
    fn is_gamepad_connected(&self, slot: usize) -> bool;

    /// Copia del registro completo de un mando, `None` si el slot no está conectado.
    ///
    /// Los ejes de la copia son los valores crudos normalizados, **sin** deadzone;
    /// usa [`gamepad_axis`](Self::gamepad_axis) para leerlos ya filtrados.
    fn gamepad_state(&self, slot: usize) -> Option<GamepadState>;

    fn gamepad_button_state(&self, slot: usize, button: GamepadButton) -> InputState;

    fn is_gamepad_button_pressed(&self, slot: usize, button: GamepadButton) -> bool {
        self.gamepad_button_state(slot, button) == InputState::Pressed
    }

    fn is_gamepad_button_held(&self, slot: usize, button: GamepadButton) -> bool {
        self.gamepad_button_state(slot, button) == InputState::Held
    }

    fn is_gamepad_button_released(&self, slot: usize, button: GamepadButton) -> bool {
        self.gamepad_button_state(slot, button) == InputState::Released
    }

    /// Valor de un eje con la deadzone del slot aplicada. `0.0` si no hay mando.
    fn gamepad_axis(&self, slot: usize, axis: GamepadAxis) -> f32;
}
