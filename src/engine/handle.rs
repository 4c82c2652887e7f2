use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::aggregate::InputAggregate;
use crate::model::{
    GamepadAxis, GamepadButton, GamepadSample, GamepadState, InputState, KeyCode, Modifiers,
    MouseButton, RawSample,
};
use crate::sync::{Mutex, MutexGuard};
use crate::traits::{InputStateExt, PushBackendExt};

#[derive(Debug)]
struct Shared {
    state: Mutex<InputAggregate>,
    events: AtomicU64,
    epoch: Instant,
}

/// Vista compartida del estado de entrada.
///
/// Es barata de clonar y puede enviarse a cualquier hilo: los hilos de sondeo
/// la usan para escribir y el código de la aplicación para leer. Cada consulta
/// toma el lock sólo durante la lectura.
///
/// El paso de frame (`update`) **no** está aquí: pertenece en exclusiva a
/// [`InputEngine`](crate::InputEngine).
///
/// # Ejemplo
/// ```rust
/// use orbit_input::{InputConfig, InputEngine, InputStateExt, KeyCode, RawSample, RuntimeExt};
///
/// let engine = InputEngine::builder(InputConfig::default()).build();
/// let handle = engine.handle();
///
/// std::thread::spawn(move || handle.submit(RawSample::key(KeyCode::W, true)))
///     .join()
///     .unwrap();
///
/// assert!(engine.is_key_pressed(KeyCode::W));
/// ```
#[derive(Debug, Clone)]
pub struct InputHandle {
    shared: Arc<Shared>,
}

impl InputHandle {
    pub(crate) fn new(gamepad_slots: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(InputAggregate::new(gamepad_slots)),
                events: AtomicU64::new(0),
                epoch: Instant::now(),
            }),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, InputAggregate> {
        self.shared.state.lock()
    }

    /// Milisegundos desde la creación del motor.
    pub(crate) fn now_ms(&self) -> u64 {
        u64::try_from(self.shared.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub(crate) fn events_processed(&self) -> u64 {
        self.shared.events.load(Ordering::Relaxed)
    }

    /// Aplica una muestra cruda de teclado o puntero, como lo haría un hilo de sondeo.
    pub fn submit(&self, sample: RawSample) {
        self.lock().apply(sample);
        self.shared.events.fetch_add(1, Ordering::Relaxed);
    }

    /// Aplica la muestra de un mando a su slot.
    ///
    /// Devuelve `false` (y no cuenta el evento) si el slot no está conectado.
    pub(crate) fn submit_gamepad(&self, slot: usize, sample: GamepadSample) -> bool {
        let now = self.now_ms();
        let applied = self.lock().apply_gamepad(slot, sample, now);
        if applied {
            self.shared.events.fetch_add(1, Ordering::Relaxed);
        }
        applied
    }

    /// Camino push: decodifica un evento nativo y lo aplica.
    ///
    /// Devuelve `true` si el evento fue consumido.
    pub fn process_event<B: PushBackendExt>(&self, backend: &B, event: &B::Event) -> bool {
        match backend.decode(event) {
            Some(sample) => {
                self.submit(sample);
                true
            }
            None => false,
        }
    }
}

impl InputStateExt for InputHandle {
    fn key_state(&self, key: KeyCode) -> InputState {
        self.lock().keyboard.state(key)
    }

    fn keys_down(&self) -> Vec<KeyCode> {
        self.lock().keyboard.down()
    }

    fn modifiers(&self) -> Modifiers {
        self.lock().keyboard.modifiers()
    }

    fn mouse_button_state(&self, button: MouseButton) -> InputState {
        self.lock().mouse.state(button)
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.lock().mouse.position()
    }

    fn mouse_delta(&self) -> (i32, i32) {
        self.lock().mouse.delta()
    }

    fn scroll_delta(&self) -> (f32, f32) {
        self.lock().mouse.scroll()
    }

    fn is_mouse_visible(&self) -> bool {
        self.lock().mouse.is_visible()
    }

    fn is_mouse_captured(&self) -> bool {
        self.lock().mouse.is_captured()
    }

    fn connected_gamepad_count(&self) -> usize {
        self.lock().connected_count()
    }

    fn is_gamepad_connected(&self, slot: usize) -> bool {
        self.lock().is_connected(slot)
    }

    fn gamepad_state(&self, slot: usize) -> Option<GamepadState> {
        self.lock().gamepad_state(slot)
    }

    fn gamepad_button_state(&self, slot: usize, button: GamepadButton) -> InputState {
        self.lock().gamepad_button_state(slot, button)
    }

    fn gamepad_axis(&self, slot: usize, axis: GamepadAxis) -> f32 {
        self.lock().gamepad_axis(slot, axis)
    }
}
