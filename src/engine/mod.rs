//! El runtime: hilos de sondeo, gestor de mandos y el paso de frame.
//!
//! [`InputEngine`] es el único dueño del `update()`. Las lecturas pueden hacerse
//! sobre el motor o sobre cualquier [`InputHandle`] clonado desde él.

pub(crate) mod aggregate;
pub(crate) mod gamepads;
pub(crate) mod handle;
pub(crate) mod worker;

use std::thread;
use std::time::Duration;

use crate::config::InputConfig;
use crate::error::InputError;
use crate::model::{
    GamepadAxis, GamepadButton, GamepadState, InputState, KeyCode, Modifiers, MouseButton,
    RawSample,
};
use crate::sync::Mutex;
use crate::traits::{
    GamepadProviderExt, InputStateExt, PollBackendExt, PushBackendExt, RuntimeExt, WindowExt,
};

pub use gamepads::UNKNOWN_GAMEPAD;
pub use handle::InputHandle;

use gamepads::{GamepadManager, SharedManager};
use worker::{StopFlag, Worker};

const LOG: &str = "orbit_input::engine";

type BoxedPoller = Box<dyn PollBackendExt>;

/// Configura los backends de un [`InputEngine`] antes de construirlo.
///
/// # Ejemplo
/// ```rust
/// use orbit_input::backends::{VirtualDevice, VirtualGamepadHub};
/// use orbit_input::{InputConfig, InputEngine, RuntimeExt};
///
/// let (keyboard, _keys) = VirtualDevice::new("virtual-keyboard");
/// let hub = VirtualGamepadHub::new();
///
/// let engine = InputEngine::builder(InputConfig::default())
///     .keyboard(keyboard)
///     .gamepads(hub.provider())
///     .build();
/// assert_eq!(engine.backend_name(), "virtual-keyboard+virtual-gamepad");
/// ```
pub struct InputEngineBuilder {
    config: InputConfig,
    pollers: Vec<BoxedPoller>,
    provider: Option<Box<dyn GamepadProviderExt>>,
    window: Option<Box<dyn WindowExt>>,
}

impl InputEngineBuilder {
    /// Backend de teclado. Equivale a [`backend`](Self::backend).
    pub fn keyboard(self, backend: impl PollBackendExt) -> Self {
        self.backend(backend)
    }

    /// Backend de puntero. Equivale a [`backend`](Self::backend).
    pub fn pointer(self, backend: impl PollBackendExt) -> Self {
        self.backend(backend)
    }

    /// Añade cualquier backend de sondeo; cada uno tiene su propio hilo.
    pub fn backend(mut self, backend: impl PollBackendExt) -> Self {
        self.pollers.push(Box::new(backend));
        self
    }

    /// Fuente de mandos. Sólo hay una; llamarlo de nuevo la reemplaza.
    pub fn gamepads(mut self, provider: impl GamepadProviderExt) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Ventana usada por las operaciones de cursor (`set_mouse_*`).
    pub fn window(mut self, window: impl WindowExt) -> Self {
        self.window = Some(Box::new(window));
        self
    }

    /// Valida la configuración y construye el motor, todavía sin hilos.
    ///
    /// Los hilos arrancan con [`RuntimeExt::initialize`].
    pub fn build(self) -> InputEngine {
        let config = self.config.validated();
        let handle = InputHandle::new(config.max_gamepads);

        let mut names: Vec<&'static str> = self.pollers.iter().map(|p| p.name()).collect();
        if let Some(provider) = &self.provider {
            names.push(provider.name());
        }
        let backend_name = if names.is_empty() {
            "none".to_string()
        } else {
            names.join("+")
        };

        let manager = GamepadManager::new(
            self.provider,
            handle.clone(),
            config.max_gamepads,
            config.default_deadzone,
            config.poll_interval(),
        );

        InputEngine {
            config,
            handle,
            pollers: self.pollers,
            workers: Vec::new(),
            gamepads: SharedManager::new(Mutex::new(manager)),
            hotplug: None,
            window: self.window,
            running: false,
            backend_name,
        }
    }
}

/// Runtime de entrada: agrega teclado, puntero y mandos en un único estado
/// consultable una vez por frame.
///
/// # Ejemplo
/// ```rust
/// use orbit_input::{InputConfig, InputEngine, InputState, InputStateExt, KeyCode, RawSample, RuntimeExt};
///
/// let mut engine = InputEngine::builder(InputConfig::default()).build();
///
/// engine.submit(RawSample::key(KeyCode::W, true));
/// assert_eq!(engine.key_state(KeyCode::W), InputState::Pressed);
///
/// engine.update();
/// assert_eq!(engine.key_state(KeyCode::W), InputState::Held);
///
/// engine.submit(RawSample::key(KeyCode::W, false));
/// assert_eq!(engine.key_state(KeyCode::W), InputState::Released);
/// ```
pub struct InputEngine {
    config: InputConfig,
    handle: InputHandle,
    pollers: Vec<BoxedPoller>,
    workers: Vec<PollerWorker>,
    gamepads: SharedManager,
    hotplug: Option<Worker>,
    window: Option<Box<dyn WindowExt>>,
    running: bool,
    backend_name: String,
}

impl InputEngine {
    /// Empieza un motor sin backends; añádelos con el builder.
    pub fn builder(config: InputConfig) -> InputEngineBuilder {
        InputEngineBuilder {
            config,
            pollers: Vec::new(),
            provider: None,
            window: None,
        }
    }

    /// Backends nativos de la plataforma: evdev y joystick en Linux.
    ///
    /// En otras plataformas los mandos llegan vía `gilrs` (XInput en Windows);
    /// teclado y ratón no tienen backend de sondeo y llegan por
    /// [`process_event`](Self::process_event).
    pub fn with_platform_defaults(config: InputConfig) -> InputEngine {
        #[cfg(target_os = "linux")]
        {
            use crate::backends::linux::{EvdevKeyboard, EvdevPointer, JoystickProvider};

            let keyboard = EvdevKeyboard::new(config.keyboard_device.clone());
            let pointer = EvdevPointer::new(config.pointer_device.clone());
            let joysticks = JoystickProvider::new(config.joystick_dir.clone());
            Self::builder(config)
                .keyboard(keyboard)
                .pointer(pointer)
                .gamepads(joysticks)
                .build()
        }
        #[cfg(not(target_os = "linux"))]
        {
            use crate::backends::GilrsProvider;

            let gamepads = GilrsProvider::new(config.poll_interval());
            Self::builder(config).gamepads(gamepads).build()
        }
    }

    /// Configuración efectiva (ya validada).
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Conecta el colaborador de ventana usado por las operaciones de cursor.
    pub fn attach_window(&mut self, window: impl WindowExt) {
        self.window = Some(Box::new(window));
    }

    // ==================== CAMINO PUSH ====================

    /// Decodifica y aplica un evento nativo. Devuelve `true` si fue consumido.
    pub fn process_event<B: PushBackendExt>(&self, backend: &B, event: &B::Event) -> bool {
        self.handle.process_event(backend, event)
    }

    /// Aplica una muestra cruda directamente.
    pub fn submit(&self, sample: RawSample) {
        self.handle.submit(sample);
    }

    // ==================== CONTROL ====================

    /// Mueve el puntero. El estado se actualiza siempre; el cursor real sólo
    /// si hay una ventana conectada.
    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.handle.lock().mouse.set_position(x, y);
        if let Some(window) = self.window.as_mut() {
            window.warp_pointer(x, y);
        }
    }

    /// Muestra u oculta el cursor. Sin ventana sólo cambia el estado.
    pub fn set_mouse_visible(&mut self, visible: bool) {
        self.handle.lock().mouse.set_visible(visible);
        if let Some(window) = self.window.as_mut() {
            window.set_cursor_visible(visible);
        }
    }

    /// Captura (o suelta) el puntero en la ventana. Sin ventana sólo cambia el estado.
    pub fn set_mouse_capture(&mut self, captured: bool) {
        self.handle.lock().mouse.set_captured(captured);
        if let Some(window) = self.window.as_mut() {
            window.set_pointer_capture(captured);
        }
    }

    /// Cambia la deadzone de un slot, limitada a `[0, 0.99]`.
    ///
    /// Devuelve `false` si el slot no está conectado.
    pub fn set_gamepad_deadzone(&self, slot: usize, deadzone: f32) -> bool {
        self.handle.lock().set_deadzone(slot, deadzone)
    }

    /// Escaneo de hot-plug bajo demanda. Devuelve los mandos nuevos.
    pub fn scan_gamepads(&self) -> usize {
        self.gamepads.lock().scan()
    }

    /// Desconecta un slot: su hilo se detiene y se espera antes de liberarlo.
    pub fn disconnect_gamepad(&self, slot: usize) -> bool {
        self.gamepads.lock().disconnect(slot)
    }

    /// No hace nada: el modelo es de estado continuo, no hay cola de eventos
    /// que vaciar. Existe para los motores que lo llaman al final del frame.
    pub fn clear_events(&mut self) {}

    // ==================== NOMBRES ====================

    /// Nombre legible de una tecla (`"Unknown"` para las desconocidas).
    pub fn key_name(key: KeyCode) -> &'static str {
        key.name()
    }

    /// Nombre legible de un botón de ratón.
    pub fn mouse_button_name(button: MouseButton) -> &'static str {
        button.name()
    }

    /// Nombre legible de un botón de mando.
    pub fn gamepad_button_name(button: GamepadButton) -> &'static str {
        button.name()
    }

    /// Arranca un hilo por backend de sondeo.
    ///
    /// El backend se entrega al hilo sólo después de que el hilo exista; si
    /// `spawn` falla, todos los backends (el que falló y los que faltaban)
    /// vuelven a `self.pollers` para un `restart` posterior.
    fn start_pollers<S>(&mut self, mut spawn: S) -> Result<(), InputError>
    where
        S: FnMut(String, PollerBody) -> Result<PollerWorker, InputError>,
    {
        let poll = self.config.poll_interval();
        let mut pending = std::mem::take(&mut self.pollers).into_iter();

        while let Some(mut backend) = pending.next() {
            if let Err(err) = backend.initialize() {
                log::warn!(target: LOG, "{} no disponible: {err}", backend.name());
            }
            let (hand_over, receive) = crossbeam_channel::bounded::<BoxedPoller>(1);
            let handle = self.handle.clone();
            let body: PollerBody = Box::new(move |stop: StopFlag| {
                let backend = receive.recv().ok()?;
                Some(poll_loop(backend, handle, stop, poll))
            });

            match spawn(format!("orbit-{}", backend.name()), body) {
                Ok(worker) => {
                    if let Err(crossbeam_channel::SendError(backend)) = hand_over.send(backend) {
                        self.pollers.push(backend);
                    }
                    self.workers.push(worker);
                }
                Err(err) => {
                    backend.shutdown();
                    self.stop_workers();
                    self.pollers.push(backend);
                    self.pollers.extend(pending);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    fn stop_workers(&mut self) {
        if let Some(mut hotplug) = self.hotplug.take() {
            hotplug.stop_and_join();
        }
        for mut worker in self.workers.drain(..) {
            match worker.stop_and_join().flatten() {
                Some(backend) => self.pollers.push(backend),
                None => log::warn!(target: LOG, "backend `{}` perdido", worker.name()),
            }
        }
    }
}

/// Cuerpo de un hilo de sondeo: espera su backend y lo devuelve al terminar.
type PollerBody = Box<dyn FnOnce(StopFlag) -> Option<BoxedPoller> + Send>;

type PollerWorker = Worker<Option<BoxedPoller>>;

fn poll_loop(
    mut backend: BoxedPoller,
    handle: InputHandle,
    stop: StopFlag,
    poll: Duration,
) -> BoxedPoller {
    let name = backend.name();
    while !stop.is_raised() {
        match backend.poll_once() {
            Ok(Some(sample)) => handle.submit(sample),
            Ok(None) => thread::sleep(poll),
            Err(err) => {
                log::trace!(target: LOG, "{name}: {err}");
                thread::sleep(poll);
            }
        }
    }
    backend.shutdown();
    backend
}

impl RuntimeExt for InputEngine {
    type Error = InputError;
    type Handle = InputHandle;

    fn handle(&self) -> InputHandle {
        self.handle.clone()
    }

    fn initialize(&mut self) -> Result<(), InputError> {
        if self.running {
            return Ok(());
        }
        let poll = self.config.poll_interval();

        self.start_pollers(|name, body| Worker::spawn(name, body))?;

        let has_provider = {
            let mut manager = self.gamepads.lock();
            manager.scan();
            manager.has_provider()
        };

        if let (true, Some(interval)) = (has_provider, self.config.hotplug_interval()) {
            let manager = SharedManager::clone(&self.gamepads);
            match Worker::spawn("orbit-hotplug", move |stop| {
                gamepads::hotplug_loop(manager, stop, interval, poll)
            }) {
                Ok(worker) => self.hotplug = Some(worker),
                Err(err) => {
                    self.stop_workers();
                    self.gamepads.lock().shutdown();
                    return Err(err);
                }
            }
        }

        self.running = true;
        log::info!(target: LOG, "runtime iniciado ({})", self.backend_name);
        Ok(())
    }

    fn update(&mut self) {
        if let Some(mut manager) = self.gamepads.try_lock() {
            manager.reap_lost();
        }
        self.handle.lock().update();
    }

    fn shutdown(&mut self) {
        self.stop_workers();
        self.gamepads.lock().shutdown();
        if std::mem::replace(&mut self.running, false) {
            log::info!(target: LOG, "runtime detenido");
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn events_processed(&self) -> u64 {
        self.handle.events_processed()
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }

    fn reset_state(&mut self) {
        self.handle.lock().reset();
    }
}

impl Drop for InputEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl InputStateExt for InputEngine {
    fn key_state(&self, key: KeyCode) -> InputState {
        self.handle.key_state(key)
    }

    fn keys_down(&self) -> Vec<KeyCode> {
        self.handle.keys_down()
    }

    fn modifiers(&self) -> Modifiers {
        self.handle.modifiers()
    }

    fn mouse_button_state(&self, button: MouseButton) -> InputState {
        self.handle.mouse_button_state(button)
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.handle.mouse_position()
    }

    fn mouse_delta(&self) -> (i32, i32) {
        self.handle.mouse_delta()
    }

    fn scroll_delta(&self) -> (f32, f32) {
        self.handle.scroll_delta()
    }

    fn is_mouse_visible(&self) -> bool {
        self.handle.is_mouse_visible()
    }

    fn is_mouse_captured(&self) -> bool {
        self.handle.is_mouse_captured()
    }

    fn connected_gamepad_count(&self) -> usize {
        self.handle.connected_gamepad_count()
    }

    fn is_gamepad_connected(&self, slot: usize) -> bool {
        self.handle.is_gamepad_connected(slot)
    }

    fn gamepad_state(&self, slot: usize) -> Option<GamepadState> {
        self.handle.gamepad_state(slot)
    }

    fn gamepad_button_state(&self, slot: usize, button: GamepadButton) -> InputState {
        self.handle.gamepad_button_state(slot, button)
    }

    fn gamepad_axis(&self, slot: usize, axis: GamepadAxis) -> f32 {
        self.handle.gamepad_axis(slot, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default, Clone)]
    struct RecordingWindow {
        warps: Arc<AtomicU32>,
    }

    impl WindowExt for RecordingWindow {
        fn warp_pointer(&mut self, _x: i32, _y: i32) {
            self.warps.fetch_add(1, Ordering::SeqCst);
        }

        fn set_cursor_visible(&mut self, _visible: bool) {}

        fn set_pointer_capture(&mut self, _captured: bool) {}
    }

    #[test]
    fn update_works_before_initialize() {
        let mut engine = InputEngine::builder(InputConfig::default()).build();
        engine.submit(RawSample::key(KeyCode::A, true));
        engine.update();
        assert!(engine.is_key_held(KeyCode::A));
        assert!(!engine.is_running());
    }

    #[test]
    fn mouse_position_without_window_only_updates_state() {
        let mut engine = InputEngine::builder(InputConfig::default()).build();
        engine.set_mouse_position(40, 50);
        assert_eq!(engine.mouse_position(), (40, 50));

        let window = RecordingWindow::default();
        let warps = Arc::clone(&window.warps);
        engine.attach_window(window);
        engine.set_mouse_position(1, 2);
        assert_eq!(warps.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn visibility_and_capture_flags() {
        let mut engine = InputEngine::builder(InputConfig::default()).build();
        assert!(engine.is_mouse_visible());
        assert!(!engine.is_mouse_captured());
        engine.set_mouse_visible(false);
        engine.set_mouse_capture(true);
        assert!(!engine.is_mouse_visible());
        assert!(engine.is_mouse_captured());
    }

    #[test]
    fn names_and_no_backends() {
        let engine = InputEngine::builder(InputConfig::default()).build();
        assert_eq!(engine.backend_name(), "none");
        assert_eq!(InputEngine::key_name(KeyCode::Unknown), "Unknown");
        assert_eq!(InputEngine::mouse_button_name(MouseButton::Left), "Left Mouse Button");
        assert_eq!(InputEngine::gamepad_button_name(GamepadButton::Start), "Start");
    }

    #[test]
    fn failed_spawn_keeps_every_backend_for_restart() {
        use crate::backends::VirtualDevice;

        let (first, _) = VirtualDevice::new("first");
        let (second, _) = VirtualDevice::new("second");
        let (third, feed) = VirtualDevice::new("third");
        let mut engine = InputEngine::builder(InputConfig::default())
            .backend(first)
            .backend(second)
            .backend(third)
            .build();

        let mut calls = 0;
        let result = engine.start_pollers(|name, body| {
            calls += 1;
            if calls == 2 {
                return Err(InputError::ThreadSpawn {
                    name,
                    source: std::io::Error::other("sin hilos"),
                });
            }
            Worker::spawn(name, body)
        });

        assert!(matches!(result, Err(InputError::ThreadSpawn { .. })));
        assert!(engine.workers.is_empty());
        let mut names: Vec<_> = engine.pollers.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        assert_eq!(names, ["first", "second", "third"]);

        engine.initialize().unwrap();
        feed.send(RawSample::key(KeyCode::Q, true));
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while !engine.is_key_pressed(KeyCode::Q) && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(engine.is_key_pressed(KeyCode::Q));
    }

    #[test]
    fn shutdown_is_idempotent_without_devices() {
        let mut engine = InputEngine::builder(InputConfig::default()).build();
        engine.initialize().unwrap();
        engine.shutdown();
        engine.shutdown();
        assert!(!engine.is_running());
        engine.restart().unwrap();
        assert!(engine.is_running());
    }
}
