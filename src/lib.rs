//! # Crate `orbit_input`
//!
//! **Runtime oficial de input** de Orbit Engine: agrega teclado, puntero y
//! hasta 16 gamepads en un único estado consultable una vez por frame.
//!
//! Cada dispositivo se muestrea en su propio hilo (o llega empujado desde el
//! bucle de eventos de la ventana), se normaliza al vocabulario canónico y se
//! aplica a un agregado protegido por un único lock. La aplicación llama a
//! [`RuntimeExt::update`] una vez por frame y consulta con [`InputStateExt`].
//!
//! ---
//!
//! ## Modelo de tres fases
//!
//! Cada tecla y botón está siempre en **exactamente uno** de:
//!
//! - [`InputState::Released`]: sin pulsar.
//! - [`InputState::Pressed`]: flanco de un frame; la entrada acaba de bajar.
//! - [`InputState::Held`]: sigue abajo desde un frame anterior.
//!
//! ```text
//!   muestra down           update() con la tecla abajo
//! Released ──────▶ Pressed ──────────────────────────▶ Held
//!     ▲                │                                 │
//!     └──── muestra up ┴─────────────────────────────────┘
//! ```
//!
//! ---
//!
//! ## Ejemplo: un frame
//!
//! ```rust
//! use orbit_input::backends::VirtualDevice;
//! use orbit_input::{InputConfig, InputEngine, InputStateExt, KeyCode, RuntimeExt};
//!
//! let (keyboard, keys) = VirtualDevice::new("virtual-keyboard");
//! let mut engine = InputEngine::builder(InputConfig::default())
//!     .keyboard(keyboard)
//!     .build();
//! engine.initialize()?;
//!
//! keys.press(KeyCode::Space);
//! # let start = std::time::Instant::now();
//! # while !engine.is_key_pressed(KeyCode::Space) && start.elapsed().as_secs() < 5 {
//! #     std::thread::sleep(std::time::Duration::from_millis(1));
//! # }
//! if engine.is_key_pressed(KeyCode::Space) {
//!     println!("El jugador saltó!");
//! }
//!
//! engine.update();
//! assert!(engine.is_key_held(KeyCode::Space));
//! # Ok::<(), orbit_input::InputError>(())
//! ```
//!
//! ---
//!
//! ## Backends
//!
//! | Familia | Backends | Cómo llega la entrada |
//! |---|---|---|
//! | Pull | `EvdevKeyboard`, `EvdevPointer` (Linux), [`VirtualDevice`](backends::VirtualDevice) | hilo propio, lectura no bloqueante |
//! | Push | [`X11Backend`](backends::X11Backend), [`Win32Backend`](backends::Win32Backend) | [`InputEngine::process_event`] desde el bombeo de eventos |
//! | Mandos | `JoystickProvider` (Linux), `GilrsProvider` (resto, vía `gilrs`), [`VirtualGamepadHub`](backends::VirtualGamepadHub) | un hilo por mando + escaneo de hot-plug |
//!
//! [`InputEngine::with_platform_defaults`] elige los backends nativos de la
//! plataforma; [`InputEngine::builder`] permite combinar los que quieras.
//!
//! ---
//!
//! ## Características
//!
//! - 🔒 **Un solo lock** para todo el agregado; nunca se mantiene durante una lectura de dispositivo
//! - 🧵 **Sin hilos sueltos** — cada hilo se señala y se espera al apagar (también en `Drop`)
//! - 🎮 **Hot-plug** de mandos con slots estables y deadzone por slot
//! - 🧪 **Dispositivos virtuales** para tests, replays y entrada sintética
//! - ⚙️ **Configuración** TOML con [`InputConfig`]
//!
//! ---
//!
//! ## Features de Cargo
//!
//! - `std_lock` (por defecto): `std::sync::Mutex` con recuperación de envenenamiento.
//! - `parking_lot`: usa `parking_lot::Mutex`.
//!
//! ---
//!
//! ## Módulos
//!
//! - [`model`]: identidades canónicas y estado de tres fases
//! - [`tables`]: traducción de códigos nativos
//! - [`traits`]: el protocolo que implementan runtime y backends
//! - [`engine`]: el runtime
//! - [`backends`]: fuentes de entrada
//! - [`deadzone`], [`config`], [`error`]

pub mod backends;
pub mod config;
pub mod deadzone;
pub mod engine;
pub mod error;
pub mod model;
pub(crate) mod sync;
pub mod tables;
pub mod traits;

// Re-exports limpios
pub use config::{InputConfig, MAX_GAMEPAD_SLOTS};
pub use deadzone::normalize_axis;
pub use engine::{InputEngine, InputEngineBuilder, InputHandle};
pub use error::{DeviceError, InputError};
pub use model::{
    GamepadAxis, GamepadButton, GamepadSample, GamepadState, InputState, KeyCode, Modifiers,
    MouseButton, RawSample, DEFAULT_DEADZONE,
};
pub use traits::{
    GamepadDescriptor, GamepadDeviceExt, GamepadProviderExt, InputStateExt, KeyExt, KeyStateExt,
    PollBackendExt, PushBackendExt, RuntimeExt, WindowExt,
};
