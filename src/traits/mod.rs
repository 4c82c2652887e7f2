//! Protocolo de traits del runtime.
//!
//! - [`keys`]: traducción de códigos y estados nativos.
//! - [`state`]: superficie de consulta del estado por frame.
//! - [`runtime`]: ciclo de vida.
//! - [`backend`]: capacidades de los backends y del colaborador de ventana.

pub mod backend;
pub mod keys;
pub mod runtime;
pub mod state;

pub use backend::{
    GamepadDescriptor, GamepadDeviceExt, GamepadProviderExt, PollBackendExt, PushBackendExt,
    WindowExt,
};
pub use keys::{KeyExt, KeyStateExt};
pub use runtime::RuntimeExt;
pub use state::InputStateExt;
