//! Capacidades de backend que el runtime selecciona al arrancar.
//!
//! Hay dos familias:
//!
//! - **pull** ([`PollBackendExt`]): el runtime les dedica un hilo que llama a
//!   [`poll_once`](PollBackendExt::poll_once) en bucle (ficheros de dispositivo,
//!   canales virtuales).
//! - **push** ([`PushBackendExt`]): el bombeo de eventos de la ventana entrega
//!   eventos nativos ya recibidos, que el backend sólo decodifica.
//!
//! Los mandos llegan a través de un [`GamepadProviderExt`], que enumera
//! dispositivos y abre un [`GamepadDeviceExt`] por cada slot asignado.

use crate::error::{DeviceError, InputError};
use crate::model::{GamepadSample, RawSample};

/// Backend de sondeo para teclado o puntero.
///
/// # Reglas de implementación
/// - `poll_once` **no debe bloquear**: retorna `Ok(None)` si no hay datos.
/// - Un error nunca debe tumbar el hilo; el runtime duerme y reintenta.
/// - Si el dispositivo desaparece, el backend puede intentar reabrirlo
///   desde `poll_once` (con límite de frecuencia).
pub trait PollBackendExt: Send + 'static {
    /// Nombre corto para logs y para [`RuntimeExt::backend_name`](crate::RuntimeExt::backend_name).
    fn name(&self) -> &'static str;

    /// Abre el dispositivo.
    ///
    /// Un error aquí degrada la capacidad pero no detiene el runtime.
    fn initialize(&mut self) -> Result<(), InputError>;

    /// Cierra el dispositivo. Debe ser idempotente.
    fn shutdown(&mut self);

    /// Lee como mucho una muestra.
    fn poll_once(&mut self) -> Result<Option<RawSample>, DeviceError>;
}

/// Backend empujado por el bucle de eventos de una ventana.
///
/// # Ejemplo
/// ```rust
/// use orbit_input::backends::{Win32Backend, Win32Message};
/// use orbit_input::{KeyCode, PushBackendExt, RawSample};
///
/// let backend = Win32Backend;
/// let down = Win32Message { msg: 0x0100, wparam: 0x57, lparam: 0 };
/// assert_eq!(backend.decode(&down), Some(RawSample::key(KeyCode::W, true)));
/// ```
pub trait PushBackendExt {
    /// Evento nativo tal como lo entrega el bombeo de la ventana.
    type Event;

    fn name(&self) -> &'static str;

    /// Traduce un evento nativo. `None` significa "no consumido".
    fn decode(&self, event: &Self::Event) -> Option<RawSample>;
}

/// Identidad de un mando encontrado durante un escaneo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GamepadDescriptor {
    /// Identificador estable mientras el mando siga enchufado (p. ej. la ruta del fichero).
    pub id: String,
    /// Nombre si el escaneo ya lo conoce.
    pub name: Option<String>,
}

/// Fuente de mandos: enumera y abre.
pub trait GamepadProviderExt: Send + 'static {
    fn name(&self) -> &'static str;

    /// Mandos presentes ahora mismo, conectados o no a un slot.
    fn scan(&mut self) -> Vec<GamepadDescriptor>;

    /// Abre un mando para su hilo de sondeo.
    fn open(&mut self, descriptor: &GamepadDescriptor) -> Result<Box<dyn GamepadDeviceExt>, InputError>;
}

/// Un mando abierto, propiedad exclusiva de su hilo de sondeo.
pub trait GamepadDeviceExt: Send + 'static {
    /// Nombre reportado por el dispositivo, `None` si no lo expone.
    fn name(&self) -> Option<String>;

    /// Lee como mucho una muestra, sin bloquear.
    ///
    /// [`DeviceError::Disconnected`] es permanente: el hilo marca el slot como
    /// perdido y termina.
    fn read_sample(&mut self) -> Result<Option<GamepadSample>, DeviceError>;
}

/// Colaborador de ventana para las operaciones que modifican el cursor.
pub trait WindowExt: Send + 'static {
    fn warp_pointer(&mut self, x: i32, y: i32);

    fn set_cursor_visible(&mut self, visible: bool);

    fn set_pointer_capture(&mut self, captured: bool);
}
