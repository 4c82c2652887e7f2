//! Dispositivos virtuales alimentados por canales.
//!
//! Sirven para tests, para reproducir grabaciones y para entrada sintética
//! (bots, herramientas de accesibilidad). Se comportan exactamente como un
//! dispositivo real: tienen su hilo de sondeo y pasan por el mismo agregado.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};

use crate::error::{DeviceError, InputError};
use crate::model::{GamepadAxis, GamepadButton, GamepadSample, KeyCode, MouseButton, RawSample};
use crate::sync::Mutex;
use crate::traits::{GamepadDescriptor, GamepadDeviceExt, GamepadProviderExt, PollBackendExt};

// ==================== TECLADO / PUNTERO ====================

/// Backend de sondeo que lee muestras de un canal.
#[derive(Debug)]
pub struct VirtualDevice {
    name: &'static str,
    receiver: Receiver<RawSample>,
}

/// Extremo emisor de un [`VirtualDevice`].
#[derive(Debug, Clone)]
pub struct VirtualFeed {
    sender: Sender<RawSample>,
}

impl VirtualDevice {
    /// Crea el dispositivo y el emisor con el que se le inyectan muestras.
    pub fn new(name: &'static str) -> (VirtualDevice, VirtualFeed) {
        let (sender, receiver) = unbounded();
        (VirtualDevice { name, receiver }, VirtualFeed { sender })
    }
}

impl PollBackendExt for VirtualDevice {
    fn name(&self) -> &'static str {
        self.name
    }

    fn initialize(&mut self) -> Result<(), InputError> {
        Ok(())
    }

    fn shutdown(&mut self) {}

    fn poll_once(&mut self) -> Result<Option<RawSample>, DeviceError> {
        match self.receiver.try_recv() {
            Ok(sample) => Ok(Some(sample)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(DeviceError::Transient(format!("{}: sin emisores", self.name)))
            }
        }
    }
}

impl VirtualFeed {
    /// Devuelve `false` si el dispositivo ya no existe.
    pub fn send(&self, sample: RawSample) -> bool {
        self.sender.send(sample).is_ok()
    }

    /// Tecla abajo.
    pub fn press(&self, key: KeyCode) -> bool {
        self.send(RawSample::key(key, true))
    }

    /// Tecla arriba.
    pub fn release(&self, key: KeyCode) -> bool {
        self.send(RawSample::key(key, false))
    }

    /// Botón de ratón abajo (`true`) o arriba.
    pub fn button(&self, button: MouseButton, pressed: bool) -> bool {
        self.send(RawSample::button(button, pressed))
    }

    /// Posición absoluta del puntero.
    pub fn move_to(&self, x: i32, y: i32) -> bool {
        self.send(RawSample::MouseMove { x, y })
    }

    /// Scroll en "notches"; se acumula hasta el siguiente `update`.
    pub fn scroll(&self, dx: f32, dy: f32) -> bool {
        self.send(RawSample::Scroll { dx, dy })
    }
}

// ==================== MANDOS ====================

#[derive(Debug)]
struct PluggedPad {
    id: String,
    name: String,
    receiver: Receiver<GamepadSample>,
}

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    pads: Vec<PluggedPad>,
}

/// "Puerto USB" virtual: se enchufan y desenchufan mandos que el runtime
/// descubre con su escaneo de hot-plug.
///
/// # Ejemplo
/// ```rust
/// use orbit_input::backends::VirtualGamepadHub;
/// use orbit_input::GamepadButton;
///
/// let hub = VirtualGamepadHub::new();
/// let pad = hub.plug("Virtual Pad");
/// assert_eq!(hub.plugged(), 1);
///
/// pad.press(GamepadButton::A);
/// pad.unplug();
/// assert_eq!(hub.plugged(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VirtualGamepadHub {
    inner: Arc<Mutex<HubInner>>,
}

impl VirtualGamepadHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enchufa un mando nuevo. Se desenchufa al soltar el [`VirtualGamepad`].
    pub fn plug(&self, name: impl Into<String>) -> VirtualGamepad {
        let (sender, receiver) = unbounded();
        let mut inner = self.inner.lock();
        let id = format!("virtual-pad-{}", inner.next_id);
        inner.next_id += 1;
        inner.pads.push(PluggedPad {
            id: id.clone(),
            name: name.into(),
            receiver,
        });
        VirtualGamepad {
            id,
            sender,
            hub: Arc::clone(&self.inner),
        }
    }

    /// Mandos enchufados ahora mismo.
    pub fn plugged(&self) -> usize {
        self.inner.lock().pads.len()
    }

    /// Proveedor para [`InputEngineBuilder::gamepads`](crate::engine::InputEngineBuilder::gamepads).
    pub fn provider(&self) -> VirtualGamepadProvider {
        self.provider_named("virtual-gamepad")
    }

    /// Igual que [`provider`](Self::provider), con otro nombre de backend.
    ///
    /// Lo usan los puentes que reparten el flujo de eventos de otra
    /// biblioteca de mandos entre mandos del hub.
    pub fn provider_named(&self, name: &'static str) -> VirtualGamepadProvider {
        VirtualGamepadProvider {
            name,
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Un mando virtual enchufado.
#[derive(Debug)]
pub struct VirtualGamepad {
    id: String,
    sender: Sender<GamepadSample>,
    hub: Arc<Mutex<HubInner>>,
}

impl VirtualGamepad {
    /// Identificador que verá el escaneo.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Devuelve `false` si el hub ya no lee este mando.
    pub fn send(&self, sample: GamepadSample) -> bool {
        self.sender.send(sample).is_ok()
    }

    /// Botón del mando abajo.
    pub fn press(&self, button: GamepadButton) -> bool {
        self.send(GamepadSample::Button {
            button,
            pressed: true,
        })
    }

    /// Botón del mando arriba.
    pub fn release(&self, button: GamepadButton) -> bool {
        self.send(GamepadSample::Button {
            button,
            pressed: false,
        })
    }

    /// Valor ya normalizado: `[-1, 1]` para sticks, `[0, 1]` para gatillos.
    pub fn set_axis(&self, axis: GamepadAxis, value: f32) -> bool {
        self.send(GamepadSample::Axis { axis, value })
    }

    /// Desenchufa el mando: su hilo verá una desconexión permanente en
    /// cuanto vacíe las muestras pendientes.
    pub fn unplug(self) {}
}

impl Drop for VirtualGamepad {
    fn drop(&mut self) {
        self.hub.lock().pads.retain(|pad| pad.id != self.id);
    }
}

/// Lado "sistema" del hub, usado por el gestor de mandos.
#[derive(Debug, Clone)]
pub struct VirtualGamepadProvider {
    name: &'static str,
    inner: Arc<Mutex<HubInner>>,
}

impl GamepadProviderExt for VirtualGamepadProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn scan(&mut self) -> Vec<GamepadDescriptor> {
        self.inner
            .lock()
            .pads
            .iter()
            .map(|pad| GamepadDescriptor {
                id: pad.id.clone(),
                name: Some(pad.name.clone()),
            })
            .collect()
    }

    fn open(&mut self, descriptor: &GamepadDescriptor) -> Result<Box<dyn GamepadDeviceExt>, InputError> {
        let inner = self.inner.lock();
        let pad = inner
            .pads
            .iter()
            .find(|pad| pad.id == descriptor.id)
            .ok_or_else(|| {
                InputError::device(
                    descriptor.id.clone(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "mando desenchufado"),
                )
            })?;
        Ok(Box::new(VirtualGamepadDevice {
            name: pad.name.clone(),
            receiver: pad.receiver.clone(),
        }))
    }
}

#[derive(Debug)]
struct VirtualGamepadDevice {
    name: String,
    receiver: Receiver<GamepadSample>,
}

impl GamepadDeviceExt for VirtualGamepadDevice {
    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn read_sample(&mut self) -> Result<Option<GamepadSample>, DeviceError> {
        match self.receiver.try_recv() {
            Ok(sample) => Ok(Some(sample)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(DeviceError::Disconnected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_samples_come_out_in_order() {
        let (mut device, feed) = VirtualDevice::new("virtual");
        assert!(feed.press(KeyCode::A));
        assert!(feed.move_to(3, 4));
        assert_eq!(device.poll_once().unwrap(), Some(RawSample::key(KeyCode::A, true)));
        assert_eq!(
            device.poll_once().unwrap(),
            Some(RawSample::MouseMove { x: 3, y: 4 })
        );
        assert_eq!(device.poll_once().unwrap(), None);

        drop(feed);
        assert!(matches!(device.poll_once(), Err(DeviceError::Transient(_))));
    }

    #[test]
    fn unplugged_pads_disconnect_after_draining() {
        let hub = VirtualGamepadHub::new();
        let mut provider = hub.provider();
        let pad = hub.plug("Pad");

        let found = provider.scan();
        assert_eq!(found.len(), 1);
        let mut device = provider.open(&found[0]).unwrap();
        assert_eq!(device.name().as_deref(), Some("Pad"));

        pad.press(GamepadButton::Y);
        pad.unplug();
        assert!(provider.scan().is_empty());

        assert!(matches!(device.read_sample(), Ok(Some(_))));
        assert!(matches!(device.read_sample(), Err(DeviceError::Disconnected)));
        assert!(provider.open(&found[0]).is_err());
    }

    #[test]
    fn named_providers_share_the_hub() {
        let hub = VirtualGamepadHub::new();
        let mut bridge = hub.provider_named("bridge");
        assert_eq!(bridge.name(), "bridge");
        assert_eq!(hub.provider().name(), "virtual-gamepad");

        let _pad = hub.plug("Bridged Pad");
        assert_eq!(bridge.scan()[0].name.as_deref(), Some("Bridged Pad"));
    }
}
