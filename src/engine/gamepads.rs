//! Ciclo de vida de los mandos: escaneo, asignación de slots, un hilo de
//! sondeo por mando y recogida de los que se desconectan.
//!
//! ```text
//! Disconnected ──scan──▶ Connecting ──open + hilo──▶ Connected
//!      ▲                     │ (fallo)                  │ lectura permanente falla
//!      └─────────────────────┘                          ▼
//!      └────────── disconnect / reap (join) ◀──────── Lost
//! ```
//!
//! Orden de locks: primero el del gestor, después el del agregado. Los hilos de
//! cada mando sólo tocan el agregado.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::aggregate::SlotStatus;
use super::handle::InputHandle;
use super::worker::{StopFlag, Worker};
use crate::error::DeviceError;
use crate::sync::Mutex;
use crate::traits::{GamepadDescriptor, GamepadDeviceExt, GamepadProviderExt};

const LOG: &str = "orbit_input::gamepad";

/// Nombre para mandos que no exponen el suyo.
pub const UNKNOWN_GAMEPAD: &str = "Unknown Gamepad";

#[derive(Debug)]
struct Binding {
    id: String,
    worker: Worker,
}

pub(crate) type SharedManager = Arc<Mutex<GamepadManager>>;

pub(crate) struct GamepadManager {
    provider: Option<Box<dyn GamepadProviderExt>>,
    bindings: Vec<Option<Binding>>,
    handle: InputHandle,
    default_deadzone: f32,
    poll_interval: Duration,
}

impl GamepadManager {
    pub(crate) fn new(
        provider: Option<Box<dyn GamepadProviderExt>>,
        handle: InputHandle,
        capacity: usize,
        default_deadzone: f32,
        poll_interval: Duration,
    ) -> Self {
        Self {
            provider,
            bindings: (0..capacity).map(|_| None).collect(),
            handle,
            default_deadzone,
            poll_interval,
        }
    }

    pub(crate) fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub(crate) fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    fn is_bound(&self, id: &str) -> bool {
        self.bindings.iter().flatten().any(|b| b.id == id)
    }

    fn free_slot(&self) -> Option<usize> {
        self.bindings.iter().position(Option::is_none)
    }

    /// Busca mandos nuevos y los conecta en el slot libre más bajo.
    ///
    /// Devuelve cuántos se conectaron.
    pub(crate) fn scan(&mut self) -> usize {
        self.reap_lost();

        let Some(provider) = self.provider.as_mut() else {
            return 0;
        };
        let found = provider.scan();

        let mut connected = 0;
        for descriptor in found {
            if self.is_bound(&descriptor.id) {
                continue;
            }
            let Some(slot) = self.free_slot() else {
                log::debug!(target: LOG, "sin slots libres, se ignora {}", descriptor.id);
                break;
            };
            if self.connect(slot, &descriptor) {
                connected += 1;
            }
        }
        connected
    }

    fn connect(&mut self, slot: usize, descriptor: &GamepadDescriptor) -> bool {
        let Some(provider) = self.provider.as_mut() else {
            return false;
        };
        self.handle.lock().set_connecting(slot);

        let device = match provider.open(descriptor) {
            Ok(device) => device,
            Err(err) => {
                log::warn!(target: LOG, "no se pudo abrir {}: {err}", descriptor.id);
                self.handle.lock().free(slot);
                return false;
            }
        };

        let name = device
            .name()
            .or_else(|| descriptor.name.clone())
            .unwrap_or_else(|| UNKNOWN_GAMEPAD.to_string());
        self.handle
            .lock()
            .set_connected(slot, name.clone(), self.default_deadzone);

        let handle = self.handle.clone();
        let poll = self.poll_interval;
        let spawned = Worker::spawn(format!("orbit-gamepad-{slot}"), move |stop| {
            poll_gamepad(device, slot, &handle, &stop, poll)
        });

        match spawned {
            Ok(worker) => {
                log::info!(target: LOG, "mando {slot} conectado: {name} ({})", descriptor.id);
                self.bindings[slot] = Some(Binding {
                    id: descriptor.id.clone(),
                    worker,
                });
                true
            }
            Err(err) => {
                log::warn!(target: LOG, "mando {slot} descartado: {err}");
                self.handle.lock().free(slot);
                false
            }
        }
    }

    /// Detiene el hilo del slot, espera a que termine y libera el slot.
    pub(crate) fn disconnect(&mut self, slot: usize) -> bool {
        let Some(mut binding) = self.bindings.get_mut(slot).and_then(Option::take) else {
            return false;
        };
        binding.worker.stop_and_join();
        self.handle.lock().free(slot);
        log::info!(target: LOG, "mando {slot} desconectado ({})", binding.id);
        true
    }

    /// Recoge los slots cuyo hilo vio una desconexión.
    pub(crate) fn reap_lost(&mut self) -> usize {
        let lost: Vec<usize> = {
            let state = self.handle.lock();
            (0..state.capacity())
                .filter(|slot| state.slot_status(*slot) == SlotStatus::Lost)
                .collect()
        };
        lost.into_iter().filter(|slot| self.disconnect(*slot)).count()
    }

    pub(crate) fn shutdown(&mut self) {
        for slot in 0..self.bindings.len() {
            self.disconnect(slot);
        }
    }
}

impl Drop for GamepadManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn poll_gamepad(
    mut device: Box<dyn GamepadDeviceExt>,
    slot: usize,
    handle: &InputHandle,
    stop: &StopFlag,
    poll: Duration,
) {
    while !stop.is_raised() {
        match device.read_sample() {
            Ok(Some(sample)) => {
                handle.submit_gamepad(slot, sample);
            }
            Ok(None) => thread::sleep(poll),
            Err(DeviceError::Disconnected) => {
                log::info!(target: LOG, "mando {slot} perdido");
                handle.lock().set_lost(slot);
                return;
            }
            Err(DeviceError::Transient(reason)) => {
                log::trace!(target: LOG, "mando {slot}: {reason}");
                thread::sleep(poll);
            }
        }
    }
}

/// Bucle del hilo de hot-plug.
pub(crate) fn hotplug_loop(manager: SharedManager, stop: StopFlag, interval: Duration, step: Duration) {
    while !stop.sleep(interval, step) {
        let connected = manager.lock().scan();
        if connected > 0 {
            log::debug!(target: LOG, "hot-plug: {connected} mando(s) nuevo(s)");
        }
    }
}
