//! Mandos vía `gilrs` (XInput / Windows.Gaming.Input en Windows, IOKit en macOS).
//!
//! `gilrs` entrega un único flujo de eventos para todos los mandos. Un hilo de
//! bombeo es el dueño del contexto `Gilrs` y reparte ese flujo: cada mando
//! conectado se enchufa en un [`VirtualGamepadHub`] interno, y el gestor de
//! slots lo descubre con su escaneo normal, igual que a un mando virtual.
//!
//! Los ejes Y se invierten: `gilrs` usa "arriba positivo" y el runtime el
//! convenio de joydev (abajo positivo) en todas las plataformas.

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Sender, bounded};
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};

use super::virtual_input::{VirtualGamepad, VirtualGamepadHub, VirtualGamepadProvider};
use crate::engine::worker::{StopFlag, Worker};
use crate::error::InputError;
use crate::model::{GamepadAxis, GamepadButton, GamepadSample};
use crate::traits::{GamepadDescriptor, GamepadDeviceExt, GamepadProviderExt};

const LOG: &str = "orbit_input::gilrs";

fn button(button: Button) -> Option<GamepadButton> {
    let mapped = match button {
        Button::South => GamepadButton::A,
        Button::East => GamepadButton::B,
        Button::West => GamepadButton::X,
        Button::North => GamepadButton::Y,
        Button::LeftTrigger => GamepadButton::LeftBumper,
        Button::RightTrigger => GamepadButton::RightBumper,
        Button::Select => GamepadButton::Back,
        Button::Start => GamepadButton::Start,
        Button::Mode => GamepadButton::Guide,
        Button::LeftThumb => GamepadButton::LeftThumb,
        Button::RightThumb => GamepadButton::RightThumb,
        Button::DPadUp => GamepadButton::DpadUp,
        Button::DPadRight => GamepadButton::DpadRight,
        Button::DPadDown => GamepadButton::DpadDown,
        Button::DPadLeft => GamepadButton::DpadLeft,
        _ => return None,
    };
    Some(mapped)
}

/// Gatillo analógico (`LeftTrigger2`/`RightTrigger2`) con valor en `[0, 1]`.
fn trigger(button: Button, value: f32) -> Option<GamepadSample> {
    let axis = match button {
        Button::LeftTrigger2 => GamepadAxis::LeftTrigger,
        Button::RightTrigger2 => GamepadAxis::RightTrigger,
        _ => return None,
    };
    Some(GamepadSample::Axis {
        axis,
        value: value.clamp(0.0, 1.0),
    })
}

fn stick(axis: Axis, value: f32) -> Option<GamepadSample> {
    let (axis, value) = match axis {
        Axis::LeftStickX => (GamepadAxis::LeftX, value),
        Axis::LeftStickY => (GamepadAxis::LeftY, -value),
        Axis::RightStickX => (GamepadAxis::RightX, value),
        Axis::RightStickY => (GamepadAxis::RightY, -value),
        _ => return None,
    };
    Some(GamepadSample::Axis {
        axis,
        value: value.clamp(-1.0, 1.0),
    })
}

/// Traduce un evento de entrada de `gilrs` a una muestra de mando.
fn translate(event: EventType) -> Option<GamepadSample> {
    let press = |which, pressed| button(which).map(|button| GamepadSample::Button { button, pressed });
    match event {
        EventType::ButtonPressed(which, _) => press(which, true),
        EventType::ButtonReleased(which, _) => press(which, false),
        EventType::ButtonChanged(which, value, _) => trigger(which, value),
        EventType::AxisChanged(axis, value, _) => stick(axis, value),
        _ => None,
    }
}

/// Cuerpo del hilo de bombeo. Avisa por `ready` si `Gilrs` pudo crearse.
fn pump(hub: VirtualGamepadHub, ready: Sender<Result<(), String>>, stop: StopFlag, poll: Duration) {
    let mut gilrs = match Gilrs::new() {
        Ok(gilrs) => gilrs,
        Err(err) => {
            ready.send(Err(err.to_string())).ok();
            return;
        }
    };
    ready.send(Ok(())).ok();

    let mut pads: HashMap<GamepadId, VirtualGamepad> = gilrs
        .gamepads()
        .map(|(id, gamepad)| (id, hub.plug(gamepad.name())))
        .collect();

    while !stop.is_raised() {
        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::Connected => {
                    let name = gilrs.gamepad(event.id).name().to_string();
                    log::debug!(target: LOG, "mando {:?} conectado: {name}", event.id);
                    pads.entry(event.id).or_insert_with(|| hub.plug(name));
                }
                EventType::Disconnected => {
                    log::debug!(target: LOG, "mando {:?} desconectado", event.id);
                    pads.remove(&event.id);
                }
                other => {
                    if let (Some(pad), Some(sample)) = (pads.get(&event.id), translate(other)) {
                        pad.send(sample);
                    }
                }
            }
        }
        thread::sleep(poll);
    }
}

/// Proveedor de mandos del sistema a través de `gilrs`.
///
/// El hilo de bombeo arranca con el primer escaneo. Si la plataforma no está
/// soportada por `gilrs`, el proveedor queda vacío y no lo vuelve a intentar.
#[derive(Debug)]
pub struct GilrsProvider {
    hub: VirtualGamepadHub,
    inner: VirtualGamepadProvider,
    poll: Duration,
    pump: Option<Worker>,
    unavailable: bool,
}

impl GilrsProvider {
    /// `poll` es la pausa del hilo de bombeo cuando no hay eventos.
    pub fn new(poll: Duration) -> Self {
        let hub = VirtualGamepadHub::new();
        let inner = hub.provider_named("gilrs");
        Self {
            hub,
            inner,
            poll,
            pump: None,
            unavailable: false,
        }
    }

    /// Arranca el hilo de bombeo si aún no existe.
    ///
    /// Devuelve [`InputError::Unsupported`] si `gilrs` no puede inicializarse.
    pub fn start(&mut self) -> Result<(), InputError> {
        if self.pump.is_some() {
            return Ok(());
        }
        let (ready_tx, ready_rx) = bounded(1);
        let hub = self.hub.clone();
        let poll = self.poll;
        let mut worker = Worker::spawn("orbit-gilrs", move |stop| pump(hub, ready_tx, stop, poll))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                log::info!(target: LOG, "bombeo de gilrs iniciado");
                self.pump = Some(worker);
                Ok(())
            }
            Ok(Err(reason)) => {
                worker.stop_and_join();
                log::warn!(target: LOG, "gilrs no disponible: {reason}");
                Err(InputError::Unsupported("mandos vía gilrs"))
            }
            Err(_) => {
                worker.stop_and_join();
                Err(InputError::Unsupported("mandos vía gilrs"))
            }
        }
    }
}

impl GamepadProviderExt for GilrsProvider {
    fn name(&self) -> &'static str {
        "gilrs"
    }

    fn scan(&mut self) -> Vec<GamepadDescriptor> {
        if self.pump.is_none() && !self.unavailable {
            if let Err(err) = self.start() {
                log::warn!(target: LOG, "sin mandos: {err}");
                self.unavailable = true;
            }
        }
        self.inner.scan()
    }

    fn open(&mut self, descriptor: &GamepadDescriptor) -> Result<Box<dyn GamepadDeviceExt>, InputError> {
        self.inner.open(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_buttons_follow_the_xbox_layout() {
        assert_eq!(button(Button::South), Some(GamepadButton::A));
        assert_eq!(button(Button::North), Some(GamepadButton::Y));
        assert_eq!(button(Button::Mode), Some(GamepadButton::Guide));
        assert_eq!(button(Button::LeftTrigger2), None);
    }

    #[test]
    fn sticks_flip_y_and_triggers_stay_positive() {
        assert_eq!(
            stick(Axis::LeftStickY, 1.0),
            Some(GamepadSample::Axis {
                axis: GamepadAxis::LeftY,
                value: -1.0,
            })
        );
        assert_eq!(
            stick(Axis::RightStickX, 2.0),
            Some(GamepadSample::Axis {
                axis: GamepadAxis::RightX,
                value: 1.0,
            })
        );
        assert_eq!(
            trigger(Button::RightTrigger2, 0.5),
            Some(GamepadSample::Axis {
                axis: GamepadAxis::RightTrigger,
                value: 0.5,
            })
        );
        assert_eq!(trigger(Button::South, 1.0), None);
        assert_eq!(stick(Axis::DPadX, 1.0), None);
        assert_eq!(translate(EventType::Connected), None);
    }
}
