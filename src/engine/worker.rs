//! Hilos con alcance: un [`Worker`] siempre señala y espera a su hilo al
//! soltarse, así que ningún hilo del runtime queda suelto.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::InputError;

/// Bandera de parada compartida entre el [`Worker`] y su hilo.
#[derive(Debug, Clone, Default)]
pub(crate) struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub(crate) fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Duerme `total` en trozos de `step`, despertando antes si se pide parar.
    ///
    /// Devuelve `true` si la bandera se levantó.
    pub(crate) fn sleep(&self, total: Duration, step: Duration) -> bool {
        let step = step.max(Duration::from_millis(1));
        let mut remaining = total;
        while !remaining.is_zero() {
            if self.is_raised() {
                return true;
            }
            let chunk = remaining.min(step);
            thread::sleep(chunk);
            remaining -= chunk;
        }
        self.is_raised()
    }
}

#[derive(Debug)]
pub(crate) struct Worker<T: Send + 'static = ()> {
    name: String,
    stop: StopFlag,
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> Worker<T> {
    /// Arranca un hilo con nombre. El cuerpo recibe la bandera de parada.
    pub(crate) fn spawn<F>(name: impl Into<String>, body: F) -> Result<Self, InputError>
    where
        F: FnOnce(StopFlag) -> T + Send + 'static,
    {
        let name = name.into();
        let stop = StopFlag::default();
        let flag = stop.clone();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || body(flag))
            .map_err(|source| InputError::ThreadSpawn {
                name: name.clone(),
                source,
            })?;
        log::trace!(target: "orbit_input::worker", "hilo `{name}` arrancado");
        Ok(Self {
            name,
            stop,
            handle: Some(handle),
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Señala y espera al hilo. Devuelve su resultado si terminó sin pánico.
    pub(crate) fn stop_and_join(&mut self) -> Option<T> {
        self.stop.raise();
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(value) => {
                log::trace!(target: "orbit_input::worker", "hilo `{}` detenido", self.name);
                Some(value)
            }
            Err(_) => {
                log::error!(target: "orbit_input::worker", "hilo `{}` terminó con pánico", self.name);
                None
            }
        }
    }
}

impl<T: Send + 'static> Drop for Worker<T> {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
