//! Abstracción del lock del agregado.
//!
//! Con la feature `parking_lot` se usa `parking_lot::Mutex`; si no, un envoltorio
//! sobre `std::sync::Mutex` con la misma API (`lock()` sin `Result`). Un hilo
//! productor que entre en pánico con el lock tomado no debe dejar el runtime
//! inutilizable, así que el envenenamiento se recupera.

#[cfg(feature = "parking_lot")]
pub(crate) use parking_lot::{Mutex, MutexGuard};

#[cfg(not(feature = "parking_lot"))]
pub(crate) use std_lock::{Mutex, MutexGuard};

#[cfg(not(feature = "parking_lot"))]
mod std_lock {
    use std::sync::{PoisonError, TryLockError};

    pub(crate) type MutexGuard<'a, T> = std::sync::MutexGuard<'a, T>;

    #[derive(Debug, Default)]
    pub(crate) struct Mutex<T>(std::sync::Mutex<T>);

    impl<T> Mutex<T> {
        pub(crate) const fn new(value: T) -> Self {
            Self(std::sync::Mutex::new(value))
        }

        pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner)
        }

        pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
            match self.0.try_lock() {
                Ok(guard) => Some(guard),
                Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
                Err(TryLockError::WouldBlock) => None,
            }
        }
    }
}
