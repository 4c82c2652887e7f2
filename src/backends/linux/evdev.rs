use std::fs::File;
use std::mem::size_of;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::{open_nonblocking, read_record};
use crate::error::{DeviceError, InputError};
use crate::model::{KeyCode, RawSample};
use crate::tables::evdev::{
    self, EV_KEY, EV_REL, EvdevKey, EvdevValue, REL_HWHEEL, REL_WHEEL, REL_X, REL_Y,
};
use crate::traits::{KeyExt, KeyStateExt, PollBackendExt};

const LOG: &str = "orbit_input::evdev";

/// Intervalo mínimo entre dos intentos de reabrir un dispositivo perdido.
const REOPEN_INTERVAL: Duration = Duration::from_secs(1);

const EVENT_SIZE: usize = size_of::<libc::input_event>();
const TYPE_OFFSET: usize = size_of::<libc::timeval>();

/// `(type, code, value)` de un `struct input_event`.
fn parse_event(buf: &[u8; EVENT_SIZE]) -> (u16, u16, i32) {
    let field = |at: usize| [buf[at], buf[at + 1]];
    let kind = u16::from_ne_bytes(field(TYPE_OFFSET));
    let code = u16::from_ne_bytes(field(TYPE_OFFSET + 2));
    let value = i32::from_ne_bytes([
        buf[TYPE_OFFSET + 4],
        buf[TYPE_OFFSET + 5],
        buf[TYPE_OFFSET + 6],
        buf[TYPE_OFFSET + 7],
    ]);
    (kind, code, value)
}

pub(crate) fn decode_keyboard(kind: u16, code: u16, value: i32) -> Option<RawSample> {
    if kind != EV_KEY {
        return None;
    }
    match EvdevKey::from_backend_key(EvdevKey(code)) {
        KeyCode::Unknown => None,
        key => Some(RawSample::key(key, EvdevValue::from_external_state(EvdevValue(value)))),
    }
}

pub(crate) fn decode_pointer(kind: u16, code: u16, value: i32) -> Option<RawSample> {
    match (kind, code) {
        (EV_KEY, _) => evdev::mouse_button(code).map(|button| {
            RawSample::button(button, EvdevValue::from_external_state(EvdevValue(value)))
        }),
        (EV_REL, REL_X) => Some(RawSample::MouseMotion { dx: value, dy: 0 }),
        (EV_REL, REL_Y) => Some(RawSample::MouseMotion { dx: 0, dy: value }),
        (EV_REL, REL_WHEEL) => Some(RawSample::Scroll {
            dx: 0.0,
            dy: value as f32,
        }),
        (EV_REL, REL_HWHEEL) => Some(RawSample::Scroll {
            dx: value as f32,
            dy: 0.0,
        }),
        _ => None,
    }
}

/// Un `/dev/input/eventN` que se reabre solo si desaparece.
#[derive(Debug)]
struct EvdevDevice {
    path: PathBuf,
    file: Option<File>,
    last_attempt: Option<Instant>,
    reopen_interval: Duration,
}

impl EvdevDevice {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            file: None,
            last_attempt: None,
            reopen_interval: REOPEN_INTERVAL,
        }
    }

    fn open(&mut self) -> Result<(), InputError> {
        self.last_attempt = Some(Instant::now());
        let file = open_nonblocking(&self.path).map_err(|err| InputError::device(&self.path, err))?;
        self.file = Some(file);
        Ok(())
    }

    fn try_reopen(&mut self) {
        if self
            .last_attempt
            .is_some_and(|at| at.elapsed() < self.reopen_interval)
        {
            return;
        }
        if self.open().is_ok() {
            log::info!(target: LOG, "{} reabierto", self.path.display());
        }
    }

    /// Lee eventos hasta encontrar uno que `decode` acepte.
    fn poll(
        &mut self,
        decode: fn(u16, u16, i32) -> Option<RawSample>,
    ) -> Result<Option<RawSample>, DeviceError> {
        if self.file.is_none() {
            self.try_reopen();
        }
        let Some(file) = self.file.as_mut() else {
            return Ok(None);
        };

        let mut buf = [0u8; EVENT_SIZE];
        loop {
            match read_record(file, &mut buf) {
                Ok(false) => return Ok(None),
                Ok(true) => {
                    let (kind, code, value) = parse_event(&buf);
                    if let Some(sample) = decode(kind, code, value) {
                        return Ok(Some(sample));
                    }
                }
                Err(err) => {
                    let err = DeviceError::from_io(&err);
                    if err.is_permanent() {
                        log::warn!(target: LOG, "{} desconectado", self.path.display());
                        self.file = None;
                        self.last_attempt = Some(Instant::now());
                    }
                    return Err(err);
                }
            }
        }
    }
}

/// Teclado evdev.
#[derive(Debug)]
pub struct EvdevKeyboard {
    device: EvdevDevice,
}

impl EvdevKeyboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            device: EvdevDevice::new(path.into()),
        }
    }
}

impl PollBackendExt for EvdevKeyboard {
    fn name(&self) -> &'static str {
        "evdev-keyboard"
    }

    fn initialize(&mut self) -> Result<(), InputError> {
        self.device.open()
    }

    fn shutdown(&mut self) {
        self.device.file = None;
    }

    fn poll_once(&mut self) -> Result<Option<RawSample>, DeviceError> {
        self.device.poll(decode_keyboard)
    }
}

/// Puntero evdev (movimiento relativo).
#[derive(Debug)]
pub struct EvdevPointer {
    device: EvdevDevice,
}

impl EvdevPointer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            device: EvdevDevice::new(path.into()),
        }
    }
}

impl PollBackendExt for EvdevPointer {
    fn name(&self) -> &'static str {
        "evdev-pointer"
    }

    fn initialize(&mut self) -> Result<(), InputError> {
        self.device.open()
    }

    fn shutdown(&mut self) {
        self.device.file = None;
    }

    fn poll_once(&mut self) -> Result<Option<RawSample>, DeviceError> {
        self.device.poll(decode_pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MouseButton;
    use crate::tables::evdev::{BTN_SIDE, EV_SYN};

    fn raw_event(kind: u16, code: u16, value: i32) -> [u8; EVENT_SIZE] {
        let mut buf = [0u8; EVENT_SIZE];
        buf[TYPE_OFFSET..TYPE_OFFSET + 2].copy_from_slice(&kind.to_ne_bytes());
        buf[TYPE_OFFSET + 2..TYPE_OFFSET + 4].copy_from_slice(&code.to_ne_bytes());
        buf[TYPE_OFFSET + 4..TYPE_OFFSET + 8].copy_from_slice(&value.to_ne_bytes());
        buf
    }

    #[test]
    fn parses_the_native_layout() {
        assert_eq!(parse_event(&raw_event(EV_KEY, 17, 1)), (EV_KEY, 17, 1));
        assert_eq!(parse_event(&raw_event(EV_REL, REL_X, -4)), (EV_REL, REL_X, -4));
    }

    #[test]
    fn keyboard_events() {
        assert_eq!(
            decode_keyboard(EV_KEY, 17, 1),
            Some(RawSample::key(KeyCode::W, true))
        );
        assert_eq!(
            decode_keyboard(EV_KEY, 17, 2),
            Some(RawSample::key(KeyCode::W, true))
        );
        assert_eq!(decode_keyboard(EV_SYN, 0, 0), None);
        assert_eq!(decode_keyboard(EV_KEY, 0x2ff, 1), None);
    }

    #[test]
    fn pointer_events() {
        assert_eq!(
            decode_pointer(EV_KEY, BTN_SIDE, 1),
            Some(RawSample::button(MouseButton::X1, true))
        );
        assert_eq!(
            decode_pointer(EV_REL, REL_Y, 3),
            Some(RawSample::MouseMotion { dx: 0, dy: 3 })
        );
        assert_eq!(
            decode_pointer(EV_REL, REL_WHEEL, -1),
            Some(RawSample::Scroll { dx: 0.0, dy: -1.0 })
        );
        assert_eq!(decode_pointer(EV_KEY, 30, 1), None);
    }

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("orbit-input-{}-{name}", std::process::id()));
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn lost_device_is_reopened_after_the_interval() {
        let path = scratch_file("evdev-reopen");
        let mut keyboard = EvdevKeyboard::new(&path);
        keyboard.device.reopen_interval = Duration::from_secs(3600);
        keyboard.initialize().unwrap();
        assert!(keyboard.device.file.is_some());

        // Un read de cero bytes equivale a un dispositivo cerrado.
        assert!(matches!(keyboard.poll_once(), Err(DeviceError::Disconnected)));
        assert!(keyboard.device.file.is_none());

        // Dentro del intervalo no se reintenta.
        assert_eq!(keyboard.poll_once().unwrap(), None);
        assert!(keyboard.device.file.is_none());

        keyboard.device.reopen_interval = Duration::ZERO;
        keyboard.device.try_reopen();
        assert!(keyboard.device.file.is_some());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_device_degrades_without_panicking() {
        let mut keyboard = EvdevKeyboard::new("/dev/input/orbit-input-missing");
        assert!(matches!(
            keyboard.initialize(),
            Err(InputError::DeviceUnavailable { .. })
        ));
        assert_eq!(keyboard.poll_once().unwrap(), None);
        keyboard.shutdown();
    }
}
