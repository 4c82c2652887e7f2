use std::ffi::CStr;
use std::fs::File;
use std::os::fd::AsRawFd;
use std::path::PathBuf;

use super::{open_nonblocking, read_record};
use crate::error::{DeviceError, InputError};
use crate::model::GamepadSample;
use crate::tables::joystick;
use crate::traits::{GamepadDescriptor, GamepadDeviceExt, GamepadProviderExt};

const LOG: &str = "orbit_input::joystick";

/// `struct js_event`: `u32 time`, `i16 value`, `u8 type`, `u8 number`.
const JS_EVENT_SIZE: usize = 8;

const NAME_LEN: usize = 128;

/// `JSIOCGNAME(len)` = `_IOC(_IOC_READ, 'j', 0x13, len)`.
const fn jsiocgname(len: usize) -> u64 {
    const IOC_READ: u64 = 2;
    (IOC_READ << 30) | ((len as u64) << 16) | ((b'j' as u64) << 8) | 0x13
}

fn parse_js_event(buf: &[u8; JS_EVENT_SIZE]) -> (u8, u8, i16) {
    let value = i16::from_ne_bytes([buf[4], buf[5]]);
    (buf[6], buf[7], value)
}

fn is_joystick_node(name: &str) -> bool {
    name.strip_prefix("js")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Nombre del mando vía `JSIOCGNAME`.
fn query_name(file: &File) -> Option<String> {
    let mut buf = [0u8; NAME_LEN];
    // SAFETY: el buffer tiene exactamente los NAME_LEN bytes codificados en la
    // petición y vive durante toda la llamada.
    let read = unsafe {
        libc::ioctl(
            file.as_raw_fd(),
            jsiocgname(NAME_LEN) as _,
            buf.as_mut_ptr(),
        )
    };
    if read <= 0 {
        return None;
    }
    let name = CStr::from_bytes_until_nul(&buf).ok()?.to_string_lossy().trim().to_string();
    (!name.is_empty()).then_some(name)
}

/// Enumera `js*` en el directorio de dispositivos de entrada.
#[derive(Debug, Clone)]
pub struct JoystickProvider {
    dir: PathBuf,
}

impl JoystickProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl GamepadProviderExt for JoystickProvider {
    fn name(&self) -> &'static str {
        "joystick"
    }

    fn scan(&mut self) -> Vec<GamepadDescriptor> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!(target: LOG, "no se puede listar {}: {err}", self.dir.display());
                return Vec::new();
            }
        };

        let mut found: Vec<GamepadDescriptor> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_str().is_some_and(is_joystick_node))
            .map(|entry| GamepadDescriptor {
                id: entry.path().to_string_lossy().into_owned(),
                name: None,
            })
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }

    fn open(&mut self, descriptor: &GamepadDescriptor) -> Result<Box<dyn GamepadDeviceExt>, InputError> {
        let path = PathBuf::from(&descriptor.id);
        let file = open_nonblocking(&path).map_err(|err| InputError::device(&path, err))?;
        let name = query_name(&file);
        Ok(Box::new(JoystickDevice {
            file,
            name,
            pending: None,
        }))
    }
}

/// Un `/dev/input/jsN` abierto.
#[derive(Debug)]
pub struct JoystickDevice {
    file: File,
    name: Option<String>,
    /// Segunda muestra de un hat (mueve dos botones de la cruceta a la vez).
    pending: Option<GamepadSample>,
}

impl GamepadDeviceExt for JoystickDevice {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn read_sample(&mut self) -> Result<Option<GamepadSample>, DeviceError> {
        if let Some(sample) = self.pending.take() {
            return Ok(Some(sample));
        }

        let mut buf = [0u8; JS_EVENT_SIZE];
        loop {
            match read_record(&mut self.file, &mut buf) {
                Ok(false) => return Ok(None),
                Ok(true) => {
                    let (kind, number, value) = parse_js_event(&buf);
                    match joystick::decode(kind, number, value) {
                        [Some(first), second] => {
                            self.pending = second;
                            return Ok(Some(first));
                        }
                        [None, Some(only)] => return Ok(Some(only)),
                        [None, None] => continue,
                    }
                }
                Err(err) => return Err(DeviceError::from_io(&err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::joystick::{JS_EVENT_AXIS, JS_EVENT_INIT};

    #[test]
    fn ioctl_request_matches_the_kernel_macro() {
        assert_eq!(jsiocgname(128), 0x8080_6a13);
    }

    #[test]
    fn js_event_layout() {
        let mut buf = [0u8; JS_EVENT_SIZE];
        buf[4..6].copy_from_slice(&(-32767i16).to_ne_bytes());
        buf[6] = JS_EVENT_AXIS | JS_EVENT_INIT;
        buf[7] = 3;
        assert_eq!(parse_js_event(&buf), (JS_EVENT_AXIS | JS_EVENT_INIT, 3, -32767));
    }

    #[test]
    fn only_js_nodes_are_joysticks() {
        assert!(is_joystick_node("js0"));
        assert!(is_joystick_node("js12"));
        assert!(!is_joystick_node("js"));
        assert!(!is_joystick_node("event3"));
        assert!(!is_joystick_node("jsx"));
    }

    #[test]
    fn scan_of_a_missing_dir_is_empty() {
        let mut provider = JoystickProvider::new("/definitely/not/a/dir");
        assert!(provider.scan().is_empty());
        let missing = GamepadDescriptor {
            id: "/definitely/not/a/dir/js0".into(),
            name: None,
        };
        assert!(matches!(
            provider.open(&missing),
            Err(InputError::DeviceUnavailable { .. })
        ));
    }

    #[test]
    fn scan_lists_js_nodes_in_order() {
        let dir = std::env::temp_dir().join(format!("orbit_input_js_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["js1", "event0", "js0"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }
        let found = JoystickProvider::new(&dir).scan();
        std::fs::remove_dir_all(&dir).ok();

        let ids: Vec<_> = found.iter().map(|d| d.id.rsplit('/').next().unwrap_or("")).collect();
        assert_eq!(ids, ["js0", "js1"]);
    }
}
