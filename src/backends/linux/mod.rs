//! Backends de Linux sobre ficheros de dispositivo.
//!
//! Los ficheros se abren en modo no bloqueante; leer sin datos devuelve
//! `EAGAIN`, que se traduce en "sin muestra".

mod evdev;
mod joystick;

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

pub use evdev::{EvdevKeyboard, EvdevPointer};
pub use joystick::{JoystickDevice, JoystickProvider};

fn open_nonblocking(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
}

/// Lee un registro de tamaño fijo. `Ok(false)` si no había datos.
///
/// Un `read` de cero bytes significa que el dispositivo se cerró.
fn read_record(file: &mut File, buf: &mut [u8]) -> io::Result<bool> {
    match file.read(buf) {
        Ok(0) => Err(io::ErrorKind::UnexpectedEof.into()),
        Ok(n) if n == buf.len() => Ok(true),
        Ok(n) => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("registro truncado ({n} de {} bytes)", buf.len()),
        )),
        Err(err) if err.kind() == io::ErrorKind::WouldBlock => Ok(false),
        Err(err) => Err(err),
    }
}
