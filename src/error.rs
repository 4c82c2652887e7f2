//! Errores del runtime.
//!
//! [`InputError`] cubre el arranque y la configuración. [`DeviceError`] es lo
//! que un backend reporta desde su bucle de lectura: o el dispositivo se fue
//! para siempre, o fue un fallo pasajero y se reintenta.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("no se pudo abrir el dispositivo {}: {source}", path.display())]
    DeviceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no se pudo crear el hilo `{name}`: {source}")]
    ThreadSpawn {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("operación no soportada en esta plataforma: {0}")]
    Unsupported(&'static str),

    #[error("configuración inválida: {0}")]
    Config(String),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl InputError {
    pub(crate) fn device(path: impl Into<PathBuf>, source: io::Error) -> Self {
        InputError::DeviceUnavailable {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum DeviceError {
    /// El dispositivo desapareció; no tiene sentido volver a leer.
    #[error("dispositivo desconectado")]
    Disconnected,

    #[error("error transitorio: {0}")]
    Transient(String),
}

impl DeviceError {
    /// Clasifica un error de lectura del sistema.
    ///
    /// `ENODEV`/`ENXIO` (y un fichero que ya no existe) son desconexiones;
    /// todo lo demás se trata como transitorio.
    pub fn from_io(err: &io::Error) -> Self {
        const ENXIO: i32 = 6;
        const ENODEV: i32 = 19;

        match (err.kind(), err.raw_os_error()) {
            (io::ErrorKind::NotFound, _) | (_, Some(ENXIO | ENODEV)) => DeviceError::Disconnected,
            (io::ErrorKind::UnexpectedEof, _) => DeviceError::Disconnected,
            _ => DeviceError::Transient(err.to_string()),
        }
    }

    pub const fn is_permanent(&self) -> bool {
        matches!(self, DeviceError::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enodev_is_a_disconnect() {
        let err = io::Error::from_raw_os_error(19);
        assert!(DeviceError::from_io(&err).is_permanent());
    }

    #[test]
    fn interrupted_reads_are_transient() {
        let err = io::Error::new(io::ErrorKind::Interrupted, "signal");
        assert!(matches!(DeviceError::from_io(&err), DeviceError::Transient(_)));
    }

    #[test]
    fn device_error_message_names_the_path() {
        let err = InputError::device(
            "/dev/input/event9",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/dev/input/event9"));
    }
}
