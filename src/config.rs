//! Configuración del runtime.
//!
//! Todos los campos tienen valor por defecto, así que un TOML vacío es válido:
//!
//! ```toml
//! max_gamepads = 4
//! default_deadzone = 0.2
//! poll_interval_ms = 2
//! hotplug_interval_ms = 0      # 0 desactiva el hilo de hot-plug
//! keyboard_device = "/dev/input/event3"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::deadzone::clamp_deadzone;
use crate::error::InputError;
use crate::model::DEFAULT_DEADZONE;

/// Límite duro de slots de gamepad.
pub const MAX_GAMEPAD_SLOTS: usize = 16;

#[cfg(target_os = "linux")]
const DEFAULT_MAX_GAMEPADS: usize = 8;
#[cfg(not(target_os = "linux"))]
const DEFAULT_MAX_GAMEPADS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub max_gamepads: usize,
    pub default_deadzone: f32,
    pub poll_interval_ms: u64,
    pub hotplug_interval_ms: u64,
    pub keyboard_device: PathBuf,
    pub pointer_device: PathBuf,
    pub joystick_dir: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_gamepads: DEFAULT_MAX_GAMEPADS,
            default_deadzone: DEFAULT_DEADZONE,
            poll_interval_ms: 1,
            hotplug_interval_ms: 1000,
            keyboard_device: PathBuf::from("/dev/input/event0"),
            pointer_device: PathBuf::from("/dev/input/event1"),
            joystick_dir: PathBuf::from("/dev/input"),
        }
    }
}

impl InputConfig {
    /// Lee una configuración desde texto TOML y la valida.
    ///
    /// Los rangos numéricos se corrigen (ver [`validated`](Self::validated));
    /// una ruta de dispositivo vacía es un error [`InputError::Config`].
    pub fn from_toml_str(text: &str) -> Result<Self, InputError> {
        let config: InputConfig = toml::from_str(text)?;
        config.check_paths()?;
        Ok(config.validated())
    }

    fn check_paths(&self) -> Result<(), InputError> {
        let paths = [
            ("keyboard_device", &self.keyboard_device),
            ("pointer_device", &self.pointer_device),
            ("joystick_dir", &self.joystick_dir),
        ];
        match paths.iter().find(|(_, path)| path.as_os_str().is_empty()) {
            Some((field, _)) => Err(InputError::Config(format!("`{field}` no puede estar vacío"))),
            None => Ok(()),
        }
    }

    /// Lee y valida un fichero TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Lleva cada campo a su rango válido.
    pub fn validated(mut self) -> Self {
        let requested = self.max_gamepads;
        self.max_gamepads = requested.clamp(1, MAX_GAMEPAD_SLOTS);
        if self.max_gamepads != requested {
            log::warn!(
                target: "orbit_input::config",
                "max_gamepads={requested} fuera de rango, usando {}",
                self.max_gamepads
            );
        }
        self.default_deadzone = clamp_deadzone(self.default_deadzone);
        self.poll_interval_ms = self.poll_interval_ms.max(1);
        self
    }

    /// Pausa de los hilos de sondeo cuando no hay datos.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// `None` cuando el hot-plug periódico está desactivado.
    pub fn hotplug_interval(&self) -> Option<Duration> {
        (self.hotplug_interval_ms > 0).then(|| Duration::from_millis(self.hotplug_interval_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = InputConfig::from_toml_str("").unwrap();
        assert_eq!(config, InputConfig::default());
        assert_eq!(config.default_deadzone, 0.15);
        assert_eq!(config.hotplug_interval(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn values_are_clamped() {
        let config = InputConfig::from_toml_str(
            "max_gamepads = 40\ndefault_deadzone = 3.0\npoll_interval_ms = 0\nhotplug_interval_ms = 0",
        )
        .unwrap();
        assert_eq!(config.max_gamepads, MAX_GAMEPAD_SLOTS);
        assert_eq!(config.default_deadzone, 0.99);
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
        assert_eq!(config.hotplug_interval(), None);
    }

    #[test]
    fn zero_gamepads_becomes_one() {
        let config = InputConfig {
            max_gamepads: 0,
            ..InputConfig::default()
        }
        .validated();
        assert_eq!(config.max_gamepads, 1);
    }

    #[test]
    fn paths_and_unknown_fields() {
        let config = InputConfig::from_toml_str("keyboard_device = \"/dev/input/event7\"").unwrap();
        assert_eq!(config.keyboard_device, PathBuf::from("/dev/input/event7"));

        let err = InputConfig::from_toml_str("gamepads = 3").unwrap_err();
        assert!(matches!(err, InputError::Toml(_)));
    }

    #[test]
    fn empty_device_paths_are_rejected() {
        let err = InputConfig::from_toml_str("joystick_dir = \"\"").unwrap_err();
        assert!(matches!(&err, InputError::Config(msg) if msg.contains("joystick_dir")));
    }

    #[test]
    fn load_reads_a_file() {
        let path = std::env::temp_dir().join(format!("orbit_input_cfg_{}.toml", std::process::id()));
        std::fs::write(&path, "max_gamepads = 2\n").unwrap();
        let config = InputConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.max_gamepads, 2);

        assert!(matches!(
            InputConfig::load("/definitely/not/here.toml"),
            Err(InputError::Io(_))
        ));
    }
}
