#![allow(dead_code)]

use std::time::{Duration, Instant};

use orbit_input::InputConfig;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Configuración de test: sin hot-plug periódico y sondeo rápido.
pub fn config(max_gamepads: usize) -> InputConfig {
    InputConfig {
        max_gamepads,
        hotplug_interval_ms: 0,
        poll_interval_ms: 1,
        ..InputConfig::default()
    }
}

/// Espera a que `condition` se cumpla, como mucho dos segundos.
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    condition()
}
