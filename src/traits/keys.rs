//! Traits de traducción entre códigos nativos y el vocabulario canónico.
//!
//! Cada backend envuelve sus códigos nativos en un *newtype* (por ejemplo
//! [`EvdevKey`](crate::tables::EvdevKey) o [`VirtualKey`](crate::tables::VirtualKey))
//! e implementa [`KeyExt`] sobre él. Las tablas viven en [`crate::tables`].
//!
//! # Convenciones de tipos genéricos
//!
//! - **`KeyExt<B, N>`**: Conversión de teclas
//!   - `B` = **B**ackend (tipo nativo del sistema o del backend usado)
//!   - `N` = **N**ormalized (tipo normalizado del runtime)
//!
//! - **`KeyStateExt<I, O>`**: Conversión de estados
//!   - `I` = **I**nput (estado externo/nativo)
//!   - `O` = **O**utput (estado interno/normalizado)
//!
//! # Ejemplo
//! ```rust
//! use orbit_input::{KeyCode, KeyExt};
//! use orbit_input::tables::EvdevKey;
//!
//! assert_eq!(EvdevKey::from_backend_key(EvdevKey(17)), KeyCode::W);
//! assert_eq!(EvdevKey::to_backend_key(KeyCode::W), EvdevKey(17));
//! ```

/// El trait [`KeyExt`] define la interfaz para **convertir entre códigos de tecla nativos**
/// y una representación unificada, normalmente [`KeyCode`](crate::KeyCode).
///
/// # Propósito
/// Abstrae la traducción entre las teclas específicas de un backend
/// (scancodes de evdev, keycodes de X11, virtual keys de Win32...) y el tipo
/// de tecla que el runtime usa internamente.
///
/// # Parámetros genéricos
/// - `B`: Tipo de tecla **nativo del backend**.
/// - `N`: Tipo de tecla **normalizado** que usa el runtime.
///
/// # Reglas de implementación
/// - Las conversiones deben ser **deterministas**.
/// - `from_backend_key` devuelve el valor "desconocido" de `N` para códigos sin mapeo.
/// - `to_backend_key` devuelve el código nativo **principal** cuando varios códigos
///   nativos comparten la misma tecla normalizada (por ejemplo `VK_SHIFT` y `VK_LSHIFT`).
/// - No debe realizar asignaciones dinámicas.
pub trait KeyExt<B, N>
where
    B: Copy + PartialEq,
    N: Copy + PartialEq,
{
    /// Convierte una tecla del backend (`B`) a su representación normalizada (`N`).
    fn from_backend_key(key: B) -> N;

    /// Convierte una tecla normalizada (`N`) a su equivalente nativo del backend (`B`).
    fn to_backend_key(code: N) -> B;
}

/// El trait [`KeyStateExt`] define la interfaz para **traducir entre los estados de tecla nativos**
/// de un backend y la muestra cruda que consume el runtime.
///
/// En `orbit_input` la salida es un booleano "pulsada": el estado de tres fases
/// se calcula después, dentro del lock, con [`InputState::advance`](crate::InputState::advance).
///
/// # Ejemplo: valores de evdev
/// ```rust
/// use orbit_input::KeyStateExt;
/// use orbit_input::tables::EvdevValue;
///
/// assert!(EvdevValue::from_external_state(EvdevValue(1)));  // press
/// assert!(EvdevValue::from_external_state(EvdevValue(2)));  // autorepeat
/// assert!(!EvdevValue::from_external_state(EvdevValue(0))); // release
/// ```
///
/// # Reglas de implementación
/// - Las conversiones deben ser **deterministas** y **simétricas** siempre que sea posible.
/// - No deben involucrar asignaciones dinámicas o lógica costosa.
pub trait KeyStateExt<I, O>
where
    I: Copy + PartialEq,
    O: Copy + PartialEq,
{
    /// Convierte un estado nativo del backend (`I`) a su representación interna (`O`).
    fn from_external_state(state: I) -> O;

    /// Convierte un estado interno (`O`) a su equivalente nativo del backend (`I`).
    fn to_external_state(state: O) -> I;
}
