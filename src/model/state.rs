//! Modelo de tres fases (`Released` / `Pressed` / `Held`) y el algoritmo de
//! detección de flancos que lo alimenta.
//!
//! # Reglas de transición
//!
//! ```text
//! raw = down, previo = Released          → Pressed
//! raw = down, previo ∈ {Pressed, Held}   → Held
//! raw = up,   cualquier previo           → Released
//! ```
//!
//! La transición se aplica **en el momento en que llega la muestra** (dentro
//! del lock), usando la tabla del frame anterior. `update()` sólo colapsa
//! `Pressed` a `Held` con [`InputState::settle`] y publica la tabla previa.
//!
//! Una pulsación y liberación que llegan antes del siguiente `update()` terminan
//! en `Released`: las transiciones sub-frame no tienen ventana de visibilidad
//! garantizada.

/// Estado canónico de una tecla o botón.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InputState {
    /// Sin pulsar.
    #[default]
    Released = 0,
    /// Flanco de bajada: la entrada acaba de pasar a pulsada.
    Pressed = 1,
    /// La entrada sigue pulsada desde un frame anterior.
    Held = 2,
}

impl InputState {
    /// Calcula el siguiente estado a partir del estado del frame anterior y de
    /// una muestra cruda (`true` = pulsada).
    ///
    /// # Ejemplo
    /// ```rust
    /// use orbit_input::InputState;
    ///
    /// assert_eq!(InputState::advance(InputState::Released, true), InputState::Pressed);
    /// assert_eq!(InputState::advance(InputState::Pressed, true), InputState::Held);
    /// assert_eq!(InputState::advance(InputState::Held, false), InputState::Released);
    /// ```
    #[inline]
    pub const fn advance(previous: InputState, raw_down: bool) -> InputState {
        match (raw_down, previous) {
            (true, InputState::Released) => InputState::Pressed,
            (true, _) => InputState::Held,
            (false, _) => InputState::Released,
        }
    }

    /// Paso de colapso del `update()`: un `Pressed` que sigue pulsado pasa a `Held`.
    #[inline]
    pub const fn settle(self) -> InputState {
        match self {
            InputState::Pressed => InputState::Held,
            other => other,
        }
    }

    /// `true` para `Pressed` y `Held`.
    #[inline]
    pub const fn is_down(self) -> bool {
        !matches!(self, InputState::Released)
    }
}

/// Colapsa una tabla completa y la copia sobre la tabla del frame anterior.
pub(crate) fn settle_table<const N: usize>(
    current: &mut [InputState; N],
    previous: &mut [InputState; N],
) {
    for state in current.iter_mut() {
        *state = state.settle();
    }
    *previous = *current;
}

/// Aplica una muestra cruda a la entrada `index` de un par de tablas.
///
/// Índices fuera de rango se ignoran.
pub(crate) fn apply_raw<const N: usize>(
    current: &mut [InputState; N],
    previous: &[InputState; N],
    index: usize,
    raw_down: bool,
) {
    if let (Some(slot), Some(prev)) = (current.get_mut(index), previous.get(index)) {
        *slot = InputState::advance(*prev, raw_down);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_covers_the_whole_transition_table() {
        use InputState::*;
        assert_eq!(InputState::advance(Released, true), Pressed);
        assert_eq!(InputState::advance(Pressed, true), Held);
        assert_eq!(InputState::advance(Held, true), Held);
        assert_eq!(InputState::advance(Pressed, false), Released);
        assert_eq!(InputState::advance(Held, false), Released);
        assert_eq!(InputState::advance(Released, false), Released);
    }

    #[test]
    fn settle_only_touches_pressed() {
        assert_eq!(InputState::Pressed.settle(), InputState::Held);
        assert_eq!(InputState::Held.settle(), InputState::Held);
        assert_eq!(InputState::Released.settle(), InputState::Released);
    }

    #[test]
    fn settle_table_publishes_previous_after_collapse() {
        let mut current = [InputState::Pressed, InputState::Released, InputState::Held];
        let mut previous = [InputState::Released; 3];
        settle_table(&mut current, &mut previous);
        assert_eq!(current, [InputState::Held, InputState::Released, InputState::Held]);
        assert_eq!(previous, current);
    }

    #[test]
    fn apply_raw_ignores_out_of_range() {
        let mut current = [InputState::Released; 2];
        let previous = [InputState::Released; 2];
        apply_raw(&mut current, &previous, 5, true);
        assert_eq!(current, [InputState::Released; 2]);
        apply_raw(&mut current, &previous, 1, true);
        assert_eq!(current[1], InputState::Pressed);
    }
}
