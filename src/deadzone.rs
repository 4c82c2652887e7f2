//! Normalización de ejes analógicos con deadzone.

/// Deadzone máxima aceptada. Por encima el rango útil desaparece.
pub const MAX_DEADZONE: f32 = 0.99;

/// Limita una deadzone arbitraria al rango válido `[0, MAX_DEADZONE]`.
#[inline]
pub fn clamp_deadzone(deadzone: f32) -> f32 {
    if deadzone.is_nan() {
        return 0.0;
    }
    deadzone.clamp(0.0, MAX_DEADZONE)
}

/// Aplica la deadzone a un valor ya normalizado (`[-1, 1]` sticks, `[0, 1]` gatillos)
/// y reescala el rango restante para que el recorrido útil no quede truncado.
///
/// Función pura: sin estado ni efectos laterales.
///
/// # Ejemplo
/// ```rust
/// use orbit_input::normalize_axis;
///
/// assert_eq!(normalize_axis(0.1, 0.15), 0.0);
/// assert_eq!(normalize_axis(1.0, 0.15), 1.0);
/// assert_eq!(normalize_axis(-1.0, 0.15), -1.0);
/// ```
pub fn normalize_axis(value: f32, deadzone: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let value = value.clamp(-1.0, 1.0);
    let deadzone = clamp_deadzone(deadzone);
    if deadzone <= 0.0 {
        return value;
    }

    let magnitude = value.abs();
    if magnitude < deadzone {
        return 0.0;
    }
    let scaled = ((magnitude - deadzone) / (1.0 - deadzone)).clamp(0.0, 1.0);
    if value < 0.0 { -scaled } else { scaled }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_stays_zero() {
        assert_eq!(normalize_axis(0.0, 0.15), 0.0);
        assert_eq!(normalize_axis(0.0, 0.0), 0.0);
    }

    #[test]
    fn inside_deadzone_is_neutral() {
        assert_eq!(normalize_axis(0.149, 0.15), 0.0);
        assert_eq!(normalize_axis(-0.149, 0.15), 0.0);
    }

    #[test]
    fn rescales_the_remaining_range() {
        let half = normalize_axis(0.575, 0.15);
        assert!((half - 0.5).abs() < 1e-5, "{half}");
        let neg = normalize_axis(-0.575, 0.15);
        assert!((neg + 0.5).abs() < 1e-5, "{neg}");
    }

    #[test]
    fn invalid_inputs_are_sanitized() {
        assert_eq!(normalize_axis(f32::NAN, 0.2), 0.0);
        assert_eq!(normalize_axis(f32::INFINITY, 0.2), 0.0);
        assert_eq!(normalize_axis(2.0, 0.2), 1.0);
        assert_eq!(clamp_deadzone(1.5), MAX_DEADZONE);
        assert_eq!(clamp_deadzone(-0.5), 0.0);
        assert_eq!(clamp_deadzone(f32::NAN), 0.0);
    }

    proptest! {
        #[test]
        fn full_deflection_maps_to_one(d in 0.0f32..0.99) {
            prop_assert_eq!(normalize_axis(1.0, d), 1.0);
            prop_assert_eq!(normalize_axis(-1.0, d), -1.0);
        }

        #[test]
        fn zero_maps_to_zero(d in 0.001f32..0.99) {
            prop_assert_eq!(normalize_axis(0.0, d), 0.0);
        }

        #[test]
        fn monotonic_between_deadzone_and_one(d in 0.0f32..0.9, a in 0.0f32..1.0, b in 0.0f32..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo = d + (1.0 - d) * lo;
            let hi = d + (1.0 - d) * hi;
            let (f_lo, f_hi) = (normalize_axis(lo, d), normalize_axis(hi, d));
            prop_assert!(f_lo <= f_hi);
            prop_assert!((0.0..=1.0).contains(&f_lo));
            prop_assert!((0.0..=1.0).contains(&f_hi));
        }
    }
}
