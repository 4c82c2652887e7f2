//! Botones de puntero canónicos.

use super::canonical_enum;

canonical_enum! {
    /// Botón de ratón normalizado.
    pub enum MouseButton {
        Left => "Left Mouse Button",
        Right => "Right Mouse Button",
        Middle => "Middle Mouse Button",
        /// Botón lateral trasero.
        X1 => "Mouse Button 4",
        /// Botón lateral delantero.
        X2 => "Mouse Button 5",
    }
}
