//! Vocabulario canónico del runtime: identidades de teclas, botones y ejes,
//! el estado de tres fases y los registros de estado de cada dispositivo.
//!
//! Todas las identidades son enumeraciones **cerradas y densas**: cada variante
//! tiene un índice estable (`index()`) que se usa directamente como posición en
//! las tablas de estado. Los códigos nativos de cada plataforma se traducen
//! hacia estas identidades (ver [`crate::tables`]), nunca al revés.

/// Genera una enumeración canónica densa junto con su tabla `ALL`,
/// su contador `COUNT`, `index()`, `from_index()` y `name()`.
macro_rules! canonical_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Todas las variantes, en orden de índice.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Número de variantes (tamaño de las tablas de estado).
            pub const COUNT: usize = Self::ALL.len();

            /// Índice denso de la variante.
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Variante para un índice denso, `None` fuera de rango.
            #[inline]
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            /// Nombre legible para mostrar en UI o logs.
            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use canonical_enum;

pub mod gamepad;
pub mod keyboard;
pub mod mouse;
pub mod sample;
pub mod state;

pub use gamepad::{GamepadAxis, GamepadButton, GamepadState, DEFAULT_DEADZONE};
pub use keyboard::{KeyCode, Modifiers};
pub use mouse::MouseButton;
pub use sample::{GamepadSample, RawSample};
pub use state::InputState;
