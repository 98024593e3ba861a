//! Conversion between enumerated wire strings and Rust enums.
//!
//! Enums declared with [`wire_enum!`](crate::wire_enum) always carry an extra
//! `Unknown` variant. Decoding a symbol that is not in the table yields
//! `Unknown` and emits a warning; encoding `Unknown` is an
//! [`ErrorKind::UnknownValue`](crate::ErrorKind::UnknownValue) error.

use crate::error::{Error, Result};

/// An enum with a fixed table of wire symbols plus an `Unknown` sentinel.
pub trait WireEnum: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Name of the value set, used in diagnostics (e.g. `"membership"`).
    const KIND: &'static str;

    /// Decodes a wire symbol. Never fails: unseen symbols become `Unknown`.
    fn from_wire(value: &str) -> Self;

    /// Returns the wire symbol, or `None` for the `Unknown` sentinel.
    fn as_wire(&self) -> Option<&'static str>;

    fn is_unknown(&self) -> bool {
        self.as_wire().is_none()
    }

    /// Returns the wire symbol, failing for the `Unknown` sentinel.
    fn to_wire(&self) -> Result<&'static str> {
        self.as_wire().ok_or_else(|| {
            Error::unknown_value(format!("{} has no known wire value", Self::KIND))
        })
    }
}

/// Declares an enum implementing [`WireEnum`].
///
/// ```
/// roomkit_core::wire_enum! {
///     /// Colour of a thing.
///     pub enum Colour: "colour" {
///         Red => "red",
///         Blue => "blue",
///     }
/// }
///
/// use roomkit_core::WireEnum;
/// assert_eq!(Colour::from_wire("red"), Colour::Red);
/// assert_eq!(Colour::from_wire("green"), Colour::Unknown);
/// assert!(Colour::Unknown.to_wire().is_err());
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A symbol this SDK does not recognise.
            #[default]
            Unknown,
        }

        impl $crate::WireEnum for $name {
            const KIND: &'static str = $kind;

            fn from_wire(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => {
                        $crate::__private::warn!(
                            kind = $kind,
                            value = other,
                            "unrecognised wire value, decoding as unknown"
                        );
                        Self::Unknown
                    }
                }
            }

            fn as_wire(&self) -> Option<&'static str> {
                match self {
                    $( Self::$variant => Some($wire), )+
                    Self::Unknown => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::WireEnum::as_wire(self).unwrap_or("unknown"))
            }
        }
    };
}
