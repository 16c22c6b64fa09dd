//! Macro for implementing Display and FromStr for wire enums
//!
//! The portal API and the command line both name enum values with short
//! lowercase words. This macro maps each variant to its word once and derives
//! both directions from that mapping.
//!
//! # Example
//!
//! ```rust
//! use portalwatch_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Severity {
//!     Low,
//!     High,
//! }
//!
//! impl_wire_enum_conversions!(Severity {
//!     Low => "low",
//!     High => "high",
//! });
//!
//! assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
//! ```

/// Implements Display and FromStr for enums with lowercase names.
///
/// - Display writes the mapped word
/// - FromStr parses case-insensitively and fails with
///   `PortalwatchError::InvalidArgument` naming the enum
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::errors::PortalwatchError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::errors::PortalwatchError::InvalidArgument(format!(
                        "invalid {}: '{}' (expected one of: {})",
                        stringify!($enum_name),
                        s,
                        [$($str),+].join(", ")
                    ))),
                }
            }
        }
    };
}
