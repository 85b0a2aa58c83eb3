//! Macro for implementing Display and FromStr for name-like enums
//!
//! Pattern names, scheduler states and verbosity levels all travel as short
//! lowercase words (config files, CLI flags, log fields). The macro keeps the
//! two directions of that mapping in one table.
//!
//! # Example
//!
//! ```rust
//! use tikus_domain::impl_named_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Axis {
//!     Horizontal,
//!     Vertical,
//! }
//!
//! impl_named_enum_conversions!(Axis {
//!     Horizontal => "horizontal",
//!     Vertical => "vertical",
//! });
//!
//! assert_eq!("VERTICAL".parse::<Axis>().unwrap(), Axis::Vertical);
//! ```

/// Implements Display and FromStr traits for name-like enums
///
/// - Display writes the lowercase name
/// - FromStr parses case-insensitively and trims surrounding whitespace
#[macro_export]
macro_rules! impl_named_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!(
                        "Invalid {}: '{}' (expected one of: {})",
                        stringify!($enum_name),
                        s,
                        [$($str),+].join(", ")
                    )),
                }
            }
        }
    };
}
