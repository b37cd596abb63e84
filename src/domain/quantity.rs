//! Shared shape of the `u128` quantity newtypes.

/// Declares a `u128` newtype with checked arithmetic, `Display` and a
/// 256-bit widening.
macro_rules! quantity {
    ($(#[$meta:meta])* $name:ident, $zero_doc:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(u128);

        impl $name {
            #[doc = $zero_doc]
            pub const ZERO: Self = Self(0);

            /// Wraps a raw value.
            #[must_use]
            pub const fn new(value: u128) -> Self {
                Self(value)
            }

            /// The raw value.
            #[must_use]
            pub const fn get(&self) -> u128 {
                self.0
            }

            /// Returns `true` for zero.
            #[must_use]
            pub const fn is_zero(&self) -> bool {
                self.0 == 0
            }

            /// Widens to 256 bits for intermediate products.
            #[must_use]
            pub fn to_u256(&self) -> primitive_types::U256 {
                primitive_types::U256::from(self.0)
            }

            /// `None` on overflow.
            #[must_use]
            pub const fn checked_add(&self, other: &Self) -> Option<Self> {
                match self.0.checked_add(other.0) {
                    Some(v) => Some(Self(v)),
                    None => None,
                }
            }

            /// `None` below zero.
            #[must_use]
            pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
                match self.0.checked_sub(other.0) {
                    Some(v) => Some(Self(v)),
                    None => None,
                }
            }

            /// Clamped at zero.
            #[must_use]
            pub const fn saturating_sub(&self, other: &Self) -> Self {
                Self(self.0.saturating_sub(other.0))
            }
        }

        impl From<u128> for $name {
            fn from(value: u128) -> Self {
                Self(value)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use quantity;
