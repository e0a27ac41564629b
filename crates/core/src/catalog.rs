//! Closed enumerations accepted by the API.
//!
//! Each enumeration is matched against the exact wire label (case-sensitive,
//! no trimming). The labels must match the `CHECK` constraints in the
//! `sessions` and `users` migrations.

use std::fmt;

use crate::error::CoreError;

/// A fixed, ordered set of allowed string values for one request field.
pub trait ClosedSet: Sized + Copy + 'static {
    /// Field name used in error messages (e.g. `"species"`).
    const FIELD: &'static str;

    /// All members, in the order they are listed to callers.
    const ALL: &'static [Self];

    /// Canonical wire label.
    fn label(self) -> &'static str;
}

/// Parse `value` into a member of `T`, or fail with the standard
/// `Invalid <field> '<value>'. Must be one of: ...` message.
pub fn parse_closed<T: ClosedSet>(value: &str) -> Result<T, CoreError> {
    T::ALL
        .iter()
        .copied()
        .find(|member| member.label() == value)
        .ok_or_else(|| {
            CoreError::Unprocessable(format!(
                "Invalid {} '{value}'. Must be one of: {}",
                T::FIELD,
                allowed_labels::<T>().join(", ")
            ))
        })
}

/// The labels of every member of `T`, in declaration order.
pub fn allowed_labels<T: ClosedSet>() -> Vec<&'static str> {
    T::ALL.iter().map(|member| member.label()).collect()
}

/// Fish species that can be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Tilapia,
    Bangus,
}

impl ClosedSet for Species {
    const FIELD: &'static str = "species";
    const ALL: &'static [Self] = &[Species::Tilapia, Species::Bangus];

    fn label(self) -> &'static str {
        match self {
            Species::Tilapia => "Tilapia",
            Species::Bangus => "Bangus (Milkfish)",
        }
    }
}

/// Farm locations where counting sessions take place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Cagangohan,
    Southern,
}

impl ClosedSet for Location {
    const FIELD: &'static str = "location";
    const ALL: &'static [Self] = &[Location::Cagangohan, Location::Southern];

    fn label(self) -> &'static str {
        match self {
            Location::Cagangohan => "Cagangohan",
            Location::Southern => "Southern",
        }
    }
}

/// Account type stored on every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Admin,
    Staff,
}

impl ClosedSet for UserType {
    const FIELD: &'static str = "userType";
    const ALL: &'static [Self] = &[UserType::Admin, UserType::Staff];

    fn label(self) -> &'static str {
        match self {
            UserType::Admin => "Admin",
            UserType::Staff => "Staff",
        }
    }
}

macro_rules! impl_display_via_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

impl_display_via_label!(Species, Location, UserType);
