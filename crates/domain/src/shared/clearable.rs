//! Tri-state wrapper for nullable fields in partial updates.

use serde::{Deserialize, Deserializer, Serialize};

/// Wrapper for optional fields that can be explicitly cleared.
/// - `Unchanged`: field absent from the request, keep the stored value
/// - `Clear`: field sent as `null`, clear the stored value
/// - `Set(T)`: field sent with a value
///
/// Pair with `#[serde(default)]` so an absent field becomes `Unchanged`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Clearable<T> {
    #[default]
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Clearable<T> {
    /// Whether the stored column must be written.
    pub fn should_update(&self) -> bool {
        !matches!(self, Clearable::Unchanged)
    }

    /// Value to write when `should_update` is true.
    pub fn into_value(self) -> Option<T> {
        match self {
            Clearable::Set(v) => Some(v),
            Clearable::Unchanged | Clearable::Clear => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Clearable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Clearable::Set(v),
            None => Clearable::Clear,
        })
    }
}

impl<T: Serialize> Serialize for Clearable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Clearable::Set(v) => v.serialize(serializer),
            Clearable::Unchanged | Clearable::Clear => serializer.serialize_none(),
        }
    }
}
