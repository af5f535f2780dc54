//! Tri-state field for partial updates
//!
//! JSON `PUT` bodies need to tell three cases apart:
//! - key absent: keep the stored value
//! - key present with `null`: clear the stored value
//! - key present with a value: replace the stored value
//!
//! Use with `#[serde(default)]` so an absent key lands on [`Patch::Missing`].

use serde::{Deserialize, Deserializer};

/// A field of a partial update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Not sent by the client
    #[default]
    Missing,
    /// Sent as explicit `null`
    Null,
    /// Sent with a value
    Value(T),
}

impl<T> Patch<T> {
    /// Resolve the patch against the stored value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Missing => current,
            Self::Null => None,
            Self::Value(v) => Some(v),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; absence is handled by serde(default)
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default)]
        age: Patch<i32>,
    }

    #[test]
    fn absent_key_is_missing() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.age, Patch::Missing);
    }

    #[test]
    fn null_is_null() {
        let body: Body = serde_json::from_str(r#"{"age": null}"#).unwrap();
        assert_eq!(body.age, Patch::Null);
    }

    #[test]
    fn value_is_value() {
        let body: Body = serde_json::from_str(r#"{"age": 31}"#).unwrap();
        assert_eq!(body.age, Patch::Value(31));
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(serde_json::from_str::<Body>(r#"{"age": "old"}"#).is_err());
    }

    #[test]
    fn apply_semantics() {
        assert_eq!(Patch::Missing.apply(Some(30)), Some(30));
        assert_eq!(Patch::<i32>::Null.apply(Some(30)), None);
        assert_eq!(Patch::Value(31).apply(None), Some(31));
    }
}
