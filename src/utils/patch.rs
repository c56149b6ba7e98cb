//! Actualizaciones parciales con distinción entre campo ausente y `null`
//!
//! Para columnas opcionales usamos `Option<Option<T>>`:
//!
//! - `None`: el campo no vino en el body, se conserva el valor guardado
//! - `Some(None)`: el campo vino como `null`, se borra
//! - `Some(Some(v))`: se sobrescribe con `v`
//!
//! Los campos deben declararse con
//! `#[serde(default, deserialize_with = "double_option")]`.

use serde::{Deserialize, Deserializer};

/// Deserializa un campo presente (aunque sea `null`) como `Some(..)`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Aplica un parche sobre una columna NOT NULL
pub fn merge<T>(current: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *current = value;
    }
}

/// Aplica un parche sobre una columna nullable
pub fn merge_nullable<T>(current: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *current = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        logo_url: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"logo_url": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"logo_url": "https://cdn/logo.png"}"#).unwrap();

        assert_eq!(absent.logo_url, None);
        assert_eq!(null.logo_url, Some(None));
        assert_eq!(value.logo_url, Some(Some("https://cdn/logo.png".to_string())));
    }

    #[test]
    fn test_merge_nullable() {
        let mut stored = Some("old".to_string());
        merge_nullable(&mut stored, None);
        assert_eq!(stored.as_deref(), Some("old"));

        merge_nullable(&mut stored, Some(Some("new".to_string())));
        assert_eq!(stored.as_deref(), Some("new"));

        merge_nullable(&mut stored, Some(None));
        assert_eq!(stored, None);
    }

    #[test]
    fn test_merge_keeps_value_when_absent() {
        let mut colour = "#1e3a5f".to_string();
        merge(&mut colour, None);
        assert_eq!(colour, "#1e3a5f");
        merge(&mut colour, Some("#ffffff".to_string()));
        assert_eq!(colour, "#ffffff");
    }
}
