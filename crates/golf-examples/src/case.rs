//! Field-name case conversion for JSON records.
//!
//! Only object keys are renamed. Values, including strings that look like
//! identifiers, are left untouched.

use serde_json::{Map, Value};

/// Target naming style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Camel,
    Snake,
}

impl Case {
    /// Convert one identifier to this style.
    #[must_use]
    pub fn convert(self, name: &str) -> String {
        match self {
            Self::Camel => to_camel_case(name),
            Self::Snake => to_snake_case(name),
        }
    }
}

/// `first_name` / `first name` to `firstName`.
///
/// ```
/// use golf_examples::to_camel_case;
///
/// assert_eq!(to_camel_case("mailing_address"), "mailingAddress");
/// assert_eq!(to_camel_case("zip code"), "zipCode");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let words = name.split(['_', ' ']).filter(|word| !word.is_empty());
    for (i, word) in words.enumerate() {
        let mut chars = word.chars();
        if i > 0
            && let Some(first) = chars.next()
        {
            out.extend(first.to_uppercase());
        }
        out.extend(chars.flat_map(char::to_lowercase));
    }
    out
}

/// `firstName` to `first_name`.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rename every object key at every depth with `rename`.
pub fn rename_keys(value: &Value, rename: &impl Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (rename(key), rename_keys(value, rename)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|v| rename_keys(v, rename)).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn snake() -> Value {
        serde_json::from_str(include_str!("../fixtures/user_profile_snake.json")).unwrap()
    }

    fn camel() -> Value {
        serde_json::from_str(include_str!("../fixtures/user_profile_camel.json")).unwrap()
    }

    fn keys(value: &Value, out: &mut Vec<String>) {
        if let Value::Object(map) = value {
            for (key, value) in map {
                out.push(key.clone());
                keys(value, out);
            }
        }
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("first_name"), "firstName");
        assert_eq!(to_camel_case("zip code"), "zipCode");
        assert_eq!(to_camel_case("_leading__double_"), "leadingDouble");
        assert_eq!(to_camel_case("single"), "single");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("firstName"), "first_name");
        assert_eq!(to_snake_case("apartmentUnit"), "apartment_unit");
        assert_eq!(to_snake_case("Leading"), "leading");
        assert_eq!(to_snake_case("plain"), "plain");
    }

    #[test]
    fn test_top_level_key_renamed() {
        let camel = rename_keys(&snake(), &to_camel_case);
        assert_eq!(camel["firstName"], json!("John"));
        assert!(camel.get("first_name").is_none());
    }

    #[test]
    fn test_nested_key_renamed() {
        let camel = rename_keys(&snake(), &to_camel_case);
        assert_eq!(camel["mailingAddress"]["streetName"], json!("Main Street"));
    }

    #[test]
    fn test_values_unchanged() {
        let camel = rename_keys(&snake(), &to_camel_case);
        assert_eq!(camel["mailingAddress"]["houseNumber"], json!(123));
        assert_eq!(camel["emailAddress"], json!("john_doe@example.com"));
    }

    #[test]
    fn test_fixtures_convert_both_ways() {
        assert_eq!(rename_keys(&snake(), &to_camel_case), camel());
        assert_eq!(rename_keys(&camel(), &to_snake_case), snake());
        assert_eq!(
            rename_keys(&snake(), &|k: &str| Case::Camel.convert(k)),
            camel()
        );
    }

    #[test]
    fn test_camel_keys_round_trip() {
        let mut names = Vec::new();
        keys(&camel(), &mut names);
        assert_eq!(names.len(), 11);
        for name in names {
            assert_eq!(to_camel_case(&to_snake_case(&name)), name);
        }
    }

    #[test]
    fn test_arrays_are_walked() {
        let value = json!({ "user_list": [{ "user_id": 1 }, "keep_me"] });
        assert_eq!(
            rename_keys(&value, &to_camel_case),
            json!({ "userList": [{ "userId": 1 }, "keep_me"] })
        );
    }
}
