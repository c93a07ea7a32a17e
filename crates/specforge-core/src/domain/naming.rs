//! Naming rules shared by every projector.
//!
//! All functions here are pure string transforms. They are deliberately
//! small heuristics (English pluralization, naive title-casing) and do not
//! attempt to be linguistically complete.

use crate::domain::value_objects::HttpMethod;

/// Irregular plurals, keyed by the lower-cased singular.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[("user", "users")];

/// Derive a table name from a model name.
///
/// Lower-cases the model name and pluralizes it: irregular forms first, then
/// trailing `y` → `ies`, trailing `s|sh|ch|x|z` → `+es`, otherwise `+s`.
/// A name that already is a known irregular plural is returned unchanged.
pub fn table_name(model_name: &str) -> String {
    let lower = model_name.to_lowercase();

    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *singular || lower == *plural {
            return (*plural).to_owned();
        }
    }

    if let Some(stem) = lower.strip_suffix('y') {
        return format!("{stem}ies");
    }
    if ["s", "sh", "ch", "x", "z"].iter().any(|s| lower.ends_with(s)) {
        return format!("{lower}es");
    }
    format!("{lower}s")
}

/// Reverse of the plural heuristic, used for path segments like `users`.
///
/// Case is preserved. Words that do not look plural, including singular
/// `-ss` and `-us` endings such as `status`, are returned as-is.
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();

    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *plural {
            return word[..singular.len()].to_owned();
        }
    }

    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if ["sses", "shes", "ches", "xes", "zes"]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        return word[..word.len() - 2].to_owned();
    }
    if lower.len() > 1 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") {
        return word[..word.len() - 1].to_owned();
    }
    word.to_owned()
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `order-items` → `OrderItems`, `user_id` → `UserId`, `fullName` → `FullName`.
pub fn pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

/// `get_user-by id` → `getUserById`.
pub fn camel_case(s: &str) -> String {
    decapitalize(&pascal_case(s))
}

/// `ProductUserService` → `product-user-service`.
pub fn kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower_or_digit = false;

    for c in s.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower_or_digit {
                out.push('-');
            }
            out.extend(c.to_lowercase());
            prev_lower_or_digit = c.is_lowercase() || c.is_ascii_digit();
        } else {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev_lower_or_digit = false;
        }
    }

    out.trim_end_matches('-').to_owned()
}

/// Derive an enum constant name from a raw enum value.
///
/// `-` and whitespace become `_`, the result is upper-cased, and `VALUE_` is
/// prefixed when it would otherwise start with a digit (or be empty). Other
/// characters that cannot appear in an identifier are also mapped to `_`.
pub fn constant_name(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .to_uppercase();

    match mapped.chars().next() {
        None => "VALUE_".to_owned(),
        Some(first) if first.is_ascii_digit() => format!("VALUE_{mapped}"),
        Some(_) => mapped,
    }
}

/// Strip namespace qualifiers: `UserModels.User` → `User`.
pub fn normalize_class_name(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_owned()
}

/// A method name usable in both Java and TypeScript.
pub fn method_identifier(s: &str) -> String {
    let camel = camel_case(s);
    match camel.chars().next() {
        None => "operation".to_owned(),
        Some(first) if first.is_ascii_digit() => format!("_{camel}"),
        Some(_) => camel,
    }
}

/// The primary-key candidate is purely name based.
pub fn is_primary_key_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("id")
}

/// Composite endpoint key: `GET_/users/{id}` → `GET__users_id`.
pub fn endpoint_key(method: HttpMethod, path: &str) -> String {
    let normalized: String = path
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .map(|c| if c == '/' { '_' } else { c })
        .collect();
    format!("{}_{}", method.as_upper(), normalized)
}

/// Fallback operation id when the document does not give one.
pub fn default_operation_id(method: HttpMethod, path: &str) -> String {
    format!("{}_{}", method.as_str(), path.replace('/', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_follow_plural_rules() {
        assert_eq!(table_name("users"), "users");
        assert_eq!(table_name("User"), "users");
        assert_eq!(table_name("Category"), "categories");
        assert_eq!(table_name("Address"), "addresses");
        assert_eq!(table_name("Order"), "orders");
        assert_eq!(table_name("Box"), "boxes");
        assert_eq!(table_name("Branch"), "branches");
    }

    #[test]
    fn table_name_is_pure() {
        assert_eq!(table_name("Category"), table_name("Category"));
    }

    #[test]
    fn singularize_inverts_common_plurals() {
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("orders"), "order");
        assert_eq!(singularize("class"), "class");
        assert_eq!(singularize("data"), "data");
    }

    #[test]
    fn singularize_keeps_latin_us_endings() {
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("campus"), "campus");
        assert_eq!(singularize("courses"), "course");
        assert_eq!(pascal_case(&singularize("status")), "Status");
    }

    #[test]
    fn case_conversions() {
        assert_eq!(pascal_case("order-items"), "OrderItems");
        assert_eq!(pascal_case("fullName"), "FullName");
        assert_eq!(camel_case("get_user_by_id"), "getUserById");
        assert_eq!(kebab_case("ProductUserService"), "product-user-service");
        assert_eq!(kebab_case("V2Item"), "v2-item");
    }

    #[test]
    fn constant_names() {
        assert_eq!(constant_name("in-progress"), "IN_PROGRESS");
        assert_eq!(constant_name("on hold"), "ON_HOLD");
        assert_eq!(constant_name("2fa"), "VALUE_2FA");
        assert_eq!(constant_name(""), "VALUE_");
    }

    #[test]
    fn class_names_drop_namespaces() {
        assert_eq!(normalize_class_name("UserModels.User"), "User");
        assert_eq!(normalize_class_name("TypeSpecGen.Enums.Color"), "Color");
        assert_eq!(normalize_class_name("Plain"), "Plain");
    }

    #[test]
    fn endpoint_keys_are_unique_per_verb() {
        assert_eq!(endpoint_key(HttpMethod::Get, "/users/{id}"), "GET__users_id");
        assert_ne!(
            endpoint_key(HttpMethod::Get, "/users"),
            endpoint_key(HttpMethod::Post, "/users")
        );
    }

    #[test]
    fn method_identifiers_are_valid() {
        assert_eq!(method_identifier("get_/users"), "getUsers");
        assert_eq!(method_identifier("2step"), "_2step");
        assert_eq!(method_identifier("--"), "operation");
    }
}
