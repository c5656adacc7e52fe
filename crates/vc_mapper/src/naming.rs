//! Serialized key naming.
//!
//! A member with an explicit key keeps it unchanged; every other member
//! name goes through the engine's [`KeyFormatter`], [`SnakeCase`] unless
//! configured otherwise.

use alloc::string::String;

use heck::ToSnakeCase;

// -----------------------------------------------------------------------------
// KeyFormatter

/// Turns a logical member name into a serialized key.
///
/// Implementations must be pure: the key of a member is computed once per
/// engine and cached on its plan.
///
/// Any `Fn(&str) -> String` closure is a formatter.
///
/// # Examples
///
/// ```
/// use vc_mapper::{KeyFormatter, SnakeCase, Verbatim};
///
/// assert_eq!(SnakeCase.format_key("displayName"), "display_name");
/// assert_eq!(Verbatim.format_key("displayName"), "displayName");
///
/// let upper = |name: &str| name.to_uppercase();
/// assert_eq!(upper.format_key("id"), "ID");
/// ```
pub trait KeyFormatter: Send + Sync + 'static {
    fn format_key(&self, name: &str) -> String;
}

impl<F> KeyFormatter for F
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    #[inline]
    fn format_key(&self, name: &str) -> String {
        self(name)
    }
}

/// The default formatter, see [`to_snake_case`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SnakeCase;

impl KeyFormatter for SnakeCase {
    #[inline]
    fn format_key(&self, name: &str) -> String {
        to_snake_case(name)
    }
}

/// Keeps member names unchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Verbatim;

impl KeyFormatter for Verbatim {
    #[inline]
    fn format_key(&self, name: &str) -> String {
        String::from(name)
    }
}

// -----------------------------------------------------------------------------
// to_snake_case

/// Splits `name` into words and joins them lowercased with `_`.
///
/// Words are delimited by any non-alphanumeric character, by a lower-case
/// letter (or a digit following one) before an upper-case letter, and by
/// the last letter of an upper-case run followed by a lower-case letter.
///
/// # Examples
///
/// ```
/// use vc_mapper::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("camelCase"), "camel_case");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// assert_eq!(to_snake_case("kebab-case name"), "kebab_case_name");
/// ```
#[inline]
pub fn to_snake_case(name: &str) -> String {
    ToSnakeCase::to_snake_case(name)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::to_snake_case;

    #[test]
    fn splits_word_boundaries() {
        let cases = [
            ("camelCase", "camel_case"),
            ("PascalCase", "pascal_case"),
            ("HTTPServer", "http_server"),
            ("userID", "user_id"),
            ("getHTTPResponseCode", "get_http_response_code"),
            ("version2Beta", "version2_beta"),
            ("snake_case", "snake_case"),
            ("double__under", "double_under"),
            ("_leading", "leading"),
            ("with space", "with_space"),
            ("x", "x"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(to_snake_case(input), expected, "input: {input}");
        }
    }

    #[test]
    fn is_idempotent() {
        for input in ["camelCase", "HTTPServer", "a-b c_d", "ÉtéJoli"] {
            let once = to_snake_case(input);
            assert_eq!(to_snake_case(&once), once);
        }
    }
}
