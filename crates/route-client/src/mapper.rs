//! Response Mapper: raw response → declared return type.

use std::any::{Any, TypeId};
use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::response::RawResponse;
use crate::serializer::Serializer;

/// Generic shape of a type, reconstructed from [`std::any::type_name`].
///
/// Bracketed and parenthesized names (`[u8; 4]`, `(u8, String)`) are kept
/// whole and count as concrete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Path of the type without its generic arguments.
    pub name: String,
    /// Generic arguments, in order.
    pub args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Shape of `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::parse(std::any::type_name::<T>())
    }

    /// Parse a rendered type name such as `alloc::vec::Vec<my::Item>`.
    #[must_use]
    pub fn parse(type_name: &str) -> Self {
        let type_name = type_name.trim();
        let Some(open) = find_top_level(type_name, '<') else {
            return Self {
                name: type_name.to_string(),
                args: Vec::new(),
            };
        };

        let inner = type_name[open + 1..]
            .strip_suffix('>')
            .unwrap_or(&type_name[open + 1..]);
        Self {
            name: type_name[..open].to_string(),
            args: split_top_level(inner).into_iter().map(Self::parse).collect(),
        }
    }

    /// How deeply generic arguments nest: `0` for a concrete type, `1` for a
    /// container of concrete types, `2` for a container of containers.
    #[must_use]
    pub fn nesting_depth(&self) -> usize {
        self.args
            .iter()
            .map(|arg| arg.nesting_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Whether the response mapper can decode this shape.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.nesting_depth() <= 1
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Byte offset of the first `needle` outside brackets and parentheses.
fn find_top_level(s: &str, needle: char) -> Option<usize> {
    let mut depth = 0_usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if c == needle && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Split generic arguments on commas that are not nested.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = s[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

/// Decode `response` into the declared return type `R`.
///
/// - A status outside `200..300` yields `None`.
/// - `String` receives the raw body text.
/// - An empty body or a JSON `null` yields `None`.
/// - Anything else is decoded by `serializer` and converted into `R`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedReturnType`] if `R` nests generic arguments
/// more than one level deep, and [`Error::Decode`] if the body does not match
/// `R`.
pub fn map_response<R>(response: &RawResponse, serializer: &dyn Serializer) -> Result<Option<R>>
where
    R: DeserializeOwned + 'static,
{
    if !response.status().is_success() {
        return Ok(None);
    }

    if TypeId::of::<R>() == TypeId::of::<String>() {
        let text: Box<dyn Any> = Box::new(response.text().into_owned());
        return Ok(text.downcast::<R>().ok().map(|text| *text));
    }

    let descriptor = TypeDescriptor::of::<R>();
    if !descriptor.is_supported() {
        return Err(Error::UnsupportedReturnType {
            type_name: descriptor.to_string(),
        });
    }

    if response.body().is_empty() {
        return Ok(None);
    }

    let value = serializer
        .decode(response.body())
        .map_err(|source| Error::Decode {
            type_name: descriptor.to_string(),
            source,
        })?;
    if value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| Error::Decode {
            type_name: descriptor.to_string(),
            source: Box::new(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::JsonSerializer;
    use http::StatusCode;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Item {
        id: u32,
    }

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Page<T> {
        items: Vec<T>,
    }

    fn ok(body: &str) -> RawResponse {
        RawResponse::new(StatusCode::OK).with_body(body)
    }

    #[test]
    fn parse_concrete_and_generic() {
        let concrete = TypeDescriptor::parse("my::Item");
        assert_eq!(concrete.nesting_depth(), 0);

        let page = TypeDescriptor::parse("my::Page<my::Item>");
        assert_eq!(page.name, "my::Page");
        assert_eq!(page.args, vec![concrete]);
        assert_eq!(page.nesting_depth(), 1);

        let map = TypeDescriptor::parse("std::collections::HashMap<alloc::string::String, u32>");
        assert_eq!(map.args.len(), 2);
        assert_eq!(map.to_string(), "std::collections::HashMap<alloc::string::String, u32>");
    }

    #[test]
    fn brackets_are_opaque() {
        let desc = TypeDescriptor::parse("alloc::vec::Vec<[alloc::vec::Vec<u8>; 2]>");
        assert_eq!(desc.args.len(), 1);
        assert_eq!(desc.nesting_depth(), 1);

        let tuple = TypeDescriptor::parse("(u8, alloc::vec::Vec<u8>)");
        assert_eq!(tuple.nesting_depth(), 0);
    }

    #[test]
    fn doubly_nested_is_unsupported() {
        assert!(TypeDescriptor::of::<Vec<Item>>().is_supported());
        assert!(TypeDescriptor::of::<HashMap<String, Item>>().is_supported());
        assert!(!TypeDescriptor::of::<Vec<Vec<Item>>>().is_supported());
        assert!(!TypeDescriptor::of::<Page<Page<Item>>>().is_supported());
    }

    #[test]
    fn non_success_is_none() {
        let raw = RawResponse::new(StatusCode::INTERNAL_SERVER_ERROR).with_body(r#"{"id":1}"#);
        assert_eq!(map_response::<Item>(&raw, &JsonSerializer).unwrap(), None);
    }

    #[test]
    fn string_gets_raw_text() {
        let text = map_response::<String>(&ok("Hello, World!"), &JsonSerializer).unwrap();
        assert_eq!(text.as_deref(), Some("Hello, World!"));
    }

    #[test]
    fn decodes_concrete_and_generic() {
        let item = map_response::<Item>(&ok(r#"{"id":7}"#), &JsonSerializer).unwrap();
        assert_eq!(item, Some(Item { id: 7 }));

        let page =
            map_response::<Page<Item>>(&ok(r#"{"items":[{"id":1},{"id":2}]}"#), &JsonSerializer)
                .unwrap();
        assert_eq!(
            page,
            Some(Page {
                items: vec![Item { id: 1 }, Item { id: 2 }]
            })
        );
    }

    #[test]
    fn null_and_empty_bodies_are_none() {
        assert_eq!(map_response::<Item>(&ok("null"), &JsonSerializer).unwrap(), None);
        assert_eq!(map_response::<Item>(&ok(""), &JsonSerializer).unwrap(), None);
    }

    #[test]
    fn unsupported_shape_names_type() {
        let err = map_response::<Vec<Vec<Item>>>(&ok("[[]]"), &JsonSerializer).unwrap_err();
        match err {
            Error::UnsupportedReturnType { type_name } => {
                assert!(type_name.starts_with("alloc::vec::Vec<alloc::vec::Vec<"), "{type_name}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn mismatched_body_is_decode_error() {
        let err = map_response::<Item>(&ok(r#"{"name":"x"}"#), &JsonSerializer).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    }
}
