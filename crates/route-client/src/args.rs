//! Call arguments lowered into request-building values.
//!
//! Each parameter type implements [`Argument`], which declares its
//! [`ArgShape`] (used once, when the route is resolved) and converts a value
//! into an [`ArgValue`] (used on every call). Body parameters skip the trait and
//! go through [`ArgValue::json`] instead, so any `Serialize` type can be a body.

use std::fmt;
use std::io::{Cursor, Read};

use route_client_core::ArgShape;
use serde::Serialize;

use crate::error::{Error, Result};

/// A call argument, ready for the request synthesizer.
pub enum ArgValue {
    /// No value (`None`).
    Null,
    /// A value rendered as text.
    Text(String),
    /// A collection; each element becomes a repeated entry.
    List(Vec<ArgValue>),
    /// A structured value, encoded by the serializer when sent as a body.
    Json(serde_json::Value),
    /// A multipart file.
    File(MultipartFile),
    /// A reader, consumed to completion when the request is built.
    Stream(Box<dyn Read + Send>),
}

impl ArgValue {
    /// Lower a body argument through `serde`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `value` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| Error::Encode(Box::new(e)))
    }

    /// Whether the argument carries no value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Json(serde_json::Value::Null))
    }

    /// Text rendering used for path variables and query values.
    ///
    /// `None` for [`ArgValue::Null`]; lists are joined with commas.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Null | Self::Json(serde_json::Value::Null) => None,
            Self::Text(text) | Self::Json(serde_json::Value::String(text)) => Some(text),
            Self::Json(value) => Some(value.to_string()),
            Self::List(items) => Some(
                items
                    .into_iter()
                    .map(|item| item.into_text().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Self::File(file) => Some(file.file_name().unwrap_or(file.name()).to_string()),
            Self::Stream(_) => None,
        }
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::File(file) => f.debug_tuple("File").field(file).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A file uploaded as one part of a multipart request.
///
/// # Examples
///
/// ```
/// use route_client::MultipartFile;
///
/// let file = MultipartFile::new("file", b"Hello, World!".to_vec())
///     .with_file_name("test.txt")
///     .with_content_type("text/plain");
///
/// assert_eq!(file.name(), "file");
/// assert_eq!(file.file_name(), Some("test.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartFile {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    content: Vec<u8>,
}

impl MultipartFile {
    /// File part named `name` with the given content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            content: content.into(),
        }
    }

    /// Set the original file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the part content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Original file name.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Part content type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// File content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Use `name` as the part name when the file carries none.
    pub(crate) fn or_named(mut self, name: &str) -> Self {
        if self.name.is_empty() {
            self.name = name.to_string();
        }
        self
    }
}

/// A type usable as a path, query, file or stream parameter.
pub trait Argument {
    /// Type-level shape used to classify the parameter's binding.
    const SHAPE: ArgShape;

    /// Lower the value for the request synthesizer.
    fn into_arg(self) -> ArgValue;
}

macro_rules! scalar_argument {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Argument for $ty {
                const SHAPE: ArgShape = ArgShape::Scalar;

                fn into_arg(self) -> ArgValue {
                    ArgValue::Text(self.to_string())
                }
            }
        )*
    };
}

scalar_argument!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Argument for &str {
    const SHAPE: ArgShape = ArgShape::Scalar;

    fn into_arg(self) -> ArgValue {
        ArgValue::Text(self.to_string())
    }
}

impl Argument for &String {
    const SHAPE: ArgShape = ArgShape::Scalar;

    fn into_arg(self) -> ArgValue {
        ArgValue::Text(self.clone())
    }
}

impl<T: Argument> Argument for Option<T> {
    const SHAPE: ArgShape = T::SHAPE;

    fn into_arg(self) -> ArgValue {
        self.map_or(ArgValue::Null, Argument::into_arg)
    }
}

impl<T: Argument> Argument for Vec<T> {
    const SHAPE: ArgShape = ArgShape::sequence_of(T::SHAPE);

    fn into_arg(self) -> ArgValue {
        ArgValue::List(self.into_iter().map(Argument::into_arg).collect())
    }
}

impl<T: Argument, const N: usize> Argument for [T; N] {
    const SHAPE: ArgShape = ArgShape::sequence_of(T::SHAPE);

    fn into_arg(self) -> ArgValue {
        ArgValue::List(self.into_iter().map(Argument::into_arg).collect())
    }
}

impl<T: Argument + Clone> Argument for &[T] {
    const SHAPE: ArgShape = ArgShape::sequence_of(T::SHAPE);

    fn into_arg(self) -> ArgValue {
        ArgValue::List(self.iter().cloned().map(Argument::into_arg).collect())
    }
}

impl Argument for MultipartFile {
    const SHAPE: ArgShape = ArgShape::File;

    fn into_arg(self) -> ArgValue {
        ArgValue::File(self)
    }
}

impl Argument for Box<dyn Read + Send> {
    const SHAPE: ArgShape = ArgShape::Stream;

    fn into_arg(self) -> ArgValue {
        ArgValue::Stream(self)
    }
}

impl Argument for Cursor<Vec<u8>> {
    const SHAPE: ArgShape = ArgShape::Stream;

    fn into_arg(self) -> ArgValue {
        ArgValue::Stream(Box::new(self))
    }
}

impl Argument for Cursor<&'static [u8]> {
    const SHAPE: ArgShape = ArgShape::Stream;

    fn into_arg(self) -> ArgValue {
        ArgValue::Stream(Box::new(self))
    }
}

impl Argument for std::fs::File {
    const SHAPE: ArgShape = ArgShape::Stream;

    fn into_arg(self) -> ArgValue {
        ArgValue::Stream(Box::new(self))
    }
}
