//! Application events and message payloads.

use std::fmt;

use serde::Serialize;

/// An application event that can be pushed over a stream.
///
/// The event's name becomes the SSE `event` field; the event itself is
/// serialized to JSON for the `data` field. Use `#[serde(transparent)]` or a
/// custom `Serialize` impl to control exactly what goes on the wire.
///
/// ```rust
/// use serde::Serialize;
/// use turbosse::Event;
///
/// #[derive(Serialize)]
/// struct Progress {
///     done: u32,
///     total: u32,
/// }
///
/// impl Event for Progress {
///     fn name(&self) -> &str {
///         "progress"
///     }
/// }
/// ```
pub trait Event: Serialize {
    /// The SSE event name. Must be non-empty and fit on one line.
    fn name(&self) -> &str;
}

impl<T: Event + ?Sized> Event for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// An event assembled from a name and any serializable payload.
///
/// Serializes as the payload alone; the name travels in the `event` field.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedEvent<T> {
    name: String,
    payload: T,
}

impl<T: Serialize> NamedEvent<T> {
    /// Create a named event.
    pub fn new(name: impl Into<String>, payload: T) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Get the payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }
}

impl<T: Serialize> Serialize for NamedEvent<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload.serialize(serializer)
    }
}

impl<T: Serialize> Event for NamedEvent<T> {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Scalar-or-null data for plain messages.
///
/// Written verbatim, without JSON encoding. `Null` becomes an empty `data`
/// field.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MessageData {
    /// No data; renders as an empty string
    #[default]
    Null,
    /// Boolean; renders as `true` / `false`
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point; renders via `Display` (`1.5`, `2`)
    Float(f64),
    /// Text, written as-is
    Text(String),
}

impl MessageData {
    /// Returns `true` for [`MessageData::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for MessageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<()> for MessageData {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for MessageData {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for MessageData {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MessageData {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f32> for MessageData {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for MessageData {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<MessageData>> From<Option<T>> for MessageData {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for MessageData {
                fn from(value: $t) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64);
impl_from_int!(UInt as u64: u8, u16, u32, u64);
