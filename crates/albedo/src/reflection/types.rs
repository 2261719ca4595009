//! Wire types for reflection requests.
//!
//! All fields are optional on the wire. Missing and `null` values fall back to
//! their zero value, which the engine treats as "use the default".
//!
//! Object keys match field names regardless of ASCII case, and when a key
//! appears more than once the last occurrence wins. A `null` value leaves the
//! field as it was, and repeated `headers` objects are merged.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Description of one HTTP response to produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSpec {
    /// Status code; `0` means 200 OK.
    pub status: i64,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    /// Plain-text payload. Takes precedence over `encoded_body`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// Base64 payload, decoded only when `body` is empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub encoded_body: String,
    /// Written to the operational log whenever this spec is reflected.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub log_message: String,
}

impl ResponseSpec {
    /// Shorthand for a spec with only a status.
    pub fn with_status(status: i64) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }
}

/// The `(method, url)` pair a configured response is bound to.
///
/// `url` is the literal request target including the query string. It is
/// never parsed or normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DynamicEndpointSpec {
    pub method: String,
    pub url: String,
}

impl DynamicEndpointSpec {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }
}

/// Body of `POST /configure_reflection`.
///
/// On the wire the response fields sit next to `endpoints` in one flat object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigureReflectionRequest {
    #[serde(flatten)]
    pub response: ResponseSpec,
    pub endpoints: Vec<DynamicEndpointSpec>,
}

// =============================================================================
// Deserialization
// =============================================================================

/// Every key the wire types understand, in canonical spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Status,
    Headers,
    Body,
    EncodedBody,
    LogMessage,
    Endpoints,
    Method,
    Url,
    Unknown,
}

const FIELD_NAMES: [(&str, Field); 8] = [
    ("status", Field::Status),
    ("headers", Field::Headers),
    ("body", Field::Body),
    ("encodedBody", Field::EncodedBody),
    ("logMessage", Field::LogMessage),
    ("endpoints", Field::Endpoints),
    ("method", Field::Method),
    ("url", Field::Url),
];

impl Field {
    fn from_key(key: &str) -> Self {
        FIELD_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map_or(Field::Unknown, |(_, field)| *field)
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl Visitor<'_> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a field name")
            }

            fn visit_str<E: de::Error>(self, key: &str) -> Result<Field, E> {
                Ok(Field::from_key(key))
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

/// Overwrite `slot` with the next value unless it is `null`.
fn assign<'de, A, T>(slot: &mut T, map: &mut A) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de>,
{
    if let Some(value) = map.next_value::<Option<T>>()? {
        *slot = value;
    }
    Ok(())
}

/// A wire object filled in one key at a time.
trait WireObject: Default {
    const EXPECTING: &'static str;

    /// Consume the value for `field`, or return `false` to have it skipped.
    fn read_field<'de, A>(&mut self, field: Field, map: &mut A) -> Result<bool, A::Error>
    where
        A: MapAccess<'de>;
}

impl WireObject for ResponseSpec {
    const EXPECTING: &'static str = "a response spec object";

    fn read_field<'de, A>(&mut self, field: Field, map: &mut A) -> Result<bool, A::Error>
    where
        A: MapAccess<'de>,
    {
        match field {
            Field::Status => assign(&mut self.status, map)?,
            Field::Headers => {
                if let Some(headers) = map.next_value::<Option<HashMap<String, String>>>()? {
                    self.headers.extend(headers);
                }
            }
            Field::Body => assign(&mut self.body, map)?,
            Field::EncodedBody => assign(&mut self.encoded_body, map)?,
            Field::LogMessage => assign(&mut self.log_message, map)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl WireObject for DynamicEndpointSpec {
    const EXPECTING: &'static str = "an endpoint object";

    fn read_field<'de, A>(&mut self, field: Field, map: &mut A) -> Result<bool, A::Error>
    where
        A: MapAccess<'de>,
    {
        match field {
            Field::Method => assign(&mut self.method, map)?,
            Field::Url => assign(&mut self.url, map)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl WireObject for ConfigureReflectionRequest {
    const EXPECTING: &'static str = "a reflection configuration object";

    fn read_field<'de, A>(&mut self, field: Field, map: &mut A) -> Result<bool, A::Error>
    where
        A: MapAccess<'de>,
    {
        match field {
            Field::Endpoints => {
                assign(&mut self.endpoints, map)?;
                Ok(true)
            }
            _ => self.response.read_field(field, map),
        }
    }
}

struct WireVisitor<T>(PhantomData<T>);

impl<'de, T: WireObject> Visitor<'de> for WireVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(T::EXPECTING)
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<T, A::Error> {
        let mut value = T::default();
        while let Some(field) = map.next_key::<Field>()? {
            if !value.read_field(field, &mut map)? {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(value)
    }
}

macro_rules! deserialize_wire_object {
    ($($ty:ty),+) => {
        $(
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    deserializer.deserialize_any(WireVisitor(PhantomData))
                }
            }
        )+
    };
}

deserialize_wire_object!(ResponseSpec, DynamicEndpointSpec, ConfigureReflectionRequest);
