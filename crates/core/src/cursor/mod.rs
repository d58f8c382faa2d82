//! Opaque cursor codec.
//!
//! A cursor is a flat mapping of scalar parameters serialized as a URL query
//! string and then base64 encoded:
//!
//! ```text
//! {id: "node5"}  ->  "id=node5"  ->  "aWQ9bm9kZTU="
//! ```
//!
//! Clients must treat the encoded string as opaque. Decoding never trusts the
//! content: [`decode_parameters`] only produces raw strings, and a
//! [`CursorSchema`] turns them into typed [`CursorParameters`].

mod offset;
mod params;
mod schema;

pub use offset::OffsetCursor;
pub use params::{CursorParameters, ParamValue, RawCursorParameters};
pub use schema::{CursorSchema, FieldRule};

use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use url::form_urlencoded;

use crate::error::{CursorResult, CursorValidationError};

/// Maximum number of key/value pairs read from a decoded cursor.
pub const MAX_CURSOR_PARAMETERS: usize = 20;

/// Standard alphabet, padding written on encode and optional on decode.
const CURSOR_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// =============================================================================
// Codec
// =============================================================================

/// Serialize parameters as a query string.
pub fn to_query_string(parameters: &CursorParameters) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in parameters.iter() {
        serializer.append_pair(key, &value.to_string());
    }
    serializer.finish()
}

/// Encode parameters into an opaque cursor string.
pub fn encode_parameters(parameters: &CursorParameters) -> String {
    CURSOR_ENGINE.encode(to_query_string(parameters))
}

/// Decode an opaque cursor string into raw, unvalidated parameters.
///
/// Only the first [`MAX_CURSOR_PARAMETERS`] pairs are read. When a key
/// repeats, its first value wins.
pub fn decode_parameters(encoded: &str) -> CursorResult<RawCursorParameters> {
    let bytes = CURSOR_ENGINE
        .decode(encoded.trim())
        .map_err(|e| CursorValidationError::single(format!("cursor is not valid base64: {}", e)))?;

    let mut parameters = RawCursorParameters::new();
    for (key, value) in form_urlencoded::parse(&bytes).take(MAX_CURSOR_PARAMETERS) {
        parameters
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    Ok(parameters)
}

// =============================================================================
// Cursor Types
// =============================================================================

/// Shared contract of cursor types.
pub trait OpaqueCursor: Sized {
    /// Parameters this cursor encodes.
    fn to_parameters(&self) -> CursorParameters;

    /// Decode and validate an encoded cursor.
    fn from_string(encoded: &str) -> CursorResult<Self>;

    /// Encoded, transport-safe representation.
    fn encode(&self) -> String {
        encode_parameters(&self.to_parameters())
    }
}

/// Generic cursor over arbitrary parameters.
///
/// Two cursors are equal iff their parameter mappings are equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor {
    parameters: CursorParameters,
}

impl Cursor {
    pub fn new(parameters: impl Into<CursorParameters>) -> Self {
        Self {
            parameters: parameters.into(),
        }
    }

    pub fn parameters(&self) -> &CursorParameters {
        &self.parameters
    }

    pub fn into_parameters(self) -> CursorParameters {
        self.parameters
    }

    /// Decode a cursor and validate it with a caller-supplied function.
    pub fn from_string_with<F>(encoded: &str, validate: F) -> CursorResult<Self>
    where
        F: FnOnce(&RawCursorParameters) -> CursorResult<CursorParameters>,
    {
        let raw = decode_parameters(encoded)?;
        Ok(Self::new(validate(&raw)?))
    }

    /// Decode a cursor and validate it against a schema.
    pub fn from_string_with_schema(encoded: &str, schema: &CursorSchema) -> CursorResult<Self> {
        Self::from_string_with(encoded, |raw| schema.validate(raw))
    }
}

impl From<CursorParameters> for Cursor {
    fn from(parameters: CursorParameters) -> Self {
        Self::new(parameters)
    }
}

impl OpaqueCursor for Cursor {
    fn to_parameters(&self) -> CursorParameters {
        self.parameters.clone()
    }

    /// Decode without validation; every parameter is kept as a string.
    fn from_string(encoded: &str) -> CursorResult<Self> {
        decode_parameters(encoded).map(|raw| Self::new(CursorParameters::from_raw(raw)))
    }
}
