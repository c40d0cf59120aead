//! Various utility modules.
//!
//! The representation format encodes binary record data either in Base 16
//! or in Base 64. Both encodings share the error type [`DecodeError`].

use core::fmt;

pub mod base16;
pub mod base64;

//------------ DecodeError ---------------------------------------------------

/// Encoded data could not be decoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A character outside the alphabet of the encoding.
    IllegalChar(char),

    /// More data followed the padding.
    TrailingInput,

    /// The data ended within a group of characters.
    ShortInput,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::IllegalChar(ch) => {
                write!(f, "illegal character '{}'", ch)
            }
            DecodeError::TrailingInput => f.write_str("trailing input"),
            DecodeError::ShortInput => f.write_str("incomplete input"),
        }
    }
}

impl std::error::Error for DecodeError {}

//------------ Serde Helpers -------------------------------------------------

/// Octets as a text encoding for human readable formats or raw otherwise.
#[cfg(feature = "serde")]
mod encoded {
    use super::DecodeError;
    use core::fmt;

    pub fn serialize<S: serde::Serializer>(
        octets: &[u8],
        text: impl fmt::Display,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(&text)
        } else {
            serializer.serialize_bytes(octets)
        }
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
        encoding: &'static str,
        decode: fn(&str) -> Result<Vec<u8>, DecodeError>,
    ) -> Result<Vec<u8>, D::Error> {
        struct Visitor {
            encoding: &'static str,
            decode: fn(&str) -> Result<Vec<u8>, DecodeError>,
        }

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Vec<u8>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a {}-encoded string", self.encoding)
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                (self.decode)(v).map_err(E::custom)
            }

            fn visit_bytes<E: serde::de::Error>(
                self,
                v: &[u8],
            ) -> Result<Self::Value, E> {
                Ok(v.to_vec())
            }

            fn visit_byte_buf<E: serde::de::Error>(
                self,
                v: Vec<u8>,
            ) -> Result<Self::Value, E> {
                Ok(v)
            }
        }

        let visitor = Visitor { encoding, decode };
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(visitor)
        } else {
            deserializer.deserialize_byte_buf(visitor)
        }
    }
}
