//! Decoding and encoding of Base 16 a.k.a. hex digits.
//!
//! Base 16 is used by the generic record data format of RFC 3597. Digits
//! are accepted in either case and written in upper case.

use core::fmt;

pub use super::DecodeError;

//------------ Convenience Functions -----------------------------------------

/// Decodes a Base 16 string.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    decode_tokens([s])
}

/// Decodes Base 16 data split over several tokens.
///
/// A token may end in the middle of an octet.
pub fn decode_tokens<I>(tokens: I) -> Result<Vec<u8>, DecodeError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut res = Vec::new();
    let mut high = None;
    for token in tokens {
        for ch in token.as_ref().chars() {
            let digit = match ch.to_digit(16) {
                Some(digit) => digit as u8,
                None => return Err(DecodeError::IllegalChar(ch)),
            };
            match high.take() {
                Some(high) => res.push(high << 4 | digit),
                None => high = Some(digit),
            }
        }
    }
    match high {
        Some(_) => Err(DecodeError::ShortInput),
        None => Ok(res),
    }
}

/// Writes the Base 16 encoding of `octets` to `f`.
pub fn display<Octets, Target>(octets: &Octets, f: &mut Target) -> fmt::Result
where
    Octets: AsRef<[u8]> + ?Sized,
    Target: fmt::Write,
{
    octets
        .as_ref()
        .iter()
        .try_for_each(|octet| write!(f, "{:02X}", octet))
}

/// Returns the Base 16 encoding of `octets` as a string.
pub fn encode_string<Octets: AsRef<[u8]> + ?Sized>(octets: &Octets) -> String {
    encode_display(octets).to_string()
}

/// Returns a value displaying the Base 16 encoding of `octets`.
pub fn encode_display<Octets: AsRef<[u8]> + ?Sized>(
    octets: &Octets,
) -> impl fmt::Display + '_ {
    struct Encoded<'a>(&'a [u8]);

    impl fmt::Display for Encoded<'_> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            display(self.0, f)
        }
    }

    Encoded(octets.as_ref())
}

/// Serializes octets as Base 16 text in human readable formats.
#[cfg(feature = "serde")]
pub mod serde {
    pub fn serialize<S: serde::Serializer>(
        octets: &[u8],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        super::super::encoded::serialize(
            octets,
            super::encode_display(octets),
            serializer,
        )
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        super::super::encoded::deserialize(
            deserializer,
            "Base 16",
            super::decode,
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_str() {
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode("F0").unwrap(), b"\xF0");
        assert_eq!(decode("F00f").unwrap(), b"\xF0\x0F");
        assert_eq!(decode("F0F"), Err(DecodeError::ShortInput));
        assert_eq!(decode("FG"), Err(DecodeError::IllegalChar('G')));
        assert_eq!(decode_tokens(["F", "00", "f"]).unwrap(), b"\xF0\x0F");
    }

    #[test]
    fn encode() {
        assert_eq!(encode_string(b""), "");
        assert_eq!(encode_string(b"\x0f"), "0F");
        assert_eq!(encode_string(b"\xf0\x0a"), "F00A");
    }
}
