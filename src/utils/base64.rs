//! Decoding and encoding of Base 64.
//!
//! The DNS uses the original *base64* alphabet of [RFC 4648] with padding.
//! In zone files, a Base 64 value may be spread over several tokens, so
//! decoding happens character by character through a [`Decoder`].
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use core::fmt;

pub use super::DecodeError;

//------------ Convenience Functions -----------------------------------------

/// Decodes a Base 64 string.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    decode_tokens([s])
}

/// Decodes Base 64 data split over several tokens.
///
/// The tokens are decoded as if they had been concatenated. Tokens don’t
/// need to end at a group boundary.
pub fn decode_tokens<I>(tokens: I) -> Result<Vec<u8>, DecodeError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut decoder = Decoder::new();
    for token in tokens {
        token.as_ref().chars().try_for_each(|ch| decoder.push(ch))?;
    }
    decoder.finalize()
}

/// Writes the Base 64 encoding of `octets` to `f`.
pub fn display<Octets, Target>(octets: &Octets, f: &mut Target) -> fmt::Result
where
    Octets: AsRef<[u8]> + ?Sized,
    Target: fmt::Write,
{
    for chunk in octets.as_ref().chunks(3) {
        let mut group = [0u8; 4];
        group[1..=chunk.len()].copy_from_slice(chunk);
        let group = u32::from_be_bytes(group);
        for i in 0..4 {
            if i > chunk.len() {
                f.write_char(PAD)?;
            } else {
                let sextet = (group >> (18 - 6 * i)) & 0x3F;
                f.write_char(char::from(ALPHABET[sextet as usize]))?;
            }
        }
    }
    Ok(())
}

/// Returns the Base 64 encoding of `octets` as a string.
pub fn encode_string<Octets: AsRef<[u8]> + ?Sized>(octets: &Octets) -> String {
    encode_display(octets).to_string()
}

/// Returns a value displaying the Base 64 encoding of `octets`.
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

/// Serializes octets as Base 64 text in human readable formats.
///
/// Use with `#[serde(with = "crate::utils::base64::serde")]`.
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
            "Base 64",
            super::decode,
        )
    }
}

//------------ Decoder -------------------------------------------------------

/// Decodes Base 64 one character at a time.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    /// The sextets of the current group, left aligned in 24 bits.
    group: u32,

    /// The number of characters in the current group.
    len: u8,

    /// The number of padding characters in the current group.
    padding: u8,

    /// A padded group has ended the data.
    done: bool,

    octets: Vec<u8>,
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the next character.
    pub fn push(&mut self, ch: char) -> Result<(), DecodeError> {
        if self.done {
            return Err(DecodeError::TrailingInput);
        }
        if ch == PAD {
            // At least two characters are needed for one octet.
            if self.len < 2 {
                return Err(DecodeError::IllegalChar(ch));
            }
            self.padding += 1;
        } else {
            if self.padding > 0 {
                return Err(DecodeError::TrailingInput);
            }
            let sextet = sextet(ch).ok_or(DecodeError::IllegalChar(ch))?;
            self.group |= u32::from(sextet) << (18 - 6 * self.len);
        }
        self.len += 1;

        if self.len == 4 {
            // The bits of the padded octets must be zero.
            if self.group & ((1 << (8 * self.padding)) - 1) != 0 {
                return Err(DecodeError::TrailingInput);
            }
            let octets = self.group.to_be_bytes();
            let count = usize::from(3 - self.padding);
            self.octets.extend_from_slice(&octets[1..=count]);
            self.done = self.padding > 0;
            self.group = 0;
            self.len = 0;
            self.padding = 0;
        }
        Ok(())
    }

    /// Returns the decoded octets.
    ///
    /// Fails if the last group is incomplete.
    pub fn finalize(self) -> Result<Vec<u8>, DecodeError> {
        if self.len != 0 {
            return Err(DecodeError::ShortInput);
        }
        Ok(self.octets)
    }
}

//------------ Alphabet ------------------------------------------------------

const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const PAD: char = '=';

fn sextet(ch: char) -> Option<u8> {
    let value = match ch {
        'A'..='Z' => ch as u32 - 'A' as u32,
        'a'..='z' => ch as u32 - 'a' as u32 + 26,
        '0'..='9' => ch as u32 - '0' as u32 + 52,
        '+' => 62,
        '/' => 63,
        _ => return None,
    };
    Some(value as u8)
}

//============ Testing =======================================================
