//! Creating and consuming data in wire format.

use super::name::Name;
use core::fmt;
use octseq::builder::{OctetsBuilder, Truncate};
use octseq::parse::{Parser, ShortInput};
use std::net::Ipv4Addr;

//------------ compose functions ---------------------------------------------

/// Composes some data prefixed by its length.
///
/// # Panics
///
/// The function panics if the length of the composed data is greater than
/// 0xFFFF. Record data types guarantee this when they are created.
pub fn compose_len_prefixed_certain<Target, F>(
    target: &mut Target,
    op: F,
) -> Result<(), Target::AppendError>
where
    Target: Composer + ?Sized,
    F: FnOnce(&mut Target) -> Result<(), Target::AppendError>,
{
    target.append_slice(&[0; 2])?;
    let pos = target.as_ref().len();
    match op(target) {
        Ok(_) => {
            let len = u16::try_from(target.as_ref().len() - pos)
                .expect("long data");
            target.as_mut()[pos - 2..pos].copy_from_slice(&len.to_be_bytes());
            Ok(())
        }
        Err(err) => {
            target.truncate(pos - 2);
            Err(err)
        }
    }
}

//------------ Composer ------------------------------------------------------

/// An octets builder that can be used to assemble DNS data.
///
/// On top of being an [`OctetsBuilder`], a composer gives access to what
/// has been written so far, so that length prefixes can be filled in
/// afterwards, and it can be truncated if assembling a value fails half-way.
pub trait Composer:
    OctetsBuilder + AsRef<[u8]> + AsMut<[u8]> + Truncate
{
    /// Appends a domain name using name compression if supported.
    ///
    /// Domain name compression attempts to lower the size of a DNS message
    /// by avoiding to include repeated domain name suffixes. Instead of
    /// adding the full suffix, a pointer to the location of the previous
    /// occurence is added. Only names in the handful of record types
    /// listed in RFC 3597 may ever be compressed. All other names,
    /// including the signer name of an RRSIG record, must be added via
    /// [`Name::compose`].
    ///
    /// The default implementation simply appends the name uncompressed.
    fn append_compressed_name(
        &mut self,
        name: &Name,
    ) -> Result<(), Self::AppendError> {
        name.compose(self)
    }

    /// Returns whether the composer performs name compression.
    fn can_compress(&self) -> bool {
        false
    }
}

impl Composer for std::vec::Vec<u8> {}

#[cfg(feature = "bytes")]
impl Composer for bytes::BytesMut {}

//------------ Compose -------------------------------------------------------

/// A type that can be written in wire format.
pub trait Compose {
    /// The length of the composed value if it is always the same.
    const COMPOSE_LEN: u16 = 0;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;
}

impl<'a, T: Compose + ?Sized> Compose for &'a T {
    const COMPOSE_LEN: u16 = T::COMPOSE_LEN;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose(target)
    }
}

impl Compose for u8 {
    const COMPOSE_LEN: u16 = 1;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&[*self])
    }
}

macro_rules! compose_to_be_bytes {
    ( $type:ident ) => {
        impl Compose for $type {
            const COMPOSE_LEN: u16 = ($type::BITS >> 3) as u16;

            fn compose<Target: OctetsBuilder + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                target.append_slice(&self.to_be_bytes())
            }
        }
    };
}

compose_to_be_bytes!(u16);
compose_to_be_bytes!(u32);

impl Compose for Ipv4Addr {
    const COMPOSE_LEN: u16 = 4;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.octets())
    }
}

//------------ Parse ------------------------------------------------------

/// A type that can extract a value from a parser.
///
/// The parser given to implementations spans the whole message so that
/// compression pointers can be followed. Values that have a known length
/// must only consume their own octets.
pub trait Parse<'a, Octs: ?Sized>: Sized {
    /// Extracts a value from the beginning of `parser`.
    ///
    /// If parsing fails and an error is returned, the parser’s position
    /// should be considered to be undefined.
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError>;
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for u8 {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        parser.parse_u8().map_err(Into::into)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for u16 {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        parser.parse_u16_be().map_err(Into::into)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for u32 {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        parser.parse_u32_be().map_err(Into::into)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for Ipv4Addr {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 4];
        parser.parse_buf(&mut buf)?;
        Ok(buf.into())
    }
}

//============ Error Types ===================================================

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the parser.
    ShortInput,

    /// A formatting error occurred.
    Form(FormError),
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    #[must_use]
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }
}

//--- From

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(ref err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    #[must_use]
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }

    /// Returns the diagnostics string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

//--- Display and Error

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compose_len_prefixed() {
        let mut target = Vec::new();
        target.push(0xAA);
        compose_len_prefixed_certain(&mut target, |target| {
            0x0102_0304u32.compose(target)
        })
        .unwrap();
        assert_eq!(target, b"\xAA\x00\x04\x01\x02\x03\x04");
    }

    #[test]
    fn parse_integers() {
        let data = b"\x01\x02\x03\x04\x05\x06\x07";
        let mut parser = Parser::from_ref(&data[..]);
        assert_eq!(u8::parse(&mut parser), Ok(1));
        assert_eq!(u16::parse(&mut parser), Ok(0x0203));
        assert_eq!(u32::parse(&mut parser), Err(ParseError::ShortInput));
    }

    #[test]
    fn compose_len() {
        assert_eq!(u8::COMPOSE_LEN, 1);
        assert_eq!(u16::COMPOSE_LEN, 2);
        assert_eq!(u32::COMPOSE_LEN, 4);
    }
}
