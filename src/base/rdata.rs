//! The codec contract for resource record data.
//!
//! Record data types implement [`RecordData`] to report their record type,
//! [`ComposeRecordData`] to write their wire format, and
//! [`ParseRecordData`] to read it. For the representation format, they
//! implement [`ZonefileFmt`][crate::base::zonefile_fmt::ZonefileFmt] and
//! provide a `scan` function taking a
//! [`Scanner`][crate::base::scan::Scanner].
//!
//! [`UnknownRecordData`] implements the contract for any record type by
//! keeping the data as raw octets. Types with a dedicated implementation
//! live in [crate::rdata].

use super::iana::Rtype;
use super::scan::{Scanner, ScannerError};
use super::wire::{compose_len_prefixed_certain, Compose, Composer, ParseError};
use super::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::utils::base16;
use core::fmt;
use octseq::parse::Parser;

//----------- RecordData -----------------------------------------------------

/// Record data of some record type.
pub trait RecordData {
    /// Returns the record type of the data.
    ///
    /// A method, so that one type can serve several record types.
    fn rtype(&self) -> Rtype;
}

impl<'a, T: RecordData> RecordData for &'a T {
    fn rtype(&self) -> Rtype {
        (*self).rtype()
    }
}

//----------- ComposeRecordData ----------------------------------------------

/// Record data that can be written in wire format.
pub trait ComposeRecordData: RecordData {
    /// Returns the length of the wire format if it is known upfront.
    ///
    /// `compress` tells whether the target compresses names. Data that
    /// contains compressible names returns `None` in that case.
    fn rdlen(&self, compress: bool) -> Option<u16>;

    /// Appends the wire format without the length prefix.
    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;

    /// Appends the canonical wire format of RFC 4034 without the length
    /// prefix.
    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;

    /// Appends the record data prefixed with its length.
    fn compose_len_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        if let Some(rdlen) = self.rdlen(target.can_compress()) {
            rdlen.compose(target)?;
            self.compose_rdata(target)
        } else {
            compose_len_prefixed_certain(target, |target| {
                self.compose_rdata(target)
            })
        }
    }

    /// Appends the canonical record data prefixed with its length.
    fn compose_canonical_len_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        if let Some(rdlen) = self.rdlen(false) {
            rdlen.compose(target)?;
            self.compose_canonical_rdata(target)
        } else {
            compose_len_prefixed_certain(target, |target| {
                self.compose_canonical_rdata(target)
            })
        }
    }
}

impl<'a, T: ComposeRecordData> ComposeRecordData for &'a T {
    fn rdlen(&self, compress: bool) -> Option<u16> {
        (*self).rdlen(compress)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose_rdata(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose_canonical_rdata(target)
    }
}

//------------ ParseRecordData -----------------------------------------------

/// Record data that can be read from wire format.
pub trait ParseRecordData<'a, Octs: ?Sized>: RecordData + Sized {
    /// Parses record data of type `rtype`.
    ///
    /// Returns `Ok(None)` without touching the parser if the type doesn’t
    /// handle `rtype`.
    ///
    /// The parser is positioned at the start of the data and covers the
    /// whole message so that compression pointers can be followed. The data
    /// is `rdlen` octets long and must be consumed exactly.
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
        rdlen: u16,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ UnknownRecordData ---------------------------------------------

/// Record data of any type kept as raw octets.
///
/// Per [RFC 3597], only the types of [RFC 1035] may contain compressed
/// names, so the raw octets of all other types can be copied verbatim.
/// The text form is the generic `\# <length> <hex>` of RFC 3597.
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 3597]: https://tools.ietf.org/html/rfc3597
#[derive(Clone, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UnknownFields")
)]
pub struct UnknownRecordData {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::base16::serde"))]
    data: Vec<u8>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename = "UnknownRecordData")]
struct UnknownFields {
    rtype: Rtype,
    #[serde(with = "crate::utils::base16::serde")]
    data: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<UnknownFields> for UnknownRecordData {
    type Error = LongRecordData;

    fn try_from(fields: UnknownFields) -> Result<Self, Self::Error> {
        UnknownRecordData::from_octets(fields.rtype, fields.data)
    }
}

impl UnknownRecordData {
    /// Creates generic record data from the octets of the data.
    pub fn from_octets(
        rtype: Rtype,
        data: Vec<u8>,
    ) -> Result<Self, LongRecordData> {
        if data.len() > usize::from(u16::MAX) {
            Err(LongRecordData())
        } else {
            Ok(UnknownRecordData { rtype, data })
        }
    }

    /// Returns the record type this data is for.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Scans the record data.
    ///
    /// This isn’t implemented via `Scan`, because we need the record type.
    pub fn scan<S: Scanner>(
        rtype: Rtype,
        scanner: &mut S,
    ) -> Result<Self, S::Error> {
        // First token is literal "\#".
        let marker = scanner.scan_required("generic data marker")?;
        if marker != "\\#" {
            return Err(S::Error::malformed_field(
                "generic data marker",
                &marker,
                "'\\#' expected",
            ));
        }
        Self::scan_without_marker(rtype, scanner)
    }

    /// Scans the record data assuming that the marker has been skipped.
    pub fn scan_without_marker<S: Scanner>(
        rtype: Rtype,
        scanner: &mut S,
    ) -> Result<Self, S::Error> {
        // Second token is the rdata length.
        let len = scanner.scan_decimal::<u16>("generic data length")?;

        // The rest is the actual data.
        let tokens = scanner.scan_entry_tokens()?;
        let data = base16::decode_tokens(&tokens).map_err(|err| {
            S::Error::malformed_field("generic data", &tokens.concat(), err)
        })?;
        if data.len() != usize::from(len) {
            return Err(S::Error::custom(
                "generic data has incorrect length",
            ));
        }
        Ok(UnknownRecordData { rtype, data })
    }
}

//--- ComposeRecordData

impl ComposeRecordData for UnknownRecordData {
    fn rdlen(&self, _compress: bool) -> Option<u16> {
        // Checked in from_octets.
        Some(self.data.len() as u16)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.data)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.compose_rdata(target)
    }
}

//--- RecordData and ParseRecordData

impl RecordData for UnknownRecordData {
    fn rtype(&self) -> Rtype {
        self.rtype
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs>
    for UnknownRecordData
{
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
        rdlen: u16,
    ) -> Result<Option<Self>, ParseError> {
        let mut data = vec![0; usize::from(rdlen)];
        parser.parse_buf(&mut data)?;
        Ok(Some(Self { rtype, data }))
    }
}

//--- ZonefileFmt and Display

impl ZonefileFmt for UnknownRecordData {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token("\\#")?;
        p.write_token(self.data.len())?;
        if !self.data.is_empty() {
            p.write_token(base16::encode_display(&self.data))?;
        }
        Ok(())
    }
}

impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.display_zonefile(false), f)
    }
}

//--- Debug

impl fmt::Debug for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("UnknownRecordData(")?;
        fmt::Display::fmt(&self.rtype, f)?;
        f.write_str(" ")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//------------ LongRecordData ------------------------------------------------

/// The octets sequence to be used for record data is too long.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongRecordData();

impl fmt::Display for LongRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("record data too long")
    }
}

impl std::error::Error for LongRecordData {}

//============ Testing ======================================================

#[cfg(test)]
pub(crate) mod test {
    use super::super::scan::{IterScanner, ScanError, Scanner};
    use super::super::wire::ParseError;
    use super::*;
    use core::fmt::Debug;
    use octseq::builder::infallible;
    use std::vec::Vec;

    /// Check that `rdlen` produces the correct length.
    ///
    /// The test composes `data` both regularly and cannonically and checks
    /// that the length of the composed data matches what `rdlen` returns.
    pub fn test_rdlen<R: ComposeRecordData>(data: R) {
        let mut buf = Vec::new();
        infallible(data.compose_rdata(&mut buf));
        assert_eq!(buf.len(), usize::from(data.rdlen(false).unwrap()));
        buf.clear();
        infallible(data.compose_canonical_rdata(&mut buf));
        assert_eq!(buf.len(), usize::from(data.rdlen(false).unwrap()));
    }

    /// Check that composing and parsing are reverse operations.
    ///
    /// The parse closure receives the length of the composed data as the
    /// record data boundary.
    pub fn test_compose_parse<In, F, Out>(data: &In, parse: F)
    where
        In: ComposeRecordData + PartialEq<Out> + Debug,
        F: FnOnce(&mut Parser<[u8]>, u16) -> Result<Out, ParseError>,
        Out: Debug,
    {
        let mut buf = Vec::new();
        infallible(data.compose_rdata(&mut buf));
        let rdlen = u16::try_from(buf.len()).unwrap();
        let mut parser = Parser::from_ref(buf.as_slice());
        let parsed = (parse)(&mut parser, rdlen).unwrap();
        assert_eq!(parser.remaining(), 0);
        assert_eq!(*data, parsed);
    }

    pub type TestScanner = IterScanner<std::vec::IntoIter<std::string::String>>;

    /// Checks scanning.
    pub fn test_scan<F, T, X>(input: &[&str], scan: F, expected: &X)
    where
        F: FnOnce(
            &mut TestScanner,
        ) -> Result<T, <TestScanner as Scanner>::Error>,
        T: Debug,
        X: Debug + PartialEq<T>,
    {
        let mut scanner = IterScanner::new(
            input
                .iter()
                .map(|s| std::string::String::from(*s))
                .collect::<Vec<_>>(),
        );
        assert_eq!(*expected, scan(&mut scanner).unwrap(),);
        assert!(scanner.is_exhausted());
    }

    /// Checks that scanning fails.
    pub fn test_scan_err<F, T>(input: &[&str], scan: F) -> ScanError
    where
        F: FnOnce(&mut TestScanner) -> Result<T, ScanError>,
        T: Debug,
    {
        let mut scanner = IterScanner::new(
            input
                .iter()
                .map(|s| std::string::String::from(*s))
                .collect::<Vec<_>>(),
        );
        scan(&mut scanner).unwrap_err()
    }

    #[test]
    fn unknown_compose_parse_scan() {
        let rdata = UnknownRecordData::from_octets(
            Rtype::from_int(65280),
            b"\x01\x02\xab".to_vec(),
        )
        .unwrap();
        test_rdlen(&rdata);
        test_compose_parse(&rdata, |parser, rdlen| {
            UnknownRecordData::parse_rdata(Rtype::from_int(65280), parser, rdlen)
                .map(Option::unwrap)
        });
        test_scan(
            &["\\#", "3", "0102", "AB"],
            |scanner| UnknownRecordData::scan(Rtype::from_int(65280), scanner),
            &rdata,
        );
        assert_eq!(rdata.to_string(), "\\# 3 0102AB");
    }

    #[test]
    fn unknown_scan_errors() {
        let rtype = Rtype::from_int(65280);
        assert!(matches!(
            test_scan_err(&["3", "010203"], |s| UnknownRecordData::scan(rtype, s)),
            ScanError::Field { field: "generic data marker", .. }
        ));
        assert_eq!(
            test_scan_err(&["\\#", "2", "010203"], |s| {
                UnknownRecordData::scan(rtype, s)
            }),
            ScanError::Custom("generic data has incorrect length".into())
        );
        assert!(matches!(
            test_scan_err(&["\\#", "1", "0G"], |s| {
                UnknownRecordData::scan(rtype, s)
            }),
            ScanError::Field { field: "generic data", .. }
        ));
    }

    #[test]
    fn empty_unknown() {
        let rdata =
            UnknownRecordData::from_octets(Rtype::from_int(65280), Vec::new())
                .unwrap();
        assert_eq!(rdata.to_string(), "\\# 0");
        test_scan(
            &["\\#", "0"],
            |scanner| UnknownRecordData::scan(Rtype::from_int(65280), scanner),
            &rdata,
        );
    }

    #[test]
    fn long_unknown() {
        assert_eq!(
            UnknownRecordData::from_octets(Rtype::NULL, vec![0; 0x10000]),
            Err(LongRecordData())
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_ser_de() {
        use serde_test::{
            assert_de_tokens_error, assert_tokens, Compact, Configure, Token,
        };

        let rdata = UnknownRecordData::from_octets(
            Rtype::from_int(65280),
            b"\x01\xab".to_vec(),
        )
        .unwrap();
        assert_tokens(
            &rdata.readable(),
            &[
                Token::Struct { name: "UnknownRecordData", len: 2 },
                Token::Str("rtype"),
                Token::Str("TYPE65280"),
                Token::Str("data"),
                Token::Str("01AB"),
                Token::StructEnd,
            ],
        );

        let data: &'static [u8] = Box::leak(vec![0u8; 0x10000].into_boxed_slice());
        assert_de_tokens_error::<Compact<UnknownRecordData>>(
            &[
                Token::Struct { name: "UnknownRecordData", len: 2 },
                Token::Str("rtype"),
                Token::U16(65280),
                Token::Str("data"),
                Token::Bytes(data),
                Token::StructEnd,
            ],
            "record data too long",
        );
    }
}
