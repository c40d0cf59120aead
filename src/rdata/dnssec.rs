//! Record data from [RFC 4034]: the RRSIG record.
//!
//! This RFC defines the record types for DNSSEC. Of these, only the
//! signature record is provided here.
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use crate::base::iana::{Rtype, SecAlg};
use crate::base::name::Name;
use crate::base::rdata::{
    ComposeRecordData, LongRecordData, ParseRecordData, RecordData,
};
use crate::base::scan::{Scanner, ScannerError};
use crate::base::wire::{Compose, Composer, Parse, ParseError};
use crate::base::zonefile_fmt::{self, Formatter, ZonefileFmt};
use crate::base::Ttl;
use crate::utils::base64;
use core::str::FromStr;
use core::{cmp, fmt};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::vec::Vec;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

//------------ Timestamp ------------------------------------------------------

/// A Timestamp for RRSIG Records.
///
/// [RFC 4034] defines Timestamps as the number of seconds elepased since
/// since 1 January 1970 00:00:00 UTC, ignoring leap seconds. The value is
/// kept as the raw 32 bit integer that appears on the wire. Since it will
/// overflow in 2106, the value is conceptionally viewed as the 32 bit
/// modulus of a larger number space and compared using so-called "Serial
/// number arithmetic", as defined in [RFC 1982].
///
/// Timestamps only implement a partial ordering. That is, there are
/// pairs of values that are not equal but there still isn’t one value larger
/// than the other. Since this is neatly implemented by the `PartialOrd`
/// trait, the type implements that.
///
/// [RFC 1982]: https://tools.ietf.org/html/rfc1982
/// [RFC 4034]: https://tools.ietf.org/html/rfc4034
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u32);

impl Timestamp {
    /// Returns a timestamp for the current Unix time.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[must_use]
    pub fn now() -> Self {
        // Truncation is the modulus operation of serial number arithmetic.
        Self(OffsetDateTime::now_utc().unix_timestamp() as u32)
    }

    /// Returns the timestamp as a raw integer.
    #[must_use]
    pub fn into_int(self) -> u32 {
        self.0
    }

    /// Scans a timestamp for the field with the given name.
    ///
    /// In [RRSIG] records, the expiration and inception times are given as
    /// serial values. Their representation format can either be the
    /// value or a specific date in `YYYYMMDDHHmmSS` format.
    ///
    /// [RRSIG]: Rrsig
    pub fn scan<S: Scanner>(
        scanner: &mut S,
        field: &'static str,
    ) -> Result<Self, S::Error> {
        scanner.scan_field(field)
    }

    /// Returns a value displaying the timestamp as an RFC 3339 date.
    ///
    /// The year 2106 problem is ignored, i.e., timestamps are always
    /// shown as if they were from the first 2^32 seconds of the Unix epoch.
    pub fn display_datetime(self) -> impl fmt::Display {
        struct Display(u32);

        impl fmt::Display for Display {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match OffsetDateTime::from_unix_timestamp(i64::from(self.0)) {
                    Ok(dt) => write!(
                        f,
                        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                        dt.year(),
                        u8::from(dt.month()),
                        dt.day(),
                        dt.hour(),
                        dt.minute(),
                        dt.second(),
                    ),
                    Err(_) => write!(f, "{}", self.0),
                }
            }
        }

        Display(self.0)
    }
}

/// # Parsing and Composing
///
impl Timestamp {
    pub const COMPOSE_LEN: u16 = 4;

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        u32::parse(parser).map(Self)
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.0.compose(target)
    }
}

//--- From and FromStr

impl From<u32> for Timestamp {
    fn from(item: u32) -> Self {
        Self(item)
    }
}

impl From<Timestamp> for u32 {
    fn from(item: Timestamp) -> Self {
        item.0
    }
}

impl FromStr for Timestamp {
    type Err = IllegalSignatureTime;

    /// Parses a timestamp value from a string.
    ///
    /// The presentation format can either be their integer value or a
    /// specific date in `YYYYMMDDHHmmSS` format.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.is_empty() || !src.bytes().all(|ch| ch.is_ascii_digit()) {
            return Err(IllegalSignatureTime(()));
        }
        if src.len() == 14 {
            let year = i32::from_str(&src[0..4])
                .map_err(|_| IllegalSignatureTime(()))?;
            let month = Month::try_from(
                u8::from_str(&src[4..6])
                    .map_err(|_| IllegalSignatureTime(()))?,
            )
            .map_err(|_| IllegalSignatureTime(()))?;
            let day = u8::from_str(&src[6..8])
                .map_err(|_| IllegalSignatureTime(()))?;
            let hour = u8::from_str(&src[8..10])
                .map_err(|_| IllegalSignatureTime(()))?;
            let minute = u8::from_str(&src[10..12])
                .map_err(|_| IllegalSignatureTime(()))?;
            let second = u8::from_str(&src[12..14])
                .map_err(|_| IllegalSignatureTime(()))?;
            let secs = PrimitiveDateTime::new(
                Date::from_calendar_date(year, month, day)
                    .map_err(|_| IllegalSignatureTime(()))?,
                Time::from_hms(hour, minute, second)
                    .map_err(|_| IllegalSignatureTime(()))?,
            )
            .assume_utc()
            .unix_timestamp();
            u32::try_from(secs)
                .map(Timestamp)
                .map_err(|_| IllegalSignatureTime(()))
        } else {
            u32::from_str(src)
                .map(Timestamp)
                .map_err(|_| IllegalSignatureTime(()))
        }
    }
}

//--- Display

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--- PartialOrd

impl cmp::PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        match self.0.cmp(&other.0) {
            cmp::Ordering::Equal => Some(cmp::Ordering::Equal),
            cmp::Ordering::Less => {
                let sub = other.0 - self.0;
                match sub.cmp(&0x8000_0000) {
                    cmp::Ordering::Less => Some(cmp::Ordering::Less),
                    cmp::Ordering::Greater => Some(cmp::Ordering::Greater),
                    cmp::Ordering::Equal => None,
                }
            }
            cmp::Ordering::Greater => {
                let sub = self.0 - other.0;
                match sub.cmp(&0x8000_0000) {
                    cmp::Ordering::Less => Some(cmp::Ordering::Greater),
                    cmp::Ordering::Greater => Some(cmp::Ordering::Less),
                    cmp::Ordering::Equal => None,
                }
            }
        }
    }
}

//------------ Rrsig ---------------------------------------------------------

/// The record data of an RRSIG record.
///
/// An RRSIG record contains a digital signature over the RRset with the
/// same owner, class, and the record type given in the type covered field.
/// Creating and validating the signature is out of scope of this type. It
/// only deals with transporting the data in wire and representation format.
///
/// Two rules of [RFC 4034] are special for this record type. The signer
/// name is never compressed when composing, even if the target supports
/// name compression. And the signature, which is the last field of the
/// record data, doesn’t have a length of its own; it covers whatever
/// octets are left in the record data after the signer name.
///
/// [RFC 4034]: https://tools.ietf.org/html/rfc4034
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RrsigFields")
)]
pub struct Rrsig {
    type_covered: Rtype,
    algorithm: SecAlg,
    labels: u8,
    original_ttl: Ttl,
    expiration: Timestamp,
    inception: Timestamp,
    key_tag: u16,
    signer_name: Name,
    #[cfg_attr(
        feature = "serde",
        serde(with = "crate::utils::base64::serde")
    )]
    signature: Vec<u8>,
}

/// The fields of an RRSIG as deserialized, before checking their length.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename = "Rrsig")]
struct RrsigFields {
    type_covered: Rtype,
    algorithm: SecAlg,
    labels: u8,
    original_ttl: Ttl,
    expiration: Timestamp,
    inception: Timestamp,
    key_tag: u16,
    signer_name: Name,
    #[serde(with = "crate::utils::base64::serde")]
    signature: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RrsigFields> for Rrsig {
    type Error = LongRecordData;

    fn try_from(fields: RrsigFields) -> Result<Self, Self::Error> {
        Rrsig::new(
            fields.type_covered,
            fields.algorithm,
            fields.labels,
            fields.original_ttl,
            fields.expiration,
            fields.inception,
            fields.key_tag,
            fields.signer_name,
            fields.signature,
        )
    }
}

impl Rrsig {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::RRSIG;

    /// The length of the fields before the signer name.
    const HEAD_LEN: u16 = Rtype::COMPOSE_LEN
        + SecAlg::COMPOSE_LEN
        + u8::COMPOSE_LEN
        + Ttl::COMPOSE_LEN
        + Timestamp::COMPOSE_LEN
        + Timestamp::COMPOSE_LEN
        + u16::COMPOSE_LEN;

    /// Creates new RRSIG record data from its components.
    ///
    /// Returns an error if the wire format of the record data would exceed
    /// 65,535 octets.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        type_covered: Rtype,
        algorithm: SecAlg,
        labels: u8,
        original_ttl: Ttl,
        expiration: Timestamp,
        inception: Timestamp,
        key_tag: u16,
        signer_name: Name,
        signature: Vec<u8>,
    ) -> Result<Self, LongRecordData> {
        let len = usize::from(Self::HEAD_LEN + signer_name.compose_len())
            + signature.len();
        if len > usize::from(u16::MAX) {
            return Err(LongRecordData());
        }
        Ok(Rrsig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        })
    }

    pub fn type_covered(&self) -> Rtype {
        self.type_covered
    }

    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    pub fn labels(&self) -> u8 {
        self.labels
    }

    pub fn original_ttl(&self) -> Ttl {
        self.original_ttl
    }

    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    pub fn inception(&self) -> Timestamp {
        self.inception
    }

    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    pub fn signer_name(&self) -> &Name {
        &self.signer_name
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn into_signature(self) -> Vec<u8> {
        self.signature
    }

    /// Scans the record data from representation format.
    ///
    /// The signature is taken from all remaining tokens of the entry, so
    /// it may be split by white space.
    pub fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, S::Error> {
        let type_covered = scanner.scan_field::<Rtype>("type covered")?;
        let algorithm = scanner.scan_field::<SecAlg>("algorithm")?;
        let labels = scanner.scan_decimal::<u8>("labels")?;
        let original_ttl =
            Ttl::from_secs(scanner.scan_decimal::<u32>("original TTL")?);
        let expiration = Timestamp::scan(scanner, "expiration")?;
        let inception = Timestamp::scan(scanner, "inception")?;
        let key_tag = scanner.scan_decimal::<u16>("key tag")?;
        let signer_name = scanner.scan_name("signer name")?;
        let tokens = scanner.scan_entry_tokens()?;
        let signature = base64::decode_tokens(&tokens).map_err(|err| {
            S::Error::malformed_field("signature", &tokens.concat(), err)
        })?;
        Self::new(
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        )
        .map_err(S::Error::custom)
    }

    /// Parses the record data from the wire.
    ///
    /// The record data starts at the parser’s current position and is
    /// `rdlen` octets long. The signer name may be compressed.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
        rdlen: u16,
    ) -> Result<Self, ParseError> {
        // The fixed fields plus a root-only signer name.
        if rdlen < Self::HEAD_LEN + 1 {
            return Err(ParseError::form_error("short RRSIG record data"));
        }
        let mut parser = parser.parse_parser(usize::from(rdlen))?;
        let type_covered = Rtype::parse(&mut parser)?;
        let algorithm = SecAlg::parse(&mut parser)?;
        let labels = u8::parse(&mut parser)?;
        let original_ttl = Ttl::parse(&mut parser)?;
        let expiration = Timestamp::parse(&mut parser)?;
        let inception = Timestamp::parse(&mut parser)?;
        let key_tag = u16::parse(&mut parser)?;
        let signer_name = Name::parse(&mut parser)?;

        // The signature is whatever is left up to the record data boundary.
        let mut signature = vec![0; parser.remaining()];
        parser.parse_buf(&mut signature)?;
        Ok(Rrsig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        })
    }

    fn compose_head<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.type_covered.compose(target)?;
        self.algorithm.compose(target)?;
        self.labels.compose(target)?;
        self.original_ttl.compose(target)?;
        self.expiration.compose(target)?;
        self.inception.compose(target)?;
        self.key_tag.compose(target)
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Rrsig {
    fn rtype(&self) -> Rtype {
        Rrsig::RTYPE
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Rrsig {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
        rdlen: u16,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rrsig::RTYPE {
            Self::parse(parser, rdlen).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Rrsig {
    fn rdlen(&self, _compress: bool) -> Option<u16> {
        // The length has been checked upon creation and parsing.
        Some(
            Self::HEAD_LEN
                + self.signer_name.compose_len()
                + self.signature.len() as u16,
        )
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.compose_head(target)?;
        // RFC 4034, section 3.1.7: the signer name must not be compressed.
        self.signer_name.compose(target)?;
        target.append_slice(&self.signature)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.compose_head(target)?;
        self.signer_name.compose_canonical(target)?;
        target.append_slice(&self.signature)
    }
}

//--- ZonefileFmt and Display

impl ZonefileFmt for Rrsig {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.block(|p| {
            p.write_show(self.type_covered)?;
            p.write_comment("type covered")?;
            p.write_show(self.algorithm)?;
            p.write_token(self.labels)?;
            p.write_comment("labels")?;
            p.write_show(self.original_ttl)?;
            p.write_comment("original TTL")?;
            p.write_token(self.expiration)?;
            p.write_comment(format_args!(
                "expiration: {}",
                self.expiration.display_datetime()
            ))?;
            p.write_token(self.inception)?;
            p.write_comment(format_args!(
                "inception: {}",
                self.inception.display_datetime()
            ))?;
            p.write_token(self.key_tag)?;
            p.write_comment("key tag")?;
            p.write_token(&self.signer_name)?;
            p.write_comment("signer name")?;
            if !self.signature.is_empty() {
                p.write_token(base64::encode_display(&self.signature))?;
            }
            Ok(())
        })
    }
}

impl fmt::Display for Rrsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.display_zonefile(false), f)
    }
}

//------------ IllegalSignatureTime ------------------------------------------

/// A string couldn’t be converted into a signature timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IllegalSignatureTime(());

impl fmt::Display for IllegalSignatureTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal signature time")
    }
}

impl std::error::Error for IllegalSignatureTime {}

//============ Test ==========================================================
