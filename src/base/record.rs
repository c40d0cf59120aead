//! Resource Records.
//!
//! This module defines types related to DNS resource records. The most
//! complete type is [`Record`] which contains a complete record for a
//! certain record type. [`RecordHeader`] contains the data from a record’s
//! header, the first couple of octets common to all records, including the
//! length of the record data that follows it.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use super::ttl::Ttl;
use super::wire::{Compose, Composer, FormError, ParseError};
use super::zonefile_fmt::{self, Formatter, ZonefileFmt};
use core::{fmt, hash};
use octseq::parse::Parser;
use tracing::trace;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. The domain name is called the *owner* of the record. The record
/// type describes the kind of data the record holds, such as IP addresses.
/// The class describes which sort of network the information is for. In
/// practice, the only relevant class is IN, the Internet.
///
/// The payload of a resource record is its data. Its purpose, meaning, and
/// format is determined by the record type. Because of this, the type is
/// generic over a trait for record data which provides both the record type
/// value and the record data as they are inseparably entwined.
///
/// There is one more piece of data: the TTL or time to live. This value
/// says how long a record remains valid before it should be refreshed from
/// its original source.
///
/// There are three ways to create a record value. First, you can make one
/// yourself using the [`new`][Self::new] function. Secondly, you can parse
/// a record from wire format via [`parse`][Self::parse]. Finally, you can
/// read records from zone file format through the [zonefile][crate::zonefile]
/// module.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record<Data> {
    /// The owner of the record.
    owner: Name,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record.
    ttl: Ttl,

    /// The record data. The value also specifies the record’s type.
    data: Data,
}

/// # Creation and Element Access
///
impl<Data> Record<Data> {
    /// Creates a new record from its parts.
    pub fn new(owner: Name, class: Class, ttl: Ttl, data: Data) -> Self {
        Record {
            owner,
            class,
            ttl,
            data,
        }
    }

    /// Returns a reference to the owner domain name.
    ///
    /// The owner of a record is the domain name that specifies the node in
    /// the DNS tree this record belongs to.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype
    where
        Data: RecordData,
    {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Sets the record’s class.
    pub fn set_class(&mut self, class: Class) {
        self.class = class
    }

    /// Returns the record’s time-to-live.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Sets the record’s time-to-live.
    pub fn set_ttl(&mut self, ttl: Ttl) {
        self.ttl = ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Returns a mutable reference to the record data.
    pub fn data_mut(&mut self) -> &mut Data {
        &mut self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> Data {
        self.data
    }

    /// Trades the record for its owner name and data.
    pub fn into_owner_and_data(self) -> (Name, Data) {
        (self.owner, self.data)
    }
}

/// # Parsing and Composing
///
impl<Data> Record<Data> {
    /// Parses a record from the wire.
    ///
    /// Returns `Ok(None)` if `Data` doesn’t handle the record’s type. In
    /// this case, the record data is skipped.
    pub fn parse<'a, Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError>
    where
        Data: ParseRecordData<'a, Octs>,
    {
        let header = RecordHeader::parse(parser)?;
        header.parse_into_record(parser)
    }
}

impl<Data: ComposeRecordData> Record<Data> {
    /// Appends the wire format of the record to the target.
    ///
    /// The owner name is compressed if the target supports it.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_compressed_name(&self.owner)?;
        self.data.rtype().compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose_len_rdata(target)
    }

    /// Appends the canonical wire format of the record to the target.
    pub fn compose_canonical<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.owner.compose_canonical(target)?;
        self.data.rtype().compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose_canonical_len_rdata(target)
    }
}

//--- From

impl<D> From<(Name, Class, u32, D)> for Record<D> {
    fn from((owner, class, ttl, data): (Name, Class, u32, D)) -> Self {
        Self::new(owner, class, Ttl::from_secs(ttl), data)
    }
}

impl<D> From<(Name, Class, Ttl, D)> for Record<D> {
    fn from((owner, class, ttl, data): (Name, Class, Ttl, D)) -> Self {
        Self::new(owner, class, ttl, data)
    }
}

impl<D> From<(Name, u32, D)> for Record<D> {
    fn from((owner, ttl, data): (Name, u32, D)) -> Self {
        Self::new(owner, Class::IN, Ttl::from_secs(ttl), data)
    }
}

//--- PartialEq and Eq
//
// The TTL is not part of a record’s identity.

impl<D, DD> PartialEq<Record<DD>> for Record<D>
where
    D: RecordData + PartialEq<DD>,
    DD: RecordData,
{
    fn eq(&self, other: &Record<DD>) -> bool {
        self.owner == other.owner
            && self.class == other.class
            && self.data == other.data
    }
}

impl<D: RecordData + Eq> Eq for Record<D> {}

//--- Hash

impl<Data: hash::Hash> hash::Hash for Record<Data> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.class.hash(state);
        self.data.hash(state);
    }
}

//--- ZonefileFmt, Display, and Debug

impl<Data: RecordData + ZonefileFmt> ZonefileFmt for Record<Data> {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(&self.owner)?;
        p.write_show(self.ttl)?;
        p.write_show(self.class)?;
        p.write_show(self.data.rtype())?;
        p.write_show(&self.data)
    }
}

impl<Data: RecordData + ZonefileFmt> fmt::Display for Record<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.display_zonefile(false), f)
    }
}

impl<Data: fmt::Debug> fmt::Debug for Record<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Record")
            .field("owner", &self.owner)
            .field("class", &self.class)
            .field("ttl", &self.ttl)
            .field("data", &self.data)
            .finish()
    }
}

//------------ RecordHeader --------------------------------------------------

/// The header of a resource record.
///
/// This type encapsulates the common header of a resource record. It
/// consists of the owner, record type, class, TTL, and the length of the
/// record data. It is effectively a helper type for dealing with resource
/// records encoded in a DNS message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordHeader {
    owner: Name,
    rtype: Rtype,
    class: Class,
    ttl: Ttl,
    rdlen: u16,
}

impl RecordHeader {
    /// Creates a new record header from its components.
    pub fn new(
        owner: Name,
        rtype: Rtype,
        class: Class,
        ttl: Ttl,
        rdlen: u16,
    ) -> Self {
        RecordHeader {
            owner,
            rtype,
            class,
            ttl,
            rdlen,
        }
    }

    /// Returns a reference to the owner of the record.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type of the record.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the class of the record.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the TTL of the record.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Returns the data length of the record.
    pub fn rdlen(&self) -> u16 {
        self.rdlen
    }

    /// Converts the header into an actual record.
    pub fn into_record<Data>(self, data: Data) -> Record<Data> {
        Record::new(self.owner, self.class, self.ttl, data)
    }
}

/// # Parsing and Composing
///
impl RecordHeader {
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        Ok(RecordHeader::new(
            Name::parse(parser)?,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
            Ttl::parse(parser)?,
            parser.parse_u16_be()?,
        ))
    }

    /// Parses a record header and then skips over the data.
    ///
    /// If the function succeeds, the parser will be positioned right behind
    /// the end of the record.
    pub fn parse_and_skip<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let header = Self::parse(parser)?;
        parser.advance(usize::from(header.rdlen))?;
        Ok(header)
    }

    /// Parses the remainder of the record and returns it.
    ///
    /// The method assumes that the parsers is currently positioned right
    /// after the end of the record header. If the record data type `Data`
    /// feels capable of parsing a record with a header of `self`, the
    /// method will parse the data and return a full `Record<Data>`.
    /// Otherwise, it skips over the record data.
    ///
    /// The record data handed to `Data` is limited to the record data
    /// length announced in the header. Data that ends before that boundary
    /// results in a form error.
    pub fn parse_into_record<'a, Octs, Data>(
        self,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Record<Data>>, ParseError>
    where
        Octs: AsRef<[u8]> + ?Sized,
        Data: ParseRecordData<'a, Octs>,
    {
        let mut parser = parser.parse_parser(usize::from(self.rdlen))?;
        let res = Data::parse_rdata(self.rtype, &mut parser, self.rdlen)?;
        match res {
            Some(data) => {
                if parser.remaining() > 0 {
                    return Err(ParseError::Form(FormError::new(
                        "trailing data in record",
                    )));
                }
                Ok(Some(self.into_record(data)))
            }
            None => {
                trace!(
                    rtype = %self.rtype,
                    rdlen = self.rdlen,
                    "skipping record data"
                );
                Ok(None)
            }
        }
    }

    /// Appends the header to the target.
    ///
    /// The owner name is compressed if the target supports it.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        buf: &mut Target,
    ) -> Result<(), Target::AppendError> {
        buf.append_compressed_name(&self.owner)?;
        self.rtype.compose(buf)?;
        self.class.compose(buf)?;
        self.ttl.compose(buf)?;
        self.rdlen.compose(buf)
    }

    /// Appends the canonical form of the header to the target.
    pub fn compose_canonical<Target: Composer + ?Sized>(
        &self,
        buf: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.owner.compose_canonical(buf)?;
        self.rtype.compose(buf)?;
        self.class.compose(buf)?;
        self.ttl.compose(buf)?;
        self.rdlen.compose(buf)
    }
}

//============ Testing ======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::compress::NameCompressor;
    use crate::base::rdata::UnknownRecordData;
    use crate::rdata::{Cname, ZoneRecordData, A};
    use core::str::FromStr;
    use octseq::builder::infallible;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn compose_parse_a() {
        let record = Record::new(
            name("www.example.com"),
            Class::IN,
            Ttl::from_secs(3600),
            A::from_octets(192, 0, 2, 1),
        );
        let mut buf = Vec::new();
        infallible(record.compose(&mut buf));
        assert_eq!(
            buf,
            b"\x03www\x07example\x03com\0\
              \x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04\xc0\x00\x02\x01"
        );
        let mut parser = Parser::from_ref(buf.as_slice());
        let parsed = Record::<A>::parse(&mut parser).unwrap().unwrap();
        assert_eq!(parser.remaining(), 0);
        assert_eq!(parsed, record);
        assert_eq!(parsed.ttl(), Ttl::from_secs(3600));
    }

    #[test]
    fn parse_skips_unhandled() {
        let record = Record::new(
            name("example.com"),
            Class::IN,
            Ttl::from_secs(60),
            Cname::new(name("www.example.com")),
        );
        let mut buf = Vec::new();
        infallible(record.compose(&mut buf));
        buf.push(0xff);
        let mut parser = Parser::from_ref(buf.as_slice());
        assert!(Record::<A>::parse(&mut parser).unwrap().is_none());
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn parse_trailing_data() {
        let mut buf = Vec::new();
        infallible(name("example.com").compose(&mut buf));
        infallible(Rtype::A.compose(&mut buf));
        infallible(Class::IN.compose(&mut buf));
        infallible(Ttl::from_secs(60).compose(&mut buf));
        infallible(5u16.compose(&mut buf));
        buf.extend_from_slice(b"\xc0\x00\x02\x01\x00");
        let mut parser = Parser::from_ref(buf.as_slice());
        assert!(matches!(
            Record::<A>::parse(&mut parser),
            Err(ParseError::Form(_))
        ));
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(
            Record::<UnknownRecordData>::parse(&mut parser)
                .unwrap()
                .unwrap()
                .data()
                .data(),
            b"\xc0\x00\x02\x01\x00"
        );
    }

    #[test]
    fn parse_short_rdata() {
        let mut buf = Vec::new();
        infallible(name("example.com").compose(&mut buf));
        infallible(Rtype::A.compose(&mut buf));
        infallible(Class::IN.compose(&mut buf));
        infallible(Ttl::from_secs(60).compose(&mut buf));
        infallible(8u16.compose(&mut buf));
        buf.extend_from_slice(b"\xc0\x00\x02\x01");
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(
            Record::<A>::parse(&mut parser),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn compressed_owner() {
        let mut target = NameCompressor::new(Vec::new());
        let first = Record::new(
            name("example.com"),
            Class::IN,
            Ttl::from_secs(60),
            ZoneRecordData::A(A::from_octets(192, 0, 2, 1)),
        );
        let second = Record::new(
            name("www.example.com"),
            Class::IN,
            Ttl::from_secs(60),
            ZoneRecordData::Cname(Cname::new(name("example.com"))),
        );
        infallible(first.compose(&mut target));
        infallible(second.compose(&mut target));
        let buf = target.into_target();
        assert_eq!(
            &buf[27..],
            b"\x03www\xc0\x00\x00\x05\x00\x01\x00\x00\x00\x3c\x00\x02\xc0\x00"
        );

        let mut parser = Parser::from_ref(buf.as_slice());
        let parsed = Record::<ZoneRecordData>::parse(&mut parser)
            .unwrap()
            .unwrap();
        assert_eq!(parsed, first);
        let parsed = Record::<ZoneRecordData>::parse(&mut parser)
            .unwrap()
            .unwrap();
        assert_eq!(parsed, second);
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn canonical_lowercases_owner() {
        let record = Record::new(
            name("WWW.Example.COM"),
            Class::IN,
            Ttl::from_secs(60),
            UnknownRecordData::from_octets(Rtype::NULL, b"ab".to_vec())
                .unwrap(),
        );
        let mut buf = Vec::new();
        infallible(record.compose_canonical(&mut buf));
        assert_eq!(
            buf,
            b"\x03www\x07example\x03com\0\
              \x00\x0a\x00\x01\x00\x00\x00\x3c\x00\x02ab"
        );
    }

    #[test]
    fn header_parse_and_skip() {
        let record = Record::new(
            name("example.com"),
            Class::IN,
            Ttl::from_secs(60),
            A::from_octets(192, 0, 2, 1),
        );
        let mut buf = Vec::new();
        infallible(record.compose(&mut buf));
        let mut parser = Parser::from_ref(buf.as_slice());
        let header = RecordHeader::parse_and_skip(&mut parser).unwrap();
        assert_eq!(header.owner(), &name("example.com"));
        assert_eq!(header.rtype(), Rtype::A);
        assert_eq!(header.rdlen(), 4);
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn display() {
        let record = Record::new(
            name("example.com"),
            Class::IN,
            Ttl::from_secs(60),
            A::from_octets(192, 0, 2, 1),
        );
        assert_eq!(record.to_string(), "example.com. 60 IN A 192.0.2.1");
    }
}
