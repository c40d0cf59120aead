//! Record data for the A record.

use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::scan::Scanner;
use crate::base::wire::{Compose, Composer, Parse, ParseError};
use crate::base::zonefile_fmt::{self, Formatter, ZonefileFmt};
use core::fmt;
use core::str::FromStr;
use octseq::parse::Parser;
use std::net::Ipv4Addr;

//------------ A ------------------------------------------------------------

/// A record data.
///
/// The IPv4 address of a host. It is four octets in network byte order on
/// the wire and written in dotted decimal notation.
///
/// Defined in [RFC 1035, section 3.4.1][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.4.1
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct A {
    addr: Ipv4Addr,
}

impl A {
    pub(crate) const RTYPE: Rtype = Rtype::A;

    #[must_use]
    pub fn new(addr: Ipv4Addr) -> Self {
        A { addr }
    }

    #[must_use]
    pub fn from_octets(a: u8, b: u8, c: u8, d: u8) -> Self {
        A::new(Ipv4Addr::new(a, b, c, d))
    }

    #[must_use]
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        Ipv4Addr::parse(parser).map(Self::new)
    }

    pub fn scan<S: Scanner>(scanner: &mut S) -> Result<Self, S::Error> {
        scanner.scan_field::<Ipv4Addr>("address").map(Self::new)
    }
}

impl From<Ipv4Addr> for A {
    fn from(addr: Ipv4Addr) -> Self {
        Self::new(addr)
    }
}

impl From<A> for Ipv4Addr {
    fn from(a: A) -> Self {
        a.addr
    }
}

impl FromStr for A {
    type Err = <Ipv4Addr as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::new)
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for A {
    fn rtype(&self) -> Rtype {
        A::RTYPE
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for A {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
        _rdlen: u16,
    ) -> Result<Option<Self>, ParseError> {
        if rtype != A::RTYPE {
            return Ok(None);
        }
        Self::parse(parser).map(Some)
    }
}

impl ComposeRecordData for A {
    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(Ipv4Addr::COMPOSE_LEN)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.addr.compose(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.compose_rdata(target)
    }
}

//--- Display and ZonefileFmt

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

impl ZonefileFmt for A {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(self.addr)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{
        test_compose_parse, test_rdlen, test_scan, test_scan_err,
    };
    use crate::base::scan::ScanError;

    #[test]
    fn a_compose_parse_scan() {
        let rdata = A::from_octets(192, 0, 2, 1);
        test_rdlen(&rdata);
        test_compose_parse(&rdata, |parser, _| A::parse(parser));
        test_scan(&["192.0.2.1"], A::scan, &rdata);
        assert_eq!(A::from_str("192.0.2.1"), Ok(rdata));
    }

    #[test]
    fn a_scan_invalid() {
        assert!(matches!(
            test_scan_err(&["192.0.2"], A::scan),
            ScanError::Field { field: "address", .. }
        ));
    }

    #[test]
    fn a_parse_short() {
        let mut parser = Parser::from_ref(b"\xc0\x00\x02".as_slice());
        assert_eq!(A::parse(&mut parser), Err(ParseError::ShortInput));
    }
}
