//! Record data types from RFC 1035 that consist of a single domain name.

//------------ Cname --------------------------------------------------------

name_type_well_known! {
    /// CNAME record data.
    ///
    /// The CNAME record specifies the canonical or primary name for domain
    /// name alias.
    ///
    /// The CNAME type is defined in [RFC 1035, section 3.3.1][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.1
    (Cname, CNAME, cname, into_cname)
}

//------------ Ns -----------------------------------------------------------

name_type_well_known! {
    /// NS record data.
    ///
    /// NS records specify hosts that are authoritative for a class and
    /// domain.
    ///
    /// The NS record type is defined in [RFC 1035, section 3.3.11][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.11
    (Ns, NS, nsdname, into_nsdname)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::compress::NameCompressor;
    use crate::base::name::Name;
    use crate::base::rdata::test::{
        test_compose_parse, test_rdlen, test_scan,
    };
    use crate::base::rdata::ComposeRecordData;
    use crate::base::scan::IterScanner;
    use core::str::FromStr;
    use octseq::builder::infallible;

    #[test]
    fn cname_compose_parse_scan() {
        let rdata = Cname::from_str("www.example.com").unwrap();
        test_rdlen(&rdata);
        test_compose_parse(&rdata, |parser, _| Cname::parse(parser));
        test_scan(&["www.example.com"], Cname::scan, &rdata);
    }

    #[test]
    fn ns_compose_parse_scan() {
        let rdata = Ns::from_str("ns1.example.com.").unwrap();
        test_rdlen(&rdata);
        test_compose_parse(&rdata, |parser, _| Ns::parse(parser));
        test_scan(&["ns1.example.com."], Ns::scan, &rdata);
        assert_eq!(rdata.to_string(), "ns1.example.com.");
    }

    #[test]
    fn relative_scan() {
        let mut scanner = IterScanner::with_origin(
            ["ns1"],
            Some(Name::from_str("example.com").unwrap()),
        );
        assert_eq!(
            Ns::scan(&mut scanner).unwrap().into_nsdname(),
            Name::from_str("ns1.example.com").unwrap()
        );
    }

    #[test]
    fn compressed() {
        let rdata = Cname::from_str("example.com").unwrap();
        assert_eq!(rdata.rdlen(true), None);
        let mut target = NameCompressor::new(Vec::new());
        infallible(rdata.compose_rdata(&mut target));
        infallible(rdata.compose_rdata(&mut target));
        assert_eq!(target.as_slice(), b"\x07example\x03com\x00\xc0\x00");
    }
}
