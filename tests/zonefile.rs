//! Reads a zone file and converts its records through the wire format and
//! back to text.

use domain_rr::base::compress::NameCompressor;
use domain_rr::base::iana::{Rtype, SecAlg};
use domain_rr::base::{Name, Record};
use domain_rr::rdata::ZoneRecordData;
use domain_rr::zonefile::{Entry, Zonefile, ZonefileConfig};
use octseq::builder::infallible;
use octseq::parse::Parser;
use std::str::FromStr;

const ZONE: &str = "\
$ORIGIN example.com.
$TTL 3600
@           NS      ns1
            RRSIG   NS 8 2 3600 20231114221320 20231015221320 12345 (
                    example.com.
                    AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8gISIjJCUm
                    JygpKissLS4vMDEyMzQ1Njc4OTo7PD0+Pw== )
ns1     60  IN  A   192.0.2.1 ; glue
            RRSIG   A 200 3 3600 1700000000 1699000000 54321 @ c2lnbmF0dXJl
x           TYPE65280 \\# 2 abcd
";

fn read_zone(zone: &str) -> Vec<Record<ZoneRecordData>> {
    Zonefile::with_config(zone, ZonefileConfig::default())
        .map(|entry| match entry.unwrap() {
            Entry::Record(record) => record,
            Entry::Include { .. } => panic!("unexpected include"),
        })
        .collect()
}

#[test]
fn zone_records() {
    let records = read_zone(ZONE);
    assert_eq!(records.len(), 5);

    let ZoneRecordData::Rrsig(rrsig) = records[1].data() else {
        panic!("not an RRSIG")
    };
    assert_eq!(records[1].owner(), &Name::from_str("example.com.").unwrap());
    assert_eq!(rrsig.type_covered(), Rtype::NS);
    assert_eq!(rrsig.expiration().into_int(), 1700000000);
    assert_eq!(rrsig.inception().into_int(), 1697408000);
    assert_eq!(rrsig.signature(), (0..64).collect::<Vec<u8>>().as_slice());

    let ZoneRecordData::Rrsig(rrsig) = records[3].data() else {
        panic!("not an RRSIG")
    };
    assert_eq!(rrsig.algorithm(), SecAlg::from_int(200));
    assert_eq!(rrsig.signer_name(), &Name::from_str("example.com").unwrap());
    assert_eq!(records[3].ttl().as_secs(), 60);

    assert_eq!(records[4].rtype(), Rtype::from_int(65280));
}

#[test]
fn wire_round_trip() {
    let records = read_zone(ZONE);

    let mut target = NameCompressor::new(Vec::new());
    for record in &records {
        infallible(record.compose(&mut target));
    }
    let buf = target.into_target();

    // The owner of the first record and both signer names appear in
    // full. Everything else is compressed.
    let literal = b"\x07example\x03com\x00";
    let count = buf
        .windows(literal.len())
        .filter(|window| *window == literal.as_slice())
        .count();
    assert_eq!(count, 3);

    let mut parser = Parser::from_ref(buf.as_slice());
    let mut parsed = Vec::new();
    while parser.remaining() > 0 {
        parsed.push(
            Record::<ZoneRecordData>::parse(&mut parser)
                .unwrap()
                .unwrap(),
        );
    }
    assert_eq!(parsed, records);
}

#[test]
fn text_round_trip() {
    for record in read_zone(ZONE) {
        let text = record.to_string();
        let reread = read_zone(&text);
        assert_eq!(reread, [record.clone()], "{}", text);
        assert_eq!(reread[0].ttl(), record.ttl());
    }
}
