//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource records has a 16 bit type value indicating what kind of
    /// information is represented by the record. The type is an open set:
    /// any 16 bit value can be represented, parsed, composed, scanned, and
    /// displayed. Only the values listed here have a mnemonic. All others
    /// use the generic `TYPE<n>` form of [RFC 3597] in representation
    /// format.
    ///
    /// The currently assigned values are maintained in an [IANA registry].
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    /// [RFC 3597]: https://tools.ietf.org/html/rfc3597
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// A mail destination.
    ///
    /// (Obsolete – use MX)
    (MD => 3, "MD")

    /// A mail forwarder.
    ///
    /// (Obsolete – use MX)
    (MF => 4, "MF")

    /// The canonical name for an alias
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A mailbox domain name.
    (MB =>  7, "MB")

    /// A mail group member
    (MG => 8, "MG")

    /// A mail rename domain name.
    (MR => 9, "MR")

    /// A null resource record.
    (NULL =>  10, "NULL")

    /// A well known service description.
    (WKS => 11, "WKS")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    /// Mailbox or mail list information.
    (MINFO => 14, "MINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// For Responsible Person.
    (RP => 17, "RP")

    /// For AFS Data Base location.
    (AFSDB => 18, "AFSDB")

    /// IPv6 address.
    ///
    /// See RFC 3596.
    (AAAA => 28, "AAAA")

    /// Location information.
    (LOC => 29, "LOC")

    /// Server selection.
    ///
    /// See RFC 2782.
    (SRV => 33, "SRV")

    /// Naming authority pointer.
    (NAPTR => 35, "NAPTR")

    /// Key exchanger.
    (KX => 36, "KX")

    /// Certificate.
    (CERT => 37, "CERT")

    /// Delegation name.
    ///
    /// See RFC 6672.
    (DNAME => 39, "DNAME")

    /// Option.
    ///
    /// See RFC 6891.
    (OPT => 41, "OPT")

    /// Address prefix list.
    (APL => 42, "APL")

    /// Delegation signer.
    ///
    /// See RFC 4034.
    (DS => 43, "DS")

    /// SSH key fingerprint.
    (SSHFP => 44, "SSHFP")

    /// IPSECKEY
    (IPSECKEY => 45, "IPSECKEY")

    /// RRSIG.
    ///
    /// See RFC 4034.
    (RRSIG => 46, "RRSIG")

    /// NSEC.
    ///
    /// See RFC 4034.
    (NSEC => 47, "NSEC")

    /// DNSKEY.
    ///
    /// See RFC 4034.
    (DNSKEY => 48, "DNSKEY")

    /// DHCID.
    (DHCID => 49, "DHCID")

    /// NSEC3
    ///
    /// See RFC 5155.
    (NSEC3 => 50, "NSEC3")

    /// NSEC3PARAM
    ///
    /// See RFC 5155.
    (NSEC3PARAM => 51, "NSEC3PARAM")

    /// TLSA
    (TLSA => 52, "TLSA")

    /// S/MIME cert association
    (SMIMEA => 53, "SMIMEA")

    /// Host Identity Protocol
    (HIP => 55, "HIP")

    /// Child DS
    ///
    /// See RFC 7344.
    (CDS => 59, "CDS")

    /// DNSKEY(s) the child wants reflected in DS
    ///
    /// See RFC 7344.
    (CDNSKEY => 60, "CDNSKEY")

    /// OpenPGP key
    (OPENPGPKEY => 61, "OPENPGPKEY")

    /// Child-to-parent synchronization.
    (CSYNC => 62, "CSYNC")

    /// Message digest for DNS zone.
    (ZONEMD => 63, "ZONEMD")

    /// General Purpose Service Endpoints.
    (SVCB => 64, "SVCB")

    /// HTTPS Specific Service Endpoints.
    (HTTPS => 65, "HTTPS")

    /// SPF.
    (SPF => 99, "SPF")

    /// Transaction key.
    (TKEY => 249, "TKEY")

    /// Transaction signature.
    (TSIG => 250, "TSIG")

    /// Incremental transfer.
    (IXFR => 251, "IXFR")

    /// Transfer of entire zone.
    (AXFR => 252, "AXFR")

    /// Mailbox-related RRs (MB, MG, or MR).
    (MAILB => 253, "MAILB")

    /// Mail agent RRS.
    (MAILA => 254, "MAILA")

    /// A request for all records the server/cache has available.
    (ANY => 255, "ANY")

    /// URI.
    (URI => 256, "URI")

    /// Certification Authority Restriction.
    (CAA => 257, "CAA")

    /// DNSSEC trust authorities.
    (TA => 32768, "TA")

    /// DNSSEC lookaside validation.
    (DLV => 32769, "DLV")
}

int_enum_str_with_prefix!(Rtype, "TYPE", u16, "unknown record type");
int_enum_zonefile_fmt_with_prefix!(Rtype, "TYPE");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Rtype;
    use core::str::FromStr;

    #[test]
    fn mnemonic_and_generic_form() {
        assert_eq!(Rtype::from_str("rrsig"), Ok(Rtype::RRSIG));
        assert_eq!(Rtype::from_str("TYPE46"), Ok(Rtype::RRSIG));
        assert_eq!(Rtype::from_str("type65280"), Ok(Rtype::from_int(65280)));
        assert!(Rtype::from_str("TYPE").is_err());
        assert!(Rtype::from_str("TYPE65536").is_err());
        assert!(Rtype::from_str("TYPE+1").is_err());
        assert!(Rtype::from_str("FOO").is_err());

        assert_eq!(Rtype::A.to_string(), "A");
        assert_eq!(Rtype::from_int(65280).to_string(), "TYPE65280");
        assert!(Rtype::RRSIG.is_known());
        assert!(!Rtype::from_int(65280).is_known());
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Rtype::RRSIG), "Rtype::RRSIG");
        assert_eq!(format!("{:?}", Rtype::from_int(65280)), "Rtype(65280)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        assert_tokens(&Rtype::A.readable(), &[Token::Str("A")]);
        assert_tokens(
            &Rtype::from_int(65280).readable(),
            &[Token::Str("TYPE65280")],
        );
        assert_tokens(&Rtype::A.compact(), &[Token::U16(1)]);
    }
}
