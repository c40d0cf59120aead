//! Wire and zone file codecs for DNS resource records.
//!
//! This crate provides the building blocks for reading and writing DNS
//! resource records in their two representations: the binary wire format
//! used in DNS messages and the textual representation format used in zone
//! files. Every record data type implements the same contract, so records
//! can be converted between both formats without loss.
//!
//! The DNSSEC signature record, [`Rrsig`][rdata::Rrsig], shows most of the
//! peculiarities of this contract: a domain name embedded in the data that
//! must never be compressed and a trailing field whose length follows only
//! from the length of the record data.
//!
//! # Modules
//!
//! * [base] contains the fundamental types: IANA registries, domain names,
//!   the wire format and representation format traits, and the record
//!   envelope,
//! * [rdata] contains the record data types and the
//!   [`ZoneRecordData`][rdata::ZoneRecordData] enum dispatching on the
//!   record type,
//! * [zonefile] reads zone files into records, and
//! * [utils] contains the Base 16 and Base 64 encodings used by the
//!   representation format.
//!
//! # Reference of Feature Flags
//!
//! * `bytes`: Enables using `BytesMut` from the
//!   [bytes](https://github.com/tokio-rs/bytes) crate as a composition
//!   target.
//! * `serde`: Enables serialization and deserialization of record data via
//!   [serde](https://serde.rs/).
//! * `std`: support for the Rust std library in the dependencies. This
//!   feature is enabled by default and required for reading the system
//!   clock.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;
pub mod utils;
pub mod zonefile;
