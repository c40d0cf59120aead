//! Basics.
//!
//! This module provides types and traits for working with DNS resource
//! records in their two representations: the binary wire format found in
//! DNS messages and the text-based representation format used in zone
//! files.
//!
//!
//! ## Parsing and Composing
//!
//! In order to easily distinguish the process of creating and disecting
//! wire-format data from other forms of representation conversion such as
//! reading from a zone file, we use the term *parsing* for extracting data
//! from a wire-format representation and *composing* for producing such a
//! representation.
//!
//! Parsing happens on a buffer holding a complete DNS message since
//! domain names may be compressed by referencing other parts of the
//! message. The [wire] module contains the fundamental traits for parsing
//! and composing. Name compression when composing is provided by the
//! [compress] module.
//!
//! For the representation format, we use *scanning* for reading, see the
//! [scan] module, and *formatting* for writing, see the [zonefile_fmt]
//! module.
//!
//!
//! # Types for DNS Data
//!
//! The module contains a number of types for DNS data, both fundamental
//! and composed. These are:
//!
//! * [iana] for the various registries such as record types,
//! * [name] for domain names,
//! * [ttl] for time-to-live values,
//! * [record] for DNS resource records, and
//! * [rdata] for the traits implemented by record data. The concrete
//!   record types live in the top-level [crate::rdata] module.

pub use self::iana::{Class, Rtype, SecAlg};
pub use self::name::Name;
pub use self::record::{Record, RecordHeader};
pub use self::ttl::Ttl;
pub use self::wire::{Composer, ParseError};

pub mod compress;
pub mod iana;
pub mod name;
pub mod rdata;
pub mod record;
pub mod scan;
pub mod ttl;
pub mod wire;
pub mod zonefile_fmt;
