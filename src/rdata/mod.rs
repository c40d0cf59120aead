//! Resource data implementations.
//!
//! This module contains implementations for the record data of a small set
//! of resource record types. The types are named identically to the
//! [`Rtype`] variant they implement. They are grouped into submodules for
//! the RFCs they are defined in. All types are also re-exported at the top
//! level here. Ie., for the RRSIG record type, you can simply
//! `use domain_rr::rdata::Rrsig` instead of
//! `use domain_rr::rdata::dnssec::Rrsig`.
//!
//! The [`ZoneRecordData`] enum collects all these types into a single type
//! that dispatches on the record type. Record types without a dedicated
//! type end up as [`UnknownRecordData`].
//!
//! [`Rtype`]: crate::base::iana::Rtype
//! [`UnknownRecordData`]: crate::base::rdata::UnknownRecordData

#[macro_use]
mod macros;

// The rdata_types! macro (defined in self::macros) reexports the record data
// types here and creates the ZoneRecordData enum.
//
// All record data types need to be listed here.
rdata_types! {
    rfc1035::{
        A,
        Cname,
        Ns,
    }
    dnssec::{
        Rrsig,
    }
}

pub use self::dnssec::{IllegalSignatureTime, Timestamp};

use crate::base::rdata::{ComposeRecordData, RecordData};

pub mod dnssec;
pub mod rfc1035;

//============ Testing =======================================================
