//! IANA Definitions for DNS.
//!
//! This module contains types for parameters defined in IANA registries
//! that are relevant for this crate.
//!
//! All types defined hereunder follow the same basic structure. They are
//! newtypes around the raw integer with associated constants for all
//! well-defined values. Since new values get registered over time, any
//! integer value can be represented. Values without a registered mnemonic
//! are treated exactly like those with one, apart from their
//! representation format.
//!
//! There are two methods `from_int()` and `to_int()` to convert from and
//! to raw integer values as well as implementations of the `From` trait
//! for these. `FromStr` and `Display` are implemented to convert from
//! the string codes to the values and back.
//!
//! Types also implement `parse()` and `compose()` functions for wire format
//! and [`ZonefileFmt`][crate::base::zonefile_fmt::ZonefileFmt] for
//! representation format.

pub use self::class::Class;
pub use self::rtype::Rtype;
pub use self::secalg::SecAlg;

#[macro_use]
mod macros;

pub mod class;
pub mod rtype;
pub mod secalg;
