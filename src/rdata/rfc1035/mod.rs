//! Record data from [RFC 1035]: initial record types.
//!
//! This RFC defines the initial set of record types. Only the most common
//! ones are provided here.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

pub use self::a::A;
pub use self::name::{Cname, Ns};

mod a;
mod name;
