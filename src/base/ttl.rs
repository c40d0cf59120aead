//! Time-to-live values.

use super::wire::{Compose, Parse, ParseError};
use super::zonefile_fmt::{self, Formatter, ZonefileFmt};
use core::{fmt, str};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::time::Duration;

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 3600;
const SECS_PER_DAY: u32 = 86400;
const SECS_PER_WEEK: u32 = 604800;

//------------ Ttl -----------------------------------------------------------

/// A time-to-live in seconds.
///
/// Used for the TTL of a record and for the original TTL field of RRSIG
/// record data. On the wire, it is an unsigned 32 bit integer. In zone
/// files, it is read either as a number of seconds or in the BIND format
/// with units and always written as a number of seconds.
///
/// Conversion from a [`Duration`] is possible through `TryFrom` and fails
/// for values that don’t fit.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ttl(u32);

impl Ttl {
    pub const ZERO: Ttl = Ttl(0);
    pub const SECOND: Ttl = Ttl(1);
    pub const MINUTE: Ttl = Ttl(SECS_PER_MINUTE);
    pub const HOUR: Ttl = Ttl(SECS_PER_HOUR);
    pub const DAY: Ttl = Ttl(SECS_PER_DAY);
    pub const MAX: Ttl = Ttl(u32::MAX);

    pub const COMPOSE_LEN: u16 = 4;

    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Ttl(secs)
    }

    /// Creates a TTL from a number of minutes.
    ///
    /// # Panics
    ///
    /// Panics if the number of seconds overflows 32 bits.
    #[must_use]
    pub const fn from_mins(mins: u32) -> Self {
        Ttl(mins * SECS_PER_MINUTE)
    }

    #[must_use]
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn into_duration(self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.0.to_be_bytes())
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        Ok(Ttl(parser.parse_u32_be()?))
    }
}

//--- Compose and Parse

impl Compose for Ttl {
    const COMPOSE_LEN: u16 = Ttl::COMPOSE_LEN;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        Ttl::compose(self, target)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for Ttl {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        Ttl::parse(parser)
    }
}

//--- From and TryFrom

impl From<u32> for Ttl {
    fn from(secs: u32) -> Self {
        Ttl::from_secs(secs)
    }
}

impl From<Ttl> for Duration {
    fn from(value: Ttl) -> Self {
        value.into_duration()
    }
}

impl TryFrom<Duration> for Ttl {
    type Error = TtlError;

    /// Converts a duration without loss.
    ///
    /// Fails if the duration has a sub-second component or does not fit
    /// into 32 bits of seconds.
    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        if duration.subsec_nanos() != 0 {
            return Err(TtlError::SubSecond);
        }
        u32::try_from(duration.as_secs())
            .map(Ttl::from_secs)
            .map_err(|_| TtlError::Overflow)
    }
}

//--- FromStr and Display

impl str::FromStr for Ttl {
    type Err = TtlError;

    /// Parses a TTL from a zone file.
    ///
    /// Accepts a plain number of seconds as well as the BIND format of
    /// numbers followed by one of the units `s`, `m`, `h`, `d`, or `w`,
    /// such as `1h30m`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TtlError::Invalid);
        }
        if s.bytes().all(|ch| ch.is_ascii_digit()) {
            return s.parse().map(Ttl::from_secs).map_err(|_| TtlError::Overflow);
        }
        let mut res = 0u32;
        let mut value: Option<u32> = None;
        for ch in s.bytes() {
            if ch.is_ascii_digit() {
                let digit = u32::from(ch - b'0');
                value = Some(
                    value
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or(TtlError::Overflow)?,
                );
                continue;
            }
            let unit = match ch.to_ascii_lowercase() {
                b's' => 1,
                b'm' => SECS_PER_MINUTE,
                b'h' => SECS_PER_HOUR,
                b'd' => SECS_PER_DAY,
                b'w' => SECS_PER_WEEK,
                _ => return Err(TtlError::Invalid),
            };
            let secs = value
                .take()
                .ok_or(TtlError::Invalid)?
                .checked_mul(unit)
                .ok_or(TtlError::Overflow)?;
            res = res.checked_add(secs).ok_or(TtlError::Overflow)?;
        }
        if value.is_some() {
            // A trailing number without a unit.
            return Err(TtlError::Invalid);
        }
        Ok(Ttl(res))
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--- ZonefileFmt

impl ZonefileFmt for Ttl {
    fn fmt(&self, p: &mut impl Formatter) -> zonefile_fmt::Result {
        p.write_token(self.as_secs())
    }
}

//------------ TtlError ------------------------------------------------------

/// A value could not be converted into a TTL.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TtlError {
    /// The value had a sub-second component.
    SubSecond,

    /// The value exceeded the 32 bit range.
    Overflow,

    /// The text was not a valid TTL.
    Invalid,
}

impl fmt::Display for TtlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            TtlError::SubSecond => "TTL with sub-second precision",
            TtlError::Overflow => "TTL out of range",
            TtlError::Invalid => "invalid TTL",
        })
    }
}

impl std::error::Error for TtlError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn duration_conversion() {
        assert_eq!(Ttl::from_mins(2).into_duration().as_secs(), 120);
        assert_eq!(
            Ttl::try_from(Duration::from_secs(3600)),
            Ok(Ttl::HOUR)
        );
        assert_eq!(
            Ttl::try_from(Duration::from_millis(1500)),
            Err(TtlError::SubSecond)
        );
        assert_eq!(
            Ttl::try_from(Duration::from_secs(u64::from(u32::MAX) + 1)),
            Err(TtlError::Overflow)
        );
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("3600", Some(3600))]
    #[case("4294967295", Some(u32::MAX))]
    #[case("4294967296", None)]
    #[case("1h", Some(3600))]
    #[case("1H30m", Some(5400))]
    #[case("1w2d", Some(777600))]
    #[case("10s", Some(10))]
    #[case("", None)]
    #[case("h", None)]
    #[case("1h30", None)]
    #[case("1x", None)]
    #[case("-1", None)]
    fn from_str(#[case] input: &str, #[case] expected: Option<u32>) {
        assert_eq!(
            input.parse::<Ttl>().ok().map(|ttl| ttl.as_secs()),
            expected
        );
    }

    #[test]
    fn wire() {
        let mut buf = Vec::new();
        Ttl::from_secs(3600).compose(&mut buf).unwrap();
        assert_eq!(buf, [0, 0, 0x0e, 0x10]);
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(Ttl::parse(&mut parser), Ok(Ttl::HOUR));
    }
}
