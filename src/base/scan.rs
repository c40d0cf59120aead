//! Parsing of data from its representation format.
//!
//! Zone files and similar text formats present record data as a sequence
//! of whitespace separated tokens, one entry per record. The [`Scanner`]
//! trait gives record types access to the tokens of a single entry.
//! Splitting the text into entries and tokens, resolving quotes and
//! parentheses, is left to the scanner implementation.
//!
//! [`IterScanner`] is a scanner over any iterator of tokens. It is used by
//! the zone file reader in [`crate::zonefile`] but is just as useful for
//! converting individual records.

use super::name::Name;
use core::fmt;
use core::iter::Peekable;
use core::str::FromStr;
use std::string::{String, ToString};
use std::vec::Vec;

//============ Scanning Traits ===============================================

//------------ Scanner -------------------------------------------------------

/// A type that can produce tokens of data in representation format.
pub trait Scanner {
    type Error: ScannerError;

    /// Returns whether there are more tokens in the current entry.
    fn continues(&mut self) -> bool;

    /// Scans the next token of the current entry.
    ///
    /// Returns `Ok(None)` if the entry has been exhausted.
    fn scan_token(&mut self) -> Result<Option<String>, Self::Error>;

    /// Returns the origin used to complete relative names.
    fn origin(&self) -> Option<&Name>;

    /// Scans the token for a required field.
    fn scan_required(
        &mut self,
        field: &'static str,
    ) -> Result<String, Self::Error> {
        self.scan_token()?
            .ok_or_else(|| Self::Error::missing_field(field))
    }

    /// Scans a field via its `FromStr` implementation.
    ///
    /// If the token can’t be converted, the error will contain both the
    /// field name and the token.
    fn scan_field<T>(&mut self, field: &'static str) -> Result<T, Self::Error>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let token = self.scan_required(field)?;
        token
            .parse()
            .map_err(|err| Self::Error::malformed_field(field, &token, err))
    }

    /// Scans a field given as an unsigned decimal number.
    fn scan_decimal<T>(
        &mut self,
        field: &'static str,
    ) -> Result<T, Self::Error>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let token = self.scan_required(field)?;
        if !token.bytes().all(|ch| ch.is_ascii_digit()) {
            return Err(Self::Error::malformed_field(
                field,
                &token,
                "expected decimal number",
            ));
        }
        token
            .parse()
            .map_err(|err| Self::Error::malformed_field(field, &token, err))
    }

    /// Scans a domain name.
    ///
    /// Relative names are completed with the scanner’s origin.
    fn scan_name(&mut self, field: &'static str) -> Result<Name, Self::Error> {
        let token = self.scan_required(field)?;
        Name::from_str_relative(&token, self.origin())
            .map_err(|err| Self::Error::malformed_field(field, &token, err))
    }

    /// Scans all remaining tokens of the entry.
    fn scan_entry_tokens(&mut self) -> Result<Vec<String>, Self::Error> {
        let mut res = Vec::new();
        while let Some(token) = self.scan_token()? {
            res.push(token)
        }
        Ok(res)
    }

    /// Returns an error if the entry has not been exhausted.
    fn check_end(&mut self) -> Result<(), Self::Error> {
        if self.continues() {
            Err(Self::Error::trailing_tokens())
        } else {
            Ok(())
        }
    }
}

//------------ ScannerError --------------------------------------------------

/// A type providing error values for a scanner.
pub trait ScannerError: Sized + std::error::Error {
    /// Creates a new error wrapping a supplied error message.
    fn custom<T: fmt::Display>(msg: T) -> Self;

    /// Creates an error when more tokens were expected in the entry.
    fn unexpected_end_of_entry() -> Self;

    /// Creates an error when there are trailing tokens.
    fn trailing_tokens() -> Self;

    /// Creates an error when the token for a field is missing.
    fn missing_field(field: &'static str) -> Self {
        Self::custom(format_args!("missing {}", field))
    }

    /// Creates an error when a token can’t be converted into its field.
    fn malformed_field<T: fmt::Display>(
        field: &'static str,
        token: &str,
        reason: T,
    ) -> Self {
        Self::custom(format_args!("malformed {} '{}': {}", field, token, reason))
    }

    /// Creates an error if there isn’t a next token.
    fn expected<T>(value: Result<Option<T>, Self>) -> Result<T, Self> {
        match value? {
            Some(value) => Ok(value),
            None => Err(Self::unexpected_end_of_entry()),
        }
    }
}

impl ScannerError for std::io::Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, format!("{}", msg))
    }

    fn unexpected_end_of_entry() -> Self {
        std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "unexpected end of entry",
        )
    }

    fn trailing_tokens() -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, "trailing data")
    }
}

//============ Concrete Types ================================================

//------------ IterScanner ---------------------------------------------------

/// A simple scanner atop an iterator of tokens.
///
/// The iterator is treated as a single entry. Each item is one token
/// without any further processing of quotes or escapes.
pub struct IterScanner<Iter: Iterator> {
    /// The tokens.
    iter: Peekable<Iter>,

    /// The origin for relative names.
    origin: Option<Name>,
}

impl<Iter: Iterator> IterScanner<Iter> {
    /// Creates a new scanner without an origin.
    ///
    /// All names must be absolute. The final dot may be omitted.
    pub fn new<I: IntoIterator<IntoIter = Iter>>(iter: I) -> Self {
        IterScanner {
            iter: iter.into_iter().peekable(),
            origin: Some(Name::root()),
        }
    }

    /// Creates a new scanner that uses the given origin.
    ///
    /// If `origin` is `None`, all names must end in a dot.
    pub fn with_origin<I: IntoIterator<IntoIter = Iter>>(
        iter: I,
        origin: Option<Name>,
    ) -> Self {
        IterScanner {
            iter: iter.into_iter().peekable(),
            origin,
        }
    }

    /// Returns whether the iterator is exhausted.
    pub fn is_exhausted(&mut self) -> bool {
        self.iter.peek().is_none()
    }
}

impl<Iter> Scanner for IterScanner<Iter>
where
    Iter: Iterator,
    Iter::Item: AsRef<str>,
{
    type Error = ScanError;

    fn continues(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    fn scan_token(&mut self) -> Result<Option<String>, Self::Error> {
        Ok(self.iter.next().map(|token| token.as_ref().to_string()))
    }

    fn origin(&self) -> Option<&Name> {
        self.origin.as_ref()
    }
}

//------------ ScanError -----------------------------------------------------

/// An error returned when scanning representation format fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScanError {
    /// A generic error with a message.
    Custom(String),

    /// The entry ended before all fields were read.
    UnexpectedEnd,

    /// The entry had more tokens than the data needed.
    TrailingTokens,

    /// The token for a required field was missing.
    MissingField(&'static str),

    /// The token for a field could not be converted.
    Field {
        /// The name of the field.
        field: &'static str,

        /// The offending token.
        token: String,

        /// Why the token was rejected.
        reason: String,
    },
}

impl ScannerError for ScanError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ScanError::Custom(msg.to_string())
    }

    fn unexpected_end_of_entry() -> Self {
        ScanError::UnexpectedEnd
    }

    fn trailing_tokens() -> Self {
        ScanError::TrailingTokens
    }

    fn missing_field(field: &'static str) -> Self {
        ScanError::MissingField(field)
    }

    fn malformed_field<T: fmt::Display>(
        field: &'static str,
        token: &str,
        reason: T,
    ) -> Self {
        ScanError::Field {
            field,
            token: token.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanError::Custom(msg) => f.write_str(msg),
            ScanError::UnexpectedEnd => {
                f.write_str("unexpected end of entry")
            }
            ScanError::TrailingTokens => f.write_str("trailing data"),
            ScanError::MissingField(field) => write!(f, "missing {}", field),
            ScanError::Field {
                field,
                token,
                reason,
            } => write!(f, "malformed {} '{}': {}", field, token, reason),
        }
    }
}

impl std::error::Error for ScanError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scan_fields() {
        let mut scanner =
            IterScanner::new(["12", "+3", "www", "x", "rest", "of", "it"]);
        assert_eq!(scanner.scan_decimal::<u8>("first"), Ok(12));
        assert_eq!(
            scanner.scan_decimal::<u8>("second"),
            Err(ScanError::Field {
                field: "second",
                token: "+3".into(),
                reason: "expected decimal number".into(),
            })
        );
        assert_eq!(
            scanner.scan_name("name").unwrap().to_string(),
            "www."
        );
        assert!(matches!(
            scanner.scan_field::<u16>("number"),
            Err(ScanError::Field { field: "number", .. })
        ));
        assert!(scanner.continues());
        assert_eq!(scanner.check_end(), Err(ScanError::TrailingTokens));
        assert_eq!(
            scanner.scan_entry_tokens().unwrap(),
            ["rest", "of", "it"]
        );
        assert!(!scanner.continues());
        assert_eq!(scanner.check_end(), Ok(()));
        assert_eq!(
            scanner.scan_field::<u8>("last"),
            Err(ScanError::MissingField("last"))
        );
    }

    #[test]
    fn relative_names() {
        let origin: Name = "example.com".parse().unwrap();
        let mut scanner =
            IterScanner::with_origin(["www", "@", "a."], Some(origin));
        assert_eq!(
            scanner.scan_name("name").unwrap().to_string(),
            "www.example.com."
        );
        assert_eq!(
            scanner.scan_name("name").unwrap().to_string(),
            "example.com."
        );
        assert_eq!(scanner.scan_name("name").unwrap().to_string(), "a.");

        let mut scanner = IterScanner::with_origin(["www"], None);
        assert!(matches!(
            scanner.scan_name("name"),
            Err(ScanError::Field { field: "name", .. })
        ));
    }

    #[test]
    fn io_error() {
        let err = <std::io::Error as ScannerError>::malformed_field(
            "key tag", "x", "invalid digit",
        );
        assert_eq!(err.to_string(), "malformed key tag 'x': invalid digit");
    }
}
