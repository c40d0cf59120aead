//! Reading zone files.
//!
//! This module provides [`Zonefile`], a reader for the textual format of
//! zone data defined in [RFC 1035] section 5. The reader splits the text
//! into entries, interprets the `$ORIGIN`, `$TTL`, and `$INCLUDE` control
//! entries, fills in omitted owner names, TTLs, and classes, and hands the
//! record data to [`ZoneRecordData::scan`].
//!
//! The whole zone file is kept in memory. Entries are produced by iterating
//! over the reader:
//!
//! ```
//! use domain_rr::zonefile::{Entry, Zonefile};
//!
//! let zone = Zonefile::from(
//!     "$ORIGIN example.com.\n\
//!      $TTL 3600\n\
//!      @ IN NS ns1\n\
//!      ns1 A 192.0.2.1\n"
//! );
//! for entry in zone {
//!     match entry.unwrap() {
//!         Entry::Record(record) => println!("{}", record),
//!         Entry::Include { .. } => unimplemented!(),
//!     }
//! }
//! ```
//!
//! Escape sequences in tokens are passed on unchanged to the record types
//! which interpret them according to the field they belong to.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::record::Record;
use crate::base::scan::{IterScanner, ScanError, Scanner};
use crate::base::Ttl;
use crate::rdata::ZoneRecordData;
use core::fmt;
use core::str::FromStr;
use std::string::String;
use std::vec::Vec;
use tracing::{debug, trace};

//------------ Type Aliases --------------------------------------------------

/// The type used for scanned records.
pub type ScannedRecord = Record<ZoneRecordData>;

//------------ ZonefileConfig ------------------------------------------------

/// Configuration for reading a zone file.
#[derive(Clone, Debug)]
pub struct ZonefileConfig {
    /// The origin to start with.
    ///
    /// Relative names are rejected until an origin has been set, either
    /// here or through an `$ORIGIN` entry.
    pub origin: Option<Name>,

    /// The TTL to use for records without an explicit TTL.
    ///
    /// This is replaced by `$TTL` entries and by the last explicit TTL.
    pub default_ttl: Option<Ttl>,

    /// The class to use if the first record doesn’t give one.
    pub default_class: Class,

    /// Whether to skip over entries that fail to scan.
    ///
    /// If this is `false`, the reader returns an error for such an entry.
    /// Iteration can still be resumed with the next entry.
    pub skip_invalid: bool,
}

impl ZonefileConfig {
    /// Sets the initial origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Name) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Sets the default TTL.
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Ttl) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Sets the default class.
    #[must_use]
    pub fn with_default_class(mut self, class: Class) -> Self {
        self.default_class = class;
        self
    }

    /// Sets whether invalid entries should be skipped.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.skip_invalid = skip_invalid;
        self
    }
}

impl Default for ZonefileConfig {
    fn default() -> Self {
        ZonefileConfig {
            origin: None,
            default_ttl: None,
            default_class: Class::IN,
            skip_invalid: false,
        }
    }
}

//------------ Zonefile ------------------------------------------------------

/// A zone file to be read.
///
/// A value of this type holds the text of a zone file and produces its
/// entries by acting as an iterator. The [`next_entry`][Self::next_entry]
/// method provides an alternative with a more question mark friendly
/// signature.
///
/// After an error, iteration continues with the entry following the one
/// that failed.
#[derive(Clone, Debug)]
pub struct Zonefile {
    /// The source text.
    source: String,

    /// The position of the next unread byte in `source`.
    pos: usize,

    /// The line number of the next unread byte.
    line: usize,

    /// Whether invalid entries are skipped.
    skip_invalid: bool,

    /// The current origin.
    origin: Option<Name>,

    /// The last owner.
    last_owner: Option<Name>,

    /// The last TTL.
    last_ttl: Option<Ttl>,

    /// The last class.
    last_class: Class,
}

impl Zonefile {
    /// Creates a reader for the given text with the default configuration.
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_config(source, ZonefileConfig::default())
    }

    /// Creates a reader for the given text and configuration.
    pub fn with_config(
        source: impl Into<String>,
        config: ZonefileConfig,
    ) -> Self {
        Zonefile {
            source: source.into(),
            pos: 0,
            line: 1,
            skip_invalid: config.skip_invalid,
            origin: config.origin,
            last_owner: None,
            last_ttl: config.default_ttl,
            last_class: config.default_class,
        }
    }

    /// Creates a value by loading the data from the given reader.
    pub fn load(
        read: &mut impl std::io::Read,
        config: ZonefileConfig,
    ) -> Result<Self, std::io::Error> {
        let mut source = String::new();
        read.read_to_string(&mut source)?;
        Ok(Self::with_config(source, config))
    }

    /// Sets the origin of the zone file.
    ///
    /// The origin is appended to relative domain names encountered in the
    /// data.
    pub fn set_origin(&mut self, origin: Name) {
        self.origin = Some(origin)
    }

    /// Returns the current origin.
    pub fn origin(&self) -> Option<&Name> {
        self.origin.as_ref()
    }

    /// Returns the next entry in the zone file.
    ///
    /// Returns `Ok(None)` if the end of the file has been reached. Returns
    /// an error if scanning the next entry failed.
    ///
    /// This method is identical to the `next` method of the iterator
    /// implementation but has the return type transposed for easier use
    /// with the question mark operator.
    pub fn next_entry(&mut self) -> Result<Option<Entry>, Error> {
        loop {
            let res = match self.next_raw_entry() {
                Ok(Some(raw)) => {
                    let line = raw.line;
                    self.process_entry(raw)
                        .map_err(|err| Error::new(line, err))
                }
                Ok(None) => return Ok(None),
                Err(err) => Err(err),
            };
            match res {
                Ok(ScannedEntry::Entry(entry)) => return Ok(Some(entry)),
                Ok(ScannedEntry::Empty) => {}
                Err(err) => {
                    debug!(
                        line = err.line(),
                        error = %err.err(),
                        skipped = self.skip_invalid,
                        "invalid zone file entry"
                    );
                    if !self.skip_invalid {
                        return Err(err);
                    }
                }
            }
        }
    }
}

impl From<&str> for Zonefile {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}

impl From<String> for Zonefile {
    fn from(src: String) -> Self {
        Self::new(src)
    }
}

impl Iterator for Zonefile {
    type Item = Result<Entry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

/// # Tokenizing
///
impl Zonefile {
    /// Returns the tokens of the next entry.
    ///
    /// Empty lines and lines containing only comments are skipped. On a
    /// syntax error, the whole entry is skipped so the next call starts
    /// afresh.
    fn next_raw_entry(&mut self) -> Result<Option<RawEntry>, Error> {
        loop {
            if self.pos >= self.source.len() {
                return Ok(None);
            }
            let line = self.line;
            let indented = matches!(self.peek(), Some(b' ' | b'\t'));
            let mut tokens = Vec::new();
            if let Err(err) = self.scan_entry_tokens(&mut tokens) {
                return Err(Error::new(line, err));
            }
            if !tokens.is_empty() {
                return Ok(Some(RawEntry {
                    line,
                    indented,
                    tokens,
                }));
            }
        }
    }

    /// Collects the tokens up to the end of the entry.
    ///
    /// The entry ends at a line feed outside of parentheses or at the end
    /// of the source. A stray closing parenthesis fails the entry, but
    /// scanning continues to its end.
    fn scan_entry_tokens(
        &mut self,
        tokens: &mut Vec<String>,
    ) -> Result<(), EntryError> {
        let mut parens = 0usize;
        let mut res = Ok(());
        loop {
            let ch = match self.peek() {
                Some(ch) => ch,
                None => {
                    if parens > 0 {
                        return Err(EntryError::unbalanced_parens());
                    }
                    return res;
                }
            };
            match ch {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'(' => {
                    parens += 1;
                    self.pos += 1;
                }
                b')' => {
                    if parens == 0 {
                        res = Err(EntryError::unbalanced_parens());
                    } else {
                        parens -= 1;
                    }
                    self.pos += 1;
                }
                b';' => {
                    // Comment: the line feed is dealt with next time.
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.pos += 1;
                    }
                }
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    if parens == 0 {
                        return res;
                    }
                }
                b'"' => tokens.push(self.scan_quoted()?),
                _ => tokens.push(self.scan_unquoted()),
            }
        }
    }

    /// Scans a quoted token.
    ///
    /// The position must be at the opening quote. The returned token does
    /// not contain the quotes.
    fn scan_quoted(&mut self) -> Result<String, EntryError> {
        self.pos += 1;
        let start = self.pos;
        loop {
            match self.peek() {
                None => return Err(EntryError::unterminated_quote()),
                Some(b'"') => break,
                Some(b'\\') => {
                    self.pos += 1;
                    if self.peek() == Some(b'\n') {
                        self.line += 1;
                    }
                    if self.peek().is_some() {
                        self.pos += 1;
                    }
                }
                Some(b'\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        let res = self.token(start, self.pos);
        self.pos += 1;
        Ok(res)
    }

    /// Scans an unquoted token.
    ///
    /// The token ends before white space, parentheses, a semicolon, or a
    /// double quote unless escaped with a backslash.
    fn scan_unquoted(&mut self) -> String {
        let start = self.pos;
        loop {
            match self.peek() {
                None
                | Some(
                    b' ' | b'\t' | b'\r' | b'\n' | b'(' | b')' | b';' | b'"',
                ) => break,
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        None | Some(b'\n') => break,
                        Some(_) => self.pos += 1,
                    }
                }
                Some(_) => self.pos += 1,
            }
        }
        self.token(start, self.pos)
    }

    /// Returns the source between `start` and `end` as a token.
    fn token(&self, start: usize, end: usize) -> String {
        // The token boundaries are always at ASCII characters, so the
        // slice is valid UTF-8 and lossy conversion never kicks in.
        String::from_utf8_lossy(&self.source.as_bytes()[start..end])
            .into_owned()
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }
}

/// # Interpreting Entries
///
impl Zonefile {
    /// Processes the tokens of a single entry.
    fn process_entry(
        &mut self,
        raw: RawEntry,
    ) -> Result<ScannedEntry, EntryError> {
        let indented = raw.indented;
        let mut tokens = raw.tokens.into_iter();
        let first = match tokens.next() {
            Some(first) => first,
            None => return Ok(ScannedEntry::Empty),
        };
        if indented {
            let owner = match self.last_owner.as_ref() {
                Some(owner) => owner.clone(),
                None => return Err(EntryError::missing_last_owner()),
            };
            let mut tokens = Some(first).into_iter().chain(tokens);
            self.scan_owner_record(owner, &mut tokens)
        } else if first.starts_with('$') {
            self.scan_control(&first, tokens)
        } else {
            let owner = Name::from_str_relative(&first, self.origin.as_ref())
                .map_err(|err| {
                    EntryError::Scan(ScanError::Field {
                        field: "owner",
                        token: first.clone(),
                        reason: err.to_string(),
                    })
                })?;
            self.last_owner = Some(owner.clone());
            self.scan_owner_record(owner, &mut tokens)
        }
    }

    /// Scans a record after its owner has been determined.
    fn scan_owner_record(
        &mut self,
        owner: Name,
        tokens: &mut impl Iterator<Item = String>,
    ) -> Result<ScannedEntry, EntryError> {
        let (class, ttl, rtype) = Self::scan_ctr(tokens)?;

        let class = match class {
            Some(class) => {
                self.last_class = class;
                class
            }
            None => self.last_class,
        };

        let ttl = match ttl {
            Some(ttl) => {
                self.last_ttl = Some(ttl);
                ttl
            }
            None => match self.last_ttl {
                Some(ttl) => ttl,
                None => return Err(EntryError::missing_last_ttl()),
            },
        };

        let mut scanner =
            IterScanner::with_origin(tokens, self.origin.clone());
        let data = ZoneRecordData::scan(rtype, &mut scanner)?;
        scanner.check_end()?;

        Ok(ScannedEntry::Entry(Entry::Record(Record::new(
            owner, class, ttl, data,
        ))))
    }

    /// Scans the TTL, class, and type portions of a record.
    fn scan_ctr(
        tokens: &mut impl Iterator<Item = String>,
    ) -> Result<(Option<Class>, Option<Ttl>, Rtype), EntryError> {
        // Possible options are:
        //
        //   [<TTL>] [<class>] <type>
        //   [<class>] [<TTL>] <type>

        let first = Ctr::scan(tokens)?;
        match first {
            Ctr::Ttl(ttl) => match Ctr::scan(tokens)? {
                Ctr::Class(class) => {
                    Ok((Some(class), Some(ttl), Ctr::scan_rtype(tokens)?))
                }
                Ctr::Rtype(rtype) => Ok((None, Some(ttl), rtype)),
                Ctr::Ttl(_) => Err(EntryError::expected_rtype()),
            },
            Ctr::Class(class) => match Ctr::scan(tokens)? {
                Ctr::Ttl(ttl) => {
                    Ok((Some(class), Some(ttl), Ctr::scan_rtype(tokens)?))
                }
                Ctr::Rtype(rtype) => Ok((Some(class), None, rtype)),
                Ctr::Class(_) => Err(EntryError::expected_rtype()),
            },
            Ctr::Rtype(rtype) => Ok((None, None, rtype)),
        }
    }

    /// Scans a control entry.
    fn scan_control(
        &mut self,
        ctrl: &str,
        mut tokens: impl Iterator<Item = String>,
    ) -> Result<ScannedEntry, EntryError> {
        if ctrl.eq_ignore_ascii_case("$ORIGIN") {
            let mut scanner =
                IterScanner::with_origin(tokens, self.origin.clone());
            let origin = scanner.scan_name("origin")?;
            scanner.check_end()?;
            trace!(origin = %origin, "setting zone file origin");
            self.origin = Some(origin);
            Ok(ScannedEntry::Empty)
        } else if ctrl.eq_ignore_ascii_case("$INCLUDE") {
            let path = match tokens.next() {
                Some(path) => path,
                None => {
                    return Err(EntryError::Scan(ScanError::MissingField(
                        "path",
                    )))
                }
            };
            let mut scanner =
                IterScanner::with_origin(tokens, self.origin.clone());
            let origin = if scanner.continues() {
                Some(scanner.scan_name("origin")?)
            } else {
                None
            };
            scanner.check_end()?;
            trace!(path = %path, "found zone file include");
            Ok(ScannedEntry::Entry(Entry::Include { path, origin }))
        } else if ctrl.eq_ignore_ascii_case("$TTL") {
            let mut scanner = IterScanner::new(tokens);
            let ttl: Ttl = scanner.scan_field("TTL")?;
            scanner.check_end()?;
            trace!(ttl = %ttl, "setting zone file default TTL");
            self.last_ttl = Some(ttl);
            Ok(ScannedEntry::Empty)
        } else {
            Err(EntryError::unknown_control())
        }
    }
}

//------------ Entry ---------------------------------------------------------

/// An entry of a zone file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Entry {
    /// A DNS record.
    Record(ScannedRecord),

    /// An include directive.
    ///
    /// When this entry is encountered, the referenced file should be scanned
    /// next. If `origin` is given, this file should be scanned with it as the
    /// initial origin name.
    Include {
        /// The path to the file to be included.
        path: String,

        /// The initial origin name of the included file, if provided.
        origin: Option<Name>,
    },
}

//------------ ScannedEntry --------------------------------------------------

/// A processed entry of a zone file.
///
/// This includes the entries we handle internally and don’t have to bubble
/// up to the user.
#[derive(Clone, Debug)]
enum ScannedEntry {
    /// An entry that should be handed to the user.
    Entry(Entry),

    /// A control entry that has been applied.
    Empty,
}

//------------ RawEntry ------------------------------------------------------

/// The tokens of a single entry.
#[derive(Clone, Debug)]
struct RawEntry {
    /// The line the entry starts on.
    line: usize,

    /// Whether the entry starts with white space.
    indented: bool,

    /// The tokens of the entry.
    tokens: Vec<String>,
}

//------------ Ctr -----------------------------------------------------------

/// One of the tokens between owner and record data.
enum Ctr {
    Class(Class),
    Ttl(Ttl),
    Rtype(Rtype),
}

impl Ctr {
    fn scan(
        tokens: &mut impl Iterator<Item = String>,
    ) -> Result<Self, EntryError> {
        let token = tokens.next().ok_or_else(EntryError::expected_rtype)?;
        if token.starts_with(|ch: char| ch.is_ascii_digit()) {
            Ttl::from_str(&token)
                .map(Ctr::Ttl)
                .map_err(|_| EntryError::bad_ttl())
        } else if let Ok(rtype) = Rtype::from_str(&token) {
            Ok(Ctr::Rtype(rtype))
        } else if let Ok(class) = Class::from_str(&token) {
            Ok(Ctr::Class(class))
        } else {
            Err(EntryError::expected_rtype())
        }
    }

    fn scan_rtype(
        tokens: &mut impl Iterator<Item = String>,
    ) -> Result<Rtype, EntryError> {
        tokens
            .next()
            .and_then(|token| Rtype::from_str(&token).ok())
            .ok_or_else(EntryError::expected_rtype)
    }
}

//------------ EntryError ----------------------------------------------------

/// An error happened while processing a single entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryError {
    /// The entry is syntactically broken.
    Syntax(&'static str),

    /// The tokens of the entry could not be converted.
    Scan(ScanError),
}

impl EntryError {
    fn unbalanced_parens() -> Self {
        EntryError::Syntax("unbalanced parens")
    }

    fn unterminated_quote() -> Self {
        EntryError::Syntax("unterminated quoted token")
    }

    fn missing_last_owner() -> Self {
        EntryError::Syntax("missing last owner")
    }

    fn missing_last_ttl() -> Self {
        EntryError::Syntax("missing last ttl")
    }

    fn bad_ttl() -> Self {
        EntryError::Syntax("bad ttl")
    }

    fn expected_rtype() -> Self {
        EntryError::Syntax("expected rtype")
    }

    fn unknown_control() -> Self {
        EntryError::Syntax("unknown control")
    }
}

impl From<ScanError> for EntryError {
    fn from(err: ScanError) -> Self {
        EntryError::Scan(err)
    }
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntryError::Syntax(msg) => f.write_str(msg),
            EntryError::Scan(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for EntryError {}

//------------ Error ---------------------------------------------------------

/// An error happened while reading a zone file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// The line the failed entry starts on.
    line: usize,

    /// What went wrong.
    err: EntryError,
}

impl Error {
    fn new(line: usize, err: EntryError) -> Self {
        Error { line, err }
    }

    /// Returns the line number of the entry that failed.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the error of the entry.
    pub fn err(&self) -> &EntryError {
        &self.err
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::SecAlg;
    use crate::rdata::{Cname, Ns, Rrsig, Timestamp, A};
    use std::vec::Vec;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn records(zone: Zonefile) -> Vec<ScannedRecord> {
        zone.map(|entry| match entry.unwrap() {
            Entry::Record(record) => record,
            Entry::Include { .. } => panic!("unexpected include"),
        })
        .collect()
    }

    #[test]
    fn basic_zone() {
        let zone = Zonefile::from(
            "$ORIGIN example.com.\n\
             $TTL 3600\n\
             @\tIN\tNS\tns1 ; the name server\n\
             ns1 60 A 192.0.2.1\n\
             \tIN 120 A 192.0.2.2\n\
             www CNAME ns1.example.com.\n",
        );
        let records = records(zone);
        assert_eq!(records.len(), 4);

        assert_eq!(records[0].owner(), &name("example.com."));
        assert_eq!(records[0].class(), Class::IN);
        assert_eq!(records[0].ttl(), Ttl::from_secs(3600));
        assert_eq!(
            records[0].data(),
            &ZoneRecordData::Ns(Ns::new(name("ns1.example.com.")))
        );

        assert_eq!(records[1].owner(), &name("ns1.example.com."));
        assert_eq!(records[1].ttl(), Ttl::from_secs(60));
        assert_eq!(
            records[1].data(),
            &ZoneRecordData::A(A::from_octets(192, 0, 2, 1))
        );

        // Indented: last owner, class and TTL in either order.
        assert_eq!(records[2].owner(), &name("ns1.example.com."));
        assert_eq!(records[2].ttl(), Ttl::from_secs(120));
        assert_eq!(
            records[2].data(),
            &ZoneRecordData::A(A::from_octets(192, 0, 2, 2))
        );

        // The last explicit TTL sticks.
        assert_eq!(records[3].owner(), &name("www.example.com."));
        assert_eq!(records[3].ttl(), Ttl::from_secs(120));
        assert_eq!(
            records[3].data(),
            &ZoneRecordData::Cname(Cname::new(name("ns1.example.com.")))
        );
    }

    #[test]
    fn rrsig_in_parens() {
        let zone = Zonefile::with_config(
            "example.com. 3600 IN RRSIG A 8 2 3600 (\n\
             \t20231114221320 ; expiration\n\
             \t1699000000 12345 example.com.\n\
             \tc2ln\n\
             \tbmF0dXJl )\n",
            ZonefileConfig::default(),
        );
        let records = records(zone);
        assert_eq!(records.len(), 1);
        let ZoneRecordData::Rrsig(rrsig) = records[0].data() else {
            panic!("not an RRSIG")
        };
        assert_eq!(rrsig.type_covered(), Rtype::A);
        assert_eq!(rrsig.algorithm(), SecAlg::RSASHA256);
        assert_eq!(rrsig.expiration(), Timestamp::from(1700000000));
        assert_eq!(rrsig.inception(), Timestamp::from(1699000000));
        assert_eq!(rrsig.signer_name(), &name("example.com."));
        assert_eq!(rrsig.signature(), b"signature");
        assert_eq!(
            rrsig,
            &Rrsig::new(
                Rtype::A,
                SecAlg::RSASHA256,
                2,
                Ttl::from_secs(3600),
                1700000000.into(),
                1699000000.into(),
                12345,
                name("example.com."),
                b"signature".to_vec(),
            )
            .unwrap()
        );
    }

    #[test]
    fn unknown_type() {
        let zone = Zonefile::new(
            "example.com. 60 CLASS32 TYPE65280 \\# 3 ( 0102\n03 )\n",
        );
        let records = records(zone);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class(), Class::from_int(32));
        assert_eq!(records[0].rtype(), Rtype::from_int(65280));
        let ZoneRecordData::Unknown(data) = records[0].data() else {
            panic!("not unknown data")
        };
        assert_eq!(data.data(), b"\x01\x02\x03");
    }

    #[test]
    fn quoted_and_escaped_tokens() {
        let zone = Zonefile::new(
            "\"example.com.\" 60 NS ns\\ 1.example.com.\n\
             a\\;b.example.com. 60 NS \"x.example.com.\";comment\n",
        );
        let records = records(zone);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].owner(), &name("example.com."));
        assert_eq!(
            records[0].data(),
            &ZoneRecordData::Ns(Ns::new(name("ns\\ 1.example.com.")))
        );
        assert_eq!(records[1].owner(), &name("a\\;b.example.com."));
    }

    #[test]
    fn config_defaults() {
        let zone = Zonefile::with_config(
            "www A 192.0.2.1\n",
            ZonefileConfig::default()
                .with_origin(name("example.com."))
                .with_default_ttl(Ttl::from_secs(300))
                .with_default_class(Class::CH),
        );
        let records = records(zone);
        assert_eq!(records[0].owner(), &name("www.example.com."));
        assert_eq!(records[0].ttl(), Ttl::from_secs(300));
        assert_eq!(records[0].class(), Class::CH);
    }

    #[test]
    fn include() {
        let mut zone = Zonefile::new(
            "$INCLUDE sub.zone\n$INCLUDE other.zone sub.example.com.\n",
        );
        assert_eq!(
            zone.next_entry().unwrap(),
            Some(Entry::Include {
                path: "sub.zone".into(),
                origin: None
            })
        );
        assert_eq!(
            zone.next_entry().unwrap(),
            Some(Entry::Include {
                path: "other.zone".into(),
                origin: Some(name("sub.example.com."))
            })
        );
        assert_eq!(zone.next_entry().unwrap(), None);
    }

    #[test]
    fn errors_carry_line_and_resume() {
        let mut zone = Zonefile::new(
            "\n\
             example.com. 60 A 192.0.2.1\n\
             example.com. 60 A 192.0.2\n\
             example.com. 60 A ( 192.0.2.3\n\
             \n\
             )\n\
             \tA 192.0.2.4\n",
        );
        assert!(matches!(zone.next_entry(), Ok(Some(Entry::Record(_)))));

        let err = zone.next_entry().unwrap_err();
        assert_eq!(err.line(), 3);
        assert!(matches!(
            err.err(),
            EntryError::Scan(ScanError::Field {
                field: "address",
                ..
            })
        ));

        let Some(Entry::Record(record)) = zone.next_entry().unwrap() else {
            panic!("expected record")
        };
        assert_eq!(
            record.data(),
            &ZoneRecordData::A(A::from_octets(192, 0, 2, 3))
        );

        let Some(Entry::Record(record)) = zone.next_entry().unwrap() else {
            panic!("expected record")
        };
        assert_eq!(record.owner(), &name("example.com."));
        assert_eq!(zone.next_entry().unwrap(), None);
    }

    #[test]
    fn skip_invalid() {
        let zone = Zonefile::with_config(
            "example.com. 60 A 192.0.2.1\n\
             example.com. 60 A 192.0.2.1 trailing\n\
             example.com. 60 BOGUS 1\n\
             ) \n\
             example.com. 60 A 192.0.2.2\n",
            ZonefileConfig::default().with_skip_invalid(true),
        );
        let records = records(zone);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1].data(),
            &ZoneRecordData::A(A::from_octets(192, 0, 2, 2))
        );
    }

    #[test]
    fn skip_invalid_multi_line_entry() {
        let source = "example.com. 60 A ) 192.0.2.1 (\n\
                      \t192.0.2.9 )\n\
                      example.com. 60 A 192.0.2.2\n";

        let mut zone = Zonefile::new(source);
        let err = zone.next_entry().unwrap_err();
        assert_eq!(err.line(), 1);
        assert_eq!(err.err(), &EntryError::unbalanced_parens());
        let Some(Entry::Record(record)) = zone.next_entry().unwrap() else {
            panic!("expected record")
        };
        assert_eq!(
            record.data(),
            &ZoneRecordData::A(A::from_octets(192, 0, 2, 2))
        );
        assert_eq!(zone.next_entry().unwrap(), None);

        let zone = Zonefile::with_config(
            source,
            ZonefileConfig::default().with_skip_invalid(true),
        );
        assert_eq!(records(zone).len(), 1);
    }

    #[test]
    fn entry_errors() {
        fn first_err(zone: &str) -> EntryError {
            Zonefile::new(zone)
                .find_map(Result::err)
                .unwrap()
                .err()
                .clone()
        }

        assert_eq!(
            first_err("\tA 192.0.2.1\n"),
            EntryError::missing_last_owner()
        );
        assert_eq!(
            first_err("example.com. A 192.0.2.1\n"),
            EntryError::missing_last_ttl()
        );
        assert_eq!(
            first_err("example.com. 60 IN\n"),
            EntryError::expected_rtype()
        );
        assert_eq!(
            first_err("example.com. 60 IN 60 A 192.0.2.1\n"),
            EntryError::Syntax("expected rtype")
        );
        assert_eq!(
            first_err("example.com. 1x A 192.0.2.1\n"),
            EntryError::bad_ttl()
        );
        assert_eq!(first_err("$FOO bar\n"), EntryError::unknown_control());
        assert_eq!(
            first_err("example.com. 60 A ( 192.0.2.1\n"),
            EntryError::unbalanced_parens()
        );
        assert_eq!(
            first_err("example.com. 60 NS \"ns.example.com.\n"),
            EntryError::unterminated_quote()
        );
        assert!(matches!(
            first_err("www 60 A 192.0.2.1\n"),
            EntryError::Scan(ScanError::Field { field: "owner", .. })
        ));
        assert_eq!(
            first_err("$TTL\n"),
            EntryError::Scan(ScanError::MissingField("TTL"))
        );
    }

    #[test]
    fn error_display() {
        let err = Zonefile::new("\n\nexample.com. 60 A ( 192.0.2.1\n")
            .next_entry()
            .unwrap_err();
        assert_eq!(err.to_string(), "line 3: unbalanced parens");
    }

    #[test]
    fn load() {
        let mut source = "example.com. 60 A 192.0.2.1\n".as_bytes();
        let zone =
            Zonefile::load(&mut source, ZonefileConfig::default()).unwrap();
        assert_eq!(records(zone).len(), 1);
    }
}
