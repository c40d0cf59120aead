//! Domain names.
//!
//! Domain names are a sequence of *labels* which are in turn a sequence of
//! up to 63 octets. While they are limited to a subset of ASCII by
//! convention, all octet values are allowed. In their wire-format
//! representation labels are prefixed with an octet containing the number
//! of octets in the label. The last label of an absolute name is the empty
//! *root label*.
//!
//! The [`Name`] type of this module keeps an absolute name in its
//! uncompressed wire format. In a DNS message, a name can end in a pointer
//! to another name stored earlier in the message. [`Name::parse`] follows
//! such pointers so that the resulting value is always self-contained.
//!
//! In zone files, names are written with their labels separated by dots.
//! Names not ending in a dot are relative and are completed by appending
//! an origin. See [`Name::from_str_relative`].

use super::wire::{Compose, Parse, ParseError};
use core::{fmt, hash, str};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use tracing::trace;

/// The maximum length of a domain name in wire format.
const MAX_NAME_LEN: usize = 255;

/// The maximum length of a label.
const MAX_LABEL_LEN: usize = 63;

//------------ Name ----------------------------------------------------------

/// An absolute domain name.
///
/// The name is kept in uncompressed wire format, that is, as the sequence
/// of its labels each preceded by its length and ending in the root label.
///
/// Comparison and hashing ignore ASCII case as required by RFC 4343.
#[derive(Clone)]
pub struct Name {
    octets: Vec<u8>,
}

/// # Creating Values
///
impl Name {
    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name { octets: vec![0] }
    }

    /// Creates a name from uncompressed wire-format octets.
    ///
    /// The octets must contain exactly one name without compression
    /// pointers.
    pub fn from_octets(octets: Vec<u8>) -> Result<Self, NameError> {
        Self::check_slice(&octets)?;
        Ok(Name { octets })
    }

    /// Creates a name from a slice of uncompressed wire-format octets.
    pub fn from_slice(slice: &[u8]) -> Result<Self, NameError> {
        Self::from_octets(slice.to_vec())
    }

    /// Creates a name from octets known to be correct.
    fn from_octets_unchecked(octets: Vec<u8>) -> Self {
        Name { octets }
    }

    fn check_slice(mut slice: &[u8]) -> Result<(), NameError> {
        if slice.len() > MAX_NAME_LEN {
            return Err(NameError::LongName);
        }
        loop {
            let (&len, tail) =
                slice.split_first().ok_or(NameError::ShortInput)?;
            let len = usize::from(len);
            if len > MAX_LABEL_LEN {
                return Err(NameError::BadLabel);
            }
            if len == 0 {
                return if tail.is_empty() {
                    Ok(())
                } else {
                    Err(NameError::TrailingData)
                };
            }
            if tail.len() < len {
                return Err(NameError::ShortInput);
            }
            slice = &tail[len..];
        }
    }

    /// Creates a name from its presentation format.
    ///
    /// The name `@` is replaced by `origin`. A name not ending in a dot is
    /// relative and `origin` is appended to it. If such a name is found but
    /// `origin` is `None`, an error is returned.
    pub fn from_str_relative(
        s: &str,
        origin: Option<&Name>,
    ) -> Result<Self, NameError> {
        if s == "@" {
            return origin.cloned().ok_or(NameError::RelativeName);
        }
        if s == "." {
            return Ok(Self::root());
        }
        let (mut octets, absolute) = presentation_labels(s)?;
        if !absolute {
            let origin = origin.ok_or(NameError::RelativeName)?;
            octets.extend_from_slice(origin.as_slice());
        } else {
            octets.push(0);
        }
        if octets.len() > MAX_NAME_LEN {
            return Err(NameError::LongName);
        }
        Ok(Self::from_octets_unchecked(octets))
    }
}

/// # Properties
///
impl Name {
    /// Returns the wire-format octets of the name.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.octets
    }

    /// Converts the name into its wire-format octets.
    #[must_use]
    pub fn into_octets(self) -> Vec<u8> {
        self.octets
    }

    /// Returns the length of the uncompressed wire format.
    #[must_use]
    pub fn compose_len(&self) -> u16 {
        // Names are never longer than 255 octets.
        self.octets.len() as u16
    }

    /// Returns whether this is the root name.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.octets.len() == 1
    }

    /// Returns an iterator over the content of the labels.
    ///
    /// The root label is included as the last, empty item.
    pub fn iter_labels(&self) -> LabelIter<'_> {
        LabelIter {
            slice: &self.octets,
        }
    }

    /// Returns the number of labels including the root label.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.iter_labels().count()
    }

    /// Returns the label count as used in RRSIG records.
    ///
    /// This is the number of labels without the root label and without
    /// a leading wildcard label.
    #[must_use]
    pub fn rrsig_label_count(&self) -> u8 {
        let mut labels = self.iter_labels().peekable();
        if labels.peek().map_or(false, |label| *label == b"*") {
            labels.next();
        }
        // At most 127 labels fit into 255 octets.
        (labels.count() - 1) as u8
    }

    /// Returns the wire-format offsets of all non-root suffixes.
    ///
    /// The first item is always zero, i.e., the name itself.
    pub(crate) fn suffix_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        let mut pos = 0;
        core::iter::from_fn(move || {
            let len = usize::from(*self.octets.get(pos)?);
            if len == 0 {
                return None;
            }
            let res = pos;
            pos += len + 1;
            Some(res)
        })
    }

    /// Returns the suffix starting at the given wire-format offset.
    ///
    /// The offset must have been produced by [`Self::suffix_offsets`].
    pub(crate) fn suffix(&self, offset: usize) -> Name {
        Self::from_octets_unchecked(self.octets[offset..].to_vec())
    }
}

/// # Parsing and Composing
///
impl Name {
    /// Parses a possibly compressed name.
    ///
    /// The parser must cover the entire message so that compression
    /// pointers can be resolved. Pointers must point to an earlier position
    /// than their own. After parsing, the parser is positioned behind the
    /// first pointer or the root label, whichever comes first.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let mut octets = Vec::new();
        let mut tmp = *parser;
        let mut compressed = false;
        loop {
            let ltype = tmp.parse_u8()?;
            match ltype {
                0 => {
                    octets.push(0);
                    break;
                }
                1..=0x3F => {
                    let len = usize::from(ltype);
                    if octets.len() + len + 2 > MAX_NAME_LEN {
                        return Err(ParseError::form_error("long domain name"));
                    }
                    octets.push(ltype);
                    let start = octets.len();
                    octets.resize(start + len, 0);
                    tmp.parse_buf(&mut octets[start..])?;
                }
                0xC0..=0xFF => {
                    let ptr = usize::from(ltype & 0x3F) << 8
                        | usize::from(tmp.parse_u8()?);
                    if ptr >= tmp.pos() - 2 {
                        return Err(ParseError::form_error(
                            "compression pointer not pointing backwards",
                        ));
                    }
                    trace!(ptr = ptr, "following name compression pointer");
                    if !compressed {
                        *parser = tmp;
                        compressed = true;
                    }
                    tmp.seek(ptr)?;
                }
                _ => {
                    return Err(ParseError::form_error("invalid label type"));
                }
            }
        }
        if !compressed {
            *parser = tmp;
        }
        Ok(Self::from_octets_unchecked(octets))
    }

    /// Appends the uncompressed name to the target.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.octets)
    }

    /// Appends the name in its canonical form.
    ///
    /// The canonical form defined in RFC 4034 is the uncompressed name with
    /// all ASCII letters converted to lower case.
    pub fn compose_canonical<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.octets.to_ascii_lowercase())
    }
}

//--- Parse and Compose

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for Name {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        Name::parse(parser)
    }
}

impl Compose for Name {
    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        Name::compose(self, target)
    }
}

//--- FromStr

impl str::FromStr for Name {
    type Err = NameError;

    /// Parses an absolute name.
    ///
    /// The final dot may be omitted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_relative(s, Some(&Self::root()))
    }
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.octets.eq_ignore_ascii_case(&other.octets)
    }
}

impl Eq for Name {}

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for ch in &self.octets {
            ch.to_ascii_lowercase().hash(state)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in self.iter_labels() {
            if label.is_empty() {
                break;
            }
            for &ch in label {
                if matches!(
                    ch,
                    b' ' | b'.' | b'\\' | b'"' | b'(' | b')' | b';' | b'@' | b'$'
                ) {
                    write!(f, "\\{}", ch as char)?;
                } else if !(0x20..0x7F).contains(&ch) {
                    write!(f, "\\{:03}", ch)?;
                } else {
                    write!(f, "{}", ch as char)?;
                }
            }
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize<'de>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//------------ LabelIter -----------------------------------------------------

/// An iterator over the content of the labels of a name.
#[derive(Clone, Debug)]
pub struct LabelIter<'a> {
    slice: &'a [u8],
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, tail) = self.slice.split_first()?;
        let (label, tail) = tail.split_at(usize::from(len));
        self.slice = tail;
        Some(label)
    }
}

//------------ presentation_labels -------------------------------------------

/// Converts presentation format into wire-format labels.
///
/// Returns the labels without the root label and whether the name was
/// absolute, i.e., ended in an unescaped dot.
fn presentation_labels(s: &str) -> Result<(Vec<u8>, bool), NameError> {
    let mut octets = Vec::new();
    let mut label_start = 0;
    octets.push(0);
    let mut chars = s.bytes();
    let mut absolute = false;
    while let Some(ch) = chars.next() {
        if absolute {
            // A dot was followed by something, so it was a separator.
            absolute = false;
        }
        let ch = match ch {
            b'.' => {
                let len = octets.len() - label_start - 1;
                if len == 0 {
                    return Err(NameError::EmptyLabel);
                }
                octets[label_start] = len as u8;
                label_start = octets.len();
                octets.push(0);
                absolute = true;
                continue;
            }
            b'\\' => {
                let ch = chars.next().ok_or(NameError::BadEscape)?;
                if ch.is_ascii_digit() {
                    let d2 = chars.next().ok_or(NameError::BadEscape)?;
                    let d3 = chars.next().ok_or(NameError::BadEscape)?;
                    if !d2.is_ascii_digit() || !d3.is_ascii_digit() {
                        return Err(NameError::BadEscape);
                    }
                    let value = u16::from(ch - b'0') * 100
                        + u16::from(d2 - b'0') * 10
                        + u16::from(d3 - b'0');
                    u8::try_from(value).map_err(|_| NameError::BadEscape)?
                } else {
                    ch
                }
            }
            ch => ch,
        };
        if octets.len() - label_start > MAX_LABEL_LEN {
            return Err(NameError::LongLabel);
        }
        octets.push(ch);
    }
    if absolute {
        // Drop the length octet of the empty label following the final dot.
        octets.pop();
    } else {
        let len = octets.len() - label_start - 1;
        if len == 0 {
            return Err(NameError::EmptyLabel);
        }
        octets[label_start] = len as u8;
    }
    Ok((octets, absolute))
}

//------------ NameError -----------------------------------------------------

/// A domain name was malformed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// A label was empty where it must not be.
    EmptyLabel,

    /// A label exceeded 63 octets.
    LongLabel,

    /// The name exceeded 255 octets.
    LongName,

    /// An escape sequence was malformed.
    BadEscape,

    /// A relative name was given without an origin to complete it.
    RelativeName,

    /// The wire format contained an illegal label type.
    BadLabel,

    /// The wire format ended before the root label.
    ShortInput,

    /// The wire format contained data after the root label.
    TrailingData,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameError::EmptyLabel => "empty label",
            NameError::LongLabel => "label exceeds 63 octets",
            NameError::LongName => "name exceeds 255 octets",
            NameError::BadEscape => "illegal escape sequence",
            NameError::RelativeName => "relative name without origin",
            NameError::BadLabel => "illegal label type",
            NameError::ShortInput => "unexpected end of input",
            NameError::TrailingData => "trailing data",
        })
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(name(".").as_slice(), b"\0");
        assert_eq!(name("example.com.").as_slice(), b"\x07example\x03com\0");
        assert_eq!(name("example.com").as_slice(), b"\x07example\x03com\0");
        assert_eq!(name("a\\.b.c.").as_slice(), b"\x03a.b\x01c\0");
        assert_eq!(name("\\065.").as_slice(), b"\x01A\0");
        assert_eq!(Name::from_str(""), Err(NameError::EmptyLabel));
        assert_eq!(Name::from_str("a..b."), Err(NameError::EmptyLabel));
        assert_eq!(Name::from_str(".a"), Err(NameError::EmptyLabel));
        assert_eq!(Name::from_str("\\256."), Err(NameError::BadEscape));
        assert_eq!(Name::from_str("a\\1"), Err(NameError::BadEscape));
        assert_eq!(
            Name::from_str(&format!("{}.", "a".repeat(64))),
            Err(NameError::LongLabel)
        );
        assert!(Name::from_str(&format!("{}.", "a".repeat(63))).is_ok());
        let long = vec!["a".repeat(63); 4].join(".");
        assert_eq!(Name::from_str(&long), Err(NameError::LongName));
    }

    #[test]
    fn from_str_relative() {
        let origin = name("example.com.");
        assert_eq!(
            Name::from_str_relative("www", Some(&origin)).unwrap(),
            name("www.example.com.")
        );
        assert_eq!(
            Name::from_str_relative("www.", Some(&origin)).unwrap(),
            name("www.")
        );
        assert_eq!(Name::from_str_relative("@", Some(&origin)).unwrap(), origin);
        assert_eq!(
            Name::from_str_relative("www", None),
            Err(NameError::RelativeName)
        );
    }

    #[test]
    fn display() {
        assert_eq!(name(".").to_string(), ".");
        assert_eq!(name("Example.COM").to_string(), "Example.COM.");
        assert_eq!(name("a\\.b\\032c.").to_string(), "a\\.b\\ c.");
        assert_eq!(
            Name::from_slice(b"\x01\x07\0").unwrap().to_string(),
            "\\007."
        );
    }

    #[test]
    fn eq_ignores_case() {
        assert_eq!(name("EXAMPLE.com"), name("example.COM"));
        assert_ne!(name("example.com"), name("example.net"));
    }

    #[test]
    fn labels() {
        let n = name("*.www.example.com");
        assert_eq!(n.label_count(), 5);
        assert_eq!(n.rrsig_label_count(), 3);
        assert_eq!(Name::root().rrsig_label_count(), 0);
        assert_eq!(name("example.com").rrsig_label_count(), 2);
        assert_eq!(n.suffix_offsets().collect::<Vec<_>>(), [0, 2, 6, 14]);
        assert_eq!(n.suffix(6), name("example.com"));
    }

    #[test]
    fn from_octets() {
        assert!(Name::from_slice(b"\x03www\0").is_ok());
        assert_eq!(Name::from_slice(b""), Err(NameError::ShortInput));
        assert_eq!(Name::from_slice(b"\x03ww"), Err(NameError::ShortInput));
        assert_eq!(Name::from_slice(b"\x03www\0\0"), Err(NameError::TrailingData));
        assert_eq!(Name::from_slice(b"\xc0\x00"), Err(NameError::BadLabel));
    }

    #[test]
    fn parse_uncompressed() {
        let data = b"\x03www\x07example\x03com\0\x01\x02";
        let mut parser = Parser::from_ref(&data[..]);
        assert_eq!(Name::parse(&mut parser).unwrap(), name("www.example.com"));
        assert_eq!(parser.remaining(), 2);
    }

    #[test]
    fn parse_compressed() {
        let data = b"\x07example\x03com\0\x03www\xc0\x00\x01";
        let mut parser = Parser::from_ref(&data[..]);
        parser.advance(13).unwrap();
        assert_eq!(Name::parse(&mut parser).unwrap(), name("www.example.com"));
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn parse_bad_pointers() {
        // Pointer to itself.
        let data = b"\xc0\x00";
        let mut parser = Parser::from_ref(&data[..]);
        assert!(matches!(Name::parse(&mut parser), Err(ParseError::Form(_))));

        // Pointer forward.
        let data = b"\xc0\x02\x00";
        let mut parser = Parser::from_ref(&data[..]);
        assert!(matches!(Name::parse(&mut parser), Err(ParseError::Form(_))));

        // Loop: label followed by pointer back to the label.
        let data = b"\x01a\xc0\x00";
        let mut parser = Parser::from_ref(&data[..]);
        assert!(matches!(Name::parse(&mut parser), Err(ParseError::Form(_))));

        // Reserved label type.
        let data = b"\x40";
        let mut parser = Parser::from_ref(&data[..]);
        assert!(matches!(Name::parse(&mut parser), Err(ParseError::Form(_))));

        // Truncated.
        let data = b"\x03ww";
        let mut parser = Parser::from_ref(&data[..]);
        assert_eq!(Name::parse(&mut parser), Err(ParseError::ShortInput));
    }

    #[test]
    fn compose_canonical() {
        let mut buf = Vec::new();
        name("WWW.Example.com").compose_canonical(&mut buf).unwrap();
        assert_eq!(buf, b"\x03www\x07example\x03com\0");
        let mut buf = Vec::new();
        name("WWW.Example.com").compose(&mut buf).unwrap();
        assert_eq!(buf, b"\x03WWW\x07Example\x03com\0");
    }
}
