//! Domain name compression.
//!
//! Name compression decreases the size of a DNS message by replacing a
//! name or name suffix that has been written before with a pointer to its
//! earlier position. This module provides [`NameCompressor`], a
//! [`Composer`] that wraps an octets builder and remembers the position of
//! every name suffix it has seen.
//!
//! Positions are relative to the beginning of the underlying builder, so
//! the builder must contain the message only.

use super::name::Name;
use super::wire::Composer;
use octseq::builder::{OctetsBuilder, Truncate};
use std::collections::HashMap;

//------------ NameCompressor ------------------------------------------------

/// A domain name compressor.
///
/// Only names added through [`Composer::append_compressed_name`] are
/// compressed and remembered. Names composed any other way, such as the
/// signer name of an RRSIG record, end up in the target as they are.
#[derive(Clone, Debug)]
pub struct NameCompressor<Target> {
    /// The underlying octets builder.
    target: Target,

    /// The positions of the suffixes we have written so far.
    names: HashMap<Name, u16>,
}

impl<Target> NameCompressor<Target> {
    /// Creates a new compressor from an underlying octets builder.
    pub fn new(target: Target) -> Self {
        NameCompressor {
            target,
            names: HashMap::new(),
        }
    }

    /// Returns a reference to the underlying octets builder.
    pub fn as_target(&self) -> &Target {
        &self.target
    }

    /// Converts the compressor into the underlying octets builder.
    pub fn into_target(self) -> Target {
        self.target
    }

    /// Returns an octets slice of the data.
    pub fn as_slice(&self) -> &[u8]
    where
        Target: AsRef<[u8]>,
    {
        self.target.as_ref()
    }
}

//--- AsRef, AsMut, OctetsBuilder, Truncate

impl<Target: AsRef<[u8]>> AsRef<[u8]> for NameCompressor<Target> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<Target: AsMut<[u8]>> AsMut<[u8]> for NameCompressor<Target> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.target.as_mut()
    }
}

impl<Target: OctetsBuilder> OctetsBuilder for NameCompressor<Target> {
    type AppendError = Target::AppendError;

    fn append_slice(
        &mut self,
        slice: &[u8],
    ) -> Result<(), Self::AppendError> {
        self.target.append_slice(slice)
    }
}

impl<Target: Truncate> Truncate for NameCompressor<Target> {
    fn truncate(&mut self, len: usize) {
        self.target.truncate(len);
        self.names.retain(|_, pos| usize::from(*pos) < len);
    }
}

//--- Composer

impl<Target: Composer> Composer for NameCompressor<Target> {
    fn append_compressed_name(
        &mut self,
        name: &Name,
    ) -> Result<(), Self::AppendError> {
        let start = self.target.as_ref().len();
        let octets = name.as_slice();
        let mut new_suffixes = Vec::new();
        for offset in name.suffix_offsets() {
            let suffix = name.suffix(offset);
            if let Some(&pos) = self.names.get(&suffix) {
                self.target.append_slice(&octets[..offset])?;
                self.target.append_slice(&(0xC000 | pos).to_be_bytes())?;
                self.remember(start, new_suffixes);
                return Ok(());
            }
            new_suffixes.push((suffix, offset));
        }
        self.target.append_slice(octets)?;
        self.remember(start, new_suffixes);
        Ok(())
    }

    fn can_compress(&self) -> bool {
        true
    }
}

impl<Target> NameCompressor<Target> {
    fn remember(&mut self, start: usize, suffixes: Vec<(Name, usize)>) {
        for (suffix, offset) in suffixes {
            // Pointers only have 14 bits for the position.
            if let Ok(pos) = u16::try_from(start + offset) {
                if pos < 0x4000 {
                    self.names.insert(suffix, pos);
                }
            }
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;
    use octseq::parse::Parser;

    #[test]
    fn compress_suffixes() {
        let mut target = NameCompressor::new(Vec::new());
        let first = Name::from_str("www.example.com").unwrap();
        let second = Name::from_str("mail.example.com").unwrap();
        target.append_compressed_name(&first).unwrap();
        target.append_compressed_name(&second).unwrap();
        target.append_compressed_name(&second).unwrap();
        let data = target.into_target();
        assert_eq!(
            data.as_slice(),
            b"\x03www\x07example\x03com\0\x04mail\xc0\x04\xc0\x11"
        );

        let mut parser = Parser::from_ref(data.as_slice());
        assert_eq!(Name::parse(&mut parser), Ok(first));
        assert_eq!(Name::parse(&mut parser), Ok(second.clone()));
        assert_eq!(Name::parse(&mut parser), Ok(second));
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn root_is_never_compressed() {
        let mut target = NameCompressor::new(Vec::new());
        target.append_compressed_name(&Name::root()).unwrap();
        target.append_compressed_name(&Name::root()).unwrap();
        assert_eq!(target.as_slice(), b"\0\0");
    }

    #[test]
    fn positions_beyond_pointer_range() {
        let mut target = NameCompressor::new(vec![0; 0x4000]);
        let name = Name::from_str("example.com").unwrap();
        target.append_compressed_name(&name).unwrap();
        target.append_compressed_name(&name).unwrap();
        assert_eq!(
            &target.as_slice()[0x4000..],
            b"\x07example\x03com\0\x07example\x03com\0"
        );

        let mut parser = Parser::from_ref(target.as_slice());
        parser.advance(0x4000 + 13).unwrap();
        assert_eq!(Name::parse(&mut parser), Ok(name));
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn truncate_forgets_names() {
        let mut target = NameCompressor::new(Vec::new());
        let name = Name::from_str("example.com").unwrap();
        target.append_slice(b"\xff").unwrap();
        target.append_compressed_name(&name).unwrap();
        target.truncate(1);
        target.append_compressed_name(&name).unwrap();
        assert_eq!(target.as_slice(), b"\xff\x07example\x03com\0");

        let mut parser = Parser::from_ref(target.as_slice());
        parser.advance(1).unwrap();
        assert_eq!(Name::parse(&mut parser), Ok(name));
    }
}
