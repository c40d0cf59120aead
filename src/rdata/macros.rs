//! Macros for use in rdata definitions.

/// Creates a record data type that consists of a single domain name.
///
/// The name may be compressed when composing, as RFC 1035 allows for all
/// its record types. The arguments are the type name, the record type
/// variant, the field name, and the name of the method consuming the value
/// and returning the name.
macro_rules! name_type_well_known {
    ($(#[$attr:meta])* (
        $target:ident, $rtype:ident, $field:ident, $into_field:ident
    ) ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        pub struct $target {
            $field: $crate::base::name::Name,
        }

        impl $target {
            /// The rtype of this record data type.
            pub(crate) const RTYPE: $crate::base::iana::Rtype =
                $crate::base::iana::Rtype::$rtype;

            pub fn new($field: $crate::base::name::Name) -> Self {
                $target { $field }
            }

            pub fn $field(&self) -> &$crate::base::name::Name {
                &self.$field
            }

            pub fn $into_field(self) -> $crate::base::name::Name {
                self.$field
            }

            pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
                parser: &mut octseq::parse::Parser<'_, Octs>,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                $crate::base::name::Name::parse(parser).map(Self::new)
            }

            pub fn scan<S: $crate::base::scan::Scanner>(
                scanner: &mut S,
            ) -> Result<Self, S::Error> {
                scanner.scan_name(stringify!($field)).map(Self::new)
            }
        }

        //--- From and FromStr

        impl From<$crate::base::name::Name> for $target {
            fn from(name: $crate::base::name::Name) -> Self {
                Self::new(name)
            }
        }

        impl core::str::FromStr for $target {
            type Err = $crate::base::name::NameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$crate::base::name::Name as core::str::FromStr>::from_str(s)
                    .map(Self::new)
            }
        }

        //--- RecordData, ParseRecordData, ComposeRecordData

        impl $crate::base::rdata::RecordData for $target {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                $target::RTYPE
            }
        }

        impl<'a, Octs> $crate::base::rdata::ParseRecordData<'a, Octs>
        for $target
        where Octs: AsRef<[u8]> + ?Sized {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<'a, Octs>,
                _rdlen: u16,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                if rtype == $target::RTYPE {
                    Self::parse(parser).map(Some)
                } else {
                    Ok(None)
                }
            }
        }

        impl $crate::base::rdata::ComposeRecordData for $target {
            fn rdlen(&self, compress: bool) -> Option<u16> {
                if compress {
                    None
                } else {
                    Some(self.$field.compose_len())
                }
            }

            fn compose_rdata<Target: $crate::base::wire::Composer + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                target.append_compressed_name(&self.$field)
            }

            fn compose_canonical_rdata<
                Target: $crate::base::wire::Composer + ?Sized
            >(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                self.$field.compose_canonical(target)
            }
        }

        //--- Display and ZonefileFmt

        impl core::fmt::Display for $target {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.$field, f)
            }
        }

        impl $crate::base::zonefile_fmt::ZonefileFmt for $target {
            fn fmt(
                &self,
                p: &mut impl $crate::base::zonefile_fmt::Formatter,
            ) -> $crate::base::zonefile_fmt::Result {
                p.write_token(&self.$field)
            }
        }
    }
}

/// Creates the re-exports and the [`ZoneRecordData`] enum.
///
/// The macro takes a list of modules, each with the record data types it
/// defines. Each type needs to provide a `RTYPE` constant, `scan` function,
/// and implement the record data traits.
///
/// [`ZoneRecordData`]: crate::rdata::ZoneRecordData
macro_rules! rdata_types {
    ( $(
        $module:ident::{
            $( $mtype:ident, )*
        }
    )* ) => {
        $(
            pub use self::$module::{ $( $mtype, )* };
        )*

        //------------- ZoneRecordData ---------------------------------------

        /// Record data for all record types allowed in zone files.
        ///
        /// This enum collects the record data types for all currently
        /// implemented record types. Record types without a type of their
        /// own end up in the `Unknown` variant which keeps the record data
        /// in its raw, encoded form.
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        #[non_exhaustive]
        pub enum ZoneRecordData {
            $( $(
                $mtype($mtype),
            )* )*
            Unknown($crate::base::rdata::UnknownRecordData),
        }

        impl ZoneRecordData {
            /// Scans the record data of a record of type `rtype`.
            ///
            /// Record types that are not known are expected in the
            /// generic representation format of RFC 3597.
            pub fn scan<S: $crate::base::scan::Scanner>(
                rtype: $crate::base::iana::Rtype,
                scanner: &mut S,
            ) -> Result<Self, S::Error> {
                match rtype {
                    $( $(
                        $mtype::RTYPE => {
                            $mtype::scan(scanner).map(ZoneRecordData::$mtype)
                        }
                    )* )*
                    _ => {
                        $crate::base::rdata::UnknownRecordData::scan(
                            rtype, scanner
                        ).map(ZoneRecordData::Unknown)
                    }
                }
            }
        }

        //--- From

        $( $(
            impl From<$mtype> for ZoneRecordData {
                fn from(value: $mtype) -> Self {
                    ZoneRecordData::$mtype(value)
                }
            }
        )* )*

        impl From<$crate::base::rdata::UnknownRecordData> for ZoneRecordData {
            fn from(value: $crate::base::rdata::UnknownRecordData) -> Self {
                ZoneRecordData::Unknown(value)
            }
        }

        //--- RecordData, ParseRecordData, and ComposeRecordData

        impl $crate::base::rdata::RecordData for ZoneRecordData {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                match *self {
                    $( $(
                        ZoneRecordData::$mtype(ref inner) => {
                            $crate::base::rdata::RecordData::rtype(inner)
                        }
                    )* )*
                    ZoneRecordData::Unknown(ref inner) => inner.rtype(),
                }
            }
        }

        impl<'a, Octs: AsRef<[u8]> + ?Sized>
        $crate::base::rdata::ParseRecordData<'a, Octs>
        for ZoneRecordData {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<'a, Octs>,
                rdlen: u16,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                use $crate::base::rdata::ParseRecordData;

                match rtype {
                    $( $(
                        $mtype::RTYPE => {
                            Ok($mtype::parse_rdata(
                                rtype, parser, rdlen
                            )?.map(ZoneRecordData::$mtype))
                        }
                    )* )*
                    _ => {
                        tracing::trace!(
                            rtype = %rtype,
                            rdlen = rdlen,
                            "keeping record data of unknown type"
                        );
                        Ok($crate::base::rdata::UnknownRecordData::parse_rdata(
                            rtype, parser, rdlen
                        )?.map(ZoneRecordData::Unknown))
                    }
                }
            }
        }

        impl $crate::base::rdata::ComposeRecordData for ZoneRecordData {
            fn rdlen(&self, compress: bool) -> Option<u16> {
                match *self {
                    $( $(
                        ZoneRecordData::$mtype(ref inner) => {
                            inner.rdlen(compress)
                        }
                    )* )*
                    ZoneRecordData::Unknown(ref inner) => {
                        inner.rdlen(compress)
                    }
                }
            }

            fn compose_rdata<Target: $crate::base::wire::Composer + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                match *self {
                    $( $(
                        ZoneRecordData::$mtype(ref inner) => {
                            inner.compose_rdata(target)
                        }
                    )* )*
                    ZoneRecordData::Unknown(ref inner) => {
                        inner.compose_rdata(target)
                    }
                }
            }

            fn compose_canonical_rdata<
                Target: $crate::base::wire::Composer + ?Sized
            >(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                match *self {
                    $( $(
                        ZoneRecordData::$mtype(ref inner) => {
                            inner.compose_canonical_rdata(target)
                        }
                    )* )*
                    ZoneRecordData::Unknown(ref inner) => {
                        inner.compose_canonical_rdata(target)
                    }
                }
            }
        }

        //--- ZonefileFmt and Display

        impl $crate::base::zonefile_fmt::ZonefileFmt for ZoneRecordData {
            fn fmt(
                &self,
                p: &mut impl $crate::base::zonefile_fmt::Formatter,
            ) -> $crate::base::zonefile_fmt::Result {
                match *self {
                    $( $(
                        ZoneRecordData::$mtype(ref inner) => {
                            p.write_show(inner)
                        }
                    )* )*
                    ZoneRecordData::Unknown(ref inner) => p.write_show(inner),
                }
            }
        }

        impl core::fmt::Display for ZoneRecordData {
            fn fmt(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                core::fmt::Display::fmt(
                    &$crate::base::zonefile_fmt::ZonefileFmt::display_zonefile(
                        self, false
                    ),
                    f,
                )
            }
        }
    }
}
