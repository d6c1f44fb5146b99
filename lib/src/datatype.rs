//! XML Schema datatypes and their derivation lattice.
//!
//! Built-in datatypes are variants of [`Datatype`]; every other datatype IRI is
//! carried by [`Datatype::Custom`] together with its (optional) parent, so a
//! user-defined type derived from e.g. `xsd:int` still validates like an int.

use crate::consts::XSD_NS;
use crate::errors::Result;
use crate::uri::Uri;
use crate::xsd;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub enum Datatype {
    String,
    NormalizedString,
    Token,
    Language,
    Name,
    NcName,
    NmToken,
    NmTokens,
    Id,
    IdRef,
    IdRefs,
    Entity,
    Entities,
    QName,
    AnyUri,
    Boolean,
    Decimal,
    Integer,
    NonPositiveInteger,
    NegativeInteger,
    Long,
    Int,
    Short,
    Byte,
    NonNegativeInteger,
    UnsignedLong,
    UnsignedInt,
    UnsignedShort,
    UnsignedByte,
    PositiveInteger,
    Double,
    Float,
    HexBinary,
    Base64Binary,
    Duration,
    DateTime,
    Date,
    Time,
    GYearMonth,
    GYear,
    GMonthDay,
    GMonth,
    GDay,
    Custom(Box<CustomDatatype>),
}

/// A datatype outside the XML Schema built-ins.
#[derive(Debug, Clone)]
pub struct CustomDatatype {
    uri: Uri,
    derived_from: Option<Datatype>,
    is_list: bool,
}

pub static BUILTIN_DATATYPES: [Datatype; 43] = [
    Datatype::String,
    Datatype::NormalizedString,
    Datatype::Token,
    Datatype::Language,
    Datatype::Name,
    Datatype::NcName,
    Datatype::NmToken,
    Datatype::NmTokens,
    Datatype::Id,
    Datatype::IdRef,
    Datatype::IdRefs,
    Datatype::Entity,
    Datatype::Entities,
    Datatype::QName,
    Datatype::AnyUri,
    Datatype::Boolean,
    Datatype::Decimal,
    Datatype::Integer,
    Datatype::NonPositiveInteger,
    Datatype::NegativeInteger,
    Datatype::Long,
    Datatype::Int,
    Datatype::Short,
    Datatype::Byte,
    Datatype::NonNegativeInteger,
    Datatype::UnsignedLong,
    Datatype::UnsignedInt,
    Datatype::UnsignedShort,
    Datatype::UnsignedByte,
    Datatype::PositiveInteger,
    Datatype::Double,
    Datatype::Float,
    Datatype::HexBinary,
    Datatype::Base64Binary,
    Datatype::Duration,
    Datatype::DateTime,
    Datatype::Date,
    Datatype::Time,
    Datatype::GYearMonth,
    Datatype::GYear,
    Datatype::GMonthDay,
    Datatype::GMonth,
    Datatype::GDay,
];

impl Datatype {
    /// Declares a datatype that is not an XML Schema built-in. When `uri` names
    /// a built-in, the built-in is returned instead.
    pub fn custom(uri: Uri, derived_from: Option<Datatype>, is_list: bool) -> Self {
        if let Some(builtin) = Datatype::builtin_for_iri(uri.as_str()) {
            return builtin;
        }
        Datatype::Custom(Box::new(CustomDatatype {
            uri,
            derived_from,
            is_list,
        }))
    }

    /// Resolves a full IRI, an `xsd:`-prefixed name or `<iri>` to a datatype.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s
            .strip_prefix('<')
            .and_then(|inner| inner.strip_suffix('>'))
            .unwrap_or(s);
        if let Some(builtin) = Datatype::builtin_for_iri(s) {
            return Ok(builtin);
        }
        Ok(Datatype::custom(Uri::parse(s)?, None, false))
    }

    fn builtin_for_iri(s: &str) -> Option<Self> {
        let local = s
            .strip_prefix(XSD_NS)
            .or_else(|| s.strip_prefix("xsd:"))?;
        Datatype::from_local_name(local)
    }

    /// Looks up a built-in by its XML Schema local name (`int`, `gYear`, ...).
    pub fn from_local_name(local: &str) -> Option<Self> {
        BUILTIN_DATATYPES
            .iter()
            .find(|dt| dt.local_name() == Some(local))
            .cloned()
    }

    pub fn local_name(&self) -> Option<&'static str> {
        let name = match self {
            Datatype::String => "string",
            Datatype::NormalizedString => "normalizedString",
            Datatype::Token => "token",
            Datatype::Language => "language",
            Datatype::Name => "Name",
            Datatype::NcName => "NCName",
            Datatype::NmToken => "NMTOKEN",
            Datatype::NmTokens => "NMTOKENS",
            Datatype::Id => "ID",
            Datatype::IdRef => "IDREF",
            Datatype::IdRefs => "IDREFS",
            Datatype::Entity => "ENTITY",
            Datatype::Entities => "ENTITIES",
            Datatype::QName => "QName",
            Datatype::AnyUri => "anyURI",
            Datatype::Boolean => "boolean",
            Datatype::Decimal => "decimal",
            Datatype::Integer => "integer",
            Datatype::NonPositiveInteger => "nonPositiveInteger",
            Datatype::NegativeInteger => "negativeInteger",
            Datatype::Long => "long",
            Datatype::Int => "int",
            Datatype::Short => "short",
            Datatype::Byte => "byte",
            Datatype::NonNegativeInteger => "nonNegativeInteger",
            Datatype::UnsignedLong => "unsignedLong",
            Datatype::UnsignedInt => "unsignedInt",
            Datatype::UnsignedShort => "unsignedShort",
            Datatype::UnsignedByte => "unsignedByte",
            Datatype::PositiveInteger => "positiveInteger",
            Datatype::Double => "double",
            Datatype::Float => "float",
            Datatype::HexBinary => "hexBinary",
            Datatype::Base64Binary => "base64Binary",
            Datatype::Duration => "duration",
            Datatype::DateTime => "dateTime",
            Datatype::Date => "date",
            Datatype::Time => "time",
            Datatype::GYearMonth => "gYearMonth",
            Datatype::GYear => "gYear",
            Datatype::GMonthDay => "gMonthDay",
            Datatype::GMonth => "gMonth",
            Datatype::GDay => "gDay",
            Datatype::Custom(_) => return None,
        };
        Some(name)
    }

    /// The full datatype IRI.
    pub fn iri(&self) -> &str {
        match self {
            Datatype::String => xsd!("string"),
            Datatype::NormalizedString => xsd!("normalizedString"),
            Datatype::Token => xsd!("token"),
            Datatype::Language => xsd!("language"),
            Datatype::Name => xsd!("Name"),
            Datatype::NcName => xsd!("NCName"),
            Datatype::NmToken => xsd!("NMTOKEN"),
            Datatype::NmTokens => xsd!("NMTOKENS"),
            Datatype::Id => xsd!("ID"),
            Datatype::IdRef => xsd!("IDREF"),
            Datatype::IdRefs => xsd!("IDREFS"),
            Datatype::Entity => xsd!("ENTITY"),
            Datatype::Entities => xsd!("ENTITIES"),
            Datatype::QName => xsd!("QName"),
            Datatype::AnyUri => xsd!("anyURI"),
            Datatype::Boolean => xsd!("boolean"),
            Datatype::Decimal => xsd!("decimal"),
            Datatype::Integer => xsd!("integer"),
            Datatype::NonPositiveInteger => xsd!("nonPositiveInteger"),
            Datatype::NegativeInteger => xsd!("negativeInteger"),
            Datatype::Long => xsd!("long"),
            Datatype::Int => xsd!("int"),
            Datatype::Short => xsd!("short"),
            Datatype::Byte => xsd!("byte"),
            Datatype::NonNegativeInteger => xsd!("nonNegativeInteger"),
            Datatype::UnsignedLong => xsd!("unsignedLong"),
            Datatype::UnsignedInt => xsd!("unsignedInt"),
            Datatype::UnsignedShort => xsd!("unsignedShort"),
            Datatype::UnsignedByte => xsd!("unsignedByte"),
            Datatype::PositiveInteger => xsd!("positiveInteger"),
            Datatype::Double => xsd!("double"),
            Datatype::Float => xsd!("float"),
            Datatype::HexBinary => xsd!("hexBinary"),
            Datatype::Base64Binary => xsd!("base64Binary"),
            Datatype::Duration => xsd!("duration"),
            Datatype::DateTime => xsd!("dateTime"),
            Datatype::Date => xsd!("date"),
            Datatype::Time => xsd!("time"),
            Datatype::GYearMonth => xsd!("gYearMonth"),
            Datatype::GYear => xsd!("gYear"),
            Datatype::GMonthDay => xsd!("gMonthDay"),
            Datatype::GMonth => xsd!("gMonth"),
            Datatype::GDay => xsd!("gDay"),
            Datatype::Custom(custom) => custom.uri.as_str(),
        }
    }

    pub fn uri(&self) -> Uri {
        match self {
            Datatype::Custom(custom) => custom.uri.clone(),
            builtin => Uri::known(builtin.iri()),
        }
    }

    /// `xsd:<name>` for built-ins.
    pub fn short_name(&self) -> Option<String> {
        self.local_name().map(|local| format!("xsd:{}", local))
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Datatype::Custom(_))
    }

    /// The parent in the derivation lattice. For list types this is the item type.
    pub fn derived_from(&self) -> Option<Datatype> {
        let parent = match self {
            Datatype::NormalizedString => Datatype::String,
            Datatype::Token => Datatype::NormalizedString,
            Datatype::Language | Datatype::Name | Datatype::NmToken => Datatype::Token,
            Datatype::NcName => Datatype::Name,
            Datatype::Id | Datatype::IdRef | Datatype::Entity => Datatype::NcName,
            Datatype::NmTokens => Datatype::NmToken,
            Datatype::IdRefs => Datatype::IdRef,
            Datatype::Entities => Datatype::Entity,
            Datatype::Integer => Datatype::Decimal,
            Datatype::NonPositiveInteger => Datatype::Integer,
            Datatype::NegativeInteger => Datatype::NonPositiveInteger,
            Datatype::Long => Datatype::Integer,
            Datatype::Int => Datatype::Long,
            Datatype::Short => Datatype::Int,
            Datatype::Byte => Datatype::Short,
            Datatype::NonNegativeInteger => Datatype::Integer,
            Datatype::UnsignedLong => Datatype::NonNegativeInteger,
            Datatype::UnsignedInt => Datatype::UnsignedLong,
            Datatype::UnsignedShort => Datatype::UnsignedInt,
            Datatype::UnsignedByte => Datatype::UnsignedShort,
            Datatype::PositiveInteger => Datatype::NonNegativeInteger,
            Datatype::Custom(custom) => return custom.derived_from.clone(),
            _ => return None,
        };
        Some(parent)
    }

    pub fn is_list_datatype(&self) -> bool {
        match self {
            Datatype::NmTokens | Datatype::IdRefs | Datatype::Entities => true,
            Datatype::Custom(custom) => custom.is_list,
            _ => false,
        }
    }

    /// Walks the parent chain; `self` itself is not included.
    pub fn ancestors(&self) -> Vec<Datatype> {
        let mut chain = Vec::new();
        let mut current = self.derived_from();
        while let Some(dt) = current {
            // a custom chain could loop back on itself
            if chain.contains(&dt) || dt == *self {
                break;
            }
            current = dt.derived_from();
            chain.push(dt);
        }
        chain
    }

    pub fn is_derived_from(&self, ancestor: &Datatype) -> bool {
        self.ancestors().iter().any(|dt| dt == ancestor)
    }

    /// The nearest built-in in the derivation chain, starting with `self`.
    pub fn builtin_base(&self) -> Option<Datatype> {
        if self.is_builtin() {
            return Some(self.clone());
        }
        self.ancestors().into_iter().find(|dt| dt.is_builtin())
    }

    pub fn is_numeric(&self) -> bool {
        match self.builtin_base() {
            Some(Datatype::Double | Datatype::Float) => true,
            Some(base) => base == Datatype::Decimal || base.is_derived_from(&Datatype::Decimal),
            None => false,
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Datatype::Duration
                | Datatype::DateTime
                | Datatype::Date
                | Datatype::Time
                | Datatype::GYearMonth
                | Datatype::GYear
                | Datatype::GMonthDay
                | Datatype::GMonth
                | Datatype::GDay
        )
    }

    /// Notation used after `^^` in SPARQL: `xsd:<name>` or `<iri>`.
    pub fn sparql(&self) -> String {
        self.short_name()
            .unwrap_or_else(|| format!("<{}>", self.iri()))
    }
}

impl PartialEq for Datatype {
    fn eq(&self, other: &Self) -> bool {
        self.iri() == other.iri()
    }
}

impl Eq for Datatype {}

impl Hash for Datatype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iri().hash(state);
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.short_name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.iri()),
        }
    }
}

impl From<Uri> for Datatype {
    fn from(uri: Uri) -> Self {
        Datatype::custom(uri, None, false)
    }
}

impl Serialize for Datatype {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.iri())
    }
}

impl<'de> Deserialize<'de> for Datatype {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Datatype::parse(&s).map_err(serde::de::Error::custom)
    }
}
