//! Typed literals.
//!
//! A [`Literal`] is a lexical form plus an optional datatype and language tag.
//! Construction validates the lexical form against the datatype (or the nearest
//! built-in ancestor of a custom datatype), rewrites it to the canonical form,
//! and fills every typed projection the value fits into: an `xsd:short` of `7`
//! can still be read back as an `i8`, a `u64` or a `Decimal`.

use crate::datatype::Datatype;
use crate::decimal::Decimal;
use crate::duration::Duration;
use crate::errors::{RdfError, Result};
use crate::gregorian::{DateKind, GregorianDate};
use crate::namespace::NamespaceTable;
use crate::uri::Uri;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};

lazy_static! {
    static ref LANGUAGE: Regex =
        Regex::new(r"^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$").expect("language pattern compiles");
    static ref NAME: Regex =
        Regex::new(r"^[\p{L}_:][\p{L}\p{N}._:\-]*$").expect("Name pattern compiles");
    static ref NC_NAME: Regex =
        Regex::new(r"^[\p{L}_][\p{L}\p{N}._\-]*$").expect("NCName pattern compiles");
    static ref NM_TOKEN: Regex =
        Regex::new(r"^[\p{L}\p{N}._:\-]+$").expect("NMTOKEN pattern compiles");
    static ref QNAME: Regex =
        Regex::new(r"^(?:[\p{L}_][\p{L}\p{N}._\-]*:)?[\p{L}_][\p{L}\p{N}._\-]*$")
            .expect("QName pattern compiles");
    static ref INTEGER: Regex = Regex::new(r"^[+-]?\d+$").expect("integer pattern compiles");
    static ref DECIMAL: Regex =
        Regex::new(r"^[+-]?(\d+\.\d*|\.\d+)$").expect("decimal pattern compiles");
    static ref DOUBLE: Regex =
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("double pattern compiles");
    static ref EXPONENTIAL: Regex =
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)[eE][+-]?\d+$").expect("exponent pattern compiles");
}

/// Typed views of a literal's value. A view is present when the value lies in
/// the range of that type, whatever the declared datatype.
#[derive(Debug, Clone, Default)]
struct Projections {
    decimal: Option<Decimal>,
    integer: Option<i64>,
    long: Option<i64>,
    int: Option<i32>,
    short: Option<i16>,
    byte: Option<i8>,
    unsigned_long: Option<u64>,
    unsigned_int: Option<u32>,
    unsigned_short: Option<u16>,
    unsigned_byte: Option<u8>,
    non_negative_integer: Option<u64>,
    positive_integer: Option<u64>,
    non_positive_integer: Option<i64>,
    negative_integer: Option<i64>,
    double: Option<f64>,
    float: Option<f32>,
    boolean: Option<bool>,
    duration: Option<Duration>,
    date: Option<GregorianDate>,
    uri: Option<Uri>,
}

impl Projections {
    fn of_integer(value: i128) -> Self {
        let signed = i64::try_from(value).ok();
        let unsigned = u64::try_from(value).ok();
        Projections {
            decimal: signed.map(Decimal::from_integer),
            integer: signed,
            long: signed,
            int: i32::try_from(value).ok(),
            short: i16::try_from(value).ok(),
            byte: i8::try_from(value).ok(),
            unsigned_long: unsigned,
            unsigned_int: u32::try_from(value).ok(),
            unsigned_short: u16::try_from(value).ok(),
            unsigned_byte: u8::try_from(value).ok(),
            non_negative_integer: unsigned,
            positive_integer: unsigned.filter(|n| *n > 0),
            non_positive_integer: signed.filter(|n| *n <= 0),
            negative_integer: signed.filter(|n| *n < 0),
            double: Some(value as f64),
            ..Default::default()
        }
    }

    fn of_decimal(value: Decimal) -> Self {
        let mut projections = match value.to_i64() {
            Some(n) => Projections::of_integer(n as i128),
            None => Projections::default(),
        };
        projections.decimal = Some(value);
        projections.double = Some(value.to_f64());
        projections
    }

    fn of_double(value: f64) -> Self {
        let narrowed = value as f32;
        Projections {
            double: Some(value),
            float: (narrowed.is_finite() || !value.is_finite()).then_some(narrowed),
            ..Default::default()
        }
    }
}

/// Inclusive bounds of the integer-derived built-ins.
fn integer_range(datatype: &Datatype) -> Option<(i128, i128)> {
    let range = match datatype {
        Datatype::Integer => (i64::MIN as i128, u64::MAX as i128),
        Datatype::Long => (i64::MIN as i128, i64::MAX as i128),
        Datatype::Int => (i32::MIN as i128, i32::MAX as i128),
        Datatype::Short => (i16::MIN as i128, i16::MAX as i128),
        Datatype::Byte => (i8::MIN as i128, i8::MAX as i128),
        Datatype::UnsignedLong | Datatype::NonNegativeInteger => (0, u64::MAX as i128),
        Datatype::UnsignedInt => (0, u32::MAX as i128),
        Datatype::UnsignedShort => (0, u16::MAX as i128),
        Datatype::UnsignedByte => (0, u8::MAX as i128),
        Datatype::PositiveInteger => (1, u64::MAX as i128),
        Datatype::NonPositiveInteger => (i64::MIN as i128, 0),
        Datatype::NegativeInteger => (i64::MIN as i128, -1),
        _ => return None,
    };
    Some(range)
}

fn parse_integer(text: &str, datatype: &Datatype) -> Result<i128> {
    let fail = |reason: String| RdfError::malformed_literal(text, datatype.to_string(), reason);
    if !INTEGER.is_match(text) {
        return Err(fail("not an integer".to_string()));
    }
    let digits = text
        .trim_start_matches(|c: char| c == '+' || c == '-')
        .trim_start_matches('0');
    // anything longer is outside every supported range
    if digits.len() > 20 {
        return Err(fail("out of range".to_string()));
    }
    let value: i128 = text
        .parse()
        .map_err(|_| fail("not an integer".to_string()))?;
    let (min, max) = integer_range(datatype).unwrap_or((i64::MIN as i128, u64::MAX as i128));
    if value < min || value > max {
        return Err(fail(format!("outside [{}, {}]", min, max)));
    }
    Ok(value)
}

fn parse_double(text: &str, datatype: &Datatype) -> Result<f64> {
    match text {
        "INF" | "+INF" => return Ok(f64::INFINITY),
        "-INF" => return Ok(f64::NEG_INFINITY),
        "NaN" => return Ok(f64::NAN),
        _ => {}
    }
    if !DOUBLE.is_match(text) {
        return Err(RdfError::malformed_literal(
            text,
            datatype.to_string(),
            "not a floating point number",
        ));
    }
    text.parse::<f64>().map_err(|e| {
        RdfError::malformed_literal(text, datatype.to_string(), e.to_string())
    })
}

/// Canonical double: one leading mantissa digit, signed exponent (`1.5E+2`).
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let text = format!("{:E}", value);
    let (mantissa, exponent) = text.split_once('E').unwrap_or((text.as_str(), "0"));
    let mantissa = if mantissa.contains('.') {
        mantissa.to_string()
    } else {
        format!("{}.0", mantissa)
    };
    if exponent.starts_with('-') {
        format!("{}E{}", mantissa, exponent)
    } else {
        format!("{}E+{}", mantissa, exponent)
    }
}

pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        value.to_string()
    }
}

fn check_string(text: &str, datatype: &Datatype) -> Result<()> {
    if text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    {
        return Err(RdfError::invalid_lexical(text, datatype.to_string()));
    }
    Ok(())
}

fn check_normalized(text: &str, datatype: &Datatype) -> Result<()> {
    check_string(text, datatype)?;
    if text.contains(|c: char| matches!(c, '\t' | '\n' | '\r')) {
        return Err(RdfError::invalid_lexical(text, datatype.to_string()));
    }
    Ok(())
}

fn check_token(text: &str, datatype: &Datatype) -> Result<()> {
    check_normalized(text, datatype)?;
    if text.starts_with(' ') || text.ends_with(' ') || text.contains("  ") {
        return Err(RdfError::invalid_lexical(text, datatype.to_string()));
    }
    Ok(())
}

fn check_pattern(text: &str, pattern: &Regex, datatype: &Datatype) -> Result<()> {
    if pattern.is_match(text) {
        Ok(())
    } else {
        Err(RdfError::invalid_lexical(text, datatype.to_string()))
    }
}

/// Validates `text` against a built-in datatype, returning the canonical
/// lexical form and the typed views.
fn parse_builtin(text: &str, datatype: &Datatype) -> Result<(String, Projections)> {
    let trimmed = text.trim();
    let raw = || (text.to_string(), Projections::default());
    match datatype {
        Datatype::String => check_string(text, datatype).map(|_| raw()),
        Datatype::NormalizedString => check_normalized(text, datatype).map(|_| raw()),
        Datatype::Token => check_token(text, datatype).map(|_| raw()),
        Datatype::Language => check_pattern(text, &LANGUAGE, datatype).map(|_| raw()),
        Datatype::Name => check_pattern(text, &NAME, datatype).map(|_| raw()),
        Datatype::NcName | Datatype::Id | Datatype::IdRef | Datatype::Entity => {
            check_pattern(text, &NC_NAME, datatype).map(|_| raw())
        }
        Datatype::NmToken => check_pattern(text, &NM_TOKEN, datatype).map(|_| raw()),
        Datatype::QName => check_pattern(text, &QNAME, datatype).map(|_| raw()),
        Datatype::AnyUri => {
            let uri = Uri::parse(trimmed)?;
            Ok((
                uri.as_str().to_string(),
                Projections {
                    uri: Some(uri),
                    ..Default::default()
                },
            ))
        }
        Datatype::Boolean => {
            let value = match trimmed {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(RdfError::malformed_literal(
                        text,
                        datatype.to_string(),
                        "expected true, false, 1 or 0",
                    ))
                }
            };
            Ok((
                value.to_string(),
                Projections {
                    boolean: Some(value),
                    ..Default::default()
                },
            ))
        }
        Datatype::Decimal => {
            let value = Decimal::parse(trimmed)?;
            Ok((value.to_string(), Projections::of_decimal(value)))
        }
        Datatype::Double => {
            let value = parse_double(trimmed, datatype)?;
            Ok((format_double(value), Projections::of_double(value)))
        }
        Datatype::Float => {
            let value = parse_double(trimmed, datatype)? as f32;
            if value.is_infinite() && !trimmed.contains("INF") {
                return Err(RdfError::malformed_literal(
                    text,
                    datatype.to_string(),
                    "outside the range of a 32-bit float",
                ));
            }
            let mut projections = Projections::of_double(value as f64);
            projections.float = Some(value);
            Ok((format_float(value), projections))
        }
        Datatype::HexBinary => match hex::decode(trimmed) {
            Ok(_) => Ok((trimmed.to_string(), Projections::default())),
            Err(_) => Err(RdfError::invalid_lexical(text, datatype.to_string())),
        },
        Datatype::Base64Binary => {
            let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
            match STANDARD.decode(compact.as_bytes()) {
                Ok(_) => Ok((compact, Projections::default())),
                Err(_) => Err(RdfError::invalid_lexical(text, datatype.to_string())),
            }
        }
        Datatype::Duration => {
            let value = Duration::parse(trimmed)?;
            Ok((
                value.to_string(),
                Projections {
                    duration: Some(value),
                    ..Default::default()
                },
            ))
        }
        dt if integer_range(dt).is_some() => {
            let value = parse_integer(trimmed, dt)?;
            Ok((value.to_string(), Projections::of_integer(value)))
        }
        dt => match DateKind::from_datatype(dt) {
            Some(kind) => {
                let value = GregorianDate::parse_as(kind, trimmed)?;
                Ok((
                    value.to_string(),
                    Projections {
                        date: Some(value),
                        ..Default::default()
                    },
                ))
            }
            // list types are split before reaching here
            None => Ok(raw()),
        },
    }
}

fn parse_lexical(text: &str, datatype: &Datatype) -> Result<(String, Projections)> {
    if datatype.is_list_datatype() {
        let items: Vec<&str> = text.split_whitespace().collect();
        if items.is_empty() {
            return Err(RdfError::invalid_lexical(text, datatype.to_string()));
        }
        if let Some(item_type) = datatype.derived_from() {
            for item in &items {
                parse_lexical(item, &item_type)?;
            }
        }
        return Ok((items.join(" "), Projections::default()));
    }
    match datatype.builtin_base() {
        Some(base) if base == *datatype => parse_builtin(text, datatype),
        Some(base) => parse_lexical(text, &base),
        None => Ok((text.to_string(), Projections::default())),
    }
}

#[derive(Debug, Clone)]
pub struct Literal {
    string_value: String,
    datatype: Option<Datatype>,
    language: Option<String>,
    projections: Projections,
}

impl Literal {
    /// Validates `text` against `datatype` and builds the literal. `None`
    /// makes a plain literal.
    pub fn new(text: &str, datatype: Option<Datatype>) -> Result<Self> {
        let (string_value, projections) = match &datatype {
            None => {
                check_string(text, &Datatype::String)?;
                (text.to_string(), Projections::default())
            }
            Some(dt) => parse_lexical(text, dt).map_err(|e| {
                debug!("rejecting literal {:?} as {}: {}", text, dt, e);
                e
            })?,
        };
        Ok(Literal {
            string_value,
            datatype,
            language: None,
            projections,
        })
    }

    /// Like [`Literal::new`], but a structurally invalid lexical form yields
    /// `Ok(None)`; numeric and temporal parse failures are still errors.
    pub fn try_new(text: &str, datatype: Option<Datatype>) -> Result<Option<Self>> {
        match Literal::new(text, datatype) {
            Ok(literal) => Ok(Some(literal)),
            Err(e) if e.is_structural() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// A language-tagged string; the datatype is always `xsd:string`.
    pub fn with_language(text: &str, language: &str) -> Result<Self> {
        check_pattern(language, &LANGUAGE, &Datatype::Language)?;
        let mut literal = Literal::new(text, Some(Datatype::String))?;
        literal.language = Some(language.to_string());
        Ok(literal)
    }

    fn from_parts(string_value: String, datatype: Datatype, projections: Projections) -> Self {
        Literal {
            string_value,
            datatype: Some(datatype),
            language: None,
            projections,
        }
    }

    /// Parses SPARQL literal notation: `"text"`, `'text'`, triple quoted
    /// forms, `"text"@lang`, `"text"^^xsd:int`, `"text"^^<iri>`, `"text"^^p:dt`
    /// (resolved through `namespaces`), and the bare forms `12`, `1.5`,
    /// `1.5E3`, `true` and `false`. Other bare text is a plain literal.
    pub fn from_sparql(s: &str, namespaces: Option<&NamespaceTable>) -> Result<Self> {
        let text = s.trim();
        let quote = match text.chars().next() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Literal::from_bare(text),
        };
        let (content, rest) = split_quoted(text, quote)?;
        if rest.is_empty() {
            Literal::new(&content, None)
        } else if let Some(language) = rest.strip_prefix('@') {
            Literal::with_language(&content, language)
        } else if let Some(datatype) = rest.strip_prefix("^^") {
            let datatype = resolve_datatype(datatype, namespaces)?;
            Literal::new(&content, Some(datatype))
        } else {
            Err(RdfError::malformed_literal(
                s,
                "literal",
                format!("unexpected text after closing quote: {}", rest),
            ))
        }
    }

    fn from_bare(text: &str) -> Result<Self> {
        if INTEGER.is_match(text) {
            Literal::new(text, Some(Datatype::Integer))
        } else if DECIMAL.is_match(text) {
            Literal::new(text, Some(Datatype::Decimal))
        } else if EXPONENTIAL.is_match(text) {
            Literal::new(text, Some(Datatype::Double))
        } else if text == "true" || text == "false" {
            Literal::new(text, Some(Datatype::Boolean))
        } else {
            Literal::new(text, None)
        }
    }

    /// The canonical lexical form.
    pub fn string_value(&self) -> &str {
        &self.string_value
    }

    pub fn datatype(&self) -> Option<&Datatype> {
        self.datatype.as_ref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.datatype.is_none()
    }

    pub fn decimal(&self) -> Option<Decimal> {
        self.projections.decimal
    }

    pub fn integer(&self) -> Option<i64> {
        self.projections.integer
    }

    pub fn long(&self) -> Option<i64> {
        self.projections.long
    }

    pub fn int(&self) -> Option<i32> {
        self.projections.int
    }

    pub fn short(&self) -> Option<i16> {
        self.projections.short
    }

    pub fn byte(&self) -> Option<i8> {
        self.projections.byte
    }

    pub fn unsigned_long(&self) -> Option<u64> {
        self.projections.unsigned_long
    }

    pub fn unsigned_int(&self) -> Option<u32> {
        self.projections.unsigned_int
    }

    pub fn unsigned_short(&self) -> Option<u16> {
        self.projections.unsigned_short
    }

    pub fn unsigned_byte(&self) -> Option<u8> {
        self.projections.unsigned_byte
    }

    pub fn non_negative_integer(&self) -> Option<u64> {
        self.projections.non_negative_integer
    }

    pub fn positive_integer(&self) -> Option<u64> {
        self.projections.positive_integer
    }

    pub fn non_positive_integer(&self) -> Option<i64> {
        self.projections.non_positive_integer
    }

    pub fn negative_integer(&self) -> Option<i64> {
        self.projections.negative_integer
    }

    pub fn double(&self) -> Option<f64> {
        self.projections.double
    }

    pub fn float(&self) -> Option<f32> {
        self.projections.float
    }

    pub fn boolean(&self) -> Option<bool> {
        self.projections.boolean
    }

    pub fn duration(&self) -> Option<&Duration> {
        self.projections.duration.as_ref()
    }

    pub fn gregorian_date(&self) -> Option<&GregorianDate> {
        self.projections.date.as_ref()
    }

    pub fn any_uri(&self) -> Option<&Uri> {
        self.projections.uri.as_ref()
    }

    /// Decoded contents of a `hexBinary` or `base64Binary` literal.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        match self.datatype.as_ref()?.builtin_base()? {
            Datatype::HexBinary => hex::decode(&self.string_value).ok(),
            Datatype::Base64Binary => STANDARD.decode(self.string_value.as_bytes()).ok(),
            _ => None,
        }
    }

    /// SPARQL notation; [`Literal::from_sparql`] reads it back unchanged.
    pub fn sparql(&self) -> String {
        let quoted = || format!("\"{}\"", escape(&self.string_value));
        match &self.datatype {
            None => quoted(),
            Some(Datatype::String) => match &self.language {
                Some(language) => format!("{}@{}", quoted(), language),
                None => format!("{}^^xsd:string", quoted()),
            },
            Some(Datatype::Integer) | Some(Datatype::Boolean) => self.string_value.clone(),
            Some(Datatype::Double) if self.projections.double.map_or(false, f64::is_finite) => {
                self.string_value.clone()
            }
            Some(dt) => format!("{}^^{}", quoted(), dt.sparql()),
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

// Splits a quoted literal into its unescaped content and whatever follows the
// closing quote.
fn split_quoted(text: &str, quote: char) -> Result<(String, &str)> {
    let fail = |reason: &str| RdfError::malformed_literal(text, "literal", reason);
    let triple: String = std::iter::repeat(quote).take(3).collect();
    let (delimiter, body) = match text.strip_prefix(triple.as_str()) {
        Some(body) => (triple.as_str(), body),
        None => (&text[..1], &text[1..]),
    };

    let mut content = String::new();
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            let (_, escaped) = chars.next().ok_or_else(|| fail("dangling escape"))?;
            match escaped {
                't' => content.push('\t'),
                'b' => content.push('\u{8}'),
                'n' => content.push('\n'),
                'r' => content.push('\r'),
                'f' => content.push('\u{c}'),
                '"' | '\'' | '\\' => content.push(escaped),
                'u' | 'U' => {
                    let width = if escaped == 'u' { 4 } else { 8 };
                    let hex: String = chars.by_ref().take(width).map(|(_, c)| c).collect();
                    let code = u32::from_str_radix(&hex, 16)
                        .ok()
                        .filter(|_| hex.len() == width)
                        .and_then(char::from_u32)
                        .ok_or_else(|| fail("invalid unicode escape"))?;
                    content.push(code);
                }
                _ => return Err(fail("unknown escape")),
            }
        } else if body[i..].starts_with(delimiter) {
            return Ok((content, &body[i + delimiter.len()..]));
        } else {
            content.push(c);
        }
    }
    Err(fail("unterminated string"))
}

fn resolve_datatype(text: &str, namespaces: Option<&NamespaceTable>) -> Result<Datatype> {
    if text.starts_with('<') {
        return Datatype::parse(text);
    }
    if let Some(table) = namespaces {
        if let Ok(uri) = table.expand(text) {
            return Datatype::parse(uri.as_str());
        }
    }
    match text.split_once(':') {
        Some(("xsd", local)) => Datatype::from_local_name(local).ok_or_else(|| {
            RdfError::malformed_uri(text, "not an XML Schema datatype")
        }),
        Some((prefix, _)) => Err(RdfError::malformed_uri(
            text,
            format!("unknown prefix '{}'", prefix),
        )),
        None => Err(RdfError::malformed_uri(text, "not a datatype reference")),
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.string_value == other.string_value
            && self.datatype == other.datatype
            && self.language == other.language
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string_value.hash(state);
        self.datatype.hash(state);
        self.language.hash(state);
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sparql())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::from_parts(
            value.to_string(),
            Datatype::Integer,
            Projections::of_integer(value as i128),
        )
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::from_parts(
            value.to_string(),
            Datatype::Boolean,
            Projections {
                boolean: Some(value),
                ..Default::default()
            },
        )
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::from_parts(
            format_double(value),
            Datatype::Double,
            Projections::of_double(value),
        )
    }
}

impl From<Decimal> for Literal {
    fn from(value: Decimal) -> Self {
        Literal::from_parts(
            value.to_string(),
            Datatype::Decimal,
            Projections::of_decimal(value),
        )
    }
}

impl From<Duration> for Literal {
    fn from(value: Duration) -> Self {
        Literal::from_parts(
            value.to_string(),
            Datatype::Duration,
            Projections {
                duration: Some(value),
                ..Default::default()
            },
        )
    }
}

impl From<GregorianDate> for Literal {
    fn from(value: GregorianDate) -> Self {
        let datatype = value.datatype();
        Literal::from_parts(
            value.to_string(),
            datatype,
            Projections {
                date: Some(value),
                ..Default::default()
            },
        )
    }
}

impl From<Uri> for Literal {
    fn from(value: Uri) -> Self {
        Literal::from_parts(
            value.as_str().to_string(),
            Datatype::AnyUri,
            Projections {
                uri: Some(value),
                ..Default::default()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str, datatype: Datatype) -> Literal {
        Literal::new(text, Some(datatype)).unwrap()
    }

    #[test]
    fn test_short_cascade() {
        let lit = typed("-7", Datatype::Short);
        assert_eq!(lit.short(), Some(-7));
        assert_eq!(lit.byte(), Some(-7));
        assert_eq!(lit.long(), Some(-7));
        assert_eq!(lit.negative_integer(), Some(-7));
        assert_eq!(lit.unsigned_byte(), None);
        assert_eq!(lit.decimal(), Some(Decimal::from_integer(-7)));
        assert_eq!(lit.double(), Some(-7.0));
    }

    #[test]
    fn test_double_outside_float_range() {
        let huge = typed("1e300", Datatype::Double);
        assert_eq!(huge.double(), Some(1e300));
        assert_eq!(huge.float(), None);
        assert!(Literal::new("1e300", Some(Datatype::Float)).is_err());

        assert_eq!(typed("2.5", Datatype::Double).float(), Some(2.5));
        assert_eq!(typed("-INF", Datatype::Double).float(), Some(f32::NEG_INFINITY));
    }

    #[test]
    fn test_canonical_numeric_forms() {
        assert_eq!(typed("+0042", Datatype::Int).string_value(), "42");
        assert_eq!(typed("1.50", Datatype::Decimal).string_value(), "1.50");
        assert_eq!(typed("150", Datatype::Double).string_value(), "1.5E+2");
        assert_eq!(typed("0.001", Datatype::Double).string_value(), "1.0E-3");
        assert_eq!(typed("1", Datatype::Boolean).string_value(), "true");
        assert_eq!(typed("-INF", Datatype::Float).string_value(), "-INF");
    }

    #[test]
    fn test_structural_failures_yield_none() {
        assert!(Literal::try_new("a  b", Some(Datatype::Token)).unwrap().is_none());
        assert!(Literal::try_new("en_US", Some(Datatype::Language))
            .unwrap()
            .is_none());
        assert!(Literal::try_new("zz", Some(Datatype::HexBinary)).unwrap().is_none());
        assert!(Literal::try_new("a:b:c", Some(Datatype::QName)).unwrap().is_none());
        assert!(Literal::try_new("300", Some(Datatype::UnsignedByte)).is_err());
        assert!(Literal::try_new("1.5", Some(Datatype::Int)).is_err());
    }

    #[test]
    fn test_binary_keeps_encoded_text() {
        let hex = typed("CAFE", Datatype::HexBinary);
        assert_eq!(hex.string_value(), "CAFE");
        assert_eq!(hex.bytes().unwrap(), vec![0xCA, 0xFE]);

        let b64 = typed("aGVsbG8=", Datatype::Base64Binary);
        assert_eq!(b64.bytes().unwrap(), b"hello".to_vec());
    }

    #[test]
    fn test_list_types_check_each_item() {
        let tokens = typed("a  b\tc", Datatype::NmTokens);
        assert_eq!(tokens.string_value(), "a b c");
        assert!(Literal::new("a b!", Some(Datatype::NmTokens)).is_err());
        assert!(Literal::new("  ", Some(Datatype::IdRefs)).is_err());
    }

    #[test]
    fn test_custom_datatype_uses_builtin_ancestor() {
        let age = Datatype::custom(
            Uri::parse("http://example.org/age").unwrap(),
            Some(Datatype::UnsignedByte),
            false,
        );
        let lit = typed("+42", age.clone());
        assert_eq!(lit.string_value(), "42");
        assert_eq!(lit.unsigned_byte(), Some(42));
        assert_eq!(lit.sparql(), "\"42\"^^<http://example.org/age>");
        assert!(Literal::new("256", Some(age)).is_err());
    }

    #[test]
    fn test_sparql_forms() {
        assert_eq!(Literal::from(-123i64).sparql(), "-123");
        assert_eq!(Literal::from(true).sparql(), "true");
        assert_eq!(Literal::from(1.0f64).sparql(), "1.0E+0");
        assert_eq!(
            typed("123.45", Datatype::Decimal).sparql(),
            "\"123.45\"^^xsd:decimal"
        );
        assert_eq!(
            Literal::with_language("apple", "nl").unwrap().sparql(),
            "\"apple\"@nl"
        );
        assert_eq!(
            typed("say \"hi\"", Datatype::String).sparql(),
            "\"say \\\"hi\\\"\"^^xsd:string"
        );
        assert_eq!(
            typed("-5", Datatype::NonPositiveInteger).sparql(),
            "\"-5\"^^xsd:nonPositiveInteger"
        );
        assert_eq!(typed("NaN", Datatype::Double).sparql(), "\"NaN\"^^xsd:double");
    }

    #[test]
    fn test_from_sparql_bare_and_quoted() {
        assert_eq!(
            Literal::from_sparql("42", None).unwrap().datatype(),
            Some(&Datatype::Integer)
        );
        assert_eq!(
            Literal::from_sparql("4.2", None).unwrap().datatype(),
            Some(&Datatype::Decimal)
        );
        assert_eq!(
            Literal::from_sparql("4.2e1", None).unwrap().datatype(),
            Some(&Datatype::Double)
        );
        assert!(Literal::from_sparql("hello", None).unwrap().is_plain());

        let tagged = Literal::from_sparql("'appel'@nl", None).unwrap();
        assert_eq!(tagged.datatype(), Some(&Datatype::String));
        assert_eq!(tagged.language(), Some("nl"));

        let long = Literal::from_sparql("\"\"\"a \"quoted\" word\"\"\"", None).unwrap();
        assert_eq!(long.string_value(), "a \"quoted\" word");

        let escaped = Literal::from_sparql(r#""tab\thereA""#, None).unwrap();
        assert_eq!(escaped.string_value(), "tab\thereA");

        let mut table = NamespaceTable::new();
        table.add("ex", "http://example.org/", "ns");
        let custom = Literal::from_sparql("\"x\"^^ex:code", Some(&table)).unwrap();
        assert_eq!(custom.datatype().unwrap().iri(), "http://example.org/code");
        assert!(Literal::from_sparql("\"x\"^^ex:code", None).is_err());
        assert!(Literal::from_sparql("\"open", None).is_err());
    }
}
