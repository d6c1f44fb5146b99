use rdfgraph::uri::Uri;
use rdfgraph::{Datatype, Decimal, Literal, NamespaceTable};

fn typed(text: &str, datatype: Datatype) -> rdfgraph::Result<Literal> {
    Literal::new(text, Some(datatype))
}

#[test]
fn test_integer_width_bounds() {
    let cases: Vec<(Datatype, String, String, String, String)> = vec![
        (
            Datatype::Byte,
            i8::MIN.to_string(),
            i8::MAX.to_string(),
            "-129".into(),
            "128".into(),
        ),
        (
            Datatype::Short,
            i16::MIN.to_string(),
            i16::MAX.to_string(),
            "-32769".into(),
            "32768".into(),
        ),
        (
            Datatype::Int,
            i32::MIN.to_string(),
            i32::MAX.to_string(),
            "-2147483649".into(),
            "2147483648".into(),
        ),
        (
            Datatype::Long,
            i64::MIN.to_string(),
            i64::MAX.to_string(),
            "-9223372036854775809".into(),
            "9223372036854775808".into(),
        ),
        (
            Datatype::UnsignedByte,
            "0".into(),
            u8::MAX.to_string(),
            "-1".into(),
            "256".into(),
        ),
        (
            Datatype::UnsignedShort,
            "0".into(),
            u16::MAX.to_string(),
            "-1".into(),
            "65536".into(),
        ),
        (
            Datatype::UnsignedInt,
            "0".into(),
            u32::MAX.to_string(),
            "-1".into(),
            "4294967296".into(),
        ),
        (
            Datatype::UnsignedLong,
            "0".into(),
            u64::MAX.to_string(),
            "-1".into(),
            "18446744073709551616".into(),
        ),
        (
            Datatype::PositiveInteger,
            "1".into(),
            u64::MAX.to_string(),
            "0".into(),
            "18446744073709551616".into(),
        ),
        (
            Datatype::NegativeInteger,
            i64::MIN.to_string(),
            "-1".into(),
            "-9223372036854775809".into(),
            "0".into(),
        ),
        (
            Datatype::NonPositiveInteger,
            i64::MIN.to_string(),
            "0".into(),
            "-9223372036854775809".into(),
            "1".into(),
        ),
    ];
    for (datatype, min, max, below, above) in cases {
        let low = typed(&min, datatype.clone()).unwrap();
        assert_eq!(low.string_value(), min, "{}", datatype);
        let high = typed(&max, datatype.clone()).unwrap();
        assert_eq!(high.string_value(), max, "{}", datatype);
        assert!(typed(&below, datatype.clone()).is_err(), "{} {}", datatype, below);
        assert!(typed(&above, datatype.clone()).is_err(), "{} {}", datatype, above);
    }
}

#[test]
fn test_unsigned_value_fills_signed_views_when_small() {
    let lit = typed("200", Datatype::UnsignedByte).unwrap();
    assert_eq!(lit.unsigned_byte(), Some(200));
    assert_eq!(lit.short(), Some(200));
    assert_eq!(lit.byte(), None);
    assert_eq!(lit.positive_integer(), Some(200));
    assert_eq!(lit.non_positive_integer(), None);

    let big = typed(&u64::MAX.to_string(), Datatype::UnsignedLong).unwrap();
    assert_eq!(big.unsigned_long(), Some(u64::MAX));
    assert_eq!(big.long(), None);
    assert_eq!(big.decimal(), None);
}

#[test]
fn test_integral_decimal_fills_integer_views() {
    let lit = typed("42.000", Datatype::Decimal).unwrap();
    assert_eq!(lit.string_value(), "42.000");
    assert_eq!(lit.int(), Some(42));
    assert_eq!(lit.decimal(), Some(Decimal::from_integer(42)));

    let fractional = typed("4.2", Datatype::Decimal).unwrap();
    assert_eq!(fractional.int(), None);
    assert_eq!(fractional.double(), Some(4.2));
}

#[test]
fn test_language_forces_string_datatype() {
    let lit = Literal::with_language("apple", "en-GB").unwrap();
    assert_eq!(lit.datatype(), Some(&Datatype::String));
    assert_eq!(lit.language(), Some("en-GB"));
    assert!(Literal::with_language("apple", "not a tag").is_err());
}

#[test]
fn test_temporal_literals() {
    let year = typed("2002Z", Datatype::GYear).unwrap();
    assert_eq!(
        year.gregorian_date().unwrap().date_time().unwrap(),
        "2002-01-01T00:00:00Z"
    );
    let duration = typed("P1Y2M", Datatype::Duration).unwrap();
    assert_eq!(duration.duration().unwrap().month_count(), 2);
    assert!(typed("2002-02-30", Datatype::Date).is_err());
    assert!(typed("2002-10-10", Datatype::GYear).is_err());
}

#[test]
fn test_any_uri_routes_to_uri_parser() {
    let lit = typed("http://example.org/x#y", Datatype::AnyUri).unwrap();
    assert_eq!(lit.any_uri().unwrap().local_name(), "y");
    assert!(typed("no scheme", Datatype::AnyUri).is_err());
}

#[test]
fn test_sparql_round_trip() {
    let custom = Datatype::custom(
        Uri::parse("http://example.org/dt#percent").unwrap(),
        Some(Datatype::Decimal),
        false,
    );
    let literals = vec![
        Literal::new("plain \"text\"\nwith lines", None).unwrap(),
        Literal::with_language("appel", "nl").unwrap(),
        typed("typed", Datatype::String).unwrap(),
        typed("123.45", Datatype::Decimal).unwrap(),
        typed("-123", Datatype::Integer).unwrap(),
        typed("12", Datatype::UnsignedShort).unwrap(),
        typed("-5", Datatype::NonPositiveInteger).unwrap(),
        typed("-5", Datatype::NegativeInteger).unwrap(),
        typed("1234.5", Datatype::Double).unwrap(),
        typed("-0.0001", Datatype::Double).unwrap(),
        typed("INF", Datatype::Double).unwrap(),
        typed("1.5", Datatype::Float).unwrap(),
        typed("0", Datatype::Boolean).unwrap(),
        typed("CAFE", Datatype::HexBinary).unwrap(),
        typed("aGVsbG8=", Datatype::Base64Binary).unwrap(),
        typed("P1DT2H", Datatype::Duration).unwrap(),
        typed("2002-10-10T12:00:00-05:00", Datatype::DateTime).unwrap(),
        typed("---15", Datatype::GDay).unwrap(),
        typed("a b c", Datatype::NmTokens).unwrap(),
        typed("ex:thing", Datatype::QName).unwrap(),
        typed("99.5", custom).unwrap(),
        Literal::from(7i64),
        Literal::from(false),
        Literal::from(2.5f64),
    ];
    for literal in literals {
        let text = literal.sparql();
        let parsed = Literal::from_sparql(&text, None).unwrap();
        assert_eq!(parsed, literal, "{}", text);
        assert_eq!(parsed.sparql(), text);
    }
}

#[test]
fn test_from_sparql_with_prefixes() {
    let mut table = NamespaceTable::with_defaults();
    table.add("ex", "http://example.org/dt#", "ns");
    let lit = Literal::from_sparql("\"3\"^^xsd:int", Some(&table)).unwrap();
    assert_eq!(lit.int(), Some(3));
    let custom = Literal::from_sparql("\"9\"^^ex:score", Some(&table)).unwrap();
    assert_eq!(custom.sparql(), "\"9\"^^<http://example.org/dt#score>");
}
