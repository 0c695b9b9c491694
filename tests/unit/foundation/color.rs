use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c = HexColor::parse("#ff0000").unwrap();
    assert_eq!(c.rgba(), Rgba8::opaque(255, 0, 0));
    assert_eq!(c.as_str(), "#ff0000");

    let c = HexColor::parse("0000FF80").unwrap();
    assert_eq!(
        c.rgba(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 255,
            a: 128
        }
    );
    assert_eq!(c.as_str(), "#0000ff80");
}

#[test]
fn rejects_bad_lengths_and_digits() {
    assert!(HexColor::parse("#fff").is_err());
    assert!(HexColor::parse("#gg0000").is_err());
    assert!(HexColor::parse("#ééé").is_err());
}

#[test]
fn serde_roundtrips_through_text() {
    let c: HexColor = serde_json::from_value(json!("#5778A4")).unwrap();
    assert_eq!(serde_json::to_value(&c).unwrap(), json!("#5778a4"));
    assert!(serde_json::from_value::<HexColor>(json!("red")).is_err());
}

#[test]
fn default_node_color_is_black() {
    let c = HexColor::default_node();
    assert_eq!(c.as_str(), "#000000");
    assert_eq!(c.rgba(), Rgba8::BLACK);
}

#[test]
fn from_rgba8_formats_lowercase_hex() {
    assert_eq!(HexColor::from_rgba8(Rgba8::opaque(0xcc, 0xcc, 0xcc)).as_str(), "#cccccc");
    let translucent = Rgba8 {
        r: 1,
        g: 2,
        b: 3,
        a: 4,
    };
    assert_eq!(HexColor::from_rgba8(translucent).as_str(), "#01020304");
    assert_eq!(
        HexColor::from_rgba8(translucent),
        HexColor::parse("#01020304").unwrap()
    );
}

#[test]
fn palette_must_be_non_empty() {
    let empty: [&str; 0] = [];
    assert!(parse_palette(&empty).is_err());
    let p = parse_palette(&["#111111", "#222222"]).unwrap();
    assert_eq!(p.len(), 2);
    assert!(parse_palette(&["#111111", "nope"]).is_err());
}
