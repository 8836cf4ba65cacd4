use super::*;
use crate::palette::BUILT_IN_PALETTES;

#[test]
fn parse_hex_6_digit() {
    let c = parse_color("#38bdf8").unwrap();
    assert_eq!(c, Color::from_rgba(0x38, 0xbd, 0xf8, 255));
}

#[test]
fn parse_hex_8_digit() {
    let c = parse_color("#38bdf880").unwrap();
    assert_eq!(c, Color::from_rgba(0x38, 0xbd, 0xf8, 128));
}

#[test]
fn parse_hex_3_digit() {
    let c = parse_color("#f0a").unwrap();
    assert_eq!(c, Color::from_rgba(255, 0, 170, 255));
}

#[test]
fn parse_rgb_without_alpha_is_opaque() {
    let c = parse_color("rgb(12, 34, 56)").unwrap();
    assert_eq!(c, Color::from_rgba(12, 34, 56, 255));
}

#[test]
fn parse_rgba_float_alpha() {
    let c = parse_color("rgba(0,212,255,0.12)").unwrap();
    // 0.12 * 255 = 30.6 -> 31
    assert_eq!(c, Color::from_rgba(0, 212, 255, 31));
}

#[test]
fn parse_rgba_integer_alpha() {
    let c = parse_color("rgba(1,2,3,200)").unwrap();
    assert_eq!(c.a, 200);
    assert!(parse_color("rgba(1,2,3,256)").is_err());
}

#[test]
fn parse_rgba_with_spaces() {
    let c = parse_color("  rgba( 100 , 180 , 255 , 0.9 ) ").unwrap();
    // 0.9 * 255 = 229.5 -> 230
    assert_eq!(c, Color::from_rgba(100, 180, 255, 230));
}

#[test]
fn parse_color_invalid_format() {
    assert!(parse_color("not-a-color").is_err());
    assert!(parse_color("").is_err());
    assert!(parse_color("#xyz").is_err());
    assert!(parse_color("rgba(300,0,0,1.0)").is_err());
    assert!(parse_color("rgba(0,0,0,1.5)").is_err());
}

#[test]
fn parse_color_non_ascii_is_an_error() {
    assert!(parse_color("#\u{e9}a").is_err());
    assert!(parse_color("#\u{e9}abcd").is_err());
    assert!(parse_color("#ab\u{1f3a8}").is_err());
    assert!(!validate_color("#\u{e9}a"));
}

#[test]
fn validate_color_accepts_and_rejects() {
    assert!(validate_color("#00d4ff"));
    assert!(validate_color("#f00"));
    assert!(validate_color("rgb(1,2,3)"));
    assert!(validate_color("rgba(0,212,255,0.12)"));
    assert!(!validate_color(""));
    assert!(!validate_color("#12345"));
    assert!(!validate_color("rgb(10,20)"));
    assert!(!validate_color("hsl(10,20%,30%)"));
}

#[test]
fn every_built_in_palette_color_parses() {
    for (theme, roles) in BUILT_IN_PALETTES {
        for (role, value) in *roles {
            assert!(
                parse_color(value).is_ok(),
                "palette {theme:?} role {role} has unparseable color {value}"
            );
        }
    }
}
