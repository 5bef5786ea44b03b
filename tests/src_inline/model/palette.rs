use super::*;

#[test]
fn test_parse_hex() {
    assert_eq!(Rgb::parse_hex("#ca0020").unwrap(), Rgb(0xca, 0x00, 0x20));
    assert_eq!(Rgb::parse_hex(" #FFFFFF ").unwrap(), Rgb(255, 255, 255));
    assert!(matches!(
        Rgb::parse_hex("ca0020"),
        Err(ReshapeError::InvalidColor(_))
    ));
    assert!(matches!(
        Rgb::parse_hex("#ca00"),
        Err(ReshapeError::InvalidColor(_))
    ));
    assert!(matches!(
        Rgb::parse_hex("#gg0000"),
        Err(ReshapeError::InvalidColor(_))
    ));
    assert_eq!(Rgb(1, 171, 255).to_hex(), "#01abff");
}

#[test]
fn test_diverging_odd_hits_anchors() {
    let neg = Rgb(200, 0, 0);
    let mid = Rgb(240, 240, 240);
    let pos = Rgb(0, 0, 200);
    let palette = Palette::diverging(5, neg, mid, pos);
    assert_eq!(palette.len(), 5);
    assert_eq!(palette.color(0), Some(neg));
    assert_eq!(palette.color(2), Some(mid));
    assert_eq!(palette.color(4), Some(pos));
    assert_eq!(palette.color(1), Some(Rgb(220, 120, 120)));
}

#[test]
fn test_diverging_even_skips_neutral() {
    let neg = Rgb(200, 0, 0);
    let mid = Rgb(240, 240, 240);
    let pos = Rgb(0, 0, 200);
    let palette = Palette::diverging(4, neg, mid, pos);
    assert_eq!(palette.color(0), Some(neg));
    assert_eq!(palette.color(3), Some(pos));
    assert!(!palette.to_hex().contains(&mid.to_hex()));
}

#[test]
fn test_length_check() {
    let palette = PalettePreset::RdBu.build(5);
    assert!(palette.ensure_len(5).is_ok());
    assert_eq!(
        palette.ensure_len(4),
        Err(ReshapeError::PaletteMismatch {
            expected: 4,
            actual: 5
        })
    );
}

#[test]
fn test_from_hex_list() {
    let colors = vec!["#000000".to_string(), "#ffffff".to_string()];
    let palette = Palette::from_hex(&colors).unwrap();
    assert_eq!(palette.to_hex(), colors);

    let bad = vec!["#000000".to_string(), "white".to_string()];
    assert!(Palette::from_hex(&bad).is_err());
}
