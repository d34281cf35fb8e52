use super::*;

#[test]
fn classic_green_is_background() {
    let k = ChromaKey::default();
    assert!(k.is_background(0, 255, 0));
    assert!(k.is_background(50, 180, 60));
}

#[test]
fn green_floor_is_exclusive() {
    let k = ChromaKey::default();
    assert!(!k.is_background(0, 100, 0));
    assert!(k.is_background(0, 101, 0));
}

#[test]
fn dominance_is_strict_against_both_channels() {
    let k = ChromaKey::default();
    // 1.4 * 100 = 140: equal is not enough.
    assert!(!k.is_background(100, 140, 0));
    assert!(k.is_background(100, 141, 0));
    assert!(!k.is_background(0, 140, 100));
    assert!(k.is_background(0, 141, 100));
}

#[test]
fn float_products_decide_exact_multiples() {
    let k = ChromaKey::default();
    // 1.4 * 85 is 118.99999999999999 in f64.
    assert!(k.is_background(85, 119, 0));
    assert!(k.is_background(0, 119, 85));
    assert!(k.is_background(90, 126, 90));
    // 1.4 * 100 is exactly 140.
    assert!(!k.is_background(100, 140, 0));
}

#[test]
fn skin_white_and_black_are_foreground() {
    let k = ChromaKey::default();
    assert!(!k.is_background(230, 180, 150));
    assert!(!k.is_background(255, 255, 255));
    assert!(!k.is_background(0, 0, 0));
}

#[test]
fn all_background_frame_becomes_fully_transparent() {
    let k = ChromaKey::default();
    let mut buf = [20u8, 220, 40, 255].repeat(64);
    let n = k.key_in_place(&mut buf).unwrap();
    assert_eq!(n, 64);
    assert!(buf.chunks_exact(4).all(|px| px[3] == 0));
    // Color channels survive.
    assert!(buf.chunks_exact(4).all(|px| px[..3] == [20, 220, 40]));
}

#[test]
fn no_background_frame_is_untouched() {
    let k = ChromaKey::default();
    let src: Vec<u8> = (0..64u8)
        .flat_map(|i| [200u8, 90, i, 255 - i])
        .collect();
    let mut buf = src.clone();
    assert_eq!(k.key_in_place(&mut buf).unwrap(), 0);
    assert_eq!(buf, src);
}

#[test]
fn parallel_matches_sequential_across_chunk_boundaries() {
    let k = ChromaKey::default();
    let px = PAR_CHUNK_PIXELS * 2 + 17;
    let src: Vec<u8> = (0..px)
        .flat_map(|i| {
            let g = (i * 7 % 256) as u8;
            [(i % 120) as u8, g, (i * 3 % 90) as u8, 255]
        })
        .collect();
    let mut a = src.clone();
    let mut b = src;
    let na = k.key_in_place(&mut a).unwrap();
    let nb = k.key_in_place_par(&mut b).unwrap();
    assert_eq!(na, nb);
    assert_eq!(a, b);
}

#[test]
fn ragged_buffer_is_rejected() {
    let k = ChromaKey::default();
    let mut buf = vec![0u8; 7];
    assert!(k.key_in_place(&mut buf).is_err());
    assert!(k.key_in_place_par(&mut buf).is_err());
}

#[test]
fn validate_rejects_weak_dominance() {
    assert!(ChromaKey::default().validate().is_ok());
    let k = ChromaKey {
        dominance: 0.5,
        ..Default::default()
    };
    assert!(k.validate().is_err());
    let k = ChromaKey {
        dominance: f64::NAN,
        ..Default::default()
    };
    assert!(k.validate().is_err());
}
