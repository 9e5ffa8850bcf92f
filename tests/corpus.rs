//! Test corpus: roundtrip and layout tests over patterns and sizes.

use enough::Unstoppable;
use zenraster::*;

fn checkerboard(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            Color::from_bgr8([220, 240, 200])
        } else {
            Color::from_bgr8([70, 40, 10])
        }
    })
    .unwrap()
}

fn noise_pattern(w: u32, h: u32) -> PixelBuffer {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    PixelBuffer::from_fn(w, h, |_, _| Color::from_bgr8([next(), next(), next()])).unwrap()
}

/// Build a BMP by hand so decode is checked independently of encode.
fn handmade_bmp(w: u32, h: u32, bgr_rows: &[Vec<[u8; 3]>], pad_byte: u8) -> Vec<u8> {
    let pad = row_padding(w);
    let row_len = w as usize * 3 + pad;
    let file_size = 54 + row_len * h as usize;
    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(w as i32).to_le_bytes());
    out.extend_from_slice(&(h as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&[0; 24]);
    for row in bgr_rows {
        for px in row {
            out.extend_from_slice(px);
        }
        out.extend(std::iter::repeat_n(pad_byte, pad));
    }
    out
}

// ── Roundtrips ───────────────────────────────────────────────────────

#[test]
fn checkerboard_roundtrip() {
    let image = checkerboard(10, 8);
    let encoded = encode_bmp(&image, Unstoppable).unwrap();
    let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn noise_roundtrip_all_paddings() {
    // Widths 1..=8 cover every padding amount twice
    for w in 1..=8 {
        for h in [1, 2, 5] {
            let image = noise_pattern(w, h);
            let encoded = encode_bmp(&image, Unstoppable).unwrap();
            let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
            assert_eq!(decoded, image, "{w}x{h}");
        }
    }
}

#[test]
fn single_row_and_single_column() {
    for (w, h) in [(17, 1), (1, 17)] {
        let image = noise_pattern(w, h);
        let encoded = encode_bmp(&image, Unstoppable).unwrap();
        assert_eq!(decode_bmp(&encoded, Unstoppable).unwrap(), image);
    }
}

#[test]
fn larger_image_crosses_stop_interval() {
    let image = noise_pattern(33, 40);
    let encoded = encode_bmp(&image, Unstoppable).unwrap();
    assert_eq!(decode_bmp(&encoded, Unstoppable).unwrap(), image);
}

// ── Layout ───────────────────────────────────────────────────────────

#[test]
fn every_row_is_four_byte_aligned() {
    for w in 1..=12u32 {
        let h = 3;
        let encoded = encode_bmp(&noise_pattern(w, h), Unstoppable).unwrap();
        let data_len = encoded.len() - 54;
        assert_eq!(data_len % h as usize, 0);
        let row_len = data_len / h as usize;
        assert_eq!(row_len % 4, 0, "width {w}");
        let extra = row_len - w as usize * 3;
        assert!(extra <= 3, "width {w}");
        assert_eq!(extra, row_padding(w));
    }
}

#[test]
fn padding_bytes_are_zero() {
    let image = PixelBuffer::from_fn(3, 2, |_, _| Color::WHITE).unwrap();
    let encoded = encode_bmp(&image, Unstoppable).unwrap();
    // Row length 9 + 3 padding
    assert_eq!(&encoded[54 + 9..54 + 12], &[0, 0, 0]);
    assert_eq!(&encoded[54 + 21..54 + 24], &[0, 0, 0]);
    assert!(encoded[54..54 + 9].iter().all(|&b| b == 255));
}

#[test]
fn handmade_file_decodes() {
    let rows = vec![
        vec![[0, 0, 255], [0, 255, 0], [255, 0, 0]],
        vec![[128, 128, 128], [64, 64, 64], [0, 0, 0]],
    ];
    // Non-zero padding must be skipped, not interpreted
    let data = handmade_bmp(3, 2, &rows, 0xCD);
    let decoded = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(decoded.get_color(0, 0).unwrap(), Color::RED);
    assert_eq!(decoded.get_color(1, 0).unwrap(), Color::GREEN);
    assert_eq!(decoded.get_color(2, 0).unwrap(), Color::BLUE);
    assert_eq!(
        decoded.get_color(0, 1).unwrap(),
        Color::from_bgr8([128, 128, 128])
    );
    assert_eq!(decoded.get_color(2, 1).unwrap(), Color::BLACK);
}

// ── Malformed input ──────────────────────────────────────────────────

#[test]
fn empty_and_short_inputs() {
    assert!(matches!(
        decode_bmp(&[], Unstoppable),
        Err(BitmapError::UnrecognizedFormat)
    ));
    assert!(matches!(
        decode_bmp(b"B", Unstoppable),
        Err(BitmapError::UnrecognizedFormat)
    ));
    assert!(matches!(
        decode_bmp(b"BM\x00\x00", Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));
}

#[test]
fn other_magic_rejected() {
    for magic in [b"P6", b"bm", b"MB", b"\x89P"] {
        let mut data = encode_bmp(&checkerboard(2, 2), Unstoppable).unwrap();
        data[0..2].copy_from_slice(magic);
        assert!(matches!(
            decode_bmp(&data, Unstoppable),
            Err(BitmapError::UnrecognizedFormat)
        ));
    }
}

#[test]
fn truncated_rows() {
    let full = encode_bmp(&checkerboard(4, 4), Unstoppable).unwrap();
    let cut = &full[..full.len() - 5];
    assert!(matches!(
        decode_bmp(cut, Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));

    let recovered = DecodeRequest::new(cut)
        .with_permissiveness(BmpPermissiveness::Permissive)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(recovered.width(), 4);
    assert_eq!(recovered.height(), 4);
    assert_eq!(recovered.get_color(3, 3).unwrap(), Color::BLACK);
    assert_eq!(
        recovered.get_color(0, 0).unwrap(),
        checkerboard(4, 4).get_color(0, 0).unwrap()
    );
}

#[test]
fn top_down_files_rejected() {
    let mut data = encode_bmp(&checkerboard(2, 2), Unstoppable).unwrap();
    data[22..26].copy_from_slice(&(-2i32).to_le_bytes());
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::InvalidHeader(_))
    ));
}

#[test]
fn decode_never_panics_on_header_mutations() {
    let base = encode_bmp(&noise_pattern(3, 3), Unstoppable).unwrap();
    for offset in 2..54 {
        for value in [0x00, 0x01, 0x7F, 0x80, 0xFF] {
            let mut data = base.clone();
            data[offset] = value;
            for mode in [
                BmpPermissiveness::Strict,
                BmpPermissiveness::Standard,
                BmpPermissiveness::Permissive,
            ] {
                let limits = Limits {
                    max_memory_bytes: Some(1 << 20),
                    ..Default::default()
                };
                let _ = DecodeRequest::new(&data)
                    .with_limits(&limits)
                    .with_permissiveness(mode)
                    .decode(Unstoppable);
            }
        }
    }
}
