#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp24(width: i32, height: i32, rows: &[u8]) -> Vec<u8> {
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&((54 + rows.len()) as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp.extend_from_slice(rows);
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1, BGR + 1 padding
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp24(1, 1, &[0xff, 0x00, 0x00, 0x00])).unwrap();

    // 2x2 white/black/red/green, 2 padding bytes per row
    let rows = [
        0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0, 0,
        0x00, 0x00, 0xff, 0x00, 0xff, 0x00, 0, 0,
    ];
    fs::write(format!("{dir}/bmp_2x2.bmp"), bmp24(2, 2, &rows)).unwrap();

    // 4x1, no padding
    fs::write(format!("{dir}/bmp_4x1.bmp"), bmp24(4, 1, &[0x40; 12])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/top_down.bmp"), bmp24(1, -1, &[0; 4])).unwrap();
    fs::write(format!("{dir}/truncated.bmp"), bmp24(3, 3, &[0x80; 10])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
