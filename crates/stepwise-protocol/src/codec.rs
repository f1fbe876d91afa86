//! Byte transforms and previews used by the layers.

/// Bytes shown in a payload preview.
pub const PREVIEW_BYTES: usize = 16;

/// Bytes rendered as bits on the physical layer.
pub const BIT_PREVIEW_BYTES: usize = 4;

/// Lossy "compression": average adjacent byte pairs, keeping an odd tail.
///
/// Output length is always `ceil(n / 2)`.
pub fn compress(data: &[u8]) -> Vec<u8> {
    data.chunks(2)
        .map(|pair| {
            let sum: u16 = pair.iter().map(|&b| u16::from(b)).sum();
            (sum / pair.len() as u16) as u8
        })
        .collect()
}

/// Positional additive cipher: `out[i] = data[i] + key + i (mod 256)`.
pub fn encrypt(data: &[u8], key: u8) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, &b)| b.wrapping_add(key).wrapping_add(i as u8))
        .collect()
}

/// Inverse of [`encrypt`].
pub fn decrypt(data: &[u8], key: u8) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, &b)| b.wrapping_sub(key).wrapping_sub(i as u8))
        .collect()
}

/// IEEE 802.3 CRC-32 (reflected, polynomial 0xEDB88320).
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = !0u32;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// Hex of the first [`PREVIEW_BYTES`] bytes, with an ellipsis when truncated.
pub fn hex_preview(data: &[u8]) -> String {
    let shown = &data[..data.len().min(PREVIEW_BYTES)];
    let mut out = hex::encode(shown);
    if data.len() > PREVIEW_BYTES {
        out.push('…');
    }
    out
}

/// Bits of the first [`BIT_PREVIEW_BYTES`] bytes, one group per byte.
pub fn bit_preview(data: &[u8]) -> String {
    let mut out = data
        .iter()
        .take(BIT_PREVIEW_BYTES)
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<_>>()
        .join(" ");
    if data.len() > BIT_PREVIEW_BYTES {
        out.push_str(" …");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_averages_pairs() {
        assert_eq!(compress(&[10, 20, 255, 255, 7]), vec![15, 255, 7]);
        assert!(compress(&[]).is_empty());
    }

    #[test]
    fn encrypt_adds_key_and_position() {
        assert_eq!(encrypt(&[0, 0, 250], 3), vec![3, 4, 255]);
        assert_eq!(encrypt(&[255], 1), vec![0]);
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(decrypt(&encrypt(&data, 77), 77), data);
    }

    #[test]
    fn crc32_check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn previews_truncate() {
        assert_eq!(hex_preview(b"Hi"), "4869");
        assert!(hex_preview(&[0u8; 17]).ends_with('…'));
        assert_eq!(bit_preview(&[0x48, 0x69]), "01001000 01101001");
        assert_eq!(bit_preview(&[1, 2, 3, 4, 5]).matches(' ').count(), 4);
    }
}
