/// Folded one's-complement sum of `data`, read as network-order 16-bit words.
///
/// An odd trailing byte counts as a word padded with a zero octet.
pub fn ones_complement_sum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    let mut words = data.chunks_exact(2);
    for word in &mut words {
        sum += u32::from(u16::from_be_bytes([word[0], word[1]]));
    }

    if let [last] = words.remainder() {
        sum += u32::from(*last) << 8;
    }

    // Add the carry
    while (sum >> 16) != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    sum as u16
}

/// Internet checksum (RFC 1071) of `data`.
pub fn checksum(data: &[u8]) -> u16 {
    !ones_complement_sum(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_buffer_checksum_is_pinned() {
        let buffer = [0u8; 72];
        assert_eq!(ones_complement_sum(&buffer), 0x0000);
        assert_eq!(checksum(&buffer), 0xFFFF);
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(checksum(&[]), 0xFFFF);
    }

    #[test]
    fn test_rfc1071_example() {
        // Words 0x0001 0xf203 0xf4f5 0xf6f7 sum to 0xddf2 after folding.
        let data = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
        assert_eq!(ones_complement_sum(&data), 0xddf2);
        assert_eq!(checksum(&data), 0x220d);
    }

    #[test]
    fn test_odd_length_pads_with_zero_octet() {
        assert_eq!(ones_complement_sum(&[0xab]), 0xab00);
        assert_eq!(ones_complement_sum(&[0x12, 0x34, 0xab]), 0xbd34);
    }

    #[test]
    fn test_carry_is_folded() {
        // 0xffff + 0x0002 = 0x10001 -> 0x0002
        assert_eq!(ones_complement_sum(&[0xff, 0xff, 0x00, 0x02]), 0x0002);
    }

    #[test]
    fn test_inserted_checksum_self_verifies() {
        let mut buffer: Vec<u8> = (0..72u8).map(|b| b.wrapping_mul(37)).collect();
        buffer[2] = 0;
        buffer[3] = 0;
        let sum = checksum(&buffer);
        buffer[2..4].copy_from_slice(&sum.to_be_bytes());

        assert_eq!(ones_complement_sum(&buffer), 0xFFFF);
        assert_eq!(checksum(&buffer), 0);
    }
}
