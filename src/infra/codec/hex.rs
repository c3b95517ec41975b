//! Parsing of operator-typed payloads such as `"01 02 ff"`, used when a
//! host tool injects raw bytes towards a node.

/// Parse whitespace-separated hexadecimal byte tokens into `out`.
///
/// Tokens that are not a valid byte are skipped. Parsing stops once `out`
/// is full. Returns the number of bytes written.
///
/// ```rust
/// use csp_can_link::infra::codec::hex::parse_hex_payload;
///
/// let mut buf = [0u8; 8];
/// let len = parse_hex_payload("01 zz 0A ff", &mut buf);
/// assert_eq!(&buf[..len], &[0x01, 0x0A, 0xFF]);
/// ```
pub fn parse_hex_payload(text: &str, out: &mut [u8]) -> usize {
    let mut written = 0;
    for token in text.split_whitespace() {
        if written == out.len() {
            break;
        }
        if let Ok(byte) = u8::from_str_radix(token, 16) {
            out[written] = byte;
            written += 1;
        }
    }
    written
}
