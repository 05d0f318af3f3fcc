/// String hash over UTF-16 code units: `h = h * 31 + unit` in wrapping
/// 32-bit signed arithmetic, returned as an absolute value.
///
/// `i32::MIN` has no positive counterpart in `i32`, so the result is a `u32`.
pub fn hash(s: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as i32);
    }
    h.unsigned_abs()
}
