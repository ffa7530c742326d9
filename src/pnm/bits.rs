//! PBM bit unpacking.

/// Unpack one P4 row (MSB first) into one sample per pixel, 1 = black.
///
/// `out.len()` is the row width; padding bits in the last input byte are
/// ignored.
pub(crate) fn unpack_row(input: &[u8], out: &mut [u8]) {
    let mut in_iter = input.iter();
    let mut out_iter = out.chunks_exact_mut(8);

    (&mut out_iter)
        .zip(&mut in_iter)
        .for_each(|(out_vals, &in_val)| {
            for (pos, out_val) in out_vals.iter_mut().enumerate() {
                *out_val = (in_val >> (7 - pos)) & 0x01;
            }
        });

    if let Some(&in_val) = in_iter.next() {
        let remainder_iter = out_iter.into_remainder().iter_mut();
        remainder_iter.enumerate().for_each(|(pos, out_val)| {
            *out_val = (in_val >> (7 - pos)) & 0x01;
        });
    }
}

/// Packed bytes per P4 row.
pub(crate) fn packed_row_len(width: usize) -> usize {
    width.div_ceil(8)
}
