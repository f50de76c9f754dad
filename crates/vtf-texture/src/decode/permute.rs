//! Channel permutation for uncompressed formats.

/// Reorder each stored pixel into RGBA. Three-channel formats get an
/// opaque alpha byte appended.
pub(crate) fn decode(src: &[u8], channel_order: &[usize]) -> Vec<u8> {
    let stride = channel_order.len();
    let mut out = Vec::with_capacity(src.len() / stride * 4);

    for pixel in src.chunks_exact(stride) {
        out.extend(channel_order.iter().map(|&i| pixel[i]));
        if stride == 3 {
            out.push(u8::MAX);
        }
    }

    out
}
