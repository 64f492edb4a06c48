/*!
 * Passage-boundary document splitting.
 *
 * Oversized documents are split into independently-translatable units
 * strictly at passage-header boundaries. Reassembly is a pure
 * order-preserving concatenation, so for any text the invariant
 * `concat(split(text)) == text` holds byte for byte.
 */

/// Split a document at passage-header boundaries. The slice before
/// the first header (file preamble) forms the first unit when present;
/// every header starts a new unit that runs until the next header.
pub fn split_passages(text: &str) -> Vec<String> {
    let mut boundaries: Vec<usize> = Vec::new();
    if text.starts_with(":: ") {
        boundaries.push(0);
    }
    for (offset, _) in text.match_indices("\n:: ") {
        boundaries.push(offset + 1);
    }

    if boundaries.is_empty() {
        return vec![text.to_string()];
    }

    let mut units = Vec::with_capacity(boundaries.len() + 1);
    if boundaries[0] > 0 {
        units.push(text[..boundaries[0]].to_string());
    }
    for (i, &start) in boundaries.iter().enumerate() {
        let end = boundaries.get(i + 1).copied().unwrap_or(text.len());
        units.push(text[start..end].to_string());
    }
    units
}

/// Decide the translation units for a document: one unit when the
/// document fits under the byte threshold, per-passage units otherwise
pub fn chunk_for_translation(text: &str, threshold_bytes: usize) -> Vec<String> {
    if text.len() <= threshold_bytes {
        vec![text.to_string()]
    } else {
        split_passages(text)
    }
}
