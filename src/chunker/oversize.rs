use tracing::trace;

use super::config::SeparatorPolicy;

/// Break an oversized piece into sub-pieces of at most `size` characters.
///
/// The head of `separators` is tried first; sub-pieces that are still too
/// large recurse with the tail. Once the list runs out the piece is cut into
/// fixed-width windows, which is the only place a word can be split.
pub(crate) fn resolve_oversize(
    piece: &str,
    separators: &[String],
    size: usize,
    policy: SeparatorPolicy,
) -> Vec<String> {
    let Some((separator, finer)) = separators.split_first() else {
        trace!(chars = piece.chars().count(), width = size, "slicing piece at fixed width");
        return slice_fixed(piece, size);
    };

    let separator_len = separator.chars().count();
    let mut resolved = Vec::new();

    for sub in piece.split(separator.as_str()) {
        let mut sub = format!("{sub}{separator}");
        let mut checked_len = sub.chars().count();
        if policy == SeparatorPolicy::Reappend {
            checked_len += separator_len;
        }

        if checked_len > size {
            if policy == SeparatorPolicy::Reappend {
                sub.push_str(separator);
            }
            trace!(
                chars = checked_len,
                separator = %separator.escape_debug(),
                "sub-piece still oversized, recursing"
            );
            resolved.extend(resolve_oversize(&sub, finer, size, policy));
        } else {
            resolved.push(sub);
        }
    }

    resolved
}

/// Consecutive windows of exactly `width` characters; the last may be shorter.
fn slice_fixed(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|window| window.iter().collect())
        .collect()
}
