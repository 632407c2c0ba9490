/// Greedily merge adjacent pieces left to right while the merged length stays
/// within `size` characters.
///
/// Pieces already over `size` pass through untouched; callers only feed this
/// the output of the oversize resolver, where that cannot happen.
pub(crate) fn coalesce(pieces: Vec<String>, size: usize) -> Vec<String> {
    let mut merged = Vec::with_capacity(pieces.len());
    let mut pieces = pieces.into_iter();

    let Some(mut current) = pieces.next() else {
        return merged;
    };
    let mut current_len = current.chars().count();

    for piece in pieces {
        let piece_len = piece.chars().count();
        if current_len + piece_len <= size {
            current.push_str(&piece);
            current_len += piece_len;
        } else {
            merged.push(std::mem::replace(&mut current, piece));
            current_len = piece_len;
        }
    }
    merged.push(current);

    merged
}
