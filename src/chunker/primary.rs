/// Split `text` on every occurrence of `separator`, restoring the separator as
/// a suffix on each piece (the last one included).
///
/// Concatenating the result gives back `text` followed by one extra
/// `separator`.
pub(crate) fn split_primary(text: &str, separator: &str) -> Vec<String> {
    text.split(separator)
        .map(|piece| {
            let mut owned = String::with_capacity(piece.len() + separator.len());
            owned.push_str(piece);
            owned.push_str(separator);
            owned
        })
        .collect()
}
