use super::config::BoundaryClass;

/// Settings for one overlap pass
#[derive(Debug, Clone, Copy)]
pub(crate) struct OverlapWindow<'a> {
    pub overlap: usize,
    pub growth: usize,
    pub separator: &'a str,
    pub boundaries: &'a BoundaryClass,
}

impl OverlapWindow<'_> {
    /// The last `overlap` characters of `prev`, grown backwards by up to
    /// `growth` characters until the character before the window is a
    /// boundary.
    pub(crate) fn trailing<'t>(&self, prev: &'t str) -> &'t str {
        let chars: Vec<(usize, char)> = prev.char_indices().collect();
        let mut start = chars.len().saturating_sub(self.overlap);

        let mut added = 0;
        while start > 0
            && added < self.growth
            && !self.boundaries.contains(chars[start - 1].1)
        {
            start -= 1;
            added += 1;
        }

        match chars.get(start) {
            Some(&(byte, _)) => &prev[byte..],
            None => "",
        }
    }

    /// The first `overlap` characters of `next`, grown forwards by up to
    /// `growth` characters until the character after the window is a
    /// boundary.
    pub(crate) fn leading<'t>(&self, next: &'t str) -> &'t str {
        let chars: Vec<(usize, char)> = next.char_indices().collect();
        let mut end = self.overlap.min(chars.len());

        let mut added = 0;
        while end < chars.len()
            && added < self.growth
            && !self.boundaries.contains(chars[end].1)
        {
            end += 1;
            added += 1;
        }

        let byte_end = chars.get(end).map_or(next.len(), |&(byte, _)| byte);
        &next[..byte_end]
    }

    /// Attach neighbor context to every piece.
    ///
    /// Contexts are read from `pieces` as given, never from a neighbor's
    /// already composed result. The separator goes on both sides even when a
    /// side has no context.
    pub(crate) fn inject(&self, pieces: &[String]) -> Vec<String> {
        let last = pieces.len().saturating_sub(1);

        let contexts: Vec<(&str, &str)> = (0..pieces.len())
            .map(|i| {
                let trailing = if i > 0 { self.trailing(&pieces[i - 1]) } else { "" };
                let leading = if i < last { self.leading(&pieces[i + 1]) } else { "" };
                (trailing, leading)
            })
            .collect();

        pieces
            .iter()
            .zip(contexts)
            .map(|(piece, (trailing, leading))| {
                let sep = self.separator;
                format!("{trailing}{sep}{piece}{sep}{leading}")
            })
            .collect()
    }
}

/// Strip surrounding whitespace and drop chunks left empty, keeping order.
pub(crate) fn trim_chunks(chunks: Vec<String>) -> Vec<String> {
    chunks
        .into_iter()
        .filter_map(|chunk| {
            let trimmed = chunk.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.len() == chunk.len() {
                Some(chunk)
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
