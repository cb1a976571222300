use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::flatten::Row;

/// Fuzzy filter over flattened rows.
///
/// An empty query matches everything and leaves the row order alone; a
/// non-empty one keeps matching rows in their original order rather than
/// sorting them by score, so the tree shape stays recognisable.
pub struct SearchFilter {
    pattern: Option<Pattern>,
    matcher: Matcher,
    buf: Vec<char>,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        let pattern = (!query.is_empty())
            .then(|| Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart));
        Self {
            pattern,
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn matches(&mut self, haystack: &str) -> bool {
        let Some(pattern) = &self.pattern else {
            return true;
        };
        let haystack = Utf32Str::new(haystack, &mut self.buf);
        pattern.score(haystack, &mut self.matcher).is_some()
    }

    /// Byte offsets of the characters in `haystack` that matched the query.
    pub fn match_indices(&mut self, haystack: &str) -> Vec<usize> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        let mut char_indices = Vec::new();
        let utf32 = Utf32Str::new(haystack, &mut self.buf);
        if pattern
            .indices(utf32, &mut self.matcher, &mut char_indices)
            .is_none()
        {
            return Vec::new();
        }
        char_indices.sort_unstable();
        char_indices.dedup();
        char_to_byte_indices(haystack, &char_indices)
    }

    pub fn apply<'a>(&mut self, rows: Vec<Row<'a>>) -> Vec<Row<'a>> {
        if !self.is_active() {
            return rows;
        }
        rows.into_iter().filter(|row| self.matches(&row.path)).collect()
    }
}

pub fn filter_rows<'a>(rows: Vec<Row<'a>>, query: &str) -> Vec<Row<'a>> {
    SearchFilter::new(query).apply(rows)
}

// `char_indices` must be sorted.
fn char_to_byte_indices(text: &str, char_indices: &[u32]) -> Vec<usize> {
    let mut wanted = char_indices.iter().peekable();
    let mut byte_indices = Vec::with_capacity(char_indices.len());
    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        match wanted.peek() {
            Some(&&next) if next as usize == char_idx => {
                byte_indices.push(byte_idx);
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    byte_indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeKind, Tree, flatten};

    fn tree() -> Tree {
        let mut tree = Tree::new();
        for (kind, path) in [
            (NodeKind::File, "a.ts"),
            (NodeKind::Directory, "src"),
            (NodeKind::File, "src/b.ts"),
            (NodeKind::File, "src/c.md"),
            (NodeKind::File, "README.md"),
        ] {
            tree.insert(kind, path).unwrap();
        }
        tree
    }

    fn paths<'a>(rows: &'a [Row<'_>]) -> Vec<&'a str> {
        rows.iter().map(|row| row.path.as_str()).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let tree = tree();
        let all = flatten(&tree);
        let filtered = filter_rows(flatten(&tree), "");
        assert_eq!(paths(&filtered), paths(&all));
    }

    #[test]
    fn keeps_matches_in_tree_order() {
        let tree = tree();
        let filtered = filter_rows(flatten(&tree), "md");
        assert_eq!(paths(&filtered), vec!["src/c.md", "README.md"]);
    }

    #[test]
    fn fuzzy_match_spans_path_segments() {
        let tree = tree();
        let filtered = filter_rows(flatten(&tree), "sbt");
        assert_eq!(paths(&filtered), vec!["src/b.ts"]);
    }

    #[test]
    fn matching_ignores_case() {
        let tree = tree();
        let filtered = filter_rows(flatten(&tree), "readme");
        assert_eq!(paths(&filtered), vec!["README.md"]);
    }

    #[test]
    fn no_match_yields_empty_view() {
        let tree = tree();
        assert!(filter_rows(flatten(&tree), "zzqx").is_empty());
    }

    #[test]
    fn indices_point_at_matched_bytes() {
        let mut filter = SearchFilter::new("bts");
        let indices = filter.match_indices("src/b.ts");
        assert_eq!(indices, vec![4, 6, 7]);
        assert!(SearchFilter::new("").match_indices("src/b.ts").is_empty());
    }

    #[test]
    fn byte_indices_account_for_multibyte_chars() {
        assert_eq!(char_to_byte_indices("é/x", &[0, 2]), vec![0, 3]);
    }
}
