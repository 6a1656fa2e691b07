use crate::analyzer::SourceAnalyzer;
use crate::index::builder::Builder;
use crate::index::Result;
use fst::Streamer;
use std::fs::read_to_string;
use std::path::Path;

/// Token -> occurrence count of the reference source file.
///
/// Immutable once built and `Sync`, so a single instance is shared by
/// reference between every worker of a job. Tokens that are absent count 0.
pub struct ReferenceIndex {
    terms: fst::Map<Vec<u8>>,
    total_tokens: u64,
}

impl ReferenceIndex {
    pub(crate) fn new(terms: fst::Map<Vec<u8>>, total_tokens: u64) -> Self {
        ReferenceIndex {
            terms,
            total_tokens,
        }
    }

    /// Builds the index from the full contents of a source file.
    pub fn build(contents: &str) -> Result<Self> {
        let mut builder = Builder::new(SourceAnalyzer::source());
        builder.add_text(contents);
        builder.finish()
    }

    /// Reads `path` once and builds the index from it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = read_to_string(path)?;
        Self::build(&contents)
    }

    #[inline]
    pub fn get(&self, token: &str) -> u64 {
        self.terms.get(token).unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.terms.contains_key(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of qualifying tokens in the file, duplicates included.
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// All `(token, count)` pairs in byte order of the token.
    pub fn entries(&self) -> Vec<(String, u64)> {
        let mut stream = self.terms.stream();
        let mut entries = Vec::with_capacity(self.len());

        while let Some((term, count)) = stream.next() {
            entries.push((String::from_utf8_lossy(term).into_owned(), count));
        }

        entries
    }
}

impl std::fmt::Debug for ReferenceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceIndex")
            .field("terms", &self.len())
            .field("total_tokens", &self.total_tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn builds_exact_counts() {
        let index = ReferenceIndex::build("foo foo bar ab").unwrap();
        assert_eq!(
            index.entries(),
            vec![("bar".to_string(), 1), ("foo".to_string(), 2)]
        );
        assert_eq!(index.get("ab"), 0);
        assert_eq!(index.get("missing"), 0);
    }

    #[test]
    fn keys_match_a_naive_count() {
        let source = "fn main() {\n    let x = vec![1, 2, 3];\n    println!(\"{:?}\", x);\n    let y = x;\n}\n";
        let mut naive: HashMap<&str, u64> = HashMap::new();
        for token in source.split_ascii_whitespace().filter(|t| t.chars().count() >= 3) {
            *naive.entry(token).or_insert(0) += 1;
        }

        let index = ReferenceIndex::build(source).unwrap();
        assert_eq!(index.len(), naive.len());
        for (term, count) in index.entries() {
            assert!(term.chars().count() >= 3);
            assert_eq!(naive[term.as_str()], count);
        }
    }

    #[test]
    fn rebuild_is_identical() {
        let source = "int main int return main main";
        let a = ReferenceIndex::build(source).unwrap();
        let b = ReferenceIndex::build(source).unwrap();
        assert_eq!(a.entries(), b.entries());
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "foo foo bar").unwrap();
        let index = ReferenceIndex::from_path(file.path()).unwrap();
        assert_eq!(index.get("foo"), 2);
        assert_eq!(index.get("bar"), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceIndex::from_path(dir.path().join("nope.c")).unwrap_err();
        assert!(matches!(err, crate::index::Error::Io(_)));
    }
}
