//! `packed-refs` file
//!
//! ## File Format
//!
//! ```text
//! # pack-refs with: peeled fully-peeled sorted
//! 3f1c...  refs/heads/main
//! 9a0b...  refs/tags/v1.0
//! ^c4d2...
//! ```
//!
//! Comment lines start with `#`. Peeled lines (`^<hash>`) carry no ref name
//! and are skipped.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedRefs {
    /// `(ref_path, hash)` pairs in file order
    entries: Vec<(String, String)>,
}

impl PackedRefs {
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let mut parts = line.split_whitespace();
                let hash = parts.next()?;
                let ref_path = parts.next()?;
                Some((ref_path.to_string(), hash.to_string()))
            })
            .collect();

        PackedRefs { entries }
    }

    /// Hash recorded for exactly `ref_path`
    pub fn find(&self, ref_path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == ref_path)
            .map(|(_, hash)| hash.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, hash)| (name.as_str(), hash.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
