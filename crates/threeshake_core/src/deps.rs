use std::collections::HashSet;

/// Ordered collection of requested export names.
///
/// Uniqueness is enforced on insertion and the first occurrence keeps its
/// position, so output built from a set is reproducible across runs.
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` unless already present. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Keeps only the names matching `keep`, preserving order.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        let seen = &mut self.seen;
        self.names.retain(|name| {
            let kept = keep(name);
            if !kept {
                seen.remove(name);
            }
            kept
        });
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl PartialEq for DependencySet {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for DependencySet {}

impl<S: Into<String>> Extend<S> for DependencySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for DependencySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DependencySet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for DependencySet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

impl From<DependencySet> for Vec<String> {
    fn from(set: DependencySet) -> Self {
        set.names
    }
}
