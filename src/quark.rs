use std::collections::HashMap;

/// Read-only view of an interned alphabet.
pub trait StringTable {
    fn to_str(&self, id: usize) -> Option<&str>;
    fn to_id(&self, s: &str) -> Option<usize>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait TextVectorizer {
    fn find_or_insert(&mut self, key: &str) -> usize;
}

/// Bidirectional string <-> id map. Ids are dense and follow first-insertion
/// order, which is what makes decoding order (and so tie-breaking) stable.
#[derive(Debug, Default, Clone)]
pub struct Quark {
    v: Vec<String>,
    m: HashMap<String, usize>,
}

impl Quark {
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.v.iter().enumerate().map(|(i, s)| (i, s.as_str()))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Quark {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut quark = Quark::default();
        for s in iter {
            quark.find_or_insert(s.as_ref());
        }
        quark
    }
}

impl StringTable for Quark {
    fn to_str(&self, id: usize) -> Option<&str> {
        self.v.get(id).map(|x| x.as_str())
    }

    fn to_id(&self, s: &str) -> Option<usize> {
        self.m.get(s).copied()
    }

    fn len(&self) -> usize {
        self.v.len()
    }
}

impl TextVectorizer for Quark {
    fn find_or_insert(&mut self, key: &str) -> usize {
        if let Some(&id) = self.m.get(key) {
            return id;
        }
        let id = self.v.len();
        self.m.insert(key.to_string(), id);
        self.v.push(key.to_string());
        id
    }
}
