use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::{Error, Result};

/// One sentence with its tags, position for position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingPair {
    pub tags: Vec<String>,
    pub words: Vec<String>,
}

impl TrainingPair {
    pub fn new(tags: Vec<String>, words: Vec<String>) -> Self {
        Self { tags, words }
    }

    /// Splits a tag line and a sentence line on whitespace. Words keep their
    /// case; the trainer lowercases them.
    pub fn from_lines(tags: &str, sentence: &str) -> Self {
        Self {
            tags: tags.split_whitespace().map(str::to_string).collect(),
            words: sentence.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.words.is_empty()
    }

    pub fn sentence(&self) -> String {
        self.words.join(" ")
    }
}

/// A corpus read from a tag file and a sentence file with one sentence per line.
#[derive(Debug, Default)]
pub struct Dataset {
    pub pairs: Vec<TrainingPair>,
}

impl Dataset {
    pub fn read<T: BufRead, S: BufRead>(tags: T, sentences: S) -> Result<Self> {
        let tags = tags.lines().collect::<Result<Vec<_>, _>>()?;
        let sentences = sentences.lines().collect::<Result<Vec<_>, _>>()?;
        if tags.len() != sentences.len() {
            return Err(Error::CorpusMismatch { tags: tags.len(), sentences: sentences.len() });
        }
        let mut pairs = Vec::with_capacity(tags.len());
        for (i, (t, s)) in tags.iter().zip(&sentences).enumerate() {
            let pair = TrainingPair::from_lines(t, s);
            if pair.is_empty() {
                log::warn!("skipping blank line {}", i + 1);
                continue;
            }
            pairs.push(pair);
        }
        Ok(Self { pairs })
    }

    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(tags: P, sentences: Q) -> Result<Self> {
        let ds = Self::read(
            BufReader::new(File::open(tags.as_ref())?),
            BufReader::new(File::open(sentences.as_ref())?),
        )?;
        log::info!(
            "read {} sentences from {} / {}",
            ds.len(),
            tags.as_ref().display(),
            sentences.as_ref().display()
        );
        Ok(ds)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.pairs.iter().map(TrainingPair::len).sum()
    }

    pub fn max_length(&self) -> usize {
        self.pairs.iter().map(TrainingPair::len).max().unwrap_or_default()
    }

    /// Gold tag sequences paired with their raw sentences.
    pub fn gold(&self) -> Vec<(Vec<String>, String)> {
        self.pairs.iter().map(|p| (p.tags.clone(), p.sentence())).collect()
    }
}
