use std::time::Instant;

use crate::{
    config::HmmConfig,
    dataset::TrainingPair,
    error::{Error, Result},
    quark::{Quark, StringTable, TextVectorizer},
};

use super::{model::HmmModel, table::CountTable};

/// Accumulates transition and emission frequencies over training pairs, then
/// turns them into a [`HmmModel`].
#[derive(Debug)]
pub struct Trainer {
    config: HmmConfig,
    tags: Quark,
    tokens: Quark,
    start: usize,
    transitions: CountTable,
    emissions: CountTable,
    num_pairs: usize,
    num_items: usize,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(HmmConfig::default())
    }
}

impl Trainer {
    pub fn new(config: HmmConfig) -> Self {
        let mut tags = Quark::default();
        let start = tags.find_or_insert(&config.start_tag);
        Self {
            config,
            tags,
            tokens: Quark::default(),
            start,
            transitions: CountTable::default(),
            emissions: CountTable::default(),
            num_pairs: 0,
            num_items: 0,
        }
    }

    /// Number of pairs offered so far, including skipped empty ones.
    pub fn num_pairs(&self) -> usize {
        self.num_pairs
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Counts one aligned pair. A pair whose sequences differ in length is
    /// rejected before anything is counted.
    pub fn append(&mut self, pair: &TrainingPair) -> Result<()> {
        let index = self.num_pairs;
        self.num_pairs += 1;
        if pair.tags.len() != pair.words.len() {
            return Err(Error::MisalignedTrainingPair {
                index,
                tags: pair.tags.len(),
                words: pair.words.len(),
            });
        }
        if pair.is_empty() {
            log::warn!("skipping empty training pair #{index}");
            return Ok(());
        }

        let ids: Vec<usize> = pair.tags.iter().map(|t| self.tags.find_or_insert(t)).collect();
        self.transitions.increment(self.start, ids[0]);
        for (k, w) in ids.windows(2).enumerate() {
            // the source keeps its row even when its only successor is filtered
            self.transitions.row_mut(w[0]);
            if pair.tags[k + 1] != self.config.terminator {
                self.transitions.increment(w[0], w[1]);
            }
        }
        for (&tag, word) in ids.iter().zip(&pair.words) {
            let token = self.tokens.find_or_insert(&word.to_lowercase());
            self.emissions.increment(tag, token);
        }
        self.num_items += ids.len();
        Ok(())
    }

    /// Normalizes both count tables into log-probabilities.
    pub fn train(self) -> HmmModel {
        let begin = Instant::now();
        log::info!(
            "train (pairs: {}, items: {}, tags: {}, tokens: {}, transitions: {}, emissions: {})",
            self.num_pairs,
            self.num_items,
            self.tags.len(),
            self.tokens.len(),
            self.transitions.num_cells(),
            self.emissions.num_cells()
        );
        let transitions = self.transitions.into_log_probs();
        let emissions = self.emissions.into_log_probs();
        log::info!("normalized in {:?}", begin.elapsed());
        HmmModel::new(self.config, self.tags, self.tokens, transitions, emissions)
    }
}
