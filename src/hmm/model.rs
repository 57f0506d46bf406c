use std::io::Write;

use crate::{
    config::HmmConfig,
    quark::{Quark, StringTable, TextVectorizer},
};

use super::{table::LogProbTable, tagger::ViterbiTagger};

/// A trained (or hand-built) HMM: tag and token alphabets plus the transition
/// and emission log-probability tables. Immutable once built; any number of
/// taggers may borrow it.
#[derive(Debug, Clone)]
pub struct HmmModel {
    config: HmmConfig,
    tags: Quark,
    tokens: Quark,
    start: usize,
    terminator: Option<usize>,
    transitions: LogProbTable,
    emissions: LogProbTable,
}

impl HmmModel {
    pub(crate) fn new(
        config: HmmConfig,
        tags: Quark,
        tokens: Quark,
        transitions: LogProbTable,
        emissions: LogProbTable,
    ) -> Self {
        let mut tags = tags;
        let start = tags.find_or_insert(&config.start_tag);
        let terminator = tags.to_id(&config.terminator);
        Self { config, tags, tokens, start, terminator, transitions, emissions }
    }

    /// Builds a model from explicit `(from, to, log_prob)` and `(tag, word, log_prob)`
    /// entries. Words are lowercased.
    pub fn from_log_probs(
        config: HmmConfig,
        transitions: &[(&str, &str, f64)],
        emissions: &[(&str, &str, f64)],
    ) -> Self {
        let mut tags = Quark::default();
        let mut tokens = Quark::default();
        tags.find_or_insert(&config.start_tag);
        let mut trans = LogProbTable::default();
        for &(src, dst, p) in transitions {
            let src = tags.find_or_insert(src);
            let dst = tags.find_or_insert(dst);
            trans.insert(src, dst, p);
        }
        let mut emit = LogProbTable::default();
        for &(tag, word, p) in emissions {
            let tag = tags.find_or_insert(tag);
            let word = tokens.find_or_insert(&word.to_lowercase());
            emit.insert(tag, word, p);
        }
        Self::new(config, tags, tokens, trans, emit)
    }

    /// The three-tag toy model (Noun, Verb, Adjective plus Conjunction) used by
    /// the `demo` command.
    pub fn sample() -> Self {
        let ln = f64::ln;
        Self::from_log_probs(
            HmmConfig::default(),
            &[
                ("#", "Noun", ln(2.0 / 7.0)),
                ("#", "Verb", ln(5.0 / 7.0)),
                ("Noun", "Adjective", ln(1.0)),
                ("Verb", "Conjunction", ln(2.0 / 8.0)),
                ("Verb", "Adjective", ln(6.0 / 8.0)),
                ("Conjunction", "Noun", ln(1.0 / 3.0)),
                ("Conjunction", "Verb", ln(1.0 / 3.0)),
                ("Conjunction", "Adjective", ln(1.0 / 3.0)),
                ("Adjective", "Noun", ln(2.0 / 9.0)),
                ("Adjective", "Verb", ln(6.0 / 9.0)),
                ("Adjective", "Conjunction", ln(1.0 / 9.0)),
            ],
            &[
                ("Noun", "book", ln(1.0)),
                ("Verb", "read", ln(5.0 / 12.0)),
                ("Verb", "write", ln(5.0 / 12.0)),
                ("Verb", "study", ln(2.0 / 12.0)),
                ("Conjunction", "and", ln(1.0)),
                ("Adjective", "interesting", ln(6.0 / 9.0)),
                ("Adjective", "difficult", ln(1.0 / 9.0)),
                ("Adjective", "enjoyable", ln(2.0 / 9.0)),
            ],
        )
    }

    pub fn tagger(&self) -> ViterbiTagger<'_> {
        ViterbiTagger::new(self)
    }

    pub fn config(&self) -> &HmmConfig {
        &self.config
    }

    pub fn tags(&self) -> &Quark {
        &self.tags
    }

    pub fn tokens(&self) -> &Quark {
        &self.tokens
    }

    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn is_terminator(&self, tag: usize) -> bool {
        self.terminator == Some(tag)
    }

    pub fn transitions(&self) -> &LogProbTable {
        &self.transitions
    }

    pub fn emissions(&self) -> &LogProbTable {
        &self.emissions
    }

    /// Log-probability of moving from tag `from` to tag `to`, if ever observed.
    pub fn transition(&self, from: &str, to: &str) -> Option<f64> {
        self.transitions.get(self.tags.to_id(from)?, self.tags.to_id(to)?)
    }

    /// Log-probability of `tag` emitting `word`, if ever observed.
    pub fn emission(&self, tag: &str, word: &str) -> Option<f64> {
        self.emissions.get(self.tags.to_id(tag)?, self.tokens.to_id(&word.to_lowercase())?)
    }

    /// Emission score used while decoding: the recorded log-probability, or the
    /// unseen penalty when the tag has no row, the token is out of vocabulary,
    /// or the pair was never observed.
    #[inline]
    pub(crate) fn emission_score(&self, tag: usize, token: Option<usize>) -> f64 {
        token
            .and_then(|token| self.emissions.get(tag, token))
            .unwrap_or(self.config.unseen_penalty)
    }

    fn tag_name(&self, id: usize) -> &str {
        self.tags.to_str(id).unwrap_or("?")
    }

    /// Writes both tables in a plain-text format, one `from\tto\tlog_prob` per line.
    pub fn dump<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        writeln!(w, "TRANSITIONS ({} tags)", self.num_tags())?;
        for (src, row) in self.transitions.rows() {
            for (dst, p) in row.iter() {
                writeln!(w, "{}\t{}\t{:.6}", self.tag_name(src), self.tag_name(dst), p)?;
            }
        }
        writeln!(w, "EMISSIONS ({} tokens)", self.num_tokens())?;
        for (tag, row) in self.emissions.rows() {
            for (token, p) in row.iter() {
                let token = self.tokens.to_str(token).unwrap_or("?");
                writeln!(w, "{}\t{}\t{:.6}", self.tag_name(tag), token, p)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rows_are_normalized() {
        let model = HmmModel::sample();
        for (src, _) in model.transitions().rows() {
            assert!((model.transitions().mass(src) - 1.0).abs() < 1e-9);
        }
        for (tag, _) in model.emissions().rows() {
            assert!((model.emissions().mass(tag) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn lookups() {
        let model = HmmModel::sample();
        assert_eq!(model.start(), 0);
        assert!((model.transition("#", "Verb").unwrap() - (5.0f64 / 7.0).ln()).abs() < 1e-12);
        assert_eq!(model.transition("Noun", "Verb"), None);
        assert_eq!(model.transition("Pronoun", "Verb"), None);
        assert_eq!(model.emission("Noun", "BOOK"), Some(0.0));
        assert_eq!(model.emission("Noun", "read"), None);
        assert!(model.terminator.is_none());
    }

    #[test]
    fn emission_score_falls_back_to_penalty() {
        let model = HmmModel::sample();
        let noun = model.tags().to_id("Noun").unwrap();
        let book = model.tokens().to_id("book");
        assert_eq!(model.emission_score(noun, book), 0.0);
        assert_eq!(model.emission_score(noun, model.tokens().to_id("read")), -100.0);
        assert_eq!(model.emission_score(noun, None), -100.0);
        assert_eq!(model.emission_score(model.start(), book), -100.0);
    }

    #[test]
    fn dump() {
        let model = HmmModel::sample();
        let mut buf = Vec::new();
        model.dump(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("TRANSITIONS (5 tags)\n#\tNoun\t"));
        assert!(text.contains("Adjective\tinteresting\t-0.405465\n"));
        assert_eq!(text.lines().count(), 2 + 11 + 8);
    }
}
