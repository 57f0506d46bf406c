use crate::{
    error::{Error, Result},
    quark::StringTable,
};

use super::{
    lattice::{DecodeLattice, Step},
    model::HmmModel,
};

/// Lowercases a sentence and splits it on whitespace.
pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence.to_lowercase().split_whitespace().map(str::to_string).collect()
}

pub trait Tagger {
    /// Fills `labels` with the best tag id per token and returns the path score.
    /// Tokens must already be lowercased.
    fn viterbi(&self, tokens: &[&str], labels: &mut Vec<usize>) -> Result<f64>;

    /// Score of a given tag path, starting from the start tag.
    /// `f64::NEG_INFINITY` when the path uses an unrecorded transition.
    fn score(&self, tokens: &[&str], labels: &[usize]) -> f64;

    /// Tags a raw sentence, one tag per whitespace-delimited token.
    fn tag(&self, sentence: &str) -> Result<Vec<String>>;
}

/// Viterbi decoder over a borrowed [`HmmModel`]. Holds no per-sentence state,
/// so one tagger may serve any number of sentences.
#[derive(Debug, Clone, Copy)]
pub struct ViterbiTagger<'a> {
    model: &'a HmmModel,
}

impl<'a> ViterbiTagger<'a> {
    pub fn new(model: &'a HmmModel) -> Self {
        Self { model }
    }

    /// Scores every recorded transition out of the frontier into `step`.
    /// Tags without outgoing transitions contribute nothing. The terminator is
    /// only entered when `terminator` is set.
    fn advance(&self, frontier: &[(usize, f64)], token: Option<usize>, step: &mut Step, terminator: bool) {
        let model = self.model;
        for &(src, score) in frontier {
            for (dst, trans) in model.transitions().successors(src) {
                if !terminator && model.is_terminator(dst) {
                    continue;
                }
                step.relax(src, dst, score + trans + model.emission_score(dst, token));
            }
        }
    }

    /// Runs the forward pass and returns the full lattice.
    ///
    /// When no frontier tag has a successor, the step is reseeded from the start
    /// tag. If the start tag only leads to the terminator, the terminator is
    /// scored as a regular destination for that step.
    pub fn lattice(&self, tokens: &[&str]) -> Result<DecodeLattice> {
        let model = self.model;
        let mut lattice = DecodeLattice::default();
        let mut frontier = vec![(model.start(), 0.0)];
        for (t, token) in tokens.iter().enumerate() {
            let obs = model.tokens().to_id(token);
            let mut step = Step::default();
            self.advance(&frontier, obs, &mut step, false);
            if step.is_empty() {
                let seed = [(model.start(), lattice.best_score().unwrap_or(0.0))];
                if !lattice.is_empty() {
                    log::warn!("no successors at token #{t} ({token:?}), restarting from the start tag");
                    step = Step::restarted();
                    self.advance(&seed, obs, &mut step, false);
                }
                if step.is_empty() {
                    log::debug!("start tag only reaches the terminator at token #{t}");
                    self.advance(&seed, obs, &mut step, true);
                }
                if step.is_empty() {
                    return Err(Error::UntrainedModel);
                }
            }
            frontier.clear();
            frontier.extend(step.frontier());
            lattice.push(step);
        }
        Ok(lattice)
    }
}

impl Tagger for ViterbiTagger<'_> {
    fn viterbi(&self, tokens: &[&str], labels: &mut Vec<usize>) -> Result<f64> {
        labels.clear();
        if tokens.is_empty() {
            return Ok(0.0);
        }
        let lattice = self.lattice(tokens)?;
        let path = lattice.backtrack().ok_or(Error::UntrainedModel)?;
        labels.extend(path);
        lattice.best_score().ok_or(Error::UntrainedModel)
    }

    fn score(&self, tokens: &[&str], labels: &[usize]) -> f64 {
        let model = self.model;
        let mut prev = model.start();
        let mut r = 0.0;
        for (token, &tag) in tokens.iter().zip(labels) {
            match model.transitions().get(prev, tag) {
                Some(p) => r += p,
                None => return f64::NEG_INFINITY,
            }
            r += model.emission_score(tag, model.tokens().to_id(token));
            prev = tag;
        }
        r
    }

    fn tag(&self, sentence: &str) -> Result<Vec<String>> {
        let tokens = tokenize(sentence);
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let mut labels = Vec::with_capacity(tokens.len());
        let score = self.viterbi(&tokens, &mut labels)?;
        log::debug!("tagged {} tokens, score {score:.4}", tokens.len());
        let tags = self.model.tags();
        Ok(labels.iter().map(|&id| tags.to_str(id).unwrap_or_default().to_string()).collect())
    }
}
