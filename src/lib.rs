//! Hidden Markov Model part-of-speech tagging.
//!
//! [`estimate`] turns tag/word training pairs into a [`HmmModel`] holding
//! transition and emission log-probabilities; [`decode`] finds the most
//! probable tag sequence for a sentence with the Viterbi algorithm; and
//! [`evaluate`] scores a model against gold-tagged sentences.
//!
//! ```
//! use hmmtag::{estimate, decode, HmmConfig, TrainingPair};
//!
//! let pairs = [
//!     TrainingPair::from_lines("N V", "dogs bark"),
//!     TrainingPair::from_lines("N V N", "cats chase dogs"),
//! ];
//! let model = estimate(&pairs, HmmConfig::default()).unwrap();
//! assert_eq!(decode(&model, "Cats bark").unwrap(), ["N", "V"]);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod hmm;
pub mod quark;

pub use config::HmmConfig;
pub use dataset::{Dataset, TrainingPair};
pub use error::{Error, Result};
pub use evaluation::{Accuracy, Evaluation};
pub use hmm::{
    model::HmmModel,
    tagger::{tokenize, Tagger, ViterbiTagger},
    trainer::Trainer,
};

/// Counts and normalizes all pairs into a model. Fails on the first pair whose
/// tag and word sequences differ in length.
pub fn estimate<'a, I>(pairs: I, config: HmmConfig) -> Result<HmmModel>
where
    I: IntoIterator<Item = &'a TrainingPair>,
{
    let mut trainer = Trainer::new(config);
    for pair in pairs {
        trainer.append(pair)?;
    }
    Ok(trainer.train())
}

/// Most probable tag sequence for `sentence`, one tag per whitespace-delimited token.
pub fn decode(model: &HmmModel, sentence: &str) -> Result<Vec<String>> {
    model.tagger().tag(sentence)
}

/// Decodes every gold sentence and compares the result with its gold tags.
pub fn evaluate(model: &HmmModel, gold: &[(Vec<String>, String)]) -> Result<Evaluation> {
    let tagger = model.tagger();
    let mut evaluation = Evaluation::default();
    for (tags, sentence) in gold {
        let prediction = tagger.tag(sentence)?;
        evaluation.accumulate(tags.as_slice(), prediction.as_slice());
    }
    evaluation.evaluate();
    Ok(evaluation)
}
