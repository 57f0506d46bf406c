use std::{collections::BTreeMap, fmt::Display, iter::zip};

use serde::Serialize;

/// Label-wise performance values.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LabelMeasure {
    /// Number of correct predictions.
    pub num_correct: usize,
    /// Number of occurrences of the label in the gold-standard data.
    pub num_observation: usize,
    /// Number of predictions.
    pub num_prediction: usize,
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

impl LabelMeasure {
    fn update(&mut self) {
        self.precision = 0.0;
        self.recall = 0.0;
        self.fmeasure = 0.0;
        if self.num_prediction > 0 {
            self.precision = self.num_correct as f64 / self.num_prediction as f64;
        }
        if self.num_observation > 0 {
            self.recall = self.num_correct as f64 / self.num_observation as f64;
        }
        if self.precision + self.recall > 0.0 {
            self.fmeasure = self.precision * self.recall * 2.0 / (self.precision + self.recall);
        }
    }
}

/// Token-level accuracy summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Accuracy {
    pub matches: usize,
    pub mismatches: usize,
    /// `matches / (matches + mismatches) * 100`, or 0 when nothing was compared.
    pub percent: f64,
}

/// Running comparison of predicted tag sequences against gold ones.
///
/// Sequences of different length are compared up to the shorter one; the
/// remaining positions are counted in `truncated` and in neither matches nor
/// mismatches.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Evaluation {
    tbl: BTreeMap<String, LabelMeasure>,
    matches: usize,
    mismatches: usize,
    truncated: usize,
    /// Number of sequences predicted entirely correctly.
    inst_total_correct: usize,
    inst_total_num: usize,
}

impl Evaluation {
    pub fn accumulate<R: AsRef<str>, P: AsRef<str>>(&mut self, reference: &[R], prediction: &[P]) {
        let mut matched = 0;
        for (r, p) in zip(reference, prediction) {
            let (r, p) = (r.as_ref(), p.as_ref());
            self.tbl.entry(r.to_string()).or_default().num_observation += 1;
            self.tbl.entry(p.to_string()).or_default().num_prediction += 1;
            if r == p {
                self.tbl.entry(r.to_string()).or_default().num_correct += 1;
                matched += 1;
            }
        }
        let compared = reference.len().min(prediction.len());
        self.matches += matched;
        self.mismatches += compared - matched;

        if reference.len() != prediction.len() {
            log::warn!(
                "sequence #{}: {} gold tags vs {} predicted, comparing the first {compared}",
                self.inst_total_num,
                reference.len(),
                prediction.len()
            );
            self.truncated += reference.len().abs_diff(prediction.len());
        } else if matched == compared {
            self.inst_total_correct += 1;
        }
        self.inst_total_num += 1;
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn mismatches(&self) -> usize {
        self.mismatches
    }

    pub fn truncated(&self) -> usize {
        self.truncated
    }

    pub fn num_sequences(&self) -> usize {
        self.inst_total_num
    }

    pub fn label(&self, label: &str) -> Option<&LabelMeasure> {
        self.tbl.get(label)
    }

    pub fn accuracy(&self) -> Accuracy {
        let total = self.matches + self.mismatches;
        let percent = if total > 0 { self.matches as f64 / total as f64 * 100.0 } else { 0.0 };
        Accuracy { matches: self.matches, mismatches: self.mismatches, percent }
    }

    /// Share of sequences tagged without a single error.
    pub fn sequence_accuracy(&self) -> f64 {
        if self.inst_total_num > 0 {
            self.inst_total_correct as f64 / self.inst_total_num as f64
        } else {
            0.0
        }
    }

    /// Fills in per-label precision, recall and F1 and returns the token accuracy.
    pub fn evaluate(&mut self) -> Accuracy {
        self.tbl.values_mut().for_each(LabelMeasure::update);
        self.accuracy()
    }

    /// Macro-averaged (precision, recall, F1) over labels seen in the gold data.
    pub fn macro_average(&self) -> (f64, f64, f64) {
        let observed: Vec<_> = self.tbl.values().filter(|m| m.num_observation > 0).collect();
        if observed.is_empty() {
            return (0.0, 0.0, 0.0);
        }
        let n = observed.len() as f64;
        let sum = observed
            .iter()
            .fold((0.0, 0.0, 0.0), |(p, r, f), m| (p + m.precision, r + m.recall, f + m.fmeasure));
        (sum.0 / n, sum.1 / n, sum.2 / n)
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Performance by label (#match, #model, #ref) (precision, recall, F1):")?;
        for (label, lev) in &self.tbl {
            if lev.num_observation == 0 {
                writeln!(f, "\t{}: ({}, {}, {}) (******, ******, ******)", label, lev.num_correct, lev.num_prediction, lev.num_observation)?;
            } else {
                writeln!(f, "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})", label, lev.num_correct, lev.num_prediction, lev.num_observation,
                    lev.precision, lev.recall, lev.fmeasure
                )?;
            }
        }
        let (p, r, f1) = self.macro_average();
        writeln!(f, "Macro-average precision, recall, F1: ({:.4}, {:.4}, {:.4})", p, r, f1)?;
        let acc = self.accuracy();
        writeln!(f, "{} words are tagged correctly, {} incorrectly", acc.matches, acc.mismatches)?;
        if self.truncated > 0 {
            writeln!(f, "{} words were not compared (length mismatch)", self.truncated)?;
        }
        writeln!(f, "Item accuracy: {:.2}%", acc.percent)?;
        writeln!(f, "Sequence accuracy: {}/{} => {:.4}", self.inst_total_correct, self.inst_total_num, self.sequence_accuracy())
    }
}
