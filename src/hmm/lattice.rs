use std::collections::HashMap;

/// Best way found so far to reach `tag` at one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub tag: usize,
    pub score: f64,
    /// Predecessor tag; `None` when the step was reseeded from the start tag.
    pub back: Option<usize>,
}

/// One position of the lattice: the frontier reached by consuming one token.
///
/// Cells are kept in the order their tag was first reached, so the next step
/// iterates the frontier in a fixed order.
#[derive(Debug, Default, Clone)]
pub struct Step {
    cells: Vec<Cell>,
    index: HashMap<usize, usize>,
    best: Option<usize>,
    restarted: bool,
}

impl Step {
    pub(crate) fn restarted() -> Self {
        Self { restarted: true, ..Default::default() }
    }

    /// Offers a candidate `score` for reaching `dst` from `src`. Only a strictly
    /// better score replaces an existing cell, so the first candidate wins ties.
    pub(crate) fn relax(&mut self, src: usize, dst: usize, score: f64) {
        let back = if self.restarted { None } else { Some(src) };
        let i = match self.index.get(&dst) {
            Some(&i) => {
                if score <= self.cells[i].score {
                    return;
                }
                self.cells[i].score = score;
                self.cells[i].back = back;
                i
            }
            None => {
                self.index.insert(dst, self.cells.len());
                self.cells.push(Cell { tag: dst, score, back });
                self.cells.len() - 1
            }
        };
        // step-global best over every candidate considered in this step
        match self.best {
            Some(b) if self.cells[b].score >= score => {}
            _ => self.best = Some(i),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_restart(&self) -> bool {
        self.restarted
    }

    pub fn cell(&self, tag: usize) -> Option<&Cell> {
        self.index.get(&tag).map(|&i| &self.cells[i])
    }

    /// `(tag, score)` pairs forming the frontier for the next token.
    pub fn frontier(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.cells.iter().map(|c| (c.tag, c.score))
    }

    /// The highest-scoring candidate of the step.
    pub fn best(&self) -> Option<&Cell> {
        self.best.map(|i| &self.cells[i])
    }
}

/// Per-sentence decoding state: one [`Step`] per consumed token.
#[derive(Debug, Default, Clone)]
pub struct DecodeLattice {
    steps: Vec<Step>,
}

impl DecodeLattice {
    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Score of the best candidate in the most recent step.
    pub fn best_score(&self) -> Option<f64> {
        self.steps.last().and_then(Step::best).map(|c| c.score)
    }

    /// Rebuilds the tag path: seeds from the best tag of the final step, then
    /// follows backpointers toward the first step. A reseeded step continues
    /// from the best tag of the step before it.
    pub fn backtrack(&self) -> Option<Vec<usize>> {
        let mut tag = self.steps.last()?.best()?.tag;
        let mut path = Vec::with_capacity(self.steps.len());
        path.push(tag);
        for t in (1..self.steps.len()).rev() {
            tag = match self.steps[t].cell(tag)?.back {
                Some(prev) => prev,
                None => self.steps[t - 1].best()?.tag,
            };
            path.push(tag);
        }
        path.reverse();
        Some(path)
    }
}
