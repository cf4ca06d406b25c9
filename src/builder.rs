use crate::alignment::Mode;
use crate::dc::DcEngine;
use crate::dp::DpEngine;
use crate::scoring::ScoringModel;
use crate::utils::{base_case_len_for_budget, DEFAULT_BASE_CASE_LEN};

/// Configures either engine over a shared scoring model.
///
/// ```
/// use dc_align::{Aligner, AlignerBuilder, ScoringModel};
///
/// let scoring = ScoringModel::simple(2, -5, -5);
/// let dc = AlignerBuilder::new(&scoring).local().with_base_case_len(4).build_dc();
/// let set = dc.align("GTC", "AAAAGTCAAAA").unwrap();
/// assert_eq!(set.score(), 6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AlignerBuilder<'a> {
    scoring: &'a ScoringModel,
    mode: Mode,
    base_case_len: Option<usize>,
}

impl<'a> AlignerBuilder<'a> {
    pub fn new(scoring: &'a ScoringModel) -> Self {
        Self {
            scoring,
            mode: Mode::default(),
            base_case_len: None,
        }
    }
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
    pub fn global(self) -> Self {
        self.mode(Mode::Global)
    }
    pub fn local(self) -> Self {
        self.mode(Mode::Local)
    }
    pub fn with_base_case_len(mut self, base_case_len: usize) -> Self {
        self.base_case_len = Some(base_case_len);
        self
    }
    /// Largest base case whose full-matrix subproblems stay within
    /// `max_cells` cells when the longer input has `longest` residues.
    pub fn with_cell_budget(mut self, max_cells: usize, longest: usize) -> Self {
        self.base_case_len = Some(base_case_len_for_budget(max_cells, longest));
        self
    }
    pub fn build_dp(self) -> DpEngine<'a> {
        DpEngine::new(self.scoring, self.mode)
    }
    pub fn build_dc(self) -> DcEngine<'a> {
        let base = self.base_case_len.unwrap_or(DEFAULT_BASE_CASE_LEN).max(1);
        DcEngine::with_base_case_len(self.scoring, self.mode, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Aligner;

    #[test]
    fn defaults() {
        let sc = ScoringModel::default();
        let b = AlignerBuilder::new(&sc);
        assert_eq!(b.build_dp().mode(), Mode::Global);
        assert_eq!(b.build_dc().base_case_len(), DEFAULT_BASE_CASE_LEN);
    }

    #[test]
    fn budget_sets_base_case() {
        let sc = ScoringModel::default();
        let dc = AlignerBuilder::new(&sc).with_cell_budget(1_100, 10).build_dc();
        assert_eq!(dc.base_case_len(), 99);
    }

    #[test]
    fn zero_base_case_clamped() {
        let sc = ScoringModel::default();
        let dc = AlignerBuilder::new(&sc).with_base_case_len(0).build_dc();
        assert_eq!(dc.base_case_len(), 1);
    }
}
