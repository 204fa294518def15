//! Run report: one outcome per artifact, orphan, and invalid manifest entry.

/// Result of one publish or unpublish attempt (or a skip before any attempt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    /// No remote call was made; the reason says why.
    Skipped(String),
    /// The unit failed. `code` carries the remote status when one was
    /// received; connection-level failures have no code.
    Failed { code: Option<u16>, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Publish,
    Unpublish,
}

/// One reported unit of work. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub action: Action,
    pub name: String,
    pub type_name: String,
    pub status: OutcomeStatus,
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, OutcomeStatus::Skipped(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success)
    }
}

/// Ordered aggregation of every outcome in one run.
///
/// Created empty at run start, appended to throughout, and discarded after
/// the caller has made its exit-code decision. A run is overall failed iff
/// at least one outcome failed; skips alone are not failure.
#[derive(Debug, Default)]
pub struct ReconciliationReport {
    outcomes: Vec<Outcome>,
}

impl ReconciliationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    pub fn extend(&mut self, outcomes: impl IntoIterator<Item = Outcome>) {
        self.outcomes.extend(outcomes);
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}
