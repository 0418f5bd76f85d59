//! Attempt Plan
//!
//! Explicit iterator over (model, attempt) pairs for the document
//! analysis loop. Keeping the schedule as its own state machine makes the
//! retry/advance/exhaustion logic testable in isolation from any network
//! call.
//!
//! State machine per analysis call:
//! `START -> (MODEL_i, ATTEMPT_j) -> {SUCCESS | rate-limited: same model,
//! j+1, bounded | other failure: MODEL_i+1} -> ... -> SUCCESS | EXHAUSTED`

/// One scheduled attempt against a candidate model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt<'a> {
    pub model: &'a str,
    /// 1-based attempt number within this model
    pub attempt: u32,
}

/// Bounded (model, attempt) schedule over an ordered candidate list
#[derive(Debug)]
pub struct AttemptPlan<'a> {
    models: &'a [String],
    max_attempts_per_model: u32,
    model_index: usize,
    attempt: u32,
}

impl<'a> AttemptPlan<'a> {
    pub fn new(models: &'a [String], max_attempts_per_model: u32) -> Self {
        Self {
            models,
            max_attempts_per_model,
            model_index: 0,
            attempt: 1,
        }
    }

    /// The next scheduled attempt, or `None` once every combination is
    /// spent. Retries of one model are yielded consecutively; the bound
    /// rolls over to the next model. Advancement is lazy so that
    /// [`skip_model`](Self::skip_model) after a model's final attempt
    /// cannot jump past the following candidate.
    pub fn next_attempt(&mut self) -> Option<Attempt<'a>> {
        if self.attempt > self.max_attempts_per_model {
            self.advance();
        }

        let model = self.models.get(self.model_index)?;
        let scheduled = Attempt {
            model,
            attempt: self.attempt,
        };
        self.attempt += 1;

        Some(scheduled)
    }

    /// Abandon the model of the last yielded attempt; the next attempt
    /// starts on the next candidate.
    pub fn skip_model(&mut self) {
        self.advance();
    }

    fn advance(&mut self) {
        self.model_index += 1;
        self.attempt = 1;
    }
}
