//! Study session lifecycle: `Active <-> Paused -> Completed`.
//!
//! Every transition returns a new `StudySession`; the receiver is never
//! modified, so a rejected call leaves the caller's value as it was.

use crate::{CardId, CardReview, CoreError, DeckId, ReviewOutcome, SessionStatus, StudySession};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

impl StudySession {
    pub fn create(deck_id: DeckId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            deck_id,
            started_at: now,
            ended_at: None,
            status: SessionStatus::Active,
            cards_studied: 0,
            cards_correct: 0,
            reviews: Vec::new(),
        }
    }

    pub fn add_review(
        &self,
        card_id: CardId,
        review_type: ReviewOutcome,
        time_spent_ms: u64,
        now: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        self.require(SessionStatus::Active, "review in")?;

        let mut next = self.clone();
        next.reviews.push(CardReview {
            card_id,
            review_type,
            reviewed_at: now,
            time_spent_ms,
        });
        next.cards_studied += 1;
        if review_type.is_correct() {
            next.cards_correct += 1;
        }
        debug!(
            session = %self.id,
            card = %card_id,
            outcome = %review_type,
            studied = next.cards_studied,
            correct = next.cards_correct,
            "review recorded"
        );
        Ok(next)
    }

    pub fn pause(&self) -> Result<Self, CoreError> {
        self.require(SessionStatus::Active, "pause")?;
        Ok(self.with_status(SessionStatus::Paused))
    }

    pub fn resume(&self) -> Result<Self, CoreError> {
        self.require(SessionStatus::Paused, "resume")?;
        Ok(self.with_status(SessionStatus::Active))
    }

    /// Ends the session. Completing an already completed session returns it
    /// unchanged, keeping the original end time.
    pub fn complete(&self, now: DateTime<Utc>) -> Self {
        if self.is_completed() {
            return self.clone();
        }
        let mut next = self.with_status(SessionStatus::Completed);
        next.ended_at = Some(now);
        next
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Elapsed time from start to end, or to `now` while still open.
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        self.ended_at.unwrap_or(now) - self.started_at
    }

    /// Share of correct reviews in `[0, 1]`; 0 before any review.
    pub fn accuracy(&self) -> f64 {
        if self.cards_studied == 0 {
            0.0
        } else {
            f64::from(self.cards_correct) / f64::from(self.cards_studied)
        }
    }

    fn require(&self, expected: SessionStatus, action: &'static str) -> Result<(), CoreError> {
        if self.status == expected {
            return Ok(());
        }
        warn!(session = %self.id, status = %self.status, action, "rejected session transition");
        Err(CoreError::InvalidTransition {
            from: self.status,
            action,
        })
    }

    fn with_status(&self, status: SessionStatus) -> Self {
        debug!(session = %self.id, from = %self.status, to = %status, "session transition");
        let mut next = self.clone();
        next.status = status;
        next
    }
}
