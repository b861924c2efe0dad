//! Drives a study run against a store: builds the queue, feeds reviews through
//! the scheduler and the session, keeps the cursor, and refreshes the deck
//! when the run ends.
//!
//! The store and clock are always passed in. Nothing here holds global state.

use crate::{
    apply_review, recompute_counters, select_study_queue, Card, Clock, CoreError, Deck, DeckId,
    Repository, ReviewOutcome, StudyLimits, StudySession,
};
use chrono::{DateTime, Utc};
use tracing::info;

/// Prior values restored by `undo_last`.
#[derive(Clone, Debug)]
struct UndoEntry {
    card: Card,
    session: StudySession,
}

/// Caller-owned cursor over a study queue plus the session it feeds.
#[derive(Clone, Debug)]
pub struct StudyRun {
    queue: Vec<Card>,
    current_index: usize,
    session: StudySession,
    undo: Vec<UndoEntry>,
}

impl StudyRun {
    pub fn new(session: StudySession, queue: Vec<Card>) -> Self {
        Self {
            queue,
            current_index: 0,
            session,
            undo: Vec::new(),
        }
    }

    pub fn session(&self) -> &StudySession {
        &self.session
    }

    pub fn queue(&self) -> &[Card] {
        &self.queue
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.queue.get(self.current_index)
    }

    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.current_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.queue.len()
    }

    pub fn can_undo(&self) -> bool {
        self.session.is_active() && !self.undo.is_empty()
    }
}

#[derive(Debug)]
pub enum StudyStart {
    /// No card is due. Not an error.
    NothingDue,
    Started(StudyRun),
}

#[derive(Clone, Debug)]
pub struct ReviewSubmission {
    pub card: Card,
    /// The queue ran out and the session was completed.
    pub finished: bool,
}

pub async fn start_study<R: Repository + ?Sized>(
    repo: &R,
    clock: &dyn Clock,
    deck_id: DeckId,
    limits: &StudyLimits,
) -> Result<StudyStart, CoreError> {
    let now = clock.now();
    let cards = repo.cards_by_deck(deck_id).await?;
    let queue = select_study_queue(&cards, limits, now);
    if queue.is_empty() {
        info!(deck = %deck_id, "nothing due");
        return Ok(StudyStart::NothingDue);
    }

    let session = StudySession::create(deck_id, now);
    repo.save_session(&session).await?;
    info!(deck = %deck_id, session = %session.id, queued = queue.len(), "study started");
    Ok(StudyStart::Started(StudyRun::new(session, queue)))
}

/// Reviews the card under the cursor and advances. The card is re-read from
/// the store so the scheduler sees its latest saved state.
pub async fn submit_review<R: Repository + ?Sized>(
    repo: &R,
    clock: &dyn Clock,
    run: &mut StudyRun,
    outcome: ReviewOutcome,
    time_spent_ms: u64,
) -> Result<ReviewSubmission, CoreError> {
    let now = clock.now();
    let card_id = run
        .current_card()
        .map(|c| c.id)
        .ok_or(CoreError::Invalid("study queue is exhausted"))?;
    let session = run.session.add_review(card_id, outcome, time_spent_ms, now)?;

    let before = repo.get_card(card_id).await?;
    let after = apply_review(&before, outcome, now);
    repo.save_card(&after).await?;
    repo.save_session(&session).await?;

    run.undo.push(UndoEntry {
        card: before,
        session: std::mem::replace(&mut run.session, session),
    });
    run.queue[run.current_index] = after.clone();
    run.current_index += 1;

    let finished = run.is_exhausted();
    if finished {
        close_run(repo, run, now).await?;
    }
    Ok(ReviewSubmission {
        card: after,
        finished,
    })
}

/// Restores the card and session to how they were before the last review.
/// Returns `false` when there is nothing to undo.
pub async fn undo_last<R: Repository + ?Sized>(
    repo: &R,
    run: &mut StudyRun,
) -> Result<bool, CoreError> {
    if !run.session.is_active() {
        return Err(CoreError::InvalidTransition {
            from: run.session.status,
            action: "undo in",
        });
    }
    let Some(entry) = run.undo.pop() else {
        return Ok(false);
    };

    repo.save_card(&entry.card).await?;
    repo.save_session(&entry.session).await?;
    run.current_index -= 1;
    run.queue[run.current_index] = entry.card;
    run.session = entry.session;
    Ok(true)
}

pub async fn pause_study<R: Repository + ?Sized>(
    repo: &R,
    run: &mut StudyRun,
) -> Result<(), CoreError> {
    let paused = run.session.pause()?;
    repo.save_session(&paused).await?;
    run.session = paused;
    Ok(())
}

pub async fn resume_study<R: Repository + ?Sized>(
    repo: &R,
    run: &mut StudyRun,
) -> Result<(), CoreError> {
    let resumed = run.session.resume()?;
    repo.save_session(&resumed).await?;
    run.session = resumed;
    Ok(())
}

/// Ends the run early. Ending a run that already completed is a no-op.
pub async fn end_study<R: Repository + ?Sized>(
    repo: &R,
    clock: &dyn Clock,
    run: &mut StudyRun,
) -> Result<StudySession, CoreError> {
    if !run.session.is_completed() {
        close_run(repo, run, clock.now()).await?;
    }
    Ok(run.session.clone())
}

/// Rebuilds a deck's counters from the store's cards and saves the deck.
pub async fn refresh_deck<R: Repository + ?Sized>(
    repo: &R,
    deck_id: DeckId,
    now: DateTime<Utc>,
) -> Result<Deck, CoreError> {
    let deck = repo.get_deck(deck_id).await?;
    let cards = repo.cards_by_deck(deck_id).await?;
    let deck = recompute_counters(&deck, &cards, now);
    repo.save_deck(&deck).await?;
    Ok(deck)
}

async fn close_run<R: Repository + ?Sized>(
    repo: &R,
    run: &mut StudyRun,
    now: DateTime<Utc>,
) -> Result<(), CoreError> {
    let session = run.session.complete(now);
    repo.save_session(&session).await?;
    run.session = session;
    run.undo.clear();

    let mut deck = repo.get_deck(run.session.deck_id).await?;
    if run.session.cards_studied > 0 {
        deck.last_studied_at = run.session.ended_at;
    }
    let cards = repo.cards_by_deck(deck.id).await?;
    let deck = recompute_counters(&deck, &cards, now);
    repo.save_deck(&deck).await?;

    info!(
        session = %run.session.id,
        studied = run.session.cards_studied,
        correct = run.session.cards_correct,
        "study completed"
    );
    Ok(())
}
