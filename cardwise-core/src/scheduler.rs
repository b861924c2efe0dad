//! Scheduling model: how a review outcome moves a card's interval, due date,
//! status and lapse count, plus the shared "dueness" ordering.

use crate::{Card, CardStatus, ReviewOutcome};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

const FACTOR_BASE: f64 = 2.5;
const FACTOR_STEP: f64 = 0.3;

/// Longest interval a review can produce, about a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Interval multiplier for a difficulty score, `2.5 - score * 0.3`.
///
/// A higher score gives a smaller factor: Again 2.2, Hard 1.9, Good 1.6,
/// Easy 1.0.
pub fn difficulty_factor(difficulty: u8) -> f64 {
    FACTOR_BASE - f64::from(difficulty) * FACTOR_STEP
}

/// Interval in days the card gets for `outcome`, ignoring any state change.
/// Scaled intervals are kept within `1..=MAX_INTERVAL_DAYS`.
pub fn next_interval(card: &Card, outcome: ReviewOutcome) -> u32 {
    if outcome == ReviewOutcome::Again {
        return 0;
    }
    if card.status == CardStatus::New {
        return 1;
    }
    let factor = difficulty_factor(outcome.difficulty_score());
    let scaled = (f64::from(card.interval_days) * factor).round();
    (scaled as u32).clamp(1, MAX_INTERVAL_DAYS)
}

/// Returns the card as it stands after being reviewed with `outcome` at `now`.
/// The input is left untouched so callers can keep it as an undo snapshot.
pub fn apply_review(card: &Card, outcome: ReviewOutcome, now: DateTime<Utc>) -> Card {
    let difficulty = outcome.difficulty_score();
    let interval = next_interval(card, outcome);

    let mut next = card.clone();
    if difficulty <= 1 {
        next.status = CardStatus::Relearning;
        next.lapses = card.lapses.saturating_add(1);
    } else if matches!(card.status, CardStatus::New | CardStatus::Relearning) {
        next.status = CardStatus::Learning;
    } else {
        next.status = CardStatus::Review;
    }

    next.interval_days = interval;
    next.due_at = Some(
        now.checked_add_signed(Duration::days(i64::from(interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
    );
    next.last_reviewed_at = Some(now);
    next.difficulty = difficulty;

    debug!(
        card = %card.id,
        %outcome,
        from = %card.status,
        to = %next.status,
        interval,
        lapses = next.lapses,
        "card reviewed"
    );
    next
}

/// The interval each outcome would produce, in `ReviewOutcome::ALL` order.
pub fn preview_intervals(card: &Card) -> [u32; 4] {
    ReviewOutcome::ALL.map(|outcome| next_interval(card, outcome))
}

/// Stable ordering used for queues and display: status priority first, then
/// ascending due date with undated cards leading.
pub fn sort_cards_by_dueness(cards: &mut [Card]) {
    // `Option` orders `None` before any `Some`.
    cards.sort_by_key(|c| (c.status.priority(), c.due_at));
}

pub fn format_interval(days: u32) -> String {
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{days}d"),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}
