use crate::{CardId, CardReview, DeckId, ReviewOutcome};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub total: u32,
    pub again: u32,
    pub hard: u32,
    pub good: u32,
    pub easy: u32,
    pub time_spent_ms: u64,
}

impl Totals {
    pub fn record(&mut self, r: &CardReview) {
        self.total += 1;
        self.time_spent_ms += r.time_spent_ms;
        match r.review_type {
            ReviewOutcome::Again => self.again += 1,
            ReviewOutcome::Hard => self.hard += 1,
            ReviewOutcome::Good => self.good += 1,
            ReviewOutcome::Easy => self.easy += 1,
        }
    }

    pub fn correct(&self) -> u32 {
        self.good + self.easy
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct()) / f64::from(self.total)
        }
    }

    pub fn average_time_ms(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.time_spent_ms / u64::from(self.total)
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StatsSummary {
    pub totals: Totals,
    pub per_day: BTreeMap<NaiveDate, Totals>,
}

pub fn summarize(reviews: &[CardReview]) -> StatsSummary {
    let mut summary = StatsSummary::default();
    for r in reviews {
        summary.totals.record(r);
        let d = r.reviewed_at.date_naive();
        summary.per_day.entry(d).or_default().record(r);
    }
    summary
}

/// Consecutive days with at least one review, counting back from `today`.
pub fn daily_streak(reviews: &[CardReview], today: NaiveDate) -> u32 {
    let per_day = summarize(reviews).per_day;
    let mut streak = 0u32;
    let mut day = today;
    while per_day.get(&day).is_some_and(|t| t.total > 0) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

pub fn per_deck_totals(
    reviews: &[CardReview],
    card_to_deck: &HashMap<CardId, DeckId>,
) -> HashMap<DeckId, Totals> {
    let mut map: HashMap<DeckId, Totals> = HashMap::new();
    for r in reviews {
        if let Some(deck_id) = card_to_deck.get(&r.card_id) {
            map.entry(*deck_id).or_default().record(r);
        }
    }
    map
}
