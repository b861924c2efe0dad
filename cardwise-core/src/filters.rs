use crate::{Card, CardStatus};
use chrono::{DateTime, Utc};

pub fn filter_by_text(cards: &[Card], query: &str) -> Vec<Card> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return cards.to_vec();
    }
    cards
        .iter()
        .filter(|c| {
            c.front.to_lowercase().contains(&q)
                || c.back.to_lowercase().contains(&q)
                || c.tags.iter().any(|t| t.to_lowercase().contains(&q))
        })
        .cloned()
        .collect()
}

pub fn filter_by_tag(cards: &[Card], tag: &str) -> Vec<Card> {
    let q = tag.trim().to_lowercase();
    cards
        .iter()
        .filter(|c| c.tags.iter().any(|t| t.to_lowercase() == q))
        .cloned()
        .collect()
}

pub fn filter_by_status(cards: &[Card], want: CardStatus) -> Vec<Card> {
    cards.iter().filter(|c| c.status == want).cloned().collect()
}

/// Cards eligible for study at `now`: new, undated, or past due.
pub fn filter_due(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    cards.iter().filter(|c| c.is_eligible(now)).cloned().collect()
}
