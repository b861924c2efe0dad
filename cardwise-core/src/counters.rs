use crate::{Card, CardStatus, Deck};
use chrono::{DateTime, Utc};

/// Returns `deck` with its cached counters rebuilt from `cards`.
///
/// Review and learning counts only include cards that are due at `now`;
/// new cards are counted regardless. Callers decide when to run this.
pub fn recompute_counters(deck: &Deck, cards: &[Card], now: DateTime<Utc>) -> Deck {
    let mut next = deck.clone();
    next.card_count = cards.len();
    next.new_count = cards.iter().filter(|c| c.status == CardStatus::New).count();
    next.review_count = cards
        .iter()
        .filter(|c| c.status == CardStatus::Review && c.is_due(now))
        .count();
    next.learning_count = cards
        .iter()
        .filter(|c| c.status.is_learning() && c.is_due(now))
        .count();
    next
}
