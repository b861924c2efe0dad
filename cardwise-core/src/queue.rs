use crate::{sort_cards_by_dueness, Card, StudyLimits};
use chrono::{DateTime, Utc};

/// Builds the ordered list of cards to study from a deck's cards.
///
/// New cards are always eligible; other cards are eligible when undated or
/// due at `now`. Both groups are capped by `limits` after ordering, then the
/// union is ordered again. An empty result means nothing is due.
pub fn select_study_queue(cards: &[Card], limits: &StudyLimits, now: DateTime<Utc>) -> Vec<Card> {
    let mut due: Vec<Card> = cards
        .iter()
        .filter(|c| c.is_eligible(now))
        .cloned()
        .collect();
    sort_cards_by_dueness(&mut due);

    let (mut fresh, mut review): (Vec<Card>, Vec<Card>) =
        due.into_iter().partition(|c| c.is_new());
    fresh.truncate(limits.new_per_day);
    review.truncate(limits.reviews_per_day);

    let mut queue = fresh;
    queue.append(&mut review);
    sort_cards_by_dueness(&mut queue);
    queue
}
