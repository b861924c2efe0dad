use cardwise_core::{apply_review, recompute_counters, Card, CardStatus, Deck, ReviewOutcome, StudySession};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap()
}

#[test]
fn good_from_new() {
    let deck = Deck::new_at("Test", "sam", t0());
    let card = Card::new_at(deck.id, "hola", "hello", t0());

    let c = apply_review(&card, ReviewOutcome::Good, t0());

    assert_eq!(c.status, CardStatus::Learning);
    assert_eq!(c.interval_days, 1);
    assert_eq!(c.due_at, Some(t0() + Duration::days(1)));
    assert_eq!(c.last_reviewed_at, Some(t0()));
    assert_eq!(c.difficulty, 3);
    assert_eq!(c.lapses, 0);
}

#[test]
fn again_from_review() {
    let deck = Deck::new_at("Test", "sam", t0());
    let mut card = Card::new_at(deck.id, "x", "y", t0() - Duration::days(40));
    card.status = CardStatus::Review;
    card.interval_days = 10;
    card.difficulty = 3;
    card.lapses = 2;

    let c = apply_review(&card, ReviewOutcome::Again, t0());

    assert_eq!(c.status, CardStatus::Relearning);
    assert_eq!(c.interval_days, 0);
    assert_eq!(c.lapses, 3);
    assert_eq!(c.due_at, Some(t0()));
    assert_eq!(c.difficulty, 1);
}

#[test]
fn new_card_failing_goes_to_relearning() {
    let card = Card::new_at(uuid::Uuid::new_v4(), "a", "b", t0());
    let c = apply_review(&card, ReviewOutcome::Again, t0());
    assert_eq!(c.status, CardStatus::Relearning);
    assert_eq!(c.interval_days, 0);
    assert_eq!(c.lapses, 1);
}

#[test]
fn progression_new_learning_review() {
    let card = Card::new_at(uuid::Uuid::new_v4(), "a", "b", t0());

    let c1 = apply_review(&card, ReviewOutcome::Good, t0());
    assert_eq!((c1.status, c1.interval_days), (CardStatus::Learning, 1));

    let t1 = t0() + Duration::days(1);
    let c2 = apply_review(&c1, ReviewOutcome::Good, t1);
    assert_eq!((c2.status, c2.interval_days), (CardStatus::Review, 2));

    let t2 = t1 + Duration::days(2);
    let c3 = apply_review(&c2, ReviewOutcome::Hard, t2);
    assert_eq!((c3.status, c3.interval_days), (CardStatus::Review, 4));
    assert_eq!(c3.due_at, Some(t2 + Duration::days(4)));

    let c4 = apply_review(&c3, ReviewOutcome::Again, t2);
    assert_eq!(c4.status, CardStatus::Relearning);
    let c5 = apply_review(&c4, ReviewOutcome::Easy, t2);
    assert_eq!((c5.status, c5.interval_days), (CardStatus::Learning, 1));
    assert_eq!(c5.lapses, 1);
}

#[test]
fn session_with_three_reviews() {
    let deck = Deck::new_at("Test", "sam", t0());
    let cards: Vec<Card> = (0..3).map(|i| Card::new_at(deck.id, format!("q{i}"), "a", t0())).collect();
    let outcomes = [ReviewOutcome::Good, ReviewOutcome::Again, ReviewOutcome::Easy];

    let mut session = StudySession::create(deck.id, t0());
    for (card, outcome) in cards.iter().zip(outcomes) {
        session = session.add_review(card.id, outcome, 1_000, t0()).unwrap();
    }

    assert_eq!(session.cards_studied, 3);
    assert_eq!(session.cards_correct, 2);
    assert!((session.accuracy() - 0.667).abs() < 0.001);
}

#[test]
fn deck_counters_for_mixed_cards() {
    let deck = Deck::new_at("Test", "sam", t0());
    let new = Card::new_at(deck.id, "n", "n", t0());
    let mut due = Card::new_at(deck.id, "d", "d", t0());
    due.status = CardStatus::Review;
    due.interval_days = 3;
    due.due_at = Some(t0() - Duration::days(1));
    let mut later = due.clone();
    later.id = uuid::Uuid::new_v4();
    later.due_at = Some(t0() + Duration::days(3));

    let d = recompute_counters(&deck, &[new, due, later], t0());
    assert_eq!(d.new_count, 1);
    assert_eq!(d.review_count, 1);
    assert_eq!(d.learning_count, 0);
    assert_eq!(d.card_count, 3);
}
