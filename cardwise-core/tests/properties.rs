// Property checks for the scheduling model, the selector and sessions.
use cardwise_core::{
    apply_review, select_study_queue, sort_cards_by_dueness, Card, CardStatus, ReviewOutcome,
    StudyLimits, StudySession, DIFFICULTY_MAX,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn arb_status() -> impl Strategy<Value = CardStatus> {
    prop_oneof![
        Just(CardStatus::New),
        Just(CardStatus::Learning),
        Just(CardStatus::Review),
        Just(CardStatus::Relearning),
    ]
}

fn arb_outcome() -> impl Strategy<Value = ReviewOutcome> {
    prop_oneof![
        Just(ReviewOutcome::Again),
        Just(ReviewOutcome::Hard),
        Just(ReviewOutcome::Good),
        Just(ReviewOutcome::Easy),
    ]
}

/// Cards in a consistent state: new cards carry no interval.
fn arb_card() -> impl Strategy<Value = Card> {
    (
        arb_status(),
        0u32..400,
        proptest::option::of(-30i64..30),
        0u32..10,
        0u8..=5,
    )
        .prop_map(|(status, interval, due_in, lapses, difficulty)| {
            let mut c = Card::new_at(Uuid::new_v4(), "f", "b", now() - Duration::days(60));
            c.status = status;
            c.lapses = lapses;
            if status == CardStatus::New {
                c.interval_days = 0;
                c.difficulty = 0;
            } else {
                c.interval_days = interval;
                c.difficulty = difficulty;
                c.due_at = due_in.map(|d| now() + Duration::days(d));
            }
            c
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn correct_answers_never_shrink_early_intervals(
        card in arb_card().prop_filter("early state", |c| c.status != CardStatus::Review),
        easy in any::<bool>(),
    ) {
        let outcome = if easy { ReviewOutcome::Easy } else { ReviewOutcome::Good };
        let next = apply_review(&card, outcome, now());
        prop_assert!(next.interval_days >= card.interval_days);
        let expected = if card.status == CardStatus::Learning {
            CardStatus::Review
        } else {
            CardStatus::Learning
        };
        prop_assert_eq!(next.status, expected);
    }

    #[test]
    fn again_resets_interval_and_counts_one_lapse(card in arb_card()) {
        let next = apply_review(&card, ReviewOutcome::Again, now());
        prop_assert_eq!(next.interval_days, 0);
        prop_assert_eq!(next.lapses, card.lapses + 1);
        prop_assert_eq!(next.status, CardStatus::Relearning);
        prop_assert_eq!(next.due_at, Some(now()));
    }

    #[test]
    fn lapses_never_decrease(card in arb_card(), outcome in arb_outcome()) {
        let next = apply_review(&card, outcome, now());
        prop_assert!(next.lapses >= card.lapses);
        prop_assert_eq!(next.last_reviewed_at, Some(now()));
        prop_assert_eq!(next.difficulty, outcome.difficulty_score());
        prop_assert!(next.difficulty <= DIFFICULTY_MAX);
        prop_assert_eq!(next.id, card.id);
    }

    #[test]
    fn queue_respects_limits(
        cards in proptest::collection::vec(arb_card(), 0..60),
        new_per_day in 0usize..15,
        reviews_per_day in 0usize..15,
    ) {
        let limits = StudyLimits { new_per_day, reviews_per_day };
        let queue = select_study_queue(&cards, &limits, now());
        prop_assert!(queue.iter().filter(|c| c.is_new()).count() <= new_per_day);
        prop_assert!(queue.iter().filter(|c| !c.is_new()).count() <= reviews_per_day);
        prop_assert!(queue.iter().all(|c| c.is_eligible(now())));
    }

    #[test]
    fn dueness_sort_is_a_fixed_point(cards in proptest::collection::vec(arb_card(), 0..40)) {
        let mut once = cards.clone();
        sort_cards_by_dueness(&mut once);
        let mut twice = once.clone();
        sort_cards_by_dueness(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn accuracy_stays_in_bounds(outcomes in proptest::collection::vec(arb_outcome(), 0..30)) {
        let mut session = StudySession::create(Uuid::new_v4(), now());
        for outcome in &outcomes {
            session = session.add_review(Uuid::new_v4(), *outcome, 0, now()).unwrap();
        }
        let accuracy = session.accuracy();
        prop_assert!((0.0..=1.0).contains(&accuracy));
        prop_assert_eq!(session.cards_studied as usize, session.reviews.len());
        prop_assert!(session.cards_correct <= session.cards_studied);
        if outcomes.is_empty() {
            prop_assert_eq!(accuracy, 0.0);
        }
    }

    #[test]
    fn completing_again_changes_nothing(minutes in 0i64..600, later in 0i64..600) {
        let s = StudySession::create(Uuid::new_v4(), now());
        let once = s.complete(now() + Duration::minutes(minutes));
        let twice = once.complete(now() + Duration::minutes(minutes + later));
        prop_assert_eq!(once, twice);
    }
}
