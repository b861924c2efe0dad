use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

pub type DeckId = Uuid;
pub type CardId = Uuid;
pub type SessionId = Uuid;

pub const DIFFICULTY_UNRATED: u8 = 0;
pub const DIFFICULTY_MAX: u8 = 5;

/// Learning state of a card. `New` and `Relearning` are entry/recovery states,
/// `Review` is the steady state.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    #[default]
    New,
    Learning,
    Review,
    Relearning,
}

impl CardStatus {
    /// Study priority: lower sorts first.
    pub fn priority(self) -> u8 {
        match self {
            CardStatus::New => 0,
            CardStatus::Relearning => 1,
            CardStatus::Learning => 2,
            CardStatus::Review => 3,
        }
    }

    pub fn is_learning(self) -> bool {
        matches!(self, CardStatus::Learning | CardStatus::Relearning)
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardStatus::New => "new",
            CardStatus::Learning => "learning",
            CardStatus::Review => "review",
            CardStatus::Relearning => "relearning",
        };
        f.write_str(s)
    }
}

/// How well the learner recalled a card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Again,
    Hard,
    Good,
    Easy,
}

impl ReviewOutcome {
    pub const ALL: [ReviewOutcome; 4] = [
        ReviewOutcome::Again,
        ReviewOutcome::Hard,
        ReviewOutcome::Good,
        ReviewOutcome::Easy,
    ];

    /// Fixed difficulty score stored on the card after a review.
    pub fn difficulty_score(self) -> u8 {
        match self {
            ReviewOutcome::Again => 1,
            ReviewOutcome::Hard => 2,
            ReviewOutcome::Good => 3,
            ReviewOutcome::Easy => 5,
        }
    }

    /// Good and Easy count towards session accuracy.
    pub fn is_correct(self) -> bool {
        matches!(self, ReviewOutcome::Good | ReviewOutcome::Easy)
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewOutcome::Again => "again",
            ReviewOutcome::Hard => "hard",
            ReviewOutcome::Good => "good",
            ReviewOutcome::Easy => "easy",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub deck_id: DeckId,
    pub front: String,
    pub back: String,
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,

    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// 0 means unrated, otherwise the score of the last outcome (1..=5).
    pub difficulty: u8,
    pub status: CardStatus,
    /// `None` means always due.
    pub due_at: Option<DateTime<Utc>>,
    pub lapses: u32,
    pub interval_days: u32,
}

impl Card {
    pub fn new(deck_id: DeckId, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self::new_at(deck_id, front, back, Utc::now())
    }

    pub fn new_at(
        deck_id: DeckId,
        front: impl Into<String>,
        back: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            deck_id,
            front: front.into(),
            back: back.into(),
            tags: BTreeSet::new(),
            created_at,
            last_reviewed_at: None,
            difficulty: DIFFICULTY_UNRATED,
            status: CardStatus::New,
            due_at: None,
            lapses: 0,
            interval_days: 0,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_new(&self) -> bool {
        self.status == CardStatus::New
    }

    /// A card with no due date, or one at or before `now`, is due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at.map_or(true, |due| due <= now)
    }

    /// New cards are eligible for study regardless of their due date.
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        self.is_new() || self.is_due(now)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub id: DeckId,
    pub title: String,
    pub description: Option<String>,
    pub owner: String,
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub last_studied_at: Option<DateTime<Utc>>,

    // Cached counters, only written by `recompute_counters`.
    pub card_count: usize,
    pub new_count: usize,
    pub review_count: usize,
    pub learning_count: usize,
}

impl Deck {
    pub fn new(title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::new_at(title, owner, Utc::now())
    }

    pub fn new_at(
        title: impl Into<String>,
        owner: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            owner: owner.into(),
            tags: BTreeSet::new(),
            created_at,
            last_studied_at: None,
            card_count: 0,
            new_count: 0,
            review_count: 0,
            learning_count: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Paused,
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Active => "active",
            SessionStatus::Paused => "paused",
            SessionStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// One entry of a session's review log. Never mutated after creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardReview {
    pub card_id: CardId,
    pub review_type: ReviewOutcome,
    pub reviewed_at: DateTime<Utc>,
    pub time_spent_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudySession {
    pub id: SessionId,
    pub deck_id: DeckId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub cards_studied: u32,
    pub cards_correct: u32,
    pub reviews: Vec<CardReview>,
}

/// Per-user daily caps applied when building a study queue.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyLimits {
    #[serde(default = "default_new_per_day")]
    pub new_per_day: usize,
    #[serde(default = "default_reviews_per_day")]
    pub reviews_per_day: usize,
}

fn default_new_per_day() -> usize {
    20
}

fn default_reviews_per_day() -> usize {
    100
}

impl Default for StudyLimits {
    fn default() -> Self {
        Self {
            new_per_day: default_new_per_day(),
            reviews_per_day: default_reviews_per_day(),
        }
    }
}
