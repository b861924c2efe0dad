use crate::{Card, CardId, CoreError, Deck, DeckId, SessionId, StudySession};
use async_trait::async_trait;

pub mod memory;

pub use memory::MemoryRepo;

/// Card/deck/session store. Engine functions never call it; only the study
/// orchestration does, with the store passed in explicitly.
///
/// Saves replace the stored value wholesale. Stores that accept concurrent
/// writers must serialize updates per card and per session themselves.
#[async_trait]
pub trait Repository: Send + Sync {
    // Decks
    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError>;
    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError>;
    async fn save_deck(&self, deck: &Deck) -> Result<(), CoreError>;
    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError>;

    // Cards
    async fn get_card(&self, id: CardId) -> Result<Card, CoreError>;
    async fn cards_by_deck(&self, deck_id: DeckId) -> Result<Vec<Card>, CoreError>;
    async fn save_card(&self, card: &Card) -> Result<(), CoreError>;
    async fn delete_card(&self, id: CardId) -> Result<(), CoreError>;

    // Sessions
    async fn get_session(&self, id: SessionId) -> Result<StudySession, CoreError>;
    async fn save_session(&self, session: &StudySession) -> Result<(), CoreError>;
}
