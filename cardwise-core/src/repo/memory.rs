use crate::{Card, CardId, CoreError, Deck, DeckId, SessionId, StudySession};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryRepo {
    decks: RwLock<HashMap<DeckId, Deck>>,
    cards: RwLock<HashMap<CardId, Card>>,
    sessions: RwLock<HashMap<SessionId, StudySession>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl crate::repo::Repository for MemoryRepo {
    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError> {
        self.decks
            .read()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("deck"))
    }

    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError> {
        let mut v: Vec<Deck> = self.decks.read().values().cloned().collect();
        v.sort_by_key(|d| d.created_at);
        Ok(v)
    }

    async fn save_deck(&self, deck: &Deck) -> Result<(), CoreError> {
        let mut m = self.decks.write();
        let taken = m.values().any(|d| {
            d.id != deck.id && d.owner == deck.owner && d.title.eq_ignore_ascii_case(&deck.title)
        });
        if taken {
            return Err(CoreError::Conflict("deck title already exists"));
        }
        m.insert(deck.id, deck.clone());
        Ok(())
    }

    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError> {
        self.decks
            .write()
            .remove(&id)
            .ok_or(CoreError::NotFound("deck"))?;
        self.cards.write().retain(|_, c| c.deck_id != id);
        self.sessions.write().retain(|_, s| s.deck_id != id);
        Ok(())
    }

    async fn get_card(&self, id: CardId) -> Result<Card, CoreError> {
        self.cards
            .read()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("card"))
    }

    async fn cards_by_deck(&self, deck_id: DeckId) -> Result<Vec<Card>, CoreError> {
        if !self.decks.read().contains_key(&deck_id) {
            return Err(CoreError::NotFound("deck"));
        }
        let mut v: Vec<Card> = self
            .cards
            .read()
            .values()
            .filter(|c| c.deck_id == deck_id)
            .cloned()
            .collect();
        v.sort_by_key(|c| c.created_at);
        Ok(v)
    }

    async fn save_card(&self, card: &Card) -> Result<(), CoreError> {
        if !self.decks.read().contains_key(&card.deck_id) {
            return Err(CoreError::NotFound("deck"));
        }
        self.cards.write().insert(card.id, card.clone());
        Ok(())
    }

    async fn delete_card(&self, id: CardId) -> Result<(), CoreError> {
        self.cards
            .write()
            .remove(&id)
            .ok_or(CoreError::NotFound("card"))?;
        Ok(())
    }

    async fn get_session(&self, id: SessionId) -> Result<StudySession, CoreError> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("session"))
    }

    async fn save_session(&self, session: &StudySession) -> Result<(), CoreError> {
        if !self.decks.read().contains_key(&session.deck_id) {
            return Err(CoreError::NotFound("deck"));
        }
        self.sessions.write().insert(session.id, session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Repository;

    #[tokio::test]
    async fn cards_follow_their_deck() {
        let repo = MemoryRepo::new();
        let deck = Deck::new("Kanji", "ken");
        repo.save_deck(&deck).await.unwrap();
        let card = Card::new(deck.id, "水", "water");
        repo.save_card(&card).await.unwrap();

        assert_eq!(repo.get_card(card.id).await.unwrap(), card);
        assert_eq!(repo.cards_by_deck(deck.id).await.unwrap().len(), 1);

        repo.delete_deck(deck.id).await.unwrap();
        assert_eq!(repo.get_card(card.id).await, Err(CoreError::NotFound("card")));
    }

    #[tokio::test]
    async fn decks_list_oldest_first_and_cards_delete_once() {
        use chrono::{Duration, TimeZone, Utc};

        let t0 = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        let repo = MemoryRepo::new();
        let later = Deck::new_at("Verbs", "ken", t0 + Duration::days(2));
        let earlier = Deck::new_at("Nouns", "ken", t0);
        repo.save_deck(&later).await.unwrap();
        repo.save_deck(&earlier).await.unwrap();

        let ids: Vec<_> = repo.list_decks().await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![earlier.id, later.id]);

        let card = Card::new_at(earlier.id, "猫", "cat", t0);
        repo.save_card(&card).await.unwrap();
        repo.delete_card(card.id).await.unwrap();
        assert!(repo.cards_by_deck(earlier.id).await.unwrap().is_empty());
        assert_eq!(repo.delete_card(card.id).await, Err(CoreError::NotFound("card")));
    }

    #[tokio::test]
    async fn orphan_card_is_rejected() {
        let repo = MemoryRepo::new();
        let card = Card::new(uuid::Uuid::new_v4(), "a", "b");
        assert_eq!(repo.save_card(&card).await, Err(CoreError::NotFound("deck")));
    }

    #[tokio::test]
    async fn duplicate_title_for_same_owner_conflicts() {
        let repo = MemoryRepo::new();
        repo.save_deck(&Deck::new("Verbs", "ken")).await.unwrap();
        assert_eq!(
            repo.save_deck(&Deck::new("verbs", "ken")).await,
            Err(CoreError::Conflict("deck title already exists"))
        );
        repo.save_deck(&Deck::new("Verbs", "mia")).await.unwrap();
    }
}
