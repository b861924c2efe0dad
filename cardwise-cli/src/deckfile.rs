//! TOML deck descriptions used to seed a study store.
//!
//! ```toml
//! title = "Capitals"
//! tags = ["geo"]
//!
//! [[cards]]
//! front = "France"
//! back = "Paris"
//! tags = ["europe"]
//! ```

use anyhow::{bail, Context, Result};
use cardwise_core::{refresh_deck, Card, Deck, Repository};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_OWNER: &str = "local";

#[derive(Debug, Clone, Deserialize)]
pub struct DeckFile {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cards: Vec<CardEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardEntry {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DeckFile {
    pub fn parse(text: &str) -> Result<Self> {
        let file: DeckFile = toml::from_str(text)?;
        if file.title.trim().is_empty() {
            bail!("deck title is empty");
        }
        for (i, c) in file.cards.iter().enumerate() {
            if c.front.trim().is_empty() || c.back.trim().is_empty() {
                bail!("card {} has an empty side", i + 1);
            }
        }
        Ok(file)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading deck file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing deck file {}", path.display()))
    }

    /// Creates the deck and its cards in `repo`, all new as of `now`.
    pub async fn seed<R: Repository + ?Sized>(&self, repo: &R, now: DateTime<Utc>) -> Result<Deck> {
        let owner = self.owner.as_deref().unwrap_or(DEFAULT_OWNER);
        let mut deck = Deck::new_at(&self.title, owner, now);
        deck.description = self.description.clone();
        deck.tags = self.tags.iter().cloned().collect();
        repo.save_deck(&deck).await?;

        for entry in &self.cards {
            let card = Card::new_at(deck.id, &entry.front, &entry.back, now)
                .with_tags(entry.tags.iter().cloned());
            repo.save_card(&card).await?;
        }
        Ok(refresh_deck(repo, deck.id, now).await?)
    }
}
