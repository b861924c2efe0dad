use crate::cli::opts::*;
use crate::config::{self, Config};
use crate::deckfile::DeckFile;

use anyhow::{Context, Result};
use cardwise_core::{
    end_study, format_interval, pause_study, preview_intervals, resume_study,
    select_study_queue, start_study, submit_review, undo_last, Card, Clock, Deck, MemoryRepo,
    Repository, ReviewOutcome, StudySession, StudyStart, SystemClock,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{stdin, stdout, Write};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

pub async fn run_cli(args: Cli) -> Result<()> {
    let config = config::load(args.config.as_deref())?;
    match args.cmd {
        Command::Queue(cmd) => queue_cmd(&config, cmd).await,
        Command::Study(cmd) => study_cmd(&config, cmd).await,
    }
}

async fn open_deck(path: &Path, clock: &dyn Clock) -> Result<(MemoryRepo, Deck)> {
    let file = DeckFile::read(path)?;
    let repo = MemoryRepo::new();
    let deck = file.seed(&repo, clock.now()).await?;
    debug!(deck = %deck.id, cards = deck.card_count, "deck loaded");
    Ok((repo, deck))
}

async fn queue_cmd(config: &Config, cmd: QueueCmd) -> Result<()> {
    let clock = SystemClock;
    let limits = cmd.limits.apply(config.limits);
    let (repo, deck) = open_deck(&cmd.deck_file, &clock).await?;

    let cards = repo.cards_by_deck(deck.id).await?;
    let queue = select_study_queue(&cards, &limits, clock.now());

    if cmd.json {
        let rows: Vec<QueueRow> = queue.iter().map(QueueRow::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if queue.is_empty() {
        println!("no cards due");
        return Ok(());
    }
    for c in &queue {
        let due = c.due_at.map_or_else(|| "-".to_string(), |d| d.to_rfc3339());
        println!("{}\t{}\t{}\t{}", c.id, c.status, due, c.front);
    }
    Ok(())
}

async fn study_cmd(config: &Config, cmd: StudyCmd) -> Result<()> {
    let clock = SystemClock;
    let limits = cmd.limits.apply(config.limits);
    let (repo, deck) = open_deck(&cmd.deck_file, &clock).await?;

    let mut run = match start_study(&repo, &clock, deck.id, &limits).await? {
        StudyStart::NothingDue => {
            println!("no cards due");
            return Ok(());
        }
        StudyStart::Started(run) => run,
    };
    let total = run.queue().len();

    while let Some(card) = run.current_card().cloned() {
        println!("\n[{}/{}] {}", run.current_index() + 1, total, deck.title);
        println!("Q: {}", card.front);
        let shown = Instant::now();
        prompt_enter("[enter=show]")?;
        println!("A: {}", card.back);
        print_choices(&card, run.can_undo());

        let action = loop {
            let line = read_line("> ")?;
            if line.is_empty() {
                // stdin closed
                break Action::Quit;
            }
            match parse_action(&line) {
                Some(a) => break a,
                None => println!("enter 1-4, u, p, or q"),
            }
        };

        match action {
            Action::Grade(outcome) => {
                let spent = u64::try_from(shown.elapsed().as_millis()).unwrap_or(u64::MAX);
                let out = submit_review(&repo, &clock, &mut run, outcome, spent).await?;
                println!("→ next due in {}", format_interval(out.card.interval_days));
                if out.finished {
                    break;
                }
            }
            Action::Undo => {
                if undo_last(&repo, &mut run).await? {
                    println!("undone");
                } else {
                    println!("nothing to undo");
                }
            }
            Action::Pause => {
                pause_study(&repo, &mut run).await?;
                prompt_enter("[paused, enter=resume]")?;
                resume_study(&repo, &mut run).await?;
            }
            Action::Quit => break,
        }
    }

    let session = end_study(&repo, &clock, &mut run)
        .await
        .context("closing study session")?;
    let summary = SessionSummary::new(&session, clock.now());
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "\nstudied {} · correct {} · accuracy {:.0}% · {}s",
            summary.cards_studied,
            summary.cards_correct,
            summary.accuracy * 100.0,
            summary.duration_secs
        );
    }
    Ok(())
}

// ===== Helpers =====
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Grade(ReviewOutcome),
    Undo,
    Pause,
    Quit,
}

fn parse_action(s: &str) -> Option<Action> {
    match s.trim().to_lowercase().as_str() {
        "1" | "a" | "again" => Some(Action::Grade(ReviewOutcome::Again)),
        "2" | "h" | "hard" => Some(Action::Grade(ReviewOutcome::Hard)),
        "3" | "g" | "good" => Some(Action::Grade(ReviewOutcome::Good)),
        "4" | "e" | "easy" => Some(Action::Grade(ReviewOutcome::Easy)),
        "u" | "undo" => Some(Action::Undo),
        "p" | "pause" => Some(Action::Pause),
        "q" | "quit" => Some(Action::Quit),
        _ => None,
    }
}

fn print_choices(card: &Card, can_undo: bool) {
    let [again, hard, good, easy] = preview_intervals(card).map(format_interval);
    let undo = if can_undo { ", u=undo" } else { "" };
    println!("[1=Again ({again}), 2=Hard ({hard}), 3=Good ({good}), 4=Easy ({easy}){undo}, p=pause, q=quit]");
}

fn prompt_enter(label: &str) -> Result<()> { print!("{label}"); stdout().flush().ok(); let mut s = String::new(); stdin().read_line(&mut s)?; Ok(()) }
fn read_line(prompt: &str) -> Result<String> { print!("{prompt}"); stdout().flush().ok(); let mut s = String::new(); stdin().read_line(&mut s)?; Ok(s) }

#[derive(Serialize)]
struct QueueRow {
    id: String,
    status: String,
    due_at: Option<DateTime<Utc>>,
    front: String,
}

impl From<&Card> for QueueRow {
    fn from(c: &Card) -> Self {
        Self {
            id: c.id.to_string(),
            status: c.status.to_string(),
            due_at: c.due_at,
            front: c.front.clone(),
        }
    }
}

#[derive(Serialize)]
struct SessionSummary {
    session_id: String,
    status: String,
    cards_studied: u32,
    cards_correct: u32,
    accuracy: f64,
    duration_secs: i64,
}

impl SessionSummary {
    fn new(s: &StudySession, now: DateTime<Utc>) -> Self {
        Self {
            session_id: s.id.to_string(),
            status: s.status.to_string(),
            cards_studied: s.cards_studied,
            cards_correct: s.cards_correct,
            accuracy: s.accuracy(),
            duration_secs: s.duration(now).num_seconds(),
        }
    }
}
