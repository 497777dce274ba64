//! Card deck and the host's advancement state.
//! The deck ships as bundled JSON; nothing is persisted between sessions.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::config::ScratchConfig;
use crate::error::DeckError;

const BUNDLED_DECK: &str = include_str!("../assets/deck.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub message: String,
    /// Image shown above the message, if any.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub scratch: ScratchConfig,
    pub cards: Vec<Card>,
    /// Shown once every card has been revealed.
    #[serde(default = "default_closing")]
    pub closing: String,
}

fn default_closing() -> String {
    "Happy birthday \u{2665}".to_string()
}

impl Deck {
    pub fn from_json(raw: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_json::from_str(raw)?;
        if deck.cards.is_empty() {
            return Err(DeckError::Empty);
        }
        deck.scratch.validate()?;
        Ok(deck)
    }

    pub fn bundled() -> Result<Self, DeckError> {
        Self::from_json(BUNDLED_DECK)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GreetingAction {
    /// The current card reported its reveal.
    Revealed,
    /// Advance to the next card; ignored until the current one is revealed.
    Next,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GreetingState {
    pub total: usize,
    pub current: usize,
    pub revealed: bool,
}

impl GreetingState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current: 0,
            revealed: false,
        }
    }

    pub fn finished(&self) -> bool {
        self.current >= self.total
    }

    pub fn apply(&mut self, action: GreetingAction) {
        match action {
            GreetingAction::Revealed => {
                if !self.finished() {
                    self.revealed = true;
                }
            }
            GreetingAction::Next => {
                if self.revealed && !self.finished() {
                    self.current += 1;
                    self.revealed = false;
                }
            }
        }
    }
}

impl Reducible for GreetingState {
    type Action = GreetingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
