use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::masonry::{masonry_span, GridSpan};
use super::registry::{CardId, ExpansionRegistry};
use super::title::{highlight_title, TitleSegment};

/// Card declared by a page when it mounts a board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardSpec {
    #[serde(default)]
    pub key: Option<String>,
    pub title: String,
    #[serde(default)]
    pub initially_expanded: bool,
    #[serde(default)]
    pub wide: bool,
}

impl CardSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            key: None,
            title: title.into(),
            initially_expanded: false,
            wide: false,
        }
    }

    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn expanded(mut self) -> Self {
        self.initially_expanded = true;
        self
    }
}

#[derive(Debug, Clone)]
struct BoardCard {
    id: CardId,
    title: String,
    wide: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub title: Vec<TitleSegment>,
    pub expanded: bool,
    pub wide: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<GridSpan>,
    pub action_label: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("card '{0}' appears twice on the board")]
    DuplicateCard(CardId),
    #[error("card '{0}' is not on this board")]
    UnknownCard(CardId),
    #[error("board '{0}' is not mounted")]
    UnknownView(ViewId),
    #[error("board store unavailable")]
    Unavailable,
}

/// Cards of one mounted view plus the registry that tracks their expansion.
#[derive(Debug, Clone, Default)]
pub struct CardBoard {
    registry: ExpansionRegistry,
    cards: Vec<BoardCard>,
}

impl CardBoard {
    pub fn mount(specs: Vec<CardSpec>) -> Result<Self, BoardError> {
        let mut registry = ExpansionRegistry::new();
        registry.reserve(specs.iter().filter_map(|spec| spec.key.as_deref()));
        let mut seen = HashSet::new();
        let mut cards = Vec::with_capacity(specs.len());

        for spec in specs {
            let id = registry.card_id(spec.key.as_deref());
            if !seen.insert(id.clone()) {
                return Err(BoardError::DuplicateCard(id));
            }
            if spec.initially_expanded {
                registry.mark_initially_expanded(&id);
            }
            cards.push(BoardCard {
                id,
                title: spec.title,
                wide: spec.wide,
            });
        }

        Ok(Self { registry, cards })
    }

    pub fn toggle(&mut self, id: &CardId) -> Result<bool, BoardError> {
        if !self.cards.iter().any(|card| &card.id == id) {
            return Err(BoardError::UnknownCard(id.clone()));
        }
        Ok(self.registry.toggle(id))
    }

    pub fn is_expanded(&self, id: &CardId) -> bool {
        self.registry.is_expanded(id)
    }

    pub fn cards(&self) -> Vec<CardView> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let expanded = self.registry.is_expanded(&card.id);
                CardView {
                    id: card.id.clone(),
                    title: highlight_title(&card.title),
                    expanded,
                    wide: card.wide,
                    span: masonry_span(index),
                    action_label: if expanded { "Read less" } else { "Read more" },
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub view_id: ViewId,
    pub cards: Vec<CardView>,
}

/// Mounted boards keyed by view. Unmounting drops the board and its registry.
#[derive(Debug, Default)]
pub struct BoardStore {
    boards: Mutex<HashMap<ViewId, CardBoard>>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self, specs: Vec<CardSpec>) -> Result<BoardView, BoardError> {
        let board = CardBoard::mount(specs)?;
        let view_id = ViewId::new();
        let cards = board.cards();
        self.boards
            .lock()
            .map_err(|_| BoardError::Unavailable)?
            .insert(view_id, board);

        info!(%view_id, cards = cards.len(), "card board mounted");
        Ok(BoardView { view_id, cards })
    }

    pub fn get(&self, view_id: ViewId) -> Result<BoardView, BoardError> {
        let boards = self.boards.lock().map_err(|_| BoardError::Unavailable)?;
        let board = boards
            .get(&view_id)
            .ok_or(BoardError::UnknownView(view_id))?;
        Ok(BoardView {
            view_id,
            cards: board.cards(),
        })
    }

    pub fn toggle(&self, view_id: ViewId, card: &CardId) -> Result<BoardView, BoardError> {
        let mut boards = self.boards.lock().map_err(|_| BoardError::Unavailable)?;
        let board = boards
            .get_mut(&view_id)
            .ok_or(BoardError::UnknownView(view_id))?;
        let expanded = board.toggle(card)?;

        debug!(%view_id, %card, expanded, "card toggled");
        Ok(BoardView {
            view_id,
            cards: board.cards(),
        })
    }

    pub fn unmount(&self, view_id: ViewId) -> Result<(), BoardError> {
        let removed = self
            .boards
            .lock()
            .map_err(|_| BoardError::Unavailable)?
            .remove(&view_id);

        match removed {
            Some(_) => {
                info!(%view_id, "card board unmounted");
                Ok(())
            }
            None => Err(BoardError::UnknownView(view_id)),
        }
    }
}
