use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one expandable card within a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Which cards of a view are expanded.
///
/// Every view owns its own registry and hands it to its cards explicitly.
/// Cards marked initially expanded read as expanded until they are first
/// toggled; after that, set membership alone decides.
#[derive(Debug, Clone, Default)]
pub struct ExpansionRegistry {
    expanded: HashSet<CardId>,
    initially_expanded: HashSet<CardId>,
    toggled: HashSet<CardId>,
    claimed: HashSet<CardId>,
    next_anonymous: u64,
}

impl ExpansionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the caller's key when given, otherwise allocates an id unique to this registry.
    ///
    /// Allocated ids skip every id already handed out or reserved, so a caller
    /// key such as `card-1` is never reissued to an unkeyed card. Keep the
    /// returned id for the life of the card; it is not derived from content.
    pub fn card_id(&mut self, key: Option<&str>) -> CardId {
        match key {
            Some(key) => {
                let id = CardId::from(key);
                self.claimed.insert(id.clone());
                id
            }
            None => loop {
                self.next_anonymous += 1;
                let id = CardId(format!("card-{}", self.next_anonymous));
                if self.claimed.insert(id.clone()) {
                    break id;
                }
            },
        }
    }

    /// Claims caller keys up front so later allocations avoid them.
    pub fn reserve<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        self.claimed.extend(keys.into_iter().map(CardId::from));
    }

    pub fn mark_initially_expanded(&mut self, id: &CardId) {
        self.initially_expanded.insert(id.clone());
    }

    pub fn is_expanded(&self, id: &CardId) -> bool {
        if self.expanded.contains(id) {
            return true;
        }
        !self.toggled.contains(id) && self.initially_expanded.contains(id)
    }

    /// Flips the card and returns its new state. Unknown ids start collapsed.
    pub fn toggle(&mut self, id: &CardId) -> bool {
        let expand = !self.is_expanded(id);
        self.toggled.insert(id.clone());
        if expand {
            self.expanded.insert(id.clone());
        } else {
            self.expanded.remove(id);
        }
        expand
    }

    pub fn expanded_ids(&self) -> impl Iterator<Item = &CardId> {
        self.expanded.iter().chain(
            self.initially_expanded
                .iter()
                .filter(|id| !self.toggled.contains(*id) && !self.expanded.contains(*id)),
        )
    }
}
