/// The "selected movie" state machine owned by the presentation layer.
///
/// Selecting the currently open id closes it (toggle semantics); selecting
/// anything else starts a detail fetch for the new id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Loading(String),
    Shown(String),
}

impl Selection {
    /// Transition on a selection intent.
    pub fn select(self, imdb_id: &str) -> Selection {
        match self.selected_id() {
            Some(current) if current == imdb_id => Selection::Idle,
            _ => Selection::Loading(imdb_id.to_string()),
        }
    }

    /// Transition on detail-fetch completion. A completion for anything but
    /// the id currently loading is stale and changes nothing.
    pub fn loaded(self, imdb_id: &str) -> Selection {
        match self {
            Selection::Loading(current) if current == imdb_id => Selection::Shown(current),
            other => other,
        }
    }

    /// Explicit close from any state.
    pub fn close(self) -> Selection {
        Selection::Idle
    }

    pub fn selected_id(&self) -> Option<&str> {
        match self {
            Selection::Idle => None,
            Selection::Loading(id) | Selection::Shown(id) => Some(id),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Selection::Loading(_))
    }
}
