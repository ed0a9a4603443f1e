use crate::types::{DetailRecord, ListItem};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Tick,

    // Card grid
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,

    // Pages
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GoToPage(usize),

    // List
    LoadList,
    ListLoaded(Vec<ListItem>),
    ListFailed(String),

    // Detail modal: results carry the load_id of the request that produced them
    LoadDetail(String),
    DetailLoaded(Box<DetailRecord>, u64),
    DetailFailed(String, u64),
    CloseModal,

    // Search
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,
    ClearSearch,

    // Artwork
    OpenArtwork,
    YankArtwork,

    None,
}

impl Action {
    /// Actions that don't come from the user. These leave the status line alone.
    pub fn is_background(&self) -> bool {
        matches!(
            self,
            Action::Tick
                | Action::None
                | Action::ListLoaded(_)
                | Action::ListFailed(_)
                | Action::DetailLoaded(..)
                | Action::DetailFailed(..)
        )
    }
}
