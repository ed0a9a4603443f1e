use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::action::Action;
use crate::carousel::Carousel;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::event::Event;
use crate::listing::{self, Page};
use crate::types::{CarouselImage, DetailRecord, ListItem};

/// Cards per grid row. Cursor movement and the grid renderer both use it.
pub const GRID_COLUMNS: usize = 4;

pub struct App {
    // List data
    pub items: Vec<ListItem>,
    pub search_term: String,
    pub current_page: usize,
    pub page_size: usize,
    /// Card under the cursor, relative to the current page
    pub cursor: usize,

    // Detail modal
    pub modal_open: bool,
    pub selected: Option<DetailRecord>,
    pub detail_loading: bool,

    pub carousel: Carousel,
    pub search_mode: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub should_quit: bool,

    limit: u32,
    detail_load_id: u64,
    detail_task: Option<JoinHandle<()>>,
    catalog: Arc<dyn Catalog>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        config: &Config,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let images: Vec<CarouselImage> = config
            .view
            .carousel_ids
            .iter()
            .map(|&id| CarouselImage::new(id, catalog.artwork_url(id)))
            .collect();
        let carousel = Carousel::new(images, config.view.carousel_interval());
        if carousel.is_empty() {
            tracing::debug!("no carousel ids configured, carousel disabled");
        }

        Self {
            items: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            page_size: config.view.page_size,
            cursor: 0,

            modal_open: false,
            selected: None,
            detail_loading: false,

            carousel,
            search_mode: false,
            loading: false,
            error: None,
            notice: None,
            should_quit: false,

            limit: config.api.limit,
            detail_load_id: 0,
            detail_task: None,
            catalog,
            action_tx,
        }
    }

    pub fn catalog_name(&self) -> &str {
        self.catalog.name()
    }

    pub fn artwork_url(&self, id: u32) -> String {
        self.catalog.artwork_url(id)
    }

    /// Generation of the most recent detail request
    pub fn detail_load_id(&self) -> u64 {
        self.detail_load_id
    }

    /// Filtered, paginated view of `items` for the current page
    pub fn page(&self) -> Page<'_> {
        Page::build(&self.items, &self.search_term, self.current_page, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        listing::total_pages(
            listing::filter(&self.items, &self.search_term).len(),
            self.page_size,
        )
    }

    pub fn selected_item(&self) -> Option<&ListItem> {
        self.page().items.get(self.cursor).copied()
    }

    /// Catalog entry with the given id, if it is in the fetched list
    pub fn item_by_id(&self, id: u32) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    /// No-op unless `page` is within `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
            self.cursor = 0;
        }
    }

    /// Any change to the term sends the view back to page 1.
    pub fn set_search_term(&mut self, term: String) {
        self.search_term = term;
        self.current_page = 1;
        self.cursor = 0;
    }

    /// Keep `current_page` within `[1, max(1, total_pages)]` and the cursor on a card.
    fn clamp_position(&mut self) {
        let total = self.total_pages().max(1);
        self.current_page = self.current_page.clamp(1, total);
        let on_page = self.page().items.len();
        self.cursor = self.cursor.min(on_page.saturating_sub(1));
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Tick => Action::Tick,
            Event::Key(key) => self.handle_key(key),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if self.search_mode {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => Action::ExitSearchMode,
                KeyCode::Backspace => Action::SearchBackspace,
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Action::ClearSearch
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Action::SearchInput(c)
                }
                _ => Action::None,
            };
        }

        if self.modal_open {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Backspace => {
                    Action::CloseModal
                }
                KeyCode::Char('o') => Action::OpenArtwork,
                KeyCode::Char('y') => Action::YankArtwork,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc => {
                if self.search_term.is_empty() {
                    Action::Quit
                } else {
                    Action::ClearSearch
                }
            }
            KeyCode::Char('/') => Action::EnterSearchMode,
            KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
            KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
            KeyCode::Char('h') | KeyCode::Left => Action::CursorLeft,
            KeyCode::Char('l') | KeyCode::Right => Action::CursorRight,
            KeyCode::Char('n') | KeyCode::PageDown => Action::NextPage,
            KeyCode::Char('p') | KeyCode::PageUp => Action::PrevPage,
            KeyCode::Char('g') | KeyCode::Home => Action::FirstPage,
            KeyCode::Char('G') | KeyCode::End => Action::LastPage,
            KeyCode::Enter => match self.selected_item() {
                Some(item) => Action::LoadDetail(item.url.clone()),
                None => Action::None,
            },
            KeyCode::Char(c @ '1'..='9') => Action::GoToPage(c as usize - '0' as usize),
            KeyCode::Char('o') => Action::OpenArtwork,
            KeyCode::Char('y') => Action::YankArtwork,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        if !action.is_background() {
            self.error = None;
            self.notice = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                self.carousel.tick(Instant::now());
            }

            // Card grid
            Action::CursorUp => {
                if self.cursor >= GRID_COLUMNS {
                    self.cursor -= GRID_COLUMNS;
                }
            }
            Action::CursorDown => {
                if self.cursor + GRID_COLUMNS < self.page().items.len() {
                    self.cursor += GRID_COLUMNS;
                }
            }
            Action::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            Action::CursorRight => {
                if self.cursor + 1 < self.page().items.len() {
                    self.cursor += 1;
                }
            }

            // Pages
            Action::NextPage => self.go_to_page(self.current_page + 1),
            Action::PrevPage => self.go_to_page(self.current_page.saturating_sub(1)),
            Action::FirstPage => self.go_to_page(1),
            Action::LastPage => self.go_to_page(self.total_pages()),
            Action::GoToPage(page) => self.go_to_page(page),

            // List
            Action::LoadList => {
                self.loading = true;
                self.spawn_load_list();
            }
            Action::ListLoaded(items) => {
                tracing::debug!(count = items.len(), "list loaded");
                self.loading = false;
                self.items = items;
                self.clamp_position();
            }
            Action::ListFailed(msg) => {
                tracing::warn!(error = %msg, "list fetch failed");
                self.loading = false;
                self.items.clear();
                self.clamp_position();
                self.error = Some(msg);
            }

            // Detail modal
            Action::LoadDetail(url) => self.load_detail(url),
            Action::DetailLoaded(record, load_id) => {
                if load_id != self.detail_load_id {
                    tracing::debug!(load_id, current = self.detail_load_id, "dropping stale detail");
                    return;
                }
                self.detail_loading = false;
                self.selected = Some(*record);
                self.detail_task = None;
            }
            Action::DetailFailed(msg, load_id) => {
                if load_id != self.detail_load_id {
                    tracing::debug!(load_id, current = self.detail_load_id, "dropping stale detail failure");
                    return;
                }
                tracing::warn!(error = %msg, "detail fetch failed");
                self.detail_loading = false;
                self.selected = None;
                self.detail_task = None;
            }
            Action::CloseModal => self.close_modal(),

            // Search
            Action::EnterSearchMode => {
                self.search_mode = true;
            }
            Action::ExitSearchMode => {
                self.search_mode = false;
            }
            Action::SearchInput(c) => {
                let mut term = std::mem::take(&mut self.search_term);
                term.push(c);
                self.set_search_term(term);
            }
            Action::SearchBackspace => {
                let mut term = std::mem::take(&mut self.search_term);
                term.pop();
                self.set_search_term(term);
            }
            Action::ClearSearch => {
                self.set_search_term(String::new());
            }

            // Artwork
            Action::OpenArtwork => {
                if let Some(url) = self.artwork_target() {
                    if let Err(e) = open::that_detached(&url) {
                        self.error = Some(format!("Failed to open {}: {}", url, e));
                    }
                }
            }
            Action::YankArtwork => {
                if let Some(url) = self.artwork_target() {
                    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url.clone())) {
                        Ok(()) => self.notice = Some(format!("Copied {}", url)),
                        Err(e) => self.error = Some(format!("Clipboard error: {}", e)),
                    }
                }
            }

            Action::None => {}
        }
    }

    /// Artwork URL for whatever the user is looking at: the open modal's
    /// record, otherwise the card under the cursor.
    pub fn artwork_target(&self) -> Option<String> {
        let id = if self.modal_open {
            self.selected.as_ref().map(|record| record.id)
        } else {
            self.selected_item().and_then(ListItem::id)
        }?;
        Some(self.catalog.artwork_url(id))
    }

    /// Open the modal and fetch the record behind `url`. Any request still in
    /// flight is cancelled and its result, should it arrive, is ignored.
    pub fn load_detail(&mut self, url: String) {
        self.detail_load_id += 1;
        if let Some(task) = self.detail_task.take() {
            task.abort();
        }
        self.modal_open = true;
        self.detail_loading = true;
        self.selected = None;
        self.detail_task = Some(self.spawn_load_detail(url, self.detail_load_id));
    }

    pub fn close_modal(&mut self) {
        self.detail_load_id += 1;
        if let Some(task) = self.detail_task.take() {
            task.abort();
        }
        self.modal_open = false;
        self.detail_loading = false;
        self.selected = None;
    }

    fn spawn_load_list(&self) {
        let tx = self.action_tx.clone();
        let catalog = Arc::clone(&self.catalog);
        let limit = self.limit;
        tokio::spawn(async move {
            tracing::debug!(limit, "fetching list");
            match catalog.list(limit).await {
                Ok(items) => {
                    tx.send(Action::ListLoaded(items)).ok();
                }
                Err(e) => {
                    tx.send(Action::ListFailed(e.to_string())).ok();
                }
            }
        });
    }

    fn spawn_load_detail(&self, url: String, load_id: u64) -> JoinHandle<()> {
        let tx = self.action_tx.clone();
        let catalog = Arc::clone(&self.catalog);
        tokio::spawn(async move {
            tracing::debug!(%url, load_id, "fetching detail");
            match catalog.detail(&url).await {
                Ok(record) => {
                    tx.send(Action::DetailLoaded(Box::new(record), load_id)).ok();
                }
                Err(e) => {
                    tx.send(Action::DetailFailed(e.to_string(), load_id)).ok();
                }
            }
        })
    }
}
