//! Application state management for fitdex
//!
//! This module contains the main application state, handling keyboard input,
//! queuing background requests, and applying their results.
//!
//! Every screen change bumps a generation counter. Requests carry the
//! generation they were issued under, and results for an older generation
//! are dropped: a screen that has been left never receives late data.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::cli::{StartScreen, StartupConfig};
use crate::data::chat::GREETING;
use crate::data::{
    all_categories, CatalogItem, Category, CategoryKind, ChatMessage, Exercise, VideoSummary,
};
use crate::detail::LoadedExercise;
use crate::error::MessageKey;
use crate::worker::{AppEvent, Request};

/// Which screen is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Landing screen
    Home,
    /// Body part and equipment pickers
    Search,
    /// Exercises for one category
    Category(Category),
    /// One exercise by id
    Detail(String),
    /// Fitness assistant conversation
    Chat,
}

/// State of one piece of remote data
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(MessageKey),
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value),
            _ => None,
        }
    }

    fn from_result(result: Result<T, MessageKey>) -> Self {
        match result {
            Ok(value) => Remote::Ready(value),
            Err(message) => Remote::Failed(message),
        }
    }
}

/// Maximum scroll offset in the detail view; the renderer clamps further
const MAX_SCROLL: u16 = 200;

/// Main application struct managing state and data
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Screens to return to on `Esc`
    history: Vec<Screen>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Active tab on the search screen
    pub search_kind: CategoryKind,
    /// Selected row on the search screen
    pub search_index: usize,
    /// Reference catalogs from wger, keyed by tab
    pub catalogs: HashMap<CategoryKind, Remote<Vec<CatalogItem>>>,
    /// Exercises for the current category
    pub exercises: Remote<Vec<Exercise>>,
    /// Category `exercises` belongs to
    exercises_for: Option<Category>,
    /// Selected row on the category screen
    pub exercise_index: usize,
    /// Exercise on the detail screen
    pub detail: Remote<LoadedExercise>,
    /// Related videos on the detail screen
    pub videos: Remote<Vec<VideoSummary>>,
    /// Scroll offset for the detail view
    pub detail_scroll: u16,
    /// Conversation, oldest first
    pub chat_messages: Vec<ChatMessage>,
    /// Text being typed on the chat screen
    pub chat_input: String,
    /// A chat reply is outstanding
    pub chat_waiting: bool,
    generation: u64,
    pending: Vec<Request>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(true)
    }
}

impl App {
    /// Creates a new App on the home screen
    ///
    /// When `chat_has_key` is false the conversation opens with the
    /// configuration error right after the greeting.
    pub fn new(chat_has_key: bool) -> Self {
        let mut chat_messages = vec![ChatMessage::assistant(GREETING)];
        if !chat_has_key {
            chat_messages.push(ChatMessage::assistant(MessageKey::ChatKeyMissing.text()));
        }

        Self {
            screen: Screen::Home,
            history: Vec::new(),
            should_quit: false,
            show_help: false,
            search_kind: CategoryKind::BodyPart,
            search_index: 0,
            catalogs: HashMap::new(),
            exercises: Remote::Idle,
            exercises_for: None,
            exercise_index: 0,
            detail: Remote::Idle,
            videos: Remote::Idle,
            detail_scroll: 0,
            chat_messages,
            chat_input: String::new(),
            chat_waiting: false,
            generation: 0,
            pending: Vec::new(),
        }
    }

    /// Creates a new App opened on the screen chosen on the command line
    pub fn with_startup_config(config: StartupConfig, chat_has_key: bool) -> Self {
        let mut app = Self::new(chat_has_key);

        match config.start_screen {
            StartScreen::Home => {}
            StartScreen::Category(category) => app.open(Screen::Category(category)),
            StartScreen::Exercise(id) => app.open(Screen::Detail(id)),
            StartScreen::Chat => app.open(Screen::Chat),
        }

        app
    }

    /// Current generation; results tagged with another one are stale
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drains the requests queued since the last call
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.pending)
    }

    /// Categories listed under the active search tab
    pub fn search_categories(&self) -> Vec<Category> {
        all_categories(self.search_kind)
    }

    /// Catalog state for a tab
    pub fn catalog(&self, kind: CategoryKind) -> &Remote<Vec<CatalogItem>> {
        static IDLE: Remote<Vec<CatalogItem>> = Remote::Idle;
        self.catalogs.get(&kind).unwrap_or(&IDLE)
    }

    /// The exercise under the cursor on the category screen
    pub fn selected_exercise(&self) -> Option<&Exercise> {
        self.exercises.ready()?.get(self.exercise_index)
    }

    /// Navigates to `screen`, remembering the current one
    pub fn open(&mut self, screen: Screen) {
        let previous = std::mem::replace(&mut self.screen, screen);
        self.history.push(previous);
        self.enter_screen();
    }

    /// Returns to the previous screen, or home
    pub fn go_back(&mut self) {
        self.screen = self.history.pop().unwrap_or(Screen::Home);
        self.enter_screen();
    }

    /// Starts the current screen over, discarding anything in flight
    pub fn reload(&mut self) {
        if let Screen::Category(_) = self.screen {
            self.exercises_for = None;
        }
        self.enter_screen();
    }

    /// Invalidates outstanding results and queues what the new screen needs
    fn enter_screen(&mut self) {
        self.generation += 1;
        debug!(generation = self.generation, screen = ?self.screen, "Entering screen");

        match self.screen.clone() {
            Screen::Home | Screen::Chat => {}
            Screen::Search => {
                let missing: Vec<CategoryKind> = [CategoryKind::BodyPart, CategoryKind::Equipment]
                    .into_iter()
                    .filter(|kind| matches!(self.catalog(*kind), Remote::Idle | Remote::Failed(_)))
                    .collect();
                match missing.as_slice() {
                    [] => {}
                    [kind] => self.request_catalog(*kind),
                    _ => {
                        for kind in &missing {
                            self.catalogs.insert(*kind, Remote::Loading);
                        }
                        self.pending.push(Request::Catalogs);
                    }
                }
            }
            Screen::Category(category) => {
                if self.exercises_for.as_ref() == Some(&category)
                    && self.exercises.ready().is_some()
                {
                    return;
                }
                self.exercises = Remote::Loading;
                self.exercises_for = Some(category.clone());
                self.exercise_index = 0;
                self.pending.push(Request::Category {
                    generation: self.generation,
                    category,
                });
            }
            Screen::Detail(id) => {
                self.detail = Remote::Loading;
                self.videos = Remote::Idle;
                self.detail_scroll = 0;
                self.pending.push(Request::Detail {
                    generation: self.generation,
                    id,
                });
            }
        }
    }

    fn request_catalog(&mut self, kind: CategoryKind) {
        self.catalogs.insert(kind, Remote::Loading);
        self.pending.push(Request::Catalog(kind));
    }

    /// Applies a background result
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::CategoryLoaded { generation, result } => {
                if !self.is_current(generation) || !matches!(self.screen, Screen::Category(_)) {
                    debug!(generation, "Dropping stale category result");
                    return;
                }
                self.exercises = Remote::from_result(result);
            }
            AppEvent::DetailLoaded { generation, result } => {
                if !self.is_current(generation) || !matches!(self.screen, Screen::Detail(_)) {
                    debug!(generation, "Dropping stale exercise result");
                    return;
                }
                if result.is_ok() {
                    self.videos = Remote::Loading;
                }
                self.detail = Remote::from_result(result);
            }
            AppEvent::VideosLoaded { generation, videos } => {
                if !self.is_current(generation) || !matches!(self.screen, Screen::Detail(_)) {
                    debug!(generation, "Dropping stale video result");
                    return;
                }
                self.videos = Remote::Ready(videos);
            }
            AppEvent::CatalogLoaded { kind, result } => {
                self.catalogs.insert(kind, Remote::from_result(result));
            }
            AppEvent::ChatReply(result) => {
                self.chat_waiting = false;
                let text = match result {
                    Ok(text) => text,
                    Err(message) => message.text().to_string(),
                };
                self.chat_messages.push(ChatMessage::assistant(text));
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Sends the typed chat message; blank input is ignored
    pub fn submit_chat(&mut self) {
        let question = self.chat_input.trim().to_string();
        if question.is_empty() || self.chat_waiting {
            return;
        }

        self.chat_input.clear();
        self.chat_messages.push(ChatMessage::user(question.clone()));
        self.chat_waiting = true;
        self.pending.push(Request::Chat(question));
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit (except while typing in chat)
    /// - `Esc`: Go back; quits from home
    /// - `Up`/`k`, `Down`/`j`: Move selection or scroll
    /// - `Enter`: Open the selected item, or send the chat message
    /// - `Tab`/`Left`/`Right`: Switch search tab
    /// - `s`: Search, `c`: Chat (from home)
    /// - `r`: Retry the current screen
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        if self.screen == Screen::Chat {
            self.handle_chat_key(key_event);
            return;
        }

        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            KeyCode::Esc => {
                if self.screen == Screen::Home {
                    self.should_quit = true;
                } else {
                    self.go_back();
                }
                return;
            }
            _ => {}
        }

        match self.screen.clone() {
            Screen::Home => match key_event.code {
                KeyCode::Enter | KeyCode::Char('s') => self.open(Screen::Search),
                KeyCode::Char('c') => self.open(Screen::Chat),
                _ => {}
            },
            Screen::Search => match key_event.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    let count = self.search_categories().len();
                    self.search_index = wrap_up(self.search_index, count);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let count = self.search_categories().len();
                    self.search_index = wrap_down(self.search_index, count);
                }
                KeyCode::Tab
                | KeyCode::BackTab
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Char('h')
                | KeyCode::Char('l') => self.toggle_search_kind(),
                KeyCode::Enter => {
                    if let Some(category) = self.search_categories().get(self.search_index) {
                        self.open(Screen::Category(category.clone()));
                    }
                }
                KeyCode::Char('r') => {
                    let kind = self.search_kind;
                    if matches!(self.catalog(kind), Remote::Failed(_)) {
                        self.request_catalog(kind);
                    }
                }
                KeyCode::Char('c') => self.open(Screen::Chat),
                _ => {}
            },
            Screen::Category(_) => match key_event.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    let count = self.exercises.ready().map_or(0, Vec::len);
                    self.exercise_index = wrap_up(self.exercise_index, count);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let count = self.exercises.ready().map_or(0, Vec::len);
                    self.exercise_index = wrap_down(self.exercise_index, count);
                }
                KeyCode::Enter => {
                    if let Some(exercise) = self.selected_exercise() {
                        let id = exercise.id.clone();
                        self.open(Screen::Detail(id));
                    }
                }
                KeyCode::Char('r') => self.reload(),
                _ => {}
            },
            Screen::Detail(_) => match key_event.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.detail_scroll = (self.detail_scroll + 1).min(MAX_SCROLL);
                }
                KeyCode::Char('g') => self.detail_scroll = 0,
                KeyCode::Char('G') => self.detail_scroll = MAX_SCROLL,
                KeyCode::Char('r') => self.reload(),
                _ => {}
            },
            Screen::Chat => {}
        }
    }

    fn handle_chat_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => self.submit_chat(),
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Char(c) => self.chat_input.push(c),
            _ => {}
        }
    }

    fn toggle_search_kind(&mut self) {
        self.search_kind = match self.search_kind {
            CategoryKind::BodyPart => CategoryKind::Equipment,
            CategoryKind::Equipment => CategoryKind::BodyPart,
        };
        self.search_index = 0;
    }
}

/// Moves a selection up, wrapping to the bottom
fn wrap_up(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else if index == 0 {
        count - 1
    } else {
        index - 1
    }
}

/// Moves a selection down, wrapping to the top
fn wrap_down(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (index + 1) % count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Role;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn exercise(id: &str, name: &str) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: name.to_string(),
            body_part: "chest".to_string(),
            target: "pectorals".to_string(),
            equipment: "body weight".to_string(),
            gif_url: String::new(),
            instructions: Vec::new(),
        }
    }

    fn chest() -> Category {
        Category::new(CategoryKind::BodyPart, "chest")
    }

    #[test]
    fn test_new_app_starts_home_with_greeting() {
        let app = App::new(true);
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.chat_messages.len(), 1);
        assert_eq!(app.chat_messages[0].text, GREETING);
        assert_eq!(app.chat_messages[0].role, Role::Assistant);
    }

    #[test]
    fn test_missing_chat_key_adds_configuration_message() {
        let app = App::new(false);
        assert_eq!(app.chat_messages.len(), 2);
        assert_eq!(app.chat_messages[1].text, MessageKey::ChatKeyMissing.text());
    }

    #[test]
    fn test_startup_exercise_queues_detail_request() {
        let config = StartupConfig {
            start_screen: StartScreen::Exercise("0001".to_string()),
        };
        let mut app = App::with_startup_config(config, true);

        assert_eq!(app.screen, Screen::Detail("0001".to_string()));
        assert!(app.detail.is_loading());
        assert_eq!(
            app.take_requests(),
            vec![Request::Detail {
                generation: app.generation(),
                id: "0001".to_string()
            }]
        );
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_opening_search_requests_both_catalogs_once() {
        let mut app = App::new(true);
        app.handle_key(key_event(KeyCode::Char('s')));

        assert_eq!(app.screen, Screen::Search);
        assert_eq!(app.take_requests(), vec![Request::Catalogs]);
        assert!(app.catalog(CategoryKind::BodyPart).is_loading());

        app.apply(AppEvent::CatalogLoaded {
            kind: CategoryKind::BodyPart,
            result: Ok(vec![CatalogItem {
                id: 2,
                name: "Shoulders".to_string(),
            }]),
        });
        app.apply(AppEvent::CatalogLoaded {
            kind: CategoryKind::Equipment,
            result: Err(MessageKey::EquipmentFetchFailed),
        });

        app.go_back();
        app.open(Screen::Search);
        assert_eq!(
            app.take_requests(),
            vec![Request::Catalog(CategoryKind::Equipment)]
        );
    }

    #[test]
    fn test_search_tab_switch_resets_selection() {
        let mut app = App::new(true);
        app.open(Screen::Search);
        app.handle_key(key_event(KeyCode::Down));
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.search_index, 2);

        app.handle_key(key_event(KeyCode::Tab));

        assert_eq!(app.search_kind, CategoryKind::Equipment);
        assert_eq!(app.search_index, 0);
        assert_eq!(app.search_categories().len(), 22);
    }

    #[test]
    fn test_search_selection_wraps() {
        let mut app = App::new(true);
        app.open(Screen::Search);
        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.search_index, 7);
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.search_index, 0);
    }

    #[test]
    fn test_enter_on_search_opens_category() {
        let mut app = App::new(true);
        app.open(Screen::Search);
        app.take_requests();
        app.handle_key(key_event(KeyCode::Down));
        app.handle_key(key_event(KeyCode::Enter));

        let expected = Category::new(CategoryKind::BodyPart, "cardio");
        assert_eq!(app.screen, Screen::Category(expected.clone()));
        assert_eq!(
            app.take_requests(),
            vec![Request::Category {
                generation: app.generation(),
                category: expected
            }]
        );
    }

    #[test]
    fn test_category_result_applies_for_current_generation() {
        let mut app = App::new(true);
        app.open(Screen::Category(chest()));
        let generation = app.generation();

        app.apply(AppEvent::CategoryLoaded {
            generation,
            result: Ok(vec![exercise("0001", "push-up"), exercise("0002", "dip")]),
        });

        assert_eq!(app.exercises.ready().map(Vec::len), Some(2));
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_exercise().map(|e| e.name.as_str()), Some("dip"));
    }

    #[test]
    fn test_category_failure_shows_message() {
        let mut app = App::new(true);
        app.open(Screen::Category(chest()));
        let generation = app.generation();

        app.apply(AppEvent::CategoryLoaded {
            generation,
            result: Err(MessageKey::RateLimited),
        });

        assert_eq!(app.exercises, Remote::Failed(MessageKey::RateLimited));
    }

    #[test]
    fn test_stale_detail_result_after_leaving_is_ignored() {
        let mut app = App::new(true);
        app.open(Screen::Detail("0001".to_string()));
        let stale = app.generation();

        app.handle_key(key_event(KeyCode::Esc));
        app.apply(AppEvent::DetailLoaded {
            generation: stale,
            result: Ok(LoadedExercise {
                exercise: exercise("0001", "push-up"),
                from_cache: false,
            }),
        });

        assert_eq!(app.screen, Screen::Home);
        assert!(app.detail.is_loading());
    }

    #[test]
    fn test_result_for_replaced_detail_is_ignored() {
        let mut app = App::new(true);
        app.open(Screen::Detail("0001".to_string()));
        let first = app.generation();
        app.open(Screen::Detail("0002".to_string()));
        let second = app.generation();

        app.apply(AppEvent::DetailLoaded {
            generation: first,
            result: Ok(LoadedExercise {
                exercise: exercise("0001", "push-up"),
                from_cache: true,
            }),
        });
        assert!(app.detail.is_loading());

        app.apply(AppEvent::DetailLoaded {
            generation: second,
            result: Ok(LoadedExercise {
                exercise: exercise("0002", "dip"),
                from_cache: false,
            }),
        });
        assert_eq!(
            app.detail.ready().map(|l| l.exercise.name.as_str()),
            Some("dip")
        );
        assert!(app.videos.is_loading());

        app.apply(AppEvent::VideosLoaded {
            generation: first,
            videos: vec![VideoSummary {
                id: "old".to_string(),
                title: "stale".to_string(),
                description: String::new(),
                channel_title: String::new(),
            }],
        });
        assert!(app.videos.is_loading());

        app.apply(AppEvent::VideosLoaded {
            generation: second,
            videos: Vec::new(),
        });
        assert_eq!(app.videos, Remote::Ready(Vec::new()));
    }

    #[test]
    fn test_detail_failure_keeps_videos_idle() {
        let mut app = App::new(true);
        app.open(Screen::Detail("9999".to_string()));
        let generation = app.generation();

        app.apply(AppEvent::DetailLoaded {
            generation,
            result: Err(MessageKey::DetailFetchFailed),
        });

        assert_eq!(app.detail, Remote::Failed(MessageKey::DetailFetchFailed));
        assert_eq!(app.videos, Remote::Idle);
    }

    #[test]
    fn test_back_to_loaded_category_keeps_list() {
        let mut app = App::new(true);
        app.open(Screen::Category(chest()));
        let generation = app.generation();
        app.apply(AppEvent::CategoryLoaded {
            generation,
            result: Ok(vec![exercise("0001", "push-up"), exercise("0002", "dip")]),
        });
        app.take_requests();

        app.handle_key(key_event(KeyCode::Down));
        app.handle_key(key_event(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Detail("0002".to_string()));
        app.take_requests();

        app.handle_key(key_event(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Category(chest()));
        assert_eq!(app.exercise_index, 1);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_retry_category_refetches() {
        let mut app = App::new(true);
        app.open(Screen::Category(chest()));
        let generation = app.generation();
        app.apply(AppEvent::CategoryLoaded {
            generation,
            result: Err(MessageKey::ExercisesFetchFailed),
        });
        app.take_requests();

        app.handle_key(key_event(KeyCode::Char('r')));

        assert!(app.exercises.is_loading());
        assert_eq!(app.take_requests().len(), 1);
    }

    #[test]
    fn test_detail_scroll_bounds() {
        let mut app = App::new(true);
        app.open(Screen::Detail("0001".to_string()));
        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.detail_scroll, 0);
        app.handle_key(key_event(KeyCode::Char('j')));
        assert_eq!(app.detail_scroll, 1);
        app.handle_key(key_event(KeyCode::Char('G')));
        assert_eq!(app.detail_scroll, MAX_SCROLL);
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.detail_scroll, MAX_SCROLL);
    }

    #[test]
    fn test_chat_typing_and_submit() {
        let mut app = App::new(true);
        app.open(Screen::Chat);
        for c in "abs q".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
        app.handle_key(key_event(KeyCode::Backspace));
        assert_eq!(app.chat_input, "abs ");
        assert!(!app.should_quit);

        app.handle_key(key_event(KeyCode::Enter));

        assert!(app.chat_input.is_empty());
        assert!(app.chat_waiting);
        assert_eq!(app.chat_messages.last().map(|m| m.role), Some(Role::User));
        assert_eq!(app.take_requests(), vec![Request::Chat("abs".to_string())]);
    }

    #[test]
    fn test_blank_chat_input_is_ignored() {
        let mut app = App::new(true);
        app.open(Screen::Chat);
        app.chat_input = "   ".to_string();

        app.submit_chat();

        assert_eq!(app.chat_messages.len(), 1);
        assert!(!app.chat_waiting);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_chat_reply_and_error_append_assistant_messages() {
        let mut app = App::new(true);
        app.open(Screen::Chat);
        app.chat_input = "How often?".to_string();
        app.submit_chat();

        app.apply(AppEvent::ChatReply(Ok("Three times a week.".to_string())));
        assert!(!app.chat_waiting);
        assert_eq!(app.chat_messages.last().unwrap().text, "Three times a week.");

        app.apply(AppEvent::ChatReply(Err(MessageKey::ChatFailed)));
        assert_eq!(
            app.chat_messages.last().unwrap().text,
            "Sorry, I encountered an error. Please try again later."
        );
    }

    #[test]
    fn test_chat_reply_arrives_after_leaving_chat() {
        let mut app = App::new(true);
        app.open(Screen::Chat);
        app.chat_input = "Protein?".to_string();
        app.submit_chat();
        app.handle_key(key_event(KeyCode::Esc));

        app.apply(AppEvent::ChatReply(Ok("About 1.6 g/kg.".to_string())));

        assert_eq!(app.chat_messages.last().unwrap().text, "About 1.6 g/kg.");
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = App::new(true);
        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);

        app.handle_key(key_event(KeyCode::Char('s')));
        assert_eq!(app.screen, Screen::Home);

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(true);
        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = App::new(true);
        app.open(Screen::Search);
        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_wrap_helpers_with_empty_list() {
        assert_eq!(wrap_up(0, 0), 0);
        assert_eq!(wrap_down(0, 0), 0);
        assert_eq!(wrap_up(0, 3), 2);
        assert_eq!(wrap_down(2, 3), 0);
    }
}
