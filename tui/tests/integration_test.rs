//! Integration Tests for TUI + Companion
//!
//! These tests drive the full App the way a terminal would: key and mouse
//! events in, rendered buffers out. A scripted backend stands in for the
//! generation endpoint, a `MemoryClipboard` records copies, and ratatui's
//! `TestBackend` captures frames.
//!
//! # Test Coverage
//!
//! 1. **Generation Flow**: typed ingredients stream back as a recipe, scrolled
//!    into view exactly once
//! 2. **Copy**: clicking the result copies the exact text with one toast
//! 3. **Failure**: a failed request restores the button and shows a toast
//! 4. **In Flight**: submits are not forwarded while a request is running

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use companion_core::companion::COPIED_MESSAGE;
use companion_core::{
    CompanionConfig, GenerateRequest, GenerationBackend, GenerationError, GenerationOutcome,
    NotifyLevel, StreamChunk,
};
use companion_tui::clipboard::MemoryClipboard;
use companion_tui::companion_client::CompanionClient;
use companion_tui::page::{BUTTON_LABEL, MARGIN, RESULT_HEADING};
use companion_tui::App;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 24;

// ============================================================================
// Scripted Backend
// ============================================================================

#[derive(Clone)]
enum Script {
    /// Stream these chunks, pausing between them
    Chunks(Vec<&'static str>),
    /// Answer with a non-success status
    Status(u16),
    /// Never answer
    Hold,
}

struct ScriptedBackend {
    script: Script,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerationOutcome, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());

        match self.script.clone() {
            Script::Chunks(chunks) => {
                let (tx, rx) = mpsc::channel(16);
                tokio::spawn(async move {
                    for chunk in chunks {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        if tx.send(StreamChunk::Text(chunk.to_string())).await.is_err() {
                            return;
                        }
                    }
                    let _ = tx.send(StreamChunk::Complete).await;
                });
                Ok(GenerationOutcome::Streaming(rx))
            }
            Script::Status(status) => Err(GenerationError::RequestFailed {
                status,
                reason: "Internal Server Error".to_string(),
            }),
            Script::Hold => {
                std::future::pending::<()>().await;
                Ok(GenerationOutcome::EmptyBody)
            }
        }
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    app: App<ScriptedBackend>,
    terminal: Terminal<TestBackend>,
    clipboard: MemoryClipboard,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    async fn new(script: Script) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let backend = ScriptedBackend {
            script,
            calls: Arc::clone(&calls),
            prompts: Arc::clone(&prompts),
        };
        let clipboard = MemoryClipboard::new();
        let client = CompanionClient::new(backend, CompanionConfig::default());
        let mut app = App::new(client, Box::new(clipboard.clone()), (WIDTH, HEIGHT));
        app.start().await.unwrap();

        let terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        Self {
            app,
            terminal,
            clipboard,
            calls,
            prompts,
        }
    }

    async fn key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.app
            .handle_event(Event::Key(KeyEvent::new(code, modifiers)))
            .await;
    }

    async fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(KeyCode::Char(c), KeyModifiers::NONE).await;
        }
    }

    async fn click(&mut self, column: u16, row: u16) {
        self.app
            .handle_event(Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            }))
            .await;
    }

    /// Tick until the request settles
    async fn settle(&mut self) {
        for _ in 0..400 {
            self.app.tick().await;
            if !self.app.display().in_flight() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("request never settled");
    }

    fn render(&mut self) {
        self.app.render(&mut self.terminal).unwrap();
    }

    fn screen_row(&self, y: u16) -> String {
        let buf = self.terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn screen(&self) -> String {
        (0..HEIGHT)
            .map(|y| self.screen_row(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Generation Flow
// ============================================================================

#[tokio::test]
async fn test_startup_shows_page() {
    let mut h = Harness::new(Script::Hold).await;
    h.render();

    let screen = h.screen();
    assert!(screen.contains("Cocktail Companion AI"));
    assert!(screen.contains("47,118 cocktails generated so far."));
    assert!(screen.contains("Generate your cocktail"));
}

#[tokio::test]
async fn test_streamed_recipe_scrolls_into_view_once() {
    let mut h = Harness::new(Script::Chunks(vec![
        "Moscow Mule\n",
        "- 2 oz vodka\n",
        "- 1/2 oz lime juice",
    ]))
    .await;

    h.type_text("vodka, lime, mint").await;
    h.key(KeyCode::Enter, KeyModifiers::NONE).await;
    h.settle().await;
    h.render();

    assert_eq!(h.calls.load(Ordering::SeqCst), 1);
    let prompt = h.prompts.lock().unwrap()[0].clone();
    assert!(prompt.ends_with("Available ingredients:\nvodka, lime, mint\nRecipe:"));

    assert_eq!(
        h.app.display().result,
        "Moscow Mule\n- 2 oz vodka\n- 1/2 oz lime juice"
    );
    assert_eq!(h.app.result_scrolls(), 1);
    assert!(h.screen_row(0).contains(RESULT_HEADING));
    assert!(h.screen().contains("Moscow Mule"));

    // Further frames do not scroll again
    h.app.tick().await;
    h.app.tick().await;
    assert_eq!(h.app.result_scrolls(), 1);
}

#[tokio::test]
async fn test_newline_shortcut_reaches_prompt() {
    let mut h = Harness::new(Script::Chunks(vec!["Gimlet"])).await;

    h.type_text("gin").await;
    h.key(KeyCode::Char('j'), KeyModifiers::CONTROL).await;
    h.type_text("lime").await;
    h.key(KeyCode::Backspace, KeyModifiers::NONE).await;
    h.key(KeyCode::Enter, KeyModifiers::NONE).await;
    h.settle().await;

    assert_eq!(h.app.ingredients(), "gin\nlim");
    let prompt = h.prompts.lock().unwrap()[0].clone();
    assert!(prompt.ends_with("Available ingredients:\ngin\nlim\nRecipe:"));
}

// ============================================================================
// Copy
// ============================================================================

#[tokio::test]
async fn test_click_result_copies_exact_text() {
    let mut h = Harness::new(Script::Chunks(vec!["Daiquiri\n", "- 2 oz rum"])).await;

    h.type_text("rum").await;
    h.key(KeyCode::Enter, KeyModifiers::NONE).await;
    h.settle().await;
    h.render();

    let page = h.app.page();
    let row = page.regions.result_rows.start;
    let y = u16::try_from(row - h.app.scroll_offset()).unwrap();
    h.click(MARGIN + 1, y).await;
    h.app.tick().await;

    assert_eq!(h.clipboard.entries(), vec!["Daiquiri\n- 2 oz rum".to_string()]);
    let toast = h.app.display().notification.as_ref().unwrap();
    assert_eq!(toast.level, NotifyLevel::Success);
    assert_eq!(toast.message, COPIED_MESSAGE);

    h.render();
    assert!(h.screen().contains(COPIED_MESSAGE));
}

#[tokio::test]
async fn test_copy_with_nothing_to_copy_is_ignored() {
    let mut h = Harness::new(Script::Hold).await;

    h.key(KeyCode::Char('y'), KeyModifiers::CONTROL).await;
    h.app.tick().await;

    assert!(h.clipboard.entries().is_empty());
    assert!(h.app.display().notification.is_none());
}

// ============================================================================
// Failure
// ============================================================================

#[tokio::test]
async fn test_failed_request_restores_button() {
    let mut h = Harness::new(Script::Status(500)).await;

    h.type_text("tequila").await;
    h.key(KeyCode::Enter, KeyModifiers::NONE).await;
    h.settle().await;
    h.render();

    assert!(!h.app.display().in_flight());
    let toast = h.app.display().notification.as_ref().unwrap();
    assert_eq!(toast.level, NotifyLevel::Error);
    assert!(toast.dismissible);
    assert!(h.screen().contains(BUTTON_LABEL));
    assert_eq!(h.app.result_scrolls(), 0);

    // Esc closes the toast before it quits
    h.key(KeyCode::Esc, KeyModifiers::NONE).await;
    h.app.tick().await;
    assert!(h.app.is_running());
    assert!(h.app.display().notification.is_none());

    // A retry goes out
    h.key(KeyCode::Enter, KeyModifiers::NONE).await;
    h.settle().await;
    assert_eq!(h.calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// In Flight
// ============================================================================

#[tokio::test]
async fn test_submit_ignored_while_in_flight() {
    let mut h = Harness::new(Script::Hold).await;

    h.type_text("whiskey").await;
    h.key(KeyCode::Enter, KeyModifiers::NONE).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    h.app.tick().await;
    h.render();

    let button_row = h.app.page().regions.button_row;
    let y = u16::try_from(button_row - h.app.scroll_offset()).unwrap();
    h.key(KeyCode::Enter, KeyModifiers::NONE).await;
    h.click(MARGIN + 2, y).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    h.app.tick().await;
    h.render();

    assert_eq!(h.calls.load(Ordering::SeqCst), 1);
    assert!(h.app.display().in_flight());
    assert!(h.screen().contains("Mixing..."));
    assert!(!h.screen().contains(BUTTON_LABEL));
}

#[tokio::test]
async fn test_button_click_submits() {
    let mut h = Harness::new(Script::Chunks(vec!["Paloma"])).await;
    h.type_text("grapefruit").await;
    h.render();

    let button_row = h.app.page().regions.button_row;
    let y = u16::try_from(button_row - h.app.scroll_offset()).unwrap();
    h.click(MARGIN + 2, y).await;
    h.settle().await;

    assert_eq!(h.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.app.display().result, "Paloma");
}

#[tokio::test]
async fn test_escape_quits_with_goodbye() {
    let mut h = Harness::new(Script::Hold).await;

    h.key(KeyCode::Esc, KeyModifiers::NONE).await;

    assert!(!h.app.is_running());
    assert!(h.app.goodbye().is_some());
}
