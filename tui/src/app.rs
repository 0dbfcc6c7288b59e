//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - CompanionClient for orchestration
//! - DisplayState for rendering
//!
//! The App is a thin client that:
//! 1. Converts terminal events to SurfaceEvents
//! 2. Sends events to the embedded Companion via CompanionClient
//! 3. Receives CompanionMessages and updates DisplayState
//! 4. Renders based on DisplayState
//!
//! The ingredient text is mirrored locally so typing renders immediately;
//! every edit is still reported to the Companion, which owns the copy used
//! for the prompt.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use rand::seq::SliceRandom;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Terminal;

use companion_core::{CompanionMessage, GenerationBackend, HttpBackend, NotifyLevel};

use crate::clipboard::Clipboard;
use crate::companion_client::CompanionClient;
use crate::compositor::{Compositor, LayerId};
use crate::display::{DisplayNotification, DisplayState};
use crate::page::{Page, PageView, MARGIN};
use crate::theme::dim;
use crate::widgets::{LoadingDots, Toast};

/// Status bar height (rows)
const STATUS_HEIGHT: u16 = 1;

/// Widest a toast may get
const TOAST_MAX_WIDTH: u16 = 56;

/// Rows scrolled per mouse wheel notch
const WHEEL_STEP: usize = 3;

/// Frame tick for animations and stream polling
const FRAME_TICK: Duration = Duration::from_millis(16);

/// Shown when the terminal refuses the copy
const COPY_FAILED_MESSAGE: &str = "Couldn't reach the clipboard";

/// Quick goodbye messages (no network needed, instant)
const QUICK_GOODBYES: &[&str] = &[
    "Cheers!",
    "Salud!",
    "Prost!",
    "Kanpai!",
    "Sl\u{e1}inte!",
    "Sant\u{e9}!",
    "Skål!",
    "Na zdrowie!",
    "Bottoms up!",
    "Drink responsibly!",
];

/// Main application state
pub struct App<B: GenerationBackend + 'static = HttpBackend> {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Goodbye message to show on exit
    goodbye_message: Option<String>,

    // === Companion Integration ===
    /// Client for communicating with the embedded Companion
    client: CompanionClient<B>,
    /// Display state derived from CompanionMessages
    display: DisplayState,
    /// Where copies go
    clipboard: Box<dyn Clipboard>,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Last laid out page (for hit testing)
    page: Page,
    /// Button animation while a request is in flight
    dots: LoadingDots,

    // === Input State ===
    /// Ingredient text as typed
    ingredients: String,
    /// Scroll offset (rows from the top of the page)
    scroll_offset: usize,
    /// Scroll directives handled so far
    scrolls: usize,

    // === Misc State ===
    /// Last frame time (for animations)
    last_frame: Instant,
    /// Terminal size
    size: (u16, u16),
}

/// Layer IDs for UI regions
struct AppLayers {
    page: LayerId,
    status: LayerId,
    toast: LayerId,
}

impl<B: GenerationBackend + 'static> App<B> {
    /// Create a new App for a terminal of `size` columns and rows
    pub fn new(
        client: CompanionClient<B>,
        clipboard: Box<dyn Clipboard>,
        size: (u16, u16),
    ) -> Self {
        let (width, height) = size;
        let area = Rect::new(0, 0, width, height);
        let mut compositor = Compositor::new(area);

        let page = compositor.create_layer(
            Rect::new(0, 0, width, height.saturating_sub(STATUS_HEIGHT)),
            0,
        );
        let status = compositor.create_layer(
            Rect::new(0, height.saturating_sub(STATUS_HEIGHT), width, STATUS_HEIGHT),
            10,
        );
        let toast = compositor.create_layer(Rect::new(0, 0, 1, 1), 100);
        compositor.set_visible(toast, false);

        Self {
            running: true,
            goodbye_message: None,
            client,
            display: DisplayState::new(),
            clipboard,
            compositor,
            layers: AppLayers {
                page,
                status,
                toast,
            },
            page: Page::default(),
            dots: LoadingDots::new(),
            ingredients: String::new(),
            scroll_offset: 0,
            scrolls: 0,
            last_frame: Instant::now(),
            size,
        }
    }

    /// Connect to the Companion and take in its welcome
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.client.connect().await?;
        self.process_companion_messages();
        Ok(())
    }

    /// Main event loop
    pub async fn run<Bk: Backend>(&mut self, terminal: &mut Terminal<Bk>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        self.start().await?;
        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Check for terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event).await,
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                    None => {
                        tracing::info!("Terminal event stream closed");
                        self.running = false;
                    }
                },

                // Frame tick
                () = tokio::time::sleep(FRAME_TICK) => {}
            }

            self.tick().await;
            self.render(terminal)?;
        }

        Ok(())
    }

    /// Poll the Companion, apply its messages and advance timers
    pub async fn tick(&mut self) {
        self.client.poll_streaming().await;
        self.process_companion_messages();
        self.update();
    }

    /// Handle one terminal event
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Mouse(mouse) => self.handle_mouse(mouse).await,
            Event::Resize(w, h) => self.handle_resize(w, h),
            Event::Paste(text) => {
                self.ingredients.push_str(&text.replace('\r', ""));
                self.report_ingredients().await;
            }
            _ => {}
        }
    }

    /// Process all pending messages from the Companion
    fn process_companion_messages(&mut self) {
        let mut scroll_requested = false;
        let mut copy_failed = false;

        for msg in self.client.recv_all() {
            match &msg {
                CompanionMessage::CopyToClipboard { text } => {
                    if let Err(e) = self.clipboard.copy(text) {
                        tracing::warn!(error = %e, "Clipboard copy failed");
                        copy_failed = true;
                    }
                }
                CompanionMessage::ScrollToResult => scroll_requested = true,
                CompanionMessage::Quit { message } => {
                    if self.goodbye_message.is_none() {
                        self.goodbye_message.clone_from(message);
                    }
                    self.running = false;
                }
                _ => {}
            }

            // Apply message to display state
            self.display.apply_message(msg);
        }

        if copy_failed {
            // Replaces the success toast that followed the copy
            self.display.notification = Some(DisplayNotification {
                level: NotifyLevel::Error,
                icon: None,
                message: COPY_FAILED_MESSAGE.to_string(),
                remaining: Duration::from_millis(
                    self.client.config().display.toast_duration_ms,
                ),
                dismissible: true,
            });
        }

        if scroll_requested {
            self.scroll_to_result();
        }
    }

    /// Bring the result heading to the top of the page
    fn scroll_to_result(&mut self) {
        self.page = self.build_page();
        if let Some(heading) = self.page.regions.result_heading {
            self.scroll_offset = heading;
            self.scrolls += 1;
            tracing::debug!(row = heading, "Scrolled result into view");
        }
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Quit
            KeyCode::Char('c') if ctrl => self.quit().await,
            KeyCode::Esc => {
                if self.display.has_dismissible_notification() {
                    let _ = self.client.dismiss_notification().await;
                } else {
                    self.quit().await;
                }
            }

            // Copy the recipe
            KeyCode::Char('y') if ctrl => {
                let _ = self.client.result_clicked().await;
            }

            // Line breaks in the ingredient list
            KeyCode::Char('j') if ctrl => self.edit(|text| text.push('\n')).await,
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.edit(|text| text.push('\n')).await;
            }

            // Submit
            KeyCode::Enter => self.submit().await,

            // Typing
            KeyCode::Char(c) if !ctrl => self.edit(|text| text.push(c)).await,
            KeyCode::Backspace => {
                if !self.ingredients.is_empty() {
                    self.edit(|text| {
                        text.pop();
                    })
                    .await;
                }
            }

            // Page scrolling
            KeyCode::PageUp => self.scroll_up(self.half_page()),
            KeyCode::PageDown => self.scroll_down(self.half_page()),
            KeyCode::Home if ctrl => self.scroll_offset = 0,
            KeyCode::End if ctrl => self.scroll_offset = self.max_scroll(),

            _ => {}
        }
    }

    /// Handle mouse input
    async fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row).await;
            }
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_STEP),
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_STEP),
            _ => {}
        }
    }

    /// Route a left click to whatever is under it
    async fn handle_click(&mut self, x: u16, y: u16) {
        let Some(layer) = self.compositor.layer_at(x, y) else {
            return;
        };

        if layer == self.layers.toast {
            if self.display.has_dismissible_notification() {
                let _ = self.client.dismiss_notification().await;
            }
            return;
        }
        if layer != self.layers.page {
            return;
        }

        let top = self
            .compositor
            .layer_bounds(self.layers.page)
            .map_or(0, |b| b.y);
        let row = self.scroll_offset + usize::from(y.saturating_sub(top));
        let regions = &self.page.regions;

        if row == regions.button_row
            && x >= MARGIN
            && regions.button_cols.contains(&(x - MARGIN))
        {
            self.submit().await;
        } else if regions.result_rows.contains(&row) {
            let _ = self.client.result_clicked().await;
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.compositor.resize(Rect::new(0, 0, width, height));

        let page_height = height.saturating_sub(STATUS_HEIGHT);
        self.compositor.move_layer(self.layers.page, 0, 0);
        self.compositor
            .resize_layer(self.layers.page, width, page_height);

        self.compositor
            .move_layer(self.layers.status, 0, page_height);
        self.compositor
            .resize_layer(self.layers.status, width, STATUS_HEIGHT);

        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Apply an edit to the ingredient text and report it
    async fn edit(&mut self, change: impl FnOnce(&mut String)) {
        change(&mut self.ingredients);
        self.report_ingredients().await;
    }

    async fn report_ingredients(&mut self) {
        let _ = self
            .client
            .edit_ingredients(self.ingredients.clone())
            .await;
    }

    /// Ask for a recipe unless one is already on its way
    async fn submit(&mut self) {
        if self.display.in_flight() || self.client.state().is_in_flight() {
            tracing::debug!("Submit ignored while a request is in flight");
            return;
        }
        let _ = self.client.submit().await;
    }

    /// Leave with a quick goodbye
    async fn quit(&mut self) {
        self.generate_goodbye();
        let _ = self.client.request_quit().await;
        self.process_companion_messages();
        self.running = false;
    }

    /// Update animations and state
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        // Update display state timers
        self.display.update(delta);

        if self.display.in_flight() {
            self.dots.tick(delta);
        } else {
            self.dots.reset();
        }
    }

    fn page_height(&self) -> usize {
        usize::from(self.size.1.saturating_sub(STATUS_HEIGHT))
    }

    fn half_page(&self) -> usize {
        (self.page_height() / 2).max(1)
    }

    /// The heading may be scrolled all the way to the top row
    fn max_scroll(&self) -> usize {
        self.page.height().saturating_sub(1)
    }

    fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = (self.scroll_offset + rows).min(self.max_scroll());
    }

    fn build_page(&self) -> Page {
        Page::build(&PageView {
            width: self.size.0,
            display: &self.display,
            ingredients: &self.ingredients,
            focused: !self.display.in_flight(),
            dots: self.dots.frame(),
        })
    }

    /// Render the UI
    pub fn render<Bk: Backend>(&mut self, terminal: &mut Terminal<Bk>) -> anyhow::Result<()> {
        self.render_page();
        self.render_status();
        self.render_toast();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    buf[(x, y)] = output[(x, y)].clone();
                }
            }
        })?;

        Ok(())
    }

    /// Render the visible window of the page
    fn render_page(&mut self) {
        self.page = self.build_page();
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.page) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        let width = usize::from(area.width.saturating_sub(MARGIN));

        for (i, (line, style)) in self
            .page
            .lines
            .iter()
            .skip(self.scroll_offset)
            .take(usize::from(area.height))
            .enumerate()
        {
            let Ok(y) = u16::try_from(i) else { break };
            buf.set_stringn(area.x + MARGIN, area.y + y, line, width, *style);
        }
    }

    /// Render status bar
    fn render_status(&mut self) {
        let below = self
            .page
            .height()
            .saturating_sub(self.scroll_offset + self.page_height());
        let scroll_info = if below > 0 {
            format!(" | {below} more rows - PgDn")
        } else {
            String::new()
        };
        let status = format!(
            " {} | Enter mix | Ctrl+J new line | Ctrl+Y copy | Esc quit{scroll_info}",
            self.display.companion_state.description(),
        );

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            let area = buf.area;
            buf.set_stringn(area.x, area.y, &status, usize::from(area.width), dim());
        }
    }

    /// Render the toast layer, centred near the top
    fn render_toast(&mut self) {
        let Some(notification) = self.display.notification.as_ref() else {
            self.compositor.set_visible(self.layers.toast, false);
            return;
        };

        let toast = Toast::new(notification);
        let max_width = self.size.0.saturating_sub(4).min(TOAST_MAX_WIDTH);
        let (w, h) = toast.size(max_width);
        let x = self.size.0.saturating_sub(w) / 2;

        self.compositor.resize_layer(self.layers.toast, w, h);
        self.compositor.move_layer(self.layers.toast, x, 1);
        self.compositor.set_visible(self.layers.toast, true);

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.toast) {
            buf.reset();
            let area = buf.area;
            toast.render(area, buf);
        }
    }

    /// Generate a quick goodbye message
    fn generate_goodbye(&mut self) {
        self.goodbye_message = QUICK_GOODBYES
            .choose(&mut rand::thread_rng())
            .map(|s| (*s).to_string());
    }

    /// Get the goodbye message for display after TUI closes
    pub fn goodbye(&self) -> Option<&str> {
        self.goodbye_message.as_deref()
    }

    /// Whether the event loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Display state as last updated
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Ingredient text as typed
    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    /// The page as last rendered
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// First visible page row
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// How many times the page was scrolled to a new result
    pub fn result_scrolls(&self) -> usize {
        self.scrolls
    }
}
