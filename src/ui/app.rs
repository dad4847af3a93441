use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use image::RgbaImage;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, BorderType, Borders, Widget},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::chroma::{
    demo_frames, spawn_compositor, CompositorHandle, FfmpegVideo, LoopingFrames,
};
use crate::config::Config;
use crate::notify::{self, Notifier};
use crate::ui::components::{
    layout::card_area, palette, CelebrationLayout, CelebrationView, ChoiceLayout, ChoiceView,
    ContactFormLayout, ContactFormState, ContactFormView, FormField, InstructionBar,
    ProposalFocus, ProposalLayout, ProposalView, ReceiptDialog, Spinner, ToastStack, ToastView,
};
use crate::ui::events::AppEvent;
use crate::ui::terminal_guard::TerminalGuard;
use crate::wizard::{DeliveryOutcome, Game, RequiredField, Stage, SubmitError, Watch, WizardController};

const CARD_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 24;

/// Main application state
pub struct App {
    /// Application configuration
    config: Config,
    /// Whether the app should quit
    should_quit: bool,
    /// Stage machine and answers
    wizard: WizardController,
    /// Outbound notification channel
    notifier: Arc<dyn Notifier>,
    /// Transient notices, newest first
    toasts: ToastStack,
    /// Contact form inputs
    form: ContactFormState,
    proposal_focus: ProposalFocus,
    /// Focused option on the choice screens (0 or 1)
    choice_focus: usize,
    spinner: Spinner,
    /// Picture shown above the proposal
    proposal_image: Option<RgbaImage>,
    /// Running keyed-video task, once the celebration starts
    compositor: Option<CompositorHandle>,
    /// Screen size at the last draw, used for mouse hit testing
    screen: Rect,
    /// Whether the pointer was over the decline button on the last move
    decline_hovered: bool,
    /// Event channel sender
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Event channel receiver
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Tick counter for spinner animation
    tick_count: u32,
}

impl App {
    pub fn new(config: Config) -> Self {
        let notifier = config.notifier();
        Self::with_notifier(config, notifier)
    }

    /// Build with an explicit notifier (tests inject a recording one)
    pub fn with_notifier(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let proposal_image = config.image_path.as_deref().and_then(|path| {
            match image::open(path) {
                Ok(img) => Some(img.to_rgba8()),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load proposal image");
                    None
                }
            }
        });

        Self {
            wizard: WizardController::new(config.sender.clone()),
            config,
            should_quit: false,
            notifier,
            toasts: ToastStack::new(),
            form: ContactFormState::new(),
            proposal_focus: ProposalFocus::default(),
            choice_focus: 0,
            spinner: Spinner::heartbeat(),
            proposal_image,
            compositor: None,
            screen: Rect::new(0, 0, 80, 24),
            decline_hovered: false,
            event_tx,
            event_rx,
            tick_count: 0,
        }
    }

    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn form(&self) -> &ContactFormState {
        &self.form
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_compositing(&self) -> bool {
        self.compositor.as_ref().is_some_and(|c| c.is_running())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        self.stop_compositor();
        guard.cleanup()?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    if event::poll(Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key) => self.handle_key_event(key),
                            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                            _ => {}
                        }
                    }
                    self.tick();
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Animation and expiry housekeeping, once per loop iteration
    fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.tick_count % 6 == 0 {
            self.spinner.tick();
        }
        self.toasts.expire(Instant::now());
    }

    /// Wait for the next channel event and handle it.
    ///
    /// Returns false if the channel is closed.
    pub async fn process_next_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => {
                self.handle_app_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::NotificationSettled { result } => {
                let outcome = match result {
                    Ok(()) => DeliveryOutcome::Delivered,
                    Err(reason) => DeliveryOutcome::Failed(reason),
                };
                if self.wizard.finish_submit(outcome, &mut self.toasts) {
                    self.start_compositor();
                }
            }
            AppEvent::Quit => self.should_quit = true,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        if self.wizard.is_receipt_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.wizard.close_receipt();
            }
            return;
        }

        if key.code == KeyCode::Esc && !self.toasts.is_empty() {
            self.toasts.clear();
            return;
        }

        match self.wizard.stage() {
            Stage::Proposal => self.handle_proposal_key(key),
            Stage::GameChoice | Stage::WatchChoice => self.handle_choice_key(key),
            Stage::ContactForm => self.handle_form_key(key),
            Stage::Celebration => match key.code {
                KeyCode::Char('r') => {
                    self.wizard.open_receipt();
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn handle_proposal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.accept(),
            KeyCode::Char('n') | KeyCode::Char('N') => self.evade(),
            KeyCode::Enter | KeyCode::Char(' ') => match self.proposal_focus {
                ProposalFocus::Accept => self.accept(),
                ProposalFocus::Decline => self.evade(),
            },
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.proposal_focus = self.proposal_focus.toggle();
                // Focusing the decline button counts as hovering it
                if self.proposal_focus == ProposalFocus::Decline {
                    self.evade();
                }
            }
            _ => {}
        }
    }

    fn handle_choice_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.choice_focus = 1 - self.choice_focus;
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.choose(self.choice_focus),
            KeyCode::Char('1') => self.choose(0),
            KeyCode::Char('2') => self.choose(1),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if self.wizard.is_sending() {
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.focus = self.form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus = self.form.focus.prev(),
            KeyCode::Enter => {
                if self.form.focus == FormField::Submit {
                    self.submit();
                } else {
                    self.form.focus = self.form.focus.next();
                }
            }
            KeyCode::Char(' ') if self.form.focus == FormField::Submit => self.submit(),
            _ => {
                let Some(input) = self.form.focused_input_mut() else {
                    return;
                };
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Char('w') if ctrl => input.delete_word_back(),
                    KeyCode::Char('u') if ctrl => input.clear(),
                    KeyCode::Char('a') if ctrl => input.move_start(),
                    KeyCode::Char('e') if ctrl => input.move_end(),
                    KeyCode::Char(c) if !ctrl => input.insert_char(c),
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Left => input.move_left(),
                    KeyCode::Right => input.move_right(),
                    KeyCode::Home => input.move_start(),
                    KeyCode::End => input.move_end(),
                    _ => return,
                }
                self.sync_form();
            }
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if self.wizard.stage() != Stage::Proposal || self.wizard.is_receipt_open() {
                    return;
                }
                let over = self.proposal_layout().decline.contains(Position::new(x, y));
                if over && !self.decline_hovered {
                    self.evade();
                }
                // The button has usually jumped away by now
                self.decline_hovered = self.proposal_layout().decline.contains(Position::new(x, y));
            }
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(x, y),
            _ => {}
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let pos = Position::new(x, y);
        if self.wizard.is_receipt_open() {
            let dialog = ReceiptDialog::new(self.wizard.answers(), self.wizard.sender());
            if dialog.close_area(self.screen).contains(pos) {
                self.wizard.close_receipt();
            }
            return;
        }

        match self.wizard.stage() {
            Stage::Proposal => {
                let layout = self.proposal_layout();
                if layout.decline.contains(pos) {
                    self.evade();
                    self.decline_hovered = self.proposal_layout().decline.contains(pos);
                } else if layout.accept.contains(pos) {
                    self.accept();
                }
            }
            Stage::GameChoice | Stage::WatchChoice => {
                if let Some(index) = ChoiceLayout::compute(self.card()).option_at(x, y) {
                    self.choose(index);
                }
            }
            Stage::ContactForm => {
                if self.wizard.is_sending() {
                    return;
                }
                if let Some(field) = ContactFormLayout::compute(self.card()).field_at(x, y) {
                    self.form.focus = field;
                    if field == FormField::Submit {
                        self.submit();
                    }
                }
            }
            Stage::Celebration => {
                if CelebrationLayout::compute(self.card()).receipt_link.contains(pos) {
                    self.wizard.open_receipt();
                }
            }
        }
    }

    fn accept(&mut self) {
        if self.wizard.accept() {
            self.choice_focus = 0;
        }
    }

    fn evade(&mut self) {
        if let Some(label) = self.wizard.evade(&mut rand::rng()) {
            tracing::debug!(
                hover_count = self.wizard.hover().hover_count,
                label,
                "Decline button evaded"
            );
        }
    }

    fn choose(&mut self, index: usize) {
        let index = index.min(1);
        match self.wizard.stage() {
            Stage::GameChoice => {
                self.wizard.choose_game(Game::ALL[index]);
                self.choice_focus = 0;
            }
            Stage::WatchChoice => {
                if self.wizard.choose_watch(Watch::ALL[index]) {
                    self.form = ContactFormState::new();
                }
            }
            _ => {}
        }
    }

    fn sync_form(&mut self) {
        self.wizard.set_name(self.form.name.value());
        self.wizard.set_date(self.form.date.value());
        self.wizard.set_email(self.form.email.value());
    }

    /// Validate the form and hand delivery to a background task
    fn submit(&mut self) {
        match self.wizard.begin_submit(&mut self.toasts) {
            Ok(payload) => {
                let notifier = Arc::clone(&self.notifier);
                let limit = self.config.notify_timeout;
                let event_tx = self.event_tx.clone();
                tracing::info!(to = %payload.to_email, "Sending receipt");
                tokio::spawn(async move {
                    let result = notify::dispatch(notifier.as_ref(), &payload, limit)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = event_tx.send(AppEvent::NotificationSettled { result });
                });
            }
            Err(SubmitError::MissingFields(missing)) => {
                if let Some(first) = missing.first() {
                    self.form.focus = match first {
                        RequiredField::Name => FormField::Name,
                        RequiredField::Date => FormField::Date,
                        RequiredField::Email => FormField::Email,
                    };
                }
            }
            Err(e) => tracing::debug!(error = %e, "Submit ignored"),
        }
    }

    fn start_compositor(&mut self) {
        if self.compositor.is_some() {
            return;
        }
        let frame_rate = self.config.frame_rate;
        let handle = match &self.config.video_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Starting keyed video");
                spawn_compositor(FfmpegVideo::open(path.clone()), frame_rate)
            }
            None => spawn_compositor(LoopingFrames::new(demo_frames()), frame_rate),
        };
        self.compositor = Some(handle);
    }

    fn stop_compositor(&mut self) {
        if let Some(mut handle) = self.compositor.take() {
            handle.shutdown();
        }
    }

    fn card(&self) -> Rect {
        let card = card_area(self.screen, CARD_WIDTH, CARD_HEIGHT);
        card_block().inner(card)
    }

    fn proposal_layout(&self) -> ProposalLayout {
        ProposalLayout::compute(
            self.screen,
            self.card(),
            self.proposal_image.is_some(),
            self.wizard.hover(),
            self.wizard.decline_label(),
        )
    }

    pub fn draw(&mut self, f: &mut Frame) {
        self.screen = f.area();
        let screen = self.screen;
        let card = self.card();
        let buf = f.buffer_mut();

        Block::default()
            .style(Style::default().bg(palette::PINK_WASH))
            .render(screen, buf);
        card_block().render(card_area(screen, CARD_WIDTH, CARD_HEIGHT), buf);

        match self.wizard.stage() {
            Stage::Proposal => {
                ProposalView::new(
                    self.proposal_layout(),
                    self.proposal_image.as_ref(),
                    self.wizard.decline_label(),
                    self.proposal_focus,
                )
                .render(screen, buf);
            }
            Stage::GameChoice => {
                let options = Game::ALL.map(|g| {
                    let color = match g {
                        Game::Valorant => palette::VALORANT_RED,
                        Game::Genshin => palette::GENSHIN_PURPLE,
                    };
                    (g.as_str(), color)
                });
                ChoiceView::new(
                    ChoiceLayout::compute(card),
                    "🎮",
                    Stage::GameChoice.title(),
                    options,
                    self.choice_focus,
                )
                .render(card, buf);
            }
            Stage::WatchChoice => {
                let options = Watch::ALL.map(|w| {
                    let color = match w {
                        Watch::Series => palette::SERIES_TEAL,
                        Watch::Movies => palette::MOVIES_ORANGE,
                    };
                    (w.as_str(), color)
                });
                ChoiceView::new(
                    ChoiceLayout::compute(card),
                    "🍿",
                    Stage::WatchChoice.title(),
                    options,
                    self.choice_focus,
                )
                .render(card, buf);
            }
            Stage::ContactForm => {
                ContactFormView::new(
                    ContactFormLayout::compute(card),
                    &self.form,
                    self.wizard.is_sending(),
                    &self.spinner,
                )
                .render(card, buf);
            }
            Stage::Celebration => {
                let frame = self.compositor.as_ref().and_then(|c| c.latest());
                CelebrationView::new(
                    CelebrationLayout::compute(card),
                    frame.as_deref(),
                    self.wizard.answers().email(),
                )
                .render(card, buf);
            }
        }

        if self.wizard.is_receipt_open() {
            ReceiptDialog::new(self.wizard.answers(), self.wizard.sender()).render(screen, buf);
        }

        if screen.height > 0 {
            let hints = Rect {
                y: screen.bottom() - 1,
                height: 1,
                ..screen
            };
            InstructionBar::new(self.key_hints())
                .key_color(palette::PINK)
                .render(hints, buf);
        }

        ToastView::new(&self.toasts).render(screen, buf);
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.wizard.is_receipt_open() {
            return vec![("Esc", "Close"), ("Ctrl+C", "Quit")];
        }
        match self.wizard.stage() {
            Stage::Proposal => vec![("Enter", "Choose"), ("Tab", "Switch"), ("Ctrl+C", "Quit")],
            Stage::GameChoice | Stage::WatchChoice => {
                vec![("←/→", "Pick"), ("Enter", "Confirm"), ("Ctrl+C", "Quit")]
            }
            Stage::ContactForm => vec![("Tab", "Next field"), ("Enter", "Send"), ("Ctrl+C", "Quit")],
            Stage::Celebration => vec![("r", "Receipt"), ("q", "Quit")],
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop_compositor();
    }
}

fn card_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::PINK_SOFT))
        .style(Style::default().bg(palette::PAPER))
}
