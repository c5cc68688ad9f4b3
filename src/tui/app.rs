//! Main TUI application state.
//!
//! Handles:
//! - Startup loading of artifacts and assets
//! - Input event handling
//! - Synchronous prediction on submit

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame, Terminal,
};

use crate::adapters::artifacts::{LoadedModel, StandardScaler};
use crate::adapters::{load_artifacts, AssetCatalog};
use crate::application::PredictionService;
use crate::config::Settings;

use super::styles::BatteryTheme;
use super::ui::{
    render_disclaimer,
    result::{render_result, ResultState},
    usage_form::{render_usage_form, UsageFormState},
};

/// Smallest terminal the layout fits without clipping.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// Service type wired up by [`App::new`].
pub type DefaultPredictionService = PredictionService<StandardScaler, LoadedModel>;

/// Load everything the UI needs before the first frame.
///
/// # Errors
/// Returns `BatteryLifeError::ArtifactLoad` or `BatteryLifeError::AssetMissing`.
pub fn load_dependencies(
    settings: &Settings,
) -> crate::Result<(DefaultPredictionService, AssetCatalog)> {
    let artifacts = load_artifacts(&settings.artifact_dir)?;
    let assets = AssetCatalog::load(&settings.asset_dir)?;
    Ok((PredictionService::from_artifacts(artifacts), assets))
}

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Prediction service over the loaded artifacts
    service: DefaultPredictionService,

    /// Checked static assets
    assets: AssetCatalog,

    /// Input controls
    form_state: UsageFormState,

    /// Last result
    result_state: ResultState,
}

impl App {
    /// Create a new application, loading artifacts and assets from `settings`.
    ///
    /// Refuses to start if either cannot be loaded.
    ///
    /// # Errors
    /// Returns error if artifacts or assets are missing or invalid.
    pub fn new(settings: &Settings) -> Result<Self> {
        let (service, assets) = load_dependencies(settings).with_context(|| {
            format!(
                "Startup failed (artifacts: {:?}, assets: {:?}). \
                 Set BATTERYLIFE_ARTIFACT_DIR / BATTERYLIFE_ASSET_DIR to override.",
                settings.artifact_dir, settings.asset_dir
            )
        })?;

        Ok(Self::with_dependencies(service, assets))
    }

    /// Create application with injected dependencies.
    #[must_use]
    pub fn with_dependencies(service: DefaultPredictionService, assets: AssetCatalog) -> Self {
        Self {
            should_quit: false,
            service,
            assets,
            form_state: UsageFormState::default(),
            result_state: ResultState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let area = f.area();
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            render_too_small(f, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(5), // Form
                Constraint::Min(16),   // Result
                Constraint::Length(1), // Key hints
                Constraint::Length(1), // Disclaimer
            ])
            .split(area);

        self.render_header(f, chunks[0]);
        render_usage_form(f, chunks[1], &self.form_state);
        render_result(f, chunks[2], &self.result_state, &self.assets);
        self.render_footer(f, chunks[3]);
        render_disclaimer(f, chunks[4]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let banner = self.assets.banner().map_or("", |a| a.name);
        let header = Paragraph::new(Line::from(vec![
            Span::styled(" Mobile Battery Life Predictor", BatteryTheme::title()),
            Span::styled(" │ ", BatteryTheme::text_muted()),
            Span::styled(
                format!("model: {}", self.service.model_kind()),
                BatteryTheme::text_secondary(),
            ),
            Span::styled(" │ ", BatteryTheme::text_muted()),
            Span::styled(banner, BatteryTheme::text_muted()),
        ]));

        f.render_widget(header, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let content = if let Some(notice) = &self.form_state.notice {
            Line::from(vec![
                Span::styled(" ! ", BatteryTheme::warning()),
                Span::styled(notice.clone(), BatteryTheme::warning()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" [↑↓] ", BatteryTheme::key_hint()),
                Span::styled("Field ", BatteryTheme::key_desc()),
                Span::styled("[←→] ", BatteryTheme::key_hint()),
                Span::styled("Adjust ", BatteryTheme::key_desc()),
                Span::styled("[0-9] ", BatteryTheme::key_hint()),
                Span::styled("Capacity ", BatteryTheme::key_desc()),
                Span::styled("[Enter] ", BatteryTheme::key_hint()),
                Span::styled("Predict ", BatteryTheme::key_desc()),
                Span::styled("[R] ", BatteryTheme::key_hint()),
                Span::styled("Reset ", BatteryTheme::key_desc()),
                Span::styled("[Q] ", BatteryTheme::key_hint()),
                Span::styled("Quit", BatteryTheme::key_desc()),
            ])
        };

        f.render_widget(Paragraph::new(content), area);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(),
            KeyCode::Right => self.form_state.increase(),
            KeyCode::Left => self.form_state.decrease(),
            KeyCode::PageUp => self.form_state.increase_coarse(),
            KeyCode::PageDown => self.form_state.decrease_coarse(),
            KeyCode::Home => self.form_state.to_min(),
            KeyCode::End => self.form_state.to_max(),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.form_state.reset();
                self.result_state = ResultState::Idle;
            }
            KeyCode::Char(c) => self.form_state.input_char(c),
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    fn submit(&mut self) {
        let profile = self.form_state.to_profile();
        let estimate = self.service.predict(&profile);
        self.result_state = ResultState::Complete {
            estimate,
            importances: self.service.feature_importances(),
        };
    }
}

fn render_too_small(f: &mut Frame, area: Rect) {
    let message = Paragraph::new(vec![
        Line::from(Span::styled("Terminal too small", BatteryTheme::warning())),
        Line::from(Span::styled(
            format!("Need {MIN_WIDTH}x{MIN_HEIGHT}, have {}x{}", area.width, area.height),
            BatteryTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(message, area);
}
