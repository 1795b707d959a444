//! Application state and event handling for iocview

use crate::config::Config;
use crate::modules::files::{FilesAction, FilesState};
use crate::modules::panel::{PanelAction, PanelState};
use crate::report::Report;
use crate::types::FlashMessage;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub theme: Theme,
    pub report: Report,
    pub files: FilesState,
    /// Open indicator panel; `None` while closed
    pub panel: Option<PanelState>,
    pub popup: PopupState,
    pub flash_message: Option<FlashMessage>,
    persist_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    None,
    Help,
}

impl App {
    pub fn new(config: Config, report: Report) -> Self {
        let theme = Theme::from_name(config.theme);
        Self {
            should_quit: false,
            config,
            theme,
            report,
            files: FilesState::new(),
            panel: None,
            popup: PopupState::None,
            flash_message: None,
            persist_config: true,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup == PopupState::Help {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc
            ) {
                self.popup = PopupState::None;
            }
            return Ok(());
        }

        if let Some(panel) = &mut self.panel {
            match panel.handle_key(key) {
                PanelAction::Close => self.close_panel(),
                PanelAction::Consumed => {}
                PanelAction::Ignored => self.handle_global_key(key),
            }
            return Ok(());
        }

        match self.files.handle_key(key, self.report.files.len()) {
            FilesAction::Open(index) => self.open_panel(index),
            FilesAction::None => {}
            FilesAction::Ignored => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => self.handle_global_key(key),
            },
        }
        Ok(())
    }

    fn handle_global_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('?') => self.popup = PopupState::Help,
            _ => {}
        }
    }

    /// Mount a fresh panel for one file
    pub fn open_panel(&mut self, index: usize) {
        let Some(file) = self.report.files.get(index) else {
            return;
        };
        log::info!(
            "Opening {} ({} indicators, {} fix groups)",
            file.title(),
            file.indicators.len(),
            file.recommended_fixes.len()
        );
        self.panel = Some(PanelState::new(file.clone()));
    }

    /// Close handler for the panel
    fn close_panel(&mut self) {
        if let Some(panel) = self.panel.take() {
            log::info!("Closed {}", panel.data().title());
        }
    }

    fn cycle_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        self.theme = Theme::from_name(self.config.theme);

        if !self.persist_config {
            return;
        }
        let message = match self.config.save() {
            Ok(()) => FlashMessage::new(format!("Theme: {}", self.config.theme.as_str()), false),
            Err(e) => {
                log::warn!("Could not save config: {:#}", e);
                FlashMessage::new(format!("Theme not saved: {}", e), true)
            }
        };
        self.flash_message = Some(message);
    }

    pub fn update_timers(&mut self) {
        if let Some(msg) = &self.flash_message {
            if msg.is_expired(3) {
                self.flash_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeName;
    use crate::report::PanelInput;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let report = Report {
            files: vec![
                PanelInput {
                    file: Some("a.txt".into()),
                    ..Default::default()
                },
                PanelInput {
                    file: Some("b.pcap".into()),
                    ..Default::default()
                },
            ],
        };
        let mut app = App::new(Config::default(), report);
        app.persist_config = false;
        app
    }

    #[test]
    fn test_open_and_close_panel() {
        let mut app = app();
        assert!(app.panel.is_none());

        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.panel.as_ref().unwrap().data().title(), "b.pcap");

        // q closes the panel, not the app
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.panel.is_none());
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_reopen_resets_state() {
        let mut app = app();
        app.report.files[0].indicators = vec![Default::default(); 7];
        app.open_panel(0);
        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.panel.as_ref().unwrap().view().current_page, 2);

        app.handle_key(key(KeyCode::Esc)).unwrap();
        app.open_panel(0);
        assert_eq!(app.panel.as_ref().unwrap().view().current_page, 1);
    }

    #[test]
    fn test_closed_panel_stays_closed() {
        let mut app = app();
        for code in [KeyCode::Tab, KeyCode::Right, KeyCode::Char('g'), KeyCode::Char(' ')] {
            app.handle_key(key(code)).unwrap();
            assert!(app.panel.is_none());
        }
    }

    #[test]
    fn test_theme_cycle_from_panel() {
        let mut app = app();
        app.open_panel(0);
        app.handle_key(key(KeyCode::Char('t'))).unwrap();
        assert_eq!(app.config.theme, ThemeName::Nord);
        assert!(app.panel.is_some());
    }

    #[test]
    fn test_help_popup_captures_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.popup, PopupState::Help);
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.panel.is_none());
        assert_eq!(app.popup, PopupState::None);
    }

    #[test]
    fn test_open_out_of_range_is_noop() {
        let mut app = app();
        app.open_panel(9);
        assert!(app.panel.is_none());
    }
}
