//! Main rendering module for iocview
//!
//! Layers, bottom to top:
//! - File list
//! - Status bar
//! - Indicator panel (when open)
//! - Help popup + flash messages

use crate::app::{App, PopupState};
use crate::modules::{files, panel};
use crate::ui::widgets;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Block,
    Frame,
};

/// Main render function, entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let theme = &app.theme;

    frame.render_widget(Block::default().style(theme.block_style()), area);

    let vertical = Layout::vertical([
        Constraint::Min(3),    // file list
        Constraint::Length(1), // status bar
    ])
    .split(area);

    files::render(frame, &app.files, &app.report.files, theme, vertical[0]);
    render_status_bar(frame, app, vertical[1]);

    panel::render(frame, app.panel.as_mut(), theme, vertical[0]);

    render_popups(frame, app, area);
}

/// Render status bar with context-sensitive keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.panel.is_some() {
        "[Tab] Focus  [Enter] Activate  [h/l] Page  [g] All fixes  [j/k] Scroll  [Esc] Close"
    } else {
        "[j/k] Navigate  [Enter] Open  [t] Theme  [?] Help  [q] Quit"
    };
    let right = format!("iocview {}", env!("CARGO_PKG_VERSION"));
    widgets::render_status_bar(frame, hints, &right, &app.theme, area);
}

/// Render popup overlays
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if app.popup == PopupState::Help {
        let content = vec![
            Line::styled("File list", theme.title()),
            Line::raw("  j/k        Select file"),
            Line::raw("  Enter      Open indicator panel"),
            Line::raw("  t          Cycle theme"),
            Line::raw("  q          Quit"),
            Line::raw(""),
            Line::styled("Indicator panel", theme.title()),
            Line::raw("  Tab/S-Tab  Move focus"),
            Line::raw("  Enter      Activate focused button"),
            Line::raw("  h/l        Previous / next page"),
            Line::raw("  g          Show more / fewer fix groups"),
            Line::raw("  j/k        Scroll fixes"),
            Line::raw("  Esc        Close panel"),
        ];
        widgets::render_popup(frame, "Help", content, &[("OK", 'o')], theme, area);
    }

    if let Some(msg) = &app.flash_message {
        widgets::render_flash_message(frame, &msg.text, msg.is_error, theme, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::report::{PanelInput, Report};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        let report = Report {
            files: vec![PanelInput {
                file: Some("capture.pcap".into()),
                risk_level: Some("High".into()),
                vulnerability_type: Some("Network Traffic".into()),
                vulnerability_count: Some(12),
                ..Default::default()
            }],
        };
        App::new(Config::default(), report)
    }

    #[test]
    fn test_file_list_screen() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("Scanned Files (1)"));
        assert!(text.contains("capture.pcap"));
        assert!(text.contains("Network Traffic"));
        assert!(text.contains("[Enter] Open"));
        assert!(!text.contains("- IoC"));
    }

    #[test]
    fn test_panel_overlay() {
        let mut app = app();
        app.open_panel(0);
        let text = screen(&mut app);
        assert!(text.contains("capture.pcap - IoC"));
        assert!(text.contains("[Esc] Close"));
    }

    #[test]
    fn test_empty_report() {
        let mut app = App::new(Config::default(), Report::default());
        assert!(screen(&mut app).contains("No files in this report"));
    }
}
