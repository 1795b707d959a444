//! Reusable UI widgets for iocview
//!
//! - Popup dialogs
//! - Buttons
//! - Status bar
//! - Flash messages
//! - Layout helpers

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, char)],
    theme: &Theme,
    area: Rect,
) {
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(4),
    };

    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

    if !buttons.is_empty() && popup_area.height >= 3 {
        let button_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height - 2,
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };

        let button_spans: Vec<Span> = buttons
            .iter()
            .enumerate()
            .flat_map(|(i, (label, key))| {
                let mut spans = vec![
                    Span::styled("[", theme.text_dim()),
                    Span::styled(
                        key.to_string(),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("] ", theme.text_dim()),
                    Span::styled(*label, theme.text()),
                ];
                if i < buttons.len() - 1 {
                    spans.push(Span::raw("    "));
                }
                spans
            })
            .collect();

        let buttons_widget = Paragraph::new(Line::from(button_spans))
            .alignment(Alignment::Center);
        frame.render_widget(buttons_widget, button_area);
    }
}

/// A bracketed button label, e.g. `[ Close ]`
pub fn button<'a>(label: &str, focused: bool, disabled: bool, theme: &Theme) -> Span<'a> {
    Span::styled(format!("[ {} ]", label), theme.button(focused, disabled))
}

/// Render a flash message at the bottom of the screen
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, flash_area);
    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message, style),
    ]))
    .style(theme.block_style());
    frame.render_widget(flash, flash_area);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, status_area);

    let left_widget = Paragraph::new(left_content).style(theme.text_dim());

    let right_len = (right_content.chars().count() as u16).min(status_area.width);
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content).style(theme.text_dim());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}
