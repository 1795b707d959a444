//! File list
//!
//! One row per scanned file with its scan summary. Enter opens the
//! indicator panel for the selected file.

use crate::report::{Level, PanelInput};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// What the file list wants the app to do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilesAction {
    None,
    Open(usize),
    Ignored,
}

#[derive(Debug, Default)]
pub struct FilesState {
    pub selected: usize,
}

impl FilesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent, file_count: usize) -> FilesAction {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if file_count > 0 {
                    self.selected = (self.selected + 1).min(file_count - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = file_count.saturating_sub(1);
            }
            KeyCode::Enter => {
                if self.selected < file_count {
                    return FilesAction::Open(self.selected);
                }
            }
            _ => return FilesAction::Ignored,
        }
        FilesAction::None
    }
}

fn level_cell<'a>(file: &PanelInput, theme: &Theme) -> Cell<'a> {
    match file.level() {
        Some(level) => Cell::from(Span::styled(level.as_str().to_string(), theme.level(&level))),
        None => Cell::from(Span::styled("-", theme.text_dim())),
    }
}

fn count_cell<'a>(file: &PanelInput, theme: &Theme) -> Cell<'a> {
    match file.vulnerability_count {
        Some(0) => Cell::from(Span::styled("0", theme.success())),
        Some(n) => Cell::from(Span::styled(n.to_string(), theme.warning())),
        None => Cell::from(Span::styled("-", theme.text_dim())),
    }
}

/// Highest indicator level in a file, for the summary column
fn worst_level(file: &PanelInput) -> Option<&Level> {
    let rank = |l: &Level| match l {
        Level::High => 4,
        Level::Medium => 3,
        Level::LowMedium => 2,
        Level::Low => 1,
        Level::Other(_) => 0,
    };
    file.indicators
        .iter()
        .map(|i| &i.level)
        .filter(|l| rank(*l) > 0)
        .max_by_key(|l| rank(*l))
}

pub fn render(
    frame: &mut Frame,
    state: &FilesState,
    files: &[PanelInput],
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" Scanned Files ({}) ", files.len()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    if files.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(vec![
                Line::raw(""),
                Line::styled("  No files in this report", theme.text_dim()),
            ]),
            inner,
        );
        return;
    }

    let rows: Vec<Row> = files
        .iter()
        .map(|file| {
            let worst = match worst_level(file) {
                Some(level) => Cell::from(Span::styled(
                    level.as_str().to_string(),
                    theme.level(level),
                )),
                None => Cell::from(Span::styled("-", theme.text_dim())),
            };
            Row::new(vec![
                Cell::from(file.title().to_string()),
                level_cell(file, theme),
                Cell::from(file.vulnerability_type.clone().unwrap_or_default()),
                count_cell(file, theme),
                Cell::from(file.indicators.len().to_string()),
                worst,
                Cell::from(file.recommended_fixes.len().to_string()),
            ])
            .style(theme.text())
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(11),
        Constraint::Length(16),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(5),
    ];

    let header = Row::new(["File", "Risk", "Type", "Vulns", "Indicators", "Worst", "Fixes"])
        .style(theme.title());

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(theme.selected())
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}
