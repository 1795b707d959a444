//! Indicator panel
//!
//! Modal dialog for one scanned file:
//! - paginated indicator table (3 rows per page)
//! - recommended fixes, each group with its own Show More / Show Less
//! - one global Show More / Show Less over the whole fix list
//!
//! The panel never closes itself. `handle_key` reports `PanelAction::Close`
//! and the owner decides what closing means. All state lives here and is
//! dropped with the panel, so reopening a file starts from page 1 with
//! everything collapsed.

pub mod disclosure;
pub mod pager;

use crate::report::{IndicatorEntry, PanelInput};
use crate::ui::theme::Theme;
use crate::ui::widgets;
use crossterm::event::{KeyCode, KeyEvent};
use disclosure::{Disclosure, Toggle};
use pager::{Pager, PAGE_SIZE};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Anything in the panel the user can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Close,
    Prev,
    Page(usize),
    Next,
    /// Show More / Show Less of one fix group (0-based group index)
    GroupToggle(usize),
    GlobalToggle,
}

/// Result of feeding a key to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Consumed,
    Ignored,
    Close,
}

/// One fix group as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView<'a> {
    pub index: usize,
    /// 1-based position in the list
    pub number: usize,
    pub issue: &'a str,
    pub steps: &'a [String],
    pub toggle: Option<Toggle>,
}

/// Everything the renderer needs, derived from the panel state
#[derive(Debug, Clone)]
pub struct PanelView<'a> {
    pub title: &'a str,
    pub rows: &'a [IndicatorEntry],
    pub current_page: usize,
    pub total_pages: usize,
    pub page_buttons: Vec<usize>,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub groups: Vec<GroupView<'a>>,
    pub global_toggle: Option<Toggle>,
}

pub struct PanelState {
    data: PanelInput,
    pager: Pager,
    disclosure: Disclosure,
    focus: Control,
    scroll: u16,
    /// Last scroll offset that still fills the fixes viewport, set by `render`
    max_scroll: u16,
}

impl PanelState {
    pub fn new(data: PanelInput) -> Self {
        let pager = Pager::new(data.indicators.len());
        Self {
            data,
            pager,
            disclosure: Disclosure::default(),
            focus: Control::Next,
            scroll: 0,
            max_scroll: 0,
        }
    }

    pub fn data(&self) -> &PanelInput {
        &self.data
    }

    pub fn focus(&self) -> Control {
        self.focus
    }

    pub fn view(&self) -> PanelView<'_> {
        let fixes = &self.data.recommended_fixes;
        let groups = self
            .disclosure
            .visible_groups(fixes)
            .iter()
            .enumerate()
            .map(|(index, group)| GroupView {
                index,
                number: index + 1,
                issue: &group.issue,
                steps: self.disclosure.visible_steps(index, &group.fix),
                toggle: self.disclosure.group_toggle(index, group.fix.len()),
            })
            .collect();

        PanelView {
            title: self.data.title(),
            rows: &self.data.indicators[self.pager.visible_range()],
            current_page: self.pager.current(),
            total_pages: self.pager.total_pages(),
            page_buttons: self.pager.window().collect(),
            prev_disabled: self.pager.prev_disabled(),
            next_disabled: self.pager.next_disabled(),
            groups,
            global_toggle: self.disclosure.global_toggle(fixes.len()),
        }
    }

    /// Controls currently on screen, in focus order
    pub fn controls(&self) -> Vec<Control> {
        let mut controls = vec![Control::Close, Control::Prev];
        controls.extend(self.pager.window().map(Control::Page));
        controls.push(Control::Next);

        let fixes = &self.data.recommended_fixes;
        for (index, group) in self.disclosure.visible_groups(fixes).iter().enumerate() {
            if self.disclosure.group_toggle(index, group.fix.len()).is_some() {
                controls.push(Control::GroupToggle(index));
            }
        }
        if self.disclosure.global_toggle(fixes.len()).is_some() {
            controls.push(Control::GlobalToggle);
        }
        controls
    }

    /// Activate a control. Controls that are not on screen do nothing.
    pub fn activate(&mut self, control: Control) -> PanelAction {
        if !self.controls().contains(&control) {
            return PanelAction::Consumed;
        }

        match control {
            Control::Close => return PanelAction::Close,
            Control::Prev => self.pager.prev(),
            Control::Next => self.pager.next(),
            Control::Page(page) => self.pager.select(page),
            Control::GroupToggle(index) => self.disclosure.toggle(index),
            Control::GlobalToggle => self.disclosure.toggle_global(),
        }

        self.refocus();
        PanelAction::Consumed
    }

    fn move_focus(&mut self, forward: bool) {
        let controls = self.controls();
        let len = controls.len();
        let pos = controls.iter().position(|c| *c == self.focus).unwrap_or(0);
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        self.focus = controls[next];
    }

    /// Keep focus on something that is still drawn
    fn refocus(&mut self) {
        let controls = self.controls();
        if controls.contains(&self.focus) {
            return;
        }
        self.focus = match self.focus {
            Control::Page(_) => Control::Page(self.pager.current()),
            Control::GroupToggle(_) => Control::GlobalToggle,
            other => other,
        };
        if !controls.contains(&self.focus) {
            self.focus = Control::Close;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PanelAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('c') => {
                self.activate(Control::Close)
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.focus),
            KeyCode::Left | KeyCode::Char('h') => self.activate(Control::Prev),
            KeyCode::Right | KeyCode::Char('l') => self.activate(Control::Next),
            KeyCode::Char('g') => self.activate(Control::GlobalToggle),
            KeyCode::Tab => {
                self.move_focus(true);
                PanelAction::Consumed
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                PanelAction::Consumed
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.max_scroll);
                PanelAction::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                PanelAction::Consumed
            }
            _ => PanelAction::Ignored,
        }
    }
}

// ── Rendering ──

const MAX_WIDTH: u16 = 100;

/// Draw the panel over `area`. Draws nothing when the panel is closed.
pub fn render(frame: &mut Frame, panel: Option<&mut PanelState>, theme: &Theme, area: Rect) {
    let Some(panel) = panel else {
        return;
    };
    let view = panel.view();

    let popup = widgets::centered_rect(
        area.width.saturating_sub(4).min(MAX_WIDTH),
        area.height.saturating_sub(2),
        area,
    );
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} - IoC ", view.title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.height < 10 || inner.width < 30 {
        frame.render_widget(
            Paragraph::new("Terminal too small").style(theme.text_dim()),
            inner,
        );
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),                     // close button
        Constraint::Length(PAGE_SIZE as u16 + 3), // indicator table
        Constraint::Length(1),                     // pagination
        Constraint::Length(1),
        Constraint::Min(3), // fixes
    ])
    .split(inner);

    let close = widgets::button("Close", panel.focus() == Control::Close, false, theme);
    frame.render_widget(
        Paragraph::new(Line::from(close)).alignment(Alignment::Right),
        chunks[0],
    );

    render_indicators(frame, &view, theme, chunks[1]);
    render_pagination(frame, panel, &view, theme, chunks[2]);
    render_fixes(frame, panel, theme, chunks[4]);
}

fn render_indicators(frame: &mut Frame, view: &PanelView, theme: &Theme, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let header = ["Level", "Type", "Triggered Actions"];
    let widths = [
        Constraint::Length(12),
        Constraint::Length(18),
        Constraint::Min(10),
    ];

    if view.rows.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let lines = vec![
            Line::styled(
                format!("{:<13}{:<19}{}", header[0], header[1], header[2]),
                theme.title(),
            ),
            Line::styled("No indicators to display", theme.text_dim()),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(Span::styled(
                    entry.level.as_str().to_string(),
                    theme.level(&entry.level),
                )),
                Cell::from(entry.kind.clone()).style(theme.text()),
                Cell::from(entry.indicator.clone()).style(theme.text()),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(theme.title()))
        .block(block)
        .style(theme.block_style());
    frame.render_widget(table, area);
}

fn render_pagination(
    frame: &mut Frame,
    panel: &PanelState,
    view: &PanelView,
    theme: &Theme,
    area: Rect,
) {
    let focus = panel.focus();
    let mut spans = vec![
        widgets::button("‹", focus == Control::Prev, view.prev_disabled, theme),
        Span::raw(" "),
    ];

    for &page in &view.page_buttons {
        let focused = focus == Control::Page(page);
        let mut span = widgets::button(&page.to_string(), focused, false, theme);
        if page == view.current_page && !focused {
            span = span.style(theme.title().add_modifier(Modifier::UNDERLINED));
        }
        spans.push(span);
        spans.push(Span::raw(" "));
    }

    spans.push(widgets::button(
        "›",
        focus == Control::Next,
        view.next_disabled,
        theme,
    ));

    if view.total_pages > 0 {
        spans.push(Span::styled(
            format!("   Page {} of {}", view.current_page, view.total_pages),
            theme.text_dim(),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .style(theme.block_style()),
        area,
    );
}

fn fixes_lines<'a>(view: &PanelView, focus: Control, theme: &Theme, width: u16) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::styled("Recommended Fixes", theme.title()),
        Line::styled("─".repeat(width as usize), theme.border()),
    ];

    if view.groups.is_empty() {
        lines.push(Line::styled("No recommended fixes available.", theme.text_dim()));
    }

    for group in &view.groups {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}. Issue: ", group.number),
                theme.text().add_modifier(Modifier::BOLD),
            ),
            Span::styled(group.issue.to_string(), theme.text()),
        ]));
        lines.push(Line::styled("   Recommended Fixes:", theme.text_dim()));
        for step in group.steps {
            lines.push(Line::from(vec![
                Span::styled("   • ", theme.text_dim()),
                Span::styled(step.clone(), theme.text()),
            ]));
        }
        if let Some(toggle) = group.toggle {
            let focused = focus == Control::GroupToggle(group.index);
            lines.push(Line::from(vec![
                Span::raw("   "),
                widgets::button(toggle.label(), focused, false, theme),
            ]));
        }
        lines.push(Line::raw(""));
    }

    if let Some(toggle) = view.global_toggle {
        lines.push(Line::from(widgets::button(
            toggle.label(),
            focus == Control::GlobalToggle,
            false,
            theme,
        )));
    }

    lines
}

/// Draw the fixes list and record how far it can scroll at this size.
/// The bound counts wrapped rows, so long steps stay reachable.
fn render_fixes(frame: &mut Frame, panel: &mut PanelState, theme: &Theme, area: Rect) {
    let paragraph = Paragraph::new(fixes_lines(&panel.view(), panel.focus(), theme, area.width))
        .style(theme.block_style())
        .wrap(Wrap { trim: false });

    let rows = paragraph.line_count(area.width);
    panel.max_scroll = rows.saturating_sub(area.height as usize).min(u16::MAX as usize) as u16;
    panel.scroll = panel.scroll.min(panel.max_scroll);

    frame.render_widget(paragraph.scroll((panel.scroll, 0)), area);
}
