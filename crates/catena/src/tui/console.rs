//! ratatui dialogs

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::collections::BTreeSet;
use std::io;

use super::Console;
use super::terminal::{Tui, restore_terminal, setup_terminal};

const APP_TITLE: &str = "Catena";

const MENU_HELP: &str = "↑↓/jk: select | Enter: choose | Esc/q: back";
const INPUT_HELP: &str = "Enter: accept | Backspace: delete | Esc: back";
const CONFIRM_HELP: &str = "←→/Tab: switch | y/n | Enter: accept | Esc: no";
const CHECKLIST_HELP: &str = "↑↓/jk: select | Space: toggle | Enter: accept | Esc/q: back";
const ALERT_HELP: &str = "↑↓/jk: scroll | Enter/Esc: close";

/// Full-screen console on the alternate screen. The terminal is restored
/// when the console is dropped.
pub struct TerminalConsole {
    terminal: Tui,
}

impl TerminalConsole {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: setup_terminal()?,
        })
    }

    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(key);
            }
        }
    }

    fn input(&mut self, title: &str, default: &str, masked: bool) -> io::Result<Option<String>> {
        let mut buffer = default.to_string();

        loop {
            self.terminal.draw(|f| {
                let area = draw_chrome(f, INPUT_HELP);
                let shown = if masked {
                    "*".repeat(buffer.chars().count())
                } else {
                    buffer.clone()
                };
                let line = Line::from(vec![
                    Span::raw(shown),
                    Span::styled("_", Style::default().fg(Color::Yellow)),
                ]);
                let paragraph = Paragraph::new(line)
                    .wrap(Wrap { trim: false })
                    .block(Block::default().title(title).borders(Borders::ALL));
                f.render_widget(paragraph, area);
            })?;

            match self.next_key()?.code {
                KeyCode::Esc => return Ok(None),
                KeyCode::Enter => return Ok(Some(buffer)),
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            }
        }
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal(&mut self.terminal) {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

impl Console for TerminalConsole {
    fn menu(&mut self, title: &str, items: &[String]) -> io::Result<Option<usize>> {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }

        loop {
            self.terminal.draw(|f| {
                let area = draw_chrome(f, MENU_HELP);
                let list = List::new(items.iter().map(|item| ListItem::new(item.as_str())))
                    .block(Block::default().title(title).borders(Borders::ALL))
                    .highlight_style(highlight())
                    .highlight_symbol("> ");
                f.render_stateful_widget(list, area, &mut state);
            })?;

            match self.next_key()?.code {
                KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
                KeyCode::Enter => {
                    if let Some(index) = state.selected() {
                        return Ok(Some(index));
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => select_next(&mut state, items.len()),
                KeyCode::Up | KeyCode::Char('k') => select_previous(&mut state),
                _ => {}
            }
        }
    }

    fn prompt(&mut self, title: &str, default: &str) -> io::Result<Option<String>> {
        self.input(title, default, false)
    }

    fn password(&mut self, title: &str) -> io::Result<Option<String>> {
        self.input(title, "", true)
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut yes = false;

        loop {
            self.terminal.draw(|f| {
                let area = draw_chrome(f, CONFIRM_HELP);
                let button = |label: &'static str, active: bool| {
                    if active {
                        Span::styled(label, highlight())
                    } else {
                        Span::raw(label)
                    }
                };
                let text = vec![
                    Line::from(""),
                    Line::from(question),
                    Line::from(""),
                    Line::from(vec![
                        button("[ Yes ]", yes),
                        Span::raw("    "),
                        button("[ No ]", !yes),
                    ]),
                ];
                let paragraph = Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: false })
                    .block(Block::default().title("Confirm").borders(Borders::ALL));
                f.render_widget(paragraph, area);
            })?;

            match self.next_key()?.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                KeyCode::Enter => return Ok(yes),
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => yes = !yes,
                _ => {}
            }
        }
    }

    fn checklist(&mut self, title: &str, items: &[String]) -> io::Result<Option<Vec<usize>>> {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        let mut checked = BTreeSet::new();

        loop {
            self.terminal.draw(|f| {
                let area = draw_chrome(f, CHECKLIST_HELP);
                let rows = items.iter().enumerate().map(|(i, item)| {
                    let mark = if checked.contains(&i) { "[x] " } else { "[ ] " };
                    ListItem::new(format!("{}{}", mark, item))
                });
                let list = List::new(rows)
                    .block(Block::default().title(title).borders(Borders::ALL))
                    .highlight_style(highlight())
                    .highlight_symbol("> ");
                f.render_stateful_widget(list, area, &mut state);
            })?;

            match self.next_key()?.code {
                KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
                KeyCode::Enter => return Ok(Some(checked.into_iter().collect())),
                KeyCode::Char(' ') => {
                    if let Some(index) = state.selected()
                        && !checked.remove(&index)
                    {
                        checked.insert(index);
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => select_next(&mut state, items.len()),
                KeyCode::Up | KeyCode::Char('k') => select_previous(&mut state),
                _ => {}
            }
        }
    }

    fn alert(&mut self, message: &str) -> io::Result<()> {
        let mut scroll: u16 = 0;

        loop {
            self.terminal.draw(|f| {
                let area = draw_chrome(f, ALERT_HELP);
                let paragraph = Paragraph::new(message)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0))
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(paragraph, area);
            })?;

            match self.next_key()?.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => scroll = scroll.saturating_add(1),
                KeyCode::Up | KeyCode::Char('k') => scroll = scroll.saturating_sub(1),
                KeyCode::PageDown => scroll = scroll.saturating_add(10),
                KeyCode::PageUp => scroll = scroll.saturating_sub(10),
                _ => {}
            }
        }
    }
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn select_next(state: &mut ListState, len: usize) {
    if let Some(index) = state.selected()
        && index + 1 < len
    {
        state.select(Some(index + 1));
    }
}

fn select_previous(state: &mut ListState) {
    if let Some(index) = state.selected()
        && index > 0
    {
        state.select(Some(index - 1));
    }
}

/// Draw header and footer, returning the content area
fn draw_chrome(frame: &mut Frame, help: &str) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(APP_TITLE)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);

    chunks[1]
}
