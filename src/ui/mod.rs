//! Terminal user interface.
//!
//! Implements the blocking prompt and notice of the export flow as modal
//! dialogs on an alternate terminal screen.

mod dialogs;

pub use dialogs::{render_choice_dialog, render_notice_dialog};

use crate::host::Presenter;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

/// How long to wait for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Rows of chrome around the item list of a choice dialog.
const CHOICE_CHROME_ROWS: u16 = 5;

/// Cursor state of an open choice dialog.
#[derive(Debug, Clone)]
pub struct ChoiceState {
    pub title: String,
    pub items: Vec<String>,
    /// Index of the highlighted item. Starts on the first entry.
    pub selected: usize,
    /// Index of the first visible item.
    pub scroll: usize,
}

impl ChoiceState {
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            items,
            selected: 0,
            scroll: 0,
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.scroll {
                self.scroll = self.selected;
            }
        }
    }

    /// Moves the cursor down, scrolling so it stays within `visible` rows.
    pub fn move_down(&mut self, visible: usize) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            let visible = visible.max(1);
            if self.selected >= self.scroll + visible {
                self.scroll = self.selected + 1 - visible;
            }
        }
    }

    /// Returns the highlighted item.
    pub fn current(&self) -> Option<&String> {
        self.items.get(self.selected)
    }
}

/// Helper function to center a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Presenter that draws modal dialogs in the terminal.
pub struct TerminalPresenter {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalPresenter {
    /// Switches the terminal to raw mode on the alternate screen.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    /// Restores the terminal to its original state.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    /// Rows available to the item list of a choice dialog.
    fn visible_rows(&self) -> io::Result<usize> {
        let size = self.terminal.size()?;
        let area = centered_rect(60, 60, Rect::new(0, 0, size.width, size.height));
        Ok(area.height.saturating_sub(CHOICE_CHROME_ROWS) as usize)
    }

    /// Blocks until a key is pressed and returns its code.
    fn next_key() -> io::Result<Option<KeyCode>> {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key.code));
                }
            }
        }
        Ok(None)
    }
}

impl Presenter for TerminalPresenter {
    fn prompt_choice(&mut self, title: &str, items: &[String]) -> io::Result<Option<String>> {
        let mut state = ChoiceState::new(title, items.to_vec());
        loop {
            self.terminal
                .draw(|frame| render_choice_dialog(frame, &state))?;

            match Self::next_key()? {
                Some(KeyCode::Up | KeyCode::Char('k')) => state.move_up(),
                Some(KeyCode::Down | KeyCode::Char('j')) => {
                    let visible = self.visible_rows()?;
                    state.move_down(visible);
                }
                Some(KeyCode::Enter) => return Ok(state.current().cloned()),
                Some(KeyCode::Esc | KeyCode::Char('q')) => return Ok(None),
                _ => {}
            }
        }
    }

    fn notify(&mut self, title: &str, message: &str) -> io::Result<()> {
        loop {
            self.terminal
                .draw(|frame| render_notice_dialog(frame, title, message))?;

            if let Some(KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) = Self::next_key()? {
                return Ok(());
            }
        }
    }
}
