mod screens;

use std::io::{self, IsTerminal};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use pong::{GameMode, Presentation};

pub use screens::{StatusLine, View};

/// Menu entries in display order; the last one quits.
pub const MENU_ENTRIES: usize = GameMode::ALL.len() + 1;

/// Presentation state the game core drives through [`Presentation`].
#[derive(Debug)]
pub struct Hud {
    pub menu_visible: bool,
    pub score_visible: bool,
    pub selected: usize,
    pub notification: Option<String>,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            menu_visible: true,
            score_visible: false,
            selected: 0,
            notification: None,
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(MENU_ENTRIES - 1);
    }

    /// `None` means the quit entry.
    pub fn selected_mode(&self) -> Option<GameMode> {
        GameMode::ALL.get(self.selected).copied()
    }

    pub fn dismiss_notification(&mut self) -> bool {
        self.notification.take().is_some()
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation for Hud {
    fn hide_menu(&mut self) {
        self.menu_visible = false;
    }

    fn show_score(&mut self) {
        self.score_visible = true;
    }

    fn show_menu(&mut self) {
        self.menu_visible = true;
        self.score_visible = false;
        self.selected = 0;
    }

    fn notify(&mut self, message: &str) {
        self.notification = Some(message.to_string());
    }
}

/// Terminal surface. Creating it takes over the terminal; dropping it
/// restores the previous state.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    reports_release: bool,
}

impl Tui {
    pub fn new() -> io::Result<Self> {
        if !io::stdout().is_terminal() {
            return Err(io::Error::other("stdout is not a terminal"));
        }

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if reports_release {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            reports_release,
        })
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn height(&self) -> io::Result<u16> {
        Ok(self.terminal.size()?.height)
    }

    pub fn draw(&mut self, view: &View<'_>) -> io::Result<()> {
        self.terminal.draw(|frame| screens::render(frame, view))?;
        Ok(())
    }

    pub fn restore_terminal(&mut self) -> io::Result<()> {
        if self.reports_release {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
