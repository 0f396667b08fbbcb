//! Full-screen terminal presenter.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

use super::table::{footer, header_cells, row_cells, sensor_label, DISCLAIMER, TITLE};
use super::Presenter;
use crate::sensors::SensorSnapshot;

/// Color scheme.
const HEADER: Color = Color::Cyan;
const GOOD: Color = Color::Green;
const SENSOR_ID: Color = Color::Yellow;
const ERROR: Color = Color::Red;

/// Presenter drawing to the alternate screen of the controlling terminal.
pub struct TerminalPresenter {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalPresenter {
    /// Switches the terminal to raw mode and the alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let terminal = rollback_on_error(setup_screen, || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Returns the terminal to its normal state.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

fn setup_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("Failed to initialize terminal")?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

/// Runs `setup`, undoing earlier terminal changes with `rollback` if it fails.
fn rollback_on_error<T>(
    setup: impl FnOnce() -> Result<T>,
    rollback: impl FnOnce(),
) -> Result<T> {
    let result = setup();
    if result.is_err() {
        rollback();
    }
    result
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, snapshots: &[SensorSnapshot]) -> Result<()> {
        self.terminal.draw(|frame| draw(frame, snapshots))?;
        Ok(())
    }

    fn quit_requested(&mut self) -> Result<bool> {
        // Drain everything queued since the last tick without waiting
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true)
                    }
                    _ => {}
                }
            }
        }
        Ok(false)
    }
}

/// Height of the table area: header, its margin and one line per sensor.
fn table_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

fn draw(frame: &mut Frame, snapshots: &[SensorSnapshot]) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(table_height(snapshots.len())),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(frame.area());

    frame.render_widget(
        Paragraph::new(TITLE).style(Style::default().fg(HEADER).add_modifier(Modifier::BOLD)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(DISCLAIMER).style(Style::default().add_modifier(Modifier::DIM)),
        chunks[1],
    );

    let header = Row::new(header_cells())
        .style(Style::default().add_modifier(Modifier::UNDERLINED))
        .bottom_margin(1);

    let body = snapshots.iter().map(|snapshot| {
        let value_style = if snapshot.online {
            Style::default().fg(GOOD)
        } else {
            Style::default().fg(ERROR)
        };
        let mut cells = vec![Cell::from(sensor_label(snapshot.index))
            .style(Style::default().fg(SENSOR_ID))];
        cells.extend(
            row_cells(snapshot)
                .into_iter()
                .map(|value| Cell::from(value).style(value_style)),
        );
        Row::new(cells)
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    frame.render_widget(
        Table::new(body, widths).header(header).column_spacing(2),
        chunks[3],
    );

    frame.render_widget(Paragraph::new(Line::from(footer(snapshots))), chunks[4]);
}
