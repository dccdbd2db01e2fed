use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::board::{Color, Position, HEIGHT, WIDTH};
use crate::game::Display;
use crate::runtime::Event;

const PIXEL: &str = "██";
const ORIGIN: (u16, u16) = (2, 1);
const TEXT_ROW: u16 = ORIGIN.1 + HEIGHT as u16 + 1;
const HELP_ROW: u16 = TEXT_ROW + 2;

/// How long each character of a message stays on screen.
const TEXT_CHAR_TIME: Duration = Duration::from_millis(300);

/// Stands in for the LED matrix: every pixel is a true-colour block.
pub struct TermDisplay {
    stdout: Stdout,
    events: UnboundedSender<Event>,
    showing_text: bool,
}

impl TermDisplay {
    pub fn new(events: UnboundedSender<Event>) -> Self {
        TermDisplay { stdout: stdout(), events, showing_text: false }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(
            self.stdout,
            cursor::Hide,
            cursor::DisableBlinking,
            terminal::Clear(ClearType::All)
        )
        .context("Error preparing terminal")?;

        self.draw_help()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
        .context("Error leaving alt screen")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_help(&mut self) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(ORIGIN.0, HELP_ROW),
            style::Print("Arrows/WASD move, Enter/Space click, q quits")
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    fn draw_frame(&mut self, frame: &[Color]) -> Result<()> {
        for (i, colour) in frame.iter().enumerate() {
            let pos = Position::from_index(i);
            let column = ORIGIN.0 + pos.x as u16 * 2;
            let row = ORIGIN.1 + pos.y as u16;

            queue!(
                self.stdout,
                cursor::MoveTo(column, row),
                style::SetForegroundColor(rgb(*colour)),
                style::Print(PIXEL)
            )?;
        }
        queue!(self.stdout, style::ResetColor)?;

        if self.showing_text {
            self.showing_text = false;
            queue!(self.stdout, cursor::MoveTo(0, TEXT_ROW), terminal::Clear(ClearType::CurrentLine))?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn draw_text(&mut self, message: &str) -> Result<()> {
        let width = WIDTH as usize * 2;
        let line = format!("{line: ^width$}", line = message.trim(), width = width);

        queue!(
            self.stdout,
            cursor::MoveTo(0, TEXT_ROW),
            terminal::Clear(ClearType::CurrentLine),
            cursor::MoveTo(ORIGIN.0, TEXT_ROW),
            style::Print(line)
        )?;
        self.stdout.flush()?;

        self.showing_text = true;
        Ok(())
    }
}

impl Display for TermDisplay {
    fn set_full_frame(&mut self, frame: &[Color]) {
        if let Err(e) = self.draw_frame(frame) {
            warn!("failed to draw frame: {:#}", e);
        }
    }

    fn show_text(&mut self, message: &str) {
        if let Err(e) = self.draw_text(message) {
            warn!("failed to draw text: {:#}", e);
        }

        let events = self.events.clone();
        let wait = TEXT_CHAR_TIME * message.chars().count() as u32;
        tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            let _ = events.send(Event::TextShown);
        });
    }
}

fn rgb(colour: Color) -> style::Color {
    let [r, g, b] = colour;
    style::Color::Rgb { r, g, b }
}
