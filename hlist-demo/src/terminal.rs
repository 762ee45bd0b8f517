//! Raw-mode terminal session.
//!
//! Entering sets up the alternate screen, mouse capture and (where the
//! terminal supports it) key release reporting; dropping restores everything.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event as CrosstermEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal,
};
use unicode_width::UnicodeWidthChar;

/// Text attributes for one span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
    pub underline: bool,
}

/// A run of text at a fixed screen position.
#[derive(Debug, Clone)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub style: Style,
}

pub struct Terminal {
    stdout: io::Stdout,
    enhanced_keys: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
        }
        log::info!("terminal ready (key release events: {})", enhanced_keys);

        Ok(Self {
            stdout,
            enhanced_keys,
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Clear the screen and draw `spans`, clipped to the terminal width.
    pub fn draw(&mut self, spans: &[Span]) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            terminal::Clear(terminal::ClearType::All)
        )?;

        for span in spans {
            if span.y >= height || span.x >= width {
                continue;
            }
            let text = clip(&span.text, usize::from(width - span.x));
            queue!(self.stdout, cursor::MoveTo(span.x, span.y))?;
            apply_style(&mut self.stdout, span.style)?;
            queue!(self.stdout, Print(text), SetAttribute(Attribute::Reset))?;
        }

        self.stdout.flush()
    }
}

fn apply_style(out: &mut io::Stdout, style: Style) -> io::Result<()> {
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

/// Truncate `text` to at most `width` display columns.
pub fn clip(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Pad `text` with spaces to exactly `width` display columns.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = clip(text, width);
    let used: usize = out.chars().map(|c| c.width().unwrap_or(0)).sum();
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.enhanced_keys {
            let _ = execute!(self.stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
