//! Terminal setup, teardown, and drawing.

use std::io;
use std::io::Stdout;
use std::io::Write;
use std::panic;

use crossterm::cursor;
use crossterm::execute;
use crossterm::queue;
use crossterm::style::Attribute;
use crossterm::style::Color;
use crossterm::style::Print;
use crossterm::style::ResetColor;
use crossterm::style::SetAttribute;
use crossterm::style::SetForegroundColor;
use crossterm::terminal;
use crossterm::terminal::ClearType;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;

use crate::view::Frame;
use crate::view::SpanStyle;

/// Raw-mode alternate screen, restored on drop or panic.
pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { stdout })
    }

    /// Rows available for drawing.
    pub fn height(&self) -> io::Result<u16> {
        Ok(terminal::size()?.1)
    }

    /// Redraws the whole screen.
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        queue!(
            self.stdout,
            cursor::Hide,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::All)
        )?;

        for (row, line) in frame.lines.iter().enumerate().take(height as usize) {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            let mut remaining = width as usize;
            for span in &line.spans {
                if remaining == 0 {
                    break;
                }
                let text: String = span.text.chars().take(remaining).collect();
                remaining -= text.chars().count();
                let (color, attribute) = span_style(span.style);
                queue!(
                    self.stdout,
                    SetForegroundColor(color),
                    SetAttribute(attribute),
                    Print(text),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?;
            }
        }

        if let Some((column, row)) = frame.cursor
            && row < height
            && column < width
        {
            queue!(self.stdout, cursor::MoveTo(column, row), cursor::Show)?;
        }
        self.stdout.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

const ACCENT: (u8, u8, u8) = (122, 162, 247);

fn span_style(style: SpanStyle) -> (Color, Attribute) {
    match style {
        SpanStyle::Plain => (Color::Reset, Attribute::Reset),
        SpanStyle::Title => (rgb(ACCENT), Attribute::Bold),
        SpanStyle::Label => (Color::Grey, Attribute::Reset),
        SpanStyle::Input => (Color::White, Attribute::Reset),
        SpanStyle::FocusedInput => (rgb(ACCENT), Attribute::Bold),
        SpanStyle::Placeholder | SpanStyle::Muted => (Color::DarkGrey, Attribute::Reset),
        SpanStyle::Disabled => (Color::DarkGrey, Attribute::Dim),
        SpanStyle::Error => (Color::Rgb { r: 247, g: 118, b: 142 }, Attribute::Reset),
        SpanStyle::Success => (Color::Rgb { r: 158, g: 206, b: 106 }, Attribute::Reset),
        SpanStyle::Info => (Color::White, Attribute::Reset),
        SpanStyle::Button => (Color::White, Attribute::Reset),
        SpanStyle::FocusedButton => (rgb(ACCENT), Attribute::Reverse),
        SpanStyle::Snake(t) => (rgb(darken(ACCENT, 0.4 * (1.0 - t))), Attribute::Reset),
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// Scales a color toward black by `amount` in `0.0..=1.0`.
fn darken((r, g, b): (u8, u8, u8), amount: f32) -> (u8, u8, u8) {
    let keep = (1.0 - amount).clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * keep).round() as u8;
    (scale(r), scale(g), scale(b))
}
