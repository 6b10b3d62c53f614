use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use schip8_core::FrameBuffer;

/// # Display
/// Renders the SUPER-CHIP frame buffer into a terminal.
///
/// Each character cell covers two vertically adjacent pixels, so the 64x32 display takes up
/// 64x16 cells and the extended 128x64 display 128x32 cells.
/// The display only gets a call to `render` when the FrameBuffer is updated.
pub struct Display {
    out: Stdout,
    geometry: (usize, usize),
}

impl Display {
    /// Takes over the terminal: raw mode, alternate screen and a hidden cursor.
    /// Everything is restored when the Display is dropped.
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        enter_screen(&mut out, terminal::disable_raw_mode)?;
        Ok(Display {
            out,
            geometry: (0, 0),
        })
    }

    /// Draws the active geometry of `frame` from the top-left corner of the terminal.
    ///
    /// # Arguments
    /// * `frame` a SUPER-CHIP FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        let lines = frame_to_lines(frame);

        let geometry = (frame.width(), lines.len());
        if geometry != self.geometry {
            // Switching from extended to normal mode leaves the old, larger picture behind
            queue!(self.out, Clear(ClearType::All))?;
            self.geometry = geometry;
        }

        for (row, line) in lines.iter().enumerate() {
            queue!(self.out, MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Switches `out` to a cleared alternate screen with the cursor hidden.
/// There is no Display to drop yet if this fails, so `undo_raw_mode` is called instead.
fn enter_screen<W, F>(out: &mut W, undo_raw_mode: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce() -> io::Result<()>,
{
    execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)).map_err(|e| {
        let _ = undo_raw_mode();
        e
    })
}

/// Formats a FrameBuffer as lines of text.
///
/// This creates a black and white rendering by:
/// - Pairing each even pixel row with the row below it
/// - Mapping every pair of vertically adjacent pixels to a half-block character
///
/// # Arguments
/// * `frame` a SUPER-CHIP FrameBuffer
pub fn frame_to_lines(frame: &FrameBuffer) -> Vec<String> {
    let rows: Vec<&[u8]> = frame.rows().collect();
    rows.chunks(2)
        .map(|pair| {
            let (top, bottom) = (pair[0], pair.get(1).copied());
            top.iter()
                .enumerate()
                .map(|(x, &upper)| {
                    let lower = bottom.map_or(0, |row| row[x]);
                    match (upper, lower) {
                        (0, 0) => ' ',
                        (_, 0) => '▀',
                        (0, _) => '▄',
                        _ => '█',
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct ClosedTerminal;

    impl Write for ClosedTerminal {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_screen_switch_leaves_raw_mode() {
        let undone = Cell::new(false);
        let result = enter_screen(&mut ClosedTerminal, || {
            undone.set(true);
            Ok(())
        });
        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn test_screen_switch_keeps_raw_mode() {
        let undone = Cell::new(false);
        let mut out = Vec::new();
        let result = enter_screen(&mut out, || {
            undone.set(true);
            Ok(())
        });
        assert!(result.is_ok());
        assert!(!undone.get());
        assert!(!out.is_empty());
    }

    #[test]
    fn test_frame_to_lines() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(1, 0);
        frame.set_pixel(0, 1);
        frame.set_pixel(1, 1);
        frame.set_pixel(2, 1);
        let lines = frame_to_lines(&frame);

        assert_eq!(lines.len(), 16);
        assert!(lines.iter().all(|line| line.chars().count() == 64));
        assert_eq!(lines[0].chars().take(4).collect::<String>(), "▄█▄ ");
        assert!(lines[1..].iter().all(|line| line.trim().is_empty()));
    }

    #[test]
    fn test_frame_to_lines_upper_pixels() {
        let mut frame = FrameBuffer::new();
        frame.fill_row(30);
        let lines = frame_to_lines(&frame);
        assert_eq!(lines[15], "▀".repeat(64));
    }

    #[test]
    fn test_frame_to_lines_extended() {
        let mut frame = FrameBuffer::new();
        frame.set_extended(true);
        frame.set_pixel(127, 63);
        let lines = frame_to_lines(&frame);

        assert_eq!(lines.len(), 32);
        assert!(lines.iter().all(|line| line.chars().count() == 128));
        assert_eq!(lines[31].chars().last(), Some('▄'));
    }
}
