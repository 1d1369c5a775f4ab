//! Blocking terminal display.
//!
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half block glyph: foreground is the top pixel, background the bottom.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::{DefaultTerminal, Terminal};

use kaplan::{Frame as Image, Rasterizer, Scene};

const HALF_BLOCK: &str = "▀";

/// Show `scene` until the user presses `q` or Esc.
pub fn run(scene: &Scene) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, scene);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, scene: &Scene) -> Result<()> {
    let mut viewer = Viewer::new(scene);
    loop {
        viewer.draw(terminal)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
            // resizes are picked up by the next draw
            _ => {}
        }
    }
}

/// Keeps the last rendered image together with the area it was sized for.
struct Viewer<'a> {
    scene: &'a Scene,
    cached: Option<(Rect, Image)>,
}

impl<'a> Viewer<'a> {
    fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            cached: None,
        }
    }

    /// Draw one frame, re-rendering when the terminal area changed.
    ///
    /// The area is read inside the draw callback, after the terminal has
    /// applied any pending resize.
    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut failed = None;
        terminal.draw(|f| {
            let area = f.area();
            if let Err(err) = self.refresh(area) {
                failed = Some(err);
                return;
            }
            if let Some((_, image)) = &self.cached {
                blit(f.buffer_mut(), area, image);
            }
        })?;
        failed.map_or(Ok(()), Err)
    }

    fn refresh(&mut self, area: Rect) -> Result<()> {
        let stale = self.cached.as_ref().map_or(true, |(at, _)| *at != area);
        if stale && area.width > 0 && area.height > 0 {
            let mut target = Rasterizer::new(area.width as u32, area.height as u32 * 2)?;
            self.cached = Some((area, self.scene.render(&mut target)?));
        }
        Ok(())
    }
}

fn to_color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

fn blit(buf: &mut ratatui::buffer::Buffer, area: Rect, image: &Image) {
    let cols = area.width.min(image.width() as u16);
    let rows = area.height.min((image.height() / 2) as u16);
    for row in 0..rows {
        for col in 0..cols {
            let top = image.pixel(col as u32, row as u32 * 2);
            let bottom = image.pixel(col as u32, row as u32 * 2 + 1);
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(HALF_BLOCK)
                    .set_fg(to_color(top))
                    .set_bg(to_color(bottom));
            }
        }
    }
}
