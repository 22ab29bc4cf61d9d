//! Interactive map: mouse hover over launch sites, launch list, reload

use crate::canvas::{draw_surface, BrailleCanvas, Fit};
use crate::geo::GeographyFeature;
use crate::help::{box_size, draw_box, render_help_overlay};
use crate::launches::{format_list, Launch};
use crate::map::MapView;
use crate::spacex::{Dataset, SpaceX};
use crate::terminal::{MouseCaptureGuard, Terminal};
use crossterm::event::{Event, KeyCode, KeyModifiers, MouseEventKind};
use crossterm::style::Color;
use std::io;

const HELP_TEXT: &str = "\
LAUNCHMAP
─────────────────
Mouse  Hover a site
l      Launch list
r      Reload data
?      Close help
q/Esc  Quit
─────────────────";

const LIST_WIDTH: u16 = 44;
const POLL_MS: u64 = 100;

/// Map area and optional launch list panel for a terminal size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub map_cols: u16,
    pub map_rows: u16,
    pub list_cols: u16,
    pub status_row: u16,
}

impl Layout {
    pub fn new(cols: u16, rows: u16, show_list: bool) -> Self {
        let list_cols = if show_list { LIST_WIDTH.min(cols / 3) } else { 0 };
        Self {
            map_cols: cols.saturating_sub(list_cols).max(1),
            map_rows: rows.saturating_sub(1).max(1),
            list_cols,
            status_row: rows.saturating_sub(1),
        }
    }
}

/// Rasterize the map into the top-left `cols` x `rows` cells, including the tooltip
pub fn draw_map(term: &mut Terminal, view: &MapView, cols: u16, rows: u16) -> Fit {
    let surface = view.surface();
    let fit = Fit::new(surface.size(), cols, rows);
    let mut canvas = BrailleCanvas::new(cols, rows);
    draw_surface(&mut canvas, &fit, surface);
    canvas.blit(term);

    let tooltip = view.tooltip();
    if tooltip.visible {
        let (col, row) = fit.surface_to_cell(tooltip.anchor);
        let (w, h) = box_size(&tooltip.content);
        let x = col.min(cols as i32 - w as i32).max(0);
        let y = row.min(rows as i32 - h as i32).max(0);
        draw_box(term, x, y, &tooltip.content, Color::DarkGrey, Color::White, true);
    }
    fit
}

pub struct Viewer {
    view: MapView,
    geography: Vec<GeographyFeature>,
    launches: Vec<Launch>,
    client: SpaceX,
    show_list: bool,
    show_help: bool,
    status: Option<String>,
}

impl Viewer {
    /// Takes a loaded dataset; the map is drawn before the first frame
    pub fn new(mut view: MapView, geography: Vec<GeographyFeature>, dataset: Dataset, client: SpaceX) -> Self {
        view.load(&geography, &dataset.launchpads);
        Self {
            view,
            geography,
            launches: dataset.launches,
            client,
            show_list: false,
            show_help: false,
            status: None,
        }
    }

    #[cfg(test)]
    pub fn view(&self) -> &MapView {
        &self.view
    }

    #[cfg(test)]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns false when the viewer should exit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Char('l') | KeyCode::Char('L') => self.show_list = !self.show_list,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            _ => {}
        }
        true
    }

    /// Pointer over a terminal cell
    pub fn handle_mouse(&mut self, col: u16, row: u16, cols: u16, rows: u16) {
        let layout = Layout::new(cols, rows, self.show_list);
        let fit = Fit::new(self.view.surface().size(), layout.map_cols, layout.map_rows);
        let in_map = col < layout.map_cols
            && row < layout.map_rows
            && fit.contains_cell(col, row, self.view.surface().size());
        if !in_map {
            self.view.pointer_left();
            return;
        }

        let point = fit.cell_to_surface(col, row);
        let drawable = self.view.surface().to_drawable(point);
        if self.view.surface().viewport().contains(drawable.x, drawable.y) {
            self.view.pointer_at(point, fit.slop());
        } else {
            self.view.pointer_left();
        }
    }

    /// The terminal lost focus; the pointer is no longer over the map
    pub fn focus_lost(&mut self) {
        self.view.pointer_left();
    }

    /// Fetch both datasets again; on failure the current map stays
    pub fn reload(&mut self) {
        match self.client.fetch_all() {
            Ok(dataset) => {
                self.view.load(&self.geography, &dataset.launchpads);
                self.launches = dataset.launches;
                self.status = Some(format!("reloaded {} sites", self.view.markers().len()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "reload failed");
                self.status = Some(format!("reload failed: {}", e));
            }
        }
    }

    pub fn draw(&self, term: &mut Terminal) {
        term.clear();
        let (cols, rows) = term.size();
        let layout = Layout::new(cols, rows, self.show_list);

        draw_map(term, &self.view, layout.map_cols, layout.map_rows);
        if layout.list_cols > 0 {
            self.draw_list(term, &layout);
        }
        self.draw_status(term, &layout, cols);

        if self.show_help {
            render_help_overlay(term, HELP_TEXT);
        }
    }

    fn draw_list(&self, term: &mut Terminal, layout: &Layout) {
        let x = layout.map_cols as i32;
        for row in 0..layout.map_rows {
            term.set(x, row as i32, '│', Some(Color::DarkGrey), false);
        }
        let title = format!(" Launches ({})", self.launches.len());
        term.set_str(x + 1, 0, &title, Some(Color::White), true);

        // Latest launches are at the end of the list
        let text = format_list(&self.launches);
        let lines: Vec<&str> = text.lines().collect();
        let visible = layout.map_rows.saturating_sub(1) as usize;
        let start = lines.len().saturating_sub(visible);
        let width = layout.list_cols.saturating_sub(2) as usize;
        for (i, line) in lines[start..].iter().enumerate() {
            let clipped: String = line.chars().take(width).collect();
            term.set_str(x + 2, 1 + i as i32, &clipped, Some(Color::Grey), false);
        }
    }

    fn draw_status(&self, term: &mut Terminal, layout: &Layout, cols: u16) {
        let row = layout.status_row as i32;
        let left = match &self.status {
            Some(status) => format!(" {}", status),
            None => match self.view.hovered_site() {
                Some(site) => format!(" {}  {}", site.name, site.status),
                None => format!(" launchmap  {} sites  {} launches", self.view.markers().len(), self.launches.len()),
            },
        };
        term.set_str(0, row, &left, Some(Color::Grey), false);
        let hint = "? help ";
        term.set_str(cols as i32 - hint.len() as i32, row, hint, Some(Color::DarkGrey), false);
    }

    pub fn run(&mut self, term: &mut Terminal) -> io::Result<()> {
        let _mouse_guard = MouseCaptureGuard::enable()?;
        term.clear_screen()?;
        let mut dirty = true;

        loop {
            if dirty {
                self.draw(term);
                term.present()?;
                dirty = false;
            }

            let Some(event) = term.poll_event(POLL_MS)? else {
                continue;
            };
            match event {
                Event::Key(key) => {
                    if !self.handle_key(key.code, key.modifiers) {
                        break;
                    }
                    dirty = true;
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
                        let before = (self.view.interaction_state(), self.view.tooltip().anchor);
                        let (cols, rows) = term.size();
                        self.handle_mouse(mouse.column, mouse.row, cols, rows);
                        dirty = before != (self.view.interaction_state(), self.view.tooltip().anchor);
                    }
                }
                Event::FocusLost => {
                    self.focus_lost();
                    dirty = true;
                }
                Event::Resize(w, h) => {
                    term.resize(w, h);
                    term.clear_screen()?;
                    dirty = true;
                }
                _ => {}
            }
        }

        Ok(())
    }
}
