use crate::terminal::Terminal;
use crossterm::style::Color;

/// Outer size of a bordered box around `text`: (width, height)
pub fn box_size(text: &str) -> (usize, usize) {
    let lines: Vec<&str> = text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (max_width + 4, lines.len() + 2) // 1 space padding plus border each side
}

/// Draw a bordered box with its top-left corner at (x, y)
pub fn draw_box(term: &mut Terminal, x: i32, y: i32, text: &str, border: Color, fg: Color, bold_first: bool) {
    let lines: Vec<&str> = text.lines().collect();
    let (box_width, box_height) = box_size(text);
    let max_width = box_width - 4;

    // Top border: ┌─────┐
    term.set(x, y, '┌', Some(border), false);
    for i in 1..box_width - 1 {
        term.set(x + i as i32, y, '─', Some(border), false);
    }
    term.set(x + box_width as i32 - 1, y, '┐', Some(border), false);

    // Content rows with side borders
    for (i, line) in lines.iter().enumerate() {
        let row = y + 1 + i as i32;
        term.set(x, row, '│', Some(border), false);

        let padding = max_width.saturating_sub(line.chars().count());
        let padded = format!(" {}{} ", line, " ".repeat(padding));
        term.set_str(x + 1, row, &padded, Some(fg), bold_first && i == 0);

        term.set(x + box_width as i32 - 1, row, '│', Some(border), false);
    }

    // Bottom border: └─────┘
    let bottom = y + box_height as i32 - 1;
    term.set(x, bottom, '└', Some(border), false);
    for i in 1..box_width - 1 {
        term.set(x + i as i32, bottom, '─', Some(border), false);
    }
    term.set(x + box_width as i32 - 1, bottom, '┘', Some(border), false);
}

/// Render a centered help overlay box with the provided text.
pub fn render_help_overlay(term: &mut Terminal, help_text: &str) {
    if help_text.is_empty() {
        return;
    }

    let (width, height) = term.size();
    let (box_width, box_height) = box_size(help_text);
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;

    draw_box(term, start_x as i32, start_y as i32, help_text, Color::White, Color::Grey, true);
}
