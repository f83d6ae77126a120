#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from f32 to u16 since scaled positions are clamped to the terminal
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since negative positions are skipped first
    clippy::cast_sign_loss,
    // Allow precision loss when casting between numeric types since exact precision isn't critical for drawing
    clippy::cast_precision_loss
)]

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::components::{Bird, GamePhase, GameState};
use crate::pipes::{ColorTier, PipeManager};
use crate::systems::FloorLine;

const SKY: Color = Color::Rgb(70, 180, 200);
const FLOOR: Color = Color::Rgb(210, 185, 110);
const BIRD: Color = Color::Rgb(245, 200, 66);

// Minimum terminal size for a readable field
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

#[must_use]
pub fn tier_color(tier: ColorTier) -> Color {
    match tier {
        ColorTier::Base => Color::Rgb(100, 170, 40),
        ColorTier::LightGreen => Color::Rgb(145, 215, 62),
        ColorTier::Orange => Color::Rgb(240, 150, 40),
        ColorTier::Red => Color::Rgb(220, 60, 50),
        ColorTier::Purple => Color::Rgb(150, 80, 200),
    }
}

/// Maps world coordinates into a terminal area of fixed cell count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub field_width: f32,
    pub field_height: f32,
}

impl Viewport {
    /// World position sampled at the center of terminal cell (`col`, `row`) of the area
    #[must_use]
    pub fn cell_to_world(&self, col: u16, row: u16) -> (f32, f32) {
        let x = (f32::from(col) + 0.5) * self.field_width / f32::from(self.area.width.max(1));
        let y = (f32::from(row) + 0.5) * self.field_height / f32::from(self.area.height.max(1));
        (x, y)
    }

    /// Terminal cell containing world point (`x`, `y`), if it is inside the area
    #[must_use]
    pub fn world_to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.field_width || y >= self.field_height {
            return None;
        }
        let col = (x / self.field_width * f32::from(self.area.width)) as u16;
        let row = (y / self.field_height * f32::from(self.area.height)) as u16;
        Some((self.area.x + col, self.area.y + row))
    }
}

pub fn render(f: &mut Frame, app: &App) {
    if f.area().width < MIN_WIDTH || f.area().height < MIN_HEIGHT {
        let warning_text = Paragraph::new("Terminal too small!\nPlease resize your terminal.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Flappy Pipes"));
        f.render_widget(warning_text, centered_rect(80, 60, f.area()));
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title and score
            Constraint::Fill(1),   // Field
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    let game_state = app.world.resource::<GameState>();
    let title = Paragraph::new(format!(
        "FLAPPY PIPES   Score: {}   Best: {}   Difficulty: {}",
        game_state.score,
        game_state.high_score,
        app.difficulty.label()
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, layout[0]);

    render_field(f, app, layout[1]);

    let status = match game_state.phase {
        GamePhase::Idle => "Space/Up: flap to start   D: difficulty   C: reload config   Q: quit",
        GamePhase::Running => "Space/Up: flap   Q: quit",
        GamePhase::Dead => "Ouch! Restarting...",
    };
    let status_style = if game_state.phase == GamePhase::Dead {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .style(status_style),
        layout[2],
    );
}

fn render_field(f: &mut Frame, app: &App, area: Rect) {
    let config = app.config();
    let viewport = Viewport {
        area,
        field_width: config.field.width,
        field_height: config.field.height,
    };
    let floor_y = app.world.resource::<FloorLine>().0;
    let pipes = app.world.resource::<PipeManager>();
    let bird = app.world.resource::<Bird>();
    let bird_bounds = bird.bounds();

    // Only pipes that overlap the visible field matter
    let visible: Vec<_> = pipes
        .pipes()
        .filter(|pipe| pipe.right_edge() > 0.0 && pipe.position().x - pipe.width() / 2.0 < config.field.width)
        .map(|pipe| (pipe.top_pipe(), pipe.bottom_pipe(), tier_color(pipe.color())))
        .collect();

    let buffer = f.buffer_mut();
    for row in 0..area.height {
        for col in 0..area.width {
            let (x, y) = viewport.cell_to_world(col, row);
            let color = if y >= floor_y {
                FLOOR
            } else {
                visible
                    .iter()
                    .find(|(top, bottom, _)| {
                        (top.contains_x(x) && y < top.bottom()) || (bottom.contains_x(x) && y >= bottom.top())
                    })
                    .map_or(SKY, |(_, _, color)| *color)
            };

            if let Some(cell) = buffer.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(" ");
                cell.set_bg(color);
            }
        }
    }

    if let Some((col, row)) = viewport.world_to_cell(bird_bounds.x, bird_bounds.y) {
        if let Some(cell) = buffer.cell_mut((col, row)) {
            cell.set_symbol("@");
            cell.set_fg(Color::Black);
            cell.set_bg(BIRD);
        }
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
