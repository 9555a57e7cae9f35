//! Terminal rendering
//!
//! Draws the journal, theme and recipe view models as plain text for the CLI.

use crate::journal::{Celebration, JournalView};
use crate::recipes::{RecipeDetailView, RecipeView, RetryAction};
use crate::theme::{Theme, ThemeToggles};
use colored::Colorize;
use std::fmt::Write;

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

pub fn render_journal(view: &JournalView) -> String {
    let mut out = String::new();

    match view {
        JournalView::Empty { message } => {
            let _ = writeln!(out, "{}", message.italic());
        }
        JournalView::Cards(cards) => {
            for card in cards {
                let title = if card.exiting {
                    card.title.strikethrough().to_string()
                } else {
                    card.title.bold().to_string()
                };
                let _ = writeln!(out, "{}", title);
                let _ = writeln!(out, "{}", card.date_label.dimmed());
                let _ = writeln!(out, "{}", card.content);
                let _ = writeln!(out, "[{}] id={}", card.delete_label, card.id);
                let _ = writeln!(out, "{}", rule(40));
            }
        }
    }

    out
}

pub fn render_theme(theme: Theme, toggles: ThemeToggles) -> String {
    let mark = |active: bool| if active { "*" } else { " " };
    format!(
        "Theme: {}  [{}] light  [{}] dark",
        theme,
        mark(toggles.light_active),
        mark(toggles.dark_active)
    )
}

/// One glyph per particle, coloured and spaced by horizontal position
pub fn render_celebration(celebration: &Celebration, width: usize) -> String {
    let mut line = vec![" ".to_string(); width.max(1)];

    for particle in &celebration.particles {
        let col = ((particle.left_vw / 100.0) * line.len() as f64) as usize;
        let col = col.min(line.len() - 1);
        let glyph = match hex_rgb(particle.color) {
            Some((r, g, b)) => "*".truecolor(r, g, b).to_string(),
            None => "*".to_string(),
        };
        line[col] = glyph;
    }

    line.concat()
}

fn retry_hint(retry: &RetryAction) -> String {
    match retry {
        RetryAction::Search(query) => format!("Retry: keepsake recipes search {:?}", query),
        RetryAction::Popular => "Show popular dishes: keepsake recipes popular".to_string(),
    }
}

pub fn render_recipes(view: &RecipeView) -> String {
    let mut out = String::new();

    match view {
        RecipeView::Loading => {
            let _ = writeln!(out, "Loading recipes...");
        }
        RecipeView::Grid(cards) => {
            let _ = writeln!(out, "{:<10} {:<36} {:<16}", "ID", "Name", "Category");
            let _ = writeln!(out, "{}", rule(64));
            for card in cards {
                let _ = writeln!(out, "{:<10} {:<36} {:<16}", card.id, card.name, card.category);
            }
            let _ = writeln!(out);
            if let Some(card) = cards.first() {
                let _ = writeln!(out, "{}: keepsake recipes show <id>", card.action_label);
            }
        }
        RecipeView::Empty { message, retry } => {
            let _ = writeln!(out, "{}", message);
            let _ = writeln!(out, "{}", retry_hint(retry));
        }
        RecipeView::Error {
            title,
            message,
            retry,
        } => {
            let _ = writeln!(out, "{}", title.red().bold());
            let _ = writeln!(out, "{}", message);
            let _ = writeln!(out, "{}", retry_hint(retry));
        }
    }

    out
}

pub fn render_recipe_detail(detail: &RecipeDetailView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", detail.name.bold());
    let _ = writeln!(out, "{}", detail.category.dimmed());
    if let Some(thumb) = &detail.thumbnail {
        let _ = writeln!(out, "{}", thumb);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Ingredients");
    for line in &detail.ingredients {
        let _ = writeln!(out, "  - {}", line);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Instructions");
    let _ = writeln!(out, "{}", detail.instructions);

    out
}
