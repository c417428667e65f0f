//! MCNP card-deck assembly and rendering.
//!
//! Surfaces are interned in a [`SurfaceTable`] so that identical cards
//! emitted by different cells share one surface id, then the deck is
//! rendered in MCNP's fixed card layout: a title card, the cell cards,
//! the surface cards, and a data-card section whose material entries are
//! placeholders for manual composition entry.

use std::collections::HashMap;

use crate::compose::{Cell, Composition};
use crate::surfaces::Surface;

/// Width of an MCNP input line.
const CARD_WIDTH: usize = 79;
/// Continuation-line indent; MCNP reads indented lines as part of the
/// preceding card.
const CONTINUATION_INDENT: usize = 6;

/// Interns surface cards so each distinct card gets exactly one id.
///
/// Ids are assigned in first-registration order, starting at 1.
#[derive(Debug, Default)]
pub struct SurfaceTable {
    ids: HashMap<String, usize>,
    cards: Vec<String>,
}

impl SurfaceTable {
    /// Fetch or assign the id for a surface's card body.
    pub fn intern(&mut self, surface: &Surface) -> usize {
        let body = surface_body(surface);
        if let Some(&id) = self.ids.get(&body) {
            return id;
        }
        let id = self.cards.len() + 1;
        self.ids.insert(body.clone(), id);
        self.cards.push(body);
        id
    }

    /// Card bodies in id order (id = position + 1).
    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The card body for a surface: mnemonic followed by its coefficients.
fn surface_body(surface: &Surface) -> String {
    let mut body = surface.mnemonic.card().to_string();
    for param in &surface.params {
        body.push(' ');
        body.push_str(&format_number(*param));
    }
    body
}

/// Format a coefficient the way it appears on a card: plain decimal
/// notation, no trailing ".0".
fn format_number(value: f64) -> String {
    format!("{value}")
}

/// The signed boolean expression for one cell: its own surfaces in order,
/// then one complement term per carved daughter.
fn cell_expression(cell: &Cell, table: &mut SurfaceTable) -> String {
    let mut terms: Vec<String> = Vec::new();
    for surface in &cell.surfaces {
        let id = table.intern(surface) as i64 * surface.sense.factor();
        terms.push(id.to_string());
    }
    for daughter in &cell.carved {
        let complement: Vec<String> = daughter
            .iter()
            .map(|surface| {
                let id = table.intern(surface) as i64 * surface.sense.factor();
                (-id).to_string()
            })
            .collect();
        terms.push(format!("({})", complement.join(":")));
    }
    terms.join(" ")
}

/// Assemble and render the full deck for a composition.
///
/// `input_name` is the source file name echoed on the title card.
pub fn render_deck(composition: &Composition, input_name: &str) -> String {
    let mut table = SurfaceTable::default();

    // Intern in cell order first, so surface ids follow document order.
    let expressions: Vec<String> = composition
        .cells
        .iter()
        .map(|cell| cell_expression(cell, &mut table))
        .collect();

    let mut out = String::new();

    let prefix = "----- CONVERTED BY GDML2MCNP FROM ";
    let limit = CARD_WIDTH - prefix.chars().count();
    let name: String = input_name.to_uppercase().chars().take(limit).collect();
    push_card(&mut out, &format!("{prefix}{name}"));
    push_card(&mut out, "");

    banner(&mut out, "CELL CARDS");
    for (cell, expression) in composition.cells.iter().zip(&expressions) {
        push_card(&mut out, &format!("C --- {}", cell.name));
        push_card(
            &mut out,
            &format!(
                "{:5} {} {} {}",
                cell.cell_id,
                cell.material_index,
                format_number(cell.density),
                expression
            ),
        );
    }
    push_card(&mut out, "");

    banner(&mut out, "SURFACE CARDS");
    for (index, body) in table.cards().iter().enumerate() {
        push_card(&mut out, &format!("{:5} {}", index + 1, body));
    }
    push_card(&mut out, "");

    banner(&mut out, "DATA CARDS");
    for material in &composition.materials {
        push_card(&mut out, &format!("C --- MATERIAL : {}", material.name));
        push_card(&mut out, &format!("M{:<4} $ TODO: fill me", material.index));
    }

    out
}

fn banner(out: &mut String, heading: &str) {
    let rule = format!("C {}", "-".repeat(CARD_WIDTH - 2));
    push_card(out, &rule);
    push_card(out, &format!("C --- {heading}"));
    push_card(out, &rule);
}

fn push_card(out: &mut String, text: &str) {
    out.push_str(&wrap_card(text));
    out.push('\n');
}

/// Wrap a card onto 79-column lines, indenting continuation lines so MCNP
/// reads them as the same card. Short cards pass through untouched.
fn wrap_card(text: &str) -> String {
    if text.chars().count() <= CARD_WIDTH {
        return text.to_string();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current: String = text.chars().take_while(|c| *c == ' ').collect();
    let mut base_len = current.len();
    for word in text.split_whitespace() {
        if current.len() == base_len {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= CARD_WIDTH {
            current.push(' ');
            current.push_str(word);
        } else {
            let indent = " ".repeat(CONTINUATION_INDENT);
            lines.push(std::mem::replace(&mut current, indent));
            base_len = CONTINUATION_INDENT;
            current.push_str(word);
        }
    }
    lines.push(current);
    lines.join("\n")
}
