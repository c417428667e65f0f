//! Conversion runner: ties together the GDML front-end, the composer,
//! and the deck renderer.

use std::path::Path;

use anyhow::{Context, Result};

use gdml2mcnp_core::compose::{Composer, Composition};
use gdml2mcnp_core::deck::render_deck;
use gdml2mcnp_gdml::parse_gdml_file;

/// Parse, compose, and render; write the deck to `output` or stdout.
pub fn convert(input: &Path, output: Option<&Path>) -> Result<()> {
    let composition = run_pipeline(input)?;
    let text = render_deck(&composition, &file_name(input));

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Deck written to: {}", path.display());
            println!(
                "  {} cells, {} materials",
                composition.cells.len(),
                composition.materials.len()
            );
        }
        // The deck itself goes to stdout, so no progress chatter here.
        None => print!("{text}"),
    }
    Ok(())
}

/// Parse and compose without writing anything.
pub fn validate(input: &Path) -> Result<()> {
    let composition = run_pipeline(input)?;
    println!("Geometry converts cleanly: {}", input.display());
    println!(
        "  {} cells, {} materials",
        composition.cells.len(),
        composition.materials.len()
    );
    Ok(())
}

/// Print the material legend a conversion would put on the data cards.
pub fn materials(input: &Path) -> Result<()> {
    let composition = run_pipeline(input)?;
    println!("Materials (indices as assigned on the deck):");
    for material in &composition.materials {
        println!(
            "  M{:<4} {} ({} g/cm3, composition to be filled in)",
            material.index, material.name, material.density
        );
    }
    Ok(())
}

fn run_pipeline(input: &Path) -> Result<Composition> {
    let geometry = parse_gdml_file(input)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    Composer::new()
        .compose(&geometry)
        .with_context(|| format!("failed to convert {}", input.display()))
}

/// The file name echoed on the deck's title card.
fn file_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}
