//! Integration test: GDML text in, MCNP card deck out.
//!
//! Exercises the full pipeline (parse, compose, render) on a small
//! detector-like geometry: an air-filled world sphere containing a steel
//! beam pipe and an ellipsoidal crystal.

use gdml2mcnp_core::compose::Composer;
use gdml2mcnp_core::convert::SolidError;
use gdml2mcnp_core::deck::render_deck;
use gdml2mcnp_gdml::parse_gdml_str;

const DETECTOR: &str = r#"<?xml version="1.0"?>
<gdml>
  <materials>
    <material name="G4_AIR0x5a1f2e3">
      <D value="0.0012" unit="g/cm3"/>
    </material>
    <material name="Steel0x7cafe01">
      <D value="7.87" unit="g/cm3"/>
    </material>
    <material name="PbWO4">
      <D value="8.28" unit="g/cm3"/>
    </material>
  </materials>
  <solids>
    <orb name="WorldSolid" r="2" lunit="m"/>
    <tube name="PipeSolid" rmin="10" rmax="50" z="200" startphi="0" deltaphi="360" lunit="mm"/>
    <ellipsoid name="CrystalSolid" ax="10" by="20" cz="30" lunit="mm"/>
  </solids>
  <structure>
    <volume name="World0xdeadbe1">
      <solidref ref="WorldSolid"/>
      <materialref ref="G4_AIR0x5a1f2e3"/>
      <physvol>
        <volumeref ref="PipeVol"/>
      </physvol>
      <physvol>
        <volumeref ref="CrystalVol"/>
        <position name="p1" x="10" y="0" z="0" unit="cm"/>
      </physvol>
    </volume>
    <volume name="PipeVol">
      <solidref ref="PipeSolid"/>
      <materialref ref="Steel0x7cafe01"/>
    </volume>
    <volume name="CrystalVol">
      <solidref ref="CrystalSolid"/>
      <materialref ref="PbWO4"/>
    </volume>
  </structure>
  <setup name="Default" version="1.0">
    <world ref="World0xdeadbe1"/>
  </setup>
</gdml>
"#;

fn compose_detector() -> gdml2mcnp_core::compose::Composition {
    let geometry = parse_gdml_str(DETECTOR).unwrap();
    Composer::new().compose(&geometry).unwrap()
}

#[test]
fn test_cells_follow_document_order() {
    let composition = compose_detector();
    let names: Vec<&str> = composition.cells.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["World", "PipeVol", "CrystalVol"]);
    let ids: Vec<usize> = composition.cells.iter().map(|c| c.cell_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_material_legend_is_first_seen_order() {
    let composition = compose_detector();
    let legend: Vec<(usize, &str)> = composition
        .materials
        .iter()
        .map(|m| (m.index, m.name.as_str()))
        .collect();
    assert_eq!(legend, vec![(1, "G4_AIR"), (2, "Steel"), (3, "PbWO4")]);
}

#[test]
fn test_daughters_are_carved_from_the_world() {
    let composition = compose_detector();
    assert_eq!(composition.cells[0].carved.len(), 2);
    assert_eq!(composition.cells[0].carved[0], composition.cells[1].surfaces);
    assert_eq!(composition.cells[0].carved[1], composition.cells[2].surfaces);
}

#[test]
fn test_rendered_deck_cards() {
    let composition = compose_detector();
    let deck = render_deck(&composition, "detector.gdml");

    assert!(deck.starts_with("----- CONVERTED BY GDML2MCNP FROM DETECTOR.GDML\n"));

    // World: own sphere, minus the pipe and the crystal.
    assert!(deck.contains("C --- World"));
    assert!(deck.contains("    1 1 0.0012 -1 (2:-3:-4:5) (6)"));
    // Pipe: hollow tube, rmin 1 cm, rmax 5 cm, caps at +-10 cm.
    assert!(deck.contains("    2 2 7.87 -2 3 4 -5"));
    // Crystal: one quadric, centre shifted 10 cm along x.
    assert!(deck.contains("    3 3 8.28 -6"));

    assert!(deck.contains("    1 SO 200"));
    assert!(deck.contains("    2 CZ 5"));
    assert!(deck.contains("    3 CZ 1"));
    assert!(deck.contains("    4 PZ -10"));
    assert!(deck.contains("    5 PZ 10"));
    assert!(deck.contains("    6 SQ 1 0.25"));
    assert!(deck.contains("10 0 0"));

    assert!(deck.contains("C --- MATERIAL : PbWO4"));
    assert!(deck.contains("M3    $ TODO: fill me"));
}

#[test]
fn test_unsupported_solid_names_the_volume() {
    let xml = DETECTOR.replace(
        r#"<ellipsoid name="CrystalSolid" ax="10" by="20" cz="30" lunit="mm"/>"#,
        r#"<polycone name="CrystalSolid" startphi="0" deltaphi="360"/>"#,
    );
    let geometry = parse_gdml_str(&xml).unwrap();
    let error = Composer::new().compose(&geometry).unwrap_err();
    assert_eq!(error.volume, "CrystalVol");
    assert!(matches!(error.source, SolidError::UnsupportedGeometry(_)));
    let message = error.to_string();
    assert!(message.contains("CrystalVol") && message.contains("polycone"));
}

#[test]
fn test_offset_tube_fails_placement() {
    let xml = DETECTOR.replace(
        "<physvol>\n        <volumeref ref=\"PipeVol\"/>\n      </physvol>",
        "<physvol>\n        <volumeref ref=\"PipeVol\"/>\n        <position name=\"p0\" x=\"5\" unit=\"cm\"/>\n      </physvol>",
    );
    let geometry = parse_gdml_str(&xml).unwrap();
    let error = Composer::new().compose(&geometry).unwrap_err();
    assert_eq!(error.volume, "PipeVol");
    assert!(matches!(error.source, SolidError::UnsupportedPlacement(_)));
}
