//! GDML unit factors and Geant4 name cleanup.

/// Multiplier taking a value in the given GDML unit to the MCNP system
/// (cm for lengths, g/cm3 for densities). `None` for units this tool
/// does not recognise; callers must not fall back to identity.
pub fn unit_factor(unit: &str) -> Option<f64> {
    match unit {
        "m" => Some(1e2),
        "cm" => Some(1.0),
        "mm" => Some(1e-1),
        "g/cm3" => Some(1.0),
        _ => None,
    }
}

/// Strip the `0x...` pointer suffixes Geant4 appends to exported names.
///
/// `Tube0x7f8a2c512340` becomes `Tube`; a `0x` not followed by hex digits
/// is left alone.
pub fn strip_pointer_suffix(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(position) = rest.find("0x") {
        let (head, tail) = rest.split_at(position);
        out.push_str(head);
        let after = &tail[2..];
        let hex_len = after
            .chars()
            .take_while(|c| c.is_ascii_hexdigit())
            .count();
        if hex_len == 0 {
            out.push_str("0x");
            rest = after;
        } else {
            rest = &after[hex_len..];
        }
    }
    out.push_str(rest);
    out
}
