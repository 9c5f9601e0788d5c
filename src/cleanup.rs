//! Component name cleanup.
//!
//! The data-entry tool sometimes writes a component's prefix twice
//! ("TasterTaster"). These rules collapse the known doubles.

/// Replacement rules, applied in order.
pub const COMPONENT_RULES: &[(&str, &str)] = &[
    ("KabelbahnKabelbahn:", "Kabelbahn:"),
    ("TasterTaster", "Taster"),
    ("SteckdoseSteckdose", "Steckdose"),
    ("PVC-RohrPVC-Rohr", "PVC-Rohr"),
    ("Sammelhalter - Kabelsammelhalter", "Kabelsammelhalter"),
];

/// Clean a component name.
///
/// Rules are reapplied until nothing changes, so `clean_component` is
/// idempotent. Every rule shortens the string, which bounds the loop.
pub fn clean_component(component: &str) -> String {
    let mut current = component.to_string();
    loop {
        let next = COMPONENT_RULES
            .iter()
            .fold(current.clone(), |acc, (from, to)| acc.replace(from, to));
        if next == current {
            return current.trim().to_string();
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_doubles() {
        assert_eq!(clean_component("KabelbahnKabelbahn: 300mm"), "Kabelbahn: 300mm");
        assert_eq!(clean_component("TasterTaster"), "Taster");
        assert_eq!(clean_component("SteckdoseSteckdose 2-fach"), "Steckdose 2-fach");
        assert_eq!(clean_component("PVC-RohrPVC-Rohr M20"), "PVC-Rohr M20");
        assert_eq!(
            clean_component("Sammelhalter - Kabelsammelhalter"),
            "Kabelsammelhalter"
        );
    }

    #[test]
    fn test_trims() {
        assert_eq!(clean_component("  Leuchte "), "Leuchte");
        assert_eq!(clean_component("   "), "");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "KabelbahnKabelbahn:",
            "TasterTasterTaster",
            "SteckdoseSteckdoseSteckdoseSteckdose",
            "PVC-RohrPVC-RohrPVC-Rohr",
            " Sammelhalter - Kabelsammelhalter ",
            "Abzweigdose",
        ] {
            let once = clean_component(input);
            assert_eq!(clean_component(&once), once, "input {:?}", input);
        }
        assert_eq!(clean_component("TasterTasterTaster"), "Taster");
    }
}
