/// The fixed, ordered list of the 14 regions of the Czech Republic.
///
/// This is a closed enumeration used only to populate the region choice
/// field; region names are data, not translatable UI text.
pub const REGIONS: [&str; 14] = [
    "Hlavní město Praha",
    "Středočeský kraj",
    "Jihočeský kraj",
    "Plzeňský kraj",
    "Karlovarský kraj",
    "Ústecký kraj",
    "Liberecký kraj",
    "Královéhradecký kraj",
    "Pardubický kraj",
    "Vysočina",
    "Jihomoravský kraj",
    "Olomoucký kraj",
    "Zlínský kraj",
    "Moravskoslezský kraj",
];

/// Membership test against [`REGIONS`]. Exact match, no normalization.
pub fn is_region(name: &str) -> bool {
    REGIONS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourteen_known_regions() {
        assert_eq!(REGIONS.len(), 14);
        assert!(is_region("Vysočina"));
        assert!(is_region("Hlavní město Praha"));
    }

    #[test]
    fn unknown_region_is_rejected() {
        assert!(!is_region("Nonexistent Region"));
        assert!(!is_region(""));
        // no trimming or case folding
        assert!(!is_region("vysočina"));
    }
}
