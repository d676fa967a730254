use shared::domain::RegionHierarchy;

/// Hierarchies to display: all of them when `show_bigger` is set, otherwise
/// only those not flagged `bigger`. Order is preserved.
pub fn filter_hierarchies(
    hierarchies: &[RegionHierarchy],
    show_bigger: bool,
) -> Vec<&RegionHierarchy> {
    hierarchies
        .iter()
        .filter(|hierarchy| show_bigger || !hierarchy.bigger)
        .collect()
}
