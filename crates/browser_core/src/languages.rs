use std::collections::BTreeSet;

use shared::domain::RegionIndex;

/// Union of the language codes used by any region, deduplicated and sorted.
pub fn collect_languages(regions: &RegionIndex) -> Vec<String> {
    regions
        .values()
        .flat_map(|region| region.names.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Keeps `persisted` only when the current language list offers it.
pub(crate) fn restore_language(persisted: Option<&str>, available: &[String]) -> Option<String> {
    persisted
        .filter(|language| available.iter().any(|candidate| candidate == language))
        .map(str::to_owned)
}
