use shared::domain::{RegionHierarchy, RegionIndex};

pub const NAME_SEPARATOR: &str = " > ";

/// Human readable rendering of a hierarchy, root first.
///
/// Each part resolves to its name in `preferred_language`, then to the
/// region's default name. Parts missing from `regions` are rendered as
/// `<id>`.
pub fn project_name(
    hierarchy: &RegionHierarchy,
    regions: &RegionIndex,
    preferred_language: Option<&str>,
) -> String {
    hierarchy
        .parts
        .iter()
        .map(|part| match regions.get(part) {
            Some(region) => region.display_name(preferred_language).to_owned(),
            None => format!("<{part}>"),
        })
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
}

/// Area tag for the hierarchy's target region.
pub fn format_area_tag(hierarchy: &RegionHierarchy) -> String {
    format!(r#"<Area adminPlaceID="{}"/>"#, hierarchy.id)
}
