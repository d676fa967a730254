use shared::domain::{Connection, ConnectionId, RegionHierarchy, RegionIndex};

use crate::{filter::filter_hierarchies, names};

/// Everything a renderer needs to draw the browser. Derived values are
/// computed from the current fields on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub selected_connection: Option<ConnectionId>,
    pub available_connections: Vec<Connection>,
    pub query_region_hierarchy: String,
    pub preferred_language: Option<String>,
    pub available_languages: Vec<String>,
    pub show_bigger_regions: bool,
    pub region_names: RegionIndex,
    pub region_hierarchies: Vec<RegionHierarchy>,
    pub error_message: Option<String>,
}

impl ViewState {
    pub fn is_connection_invalid(&self) -> bool {
        self.selected_connection.is_none()
    }

    pub fn is_region_name_invalid(&self) -> bool {
        self.query_region_hierarchy.is_empty()
    }

    pub fn is_form_invalid(&self) -> bool {
        self.is_connection_invalid() || self.is_region_name_invalid()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_hierarchy_available(&self) -> bool {
        !self.region_hierarchies.is_empty()
    }

    pub fn is_error_present(&self) -> bool {
        self.error_message
            .as_deref()
            .is_some_and(|message| !message.is_empty())
    }

    pub fn filtered_hierarchies(&self) -> Vec<&RegionHierarchy> {
        filter_hierarchies(&self.region_hierarchies, self.show_bigger_regions)
    }

    pub fn project_name(&self, hierarchy: &RegionHierarchy) -> String {
        names::project_name(
            hierarchy,
            &self.region_names,
            self.preferred_language.as_deref(),
        )
    }

    pub fn format_area_tag(&self, hierarchy: &RegionHierarchy) -> String {
        names::format_area_tag(hierarchy)
    }

    pub fn selected_connection_label(&self) -> Option<&str> {
        let selected = self.selected_connection?;
        self.available_connections
            .iter()
            .find(|connection| connection.index == selected)
            .map(|connection| connection.description.as_str())
    }
}
