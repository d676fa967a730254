//! Plain-text rendering of browser state.

use browser_core::{Settings, ViewState};

pub fn render_connections(state: &ViewState) -> String {
    if state.available_connections.is_empty() {
        return "no connections available".to_string();
    }

    state
        .available_connections
        .iter()
        .map(|connection| {
            let marker = if state.selected_connection == Some(connection.index) {
                '*'
            } else {
                ' '
            };
            format!("{marker} [{}] {}", connection.index, connection.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_results(state: &ViewState) -> String {
    let mut lines = Vec::new();

    if !state.available_languages.is_empty() {
        let preferred = state.preferred_language.as_deref().unwrap_or("-");
        lines.push(format!(
            "languages: {} (using {preferred})",
            state.available_languages.join(", ")
        ));
    }

    let visible = state.filtered_hierarchies();
    if visible.is_empty() {
        let hidden = state.region_hierarchies.len();
        if hidden > 0 {
            lines.push(format!(
                "no matching hierarchies (hidden bigger regions: {hidden})"
            ));
        } else {
            lines.push("no matching hierarchies".to_string());
        }
    }

    for hierarchy in visible {
        lines.push(format!(
            "{}  {}",
            state.format_area_tag(hierarchy),
            state.project_name(hierarchy)
        ));
    }

    lines.join("\n")
}

pub fn render_settings(settings: &Settings) -> String {
    let connection = settings
        .selected_connection
        .map(|connection| connection.to_string())
        .unwrap_or_else(|| "-".to_string());
    let language = settings.preferred_language.as_deref().unwrap_or("-");

    format!(
        "connection: {connection}\nlanguage: {language}\nshow bigger regions: {}",
        settings.show_bigger_regions
    )
}
