//! Machine selector.
//!
//! Presentational widget: the machine image plus a `<select>` over the
//! configured machines. Changing the selection posts to the server so the
//! session remembers which manual questions are about.

use crate::config::MachineConfig;
use crate::ui::escape;

/// Render the machine selector.
///
/// `selected` is the machine id stored on the session; without one the first
/// configured machine is shown as chosen.
#[must_use]
pub fn machine_select(machines: &[MachineConfig], selected: Option<&str>) -> String {
    let selected = selected
        .or_else(|| machines.first().map(|m| m.id.as_str()))
        .unwrap_or_default();

    let image = machines
        .iter()
        .find(|m| m.id == selected)
        .and_then(|m| m.image.as_deref())
        .map(|src| {
            format!(
                r#"<img class="machine-image" src="{src}" alt="Selected machine">"#,
                src = escape::attr(src),
            )
        })
        .unwrap_or_default();

    let mut options = String::new();
    for machine in machines {
        let marked = if machine.id == selected { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{value}"{marked}>{label}</option>"#,
            value = escape::attr(&machine.id),
            label = escape::text(&machine.label),
        ));
    }

    format!(
        r##"<div class="machine-select-container" id="machine-select">{image}<div class="machine-select-field"><select class="machine-select" name="machine" hx-post="/chat/machine" hx-trigger="change" hx-include="#chat-session" hx-target="#machine-select" hx-swap="outerHTML">{options}</select></div></div>"##,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;

    #[test]
    fn test_defaults_to_first_machine() {
        let config = UiConfig::default();
        let html = machine_select(&config.machines, None);
        assert!(html.contains(r#"<option value="tt3-2000" selected>TT3/2000</option>"#));
        assert!(html.contains("machine-image"));
    }

    #[test]
    fn test_selection_marked() {
        let machines = vec![
            MachineConfig {
                id: "a".to_string(),
                label: "Machine A".to_string(),
                image: None,
            },
            MachineConfig {
                id: "b".to_string(),
                label: "Machine B".to_string(),
                image: None,
            },
        ];
        let html = machine_select(&machines, Some("b"));
        assert!(html.contains(r#"<option value="b" selected>"#));
        assert!(!html.contains(r#"<option value="a" selected>"#));
    }
}
