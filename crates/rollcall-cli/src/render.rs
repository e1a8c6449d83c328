//! Text and JSON rendering of the team tabs.

use std::fmt::Write;

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::{json, Value};

use rollcall_core::{DisplayMember, TeamTab, TeamView};

const HEADER: [&str; 8] = [
    "Name", "GitHub", "Role", "Status", "Last seen", "Commits", "Project", "Skills",
];

pub fn member_table(members: &[DisplayMember]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADER.to_vec());

    for member in members {
        table.add_row(vec![
            member.name.clone(),
            member.github_username.clone(),
            member.role.label().to_string(),
            member.status.to_string(),
            member.last_seen.clone(),
            format!("~{}", member.commits),
            member.current_project.clone(),
            member.skills_display(),
        ]);
    }

    table
}

/// Render each tab as a heading followed by one table per section.
pub fn tabs_text(view: &TeamView, tabs: &[TeamTab]) -> String {
    let mut out = String::new();
    for tab in tabs {
        let _ = writeln!(out, "== {} ==", tab.title());
        if let Some(message) = view.empty_message(*tab) {
            let _ = writeln!(out, "{}\n", message);
            continue;
        }
        for section in view.sections(*tab) {
            let _ = writeln!(out, "{} ({})", section.title, section.members.len());
            let _ = writeln!(out, "{}\n", member_table(section.members));
        }
    }
    out
}

pub fn tabs_json(view: &TeamView, tabs: &[TeamTab]) -> Value {
    let tabs: Vec<Value> = tabs
        .iter()
        .map(|tab| {
            json!({
                "tab": tab.title(),
                "sections": view.sections(*tab),
                "emptyMessage": view.empty_message(*tab),
            })
        })
        .collect();
    Value::Array(tabs)
}
