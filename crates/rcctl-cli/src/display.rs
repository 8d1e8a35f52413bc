//! Terminal output helpers.

use colored::Colorize;
use rcctl_proto::{ConfigTemplate, Version};

/// Truncates a string to `max_len` characters, appending `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

fn cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Renders version history as a fixed-width table.
pub fn format_versions_table(versions: &[Version]) -> String {
    let mut out = format!(
        "{:<10} {:<24} {:<32} {:<14} {}\n",
        "VERSION", "UPDATED", "USER", "ORIGIN", "TYPE"
    );

    for version in versions {
        let number = version
            .version_number
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let updated = version.updated_at().map_or_else(
            || "-".to_string(),
            |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        let user = cell(
            version
                .update_user
                .as_ref()
                .and_then(|u| u.email.as_deref()),
        );
        let kind = match (version.update_type.as_deref(), version.rollback_source) {
            (Some(kind), Some(source)) => format!("{kind} (from {source})"),
            (kind, _) => cell(kind),
        };

        out.push_str(&format!(
            "{:<10} {:<24} {:<32} {:<14} {}\n",
            number,
            updated,
            truncate(&user, 32),
            cell(version.update_origin.as_deref()),
            kind
        ));
    }

    out
}

/// One-line summary of a template's version metadata.
pub fn describe_template(template: &ConfigTemplate) -> String {
    let number = template
        .version_number()
        .map_or_else(|| "unknown".to_string(), |n| n.to_string());
    match template.rollback_source() {
        Some(source) => format!("version {number} (rollback source: {source})"),
        None => format!("version {number}"),
    }
}
