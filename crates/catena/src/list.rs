// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `catena list` command implementation.

use catena_plugin::PluginRegistry;

/// Print plugins grouped by category, in registration order.
pub fn run_list(
    registry: &PluginRegistry,
    category: Option<&str>,
    include_aliases: bool,
    use_color: bool,
) {
    for cat in registry.categories() {
        if category.is_some_and(|c| c != cat) {
            continue;
        }
        if use_color {
            use colored::Colorize;
            println!("{}", cat.bold());
        } else {
            println!("{cat}");
        }
        for line in category_lines(registry, cat, include_aliases) {
            println!("  {line}");
        }
    }
}

/// One line per canonical plugin: name, aliases (optional), description.
fn category_lines(registry: &PluginRegistry, category: &str, include_aliases: bool) -> Vec<String> {
    registry
        .list_by_category(category, false)
        .into_iter()
        .filter_map(|name| registry.get(name))
        .map(|d| {
            let mut names = d.name().to_string();
            if include_aliases && !d.aliases().is_empty() {
                names = format!("{names} ({})", d.aliases().join(", "));
            }
            let marker = if d.is_one_way() { " [one-way]" } else { "" };
            format!("{names:<24} {}{marker}", d.description())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use catena_test_utils::ChainFixture;

    use super::*;

    #[test]
    fn lines_follow_registration_order() {
        let fixture = ChainFixture::builtins().unwrap();
        let lines = category_lines(&fixture.registry, "codec", true);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("base64 (b64)"));
        assert!(lines[2].starts_with("hex (base16)"));
    }

    #[test]
    fn hashes_are_marked_one_way() {
        let fixture = ChainFixture::builtins().unwrap();
        let lines = category_lines(&fixture.registry, "hash", false);
        assert!(lines.iter().all(|l| l.ends_with("[one-way]")));
    }
}
