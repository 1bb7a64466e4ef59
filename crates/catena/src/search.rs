// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `catena search` command implementation.

use catena_plugin::PluginRegistry;

const SEARCH_LIMIT: usize = 10;

/// Print the best fuzzy matches for `query`.
pub fn run_search(registry: &PluginRegistry, query: &str, use_color: bool) {
    let hits = registry.search(query, SEARCH_LIMIT);
    if hits.is_empty() {
        println!("no plugin matches `{query}`");
        return;
    }
    for hit in hits {
        let category = hit.descriptor.category().unwrap_or_default();
        let via = if hit.matched == hit.descriptor.name() {
            String::new()
        } else {
            format!(" (via {})", hit.matched)
        };
        if use_color {
            use colored::Colorize;
            println!(
                "  {:<12} {}{} {}",
                hit.descriptor.name().green(),
                category.dimmed(),
                via,
                format!("{:.2}", hit.score).as_str().dimmed()
            );
        } else {
            println!(
                "  {:<12} {category}{via} {:.2}",
                hit.descriptor.name(),
                hit.score
            );
        }
    }
}
