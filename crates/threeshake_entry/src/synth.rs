use log::{debug, trace};
use std::collections::HashSet;

use threeshake_core::DependencySet;

use crate::{
    grammar::Statement,
    options::EntryOptions,
    walker::{Inclusion, ModuleBlock},
};

/// Renders the included blocks, in order, as one re-export module.
///
/// Names the library does not export are dropped silently. Filtered blocks
/// whose export list would end up empty are left out entirely.
pub fn synthesize(
    blocks: &[ModuleBlock],
    deps: &DependencySet,
    constants: &[String],
    opts: &EntryOptions,
) -> String {
    let constants: HashSet<&str> = constants.iter().map(String::as_str).collect();
    let wants_buffer_attribute = deps.iter().any(|dep| dep.contains("BufferAttribute"));

    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for block in blocks {
        let Some(line) = render_block(block, deps, &constants, wants_buffer_attribute, opts) else {
            continue;
        };
        // The same leaf reached through two aggregation modules is emitted once
        if seen.insert(line.clone()) {
            lines.push(line);
        }
    }

    debug!("Selected {} of {} blocks", lines.len(), blocks.len());
    lines.join("\n")
}

fn render_block(
    block: &ModuleBlock,
    deps: &DependencySet,
    constants: &HashSet<&str>,
    wants_buffer_attribute: bool,
    opts: &EntryOptions,
) -> Option<String> {
    match block.inclusion {
        Inclusion::Required => Some(block.statement.to_string()),
        Inclusion::Polyfills => opts.polyfills.then(|| block.statement.to_string()),
        Inclusion::Legacy => opts.legacy.then(|| block.statement.to_string()),
        Inclusion::BufferAttribute => {
            let source = block.file()?;
            wants_buffer_attribute.then(|| Statement::Star { source: source.to_string() }.to_string())
        }
        Inclusion::Constants => {
            let source = block.file()?;
            let names: Vec<&str> = deps.iter().filter(|dep| constants.contains(dep)).collect();
            if names.is_empty() {
                return None;
            }
            trace!("Re-exporting {} constants", names.len());
            Some(format!("export {{ {} }} from '{}';", names.join(", "), source))
        }
        Inclusion::Filtered => {
            let Statement::Named { specifiers, source } = &block.statement else {
                return Some(block.statement.to_string());
            };
            let kept: Vec<_> =
                specifiers.iter().filter(|s| deps.contains(&s.exported)).cloned().collect();
            if kept.is_empty() {
                trace!("Nothing requested from {}", source);
                return None;
            }
            Some(Statement::Named { specifiers: kept, source: source.clone() }.to_string())
        }
    }
}
