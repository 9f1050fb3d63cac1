//! Menu tree flattening.

use super::entry::MenuEntry;

/// Flatten a menu tree into its ordered list of path keys.
///
/// Children are emitted before their parent and siblings keep their input
/// order. Hidden entries are included: flattening does not care about
/// visibility.
pub fn flatten(entries: &[MenuEntry]) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(entries, &mut keys);
    keys
}

fn collect_keys(entries: &[MenuEntry], keys: &mut Vec<String>) {
    for entry in entries {
        if let Some(children) = &entry.children {
            collect_keys(children, keys);
        }
        keys.push(entry.path.clone());
    }
}
