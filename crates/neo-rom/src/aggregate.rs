//! Per-role size totals and concatenation.

use crate::role::{self, RomRole};
use crate::source::SourceFileSet;

/// Sum of the byte lengths of every file classified under `role`.
pub fn total_size(files: &SourceFileSet, role: RomRole) -> usize {
    files
        .iter()
        .filter(|(name, _)| role::matches(name, role, role.number_included()))
        .map(|(_, data)| data.len())
        .sum()
}

/// Concatenate every file classified under `role`.
///
/// Files are ordered by lower-cased name, ties broken by the original name,
/// so the result only depends on the set's content.
pub fn concat(files: &SourceFileSet, role: RomRole, number_included: bool) -> Vec<u8> {
    let mut matching: Vec<(String, &str, &[u8])> = files
        .iter()
        .filter(|(name, _)| role::matches(name, role, number_included))
        .map(|(name, data)| (name.to_lowercase(), name, data))
        .collect();
    matching.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    let capacity = matching.iter().map(|(_, _, data)| data.len()).sum();
    let mut out = Vec::with_capacity(capacity);
    for (_, name, data) in &matching {
        tracing::trace!(file = %name, role = role.token(), size = data.len(), "Appending ROM file");
        out.extend_from_slice(data);
    }
    out
}

/// True if at least one file is classified under `role`.
pub fn has_any(files: &SourceFileSet, role: RomRole) -> bool {
    files
        .names()
        .any(|name| role::matches(name, role, role.number_included()))
}
