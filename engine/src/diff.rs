//! Per-field diff rendering for conflicting records.
//!
//! Rendering marks the exact changed substring of each side (`[-old-]` /
//! `[+new+]`) so a user can spot a one-character URL change without reading
//! the whole value. The marking is presentation only; classification is
//! driven by plain equality of the underlying field values.

/// A labeled before/after pair for one differing meaningful field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub label: &'static str,
    pub existing: String,
    pub incoming: String,
}

impl FieldDiff {
    /// Render as a labeled two-line hunk with the changed regions marked.
    pub fn render(&self) -> String {
        let (old_marked, new_marked) = mark_changed(&self.existing, &self.incoming);
        format!(
            "{}\n  - {}\n  + {}",
            self.label, old_marked, new_marked
        )
    }
}

/// Render a list of field diffs as one human-readable block.
pub fn render_diffs(diffs: &[FieldDiff]) -> String {
    diffs
        .iter()
        .map(FieldDiff::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap the differing middle of each string in change markers.
///
/// Splits both strings around their common prefix and suffix (on char
/// boundaries) and marks what remains: `"google.es/x"` vs `"google.com/x"`
/// becomes `"google.[-es-]/x"` and `"google.[+com+]/x"`.
fn mark_changed(old: &str, new: &str) -> (String, String) {
    if old == new {
        return (old.to_string(), new.to_string());
    }

    let prefix = common_prefix_len(old, new);
    let suffix = common_suffix_len(&old[prefix..], &new[prefix..]);

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];
    let head = &old[..prefix];
    let tail = &old[old.len() - suffix..];

    (
        format!("{head}[-{old_mid}-]{tail}"),
        format!("{head}[+{new_mid}+]{tail}"),
    )
}

/// Byte length of the longest common prefix, on char boundaries.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Byte length of the longest common suffix, on char boundaries.
fn common_suffix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().rev().zip(b.chars().rev()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}
