//! Compact one-line rendering of collections for debug messages.
//!
//! Long lists are abbreviated to their endpoints unless the debug level asks
//! for full detail. The set of shapes is closed: callers pick a
//! [`DebugValue`] variant explicitly instead of relying on runtime type
//! inspection.

/// Debug level above which lists are always printed in full.
const FULL_DETAIL_LEVEL: u8 = 4;

/// Lists shorter than this are always printed in full.
const ABBREVIATE_FROM: usize = 4;

/// Project that a [`TaggedSet`] is rooted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    /// Project URL.
    pub url: String,
    /// Project root directory.
    pub root: String,
}

/// A labeled collection with optional nested children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedSet {
    /// Label printed as `(tag)`.
    pub tag: Option<String>,
    /// Project printed as `(url)(root)`.
    pub project: Option<ProjectRoot>,
    /// Members of the set.
    pub items: Vec<String>,
    /// Nested sets, rendered after the items.
    pub children: Vec<Self>,
}

/// A value to render with [`describe`].
#[derive(Debug, Clone, Copy)]
pub enum DebugValue<'a> {
    /// A plain sequence.
    List(&'a [String]),
    /// A labeled collection.
    Tagged(&'a TaggedSet),
}

/// Render `items`, abbreviating to `[first-<n>-last]` when the list has at
/// least four items and `debug_level` does not ask for full detail.
#[must_use]
pub fn abbreviate(items: &[String], debug_level: u8) -> String {
    match items {
        [first, .., last] if debug_level <= FULL_DETAIL_LEVEL && items.len() >= ABBREVIATE_FROM => {
            format!("[{first}-<{}>-{last}]", items.len() - 2)
        }
        _ => format!("[{}]", items.join(", ")),
    }
}

/// Render `value` on one line.
#[must_use]
pub fn describe(value: DebugValue<'_>, debug_level: u8) -> String {
    match value {
        DebugValue::List(items) => abbreviate(items, debug_level),
        DebugValue::Tagged(set) => describe_set(set, debug_level),
    }
}

fn describe_set(set: &TaggedSet, debug_level: u8) -> String {
    let mut out = String::new();
    if let Some(tag) = set.tag.as_deref().filter(|t| !t.is_empty()) {
        out.push('(');
        out.push_str(tag);
        out.push(')');
    }
    if let Some(project) = &set.project {
        out.push('(');
        out.push_str(&project.url);
        out.push_str(")(");
        out.push_str(&project.root);
        out.push(')');
    }
    out.push_str(&abbreviate(&set.items, debug_level));
    for child in &set.children {
        out.push_str(", ");
        out.push_str(&describe_set(child, debug_level));
    }
    out
}
