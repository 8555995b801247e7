use crate::config::Variant;

/// A key hint shown in the footer.
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    pub keys: &'static str,
    pub label: &'static str,
}

const fn shortcut(keys: &'static str, label: &'static str) -> Shortcut {
    Shortcut { keys, label }
}

/// Hints for the registration form, in display order. Draft saving only
/// exists in the relaxed variant.
pub fn form_shortcuts(variant: Variant) -> Vec<Shortcut> {
    let mut hints = vec![
        shortcut("⇥", "Next"),
        shortcut("⇧⇥", "Prev"),
        shortcut("⏎", "Submit"),
        shortcut("Esc", "Reset"),
    ];
    if variant.draft_enabled() {
        hints.push(shortcut("^S", "Draft"));
    }
    hints.push(shortcut("^T", "Theme"));
    hints.push(shortcut("^C", "Quit"));
    hints
}
