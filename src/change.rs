//! Classification of prop updates.

use flexspace_core::Style;
use flexspace_layout::LayoutRect;

/// The three mutually exclusive outcomes of comparing an element's previous
/// and next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Nothing changed; no work performed.
    NoOp,
    /// Non-layout attributes changed but no rectangle moved. Enqueues a
    /// root-level re-layout request, since even paint-adjacent attributes
    /// can change global flex output.
    StyleOnly,
    /// The element's resolved rectangle changed. Takes precedence over
    /// `StyleOnly` when both hold, since a re-layout is already implied.
    LayoutChanged,
}

/// Classify one update from value comparisons of the style and the node's
/// resolved rectangle before and after.
pub fn classify(
    previous_style: &Style,
    next_style: &Style,
    previous_rect: &LayoutRect,
    next_rect: &LayoutRect,
) -> UpdateKind {
    if !previous_rect.same_rect(next_rect) {
        UpdateKind::LayoutChanged
    } else if previous_style != next_style {
        UpdateKind::StyleOnly
    } else {
        UpdateKind::NoOp
    }
}
