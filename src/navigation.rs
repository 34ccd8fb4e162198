//! Resolving jump targets to concrete messages.

use crate::error::{Result, SearchError};
use crate::ui::MessageRenderer;

/// A logical jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// The earliest message.
    First,
    /// The latest message.
    Last,
    /// A specific floor, from a search hit or the floor dialog.
    Index(usize),
}

/// Resolve `target` against a list of `count` messages.
///
/// `First` and `Last` resolve to `None` on an empty list; that is a no-op,
/// not an error. An explicit index must lie in `0..count`.
///
/// # Errors
/// [`SearchError::EmptyMessageList`] for an index into an empty list and
/// [`SearchError::FloorOutOfRange`] for an index past the end.
pub fn resolve(target: NavTarget, count: usize) -> Result<Option<usize>> {
    match target {
        NavTarget::First => Ok((count > 0).then_some(0)),
        NavTarget::Last => Ok(count.checked_sub(1)),
        NavTarget::Index(_) if count == 0 => Err(SearchError::EmptyMessageList),
        NavTarget::Index(index) if index < count => Ok(Some(index)),
        NavTarget::Index(index) => Err(SearchError::FloorOutOfRange {
            floor: i64::try_from(index).unwrap_or(i64::MAX),
            max: count - 1,
        }),
    }
}

/// Bring `target` into view.
///
/// Nothing is scrolled unless the target resolves. Returns the index that
/// was scrolled to.
///
/// # Errors
/// Propagates [`resolve`] failures.
pub fn scroll_to<R: MessageRenderer + ?Sized>(
    renderer: &mut R,
    count: usize,
    target: NavTarget,
) -> Result<Option<usize>> {
    let resolved = resolve(target, count)?;
    if let Some(index) = resolved {
        tracing::debug!(?target, index, "scroll into view");
        renderer.scroll_into_view(index);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::ChatMessage;
    use crate::ui::testing::MarkupRenderer;

    fn renderer(count: usize) -> MarkupRenderer {
        let messages: Vec<_> = (0..count)
            .map(|i| ChatMessage::new(i, format!("m{i}")))
            .collect();
        MarkupRenderer::new(&messages)
    }

    #[test]
    fn test_first_and_last_resolve_to_edges() {
        let mut r = renderer(5);
        assert_eq!(scroll_to(&mut r, 5, NavTarget::First), Ok(Some(0)));
        assert_eq!(scroll_to(&mut r, 5, NavTarget::Last), Ok(Some(4)));
        assert_eq!(r.scrolls(), &[0, 4]);
    }

    #[test]
    fn test_edges_on_empty_list_are_silent_noops() {
        let mut r = renderer(0);
        assert_eq!(scroll_to(&mut r, 0, NavTarget::First), Ok(None));
        assert_eq!(scroll_to(&mut r, 0, NavTarget::Last), Ok(None));
        assert!(r.scrolls().is_empty());
    }

    #[test]
    fn test_out_of_range_index_fails_without_scrolling() {
        let mut r = renderer(3);
        assert_eq!(
            scroll_to(&mut r, 3, NavTarget::Index(3)),
            Err(SearchError::FloorOutOfRange { floor: 3, max: 2 })
        );
        assert!(r.scrolls().is_empty());
    }

    #[test]
    fn test_index_into_empty_list_is_empty_error() {
        assert_eq!(
            resolve(NavTarget::Index(0), 0),
            Err(SearchError::EmptyMessageList)
        );
    }

    #[test]
    fn test_valid_index_scrolls() {
        let mut r = renderer(3);
        assert_eq!(scroll_to(&mut r, 3, NavTarget::Index(2)), Ok(Some(2)));
        assert_eq!(r.scrolls(), &[2]);
    }
}
