use std::borrow::Cow;
use tracing::trace;

/// An index outside `0..items.len()` hands back the input itself, borrowed.
pub fn remove_at<T: Clone>(items: &[T], index: isize) -> Cow<'_, [T]> {
    let Some(index) = usize::try_from(index).ok().filter(|i| *i < items.len()) else {
        trace!(index, len = items.len(), "remove_at index out of range");
        return Cow::Borrowed(items);
    };

    let mut out = Vec::with_capacity(items.len() - 1);
    out.extend_from_slice(&items[..index]);
    out.extend_from_slice(&items[index + 1..]);
    Cow::Owned(out)
}

/// `None` or an index past the end appends. A negative index prepends.
pub fn insert_at<T: Clone>(items: &[T], item: T, index: Option<isize>) -> Vec<T> {
    let position = match index {
        None => items.len(),
        Some(i) if i < 0 => {
            trace!(index = i, "insert_at negative index, prepending");
            0
        }
        Some(i) => usize::try_from(i).map_or(items.len(), |i| i.min(items.len())),
    };

    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(&items[..position]);
    out.push(item);
    out.extend_from_slice(&items[position..]);
    out
}
