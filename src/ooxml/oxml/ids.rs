/// Annotation id allocation.
///
/// The next id is always recomputed from the ids present in a store; there
/// is no persisted counter. A failed link after allocation therefore leaks
/// nothing but an unreferenced entry, and retrying allocates the next free id.
use crate::ooxml::error::{OoxmlError, Result};

/// Next id after the maximum of `ids`, or `base` when `ids` is empty.
///
/// # Errors
///
/// [`OoxmlError::Allocation`] when the maximum is `i32::MAX`.
pub fn next_id<I>(ids: I, base: i32) -> Result<i32>
where
    I: IntoIterator<Item = i32>,
{
    match ids.into_iter().max() {
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| OoxmlError::Allocation(format!("no id follows {}", max))),
        None => Ok(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_uses_base() {
        assert_eq!(next_id([], 0).unwrap(), 0);
        assert_eq!(next_id([], 1).unwrap(), 1);
    }

    #[test]
    fn test_uses_maximum_not_last() {
        assert_eq!(next_id([3, 9, 1], 0).unwrap(), 10);
        assert_eq!(next_id([-1, 0], 1).unwrap(), 1);
    }

    #[test]
    fn test_overflow_is_allocation_error() {
        assert!(matches!(
            next_id([i32::MAX], 0),
            Err(OoxmlError::Allocation(_))
        ));
    }
}
