pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Checks that `index` addresses a live element (`index < len`).
#[inline]
pub fn verify_index(operation: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        index_out_of_range(operation, index, len)
    }
}

/// Checks that `position` is a valid insertion point (`position <= len`).
#[inline]
pub fn verify_position(operation: &'static str, position: usize, len: usize) -> Result<()> {
    if position <= len {
        Ok(())
    } else {
        index_out_of_range(operation, position, len)
    }
}

/// Checks that `start..end` is a removable range: `start < len`,
/// `end <= len` and `start <= end`.
#[inline]
pub fn verify_range(operation: &'static str, start: usize, end: usize, len: usize) -> Result<()> {
    if start < len && end <= len && start <= end {
        Ok(())
    } else {
        range_out_of_range(operation, start, end, len)
    }
}

#[cold]
pub fn index_out_of_range<T>(operation: &'static str, index: usize, len: usize) -> Result<T> {
    Err(crate::error::Error::index_out_of_range(operation, index, len))
}

#[cold]
pub fn range_out_of_range<T>(
    operation: &'static str,
    start: usize,
    end: usize,
    len: usize,
) -> Result<T> {
    Err(crate::error::Error::range_out_of_range(
        operation, start, end, len,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_index() {
        assert!(verify_index("at", 0, 1).is_ok());
        assert!(verify_index("at", 1, 1).is_err());
        assert!(verify_index("at", 0, 0).is_err());
    }

    #[test]
    fn test_verify_position_allows_end() {
        assert!(verify_position("insert", 3, 3).is_ok());
        assert!(verify_position("insert", 0, 0).is_ok());
        assert!(verify_position("insert", 4, 3).is_err());
    }

    #[test]
    fn test_verify_range() {
        assert!(verify_range("erase_range", 1, 3, 5).is_ok());
        assert!(verify_range("erase_range", 2, 2, 5).is_ok());
        assert!(verify_range("erase_range", 0, 5, 5).is_ok());
        // start must address a live element, even for an empty range
        assert!(verify_range("erase_range", 5, 5, 5).is_err());
        assert!(verify_range("erase_range", 0, 0, 0).is_err());
        assert!(verify_range("erase_range", 1, 6, 5).is_err());
        assert!(verify_range("erase_range", 3, 2, 5).is_err());
    }
}
