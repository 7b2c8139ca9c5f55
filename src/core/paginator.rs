use crate::core::error::{GitAliasError, Result};

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Splits `items` into consecutive pages of at most `page_size` entries.
/// Order is preserved; only the last page may be shorter.
pub fn paginate<T: Clone>(items: &[T], page_size: usize) -> Result<Vec<Vec<T>>> {
    if page_size == 0 {
        return Err(GitAliasError::invalid_page_size(page_size));
    }
    Ok(items.chunks(page_size).map(<[T]>::to_vec).collect())
}
