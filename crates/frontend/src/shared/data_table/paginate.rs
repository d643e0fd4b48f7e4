/// Number of pages for `total` rows; never less than one.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Rows of the 1-based `page`. A page outside `1..=page_count` is empty;
/// clamping is up to the caller.
pub fn apply<T: Clone>(rows: &[T], page_size: usize, page: usize) -> Vec<T> {
    let page_size = page_size.max(1);
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
    else {
        return Vec::new();
    };
    if start >= rows.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(rows.len());
    rows[start..end].to_vec()
}

/// 1-based inclusive range of rows shown on `page`, for "11–20 из 57"
pub fn page_bounds(total: usize, page_size: usize, page: usize) -> Option<(usize, usize)> {
    let page_size = page_size.max(1);
    let start = page.checked_sub(1)?.checked_mul(page_size)?;
    if start >= total {
        return None;
    }
    Some((start + 1, start.saturating_add(page_size).min(total)))
}
