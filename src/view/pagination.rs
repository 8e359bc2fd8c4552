use std::ops::{Range, RangeInclusive};

/// Number of pages for `count` items; never less than 1.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    u32::try_from(count.div_ceil(size)).unwrap_or(u32::MAX).max(1)
}

/// Clamp a requested page into `[1, total]`.
pub fn clamp_page(page: u32, total: u32) -> u32 {
    page.clamp(1, total.max(1))
}

/// Index range of `page` within a collection of `len` items.
pub fn slice_bounds(page: u32, page_size: u32, len: usize) -> Range<usize> {
    let size = page_size as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

/// The bounded run of page numbers offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: RangeInclusive<u32>,
    /// Pages exist before the window.
    pub leading_gap: bool,
    /// Pages exist after the window.
    pub trailing_gap: bool,
}

/// At most `window` page numbers centred on `page`, clamped at both ends.
pub fn page_window(page: u32, total: u32, window: u32) -> PageWindow {
    let total = total.max(1);
    let window = window.max(1);
    let page = clamp_page(page, total);

    let mut start = page.saturating_sub(window / 2).max(1);
    let mut end = start.saturating_add(window - 1);
    if end > total {
        end = total;
        start = end.saturating_sub(window - 1).max(1);
    }

    PageWindow {
        pages: start..=end,
        leading_gap: start > 1,
        trailing_gap: end < total,
    }
}
