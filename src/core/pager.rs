//! Roster pagination.

/// One slot of the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMark {
    Page(usize),
    Ellipsis,
}

/// A 1-based page of `items`.
#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Total pages for `n` items, never less than one.
pub fn total_pages(n: usize, page_size: usize) -> usize {
    n.div_ceil(page_size.max(1)).max(1)
}

/// Slice out page `requested`, clamped to the available pages.
pub fn paginate<T>(items: &[T], requested: usize, page_size: usize) -> Page<'_, T> {
    let size = page_size.max(1);
    let total_pages = total_pages(items.len(), size);
    let page = requested.clamp(1, total_pages);

    let start = ((page - 1) * size).min(items.len());
    let end = (start + size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        total_pages,
        total_items: items.len(),
    }
}

/// First, last and the pages next to `current`; an ellipsis two steps away.
pub fn page_window(current: usize, total: usize) -> Vec<PageMark> {
    let mut out = Vec::new();
    for p in 1..=total {
        if p == 1 || p == total || p.abs_diff(current) <= 1 {
            out.push(PageMark::Page(p));
        } else if p + 2 == current || p == current + 2 {
            out.push(PageMark::Ellipsis);
        }
    }
    out
}

/// `« 1 … 4 [5] 6 … 10 »` style rendering.
pub fn render_window(current: usize, total: usize) -> String {
    page_window(current, total)
        .into_iter()
        .map(|m| match m {
            PageMark::Page(p) if p == current => format!("[{}]", p),
            PageMark::Page(p) => p.to_string(),
            PageMark::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageMark::*;

    #[test]
    fn page_is_clamped() {
        let items: Vec<u32> = (1..=25).collect();
        let p = paginate(&items, 9, 10);
        assert_eq!(p.page, 3);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.items, &[21, 22, 23, 24, 25]);

        let p = paginate(&items, 0, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.items.len(), 10);
    }

    #[test]
    fn empty_list_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let p = paginate(&items, 3, 10);
        assert_eq!((p.page, p.total_pages), (1, 1));
        assert!(p.items.is_empty());
    }

    #[test]
    fn window_shows_neighbours_and_ellipses() {
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(page_window(1, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_window(1, 5), vec![Page(1), Page(2), Ellipsis, Page(5)]);
        assert_eq!(render_window(2, 2), "1 [2]");
    }
}
