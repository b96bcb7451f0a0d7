//! Pagination window: Previous, an optional first-page shortcut, up to five
//! numbered pages around the current one, an optional last-page shortcut,
//! Next.

use crate::session::PAGE_CEILING;

const WINDOW: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageControl {
    /// `target` is `None` when already on the first page.
    Previous { target: Option<u32> },
    /// Jump to the first or last page, outside the window.
    Shortcut { number: u32 },
    Ellipsis,
    Page { number: u32, active: bool },
    /// `target` is `None` when already on the last page.
    Next { target: Option<u32> },
}

impl PageControl {
    /// Page requested when this control is activated, if any.
    pub fn target(&self) -> Option<u32> {
        match self {
            Self::Previous { target } | Self::Next { target } => *target,
            Self::Shortcut { number } | Self::Page { number, .. } => Some(*number),
            Self::Ellipsis => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.target().is_some()
    }

    pub fn label(&self) -> String {
        match self {
            Self::Previous { .. } => "Previous".to_string(),
            Self::Next { .. } => "Next".to_string(),
            Self::Ellipsis => "...".to_string(),
            Self::Shortcut { number } | Self::Page { number, .. } => number.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationView {
    pub controls: Vec<PageControl>,
}

impl PaginationView {
    /// Numbers of the windowed (non-shortcut) page buttons.
    pub fn window(&self) -> Vec<u32> {
        self.controls
            .iter()
            .filter_map(|c| match c {
                PageControl::Page { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }

    pub fn active_page(&self) -> Option<u32> {
        self.controls.iter().find_map(|c| match c {
            PageControl::Page { number, active: true } => Some(*number),
            _ => None,
        })
    }

    /// Index of the control the cursor should rest on by default.
    pub fn active_index(&self) -> usize {
        self.controls
            .iter()
            .position(|c| matches!(c, PageControl::Page { active: true, .. }))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// Build the controls for `current` out of `total_pages` upstream pages.
///
/// The window starts two pages before `current`; only when it is cut short
/// at the last page is it pulled back toward page 1.
pub fn paginate(current: u32, total_pages: u32) -> PaginationView {
    let last = total_pages.min(PAGE_CEILING);
    let (cur, max) = (i64::from(current), i64::from(last));

    let mut start = (cur - 2).max(1);
    let end = max.min(start + WINDOW - 1);
    if end - start < WINDOW - 1 {
        start = (end - (WINDOW - 1)).max(1);
    }

    let mut controls = vec![PageControl::Previous {
        target: (current > 1).then(|| current - 1),
    }];

    if start > 1 {
        controls.push(PageControl::Shortcut { number: 1 });
        if start > 2 {
            controls.push(PageControl::Ellipsis);
        }
    }

    for number in start..=end {
        let number = number as u32;
        controls.push(PageControl::Page {
            number,
            active: number == current,
        });
    }

    if end < max {
        if end < max - 1 {
            controls.push(PageControl::Ellipsis);
        }
        controls.push(PageControl::Shortcut { number: last });
    }

    controls.push(PageControl::Next {
        target: (current < last).then(|| current + 1),
    });

    PaginationView { controls }
}
