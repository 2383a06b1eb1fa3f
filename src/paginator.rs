//! Pagination controller for the nutrition table.
//!
//! The controller owns the page position over a row set and decides which
//! navigation controls exist. It does not slice or render rows itself; the
//! browser asks it for [`Model::slice_bounds`] and hands [`Model::controls`] to
//! its surface.
//!
//! Pages are 1-based. With `max_buttons = 10` and 50 pages, page 25 shows:
//!
//! ```text
//! « ‹ 20 21 22 23 24 [25] 26 27 28 29 › »
//! ```
//!
//! The page window slides to keep the current page near its middle and is
//! clamped at both ends, so once there are more pages than buttons it always
//! holds exactly `max_buttons` page numbers.

use bubbletea_rs::{Cmd, KeyMsg, Msg};

use crate::key::{self, Binding};

/// Rows shown per page.
pub const DEFAULT_PER_PAGE: usize = 10;
/// Page-number controls shown at once.
pub const DEFAULT_MAX_BUTTONS: usize = 10;

/// Navigate to `page`. Carried by every pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateMsg {
    pub page: usize,
}

/// What a pagination control does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Jump to page 1; only present while page 1 is outside the window.
    First,
    /// Go to the previous page.
    Prev,
    /// A page number inside the window.
    Page,
    /// Go to the next page.
    Next,
    /// Jump to the last page; only present while it is outside the window.
    Last,
}

/// One navigation control, bound to the page it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub kind: ControlKind,
    pub target: usize,
    /// Set on the page-number control of the current page.
    pub active: bool,
}

impl Control {
    pub fn label(&self) -> String {
        match self.kind {
            ControlKind::First => "«".to_string(),
            ControlKind::Prev => "‹".to_string(),
            ControlKind::Page => self.target.to_string(),
            ControlKind::Next => "›".to_string(),
            ControlKind::Last => "»".to_string(),
        }
    }

    pub fn message(&self) -> NavigateMsg {
        NavigateMsg { page: self.target }
    }

    /// Returns a command that delivers this control's [`NavigateMsg`].
    pub fn command(&self) -> Cmd {
        let msg = self.message();
        Box::pin(async move { Some(Box::new(msg) as Msg) })
    }
}

/// Inclusive range of page numbers shown as controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, page: usize) -> bool {
        (self.start..=self.end).contains(&page)
    }
}

/// Key bindings that activate controls directly.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    pub first_page: Binding,
    pub prev_page: Binding,
    pub next_page: Binding,
    pub last_page: Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            first_page: key::new_binding(vec![
                key::with_keys_str(&["g", "home"]),
                key::with_help("g", "first"),
            ]),
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["p", "pgup"]),
                key::with_help("p", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["n", "pgdown"]),
                key::with_help("n", "next page"),
            ]),
            last_page: key::new_binding(vec![
                key::with_keys_str(&["G", "end"]),
                key::with_help("G", "last"),
            ]),
        }
    }
}

impl key::KeyMap for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_page, &self.next_page]
    }
}

/// Pagination state over a row set of `total_items` rows.
#[derive(Debug, Clone)]
pub struct Model {
    /// Current page, 1-based.
    page: usize,
    per_page: usize,
    max_buttons: usize,
    total_items: usize,
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            max_buttons: DEFAULT_MAX_BUTTONS,
            total_items: 0,
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets rows per page (minimum 1).
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Sets the number of page-number controls (minimum 1).
    pub fn with_max_buttons(mut self, max_buttons: usize) -> Self {
        self.max_buttons = max_buttons.max(1);
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn max_buttons(&self) -> usize {
        self.max_buttons
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `ceil(total_items / per_page)`; 0 for an empty row set.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    /// Establishes a new row set and returns to page 1.
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page = 1;
    }

    /// Moves to `page`. Pages outside `1..=total_pages` are refused and leave
    /// the position unchanged.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        self.page = page;
        true
    }

    /// Row index range `[start, end)` of the current page.
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = ((self.page - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        (start, end)
    }

    /// The page numbers shown as controls, or `None` when there are no pages.
    ///
    /// With more pages than buttons the window slides to keep the current
    /// page near its middle, clamped at both ends.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrition_tui::paginator::Model;
    ///
    /// let mut paginator = Model::new();
    /// paginator.reset(500);
    /// paginator.go_to(25);
    ///
    /// let window = paginator.window().unwrap();
    /// assert_eq!((window.start, window.end), (20, 29));
    ///
    /// paginator.reset(0);
    /// assert!(paginator.window().is_none());
    /// ```
    pub fn window(&self) -> Option<PageWindow> {
        let total = self.total_pages();
        if total == 0 {
            return None;
        }

        let max = self.max_buttons;
        let half = max / 2;
        let page = self.page;

        let (start, end) = if total <= max {
            (1, total)
        } else if page <= half {
            (1, max)
        } else if page + half >= total {
            (total - max + 1, total)
        } else {
            let start = page - half;
            (start, start + max - 1)
        };

        Some(PageWindow { start, end })
    }

    /// Builds the ordered control set for the current position: first,
    /// prev, the page window, next, last. Each optional control appears only
    /// when it leads somewhere new.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrition_tui::paginator::{ControlKind, Model};
    ///
    /// let mut paginator = Model::new();
    /// paginator.reset(25);
    ///
    /// let kinds: Vec<ControlKind> = paginator.controls().iter().map(|c| c.kind).collect();
    /// assert_eq!(
    ///     kinds,
    ///     vec![ControlKind::Page, ControlKind::Page, ControlKind::Page, ControlKind::Next]
    /// );
    /// assert!(paginator.controls()[0].active);
    /// ```
    pub fn controls(&self) -> Vec<Control> {
        let Some(window) = self.window() else {
            return Vec::new();
        };
        let total = self.total_pages();
        let sliding = total > self.max_buttons;
        let mut controls = Vec::with_capacity(window.len() + 4);

        if sliding && window.start > 1 {
            controls.push(Control {
                kind: ControlKind::First,
                target: 1,
                active: false,
            });
        }
        if self.page > 1 {
            controls.push(Control {
                kind: ControlKind::Prev,
                target: self.page - 1,
                active: false,
            });
        }
        controls.extend((window.start..=window.end).map(|target| Control {
            kind: ControlKind::Page,
            target,
            active: target == self.page,
        }));
        if self.page < total {
            controls.push(Control {
                kind: ControlKind::Next,
                target: self.page + 1,
                active: false,
            });
        }
        if sliding && window.end < total {
            controls.push(Control {
                kind: ControlKind::Last,
                target: total,
                active: false,
            });
        }

        controls
    }

    /// Finds the control of the given kind, if the current position shows one.
    pub fn control(&self, kind: ControlKind) -> Option<Control> {
        self.controls().into_iter().find(|c| c.kind == kind)
    }

    /// Maps a key press to the control it activates.
    ///
    /// Only controls that currently exist can be activated, so the returned
    /// target is always a valid page.
    pub fn control_for_key(&self, msg: &KeyMsg) -> Option<Control> {
        let kind = if self.keymap.first_page.matches(msg) {
            ControlKind::First
        } else if self.keymap.prev_page.matches(msg) {
            ControlKind::Prev
        } else if self.keymap.next_page.matches(msg) {
            ControlKind::Next
        } else if self.keymap.last_page.matches(msg) {
            ControlKind::Last
        } else {
            return None;
        };
        self.control(kind)
    }

    /// Handles key presses for the direct-activation bindings.
    ///
    /// Returns the command for the activated control; the page itself changes
    /// when the resulting [`NavigateMsg`] is processed.
    pub fn update(&self, msg: &Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        self.control_for_key(key_msg).map(|control| control.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn at(total_items: usize, page: usize) -> Model {
        let mut paginator = Model::new();
        paginator.reset(total_items);
        assert!(paginator.go_to(page) || total_items == 0);
        paginator
    }

    fn kinds(controls: &[Control]) -> Vec<ControlKind> {
        controls.iter().map(|c| c.kind).collect()
    }

    fn page_numbers(controls: &[Control]) -> Vec<usize> {
        controls
            .iter()
            .filter(|c| c.kind == ControlKind::Page)
            .map(|c| c.target)
            .collect()
    }

    #[test]
    fn total_pages_rounds_up() {
        for (items, pages) in [(0, 0), (1, 1), (10, 1), (11, 2), (25, 3), (500, 50)] {
            assert_eq!(at(items, 1).total_pages(), pages, "{items} items");
        }
    }

    #[test]
    fn window_length_is_capped_by_max_buttons() {
        for items in [1, 9, 10, 55, 99, 100, 101, 250, 1000] {
            let paginator = at(items, 1);
            let total = paginator.total_pages();
            for page in 1..=total {
                let mut p = paginator.clone();
                p.go_to(page);
                let window = p.window().unwrap();
                assert_eq!(window.len(), total.min(10), "{items} items, page {page}");
                assert!(window.contains(page));
                assert!(window.start >= 1 && window.end <= total);
            }
        }
    }

    #[test]
    fn few_pages_show_everything_without_jumps() {
        let paginator = at(25, 1);
        let controls = paginator.controls();

        assert_eq!(page_numbers(&controls), vec![1, 2, 3]);
        assert_eq!(
            kinds(&controls),
            vec![
                ControlKind::Page,
                ControlKind::Page,
                ControlKind::Page,
                ControlKind::Next
            ]
        );
        assert!(controls[0].active);
    }

    #[test]
    fn six_pages_are_never_slid() {
        let paginator = at(55, 6);
        let window = paginator.window().unwrap();

        assert_eq!((window.start, window.end), (1, 6));
        let controls = paginator.controls();
        assert_eq!(kinds(&controls).first(), Some(&ControlKind::Prev));
        assert_eq!(kinds(&controls).last(), Some(&ControlKind::Page));
    }

    #[test]
    fn middle_page_is_centered_with_both_jumps() {
        let paginator = at(500, 25);
        let window = paginator.window().unwrap();
        assert_eq!((window.start, window.end), (20, 29));

        let controls = paginator.controls();
        assert_eq!(controls[0].kind, ControlKind::First);
        assert_eq!(controls[0].target, 1);
        assert_eq!(controls[1].kind, ControlKind::Prev);
        assert_eq!(controls[1].target, 24);
        assert_eq!(page_numbers(&controls), (20..=29).collect::<Vec<_>>());
        assert_eq!(controls[controls.len() - 2].kind, ControlKind::Next);
        assert_eq!(controls[controls.len() - 2].target, 26);
        assert_eq!(controls[controls.len() - 1].kind, ControlKind::Last);
        assert_eq!(controls[controls.len() - 1].target, 50);

        let active: Vec<_> = controls.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].target, 25);
    }

    #[test]
    fn window_clamps_at_both_ends() {
        let start = at(500, 3).window().unwrap();
        assert_eq!((start.start, start.end), (1, 10));

        let early = at(500, 6).window().unwrap();
        assert_eq!((early.start, early.end), (1, 10));

        let late = at(500, 45).window().unwrap();
        assert_eq!((late.start, late.end), (41, 50));

        let last = at(500, 50).window().unwrap();
        assert_eq!((last.start, last.end), (41, 50));
    }

    #[test]
    fn jump_controls_follow_the_window() {
        let near_start = at(500, 5).controls();
        assert!(!kinds(&near_start).contains(&ControlKind::First));
        assert!(kinds(&near_start).contains(&ControlKind::Last));

        let near_end = at(500, 48).controls();
        assert!(kinds(&near_end).contains(&ControlKind::First));
        assert!(!kinds(&near_end).contains(&ControlKind::Last));

        let last = at(500, 50).controls();
        assert!(!kinds(&last).contains(&ControlKind::Next));
        assert!(!kinds(&last).contains(&ControlKind::Last));
    }

    #[test]
    fn empty_row_set_has_no_controls() {
        let paginator = at(0, 1);

        assert_eq!(paginator.total_pages(), 0);
        assert_eq!(paginator.window(), None);
        assert!(paginator.controls().is_empty());
        assert_eq!(paginator.slice_bounds(), (0, 0));
        assert_eq!(paginator.page(), 1);
    }

    #[test]
    fn go_to_refuses_pages_out_of_range() {
        let mut paginator = at(25, 2);

        assert!(!paginator.go_to(0));
        assert!(!paginator.go_to(4));
        assert_eq!(paginator.page(), 2);
        assert!(paginator.go_to(3));
        assert_eq!(paginator.page(), 3);
    }

    #[test]
    fn slice_bounds_cover_the_page() {
        for n in [0usize, 1, 9, 10, 11, 25, 99] {
            let paginator = at(n, 1);
            for page in 1..=paginator.total_pages() {
                let mut p = paginator.clone();
                p.go_to(page);
                assert_eq!(p.slice_bounds(), ((page - 1) * 10, (page * 10).min(n)));
            }
        }
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut paginator = at(500, 37);
        paginator.reset(42);

        assert_eq!(paginator.page(), 1);
        assert_eq!(paginator.total_pages(), 5);
    }

    #[test]
    fn keys_only_activate_existing_controls() {
        let key = |code| KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        };

        let first_page = at(500, 1);
        assert_eq!(first_page.control_for_key(&key(KeyCode::Char('p'))), None);
        assert_eq!(first_page.control_for_key(&key(KeyCode::Char('g'))), None);
        assert_eq!(
            first_page
                .control_for_key(&key(KeyCode::Char('G')))
                .map(|c| c.target),
            Some(50)
        );

        let middle = at(500, 25);
        assert_eq!(
            middle
                .control_for_key(&key(KeyCode::Char('n')))
                .map(|c| c.target),
            Some(26)
        );
        assert_eq!(
            middle
                .control_for_key(&key(KeyCode::Char('g')))
                .map(|c| c.target),
            Some(1)
        );
        assert_eq!(middle.control_for_key(&key(KeyCode::Char('x'))), None);
    }

    #[tokio::test]
    async fn control_command_delivers_navigate_msg() {
        let control = Control {
            kind: ControlKind::Page,
            target: 7,
            active: false,
        };

        let msg = control.command().await.expect("navigate message");
        assert_eq!(msg.downcast_ref::<NavigateMsg>(), Some(&NavigateMsg { page: 7 }));
    }

    #[test]
    fn labels() {
        let page = Control {
            kind: ControlKind::Page,
            target: 12,
            active: true,
        };
        assert_eq!(page.label(), "12");
        assert_eq!(
            Control {
                kind: ControlKind::Last,
                target: 50,
                active: false
            }
            .label(),
            "»"
        );
    }
}
