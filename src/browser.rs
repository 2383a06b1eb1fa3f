//! The tabular data browser.
//!
//! Holds the dataset fetched at startup, the keyword-filtered row set derived
//! from it, and the pagination state over that row set. Everything it shows
//! goes through the [`Surface`] passed to [`Browser::new`].
//!
//! ```text
//! fetch ─▶ load (page 1) ─▶ filter (page 1) ─▶ navigate ─▶ navigate ...
//! ```
//!
//! A new row set always starts at page 1. Navigation only ever targets a page
//! some generated control carries, so the current page stays inside
//! `1..=total_pages`.

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use tracing::{debug, error, info};

use crate::dataset::{Dataset, Row};
use crate::filter::filter_rows;
use crate::key::{self, Binding};
use crate::loader::{DatasetLoadFailedMsg, DatasetLoadedMsg};
use crate::paginator::{self, Control, NavigateMsg};
use crate::search;
use crate::table::{self, Surface};
use crate::Component;

/// Which part of the browser receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Pagination,
    Search,
}

#[derive(Debug, Clone)]
pub struct BrowserKeyMap {
    pub search: Binding,
    pub apply: Binding,
    pub cancel: Binding,
    pub select_prev: Binding,
    pub select_next: Binding,
    pub activate: Binding,
}

impl Default for BrowserKeyMap {
    fn default() -> Self {
        Self {
            search: key::new_binding(vec![
                key::with_keys_str(&["/"]),
                key::with_help("/", "search"),
            ]),
            apply: key::new_binding(vec![
                key::with_keys_str(&["enter"]),
                key::with_help("enter", "apply"),
            ]),
            cancel: key::new_binding(vec![
                key::with_keys_str(&["esc"]),
                key::with_help("esc", "back"),
            ]),
            select_prev: key::new_binding(vec![
                key::with_keys_str(&["left", "h"]),
                key::with_help("←/h", "select"),
            ]),
            select_next: key::new_binding(vec![
                key::with_keys_str(&["right", "l"]),
                key::with_help("→/l", "select"),
            ]),
            activate: key::new_binding(vec![
                key::with_keys_str(&["enter"]),
                key::with_help("enter", "open"),
            ]),
        }
    }
}

/// A paginated, keyword-filtered view over a [`Dataset`], drawn through a
/// [`Surface`].
pub struct Browser<S: Surface = table::Model> {
    dataset: Option<Dataset>,
    /// Indices into the dataset rows, in dataset order.
    rows: Vec<usize>,
    keyword: String,
    paginator: paginator::Model,
    controls: Vec<Control>,
    selected: Option<usize>,
    surface: S,
    search: search::Model,
    focus: Focus,
    pub keymap: BrowserKeyMap,
}

impl<S: Surface> Browser<S> {
    /// Creates an empty browser that draws into `surface`.
    ///
    /// Nothing is rendered until a dataset is loaded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrition_tui::{Browser, paginator, table};
    ///
    /// let browser = Browser::new(table::Model::new(), paginator::Model::new().with_per_page(20));
    /// assert!(browser.dataset().is_none());
    /// assert_eq!(browser.paginator().total_pages(), 0);
    /// ```
    pub fn new(surface: S, paginator: paginator::Model) -> Self {
        Self {
            dataset: None,
            rows: Vec::new(),
            keyword: String::new(),
            paginator,
            controls: Vec::new(),
            selected: None,
            surface,
            search: search::Model::new(),
            focus: Focus::default(),
            keymap: BrowserKeyMap::default(),
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn paginator(&self) -> &paginator::Model {
        &self.paginator
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn selected_control(&self) -> Option<usize> {
        self.selected
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn search(&self) -> &search::Model {
        &self.search
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Number of rows in the current (possibly filtered) row set.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows of the current row set, in order.
    pub fn row_set(&self) -> Vec<&Row> {
        match &self.dataset {
            Some(dataset) => self.rows.iter().map(|&i| &dataset.rows()[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Rows visible on the current page.
    pub fn current_rows(&self) -> Vec<&Row> {
        let Some(dataset) = &self.dataset else {
            return Vec::new();
        };
        let (start, end) = self.paginator.slice_bounds();
        self.rows[start..end]
            .iter()
            .map(|&i| &dataset.rows()[i])
            .collect()
    }

    /// Installs the dataset and renders the header and page 1.
    ///
    /// A keyword applied before the dataset arrived is applied to the new
    /// rows, so the table agrees with the search box.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrition_tui::{Browser, Dataset, Row, paginator, table};
    ///
    /// let mut browser = Browser::new(table::Model::new(), paginator::Model::new());
    /// browser.filter("Egg");
    /// assert_eq!(browser.row_count(), 0);
    ///
    /// let rows = vec![Row::new(vec!["Egg".into()]), Row::new(vec!["Rice".into()])];
    /// browser.load(Dataset::new(vec!["Food".into()], rows).unwrap());
    /// assert_eq!(browser.row_count(), 1);
    /// assert_eq!(browser.keyword(), "Egg");
    /// ```
    pub fn load(&mut self, dataset: Dataset) {
        info!(
            "Loaded dataset with {} columns and {} rows",
            dataset.headers().len(),
            dataset.len()
        );
        self.surface.render_header(dataset.headers());
        self.dataset = Some(dataset);
        let keyword = std::mem::take(&mut self.keyword);
        self.filter(&keyword);
    }

    /// Replaces the row set with the rows containing `keyword` and returns to
    /// page 1. An empty keyword restores every row.
    pub fn filter(&mut self, keyword: &str) {
        self.rows = match &self.dataset {
            Some(dataset) => filter_rows(dataset.rows(), Some(keyword)),
            None => Vec::new(),
        };
        self.keyword = keyword.to_string();
        self.paginator.reset(self.rows.len());
        info!(
            "Filtered by {:?}: {} rows, {} pages",
            keyword,
            self.rows.len(),
            self.paginator.total_pages()
        );
        self.render_page();
    }

    /// Moves to `page` and re-renders. Pages outside the row set are ignored.
    pub fn navigate(&mut self, page: usize) -> bool {
        if !self.paginator.go_to(page) {
            debug!("Ignored navigation to page {page}");
            return false;
        }
        debug!("Navigated to page {page}");
        self.render_page();
        true
    }

    fn render_page(&mut self) {
        let (start, end) = self.paginator.slice_bounds();
        let rows: Vec<&Row> = match &self.dataset {
            Some(dataset) => self.rows[start..end]
                .iter()
                .map(|&i| &dataset.rows()[i])
                .collect(),
            None => Vec::new(),
        };
        self.surface.render_body(&rows);

        self.controls = self.paginator.controls();
        self.surface.render_controls(&self.controls);

        self.selected = self.controls.iter().position(|c| c.active);
        self.surface.select_control(self.selected);
    }

    fn move_selection(&mut self, forward: bool) {
        if self.controls.is_empty() {
            return;
        }
        let last = self.controls.len() - 1;
        let next = match (self.selected, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(last),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.selected = Some(next);
        self.surface.select_control(self.selected);
    }

    /// Returns the command of the selected control.
    pub fn activate_selected(&self) -> Option<Cmd> {
        self.selected
            .and_then(|i| self.controls.get(i))
            .map(Control::command)
    }

    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
        let _ = self.search.focus();
    }

    pub fn focus_pagination(&mut self) {
        self.focus = Focus::Pagination;
        self.search.blur();
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        match self.focus {
            Focus::Search => {
                if self.keymap.apply.matches(key_msg) {
                    let keyword = self.search.value().to_string();
                    self.filter(&keyword);
                    self.focus_pagination();
                } else if self.keymap.cancel.matches(key_msg) {
                    self.focus_pagination();
                } else {
                    self.search.handle_key(key_msg);
                }
                None
            }
            Focus::Pagination => {
                if self.keymap.search.matches(key_msg) {
                    self.focus_search();
                    None
                } else if self.keymap.select_prev.matches(key_msg) {
                    self.move_selection(false);
                    None
                } else if self.keymap.select_next.matches(key_msg) {
                    self.move_selection(true);
                    None
                } else if self.keymap.activate.matches(key_msg) {
                    self.activate_selected()
                } else {
                    self.paginator
                        .control_for_key(key_msg)
                        .map(|control| control.command())
                }
            }
        }
    }

    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<DatasetLoadedMsg>() {
            Ok(loaded) => {
                self.load(loaded.0);
                return None;
            }
            Err(msg) => msg,
        };

        if let Some(DatasetLoadFailedMsg(err)) = msg.downcast_ref::<DatasetLoadFailedMsg>() {
            error!("There was a problem with the fetch operation: {err}");
            return None;
        }
        if let Some(nav) = msg.downcast_ref::<NavigateMsg>() {
            self.navigate(nav.page);
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }
        None
    }
}

impl<S: Surface> key::KeyMap for Browser<S> {
    fn short_help(&self) -> Vec<&Binding> {
        match self.focus {
            Focus::Search => vec![&self.keymap.apply, &self.keymap.cancel],
            Focus::Pagination => {
                let mut bindings = vec![
                    &self.keymap.search,
                    &self.keymap.select_next,
                    &self.keymap.activate,
                ];
                bindings.extend(key::KeyMap::short_help(&self.paginator.keymap));
                bindings
            }
        }
    }
}

impl Browser<table::Model> {
    pub fn view(&self) -> String {
        let status = if self.dataset.is_none() {
            "No data loaded.".to_string()
        } else if self.paginator.total_pages() == 0 {
            "0 rows".to_string()
        } else {
            format!(
                "{} rows · page {}/{}",
                self.rows.len(),
                self.paginator.page(),
                self.paginator.total_pages()
            )
        };
        format!("{}\n{}\n\n{}", self.search.view(), status, self.surface.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn dataset(n: usize) -> Dataset {
        let rows = (0..n)
            .map(|i| Row::new(vec![format!("Food {i}"), format!("{}", i * 10)]))
            .collect();
        Dataset::new(vec!["Food".to_string(), "Energy".to_string()], rows).unwrap()
    }

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn browser(n: usize) -> Browser {
        let mut browser = Browser::new(table::Model::new(), paginator::Model::new());
        browser.load(dataset(n));
        browser
    }

    #[test]
    fn help_follows_focus() {
        use crate::key::KeyMap;

        let mut browser = browser(25);
        let descs = |browser: &Browser| -> Vec<String> {
            browser
                .short_help()
                .iter()
                .map(|b| b.help().desc.clone())
                .collect()
        };
        assert_eq!(
            descs(&browser),
            vec!["search", "select", "open", "prev page", "next page"]
        );

        browser.focus_search();
        assert_eq!(descs(&browser), vec!["apply", "back"]);
    }

    #[test]
    fn starts_empty_before_load() {
        let browser = Browser::new(table::Model::new(), paginator::Model::new());

        assert!(browser.dataset().is_none());
        assert!(browser.current_rows().is_empty());
        assert!(browser.controls().is_empty());
    }

    #[test]
    fn load_renders_first_page() {
        let browser = browser(25);

        assert_eq!(browser.surface().header(), &["Food", "Energy"]);
        assert_eq!(browser.surface().body().len(), 10);
        assert_eq!(browser.surface().body()[0][0], "Food 0");
        assert_eq!(browser.paginator().page(), 1);
    }

    #[test]
    fn failed_load_leaves_browser_empty() {
        let mut browser = Browser::new(table::Model::new(), paginator::Model::new());
        let err = crate::error::LoadError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert!(browser.update(Box::new(DatasetLoadFailedMsg(err))).is_none());

        assert!(browser.dataset().is_none());
        assert!(browser.surface().body().is_empty());
    }

    #[test]
    fn navigate_msg_moves_page() {
        let mut browser = browser(25);
        browser.update(Box::new(NavigateMsg { page: 3 }));

        assert_eq!(browser.paginator().page(), 3);
        assert_eq!(browser.surface().body().len(), 5);
        assert_eq!(browser.surface().body()[0][0], "Food 20");
    }

    #[test]
    fn search_flow_filters_and_returns_focus() {
        let mut browser = browser(25);
        browser.update(key(KeyCode::Char('/')));
        assert_eq!(browser.focus(), Focus::Search);

        for c in "Food 1".chars() {
            browser.update(key(KeyCode::Char(c)));
        }
        browser.update(key(KeyCode::Enter));

        assert_eq!(browser.focus(), Focus::Pagination);
        assert_eq!(browser.keyword(), "Food 1");
        // Food 1, Food 10..=19
        assert_eq!(browser.row_count(), 11);
    }

    #[test]
    fn q_is_text_while_searching() {
        let mut browser = browser(3);
        browser.focus_search();
        browser.update(key(KeyCode::Char('q')));

        assert_eq!(browser.search().value(), "q");
    }

    #[tokio::test]
    async fn selection_activates_control() {
        let mut browser = browser(25);
        // active page 1 is selected after render
        assert_eq!(browser.selected_control(), Some(0));

        browser.update(key(KeyCode::Right));
        let cmd = browser.update(key(KeyCode::Enter)).expect("command");
        let msg = cmd.await.expect("message");
        assert_eq!(
            msg.downcast_ref::<NavigateMsg>(),
            Some(&NavigateMsg { page: 2 })
        );
    }
}
