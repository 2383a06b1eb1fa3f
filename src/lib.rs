//! # nutrition-tui
//!
//! A terminal front end for a nutrition optimizer, built on
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! Two tabs share one program:
//!
//! - **Data** browses a nutrition dataset fetched once at startup. Rows are
//!   filtered by keyword and shown ten to a page with a sliding window of
//!   page-number controls.
//! - **Optimizer** submits a problem file to an external `/optimize` service
//!   and charts the answer.
//!
//! The browser renders through a [`table::Surface`], so it runs without a
//! terminal:
//!
//! ```rust
//! use nutrition_tui::browser::Browser;
//! use nutrition_tui::dataset::{Dataset, Row};
//! use nutrition_tui::{paginator, table};
//!
//! let rows = (0..25).map(|i| Row::new(vec![format!("Food {i}")])).collect();
//! let dataset = Dataset::new(vec!["Food".to_string()], rows).unwrap();
//!
//! let mut browser = Browser::new(table::Model::new(), paginator::Model::new());
//! browser.load(dataset);
//! assert_eq!(browser.current_rows().len(), 10);
//!
//! browser.navigate(3);
//! assert_eq!(browser.current_rows().len(), 5);
//!
//! browser.filter("Food 2");
//! assert_eq!(browser.paginator().page(), 1);
//! assert_eq!(browser.row_count(), 6);
//! ```
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`loader`] | Fetches the `{headers, data}` document |
//! | [`filter`] | Keyword filter over rows |
//! | [`paginator`] | Page window and navigation controls |
//! | [`table`] | Header, body and control rendering |
//! | [`search`] | Keyword input |
//! | [`browser`] | Ties the above together |
//! | [`optimizer`] | Problem file, `/optimize` client, result charts |
//! | [`alert`] | Modal message box |
//! | [`help`] | Key binding help line |

pub mod alert;
pub mod app;
pub mod browser;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod help;
pub mod key;
pub mod loader;
pub mod logging;
pub mod optimizer;
pub mod paginator;
pub mod search;
pub mod table;

use bubbletea_rs::Cmd;

/// Components that take keyboard focus.
///
/// `focus()` may return a command to run once focus is gained.
pub trait Component {
    fn focus(&mut self) -> Option<Cmd>;

    fn blur(&mut self);

    fn focused(&self) -> bool;
}

pub use app::App;
pub use browser::Browser;
pub use config::AppConfig;
pub use dataset::{Dataset, Row};
pub use error::{ConfigError, DatasetError, LoadError, OptimizeError, ProblemError};
pub use help::Model as HelpModel;
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use paginator::Model as Paginator;
pub use search::Model as SearchInput;
pub use table::{Model as Table, Surface};

/// Common imports for building on the browser.
pub mod prelude {
    pub use crate::browser::{Browser, Focus};
    pub use crate::dataset::{Dataset, Row};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::loader::{DataSource, DatasetLoadFailedMsg, DatasetLoadedMsg};
    pub use crate::paginator::{Control, ControlKind, NavigateMsg};
    pub use crate::table::Surface;
    pub use crate::Component;
}
