//! Top-level bubbletea model with two tabs: the data browser and the
//! optimizer.
//!
//! bubbletea constructs the model through [`Model::init`], which takes no
//! arguments, so the binary stores its [`AppConfig`] with [`configure`]
//! before the program starts.

use bubbletea_rs::{batch, quit, Cmd, KeyMsg, Model, Msg, WindowSizeMsg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use once_cell::sync::OnceCell;

use crate::browser::{Browser, Focus};
use crate::config::AppConfig;
use crate::help;
use crate::key::{self, Binding, KeyMap};
use crate::loader::{self, DataSource, DatasetLoadFailedMsg, DatasetLoadedMsg};
use crate::optimizer;
use crate::paginator::{self, NavigateMsg};
use crate::table;

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Stores the configuration used by [`App::init`]. Only the first call wins.
pub fn configure(config: AppConfig) -> Result<(), AppConfig> {
    CONFIG.set(config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Data,
    Optimizer,
}

#[derive(Debug, Clone)]
pub struct AppKeyMap {
    pub switch_tab: Binding,
    pub quit: Binding,
    pub force_quit: Binding,
}

impl Default for AppKeyMap {
    fn default() -> Self {
        Self {
            switch_tab: key::new_binding(vec![
                key::with_keys_str(&["tab"]),
                key::with_help("tab", "switch tab"),
            ]),
            quit: key::new_binding(vec![
                key::with_keys_str(&["q"]),
                key::with_help("q", "quit"),
            ]),
            force_quit: key::new_binding(vec![key::with_keys_str(&["ctrl+c"])]),
        }
    }
}

impl KeyMap for AppKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.switch_tab, &self.quit]
    }
}

pub struct App {
    tab: Tab,
    browser: Browser,
    optimizer: optimizer::Model,
    help: help::Model,
    pub keymap: AppKeyMap,
}

impl App {
    /// Builds the app and the startup commands: the dataset fetch and, when
    /// configured, the problem file load.
    pub fn new(config: &AppConfig) -> (Self, Option<Cmd>) {
        let client = reqwest::Client::new();

        let paginator = paginator::Model::new()
            .with_per_page(config.display.rows_per_page)
            .with_max_buttons(config.display.max_buttons);
        let browser = Browser::new(table::Model::new(), paginator);
        let optimizer = optimizer::Model::new(
            client.clone(),
            config.optimizer.endpoint.clone(),
            config.optimizer.problem.clone(),
        );

        let mut cmds = vec![loader::load_cmd(
            client,
            DataSource::from(config.data.url.as_str()),
        )];
        cmds.extend(optimizer.init());

        let app = Self {
            tab: Tab::default(),
            browser,
            optimizer,
            help: help::Model::new(),
            keymap: AppKeyMap::default(),
        };
        (app, Some(batch(cmds)))
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn optimizer(&self) -> &optimizer::Model {
        &self.optimizer
    }

    /// True while key presses are text for an input field.
    fn typing(&self) -> bool {
        self.tab == Tab::Data && self.browser.focus() == Focus::Search
    }

    fn handle_key(&mut self, key_msg: &KeyMsg, msg: Msg) -> Option<Cmd> {
        if self.keymap.force_quit.matches(key_msg) {
            return Some(quit());
        }
        if self.optimizer.alert().is_open() {
            return self.optimizer.update(msg);
        }
        if !self.typing() {
            if self.keymap.quit.matches(key_msg) {
                return Some(quit());
            }
            if self.keymap.switch_tab.matches(key_msg) {
                self.tab = match self.tab {
                    Tab::Data => Tab::Optimizer,
                    Tab::Optimizer => Tab::Data,
                };
                return None;
            }
        }
        match self.tab {
            Tab::Data => self.browser.update(msg),
            Tab::Optimizer => self.optimizer.update(msg),
        }
    }

    fn tabs_view(&self) -> String {
        let active = Style::new()
            .bold(true)
            .foreground(lipgloss::Color::from("#EE6FF8"))
            .padding(0, 1, 0, 1);
        let inactive = Style::new()
            .foreground(lipgloss::Color::from("#A49FA5"))
            .padding(0, 1, 0, 1);

        [(Tab::Data, "Data"), (Tab::Optimizer, "Optimizer")]
            .iter()
            .map(|(tab, title)| {
                let style = if *tab == self.tab { &active } else { &inactive };
                style.clone().inline(true).render(title)
            })
            .collect::<Vec<_>>()
            .join("│")
    }

    fn help_view(&self) -> String {
        let mut bindings = if self.optimizer.alert().is_open() {
            self.optimizer.alert().short_help()
        } else {
            match self.tab {
                Tab::Data => self.browser.short_help(),
                Tab::Optimizer => self.optimizer.short_help(),
            }
        };
        if !self.typing() && !self.optimizer.alert().is_open() {
            bindings.extend(self.keymap.short_help());
        }
        self.help.short_help_view(bindings)
    }
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let config = CONFIG.get().cloned().unwrap_or_default();
        Self::new(&config)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.help.width = size.width as usize;
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            let key_msg = KeyMsg {
                key: key_msg.key,
                modifiers: key_msg.modifiers,
            };
            return self.handle_key(&key_msg, msg);
        }
        if msg.is::<DatasetLoadedMsg>()
            || msg.is::<DatasetLoadFailedMsg>()
            || msg.is::<NavigateMsg>()
        {
            return self.browser.update(msg);
        }
        self.optimizer.update(msg)
    }

    fn view(&self) -> String {
        let body = if self.optimizer.alert().is_open() {
            self.optimizer.alert().view()
        } else {
            match self.tab {
                Tab::Data => self.browser.view(),
                Tab::Optimizer => self.optimizer.view(),
            }
        };
        format!("{}\n\n{}\n\n{}", self.tabs_view(), body, self.help_view())
    }
}
