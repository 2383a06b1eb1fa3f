//! Optimizer tab: submits a problem to the external optimizer and shows the
//! result.
//!
//! The problem is read from a TOML file (see [`problem`]). Submitting posts it
//! to `<endpoint>/optimize`; the reply either draws the charts or clears them
//! and raises an alert. Transport failures and non-2xx replies raise an alert
//! with the error text and leave the charts as they were.

pub mod chart;
pub mod client;
pub mod problem;
pub mod response;

use std::path::PathBuf;

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use tracing::{error, info, warn};

pub use problem::Problem;
pub use response::{OptimizeResult, Outcome};

use crate::alert;
use crate::error::{OptimizeError, ProblemError};
use crate::key::{self, Binding};

/// A problem file finished loading.
#[derive(Debug)]
pub struct ProblemLoadedMsg(pub Result<Problem, ProblemError>);

/// An optimize round trip finished.
#[derive(Debug)]
pub struct OptimizeFinishedMsg(pub Result<OptimizeResult, OptimizeError>);

pub fn load_problem_cmd(path: PathBuf) -> Cmd {
    Box::pin(async move {
        let result = Problem::load(&path).await;
        Some(Box::new(ProblemLoadedMsg(result)) as Msg)
    })
}

pub fn optimize_cmd(client: reqwest::Client, endpoint: String, problem: Problem) -> Cmd {
    Box::pin(async move {
        let result = client::optimize(&client, &endpoint, &problem).await;
        Some(Box::new(OptimizeFinishedMsg(result)) as Msg)
    })
}

#[derive(Debug, Clone)]
pub struct OptimizerKeyMap {
    pub submit: Binding,
    pub reload: Binding,
}

impl Default for OptimizerKeyMap {
    fn default() -> Self {
        Self {
            submit: key::new_binding(vec![
                key::with_keys_str(&["enter", "o"]),
                key::with_help("o", "optimize"),
            ]),
            reload: key::new_binding(vec![
                key::with_keys_str(&["r"]),
                key::with_help("r", "reload problem"),
            ]),
        }
    }
}

pub struct Model {
    client: reqwest::Client,
    endpoint: String,
    problem_path: Option<PathBuf>,
    problem: Option<Problem>,
    pending: bool,
    charts: chart::Model,
    alert: alert::Model,
    pub keymap: OptimizerKeyMap,
}

impl Model {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        problem_path: Option<PathBuf>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            problem_path,
            problem: None,
            pending: false,
            charts: chart::Model::new(),
            alert: alert::Model::new(),
            keymap: OptimizerKeyMap::default(),
        }
    }

    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    pub fn set_problem(&mut self, problem: Problem) {
        self.problem = Some(problem);
    }

    pub fn charts(&self) -> &chart::Model {
        &self.charts
    }

    pub fn alert(&self) -> &alert::Model {
        &self.alert
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Loads the configured problem file, if any.
    pub fn init(&self) -> Option<Cmd> {
        self.reload()
    }

    pub fn reload(&self) -> Option<Cmd> {
        self.problem_path.clone().map(load_problem_cmd)
    }

    /// Posts the loaded problem. Ignored while a request is in flight.
    pub fn submit(&mut self) -> Option<Cmd> {
        if self.pending {
            return None;
        }
        let Some(problem) = self.problem.clone() else {
            self.alert.show("No problem file loaded.");
            return None;
        };
        self.pending = true;
        Some(optimize_cmd(
            self.client.clone(),
            self.endpoint.clone(),
            problem,
        ))
    }

    pub fn handle_result(&mut self, result: Result<OptimizeResult, OptimizeError>) {
        self.pending = false;
        match result {
            Ok(result) => match result.outcome() {
                Outcome::Draw => {
                    info!("Optimal solution with {} foods", result.food_intakes.0.len());
                    self.charts.draw(&result);
                }
                Outcome::Alert(text) => {
                    warn!("Optimizer returned status {}", result.status);
                    self.charts.clear();
                    self.alert.show(text);
                }
            },
            Err(err) => {
                error!("Optimize request failed: {err}");
                self.alert.show(err.to_string());
            }
        }
    }

    fn handle_problem(&mut self, result: Result<Problem, ProblemError>) {
        match result {
            Ok(problem) => {
                info!(
                    "Loaded problem with {} foods and {} constraints",
                    problem.food_information.len(),
                    problem.constraints.len()
                );
                self.problem = Some(problem);
            }
            Err(err) => {
                error!("Problem file rejected: {err}");
                self.problem = None;
                self.alert.show(err.to_string());
            }
        }
    }

    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.alert.update(&msg) {
            return None;
        }

        let msg = match msg.downcast::<OptimizeFinishedMsg>() {
            Ok(finished) => {
                self.handle_result(finished.0);
                return None;
            }
            Err(msg) => msg,
        };
        let msg = match msg.downcast::<ProblemLoadedMsg>() {
            Ok(loaded) => {
                self.handle_problem(loaded.0);
                return None;
            }
            Err(msg) => msg,
        };

        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.submit.matches(key_msg) {
            self.submit()
        } else if self.keymap.reload.matches(key_msg) {
            self.reload()
        } else {
            None
        }
    }

    fn summary(&self) -> String {
        let muted = Style::new().foreground(lipgloss::Color::from("#626262"));
        let Some(problem) = &self.problem else {
            let text = match &self.problem_path {
                Some(path) => format!("No problem loaded from {}.", path.display()),
                None => "No problem file configured.".to_string(),
            };
            return muted.inline(true).render(&text);
        };

        let objective = format!(
            "Objective: {:?} {}",
            problem.objective.sense, problem.objective.nutrient
        )
        .to_lowercase();
        let foods = problem
            .food_information
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let mut lines = vec![objective, format!("Foods: {foods}")];
        lines.extend(problem.constraints.iter().map(|c| {
            format!("{:?} {} ({:?}) {}", c.min_max, c.nutrient, c.unit, c.value).to_lowercase()
        }));
        lines.join("\n")
    }

    pub fn view(&self) -> String {
        if self.alert.is_open() {
            return self.alert.view();
        }

        let mut out = self.summary();
        if self.pending {
            out.push_str("\n\nOptimizing…");
        }
        if !self.charts.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.charts.view());
        }
        out
    }
}

impl key::KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        if self.alert.is_open() {
            return self.alert.short_help();
        }
        vec![&self.keymap.submit, &self.keymap.reload]
    }
}
