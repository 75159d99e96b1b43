// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Dashboard application context
//!
//! Replaces a process-wide app object with an explicit value that owns
//! the component tree and the binding registry for one dashboard.
//!
//! # Lifecycle
//!
//! ```text
//! Registering ──start()──▶ Running ──shutdown()──▶ ShutDown
//!   register()               handle_event()
//! ```
//!
//! Rules can only be registered before `start()`, and events are only
//! accepted while running.

use log::{debug, info};
use serde_json::Value;
use std::fmt;
use std::io;
use std::sync::Arc;
use thiserror::Error;

use crate::config::DashboardConfig;
use crate::core::{
    BindingRegistry, BindingRule, ComponentTree, Dispatch, InputEvent, PropertyRef,
    RegistryError, RuleHandle, TreeError,
};
use crate::data::DataError;
use crate::ui::builders::{build_main_layout, load_datasets, wire_up_handlers, Variant};
use crate::ui::render::render_outline;

/// Where an `AppContext` is in its lifecycle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lifecycle {
    Registering,
    Running,
    ShutDown,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Registering => write!(f, "registering"),
            Lifecycle::Running => write!(f, "running"),
            Lifecycle::ShutDown => write!(f, "shut down"),
        }
    }
}

/// Dashboard startup and runtime errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid layout: {0}")]
    Tree(#[from] TreeError),

    #[error("Invalid binding: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to load data: {0}")]
    Data(#[from] DataError),

    #[error("Rules cannot be registered while the dashboard is {0}")]
    RegistrationClosed(Lifecycle),

    #[error("Dashboard is {0}, expected {1}")]
    InvalidState(Lifecycle, Lifecycle),

    #[error("Failed to read events: {0}")]
    Io(#[from] io::Error),
}

/// Totals reported by `shutdown`
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ShutdownReport {
    pub rules: usize,
    pub events: usize,
    pub changes: usize,
    pub failures: usize,
}

/// One running dashboard: its tree, its rules and their values
pub struct AppContext {
    config: DashboardConfig,
    tree: Arc<ComponentTree>,
    registry: BindingRegistry,
    state: Lifecycle,
    report: ShutdownReport,
}

impl AppContext {
    /// Creates a context over an already built tree
    ///
    /// The registry uses the config's notify policy.
    ///
    /// # Example
    ///
    /// ```
    /// use reactive_dashboard::config::DashboardConfig;
    /// use reactive_dashboard::core::{ComponentTree, NodeKind, NodeSpec};
    /// use reactive_dashboard::ui::AppContext;
    ///
    /// let tree = ComponentTree::build(&NodeSpec::container(vec![
    ///     NodeSpec::new(NodeKind::Input).with_id("my-input"),
    /// ]))?;
    ///
    /// let mut ctx = AppContext::new(DashboardConfig::default(), tree);
    /// ctx.start()?;
    /// let report = ctx.shutdown();
    /// assert_eq!(report.rules, 0);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(config: DashboardConfig, tree: ComponentTree) -> Self {
        let tree = Arc::new(tree);
        let registry = BindingRegistry::with_policy(Arc::clone(&tree), config.notify_policy);

        Self {
            config,
            tree,
            registry,
            state: Lifecycle::Registering,
            report: ShutdownReport::default(),
        }
    }

    /// Loads data, builds the layout and wires the handlers of `variant`
    ///
    /// # Errors
    ///
    /// * `AppError::Data` - A dataset could not be loaded; nothing is built
    /// * `AppError::Tree` - The layout failed validation
    /// * `AppError::Registry` - A handler could not be registered
    pub fn from_variant(config: DashboardConfig, variant: Variant) -> Result<Self, AppError> {
        let datasets = load_datasets(&config, variant)?;
        let tree = build_main_layout(&config, variant, &datasets)?;

        let mut ctx = Self::new(config, tree);
        wire_up_handlers(&mut ctx, variant)?;

        info!(
            "Built {} dashboard: {} nodes, {} rules",
            variant,
            ctx.tree.node_count(),
            ctx.registry.len()
        );
        Ok(ctx)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn tree(&self) -> &Arc<ComponentTree> {
        &self.tree
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// Registers a rule; only allowed before `start()`
    pub fn register(&mut self, rule: BindingRule) -> Result<RuleHandle, AppError> {
        if self.state != Lifecycle::Registering {
            return Err(AppError::RegistrationClosed(self.state));
        }
        Ok(self.registry.register(rule)?)
    }

    /// Closes registration and runs every rule once on the initial values
    pub fn start(&mut self) -> Result<Dispatch, AppError> {
        self.expect_state(Lifecycle::Registering)?;
        self.state = Lifecycle::Running;

        info!("Dashboard started with {} rules", self.registry.len());
        let dispatch = self.registry.fire_initial();
        self.record(&dispatch);
        Ok(dispatch)
    }

    /// Delivers one input change
    pub fn handle_event(&mut self, event: InputEvent) -> Result<Dispatch, AppError> {
        self.expect_state(Lifecycle::Running)?;

        let dispatch = self.registry.notify(event.source, event.value)?;
        self.report.events += 1;
        self.record(&dispatch);
        Ok(dispatch)
    }

    pub fn notify(&mut self, source: PropertyRef, value: Value) -> Result<Dispatch, AppError> {
        self.handle_event(InputEvent { source, value })
    }

    /// Current value of a property: the latest produced or notified value,
    /// else its initial value from the tree
    pub fn current(&self, target: &PropertyRef) -> Option<Value> {
        self.registry.current(target)
    }

    /// Plain-text outline of the page with current values applied
    pub fn outline(&self) -> String {
        render_outline(&self.tree, &|target| self.registry.value(target).cloned())
    }

    /// Stops accepting events and reports totals; repeated calls return
    /// the same report
    pub fn shutdown(&mut self) -> ShutdownReport {
        if self.state != Lifecycle::ShutDown {
            self.state = Lifecycle::ShutDown;
            self.report.rules = self.registry.len();
            info!(
                "Dashboard shut down after {} events ({} changes, {} failures)",
                self.report.events, self.report.changes, self.report.failures
            );
        }
        self.report
    }

    fn expect_state(&self, expected: Lifecycle) -> Result<(), AppError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AppError::InvalidState(self.state, expected))
        }
    }

    fn record(&mut self, dispatch: &Dispatch) {
        self.report.changes += dispatch.changes.len();
        self.report.failures += dispatch.failures.len();
        debug!(
            "Dispatch: {} changes, {} failures",
            dispatch.changes.len(),
            dispatch.failures.len()
        );
    }
}
