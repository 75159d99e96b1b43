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

//! src/core/binding.rs
//!
//! Reactive binding registry
//!
//! A `BindingRule` links one or more input properties to a single output
//! property through a handler. The registry keeps:
//! - One rule per output target (`ConflictingOutput` otherwise)
//! - An input index so `notify` finds dependent rules in O(1)
//! - A value cache holding the latest known value of every property
//!
//! Handlers run synchronously inside `notify`. Outputs that feed other
//! rules cascade within the same call, in dependency order, with each
//! rule invoked at most once. A handler that
//! errors or panics is reported as a `HandlerError` and nothing else is
//! affected.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

use crate::core::tree::ComponentTree;
use crate::core::types::{NodeId, NodeKind, PropertyRef};

/// What a handler returns: the new output value, or why it could not be computed
pub type HandlerResult = anyhow::Result<Value>;

type Handler = Box<dyn Fn(&[Value]) -> HandlerResult>;

/// Link from input properties to one output property
pub struct BindingRule {
    name: String,
    output: PropertyRef,
    inputs: Vec<PropertyRef>,
    handler: Handler,
}

impl BindingRule {
    /// Creates a rule; the handler receives input values in declaration order
    ///
    /// # Example
    /// ```
    /// use reactive_dashboard::core::{BindingRule, PropertyRef};
    /// use serde_json::Value;
    ///
    /// let rule = BindingRule::new(
    ///     PropertyRef::new("my-output", "children"),
    ///     vec![PropertyRef::new("my-input", "value")],
    ///     |inputs| Ok(Value::String(format!("Output: {}", inputs[0]))),
    /// )
    /// .named("update_output_div");
    /// assert_eq!(rule.name(), "update_output_div");
    /// ```
    pub fn new<F>(output: PropertyRef, inputs: Vec<PropertyRef>, handler: F) -> Self
    where
        F: Fn(&[Value]) -> HandlerResult + 'static,
    {
        Self {
            name: format!("update {}", output),
            output,
            inputs,
            handler: Box::new(handler),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output(&self) -> &PropertyRef {
        &self.output
    }

    pub fn inputs(&self) -> &[PropertyRef] {
        &self.inputs
    }
}

impl fmt::Debug for BindingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRule")
            .field("name", &self.name)
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

/// Opaque handle of a registered rule
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RuleHandle(usize);

impl RuleHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a notification carrying the current value re-runs handlers
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    /// Every notification triggers dependent rules
    #[default]
    Always,
    /// Values equal to the cached one are dropped, inputs and outputs alike
    SkipUnchanged,
}

/// Registration and notification errors
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Unknown node '{0}'")]
    UnknownNode(NodeId),

    #[error("{kind} node '{node}' has no property '{property}'")]
    UnknownProperty {
        node: NodeId,
        kind: NodeKind,
        property: String,
    },

    #[error("Output {target} is already produced by rule '{existing}'")]
    ConflictingOutput { target: PropertyRef, existing: String },

    #[error("Rule '{rule}' declares no inputs")]
    NoInputs { rule: String },

    #[error("Rule '{rule}' would make {target} depend on itself")]
    CircularDependency { rule: String, target: PropertyRef },
}

/// A value arriving on an input property
#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    pub source: PropertyRef,
    pub value: Value,
}

/// A new value produced for an output property
#[derive(Clone, Debug, PartialEq)]
pub struct OutputChange {
    pub rule: RuleHandle,
    pub target: PropertyRef,
    pub value: Value,
}

/// A handler that failed or panicked
#[derive(Clone, Debug, Error, PartialEq)]
#[error("Rule '{rule_name}' ({rule}) failed to update {output} after {}: {message}", .trigger.source)]
pub struct HandlerError {
    pub rule: RuleHandle,
    pub rule_name: String,
    pub output: PropertyRef,
    pub trigger: InputEvent,
    pub message: String,
}

/// Everything one notification produced, in invocation order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dispatch {
    pub changes: Vec<OutputChange>,
    pub failures: Vec<HandlerError>,
}

impl Dispatch {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.failures.is_empty()
    }

    fn merge(&mut self, other: Dispatch) {
        self.changes.extend(other.changes);
        self.failures.extend(other.failures);
    }
}

/// Registry of binding rules over one component tree
pub struct BindingRegistry {
    tree: Arc<ComponentTree>,
    rules: Vec<BindingRule>,
    /// Output target → producing rule
    outputs: HashMap<PropertyRef, RuleHandle>,
    /// Input source → rules reading it, in registration order
    dependents: HashMap<PropertyRef, Vec<RuleHandle>>,
    /// Latest value of every notified or produced property
    values: HashMap<PropertyRef, Value>,
    policy: NotifyPolicy,
}

impl BindingRegistry {
    pub fn new(tree: Arc<ComponentTree>) -> Self {
        Self::with_policy(tree, NotifyPolicy::default())
    }

    pub fn with_policy(tree: Arc<ComponentTree>, policy: NotifyPolicy) -> Self {
        Self {
            tree,
            rules: Vec::new(),
            outputs: HashMap::new(),
            dependents: HashMap::new(),
            values: HashMap::new(),
            policy,
        }
    }

    pub fn tree(&self) -> &Arc<ComponentTree> {
        &self.tree
    }

    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule(&self, handle: RuleHandle) -> Option<&BindingRule> {
        self.rules.get(handle.0)
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleHandle, &BindingRule)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (RuleHandle(index), rule))
    }

    /// Rule producing `target`, if any
    pub fn producer(&self, target: &PropertyRef) -> Option<RuleHandle> {
        self.outputs.get(target).copied()
    }

    /// Rules that read `source`
    pub fn rules_for_input(&self, source: &PropertyRef) -> &[RuleHandle] {
        self.dependents
            .get(source)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cached value of a property, if one was notified or produced
    pub fn value(&self, target: &PropertyRef) -> Option<&Value> {
        self.values.get(target)
    }

    /// Current value: the cached one, else the initial value from the tree
    pub fn current(&self, target: &PropertyRef) -> Option<Value> {
        self.values
            .get(target)
            .cloned()
            .or_else(|| self.tree.initial_value(target))
    }

    /// Registers a rule
    ///
    /// # Errors
    ///
    /// - `RegistryError::NoInputs` if the rule has no inputs
    /// - `RegistryError::UnknownNode` / `UnknownProperty` if a referenced
    ///   property does not exist in the tree
    /// - `RegistryError::ConflictingOutput` if another rule already
    ///   produces the same output
    /// - `RegistryError::CircularDependency` if the output feeds back into
    ///   one of the rule's own inputs
    pub fn register(&mut self, rule: BindingRule) -> Result<RuleHandle, RegistryError> {
        if rule.inputs.is_empty() {
            return Err(RegistryError::NoInputs { rule: rule.name });
        }

        self.check_property(&rule.output)?;
        for input in &rule.inputs {
            self.check_property(input)?;
        }

        if let Some(existing) = self.producer(&rule.output) {
            return Err(RegistryError::ConflictingOutput {
                target: rule.output,
                existing: self.rules[existing.0].name.clone(),
            });
        }

        if let Some(target) = self.find_cycle(&rule) {
            return Err(RegistryError::CircularDependency {
                rule: rule.name,
                target,
            });
        }

        let handle = RuleHandle(self.rules.len());
        self.outputs.insert(rule.output.clone(), handle);

        // A rule reading the same source twice is still triggered once
        let mut seen = HashSet::new();
        for input in rule.inputs.iter().filter(|input| seen.insert(*input)) {
            self.dependents
                .entry(input.clone())
                .or_default()
                .push(handle);
        }

        debug!(
            "Registered rule '{}' {}: {} <- [{}]",
            rule.name,
            handle,
            rule.output,
            join(&rule.inputs)
        );
        self.rules.push(rule);

        Ok(handle)
    }

    /// Delivers a new value for an input property
    ///
    /// Every rule downstream of `source` runs at most once, after the rules
    /// producing its inputs, so it never mixes a fresh input with a stale
    /// one. A rule runs only if one of its inputs changed during the call
    /// and all of them have a known value.
    ///
    /// # Errors
    ///
    /// `RegistryError::UnknownNode` / `UnknownProperty` if `source` does not
    /// exist in the tree. Handler failures are not errors here; they are
    /// collected in `Dispatch::failures`.
    pub fn notify(&mut self, source: PropertyRef, value: Value) -> Result<Dispatch, RegistryError> {
        self.check_property(&source)?;

        if self.policy == NotifyPolicy::SkipUnchanged && self.values.get(&source) == Some(&value)
        {
            debug!("Skipping unchanged value for {}", source);
            return Ok(Dispatch::default());
        }

        debug!("Notify {} = {}", source, value);
        self.values.insert(source.clone(), value);

        let affected = self.downstream_of(&source);
        let mut changed = HashSet::from([source]);
        let mut dispatch = Dispatch::default();

        for handle in self.dependency_order() {
            if !affected.contains(&handle) {
                continue;
            }

            // Only rules with at least one input that changed in this call
            let Some(trigger) = self.rules[handle.0]
                .inputs
                .iter()
                .find(|input| changed.contains(*input))
                .cloned()
            else {
                continue;
            };

            let Some(inputs) = self.input_values(handle) else {
                debug!(
                    "Rule {} not invoked: some inputs have no value yet",
                    handle
                );
                continue;
            };

            let event = InputEvent {
                value: self.values.get(&trigger).cloned().unwrap_or(Value::Null),
                source: trigger,
            };
            let step = self.run(handle, &inputs, &event);
            changed.extend(step.changes.iter().map(|change| change.target.clone()));
            dispatch.merge(step);
        }

        Ok(dispatch)
    }

    /// Runs every rule once in dependency order, as on page load
    ///
    /// Inputs without a cached value are seeded from the tree's initial
    /// values. A rule reading another rule's output sees the value that
    /// rule just produced.
    pub fn fire_initial(&mut self) -> Dispatch {
        let mut dispatch = Dispatch::default();

        for handle in self.dependency_order() {
            let inputs: Vec<PropertyRef> = self.rules[handle.0].inputs.clone();
            for input in &inputs {
                if !self.values.contains_key(input) {
                    let initial = self.tree.initial_value(input).unwrap_or(Value::Null);
                    self.values.insert(input.clone(), initial);
                }
            }

            let values: Vec<Value> = inputs
                .iter()
                .map(|input| self.values.get(input).cloned().unwrap_or(Value::Null))
                .collect();
            let trigger = InputEvent {
                source: inputs[0].clone(),
                value: values[0].clone(),
            };

            dispatch.merge(self.run(handle, &values, &trigger));
        }

        debug!(
            "Initial dispatch: {} changes, {} failures",
            dispatch.changes.len(),
            dispatch.failures.len()
        );
        dispatch
    }

    fn check_property(&self, target: &PropertyRef) -> Result<(), RegistryError> {
        let node = self
            .tree
            .get(target.node.as_str())
            .ok_or_else(|| RegistryError::UnknownNode(target.node.clone()))?;

        if node.kind().exposes(&target.property) {
            Ok(())
        } else {
            Err(RegistryError::UnknownProperty {
                node: target.node.clone(),
                kind: node.kind(),
                property: target.property.clone(),
            })
        }
    }

    /// Every rule reachable from `source` through rule outputs
    fn downstream_of(&self, source: &PropertyRef) -> HashSet<RuleHandle> {
        let mut affected = HashSet::new();
        let mut queue = VecDeque::from([source]);

        while let Some(target) = queue.pop_front() {
            for &handle in self.rules_for_input(target) {
                if affected.insert(handle) {
                    queue.push_back(&self.rules[handle.0].output);
                }
            }
        }

        affected
    }

    /// Walks downstream from the new rule's output; reaching one of its
    /// inputs means the rule would close a cycle
    fn find_cycle(&self, rule: &BindingRule) -> Option<PropertyRef> {
        let inputs: HashSet<&PropertyRef> = rule.inputs.iter().collect();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([&rule.output]);

        while let Some(target) = queue.pop_front() {
            if inputs.contains(target) {
                return Some(target.clone());
            }
            if !visited.insert(target) {
                continue;
            }
            for handle in self.rules_for_input(target) {
                queue.push_back(&self.rules[handle.0].output);
            }
        }

        None
    }

    /// Rules ordered so producers come before the rules reading their
    /// outputs; ties keep registration order
    fn dependency_order(&self) -> Vec<RuleHandle> {
        let mut pending: Vec<usize> = self
            .rules
            .iter()
            .map(|rule| {
                rule.inputs
                    .iter()
                    .filter(|input| self.outputs.contains_key(*input))
                    .count()
            })
            .collect();

        let mut ready: VecDeque<RuleHandle> = (0..self.rules.len())
            .filter(|&index| pending[index] == 0)
            .map(RuleHandle)
            .collect();
        let mut order = Vec::with_capacity(self.rules.len());

        while let Some(handle) = ready.pop_front() {
            order.push(handle);
            for &dependent in self.rules_for_input(&self.rules[handle.0].output) {
                let inputs = &self.rules[dependent.0].inputs;
                let reads = inputs
                    .iter()
                    .filter(|input| **input == self.rules[handle.0].output)
                    .count();
                pending[dependent.0] -= reads;
                if pending[dependent.0] == 0 {
                    ready.push_back(dependent);
                }
            }
        }

        order
    }

    /// Current values of a rule's inputs, or `None` if one is unknown
    ///
    /// A value is known once it has been notified or produced, or when the
    /// tree gives the property a non-null initial value.
    fn input_values(&self, handle: RuleHandle) -> Option<Vec<Value>> {
        self.rules[handle.0]
            .inputs
            .iter()
            .map(|input| match self.values.get(input) {
                Some(value) => Some(value.clone()),
                None => self
                    .tree
                    .initial_value(input)
                    .filter(|value| !value.is_null()),
            })
            .collect()
    }

    /// Invokes one handler and applies its result to the value cache
    ///
    /// Under `SkipUnchanged` an output equal to the cached value is dropped
    /// and does not cascade.
    fn run(&mut self, handle: RuleHandle, inputs: &[Value], trigger: &InputEvent) -> Dispatch {
        let rule = &self.rules[handle.0];
        let mut dispatch = Dispatch::default();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (rule.handler)(inputs)));
        let message = match outcome {
            Ok(Ok(value)) => {
                let target = rule.output.clone();
                if self.policy == NotifyPolicy::SkipUnchanged
                    && self.values.get(&target) == Some(&value)
                {
                    debug!("Rule {} left {} unchanged", handle, target);
                    return dispatch;
                }

                debug!("Rule {} set {} = {}", handle, target, value);
                self.values.insert(target.clone(), value.clone());
                dispatch.changes.push(OutputChange {
                    rule: handle,
                    target,
                    value,
                });
                return dispatch;
            }
            Ok(Err(error)) => format!("{:#}", error),
            Err(payload) => panic_message(payload.as_ref()),
        };

        let failure = HandlerError {
            rule: handle,
            rule_name: rule.name.clone(),
            output: rule.output.clone(),
            trigger: trigger.clone(),
            message,
        };
        warn!("{}", failure);
        dispatch.failures.push(failure);
        dispatch
    }
}

impl fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("rules", &self.rules)
            .field("policy", &self.policy)
            .field("values", &self.values.len())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("handler panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("handler panicked: {}", message)
    } else {
        "handler panicked".to_string()
    }
}

fn join(refs: &[PropertyRef]) -> String {
    refs.iter()
        .map(PropertyRef::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
