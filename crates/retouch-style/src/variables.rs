//! CSS custom properties: registry and per-override bindings.
//!
//! Variables come from two places: discovery (scanning `:root` rules in the
//! page's stylesheets) and user creation in the panel. Only user-created
//! variables are deletable. A bound override stores `var(--name)` and keeps
//! its last literal for restore-on-unbind; displayed values dereference the
//! registry live, so editing a variable propagates everywhere without
//! touching stored text.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Where a variable came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableOrigin {
    /// Found in a `:root` rule of a page stylesheet.
    Discovered,
    /// Created by the user in the panel.
    UserCreated,
}

/// A named custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVariable {
    /// Canonical name including the `--` prefix.
    pub name: String,
    /// Current value.
    pub value: String,
    pub origin: VariableOrigin,
}

/// Normalize a variable name to its canonical `--name` form.
fn canonical(name: &str) -> String {
    if name.starts_with("--") {
        name.to_string()
    } else {
        format!("--{}", name)
    }
}

/// All known variables, keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    variables: BTreeMap<String, CssVariable>,
}

impl VariableRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record variables found in `:root` rules.
    ///
    /// A name the user already created keeps its user origin and value;
    /// re-discovery refreshes discovered variables only.
    pub fn record_discovered(
        &mut self,
        declarations: impl IntoIterator<Item = (String, String)>,
    ) {
        for (name, value) in declarations {
            let name = canonical(&name);
            match self.variables.get(&name) {
                Some(existing) if existing.origin == VariableOrigin::UserCreated => continue,
                _ => {
                    self.variables.insert(
                        name.clone(),
                        CssVariable {
                            name,
                            value,
                            origin: VariableOrigin::Discovered,
                        },
                    );
                }
            }
        }
    }

    /// Create (or overwrite) a user variable.
    pub fn create(&mut self, name: &str, value: impl Into<String>) {
        let name = canonical(name);
        self.variables.insert(
            name.clone(),
            CssVariable {
                name,
                value: value.into(),
                origin: VariableOrigin::UserCreated,
            },
        );
    }

    /// Update a variable's value.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let name = canonical(name);
        match self.variables.get_mut(&name) {
            Some(var) => {
                var.value = value.into();
                Ok(())
            }
            None => Err(Error::unknown_variable(name)),
        }
    }

    /// Delete a user-created variable.
    ///
    /// Discovered variables belong to the page and cannot be deleted.
    pub fn delete(&mut self, name: &str) -> Result<CssVariable> {
        let name = canonical(name);
        match self.variables.remove(&name) {
            None => Err(Error::unknown_variable(name)),
            Some(var) if var.origin == VariableOrigin::Discovered => {
                self.variables.insert(name.clone(), var);
                Err(Error::VariableNotDeletable { name })
            }
            Some(var) => Ok(var),
        }
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&CssVariable> {
        self.variables.get(&canonical(name))
    }

    /// Whether a variable exists.
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(&canonical(name))
    }

    /// Iterate variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CssVariable> {
        self.variables.values()
    }

    /// Iterate user-created variables in name order.
    pub fn user_created(&self) -> impl Iterator<Item = &CssVariable> {
        self.variables
            .values()
            .filter(|v| v.origin == VariableOrigin::UserCreated)
    }
}

/// A live binding from one override to a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Canonical variable name.
    pub variable: String,
    /// The literal value the override held before binding.
    pub saved_literal: String,
}

/// Per-(selector, property) variable bindings.
#[derive(Debug, Clone, Default)]
pub struct VariableBindingIndex {
    bindings: BTreeMap<(String, String), Binding>,
}

impl VariableBindingIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a (selector, property) pair to a variable, retaining the
    /// previous literal for restore.
    pub fn bind(
        &mut self,
        selector: &str,
        property: &str,
        variable: &str,
        saved_literal: impl Into<String>,
    ) {
        self.bindings.insert(
            (selector.to_string(), property.to_string()),
            Binding {
                variable: canonical(variable),
                saved_literal: saved_literal.into(),
            },
        );
    }

    /// Remove a binding, returning it so the literal can be restored.
    pub fn unbind(&mut self, selector: &str, property: &str) -> Option<Binding> {
        self.bindings
            .remove(&(selector.to_string(), property.to_string()))
    }

    /// The binding for a pair, if any.
    pub fn get(&self, selector: &str, property: &str) -> Option<&Binding> {
        self.bindings
            .get(&(selector.to_string(), property.to_string()))
    }

    /// Every (selector, property) pair bound to a variable.
    pub fn bound_to(&self, variable: &str) -> Vec<(String, String)> {
        let name = canonical(variable);
        self.bindings
            .iter()
            .filter(|(_, binding)| binding.variable == name)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Drop the binding for a removed property without restoring.
    pub fn remove_property(&mut self, selector: &str, property: &str) {
        self.bindings
            .remove(&(selector.to_string(), property.to_string()));
    }

    /// Move bindings under a renamed selector key.
    pub fn rename_selector(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        let moved: Vec<(String, Binding)> = self
            .bindings
            .iter()
            .filter(|((sel, _), _)| sel == old)
            .map(|((_, prop), binding)| (prop.clone(), binding.clone()))
            .collect();
        self.bindings.retain(|(sel, _), _| sel != old);
        for (prop, binding) in moved {
            self.bindings.insert((new.to_string(), prop), binding);
        }
    }

    /// Drop every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

/// The stored value for a bound override.
pub fn var_reference(name: &str) -> String {
    format!("var({})", canonical(name))
}
