use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use crate::{
    ast::{ast::Node, value::Value},
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// What a reserved name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Declared with `global`, no value yet.
    Void,
    /// Declared but not evaluated yet: an assignment waiting for the folding
    /// pass, or a function declaration.
    Pending(Node),
    Value(Value),
    /// Folding was attempted and failed.
    Unresolved(String),
}

impl Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Void => write!(f, "void"),
            Binding::Pending(node) => write!(f, "pending {}", node),
            Binding::Value(value) => write!(f, "{}", value),
            Binding::Unresolved(_) => write!(f, "unresolved"),
        }
    }
}

/// Flat name table shared by the whole parse.
///
/// There are no nested frames: a name reserved anywhere (including inside a
/// function body) is visible everywhere afterwards, and reserving it again
/// overwrites the previous binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    names: HashMap<String, Binding>,
    globals: HashSet<String>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            names: HashMap::new(),
            globals: HashSet::new(),
        }
    }

    pub fn reserve(&mut self, name: &str, binding: Binding) {
        self.names.insert(name.to_string(), binding);
    }

    pub fn declare_global(&mut self, name: &str) {
        self.globals.insert(name.to_string());
        self.reserve(name, Binding::Void);
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&Binding, Error> {
        self.names.get(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnresolvedName {
                    name: name.to_string(),
                },
                Position::null(),
            )
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Bindings sorted by name.
    pub fn bindings(&self) -> Vec<(&str, &Binding)> {
        let mut bindings: Vec<(&str, &Binding)> = self
            .names
            .iter()
            .map(|(name, binding)| (name.as_str(), binding))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<String> = self
            .bindings()
            .iter()
            .map(|(name, binding)| format!("{}: {}", name, binding))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}
