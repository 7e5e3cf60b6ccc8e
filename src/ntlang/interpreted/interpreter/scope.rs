use std::collections::{HashMap, HashSet};

use crate::ntlang::interpreted::ast::DeclaredType;
use crate::ntlang::interpreted::interpreter::value::Value;

#[derive(Debug, PartialEq, Clone)]
pub struct Symbol {
    pub tipo: DeclaredType,
    pub value: Value,
}

impl Symbol {
    pub fn new(tipo: DeclaredType, value: Value) -> Self { Symbol { tipo, value } }
}

/// The stack of lexical scopes, innermost last. Lookups scan from the
/// innermost scope outwards, so inner declarations shadow outer ones without
/// destroying them. The stack also remembers every name that was *ever*
/// declared, which lets the evaluator tell "out of scope" apart from
/// "never declared".
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, Symbol>>,
    ever_declared: HashSet<String>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack { scopes: Vec::new(), ever_declared: HashSet::new() }
    }

    pub fn enter(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn exit(&mut self) {
        self.scopes.pop().expect("Scope stack underflow");
    }

    /// Inserts into the innermost scope. Fails when the name already exists
    /// *in that scope*; shadowing an outer scope is fine.
    pub fn declare(&mut self, name: String, symbol: Symbol) -> Result<(), ()> {
        let scope = self.scopes.last_mut().expect("No active scope");
        if scope.contains_key(&name) {
            return Err(());
        }
        self.ever_declared.insert(name.clone());
        scope.insert(name, symbol);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.scopes.iter_mut().rev().find_map(|scope| scope.get_mut(name))
    }

    pub fn was_ever_declared(&self, name: &str) -> bool {
        self.ever_declared.contains(name)
    }
}
