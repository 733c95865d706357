//! The scope & binding tracker: a tree of function/program scopes built by
//! the resolution walk, then consulted (and extended) by the lowering pass
//! to invent collision-free names.
//!
//! Only function bodies and the program introduce scopes; everything the
//! pass emits is `var`-hoisted, so block-level granularity is unnecessary.

use super::syntax::Id;
use crate::keys;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(pub usize);

impl ScopeId {
    /// The program scope; always index 0 in the tree.
    pub const PROGRAM: ScopeId = ScopeId(0);
}

#[derive(Debug, Default)]
pub struct Scope {
    parent: Option<ScopeId>,
    /// names bound here: declarations, parameters, catch parameters,
    /// function names, and reserved temporaries
    bound: HashSet<Id>,
    /// names referenced here, including unbound references propagated up
    /// from inner scopes when they close
    referenced: HashSet<Id>,
    /// temporaries the allocator reserved in this scope, in allocation order
    temps: Vec<Id>,
}

#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    /// A tree holding only the program scope.
    pub fn new() -> ScopeTree {
        ScopeTree {
            scopes: vec![Scope::default()],
        }
    }

    /// Add a child scope and return its id.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        id
    }

    pub fn bind(&mut self, scope: ScopeId, name: impl Into<Id>) {
        self.scopes[scope.0].bound.insert(name.into());
    }

    pub fn reference(&mut self, scope: ScopeId, name: impl Into<Id>) {
        self.scopes[scope.0].referenced.insert(name.into());
    }

    /// True if `name` is bound in `scope` or any enclosing scope.
    pub fn declares(&self, scope: ScopeId, name: &str) -> bool {
        self.chain(scope).any(|s| s.bound.contains(name))
    }

    /// True if `name` is bound *or referenced* anywhere visible from
    /// `scope`; a fresh name must avoid both.
    fn taken(&self, scope: ScopeId, name: &str) -> bool {
        self.chain(scope)
            .any(|s| s.bound.contains(name) || s.referenced.contains(name))
    }

    /// Find the first of `base`, `base$1`, `base$2`, … that is neither a
    /// reserved word nor visible from `scope`, and bind it in `scope`
    /// permanently. `scope` is already the nearest function/program scope,
    /// since those are the only scopes in the tree.
    pub fn reserve(&mut self, scope: ScopeId, base: &str) -> Id {
        let mut candidate = base.to_string();
        let mut n = 0;
        while keys::is_reserved(&candidate) || self.taken(scope, &candidate) {
            n += 1;
            candidate = format!("{}${}", base, n);
        }
        self.scopes[scope.0].bound.insert(candidate.clone());
        candidate
    }

    /// Reserve a hoisted temporary in `scope`. The declaration is emitted
    /// later, once per scope, by the hoister.
    pub fn allocate(&mut self, scope: ScopeId) -> Id {
        let temp = self.reserve(scope, "obj");
        self.scopes[scope.0].temps.push(temp.clone());
        temp
    }

    pub fn temps(&self, scope: ScopeId) -> &[Id] {
        &self.scopes[scope.0].temps
    }

    /// Called by the resolution walk when `scope` closes: any name
    /// referenced here but not bound here stays visible to the parent, so
    /// the parent must not hand it out as a temporary.
    pub fn propagate_unbound(&mut self, scope: ScopeId) {
        let parent = match self.scopes[scope.0].parent {
            Some(p) => p,
            None => return,
        };
        let unbound: Vec<Id> = self.scopes[scope.0]
            .referenced
            .iter()
            .filter(|name| !self.scopes[scope.0].bound.contains(*name))
            .cloned()
            .collect();
        self.scopes[parent.0].referenced.extend(unbound);
    }

    fn chain(&self, scope: ScopeId) -> impl Iterator<Item = &Scope> {
        let mut next = Some(scope);
        std::iter::from_fn(move || {
            let scope = next?;
            let s = &self.scopes[scope.0];
            next = s.parent;
            Some(s)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn suffixes_count_up() {
        let mut scopes = ScopeTree::new();
        scopes.bind(ScopeId::PROGRAM, "obj");
        assert_eq!(scopes.reserve(ScopeId::PROGRAM, "obj"), "obj$1");
        assert_eq!(scopes.reserve(ScopeId::PROGRAM, "obj"), "obj$2");
    }

    #[test]
    fn references_block_reuse() {
        let mut scopes = ScopeTree::new();
        scopes.reference(ScopeId::PROGRAM, "obj");
        assert_eq!(scopes.reserve(ScopeId::PROGRAM, "obj"), "obj$1");
    }

    #[test]
    fn ancestors_are_visible() {
        let mut scopes = ScopeTree::new();
        scopes.bind(ScopeId::PROGRAM, "x");
        let inner = scopes.push_scope(ScopeId::PROGRAM);
        assert!(scopes.declares(inner, "x"));
        assert_eq!(scopes.reserve(inner, "x"), "x$1");
    }

    #[test]
    fn inner_references_propagate() {
        let mut scopes = ScopeTree::new();
        let inner = scopes.push_scope(ScopeId::PROGRAM);
        scopes.reference(inner, "obj");
        scopes.propagate_unbound(inner);
        assert_eq!(scopes.reserve(ScopeId::PROGRAM, "obj"), "obj$1");
    }

    #[test]
    fn reserved_words_start_suffixed() {
        let mut scopes = ScopeTree::new();
        assert_eq!(scopes.reserve(ScopeId::PROGRAM, "catch"), "catch$1");
        assert_eq!(scopes.reserve(ScopeId::PROGRAM, "catch"), "catch$2");
    }

    #[test]
    fn allocation_order_is_recorded() {
        let mut scopes = ScopeTree::new();
        let a = scopes.allocate(ScopeId::PROGRAM);
        let b = scopes.allocate(ScopeId::PROGRAM);
        assert_eq!(a, "obj");
        assert_eq!(b, "obj$1");
        assert_eq!(scopes.temps(ScopeId::PROGRAM), &["obj", "obj$1"]);
    }
}
