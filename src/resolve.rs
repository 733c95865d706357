//! Scope resolution: one walk over the whole program that records every
//! binding and every identifier reference into a [ScopeTree], and stamps
//! each function with the scope its body introduces.
//!
//! Lowering runs after this, so a generated name can avoid a `var` that
//! appears later in the source than the literal being rewritten.

use super::syntax::*;
use super::walk::*;
use crate::scope::{ScopeId, ScopeTree};

pub fn resolve(program: &mut Stmt) -> ScopeTree {
    let mut v = Resolve {
        scopes: ScopeTree::new(),
        stack: vec![ScopeId::PROGRAM],
    };
    program.walk(&mut v);
    v.scopes
}

struct Resolve {
    scopes: ScopeTree,
    stack: Vec<ScopeId>,
}

impl Resolve {
    fn current(&self) -> ScopeId {
        *self.stack.last().unwrap()
    }
}

impl Visitor for Resolve {
    fn enter_stmt(&mut self, stmt: &mut Stmt, _loc: &Loc) {
        let scope = self.current();
        match stmt {
            Stmt::VarDecl(decls) => {
                for decl in decls {
                    self.scopes.bind(scope, decl.name.clone());
                }
            }
            Stmt::Func(name, _) => self.scopes.bind(scope, name.clone()),
            Stmt::ForIn(true, x, ..) => self.scopes.bind(scope, x.clone()),
            Stmt::ForIn(false, x, ..) => self.scopes.reference(scope, x.clone()),
            // catch parameters are block-scoped, but a generated name must
            // still avoid them, so treat them as bound here
            Stmt::Catch(_, exn_name, _) => self.scopes.bind(scope, exn_name.clone()),
            Stmt::For(ForInit::Decl(decls), ..) => {
                for decl in decls {
                    self.scopes.bind(scope, decl.name.clone());
                }
            }
            _ => (),
        }
    }

    fn enter_expr(&mut self, expr: &mut Expr, _loc: &Loc) {
        let scope = self.current();
        match expr {
            Expr::Id(x) => self.scopes.reference(scope, x.clone()),
            // bare-identifier assignment targets are not walked as
            // expressions, so record them here
            Expr::Assign(_, lv, _) | Expr::UnaryAssign(_, lv) => {
                if let LValue::Id(x) = &**lv {
                    self.scopes.reference(scope, x.clone());
                }
            }
            _ => (),
        }
    }

    fn enter_fn(&mut self, func: &mut Func, _loc: &Loc) {
        let scope = self.scopes.push_scope(self.current());
        func.scope = Some(scope);
        if let Some(name) = &func.name {
            self.scopes.bind(scope, name.clone());
        }
        for param in &func.params {
            self.scopes.bind(scope, param.clone());
        }
        self.stack.push(scope);
    }

    fn exit_fn(&mut self, _func: &mut Func, _loc: &Loc) {
        let scope = self.stack.pop().unwrap();
        self.scopes.propagate_unbound(scope);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn later_declarations_are_visible() {
        let mut ast = parse("f(); var obj = 1;").unwrap();
        let mut scopes = resolve(&mut ast);
        assert!(scopes.declares(ScopeId::PROGRAM, "obj"));
        assert_eq!(scopes.reserve(ScopeId::PROGRAM, "obj"), "obj$1");
    }

    #[test]
    fn function_bodies_get_their_own_scope() {
        let mut ast = parse("function f(a) { var b = a; }").unwrap();
        let scopes = resolve(&mut ast);
        let f_scope = match &ast {
            Stmt::Block(stmts) => match &stmts[0] {
                Stmt::Func(_, f) => f.resolved_scope(),
                _ => panic!("expected function declaration"),
            },
            _ => panic!("expected program block"),
        };
        assert!(f_scope != ScopeId::PROGRAM);
        assert!(scopes.declares(f_scope, "a"));
        assert!(scopes.declares(f_scope, "b"));
        assert!(!scopes.declares(ScopeId::PROGRAM, "b"));
    }

    #[test]
    fn inner_free_references_reach_the_program_scope() {
        let mut ast = parse("var f = function () { return obj; };").unwrap();
        let mut scopes = resolve(&mut ast);
        assert_eq!(scopes.reserve(ScopeId::PROGRAM, "obj"), "obj$1");
    }
}
