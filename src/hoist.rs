//! Declares the temporaries the lowering pass allocated: one uninitialized
//! `var obj, obj$1;` statement at the top of each scope that used any.

use super::constructors::*;
use super::scope::{ScopeId, ScopeTree};
use super::syntax::*;
use super::walk::*;

pub fn declare_temps(program: &mut Stmt, scopes: &ScopeTree) {
    let temps = scopes.temps(ScopeId::PROGRAM);
    if !temps.is_empty() {
        prepend_decl(program, temps);
    }
    let mut v = DeclareTemps { scopes };
    program.walk(&mut v);
}

struct DeclareTemps<'a> {
    scopes: &'a ScopeTree,
}

impl<'a> Visitor for DeclareTemps<'a> {
    fn enter_fn(&mut self, func: &mut Func, _loc: &Loc) {
        let temps = self.scopes.temps(func.resolved_scope());
        if !temps.is_empty() {
            prepend_decl(&mut func.body, temps);
        }
    }
}

fn prepend_decl(body: &mut Stmt, temps: &[Id]) {
    let decl = vardecl_uninit_(temps.to_vec());
    match body {
        Stmt::Block(stmts) => stmts.insert(0, decl),
        other => {
            let rest = other.take();
            *other = Stmt::Block(vec![decl, rest]);
        }
    }
}
