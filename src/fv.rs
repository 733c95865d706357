//! Free-variable analysis for function bodies.
//!
//! `free_vars(func)` is the set of identifiers read or written inside the
//! body that are not bound by the function's own parameters, declarations,
//! or its own name. The name synthesizer must consult this before naming a
//! method: naming the function after an identifier its body reads freely
//! would silently rebind that identifier.

use super::syntax::*;
use im_rc::HashSet as ImmHashSet;

pub type IdSet = ImmHashSet<Id>;

fn empty() -> IdSet {
    IdSet::new()
}

/// Free variables of `f` seen from its enclosing scope. The function's own
/// name is a scope frame of its own and is subtracted along with the
/// parameters.
pub fn free_vars(f: &Func) -> IdSet {
    let (declared, referenced) = var_summary(&f.body);
    let mut fv = referenced.relative_complement(declared);
    for p in &f.params {
        fv.remove(p);
    }
    if let Some(name) = &f.name {
        fv.remove(name);
    }
    fv
}

fn fv_lv(lv: &LValue) -> IdSet {
    use LValue::*;
    match lv {
        Id(x) => IdSet::unit(x.clone()),
        Dot(e, _) => fv_expr(e),
        Bracket(e1, e2) => fv_expr(e1).union(fv_expr(e2)),
    }
}

/// `var_summary(stmt) = (declared_vars, referenced_vars)`. Nested functions
/// contribute only their free variables to `referenced`; their own
/// bindings never escape.
fn var_summary(stmt: &Stmt) -> (IdSet, IdSet) {
    use Stmt::*;
    match stmt {
        Block(stmts) => {
            let (declared, referenced): (Vec<_>, Vec<_>) =
                stmts.iter().map(var_summary).unzip();
            (
                IdSet::unions(declared.into_iter()),
                IdSet::unions(referenced.into_iter()),
            )
        }
        Empty | Break(_) | Continue(_) => (empty(), empty()),
        Expr(e) | Throw(e) | Return(e) => (empty(), fv_expr(e)),
        If(cond, true_part, false_part) => {
            let (declared_in_true, referenced_in_true) = var_summary(true_part);
            let (declared_in_false, referenced_in_false) = var_summary(false_part);
            (
                declared_in_true.union(declared_in_false),
                fv_expr(cond)
                    .union(referenced_in_true)
                    .union(referenced_in_false),
            )
        }
        Switch(disc, cases, default) => {
            let (mut declared, mut referenced) = var_summary(default);
            referenced = referenced.union(fv_expr(disc));
            for (test, body) in cases {
                let (d, r) = var_summary(body);
                declared = declared.union(d);
                referenced = referenced.union(fv_expr(test)).union(r);
            }
            (declared, referenced)
        }
        While(e, s) | DoWhile(s, e) => {
            let (declared, referenced) = var_summary(s);
            (declared, referenced.union(fv_expr(e)))
        }
        For(init, test, update, body) => {
            let (mut declared, mut referenced) = var_summary(body);
            match init {
                ForInit::Expr(e) => referenced = referenced.union(fv_expr(e)),
                ForInit::Decl(decls) => {
                    let (d, r) = decl_summary(decls);
                    declared = declared.union(d);
                    referenced = referenced.union(r);
                }
            }
            (
                declared,
                referenced.union(fv_expr(test)).union(fv_expr(update)),
            )
        }
        ForIn(is_var, x, e, s) => {
            let (mut declared, mut referenced) = var_summary(s);
            if *is_var {
                declared.insert(x.clone());
            } else {
                referenced.insert(x.clone());
            }
            (declared, referenced.union(fv_expr(e)))
        }
        Label(_, s) => var_summary(s),
        Catch(body, exn_name, catch_body) => {
            let (declared_in_body, referenced_in_body) = var_summary(body);
            let (declared_in_catch, referenced_in_catch) = var_summary(catch_body);
            (
                declared_in_body.union(declared_in_catch),
                referenced_in_body.union(referenced_in_catch.without(exn_name)),
            )
        }
        Finally(body, finally_body) => {
            let (declared_in_body, referenced_in_body) = var_summary(body);
            let (declared_in_finally, referenced_in_finally) = var_summary(finally_body);
            (
                declared_in_body.union(declared_in_finally),
                referenced_in_body.union(referenced_in_finally),
            )
        }
        VarDecl(decls) => decl_summary(decls),
        Func(name, f) => (IdSet::unit(name.clone()), free_vars(f)),
    }
}

fn decl_summary(decls: &[VarDecl]) -> (IdSet, IdSet) {
    let mut declared = empty();
    let mut referenced = empty();
    for d in decls {
        declared.insert(d.name.clone());
        if let Some(init) = &d.init {
            referenced = referenced.union(fv_expr(init));
        }
    }
    (declared, referenced)
}

fn fv_expr(expr: &Expr) -> IdSet {
    use Expr::*;
    match expr {
        Lit(_) | This => empty(),
        Id(x) => IdSet::unit(x.clone()),
        Array(es) | Seq(es) => IdSet::unions(es.iter().map(fv_expr)),
        Object(props) => IdSet::unions(props.iter().map(|p| {
            let key_fv = match &p.key {
                Key::Computed(e) => fv_expr(e),
                _ => empty(),
            };
            key_fv.union(fv_expr(&p.value))
        })),
        Dot(e, _) | Unary(_, e) => fv_expr(e),
        Bracket(e1, e2) | Binary(_, e1, e2) => fv_expr(e1).union(fv_expr(e2)),
        UnaryAssign(_, lv) => fv_lv(lv),
        Assign(_, lv, e) => fv_lv(lv).union(fv_expr(e)),
        If(c, t, e) => fv_expr(c).union(fv_expr(t)).union(fv_expr(e)),
        New(e, es) | Call(e, es) => fv_expr(e).union(IdSet::unions(es.iter().map(fv_expr))),
        Func(f) => free_vars(f),
        Yield(arg, _) => arg.as_ref().map_or_else(empty, |e| fv_expr(e)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse;

    /// Free variables of the first function expression statement in `src`.
    fn fv_of(src: &str) -> IdSet {
        let ast = parse(src).unwrap();
        if let Stmt::Block(stmts) = &ast {
            if let Some(Stmt::Expr(e)) = stmts.first() {
                if let Expr::Func(f) = &**e {
                    return free_vars(f);
                }
            }
        }
        panic!("test program must start with a function expression statement");
    }

    fn set(names: &[&str]) -> IdSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn params_and_locals_are_bound() {
        let fv = fv_of("(function (a) { var b = a; return a + b + c; });");
        assert_eq!(fv, set(&["c"]));
    }

    #[test]
    fn own_name_is_a_scope_frame() {
        let fv = fv_of("(function f() { return f(x); });");
        assert_eq!(fv, set(&["x"]));
    }

    #[test]
    fn nested_function_bindings_do_not_escape() {
        let fv = fv_of("(function () { var g = function (y) { return y + z; }; return g; });");
        assert_eq!(fv, set(&["z"]));
    }

    #[test]
    fn catch_parameter_is_bound_in_handler() {
        let fv = fv_of("(function () { try { work(); } catch (e) { log(e); } });");
        assert_eq!(fv, set(&["work", "log"]));
    }

    #[test]
    fn writes_count_as_references() {
        let fv = fv_of("(function () { counter += 1; });");
        assert_eq!(fv, set(&["counter"]));
    }

    #[test]
    fn computed_keys_are_scanned() {
        let fv = fv_of("(function (v) { return { [k]: v }; });");
        assert_eq!(fv, set(&["k"]));
    }
}
