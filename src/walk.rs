//! A visitor for the AST, with enough context to insert statements.

use super::syntax::*;
use std::cell::RefCell;

/// Statements, expressions, and functions have a `walk` method that receives
/// an implementation of this `Visitor` trait.
///
/// Each method has a default implementation that does nothing, so you only
/// need to define the methods that you need. To build a visitor, define a
/// type `T` that holds the visitor state, and then write
/// `impl Visitor for T { ... }` — note that you need a new type for
/// stateless visitors too.
pub trait Visitor {
    /// called before recursing on a statement
    fn enter_stmt(&mut self, _stmt: &mut Stmt, _loc: &Loc) {}
    /// called before recursing on an expression
    fn enter_expr(&mut self, _expr: &mut Expr, _loc: &Loc) {}
    /// called after recursing on a statement, with the new value
    fn exit_stmt(&mut self, _stmt: &mut Stmt, _loc: &Loc) {}
    /// called after recursing on an expression, with the new value
    fn exit_expr(&mut self, _expr: &mut Expr, _loc: &Loc) {}
    /// called before recursing on a function body
    fn enter_fn(&mut self, _func: &mut Func, _loc: &Loc) {}
    /// called after recursing on a function body
    fn exit_fn(&mut self, _func: &mut Func, _loc: &Loc) {}
}

struct VisitorState<'v, V> {
    visitor: &'v mut V,
}

#[derive(Debug)]
pub struct BlockContext {
    pub index: usize,
    pub len: usize,
    patches: RefCell<Vec<(usize, Stmt)>>,
}

impl BlockContext {
    pub fn new(index: usize, len: usize) -> Self {
        BlockContext {
            index,
            len,
            patches: RefCell::new(vec![]),
        }
    }

    /// Insert `stmt` at position `index` into the block. The position 0 is
    /// before the first element, and the last position is after the last
    /// element. E.g., if the block has statements `[s0, s1, s2]` then the
    /// indices are `[0, s0, 1, s1, 2, s2, 3]`.
    ///
    /// You can insert multiple statements at the same index; they will
    /// appear in the order they were added.
    ///
    /// Panics if the index is invalid.
    pub fn insert(&self, index: usize, stmt: Stmt) {
        assert!(index <= self.len);
        self.patches.borrow_mut().push((index, stmt));
    }

    fn apply_patches(mut self, block: &mut Vec<Stmt>) {
        // Patches must land in the order they were added. Stable-sort the
        // indices ascending, then insert from the back so earlier
        // insertions don't shift later ones.
        let patches = self.patches.get_mut();
        patches.sort_by(|(m, _), (n, _)| m.cmp(n));
        for (index, stmt) in patches.drain(0..).rev() {
            block.insert(index, stmt);
        }
    }
}

/// A single level of a context.
#[derive(Debug)]
pub enum Context<'a> {
    /// Within a block statement. The `BlockContext` type has methods that
    /// allow the visitor to add statements to the block.
    Block(&'a BlockContext),
    /// The initializer of a variable declarator. `lone` is true when the
    /// declarator is the only one in its `var` statement.
    VarDeclRhs { name: &'a Id, lone: bool },
    Switch,
    Loop,
    /// Within the context of a statement of an unknown kind.
    Stmt,
    /// Within the right-hand side of an assignment expression.
    AssignRhs,
    /// Within the context of an expression of an unknown kind.
    Expr,
    /// Within the left-hand side of an assignment expression.
    LValue,
    /// Within a function body.
    FunctionBody,
}

/// The context of a call to a visitor: the chain of enclosing nodes.
///
/// For example, in a call to `exit_expr(&mut self, expr, loc)`, if `loc` is
/// `Loc::Node(Context::Block(..), ..)` then `expr` is immediately within a
/// block statement.
#[derive(Debug)]
pub enum Loc<'a> {
    Top,
    Node(Context<'a>, &'a Loc<'a>),
}

impl<'v, V> VisitorState<'v, V>
where
    V: Visitor,
{
    pub fn new(visitor: &'v mut V) -> Self {
        VisitorState { visitor }
    }

    pub fn walk_stmt(&mut self, stmt: &mut Stmt, loc: &Loc) {
        use Stmt::*;
        self.visitor.enter_stmt(stmt, loc);
        match stmt {
            // 0
            Empty | Break(_) | Continue(_) => (),
            // 1xStmt
            Label(.., a) => {
                let loc = Loc::Node(Context::Stmt, loc);
                self.walk_stmt(a, &loc);
            }
            Func(.., f) => self.walk_fn(f, loc),
            // 2xStmt
            Finally(a, b) | Catch(a, .., b) => {
                let loc = Loc::Node(Context::Stmt, loc);
                self.walk_stmt(a, &loc);
                self.walk_stmt(b, &loc);
            }
            // 1x[Stmt]
            Block(ss) => {
                let mut block_cxt = BlockContext::new(0, ss.len());
                for (index, s) in ss.iter_mut().enumerate() {
                    block_cxt.index = index;
                    let loc = Loc::Node(Context::Block(&block_cxt), loc);
                    self.walk_stmt(s, &loc);
                }
                block_cxt.apply_patches(ss);
            }
            // 1x{ .., Option<Expr> }
            VarDecl(decls) => {
                let lone = decls.len() == 1;
                for decl in decls.iter_mut() {
                    let super::syntax::VarDecl { name, init } = decl;
                    if let Some(init) = init {
                        let loc = Loc::Node(Context::VarDeclRhs { name: &*name, lone }, loc);
                        self.walk_expr(init, &loc);
                    }
                }
            }
            // 1xExpr
            Throw(a) | Return(a) | Expr(a) => {
                let loc = Loc::Node(Context::Stmt, loc);
                self.walk_expr(a, &loc);
            }
            // 1xExpr, 1xStmt
            While(e, s) => {
                let eloc = Loc::Node(Context::Stmt, loc);
                self.walk_expr(e, &eloc);
                let sloc = Loc::Node(Context::Loop, loc);
                self.walk_stmt(s, &sloc);
            }
            DoWhile(s, e) => {
                let sloc = Loc::Node(Context::Loop, loc);
                self.walk_stmt(s, &sloc);
                let eloc = Loc::Node(Context::Stmt, loc);
                self.walk_expr(e, &eloc);
            }
            ForIn(.., e, s) => {
                let eloc = Loc::Node(Context::Stmt, loc);
                self.walk_expr(e, &eloc);
                let sloc = Loc::Node(Context::Loop, loc);
                self.walk_stmt(s, &sloc);
            }
            // 1xExpr, 2xStmt
            If(e, sa, sb) => {
                let loc = Loc::Node(Context::Stmt, loc);
                self.walk_expr(e, &loc);
                self.walk_stmt(sa, &loc);
                self.walk_stmt(sb, &loc);
            }
            // 1xExpr, 1xStmt, 1x[(Expr,Stmt)]
            Switch(e, es_ss, s) => {
                let eloc = Loc::Node(Context::Stmt, loc);
                self.walk_expr(e, &eloc);
                let sloc = Loc::Node(Context::Switch, loc);
                for (e, s) in es_ss.iter_mut() {
                    self.walk_expr(e, &sloc);
                    self.walk_stmt(s, &sloc);
                }
                self.walk_stmt(s, &sloc);
            }
            // ForInit, 2xExpr, 1xStmt
            For(init, ea, eb, s) => {
                let eloc = Loc::Node(Context::Stmt, loc);
                match init {
                    ForInit::Expr(e) => self.walk_expr(e, &eloc),
                    ForInit::Decl(decls) => {
                        // for-init declarators are not statement-position
                        // targets, so no VarDeclRhs context here
                        for decl in decls.iter_mut() {
                            if let Some(e) = &mut decl.init {
                                self.walk_expr(e, &eloc);
                            }
                        }
                    }
                }
                self.walk_expr(ea, &eloc);
                self.walk_expr(eb, &eloc);
                let sloc = Loc::Node(Context::Loop, loc);
                self.walk_stmt(s, &sloc);
            }
        }
        self.visitor.exit_stmt(stmt, loc);
    }

    pub fn walk_expr(&mut self, expr: &mut Expr, loc: &Loc) {
        use Expr::*;
        self.visitor.enter_expr(expr, loc);
        match expr {
            // 0
            Lit(_) | This | Id(_) | Yield(None, _) => (),
            // 1xLValue
            UnaryAssign(.., lv) => self.walk_lval(lv, loc),
            Func(f) => self.walk_fn(f, loc),
            // 1x[Expr]
            Array(es) | Seq(es) => {
                let loc = Loc::Node(Context::Expr, loc);
                for e in es {
                    self.walk_expr(e, &loc);
                }
            }
            // 1x[Property]: computed keys are expressions too, and they are
            // walked in source order relative to the values
            Object(props) => {
                let loc = Loc::Node(Context::Expr, loc);
                for p in props {
                    if let Key::Computed(k) = &mut p.key {
                        self.walk_expr(k, &loc);
                    }
                    self.walk_expr(&mut p.value, &loc);
                }
            }
            // 1xExpr
            Dot(e, ..) | Unary(.., e) | Yield(Some(e), _) => {
                let loc = Loc::Node(Context::Expr, loc);
                self.walk_expr(e, &loc);
            }
            // 1xLValue, 1xExpr
            Assign(.., lv, e) => {
                let lv_loc = Loc::Node(Context::LValue, loc);
                self.walk_lval(lv, &lv_loc);
                let rv_loc = Loc::Node(Context::AssignRhs, loc);
                self.walk_expr(e, &rv_loc);
            }
            // 1xExpr, 1x[Expr]
            New(e, es) | Call(e, es) => {
                let loc = Loc::Node(Context::Expr, loc);
                self.walk_expr(e, &loc);
                for e in es {
                    self.walk_expr(e, &loc);
                }
            }
            // 2xExpr
            Bracket(ea, eb) | Binary(.., ea, eb) => {
                let loc = Loc::Node(Context::Expr, loc);
                self.walk_expr(ea, &loc);
                self.walk_expr(eb, &loc);
            }
            // 3xExpr
            If(ea, eb, ec) => {
                let loc = Loc::Node(Context::Expr, loc);
                self.walk_expr(ea, &loc);
                self.walk_expr(eb, &loc);
                self.walk_expr(ec, &loc);
            }
        }
        self.visitor.exit_expr(expr, loc);
    }

    pub fn walk_fn(&mut self, f: &mut Func, loc: &Loc) {
        let loc = Loc::Node(Context::FunctionBody, loc);
        self.visitor.enter_fn(f, &loc);
        self.walk_stmt(&mut f.body, &loc);
        self.visitor.exit_fn(f, &loc);
    }

    pub fn walk_lval(&mut self, lval: &mut LValue, loc: &Loc) {
        use LValue::*;
        match lval {
            Id(_) => (),
            Dot(e, ..) => {
                let loc = Loc::Node(Context::LValue, loc);
                self.walk_expr(e, &loc);
            }
            Bracket(ea, eb) => {
                let loc = Loc::Node(Context::LValue, loc);
                self.walk_expr(ea, &loc);
                self.walk_expr(eb, &loc);
            }
        }
    }
}

impl Stmt {
    /// Walk the AST, calling the relevant visitor methods when appropriate.
    /// Strictly depth-first, left-to-right; see [Visitor] for more info.
    pub fn walk(&mut self, v: &mut impl Visitor) {
        let mut vs = VisitorState::new(v);
        let loc = Loc::Top;
        vs.walk_stmt(self, &loc);
    }

    /// Replace this statement with `;` and return its old value. This is
    /// used to gain ownership of a mutable reference, especially in
    /// [Stmt::walk].
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Stmt::Empty)
    }
}

impl Expr {
    /// Like [Stmt::walk], but as a method on Expr.
    pub fn walk(&mut self, v: &mut impl Visitor) {
        let mut vs = VisitorState::new(v);
        let loc = Loc::Top;
        vs.walk_expr(self, &loc);
    }

    /// Replace this expression with `undefined` and return its old value.
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Expr::Lit(Lit::Undefined))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constructors::*;

    struct InsertBefore;
    impl Visitor for InsertBefore {
        fn exit_stmt(&mut self, stmt: &mut Stmt, loc: &Loc) {
            if let Stmt::Return(..) = stmt {
                if let Loc::Node(Context::Block(cxt), ..) = loc {
                    cxt.insert(cxt.index, expr_(id_("inserted")));
                }
            }
        }
    }

    #[test]
    fn inserts_in_order() {
        let mut ast = Stmt::Block(vec![expr_(id_("first")), return_(UNDEFINED_)]);
        ast.walk(&mut InsertBefore);
        assert_eq!(
            ast,
            Stmt::Block(vec![
                expr_(id_("first")),
                expr_(id_("inserted")),
                return_(UNDEFINED_)
            ])
        );
    }
}
