//! Pretty-printing of the AST back to JavaScript source.
//!
//! The printer is deterministic, so two trees print identically exactly when
//! they agree on everything the syntax shows. Tests lean on this: lower a
//! program, print it, and compare against the printed parse of the expected
//! source.

use super::syntax::{self, *};
use pretty::RcDoc;

const INDENT: isize = 4;

impl Expr {
    pub fn to_doc(&self) -> RcDoc<()> {
        use Expr::*;
        match self {
            Lit(lit) => lit.to_doc(),
            Array(es) => RcDoc::text("[")
                .append(RcDoc::intersperse(
                    es.iter().map(Expr::to_doc),
                    RcDoc::text(", "),
                ))
                .append(RcDoc::text("]")),
            Object(props) => RcDoc::text("{")
                .append(RcDoc::intersperse(
                    props.iter().map(Property::to_doc),
                    RcDoc::text(", "),
                ))
                .append(RcDoc::text("}")),
            This => RcDoc::text("this"),
            Id(x) => RcDoc::text(x),
            Dot(e, id) => e.to_doc().append(RcDoc::text(".")).append(RcDoc::text(id)),
            Bracket(cont, ind) => cont
                .to_doc()
                .append(RcDoc::text("["))
                .append(ind.to_doc())
                .append(RcDoc::text("]")),
            New(cons, args) => RcDoc::text("new ").append(fn_call_to_doc(cons, args)),
            Unary(op, e) => unary_op_to_doc(op).append(e.to_doc()),
            Binary(op, a, b) => a
                .to_doc()
                .append(RcDoc::space())
                .append(op.to_doc())
                .append(RcDoc::space())
                .append(b.to_doc()),
            UnaryAssign(op, lval) => match op {
                UnaryAssignOp::PreInc => RcDoc::text("++").append(lval.to_doc()),
                UnaryAssignOp::PreDec => RcDoc::text("--").append(lval.to_doc()),
                UnaryAssignOp::PostInc => lval.to_doc().append(RcDoc::text("++")),
                UnaryAssignOp::PostDec => lval.to_doc().append(RcDoc::text("--")),
            },
            If(cond, then, other) => cond
                .to_doc()
                .append(RcDoc::text(" ? "))
                .append(then.to_doc())
                .append(RcDoc::text(" : "))
                .append(other.to_doc()),
            Assign(op, lval, to) => lval
                .to_doc()
                .append(RcDoc::space())
                .append(assign_op_to_doc(op))
                .append(RcDoc::space())
                .append(to.to_doc()),
            Call(clos, args) => {
                // a function-expression callee needs parens to stay an
                // expression
                let callee = match &**clos {
                    Func(_) => parens(clos.to_doc()),
                    _ => clos.to_doc(),
                };
                callee
                    .append(RcDoc::text("("))
                    .append(RcDoc::intersperse(
                        args.iter().map(|e| e.to_doc()),
                        RcDoc::text(", "),
                    ))
                    .append(RcDoc::text(")"))
            }
            Func(f) => f.to_doc(),
            Yield(arg, delegate) => match (arg, delegate) {
                (None, _) => RcDoc::text("yield"),
                (Some(e), true) => RcDoc::text("yield* ").append(e.to_doc()),
                (Some(e), false) => RcDoc::text("yield ").append(e.to_doc()),
            },
            // comma sequences always print parenthesized, so they survive
            // argument and statement positions unchanged
            Seq(es) => parens(RcDoc::intersperse(
                es.iter().map(Expr::to_doc),
                RcDoc::text(", "),
            )),
        }
    }

    pub fn to_pretty(&self, width: usize) -> String {
        let mut w = Vec::new();
        self.to_doc().render(width, &mut w).unwrap();
        String::from_utf8(w).unwrap()
    }
}

fn parens(doc: RcDoc<()>) -> RcDoc<()> {
    RcDoc::text("(").append(doc).append(RcDoc::text(")"))
}

fn fn_call_to_doc<'a>(closure: &'a Expr, args: &'a [Expr]) -> RcDoc<'a, ()> {
    closure
        .to_doc()
        .append(RcDoc::text("("))
        .append(RcDoc::intersperse(
            args.iter().map(|e| e.to_doc()),
            RcDoc::text(", "),
        ))
        .append(RcDoc::text(")"))
}

fn quoted(text: &str) -> RcDoc<()> {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    RcDoc::text("\"")
        .append(RcDoc::text(escaped))
        .append(RcDoc::text("\""))
}

impl Lit {
    pub fn to_doc(&self) -> RcDoc<()> {
        match self {
            syntax::Lit::String(text) => quoted(text),
            syntax::Lit::Bool(b) => match b {
                true => RcDoc::text("true"),
                false => RcDoc::text("false"),
            },
            syntax::Lit::Null => RcDoc::text("null"),
            syntax::Lit::Num(num) => match num {
                Num::Int(n) => RcDoc::text(format!("{}", n)),
                Num::Float(n) => RcDoc::text(format!("{}", n)),
            },
            syntax::Lit::Undefined => RcDoc::text("undefined"),
        }
    }
}

impl Key {
    pub fn to_doc(&self) -> RcDoc<()> {
        match self {
            Key::Ident(name) => RcDoc::text(name),
            Key::Str(s) => quoted(s),
            Key::Num(raw) => RcDoc::text(raw),
            Key::Computed(e) => RcDoc::text("[")
                .append(e.to_doc())
                .append(RcDoc::text("]")),
        }
    }
}

impl Property {
    pub fn to_doc(&self) -> RcDoc<()> {
        match self.kind {
            PropKind::Shorthand => self.key.to_doc(),
            PropKind::Init => self
                .key
                .to_doc()
                .append(RcDoc::text(": "))
                .append(self.value.to_doc()),
            PropKind::Method { generator } => {
                let f = match &self.value {
                    Expr::Func(f) => f,
                    // the parser only builds methods with function values
                    _ => panic!("method property without a function value"),
                };
                let star = if generator { "*" } else { "" };
                RcDoc::text(star)
                    .append(self.key.to_doc())
                    .append(params_to_doc(&f.params))
                    .append(RcDoc::space())
                    .append(f.body.to_doc())
            }
        }
    }
}

fn params_to_doc(params: &[Id]) -> RcDoc<()> {
    RcDoc::text("(")
        .append(RcDoc::intersperse(
            params.iter().map(|p| RcDoc::text(p)),
            RcDoc::text(", "),
        ))
        .append(RcDoc::text(")"))
}

impl Func {
    pub fn to_doc(&self) -> RcDoc<()> {
        let head = if self.generator {
            "function*"
        } else {
            "function"
        };
        let name = match &self.name {
            Some(name) => RcDoc::space().append(RcDoc::text(name)),
            None => RcDoc::nil(),
        };
        RcDoc::text(head)
            .append(name)
            .append(params_to_doc(&self.params))
            .append(RcDoc::space())
            .append(self.body.to_doc())
    }
}

fn unary_op_to_doc(op: &UnaryOp) -> RcDoc<()> {
    use UnaryOp::*;
    RcDoc::text(match op {
        Minus => "-",
        Plus => "+",
        Not => "!",
        Tilde => "~",
        TypeOf => "typeof ",
        Void => "void ",
        Delete => "delete ",
    })
}

impl BinOp {
    pub fn to_doc(&self) -> RcDoc<()> {
        use syntax::BinaryOp::*;
        RcDoc::text(match self {
            BinOp::BinaryOp(b) => match b {
                Equal => "==",
                NotEqual => "!=",
                StrictEqual => "===",
                StrictNotEqual => "!==",
                LessThan => "<",
                GreaterThan => ">",
                LessThanEqual => "<=",
                GreaterThanEqual => ">=",
                LeftShift => "<<",
                RightShift => ">>",
                UnsignedRightShift => ">>>",
                Plus => "+",
                Minus => "-",
                Times => "*",
                Over => "/",
                Mod => "%",
                Or => "|",
                XOr => "^",
                And => "&",
                In => "in",
                InstanceOf => "instanceof",
                PowerOf => "**",
            },
            BinOp::LogicalOp(o) => match o {
                LogicalOp::And => "&&",
                LogicalOp::Or => "||",
            },
        })
    }
}

impl LValue {
    pub fn to_doc(&self) -> RcDoc<()> {
        match self {
            LValue::Id(id) => RcDoc::text(id),
            LValue::Dot(e, id) => e.to_doc().append(RcDoc::text(".")).append(RcDoc::text(id)),
            LValue::Bracket(cont, ind) => cont
                .to_doc()
                .append(RcDoc::text("["))
                .append(ind.to_doc())
                .append(RcDoc::text("]")),
        }
    }
}

fn assign_op_to_doc(op: &AssignOp) -> RcDoc<()> {
    use AssignOp::*;
    RcDoc::text(match op {
        Equal => "=",
        PlusEqual => "+=",
        MinusEqual => "-=",
        TimesEqual => "*=",
        DivEqual => "/=",
        ModEqual => "%=",
        LeftShiftEqual => "<<=",
        RightShiftEqual => ">>=",
        UnsignedRightShiftEqual => ">>>=",
        OrEqual => "|=",
        XOrEqual => "^=",
        AndEqual => "&=",
        PowerOfEqual => "**=",
    })
}

fn vardecl_to_doc(decl: &VarDecl) -> RcDoc<()> {
    match &decl.init {
        None => RcDoc::text(&decl.name),
        Some(init) => RcDoc::text(&decl.name)
            .append(RcDoc::text(" = "))
            .append(init.to_doc()),
    }
}

impl ForInit {
    pub fn to_doc(&self) -> RcDoc<()> {
        match self {
            ForInit::Expr(e) => e.to_doc(),
            ForInit::Decl(decls) => RcDoc::text("var ").append(RcDoc::intersperse(
                decls.iter().map(vardecl_to_doc),
                RcDoc::text(", "),
            )),
        }
    }
}

impl Stmt {
    pub fn to_doc(&self) -> RcDoc<()> {
        use Stmt::*;
        match self {
            Block(stmts) => {
                if stmts.is_empty() {
                    return RcDoc::text("{}");
                }
                RcDoc::text("{")
                    .append(
                        RcDoc::concat(
                            stmts
                                .iter()
                                .map(|s| RcDoc::hardline().append(s.to_doc())),
                        )
                        .nest(INDENT),
                    )
                    .append(RcDoc::hardline())
                    .append(RcDoc::text("}"))
            }
            Empty => RcDoc::text(";"),
            Expr(e) => {
                // a leading `function` or `{` would parse as a declaration
                // or a block
                let doc = match &**e {
                    syntax::Expr::Func(_) | syntax::Expr::Object(_) => parens(e.to_doc()),
                    _ => e.to_doc(),
                };
                doc.append(RcDoc::text(";"))
            }
            If(cond, then, other) => {
                let doc = RcDoc::text("if (")
                    .append(cond.to_doc())
                    .append(RcDoc::text(") "))
                    .append(then.to_doc());
                match &**other {
                    Empty => doc,
                    other => doc.append(RcDoc::text(" else ")).append(other.to_doc()),
                }
            }
            Switch(disc, cases, default) => {
                let cases_doc = RcDoc::concat(cases.iter().map(|(test, body)| {
                    RcDoc::hardline()
                        .append(RcDoc::text("case "))
                        .append(test.to_doc())
                        .append(RcDoc::text(": "))
                        .append(body.to_doc())
                }));
                let default_doc = match &**default {
                    Empty => RcDoc::nil(),
                    d => RcDoc::hardline()
                        .append(RcDoc::text("default: "))
                        .append(d.to_doc()),
                };
                RcDoc::text("switch (")
                    .append(disc.to_doc())
                    .append(RcDoc::text(") {"))
                    .append(cases_doc.append(default_doc).nest(INDENT))
                    .append(RcDoc::hardline())
                    .append(RcDoc::text("}"))
            }
            While(cond, body) => RcDoc::text("while (")
                .append(cond.to_doc())
                .append(RcDoc::text(") "))
                .append(body.to_doc()),
            DoWhile(body, cond) => RcDoc::text("do ")
                .append(body.to_doc())
                .append(RcDoc::text(" while ("))
                .append(cond.to_doc())
                .append(RcDoc::text(");")),
            For(init, test, update, body) => RcDoc::text("for (")
                .append(init.to_doc())
                .append(RcDoc::text("; "))
                .append(test.to_doc())
                .append(RcDoc::text("; "))
                .append(update.to_doc())
                .append(RcDoc::text(") "))
                .append(body.to_doc()),
            ForIn(is_var, x, e, body) => RcDoc::text("for (")
                .append(RcDoc::text(if *is_var { "var " } else { "" }))
                .append(RcDoc::text(x))
                .append(RcDoc::text(" in "))
                .append(e.to_doc())
                .append(RcDoc::text(") "))
                .append(body.to_doc()),
            Label(name, body) => RcDoc::text(name)
                .append(RcDoc::text(": "))
                .append(body.to_doc()),
            Break(label) => match label {
                None => RcDoc::text("break;"),
                Some(l) => RcDoc::text("break ").append(RcDoc::text(l)).append(";"),
            },
            Continue(label) => match label {
                None => RcDoc::text("continue;"),
                Some(l) => RcDoc::text("continue ").append(RcDoc::text(l)).append(";"),
            },
            Catch(body, exn_name, catch_body) => RcDoc::text("try ")
                .append(body.to_doc())
                .append(RcDoc::text(" catch ("))
                .append(RcDoc::text(exn_name))
                .append(RcDoc::text(") "))
                .append(catch_body.to_doc()),
            Finally(body, finally_body) => {
                // `try a catch b finally c` nests as Finally(Catch(a, b), c);
                // the inner try must not print its own `try` twice, so print
                // the catch form directly here
                let head = match &**body {
                    Catch(try_body, exn_name, catch_body) => RcDoc::text("try ")
                        .append(try_body.to_doc())
                        .append(RcDoc::text(" catch ("))
                        .append(RcDoc::text(exn_name))
                        .append(RcDoc::text(") "))
                        .append(catch_body.to_doc()),
                    body => RcDoc::text("try ").append(body.to_doc()),
                };
                head.append(RcDoc::text(" finally "))
                    .append(finally_body.to_doc())
            }
            Throw(e) => RcDoc::text("throw ")
                .append(e.to_doc())
                .append(RcDoc::text(";")),
            VarDecl(decls) => RcDoc::text("var ")
                .append(RcDoc::intersperse(
                    decls.iter().map(vardecl_to_doc),
                    RcDoc::text(", "),
                ))
                .append(RcDoc::text(";")),
            Func(name, f) => {
                let head = if f.generator {
                    "function* "
                } else {
                    "function "
                };
                RcDoc::text(head)
                    .append(RcDoc::text(name))
                    .append(params_to_doc(&f.params))
                    .append(RcDoc::space())
                    .append(f.body.to_doc())
            }
            Return(e) => RcDoc::text("return ")
                .append(e.to_doc())
                .append(RcDoc::text(";")),
        }
    }

    pub fn to_pretty(&self, width: usize) -> String {
        let mut w = Vec::new();
        self.to_doc().render(width, &mut w).unwrap();
        String::from_utf8(w).unwrap()
    }
}

#[cfg(test)]
mod test {
    use crate::parser::parse;
    use crate::syntax::Stmt;

    const WIDTH: usize = 80;

    fn already_pretty_expr(what: &str) {
        // wrap the expression in a statement so the parser doesn't choke on
        // leading braces
        let mut parsed = parse(&format!("while ({}) {{}}", what)).unwrap();
        if let Stmt::Block(ref mut x) = parsed {
            if x.len() == 1 {
                if let Some(Stmt::While(e, ..)) = x.pop() {
                    assert_eq!(what, e.to_pretty(WIDTH));
                    return;
                }
            }
        }
        panic!("not an expression");
    }

    fn already_pretty(what: &str) {
        assert_eq!(what, parse(what).unwrap().to_pretty(WIDTH));
    }

    #[test]
    #[should_panic]
    fn not_pretty() {
        already_pretty_expr("   [   1,    2]");
    }

    #[test]
    fn literals() {
        already_pretty_expr(r#"[1, "two", null, true]"#);
    }

    #[test]
    fn object() {
        already_pretty_expr("{x: 10, y: null}");
    }

    #[test]
    fn object_sugar() {
        already_pretty_expr("{x, foo(a) {\n    return a;\n}, [k]: 1, *gen() {\n    yield 1;\n}}");
    }

    #[test]
    fn string_keys_and_numeric_keys() {
        already_pretty_expr(r#"{"a string": 1, 0b101: 2}"#);
    }

    #[test]
    fn new_and_this() {
        already_pretty_expr("new Thingy(this)");
    }

    #[test]
    fn ops() {
        already_pretty_expr("~5 & 9 instanceof SomeObject");
    }

    #[test]
    fn unary_lval() {
        already_pretty_expr("++x[5]");
    }

    #[test]
    fn ternary_if() {
        already_pretty_expr("true ? 5 : 3");
    }

    #[test]
    fn seq_is_parenthesized() {
        already_pretty_expr("(x = 6, y)");
    }

    #[test]
    fn function_expression() {
        already_pretty_expr("function foo_bar() {\n    return 1;\n}");
    }

    #[test]
    fn statements() {
        already_pretty("{\n    var x = 1;\n    if (x) {\n        f(x);\n    }\n}");
    }

    #[test]
    fn try_catch_finally() {
        already_pretty("{\n    try {\n        f();\n    } catch (e) {\n        g(e);\n    } finally {\n        h();\n    }\n}");
    }

    #[test]
    fn leading_brace_gets_parens() {
        already_pretty("{\n    ({x: 1});\n}");
    }
}
