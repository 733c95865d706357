// An implementation of our simplified JavaScript parser using swc_ecma_parser
// as a backend.

use super::constructors::*;
use super::syntax as S;
use swc_atoms::JsWord;
use swc_common::{FileName, SourceMap, Span};
use swc_ecma_ast as swc;
use swc_ecma_parser::{lexer, Parser, StringInput, Syntax};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// An error from the SWC parser.
    #[error("SWC error")]
    SWC(swc_ecma_parser::error::Error),
    /// An error while parsing a string literal
    #[error("String literal parse error: {0}")]
    String(String),
    /// The SWC AST had a JavaScript feature that we do not support.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

impl From<swc_ecma_parser::error::Error> for ParseError {
    fn from(e: swc_ecma_parser::error::Error) -> ParseError {
        ParseError::SWC(e)
    }
}

/// Parse a full JavaScript program from source code into our AST. The result
/// is always a single `Stmt::Block` holding the program body.
pub fn parse(js_code: &str) -> ParseResult<S::Stmt> {
    // All source spans the parser hands back are indices into this map; we
    // also use it to recover the raw spelling of numeric literals.
    let source_map: SourceMap = Default::default();
    let source_file = source_map.new_source_file(FileName::Anon, js_code.into());

    let lexer = lexer::Lexer::new(
        Syntax::Es(Default::default()),
        Default::default(),
        StringInput::from(&*source_file),
        None,
    );
    let mut parser = Parser::new_from(lexer);
    let script = parser.parse_script()?;
    parse_script(script, &source_map)
}

macro_rules! unsupported {
    ($span:expr, $source_map:expr) => {
        unsupported_message(
            &format!(
                "(generated at {}:{}:{}) unsupported feature",
                file!(),
                line!(),
                column!()
            ),
            $span,
            $source_map,
        )
    };
}

/// A parsing result used for an unsupported feature of JavaScript, with a
/// customizable message.
fn unsupported_message<T>(msg: &str, span: Span, source_map: &SourceMap) -> Result<T, ParseError> {
    Err(ParseError::Unsupported(format!(
        "{} at {}",
        msg,
        source_map.span_to_string(span)
    )))
}

/// An error occurred while attempting to parse a string literal from the SWC AST
fn str_error(msg: &str, span: Span, source_map: &SourceMap) -> ParseError {
    ParseError::String(format!(
        "tried to parse string literal at {} but failed at {}",
        source_map.span_to_string(span),
        msg
    ))
}

fn parse_id(ident: swc::Ident) -> S::Id {
    ident.sym.to_string()
}

fn parse_script(script: swc::Script, source_map: &SourceMap) -> ParseResult<S::Stmt> {
    let mut stmts = parse_stmts(script.body, source_map)?;

    // The passes expect the program to be a single block statement. If the
    // entire program is already one block, return it; otherwise wrap it.
    if stmts.len() == 1 {
        if let S::Stmt::Block(_) = stmts[0] {
            return Ok(stmts.pop().unwrap());
        }
    }

    Ok(S::Stmt::Block(stmts))
}

fn parse_stmts(stmts: Vec<swc::Stmt>, source_map: &SourceMap) -> ParseResult<Vec<S::Stmt>> {
    stmts
        .into_iter()
        .map(|stmt| parse_stmt(stmt, source_map))
        .collect()
}

fn parse_stmt(stmt: swc::Stmt, source_map: &SourceMap) -> ParseResult<S::Stmt> {
    use swc::Stmt::*;
    match stmt {
        Block(block_stmt) => parse_block(block_stmt, source_map),
        Break(break_stmt) => Ok(break_(break_stmt.label.map(parse_id))),
        Continue(continue_stmt) => Ok(continue_(continue_stmt.label.map(parse_id))),
        Debugger(debugger_stmt) => unsupported!(debugger_stmt.span, source_map),
        Decl(decl) => parse_decl(decl, source_map),
        DoWhile(do_while_stmt) => {
            let body = parse_stmt(*do_while_stmt.body, source_map)?;
            let test = parse_expr(*do_while_stmt.test, source_map)?;
            Ok(dowhile_(body, test))
        }
        Empty(_) => Ok(S::Stmt::Empty),
        Expr(swc::ExprStmt { span: _, expr }) => Ok(expr_(parse_expr(*expr, source_map)?)),
        For(for_stmt) => {
            let init = match for_stmt.init {
                None => S::ForInit::Expr(Box::new(UNDEFINED_)),
                Some(swc::VarDeclOrExpr::Expr(e)) => {
                    S::ForInit::Expr(Box::new(parse_expr(*e, source_map)?))
                }
                // let and const fold to var; every name this pass emits is
                // function-scoped anyway
                Some(swc::VarDeclOrExpr::VarDecl(swc::VarDecl { decls, .. })) => {
                    let decls: ParseResult<Vec<_>> = decls
                        .into_iter()
                        .map(|d| parse_var_declarator(d, source_map))
                        .collect();
                    S::ForInit::Decl(decls?)
                }
            };
            Ok(for_(
                init,
                parse_opt_expr(for_stmt.test, source_map)?,
                parse_opt_expr(for_stmt.update, source_map)?,
                parse_stmt(*for_stmt.body, source_map)?,
            ))
        }
        ForIn(swc::ForInStmt {
            left,
            right,
            body,
            span,
        }) => {
            // either declaring a fresh index variable or reusing a bound one
            let (is_var, id) = match left {
                swc::VarDeclOrPat::Pat(swc::Pat::Ident(ident)) => (false, ident),
                swc::VarDeclOrPat::Pat(swc::Pat::Expr(boxed_expr)) => match *boxed_expr {
                    swc::Expr::Ident(ident) => (false, ident),
                    _ => {
                        return unsupported_message(
                            "unsupported expression in a for-in loop declaration",
                            span,
                            source_map,
                        );
                    }
                },
                swc::VarDeclOrPat::VarDecl(swc::VarDecl {
                    span, mut decls, ..
                }) => {
                    if decls.len() != 1 {
                        return unsupported_message(
                            "only a single declarator is allowed here",
                            span,
                            source_map,
                        );
                    }
                    match decls.remove(0) {
                        swc::VarDeclarator {
                            init: None,
                            name: swc::Pat::Ident(ident),
                            ..
                        } => (true, ident),
                        _ => {
                            return unsupported_message(
                                "only simple declarators are allowed here",
                                span,
                                source_map,
                            );
                        }
                    }
                }
                other => {
                    return unsupported_message(
                        &format!("unsupported index in a for-in loop: {:?}", other),
                        span,
                        source_map,
                    );
                }
            };

            Ok(forin_(
                is_var,
                parse_id(id),
                parse_expr(*right, source_map)?,
                parse_stmt(*body, source_map)?,
            ))
        }
        ForOf(for_of_stmt) => unsupported!(for_of_stmt.span, source_map),
        If(if_stmt) => {
            let cond_expr = parse_expr(*if_stmt.test, source_map)?;
            let then_stmt = parse_stmt(*if_stmt.cons, source_map)?;
            let else_stmt = parse_opt_stmt(if_stmt.alt, source_map)?;
            Ok(if_(cond_expr, then_stmt, else_stmt))
        }
        Labeled(labeled_stmt) => Ok(label_(
            parse_id(labeled_stmt.label),
            parse_stmt(*labeled_stmt.body, source_map)?,
        )),
        Return(return_stmt) => Ok(return_(parse_opt_expr(return_stmt.arg, source_map)?)),
        Switch(swc::SwitchStmt {
            discriminant,
            cases,
            span: _,
        }) => {
            let cases: Result<Vec<_>, _> = cases
                .into_iter()
                .map(|c| parse_switch_case(c, source_map))
                .collect();

            let (cases, mut default_case) = cases?
                .into_iter()
                .partition::<Vec<_>, _>(|(test, _)| test.is_some());

            let default_case = match default_case.len() {
                0 => S::Stmt::Empty,
                1 => default_case.remove(0).1,
                _ => panic!("switch with multiple default cases"),
            };
            let cases = cases.into_iter().map(|(test, body)| (test.unwrap(), body));

            Ok(switch_(
                parse_expr(*discriminant, source_map)?,
                cases.collect(),
                default_case,
            ))
        }
        Throw(throw_stmt) => Ok(throw_(parse_expr(*throw_stmt.arg, source_map)?)),
        Try(try_stmt) => {
            let stmt = parse_block(try_stmt.block, source_map)?;

            let stmt = match try_stmt.handler {
                None => stmt,
                Some(swc::CatchClause {
                    param: Some(pattern),
                    body,
                    span,
                }) => catch_(
                    stmt,
                    parse_id_from_pattern(pattern, span, source_map)?,
                    parse_block(body, source_map)?,
                ),
                Some(_) => return unsupported!(try_stmt.span, source_map),
            };

            let stmt = match try_stmt.finalizer {
                None => stmt,
                Some(block) => finally_(stmt, parse_block(block, source_map)?),
            };

            Ok(stmt)
        }
        While(while_stmt) => {
            let test = parse_expr(*while_stmt.test, source_map)?;
            let body = parse_stmt(*while_stmt.body, source_map)?;
            Ok(while_(test, body))
        }
        With(with_stmt) => unsupported!(with_stmt.span, source_map),
    }
}

fn parse_opt_stmt(
    opt_stmt: Option<Box<swc::Stmt>>,
    source_map: &SourceMap,
) -> ParseResult<S::Stmt> {
    match opt_stmt {
        None => Ok(S::Stmt::Empty),
        Some(stmt) => Ok(parse_stmt(*stmt, source_map)?),
    }
}

fn parse_expr(expr: swc::Expr, source_map: &SourceMap) -> ParseResult<S::Expr> {
    use swc::Expr::*;
    match expr {
        Array(swc::ArrayLit { elems, span: _ }) => {
            let elems: ParseResult<Vec<_>> = elems
                .into_iter()
                .map(|e| parse_opt_expr_or_spread(e, source_map))
                .collect();
            Ok(S::Expr::Array(elems?))
        }
        // Arrows fold to plain function expressions. This pass never emits
        // `this` into method values, so the capture-difference is moot here.
        Arrow(swc::ArrowExpr {
            span,
            params,
            body,
            is_async,
            is_generator,
            ..
        }) => {
            if is_async {
                return unsupported_message("async not supported", span, source_map);
            }
            if is_generator {
                return unsupported_message("generator arrow", span, source_map);
            }
            let params: ParseResult<Vec<_>> = params
                .into_iter()
                .map(|p| parse_id_from_pattern(p, span, source_map))
                .collect();
            let body = match body {
                swc::BlockStmtOrExpr::BlockStmt(block) => parse_block(block, source_map)?,
                swc::BlockStmtOrExpr::Expr(e) => {
                    S::Stmt::Block(vec![return_(parse_expr(*e, source_map)?)])
                }
            };
            Ok(S::Expr::Func(S::Func::new(None, params?, body, false)))
        }
        Assign(swc::AssignExpr {
            left,
            op,
            right,
            span,
        }) => {
            let op = parse_assign_op(op, span, source_map)?;
            let left = parse_pat_or_expr(left, span, source_map)?;
            let right = parse_expr(*right, source_map)?;
            Ok(op_assign_(op, left, right))
        }
        Await(await_expr) => unsupported!(await_expr.span, source_map),
        Bin(swc::BinExpr {
            op,
            left,
            right,
            span,
        }) => {
            let op = parse_binary_op(op, span, source_map)?;
            let left = parse_expr(*left, source_map)?;
            let right = parse_expr(*right, source_map)?;
            Ok(binary_(op, left, right))
        }
        Class(class_expr) => unsupported!(class_expr.class.span, source_map),
        Call(swc::CallExpr {
            args,
            callee,
            span: _,
            type_args: _,
        }) => {
            let args: ParseResult<Vec<_>> = args
                .into_iter()
                .map(|e| parse_expr_or_spread(e, source_map))
                .collect();
            let callee = parse_expr_or_super(callee, source_map);
            Ok(call_(callee?, args?))
        }
        Cond(swc::CondExpr {
            test,
            cons,
            alt,
            span: _,
        }) => {
            let test = parse_expr(*test, source_map)?;
            let cons = parse_expr(*cons, source_map)?;
            let alt = parse_expr(*alt, source_map)?;
            Ok(if_expr_(test, cons, alt))
        }
        Fn(swc::FnExpr { ident, function }) => {
            let name = ident.map(parse_id);
            let mut func = parse_function(function, source_map)?;
            func.name = name;
            Ok(S::Expr::Func(func))
        }
        Ident(ident) => Ok(id_(parse_id(ident))),
        Invalid(invalid) => unsupported!(invalid.span, source_map),
        JSXElement(jsx_element) => unsupported!(jsx_element.span, source_map),
        JSXEmpty(jsx_empty) => unsupported!(jsx_empty.span, source_map),
        JSXFragment(jsx_fragment) => unsupported!(jsx_fragment.span, source_map),
        JSXMember(jsx_member_expr) => unsupported!(jsx_member_expr.prop.span, source_map),
        JSXNamespacedName(jsx_namespaced_name) => {
            unsupported!(jsx_namespaced_name.name.span, source_map)
        }
        Lit(lit) => Ok(S::Expr::Lit(parse_lit(lit, source_map)?)),
        Member(swc::MemberExpr {
            obj,
            prop,
            computed,
            span,
        }) => {
            let obj = parse_expr_or_super(obj, source_map)?;
            if computed {
                Ok(bracket_(obj, parse_expr(*prop, source_map)?))
            } else {
                match *prop {
                    Ident(id) => Ok(dot_(obj, parse_id(id))),
                    _ => unsupported!(span, source_map),
                }
            }
        }
        MetaProp(swc::MetaPropExpr {
            meta: swc::Ident { span, .. },
            ..
        }) => unsupported!(span, source_map), // new.target
        New(swc::NewExpr {
            callee, args, span: _, ..
        }) => {
            // parentheses in a new call are optional for zero-arg
            // constructors; `new Date` parses with args of None
            let args: ParseResult<Vec<_>> = match args {
                Some(args) => args
                    .into_iter()
                    .map(|eos| parse_expr_or_spread(eos, source_map))
                    .collect(),
                None => Ok(Vec::new()),
            };
            let callee = parse_expr(*callee, source_map);
            Ok(new_(callee?, args?))
        }
        Object(swc::ObjectLit { props, span }) => {
            let props: ParseResult<Vec<_>> = props
                .into_iter()
                .map(|p| parse_prop_or_spread(p, span, source_map))
                .collect();
            Ok(S::Expr::Object(props?))
        }
        OptChain(swc::OptChainExpr { span, .. }) => unsupported!(span, source_map),
        Paren(swc::ParenExpr { expr, .. }) => parse_expr(*expr, source_map),
        PrivateName(private_name) => unsupported!(private_name.span, source_map),
        Seq(swc::SeqExpr { exprs, span: _ }) => {
            let exprs: ParseResult<Vec<_>> = exprs
                .into_iter()
                .map(|e| parse_expr(*e, source_map))
                .collect();
            Ok(S::Expr::Seq(exprs?))
        }
        TaggedTpl(tagged_tpl) => unsupported!(tagged_tpl.span, source_map),
        This(swc::ThisExpr { span: _ }) => Ok(S::Expr::This),
        Tpl(tpl) => unsupported!(tpl.span, source_map),
        TsAs(ts_as_expr) => unsupported!(ts_as_expr.span, source_map),
        TsConstAssertion(ts_const_assertion) => unsupported!(ts_const_assertion.span, source_map),
        TsNonNull(ts_non_null_expr) => unsupported!(ts_non_null_expr.span, source_map),
        TsTypeAssertion(ts_type_assertion) => unsupported!(ts_type_assertion.span, source_map),
        TsTypeCast(ts_type_cast_expr) => unsupported!(ts_type_cast_expr.span, source_map),
        Unary(swc::UnaryExpr { op, arg, span }) => {
            let op = parse_unary_op(op, span, source_map)?;
            let arg = parse_expr(*arg, source_map)?;
            Ok(unary_(op, arg))
        }
        Update(swc::UpdateExpr {
            span,
            op,
            prefix,
            arg,
        }) => {
            let op = parse_update_op(op, prefix);
            let arg = parse_lvalue_from_expr(*arg, span, source_map)?;
            Ok(unaryassign_(op, arg))
        }
        Yield(swc::YieldExpr {
            arg,
            delegate,
            span: _,
        }) => {
            let arg = match arg {
                None => None,
                Some(e) => Some(Box::new(parse_expr(*e, source_map)?)),
            };
            Ok(S::Expr::Yield(arg, delegate))
        }
    }
}

fn parse_opt_expr(
    opt_expr: Option<Box<swc::Expr>>,
    source_map: &SourceMap,
) -> ParseResult<S::Expr> {
    match opt_expr {
        None => Ok(UNDEFINED_),
        Some(expr) => Ok(parse_expr(*expr, source_map)?),
    }
}

fn parse_block(block: swc::BlockStmt, source_map: &SourceMap) -> ParseResult<S::Stmt> {
    Ok(S::Stmt::Block(parse_stmts(block.stmts, source_map)?))
}

/// Parse an swc pattern expecting an id. `span` should be the source location
/// of the surrounding expr/stmt, for error reporting.
fn parse_id_from_pattern(
    pattern: swc::Pat,
    span: Span,
    source_map: &SourceMap,
) -> ParseResult<S::Id> {
    use swc::Pat::*;
    match pattern {
        Ident(ident) => Ok(parse_id(ident)),
        _ => unsupported!(span, source_map),
    }
}

fn parse_lvalue_from_pattern(
    pattern: swc::Pat,
    span: Span,
    source_map: &SourceMap,
) -> ParseResult<S::LValue> {
    use swc::Pat::*;
    match pattern {
        Ident(ident) => Ok(S::LValue::Id(parse_id(ident))),
        Expr(expr) => parse_lvalue_from_expr(*expr, span, source_map),
        _ => unsupported!(span, source_map),
    }
}

fn parse_var_declarator(
    var_decl: swc::VarDeclarator,
    source_map: &SourceMap,
) -> ParseResult<S::VarDecl> {
    let init = match var_decl.init {
        None => None,
        Some(e) => Some(Box::new(parse_expr(*e, source_map)?)),
    };
    Ok(S::VarDecl {
        name: parse_id_from_pattern(var_decl.name, var_decl.span, source_map)?,
        init,
    })
}

fn parse_switch_case(
    case: swc::SwitchCase,
    source_map: &SourceMap,
) -> ParseResult<(Option<S::Expr>, S::Stmt)> {
    let test = match case.test {
        None => None,
        Some(e) => Some(parse_expr(*e, source_map)?),
    };
    Ok((test, S::Stmt::Block(parse_stmts(case.cons, source_map)?)))
}

fn parse_expr_or_super(eos: swc::ExprOrSuper, source_map: &SourceMap) -> ParseResult<S::Expr> {
    use swc::ExprOrSuper::*;
    match eos {
        Expr(expr) => parse_expr(*expr, source_map),
        Super(swc::Super { span }) => unsupported!(span, source_map),
    }
}

fn parse_expr_or_spread(eos: swc::ExprOrSpread, source_map: &SourceMap) -> ParseResult<S::Expr> {
    match eos.spread {
        None => parse_expr(*eos.expr, source_map),
        Some(span) => unsupported!(span, source_map),
    }
}

fn parse_opt_expr_or_spread(
    oeos: Option<swc::ExprOrSpread>,
    source_map: &SourceMap,
) -> ParseResult<S::Expr> {
    match oeos {
        Some(eos) => parse_expr_or_spread(eos, source_map),
        None => Ok(UNDEFINED_), // elided array element
    }
}

fn parse_func_arg(arg: swc::Param, source_map: &SourceMap) -> ParseResult<S::Id> {
    parse_id_from_pattern(arg.pat, arg.span, source_map)
}

fn parse_lit(lit: swc::Lit, source_map: &SourceMap) -> ParseResult<S::Lit> {
    use swc::Lit::*;
    match lit {
        Str(swc::Str { value, span, .. }) => {
            Ok(S::Lit::String(parse_string(value, span, source_map)?))
        }
        Bool(swc::Bool { value, span: _ }) => Ok(S::Lit::Bool(value)),
        Null(swc::Null { span: _ }) => Ok(S::Lit::Null),
        Num(swc::Number { value, span: _ }) => Ok(S::Lit::Num(parse_num(value))),
        BigInt(swc::BigInt { value: _, span }) => {
            unsupported_message("big int literal", span, source_map)
        }
        Regex(swc::Regex { span, .. }) => {
            unsupported_message("regex not yet supported", span, source_map)
        }
        JSXText(swc::JSXText { span, .. }) => {
            unsupported_message("jsx string literal", span, source_map)
        }
    }
}

/// Parse a string literal from the SWC AST. `span` should be the sourcespan of
/// the surrounding expression.
fn parse_string(s: JsWord, span: Span, source_map: &SourceMap) -> ParseResult<String> {
    let literal_chars = s.to_string();

    let mut buf = String::with_capacity(literal_chars.len());
    let mut iter = literal_chars.chars().peekable();
    while let Some(ch) = iter.next() {
        if ch != '\\' {
            buf.push(ch);
            continue;
        }
        match iter
            .next()
            .ok_or(str_error("character after backslash", span, source_map))?
        {
            c @ '\'' | c @ '"' | c @ '\\' => buf.push(c),
            'n' => buf.push('\n'),
            'r' => buf.push('\r'),
            't' => buf.push('\t'),
            'f' => buf.push('\x0C'),
            'b' => buf.push('\x08'),
            'v' => buf.push('\x0B'),
            'x' => {
                let s = format!(
                    "{}{}",
                    iter.next()
                        .ok_or(str_error("first hex digit after \\x", span, source_map))?,
                    iter.next()
                        .ok_or(str_error("second hex digit after \\x", span, source_map))?,
                );
                let n = u8::from_str_radix(&s, 16).map_err(|_| {
                    str_error(&format!("invalid escape \\x{}", &s), span, source_map)
                })?;
                buf.push(n as char);
            }
            'u' => {
                let s = format!(
                    "{}{}{}{}",
                    iter.next()
                        .ok_or(str_error("first hex digit after \\u", span, source_map))?,
                    iter.next()
                        .ok_or(str_error("second hex digit after \\u", span, source_map))?,
                    iter.next()
                        .ok_or(str_error("third hex digit after \\u", span, source_map))?,
                    iter.next()
                        .ok_or(str_error("fourth hex digit after \\u", span, source_map))?
                );
                let n = u16::from_str_radix(&s, 16).map_err(|_| {
                    str_error(&format!("invalid unicode escape {}", &s), span, source_map)
                })?;
                buf.push(std::char::from_u32(n as u32).ok_or(str_error(
                    &format!("invalid Unicode character {}", n),
                    span,
                    source_map,
                ))?);
            }
            ch => {
                if ch < '0' || ch > '9' {
                    // JavaScript allows escaping any character; a non-escape
                    // just yields the character itself
                    buf.push(ch);
                } else {
                    let mut octal_str = String::with_capacity(2);
                    octal_str.push(ch);
                    match iter.peek() {
                        Some(ch) if *ch >= '0' && *ch <= '7' => {
                            octal_str.push(*ch);
                            iter.next();
                        }
                        _ => (),
                    }
                    let n = u32::from_str_radix(&octal_str, 8).map_err(|_| {
                        str_error(
                            &format!("invalid octal escape \\{}", &octal_str),
                            span,
                            source_map,
                        )
                    })?;
                    // 2-digit octal value is always a valid char
                    buf.push(std::char::from_u32(n).unwrap());
                }
            }
        }
    }
    Ok(buf)
}

/// `span` is the span of the surrounding object literal.
fn parse_prop_or_spread(
    pos: swc::PropOrSpread,
    span: Span,
    source_map: &SourceMap,
) -> ParseResult<S::Property> {
    match pos {
        swc::PropOrSpread::Prop(prop) => parse_prop(*prop, span, source_map),
        swc::PropOrSpread::Spread(_) => {
            unsupported_message("spread in object literal", span, source_map)
        }
    }
}

/// `span` is the span of the surrounding object literal.
fn parse_prop(prop: swc::Prop, span: Span, source_map: &SourceMap) -> ParseResult<S::Property> {
    use swc::Prop::*;
    match prop {
        Shorthand(ident) => {
            let name = parse_id(ident);
            Ok(S::Property {
                key: S::Key::Ident(name.clone()),
                value: S::Expr::Id(name),
                kind: S::PropKind::Shorthand,
            })
        }
        KeyValue(swc::KeyValueProp { key, value }) => Ok(S::Property {
            key: parse_prop_name(key, source_map)?,
            value: parse_expr(*value, source_map)?,
            kind: S::PropKind::Init,
        }),
        Method(swc::MethodProp { key, function }) => {
            let key = parse_prop_name(key, source_map)?;
            let func = parse_function(function, source_map)?;
            let generator = func.generator;
            Ok(S::Property {
                key,
                value: S::Expr::Func(func),
                kind: S::PropKind::Method { generator },
            })
        }
        Getter(swc::GetterProp { span, .. }) => {
            unsupported_message("getter in object literal", span, source_map)
        }
        Setter(swc::SetterProp { span, .. }) => {
            unsupported_message("setter in object literal", span, source_map)
        }
        Assign(_) => unsupported_message("assignment-style property", span, source_map),
    }
}

fn parse_prop_name(name: swc::PropName, source_map: &SourceMap) -> ParseResult<S::Key> {
    use swc::PropName::*;
    match name {
        Ident(swc::Ident { sym, .. }) => Ok(S::Key::Ident(sym.to_string())),
        Str(swc::Str { value, span, .. }) => {
            Ok(S::Key::Str(parse_string(value, span, source_map)?))
        }
        // keep the raw spelling so 0b101 and .12e3 stay distinguishable
        Num(swc::Number { value, span }) => {
            let raw = source_map
                .span_to_snippet(span)
                .unwrap_or_else(|_| match parse_num(value) {
                    S::Num::Int(i) => i.to_string(),
                    S::Num::Float(f) => f.to_string(),
                });
            Ok(S::Key::Num(raw))
        }
        Computed(swc::ComputedPropName { expr, span: _ }) => {
            Ok(S::Key::Computed(parse_expr(*expr, source_map)?))
        }
    }
}

fn parse_binary_op(op: swc::BinaryOp, span: Span, source_map: &SourceMap) -> ParseResult<S::BinOp> {
    use swc::BinaryOp::*;
    use S::BinOp::*;
    use S::BinaryOp as B;
    use S::LogicalOp as L;
    match op {
        EqEq => Ok(BinaryOp(B::Equal)),
        NotEq => Ok(BinaryOp(B::NotEqual)),
        EqEqEq => Ok(BinaryOp(B::StrictEqual)),
        NotEqEq => Ok(BinaryOp(B::StrictNotEqual)),
        Lt => Ok(BinaryOp(B::LessThan)),
        LtEq => Ok(BinaryOp(B::LessThanEqual)),
        Gt => Ok(BinaryOp(B::GreaterThan)),
        GtEq => Ok(BinaryOp(B::GreaterThanEqual)),
        LShift => Ok(BinaryOp(B::LeftShift)),
        RShift => Ok(BinaryOp(B::RightShift)),
        ZeroFillRShift => Ok(BinaryOp(B::UnsignedRightShift)),
        Add => Ok(BinaryOp(B::Plus)),
        Sub => Ok(BinaryOp(B::Minus)),
        Mul => Ok(BinaryOp(B::Times)),
        Div => Ok(BinaryOp(B::Over)),
        Mod => Ok(BinaryOp(B::Mod)),
        BitOr => Ok(BinaryOp(B::Or)),
        BitXor => Ok(BinaryOp(B::XOr)),
        BitAnd => Ok(BinaryOp(B::And)),
        In => Ok(BinaryOp(B::In)),
        InstanceOf => Ok(BinaryOp(B::InstanceOf)),
        Exp => Ok(BinaryOp(B::PowerOf)),
        NullishCoalescing => unsupported!(span, source_map),
        LogicalOr => Ok(LogicalOp(L::Or)),
        LogicalAnd => Ok(LogicalOp(L::And)),
    }
}

fn parse_unary_op(
    op: swc::UnaryOp,
    _span: Span,
    _source_map: &SourceMap,
) -> ParseResult<S::UnaryOp> {
    use swc::UnaryOp::*;
    use S::UnaryOp as U;
    match op {
        Minus => Ok(U::Minus),
        Plus => Ok(U::Plus),
        Bang => Ok(U::Not),
        Tilde => Ok(U::Tilde),
        TypeOf => Ok(U::TypeOf),
        Void => Ok(U::Void),
        Delete => Ok(U::Delete),
    }
}

fn parse_assign_op(
    op: swc::AssignOp,
    span: Span,
    source_map: &SourceMap,
) -> ParseResult<S::AssignOp> {
    use swc::AssignOp::*;
    use S::AssignOp as A;
    match op {
        Assign => Ok(A::Equal),
        AddAssign => Ok(A::PlusEqual),
        SubAssign => Ok(A::MinusEqual),
        MulAssign => Ok(A::TimesEqual),
        DivAssign => Ok(A::DivEqual),
        ModAssign => Ok(A::ModEqual),
        LShiftAssign => Ok(A::LeftShiftEqual),
        RShiftAssign => Ok(A::RightShiftEqual),
        ZeroFillRShiftAssign => Ok(A::UnsignedRightShiftEqual),
        BitOrAssign => Ok(A::OrEqual),
        BitXorAssign => Ok(A::XOrEqual),
        BitAndAssign => Ok(A::AndEqual),
        ExpAssign => Ok(A::PowerOfEqual),
        AndAssign => unsupported!(span, source_map),
        OrAssign => unsupported!(span, source_map),
        NullishAssign => unsupported!(span, source_map),
    }
}

fn parse_update_op(op: swc::UpdateOp, prefix: bool) -> S::UnaryAssignOp {
    use swc::UpdateOp::*;
    use S::UnaryAssignOp as U;
    match (op, prefix) {
        (PlusPlus, true) => U::PreInc,
        (PlusPlus, false) => U::PostInc,
        (MinusMinus, true) => U::PreDec,
        (MinusMinus, false) => U::PostDec,
    }
}

/// Parse an expression into an lvalue. `span` is the span of the surrounding
/// expr.
fn parse_lvalue_from_expr(
    expr: swc::Expr,
    span: Span,
    source_map: &SourceMap,
) -> ParseResult<S::LValue> {
    use swc::Expr::*;
    match expr {
        Ident(id) => Ok(S::LValue::Id(parse_id(id))),
        Member(swc::MemberExpr {
            obj,
            prop,
            computed: false,
            span,
        }) => match *prop {
            Ident(prop) => {
                let obj = parse_expr_or_super(obj, source_map)?;
                let prop = parse_id(prop);
                Ok(S::LValue::Dot(obj, prop))
            }
            other => unsupported_message(
                &format!("unexpected syntax on RHS of dot: {:?}", other),
                span,
                source_map,
            ),
        },
        Member(swc::MemberExpr {
            obj,
            prop,
            computed: true,
            span: _,
        }) => {
            let obj = parse_expr_or_super(obj, source_map)?;
            let prop = parse_expr(*prop, source_map)?;
            Ok(S::LValue::Bracket(obj, prop))
        }
        _other => unsupported_message("invalid lvalue", span, source_map),
    }
}

/// Parses a pattern or expression as an lvalue. `span` is the span of the
/// surrounding expression.
fn parse_pat_or_expr(
    poe: swc::PatOrExpr,
    span: Span,
    source_map: &SourceMap,
) -> ParseResult<S::LValue> {
    use swc::PatOrExpr::*;
    match poe {
        Expr(expr) => parse_lvalue_from_expr(*expr, span, source_map),
        Pat(pat) => parse_lvalue_from_pattern(*pat, span, source_map),
    }
}

fn parse_decl(decl: swc::Decl, source_map: &SourceMap) -> ParseResult<S::Stmt> {
    use swc::Decl::*;
    match decl {
        // let and const fold to var, see above
        Var(swc::VarDecl { decls, .. }) => {
            let decls: ParseResult<Vec<_>> = decls
                .into_iter()
                .map(|d| parse_var_declarator(d, source_map))
                .collect();
            Ok(S::Stmt::VarDecl(decls?))
        }
        Fn(swc::FnDecl {
            ident,
            declare: _,
            function,
        }) => {
            let ident = parse_id(ident);
            let func = parse_function(function, source_map)?;
            Ok(S::Stmt::Func(ident, func))
        }
        unsupported_decl => unsupported!(span_from_decl(unsupported_decl), source_map),
    }
}

fn parse_function(function: swc::Function, source_map: &SourceMap) -> ParseResult<S::Func> {
    let swc::Function {
        params,
        decorators,
        span,
        body,
        is_generator,
        is_async,
        ..
    } = function;
    if is_async {
        return unsupported_message("async not supported", span, source_map);
    }
    if !decorators.is_empty() {
        return unsupported_message("decorators not supported", span, source_map);
    }
    let params: ParseResult<Vec<_>> = params
        .into_iter()
        .map(|p| parse_func_arg(p, source_map))
        .collect();
    let body = match body {
        Some(block) => parse_block(block, source_map)?,
        None => S::Stmt::Empty,
    };

    Ok(S::Func::new(None, params?, body, is_generator))
}

/// Convert a numeric value from the parser into our AST's numbers.
///
/// SWC stores all numeric literals in f64's; if i32 round-trips the value,
/// call it an int.
fn parse_num(value: f64) -> S::Num {
    if (value as i32) as f64 == value {
        S::Num::Int(value as i32)
    } else {
        S::Num::Float(value)
    }
}

fn span_from_decl(decl: swc::Decl) -> Span {
    use swc::Decl::*;
    use swc::*;
    match decl {
        Class(ClassDecl {
            class: swc::Class { span, .. },
            ..
        })
        | Fn(FnDecl {
            function: Function { span, .. },
            ..
        })
        | Var(VarDecl { span, .. })
        | TsInterface(TsInterfaceDecl { span, .. })
        | TsTypeAlias(TsTypeAliasDecl { span, .. })
        | TsEnum(TsEnumDecl { span, .. })
        | TsModule(TsModuleDecl { span, .. }) => span,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constructors::*;
    use crate::syntax::*;

    fn program_stmts(src: &str) -> Vec<Stmt> {
        match parse(src).unwrap() {
            Stmt::Block(stmts) => stmts,
            other => panic!("expected a program block, got {:?}", other),
        }
    }

    fn first_object(src: &str) -> Vec<Property> {
        match program_stmts(src).remove(0) {
            Stmt::VarDecl(mut decls) => match *decls.remove(0).init.unwrap() {
                Expr::Object(props) => props,
                other => panic!("expected an object literal, got {:?}", other),
            },
            other => panic!("expected a var statement, got {:?}", other),
        }
    }

    #[test]
    fn shorthand_properties_keep_their_kind() {
        let props = first_object("var o = { x, y: 1 };");
        assert_eq!(props[0].kind, PropKind::Shorthand);
        assert_eq!(props[0].key, Key::Ident("x".into()));
        assert_eq!(props[0].value, id_("x"));
        assert_eq!(props[1].kind, PropKind::Init);
    }

    #[test]
    fn methods_parse_as_anonymous_functions() {
        let props = first_object("var o = { foo(a) { return a; } };");
        assert_eq!(props[0].kind, PropKind::Method { generator: false });
        match &props[0].value {
            Expr::Func(f) => {
                assert_eq!(f.name, None);
                assert_eq!(f.params, vec!["a".to_string()]);
                assert!(!f.generator);
            }
            other => panic!("expected a function value, got {:?}", other),
        }
    }

    #[test]
    fn generator_methods_keep_the_star() {
        let props = first_object("var o = { *gen() { yield 1; } };");
        assert_eq!(props[0].kind, PropKind::Method { generator: true });
        match &props[0].value {
            Expr::Func(f) => assert!(f.generator),
            other => panic!("expected a function value, got {:?}", other),
        }
    }

    #[test]
    fn numeric_keys_keep_their_raw_spelling() {
        let props = first_object("var o = { 0b101: a, 0xFFFF: b, .12e3: c };");
        assert_eq!(props[0].key, Key::Num("0b101".into()));
        assert_eq!(props[1].key, Key::Num("0xFFFF".into()));
        assert_eq!(props[2].key, Key::Num(".12e3".into()));
    }

    #[test]
    fn computed_keys_hold_the_expression() {
        let props = first_object("var o = { [a + 1]: b };");
        match &props[0].key {
            Key::Computed(Expr::Binary(..)) => (),
            other => panic!("expected a computed binary key, got {:?}", other),
        }
    }

    #[test]
    fn arrows_fold_to_function_expressions() {
        let stmts = program_stmts("var f = (a) => a + 1;");
        match &stmts[0] {
            Stmt::VarDecl(decls) => match decls[0].init.as_deref() {
                Some(Expr::Func(f)) => {
                    assert_eq!(f.name, None);
                    match &*f.body {
                        Stmt::Block(body) => assert!(matches!(body[0], Stmt::Return(_))),
                        other => panic!("expected a block body, got {:?}", other),
                    }
                }
                other => panic!("expected a function initializer, got {:?}", other),
            },
            other => panic!("expected a var statement, got {:?}", other),
        }
    }

    #[test]
    fn let_and_const_fold_to_var() {
        let stmts = program_stmts("let a = 1; const b = 2;");
        assert!(matches!(stmts[0], Stmt::VarDecl(_)));
        assert!(matches!(stmts[1], Stmt::VarDecl(_)));
    }

    #[test]
    fn object_spread_is_rejected() {
        match parse("var o = { ...rest };") {
            Err(ParseError::Unsupported(_)) => (),
            other => panic!("expected an unsupported error, got {:?}", other),
        }
    }

    #[test]
    fn getters_are_rejected() {
        match parse("var o = { get x() { return 1; } };") {
            Err(ParseError::Unsupported(_)) => (),
            other => panic!("expected an unsupported error, got {:?}", other),
        }
    }
}
