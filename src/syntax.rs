//! The ES5-plus-object-sugar AST that the lowering pass operates on.
//!
//! This is a closed set of variants: everything the parser cannot map onto
//! it is rejected up front, so every pass can match exhaustively.

use crate::scope::ScopeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Plus,
    Minus,
    Times,
    Over,
    Mod,
    Or,
    XOr,
    And,
    In,
    InstanceOf,
    PowerOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    BinaryOp(BinaryOp),
    LogicalOp(LogicalOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
    Tilde,
    TypeOf,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Equal,
    PlusEqual,
    MinusEqual,
    TimesEqual,
    DivEqual,
    ModEqual,
    LeftShiftEqual,
    RightShiftEqual,
    UnsignedRightShiftEqual,
    OrEqual,
    XOrEqual,
    AndEqual,
    PowerOfEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryAssignOp {
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Num {
    Int(i32),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    String(String),
    Bool(bool),
    Null,
    Num(Num),
    Undefined,
}

pub type Id = String;

/// The key of one object-literal property.
#[derive(Debug, PartialEq)]
pub enum Key {
    /// A bare identifier key (including reserved words, e.g. `catch:`).
    Ident(String),
    /// A string key; holds the decoded string value.
    Str(String),
    /// A numeric key. Holds the raw source text (`0b101`, `.12e3`, `0xFFFF`)
    /// so that normalization can be radix-aware and everything else can pass
    /// through spelled exactly as written.
    Num(String),
    /// `[expr]:` — evaluated at construction time.
    Computed(Expr),
}

/// How a property was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    /// `key: value`
    Init,
    /// `{ x }`, sugar for `{ x: x }`
    Shorthand,
    /// `{ key() {} }` or `{ *key() {} }`; the value is always `Expr::Func`
    Method { generator: bool },
}

#[derive(Debug, PartialEq)]
pub struct Property {
    pub key: Key,
    pub value: Expr,
    pub kind: PropKind,
}

/// A function, either an expression, a declaration body, or a method value.
///
/// `scope` is `None` until the scope-resolution walk has run; passes that
/// need it run strictly after resolution.
#[derive(Debug, PartialEq)]
pub struct Func {
    pub name: Option<Id>,
    pub params: Vec<Id>,
    pub body: Box<Stmt>,
    pub generator: bool,
    pub scope: Option<ScopeId>,
}

impl Func {
    pub fn new(name: Option<Id>, params: Vec<Id>, body: Stmt, generator: bool) -> Func {
        Func {
            name,
            params,
            body: Box::new(body),
            generator,
            scope: None,
        }
    }

    /// The scope assigned by resolution. Panics if resolution has not run,
    /// which is a programming error in the host pipeline.
    pub fn resolved_scope(&self) -> ScopeId {
        self.scope.expect("scope resolution has not run on this tree")
    }
}

#[derive(Debug, PartialEq)]
pub enum LValue {
    Id(Id),
    Dot(Expr, Id),
    Bracket(Expr, Expr),
}

#[derive(Debug, PartialEq)]
pub enum Expr {
    Lit(Lit),
    Array(Vec<Expr>),
    Object(Vec<Property>),
    This,
    Id(Id),
    Dot(Box<Expr>, Id),
    Bracket(Box<Expr>, Box<Expr>),
    New(Box<Expr>, Vec<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    UnaryAssign(UnaryAssignOp, Box<LValue>),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    Assign(AssignOp, Box<LValue>, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    Func(Func),
    /// `yield e` / `yield* e`; true = delegating (`yield*`)
    Yield(Option<Box<Expr>>, bool),
    Seq(Vec<Expr>),
}

#[derive(Debug, PartialEq)]
pub struct VarDecl {
    pub name: Id,
    /// `None` for an uninitialized binding (`var obj;`)
    pub init: Option<Box<Expr>>,
}

#[derive(Debug, PartialEq)]
pub enum ForInit {
    Expr(Box<Expr>),
    Decl(Vec<VarDecl>),
}

#[derive(Debug, PartialEq)]
pub enum Stmt {
    Block(Vec<Stmt>),
    Empty,
    Expr(Box<Expr>),
    If(Box<Expr>, Box<Stmt>, Box<Stmt>),
    Switch(Box<Expr>, Vec<(Expr, Stmt)>, Box<Stmt>),
    While(Box<Expr>, Box<Stmt>),
    DoWhile(Box<Stmt>, Box<Expr>),
    For(ForInit, Box<Expr>, Box<Expr>, Box<Stmt>),
    /// true = declare variable, false = assign to existing
    ForIn(bool, Id, Box<Expr>, Box<Stmt>),
    Label(Id, Box<Stmt>),
    Break(Option<Id>),
    Continue(Option<Id>),
    Catch(Box<Stmt>, Id, Box<Stmt>),
    Finally(Box<Stmt>, Box<Stmt>),
    Throw(Box<Expr>),
    VarDecl(Vec<VarDecl>),
    Func(Id, Func),
    Return(Box<Expr>),
}
