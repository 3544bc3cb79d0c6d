//! Abstract Syntax Tree definitions for Iblang
//!
//! Nodes are plain owned values: every child is held by exactly one parent
//! through `Box` or `Vec`, and the whole tree drops with its `Module`.

use serde::Serialize;

use crate::utils::Span;

/// A complete source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub items: Vec<ModuleItem>,
    pub span: Span,
}

/// Top-level items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ModuleItem {
    Import(Import),
    Decl(Declaration),
}

/// `import "path"`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Import {
    pub path: String,
    pub span: Span,
}

/// A declaration with its visibility
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub is_pub: bool,
    pub kind: DeclKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeclKind {
    Fn(FnDef),
    Struct(StructDef),
    Union(StructDef),
    Enum(EnumDef),
    ExternFn(Prototype),
    ExternGlobal(ExternGlobal),
    Const(GlobalConst),
    Var(VarDecl),
}

/// Function signature: name, parameters, return type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prototype {
    pub name: Ident,
    pub params: Vec<Param>,
    /// Parameter list ends in `...`
    pub variadic: bool,
    /// `None` means void
    pub ret_type: Option<TypeIdent>,
    pub span: Span,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeIdent,
    pub span: Span,
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FnDef {
    pub proto: Prototype,
    pub body: Block,
    pub span: Span,
}

/// Struct or union definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructDef {
    pub name: Ident,
    pub fields: Vec<Field>,
    pub span: Span,
}

/// Struct field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: Ident,
    pub ty: TypeIdent,
    pub span: Span,
}

/// Enum definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDef {
    pub name: Ident,
    pub variants: Vec<Variant>,
    pub span: Span,
}

/// Enum variant with an optional explicit value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub name: Ident,
    pub value: Option<Expr>,
    pub span: Span,
}

/// `extern name: type`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternGlobal {
    pub name: Ident,
    pub ty: TypeIdent,
    pub span: Span,
}

/// Top-level constant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalConst {
    pub name: Ident,
    pub value: ConstValue,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConstValue {
    /// `const name [: type] = expr;`
    Expr { ty: Option<TypeIdent>, value: Expr },
    /// `const name = import "path";`
    Import(Import),
}

/// `let name [: type] = expr;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecl {
    pub name: Ident,
    pub ty: Option<TypeIdent>,
    pub value: Expr,
    pub span: Span,
}

/// `const name [: type] = expr;` inside a block
pub type ConstDecl = VarDecl;

/// Type annotation: `**T[a][b]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeIdent {
    /// Number of leading `*`, not counting the one in `*any`
    pub pointer_depth: usize,
    pub base: TypeBase,
    /// Array sizes, outermost first
    pub array_dims: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeBase {
    /// `*any`
    AnyPointer,
    Primitive(PrimitiveType),
    Named(Ident),
    Function(FnType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimitiveType {
    Int,
    Str,
    Char,
    Bool,
    Float,
}

/// `fn(T, U, ...): R`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FnType {
    pub params: Vec<TypeIdent>,
    pub variadic: bool,
    pub ret_type: Option<Box<TypeIdent>>,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Let(VarDecl),
    Const(ConstDecl),
    Block(Block),
    /// return [expr];
    Return {
        value: Option<Expr>,
        span: Span,
    },
    If(IfStmt),
    /// loop { ... }
    Loop {
        body: Block,
        span: Span,
    },
    /// while cond { ... }
    While {
        cond: Expr,
        body: Block,
        span: Span,
    },
    For(ForStmt),
    Match(MatchStmt),
    Break { span: Span },
    Continue { span: Span },
    /// Expression statement; the span includes the `;`
    Expr { expr: Expr, span: Span },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_block: Block,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ElseBranch {
    If(Box<IfStmt>),
    Block(Block),
}

/// for init; cond; step { ... }
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStmt {
    pub init: ForInit,
    pub cond: Expr,
    pub step: Expr,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForInit {
    Let(VarDecl),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStmt {
    pub subject: Expr,
    pub arms: Vec<MatchArm>,
    pub span: Span,
}

/// Match arm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchArm {
    pub patterns: Vec<Pattern>,
    pub body: ArmBody,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArmBody {
    Block(Block),
    Return { value: Option<Expr>, span: Span },
    Match(Box<MatchStmt>),
    Break { span: Span },
    Continue { span: Span },
    Expr(Expr),
}

/// Pattern for matching
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Pattern {
    Number { text: String, span: Span },
    Char { value: char, span: Span },
    /// `a.b` or `A::B`
    Path { segments: Vec<Ident>, span: Span },
    /// `_`
    Wildcard { span: Span },
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Literal value
    Literal(Literal),
    /// Identifier
    Ident(Ident),
    /// Binary operation, including member access, paths and indexing
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// Unary operation
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        span: Span,
    },
    /// Cast (expr as Type)
    Cast {
        expr: Box<Expr>,
        ty: TypeIdent,
        span: Span,
    },
    /// Function call
    Call {
        callee: Ident,
        args: Vec<Expr>,
        span: Span,
    },
    /// Struct literal
    StructInit {
        name: Ident,
        fields: Vec<FieldInit>,
        span: Span,
    },
    /// Array literal
    ArrayInit {
        elements: Vec<Expr>,
        span: Span,
    },
    /// sizeof(Type)
    SizeOf {
        ty: TypeIdent,
        span: Span,
    },
    /// Parenthesized expression
    Group {
        inner: Box<Expr>,
        span: Span,
    },
}

/// `field: value` inside a struct literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldInit {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// Digits as written; int and float are not told apart here
    Number { text: String, span: Span },
    String { value: String, span: Span },
    Char { value: char, span: Span },
    Bool { value: bool, span: Span },
    Null { span: Span },
}

impl Literal {
    pub fn span(&self) -> Span {
        match self {
            Literal::Number { span, .. } => *span,
            Literal::String { span, .. } => *span,
            Literal::Char { span, .. } => *span,
            Literal::Bool { span, .. } => *span,
            Literal::Null { span } => *span,
        }
    }
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    // Postfix
    Path,
    Member,
    Index,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
    // Assignment
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl BinOp {
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            BinOp::Assign
                | BinOp::AddAssign
                | BinOp::SubAssign
                | BinOp::MulAssign
                | BinOp::DivAssign
                | BinOp::ModAssign
        )
    }
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    /// Dereference (*)
    Deref,
    /// Address-of (&)
    AddrOf,
    /// Negation (-)
    Neg,
    /// Logical not (!)
    Not,
    /// Unary plus (+)
    Plus,
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span(),
            Expr::Ident(ident) => ident.span,
            Expr::Binary { span, .. } => *span,
            Expr::Unary { span, .. } => *span,
            Expr::Cast { span, .. } => *span,
            Expr::Call { span, .. } => *span,
            Expr::StructInit { span, .. } => *span,
            Expr::ArrayInit { span, .. } => *span,
            Expr::SizeOf { span, .. } => *span,
            Expr::Group { span, .. } => *span,
        }
    }
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Let(decl) | Stmt::Const(decl) => decl.span,
            Stmt::Block(block) => block.span,
            Stmt::Return { span, .. } => *span,
            Stmt::If(stmt) => stmt.span,
            Stmt::Loop { span, .. } => *span,
            Stmt::While { span, .. } => *span,
            Stmt::For(stmt) => stmt.span,
            Stmt::Match(stmt) => stmt.span,
            Stmt::Break { span } => *span,
            Stmt::Continue { span } => *span,
            Stmt::Expr { span, .. } => *span,
        }
    }
}

impl ModuleItem {
    pub fn span(&self) -> Span {
        match self {
            ModuleItem::Import(import) => import.span,
            ModuleItem::Decl(decl) => decl.span,
        }
    }
}

/// Serialize a module to JSON, optionally dropping every `span` field.
///
/// Span-free output compares equal for sources that differ only in
/// layout, which makes it the structural form of the tree.
pub fn to_json(module: &Module, include_spans: bool) -> serde_json::Value {
    let mut value = serde_json::to_value(module).unwrap_or(serde_json::Value::Null);
    if !include_spans {
        strip_spans(&mut value);
    }
    value
}

fn strip_spans(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.remove("span");
            map.values_mut().for_each(strip_spans);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(strip_spans),
        _ => {}
    }
}
