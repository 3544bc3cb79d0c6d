use super::*;
use crate::frontend::ast::to_json;
use pretty_assertions::assert_eq;
use serde_json::Value;

fn parse(source: &str) -> (Module, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source, 0));
    let module = parser.parse_module();
    (module, parser.errors())
}

fn parse_ok(source: &str) -> Module {
    let (module, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    module
}

fn decl(module: &Module, index: usize) -> &Declaration {
    match &module.items[index] {
        ModuleItem::Decl(decl) => decl,
        other => panic!("expected declaration, got {:?}", other),
    }
}

fn fn_body(module: &Module, index: usize) -> &Block {
    match &decl(module, index).kind {
        DeclKind::Fn(f) => &f.body,
        other => panic!("expected fn, got {:?}", other),
    }
}

/// Statements of `fn t() { <body> }`
fn stmts(body: &str) -> Vec<Stmt> {
    let module = parse_ok(&format!("fn t() {{ {} }}", body));
    fn_body(&module, 0).stmts.clone()
}

/// The expression of the statement `<source>;`
fn expr(source: &str) -> Expr {
    match stmts(&format!("{};", source)).remove(0) {
        Stmt::Expr { expr, .. } => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn sexpr(e: &Expr) -> String {
    match e {
        Expr::Literal(Literal::Number { text, .. }) => text.clone(),
        Expr::Literal(Literal::String { value, .. }) => format!("{:?}", value),
        Expr::Literal(Literal::Char { value, .. }) => format!("{:?}", value),
        Expr::Literal(Literal::Bool { value, .. }) => value.to_string(),
        Expr::Literal(Literal::Null { .. }) => "null".to_string(),
        Expr::Ident(ident) => ident.name.clone(),
        Expr::Binary { op, left, right, .. } => {
            format!("({} {} {})", binop(*op), sexpr(left), sexpr(right))
        }
        Expr::Unary { op, operand, .. } => format!("({:?} {})", op, sexpr(operand)),
        Expr::Cast { expr, ty, .. } => format!("(as {} {})", sexpr(expr), type_str(ty)),
        Expr::Call { callee, args, .. } => {
            let args: Vec<String> = args.iter().map(sexpr).collect();
            format!("(call {} [{}])", callee.name, args.join(" "))
        }
        Expr::StructInit { name, fields, .. } => {
            let fields: Vec<String> = fields
                .iter()
                .map(|f| format!("{}: {}", f.name.name, sexpr(&f.value)))
                .collect();
            format!("({} {{{}}})", name.name, fields.join(", "))
        }
        Expr::ArrayInit { elements, .. } => {
            let elements: Vec<String> = elements.iter().map(sexpr).collect();
            format!("[{}]", elements.join(" "))
        }
        Expr::SizeOf { ty, .. } => format!("(sizeof {})", type_str(ty)),
        Expr::Group { inner, .. } => format!("(group {})", sexpr(inner)),
    }
}

fn binop(op: BinOp) -> &'static str {
    match op {
        BinOp::Path => "::",
        BinOp::Member => ".",
        BinOp::Index => "[]",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::And => "&&",
        BinOp::Or => "||",
        BinOp::Assign => "=",
        BinOp::AddAssign => "+=",
        BinOp::SubAssign => "-=",
        BinOp::MulAssign => "*=",
        BinOp::DivAssign => "/=",
        BinOp::ModAssign => "%=",
    }
}

fn type_str(ty: &TypeIdent) -> String {
    let base = match &ty.base {
        TypeBase::AnyPointer => "*any".to_string(),
        TypeBase::Primitive(p) => format!("{:?}", p).to_lowercase(),
        TypeBase::Named(name) => name.name.clone(),
        TypeBase::Function(f) => {
            let mut params: Vec<String> = f.params.iter().map(type_str).collect();
            if f.variadic {
                params.push("...".to_string());
            }
            match &f.ret_type {
                Some(ret) => format!("fn({}): {}", params.join(", "), type_str(ret)),
                None => format!("fn({})", params.join(", ")),
            }
        }
    };
    let dims: String = ty
        .array_dims
        .iter()
        .map(|d| format!("[{}]", sexpr(d)))
        .collect();
    format!("{}{}{}", "*".repeat(ty.pointer_depth), base, dims)
}

fn first_span(value: &Value) -> Option<u64> {
    match value {
        Value::Object(map) => map
            .get("span")
            .and_then(|s| s["start"].as_u64())
            .or_else(|| map.values().find_map(first_span)),
        Value::Array(items) => items.iter().find_map(first_span),
        _ => None,
    }
}

/// Every span lies inside its parent's; array elements are in source order
fn check_spans(value: &Value, parent: Option<(u64, u64)>) {
    match value {
        Value::Object(map) => {
            let own = map
                .get("span")
                .and_then(|s| Some((s["start"].as_u64()?, s["end"].as_u64()?)));
            if let (Some(own), Some(parent)) = (own, parent) {
                assert!(
                    parent.0 <= own.0 && own.1 <= parent.1,
                    "span {:?} escapes parent {:?} in {}",
                    own,
                    parent,
                    value
                );
            }
            for (key, child) in map {
                if key != "span" {
                    check_spans(child, own.or(parent));
                }
            }
        }
        Value::Array(items) => {
            let starts: Vec<u64> = items.iter().filter_map(first_span).collect();
            assert!(
                starts.windows(2).all(|w| w[0] <= w[1]),
                "siblings out of order: {:?}",
                starts
            );
            for item in items {
                check_spans(item, parent);
            }
        }
        _ => {}
    }
}

const SAMPLE: &str = r#"
import "std/io";
const io = import "std/io";
pub const MAX: int = 100;
let counter: int = 0;
extern fn printf(fmt: *char, ...): int;
extern errno: int;
extern malloc(size: int): *any;

pub struct Point { x: float, y: float, }
union Value { i: int, f: float }
enum Color { Red, Green = 2, Blue }

fn apply(f: fn(int): int, v: int): int {
    return f(v);
}

pub fn main(): int {
    let p = Point { x: 1.5, y: 2 };
    let grid: int[4][8] = [[0], [1]];
    const LIMIT = MAX * 2;
    let ptr: *Point = &p;
    ptr.x = -p.y + 3 * 4 % 5;
    counter += 1;
    if counter > 10 && !done(counter) {
        printf("big\n");
    } else if counter == 0 {
        return 0;
    } else {
        loop { break; }
    }
    while counter < LIMIT { counter = counter + 1; }
    for let i = 0; i < 10; i += 1 {
        if i % 2 == 0 { continue; }
    }
    for counter = 0; counter <= 3; counter = counter + 1 { }
    match counter {
        1 | 2 => printf("small"),
        'a' => { printf("char"); }
        Color.Red | Color::Green => return 1;
        _ => match p.x as int {
            0 => break;
            _ => continue;
        }
    }
    // comment
    /* block */
    let size = sizeof(Point) + sizeof(*int[3]);
    let g = (1 + 2) * grid[0][1];
    return null == ptr || true;
}
"#;

// ==================== Declarations ====================

#[test]
fn test_empty_function() {
    let module = parse_ok("fn main() {}");
    assert_eq!(module.items.len(), 1);
    match &decl(&module, 0).kind {
        DeclKind::Fn(f) => {
            assert_eq!(f.proto.name.name, "main");
            assert!(f.proto.params.is_empty());
            assert!(!f.proto.variadic);
            assert_eq!(f.proto.ret_type, None);
            assert!(f.body.stmts.is_empty());
        }
        other => panic!("expected fn, got {:?}", other),
    }
}

#[test]
fn test_sample_program_parses_cleanly() {
    let module = parse_ok(SAMPLE);
    assert_eq!(module.items.len(), 12);
    assert!(matches!(&module.items[0], ModuleItem::Import(i) if i.path == "std/io"));
    assert!(matches!(&decl(&module, 3).kind, DeclKind::Var(v) if v.name.name == "counter"));
    assert!(decl(&module, 11).is_pub);
    assert_eq!(fn_body(&module, 11).stmts.len(), 14);
}

#[test]
fn test_spans_nest_and_follow_source_order() {
    let module = parse_ok(SAMPLE);
    assert_eq!(module.span, Span::new(0, SAMPLE.len(), 0));
    check_spans(&to_json(&module, true), None);
}

#[test]
fn test_visibility() {
    let module = parse_ok("pub fn a() {} fn b() {} pub struct S { x: int }");
    assert!(decl(&module, 0).is_pub);
    assert!(!decl(&module, 1).is_pub);
    assert!(decl(&module, 2).is_pub);
    // the declaration span covers `pub`
    assert_eq!(decl(&module, 0).span.start, 0);
}

#[test]
fn test_variadic_extern_prototype() {
    let module = parse_ok("extern fn printf(fmt: *char, ...): int;");
    match &decl(&module, 0).kind {
        DeclKind::ExternFn(proto) => {
            assert_eq!(proto.name.name, "printf");
            assert_eq!(proto.params.len(), 1);
            assert_eq!(proto.params[0].name.name, "fmt");
            assert_eq!(type_str(&proto.params[0].ty), "*char");
            assert!(proto.variadic);
            assert_eq!(proto.ret_type.as_ref().map(type_str).as_deref(), Some("int"));
        }
        other => panic!("expected extern fn, got {:?}", other),
    }
}

#[test]
fn test_prototype_forms() {
    let module = parse_ok(
        "fn a(...) {}\n\
         fn b(x: int, y: str,) : void {}\n\
         extern c(p: *any)\n\
         extern d: *char[16];",
    );
    match &decl(&module, 0).kind {
        DeclKind::Fn(f) => {
            assert!(f.proto.params.is_empty());
            assert!(f.proto.variadic);
        }
        other => panic!("expected fn, got {:?}", other),
    }
    match &decl(&module, 1).kind {
        DeclKind::Fn(f) => {
            assert_eq!(f.proto.params.len(), 2);
            assert_eq!(f.proto.ret_type, None);
        }
        other => panic!("expected fn, got {:?}", other),
    }
    assert!(matches!(&decl(&module, 2).kind, DeclKind::ExternFn(p) if p.name.name == "c"));
    match &decl(&module, 3).kind {
        DeclKind::ExternGlobal(global) => {
            assert_eq!(global.name.name, "d");
            assert_eq!(type_str(&global.ty), "*char[16]");
        }
        other => panic!("expected extern global, got {:?}", other),
    }
}

#[test]
fn test_struct_union_enum() {
    let module = parse_ok(
        "struct P { x: int, x: float, }\n\
         union U { i: int }\n\
         enum E { A, B = 1 + 1, C, }",
    );
    match &decl(&module, 0).kind {
        DeclKind::Struct(s) => {
            // duplicate names are kept for later passes to reject
            let names: Vec<&str> = s.fields.iter().map(|f| f.name.name.as_str()).collect();
            assert_eq!(names, vec!["x", "x"]);
        }
        other => panic!("expected struct, got {:?}", other),
    }
    assert!(matches!(&decl(&module, 1).kind, DeclKind::Union(u) if u.fields.len() == 1));
    match &decl(&module, 2).kind {
        DeclKind::Enum(e) => {
            assert_eq!(e.variants.len(), 3);
            assert!(e.variants[0].value.is_none());
            assert_eq!(e.variants[1].value.as_ref().map(sexpr).as_deref(), Some("(+ 1 1)"));
        }
        other => panic!("expected enum, got {:?}", other),
    }
}

#[test]
fn test_global_const_and_var() {
    let module = parse_ok(
        "const io = import \"std/io\";\n\
         const N: int = 4;\n\
         let name = \"x\";",
    );
    match &decl(&module, 0).kind {
        DeclKind::Const(c) => {
            assert_eq!(c.name.name, "io");
            assert!(matches!(&c.value, ConstValue::Import(i) if i.path == "std/io"));
        }
        other => panic!("expected const, got {:?}", other),
    }
    match &decl(&module, 1).kind {
        DeclKind::Const(GlobalConst {
            value: ConstValue::Expr { ty: Some(ty), value },
            ..
        }) => {
            assert_eq!(type_str(ty), "int");
            assert_eq!(sexpr(value), "4");
        }
        other => panic!("expected typed const, got {:?}", other),
    }
    assert!(matches!(&decl(&module, 2).kind, DeclKind::Var(v) if v.ty.is_none()));
}

// ==================== Types ====================

fn let_type(source: &str) -> TypeIdent {
    match stmts(source).remove(0) {
        Stmt::Let(VarDecl { ty: Some(ty), .. }) => ty,
        other => panic!("expected typed let, got {:?}", other),
    }
}

#[test]
fn test_pointer_to_array_type() {
    let ty = let_type("let a: **int[4][8] = null;");
    assert_eq!(ty.pointer_depth, 2);
    assert_eq!(ty.base, TypeBase::Primitive(PrimitiveType::Int));
    let dims: Vec<String> = ty.array_dims.iter().map(sexpr).collect();
    assert_eq!(dims, vec!["4", "8"]);
}

#[test]
fn test_wildcard_pointer() {
    let ty = let_type("let a: *any = null;");
    assert_eq!(ty.pointer_depth, 0);
    assert_eq!(ty.base, TypeBase::AnyPointer);

    let ty = let_type("let a: **any = null;");
    assert_eq!(ty.pointer_depth, 1);
    assert_eq!(ty.base, TypeBase::AnyPointer);

    // without a star `any` is an ordinary type name
    let ty = let_type("let a: any = null;");
    assert!(matches!(ty.base, TypeBase::Named(ref n) if n.name == "any"));
}

#[test]
fn test_function_type() {
    let ty = let_type("let cb: fn(int, *char, ...): bool = f;");
    assert_eq!(type_str(&ty), "fn(int, *char, ...): bool");
    let ty = let_type("let cb: *fn(): void = f;");
    assert_eq!(type_str(&ty), "*fn()");
}

#[test]
fn test_array_size_expressions() {
    let ty = let_type("let a: Point[N * 2][len(xs)] = x;");
    assert_eq!(type_str(&ty), "Point[(* N 2)][(call len [xs])]");
}

// ==================== Expressions ====================

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(sexpr(&expr("1 + 2 * 3")), "(+ 1 (* 2 3))");
    assert_eq!(sexpr(&expr("1 * 2 + 3")), "(+ (* 1 2) 3)");
    assert_eq!(sexpr(&expr("a - b - c")), "(- (- a b) c)");
    assert_eq!(sexpr(&expr("a / b % c")), "(% (/ a b) c)");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(sexpr(&expr("a = b = c")), "(= a (= b c))");
    assert_eq!(sexpr(&expr("a += b -= 1")), "(+= a (-= b 1))");
    assert_eq!(sexpr(&expr("x %= y || z")), "(%= x (|| y z))");
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(sexpr(&expr("a && b || c")), "(|| (&& a b) c)");
    assert_eq!(sexpr(&expr("a || b && c")), "(|| a (&& b c))");
    assert_eq!(sexpr(&expr("a == b && c != d")), "(&& (== a b) (!= c d))");
}

#[test]
fn test_comparison_levels() {
    assert_eq!(sexpr(&expr("a < b == c >= d")), "(== (< a b) (>= c d))");
    assert_eq!(sexpr(&expr("a + 1 <= b")), "(<= (+ a 1) b)");
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(sexpr(&expr("-a * b")), "(* (Neg a) b)");
    assert_eq!(sexpr(&expr("!a && b")), "(&& (Not a) b)");
    assert_eq!(sexpr(&expr("*p = +q")), "(= (Deref p) (Plus q))");
    assert_eq!(sexpr(&expr("-x as int")), "(as (Neg x) int)");
    assert_eq!(sexpr(&expr("- -x")), "(Neg (Neg x))");
}

#[test]
fn test_postfix_binds_tighter_than_unary() {
    assert_eq!(sexpr(&expr("*p.x")), "(Deref (. p x))");
    assert_eq!(sexpr(&expr("&a[0]")), "(AddrOf ([] a 0))");
    assert_eq!(
        sexpr(&expr("a.b[1].c(2)::d")),
        "(:: (. ([] (. a b) 1) (call c [2])) d)"
    );
}

#[test]
fn test_cast() {
    assert_eq!(sexpr(&expr("a * b as float")), "(* a (as b float))");
    assert_eq!(sexpr(&expr("x as int as float")), "(as (as x int) float)");
    assert_eq!(sexpr(&expr("p as *any")), "(as p *any)");
}

#[test]
fn test_primaries() {
    assert_eq!(sexpr(&expr("sizeof(*int[4])")), "(sizeof *int[4])");
    assert_eq!(sexpr(&expr("[1, 2.5, 'c', \"s\", null, true,]")), "[1 2.5 'c' \"s\" null true]");
    assert_eq!(sexpr(&expr("(1 + 2) * 3")), "(* (group (+ 1 2)) 3)");
    assert_eq!(sexpr(&expr("f()")), "(call f [])");
    assert_eq!(sexpr(&expr("f(a, P { x: 1 },)")), "(call f [a (P {x: 1})])");
    assert_eq!(sexpr(&expr("P { x: Q { y: 2 }, z: [] }")), "(P {x: (Q {y: 2}), z: []})");
}

#[test]
fn test_group_keeps_parenthesis_span() {
    let e = expr("(a)");
    assert!(matches!(e, Expr::Group { .. }));
    // `fn t() { ` is 9 bytes
    assert_eq!(e.span(), Span::new(9, 12, 0));
}

// ==================== Struct literal disambiguation ====================

#[test]
fn test_if_condition_is_not_struct_literal() {
    let stmt = stmts("if x { y; } else { z; }").remove(0);
    match stmt {
        Stmt::If(if_stmt) => {
            assert_eq!(sexpr(&if_stmt.cond), "x");
            assert_eq!(if_stmt.then_block.stmts.len(), 1);
            assert!(matches!(if_stmt.else_branch, Some(ElseBranch::Block(ref b)) if b.stmts.len() == 1));
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_if_condition_without_statement_terminators() {
    let (module, errors) = parse("fn t() { if x { y } else { z } }");
    // only the two missing `;` are reported, `x {` is never a literal
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| e.to_string() == "expected `;`, found `}`"));
    match &fn_body(&module, 0).stmts[0] {
        Stmt::If(if_stmt) => {
            assert_eq!(sexpr(&if_stmt.cond), "x");
            assert!(if_stmt.then_block.stmts.is_empty());
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_let_value_is_struct_literal() {
    match stmts("let v = x { y: 1 };").remove(0) {
        Stmt::Let(decl) => assert_eq!(sexpr(&decl.value), "(x {y: 1})"),
        other => panic!("expected let, got {:?}", other),
    }
}

#[test]
fn test_struct_literal_allowed_inside_nested_positions() {
    let body = stmts("if (P { a: 1 }) == q { } while f(P { a: 1 }) { } if xs[P { a: 1 }.a] { }");
    match &body[0] {
        Stmt::If(s) => assert_eq!(sexpr(&s.cond), "(== (group (P {a: 1})) q)"),
        other => panic!("expected if, got {:?}", other),
    }
    match &body[1] {
        Stmt::While { cond, .. } => assert_eq!(sexpr(cond), "(call f [(P {a: 1})])"),
        other => panic!("expected while, got {:?}", other),
    }
    match &body[2] {
        Stmt::If(s) => assert_eq!(sexpr(&s.cond), "([] xs (. (P {a: 1}) a))"),
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_loop_heads_are_not_struct_literals() {
    let body = stmts("while p { } for i = 0; i < n; i = next { } match s { _ => 0, }");
    assert!(matches!(&body[0], Stmt::While { cond: Expr::Ident(i), .. } if i.name == "p"));
    match &body[1] {
        Stmt::For(f) => {
            assert!(matches!(&f.init, ForInit::Expr(e) if sexpr(e) == "(= i 0)"));
            assert_eq!(sexpr(&f.cond), "(< i n)");
            assert_eq!(sexpr(&f.step), "(= i next)");
        }
        other => panic!("expected for, got {:?}", other),
    }
    assert!(matches!(&body[2], Stmt::Match(m) if sexpr(&m.subject) == "s"));
}

#[test]
fn test_block_after_condition_restores_struct_literals() {
    match stmts("if ok { let p = P { a: 1 }; }").remove(0) {
        Stmt::If(s) => match &s.then_block.stmts[0] {
            Stmt::Let(decl) => assert_eq!(sexpr(&decl.value), "(P {a: 1})"),
            other => panic!("expected let, got {:?}", other),
        },
        other => panic!("expected if, got {:?}", other),
    }
}

// ==================== Statements ====================

#[test]
fn test_statement_forms() {
    let body = stmts(
        "const K = 1; { x; } return; return x + 1; loop { break; continue; } \
         if a { } else if b { } else { }",
    );
    assert!(matches!(&body[0], Stmt::Const(c) if c.name.name == "K"));
    assert!(matches!(&body[1], Stmt::Block(b) if b.stmts.len() == 1));
    assert!(matches!(&body[2], Stmt::Return { value: None, .. }));
    assert!(matches!(&body[3], Stmt::Return { value: Some(_), .. }));
    match &body[4] {
        Stmt::Loop { body, .. } => {
            assert!(matches!(body.stmts[0], Stmt::Break { .. }));
            assert!(matches!(body.stmts[1], Stmt::Continue { .. }));
        }
        other => panic!("expected loop, got {:?}", other),
    }
    match &body[5] {
        Stmt::If(s) => match &s.else_branch {
            Some(ElseBranch::If(inner)) => {
                assert_eq!(sexpr(&inner.cond), "b");
                assert!(matches!(inner.else_branch, Some(ElseBranch::Block(_))));
            }
            other => panic!("expected else-if, got {:?}", other),
        },
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_for_with_let_init() {
    match stmts("for let i: int = 0; i < 10; i += 1 { }").remove(0) {
        Stmt::For(f) => {
            match &f.init {
                ForInit::Let(decl) => {
                    assert_eq!(decl.name.name, "i");
                    assert!(decl.ty.is_some());
                }
                other => panic!("expected let init, got {:?}", other),
            }
            assert_eq!(sexpr(&f.step), "(+= i 1)");
        }
        other => panic!("expected for, got {:?}", other),
    }
}

#[test]
fn test_match_arms() {
    let body = stmts(
        "match c { \
            1 | 2 => one(), \
            'a' => { a(); } \
            Color.Red | Color::Green => return 1; \
            _ => match d { 0 => break; _ => continue; } \
            x => last(), \
         }",
    );
    let Stmt::Match(m) = &body[0] else {
        panic!("expected match, got {:?}", body[0]);
    };
    assert_eq!(m.arms.len(), 5);

    assert_eq!(m.arms[0].patterns.len(), 2);
    assert!(matches!(&m.arms[0].patterns[1], Pattern::Number { text, .. } if text == "2"));
    assert!(matches!(&m.arms[0].body, ArmBody::Expr(e) if sexpr(e) == "(call one [])"));

    assert!(matches!(m.arms[1].patterns[0], Pattern::Char { value: 'a', .. }));
    assert!(matches!(m.arms[1].body, ArmBody::Block(_)));

    match &m.arms[2].patterns[..] {
        [Pattern::Path { segments: a, .. }, Pattern::Path { segments: b, .. }] => {
            let a: Vec<&str> = a.iter().map(|s| s.name.as_str()).collect();
            let b: Vec<&str> = b.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(a, vec!["Color", "Red"]);
            assert_eq!(b, vec!["Color", "Green"]);
        }
        other => panic!("expected two paths, got {:?}", other),
    }
    assert!(matches!(m.arms[2].body, ArmBody::Return { value: Some(_), .. }));

    assert!(matches!(m.arms[3].patterns[0], Pattern::Wildcard { .. }));
    match &m.arms[3].body {
        ArmBody::Match(inner) => {
            assert!(matches!(inner.arms[0].body, ArmBody::Break { .. }));
            assert!(matches!(inner.arms[1].body, ArmBody::Continue { .. }));
        }
        other => panic!("expected nested match, got {:?}", other),
    }

    assert!(matches!(&m.arms[4].patterns[0], Pattern::Path { segments, .. } if segments.len() == 1));
}

#[test]
fn test_match_expression_arm_requires_comma() {
    let (_, errors) = parse("fn t() { match c { 1 => a() 2 => b(), } }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "expected `,`, found number `2`");
}

#[test]
fn test_last_expression_arm_still_needs_comma() {
    let (module, errors) = parse("fn t() { match c { 1 => a() } after(); }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "expected `,`, found `}`");
    // recovery skips the whole match, the next statement survives
    assert_eq!(fn_body(&module, 0).stmts.len(), 1);
}

#[test]
fn test_match_block_arm_takes_no_comma() {
    let (_, errors) = parse("fn t() { match c { 1 => { }, 2 => b(), } }");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], Error::ExpectedPattern { .. }));
}

// ==================== Error recovery ====================

#[test]
fn test_unterminated_string_then_valid_function() {
    let (module, errors) = parse("let s = \"abc\nfn main() { return 0; }\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], Error::UnterminatedString { .. }));
    assert_eq!(module.items.len(), 1);
    match &decl(&module, 0).kind {
        DeclKind::Fn(f) => {
            assert_eq!(f.proto.name.name, "main");
            assert_eq!(f.body.stmts.len(), 1);
        }
        other => panic!("expected fn, got {:?}", other),
    }
}

#[test]
fn test_bad_statement_inside_function() {
    let (module, errors) = parse("fn a() {\n  let s = \"abc\n  return 1;\n}\nfn b() {}\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(module.items.len(), 2);
    assert!(matches!(fn_body(&module, 0).stmts[..], [Stmt::Return { .. }]));
}

#[test]
fn test_independent_errors_are_all_reported() {
    let (module, errors) = parse("fn a() { let = 1; ok(); } fn b() { x + ; }");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].to_string(), "expected identifier, found `=`");
    assert_eq!(errors[1].to_string(), "expected expression, found `;`");
    assert_eq!(module.items.len(), 2);
    assert_eq!(fn_body(&module, 0).stmts.len(), 1);
}

#[test]
fn test_missing_semicolon_recovers_at_next_statement() {
    let (module, errors) = parse("fn a() { let x = 1 let y = 2; }");
    assert_eq!(errors.len(), 1);
    assert!(matches!(&fn_body(&module, 0).stmts[..], [Stmt::Let(d)] if d.name.name == "y"));
}

#[test]
fn test_bad_for_header_reported_once() {
    let (module, errors) = parse("fn t() { for ;;; { x; } after(); }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "expected expression, found `;`");
    assert!(matches!(
        &fn_body(&module, 0).stmts[..],
        [Stmt::Expr { expr, .. }] if sexpr(expr) == "(call after [])"
    ));

    let (module, errors) = parse("fn t() { for let i = ; i < 3; i += 1 { x; } y(); }");
    assert_eq!(errors.len(), 1);
    assert_eq!(fn_body(&module, 0).stmts.len(), 1);
}

#[test]
fn test_for_without_body_stops_at_next_statement() {
    let (module, errors) = parse("fn t() { for ; let z = 1; }");
    assert_eq!(errors.len(), 1);
    assert!(matches!(&fn_body(&module, 0).stmts[..], [Stmt::Let(d)] if d.name.name == "z"));
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    let sources = [
        format!("fn t() {{ x = {}1{}; ok(); }}", "(".repeat(10_000), ")".repeat(10_000)),
        format!("fn t() {{ {}{} ok(); }}", "{".repeat(10_000), "}".repeat(10_000)),
        format!("fn t() {{ x = {}y; ok(); }}", "-".repeat(10_000)),
    ];
    for source in &sources {
        let (module, errors) = parse(source);
        assert_eq!(errors.len(), 1, "errors: {:?}", errors);
        assert_eq!(errors[0].code(), "E0104");
        assert_eq!(errors[0].to_string(), "nesting deeper than 64 levels");
        match &fn_body(&module, 0).stmts[..] {
            [.., Stmt::Expr { expr, .. }] => assert_eq!(sexpr(expr), "(call ok [])"),
            other => panic!("expected trailing call, got {:?}", other),
        }
    }
}

#[test]
fn test_moderate_nesting_parses() {
    let source = format!("fn t() {{ x = {}1{}; }}", "(".repeat(40), ")".repeat(40));
    parse_ok(&source);
}

#[test]
fn test_error_inside_match_resumes_after_match() {
    let (module, errors) = parse("fn a() { match c { 1 => ) } after(); }");
    assert_eq!(errors.len(), 1);
    let body = fn_body(&module, 0);
    assert_eq!(body.stmts.len(), 1);
    assert!(matches!(&body.stmts[0], Stmt::Expr { expr, .. } if sexpr(expr) == "(call after [])"));
}

#[test]
fn test_stray_top_level_token() {
    let (module, errors) = parse("} 42 fn main() {}");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "expected declaration (`fn`, `struct`, `union`, `enum`, `extern`, `const`, `let`), found `}`"
    );
    assert_eq!(module.items.len(), 1);
}

#[test]
fn test_unknown_character_reported_once() {
    let (_, errors) = parse("fn main() { let x = 1 @ 2; }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), "E0001");
}

#[test]
fn test_missing_closing_brace() {
    let (module, errors) = parse("fn main() { let x = 1;");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "expected `}`, found end of input");
    assert!(module.items.is_empty());
}

#[test]
fn test_pub_import_is_rejected() {
    let (module, errors) = parse("pub import \"x\"; import \"y\";");
    assert_eq!(errors.len(), 1);
    // recovery resumes at `import`, so the import itself survives
    assert_eq!(module.items.len(), 2);
}

#[test]
fn test_errors_sorted_by_position() {
    let (_, errors) = parse("fn a() { x + ; } fn b() { let s = 'ab'; }");
    assert_eq!(errors.len(), 2);
    assert!(errors[0].span().start < errors[1].span().start);
    assert!(errors[1].is_lexical());
}

// ==================== Whole-tree properties ====================

#[test]
fn test_reparse_is_identical() {
    assert_eq!(parse_ok(SAMPLE), parse_ok(SAMPLE));
}

#[test]
fn test_layout_does_not_change_shape() {
    let compact = parse_ok("fn main(){let x=1+2*f(a,b);if x{return;}}");
    let spaced = parse_ok(
        "fn main() {\n    let x = 1 + 2 * f(a, b);\n    // note\n    if x { return; }\n}\n",
    );
    assert_ne!(compact, spaced);
    assert_eq!(to_json(&compact, false), to_json(&spaced, false));
}
