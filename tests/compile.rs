use minicc::{compile_to_ir, parse, CompileError};

// ── End-to-end scenarios ─────────────────────────────────────────────
// Each scenario drives the whole pipeline and checks the shape of the
// emitted module.

#[test]
fn minimal_main() {
    let source = "int main() { return 0; }";
    let program = parse(source).expect("should parse");
    let rendered = program.to_string();
    assert!(rendered.starts_with("Program\n |-Function Definition\n"));
    assert!(rendered.contains("Return expression"));

    let text = compile_to_ir(source).expect("should compile").module.to_string();
    assert_eq!(text.matches("define ").count(), 1);
    assert!(text.contains("define i32 @main() {"));
    assert!(text.contains("ret i32 0"));
}

#[test]
fn add_function() {
    let text = ir("int add(int a, int b) { return a + b; }");
    assert!(text.contains("define i32 @add(i32 %a, i32 %b) {"));
    assert!(text.contains("add i32"));
}

#[test]
fn int_returned_from_float_function_compiles() {
    // No conversion is inserted at return; the module still verifies.
    let text = ir("float f() { int x; x = 1; return x; }");
    assert!(text.contains("define float @f() {"));
    assert!(text.contains("ret i32"));
    assert!(!text.contains("sitofp"));
}

#[test]
fn while_loop_shape() {
    let text = ir("int main() { int x; x = 5; while (x > 0) { x = x - 1; } return x; }");
    assert!(text.contains("header:"));
    assert!(text.contains("body:"));
    assert!(text.contains("end:"));
    assert!(text.contains("icmp ne"));
    assert!(text.contains("br i1 %whilecond, label %body, label %end"));
}

#[test]
fn extern_putchar_call() {
    let text = ir("extern int putchar(int c); int main() { putchar(65); return 0; }");
    assert!(text.contains("declare i32 @putchar(i32)"));
    assert!(text.contains("call i32 @putchar(i32 65)"));
}

#[test]
fn undefined_function_call_fails() {
    let err = compile_to_ir("int main() { foo(); return 0; }").unwrap_err();
    assert_eq!(err, CompileError::UndefinedFunction("foo".to_string()));
}

// ── Scope and typing properties ──────────────────────────────────────

#[test]
fn if_local_does_not_leak_to_containing_block() {
    let err = compile_to_ir("int main() { if (true) { int y; y = 1; } return y; }").unwrap_err();
    assert_eq!(err, CompileError::UndefinedVariable("y".to_string()));
}

#[test]
fn int_plus_float_promotes_the_int_operand() {
    let lowered = compile_to_ir("float f(int a) { return a + 0.5; }").expect("should compile");
    let text = lowered.module.to_string();
    assert!(text.contains("sitofp"));
    assert!(text.contains("fadd float"));
    assert_eq!(lowered.warnings.len(), 1);
}

#[test]
fn float_assigned_from_int_converts_then_stores() {
    let lowered = compile_to_ir("int main() { float x; x = 1; return 0; }").expect("should compile");
    let text = lowered.module.to_string();
    let conv = text.find("sitofp i32 1 to float").expect("conversion emitted");
    let store = text.find("store float").expect("store emitted");
    assert!(conv < store);
    assert_eq!(lowered.warnings.len(), 1);
}

#[test]
fn arity_mismatch_fails_with_expected_and_actual() {
    let err = compile_to_ir(
        "extern int putchar(int c); int main() { putchar(); return 0; }",
    )
    .unwrap_err();
    assert_eq!(
        err,
        CompileError::ArityMismatch {
            name: "putchar".to_string(),
            expected: 1,
            actual: 0,
        }
    );
}

// ── Parser/printer surface ───────────────────────────────────────────

#[test]
fn ast_tree_golden() {
    let program = parse("int g; void f(int a) { if (a > 0) { f(a - 1); } }").expect("should parse");
    let expected = "\
Program
 |-Declared int g
 |-Function Definition
 |- |-Function Prototype void f with parameters
 |- |- |-Function parameter int a
 |- |-Block
 |- |- |-If
 |- |- |- |-Binary operation
 |- |- |- |- |-a
 |- |- |- |- |->
 |- |- |- |- |-0
 |- |- |- |-Block
 |- |- |- |- |-Calling function f with arguments
 |- |- |- |- |- |-Binary operation
 |- |- |- |- |- |- |-a
 |- |- |- |- |- |- |--
 |- |- |- |- |- |- |-1
";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn precedence_end_to_end() {
    // `1 + 2 * 3` folds multiplication under addition; the emitted IR
    // multiplies first.
    let text = ir("int main() { return 1 + 2 * 3; }");
    let mul = text.find("mul i32 2, 3").expect("multiplication emitted");
    let add = text.find("add i32 1, %multmp").expect("addition emitted");
    assert!(mul < add);
}

#[test]
fn left_associative_subtraction_end_to_end() {
    let text = ir("int main() { int a; int b; int c; return a - b - c; }");
    // ((a-b)-c): the second subtraction consumes the first's result.
    assert!(text.contains("%subtmp1 = sub i32 %subtmp,"));
}

#[test]
fn syntax_error_names_expected_token() {
    let err = parse("int main() { return 0 }").unwrap_err();
    match err {
        CompileError::Syntax { message, line, column, .. } => {
            assert!(message.contains("';'"));
            assert_eq!(line, 1);
            assert!(column > 1);
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn global_then_functions_in_order() {
    let text = ir("int counter; void bump() { counter = counter + 1; } int main() { bump(); return counter; }");
    assert!(text.contains("@counter = common global i32 0, align 4"));
    let bump = text.find("define void @bump").expect("bump defined");
    let main = text.find("define i32 @main").expect("main defined");
    assert!(bump < main);
    assert!(text.contains("call void @bump()"));
}

fn ir(source: &str) -> String {
    compile_to_ir(source)
        .expect("should compile")
        .module
        .to_string()
}
