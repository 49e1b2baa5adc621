//! Codegen — lowers the AST to IR through the builder.
//!
//! The walk is depth-first and keeps three pieces of state: the builder's
//! insertion point, a stack of lexical scope frames mapping names to
//! allocation slots, and a table of global variables. Frame 0 is the
//! current function's outermost scope; a fresh frame is pushed for each
//! `if` arm and each `while` body and the stack is truncated back when the
//! construct ends. Name lookup walks the stack innermost-first, then falls
//! back to the globals table.
//!
//! Typing rules:
//! - mixing int and float in a binary op promotes the int side with
//!   `sitofp` (warning) and emits the float opcode;
//! - mixing i1 and i32 widens the i1 side with `zext` so the emitted IR
//!   stays well formed;
//! - assignment converts between int and float when the slot type and the
//!   value type disagree (warning), and returns the stored value;
//! - `&&`/`||` are bitwise `and`/`or` over the one-bit representation —
//!   both sides are always evaluated, there is no short-circuit.
//!
//! Statements after a terminator in the same block are dead and are not
//! lowered, and the trailing branch of an if-arm or while body is only
//! emitted when its block is still open. Every lowered function must pass
//! the builder's structural verification.

use std::collections::HashMap;

use crate::ast::{self, BinOp, Block, Decl, Expr, Extern, FuncDef, Program, Stmt, UnaryOp, VarDecl};
use crate::errors::CompileError;
use crate::ir::{Builder, FuncId, Module, Slot, Ty, Value};

/// The result of lowering: the finished module plus any implicit
/// conversion warnings collected along the way.
#[derive(Debug)]
pub struct Lowered {
    pub module: Module,
    pub warnings: Vec<String>,
}

/// Lower a parsed program to an IR module.
pub fn lower(program: &Program) -> Result<Lowered, CompileError> {
    let mut cg = Codegen::new();
    cg.lower_program(program)?;
    Ok(Lowered {
        module: cg.builder.finish(),
        warnings: cg.warnings,
    })
}

fn ir_ty(ty: ast::Ty) -> Ty {
    match ty {
        ast::Ty::Int => Ty::I32,
        ast::Ty::Float => Ty::F32,
        ast::Ty::Bool => Ty::I1,
        ast::Ty::Void => Ty::Void,
    }
}

/// Parameter lists may encode "no parameters" as a single `void` entry;
/// either way the lowered signature is empty.
fn signature_params(params: &[ast::Param]) -> Vec<(String, Ty)> {
    params
        .iter()
        .filter(|param| param.ty != ast::Ty::Void)
        .map(|param| (param.name.clone(), ir_ty(param.ty)))
        .collect()
}

struct Codegen {
    builder: Builder,
    scopes: Vec<HashMap<String, Slot>>,
    globals: HashMap<String, Slot>,
    warnings: Vec<String>,
}

impl Codegen {
    fn new() -> Self {
        Self {
            builder: Builder::new("mini-c"),
            scopes: Vec::new(),
            globals: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn cur_func(&self) -> FuncId {
        self.builder
            .current_function()
            .expect("lowering outside a function body")
    }

    /// Walk the scope stack innermost-first, then the globals table.
    fn resolve(&self, name: &str) -> Result<Slot, CompileError> {
        for frame in self.scopes.iter().rev() {
            if let Some(slot) = frame.get(name) {
                return Ok(slot.clone());
            }
        }
        self.globals
            .get(name)
            .cloned()
            .ok_or_else(|| CompileError::UndefinedVariable(name.to_string()))
    }

    // ── Top level ────────────────────────────────────────────────────

    fn lower_program(&mut self, program: &Program) -> Result<(), CompileError> {
        for ext in &program.externs {
            self.lower_extern(ext);
        }
        for decl in &program.decls {
            match decl {
                Decl::Func(func) => self.lower_func(func)?,
                Decl::Global(var) => self.lower_global(var),
            }
        }
        Ok(())
    }

    fn lower_extern(&mut self, ext: &Extern) {
        let params = signature_params(&ext.params);
        self.builder
            .declare_function(&ext.name, &params, ir_ty(ext.ret));
    }

    fn lower_global(&mut self, var: &VarDecl) {
        let slot = self.builder.declare_global(&var.name, ir_ty(var.ty));
        self.globals.insert(var.name.clone(), slot);
    }

    fn lower_func(&mut self, func: &FuncDef) -> Result<(), CompileError> {
        let name = &func.proto.name;
        let ret = ir_ty(func.proto.ret);
        let params = signature_params(&func.proto.params);

        // Fresh function: reset the frame stack to a single empty frame.
        self.scopes.clear();
        self.scopes.push(HashMap::new());

        let id = self.builder.define_function(name, &params, ret);
        let entry = self.builder.append_block(id, "entry");
        self.builder.set_insert_point(entry);

        // Spill each incoming argument into its own slot so parameters
        // are ordinary load/store variables like the locals.
        let spill_count = params.len().min(self.builder.func_param_count(id));
        for (i, (pname, pty)) in params.iter().take(spill_count).enumerate() {
            let arg = self.builder.param_value(id, i);
            let slot = self.builder.build_entry_alloca(id, *pty, pname);
            self.builder.build_store(&arg, &slot);
            self.scopes[0].insert(pname.clone(), slot);
        }

        self.lower_block(&func.body)?;

        // Close a fall-through path so the function always terminates:
        // void functions return void, others return their zero value.
        if !self.builder.is_terminated() {
            if ret == Ty::Void {
                self.builder.build_ret_void();
            } else {
                let zero = self.builder.zero(ret);
                self.builder.build_ret(&zero);
            }
        }

        self.builder
            .verify(id)
            .map_err(|reason| CompileError::InvalidFunction {
                name: name.clone(),
                reason,
            })?;
        self.builder.clear_insert_point();
        Ok(())
    }

    // ── Blocks and statements ────────────────────────────────────────

    /// Emit a block's declarations, then its statements. Returns the
    /// value of the last lowered statement (not observable to users).
    fn lower_block(&mut self, block: &Block) -> Result<Option<Value>, CompileError> {
        for decl in &block.decls {
            self.lower_local_decl(decl);
        }
        let mut last = None;
        for stmt in &block.stmts {
            last = self.lower_stmt(stmt)?;
        }
        Ok(last)
    }

    /// Local declarations allocate in the entry block regardless of
    /// textual position and register in the current frame.
    fn lower_local_decl(&mut self, decl: &VarDecl) {
        let func = self.cur_func();
        let slot = self
            .builder
            .build_entry_alloca(func, ir_ty(decl.ty), &decl.name);
        self.scopes
            .last_mut()
            .expect("scope stack is never empty inside a function")
            .insert(decl.name.clone(), slot);
    }

    fn lower_stmt(&mut self, stmt: &Stmt) -> Result<Option<Value>, CompileError> {
        // Everything after a terminator in this block is dead code.
        if self.builder.is_terminated() {
            return Ok(None);
        }
        match stmt {
            Stmt::Expr(None) => Ok(None),
            Stmt::Expr(Some(expr)) => Ok(Some(self.lower_expr(expr)?)),
            Stmt::Block(block) => self.lower_block(block),
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                self.lower_if(cond, then_block, else_block.as_ref())?;
                Ok(None)
            }
            Stmt::While { cond, body } => {
                self.lower_while(cond, body)?;
                Ok(None)
            }
            Stmt::Return(None) => {
                self.builder.build_ret_void();
                Ok(None)
            }
            Stmt::Return(Some(expr)) => {
                // The value is returned as-is; no conversion to the
                // declared return type is performed.
                let value = self.lower_expr(expr)?;
                self.builder.build_ret(&value);
                Ok(None)
            }
        }
    }

    fn lower_if(
        &mut self,
        cond: &Expr,
        then_block: &Block,
        else_block: Option<&Block>,
    ) -> Result<(), CompileError> {
        let depth = self.scopes.len();
        let cond_value = self.lower_expr(cond)?;
        let cmp = self.lower_nonzero(&cond_value, "ifcond");

        let func = self.cur_func();
        let then_b = self.builder.append_block(func, "then");
        let else_b = if else_block.is_some() {
            Some(self.builder.append_block(func, "else"))
        } else {
            None
        };
        let end_b = self.builder.append_block(func, "end");

        self.builder.build_cond_br(&cmp, then_b, else_b.unwrap_or(end_b));

        self.builder.set_insert_point(then_b);
        self.scopes.push(HashMap::new());
        self.lower_block(then_block)?;
        self.scopes.truncate(depth);
        if !self.builder.is_terminated() {
            self.builder.build_br(end_b);
        }

        if let (Some(else_block), Some(else_b)) = (else_block, else_b) {
            self.builder.set_insert_point(else_b);
            self.scopes.push(HashMap::new());
            self.lower_block(else_block)?;
            self.scopes.truncate(depth);
            if !self.builder.is_terminated() {
                self.builder.build_br(end_b);
            }
        }

        self.builder.set_insert_point(end_b);
        Ok(())
    }

    fn lower_while(&mut self, cond: &Expr, body: &Stmt) -> Result<(), CompileError> {
        let depth = self.scopes.len();
        let func = self.cur_func();
        let header = self.builder.append_block(func, "header");
        let body_b = self.builder.append_block(func, "body");
        let end_b = self.builder.append_block(func, "end");

        self.builder.build_br(header);

        // The condition re-evaluates on every iteration, so it lowers
        // inside the header block.
        self.builder.set_insert_point(header);
        self.scopes.push(HashMap::new());
        let cond_value = self.lower_expr(cond)?;
        let cmp = self.lower_nonzero(&cond_value, "whilecond");
        self.builder.build_cond_br(&cmp, body_b, end_b);

        self.builder.set_insert_point(body_b);
        self.lower_stmt(body)?;
        if !self.builder.is_terminated() {
            self.builder.build_br(header);
        }
        self.scopes.truncate(depth);

        self.builder.set_insert_point(end_b);
        Ok(())
    }

    /// Compare a condition value not-equal against the zero of its own
    /// type, yielding an i1.
    fn lower_nonzero(&mut self, value: &Value, name: &str) -> Value {
        let zero = self.builder.zero(match value.ty() {
            Ty::Void => Ty::I1,
            ty => ty,
        });
        match value.ty() {
            Ty::F32 => self.builder.build_fcmp("une", value, &zero, name),
            _ => self.builder.build_icmp("ne", value, &zero, name),
        }
    }

    // ── Expressions ──────────────────────────────────────────────────

    fn lower_expr(&mut self, expr: &Expr) -> Result<Value, CompileError> {
        match expr {
            Expr::IntLit(n) => Ok(self.builder.const_i32(*n)),
            Expr::FloatLit(n) => Ok(self.builder.const_f32(*n)),
            Expr::BoolLit(b) => Ok(self.builder.const_bool(*b)),
            Expr::VarRef(name) => {
                let slot = self.resolve(name)?;
                Ok(self.builder.build_load(&slot, name))
            }
            Expr::Assign { name, value } => self.lower_assign(name, value),
            Expr::Binary { op, lhs, rhs } => self.lower_binary(*op, lhs, rhs),
            Expr::Unary { op, operand } => self.lower_unary(*op, operand),
            Expr::Call { callee, args } => self.lower_call(callee, args),
        }
    }

    fn lower_assign(&mut self, name: &str, value: &Expr) -> Result<Value, CompileError> {
        let mut stored = self.lower_expr(value)?;
        let slot = self.resolve(name)?;
        if stored.ty() != slot.ty() {
            stored = match (slot.ty(), stored.ty()) {
                (Ty::I32, Ty::F32) => {
                    self.warn(format!(
                        "implicit conversion from float to int in assignment to '{}'",
                        name
                    ));
                    self.builder.build_fptosi(&stored, "convtmp")
                }
                (Ty::F32, Ty::I32) => {
                    self.warn(format!(
                        "implicit conversion from int to float in assignment to '{}'",
                        name
                    ));
                    self.builder.build_sitofp(&stored, "convtmp")
                }
                (Ty::I32, Ty::I1) => self.builder.build_zext(&stored, "zexttmp"),
                _ => stored,
            };
        }
        self.builder.build_store(&stored, &slot);
        Ok(stored)
    }

    fn lower_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) -> Result<Value, CompileError> {
        let mut left = self.lower_expr(lhs)?;
        let mut right = self.lower_expr(rhs)?;

        if left.ty() == Ty::F32 || right.ty() == Ty::F32 {
            // Float domain: promote the integer side.
            if left.ty() != Ty::F32 {
                self.warn("implicit conversion from int to float in binary operation");
                left = self.builder.build_sitofp(&left, "convtmp");
            } else if right.ty() != Ty::F32 {
                self.warn("implicit conversion from int to float in binary operation");
                right = self.builder.build_sitofp(&right, "convtmp");
            }
            let value = match op {
                BinOp::Add => self.builder.build_bin("fadd", Ty::F32, &left, &right, "addftmp"),
                BinOp::Sub => self.builder.build_bin("fsub", Ty::F32, &left, &right, "subftmp"),
                BinOp::Mul => self.builder.build_bin("fmul", Ty::F32, &left, &right, "mulftmp"),
                BinOp::Div => self.builder.build_bin("fdiv", Ty::F32, &left, &right, "divftmp"),
                BinOp::Rem => self.builder.build_bin("frem", Ty::F32, &left, &right, "remftmp"),
                BinOp::Lt => self.builder.build_fcmp("ult", &left, &right, "sltftmp"),
                BinOp::Le => self.builder.build_fcmp("ule", &left, &right, "sleftmp"),
                BinOp::Gt => self.builder.build_fcmp("ugt", &left, &right, "sgtftmp"),
                BinOp::Ge => self.builder.build_fcmp("uge", &left, &right, "sgeftmp"),
                BinOp::Eq => self.builder.build_fcmp("ueq", &left, &right, "eqftmp"),
                BinOp::Ne => self.builder.build_fcmp("une", &left, &right, "neftmp"),
                BinOp::And => self.builder.build_bin("and", Ty::F32, &left, &right, "andftmp"),
                BinOp::Or => self.builder.build_bin("or", Ty::F32, &left, &right, "orftmp"),
            };
            return Ok(value);
        }

        // Integer domain. Mixed i1/i32 operands widen the i1 side so the
        // emitted op is well typed.
        if left.ty() != right.ty() {
            if left.ty() == Ty::I1 {
                left = self.builder.build_zext(&left, "zexttmp");
            }
            if right.ty() == Ty::I1 {
                right = self.builder.build_zext(&right, "zexttmp");
            }
        }
        let ty = left.ty();
        let value = match op {
            BinOp::Add => self.builder.build_bin("add", ty, &left, &right, "addtmp"),
            BinOp::Sub => self.builder.build_bin("sub", ty, &left, &right, "subtmp"),
            BinOp::Mul => self.builder.build_bin("mul", ty, &left, &right, "multmp"),
            BinOp::Div => self.builder.build_bin("sdiv", ty, &left, &right, "divtmp"),
            BinOp::Rem => self.builder.build_bin("urem", ty, &left, &right, "remtmp"),
            BinOp::Lt => self.builder.build_icmp("slt", &left, &right, "slttmp"),
            BinOp::Le => self.builder.build_icmp("sle", &left, &right, "sletmp"),
            BinOp::Gt => self.builder.build_icmp("sgt", &left, &right, "sgttmp"),
            BinOp::Ge => self.builder.build_icmp("sge", &left, &right, "sgetmp"),
            BinOp::Eq => self.builder.build_icmp("eq", &left, &right, "eqtmp"),
            BinOp::Ne => self.builder.build_icmp("ne", &left, &right, "netmp"),
            BinOp::And => self.builder.build_bin("and", ty, &left, &right, "andtmp"),
            BinOp::Or => self.builder.build_bin("or", ty, &left, &right, "ortmp"),
        };
        Ok(value)
    }

    fn lower_unary(&mut self, op: UnaryOp, operand: &Expr) -> Result<Value, CompileError> {
        let value = self.lower_expr(operand)?;
        let result = match (op, value.ty()) {
            (UnaryOp::Neg, Ty::F32) => self.builder.build_fneg(&value, "negftmp"),
            (UnaryOp::Neg, _) => self.builder.build_neg(&value, "negtmp"),
            // `!` is bitwise not over the operand's own representation:
            // it flips the 1-bit domain for bools and all bits for ints.
            (UnaryOp::Not, _) => self.builder.build_not(&value, "nottmp"),
        };
        Ok(result)
    }

    fn lower_call(&mut self, callee: &str, args: &[Expr]) -> Result<Value, CompileError> {
        let func = self
            .builder
            .get_function(callee)
            .ok_or_else(|| CompileError::UndefinedFunction(callee.to_string()))?;
        let expected = self.builder.func_param_count(func);
        if expected != args.len() {
            return Err(CompileError::ArityMismatch {
                name: callee.to_string(),
                expected,
                actual: args.len(),
            });
        }
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.lower_expr(arg)?);
        }
        Ok(self.builder.build_call(func, &values, "calltmp"))
    }
}
