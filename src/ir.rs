//! IR builder — typed module, function, block and instruction model.
//!
//! The lowering pass drives this builder the way it would drive a real
//! backend: declare globals and functions, append blocks, set an insertion
//! point, emit instructions, verify. The module serializes to
//! LLVM-flavoured textual IR via `Display`.
//!
//! Values and slots are lightweight typed handles whose printed form is
//! fixed at emission time; register and label names are uniquified per
//! function (`%x`, `%x1`, `then`, `then1`, …). Blocks track their
//! terminator so the lowering pass can ask [`Builder::is_terminated`] and
//! suppress dead branches.

use std::collections::HashMap;
use std::fmt;

/// IR-level types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ty {
    I1,
    I32,
    F32,
    Void,
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::I1 => write!(f, "i1"),
            Ty::I32 => write!(f, "i32"),
            Ty::F32 => write!(f, "float"),
            Ty::Void => write!(f, "void"),
        }
    }
}

/// An SSA value: a register or an inline constant, with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    ty: Ty,
    repr: String,
}

impl Value {
    pub fn ty(&self) -> Ty {
        self.ty
    }
}

/// A load/store-addressable cell: a stack alloca or a module global.
/// `ty` is the pointee type.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    ty: Ty,
    repr: String,
}

impl Slot {
    pub fn ty(&self) -> Ty {
        self.ty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockId {
    func: usize,
    index: usize,
}

// ── Instructions ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Inst {
    Alloca {
        dst: String,
        ty: Ty,
    },
    Load {
        dst: String,
        ty: Ty,
        ptr: String,
    },
    Store {
        ty: Ty,
        value: String,
        ptr: String,
    },
    /// Binary arithmetic or bitwise op: `add`, `fadd`, `and`, …
    Bin {
        dst: String,
        op: &'static str,
        ty: Ty,
        lhs: String,
        rhs: String,
    },
    /// `icmp <cond>` / `fcmp <cond>`; the result is always i1.
    Cmp {
        dst: String,
        op: &'static str,
        cond: &'static str,
        ty: Ty,
        lhs: String,
        rhs: String,
    },
    FNeg {
        dst: String,
        value: String,
    },
    Cast {
        dst: String,
        op: &'static str,
        from: Ty,
        value: String,
        to: Ty,
    },
    Call {
        dst: Option<String>,
        ret: Ty,
        callee: String,
        args: Vec<(Ty, String)>,
    },
    Br {
        label: String,
    },
    CondBr {
        cond: String,
        then_label: String,
        else_label: String,
    },
    Ret {
        ty: Ty,
        value: Option<String>,
    },
}

impl Inst {
    fn is_terminator(&self) -> bool {
        matches!(self, Inst::Br { .. } | Inst::CondBr { .. } | Inst::Ret { .. })
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Alloca { dst, ty } => write!(f, "{} = alloca {}", dst, ty),
            Inst::Load { dst, ty, ptr } => write!(f, "{} = load {}, {}* {}", dst, ty, ty, ptr),
            Inst::Store { ty, value, ptr } => write!(f, "store {} {}, {}* {}", ty, value, ty, ptr),
            Inst::Bin {
                dst,
                op,
                ty,
                lhs,
                rhs,
            } => write!(f, "{} = {} {} {}, {}", dst, op, ty, lhs, rhs),
            Inst::Cmp {
                dst,
                op,
                cond,
                ty,
                lhs,
                rhs,
            } => write!(f, "{} = {} {} {} {}, {}", dst, op, cond, ty, lhs, rhs),
            Inst::FNeg { dst, value } => write!(f, "{} = fneg float {}", dst, value),
            Inst::Cast {
                dst,
                op,
                from,
                value,
                to,
            } => write!(f, "{} = {} {} {} to {}", dst, op, from, value, to),
            Inst::Call {
                dst,
                ret,
                callee,
                args,
            } => {
                if let Some(dst) = dst {
                    write!(f, "{} = ", dst)?;
                }
                write!(f, "call {} @{}(", ret, callee)?;
                for (i, (ty, arg)) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", ty, arg)?;
                }
                write!(f, ")")
            }
            Inst::Br { label } => write!(f, "br label %{}", label),
            Inst::CondBr {
                cond,
                then_label,
                else_label,
            } => write!(
                f,
                "br i1 {}, label %{}, label %{}",
                cond, then_label, else_label
            ),
            Inst::Ret { ty, value } => match value {
                Some(value) => write!(f, "ret {} {}", ty, value),
                None => write!(f, "ret void"),
            },
        }
    }
}

// ── Module data ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct GlobalData {
    name: String,
    ty: Ty,
}

#[derive(Debug, Clone)]
struct BlockData {
    label: String,
    insts: Vec<Inst>,
}

#[derive(Debug, Clone)]
struct FunctionData {
    name: String,
    ret: Ty,
    params: Vec<(String, Ty)>,
    blocks: Vec<BlockData>,
    defined: bool,
    name_counts: HashMap<String, u32>,
}

/// A compiled module: globals plus declared and defined functions.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    globals: Vec<GlobalData>,
    funcs: Vec<FunctionData>,
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;
        for global in &self.globals {
            writeln!(
                f,
                "@{} = common global {} {}, align 4",
                global.name,
                global.ty,
                zero_literal(global.ty)
            )?;
        }
        for func in self.funcs.iter().filter(|func| !func.defined) {
            write!(f, "declare {} @{}(", func.ret, func.name)?;
            for (i, (_, ty)) in func.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", ty)?;
            }
            writeln!(f, ")")?;
        }
        for func in self.funcs.iter().filter(|func| func.defined) {
            writeln!(f)?;
            write!(f, "define {} @{}(", func.ret, func.name)?;
            for (i, (name, ty)) in func.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} %{}", ty, name)?;
            }
            writeln!(f, ") {{")?;
            for block in &func.blocks {
                writeln!(f, "{}:", block.label)?;
                for inst in &block.insts {
                    writeln!(f, "  {}", inst)?;
                }
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

fn zero_literal(ty: Ty) -> &'static str {
    match ty {
        Ty::I1 => "false",
        Ty::I32 => "0",
        Ty::F32 => "0.0",
        Ty::Void => unreachable!("void has no zero value"),
    }
}

// ── Builder ──────────────────────────────────────────────────────────

/// Owns the module under construction plus the current insertion point.
pub struct Builder {
    module: Module,
    pos: Option<BlockId>,
}

impl Builder {
    pub fn new(module_name: &str) -> Self {
        Self {
            module: Module {
                name: module_name.to_string(),
                globals: Vec::new(),
                funcs: Vec::new(),
            },
            pos: None,
        }
    }

    /// Release the finished module.
    pub fn finish(self) -> Module {
        self.module
    }

    // ── Module-level declarations ────────────────────────────────────

    pub fn get_function(&self, name: &str) -> Option<FuncId> {
        self.module
            .funcs
            .iter()
            .position(|func| func.name == name)
            .map(FuncId)
    }

    /// Declare a function without a body (an extern).
    pub fn declare_function(&mut self, name: &str, params: &[(String, Ty)], ret: Ty) -> FuncId {
        self.new_function(name, params, ret, false)
    }

    /// Start a function definition. If `name` was previously declared,
    /// the declaration is reused and marked defined.
    pub fn define_function(&mut self, name: &str, params: &[(String, Ty)], ret: Ty) -> FuncId {
        if let Some(id) = self.get_function(name) {
            self.module.funcs[id.0].defined = true;
            return id;
        }
        self.new_function(name, params, ret, true)
    }

    fn new_function(&mut self, name: &str, params: &[(String, Ty)], ret: Ty, defined: bool) -> FuncId {
        let mut name_counts = HashMap::new();
        for (pname, _) in params {
            name_counts.insert(pname.clone(), 1);
        }
        self.module.funcs.push(FunctionData {
            name: name.to_string(),
            ret,
            params: params.to_vec(),
            blocks: Vec::new(),
            defined,
            name_counts,
        });
        FuncId(self.module.funcs.len() - 1)
    }

    pub fn func_ret(&self, f: FuncId) -> Ty {
        self.module.funcs[f.0].ret
    }

    pub fn func_param_count(&self, f: FuncId) -> usize {
        self.module.funcs[f.0].params.len()
    }

    /// The incoming argument value for parameter `i`.
    pub fn param_value(&self, f: FuncId, i: usize) -> Value {
        let (name, ty) = &self.module.funcs[f.0].params[i];
        Value {
            ty: *ty,
            repr: format!("%{}", name),
        }
    }

    pub fn get_named_global(&self, name: &str) -> Option<Slot> {
        self.module
            .globals
            .iter()
            .find(|global| global.name == name)
            .map(|global| Slot {
                ty: global.ty,
                repr: format!("@{}", global.name),
            })
    }

    /// Declare a zero-initialized global of the given type.
    pub fn declare_global(&mut self, name: &str, ty: Ty) -> Slot {
        self.module.globals.push(GlobalData {
            name: name.to_string(),
            ty,
        });
        Slot {
            ty,
            repr: format!("@{}", name),
        }
    }

    // ── Blocks and insertion point ───────────────────────────────────

    /// Append a block to a function; the label hint is uniquified.
    pub fn append_block(&mut self, f: FuncId, hint: &str) -> BlockId {
        let label = self.fresh_name(f, hint);
        let func = &mut self.module.funcs[f.0];
        func.blocks.push(BlockData {
            label,
            insts: Vec::new(),
        });
        BlockId {
            func: f.0,
            index: func.blocks.len() - 1,
        }
    }

    pub fn set_insert_point(&mut self, block: BlockId) {
        self.pos = Some(block);
    }

    pub fn clear_insert_point(&mut self) {
        self.pos = None;
    }

    pub fn insert_block(&self) -> Option<BlockId> {
        self.pos
    }

    pub fn current_function(&self) -> Option<FuncId> {
        self.pos.map(|block| FuncId(block.func))
    }

    /// Whether the current block already ends in a terminator.
    pub fn is_terminated(&self) -> bool {
        let block = self.pos.expect("no insertion point");
        self.module.funcs[block.func].blocks[block.index]
            .insts
            .last()
            .map(Inst::is_terminator)
            .unwrap_or(false)
    }

    // ── Constants ────────────────────────────────────────────────────

    pub fn const_i32(&self, v: i32) -> Value {
        Value {
            ty: Ty::I32,
            repr: v.to_string(),
        }
    }

    pub fn const_f32(&self, v: f32) -> Value {
        Value {
            ty: Ty::F32,
            repr: format!("{:?}", v),
        }
    }

    pub fn const_bool(&self, v: bool) -> Value {
        Value {
            ty: Ty::I1,
            repr: v.to_string(),
        }
    }

    /// The zero value of a (non-void) type.
    pub fn zero(&self, ty: Ty) -> Value {
        Value {
            ty,
            repr: zero_literal(ty).to_string(),
        }
    }

    // ── Instruction emitters ─────────────────────────────────────────

    /// Allocate a stack slot in the function's entry block. Allocations
    /// are hoisted there regardless of where the declaration appeared.
    pub fn build_entry_alloca(&mut self, f: FuncId, ty: Ty, name: &str) -> Slot {
        let dst = format!("%{}", self.fresh_name(f, name));
        let entry = &mut self.module.funcs[f.0].blocks[0];
        let at = entry
            .insts
            .iter()
            .take_while(|inst| matches!(inst, Inst::Alloca { .. }))
            .count();
        entry.insts.insert(
            at,
            Inst::Alloca {
                dst: dst.clone(),
                ty,
            },
        );
        Slot { ty, repr: dst }
    }

    pub fn build_load(&mut self, slot: &Slot, name: &str) -> Value {
        let dst = self.fresh_value_name(name);
        self.push(Inst::Load {
            dst: dst.clone(),
            ty: slot.ty,
            ptr: slot.repr.clone(),
        });
        Value {
            ty: slot.ty,
            repr: dst,
        }
    }

    pub fn build_store(&mut self, value: &Value, slot: &Slot) {
        self.push(Inst::Store {
            ty: slot.ty,
            value: value.repr.clone(),
            ptr: slot.repr.clone(),
        });
    }

    /// Arithmetic or bitwise binary op; the result has the operand type.
    pub fn build_bin(
        &mut self,
        op: &'static str,
        ty: Ty,
        lhs: &Value,
        rhs: &Value,
        name: &str,
    ) -> Value {
        let dst = self.fresh_value_name(name);
        self.push(Inst::Bin {
            dst: dst.clone(),
            op,
            ty,
            lhs: lhs.repr.clone(),
            rhs: rhs.repr.clone(),
        });
        Value { ty, repr: dst }
    }

    /// Integer comparison; the result is i1.
    pub fn build_icmp(&mut self, cond: &'static str, lhs: &Value, rhs: &Value, name: &str) -> Value {
        let dst = self.fresh_value_name(name);
        self.push(Inst::Cmp {
            dst: dst.clone(),
            op: "icmp",
            cond,
            ty: lhs.ty,
            lhs: lhs.repr.clone(),
            rhs: rhs.repr.clone(),
        });
        Value {
            ty: Ty::I1,
            repr: dst,
        }
    }

    /// Float comparison (unordered predicates); the result is i1.
    pub fn build_fcmp(&mut self, cond: &'static str, lhs: &Value, rhs: &Value, name: &str) -> Value {
        let dst = self.fresh_value_name(name);
        self.push(Inst::Cmp {
            dst: dst.clone(),
            op: "fcmp",
            cond,
            ty: lhs.ty,
            lhs: lhs.repr.clone(),
            rhs: rhs.repr.clone(),
        });
        Value {
            ty: Ty::I1,
            repr: dst,
        }
    }

    /// Integer negation, emitted as a subtraction from zero.
    pub fn build_neg(&mut self, value: &Value, name: &str) -> Value {
        let zero = self.zero(value.ty);
        self.build_bin("sub", value.ty, &zero, value, name)
    }

    pub fn build_fneg(&mut self, value: &Value, name: &str) -> Value {
        let dst = self.fresh_value_name(name);
        self.push(Inst::FNeg {
            dst: dst.clone(),
            value: value.repr.clone(),
        });
        Value {
            ty: Ty::F32,
            repr: dst,
        }
    }

    /// Bitwise not, emitted as xor against all-ones of the operand type.
    pub fn build_not(&mut self, value: &Value, name: &str) -> Value {
        let ones = Value {
            ty: value.ty,
            repr: match value.ty {
                Ty::I1 => "true".to_string(),
                _ => "-1".to_string(),
            },
        };
        self.build_bin("xor", value.ty, value, &ones, name)
    }

    pub fn build_zext(&mut self, value: &Value, name: &str) -> Value {
        self.build_cast("zext", value, Ty::I32, name)
    }

    pub fn build_sitofp(&mut self, value: &Value, name: &str) -> Value {
        self.build_cast("sitofp", value, Ty::F32, name)
    }

    pub fn build_fptosi(&mut self, value: &Value, name: &str) -> Value {
        self.build_cast("fptosi", value, Ty::I32, name)
    }

    fn build_cast(&mut self, op: &'static str, value: &Value, to: Ty, name: &str) -> Value {
        let dst = self.fresh_value_name(name);
        self.push(Inst::Cast {
            dst: dst.clone(),
            op,
            from: value.ty,
            value: value.repr.clone(),
            to,
        });
        Value { ty: to, repr: dst }
    }

    /// Emit a call. Void calls produce an unnamed value of type void.
    pub fn build_call(&mut self, f: FuncId, args: &[Value], name: &str) -> Value {
        let ret = self.module.funcs[f.0].ret;
        let callee = self.module.funcs[f.0].name.clone();
        let dst = if ret == Ty::Void {
            None
        } else {
            Some(self.fresh_value_name(name))
        };
        self.push(Inst::Call {
            dst: dst.clone(),
            ret,
            callee,
            args: args
                .iter()
                .map(|arg| (arg.ty, arg.repr.clone()))
                .collect(),
        });
        Value {
            ty: ret,
            repr: dst.unwrap_or_default(),
        }
    }

    pub fn build_br(&mut self, target: BlockId) {
        let label = self.block_label(target);
        self.push(Inst::Br { label });
    }

    pub fn build_cond_br(&mut self, cond: &Value, then_block: BlockId, else_block: BlockId) {
        let then_label = self.block_label(then_block);
        let else_label = self.block_label(else_block);
        self.push(Inst::CondBr {
            cond: cond.repr.clone(),
            then_label,
            else_label,
        });
    }

    pub fn build_ret(&mut self, value: &Value) {
        self.push(Inst::Ret {
            ty: value.ty,
            value: Some(value.repr.clone()),
        });
    }

    pub fn build_ret_void(&mut self) {
        self.push(Inst::Ret {
            ty: Ty::Void,
            value: None,
        });
    }

    // ── Verification ─────────────────────────────────────────────────

    /// Check the structural invariants of a defined function: at least
    /// one block, every block ends in exactly one terminator, and no
    /// terminator sits mid-block.
    pub fn verify(&self, f: FuncId) -> Result<(), String> {
        let func = &self.module.funcs[f.0];
        if !func.defined {
            return Ok(());
        }
        if func.blocks.is_empty() {
            return Err("function body has no blocks".to_string());
        }
        for block in &func.blocks {
            match block.insts.last() {
                None => return Err(format!("block '{}' is empty", block.label)),
                Some(last) if !last.is_terminator() => {
                    return Err(format!("block '{}' does not end in a terminator", block.label))
                }
                _ => {}
            }
            for inst in &block.insts[..block.insts.len() - 1] {
                if inst.is_terminator() {
                    return Err(format!("block '{}' has a terminator mid-block", block.label));
                }
            }
        }
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────

    fn push(&mut self, inst: Inst) {
        let block = self.pos.expect("no insertion point");
        self.module.funcs[block.func].blocks[block.index]
            .insts
            .push(inst);
    }

    fn block_label(&self, block: BlockId) -> String {
        self.module.funcs[block.func].blocks[block.index]
            .label
            .clone()
    }

    fn fresh_value_name(&mut self, hint: &str) -> String {
        let block = self.pos.expect("no insertion point");
        format!("%{}", self.fresh_name(FuncId(block.func), hint))
    }

    fn fresh_name(&mut self, f: FuncId, hint: &str) -> String {
        let counts = &mut self.module.funcs[f.0].name_counts;
        let n = counts.entry(hint.to_string()).or_insert(0);
        let name = if *n == 0 {
            hint.to_string()
        } else {
            format!("{}{}", hint, n)
        };
        *n += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_prints_globals_and_declares() {
        let mut builder = Builder::new("mini-c");
        builder.declare_global("g", Ty::I32);
        builder.declare_function("putchar", &[("c".to_string(), Ty::I32)], Ty::I32);
        let text = builder.finish().to_string();
        assert!(text.contains("; ModuleID = 'mini-c'"));
        assert!(text.contains("@g = common global i32 0, align 4"));
        assert!(text.contains("declare i32 @putchar(i32)"));
    }

    #[test]
    fn test_define_and_emit() {
        let mut builder = Builder::new("m");
        let f = builder.define_function("main", &[], Ty::I32);
        let entry = builder.append_block(f, "entry");
        builder.set_insert_point(entry);
        let zero = builder.const_i32(0);
        builder.build_ret(&zero);
        assert!(builder.verify(f).is_ok());
        let text = builder.finish().to_string();
        assert!(text.contains("define i32 @main() {"));
        assert!(text.contains("entry:"));
        assert!(text.contains("  ret i32 0"));
    }

    #[test]
    fn test_entry_alloca_hoisting() {
        let mut builder = Builder::new("m");
        let f = builder.define_function("f", &[], Ty::Void);
        let entry = builder.append_block(f, "entry");
        builder.set_insert_point(entry);
        let x = builder.build_entry_alloca(f, Ty::I32, "x");
        let one = builder.const_i32(1);
        builder.build_store(&one, &x);
        // A later declaration still allocates at the top of entry.
        let y = builder.build_entry_alloca(f, Ty::F32, "y");
        builder.build_store(&builder.const_f32(0.5), &y);
        builder.build_ret_void();
        let text = builder.finish().to_string();
        let alloca_x = text.find("%x = alloca i32").unwrap();
        let alloca_y = text.find("%y = alloca float").unwrap();
        let store_x = text.find("store i32 1, i32* %x").unwrap();
        assert!(alloca_x < alloca_y);
        assert!(alloca_y < store_x);
    }

    #[test]
    fn test_name_uniquification() {
        let mut builder = Builder::new("m");
        let f = builder.define_function("f", &[("a".to_string(), Ty::I32)], Ty::I32);
        let entry = builder.append_block(f, "entry");
        builder.set_insert_point(entry);
        // The parameter owns "%a"; the alloca for it gets "%a1".
        let slot = builder.build_entry_alloca(f, Ty::I32, "a");
        let arg = builder.param_value(f, 0);
        builder.build_store(&arg, &slot);
        let loaded = builder.build_load(&slot, "a");
        builder.build_ret(&loaded);
        let text = builder.finish().to_string();
        assert!(text.contains("%a1 = alloca i32"));
        assert!(text.contains("store i32 %a, i32* %a1"));
        assert!(text.contains("%a2 = load i32, i32* %a1"));
        assert!(text.contains("ret i32 %a2"));
    }

    #[test]
    fn test_is_terminated_and_verify() {
        let mut builder = Builder::new("m");
        let f = builder.define_function("f", &[], Ty::Void);
        let entry = builder.append_block(f, "entry");
        builder.set_insert_point(entry);
        assert!(!builder.is_terminated());
        builder.build_ret_void();
        assert!(builder.is_terminated());
        assert!(builder.verify(f).is_ok());

        // An unterminated second block fails verification.
        let dangling = builder.append_block(f, "end");
        builder.set_insert_point(dangling);
        let one = builder.const_i32(1);
        let two = builder.const_i32(2);
        builder.build_bin("add", Ty::I32, &one, &two, "addtmp");
        assert!(builder.verify(f).is_err());
    }

    #[test]
    fn test_cond_br_and_labels() {
        let mut builder = Builder::new("m");
        let f = builder.define_function("f", &[], Ty::Void);
        let entry = builder.append_block(f, "entry");
        let then_b = builder.append_block(f, "then");
        let end_b = builder.append_block(f, "end");
        builder.set_insert_point(entry);
        let cond = builder.const_bool(true);
        builder.build_cond_br(&cond, then_b, end_b);
        builder.set_insert_point(then_b);
        builder.build_br(end_b);
        builder.set_insert_point(end_b);
        builder.build_ret_void();
        let text = builder.finish().to_string();
        assert!(text.contains("br i1 true, label %then, label %end"));
        assert!(text.contains("br label %end"));
    }

    #[test]
    fn test_casts_and_cmp_print() {
        let mut builder = Builder::new("m");
        let f = builder.define_function("f", &[], Ty::Void);
        let entry = builder.append_block(f, "entry");
        builder.set_insert_point(entry);
        let five = builder.const_i32(5);
        let conv = builder.build_sitofp(&five, "convtmp");
        assert_eq!(conv.ty(), Ty::F32);
        let half = builder.const_f32(0.5);
        builder.build_fcmp("ult", &conv, &half, "sltftmp");
        let flag = builder.const_bool(false);
        builder.build_icmp("ne", &flag, &builder.zero(Ty::I1), "ifcond");
        builder.build_ret_void();
        let text = builder.finish().to_string();
        assert!(text.contains("%convtmp = sitofp i32 5 to float"));
        assert!(text.contains("%sltftmp = fcmp ult float %convtmp, 0.5"));
        assert!(text.contains("%ifcond = icmp ne i1 false, false"));
    }

    #[test]
    fn test_void_call_has_no_result_name() {
        let mut builder = Builder::new("m");
        let tick = builder.declare_function("tick", &[], Ty::Void);
        let f = builder.define_function("f", &[], Ty::Void);
        let entry = builder.append_block(f, "entry");
        builder.set_insert_point(entry);
        builder.build_call(tick, &[], "calltmp");
        builder.build_ret_void();
        let text = builder.finish().to_string();
        assert!(text.contains("  call void @tick()"));
        assert!(!text.contains("= call void"));
    }
}
