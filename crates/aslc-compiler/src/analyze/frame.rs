//! Per-method flow state.

use aslc_core::{Btype, NameSeg, NodeId, Register};

pub const MAX_LOCALS: u8 = 8;
pub const MAX_ARGS: u8 = 7;

/// Flow state of one method while its body is being walked.
#[derive(Debug, Clone)]
pub struct MethodFrame {
    pub method: NodeId,
    pub name: Option<NameSeg>,
    /// Final argument count, after reconciling with the parameter list.
    pub arg_count: u8,
    /// Declared `Serialized`, or found to need it.
    pub should_be_serialized: bool,
    pub(crate) declared_serialized: bool,
    locals_initialized: u8,
    args_initialized: u8,
    args_at_entry: u8,
    pub valid_return_types: Btype,
    pub valid_arg_types: [Btype; MAX_ARGS as usize],
    pub num_return_with_value: u32,
    pub num_return_no_value: u32,
    pub creates_named_objects: bool,
}

impl MethodFrame {
    pub fn new(method: NodeId, name: Option<NameSeg>) -> Self {
        Self {
            method,
            name,
            arg_count: 0,
            should_be_serialized: false,
            declared_serialized: false,
            locals_initialized: 0,
            args_initialized: 0,
            args_at_entry: 0,
            valid_return_types: Btype::ANY,
            valid_arg_types: [Btype::ANY; MAX_ARGS as usize],
            num_return_with_value: 0,
            num_return_no_value: 0,
            creates_named_objects: false,
        }
    }

    /// Arguments `0..count` hold a value on entry.
    pub(crate) fn enter_with_args(&mut self, count: u8) {
        let count = count.min(MAX_ARGS);
        self.arg_count = count;
        self.args_at_entry = ((1u16 << count) - 1) as u8;
        self.args_initialized |= self.args_at_entry;
    }

    pub fn mark_initialized(&mut self, register: Register) {
        match register {
            Register::Local(n) if n < MAX_LOCALS => self.locals_initialized |= 1 << n,
            Register::Arg(n) if n < MAX_ARGS => self.args_initialized |= 1 << n,
            _ => {}
        }
    }

    pub fn is_initialized(&self, register: Register) -> bool {
        match register {
            Register::Local(n) if n < MAX_LOCALS => self.locals_initialized & (1 << n) != 0,
            Register::Arg(n) if n < MAX_ARGS => self.args_initialized & (1 << n) != 0,
            _ => false,
        }
    }

    /// Argument bits set on entry, before any store in the body.
    pub fn args_at_entry(&self) -> u8 {
        self.args_at_entry
    }

    pub fn locals_initialized(&self) -> u8 {
        self.locals_initialized
    }

    pub fn args_initialized(&self) -> u8 {
        self.args_initialized
    }
}

/// Methods currently being walked, innermost last.
#[derive(Debug, Default)]
pub struct FrameStack {
    frames: Vec<MethodFrame>,
}

impl FrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: MethodFrame) {
        log::debug!(
            "enter method {} ({} args)",
            frame.name.map_or_else(|| frame.method.to_string(), |n| n.to_string()),
            frame.arg_count
        );
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<MethodFrame> {
        let frame = self.frames.pop()?;
        log::debug!(
            "leave method {} (returns: {} with value, {} without)",
            frame.name.map_or_else(|| frame.method.to_string(), |n| n.to_string()),
            frame.num_return_with_value,
            frame.num_return_no_value
        );
        Some(frame)
    }

    pub fn top(&self) -> Option<&MethodFrame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut MethodFrame> {
        self.frames.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}
