use log::trace;
use serde_json::Value;

use crate::compiler::{BlockKind, Op, Program};
use crate::context::{is_truthy, passes_if, render_value, Context};
use crate::parser::EscapeMode;
use crate::renderer::call_stack::CallStack;
use crate::utils::{encode_uri, escape_html};

/// Given a `Program` and a `Context`, renders text
#[derive(Debug)]
pub struct Renderer<'a> {
    /// Program to execute
    program: &'a Program,
    /// Read-only context to be bound to the program
    context: &'a Context,
}

impl<'a> Renderer<'a> {
    /// Create a new `Renderer`
    #[inline]
    pub fn new(program: &'a Program, context: &'a Context) -> Renderer<'a> {
        Renderer { program, context }
    }

    /// Walks the program once and returns the output.
    ///
    /// Missing values render as nothing and are falsy, so rendering can't fail.
    pub fn render(&self) -> String {
        let ops = self.program.ops();
        let mut call_stack = CallStack::new(self.context);
        let mut output = String::new();
        let mut ip = 0;

        while ip < ops.len() {
            match &ops[ip] {
                Op::Text(text) => output.push_str(text),
                Op::Var { path, escape } => {
                    let value = render_value(call_stack.lookup(path));
                    match escape {
                        EscapeMode::None => output.push_str(&value),
                        EscapeMode::Html => output.push_str(&escape_html(&value)),
                        EscapeMode::Url => output.push_str(&encode_uri(&value)),
                    }
                }
                Op::OpenIf { path, otherwise } => {
                    if !passes_if(call_stack.lookup(path)) {
                        ip = *otherwise;
                        continue;
                    }
                }
                Op::OpenUnless { path, otherwise } => {
                    if is_truthy(call_stack.lookup(path)) {
                        ip = *otherwise;
                        continue;
                    }
                }
                Op::Else { next } => {
                    ip = *next;
                    continue;
                }
                Op::OpenLoop { path, depth, end } => {
                    debug_assert_eq!(*depth, call_stack.depth());
                    match call_stack.lookup(path) {
                        Some(Value::Array(items)) if !items.is_empty() => {
                            trace!("Looping {} times over {}", items.len(), path);
                            call_stack.push_loop(items);
                        }
                        _ => {
                            ip = *end + 1;
                            continue;
                        }
                    }
                }
                Op::Close { kind: BlockKind::Loop, open } => {
                    if call_stack.next_iteration() {
                        ip = *open + 1;
                        continue;
                    }
                }
                Op::Close { .. } => (),
            }
            ip += 1;
        }

        output
    }
}
