//! Turns a template into a [`Program`] in a single pass over its tokens.
//!
//! There is no AST: nested blocks are tracked with a stack and jump targets are patched in
//! when a block closes. Loops additionally push their name on the scope so that names used
//! inside them resolve against the current item of every enclosing loop.

use log::{debug, trace, warn};

use crate::config::Config;
use crate::context::Context;
use crate::errors::{Error, Result};
use crate::loader::Loader;
use crate::parser::{tokenize, Token};
use crate::utils::normalize_newlines;

mod program;


pub use self::program::{BlockKind, Op, Path, Program, Segment};

/// A block that has been opened but not closed yet
#[derive(Debug)]
struct OpenBlock {
    kind: BlockKind,
    /// Index of the opening op
    open: usize,
    /// Op whose jump target is the end of the current branch: the opener or the last else
    pending: usize,
    /// Number of `<tmpl_else>` seen so far
    elses: usize,
}

/// Compiles template text into a [`Program`].
///
/// `<tmpl_include>` are resolved while compiling: the included template is fetched through the
/// loader, compiled and rendered against `context` right away, and its output is embedded as
/// literal text. Rendering the resulting program with other data doesn't change that text.
pub struct Compiler<'a> {
    loader: &'a dyn Loader,
    config: &'a Config,
    context: &'a Context,
    include_depth: usize,
    ops: Vec<Op>,
    blocks: Vec<OpenBlock>,
    /// Names of the loops currently open, outermost first
    scope: Vec<String>,
}

impl<'a> Compiler<'a> {
    /// Creates a compiler fetching includes with `loader` and rendering them with `context`
    pub fn new(loader: &'a dyn Loader, config: &'a Config, context: &'a Context) -> Self {
        Compiler {
            loader,
            config,
            context,
            include_depth: 0,
            ops: Vec::new(),
            blocks: Vec::new(),
            scope: Vec::new(),
        }
    }

    fn nested(&self) -> Compiler<'a> {
        let mut compiler = Compiler::new(self.loader, self.config, self.context);
        compiler.include_depth = self.include_depth + 1;
        compiler
    }

    /// Compiles a template. Newlines are normalized first.
    pub fn compile(mut self, input: &str) -> Result<Program> {
        let input = normalize_newlines(input);

        for token in tokenize(&input) {
            trace!("Compiling {:?} with scope {:?}", token, self.scope);
            self.compile_token(token)?;
        }

        if let Some(block) = self.blocks.last() {
            return Err(Error::unbalanced_block(format!(
                "`<tmpl_{}>` is never closed",
                block.kind
            )));
        }

        debug!(
            "Compiled template into {} ops (include depth {})",
            self.ops.len(),
            self.include_depth
        );
        Ok(Program::from_ops(self.ops))
    }

    fn compile_token(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Literal(text) => self.push_text(&text),
            Token::Var(name, escape) => {
                let path = self.resolve(&name);
                self.ops.push(Op::Var { path, escape });
            }
            Token::If(name) => {
                let path = self.resolve(&name);
                self.open_block(BlockKind::If, Op::OpenIf { path, otherwise: 0 });
            }
            Token::Unless(name) => {
                let path = self.resolve(&name);
                self.open_block(BlockKind::Unless, Op::OpenUnless { path, otherwise: 0 });
            }
            Token::Loop(name) => {
                // The array itself is looked up in the enclosing scope
                let path = self.resolve(&name);
                let depth = self.scope.len();
                self.open_block(BlockKind::Loop, Op::OpenLoop { path, depth, end: 0 });
                self.scope.push(name);
            }
            Token::Else => self.compile_else()?,
            Token::Close(kind) => self.close_block(&kind)?,
            Token::Include(location) => self.include(&location)?,
        }
        Ok(())
    }

    /// The path of the current scope: every open loop adds its name and its index
    fn current_scope(&self) -> Path {
        let mut path = Path::root();
        for (depth, name) in self.scope.iter().enumerate() {
            path.push_dotted(name);
            path.push_loop_index(depth);
        }
        path
    }

    fn resolve(&self, name: &str) -> Path {
        self.current_scope().join(name)
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Op::Text(ref mut previous)) = self.ops.last_mut() {
            previous.push_str(text);
            return;
        }
        self.ops.push(Op::Text(text.to_string()));
    }

    fn open_block(&mut self, kind: BlockKind, op: Op) {
        let open = self.ops.len();
        self.ops.push(op);
        self.blocks.push(OpenBlock { kind, open, pending: open, elses: 0 });
    }

    fn compile_else(&mut self) -> Result<()> {
        let strict = self.config.strict_blocks;
        let index = self.ops.len();

        let block = match self.blocks.last_mut() {
            Some(block) if block.kind.is_conditional() => block,
            Some(block) => {
                if strict {
                    return Err(Error::structural_mismatch(
                        format!("</tmpl_{}>", block.kind),
                        Token::Else,
                    ));
                }
                warn!("Ignoring `<tmpl_else>` inside `<tmpl_loop>`");
                return Ok(());
            }
            None => {
                if strict {
                    return Err(Error::structural_mismatch("<tmpl_if>", Token::Else));
                }
                warn!("Ignoring `<tmpl_else>` outside of any block");
                return Ok(());
            }
        };

        if block.elses > 0 && strict {
            return Err(Error::structural_mismatch(format!("</tmpl_{}>", block.kind), Token::Else));
        }

        // Every else flips the branch: whatever came before it now skips past it
        let pending = block.pending;
        block.pending = index;
        block.elses += 1;
        self.set_jump(pending, index + 1);
        self.ops.push(Op::Else { next: 0 });
        Ok(())
    }

    fn close_block(&mut self, kind: &str) -> Result<()> {
        let found = Token::Close(kind.to_string());
        let block = match self.blocks.pop() {
            Some(block) => block,
            None => {
                return Err(Error::unbalanced_block(format!(
                    "Found `{}` but no block is open",
                    found
                )))
            }
        };

        if block.kind.to_string() != kind {
            if self.config.strict_blocks {
                return Err(Error::structural_mismatch(format!("</tmpl_{}>", block.kind), found));
            }
            warn!("`{}` closes the innermost `<tmpl_{}>`", found, block.kind);
        }

        let index = self.ops.len();
        self.set_jump(block.pending, index);
        if block.kind == BlockKind::Loop {
            self.scope.pop();
        }
        self.ops.push(Op::Close { kind: block.kind, open: block.open });
        Ok(())
    }

    fn set_jump(&mut self, at: usize, target: usize) {
        match self.ops[at] {
            Op::OpenIf { ref mut otherwise, .. } | Op::OpenUnless { ref mut otherwise, .. } => {
                *otherwise = target
            }
            Op::Else { ref mut next } => *next = target,
            Op::OpenLoop { ref mut end, .. } => *end = target,
            _ => unreachable!("Only block openers and else have a jump target"),
        }
    }

    fn include(&mut self, location: &str) -> Result<()> {
        if self.include_depth >= self.config.max_include_depth {
            return Err(Error::include_depth_exceeded(self.config.max_include_depth));
        }

        let text = match self.loader.fetch(location) {
            Some(text) if !text.is_empty() => text,
            _ => return Err(Error::missing_template(Some(location))),
        };

        debug!("Including `{}`", location);
        let program = self.nested().compile(&text)?;
        let rendered = program.render(self.context);
        self.push_text(&rendered);
        Ok(())
    }
}
