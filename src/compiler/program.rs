use std::fmt;

use crate::context::Context;
use crate::parser::EscapeMode;
use crate::renderer::Renderer;

/// The blocks a template can open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// `<tmpl_if>`
    If,
    /// `<tmpl_unless>`
    Unless,
    /// `<tmpl_loop>`
    Loop,
}

impl BlockKind {
    /// Whether `<tmpl_else>` applies to this block
    pub fn is_conditional(self) -> bool {
        self != BlockKind::Loop
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::If => write!(f, "if"),
            BlockKind::Unless => write!(f, "unless"),
            BlockKind::Loop => write!(f, "loop"),
        }
    }
}

/// One step of an access path
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Field of an object (or numeric index of an array)
    Key(String),
    /// Current iteration of the loop opened at that nesting level (0 based)
    LoopIndex(usize),
}

/// A fully qualified access into the data binding, starting at its root.
///
/// `<tmpl_var name="x">` inside `<tmpl_loop name="outer"><tmpl_loop name="inner">` resolves to
/// `outer[i1].inner[i2].x`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The root of the data binding
    pub fn root() -> Self {
        Path { segments: Vec::new() }
    }

    /// Appends every part of a dotted name as a key
    pub fn push_dotted(&mut self, name: &str) {
        self.segments.extend(name.split('.').map(|part| Segment::Key(part.to_string())));
    }

    /// Appends the index of the loop at `depth`
    pub fn push_loop_index(&mut self, depth: usize) {
        self.segments.push(Segment::LoopIndex(depth));
    }

    /// Returns a copy of this path with a dotted name appended
    pub fn join(&self, name: &str) -> Self {
        let mut path = self.clone();
        path.push_dotted(name);
        path
    }

    /// The steps of the path, root first
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data")?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::LoopIndex(depth) => write!(f, "[i{}]", depth + 1)?,
            }
        }
        Ok(())
    }
}

/// A single instruction of a compiled template.
///
/// Jump targets are indices into the owning [`Program`], filled in once the block is closed.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    /// Append literal text
    Text(String),
    /// Append the value at `path`
    Var {
        /// Where the value lives
        path: Path,
        /// How to escape it
        escape: EscapeMode,
    },
    /// Enter the block if `path` is a non-empty array or a truthy non-array value
    OpenIf {
        /// The guard
        path: Path,
        /// Where to go when the guard fails: the op after the `<tmpl_else>` or the matching close
        otherwise: usize,
    },
    /// Enter the block if `path` is falsy
    OpenUnless {
        /// The guard
        path: Path,
        /// Where to go when the guard fails
        otherwise: usize,
    },
    /// Reached at the end of a taken branch
    Else {
        /// Past the branch that follows: the op after the next else or the matching close
        next: usize,
    },
    /// Iterate over the array at `path`
    OpenLoop {
        /// The array, looked up in the enclosing scope
        path: Path,
        /// Nesting level the loop index is stored at, 0 for the outermost loop
        depth: usize,
        /// The matching close. An empty or missing array skips past it.
        end: usize,
    },
    /// Close the innermost block
    Close {
        /// What is being closed
        kind: BlockKind,
        /// Index of the opener. Closing a loop goes back to the op after it while items remain.
        open: usize,
    },
}

/// The compiled form of a template: a flat list of instructions, immutable once built and
/// renderable any number of times against different data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    ops: Vec<Op>,
}

impl Program {
    pub(crate) fn from_ops(ops: Vec<Op>) -> Self {
        Program { ops }
    }

    /// The instructions of this program
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Renders the program against the given data
    pub fn render(&self, context: &Context) -> String {
        Renderer::new(self, context).render()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            write!(f, "{:>4}: ", i)?;
            match op {
                Op::Text(text) => writeln!(f, "text {:?}", text)?,
                Op::Var { path, escape: EscapeMode::None } => writeln!(f, "var {}", path)?,
                Op::Var { path, escape: EscapeMode::Html } => writeln!(f, "var html({})", path)?,
                Op::Var { path, escape: EscapeMode::Url } => writeln!(f, "var url({})", path)?,
                Op::OpenIf { path, otherwise } => writeln!(f, "if {} else {}", path, otherwise)?,
                Op::OpenUnless { path, otherwise } => {
                    writeln!(f, "unless {} else {}", path, otherwise)?
                }
                Op::Else { next } => writeln!(f, "else -> {}", next)?,
                Op::OpenLoop { path, depth, end } => {
                    writeln!(f, "loop i{} over {} end {}", depth + 1, path, end)?
                }
                Op::Close { kind, open } => writeln!(f, "close {} from {}", kind, open)?,
            }
        }
        Ok(())
    }
}
