use serde_json::Value;

use crate::compiler::{Path, Segment};
use crate::context::{get_segment, Context};

/// An open `<tmpl_loop>` while rendering
#[derive(Debug)]
struct LoopFrame<'a> {
    /// What we iterate on
    items: &'a [Value],
    /// What's the current loop index (0-indexed)
    current: usize,
}

/// Contains the stack of open loops and allows paths to be resolved against them
#[derive(Debug)]
pub struct CallStack<'a> {
    /// User supplied data for the render, never mutated
    context: &'a Context,
    /// Open loops, outermost first: the loop at nesting level `n` is `loops[n]`
    loops: Vec<LoopFrame<'a>>,
}

impl<'a> CallStack<'a> {
    /// Create the initial call stack
    pub fn new(context: &'a Context) -> CallStack<'a> {
        CallStack { context, loops: Vec::new() }
    }

    /// How many loops are open
    pub fn depth(&self) -> usize {
        self.loops.len()
    }

    /// Starts iterating on `items`, which must not be empty
    pub fn push_loop(&mut self, items: &'a [Value]) {
        debug_assert!(!items.is_empty());
        self.loops.push(LoopFrame { items, current: 0 });
    }

    /// Moves the innermost loop to its next item.
    /// Returns `false` and closes the loop when there was none left.
    pub fn next_iteration(&mut self) -> bool {
        let has_next = match self.loops.last_mut() {
            Some(frame) => {
                frame.current += 1;
                frame.current < frame.items.len()
            }
            None => false,
        };

        if !has_next {
            self.loops.pop();
        }
        has_next
    }

    /// Resolves a path from the root of the data, loop indices included.
    /// Anything missing along the way gives `None`.
    pub fn lookup(&self, path: &Path) -> Option<&'a Value> {
        let mut current = self.context.as_json();
        for segment in path.segments() {
            current = match segment {
                Segment::Key(key) => get_segment(current, key)?,
                Segment::LoopIndex(depth) => {
                    let index = self.loops.get(*depth)?.current;
                    current.as_array()?.get(index)?
                }
            };
        }
        Some(current)
    }
}
