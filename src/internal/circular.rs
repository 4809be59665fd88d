//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};
use crate::key::Identifier;

pub(crate) const MAX_DEPTH: usize = 1024;

/// Identifiers currently being resolved on the container's call chain.
///
/// Lives behind the container's reentrant lock, so only the thread holding the
/// lock ever sees it and every frame belongs to the same call chain.
pub(crate) struct ResolutionStack {
    frames: Vec<Identifier>,
    max_depth: usize,
}

impl ResolutionStack {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    fn enter(&mut self, id: &Identifier) -> DiResult<()> {
        // Circular detection BEFORE pushing the new frame
        if self.frames.iter().any(|frame| frame == id) {
            let mut path: Vec<String> = self.frames.iter().map(|f| f.to_string()).collect();
            path.push(id.to_string());
            return Err(DiError::CircularDependency(path));
        }

        if self.frames.len() >= self.max_depth {
            return Err(DiError::DepthExceeded(self.frames.len()));
        }

        self.frames.push(id.clone());
        Ok(())
    }

    fn leave(&mut self, id: &Identifier) {
        if let Some(last) = self.frames.pop() {
            debug_assert_eq!(&last, id);
        }
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Pops the frame on every exit path, unwinding included.
struct StackGuard<'a> {
    stack: &'a RefCell<ResolutionStack>,
    id: &'a Identifier,
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        self.stack.borrow_mut().leave(self.id);
    }
}

/// Execute a closure with `id` pushed onto the resolution stack.
pub(crate) fn with_frame<T, F>(stack: &RefCell<ResolutionStack>, id: &Identifier, f: F) -> DiResult<T>
where
    F: FnOnce() -> DiResult<T>,
{
    stack.borrow_mut().enter(id)?;
    let _guard = StackGuard { stack, id };
    f()
}
