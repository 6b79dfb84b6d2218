//! Stack-driven builder for assembling value trees.
//!
//! The builder is the parser's structural twin: it enforces the same
//! grammar, driven by explicit calls instead of input characters. Every
//! operation checks its precondition and fails with a [`StructuralError`]
//! before touching the tree; [`Builder::build`] succeeds only once a root
//! is set and every opened container is closed.
//!
//! Open containers are addressed by their position path from the root
//! (an index into the enclosing array, a key in the enclosing object)
//! and re-resolved on each operation, so growing a container never
//! invalidates an ancestor's place on the stack.

use thiserror::Error;

use crate::value::{Object, Value};

/// A builder call made out of sequence.
///
/// These are bugs in the calling code: the offending operation fails and
/// leaves the builder exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("value not expected here")]
    MisplacedValue,
    #[error("key not expected here")]
    MisplacedKey,
    #[error("no array to close")]
    NoOpenArray,
    #[error("no object to close")]
    NoOpenObject,
    #[error("document not completed")]
    NotCompleted,
}

/// Path edge from an enclosing container down to one child.
#[derive(Debug, Clone)]
enum Step {
    Index(usize),
    Key(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Array,
    Object,
}

/// One open container: the step that reaches it from its parent (`None`
/// for the root), its kind, and - for objects - the key awaiting a value.
#[derive(Debug)]
struct Frame {
    step: Option<Step>,
    kind: FrameKind,
    pending_key: Option<String>,
}

/// Fluent assembler for one value tree.
///
/// Each operation returns `Result<&mut Builder, _>` so sequences chain
/// with `?`; finish with [`Builder::build`].
///
/// ```
/// use jdoc_core::Builder;
///
/// # fn demo() -> Result<(), jdoc_core::StructuralError> {
/// let mut b = Builder::new();
/// b.start_object()?
///     .key("id")?
///     .value(17)?
///     .key("tags")?
///     .start_array()?
///     .value("a")?
///     .value("b")?
///     .end_array()?
///     .end_object()?;
/// let tree = b.build()?;
/// assert!(tree.is_object());
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    root: Value,
    root_set: bool,
    frames: Vec<Frame>,
}

impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    /// Place a finished value: as the root, as the next array element, or
    /// at the pending key of the innermost object.
    pub fn value(&mut self, value: impl Into<Value>) -> Result<&mut Self, StructuralError> {
        self.insert(value.into())?;
        Ok(self)
    }

    /// Register `name` in the innermost object and make it the pending
    /// key. The member holds a null placeholder until the value arrives;
    /// re-registering an existing name overwrites that member without
    /// changing its sorted position.
    pub fn key(&mut self, name: impl Into<String>) -> Result<&mut Self, StructuralError> {
        match self.frames.last() {
            Some(f) if f.kind == FrameKind::Object && f.pending_key.is_none() => {}
            _ => return Err(StructuralError::MisplacedKey),
        }

        let name = name.into();
        match self.open_container() {
            Value::Object(members) => {
                members.insert(name.clone(), Value::Null);
            }
            _ => unreachable!("object frame over a non-object node"),
        }
        let top = self.frames.len() - 1;
        self.frames[top].pending_key = Some(name);
        Ok(self)
    }

    /// Open an array at the current insertion point and descend into it.
    pub fn start_array(&mut self) -> Result<&mut Self, StructuralError> {
        let step = self.insert(Value::Array(Vec::new()))?;
        self.frames.push(Frame {
            step,
            kind: FrameKind::Array,
            pending_key: None,
        });
        Ok(self)
    }

    /// Open an object at the current insertion point and descend into it.
    pub fn start_object(&mut self) -> Result<&mut Self, StructuralError> {
        let step = self.insert(Value::Object(Object::new()))?;
        self.frames.push(Frame {
            step,
            kind: FrameKind::Object,
            pending_key: None,
        });
        Ok(self)
    }

    /// Close the innermost container, which must be an array.
    pub fn end_array(&mut self) -> Result<&mut Self, StructuralError> {
        match self.frames.last() {
            Some(f) if f.kind == FrameKind::Array => {
                self.frames.pop();
                Ok(self)
            }
            _ => Err(StructuralError::NoOpenArray),
        }
    }

    /// Close the innermost container, which must be an object. A pending
    /// key keeps its null placeholder.
    pub fn end_object(&mut self) -> Result<&mut Self, StructuralError> {
        match self.frames.last() {
            Some(f) if f.kind == FrameKind::Object => {
                self.frames.pop();
                Ok(self)
            }
            _ => Err(StructuralError::NoOpenObject),
        }
    }

    /// Finish and return the tree. Fails unless a root was set and every
    /// container has been closed.
    pub fn build(self) -> Result<Value, StructuralError> {
        if !self.root_set || !self.frames.is_empty() {
            return Err(StructuralError::NotCompleted);
        }
        Ok(self.root)
    }

    /// Place `value` at the current insertion point, returning the step
    /// that reaches it (`None` when it became the root).
    fn insert(&mut self, value: Value) -> Result<Option<Step>, StructuralError> {
        if self.frames.is_empty() {
            if self.root_set {
                return Err(StructuralError::MisplacedValue);
            }
            self.root = value;
            self.root_set = true;
            return Ok(None);
        }

        let top = self.frames.len() - 1;
        match self.frames[top].kind {
            FrameKind::Array => match self.open_container() {
                Value::Array(items) => {
                    items.push(value);
                    Ok(Some(Step::Index(items.len() - 1)))
                }
                _ => unreachable!("array frame over a non-array node"),
            },
            FrameKind::Object => {
                let Some(key) = self.frames[top].pending_key.take() else {
                    return Err(StructuralError::MisplacedValue);
                };
                match self.open_container() {
                    Value::Object(members) => {
                        members.insert(key.clone(), value);
                        Ok(Some(Step::Key(key)))
                    }
                    _ => unreachable!("object frame over a non-object node"),
                }
            }
        }
    }

    /// Re-resolve the innermost open container from the root. Positions,
    /// not addresses, are stored, so this stays correct however the
    /// containers along the path have grown since the frame was pushed.
    fn open_container(&mut self) -> &mut Value {
        let mut node = &mut self.root;
        for frame in &self.frames {
            let Some(step) = &frame.step else { continue };
            node = match (step, node) {
                (Step::Index(i), Value::Array(items)) => &mut items[*i],
                (Step::Key(k), Value::Object(members)) => match members.get_mut(k) {
                    Some(child) => child,
                    None => unreachable!("open frame lost its member"),
                },
                _ => unreachable!("frame path desynced from tree"),
            };
        }
        node
    }
}
