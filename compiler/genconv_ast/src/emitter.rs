//! Output Emitter
//!
//! Abstraction for output production during printing. Generated Go is
//! indented with tabs, as gofmt does.

/// Trait for emitting printed output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation (one tab per level).
    fn emit_indent(&mut self, level: usize);
}

/// String-based emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the printed output.
    pub fn output(self) -> String {
        self.buffer
    }

    /// Output so far, borrowed.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Output length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Ensure the output ends with exactly one newline.
    pub fn finish_with_newline(&mut self) {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.buffer.push('\t');
        }
    }
}
