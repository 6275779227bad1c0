#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rlox_tree::driver::{Lox, Outcome};

/// In‑memory sink that can be handed to the session twice (output and
/// diagnostics) so both streams land in one transcript.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A session whose stdout and stderr are the same buffer.
pub fn session() -> (Lox, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let lox = Lox::with_output(buffer.clone(), buffer.clone());

    (lox, buffer)
}

/// Run `source` in a fresh session; return the outcome and the transcript.
pub fn run(source: &str) -> (Outcome, String) {
    let (mut lox, buffer) = session();
    let outcome = lox.run(source);

    (outcome, buffer.contents())
}
