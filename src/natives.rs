//! Host functions installed into the global scope.
//!
//! Each native is a plain `fn` pointer over the evaluated arguments.  Natives
//! report failures as bare messages; the call site turns those into runtime
//! errors on the line of the call's closing parenthesis.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};

use chrono::Utc;
use log::{debug, info};

use crate::callable::Callable;
use crate::error::{LoxError, Result};
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::Value;

type NativeFn = fn(&[Value]) -> std::result::Result<Value, String>;

#[derive(Debug)]
pub struct NativeFunction {
    pub name: &'static str,
    arity: usize,
    func: NativeFn,
}

impl NativeFunction {
    pub const fn new(name: &'static str, arity: usize, func: NativeFn) -> Self {
        Self { name, arity, func }
    }
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(
        &self,
        _interpreter: &mut Interpreter,
        paren: &Token,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        debug!("Calling native function '{}'", self.name);

        let result = (self.func)(&arguments).map_err(|message| LoxError::runtime(paren, message))?;

        info!("Native function '{}' returned: {}", self.name, result);

        Ok(result)
    }
}

/// Every native, in registration order.
pub fn all() -> [NativeFunction; 5] {
    [
        NativeFunction::new("clock", 0, clock),
        NativeFunction::new("readline", 0, readline),
        NativeFunction::new("read", 1, read),
        NativeFunction::new("write", 2, write),
        NativeFunction::new("append", 2, append),
    ]
}

fn clock(_args: &[Value]) -> std::result::Result<Value, String> {
    let millis = Utc::now().timestamp_millis();

    Ok(Value::Number(millis as f64 / 1000.0))
}

fn readline(_args: &[Value]) -> std::result::Result<Value, String> {
    let mut line = String::new();

    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| format!("readline() failed: {}", e))?;

    if read == 0 {
        return Ok(Value::Nil);
    }

    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);

    Ok(Value::String(line))
}

fn read(args: &[Value]) -> std::result::Result<Value, String> {
    let Some(Value::String(path)) = args.first() else {
        return Err("read() argument must be a string.".to_string());
    };

    fs::read_to_string(path)
        .map(Value::String)
        .map_err(|e| format!("read() could not read '{}': {}", path, e))
}

fn write(args: &[Value]) -> std::result::Result<Value, String> {
    let (path, content) = string_pair("write", args)?;

    fs::write(path, content).map_err(|e| format!("write() could not write '{}': {}", path, e))?;

    Ok(Value::Nil)
}

fn append(args: &[Value]) -> std::result::Result<Value, String> {
    let (path, content) = string_pair("append", args)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .map_err(|e| format!("append() could not write '{}': {}", path, e))?;

    Ok(Value::Nil)
}

fn string_pair<'v>(name: &str, args: &'v [Value]) -> std::result::Result<(&'v str, &'v str), String> {
    let path = match args.first() {
        Some(Value::String(path)) => path.as_str(),
        _ => return Err(format!("{}() first argument must be a string.", name)),
    };

    let content = match args.get(1) {
        Some(Value::String(content)) => content.as_str(),
        _ => return Err(format!("{}() second argument must be a string.", name)),
    };

    Ok((path, content))
}
