//! The `Lox` session: runs source text through scanner → parser → resolver →
//! interpreter and reports diagnostics, one per line, to its error sink.
//!
//! A session keeps one interpreter for its whole life, so globals defined by
//! one `run` are visible to the next (the REPL depends on this).

use std::io::{self, Write};

use log::{debug, info, warn};

use crate::ast_printer::AstPrinter;
use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::{scan_tokens, Scanner};
use crate::token::Token;

/// Result of handing one piece of source to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Scanning, parsing or resolving reported at least one error.
    CompileError,
    RuntimeError,
}

impl Outcome {
    /// Conventional process exit status (sysexits `EX_DATAERR` /
    /// `EX_SOFTWARE`).
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::CompileError => 65,
            Outcome::RuntimeError => 70,
        }
    }
}

pub struct Lox {
    interpreter: Interpreter,
    err: Box<dyn Write>,
    had_error: bool,
    had_runtime_error: bool,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    /// Program output to stdout, diagnostics to stderr.
    pub fn new() -> Self {
        Self::with_output(io::stdout(), io::stderr())
    }

    pub fn with_output<O, E>(out: O, err: E) -> Self
    where
        O: Write + 'static,
        E: Write + 'static,
    {
        Self {
            interpreter: Interpreter::with_output(out),
            err: Box::new(err),
            had_error: false,
            had_runtime_error: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Forget earlier failures (between REPL lines).
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    /// Run a whole program.
    pub fn run(&mut self, source: &str) -> Outcome {
        info!("Running {} bytes of source", source.len());

        let (tokens, lex_errors) = scan_tokens(source);
        let mut failed = self.report_all(&lex_errors);

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();
        failed |= self.report_all(&parser.take_errors());

        if failed {
            return Outcome::CompileError;
        }

        if let Err(errors) = Resolver::new(&mut self.interpreter).resolve(&statements) {
            self.report_all(&errors);
            return Outcome::CompileError;
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => Outcome::Success,
            Err(error) => {
                self.report(&error);
                Outcome::RuntimeError
            }
        }
    }

    /// Print every token (or its JSON form), reporting lexical errors inline.
    pub fn tokenize(&mut self, source: &str, json: bool) -> Outcome {
        let mut failed = false;

        for scanned in Scanner::new(source) {
            match scanned {
                Ok(token) => {
                    if let Err(error) = self.print_token(&token, json) {
                        self.report(&error);
                        return Outcome::RuntimeError;
                    }
                }
                Err(error) => {
                    failed = true;
                    self.report(&error);
                }
            }
        }

        if failed {
            Outcome::CompileError
        } else {
            Outcome::Success
        }
    }

    /// Parse one expression and print its tree.
    pub fn parse(&mut self, source: &str) -> Outcome {
        let Some(expr) = self.parse_single_expression(source) else {
            return Outcome::CompileError;
        };

        let printed = AstPrinter::print(&expr);
        debug!("AST: {}", printed);

        match writeln!(self.interpreter.out(), "{}", printed) {
            Ok(()) => Outcome::Success,
            Err(error) => {
                self.report(&LoxError::from(error));
                Outcome::RuntimeError
            }
        }
    }

    /// Evaluate one expression against the globals and print the value.
    pub fn evaluate(&mut self, source: &str) -> Outcome {
        let Some(expr) = self.parse_single_expression(source) else {
            return Outcome::CompileError;
        };

        let result = self.interpreter.evaluate(&expr).and_then(|value| {
            writeln!(self.interpreter.out(), "{}", value)?;
            Ok(())
        });

        match result {
            Ok(()) => Outcome::Success,
            Err(error) => {
                self.report(&error);
                Outcome::RuntimeError
            }
        }
    }

    fn parse_single_expression(&mut self, source: &str) -> Option<crate::ast::Expr> {
        let (tokens, lex_errors) = scan_tokens(source);
        let mut failed = self.report_all(&lex_errors);

        let mut parser = Parser::new(tokens);
        let expr = parser.parse_expression();
        failed |= self.report_all(&parser.take_errors());

        if failed {
            None
        } else {
            expr
        }
    }

    fn print_token(&mut self, token: &Token, json: bool) -> crate::error::Result<()> {
        let out = self.interpreter.out();

        if json {
            let line = serde_json::to_string(token).map_err(io::Error::from)?;
            writeln!(out, "{}", line)?;
        } else {
            writeln!(out, "{}", token)?;
        }

        Ok(())
    }

    /// Report each error; `true` if there was any.
    fn report_all(&mut self, errors: &[LoxError]) -> bool {
        for error in errors {
            self.report(error);
        }

        !errors.is_empty()
    }

    fn report(&mut self, error: &LoxError) {
        if error.is_compile_time() {
            self.had_error = true;
        } else {
            self.had_runtime_error = true;
        }

        debug!("Reporting: {}", error);

        if let Err(e) = writeln!(self.err, "{}", error).and_then(|()| self.err.flush()) {
            warn!("Could not write diagnostic: {}", e);
        }
    }
}
