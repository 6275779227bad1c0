mod common;

#[cfg(test)]
mod native_tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use rlox_tree::driver::Outcome;

    use crate::common::run;

    /// Lox string literal for a host path.
    fn lox_path(path: &Path) -> String {
        format!("\"{}\"", path.display())
    }

    #[test]
    fn read_returns_file_contents() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test1.lox");
        fs::write(&file, "var a = \"Hello, world!\";\nprint a;").unwrap();

        let (outcome, transcript) = run(&format!("var a = read({});\nprint a;", lox_path(&file)));

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(transcript, "var a = \"Hello, world!\";\nprint a;\n");
    }

    #[test]
    fn write_then_append() {
        let dir = tempdir().unwrap();
        let file = lox_path(&dir.path().join("hello.lox"));

        let source = format!(
            r#"var a = "Hello, world!";
print write({file}, a);

var b = read({file});
print b;

append({file}, a);
b = read({file});

print b;
"#
        );

        let (outcome, transcript) = run(&source);

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(transcript, "nil\nHello, world!\nHello, world!Hello, world!\n");
    }

    #[test]
    fn append_creates_missing_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("fresh.txt");

        let (outcome, _) = run(&format!("append({}, \"line\");", lox_path(&file)));

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(fs::read_to_string(&file).unwrap(), "line");
    }

    #[test]
    fn argument_type_errors() {
        let (outcome, transcript) = run("read(1);");
        assert_eq!(outcome, Outcome::RuntimeError);
        assert_eq!(transcript, "read() argument must be a string.\n[line 1]\n");

        let (_, transcript) = run("write(1, \"x\");");
        assert_eq!(transcript, "write() first argument must be a string.\n[line 1]\n");

        let (_, transcript) = run("\nappend(\"x\", nil);");
        assert_eq!(transcript, "append() second argument must be a string.\n[line 2]\n");
    }

    #[test]
    fn missing_file_is_a_runtime_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("absent.lox");

        let (outcome, transcript) = run(&format!("read({});", lox_path(&file)));

        assert_eq!(outcome, Outcome::RuntimeError);
        assert!(
            transcript.starts_with("read() could not read"),
            "unexpected transcript: {}",
            transcript
        );
        assert!(transcript.ends_with("\n[line 1]\n"));
    }

    #[test]
    fn native_arity_is_checked() {
        let (_, transcript) = run("clock(1);");
        assert_eq!(transcript, "Expected 0 arguments but got 1.\n[line 1]\n");

        let (_, transcript) = run("write(\"only one\");");
        assert_eq!(transcript, "Expected 2 arguments but got 1.\n[line 1]\n");
    }

    #[test]
    fn natives_print_uniformly() {
        let (_, transcript) = run("print clock;\nprint readline;\nprint read;\nprint write;\nprint append;");

        assert_eq!(transcript, "<native fn>\n".repeat(5));
    }
}
