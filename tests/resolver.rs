mod common;

#[cfg(test)]
mod resolver_tests {
    use pretty_assertions::assert_eq;

    use rlox_tree::driver::Outcome;

    use crate::common::run;

    fn assert_compile_error(source: &str, expected: &str) {
        let (outcome, transcript) = run(source);

        assert_eq!(outcome, Outcome::CompileError);
        assert_eq!(transcript, expected);
    }

    #[test]
    fn test_read_in_own_initializer() {
        assert_compile_error(
            "{\n  var a = a;\n}",
            "[line 2] Error at 'a': Can't read local variable in its own initializer.\n",
        );
    }

    #[test]
    fn test_global_self_reference_is_a_runtime_matter() {
        let (outcome, transcript) = run("var a = a;");

        assert_eq!(outcome, Outcome::RuntimeError);
        assert_eq!(transcript, "Undefined variable 'a'.\n[line 1]\n");
    }

    #[test]
    fn test_redeclaration_in_same_scope() {
        assert_compile_error(
            "fun bad() {\n  var a = \"first\";\n  var a = \"second\";\n}",
            "[line 3] Error at 'a': Already a variable with this name in this scope.\n",
        );
    }

    #[test]
    fn test_global_redeclaration_is_allowed() {
        let (outcome, transcript) = run("var a = 1;\nvar a = 2;\nprint a;");

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(transcript, "2\n");
    }

    #[test]
    fn test_return_at_top_level() {
        assert_compile_error(
            "return \"at top level\";",
            "[line 1] Error at 'return': Can't return from top-level code.\n",
        );
    }

    #[test]
    fn test_return_value_from_initializer() {
        assert_compile_error(
            "class Foo {\n  init() {\n    return \"something else\";\n  }\n}",
            "[line 3] Error at 'return': Cannot return a value from an initializer.\n",
        );
    }

    #[test]
    fn test_this_outside_class() {
        assert_compile_error(
            "print this;",
            "[line 1] Error at 'this': Can't use 'this' outside of a class.\n",
        );
        assert_compile_error(
            "fun notAMethod() {\n  print this;\n}",
            "[line 2] Error at 'this': Can't use 'this' outside of a class.\n",
        );
    }

    #[test]
    fn test_super_misuse() {
        assert_compile_error(
            "super.foo();",
            "[line 1] Error at 'super': Can't use 'super' outside of a class.\n",
        );
        assert_compile_error(
            "class Base {\n  foo() {\n    super.foo();\n  }\n}",
            "[line 3] Error at 'super': Can't use 'super' in a class with no superclass.\n",
        );
    }

    #[test]
    fn test_class_inheriting_from_itself() {
        assert_compile_error(
            "class Oops < Oops {}",
            "[line 1] Error at 'Oops': A class can't inherit from itself.\n",
        );
    }

    #[test]
    fn test_all_errors_are_reported() {
        assert_compile_error(
            "return 1;\n{\n  var b = 1;\n  var b = 2;\n}\nprint this;",
            "[line 1] Error at 'return': Can't return from top-level code.\n\
             [line 4] Error at 'b': Already a variable with this name in this scope.\n\
             [line 6] Error at 'this': Can't use 'this' outside of a class.\n",
        );
    }

    #[test]
    fn test_nothing_runs_after_a_resolve_error() {
        assert_compile_error(
            "print \"before\";\nreturn;",
            "[line 2] Error at 'return': Can't return from top-level code.\n",
        );
    }

    #[test]
    fn test_closure_binds_to_declaration_in_scope_at_creation() {
        let source = r#"
var a = "global";
{
  fun showA() {
    print a;
  }

  showA();
  var a = "block";
  showA();
  print a;
}
"#;

        let (outcome, transcript) = run(source);

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(transcript, "global\nglobal\nblock\n");
    }
}
