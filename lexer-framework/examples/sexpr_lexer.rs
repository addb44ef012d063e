//! S-expression lexer example.
//! Configures comments, strings, symbols, terminals and keywords, then dumps
//! the tokens of a few small programs.

use lexer_framework::{Lexer, LexerError};

fn sexpr_lexer() -> Lexer {
    let mut lexer = Lexer::new();
    lexer
        .set_case_sensitive(false)
        .add_comment_type("--", "\n")
        .add_nested_comment_type("(*", "*)")
        .add_string_type("\"", Some("\\\""))
        .add_symbol("(", "PAR_OPEN")
        .add_symbol(")", "PAR_CLOSE")
        .add_symbol("'", "QUOTE")
        .add_terminal(r"[a-z][a-z0-9\-]*", "ID")
        .add_terminal(r"-?[0-9]+", "NUM")
        .add_keyword("define")
        .add_keyword("lambda");
    lexer
}

fn main() -> Result<(), LexerError> {
    let programs = [
        "(define answer 42)",
        "-- a comment\n(define greeting \"say \\\"hi\\\"\")",
        "(* outer (* inner *) *) (DEFINE inc (lambda (x) (+ x 1)))",
        "'(a-list -7)",
    ];

    let lexer = sexpr_lexer();
    for program in programs {
        println!("Program: {program:?}");
        println!("Tokens:");
        for token in lexer.tokenize(program)? {
            println!("  {token}");
        }
        println!();
    }
    Ok(())
}
