//! Boolean expression parser example.
//! Parses `a and (b or not c)` style statements into an AST, folds the
//! grammar's helper nodes away with transforms, and prints the result as XML.
//!
//! Pass a file path to parse a file instead of the built-in programs.
//! Set `RUST_LOG=parser_framework=trace` to watch the parse.

use lexer_framework::Lexer;
use parser_framework::{alt, many, opt, rule_ref, seq, term, Ast, Grammar, ParseError};
use pipeline_core::Parser;
use tracing_subscriber::EnvFilter;

fn boolean_lexer() -> Lexer {
    let mut lexer = Lexer::new();
    lexer
        .set_case_sensitive(false)
        .add_comment_type("#", "\n")
        .add_nested_comment_type("(*", "*)")
        .add_symbol("(", "PAR_OPEN")
        .add_symbol(")", "PAR_CLOSE")
        .add_terminal("[a-z][a-z0-9_]*", "ID")
        .add_keyword("or")
        .add_keyword("and")
        .add_keyword("not");
    lexer
}

/// Collapses a binary-operator rule: one operand is returned as is,
/// several become children of an `op` node.
fn fold(op: &'static str) -> impl Fn(Ast) -> Result<Ast, ParseError> {
    move |mut node| {
        let mut operands = node.take_children_by_id("operand");
        if operands.len() == 1 {
            return Ok(operands.remove(0));
        }
        let mut folded = Ast::new(op);
        for operand in operands {
            folded.add_child(operand);
        }
        Ok(folded)
    }
}

fn boolean_grammar() -> Result<Grammar, ParseError> {
    let mut grammar = Grammar::new();
    grammar
        .rule(
            "disj",
            seq()
                .add_with_id(rule_ref("conj"), "operand")
                .add(many(
                    seq().add(term("OR")).add_with_id(rule_ref("conj"), "operand"),
                )),
            true,
        )
        .set_transform(fold("or"));
    grammar
        .rule(
            "conj",
            seq()
                .add_with_id(rule_ref("neg"), "operand")
                .add(many(
                    seq().add(term("AND")).add_with_id(rule_ref("neg"), "operand"),
                )),
            false,
        )
        .set_transform(fold("and"));
    grammar.rule(
        "neg",
        seq()
            .add_with_id(opt(term("NOT")), "not")
            .add_with_id(rule_ref("atom"), "value"),
        false,
    );
    grammar.rule(
        "atom",
        alt().add(term("ID").with_id("value")).add(
            seq()
                .add(term("PAR_OPEN"))
                .add_with_id(rule_ref("disj"), "value")
                .add(term("PAR_CLOSE")),
        ),
        false,
    );

    grammar.set_rule_transform("neg", |mut node| {
        let value = node.take_child_by_id("value")?;
        if node.child_by_id("not").is_none() {
            return Ok(value);
        }
        let mut not = Ast::new("not");
        not.add_child(value);
        Ok(not)
    })?;
    grammar.set_rule_transform("atom", |mut node| node.take_child_by_id("value"))?;
    grammar.set_terminal_transform("ID", |node| Ok(Ast::with_text("var", node.text())));
    Ok(grammar)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut parser = Parser::with(boolean_lexer(), boolean_grammar()?);

    if let Some(path) = std::env::args().nth(1) {
        match parser.parse_file(&path) {
            Some(ast) => print!("{}", ast.to_xml(2)),
            None => eprintln!("{path}: {}", parser.error()),
        }
        return Ok(());
    }

    let programs = [
        "a",
        "a or b and c",
        "NOT (a Or b) and c # trailing comment",
        "(* outer (* inner *) *) x and not y",
        "a or",
        "a b",
    ];
    for program in programs {
        println!("Program: {program:?}");
        match parser.parse_from_text(program) {
            Some(ast) => print!("{}", ast.to_xml(2)),
            None => println!("Error: {}", parser.error()),
        }
        println!();
    }
    Ok(())
}
