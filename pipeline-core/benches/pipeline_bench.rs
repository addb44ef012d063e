use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lexer_framework::Lexer;
use parser_framework::{alt, many, one_or_more, opt, rule_ref, seq, term, Grammar};
use pipeline_core::Parser;

// --- Shared configuration ---
fn boolean_lexer() -> Lexer {
    let mut lexer = Lexer::new();
    lexer
        .add_comment_type("#", "\n")
        .add_symbol("(", "PAR_OPEN")
        .add_symbol(")", "PAR_CLOSE")
        .add_symbol(";", "SEMI")
        .add_terminal("[a-z][a-z0-9_]*", "ID")
        .add_keyword("or")
        .add_keyword("and")
        .add_keyword("not");
    lexer
}

fn boolean_grammar() -> Grammar {
    let mut grammar = Grammar::new();
    grammar.rule(
        "program",
        one_or_more(seq().add(rule_ref("disj")).add(term("SEMI"))),
        true,
    );
    grammar.rule(
        "disj",
        seq()
            .add(rule_ref("conj"))
            .add(many(seq().add(term("OR")).add(rule_ref("conj")))),
        false,
    );
    grammar.rule(
        "conj",
        seq()
            .add(rule_ref("neg"))
            .add(many(seq().add(term("AND")).add(rule_ref("neg")))),
        false,
    );
    grammar.rule("neg", seq().add(opt(term("NOT"))).add(rule_ref("atom")), false);
    grammar.rule(
        "atom",
        alt().add(term("ID")).add(
            seq()
                .add(term("PAR_OPEN"))
                .add(rule_ref("disj"))
                .add(term("PAR_CLOSE")),
        ),
        false,
    );
    grammar
}

fn generate_input(lines: usize) -> String {
    let stmt = "alpha and (beta or not gamma) or delta; # comment\n";
    stmt.repeat(lines)
}

// --- Bench ---
fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_lexer");

    let input = generate_input(1000);
    let lexer = boolean_lexer();

    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("tokenize_1k_lines", |b| {
        b.iter(|| lexer.tokenize(black_box(&input)))
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_batch");

    let input = generate_input(1000);
    let mut parser = Parser::with(boolean_lexer(), boolean_grammar());

    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("parse_boolean_1k_lines", |b| {
        b.iter(|| parser.parse_from_text(black_box(&input)))
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_pipeline);
criterion_main!(benches);
