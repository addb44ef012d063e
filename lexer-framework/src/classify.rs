//! Classification of normal-mode spans into typed tokens.
//!
//! A span is the run of characters between two boundaries (whitespace,
//! a comment or a string). Classification happens in three passes:
//!
//! 1. whole-span regex terminals,
//! 2. otherwise symbol splitting, recursing into the residues,
//! 3. otherwise the `terminal` fallback,
//!
//! after which keywords are applied to every token the span produced.

use crate::cursor::CharInfo;
use crate::lexer::TokenRules;
use common_framework::{Token, TERMINAL};

/// Classifies `span` into one or more tokens.
pub(crate) fn classify(rules: &TokenRules, span: &[CharInfo]) -> Vec<Token> {
    let mut tokens = Vec::new();
    split(rules, span, &mut tokens);
    for token in &mut tokens {
        apply_keyword(rules, token);
    }
    tokens
}

fn split(rules: &TokenRules, span: &[CharInfo], out: &mut Vec<Token>) {
    let (Some(first), Some(last)) = (span.first(), span.last()) else {
        return;
    };
    let content: String = span.iter().map(|info| info.ch).collect();

    let matched: Vec<&str> = rules
        .terminals
        .iter()
        .filter(|(regex, _)| regex.is_match(&content))
        .map(|(_, name)| name.as_str())
        .collect();
    if let Some((primary, rest)) = matched.split_first() {
        let mut token = Token::new(content, *primary, first.position, last.position);
        if rules.multi_type {
            for name in rest {
                token.add_type(*name);
            }
        }
        out.push(token);
        return;
    }

    if let Some((at, len, name)) = find_symbol(rules, span) {
        split(rules, &span[..at], out);
        let symbol = &span[at..at + len];
        let content: String = symbol.iter().map(|info| info.ch).collect();
        out.push(Token::new(
            content,
            name,
            symbol[0].position,
            symbol[len - 1].position,
        ));
        split(rules, &span[at + len..], out);
        return;
    }

    out.push(Token::new(content, TERMINAL, first.position, last.position));
}

/// Picks the symbol to split `span` at and returns `(offset, len, name)`.
///
/// Every offset where a symbol starts is a candidate, using the longest
/// symbol starting there. The last candidate whose left residue is empty or
/// fully matches a terminal pattern wins, so the leading terminal is as long
/// as possible: `a-name)` yields an identifier and `)` even when `-` is a
/// symbol too. Without such a candidate the longest symbol wins, ties going
/// to the earliest offset.
fn find_symbol<'r>(rules: &'r TokenRules, span: &[CharInfo]) -> Option<(usize, usize, &'r str)> {
    let candidates: Vec<_> = (0..span.len())
        .filter_map(|at| symbol_at(rules, span, at).map(|(len, name)| (at, len, name)))
        .collect();

    candidates
        .iter()
        .rev()
        .find(|(at, _, _)| *at == 0 || is_terminal(rules, &span[..*at]))
        .or_else(|| {
            candidates
                .iter()
                .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        })
        .copied()
}

/// The longest symbol starting at `at`, ties going to the first declared.
fn symbol_at<'r>(rules: &'r TokenRules, span: &[CharInfo], at: usize) -> Option<(usize, &'r str)> {
    let rest = &span[at..];
    rules
        .symbols
        .iter()
        .filter(|(seq, _)| {
            seq.len() <= rest.len() && rest.iter().zip(seq).all(|(info, ch)| info.ch == *ch)
        })
        .map(|(seq, name)| (seq.len(), name.as_str()))
        .fold(None, |best, found| match best {
            Some((len, _)) if len >= found.0 => best,
            _ => Some(found),
        })
}

fn is_terminal(rules: &TokenRules, span: &[CharInfo]) -> bool {
    let content: String = span.iter().map(|info| info.ch).collect();
    rules.terminals.iter().any(|(regex, _)| regex.is_match(&content))
}

fn apply_keyword(rules: &TokenRules, token: &mut Token) {
    let content = token.content();
    let keyword = rules.keywords.iter().find(|keyword| {
        if rules.case_sensitive {
            keyword.as_str() == content
        } else {
            keyword.to_uppercase() == content.to_uppercase()
        }
    });
    let Some(keyword) = keyword else {
        return;
    };
    let tag = keyword.to_uppercase();
    if rules.multi_type {
        token.add_type(&tag);
    } else {
        token.set_type(&tag);
    }
}
