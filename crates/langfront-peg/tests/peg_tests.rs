//! Scenario S6 and supporting PEG-driver integration tests.

use langfront_common::{GrammarRule, GrammarSymbol, Kind, ParseError, Token};
use langfront_peg::PegParser;

fn t(raw: u32) -> GrammarSymbol {
    GrammarSymbol::terminal(Kind::new(raw))
}

fn n(raw: u32) -> GrammarSymbol {
    GrammarSymbol::non_terminal(Kind::new(raw))
}

const S: u32 = 0;
const A: u32 = 1;
const B: u32 = 2;
const EOF: u32 = 99;

#[test]
fn s6_ordered_choice_backtracks_without_leaking_the_failed_attempt() {
    // S -> a b | a
    let rules = vec![
        GrammarRule::new(Kind::new(S), vec![t(A), t(B)]),
        GrammarRule::new(Kind::new(S), vec![t(A)]),
    ];
    let parser = PegParser::new(&rules, Kind::new(S), Kind::new(EOF));

    let tokens = vec![Token::new(Kind::new(A), "a"), Token::new(Kind::new(EOF), "")];
    let tree = parser.parse(&tokens).unwrap();

    // The winning alternative is the second one (`a` alone): exactly one
    // child, and no trace of the first alternative's attempted `b` match.
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].symbol.kind, Kind::new(A));
    assert_eq!(tree.terminal_yield(), vec![Kind::new(A)]);
}

#[test]
fn first_alternative_wins_when_it_fully_matches() {
    // Same grammar, but now the input has both tokens -- the first
    // alternative (`a b`) should win without ever trying the second.
    let rules = vec![
        GrammarRule::new(Kind::new(S), vec![t(A), t(B)]),
        GrammarRule::new(Kind::new(S), vec![t(A)]),
    ];
    let parser = PegParser::new(&rules, Kind::new(S), Kind::new(EOF));

    let tokens = vec![
        Token::new(Kind::new(A), "a"),
        Token::new(Kind::new(B), "b"),
        Token::new(Kind::new(EOF), ""),
    ];
    let tree = parser.parse(&tokens).unwrap();
    assert_eq!(tree.children.len(), 2);
    assert_eq!(
        tree.terminal_yield(),
        vec![Kind::new(A), Kind::new(B)]
    );
}

#[test]
fn nested_nonterminal_choice_rolls_back_across_levels() {
    // S -> X b | a
    // X -> a c | a
    // Input "a b" should fail X's first alternative (needs `c`), succeed
    // X's second alternative ("a"), then fail because S needs `b` but the
    // nested match already consumed it incorrectly -- forcing S to
    // backtrack out of the X branch entirely and take `S -> a`.
    const X: u32 = 3;
    const C: u32 = 4;

    let rules = vec![
        GrammarRule::new(Kind::new(S), vec![n(X), t(B)]),
        GrammarRule::new(Kind::new(S), vec![t(A)]),
        GrammarRule::new(Kind::new(X), vec![t(A), t(C)]),
        GrammarRule::new(Kind::new(X), vec![t(A)]),
    ];
    let parser = PegParser::new(&rules, Kind::new(S), Kind::new(EOF));

    let tokens = vec![Token::new(Kind::new(A), "a"), Token::new(Kind::new(EOF), "")];
    let tree = parser.parse(&tokens).unwrap();

    // S's first alternative (`X b`) can match X as `a`, but then there is
    // no `b` token left before eof, so it fails as a whole and S falls
    // back to its second alternative, `a`, leaving a single leaf child.
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].symbol.kind, Kind::new(A));
}

#[test]
fn start_symbol_epsilon_rule_accepts_empty_input() {
    let start = Kind::new(900);
    let eof = Kind::new(EOF);
    let rules = vec![GrammarRule::new(start, vec![])];
    let parser = PegParser::new(&rules, start, eof);

    let tree = parser.parse(&[Token::new(eof, "")]).unwrap();
    assert_eq!(tree.symbol.kind, start);
    assert!(tree.children.is_empty());
}

#[test]
fn non_nullable_start_rejects_empty_input() {
    let start = Kind::new(901);
    let eof = Kind::new(EOF);
    let rules = vec![GrammarRule::new(start, vec![t(A)])];
    let parser = PegParser::new(&rules, start, eof);

    let err = parser.parse(&[Token::new(eof, "")]).unwrap_err();
    assert_eq!(err, ParseError::ExhaustedAlternatives);
}

#[test]
fn s6_tree_shape() {
    let rules = vec![
        GrammarRule::new(Kind::new(S), vec![t(A), t(B)]),
        GrammarRule::new(Kind::new(S), vec![t(A)]),
    ];
    let parser = PegParser::new(&rules, Kind::new(S), Kind::new(EOF));
    let tokens = vec![Token::new(Kind::new(A), "a"), Token::new(Kind::new(EOF), "")];
    let tree = parser.parse(&tokens).unwrap();

    insta::assert_debug_snapshot!(tree, @r###"
ParseTree {
    symbol: GrammarSymbol {
        terminal: false,
        kind: Kind(
            0,
        ),
    },
    token: None,
    children: [
        ParseTree {
            symbol: GrammarSymbol {
                terminal: true,
                kind: Kind(
                    1,
                ),
            },
            token: Some(
                Token {
                    kind: Kind(
                        1,
                    ),
                    lexeme: "a",
                },
            ),
            children: [],
        },
    ],
}
"###);
}
