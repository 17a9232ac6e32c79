use std::collections::BTreeSet;

use proptest::prelude::*;
use regdfa::automaton::{EpsilonClosures, StateSet, epsilon_closure};
use regdfa::table::{decode, encode_dfa, encode_nfa};
use regdfa::{Ast, Config, EpsilonNFA, NfaBuilder, Table, parse, subset_construction};

/// Letters plus characters that are separators or blanks in the table text.
const LETTERS: [char; 7] = ['a', 'b', 'c', ' ', ';', ',', '\t'];

fn ast() -> impl Strategy<Value = Ast> {
    let leaf = prop_oneof![
        4 => prop::sample::select(LETTERS.to_vec()).prop_map(Ast::Literal),
        1 => Just(Ast::Epsilon),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Ast::concat(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Ast::or(l, r)),
            inner.clone().prop_map(Ast::repeat),
            inner.prop_map(Ast::plus),
        ]
    })
}

/// Every word over `LETTERS` up to length 3.
fn words() -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..3 {
        frontier = frontier
            .iter()
            .flat_map(|w| LETTERS.iter().map(move |c| format!("{w}{c}")))
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all
}

/// Positions where a match of `ast` starting at `start` can end.
fn ends(ast: &Ast, word: &[char], start: usize) -> BTreeSet<usize> {
    match ast {
        Ast::Literal(c) => (word.get(start) == Some(c))
            .then_some(start + 1)
            .into_iter()
            .collect(),
        Ast::Epsilon => BTreeSet::from([start]),
        Ast::Concat(l, r) => ends(l, word, start)
            .into_iter()
            .flat_map(|mid| ends(r, word, mid))
            .collect(),
        Ast::Or(l, r) => {
            let mut both = ends(l, word, start);
            both.extend(ends(r, word, start));
            both
        }
        Ast::Repeat(inner) => iterate(inner, word, BTreeSet::from([start])),
        Ast::Plus(inner) => iterate(inner, word, ends(inner, word, start)),
    }
}

fn iterate(inner: &Ast, word: &[char], seeds: BTreeSet<usize>) -> BTreeSet<usize> {
    let mut reached = seeds.clone();
    let mut pending: Vec<usize> = seeds.into_iter().collect();
    while let Some(position) = pending.pop() {
        for next in ends(inner, word, position) {
            if reached.insert(next) {
                pending.push(next);
            }
        }
    }
    reached
}

fn matches(ast: &Ast, word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    ends(ast, &chars, 0).contains(&chars.len())
}

fn build(ast: &Ast) -> EpsilonNFA {
    NfaBuilder::new().build(ast)
}

fn subset_of(nfa: &EpsilonNFA, mask: u64) -> StateSet {
    (0..nfa.num_states().min(64))
        .filter(|s| mask & (1 << s) != 0)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn displayed_patterns_reparse_to_the_same_language(ast in ast()) {
        let reparsed = parse(&ast.to_string()).unwrap();
        for word in words() {
            prop_assert_eq!(matches(&ast, &word), matches(&reparsed, &word), "{}", word);
        }
    }

    #[test]
    fn dfa_matches_the_pattern(ast in ast()) {
        let nfa = build(&ast);
        let dfa = subset_construction(&nfa, &Config::default()).unwrap();
        for word in words() {
            let expected = matches(&ast, &word);
            prop_assert_eq!(nfa.accepts_str(&word), expected, "nfa on {:?}", word);
            prop_assert_eq!(dfa.accepts_str(&word), expected, "dfa on {:?}", word);
        }
    }

    #[test]
    fn closure_is_monotonic_and_idempotent(ast in ast(), mask in any::<u64>()) {
        let nfa = build(&ast);
        let seeds = subset_of(&nfa, mask);
        let once = epsilon_closure(&nfa, &seeds);
        prop_assert!(seeds.is_subset(&once));
        prop_assert_eq!(&epsilon_closure(&nfa, &once), &once);
        prop_assert_eq!(&EpsilonClosures::new(&nfa).closure(&seeds), &once);
    }

    #[test]
    fn dfa_is_deterministic_bounded_and_preserves_finality(ast in ast()) {
        let nfa = build(&ast);
        let dfa = subset_construction(&nfa, &Config::default()).unwrap();

        let n = nfa.num_states();
        if n < 32 {
            prop_assert!(dfa.num_states() <= 1u32 << n);
        }

        let mut seen = BTreeSet::new();
        for (src, sym, _) in dfa.transitions() {
            prop_assert!(seen.insert((src, sym)));
        }

        let mapping = dfa.state_mapping().unwrap();
        prop_assert_eq!(mapping.len(), dfa.num_states() as usize);
        let distinct: BTreeSet<_> = mapping.iter().collect();
        prop_assert_eq!(distinct.len(), mapping.len());
        for (state, nfa_states) in mapping.iter().enumerate() {
            let any_final = nfa_states.iter().any(|&s| nfa.is_final(s));
            prop_assert_eq!(dfa.is_final(state as u32), any_final);
        }
    }

    #[test]
    fn table_round_trips_preserve_the_language(ast in ast()) {
        let nfa = build(&ast);
        let dfa = subset_construction(&nfa, &Config::default()).unwrap();

        let through_text = |table: Table| {
            let reparsed = Table::parse(&table.to_string()).unwrap();
            prop_assert_eq!(&reparsed, &table);
            Ok(decode(&reparsed).unwrap())
        };
        let nfa_again = through_text(encode_nfa(&nfa))?;
        let dfa_again = subset_construction(&through_text(encode_dfa(&dfa))?, &Config::default())
            .unwrap();

        for word in words() {
            prop_assert_eq!(nfa_again.accepts_str(&word), nfa.accepts_str(&word));
            prop_assert_eq!(dfa_again.accepts_str(&word), dfa.accepts_str(&word));
        }
    }
}
