use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use log::info;
use regdfa::table::{decode, encode_dfa, encode_nfa};
use regdfa::{Config, Table, regex_to_dfa, regex_to_nfa, subset_construction};

const USAGE: &str = "usage:
  regdfa nfa <output> <regex>        write the Thompson NFA table
  regdfa dfa <input> <output>        determinize an NFA table
  regdfa convert <output> <regex>    write the DFA table of a regex
  regdfa match <regex> <word>...     print accept/reject for each word

environment:
  REGDFA_MAX_DEPTH    maximum group/operator nesting (default 1000)
  REGDFA_MAX_STATES   maximum number of DFA states (default unbounded)
  RUST_LOG            log filter, e.g. debug";

fn config_from_env() -> Result<Config> {
    let mut config = Config::default();
    if let Ok(depth) = env::var("REGDFA_MAX_DEPTH") {
        let depth = depth
            .parse()
            .with_context(|| format!("REGDFA_MAX_DEPTH={depth:?} is not a number"))?;
        config = config.with_max_nesting_depth(depth);
    }
    if let Ok(states) = env::var("REGDFA_MAX_STATES") {
        let states = states
            .parse()
            .with_context(|| format!("REGDFA_MAX_STATES={states:?} is not a number"))?;
        config = config.with_max_dfa_states(states);
    }
    Ok(config)
}

fn write_table(path: &str, table: &Table) -> Result<()> {
    fs::write(path, table.to_string()).with_context(|| format!("cannot write {path}"))?;
    info!("automaton exported to {path}");
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let config = config_from_env()?;

    match args {
        [command, output, pattern] if command == "nfa" => {
            let nfa = regex_to_nfa(pattern, &config)
                .with_context(|| format!("cannot compile {pattern:?}"))?;
            write_table(output, &encode_nfa(&nfa))
        }
        [command, input, output] if command == "dfa" => {
            let text = fs::read_to_string(input).with_context(|| format!("cannot read {input}"))?;
            let nfa = Table::parse(&text)
                .and_then(|table| decode(&table))
                .with_context(|| format!("cannot load {input}"))?;
            let dfa = subset_construction(&nfa, &config)
                .with_context(|| format!("cannot determinize {input}"))?;
            write_table(output, &encode_dfa(&dfa))
        }
        [command, output, pattern] if command == "convert" => {
            let dfa = regex_to_dfa(pattern, &config)
                .with_context(|| format!("cannot compile {pattern:?}"))?;
            write_table(output, &encode_dfa(&dfa))
        }
        [command, pattern, words @ ..] if command == "match" => {
            let dfa = regex_to_dfa(pattern, &config)
                .with_context(|| format!("cannot compile {pattern:?}"))?;
            for word in words {
                let verdict = if dfa.accepts_str(word) { "accept" } else { "reject" };
                println!("{verdict}\t{word}");
            }
            Ok(())
        }
        _ => {
            eprintln!("{USAGE}");
            bail!("expected one of the commands nfa, dfa, convert or match")
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("regdfa: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(args: &[&str]) -> String {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        format!("{:#}", run(&args).unwrap_err())
    }

    #[test]
    fn test_diagnostics_fit_on_one_line() {
        let cases: [&[&str]; 4] = [
            &[],
            &["bogus"],
            &["match", "(a"],
            &["dfa", "/nonexistent/in", "out"],
        ];
        for args in cases {
            let message = diagnostic(args);
            assert!(!message.contains('\n'), "{message:?}");
        }
        assert!(diagnostic(&["match", "(a"]).contains("unclosed parenthesis"));
    }
}
