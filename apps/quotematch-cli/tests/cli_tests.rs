use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use quotematch_cli::{display_outcome, parse_args, run_interactive, run_single, Args};
use quotematch_core::loader::JsonQuoteRepository;
use quotematch_engine::QuoteEngine;
use quotematch_text::Lexicon;

fn engine() -> QuoteEngine {
    // apps/quotematch-cli -> apps -> repo root
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().join("data/quotes.json");
    let mut engine = QuoteEngine::new(Arc::new(Lexicon::builtin().unwrap()));
    engine.initialize(&JsonQuoteRepository::new(), &path).expect("quotes");
    engine
}

fn output_of(f: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut buf = Vec::new();
    f(&mut buf);
    String::from_utf8(buf).unwrap()
}

#[test]
fn parses_positional_and_flags() {
    let args = parse_args(["my_quotes.json", "-q", "I need motivation", "--top", "5", "--explain"]).unwrap();
    assert_eq!(
        args,
        Args {
            quotes_file: Some(PathBuf::from("my_quotes.json")),
            query: Some("I need motivation".to_string()),
            top_n: Some(5),
            explain: true,
            help: false,
        }
    );
    assert!(parse_args(["--help"]).unwrap().help);
    assert_eq!(parse_args(Vec::<String>::new()).unwrap(), Args::default());
}

#[test]
fn rejects_bad_arguments() {
    assert!(parse_args(["--query"]).is_err());
    assert!(parse_args(["--top", "zero"]).is_err());
    assert!(parse_args(["--top", "0"]).is_err());
    assert!(parse_args(["--verbose"]).is_err());
}

#[test]
fn explain_requires_a_single_query() {
    let err = parse_args(["--explain"]).unwrap_err();
    assert!(err.to_string().contains("--explain requires --query"));
    assert!(parse_args(["quotes.json", "--explain", "-q", "I feel lost"]).unwrap().explain);
}

#[test]
fn single_query_renders_results() {
    let engine = engine();
    let text = output_of(|out| run_single(out, &engine, "My dog is sick, and I'm worried", 3).unwrap());
    assert!(text.contains("Query: My dog is sick, and I'm worried"));
    assert!(text.contains("1. ["));
    assert!(text.contains("\"Just keep swimming.\""));
    assert!(text.contains("— Dory (Finding Nemo)"));
    assert!(!text.contains("bigger boat"));
}

#[test]
fn crisis_renders_resources_without_quotes() {
    let engine = engine();
    let text = output_of(|out| display_outcome(out, &engine, "I don't want to live anymore", 3).unwrap());
    assert!(text.contains("CRISIS RESOURCES"));
    assert!(text.contains("988"));
    assert!(!text.contains("1. ["));
}

#[test]
fn no_match_suggests_rephrasing() {
    let engine = engine();
    let text = output_of(|out| display_outcome(out, &engine, "the of and", 3).unwrap());
    assert!(text.contains("Try describing your feelings differently."));
}

#[test]
fn interactive_loop_skips_blanks_and_quits() {
    let engine = engine();
    let mut input = Cursor::new("\n   \nI'm very happy, meeting my family tonight\nquit\nI want to die\n");
    let text = output_of(|out| run_interactive(&mut input, out, &engine, 2).unwrap());
    assert!(text.contains("\"You had me at hello.\""));
    assert!(text.contains("Take care!"));
    // Input after `quit` is never processed.
    assert!(!text.contains("CRISIS RESOURCES"));
}

#[test]
fn interactive_loop_ends_on_eof() {
    let engine = engine();
    let mut input = Cursor::new("I feel overwhelmed and exhausted at work");
    let text = output_of(|out| run_interactive(&mut input, out, &engine, 3).unwrap());
    assert!(text.contains("1. ["));
    assert!(!text.contains("Take care!"));
}
