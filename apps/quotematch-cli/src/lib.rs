//! quotematch-cli
//!
//! Argument parsing, the interactive loop and text rendering for the
//! `quotematch` binary.
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use quotematch_core::traits::QuoteService;
use quotematch_core::types::{SearchOutcome, SearchResult};
use quotematch_core::Error;
use quotematch_engine::Explanation;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub quotes_file: Option<PathBuf>,
    pub query: Option<String>,
    pub top_n: Option<usize>,
    pub explain: bool,
    pub help: bool,
}

pub fn parse_args<I, S>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parsed = Args::default();
    let mut iter = args.into_iter().map(Into::into);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--query" | "-q" => {
                let q = iter.next().ok_or_else(|| anyhow!("--query flag requires an argument"))?;
                parsed.query = Some(q);
            }
            "--top" | "-n" => {
                let n = iter.next().ok_or_else(|| anyhow!("--top flag requires an argument"))?;
                let n: usize = n.parse().map_err(|_| anyhow!("--top expects a positive number, got '{}'", n))?;
                if n == 0 {
                    return Err(anyhow!("--top expects a positive number, got '0'"));
                }
                parsed.top_n = Some(n);
            }
            "--explain" => parsed.explain = true,
            "--help" | "-h" => parsed.help = true,
            other if other.starts_with('-') => return Err(anyhow!("unknown option '{}'", other)),
            path => parsed.quotes_file = Some(PathBuf::from(path)),
        }
    }
    if parsed.explain && parsed.query.is_none() && !parsed.help {
        return Err(anyhow!("--explain requires --query"));
    }
    Ok(parsed)
}

pub fn usage(prog: &str) -> String {
    format!(
        "Movie Quote Search Engine - Find inspiration in cinema\n\n\
         Usage:\n  {prog} [quotes_file] [options]\n\n\
         Arguments:\n  quotes_file    Path to quotes JSON file (default: data.quotes_file from config)\n\n\
         Options:\n  --query, -q    Query to search (skips interactive mode)\n  \
         --top, -n      Number of quotes to show\n  \
         --explain      Show per-quote filter and score diagnostics (with --query)\n  \
         --help, -h     Show this help message\n\n\
         Examples:\n  {prog}\n  {prog} my_quotes.json\n  \
         {prog} --query \"I just got rejected and feel like giving up\"\n"
    )
}

pub fn render_banner(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", "═".repeat(RULE_WIDTH))?;
    writeln!(out, "  Movie Quote Search Engine")?;
    writeln!(out, "  Finding inspiration in cinema")?;
    writeln!(out, "{}", "═".repeat(RULE_WIDTH))
}

pub fn render_results(out: &mut impl Write, results: &[SearchResult]) -> std::io::Result<()> {
    writeln!(out, "\nHere are some quotes that might resonate with you:\n")?;
    for (i, result) in results.iter().enumerate() {
        writeln!(out, "{}. [{:.2}] \"{}\"", i + 1, result.score, result.quote.text)?;
        writeln!(out, "   — {} ({})", result.quote.character, result.quote.movie)?;
        if i + 1 < results.len() {
            writeln!(out)?;
        }
    }
    writeln!(out, "\n{}", "─".repeat(RULE_WIDTH))
}

pub fn render_no_match(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "\nNo matching quotes found for your situation.")?;
    writeln!(out, "Try describing your feelings differently.")
}

pub fn render_crisis(out: &mut impl Write) -> std::io::Result<()> {
    let rule = "═".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}\n")?;
    writeln!(out, "It sounds like you might be going through a really difficult time.\n")?;
    writeln!(out, "While movie quotes can be inspiring, what you're experiencing")?;
    writeln!(out, "may need professional support. Please consider reaching out:\n")?;
    writeln!(out, "CRISIS RESOURCES:\n")?;
    writeln!(out, "   • 988 Suicide & Crisis Lifeline (US)")?;
    writeln!(out, "     Call or Text: 988")?;
    writeln!(out, "     Available 24/7, free and confidential\n")?;
    writeln!(out, "   • Crisis Text Line (US)")?;
    writeln!(out, "     Text: HOME to 741741\n")?;
    writeln!(out, "   • International Association for Suicide Prevention")?;
    writeln!(out, "     https://www.iasp.info/resources/Crisis_Centres/\n")?;
    writeln!(out, "   • Emergency Services")?;
    writeln!(out, "     Call: 911 (US) or your local emergency number\n")?;
    writeln!(out, "You don't have to go through this alone. These trained")?;
    writeln!(out, "professionals are available to listen and help, any time.\n")?;
    writeln!(out, "{rule}")
}

pub fn render_explanations(out: &mut impl Write, explanations: &[Explanation]) -> std::io::Result<()> {
    writeln!(out, "\nDiagnostics ({} quotes):", explanations.len())?;
    for e in explanations {
        let verdict = e.rejected_by.as_deref().unwrap_or("passed");
        writeln!(
            out,
            "  [{:.3}] cos={:.3} sent×{:.1} tone×{:.1}  {}  — {}",
            e.breakdown.score, e.breakdown.cosine, e.breakdown.sentiment_penalty, e.breakdown.tone_penalty, e.quote.text, verdict
        )?;
    }
    Ok(())
}

/// Run one query and render its outcome. Validation errors are rendered,
/// anything else is returned.
pub fn display_outcome(out: &mut impl Write, service: &dyn QuoteService, query: &str, top_n: usize) -> Result<()> {
    match service.search_quotes(query, top_n) {
        Ok(SearchOutcome::Matches(results)) => render_results(out, &results)?,
        Ok(SearchOutcome::Crisis) => render_crisis(out)?,
        Ok(SearchOutcome::NoMatch) => render_no_match(out)?,
        Err(Error::EmptyQuery) => writeln!(out, "\nPlease describe how you're feeling.")?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn is_exit(line: &str) -> bool {
    let l = line.to_lowercase();
    l == "exit" || l == "quit"
}

/// Interactive loop: one query per line until EOF, `exit` or `quit`.
pub fn run_interactive(
    input: &mut impl BufRead,
    out: &mut impl Write,
    service: &dyn QuoteService,
    top_n: usize,
) -> Result<()> {
    render_banner(out)?;
    let mut line = String::new();
    loop {
        writeln!(out, "\nHow are you feeling? Describe your situation:")?;
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if is_exit(query) {
            writeln!(out, "\nTake care! Remember: just keep swimming.")?;
            break;
        }
        display_outcome(out, service, query, top_n)?;
    }
    Ok(())
}

pub fn run_single(out: &mut impl Write, service: &dyn QuoteService, query: &str, top_n: usize) -> Result<()> {
    render_banner(out)?;
    writeln!(out, "\nQuery: {query}")?;
    display_outcome(out, service, query, top_n)
}
