use std::env;
use std::io;
use std::sync::Arc;

use quotematch_cli::{parse_args, render_explanations, run_interactive, run_single, usage};
use quotematch_core::config::Config;
use quotematch_core::loader::JsonQuoteRepository;
use quotematch_engine::QuoteEngine;
use quotematch_text::Lexicon;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn main() -> anyhow::Result<()> {
    let mut argv = env::args();
    let prog = argv.next().unwrap_or_else(|| "quotematch".to_string());
    let args = match parse_args(argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}\n");
            eprint!("{}", usage(&prog));
            std::process::exit(1);
        }
    };
    if args.help {
        print!("{}", usage(&prog));
        return Ok(());
    }

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    init_tracing(&settings.logging.level);

    let lexicon = Lexicon::load(config.lexicon_path()?.as_deref())?;
    let quotes_path = match args.quotes_file {
        Some(p) => p,
        None => config.quotes_path()?,
    };
    let top_n = args.top_n.unwrap_or(settings.search.top_n);

    let mut engine = QuoteEngine::new(Arc::new(lexicon));
    if let Err(e) = engine.initialize(&JsonQuoteRepository::new(), &quotes_path) {
        error!(path = %quotes_path.display(), "quote collection failed to load");
        eprintln!("Error: failed to load {}: {}", quotes_path.display(), e);
        std::process::exit(1);
    }

    info!(quotes = engine.quote_count(), top_n, "search ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.query {
        Some(query) => {
            run_single(&mut out, &engine, &query, top_n)?;
            if args.explain && !query.trim().is_empty() {
                render_explanations(&mut out, &engine.explain(&query)?)?;
            }
        }
        None => run_interactive(&mut io::stdin().lock(), &mut out, &engine, top_n)?,
    }
    Ok(())
}
