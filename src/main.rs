// synscope: lexical and syntax analyzer for C and Python subsets

mod cli;
mod logging;

use std::fs;
use std::io;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use synscope::diagnostics::line_of;
use synscope::language::Analysis;
use synscope::ui::App;

use cli::Cli;
use logging::LogTarget;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let language = cli.language();

    let source = match &cli.file {
        Some(path) if path.exists() => fs::read_to_string(path)?,
        Some(path) if cli.check => {
            eprintln!("Error: File '{}' not found", path.display());
            std::process::exit(1);
        }
        // A missing file opens empty and is created on save
        Some(_) => String::new(),
        None => language.sample().to_string(),
    };

    if cli.check {
        logging::init(LogTarget::Stderr)?;
        let analysis = language.analyze(&source);
        let name = cli
            .file
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| format!("<{} sample>", language));
        if !report(&name, &source, &analysis, cli.tokens) {
            std::process::exit(1);
        }
        return Ok(());
    }

    let log_target = match &cli.log_file {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Off,
    };
    logging::init(log_target)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&source, language, cli.file.clone());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Print the analysis for `--check`. Returns whether the source was clean.
fn report(name: &str, source: &str, analysis: &Analysis, show_tokens: bool) -> bool {
    if show_tokens {
        for token in &analysis.tokens {
            println!("{}", token);
        }
        println!();
    }

    if analysis.is_clean() {
        println!(
            "{}: no syntax errors ({} tokens)",
            name,
            analysis.tokens.len()
        );
        return true;
    }

    let lines: Vec<&str> = source.split('\n').collect();
    for diagnostic in analysis.diagnostics() {
        println!("{}", diagnostic);
        let context = line_of(diagnostic)
            .and_then(|line| Some((line, *lines.get(line.checked_sub(1)?)?)));
        if let Some((line, text)) = context {
            println!("{:>5} | {}", line, text.trim_end_matches('\r'));
        }
    }
    println!(
        "{}: {} syntax error(s)",
        name,
        analysis.diagnostics().len()
    );
    false
}
