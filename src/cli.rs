use clap::Parser;
use std::path::PathBuf;
use synscope::language::Language;

/// Command-line options for synscope.
#[derive(Debug, Parser)]
#[command(name = "synscope")]
#[command(about = "Lexical and syntax analyzer for small C and Python subsets")]
#[command(version)]
pub struct Cli {
    /// Source file to open; omit to start from the sample program
    pub file: Option<PathBuf>,

    /// Source language (default: from the file extension, else C)
    #[arg(short, long, value_enum)]
    pub lang: Option<Language>,

    /// Print diagnostics and exit instead of opening the editor
    #[arg(long)]
    pub check: bool,

    /// With --check, also print every token
    #[arg(long, requires = "check")]
    pub tokens: bool,

    /// Write logs to this file while the editor is open
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The explicit `--lang`, else the file's language, else C.
    pub fn language(&self) -> Language {
        self.lang
            .or_else(|| self.file.as_deref().and_then(Language::from_path))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_language_resolution() {
        let cli = Cli::try_parse_from(["synscope"]).expect("no arguments is valid");
        assert_eq!(cli.language(), Language::C);

        let cli = Cli::try_parse_from(["synscope", "app.py"]).expect("file is valid");
        assert_eq!(cli.language(), Language::Python);

        let cli = Cli::try_parse_from(["synscope", "app.py", "--lang", "c"]).expect("override is valid");
        assert_eq!(cli.language(), Language::C);

        let cli = Cli::try_parse_from(["synscope", "notes.txt", "-l", "python"]).expect("short flag is valid");
        assert_eq!(cli.language(), Language::Python);
    }

    #[test]
    fn test_tokens_requires_check() {
        assert!(Cli::try_parse_from(["synscope", "a.c", "--tokens"]).is_err());
        let cli = Cli::try_parse_from(["synscope", "a.c", "--check", "--tokens"]).expect("valid");
        assert!(cli.check && cli.tokens);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["synscope", "--lang", "rust"]).is_err());
    }
}
