use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "idiff",
    about = "Explain why two values are unequal",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff two built-in sample maps
    Demo(DemoArgs),
    /// Diff two JSON documents given inline
    Json(JsonArgs),
}

#[derive(Args)]
pub struct DemoArgs {}

#[derive(Args)]
pub struct JsonArgs {
    /// The expected document
    pub expected: String,
    /// The document actually got
    pub actual: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_demo() {
        let cli = Cli::try_parse_from(["idiff", "demo"]).unwrap();
        assert!(matches!(cli.command, Command::Demo(_)));
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn parse_json() {
        let cli = Cli::try_parse_from(["idiff", "json", "[1]", "[2]"]).unwrap();
        if let Command::Json(args) = cli.command {
            assert_eq!(args.expected, "[1]");
            assert_eq!(args.actual, "[2]");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_json_requires_both_documents() {
        assert!(Cli::try_parse_from(["idiff", "json", "[1]"]).is_err());
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["idiff", "--verbose", "demo"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["idiff", "--format", "json", "demo"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
