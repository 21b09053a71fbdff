//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Analyse news articles: similarity, topics, keywords and hosted NLP tasks.
///
/// Results are printed to stdout as JSON; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "newslens")]
#[command(author, version, about)]
pub struct Args {
    /// Extra TOML config merged after newslens.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Rank articles by TF-IDF similarity to a query article
    Similar {
        #[arg(short, long)]
        query: String,
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Group articles into topics by embedding
    Topics {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Keywords from an article headline
    Keywords { url: String },
    Summarize { url: String },
    Sentiment { url: String },
    /// Named entities in the article summary
    Entities { url: String },
    /// Zero-shot news category
    Classify { url: String },
    /// Summarise, then translate the summary
    Translate {
        url: String,
        /// Target language (ISO 639-1, e.g. fr)
        #[arg(short, long)]
        to: String,
    },
    /// Search a third-party news index
    Search { query: String },
    /// Rank local .txt files against a query file
    SimilarDir {
        #[arg(short, long)]
        query: PathBuf,
        dir: PathBuf,
    },
    /// Group local .txt files into topics
    TopicsDir { dir: PathBuf },
    /// Keywords from text given on the command line
    KeywordsText {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

impl Command {
    /// Whether the command can run without any network access.
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::SimilarDir { .. } | Self::TopicsDir { .. } | Self::KeywordsText { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_similar_with_query_and_candidates() {
        let args = Args::try_parse_from(["newslens", "similar", "--query", "https://q", "https://a", "https://b"]).unwrap();
        assert_eq!(
            args.command,
            Command::Similar { query: "https://q".into(), urls: vec!["https://a".into(), "https://b".into()] }
        );
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn similar_requires_candidates() {
        assert!(Args::try_parse_from(["newslens", "similar", "--query", "https://q"]).is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let args = Args::try_parse_from(["newslens", "translate", "https://a", "--to", "fr", "-vv", "--config", "x.toml"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
        assert_eq!(args.command, Command::Translate { url: "https://a".into(), to: "fr".into() });
    }

    #[test]
    fn offline_commands_are_flagged() {
        let args = Args::try_parse_from(["newslens", "keywords-text", "the", "cat"]).unwrap();
        assert!(args.command.is_offline());
        let args = Args::try_parse_from(["newslens", "topics-dir", "corpus"]).unwrap();
        assert!(args.command.is_offline());
        let args = Args::try_parse_from(["newslens", "search", "climate"]).unwrap();
        assert!(!args.command.is_offline());
    }
}
