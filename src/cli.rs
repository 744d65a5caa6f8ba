use clap::{Parser, Subcommand};

/// travel-chat: hotel-finding chat assistant in English, French and Malagasy
#[derive(Parser)]
#[command(name = "travel-chat", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (the default)
    Serve {
        /// Port to bind, overriding TRAVEL_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer one message and print the JSON response
    Chat {
        /// The user message
        message: String,
    },

    /// Print the detected language and city for a message
    Detect {
        /// The user message
        message: String,

        /// Use only the keyword and pattern rules
        #[arg(long)]
        offline: bool,
    },
}

impl Cli {
    /// Offline detection runs on the pattern rules alone, without provider
    /// credentials or any other configuration.
    pub fn needs_config(&self) -> bool {
        !matches!(self.command, Some(Commands::Detect { offline: true, .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["travel-chat"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_detect_flags() {
        let cli = Cli::try_parse_from(["travel-chat", "detect", "Bonjour", "--offline"]).unwrap();
        match cli.command {
            Some(Commands::Detect { message, offline }) => {
                assert_eq!(message, "Bonjour");
                assert!(offline);
            }
            _ => panic!("expected detect"),
        }
    }

    #[test]
    fn test_only_offline_detect_skips_config() {
        let offline = Cli::try_parse_from(["travel-chat", "detect", "hotels in Paris", "--offline"]).unwrap();
        assert!(!offline.needs_config());

        for args in [
            vec!["travel-chat"],
            vec!["travel-chat", "serve"],
            vec!["travel-chat", "chat", "Bonjour"],
            vec!["travel-chat", "detect", "Bonjour"],
        ] {
            assert!(Cli::try_parse_from(args).unwrap().needs_config());
        }
    }

    #[test]
    fn test_help_is_answered_by_the_parser() {
        let err = Cli::try_parse_from(["travel-chat", "--help"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::try_parse_from(["travel-chat", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve { port: Some(9000) })));
    }
}
