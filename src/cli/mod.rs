pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stationlog")]
#[command(about = "Turns a station page into a tinylog", long_about = None)]
pub struct Cli {
    /// Path to a config file (default: ~/.config/stationlog/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// What to do. Without a command the binary behaves as a Gemini CGI script.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Answer a CGI request read from QUERY_STRING
    Cgi,
    /// Fetch a user's station page and print the tinylog
    Generate {
        /// Station user name
        user: String,
    },
    /// Convert a saved station page without touching the network
    Convert {
        /// Path to the saved page
        path: std::path::PathBuf,

        /// Address recorded as the page's source
        #[arg(long, default_value = "")]
        link: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_cgi() {
        let cli = Cli::try_parse_from(["stationlog"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_generate_with_config() {
        let cli = Cli::try_parse_from(["stationlog", "generate", "alice", "--config", "/tmp/c.toml"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Generate {
                user: "alice".into()
            })
        );
        assert_eq!(cli.config, Some("/tmp/c.toml".into()));
    }

    #[test]
    fn test_convert_defaults_link() {
        let cli = Cli::try_parse_from(["stationlog", "convert", "page.gmi"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Convert {
                path: "page.gmi".into(),
                link: String::new()
            })
        );
    }
}
