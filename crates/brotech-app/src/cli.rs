use std::path::PathBuf;

use clap::Parser;

/// BroTech assistant: chat with Tech Bro from the terminal.
#[derive(Parser, Debug)]
#[command(name = "brotech", version, about)]
pub struct Args {
    /// Page route the widget is mounted on (selects the greeting).
    #[arg(short = 'r', long, default_value = "/")]
    pub route: String,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep history in memory only, forgetting it on exit.
    #[arg(long)]
    pub memory: bool,

    /// Start with the widget closed.
    #[arg(long)]
    pub closed: bool,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["brotech"]);
        assert_eq!(args.route, "/");
        assert!(args.config.is_none());
        assert!(!args.memory);
        assert!(!args.closed);
    }

    #[test]
    fn route_and_flags() {
        let args = Args::parse_from(["brotech", "-r", "/pricing", "--memory", "--log-level", "debug"]);
        assert_eq!(args.route, "/pricing");
        assert!(args.memory);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
