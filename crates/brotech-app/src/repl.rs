//! Line-oriented front end for the chat engine.

use std::sync::Arc;

use brotech_chat::{ChatEngine, CurrentRoute};
use brotech_common::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open,
    Close,
    Toggle,
    Clear,
    Route(String),
    /// Quick reply by its 1-based number as printed.
    Quick(usize),
    Help,
    Quit,
    Message(String),
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Self::Message(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match (name, arg) {
            ("open", "") => Self::Open,
            ("close", "") => Self::Close,
            ("toggle", "") => Self::Toggle,
            ("clear", "") => Self::Clear,
            ("help", "") => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            ("route", path) if !path.is_empty() => Self::Route(path.to_string()),
            ("quick", n) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::Quick(n),
                _ => Self::Unknown(line.to_string()),
            },
            _ => Self::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
commands:
  /open /close /toggle   show or hide the widget
  /clear                 forget the conversation
  /route <path>          change the current page
  /quick <n>             send quick reply n
  /quit                  exit
anything else is sent as a message";

/// Read commands from stdin until EOF or `/quit`.
pub async fn run(engine: Arc<ChatEngine>, route: CurrentRoute) -> Result<()> {
    print_quick_replies(&engine);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Open => engine.open().await,
            Command::Close => {
                engine.close();
                println!("(widget closed, /open to resume)");
            }
            Command::Toggle => engine.toggle().await,
            Command::Clear => engine.clear_history().await,
            Command::Route(path) => {
                tracing::info!("route changed to {path}");
                route.set(path);
            }
            Command::Quick(n) => engine.select_quick_reply(n - 1).await,
            Command::Message(text) => {
                if !engine.is_open() {
                    engine.open().await;
                }
                engine.set_draft_input(text);
                if engine.can_submit() {
                    engine.submit_draft().await;
                }
            }
            Command::Unknown(line) => println!("unknown command: {line} (try /help)"),
        }
        println!();
        print_quick_replies(&engine);
    }

    Ok(())
}

fn print_quick_replies(engine: &ChatEngine) {
    if !engine.show_quick_replies() {
        return;
    }
    for (i, prompt) in engine.quick_replies().iter().enumerate() {
        println!("  [{}] {prompt}", i + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            Command::parse("  what do you offer?  "),
            Command::Message("what do you offer?".into())
        );
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn widget_commands() {
        assert_eq!(Command::parse("/open"), Command::Open);
        assert_eq!(Command::parse("/close"), Command::Close);
        assert_eq!(Command::parse("/toggle"), Command::Toggle);
        assert_eq!(Command::parse("/clear"), Command::Clear);
        assert_eq!(Command::parse("/exit"), Command::Quit);
    }

    #[test]
    fn route_needs_a_path() {
        assert_eq!(
            Command::parse("/route /pricing"),
            Command::Route("/pricing".into())
        );
        assert_eq!(Command::parse("/route"), Command::Unknown("/route".into()));
    }

    #[test]
    fn quick_reply_numbers_start_at_one() {
        assert_eq!(Command::parse("/quick 2"), Command::Quick(2));
        assert_eq!(Command::parse("/quick 0"), Command::Unknown("/quick 0".into()));
        assert_eq!(Command::parse("/quick x"), Command::Unknown("/quick x".into()));
    }

    #[test]
    fn arguments_on_bare_commands_are_rejected() {
        assert_eq!(Command::parse("/open now"), Command::Unknown("/open now".into()));
    }
}
