//! Line commands typed at the terminal.

use anyhow::{bail, Result};
use snake_core::{Action, ConversationId, View};

pub const HELP: &str = "\
Commands:
  login                 sign in as the configured user
  logout                sign out (conversations are kept)
  new                   start a new chat
  view <tag>            switch feature view (unknown tags open chat)
  select <id>           open a conversation
  delete <id>           delete a conversation
  history [query]       list conversations, filtered by title or id
  say <text>            send a message in the active conversation
  title <text>          rename the active conversation
  persona <text>        apply a persona to the active conversation
  state                 dump the shell state as JSON
  help                  show this help
  quit                  exit";

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Maps directly onto a shell action
    Dispatch(Action),
    Say(String),
    Title(String),
    State,
    Help,
    Quit,
}

fn argument(verb: &str, rest: &str) -> Result<String> {
    let rest = rest.trim();
    if rest.is_empty() {
        bail!("{verb} needs an argument");
    }
    Ok(rest.to_string())
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command = match verb.to_lowercase().as_str() {
        "login" => Command::Dispatch(Action::LoginSucceeded),
        "logout" => Command::Dispatch(Action::Logout),
        "new" => Command::Dispatch(Action::NewChat),
        "view" => Command::Dispatch(Action::Navigate(View::parse_or_default(&argument(
            verb, rest,
        )?))),
        "select" => Command::Dispatch(Action::SelectConversation(ConversationId::new(
            argument(verb, rest)?,
        ))),
        "delete" => Command::Dispatch(Action::DeleteConversation(ConversationId::new(
            argument(verb, rest)?,
        ))),
        "history" => Command::Dispatch(Action::SearchHistory(rest.trim().to_string())),
        "persona" => Command::Dispatch(Action::SetPersona(argument(verb, rest)?)),
        "say" => Command::Say(argument(verb, rest)?),
        "title" => Command::Title(argument(verb, rest)?),
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("Unknown command: {other}"),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_simple_verbs() {
        assert_eq!(
            parse("login").unwrap(),
            Some(Command::Dispatch(Action::LoginSucceeded))
        );
        assert_eq!(parse("NEW").unwrap(), Some(Command::Dispatch(Action::NewChat)));
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_view_falls_back_to_chat() {
        assert_eq!(
            parse("view imageGen").unwrap(),
            Some(Command::Dispatch(Action::Navigate(View::ImageGen)))
        );
        assert_eq!(
            parse("view holodeck").unwrap(),
            Some(Command::Dispatch(Action::Navigate(View::Chat)))
        );
    }

    #[test]
    fn test_text_arguments_keep_spaces() {
        assert_eq!(
            parse("persona  A grumpy pirate ").unwrap(),
            Some(Command::Dispatch(Action::SetPersona(
                "A grumpy pirate".to_string()
            )))
        );
        assert_eq!(
            parse("say hello there").unwrap(),
            Some(Command::Say("hello there".to_string()))
        );
    }

    #[test]
    fn test_history_query_is_optional() {
        assert_eq!(
            parse("history").unwrap(),
            Some(Command::Dispatch(Action::SearchHistory(String::new())))
        );
        assert_eq!(
            parse("history weekend trip").unwrap(),
            Some(Command::Dispatch(Action::SearchHistory(
                "weekend trip".to_string()
            )))
        );
    }

    #[test]
    fn test_missing_argument() {
        let err = parse("select").unwrap_err();
        assert_eq!(err.to_string(), "select needs an argument");
    }

    #[test]
    fn test_unknown_verb() {
        let err = parse("dance now").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: dance");
    }
}
