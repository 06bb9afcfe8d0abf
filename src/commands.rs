//! Terminal commands
//!
//! Parses one line of learner input into a command for the round controller.

use crate::settings::Setting;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick the left (1) or right (2) image
    Choose(usize),
    /// Type the word directly
    Answer(String),
    Listen,
    Next,
    Restart,
    Category(String),
    /// 1-based index into the current pair list
    Pair(usize),
    Toggle(Setting),
    Categories,
    Pairs,
    Settings,
    Help,
    Quit,
    Unknown(String),
}

/// Parse a line; blank input yields `None`
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let cmd = match (head.to_lowercase().as_str(), rest) {
        ("1", "") => Command::Choose(1),
        ("2", "") => Command::Choose(2),
        ("l", "") | ("listen", "") => Command::Listen,
        ("n", "") | ("next", "") => Command::Next,
        ("r", "") | ("restart", "") => Command::Restart,
        ("c", "") | ("categories", "") => Command::Categories,
        ("c", label) | ("category", label) => Command::Category(label.to_string()),
        ("p", "") | ("pairs", "") => Command::Pairs,
        ("p", n) | ("pair", n) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Pair(n),
            _ => Command::Unknown(line.to_string()),
        },
        ("s", "") | ("settings", "") => Command::Settings,
        ("s", key) | ("set", key) => match Setting::from_key(key) {
            Some(setting) => Command::Toggle(setting),
            None => Command::Unknown(line.to_string()),
        },
        ("h", "") | ("help", "") | ("?", "") => Command::Help,
        ("q", "") | ("quit", "") | ("exit", "") => Command::Quit,
        // Anything else is taken as a typed answer ("je la jette" included)
        _ => Command::Answer(line.to_string()),
    };
    Some(cmd)
}

pub const HELP: &str = "\
  1 / 2        choose the left / right picture
  <word>       answer by typing the word
  l            listen again
  n            next pair
  r            restart this pair
  c [label]    list categories / switch category
  p [n]        list pairs / jump to pair n
  s [key]      show settings / toggle a setting
  h            help
  q            quit";
