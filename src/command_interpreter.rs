/// Recognizes what the user asked for in a transcript or typed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandResult {
    Navigate { destination: String },
    Emergency,
    Rejected,
}

// Checked in order, before the emergency keyword. "go to emergency room" is a
// navigation request.
const NAVIGATION_PHRASES: [&str; 3] = ["take me to", "navigate to", "go to"];
const EMERGENCY_KEYWORD: &str = "emergency";

pub fn interpret(utterance: &str) -> CommandResult {
    let command = utterance.to_lowercase();

    let destination = match NAVIGATION_PHRASES
        .iter()
        .find(|phrase| command.contains(*phrase))
    {
        Some(phrase) => command.replacen(phrase, "", 1).trim().to_string(),
        None if command.contains(EMERGENCY_KEYWORD) => return CommandResult::Emergency,
        None => utterance.trim().to_string(),
    };

    if destination.chars().count() > 1 {
        CommandResult::Navigate { destination }
    } else {
        CommandResult::Rejected
    }
}
