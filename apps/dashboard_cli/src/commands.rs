use client_core::UserAction;

pub const HELP: &str = "commands: start | stop | reset | training on|off | show | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Action(UserAction),
    Show,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace().map(str::to_ascii_lowercase);
    let command = match words.next()?.as_str() {
        "start" => Command::Action(UserAction::Start),
        "stop" => Command::Action(UserAction::Stop),
        "reset" => Command::Action(UserAction::Reset),
        "training" | "train" => match words.next()?.as_str() {
            "on" | "true" | "1" => Command::Action(UserAction::SetTraining(true)),
            "off" | "false" | "0" => Command::Action(UserAction::SetTraining(false)),
            _ => return None,
        },
        "show" => Command::Show,
        "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    if words.next().is_some() {
        return None;
    }
    Some(command)
}
