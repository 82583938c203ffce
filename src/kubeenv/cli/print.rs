use colored::Colorize;
use kubeenv::api::{CmdMessage, EnvEntry, MessageLevel};

const ACTIVE_MARKER: &str = "*";

/// Info and success go to stdout; warnings and errors to stderr.
pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_envs(envs: &[EnvEntry]) {
    for env in envs {
        if env.active {
            println!("{}", format!("{} {}", ACTIVE_MARKER, env.name).green().bold());
        } else {
            println!("  {}", env.name);
        }
    }
}

/// Plain name only, so `$(kubeenv -c)` works in scripts.
pub(super) fn print_current(envs: &[EnvEntry]) {
    for env in envs {
        println!("{}", env.name);
    }
}
