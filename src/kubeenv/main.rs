use colored::Colorize;

mod cli;

fn main() {
    match cli::run() {
        Ok(cli::Outcome::Done) => {}
        Ok(cli::Outcome::PartialFailure) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(1);
        }
    }
}
