//! Colored user-facing lines.
//! Info/success/answers go to stdout, warnings and errors to stderr; each
//! stream is colored only when it is a TTY.

use owo_colors::OwoColorize;

fn is_tty(stream: atty::Stream) -> bool {
    atty::is(stream)
}

fn tagged(stream: atty::Stream, tag: &str, paint: fn(&str) -> String, msg: &str) -> String {
    if is_tty(stream) {
        format!("{} {msg}", paint(tag))
    } else {
        format!("{tag} {msg}")
    }
}

pub fn print_info(msg: &str) {
    println!("{}", tagged(atty::Stream::Stdout, "info:", |t| t.cyan().bold().to_string(), msg));
}

pub fn print_warn(msg: &str) {
    eprintln!("{}", tagged(atty::Stream::Stderr, "warn:", |t| t.yellow().bold().to_string(), msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", tagged(atty::Stream::Stderr, "error:", |t| t.red().bold().to_string(), msg));
}

pub fn print_success(msg: &str) {
    println!("{}", tagged(atty::Stream::Stdout, "ok:", |t| t.green().bold().to_string(), msg));
}

/// Print a plain user-facing line (no prefix). Use this for primary outputs
/// such as "Moved X -> Y" which users may script against.
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// Print a bare `true`/`false` answer for predicate subcommands.
pub fn print_answer(answer: bool) {
    print_user(if answer { "true" } else { "false" });
}
