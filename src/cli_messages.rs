//! Output of one-shot commands.
//!
//! Every message is one `[TAG] title` line, optionally followed by tab and
//! details. Errors go to stderr so listings stay pipeable.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Info => "INFO",
            Tone::Warn => "WARN",
            Tone::Error => "ERROR",
            Tone::Success => "SUCCESS",
        }
    }

    /// ANSI color of the tag.
    fn color(self) -> &'static str {
        match self {
            Tone::Info => "\x1b[1;33m",
            Tone::Warn => "\x1b[1;91m",
            Tone::Error => "\x1b[1;31m",
            Tone::Success => "\x1b[1;32m",
        }
    }
}

/// Renders a message line without a trailing newline.
pub fn format_message(tone: Tone, title: &str, details: &str) -> String {
    let mut line = format!("{}[{}]\x1b[0m {}", tone.color(), tone.tag(), title);
    if !details.is_empty() {
        line.push_str("\t ");
        line.push_str(details);
    }
    line
}

pub fn print_message(tone: Tone, title: &str, details: &str) {
    let line = format_message(tone, title, details);
    match tone {
        Tone::Error => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

/// Macro for CLI info messages
#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::Tone::Info,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::Tone::Warn,
            $title,
            &format!($($details)*),
        )
    };
}

/// Macro for CLI errors. Details are optional.
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_message($crate::cli_messages::Tone::Error, $title, "")
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_message($crate::cli_messages::Tone::Error, $title, $details)
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::Tone::Success,
            $title,
            &format!($($details)*),
        )
    };
}
