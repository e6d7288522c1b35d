use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::cli::ColorScheme;

/// Terminal coloring capability. Colorized output may be unavailable
/// (redirected stdout, `--color nocolor`); in that case the plain
/// implementation emits the same text with no escape codes.
pub trait Paint {
    fn title(&self, text: &str) -> String;
    fn heading(&self, text: &str) -> String;
    fn hint(&self, text: &str) -> String;
}

pub struct Ansi {
    pub scheme: ColorScheme,
}

pub struct Plain;

impl Paint for Ansi {
    fn title(&self, text: &str) -> String {
        match self.scheme {
            ColorScheme::Neutral => format!("{}", text.cyan()),
            ColorScheme::Lightbg => format!("{}", text.blue()),
            ColorScheme::Linux => format!("{}", text.bright_green()),
            ColorScheme::Nocolor => text.to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        match self.scheme {
            ColorScheme::Neutral => format!("{}", text.yellow()),
            ColorScheme::Lightbg => format!("{}", text.magenta()),
            ColorScheme::Linux => format!("{}", text.bright_yellow()),
            ColorScheme::Nocolor => text.to_string(),
        }
    }

    fn hint(&self, text: &str) -> String {
        match self.scheme {
            ColorScheme::Nocolor => text.to_string(),
            _ => format!("{}", text.dimmed()),
        }
    }
}

impl Paint for Plain {
    fn title(&self, text: &str) -> String {
        text.to_string()
    }

    fn heading(&self, text: &str) -> String {
        text.to_string()
    }

    fn hint(&self, text: &str) -> String {
        text.to_string()
    }
}

pub fn select(scheme: ColorScheme) -> Box<dyn Paint> {
    match scheme == ColorScheme::Nocolor || !std::io::stdout().is_terminal() {
        true => Box::new(Plain),
        false => Box::new(Ansi { scheme }),
    }
}

pub fn render(paint: &dyn Paint, show_assignments: bool) -> String {
    let mut banner = String::new();

    banner.push_str(&paint.title("robsh: interactive robot model shell"));
    banner.push_str("\n\n");
    banner.push_str(&paint.heading("loaded models:"));
    banner.push('\n');
    banner.push_str("    puma    Puma 560 (Unimation),    6 axes\n");
    banner.push_str("    panda   Panda (Franka Emika),    7 axes\n");
    banner.push('\n');
    banner.push_str(&paint.hint("plt.ion() turns on non-blocking plotting; exit with Ctrl-D"));
    banner.push('\n');

    if show_assignments {
        banner.push('\n');
        banner.push_str(&paint.hint(
            "results of assignments are echoed; run with --noshowassign to suppress",
        ));
        banner.push('\n');
    }

    banner
}

pub fn print(paint: &dyn Paint, show_assignments: bool) {
    print!("{}", render(paint, show_assignments));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use regex::Regex;

    fn strip_ansi(text: &str) -> String {
        Regex::new("\x1b\\[[0-9;]*m")
            .unwrap()
            .replace_all(text, "")
            .into_owned()
    }

    #[test]
    fn test_plain_equals_colorized_minus_escapes() {
        for scheme in [ColorScheme::Neutral, ColorScheme::Lightbg, ColorScheme::Linux] {
            let colorized = render(&Ansi { scheme }, true);
            let plain = render(&Plain, true);
            assert_eq!(strip_ansi(&colorized), plain);
        }
    }

    #[test]
    fn test_plain_has_no_escapes() {
        let plain = render(&Plain, true);
        assert_eq!(strip_ansi(&plain), plain);
    }

    #[test]
    fn test_assignment_reminder_block() {
        let with = render(&Plain, true);
        let without = render(&Plain, false);

        assert!(with.contains("results of assignments are echoed"));
        assert!(!without.contains("results of assignments are echoed"));
        assert!(with.starts_with(&without));
    }
}
