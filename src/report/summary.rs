//! Closing line naming the channels a release opened

use anstyle::{AnsiColor, Color, Style};

/// Sentence naming the channels a release opened, `None` when it opened nothing
pub fn opened_channels_summary(opened: &[String]) -> Option<String> {
  let quoted: Vec<String> = opened.iter().map(|channel| format!("'{}'", channel)).collect();

  let (names, noun) = match quoted.as_slice() {
    [] => return None,
    [only] => (only.clone(), "channel is"),
    [init @ .., last] => (format!("{} and {}", init.join(", "), last), "channels are"),
  };

  Some(format!("The {} {} now open.", names, noun))
}

/// Style for the summary line, kept apart from the plain table
pub fn summary_style() -> Style {
  Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)))
}

/// Wrap text in the summary style's escape sequences
pub fn highlight(text: &str) -> String {
  let style = summary_style();
  format!("{}{}{}", style.render(), text, style.render_reset())
}
