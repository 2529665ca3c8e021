//! Help text for the built-in `help` command.

/// Header printed above the command list.
pub const HELP_HEADER: &str = "Available Commands:";

/// Renders the help listing for the given command names.
pub fn render_help<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::from(HELP_HEADER);
    text.push('\n');
    for name in names {
        text.push_str(" - ");
        text.push_str(name.as_ref());
        text.push('\n');
    }
    text
}
