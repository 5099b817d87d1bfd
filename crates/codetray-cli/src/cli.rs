use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author = "bahdotsh",
    version = env!("CARGO_PKG_VERSION"),
    about = "codetray - a collapsible sidebar of code snippets",
    long_about = "codetray docks a snippet sidebar to one edge of the terminal. \
Pick a snippet to copy it to the clipboard and paste it into the previously focused window."
)]
pub struct Codetray {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Codetray::command().debug_assert();
    }

    #[test]
    fn takes_no_arguments() {
        assert!(Codetray::try_parse_from(["codetray"]).is_ok());
        assert!(Codetray::try_parse_from(["codetray", "--side", "left"]).is_err());
    }
}
