/// Destination for the user-facing status lines.
pub trait Console: Send + Sync {
    fn line(&self, text: &str);
}

/// Prints to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn line(&self, text: &str) {
        println!("{}", text);
    }
}
