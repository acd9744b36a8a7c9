//! Delivery of user-visible messages.

/// Sink for the messages a user must see (the page's `alert`).
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Prints messages to stdout.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        println!();
        println!(">> {}", message);
        println!();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::Notifier;

    /// Keeps every message, in order.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct RecordingNotifier {
        pub messages: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }
}
