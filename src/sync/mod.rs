pub mod notifier;
pub mod synchronizer;

pub use notifier::{ConsoleNotifier, Notifier};
pub use synchronizer::Synchronizer;
