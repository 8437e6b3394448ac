//! Where the booking workflow reports outcomes (toasts in a UI, lines on a
//! terminal). A notifier only displays; it never decides anything.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

pub trait Notifier {
    fn notify(&self, level: ToastLevel, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, level: ToastLevel, message: &str) {
        (**self).notify(level, message);
    }
}

/// Prints toasts to the terminal; warnings and errors go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        match level {
            ToastLevel::Info => println!("{message}"),
            ToastLevel::Success => println!("✔ {message}"),
            ToastLevel::Warning => eprintln!("! {message}"),
            ToastLevel::Error => eprintln!("✘ {message}"),
        }
    }
}
