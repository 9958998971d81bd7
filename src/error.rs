//! Front-end error type.
//!
//! The estimator itself never fails; everything that can go wrong happens while
//! reading input, writing exports or driving the terminal. Each failure carries
//! the process exit code `main` should use.

/// Bad flags, unreadable/unwritable files, malformed sheet headers.
pub const EXIT_INPUT: u8 = 2;
/// Input was read but no usable role remained.
pub const EXIT_NO_ROLES: u8 = 3;
/// Terminal UI failures.
pub const EXIT_TERMINAL: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn no_roles(message: impl Into<String>) -> Self {
        Self::new(EXIT_NO_ROLES, message)
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(EXIT_TERMINAL, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
