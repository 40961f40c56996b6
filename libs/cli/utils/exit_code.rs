use std::process::Termination;

/// Exit codes of the `bizdir` binary, following `<sysexits.h>` where one
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Any failure without a more specific code
    Error = 1,

    /// Invalid input data, e.g. an out of range rating or a task in the wrong state (EX_DATAERR)
    DataError = 65,

    /// The business, task or input file does not exist (EX_NOINPUT)
    NoInput = 66,

    /// No identity is configured for an action that needs one (EX_NOUSER)
    NoUser = 67,

    /// An internal software error has been detected (EX_SOFTWARE)
    Software = 70,

    /// The current identity does not hold the role needed for the action (EX_NOPERM)
    PermissionDenied = 77,

    /// The configuration file or profile is invalid (EX_CONFIG)
    ConfigError = 78,
}

impl ExitCode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Termination for ExitCode {
    fn report(self) -> std::process::ExitCode {
        self.code().into()
    }
}
