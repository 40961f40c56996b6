use bizdir_core::CoreError;

use crate::utils::exit_code::ExitCode;

pub enum Error {
    ExitWithError(ExitCode, eyre::Report),
}

impl Error {
    pub fn code(&self) -> &ExitCode {
        match self {
            Error::ExitWithError(exit_code, _) => exit_code,
        }
    }

    pub fn report(&self) -> &eyre::Report {
        match self {
            Error::ExitWithError(_, report) => report,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Exit code of a failed core operation
fn exit_code_of(error: &CoreError) -> ExitCode {
    match error {
        CoreError::NotPermitted { .. } => ExitCode::PermissionDenied,
        CoreError::Unauthenticated(_) => ExitCode::NoUser,
        CoreError::NotFound { .. } => ExitCode::NoInput,
        CoreError::InvalidTransition { .. } | CoreError::InvalidRecord(_) => ExitCode::DataError,
        CoreError::Storage(_) => ExitCode::Error,
    }
}

impl<E> From<E> for Error
where
    E: Into<eyre::Report>,
{
    #[track_caller]
    fn from(error: E) -> Self {
        let r: eyre::Report = error.into();
        let code = r
            .downcast_ref::<CoreError>()
            .map(exit_code_of)
            .unwrap_or(ExitCode::Error);
        Self::ExitWithError(code, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdir_core::directory::role::Role;

    fn code_of(error: CoreError) -> ExitCode {
        *Error::from(error).code()
    }

    #[test]
    fn core_errors_map_to_sysexits() {
        assert_eq!(
            code_of(CoreError::NotPermitted {
                role: Role::Visitor,
                action: "see tasks"
            })
            .code(),
            77
        );
        assert_eq!(code_of(CoreError::Unauthenticated("book")).code(), 67);
        assert_eq!(
            code_of(CoreError::NotFound {
                collection: "businesses".into(),
                id: "b1".into()
            })
            .code(),
            66
        );
        let other = Error::from(eyre::eyre!("boom"));
        assert_eq!(*other.code(), ExitCode::Error);
        assert_eq!(other.report().to_string(), "boom");
    }
}
