#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only broken contracts produce output.
    Quiet,
    #[default]
    Normal,
    /// Normal output preceded by every module's direct imports.
    High,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerbosityError {
    #[error("Invalid parameters: quiet and verbose called together. Choose one or the other.")]
    QuietAndVerbose,
    #[error("That level of verbosity is not supported. Maximum verbosity is -v.")]
    TooVerbose,
}

impl Verbosity {
    /// `verbose` is the number of `-v` flags given.
    pub fn from_flags(quiet: bool, verbose: u8) -> Result<Self, VerbosityError> {
        match (quiet, verbose) {
            (true, 0) => Ok(Verbosity::Quiet),
            (true, _) => Err(VerbosityError::QuietAndVerbose),
            (false, 0) => Ok(Verbosity::Normal),
            (false, 1) => Ok(Verbosity::High),
            (false, _) => Err(VerbosityError::TooVerbose),
        }
    }
}
