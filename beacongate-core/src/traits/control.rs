//! Remote-operator registration contract

/// Registration surface the platform exposes for remote commands and
/// read-only variables
///
/// The core registers its names once at startup; request dispatch happens
/// through [`crate::control::dispatch`] when the embedding application
/// polls the platform between cycles.
pub trait ControlRegistry {
    /// Registration failure type (platform-defined)
    type Error;

    /// Expose a remotely callable command under `name`
    fn register_command(&mut self, name: &'static str) -> Result<(), Self::Error>;

    /// Expose a read-only variable under `name`
    fn register_variable(&mut self, name: &'static str) -> Result<(), Self::Error>;
}
