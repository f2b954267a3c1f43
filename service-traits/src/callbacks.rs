//! Session callback registration.

/// Notifications delivered from the service's internal event-processing
/// thread. Implemented by the client, registered once per session.
///
/// `metadata_updated` is deliberately coarse: the service fires it whenever
/// *any* object's data finished loading or changed, without identifying
/// which one. Consumers are expected to re-check the state they care about
/// rather than rely on precise wake targeting.
pub trait SessionCallbacks: Send + Sync {
    /// Some object's metadata finished loading or changed.
    fn metadata_updated(&self);

    /// The session's connection state changed.
    fn connection_state_updated(&self) {}

    /// Diagnostic line from the service, for forwarding to host logging.
    fn log_message(&self, _message: &str) {}
}
