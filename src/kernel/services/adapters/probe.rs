use crate::kernel::services::ports::Host;
use crate::kernel::Geometry;

/// Reads the host viewport. Measured once, before the core is initialized.
pub struct EnvironmentProbe<'a> {
    host: &'a dyn Host,
}

impl<'a> EnvironmentProbe<'a> {
    pub fn new(host: &'a dyn Host) -> Self {
        Self { host }
    }

    pub fn measure(&self) -> Geometry {
        let geometry = self.host.viewport();
        tracing::debug!(width = geometry.width, height = geometry.height, "viewport measured");
        geometry
    }
}
