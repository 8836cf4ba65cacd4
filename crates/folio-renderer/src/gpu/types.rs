/// Failures of the wgpu backend.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter found")]
    AdapterNotFound,

    #[error("device error: {0}")]
    Device(String),

    #[error("pipeline error: {0}")]
    Pipeline(String),

    #[error("readback error: {0}")]
    Readback(String),
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::Device(e.to_string())
    }
}
