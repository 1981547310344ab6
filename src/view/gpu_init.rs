use std::sync::Arc;

use wgpu::Device;

use crate::error::LaunchError;

/// Device, queue and configured surface for one window
pub struct GpuContext {
    pub device: Arc<Device>,
    pub queue: Arc<wgpu::Queue>,
    pub surface: wgpu::Surface<'static>,
    pub format: wgpu::TextureFormat,
    pub config: wgpu::SurfaceConfiguration,
}

async fn init_device_and_queue(
    adapter: &wgpu::Adapter,
) -> Result<(Arc<Device>, Arc<wgpu::Queue>), LaunchError> {
    let adapter_limits = adapter.limits();
    let limits = wgpu::Limits::downlevel_defaults().using_resolution(adapter_limits);

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits,
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::default(),
            },
        )
        .await?;

    Ok((Arc::new(device), Arc::new(queue)))
}

/// Pick an sRGB format and configure the surface with vsync presentation
pub fn configure_surface(
    device: &Device,
    adapter: &wgpu::Adapter,
    surface: &wgpu::Surface,
    width: u32,
    height: u32,
) -> (wgpu::TextureFormat, wgpu::SurfaceConfiguration) {
    let caps = surface.get_capabilities(adapter);
    let format = caps
        .formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(device, &config);

    (format, config)
}

impl GpuContext {
    /// Initialize GPU for a window surface
    pub async fn new_native(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, LaunchError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await?;

        let info = adapter.get_info();
        tracing::info!(name = %info.name, backend = ?info.backend, "using adapter");

        let (device, queue) = init_device_and_queue(&adapter).await?;
        let (format, config) = configure_surface(&device, &adapter, &surface, width, height);
        tracing::info!(?format, width = config.width, height = config.height, "surface configured");

        Ok(GpuContext {
            device,
            queue,
            surface,
            format,
            config,
        })
    }
}
