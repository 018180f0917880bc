/// Number of bytes per pixel in every raster exchanged with the processor (RGBA8).
pub const BYTES_PER_PIXEL: usize = 4;

/// Floats per face in the position buffer (3 vertices x XYZ).
pub const POSITION_FLOATS_PER_FACE: usize = 9;

/// Floats per face in the UV buffer (3 vertices x UV).
pub const UV_FLOATS_PER_FACE: usize = 6;

/// Default zoom slider position. The lens covers `100 - 80 = 20%` of the canvas.
pub const DEFAULT_ZOOM_PERCENT: u32 = 80;

/// Upper bound of the zoom slider. Keeps the lens at least 10% of the canvas.
pub const MAX_ZOOM_PERCENT: u32 = 90;

/// Lens width/height in displayed-canvas pixels before the first resize.
pub const INITIAL_LENS_SIZE: f32 = 40.0;

/// Delay between showing the busy indicator and running the blocking call.
pub const DEFAULT_BUSY_DELAY_MS: u64 = 50;

/// File name offered for raster downloads.
pub const RASTER_FILE_NAME: &str = "optimized.png";

/// Fixed container name offered for compressed downloads.
pub const COMPRESSED_FILE_NAME: &str = "compressed.dds";

/// Download button label for raster artifacts.
pub const RASTER_DOWNLOAD_LABEL: &str = "Save optimized texture";

/// Download button label for compressed artifacts.
pub const COMPRESSED_DOWNLOAD_LABEL: &str = "Save compressed texture";

/// Label shown by front ends while a pipeline run is pending or executing.
pub const BUSY_LABEL: &str = "Work in progress...";

/// Minimum pixel count to sample magnifier rows in parallel.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// DDS magic number ("DDS " little-endian).
pub const DDS_MAGIC: u32 = 0x2053_4444;

/// Size of the DDS header following the magic.
pub const DDS_HEADER_SIZE: u32 = 124;
