//! Route paths

pub const UPLOAD_PATH: &str = "/ImageCrop/Api/Upload";

pub const PROCESS_PATH: &str = "/ImageCrop/Api/Process";

/// Preview mount point when `UPLOADS_BASE_URL` is not a local path
pub const UPLOADS_PATH: &str = "/uploads";

pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Name of the multipart field carrying the upload
pub const UPLOAD_FIELD: &str = "file";

/// Allowance on top of the upload ceiling for multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
