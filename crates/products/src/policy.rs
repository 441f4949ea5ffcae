/// Limits applied to the image selection of a product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_files: usize,
    pub max_file_size_bytes: u64,
}

impl UploadPolicy {
    pub const DEFAULT_MAX_FILES: usize = 6;
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 3 * 1024 * 1024; // 3 MiB

    pub fn new(max_files: usize, max_file_size_bytes: u64) -> Self {
        Self {
            max_files,
            max_file_size_bytes,
        }
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_FILES, Self::DEFAULT_MAX_FILE_SIZE_BYTES)
    }
}
