

/// Main memory access and image loading.
pub mod memory;
