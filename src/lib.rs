/// Use mimalloc as the global allocator.
/// Tree copies of large directories churn through many small path
/// allocations; mimalloc's thread-local caching keeps that cheap.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod cptree;
pub mod filecopy;
