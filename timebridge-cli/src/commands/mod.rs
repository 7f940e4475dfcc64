pub mod references;
pub mod sync;
