use std::path::PathBuf;

/// Where model topology and weights come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}
