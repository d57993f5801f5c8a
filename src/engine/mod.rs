pub mod native;
pub mod types;

use crate::split_plan::PageRange;
use anyhow::Result;
use std::path::Path;

pub use types::EngineDiag;

/// PDF reader/writer collaborator. The splitter only ever talks to this.
pub trait Engine {
    fn doctor(&self) -> Result<EngineDiag>;
    fn page_count(&self, input: &Path) -> Result<u32>;
    /// Copies pages `range` (1-based, inclusive) of `input` into a new file at `out_path`.
    fn write_range(&self, input: &Path, range: PageRange, out_path: &Path) -> Result<()>;
}
