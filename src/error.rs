use thiserror::Error;

/// Rejected plan edits. Every variant leaves the plan unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("document has no pages")]
    NoPages,

    #[error("cannot split after page {after_page} of a {total_pages}-page document")]
    SplitOutOfRange { after_page: u32, total_pages: u32 },

    #[error("document index {index} out of range: plan has {documents} document(s)")]
    DocumentOutOfRange { index: usize, documents: usize },

    #[error("empty name for document index {index}")]
    EmptyName { index: usize },

    #[error("command #{position} rejected: {source}")]
    Command {
        position: usize,
        #[source]
        source: Box<PlanError>,
    },
}
