use super::{types::EngineDiag, Engine};
use crate::split_plan::PageRange;
use anyhow::{anyhow, Context, Result};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;
use tracing::debug;

/// In-process engine backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

impl LopdfEngine {
    pub fn new() -> Self {
        Self
    }

    fn load(&self, input: &Path) -> Result<Document> {
        Document::load(input).with_context(|| format!("loading PDF: {}", input.display()))
    }
}

impl Engine for LopdfEngine {
    fn doctor(&self) -> Result<EngineDiag> {
        // A one-page document must survive a save/load cycle.
        let mut doc = one_page_document();
        let mut buf = Vec::new();
        let probe = doc
            .save_to(&mut buf)
            .map_err(|e| anyhow!("save_to: {e}"))
            .and_then(|_| Document::load_mem(&buf).map_err(|e| anyhow!("load_mem: {e}")));
        Ok(EngineDiag {
            backend: "lopdf".into(),
            tool_version: env!("CARGO_PKG_VERSION").into(),
            ok: probe.is_ok(),
            error: probe.err().map(|e| e.to_string()),
        })
    }

    fn page_count(&self, input: &Path) -> Result<u32> {
        let doc = self.load(input)?;
        Ok(doc.get_pages().len() as u32)
    }

    fn write_range(&self, input: &Path, range: PageRange, out_path: &Path) -> Result<()> {
        let mut doc = self.load(input)?;
        let total = doc.get_pages().len() as u32;
        let end = range.end_page.min(total);
        if range.start_page < 1 || range.start_page > end {
            return Err(anyhow!(
                "page range {}-{} is empty for a {}-page document",
                range.start_page,
                range.end_page,
                total
            ));
        }

        let drop: Vec<u32> = (1..=total)
            .filter(|p| *p < range.start_page || *p > end)
            .collect();
        debug!(
            "write_range {}-{} dropping {} page(s) -> {}",
            range.start_page,
            end,
            drop.len(),
            out_path.display()
        );
        if !drop.is_empty() {
            doc.delete_pages(&drop);
        }
        doc.prune_objects();
        doc.renumber_objects();
        doc.compress();

        doc.save(out_path)
            .with_context(|| format!("writing PDF: {}", out_path.display()))?;
        Ok(())
    }
}

fn one_page_document() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}
