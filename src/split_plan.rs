use crate::error::PlanError;
use crate::naming::ensure_pdf_suffix;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start_page: u32,
    pub end_page: u32,
}

impl PageRange {
    pub fn page_count(&self) -> u32 {
        self.end_page - self.start_page + 1
    }
}

// split_points: first page of every output document; always holds 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    total_pages: u32,
    split_points: BTreeSet<u32>,
    custom_names: BTreeMap<usize, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedDocument {
    pub index: usize,
    pub start_page: u32,
    pub end_page: u32,
    pub filename: String,
}

impl PlannedDocument {
    pub fn document_number(&self) -> usize {
        self.index + 1
    }

    pub fn range(&self) -> PageRange {
        PageRange {
            start_page: self.start_page,
            end_page: self.end_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedPlan {
    pub total_pages: u32,
    pub documents: Vec<PlannedDocument>,
}

impl FinalizedPlan {
    pub fn is_single_document(&self) -> bool {
        self.documents.len() <= 1
    }
}

impl SplitPlan {
    pub fn new(total_pages: u32) -> Result<Self, PlanError> {
        if total_pages < 1 {
            return Err(PlanError::NoPages);
        }
        Ok(Self {
            total_pages,
            split_points: BTreeSet::from([1]),
            custom_names: BTreeMap::new(),
        })
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn split_points(&self) -> impl Iterator<Item = u32> + '_ {
        self.split_points.iter().copied()
    }

    pub fn custom_name(&self, doc_index: usize) -> Option<&str> {
        self.custom_names.get(&doc_index).map(String::as_str)
    }

    pub fn toggle_split(&mut self, after_page: u32) -> Result<(), PlanError> {
        if after_page < 1 || after_page >= self.total_pages {
            return Err(PlanError::SplitOutOfRange {
                after_page,
                total_pages: self.total_pages,
            });
        }
        let point = after_page + 1;
        if !self.split_points.remove(&point) {
            self.split_points.insert(point);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.split_points = BTreeSet::from([1]);
        self.custom_names.clear();
    }

    pub fn is_split_point(&self, page: u32) -> bool {
        self.split_points.contains(&page)
    }

    pub fn is_split_after(&self, page: u32) -> bool {
        page < self.total_pages && self.is_split_point(page + 1)
    }

    pub fn document_count(&self) -> usize {
        self.split_points.len()
    }

    pub fn derive_ranges(&self) -> Vec<PageRange> {
        let mut out = Vec::with_capacity(self.split_points.len());
        let mut points = self.split_points.iter().copied().peekable();
        while let Some(start) = points.next() {
            let end_page = match points.peek() {
                Some(next) => next - 1,
                None => self.total_pages,
            };
            out.push(PageRange {
                start_page: start,
                end_page,
            });
        }
        out
    }

    pub fn set_name(&mut self, doc_index: usize, name: &str) -> Result<(), PlanError> {
        let documents = self.document_count();
        if doc_index >= documents {
            return Err(PlanError::DocumentOutOfRange {
                index: doc_index,
                documents,
            });
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::EmptyName { index: doc_index });
        }
        self.custom_names.insert(doc_index, name.to_string());
        Ok(())
    }

    pub fn resolve_name(&self, doc_index: usize, source_stem: &str) -> String {
        match self.custom_names.get(&doc_index) {
            Some(name) => ensure_pdf_suffix(name),
            None => default_name(source_stem, doc_index),
        }
    }

    pub fn documents(&self, source_stem: &str) -> Vec<PlannedDocument> {
        self.derive_ranges()
            .into_iter()
            .enumerate()
            .map(|(index, r)| PlannedDocument {
                index,
                start_page: r.start_page,
                end_page: r.end_page,
                filename: self.resolve_name(index, source_stem),
            })
            .collect()
    }

    pub fn finalize(self, source_stem: &str) -> FinalizedPlan {
        FinalizedPlan {
            total_pages: self.total_pages,
            documents: self.documents(source_stem),
        }
    }
}

pub fn default_name(source_stem: &str, doc_index: usize) -> String {
    format!("{}_Part{}.pdf", source_stem, doc_index + 1)
}

pub fn render_preview(plan: &FinalizedPlan) -> String {
    let mut s = String::new();
    if plan.is_single_document() {
        s.push_str("No splits defined\n\n");
        s.push_str(&"━".repeat(30));
        s.push_str("\n\n");
        s.push_str("Document 1\n");
        s.push_str(&format!("     Pages 1 – {}\n", plan.total_pages));
        s.push_str("     (entire PDF)\n");
        return s;
    }

    s.push_str(&format!(
        "Splitting into {} documents:\n\n",
        plan.documents.len()
    ));
    s.push_str(&"━".repeat(30));
    s.push('\n');
    for doc in &plan.documents {
        let pages = doc.range().page_count();
        s.push_str(&format!("\nDocument {}\n", doc.document_number()));
        s.push_str(&format!(
            "     Pages {} – {} ({} page{})\n",
            doc.start_page,
            doc.end_page,
            pages,
            if pages > 1 { "s" } else { "" }
        ));
        s.push_str(&format!("     → {}\n", doc.filename));
    }
    s
}
