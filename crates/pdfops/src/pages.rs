//! Page tree editing.
//!
//! [`PageEditor`] turns a [`PageSequence`] into a real document: it selects
//! and reorders pages and concatenates documents. Every edit flattens the page
//! tree, so selected pages become direct kids of the root `Pages` node.
//! Attributes a page inherits from intermediate nodes are copied onto the page
//! first, so flattening never changes how a page renders.

use lopdf::{Document, Object, ObjectId};

use crate::error::{PdfOpsError, Result};
use crate::sequence::PageSequence;

/// Page attributes that may be inherited from ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Page editor for selecting, reordering and concatenating pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageEditor;

impl PageEditor {
    /// Create a new page editor.
    pub fn new() -> Self {
        Self
    }

    /// Get the number of pages in a document.
    pub fn page_count(&self, doc: &Document) -> usize {
        doc.get_pages().len()
    }

    /// Build a document whose pages follow `sequence`.
    ///
    /// Output page `i` is source page `sequence[i]` (zero-based). When the
    /// selection drops pages, the document outline is removed since it would
    /// point at pages that are gone.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range or the page tree is
    /// malformed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfops::pages::PageEditor;
    /// # use pdfops::sequence::book_order;
    /// # use lopdf::Document;
    /// # fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// let editor = PageEditor::new();
    /// let order = book_order(editor.page_count(&doc))?;
    /// let reordered = editor.select(&doc, &order)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn select(&self, doc: &Document, sequence: &PageSequence) -> Result<Document> {
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let total_pages = page_ids.len();

        if let Some(index) = sequence.iter().find(|&index| index >= total_pages) {
            let page = (index + 1) as u32;
            return Err(PdfOpsError::InvalidPageRange {
                start: page,
                stop: page,
                total_pages,
            });
        }

        let selected = sequence.apply(&page_ids);
        let mut new_doc = doc.clone();

        self.flatten_pages(doc, &mut new_doc, &selected)?;

        let pages_id = pages_root(&new_doc)?;
        self.set_kids(&mut new_doc, pages_id, &selected)?;
        strip_inherited(&mut new_doc, pages_id)?;

        if !sequence.is_permutation_of(total_pages)
            && let Ok(catalog) = new_doc.catalog_mut()
        {
            catalog.remove(b"Outlines");
        }

        new_doc.prune_objects();

        tracing::debug!(
            source_pages = total_pages,
            selected_pages = selected.len(),
            "selected pages"
        );

        Ok(new_doc)
    }

    /// Concatenate documents, keeping the page order of each.
    ///
    /// The first document becomes the base; pages of the following documents
    /// are appended to its root `Pages` node. Every page gets its inherited
    /// attributes first and the root drops its own, so no document inherits
    /// from another.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::NoInputFiles`] for an empty input, or an error
    /// if a page tree is malformed.
    pub fn concat<I>(&self, documents: I) -> Result<Document>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut documents = documents.into_iter();
        let mut merged = documents.next().ok_or(PdfOpsError::NoInputFiles)?;

        let pages_id = pages_root(&merged)?;
        self.flatten_in_place(&mut merged)?;
        strip_inherited(&mut merged, pages_id)?;
        let mut max_id = merged.max_id;

        for mut doc in documents {
            self.flatten_in_place(&mut doc)?;

            // Avoid object id collisions with what is already merged.
            doc.renumber_objects_with(max_id + 1);
            max_id = doc.max_id;

            let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

            merged.objects.extend(doc.objects);
            self.append_kids(&mut merged, pages_id, &doc_pages)?;
        }

        merged.max_id = max_id;
        merged.prune_objects();

        Ok(merged)
    }

    /// Select `skip_front..` of every document, then concatenate.
    ///
    /// Documents left without pages are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::NoPages`] if no page is left at all.
    pub fn concat_skipping_front<'a, I>(&self, documents: I, skip_front: usize) -> Result<Document>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut trimmed = Vec::new();

        for doc in documents {
            let pages = PageSequence::identity(self.page_count(doc)).skip_front(skip_front);
            if pages.is_empty() {
                continue;
            }
            trimmed.push(self.select(doc, &pages)?);
        }

        if trimmed.is_empty() {
            return Err(PdfOpsError::no_pages(format!(
                "every input has {skip_front} page(s) or fewer"
            )));
        }

        self.concat(trimmed)
    }

    /// Copy inherited attributes of `page_ids` (looked up in `source`) onto
    /// the page dictionaries in `target`.
    fn flatten_pages(
        &self,
        source: &Document,
        target: &mut Document,
        page_ids: &[ObjectId],
    ) -> Result<()> {
        for &page_id in page_ids {
            let inherited = inherited_attributes(source, page_id)?;
            if inherited.is_empty() {
                continue;
            }

            let page = target
                .get_dictionary_mut(page_id)
                .map_err(|e| PdfOpsError::other(format!("Failed to get page: {e}")))?;

            for (key, value) in inherited {
                page.set(key.to_vec(), value);
            }
        }

        Ok(())
    }

    /// Copy inherited attributes onto every page of `doc`.
    fn flatten_in_place(&self, doc: &mut Document) -> Result<()> {
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let source = doc.clone();
        self.flatten_pages(&source, doc, &page_ids)
    }

    /// Replace the kids of the root pages node.
    fn set_kids(&self, doc: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) -> Result<()> {
        let pages = doc
            .get_dictionary_mut(pages_id)
            .map_err(|e| PdfOpsError::other(format!("Failed to get pages object: {e}")))?;

        let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
        pages.set("Kids", Object::Array(kids));
        pages.set("Count", Object::Integer(page_ids.len() as i64));

        self.reparent(doc, pages_id, page_ids)
    }

    /// Append pages to the root pages node.
    fn append_kids(
        &self,
        doc: &mut Document,
        pages_id: ObjectId,
        page_ids: &[ObjectId],
    ) -> Result<()> {
        let pages = doc
            .get_dictionary_mut(pages_id)
            .map_err(|e| PdfOpsError::other(format!("Failed to get pages object: {e}")))?;

        let kids = pages
            .get_mut(b"Kids")
            .map_err(|_| PdfOpsError::other("Pages dictionary missing Kids array"))?;

        if let Object::Array(kids) = kids {
            kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));
        } else {
            return Err(PdfOpsError::other("Kids is not an array"));
        }

        let count = pages.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
        pages.set("Count", Object::Integer(count + page_ids.len() as i64));

        self.reparent(doc, pages_id, page_ids)
    }

    fn reparent(&self, doc: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) -> Result<()> {
        for &page_id in page_ids {
            let page = doc
                .get_dictionary_mut(page_id)
                .map_err(|e| PdfOpsError::other(format!("Failed to get page: {e}")))?;
            page.set("Parent", Object::Reference(pages_id));
        }
        Ok(())
    }
}

/// Object id of the root `Pages` node.
fn pages_root(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfOpsError::other(format!("Failed to locate page tree: {e}")))
}

/// Remove inheritable attributes from the root `Pages` node. Only valid once
/// every page under it carries its own.
fn strip_inherited(doc: &mut Document, pages_id: ObjectId) -> Result<()> {
    let pages = doc
        .get_dictionary_mut(pages_id)
        .map_err(|e| PdfOpsError::other(format!("Failed to get pages object: {e}")))?;

    for key in INHERITABLE_ATTRIBUTES {
        pages.remove(key);
    }
    Ok(())
}

/// Inheritable attributes a page lacks, taken from its nearest ancestor.
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Result<Vec<(&'static [u8], Object)>> {
    let page = doc
        .get_dictionary(page_id)
        .map_err(|e| PdfOpsError::other(format!("Failed to get page: {e}")))?;

    let mut missing: Vec<&'static [u8]> = INHERITABLE_ATTRIBUTES
        .into_iter()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(parent_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }

        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };

        missing.retain(|&key| match node.get(key) {
            Ok(value) => {
                found.push((key, value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    Ok(found)
}
