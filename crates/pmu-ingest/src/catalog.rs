//! Catalog of CPU families and their description documents.

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Product name for a document file name: everything before the first `.`.
///
/// ```
/// assert_eq!(pmu_ingest::product_name("neoverse-n2-r0p3.json"), "neoverse-n2-r0p3");
/// ```
#[must_use]
pub fn product_name(document: &str) -> &str {
    document.split('.').next().unwrap_or(document)
}

/// A CPU family directory and the documents it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFamily {
    pub name: String,
    pub documents: Vec<String>,
}

/// One document to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    pub family: String,
    pub document: String,
    pub product: String,
}

impl ProductEntry {
    #[must_use]
    pub fn new(family: impl Into<String>, document: impl Into<String>) -> Self {
        let document = document.into();
        let product = product_name(&document).to_string();
        Self {
            family: family.into(),
            document,
            product,
        }
    }
}

/// Ordered list of families; processing follows this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub families: Vec<ProductFamily>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self {
            families: vec![ProductFamily {
                name: "neoverse".to_string(),
                documents: [
                    "neoverse-n1.json",
                    "neoverse-n2-r0p0.json",
                    "neoverse-n2-r0p1.json",
                    "neoverse-n2-r0p3.json",
                    "neoverse-n2.json",
                    "neoverse-v1.json",
                    "neoverse-v2.json",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
            }],
        }
    }
}

impl ProductCatalog {
    /// Every document in catalog order.
    #[must_use]
    pub fn entries(&self) -> Vec<ProductEntry> {
        self.families
            .iter()
            .flat_map(|family| {
                family
                    .documents
                    .iter()
                    .map(|document| ProductEntry::new(&family.name, document))
            })
            .collect()
    }

    /// Entries to process, optionally narrowed to one product.
    ///
    /// `cpu` matches either the product name (`neoverse-n1`) or the document
    /// file name (`neoverse-n1.json`).
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnknownProduct`] when nothing matches `cpu`.
    pub fn select(&self, cpu: Option<&str>) -> Result<Vec<ProductEntry>> {
        let entries = self.entries();
        let Some(cpu) = cpu else {
            return Ok(entries);
        };
        let selected: Vec<ProductEntry> = entries
            .into_iter()
            .filter(|entry| entry.product == cpu || entry.document == cpu)
            .collect();
        if selected.is_empty() {
            return Err(IngestError::UnknownProduct {
                name: cpu.to_string(),
            });
        }
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_name() {
        assert_eq!(product_name("neoverse-n1.json"), "neoverse-n1");
        assert_eq!(product_name("neoverse-v2"), "neoverse-v2");
        assert_eq!(product_name(""), "");
    }

    #[test]
    fn test_default_catalog_order() {
        let products: Vec<String> = ProductCatalog::default()
            .entries()
            .into_iter()
            .map(|entry| entry.product)
            .collect();
        assert_eq!(
            products,
            vec![
                "neoverse-n1",
                "neoverse-n2-r0p0",
                "neoverse-n2-r0p1",
                "neoverse-n2-r0p3",
                "neoverse-n2",
                "neoverse-v1",
                "neoverse-v2",
            ]
        );
    }

    #[test]
    fn test_select() {
        let catalog = ProductCatalog::default();
        assert_eq!(catalog.select(None).unwrap().len(), 7);

        let by_product = catalog.select(Some("neoverse-v1")).unwrap();
        assert_eq!(by_product.len(), 1);
        assert_eq!(by_product[0].family, "neoverse");

        let by_document = catalog.select(Some("neoverse-v1.json")).unwrap();
        assert_eq!(by_product, by_document);

        assert!(matches!(
            catalog.select(Some("cortex-a78")),
            Err(IngestError::UnknownProduct { .. })
        ));
    }
}
