use std::collections::HashSet;

/// The image columns of one product row. Nothing else about a product is read here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductImageFields {
    pub image_url: Option<String>,
    pub additional_images: Option<Vec<Option<String>>>,
}

impl ProductImageFields {
    pub fn new(image_url: Option<&str>, additional_images: &[&str]) -> Self {
        Self {
            image_url: image_url.map(str::to_string),
            additional_images: Some(
                additional_images
                    .iter()
                    .map(|url| Some(url.to_string()))
                    .collect(),
            ),
        }
    }

    /// Every non-blank URL on this product, primary image first
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.image_url
            .as_deref()
            .into_iter()
            .chain(
                self.additional_images
                    .iter()
                    .flatten()
                    .filter_map(|url| url.as_deref()),
            )
            .filter(|url| !url.trim().is_empty())
    }
}

/// Deduplicated set of image URLs referenced by at least one product.
///
/// URLs are kept verbatim; matching against stored objects is exact string
/// equality.
#[derive(Debug, Clone, Default)]
pub struct ImageReferenceSet {
    urls: HashSet<String>,
}

impl ImageReferenceSet {
    pub fn collect<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a ProductImageFields>,
    {
        let urls = products
            .into_iter()
            .flat_map(ProductImageFields::urls)
            .map(str::to_string)
            .collect();
        Self { urls }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_skips_nulls_and_duplicates() {
        let products = vec![
            ProductImageFields::new(
                Some("https://x/store/products/a.jpg"),
                &["https://x/store/products/b.jpg"],
            ),
            ProductImageFields {
                image_url: Some("https://x/store/products/b.jpg".to_string()),
                additional_images: Some(vec![None, Some(String::new()), Some("   ".to_string())]),
            },
            ProductImageFields {
                image_url: None,
                additional_images: None,
            },
        ];

        let refs = ImageReferenceSet::collect(&products);
        assert_eq!(refs.len(), 2);
        assert!(refs.contains("https://x/store/products/a.jpg"));
        assert!(refs.contains("https://x/store/products/b.jpg"));
        assert!(!refs.contains(""));
        assert!(!refs.contains("   "));
    }

    #[test]
    fn test_size_is_bounded_by_product_images() {
        let products: Vec<_> = (0..5)
            .map(|i| {
                let primary = format!("https://x/store/products/{}.jpg", i % 3);
                let extra = format!("https://x/store/products/{}-extra.jpg", i % 2);
                ProductImageFields::new(Some(primary.as_str()), &[extra.as_str(), extra.as_str()])
            })
            .collect();

        let max_additional = 2;
        let refs = ImageReferenceSet::collect(&products);
        assert!(refs.len() <= products.len() * (1 + max_additional));
        assert_eq!(refs.len(), 5);
    }

    #[test]
    fn test_empty_snapshot() {
        let refs = ImageReferenceSet::collect(&Vec::<ProductImageFields>::new());
        assert!(refs.is_empty());
    }
}
