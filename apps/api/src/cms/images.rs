use crate::cms::documents::ImageSource;
use crate::content::transform::ImageResolver;

const IMAGE_CDN_URL: &str = "https://cdn.sanity.io/images";

/// Resolves Sanity asset references to CDN URLs.
///
/// A reference looks like `image-<assetId>-<width>x<height>-<ext>` and maps to
/// `https://cdn.sanity.io/images/<project>/<dataset>/<assetId>-<width>x<height>.<ext>`.
#[derive(Debug, Clone)]
pub struct SanityImageUrls {
    project_id: String,
    dataset: String,
}

impl SanityImageUrls {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    fn url_for_reference(&self, reference: &str) -> Option<String> {
        let rest = reference.strip_prefix("image-")?;
        let (id_and_size, ext) = rest.rsplit_once('-')?;
        if id_and_size.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(
            "{IMAGE_CDN_URL}/{}/{}/{id_and_size}.{ext}",
            self.project_id, self.dataset
        ))
    }
}

impl ImageResolver for SanityImageUrls {
    fn resolve(&self, image: &ImageSource) -> Option<String> {
        let asset = image.asset.as_ref()?;
        if let Some(url) = asset.url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.to_string());
        }
        asset
            .reference
            .as_deref()
            .and_then(|r| self.url_for_reference(r))
    }
}
