//! Request URL construction

use super::config::QueryConfiguration;
use crate::error::{Error, Result};
use crate::types::QueryParameters;
use url::Url;

/// Merge caller parameters over defaults; the caller wins on collisions
pub fn merge_params(defaults: &QueryParameters, params: &QueryParameters) -> QueryParameters {
    let mut merged = defaults.clone();
    merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

impl QueryConfiguration {
    /// Caller parameters merged over this endpoint's defaults
    pub fn merged_params(&self, params: &QueryParameters) -> QueryParameters {
        merge_params(&self.default_params, params)
    }

    /// Build the request URL for `params` under `api_key`
    ///
    /// `extra` is applied over the merged parameters (pagination offsets).
    /// The key is always appended last; a caller-supplied key parameter is
    /// ignored.
    pub fn build_url(
        &self,
        params: &QueryParameters,
        api_key: &str,
        extra: &QueryParameters,
    ) -> Result<String> {
        let mut merged = merge_params(&self.merged_params(params), extra);
        merged.remove(&self.key_param);

        let mut url = Url::parse(&self.base_url)?;

        if let Some(lookup) = &self.path_lookup {
            if let Some(identifier) = merged.remove(&lookup.field) {
                for field in &lookup.conflicting {
                    merged.remove(field);
                }
                url.path_segments_mut()
                    .map_err(|()| {
                        Error::config(format!("Base URL cannot take a path: {}", self.base_url))
                    })?
                    .pop_if_empty()
                    .push(&lookup.segment)
                    .push(&identifier);
            }
        }

        url.query_pairs_mut()
            .extend_pairs(merged.iter())
            .append_pair(&self.key_param, api_key);

        Ok(url.into())
    }

    /// Resolve an upstream-supplied link and make sure it carries `api_key`
    ///
    /// `href` may be relative to `request_url`, the URL of the response it
    /// came from. Links that already name a key keep it. A link that cannot
    /// be resolved is a malformed response.
    pub fn authorize_url(&self, href: &str, request_url: &str, api_key: &str) -> Result<String> {
        let mut url = Url::parse(request_url)
            .and_then(|base| base.join(href))
            .map_err(|e| Error::malformed(format!("unusable link '{href}': {e}")))?;

        if !url.query_pairs().any(|(k, _)| k == self.key_param.as_str()) {
            url.query_pairs_mut().append_pair(&self.key_param, api_key);
        }
        Ok(url.into())
    }
}
