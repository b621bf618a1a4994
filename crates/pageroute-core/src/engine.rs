//! Resolution pipeline.
//!
//! # Data Flow
//! ```text
//! RequestPath
//!     → normalize   (lookup key, suffix, language)
//!     → placeholder (variants)
//!     → matcher     (ordered candidates)
//!     → rank        (one batched page lookup, lowest index wins)
//!     → bind        (parameters, handlers)
//!     → Resolution::Page
//! on no page:
//!     → redirect    (exact, suffix-wildcard, prefix-wildcard)
//!     → Resolution::Redirect | Resolution::NotFound
//! ```

use crate::bind::{bind_parameters, ResolvedPage};
use crate::context::ResolveContext;
use crate::error::RouteError;
use crate::matcher::generate_candidates;
use crate::normalize::{normalize_path, NormalizedPath};
use crate::placeholder::{expand_placeholders, Variant};
use crate::rank::{pick_winner_with, unique_identifiers};
use crate::redirect::{RedirectResolver, RedirectTarget};
use crate::store::{PageStore, RedirectStore};

/// Inbound request as seen by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPath {
    /// Raw path or absolute URL, possibly with `?query`.
    pub raw: String,
    /// Query string supplied separately (overrides one embedded in `raw`).
    pub query: Option<String>,
}

impl RequestPath {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            query: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// Outcome of one resolution. `NotFound` is an expected result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(Box<ResolvedPage>),
    Redirect(RedirectTarget),
    NotFound,
}

impl Resolution {
    pub fn page(&self) -> Option<&ResolvedPage> {
        match self {
            Resolution::Page(p) => Some(p.as_ref()),
            _ => None,
        }
    }

    pub fn redirect(&self) -> Option<&RedirectTarget> {
        match self {
            Resolution::Redirect(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }
}

/// Per-request router over a store and an immutable context.
pub struct Router<'a, S> {
    store: &'a S,
    ctx: &'a ResolveContext,
    redirects: RedirectResolver,
}

impl<'a, S> Router<'a, S>
where
    S: PageStore + RedirectStore,
{
    pub fn new(store: &'a S, ctx: &'a ResolveContext) -> Self {
        Self {
            store,
            ctx,
            redirects: RedirectResolver::new(),
        }
    }

    /// Resolves `request` to a page, a redirect, or `NotFound`.
    pub async fn resolve(&mut self, request: &RequestPath) -> Result<Resolution, RouteError> {
        let path = normalize_path(
            &request.raw,
            request.query.as_deref(),
            &self.ctx.suffixes,
            &self.ctx.languages,
        );

        if let Some(page) = self.resolve_page(&path).await? {
            return Ok(Resolution::Page(Box::new(page)));
        }

        let language = self.ctx.query_language(&path).map(str::to_string);
        match self
            .redirects
            .resolve(self.store, &path, language.as_deref())
            .await
            .map_err(RouteError::store)?
        {
            Some(target) => Ok(Resolution::Redirect(target)),
            None => {
                tracing::debug!("no page or redirect for {:?}", request.raw);
                Ok(Resolution::NotFound)
            }
        }
    }

    /// Page matching only (no redirect fallback).
    pub async fn resolve_page(
        &self,
        path: &NormalizedPath,
    ) -> Result<Option<ResolvedPage>, RouteError> {
        let language = self.ctx.request_language(path);
        let variants = expand_placeholders(&path.key, &self.ctx.dictionary);
        let candidates = generate_candidates(&variants, &self.ctx.options)?;
        let identifiers = unique_identifiers(&candidates);
        tracing::debug!(
            key = %path.key,
            variants = variants.len(),
            candidates = candidates.len(),
            unique = identifiers.len(),
            "page lookup"
        );

        let records = self
            .store
            .find_pages(&identifiers)
            .await
            .map_err(RouteError::store)?;

        // A `%language%` match prefers the row in the language it consumed.
        let Some(winner) = pick_winner_with(
            &candidates,
            &records,
            |c| {
                variants
                    .get(c.variant)
                    .and_then(Variant::language)
                    .unwrap_or(language.as_str())
            },
            self.ctx.include_unpublished,
        ) else {
            return Ok(None);
        };

        let variant = &variants[winner.candidate.variant];
        let mut page = bind_parameters(
            winner.candidate,
            variant,
            winner.rank,
            winner.record,
            path,
            &language,
        );
        if let Some(applied) = &variant.placeholder {
            self.ctx
                .handlers
                .dispatch(&applied.name, &applied.value, &mut page);
        }
        tracing::info!(
            identifier = %page.identifier,
            parameter = %page.parameter,
            rank = page.rank,
            "resolved /{}",
            path.key
        );
        Ok(Some(page))
    }
}

/// One-shot helper: builds a fresh per-request router and resolves `request`.
pub async fn resolve<S>(
    store: &S,
    ctx: &ResolveContext,
    request: &RequestPath,
) -> Result<Resolution, RouteError>
where
    S: PageStore + RedirectStore,
{
    Router::new(store, ctx).resolve(request).await
}
