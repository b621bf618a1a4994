//! End-to-end resolution against an on-disk site database.

mod common;

use pageroute_core::engine::{resolve, RequestPath, Resolution, Router};
use pageroute_core::placeholder::PlaceholderDictionary;
use pageroute_core::store::{PageRecord, RedirectShape};
use pageroute_core::{ResolveContext, RouteError};

fn ctx() -> ResolveContext {
    ResolveContext::default()
        .with_dictionary(PlaceholderDictionary::new().with("language", ["en", "de"]))
}

async fn page_id(site: &common::Site, raw: &str) -> Option<String> {
    resolve(&site.db, &ctx(), &RequestPath::new(raw))
        .await
        .unwrap()
        .page()
        .map(|p| p.identifier.clone())
}

#[tokio::test]
async fn most_specific_pattern_wins() {
    let site = common::site(&["/a/b/c", "/a/b/*", "/a/*", "*"], &[]).await;
    assert_eq!(page_id(&site, "/a/b/c").await.as_deref(), Some("/a/b/c"));

    site.db.remove_page("/a/b/c").await.unwrap();
    assert_eq!(page_id(&site, "/a/b/c").await.as_deref(), Some("/a/b/*"));

    site.db.remove_page("/a/b/*").await.unwrap();
    assert_eq!(page_id(&site, "/a/b/c").await.as_deref(), Some("/a/*"));

    site.db.remove_page("/a/*").await.unwrap();
    assert_eq!(page_id(&site, "/a/b/c").await.as_deref(), Some("*"));
}

#[tokio::test]
async fn resolving_twice_is_identical() {
    let site = common::site(&["/blog/*", "/%language%/blog/*"], &[]).await;
    let ctx = ctx();
    let req = RequestPath::new("/de/blog/2024/post");
    let first = resolve(&site.db, &ctx, &req).await.unwrap();
    let second = resolve(&site.db, &ctx, &req).await.unwrap();
    assert_eq!(first, second);
    let page = first.page().unwrap();
    assert_eq!(page.identifier, "/%language%/blog/*");
    assert_eq!(page.parameter, "de/2024/post");
}

#[tokio::test]
async fn trailing_and_internal_wildcards_bind() {
    let site = common::site(&["/a/*", "/x/*/c"], &[]).await;
    let ctx = ctx();

    let res = resolve(&site.db, &ctx, &RequestPath::new("/a/xyz")).await.unwrap();
    let page = res.page().unwrap();
    assert_eq!(page.identifier, "/a/*");
    assert_eq!(page.parameter, "xyz");

    let res = resolve(&site.db, &ctx, &RequestPath::new("/x/xyz/c")).await.unwrap();
    let page = res.page().unwrap();
    assert_eq!(page.identifier, "/x/*/c");
    assert_eq!(page.parameter, "xyz");
}

#[tokio::test]
async fn placeholder_substitution_sets_language() {
    let site = common::site(&["/%language%/about"], &[]).await;
    let res = resolve(&site.db, &ctx(), &RequestPath::new("/de/about"))
        .await
        .unwrap();
    let page = res.page().unwrap();
    assert_eq!(page.identifier, "/%language%/about");
    assert_eq!(page.parameter, "de");
    assert_eq!(page.language, "de");
    assert_eq!(
        page.placeholders,
        vec![("language".to_string(), "de".to_string())]
    );
}

#[tokio::test]
async fn language_placeholder_picks_row_in_that_language() {
    let site = common::site(&[], &[]).await;
    for lang in ["en", "de"] {
        site.db
            .insert_page(&PageRecord {
                identifier: "/%language%/about".to_string(),
                content: format!("about-{lang}"),
                live: true,
                language: lang.to_string(),
                ..PageRecord::default()
            })
            .await
            .unwrap();
    }

    for lang in ["de", "en"] {
        let res = resolve(&site.db, &ctx(), &RequestPath::new(format!("/{lang}/about")))
            .await
            .unwrap();
        let page = res.page().unwrap();
        assert_eq!(page.language, lang);
        assert_eq!(page.record.language, lang);
        assert_eq!(page.content(), format!("about-{lang}"));
    }
}

#[tokio::test]
async fn wildcards_around_placeholder_and_split_wildcards() {
    let site = common::site(&["/*/%language%/*/c", "/*/b/*/d"], &[]).await;
    let ctx = ctx();

    let res = resolve(&site.db, &ctx, &RequestPath::new("/x/de/y/c")).await.unwrap();
    let page = res.page().unwrap();
    assert_eq!(page.identifier, "/*/%language%/*/c");
    assert_eq!(page.parameter, "x/de/y");
    assert_eq!(page.language, "de");

    let res = resolve(&site.db, &ctx, &RequestPath::new("/a/b/c/d")).await.unwrap();
    let page = res.page().unwrap();
    assert_eq!(page.identifier, "/*/b/*/d");
    assert_eq!(page.parameter, "a/c");
}

#[tokio::test]
async fn repeated_language_segment_single_substitution() {
    let site = common::site(&["/%language%/en/about"], &[]).await;
    assert_eq!(
        page_id(&site, "/en/en/about").await.as_deref(),
        Some("/%language%/en/about")
    );

    let site = common::site(&["/en/%language%/about"], &[]).await;
    assert_eq!(
        page_id(&site, "/en/en/about").await.as_deref(),
        Some("/en/%language%/about")
    );

    let site = common::site(&["/%language%/%language%/about"], &[]).await;
    assert_eq!(page_id(&site, "/en/en/about").await, None);
}

#[tokio::test]
async fn extension_aware_matching() {
    let site = common::site(&["/files/*"], &[]).await;
    let res = resolve(&site.db, &ctx(), &RequestPath::new("/files/report.ics"))
        .await
        .unwrap();
    let page = res.page().unwrap();
    assert_eq!(page.identifier, "/files/*");
    assert_eq!(page.parameter, "report");
    assert_eq!(page.extension.as_deref(), Some("ics"));
}

#[tokio::test]
async fn extension_typed_page_preferred() {
    let site = common::site(&["/files/*", "/files/*.ics"], &[]).await;
    assert_eq!(
        page_id(&site, "/files/report.ics").await.as_deref(),
        Some("/files/*.ics")
    );
}

#[tokio::test]
async fn blog_wildcard_beats_root_wildcard() {
    let site = common::site(&["/*", "/blog/*"], &[]).await;
    let res = resolve(&site.db, &ctx(), &RequestPath::new("/blog/post-1"))
        .await
        .unwrap();
    let page = res.page().unwrap();
    assert_eq!(page.identifier, "/blog/*");
    assert_eq!(page.parameter, "post-1");
    assert_eq!(page.content(), "content:/blog/*");
}

#[tokio::test]
async fn no_match_is_not_found() {
    let site = common::site(&["/a"], &[]).await;
    let res = resolve(&site.db, &ctx(), &RequestPath::new("/definitely/not/stored"))
        .await
        .unwrap();
    assert!(res.is_not_found());
}

#[tokio::test]
async fn redirect_used_when_no_page() {
    let site = common::site(
        &["/news/*"],
        &[
            ("/blog/post-1", "/news/exact", 301),
            ("/blog/*", "/news/*", 302),
        ],
    )
    .await;
    let res = resolve(&site.db, &ctx(), &RequestPath::new("/blog/post-1"))
        .await
        .unwrap();
    let hit = res.redirect().unwrap();
    assert_eq!(hit.target, "/news/exact");
    assert_eq!(hit.shape, RedirectShape::Exact);

    let res = resolve(&site.db, &ctx(), &RequestPath::new("/blog/second"))
        .await
        .unwrap();
    let hit = res.redirect().unwrap();
    assert_eq!(hit.target, "/news/second");
    assert_eq!(hit.http_code, 302);
}

#[tokio::test]
async fn page_beats_redirect() {
    let site = common::site(&["/blog/*"], &[("/blog/*", "/news/*", 301)]).await;
    assert!(matches!(
        resolve(&site.db, &ctx(), &RequestPath::new("/blog/x")).await.unwrap(),
        Resolution::Page(_)
    ));
}

#[tokio::test]
async fn exact_redirect_phase_once_per_router() {
    let site = common::site(&[], &[("/gone", "/here", 301)]).await;
    let ctx = ctx();
    let mut router = Router::new(&site.db, &ctx);
    let req = RequestPath::new("/gone");
    assert!(router.resolve(&req).await.unwrap().redirect().is_some());
    assert!(router.resolve(&req).await.unwrap().is_not_found());
    // A fresh request gets the exact phase again.
    assert!(resolve(&site.db, &ctx, &req).await.unwrap().redirect().is_some());
}

#[tokio::test]
async fn store_failure_is_fatal() {
    let site = common::site(&["/a"], &[]).await;
    site.db.close().await;
    let err = resolve(&site.db, &ctx(), &RequestPath::new("/a"))
        .await
        .unwrap_err();
    assert!(matches!(err, RouteError::Store(_)));
}

#[tokio::test]
async fn suffix_and_query_handling() {
    let site = common::site(&[], &[]).await;
    site.db
        .insert_page(&PageRecord {
            identifier: "/about".to_string(),
            content: "en".to_string(),
            live: true,
            language: "en".to_string(),
            ending: ".html".to_string(),
            parameters: vec!["ref".to_string()],
        })
        .await
        .unwrap();
    site.db
        .insert_page(&PageRecord {
            identifier: "/about".to_string(),
            content: "de".to_string(),
            live: true,
            language: "de".to_string(),
            ending: ".html".to_string(),
            parameters: vec![],
        })
        .await
        .unwrap();

    let res = resolve(
        &site.db,
        &ctx(),
        &RequestPath::new("https://example.com/about.html.de?ref=x"),
    )
    .await
    .unwrap();
    let page = res.page().unwrap();
    assert_eq!(page.content(), "de");
    assert_eq!(page.language, "de");
    assert_eq!(page.resolved_path, "/about.html");
    assert!(page.query.is_empty());

    let res = resolve(
        &site.db,
        &ctx(),
        &RequestPath::new("/about").with_query("ref=x&utm=y"),
    )
    .await
    .unwrap();
    let page = res.page().unwrap();
    assert_eq!(page.content(), "en");
    assert_eq!(page.query, vec![("ref".to_string(), "x".to_string())]);
}

#[tokio::test]
async fn unpublished_page_hidden() {
    let site = common::site(&["/a/*"], &[]).await;
    let mut draft = common::page("/a/b");
    draft.live = false;
    site.db.insert_page(&draft).await.unwrap();
    assert_eq!(page_id(&site, "/a/b").await.as_deref(), Some("/a/*"));

    let mut preview = ctx();
    preview.include_unpublished = true;
    let res = resolve(&site.db, &preview, &RequestPath::new("/a/b")).await.unwrap();
    assert_eq!(res.page().unwrap().identifier, "/a/b");
}

#[tokio::test]
async fn root_path_resolves() {
    let site = common::site(&["/", "*"], &[]).await;
    assert_eq!(page_id(&site, "/").await.as_deref(), Some("/"));
    assert_eq!(page_id(&site, "https://example.com").await.as_deref(), Some("/"));
    site.db.remove_page("/").await.unwrap();
    assert_eq!(page_id(&site, "/").await.as_deref(), Some("*"));
}
