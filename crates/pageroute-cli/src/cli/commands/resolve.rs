//! `pageroute resolve <path>` – run the engine once and print the outcome.

use anyhow::Result;
use pageroute_core::config::RouterConfig;
use pageroute_core::store::SiteDb;
use pageroute_core::{resolve, RequestPath, Resolution, ResolveContext};

pub async fn run_resolve(
    db: &SiteDb,
    cfg: &RouterConfig,
    path: &str,
    query: Option<&str>,
    preview: bool,
) -> Result<()> {
    let mut ctx = ResolveContext::from_config(cfg);
    ctx.include_unpublished |= preview;

    let mut request = RequestPath::new(path);
    if let Some(q) = query {
        request = request.with_query(q);
    }

    match resolve(db, &ctx, &request).await? {
        Resolution::Page(page) => {
            println!("page        {}", page.identifier);
            println!("parameter   {}", page.parameter);
            if let Some(ext) = &page.extension {
                println!("extension   {ext}");
            }
            println!("language    {}", page.language);
            println!("path        {}", page.resolved_path);
            for (k, v) in &page.query {
                println!("query       {k}={v}");
            }
            println!();
            println!("{}", page.content());
        }
        Resolution::Redirect(r) => {
            println!("redirect    {} {}", r.http_code, r.target);
            println!("pattern     {} ({})", r.pattern, r.shape.as_str());
        }
        Resolution::NotFound => println!("404 not found: {path}"),
    }
    Ok(())
}
