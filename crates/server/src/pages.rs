//! Server-rendered product detail page.
//!
//! Endpoints:
//! - `GET /product/{id}` — fetch one product from the catalog and render it
//!   as a full HTML document with social-preview metadata.
//!
//! The handler branches on exactly three outcomes: a decoded product (200,
//! full document), an empty upstream body (404, minimal body), or a fetch
//! failure (logged, then masked as 200 with the same minimal body so a
//! transient upstream outage does not surface as a server error).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use shopfront_core::{PageMotion, Product};
use tera::{Context, Tera};
use tracing::{error, warn};

use crate::catalog::CatalogClient;

const NOT_FOUND_BODY: &str = "<div>Product not found</div>";

#[derive(Clone)]
pub struct PagesState {
    catalog: CatalogClient,
    templates: Arc<Tera>,
    site_base_url: String,
    motion: PageMotion,
}

/// Initialize the Tera template engine with the page templates.
fn init_templates() -> Arc<Tera> {
    let mut tera = match Tera::new("templates/pages/**/*") {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Failed to load page templates from filesystem, using empty Tera instance");
            Tera::default()
        }
    };

    // Embedded fallbacks in case filesystem templates are not available
    tera.add_raw_template("product.html", include_str!("../../../templates/pages/product.html"))
        .ok();
    tera.add_raw_template("not_found.html", include_str!("../../../templates/pages/not_found.html"))
        .ok();

    Arc::new(tera)
}

pub fn router(catalog: CatalogClient, site_base_url: &str, motion: PageMotion) -> Router {
    let templates = init_templates();

    Router::new().route("/product/{id}", get(product_page)).with_state(PagesState {
        catalog,
        templates,
        site_base_url: site_base_url.trim_end_matches('/').to_string(),
        motion,
    })
}

/// Render the product detail page for one route id.
async fn product_page(
    Path(id): Path<String>,
    State(state): State<PagesState>,
) -> (StatusCode, Html<String>) {
    match state.catalog.fetch_product(&id).await {
        Ok(Some(product)) => {
            match render_product(&state.templates, &state.site_base_url, &state.motion, &product) {
                Ok(html) => (StatusCode::OK, Html(html)),
                Err(e) => {
                    error!(
                        event_name = "pages.product.render_failed",
                        product_id = %id,
                        error = %e,
                        "product template rendering failed"
                    );
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Html(format!("<h1>Template Error</h1><pre>{:?}</pre>", e)),
                    )
                }
            }
        }
        Ok(None) => (StatusCode::NOT_FOUND, Html(render_not_found(&state.templates))),
        Err(e) => {
            error!(
                event_name = "pages.product.fetch_failed",
                product_id = %id,
                error = %e,
                "error fetching product"
            );
            (StatusCode::OK, Html(render_not_found(&state.templates)))
        }
    }
}

/// Pure render step: identical input always yields byte-identical markup.
fn render_product(
    templates: &Tera,
    site_base_url: &str,
    motion: &PageMotion,
    product: &Product,
) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert(
        "product",
        &serde_json::json!({
            "id": product.id.to_string(),
            "title": product.title,
            "description": product.description,
            "image": escape_attribute(&product.image),
            "price_display": product.price_display(),
            "rating_display": product.rating_display(),
        }),
    );
    context.insert(
        "og_url",
        &escape_attribute(&format!("{site_base_url}/product/{}", product.id)),
    );
    context.insert("motion", motion);

    templates.render("product.html", &context)
}

/// Escape the characters that can terminate an HTML attribute value. Unlike
/// the template engine's autoescape this leaves `/` literal, so URL values
/// render unaltered while a catalog-supplied quote cannot break out of the
/// attribute.
fn escape_attribute(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Minimal body shared by the not-found and masked-failure outcomes. No
/// metadata tags are emitted for an absent product.
fn render_not_found(templates: &Tera) -> String {
    templates
        .render("not_found.html", &Context::new())
        .unwrap_or_else(|_| NOT_FOUND_BODY.to_string())
}
