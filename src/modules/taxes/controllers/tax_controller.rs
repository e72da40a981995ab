//! Tax quote endpoints.
//!
//! Exposes the tax engine for checkout previews: a subtotal plus an optional
//! jurisdiction code comes in, display-ready tax lines come out.

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::taxes::services::TaxCalculator;

#[derive(Debug, Deserialize)]
pub struct TaxQuoteQuery {
    pub subtotal: Decimal,
    pub jurisdiction: Option<String>,
}

/// Quote taxes on a subtotal
///
/// GET /taxes/quote?subtotal=100&jurisdiction=QC
pub async fn quote_taxes(query: web::Query<TaxQuoteQuery>) -> Result<HttpResponse, AppError> {
    let calculator = TaxCalculator::new();
    let jurisdiction = query.jurisdiction.as_deref();

    let lines = calculator.compute_taxes(query.subtotal, jurisdiction)?;
    let combined_rate = calculator.combined_rate(jurisdiction);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "subtotal": query.subtotal,
        "jurisdiction": jurisdiction,
        "estimated": !jurisdiction.map(|j| calculator.recognizes(j)).unwrap_or(false),
        "combined_rate": combined_rate,
        "tax_lines": lines,
    })))
}

/// Configure tax routes
pub fn configure_tax_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/taxes").route("/quote", web::get().to(quote_taxes)));
}
