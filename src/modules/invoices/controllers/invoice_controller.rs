//! Invoice preview endpoint for the checkout flow.

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::invoices::models::InvoiceItem;
use crate::modules::invoices::services::InvoiceService;

#[derive(Debug, Deserialize)]
pub struct InvoicePreviewRequest {
    pub items: Vec<InvoiceItemRequest>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceItemRequest {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Build a full invoice preview for a cart
///
/// POST /invoices/preview
pub async fn preview_invoice(
    request: web::Json<InvoicePreviewRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    let items = request
        .items
        .into_iter()
        .map(|item| {
            InvoiceItem::new(
                item.product_id,
                item.product_name,
                item.unit_price,
                item.quantity,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let service = InvoiceService::new();
    let invoice = service.build(
        items,
        request.discount.unwrap_or(Decimal::ZERO),
        request.jurisdiction.as_deref(),
    )?;
    let rendered = service.render_lines(&invoice);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "invoice": invoice,
        "rendered": rendered,
    })))
}

/// Configure invoice routes
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/invoices").route("/preview", web::post().to(preview_invoice)));
}
