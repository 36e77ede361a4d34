//! Print the OpenAPI document as JSON.

use budgetbite::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), serde_json::Error> {
    println!("{}", ApiDoc::openapi().to_json()?);
    Ok(())
}
