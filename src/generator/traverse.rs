//! Schema-driven route inference.
//!
//! Walks the document depth-first, node before children, object keys in
//! source order. The emission order is the catalogue order, and therefore
//! the match precedence the simulator relies on.

use serde_json::{json, Value};

use super::normalize_prefix;
use super::route::{HttpMethod, ParamSpec, Route, RouteCatalogue};

/// Marker segment standing for "any element of the enclosing collection".
pub const ID_SEGMENT: &str = "{id}";

/// Generate the route catalogue for `document` under `prefix`.
pub fn generate_routes(document: &Value, prefix: &str) -> RouteCatalogue {
    let mut builder = CatalogueBuilder {
        prefix: normalize_prefix(prefix),
        routes: Vec::new(),
    };
    builder.visit(document, &mut Vec::new());

    tracing::debug!(
        prefix = %builder.prefix,
        routes = builder.routes.len(),
        "Route catalogue generated"
    );
    RouteCatalogue::from(builder.routes)
}

/// True for the node kinds that produce routes.
fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

struct CatalogueBuilder {
    prefix: String,
    routes: Vec<Route>,
}

impl CatalogueBuilder {
    fn visit(&mut self, node: &Value, path: &mut Vec<String>) {
        let url = self.url_for(path);
        let label = path.last().map(String::as_str);

        match node {
            Value::Array(items) => {
                self.push(
                    HttpMethod::Get,
                    url.clone(),
                    format!("Retrieve {}", label.unwrap_or("all data")),
                    pretty(node),
                    Vec::new(),
                );

                let Some(first) = items.first().filter(|v| is_container(v)) else {
                    return;
                };
                self.push_collection_routes(&url, label.unwrap_or("the collection"), first);

                // Nested structure is modeled once per schema, from the first element.
                path.push(ID_SEGMENT.to_string());
                self.visit(first, path);
                path.pop();
            }
            Value::Object(map) => {
                self.push(
                    HttpMethod::Get,
                    url,
                    format!("Retrieve {}", label.unwrap_or("all data")),
                    pretty(node),
                    Vec::new(),
                );

                for (key, value) in map {
                    if is_container(value) {
                        path.push(key.clone());
                        self.visit(value, path);
                        path.pop();
                    }
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }

    /// GET-by-id, POST, PUT, DELETE, in that order.
    fn push_collection_routes(&mut self, url: &str, label: &str, sample: &Value) {
        let item_url = format!("{url}/{ID_SEGMENT}");

        self.push(
            HttpMethod::Get,
            item_url.clone(),
            format!("Retrieve a single item from {label}"),
            pretty(sample),
            vec![ParamSpec::id("The item identifier")],
        );
        self.push(
            HttpMethod::Post,
            url.to_string(),
            format!("Create a new item in {label}"),
            pretty(&json!({ "success": true, "id": "new-id" })),
            vec![ParamSpec::body("The data of the item to create")],
        );
        self.push(
            HttpMethod::Put,
            item_url.clone(),
            format!("Update an existing item in {label}"),
            pretty(&json!({ "success": true })),
            vec![
                ParamSpec::id("The item identifier"),
                ParamSpec::body("The updated data"),
            ],
        );
        self.push(
            HttpMethod::Delete,
            item_url,
            format!("Delete an item from {label}"),
            pretty(&json!({ "success": true })),
            vec![ParamSpec::id("The identifier of the item to delete")],
        );
    }

    fn url_for(&self, path: &[String]) -> String {
        let mut url = self.prefix.clone();
        for segment in path {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    fn push(
        &mut self,
        method: HttpMethod,
        url_template: String,
        description: String,
        response_example: String,
        params: Vec<ParamSpec>,
    ) {
        self.routes.push(Route {
            method,
            url_template,
            description,
            response_example,
            params,
        });
    }
}
