use std::collections::HashSet;

use crate::config::CorsSettings;

/// Build the CORS middleware from the configured allow-list.
///
/// Origins are matched as exact strings against the `Origin` header value,
/// which also covers the literal `null` origin sent by `file://` clients.
/// Requests without an `Origin` header are not subject to CORS at all.
pub fn cors(settings: &CorsSettings) -> actix_cors::Cors {
    let allowed_methods = settings.allowed_methods.iter().map(|s| s.as_str());
    let allowed_headers = settings.allowed_headers.iter().map(|s| s.as_str());

    let mut cors = actix_cors::Cors::default()
        .allowed_methods(allowed_methods)
        .allowed_headers(allowed_headers)
        .max_age(settings.max_age);

    if settings.wildcard_origin {
        cors = cors.allow_any_origin();
    } else {
        let origins: HashSet<String> = settings.origins.iter().cloned().collect();
        cors = cors.allowed_origin_fn(move |origin, _req_head| {
            origin
                .to_str()
                .map(|value| origins.contains(value))
                .unwrap_or(false)
        });
    }

    cors
}
