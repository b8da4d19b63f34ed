use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    tags(
        (name = "Stations", description = "Railway station registry"),
        (name = "Routes", description = "Routes between stations"),
        (name = "Crews", description = "Crew member registry"),
        (name = "Train types", description = "Train type registry"),
        (name = "Trains", description = "Trains and their seat layouts"),
        (name = "Trips", description = "Scheduled trips, search and availability"),
        (name = "Orders", description = "Seat booking"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "Railway API",
        version = "1.0.0",
        description = "Railway reservation service API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
