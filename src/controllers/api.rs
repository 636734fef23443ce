use crate::endpoint::{Controller, EndpointBinding};
use crate::method::MethodSet;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use tracing::info;

/// Plain-text JSON-free API endpoints of the sample site.
pub struct ApiController;

// std's RandomState is seeded from the OS; hashing nothing yields a fresh
// random u64 without pulling in an RNG crate for one demo endpoint.
fn random_u64() -> u64 {
    RandomState::new().build_hasher().finish()
}

impl Controller for ApiController {
    fn bindings(&self) -> Vec<EndpointBinding> {
        vec![EndpointBinding::new(
            "generate_random_number",
            "/api/generaterandomnumber",
            MethodSet::GET,
            |ctx| {
                let number = random_u64();
                info!(number, "Generated random number");
                ctx.send_text(&number.to_string(), 200);
            },
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{ParsedRequest, RequestContext};

    #[test]
    fn test_random_number_is_textual() {
        let controller = ApiController;
        let bindings = controller.bindings();
        assert_eq!(bindings.len(), 1);

        let mut ctx = RequestContext::new(ParsedRequest::new("GET", "/api/generaterandomnumber"));
        (bindings[0].handler)(&mut ctx);
        assert_eq!(ctx.response().status, 200);
        let body = String::from_utf8(ctx.response().body.clone()).unwrap();
        assert!(body.parse::<u64>().is_ok());
    }
}
