pub mod tenant_routing;

pub use tenant_routing::{
    tenant_routing_middleware, ResolvedLanding, ResolvedVia, PROXY_SLUG_HEADER,
};
