mod auth;

pub use auth::{
    IdentityProvider, RestIdentityProvider, StaticIdentityProvider, UnconfiguredIdentityProvider,
};
