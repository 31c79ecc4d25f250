//! Route policy registry.
//!
//! Every route's authorization requirements are declared once, next to the
//! route table, and frozen into a [`RoutePolicies`] before the server starts.
//! The guards only ever perform lookups against it.
//!
//! A route is keyed by method and path template (`/api/users/{id}`), the same
//! form axum exposes through `MatchedPath`. Routes that were never declared
//! require authentication and carry no role restriction.

use std::collections::{BTreeSet, HashMap};

use axum::http::Method;
use rampart_core::Role;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub path: String,
}

impl RouteKey {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Authorization requirements of a single route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    /// Skips authentication entirely.
    pub public: bool,
    /// Roles allowed through. Empty means any authenticated caller.
    pub roles: BTreeSet<Role>,
}

static AUTHENTICATED: RoutePolicy = RoutePolicy {
    public: false,
    roles: BTreeSet::new(),
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("route {0} is public but also requires roles")]
    PublicWithRoles(RouteKey),
    #[error("route {0} declares the same requirement twice")]
    Duplicate(RouteKey),
    #[error("route {0} requires an empty role set")]
    EmptyRoles(RouteKey),
}

#[derive(Debug, Clone)]
enum Declaration {
    Public,
    Roles(BTreeSet<Role>),
    Authenticated,
}

#[derive(Debug, Default)]
struct Slot {
    public: bool,
    roles: Option<BTreeSet<Role>>,
    authenticated: bool,
}

#[derive(Debug, Default)]
pub struct RoutePoliciesBuilder {
    declarations: Vec<(RouteKey, Declaration)>,
}

impl RoutePoliciesBuilder {
    /// Marks a route as exempt from authentication.
    pub fn public(mut self, method: Method, path: &str) -> Self {
        self.declarations
            .push((RouteKey::new(method, path), Declaration::Public));
        self
    }

    pub fn require_roles(
        mut self,
        method: Method,
        path: &str,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        self.declarations.push((
            RouteKey::new(method, path),
            Declaration::Roles(roles.into_iter().collect()),
        ));
        self
    }

    /// Declares a route open to any authenticated caller. Equivalent to
    /// leaving it out, but keeps the route table explicit.
    pub fn authenticated(mut self, method: Method, path: &str) -> Self {
        self.declarations
            .push((RouteKey::new(method, path), Declaration::Authenticated));
        self
    }

    pub fn build(self) -> Result<RoutePolicies, PolicyError> {
        let mut slots: HashMap<RouteKey, Slot> = HashMap::new();

        for (key, declaration) in self.declarations {
            let slot = slots.entry(key.clone()).or_default();
            let declared_before = slot.authenticated;
            match declaration {
                Declaration::Public => {
                    if slot.public || declared_before {
                        return Err(PolicyError::Duplicate(key));
                    }
                    slot.public = true;
                }
                Declaration::Roles(roles) => {
                    if roles.is_empty() {
                        return Err(PolicyError::EmptyRoles(key));
                    }
                    if slot.roles.is_some() || declared_before {
                        return Err(PolicyError::Duplicate(key));
                    }
                    slot.roles = Some(roles);
                }
                Declaration::Authenticated => {
                    if slot.public || slot.roles.is_some() || declared_before {
                        return Err(PolicyError::Duplicate(key));
                    }
                    slot.authenticated = true;
                }
            }
        }

        let mut routes: HashMap<Method, HashMap<String, RoutePolicy>> = HashMap::new();
        for (key, slot) in slots {
            if slot.public && slot.roles.is_some() {
                return Err(PolicyError::PublicWithRoles(key));
            }
            routes.entry(key.method).or_default().insert(
                key.path,
                RoutePolicy {
                    public: slot.public,
                    roles: slot.roles.unwrap_or_default(),
                },
            );
        }

        Ok(RoutePolicies { routes })
    }
}

/// Immutable route → policy table.
#[derive(Debug, Clone, Default)]
pub struct RoutePolicies {
    routes: HashMap<Method, HashMap<String, RoutePolicy>>,
}

impl RoutePolicies {
    pub fn builder() -> RoutePoliciesBuilder {
        RoutePoliciesBuilder::default()
    }

    pub fn policy(&self, method: &Method, path: &str) -> &RoutePolicy {
        // HEAD is served by GET handlers
        let paths = if *method == Method::HEAD {
            self.routes.get(&Method::GET)
        } else {
            self.routes.get(method)
        };
        paths
            .and_then(|paths| paths.get(path))
            .unwrap_or(&AUTHENTICATED)
    }

    pub fn is_exempt(&self, method: &Method, path: &str) -> bool {
        self.policy(method, path).public
    }

    pub fn required_roles(&self, method: &Method, path: &str) -> &BTreeSet<Role> {
        &self.policy(method, path).roles
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
