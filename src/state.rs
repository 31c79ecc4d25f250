use std::sync::Arc;
use std::time::Instant;

use rampart_auth::PrincipalResolver;
use rampart_config::{CorsConfig, JwtConfig};
use rampart_db::UserRepository;

use crate::middleware::policy::RoutePolicies;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub resolver: PrincipalResolver,
    pub policies: Arc<RoutePolicies>,
    pub cors_config: CorsConfig,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        policies: RoutePolicies,
    ) -> Self {
        Self {
            users,
            resolver: PrincipalResolver::new(jwt_config),
            policies: Arc::new(policies),
            cors_config,
            started_at: Instant::now(),
        }
    }
}
