//! The session-exchange capability the orchestrator is written against.

use wcp_client::{ClusterSession, SessionClient, SessionToken};

/// The two REST exchanges the login flow needs from a client.
///
/// [`SessionClient`] is the production implementation; tests drive the flow
/// with scripted stand-ins.
#[allow(async_fn_in_trait)]
pub trait SessionExchange {
    /// Exchanges a username/password for a supervisor session token.
    async fn login(&mut self, username: &str, password: &str)
    -> wcp_client::Result<SessionToken>;

    /// Exchanges the retained principal for a session scoped to a guest
    /// cluster, optionally within a namespace.
    async fn login_cluster(
        &self,
        cluster: &str,
        namespace: Option<&str>,
    ) -> wcp_client::Result<ClusterSession>;
}

impl SessionExchange for SessionClient {
    async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> wcp_client::Result<SessionToken> {
        SessionClient::login(self, username, password).await
    }

    async fn login_cluster(
        &self,
        cluster: &str,
        namespace: Option<&str>,
    ) -> wcp_client::Result<ClusterSession> {
        SessionClient::login_cluster(self, cluster, namespace).await
    }
}
