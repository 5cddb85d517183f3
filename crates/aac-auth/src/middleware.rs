use super::*;
use aac_core::Fault;
use aac_core::ID;
use aac_core::Unique;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio_postgres::Client;

/// Extractor producing the authenticated, authorized account for a request.
///
/// This is the sole place token validity rules are enforced: signature,
/// expiry, kind (`access` only), subject existence, and the blocked gate all
/// live here, and every protected handler receives the result as an explicit
/// argument rather than resolving identity from ambient context.
pub struct Auth(pub Account);

impl Auth {
    pub fn account(&self) -> &Account {
        &self.0
    }
    pub fn id(&self) -> ID<Account> {
        self.0.id()
    }
}

impl FromRequest for Auth {
    type Error = Fault;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Fault>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let crypto = req.app_data::<web::Data<Crypto>>().cloned();
        let db = req.app_data::<web::Data<Arc<Client>>>().cloned();
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_owned());
        Box::pin(async move {
            let header = header.ok_or(Fault::Unauthorized("missing authorization header"))?;
            let token = header
                .strip_prefix("Bearer ")
                .ok_or(Fault::Unauthorized("invalid authorization format"))?;
            let crypto =
                crypto.ok_or_else(|| Fault::Storage("token service not configured".to_string()))?;
            let claims = crypto
                .decode(token)
                .map_err(|_| Fault::Unauthorized("invalid token"))?;
            if claims.kind() != Kind::Access {
                return Err(Fault::Unauthorized("token kind not accepted here"));
            }
            if claims.expired() {
                return Err(Fault::Unauthorized("token expired"));
            }
            let db = db.ok_or_else(|| Fault::Storage("database not configured".to_string()))?;
            let account = db
                .fetch(claims.account())
                .await?
                .ok_or(Fault::Unauthorized("account no longer exists"))?;
            if account.blocked() {
                return Err(Fault::Blocked);
            }
            Ok(Auth(account))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpRequest;
    use actix_web::test::TestRequest;
    use std::time::Duration;

    fn crypto() -> Crypto {
        Crypto::new(
            b"unit-test-secret",
            Duration::from_secs(60),
            Duration::from_secs(3600),
        )
    }

    async fn rejection(req: HttpRequest) -> Fault {
        match Auth::from_request(&req, &mut Payload::None).await {
            Ok(_) => panic!("expected the resolver to reject"),
            Err(fault) => fault,
        }
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let req = TestRequest::default()
            .app_data(web::Data::new(crypto()))
            .to_http_request();
        let fault = rejection(req).await;
        assert_eq!(fault.category(), "unauthorized");
        assert_eq!(fault.to_string(), "missing authorization header");
    }
    #[tokio::test]
    async fn non_bearer_header_is_rejected() {
        let req = TestRequest::default()
            .app_data(web::Data::new(crypto()))
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        let fault = rejection(req).await;
        assert_eq!(fault.to_string(), "invalid authorization format");
    }
    #[tokio::test]
    async fn refresh_token_never_resolves_an_identity() {
        // same secret as the app_data crypto, wrong kind
        let token = crypto().issue_refresh(ID::default()).unwrap();
        let req = TestRequest::default()
            .app_data(web::Data::new(crypto()))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let fault = rejection(req).await;
        assert_eq!(fault.category(), "unauthorized");
        assert_eq!(fault.to_string(), "token kind not accepted here");
    }
    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let req = TestRequest::default()
            .app_data(web::Data::new(crypto()))
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_http_request();
        let fault = rejection(req).await;
        assert_eq!(fault.to_string(), "invalid token");
    }
}
