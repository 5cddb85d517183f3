use super::*;
use aac_core::Fault;
use aac_core::Unique;
use actix_web::HttpResponse;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

pub async fn register(
    db: web::Data<Arc<Client>>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, Fault> {
    let name = Account::canonical_name(&req.name)?;
    if req.password.len() < 8 {
        return Err(Fault::PolicyViolation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    let hashword = password::hash(&req.password).map_err(|e| Fault::Storage(e.to_string()))?;
    let account = Account::register(name, req.email.clone().filter(|e| !e.is_empty()));
    if !db.register(&account, &hashword).await? {
        return Err(Fault::DuplicateName("account name already exists"));
    }
    log::info!("registered account {}", account.name());
    Ok(HttpResponse::Created().json(AccountResponse::of(&account, 0)))
}

pub async fn login(
    db: web::Data<Arc<Client>>,
    crypto: web::Data<Crypto>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, Fault> {
    let name = req.name.trim().to_lowercase();
    // unknown name and wrong password are deliberately indistinguishable
    let (account, hashword) = db
        .lookup(&name)
        .await?
        .ok_or(Fault::Unauthorized("incorrect account name or password"))?;
    if !password::verify(&req.password, &hashword) {
        return Err(Fault::Unauthorized("incorrect account name or password"));
    }
    if account.blocked() {
        return Err(Fault::Blocked);
    }
    let access = crypto
        .issue_access(account.id())
        .map_err(|e| Fault::Storage(e.to_string()))?;
    let refresh = crypto
        .issue_refresh(account.id())
        .map_err(|e| Fault::Storage(e.to_string()))?;
    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: access,
        refresh_token: refresh,
        token_type: "bearer",
    }))
}

pub async fn me(db: web::Data<Arc<Client>>, auth: Auth) -> Result<HttpResponse, Fault> {
    let characters = db.characters(auth.id()).await?;
    Ok(HttpResponse::Ok().json(AccountResponse::of(auth.account(), characters)))
}

pub async fn update_me(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    req: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse, Fault> {
    if let Some(ref email) = req.email {
        let email = Some(email.as_str()).filter(|e| !e.is_empty());
        db.update_email(auth.id(), email).await?;
    }
    if let Some(ref new) = req.password {
        if new.len() < 8 {
            return Err(Fault::PolicyViolation(
                "password must be at least 8 characters".to_string(),
            ));
        }
        let hashword = password::hash(new).map_err(|e| Fault::Storage(e.to_string()))?;
        db.update_hashword(auth.id(), &hashword).await?;
    }
    let account = db
        .fetch(auth.id())
        .await?
        .ok_or(Fault::NotFound("account not found"))?;
    let characters = db.characters(auth.id()).await?;
    Ok(HttpResponse::Ok().json(AccountResponse::of(&account, characters)))
}

pub async fn change_password(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    req: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, Fault> {
    let current = db
        .hashword(auth.id())
        .await?
        .ok_or(Fault::NotFound("account not found"))?;
    if !password::verify(&req.current_password, &current) {
        return Err(Fault::PolicyViolation(
            "current password is incorrect".to_string(),
        ));
    }
    if req.new_password.len() < 8 {
        return Err(Fault::PolicyViolation(
            "new password must be at least 8 characters".to_string(),
        ));
    }
    let hashword =
        password::hash(&req.new_password).map_err(|e| Fault::Storage(e.to_string()))?;
    db.update_hashword(auth.id(), &hashword).await?;
    Ok(HttpResponse::NoContent().finish())
}
