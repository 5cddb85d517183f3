use super::*;
use aac_auth::Auth;
use aac_core::Fault;
use aac_core::ID;
use aac_core::Settings;
use actix_web::HttpResponse;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

const NEWS_DEFAULT: i64 = 10;
const NEWS_MAX: i64 = 50;

fn gatekeep(auth: &Auth, settings: &Settings) -> Result<(), Fault> {
    match auth.account().is_admin(settings.admin_tier) {
        true => Ok(()),
        false => Err(Fault::Forbidden("admin tier required")),
    }
}

pub async fn post_news(
    db: web::Data<Arc<Client>>,
    settings: web::Data<Settings>,
    auth: Auth,
    req: web::Json<CreateNewsRequest>,
) -> Result<HttpResponse, Fault> {
    gatekeep(&auth, &settings)?;
    if req.title.trim().is_empty() || req.body.trim().is_empty() {
        return Err(Fault::PolicyViolation(
            "title and body must not be empty".to_string(),
        ));
    }
    let news = News::post(
        req.title.clone(),
        req.body.clone(),
        auth.id(),
        req.category.clone(),
        req.icon.clone().filter(|i| !i.is_empty()),
        req.hidden,
    );
    db.post(&news).await?;
    log::info!("posted news {}", news.title());
    Ok(HttpResponse::Created().json(NewsResponse::of(&news, auth.account().name())))
}

pub async fn amend_news(
    db: web::Data<Arc<Client>>,
    settings: web::Data<Settings>,
    auth: Auth,
    id: web::Path<uuid::Uuid>,
    req: web::Json<UpdateNewsRequest>,
) -> Result<HttpResponse, Fault> {
    gatekeep(&auth, &settings)?;
    let id = ID::<News>::from(*id);
    if !db
        .amend(
            id,
            req.title.as_deref(),
            req.body.as_deref(),
            req.category.as_deref(),
            req.icon.as_deref(),
            req.hidden,
        )
        .await?
    {
        return Err(Fault::NotFound("news post not found"));
    }
    Ok(HttpResponse::NoContent().finish())
}

pub async fn retract_news(
    db: web::Data<Arc<Client>>,
    settings: web::Data<Settings>,
    auth: Auth,
    id: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    gatekeep(&auth, &settings)?;
    let id = ID::<News>::from(*id);
    if !db.retract(id).await? {
        return Err(Fault::NotFound("news post not found"));
    }
    log::info!("retracted news {}", id);
    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, serde::Deserialize)]
pub struct NewsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_news(
    db: web::Data<Arc<Client>>,
    query: web::Query<NewsQuery>,
) -> Result<HttpResponse, Fault> {
    let limit = query.limit.unwrap_or(NEWS_DEFAULT).clamp(1, NEWS_MAX);
    let offset = query.offset.unwrap_or(0).max(0);
    let posts = db.posts(limit, offset).await?;
    let body: Vec<NewsResponse> = posts
        .iter()
        .map(|(news, author)| NewsResponse::of(news, author))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

pub async fn get_news(
    db: web::Data<Arc<Client>>,
    id: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    let id = ID::<News>::from(*id);
    let (news, author) = db
        .post_of(id)
        .await?
        .ok_or(Fault::NotFound("news post not found"))?;
    Ok(HttpResponse::Ok().json(NewsResponse::of(&news, &author)))
}
