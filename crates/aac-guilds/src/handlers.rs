use super::*;
use aac_auth::Auth;
use aac_core::Fault;
use aac_core::ID;
use aac_core::Settings;
use aac_core::Unique;
use aac_players::PlayerRepository;
use actix_web::HttpResponse;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

#[derive(Debug, serde::Deserialize)]
pub struct FounderQuery {
    pub character_name: String,
}

pub async fn create_guild(
    db: web::Data<Arc<Client>>,
    settings: web::Data<Settings>,
    auth: Auth,
    query: web::Query<FounderQuery>,
    req: web::Json<CreateGuildRequest>,
) -> Result<HttpResponse, Fault> {
    let name = Guild::canonical_name(&req.name)?;
    if db.taken(&name).await? {
        return Err(Fault::DuplicateName("guild name already exists"));
    }
    let founder = db
        .get(&query.character_name)
        .await?
        .filter(|c| c.account() == auth.id())
        .ok_or(Fault::NotFound("character not found"))?;
    if db.membership_of(founder.id()).await?.is_some() {
        return Err(Fault::AlreadyMember);
    }
    if founder.level() < settings.guild_min_level {
        return Err(Fault::PolicyViolation(format!(
            "character must be at least level {} to found a guild",
            settings.guild_min_level
        )));
    }
    let description = req.description.clone().filter(|d| !d.is_empty());
    let guild = Guild::found(name, founder.id(), req.motd.clone(), description);
    // the founding statement can still lose a race after the checks above
    match db.found(&guild).await {
        Ok(true) => {}
        Ok(false) => return Err(Fault::DuplicateName("guild name already exists")),
        Err(e) => {
            return match Fault::from(e) {
                Fault::DuplicateName(_) => Err(Fault::AlreadyMember),
                fault => Err(fault),
            };
        }
    }
    log::info!("founded guild {} led by {}", guild.name(), founder.name());
    Ok(HttpResponse::Created().json(GuildResponse::of(&guild, founder.name(), 1)))
}

pub async fn list_guilds(db: web::Data<Arc<Client>>) -> Result<HttpResponse, Fault> {
    let guilds = db.guilds().await?;
    let body: Vec<GuildResponse> = guilds
        .iter()
        .map(|(guild, owner, members)| GuildResponse::of(guild, owner, *members))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

pub async fn get_guild(
    db: web::Data<Arc<Client>>,
    id: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    let id = ID::<Guild>::from(*id);
    let (guild, owner, members) = db
        .guild(id)
        .await?
        .ok_or(Fault::NotFound("guild not found"))?;
    let ranks = db.ranks(id).await?;
    Ok(HttpResponse::Ok().json(GuildDetailResponse::of(&guild, &owner, members, &ranks)))
}

pub async fn update_guild(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    id: web::Path<uuid::Uuid>,
    req: web::Json<UpdateGuildRequest>,
) -> Result<HttpResponse, Fault> {
    let id = ID::<Guild>::from(*id);
    let steward = db
        .steward(id)
        .await?
        .ok_or(Fault::NotFound("guild not found"))?;
    if steward != auth.id() {
        return Err(Fault::Forbidden("only the guild leader's account may do this"));
    }
    let description = req.description.as_ref().map(|inner| inner.as_deref());
    db.update(id, req.motd.as_deref(), description).await?;
    let (guild, owner, members) = db
        .guild(id)
        .await?
        .ok_or(Fault::NotFound("guild not found"))?;
    Ok(HttpResponse::Ok().json(GuildResponse::of(&guild, &owner, members)))
}

pub async fn disband_guild(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    id: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    let id = ID::<Guild>::from(*id);
    let steward = db
        .steward(id)
        .await?
        .ok_or(Fault::NotFound("guild not found"))?;
    if steward != auth.id() {
        return Err(Fault::Forbidden("only the guild leader's account may do this"));
    }
    if !db.disband(id).await? {
        return Err(Fault::NotFound("guild not found"));
    }
    log::info!("disbanded guild {}", id);
    Ok(HttpResponse::NoContent().finish())
}
