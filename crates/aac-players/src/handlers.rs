use super::*;
use aac_auth::Auth;
use aac_core::Fault;
use aac_core::Settings;
use aac_core::Unique;
use actix_web::HttpResponse;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

const SEARCH_LIMIT: i64 = 50;
const DEATHS_DEFAULT: i64 = 50;
const DEATHS_MAX: i64 = 200;
const CHARACTER_DEATHS_DEFAULT: i64 = 20;
const CHARACTER_DEATHS_MAX: i64 = 100;
const HIGHSCORES_DEFAULT: i64 = 100;
const HIGHSCORES_MAX: i64 = 500;

/// Out-of-range limits clamp silently instead of erroring.
fn clamped(requested: Option<i64>, fallback: i64, max: i64) -> i64 {
    requested.unwrap_or(fallback).clamp(1, max)
}

pub async fn create_character(
    db: web::Data<Arc<Client>>,
    settings: web::Data<Settings>,
    auth: Auth,
    req: web::Json<CreateCharacterRequest>,
) -> Result<HttpResponse, Fault> {
    let name = Character::canonical_name(&req.name)?;
    let vocation = Vocation::try_from(req.vocation)?;
    let sex = Sex::try_from(req.sex)?;
    let character = Character::create(name, auth.id(), vocation, sex);
    if !db.create(&character, settings.character_limit).await? {
        // the guarded insert wrote nothing; figure out which gate closed
        return match db.get(character.name()).await? {
            Some(_) => Err(Fault::DuplicateName("character name already exists")),
            None => Err(Fault::LimitExceeded(format!(
                "account may have at most {} characters",
                settings.character_limit
            ))),
        };
    }
    log::info!("created character {}", character.name());
    Ok(HttpResponse::Created().json(CharacterResponse::of(&character)))
}

pub async fn list_characters(
    db: web::Data<Arc<Client>>,
    auth: Auth,
) -> Result<HttpResponse, Fault> {
    let characters = db.list(auth.id()).await?;
    let body: Vec<CharacterResponse> = characters.iter().map(CharacterResponse::of).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub async fn get_character(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    name: web::Path<String>,
) -> Result<HttpResponse, Fault> {
    let character = db
        .get(&name)
        .await?
        .ok_or(Fault::NotFound("character not found"))?;
    if character.account() != auth.id() {
        return Err(Fault::Forbidden("character belongs to another account"));
    }
    Ok(HttpResponse::Ok().json(CharacterDetailResponse::of(&character)))
}

pub async fn delete_character(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    name: web::Path<String>,
) -> Result<HttpResponse, Fault> {
    let character = db
        .get(&name)
        .await?
        .ok_or(Fault::NotFound("character not found"))?;
    if character.account() != auth.id() {
        return Err(Fault::Forbidden("character belongs to another account"));
    }
    if !db.soft_delete(character.id()).await? {
        // the guarded update wrote nothing: either a guild leadership
        // appeared or a concurrent delete got there first
        return match db.leads_guild(character.id()).await? {
            true => Err(Fault::LeadershipConflict),
            false => Err(Fault::NotFound("character not found")),
        };
    }
    log::info!("deleted character {}", character.name());
    Ok(HttpResponse::NoContent().finish())
}

pub async fn search_characters(
    db: web::Data<Arc<Client>>,
    settings: web::Data<Settings>,
    query: web::Path<String>,
) -> Result<HttpResponse, Fault> {
    let query = query.trim();
    if query.chars().count() < settings.search_min_chars {
        return Err(Fault::PolicyViolation(format!(
            "search query must be at least {} characters",
            settings.search_min_chars
        )));
    }
    let characters = db.search(query, SEARCH_LIMIT).await?;
    let body: Vec<CharacterResponse> = characters.iter().map(CharacterResponse::of).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[derive(Debug, serde::Deserialize)]
pub struct HighscoresQuery {
    pub vocation: Option<i16>,
    pub limit: Option<i64>,
}

async fn ranked(
    db: &Arc<Client>,
    board: Board,
    query: &HighscoresQuery,
) -> Result<HttpResponse, Fault> {
    let vocation = query.vocation.map(Vocation::try_from).transpose()?;
    let limit = clamped(query.limit, HIGHSCORES_DEFAULT, HIGHSCORES_MAX);
    let characters = db.highscores(board, vocation, limit).await?;
    let body: Vec<HighscoreEntry> = characters
        .iter()
        .enumerate()
        .map(|(i, c)| HighscoreEntry::of(i + 1, c, board))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

pub async fn highscores_experience(
    db: web::Data<Arc<Client>>,
    query: web::Query<HighscoresQuery>,
) -> Result<HttpResponse, Fault> {
    ranked(&db, Board::Experience, &query).await
}

pub async fn highscores_magic(
    db: web::Data<Arc<Client>>,
    query: web::Query<HighscoresQuery>,
) -> Result<HttpResponse, Fault> {
    ranked(&db, Board::Magic, &query).await
}

pub async fn highscores_skill(
    db: web::Data<Arc<Client>>,
    skill: web::Path<String>,
    query: web::Query<HighscoresQuery>,
) -> Result<HttpResponse, Fault> {
    let skill = skill.parse::<Skill>()?;
    ranked(&db, Board::Skill(skill), &query).await
}

#[derive(Debug, serde::Deserialize)]
pub struct DeathsQuery {
    pub limit: Option<i64>,
    pub player_name: Option<String>,
}

pub async fn recent_deaths(
    db: web::Data<Arc<Client>>,
    query: web::Query<DeathsQuery>,
) -> Result<HttpResponse, Fault> {
    let limit = clamped(query.limit, DEATHS_DEFAULT, DEATHS_MAX);
    let deaths = db
        .recent_deaths(limit, query.player_name.as_deref())
        .await?;
    let body: Vec<DeathResponse> = deaths
        .iter()
        .map(|(death, name)| DeathResponse::of(death, name))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

#[derive(Debug, serde::Deserialize)]
pub struct CharacterDeathsQuery {
    pub limit: Option<i64>,
}

pub async fn character_deaths(
    db: web::Data<Arc<Client>>,
    name: web::Path<String>,
    query: web::Query<CharacterDeathsQuery>,
) -> Result<HttpResponse, Fault> {
    let limit = clamped(query.limit, CHARACTER_DEATHS_DEFAULT, CHARACTER_DEATHS_MAX);
    // unknown characters yield an empty list rather than a 404
    let body: Vec<DeathResponse> = match db.get(&name).await? {
        None => Vec::new(),
        Some(character) => db
            .deaths_of(character.id(), limit)
            .await?
            .iter()
            .map(|death| DeathResponse::of(death, character.name()))
            .collect(),
    };
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_limits_take_the_default() {
        assert_eq!(clamped(None, DEATHS_DEFAULT, DEATHS_MAX), 50);
        assert_eq!(clamped(None, HIGHSCORES_DEFAULT, HIGHSCORES_MAX), 100);
    }
    #[test]
    fn oversized_limits_clamp_to_the_cap() {
        assert_eq!(clamped(Some(9999), DEATHS_DEFAULT, DEATHS_MAX), 200);
        assert_eq!(clamped(Some(9999), HIGHSCORES_DEFAULT, HIGHSCORES_MAX), 500);
        assert_eq!(
            clamped(Some(9999), CHARACTER_DEATHS_DEFAULT, CHARACTER_DEATHS_MAX),
            100
        );
    }
    #[test]
    fn nonpositive_limits_clamp_to_one() {
        assert_eq!(clamped(Some(0), DEATHS_DEFAULT, DEATHS_MAX), 1);
        assert_eq!(clamped(Some(-5), HIGHSCORES_DEFAULT, HIGHSCORES_MAX), 1);
    }
}
