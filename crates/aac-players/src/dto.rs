use super::*;
use aac_core::Unique;

#[derive(Debug, serde::Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub vocation: i16,
    pub sex: i16,
}

/// Summary shape for lists and search results.
#[derive(Debug, serde::Serialize)]
pub struct CharacterResponse {
    pub id: String,
    pub name: String,
    pub level: i32,
    pub vocation: i16,
    pub vocation_name: &'static str,
    pub sex: i16,
    pub health: i32,
    pub healthmax: i32,
    pub mana: i32,
    pub manamax: i32,
    pub experience: i64,
    pub online: bool,
}

impl CharacterResponse {
    pub fn of(character: &Character) -> Self {
        let (health, healthmax) = character.health();
        let (mana, manamax) = character.mana();
        Self {
            id: character.id().to_string(),
            name: character.name().to_string(),
            level: character.level(),
            vocation: character.vocation().into(),
            vocation_name: character.vocation().name(),
            sex: character.sex().into(),
            health,
            healthmax,
            mana,
            manamax,
            experience: character.experience(),
            online: character.online(),
        }
    }
}

/// Full shape for the owner-only detail view.
#[derive(Debug, serde::Serialize)]
pub struct CharacterDetailResponse {
    #[serde(flatten)]
    pub summary: CharacterResponse,
    pub maglevel: i32,
    pub soul: i32,
    pub cap: i32,
    pub skill_fist: i32,
    pub skill_club: i32,
    pub skill_sword: i32,
    pub skill_axe: i32,
    pub skill_dist: i32,
    pub skill_shielding: i32,
    pub skill_fishing: i32,
    pub created_at: i64,
}

impl CharacterDetailResponse {
    pub fn of(character: &Character) -> Self {
        let skills = character.skills();
        Self {
            summary: CharacterResponse::of(character),
            maglevel: character.maglevel(),
            soul: character.soul(),
            cap: character.cap(),
            skill_fist: skills.fist,
            skill_club: skills.club,
            skill_sword: skills.sword,
            skill_axe: skills.axe,
            skill_dist: skills.dist,
            skill_shielding: skills.shielding,
            skill_fishing: skills.fishing,
            created_at: aac_core::epoch_secs(character.created()),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct HighscoreEntry {
    pub rank: usize,
    pub name: String,
    pub level: i32,
    pub vocation: i16,
    pub vocation_name: &'static str,
    pub value: i64,
}

impl HighscoreEntry {
    pub fn of(rank: usize, character: &Character, board: Board) -> Self {
        Self {
            rank,
            name: character.name().to_string(),
            level: character.level(),
            vocation: character.vocation().into(),
            vocation_name: character.vocation().name(),
            value: board.of(character),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct DeathResponse {
    pub id: String,
    pub player_name: String,
    pub time: i64,
    pub level: i32,
    pub killed_by: String,
    pub is_player: bool,
    pub mostdamage_by: Option<String>,
    pub mostdamage_is_player: Option<bool>,
}

impl DeathResponse {
    pub fn of(death: &Death, player_name: &str) -> Self {
        Self {
            id: death.id().to_string(),
            player_name: player_name.to_string(),
            time: aac_core::epoch_secs(death.died_at()),
            level: death.level(),
            killed_by: death.killed_by().to_string(),
            is_player: death.by_player(),
            mostdamage_by: death.mostdamage_by().map(str::to_string),
            mostdamage_is_player: death.mostdamage_by_player(),
        }
    }
}
