use crate::Character;
use aac_core::Fault;

/// One of the seven trainable skills, parsed from a URL segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skill {
    Fist,
    Club,
    Sword,
    Axe,
    Dist,
    Shielding,
    Fishing,
}

impl Skill {
    /// Column name in the players table. Safe to splice into SQL because it
    /// only ever comes from this enum.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Fist => "skill_fist",
            Self::Club => "skill_club",
            Self::Sword => "skill_sword",
            Self::Axe => "skill_axe",
            Self::Dist => "skill_dist",
            Self::Shielding => "skill_shielding",
            Self::Fishing => "skill_fishing",
        }
    }
    pub fn of(&self, character: &Character) -> i32 {
        let skills = character.skills();
        match self {
            Self::Fist => skills.fist,
            Self::Club => skills.club,
            Self::Sword => skills.sword,
            Self::Axe => skills.axe,
            Self::Dist => skills.dist,
            Self::Shielding => skills.shielding,
            Self::Fishing => skills.fishing,
        }
    }
}

impl std::str::FromStr for Skill {
    type Err = Fault;
    fn from_str(s: &str) -> Result<Self, Fault> {
        match s.to_lowercase().as_str() {
            "fist" => Ok(Self::Fist),
            "club" => Ok(Self::Club),
            "sword" => Ok(Self::Sword),
            "axe" => Ok(Self::Axe),
            "dist" | "distance" => Ok(Self::Dist),
            "shielding" => Ok(Self::Shielding),
            "fishing" => Ok(Self::Fishing),
            _ => Err(Fault::PolicyViolation(
                "invalid skill name; valid skills: fist, club, sword, axe, dist, shielding, fishing"
                    .to_string(),
            )),
        }
    }
}

/// A ranking board: what the highscore list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Experience,
    Magic,
    Skill(Skill),
}

impl Board {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Magic => "maglevel",
            Self::Skill(skill) => skill.column(),
        }
    }
    /// The ranked value for one character on this board.
    pub fn of(&self, character: &Character) -> i64 {
        match self {
            Self::Experience => character.experience(),
            Self::Magic => character.maglevel() as i64,
            Self::Skill(skill) => skill.of(character) as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_parse_case_insensitively() {
        assert_eq!("Sword".parse::<Skill>().unwrap(), Skill::Sword);
        assert_eq!("FISHING".parse::<Skill>().unwrap(), Skill::Fishing);
    }
    #[test]
    fn distance_is_an_alias() {
        assert_eq!("distance".parse::<Skill>().unwrap(), Skill::Dist);
        assert_eq!("dist".parse::<Skill>().unwrap(), Skill::Dist);
    }
    #[test]
    fn unknown_skills_are_rejected() {
        assert!("swordfish".parse::<Skill>().is_err());
        assert!("".parse::<Skill>().is_err());
    }
    #[test]
    fn board_columns_exist_in_the_schema() {
        assert_eq!(Board::Experience.column(), "experience");
        assert_eq!(Board::Magic.column(), "maglevel");
        assert_eq!(Board::Skill(Skill::Shielding).column(), "skill_shielding");
    }
}
