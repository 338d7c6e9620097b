//! Line protocol spoken with the game server.
//!
//! Inbound lines starting with a known `@tag` carry structured state; every
//! other line is game text. Outbound lines are plain commands.

use crate::app::state::{Skill, Vitals};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Text(String),
    Skills(Vec<Skill>),
    Room(String),
    Character(String),
    Vitals(Vitals),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("skill entry {0:?} is missing a ':' separator")]
    MalformedSkill(String),
    #[error("skill entry {0:?} has an empty key")]
    EmptySkillKey(String),
    #[error("vitals need four numbers, got {0:?}")]
    MalformedVitals(String),
}

/// Parse one inbound line. Unknown tags are plain text; a known tag with a
/// bad payload is an error so the caller can log it.
pub fn parse_line(line: &str) -> Result<ServerMessage, ProtocolError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(tagged) = line.strip_prefix('@') else {
        return Ok(ServerMessage::Text(line.to_string()));
    };
    let (tag, payload) = tagged.split_once(' ').unwrap_or((tagged, ""));
    match tag {
        "skills" => parse_skills(payload).map(ServerMessage::Skills),
        "room" => Ok(ServerMessage::Room(payload.trim().to_string())),
        "character" => Ok(ServerMessage::Character(payload.trim().to_string())),
        "vitals" => parse_vitals(payload).map(ServerMessage::Vitals),
        _ => Ok(ServerMessage::Text(line.to_string())),
    }
}

/// `<key>:<name>|<key>:<name>...`, order preserved, duplicates kept.
pub fn parse_skills(payload: &str) -> Result<Vec<Skill>, ProtocolError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    payload
        .split('|')
        .map(|entry| {
            let (key, name) = entry
                .split_once(':')
                .ok_or_else(|| ProtocolError::MalformedSkill(entry.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ProtocolError::EmptySkillKey(entry.to_string()));
            }
            Ok(Skill::new(key, name.trim()))
        })
        .collect()
}

fn parse_vitals(payload: &str) -> Result<Vitals, ProtocolError> {
    let nums: Vec<u32> = payload
        .split_whitespace()
        .map(|n| n.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| ProtocolError::MalformedVitals(payload.to_string()))?;
    match nums.as_slice() {
        [hp, max_hp, mp, max_mp] => Ok(Vitals {
            hp: *hp,
            max_hp: *max_hp,
            mp: *mp,
            max_mp: *max_mp,
        }),
        _ => Err(ProtocolError::MalformedVitals(payload.to_string())),
    }
}

/// Frame an outbound command. Embedded line breaks are dropped so one
/// command is always exactly one line on the wire.
pub fn encode_command(command: &str) -> String {
    let mut line: String = command.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    line.push('\n');
    line
}

pub fn encode_login(character: &str) -> String {
    encode_command(&format!("@login {}", character))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skills_preserves_order_and_duplicates() {
        let msg = parse_line("@skills 1:Fireball|2:Heal|3:Heal\r").unwrap();
        assert_eq!(
            msg,
            ServerMessage::Skills(vec![
                Skill::new("1", "Fireball"),
                Skill::new("2", "Heal"),
                Skill::new("3", "Heal"),
            ])
        );
    }

    #[test]
    fn test_parse_skills_name_may_contain_colon() {
        let skills = parse_skills("7:Rune: Ward").unwrap();
        assert_eq!(skills, vec![Skill::new("7", "Rune: Ward")]);
    }

    #[test]
    fn test_parse_empty_skills() {
        assert_eq!(parse_line("@skills").unwrap(), ServerMessage::Skills(vec![]));
        assert_eq!(parse_line("@skills   ").unwrap(), ServerMessage::Skills(vec![]));
    }

    #[test]
    fn test_parse_malformed_skills() {
        assert_eq!(
            parse_line("@skills 1:Fireball|Heal"),
            Err(ProtocolError::MalformedSkill("Heal".into()))
        );
        assert_eq!(
            parse_skills(":Heal"),
            Err(ProtocolError::EmptySkillKey(":Heal".into()))
        );
    }

    #[test]
    fn test_parse_state_tags() {
        assert_eq!(
            parse_line("@room The Rusty Tankard").unwrap(),
            ServerMessage::Room("The Rusty Tankard".into())
        );
        assert_eq!(
            parse_line("@character Brannoc").unwrap(),
            ServerMessage::Character("Brannoc".into())
        );
        assert_eq!(
            parse_line("@vitals 20 30 5 10").unwrap(),
            ServerMessage::Vitals(Vitals {
                hp: 20,
                max_hp: 30,
                mp: 5,
                max_mp: 10
            })
        );
        assert!(parse_line("@vitals 20 x 5 10").is_err());
        assert!(parse_line("@vitals 20 30").is_err());
    }

    #[test]
    fn test_plain_and_unknown_lines_are_text() {
        assert_eq!(
            parse_line("A goblin snarls.").unwrap(),
            ServerMessage::Text("A goblin snarls.".into())
        );
        assert_eq!(
            parse_line("@someone waves").unwrap(),
            ServerMessage::Text("@someone waves".into())
        );
    }

    #[test]
    fn test_encode_command_is_one_line() {
        assert_eq!(encode_command("fireball"), "fireball\n");
        assert_eq!(encode_command("say hi\nquit"), "say hiquit\n");
        assert_eq!(encode_login("Brannoc"), "@login Brannoc\n");
    }
}
