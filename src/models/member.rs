// Roster member model
// Matches the roster.json document structure

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role class of a roster member
///
/// Serialized as its display string. Anything outside the known set is kept
/// verbatim in `Other` so hand-edited files still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Class {
    Tank,
    MeleeDps,
    RangedDps,
    Healer,
    Other(String),
}

impl Class {
    /// Known classes in display order
    pub const ORDERED: [Class; 4] = [Class::Tank, Class::MeleeDps, Class::RangedDps, Class::Healer];

    pub fn as_str(&self) -> &str {
        match self {
            Class::Tank => "Tanque",
            Class::MeleeDps => "CaC DPS",
            Class::RangedDps => "Rango DPS",
            Class::Healer => "Sanador",
            Class::Other(name) => name,
        }
    }
}

impl From<String> for Class {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Tanque" => Class::Tank,
            "CaC DPS" => Class::MeleeDps,
            "Rango DPS" => Class::RangedDps,
            "Sanador" => Class::Healer,
            _ => Class::Other(value),
        }
    }
}

impl From<Class> for String {
    fn from(value: Class) -> Self {
        match value {
            Class::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weapon a member can carry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Weapon {
    Greatsword,
    SwordAndShield,
    Staff,
    Wand,
    Daggers,
    Longbow,
    Crossbow,
    Spear,
    Other(String),
}

impl Weapon {
    pub fn as_str(&self) -> &str {
        match self {
            Weapon::Greatsword => "Espadon",
            Weapon::SwordAndShield => "Espada/escudo",
            Weapon::Staff => "Baston",
            Weapon::Wand => "Varita",
            Weapon::Daggers => "Dagas",
            Weapon::Longbow => "Arco",
            Weapon::Crossbow => "Ballesta",
            Weapon::Spear => "Lanza",
            Weapon::Other(name) => name,
        }
    }
}

impl From<String> for Weapon {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Espadon" => Weapon::Greatsword,
            "Espada/escudo" => Weapon::SwordAndShield,
            "Baston" => Weapon::Staff,
            "Varita" => Weapon::Wand,
            "Dagas" => Weapon::Daggers,
            "Arco" => Weapon::Longbow,
            "Ballesta" => Weapon::Crossbow,
            "Lanza" => Weapon::Spear,
            _ => Weapon::Other(value),
        }
    }
}

impl From<Weapon> for String {
    fn from(value: Weapon) -> Self {
        match value {
            Weapon::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "nick")]
    pub nickname: String,
    #[serde(rename = "clase")]
    pub class: Class,
    #[serde(rename = "arma1")]
    pub weapon1: Weapon,
    #[serde(rename = "arma2")]
    pub weapon2: Weapon,
}

impl Member {
    pub fn new(nickname: impl Into<String>, class: Class, weapon1: Weapon, weapon2: Weapon) -> Self {
        Self {
            nickname: nickname.into(),
            class,
            weapon1,
            weapon2,
        }
    }

    fn has_nickname(&self, nickname: &str) -> bool {
        self.nickname.to_lowercase() == nickname.to_lowercase()
    }
}

/// Outcome of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Added,
    Updated,
}

/// Ordered list of members, keyed case-insensitively by nickname
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Replace the member with the same nickname in place, or append
    pub fn upsert(&mut self, member: Member) -> Upsert {
        match self.members.iter_mut().find(|m| m.has_nickname(&member.nickname)) {
            Some(existing) => {
                *existing = member;
                Upsert::Updated
            }
            None => {
                self.members.push(member);
                Upsert::Added
            }
        }
    }

    /// Drop every member whose nickname matches; true if anything was removed
    pub fn remove(&mut self, nickname: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| !m.has_nickname(nickname));
        self.members.len() < before
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Members bucketed by class in display order, skipping empty buckets.
    /// Unrecognized classes share the trailing "Otros" bucket.
    pub fn grouped_by_class(&self) -> Vec<(ClassBucket, Vec<&Member>)> {
        let mut known: Vec<(ClassBucket, Vec<&Member>)> = Class::ORDERED
            .iter()
            .map(|class| (ClassBucket::Known(class.clone()), Vec::new()))
            .collect();
        let mut others = Vec::new();

        for member in &self.members {
            match known.iter_mut().find(|(bucket, _)| bucket.matches(&member.class)) {
                Some((_, bucket)) => bucket.push(member),
                None => others.push(member),
            }
        }

        known.push((ClassBucket::Others, others));
        known.retain(|(_, members)| !members.is_empty());
        known
    }
}

/// Display group a member falls into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassBucket {
    Known(Class),
    Others,
}

impl ClassBucket {
    pub fn label(&self) -> &str {
        match self {
            ClassBucket::Known(class) => class.as_str(),
            ClassBucket::Others => "Otros",
        }
    }

    fn matches(&self, class: &Class) -> bool {
        matches!(self, ClassBucket::Known(known) if known == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(nick: &str, class: Class) -> Member {
        Member::new(nick, class, Weapon::Greatsword, Weapon::Spear)
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut roster = Roster::default();
        assert_eq!(roster.upsert(member("Draco", Class::Tank)), Upsert::Added);
        assert_eq!(roster.upsert(member("Luna", Class::Healer)), Upsert::Added);

        let replaced = roster.upsert(member("DRACO", Class::RangedDps));
        assert_eq!(replaced, Upsert::Updated);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.members()[0].nickname, "DRACO");
        assert_eq!(roster.members()[0].class, Class::RangedDps);
        assert_eq!(roster.members()[1].nickname, "Luna");
    }

    #[test]
    fn test_remove_is_case_insensitive() {
        let mut roster = Roster::new(vec![member("Draco", Class::Tank), member("Luna", Class::Healer)]);
        assert!(roster.remove("draco"));
        assert_eq!(roster.len(), 1);
        assert!(!roster.remove("nobody"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_grouping_skips_empty_classes() {
        let roster = Roster::new(vec![
            member("Luna", Class::Healer),
            member("Draco", Class::Tank),
            member("Kai", Class::Healer),
        ]);
        let groups = roster.grouped_by_class();
        let labels: Vec<&str> = groups.iter().map(|(b, _)| b.label()).collect();
        assert_eq!(labels, vec!["Tanque", "Sanador"]);
        assert_eq!(groups[1].1.len(), 2);
        assert_eq!(groups[1].1[0].nickname, "Luna");
    }

    #[test]
    fn test_unknown_class_goes_last() {
        let roster = Roster::new(vec![
            member("Bard", Class::from("Bardo".to_string())),
            member("Draco", Class::MeleeDps),
        ]);
        let groups = roster.grouped_by_class();
        assert_eq!(groups[0].0.label(), "CaC DPS");
        assert_eq!(groups[1].0, ClassBucket::Others);
        assert_eq!(groups[1].1[0].nickname, "Bard");
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(member("Draco", Class::RangedDps)).unwrap();
        assert_eq!(json["nick"], "Draco");
        assert_eq!(json["clase"], "Rango DPS");
        assert_eq!(json["arma1"], "Espadon");
        assert_eq!(json["arma2"], "Lanza");

        let back: Member = serde_json::from_value(json).unwrap();
        assert_eq!(back.class, Class::RangedDps);
    }
}
