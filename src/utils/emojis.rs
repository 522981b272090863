// Icon and colour tables for roster rendering

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::member::{Class, ClassBucket, Weapon};

/// Icon used for anything missing from the tables
pub const FALLBACK_ICON: &str = "🔮";

/// Colour used for anything missing from the class table
pub const FALLBACK_COLOR: u32 = 0xFFFFFF;

pub struct ClassStyle {
    pub icon: &'static str,
    pub color: u32,
}

static CLASS_STYLES: Lazy<HashMap<Class, ClassStyle>> = Lazy::new(|| {
    HashMap::from([
        (Class::Tank, ClassStyle { icon: "🛡️", color: 0x0000FF }),
        (Class::MeleeDps, ClassStyle { icon: "⚔️", color: 0xFF0000 }),
        (Class::RangedDps, ClassStyle { icon: "🏹", color: 0x800080 }),
        (Class::Healer, ClassStyle { icon: "💖", color: 0x00FF00 }),
    ])
});

static WEAPON_ICONS: Lazy<HashMap<Weapon, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (Weapon::Greatsword, "🗡️"),
        (Weapon::SwordAndShield, "🛡️"),
        (Weapon::Staff, "🪄"),
        (Weapon::Wand, "✨"),
        (Weapon::Daggers, "🔪"),
        (Weapon::Longbow, "🏹"),
        (Weapon::Crossbow, "🏹"),
        (Weapon::Spear, "🔱"),
    ])
});

fn class_style(bucket: &ClassBucket) -> Option<&'static ClassStyle> {
    match bucket {
        ClassBucket::Known(class) => CLASS_STYLES.get(class),
        ClassBucket::Others => None,
    }
}

pub fn class_icon(bucket: &ClassBucket) -> &'static str {
    class_style(bucket).map(|s| s.icon).unwrap_or(FALLBACK_ICON)
}

pub fn class_color(bucket: &ClassBucket) -> u32 {
    class_style(bucket).map(|s| s.color).unwrap_or(FALLBACK_COLOR)
}

pub fn weapon_icon(weapon: &Weapon) -> &'static str {
    WEAPON_ICONS.get(weapon).copied().unwrap_or(FALLBACK_ICON)
}
