// Roster slash commands
// Thin poise wrappers, the logic lives in roster_helpers

use poise::serenity_prelude as serenity;

use crate::api::discord::PoiseResponder;
use crate::commands::roster_helpers;
use crate::models::member::{Class, Member, Weapon};
use crate::{Context, Error};

/// Class choices offered by /añadirmiembro
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum ClassChoice {
    #[name = "Tanque"]
    Tank,
    #[name = "CaC DPS"]
    MeleeDps,
    #[name = "Rango DPS"]
    RangedDps,
    #[name = "Sanador"]
    Healer,
}

impl From<ClassChoice> for Class {
    fn from(choice: ClassChoice) -> Self {
        match choice {
            ClassChoice::Tank => Class::Tank,
            ClassChoice::MeleeDps => Class::MeleeDps,
            ClassChoice::RangedDps => Class::RangedDps,
            ClassChoice::Healer => Class::Healer,
        }
    }
}

/// Weapon choices offered by /añadirmiembro
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum WeaponChoice {
    #[name = "Espadon"]
    Greatsword,
    #[name = "Espada/escudo"]
    SwordAndShield,
    #[name = "Baston"]
    Staff,
    #[name = "Varita"]
    Wand,
    #[name = "Dagas"]
    Daggers,
    #[name = "Arco"]
    Longbow,
    #[name = "Ballesta"]
    Crossbow,
    #[name = "Lanza"]
    Spear,
}

impl From<WeaponChoice> for Weapon {
    fn from(choice: WeaponChoice) -> Self {
        match choice {
            WeaponChoice::Greatsword => Weapon::Greatsword,
            WeaponChoice::SwordAndShield => Weapon::SwordAndShield,
            WeaponChoice::Staff => Weapon::Staff,
            WeaponChoice::Wand => Weapon::Wand,
            WeaponChoice::Daggers => Weapon::Daggers,
            WeaponChoice::Longbow => Weapon::Longbow,
            WeaponChoice::Crossbow => Weapon::Crossbow,
            WeaponChoice::Spear => Weapon::Spear,
        }
    }
}

/// Establece el canal para mostrar el roster
#[poise::command(
    slash_command,
    rename = "canalroster",
    required_permissions = "ADMINISTRATOR"
)]
pub async fn set_roster_channel(
    ctx: Context<'_>,
    #[rename = "canal"]
    #[description = "El canal donde se mostrará el roster"]
    channel: serenity::Channel,
) -> Result<(), Error> {
    roster_helpers::set_channel(&ctx.data().state, &PoiseResponder::new(ctx), channel.id()).await
}

/// Añade un miembro al roster
#[poise::command(slash_command, rename = "añadirmiembro")]
pub async fn add_member(
    ctx: Context<'_>,
    #[description = "Nickname del personaje"] nick: String,
    #[rename = "clase"]
    #[description = "Clase del personaje"]
    class: ClassChoice,
    #[rename = "arma1"]
    #[description = "Primera arma del personaje"]
    weapon1: WeaponChoice,
    #[rename = "arma2"]
    #[description = "Segunda arma del personaje"]
    weapon2: WeaponChoice,
) -> Result<(), Error> {
    let member = Member::new(nick, class.into(), weapon1.into(), weapon2.into());
    roster_helpers::add_member(&ctx.data().state, &PoiseResponder::new(ctx), member).await
}

/// Elimina un miembro del roster
#[poise::command(slash_command, rename = "eliminarmiembro")]
pub async fn remove_member(
    ctx: Context<'_>,
    #[description = "Nickname del personaje a eliminar"] nick: String,
) -> Result<(), Error> {
    roster_helpers::remove_member(&ctx.data().state, &PoiseResponder::new(ctx), &nick).await
}

/// Muestra el roster actual
#[poise::command(slash_command, rename = "mostrarroster")]
pub async fn show_roster(ctx: Context<'_>) -> Result<(), Error> {
    roster_helpers::show_config(&ctx.data().state, &PoiseResponder::new(ctx)).await
}

/// Elimina todos los miembros del roster
#[poise::command(
    slash_command,
    rename = "limpiarroster",
    required_permissions = "ADMINISTRATOR"
)]
pub async fn clear_roster(ctx: Context<'_>) -> Result<(), Error> {
    roster_helpers::clear_roster(&ctx.data().state, &PoiseResponder::new(ctx)).await
}

/// Fuerza la actualización del roster en el canal configurado
#[poise::command(
    slash_command,
    rename = "actualizarroster",
    required_permissions = "ADMINISTRATOR"
)]
pub async fn force_update(ctx: Context<'_>) -> Result<(), Error> {
    roster_helpers::force_update(&ctx.data().state, &PoiseResponder::new(ctx)).await
}
