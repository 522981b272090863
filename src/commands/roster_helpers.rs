// Shared logic behind the roster commands
// Kept apart from the poise wrappers so it runs without a gateway

use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::info;

use crate::api::discord::Responder;
use crate::features::roster_display::{request_render, update_roster_display};
use crate::models::member::{Member, Upsert};
use crate::state::AppState;
use crate::utils::formatters::channel_mention;
use crate::Error;

pub const ADMIN_REQUIRED: &str = "Necesitas permisos de administrador para usar este comando.";
pub const UNKNOWN_COMMAND: &str = "Comando desconocido.";
pub const COMMAND_FAILED: &str = "Ha ocurrido un error al procesar el comando.";
pub const NO_CHANNEL: &str =
    "No hay un canal de roster configurado. Usa `/canalroster` para configurar uno.";
pub const CHANNEL_GONE: &str =
    "No se pudo encontrar el canal de roster configurado. Es posible que haya sido eliminado.";
pub const UPDATING: &str = "Actualizando el roster...";
pub const UPDATE_FAILED: &str =
    "Hubo un problema al actualizar el roster. Verifica los permisos del bot.";
pub const ROSTER_CLEARED: &str = "Roster limpiado completamente.";

/// Write the current roster to disk; a concurrent change is saved along with it
async fn save_roster(state: &AppState) {
    let roster = state.roster.read().await;
    state.store.save_roster(&roster);
}

pub async fn set_channel(
    state: &Arc<AppState>,
    responder: &dyn Responder,
    channel_id: serenity::ChannelId,
) -> Result<(), Error> {
    {
        let mut config = state.config.write().await;
        config.set_roster_channel(channel_id);
        state.store.save_config(&config);
    }
    info!("Roster channel set to {}", channel_id);

    responder
        .reply(
            format!("Canal de roster establecido a {}", channel_mention(channel_id)),
            true,
        )
        .await?;

    request_render(state.clone());
    Ok(())
}

pub async fn add_member(
    state: &Arc<AppState>,
    responder: &dyn Responder,
    member: Member,
) -> Result<(), Error> {
    let nickname = member.nickname.clone();
    let outcome = state.roster.write().await.upsert(member);
    info!("Member {} {:?}", nickname, outcome);

    let verb = match outcome {
        Upsert::Added => "añadido al",
        Upsert::Updated => "actualizado en el",
    };
    responder
        .reply(format!("Miembro **{}** {} roster.", nickname, verb), true)
        .await?;

    save_roster(state).await;
    request_render(state.clone());
    Ok(())
}

pub async fn remove_member(
    state: &Arc<AppState>,
    responder: &dyn Responder,
    nickname: &str,
) -> Result<(), Error> {
    let removed = state.roster.write().await.remove(nickname);

    if !removed {
        responder
            .reply(
                format!("No se encontró ningún miembro con el nick **{}**.", nickname),
                true,
            )
            .await?;
        return Ok(());
    }

    info!("Member {} removed", nickname);
    responder
        .reply(format!("Miembro **{}** eliminado del roster.", nickname), true)
        .await?;

    save_roster(state).await;
    request_render(state.clone());
    Ok(())
}

pub async fn clear_roster(state: &Arc<AppState>, responder: &dyn Responder) -> Result<(), Error> {
    {
        let mut roster = state.roster.write().await;
        roster.clear();
        state.store.save_roster(&roster);
    }
    info!("Roster cleared");

    responder.reply(ROSTER_CLEARED.to_string(), true).await?;

    request_render(state.clone());
    Ok(())
}

pub async fn show_config(state: &AppState, responder: &dyn Responder) -> Result<(), Error> {
    let channel_id = state.config.read().await.roster_channel();
    let content = match channel_id {
        Some(id) => format!(
            "El roster está configurado para mostrarse en {}",
            channel_mention(id)
        ),
        None => NO_CHANNEL.to_string(),
    };

    responder.reply(content, true).await?;
    Ok(())
}

pub async fn force_update(state: &AppState, responder: &dyn Responder) -> Result<(), Error> {
    responder.reply(UPDATING.to_string(), true).await?;

    let channel_id = state.config.read().await.roster_channel();
    let Some(channel_id) = channel_id else {
        responder.follow_up(NO_CHANNEL.to_string(), true).await?;
        return Ok(());
    };

    if state.channels.resolve(channel_id).await.is_none() {
        responder.follow_up(CHANNEL_GONE.to_string(), true).await?;
        return Ok(());
    }

    let content = if update_roster_display(state).await {
        format!("Roster actualizado correctamente en {}", channel_mention(channel_id))
    } else {
        UPDATE_FAILED.to_string()
    };

    responder.follow_up(content, true).await?;
    Ok(())
}
