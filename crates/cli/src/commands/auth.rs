//! Sign in, sign out and password change.

use dairy_ledger_client::{Session, submit};
use dairy_ledger_core::forms::{LoginForm, PasswordForm};
use secrecy::SecretString;
use tracing::info;

use super::{CommandError, Context};
use crate::render;

/// Log in and persist the session.
pub async fn login(ctx: &Context, contact: String, password: String) -> Result<(), CommandError> {
    let mut form = LoginForm { contact, password };
    let api = ctx.anonymous_api();
    let (data, contact) = submit(&mut form, move |credentials| async move {
        let data = api.login(&credentials).await?;
        Ok((data, credentials.contact))
    })
    .await?;

    let session = Session::new(
        data.role,
        data.user_id,
        contact.to_string(),
        data.token.map(SecretString::from),
    );
    session.save(&ctx.store)?;
    info!(role = %session.role, "Session stored");

    let who = if data.name.is_empty() {
        contact.to_string()
    } else {
        data.name
    };
    render::line(&format!("Signed in as {who} ({})", session.role));
    Ok(())
}

/// Drop the saved session.
pub fn logout(ctx: &Context) -> Result<(), CommandError> {
    Session::clear(&ctx.store)?;
    render::line("Signed out");
    Ok(())
}

/// Show the saved session.
pub fn whoami(ctx: &Context) -> Result<(), CommandError> {
    match Session::load(&ctx.store)? {
        Some(session) => render::line(&format!(
            "{} #{} ({})",
            session.role, session.user_id, session.contact
        )),
        None => render::line("Not signed in"),
    }
    Ok(())
}

/// Change the signed-in user's password.
pub async fn change_password(
    ctx: &Context,
    current: String,
    new: String,
    confirm: String,
) -> Result<(), CommandError> {
    let (session, api) = ctx.signed_in()?;
    let mut form = PasswordForm {
        current,
        new,
        confirm,
    };
    let api = &api;
    let user_id = session.user_id;
    let message = submit(&mut form, move |change| async move {
        api.change_password(user_id, &change).await
    })
    .await?;
    render::done(message, "Password changed");
    Ok(())
}
