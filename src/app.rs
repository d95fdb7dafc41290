//! Command execution for the `shenghang` binary
//!
//! Maps each parsed [`Command`] onto client calls. Progress, empty results
//! and session changes are reported through a [`NoticeSink`]; the payload to
//! print is returned to the caller. Failures are never reported here: the
//! caller turns the returned error into a notice with [`failure_notice`].

use serde_json::{json, Value};

use crate::cli::{Command, FavoriteCommand, ReportArgs, SearchKind, ShowKind};
use crate::client::{ApiError, ClientError, RequestOptions, ShengHangClient};
use crate::endpoints::{simulated_play_duration, TargetKind};
use crate::format::format_duration;
use crate::notice::{
    client_error_message, is_empty_payload, MessageKind, Notice, NoticeSink, DEFAULT_ERROR,
};

/// Display area used for request progress
const RESULTS_TARGET: &str = "results";

/// Display area used for login state
const SESSION_TARGET: &str = "session";

/// Runs one command
///
/// # Returns
/// * `Ok(Some(Value))` - A payload to print
/// * `Ok(None)` - Nothing to print (the sink already reported the outcome)
/// * `Err(ClientError)` - The command failed; no error notice has been shown
pub async fn run(
    command: Command,
    client: &mut ShengHangClient,
    sink: &mut dyn NoticeSink,
) -> Result<Option<Value>, ClientError> {
    if command.requires_login() {
        client.require_login()?;
    }

    let payload = match command {
        Command::Register { username, password } => {
            client
                .users()
                .register(json!({"username": username, "password": password}))
                .await?
        }
        Command::Login { username, password } => {
            let identity = client.login(&username, &password).await?;
            let role = if identity.is_admin { " (administrator)" } else { "" };
            sink.show(
                SESSION_TARGET,
                Notice::message(
                    MessageKind::Success,
                    format!("Logged in as {}{}", identity.username, role),
                ),
            );
            return Ok(None);
        }
        Command::Logout => {
            client.logout().await?;
            sink.show(
                SESSION_TARGET,
                Notice::message(MessageKind::Success, "Logged out"),
            );
            return Ok(None);
        }
        Command::Whoami => {
            let user_id = parse_user_id(&client.require_login()?.user_id)?;
            client
                .cached_get(&format!("/user/profile/{}/", user_id))
                .await?
        }
        Command::Search { kind, query } => {
            sink.show(RESULTS_TARGET, Notice::Loading("Searching...".to_string()));
            search(client, kind, &query).await?
        }
        Command::Show { kind, id } => show(client, kind, id).await?,
        Command::Songlists {
            public,
            private,
            sort_by,
        } => {
            let is_public = match (public, private) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            client.songlists().list(is_public, &sort_by).await?
        }
        Command::Favorites(command) => favorites(client, command).await?,
        Command::Comments { kind, id, sort_by } => {
            client.comments().by_target(kind, id, &sort_by).await?
        }
        Command::Comment {
            kind,
            id,
            content,
            reply_to,
        } => {
            client
                .comments()
                .publish(kind, id, &content, reply_to)
                .await?
        }
        Command::Play { song_id, duration } => {
            let secs = duration.unwrap_or_else(simulated_play_duration);
            let payload = client.play_history().record_play(song_id, Some(secs)).await?;
            sink.show(
                SESSION_TARGET,
                Notice::message(
                    MessageKind::Info,
                    format!("Recorded {} of song {}", format_duration(secs), song_id),
                ),
            );
            payload
        }
        Command::Report(ReportArgs { range, start, end }) => {
            client
                .play_history()
                .report(&range, start.as_deref(), end.as_deref())
                .await?
        }
        Command::Request {
            method,
            endpoint,
            data,
        } => {
            let mut options = RequestOptions::default().method(method);
            if let Some(data) = data {
                options = options.body(data);
            }
            client.dispatcher().dispatch(&endpoint, options).await?
        }
    };

    if is_empty_payload(&payload) {
        sink.show(RESULTS_TARGET, Notice::empty());
        return Ok(None);
    }
    Ok(Some(payload))
}

async fn search(
    client: &ShengHangClient,
    kind: SearchKind,
    query: &str,
) -> Result<Value, ApiError> {
    match kind {
        SearchKind::Song => client.music().search_song(json!({"song_title": query})).await,
        SearchKind::Album => {
            client
                .music()
                .search_album(json!({"album_title": query}))
                .await
        }
        SearchKind::Singer => {
            client
                .music()
                .search_singer(json!({"singer_name": query}))
                .await
        }
        SearchKind::Songlist => client.songlists().search(query).await,
        SearchKind::User => client.users().user_info(query).await,
    }
}

/// Profiles are read through the response cache
async fn show(client: &ShengHangClient, kind: ShowKind, id: u64) -> Result<Value, ClientError> {
    let payload = match kind {
        ShowKind::Song => {
            let profile_path = format!("/song/profile/{}/", id);
            let comments_api = client.comments();
            let (song, comments) = futures::try_join!(
                client.cached_get(&profile_path),
                comments_api.stats(TargetKind::Song, id),
            )?;
            json!({"song": song, "comment_stats": comments})
        }
        ShowKind::Album => client.cached_get(&format!("/album/profile/{}/", id)).await?,
        ShowKind::Singer => client.cached_get(&format!("/singer/profile/{}/", id)).await?,
        ShowKind::Songlist => client.cached_get(&format!("/songlist/profile/{}/", id)).await?,
        ShowKind::User => client.cached_get(&format!("/user/profile/{}/", id)).await?,
    };
    Ok(payload)
}

async fn favorites(client: &ShengHangClient, command: FavoriteCommand) -> Result<Value, ClientError> {
    let favorites = client.favorites();
    let payload = match command {
        FavoriteCommand::List => favorites.list().await?,
        FavoriteCommand::Add { kind, id } => favorites.add(kind, id).await?,
        FavoriteCommand::Remove { kind, id } => favorites.delete(kind, id).await?,
        FavoriteCommand::Top { kind, limit } => favorites.platform_top(kind, limit).await?,
    };
    Ok(payload)
}

fn parse_user_id(user_id: &str) -> Result<u64, ClientError> {
    user_id
        .parse()
        .map_err(|_| ClientError::MissingField(format!("numeric user_id (got '{}')", user_id)))
}

/// Text for a failed command, following the notice error policy
pub fn failure_notice(err: &ClientError) -> Notice {
    Notice::error(client_error_message(err, DEFAULT_ERROR))
}
