use super::decode_payload;
use crate::application::actions::context::{ItemKind, SearchResult, UNKNOWN_ARTIST};
use crate::application::actions::errors::ExecutionError;
use crate::application::actions::invoker::ToolInvoker;
use crate::application::actions::models::ToolKind;
use crate::application::actions::outcome::{ActionReport, ReportResult, StepOutcome};
use crate::application::actions::params::{SearchParams, encode};
use serde_json::{Map, Value};
use tracing::{error, info};

pub const NO_SEARCH_RESULTS: &str = "No search results found";
pub const PARSE_FAILURE: &str = "Failed to parse search results";

pub async fn handle(
    invoker: &ToolInvoker<'_>,
    params: SearchParams,
) -> Result<StepOutcome, ExecutionError> {
    let arguments = encode(ToolKind::Search, &params)?;
    let result = match invoker.call(ToolKind::Search, &arguments).await {
        Ok(result) if !result.content.is_empty() => result,
        _ => return Ok(StepOutcome::failure(NO_SEARCH_RESULTS)),
    };

    let data = match decode_payload(&result) {
        Ok(data) => data,
        Err(err) => {
            error!(%err, "Failed to decode search payload");
            return Ok(StepOutcome::failure(PARSE_FAILURE));
        }
    };

    match select_hit(&data, params.wants_album()) {
        Ok(Some(hit)) => {
            info!(uri = %hit.uri, name = %hit.name, kind = %hit.kind, "Search resolved item");
            Ok(ActionReport::new("search")
                .with_result(ReportResult::Hit(hit))
                .into())
        }
        Ok(None) => {
            let query = params.query.as_deref().unwrap_or_default();
            Ok(StepOutcome::failure(format!("No results found for query: {query}")))
        }
        Err(reason) => {
            error!(reason, "Malformed search payload");
            Ok(StepOutcome::failure(PARSE_FAILURE))
        }
    }
}

/// Pick the album hit when albums were asked for, else the first track
fn select_hit(data: &Value, wants_album: bool) -> Result<Option<SearchResult>, &'static str> {
    let Some(object) = data.as_object() else {
        return Err("search payload is not an object");
    };
    if wants_album {
        if let Some(album) = first_of(object, "albums") {
            return build_hit(album, ItemKind::Album).map(Some);
        }
    }
    match first_of(object, "tracks") {
        Some(track) => build_hit(track, ItemKind::Track).map(Some),
        None => Ok(None),
    }
}

fn first_of<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key)?.as_array()?.first()
}

fn build_hit(item: &Value, kind: ItemKind) -> Result<SearchResult, &'static str> {
    let name = item
        .get("name")
        .and_then(Value::as_str)
        .ok_or("search item has no name")?;
    let id = match item.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err("search item has no id"),
    };
    Ok(SearchResult::new(kind, id, name, artist_of(item)))
}

/// First entry of an `artists` list wins over a scalar `artist`
fn artist_of(item: &Value) -> String {
    let listed = item
        .get("artists")
        .and_then(Value::as_array)
        .and_then(|artists| artists.first())
        .and_then(|artist| match artist {
            Value::String(name) => Some(name.as_str()),
            Value::Object(fields) => fields.get("name").and_then(Value::as_str),
            _ => None,
        });
    listed
        .or_else(|| item.get("artist").and_then(Value::as_str))
        .unwrap_or(UNKNOWN_ARTIST)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::actions::test_support::ScriptedSession;
    use crate::application::tooling::RemoteResult;
    use crate::application::tooling::RetryPolicy;
    use serde_json::json;

    fn params(value: Value) -> SearchParams {
        serde_json::from_value(value).expect("params")
    }

    async fn run(session: &ScriptedSession, value: Value) -> StepOutcome {
        let invoker = ToolInvoker::new(session, RetryPolicy::new(1, Default::default()));
        handle(&invoker, params(value)).await.expect("no fault")
    }

    #[tokio::test]
    async fn first_track_becomes_hit() {
        let session = ScriptedSession::new().reply_json(
            "SpotifySearch",
            json!({ "tracks": [
                { "name": "Test Song", "id": "track123", "artists": ["Test Artist"] },
                { "name": "Other", "id": "track456", "artists": ["Someone"] }
            ]}),
        );

        let outcome = run(&session, json!({ "query": "Test Song", "qtype": "track" })).await;
        let hit = outcome
            .report()
            .and_then(ActionReport::search_hit)
            .expect("hit");

        assert_eq!(hit.uri, "spotify:track:track123");
        assert_eq!(hit.artist, "Test Artist");
        assert_eq!(hit.kind, ItemKind::Track);
        assert_eq!(
            session.calls_to("SpotifySearch"),
            vec![json!({ "query": "Test Song", "qtype": "track" })]
        );
    }

    #[tokio::test]
    async fn album_query_prefers_albums() {
        let session = ScriptedSession::new().reply_json(
            "SpotifySearch",
            json!({
                "albums": [{ "name": "Test Album", "id": "album123", "artist": "Test Artist" }],
                "tracks": [{ "name": "Song", "id": "t1" }]
            }),
        );

        let outcome = run(&session, json!({ "query": "Test Album", "qtype": "album" })).await;
        let hit = outcome.report().and_then(ActionReport::search_hit).expect("hit");

        assert_eq!(hit.uri, "spotify:album:album123");
        assert_eq!(hit.artist, "Test Artist");
    }

    #[tokio::test]
    async fn album_query_falls_back_to_tracks() {
        let session = ScriptedSession::new().reply_json(
            "SpotifySearch",
            json!({ "albums": [], "tracks": [{ "name": "Song", "id": "t1" }] }),
        );

        let outcome = run(&session, json!({ "query": "x", "qtype": "album" })).await;
        let hit = outcome.report().and_then(ActionReport::search_hit).expect("hit");

        assert_eq!(hit.kind, ItemKind::Track);
        assert_eq!(hit.artist, UNKNOWN_ARTIST);
    }

    #[tokio::test]
    async fn empty_hits_name_the_query() {
        let session = ScriptedSession::new().reply_json("SpotifySearch", json!({ "tracks": [] }));
        let outcome = run(&session, json!({ "query": "nothing here" })).await;
        assert_eq!(outcome.error(), Some("No results found for query: nothing here"));
    }

    #[tokio::test]
    async fn remote_error_and_garbage_are_distinguished() {
        let refused = ScriptedSession::new().reply("SpotifySearch", RemoteResult::failure("quota"));
        assert_eq!(
            run(&refused, json!({ "query": "a" })).await.error(),
            Some(NO_SEARCH_RESULTS)
        );

        let garbled =
            ScriptedSession::new().reply("SpotifySearch", RemoteResult::success("not json"));
        assert_eq!(
            run(&garbled, json!({ "query": "a" })).await.error(),
            Some(PARSE_FAILURE)
        );
    }

    #[tokio::test]
    async fn empty_content_counts_as_no_results() {
        let session = ScriptedSession::new().reply("SpotifySearch", RemoteResult::default());
        assert_eq!(
            run(&session, json!({ "query": "a" })).await.error(),
            Some(NO_SEARCH_RESULTS)
        );
    }

    #[test]
    fn artist_objects_are_read_by_name() {
        let item = json!({ "artists": [{ "name": "Nested" }], "artist": "Scalar" });
        assert_eq!(artist_of(&item), "Nested");
        assert_eq!(artist_of(&json!({ "artists": [], "artist": "Scalar" })), "Scalar");
    }
}
