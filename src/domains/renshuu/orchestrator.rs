//! Compound add: resolve a container by name, resolve a word by search, then
//! attach the word to the container.
//!
//! The three remote calls run strictly in sequence and stop at the first
//! failure. Only the final attach mutates remote state, and it is issued at
//! most once, so a failure never needs rollback.

use serde_json::json;
use tracing::{info, instrument, warn};

use super::client::RenshuuClient;
use super::envelope::Envelope;
use super::error::RenshuuError;
use super::model::{Container, ContainerKind, Term};
use super::resolver::{resolve_container, resolve_term};

/// Add the first dictionary hit for `query` to the container named
/// `container_name`.
///
/// An empty name or query is rejected before any remote call.
#[instrument(skip(client))]
pub async fn add_term_by_container_name(
    client: &RenshuuClient,
    kind: ContainerKind,
    container_name: &str,
    query: &str,
) -> Envelope {
    if container_name.is_empty() || query.is_empty() {
        return missing_fields(kind);
    }

    match run(client, kind, container_name, query).await {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!("Compound add failed: {}", err);
            err.into()
        }
    }
}

pub async fn add_word_by_schedule_name(
    client: &RenshuuClient,
    schedule_name: &str,
    word: &str,
) -> Envelope {
    add_term_by_container_name(client, ContainerKind::Schedule, schedule_name, word).await
}

pub async fn add_word_by_list_name(client: &RenshuuClient, list_name: &str, word: &str) -> Envelope {
    add_term_by_container_name(client, ContainerKind::List, list_name, word).await
}

/// Validation envelope for an add-by-name request lacking a field.
fn missing_fields(kind: ContainerKind) -> Envelope {
    Envelope::validation(format!("Missing {kind}_name or word"))
}

async fn run(
    client: &RenshuuClient,
    kind: ContainerKind,
    container_name: &str,
    query: &str,
) -> Result<Envelope, RenshuuError> {
    let container = resolve_container(client, kind, container_name).await?;
    let term = resolve_term(client, query).await?;

    let word_id = term.id_param();
    let container_id = container.id_param();
    let response = match kind {
        ContainerKind::Schedule => client.add_word_to_schedule(&word_id, &container_id).await?,
        ContainerKind::List => client.add_word_to_list(&word_id, &container_id).await?,
    };

    if !response.is_success() {
        return Err(RenshuuError::UnexpectedStatus {
            status: response.status,
            body: response.body.into_value(),
        });
    }

    info!(
        "Added word {} to {} {} ({})",
        word_id,
        kind,
        container_id,
        container.name.as_deref().unwrap_or_default()
    );

    Ok(Envelope::success(success_payload(
        kind,
        &container,
        &term,
        response.body.into_value(),
    )))
}

fn success_payload(
    kind: ContainerKind,
    container: &Container,
    term: &Term,
    api_response: serde_json::Value,
) -> serde_json::Value {
    json!({
        (kind.as_str()): {
            "id": container.id,
            "name": container.name,
        },
        "word": term,
        "apiResponse": api_response,
    })
}
