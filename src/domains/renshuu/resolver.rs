//! Catalog and term resolution.
//!
//! Nothing is cached: every resolution re-fetches the catalog or re-runs the
//! search.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::client::RenshuuClient;
use super::error::RenshuuError;
use super::gateway::{GatewayResponse, ResponseBody};
use super::model::{Container, ContainerKind, Term, search_results};

/// Page of the dictionary search used for resolution. Later pages are never
/// consulted.
const SEARCH_PAGE: u32 = 1;

/// Find the first container whose display name equals `name`, ignoring case.
///
/// On a miss the error carries every display name seen, in catalog order.
pub async fn resolve_container(
    client: &RenshuuClient,
    kind: ContainerKind,
    name: &str,
) -> Result<Container, RenshuuError> {
    let response = match kind {
        ContainerKind::Schedule => client.get_schedules().await?,
        ContainerKind::List => client.get_lists().await?,
    };
    let catalog = expect_json(response)?;
    let containers = kind.flatten_catalog(&catalog);
    debug!("Fetched {} {}(s)", containers.len(), kind);

    match find_container(containers, name) {
        Ok(container) => {
            info!("Resolved {} '{}' to id {}", kind, name, container.id);
            Ok(container)
        }
        Err(available) => {
            warn!("No {} named '{}' among {} entries", kind, name, available.len());
            Err(RenshuuError::container_not_found(kind, name, available))
        }
    }
}

/// Search the dictionary and take the first hit as canonical.
pub async fn resolve_term(client: &RenshuuClient, query: &str) -> Result<Term, RenshuuError> {
    let response = client.search_words(query, SEARCH_PAGE).await?;
    let results = expect_json(response)?;

    let Some(entry) = search_results(&results).first() else {
        warn!("Dictionary search for '{}' returned no results", query);
        return Err(RenshuuError::term_not_found(query));
    };

    match Term::from_value(entry) {
        Some(term) => {
            info!("Resolved term '{}' to id {}", query, term.id);
            Ok(term)
        }
        None => {
            warn!("First search hit for '{}' has no id", query);
            Err(RenshuuError::term_not_found(query))
        }
    }
}

/// First exact (case-insensitive) match, or all known names on a miss.
///
/// Entries without an id are never matched but their names are still listed.
pub fn find_container(containers: Vec<Container>, name: &str) -> Result<Container, Vec<String>> {
    let mut available = Vec::with_capacity(containers.len());
    for container in containers {
        if container.has_id() && container.matches(name) {
            return Ok(container);
        }
        if let Some(display) = container.name {
            available.push(display);
        }
    }
    Err(available)
}

/// Require a successful JSON response.
pub(crate) fn expect_json(response: GatewayResponse) -> Result<Value, RenshuuError> {
    let status = response.status;
    if !response.is_success() {
        return Err(RenshuuError::UnexpectedStatus {
            status,
            body: response.body.into_value(),
        });
    }
    match response.body {
        ResponseBody::Json(value) => Ok(value),
        ResponseBody::Raw(raw) => Err(RenshuuError::MalformedBody { status, raw }),
    }
}
