//! `fire works` and `fire services`.

use chrono::Utc;
use fire_productions_core::portfolio::{latest_per_service, services_or_default, works_for_tag};
use fire_productions_core::storage::{ReturnPoint, ReturnSource};
use fire_productions_core::{KeyValueStore, WorkId};
use tracing::warn;

use super::products::take_return_point;
use crate::ApiClient;
use crate::error::Result;
use crate::output::{render_service_groups, render_services, render_work, render_works};

/// Works, optionally narrowed to one service tag. A work opened with `show`
/// since the last listing is marked.
///
/// # Errors
///
/// Returns an error if the works cannot be fetched.
pub async fn list<S: KeyValueStore>(
    api: &ApiClient,
    store: &mut S,
    service: Option<&str>,
) -> Result<String> {
    let works = api.cached_works(store).await?;

    let returned = take_return_point(store, ReturnSource::Services);
    let highlight = returned.as_ref().and_then(|p| p.work_id.as_ref());

    Ok(match service {
        Some(tag) => render_works(works_for_tag(&works, tag), highlight),
        None => render_works(&works, highlight),
    })
}

/// One work in full.
///
/// # Errors
///
/// Returns an error if the work cannot be fetched.
pub async fn show<S: KeyValueStore>(
    api: &ApiClient,
    store: &mut S,
    id: &str,
    service: Option<&str>,
) -> Result<String> {
    let work = api.get_work(&WorkId::new(id)).await?;

    let mut point = ReturnPoint::new(ReturnSource::Services);
    point.work_id = Some(work.id.clone());
    point.service_tag = service.map(ToString::to_string);
    if let Err(e) = point.remember(store, Utc::now()) {
        warn!(error = %e, "Failed to record return point");
    }

    Ok(render_work(&work))
}

/// Each service with its `per_service` most recent works. The built-in
/// offerings stand in when none are configured.
///
/// # Errors
///
/// Returns an error if works or services cannot be fetched.
pub async fn latest<S: KeyValueStore>(
    api: &ApiClient,
    store: &mut S,
    per_service: usize,
) -> Result<String> {
    let works = api.cached_works(store).await?;
    let services = services_or_default(api.cached_services(store).await?);
    Ok(render_service_groups(&latest_per_service(
        &works,
        &services,
        per_service,
    )))
}

/// Services in display order. The built-in offerings stand in when none
/// are configured.
///
/// # Errors
///
/// Returns an error if the services cannot be fetched.
pub async fn services<S: KeyValueStore>(api: &ApiClient, store: &mut S) -> Result<String> {
    let services = services_or_default(api.cached_services(store).await?);
    Ok(render_services(&services))
}
