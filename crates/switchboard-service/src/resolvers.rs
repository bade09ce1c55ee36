//! The resolver surface.
//!
//! [`Resolvers`] composes the entity store and the event broadcaster into
//! the operations of the people sample and the `info` query:
//!
//! | Kind | Operation | Backed by |
//! |------|-----------|-----------|
//! | Query | `allPeople` | [`EntityStore::list_all`] |
//! | Query | `person(id)` | [`EntityStore::get`] |
//! | Mutation | `addPerson(input)` | [`EntityStore::insert`] then [`Broadcaster::publish`] |
//! | Subscription | `personAdded` | [`Broadcaster::subscribe`] |
//! | Query | `info` | package metadata |
//!
//! The store and broadcaster are owned by the `Resolvers` value built at
//! startup and shared by reference with every invocation; there is no
//! module-level state.

use std::error::Error;
use std::sync::Arc;

use tracing::{debug, error};

use switchboard_broadcast::{BroadcastError, Broadcaster, Subscription};
use switchboard_store::EntityStore;
use switchboard_types::{Person, PersonDraft, PersonFields, RecordId, ServiceInfo};

use crate::client::{ClientError, CompanionClient, GraphqlRequest};

/// Topic on which newly added people are published.
pub const PERSON_ADDED: &str = "personAdded";

/// Query sent to the companion by [`Resolvers::companion_info`].
pub const COMPANION_INFO_QUERY: &str = "query info { info { id } }";

/// Failures surfaced by resolver operations.
///
/// Messages are deliberately generic; the detail is logged where the
/// failure happens.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The companion service call failed.
    #[error("companion service call failed")]
    Downstream,

    /// The broadcaster has shut down.
    #[error("subscription unavailable: {0}")]
    Subscribe(#[from] BroadcastError),
}

/// Identity of this service from its Cargo package metadata.
pub fn package_info() -> ServiceInfo {
    ServiceInfo::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION"),
    )
}

/// Resolver context for the people sample and the `info` query.
///
/// Cheap to clone: the store is behind an [`Arc`] and the broadcaster is
/// a shared handle.
#[derive(Debug, Clone)]
pub struct Resolvers {
    people: Arc<EntityStore<PersonFields>>,
    events: Broadcaster<Person>,
    info: ServiceInfo,
    service_id: String,
    client: Option<CompanionClient>,
}

impl Resolvers {
    /// Resolvers over a fresh store and broadcaster, without a companion.
    pub fn new(info: ServiceInfo, service_id: impl Into<String>) -> Self {
        Self {
            people: Arc::new(EntityStore::new()),
            events: Broadcaster::new(),
            info,
            service_id: service_id.into(),
            client: None,
        }
    }

    /// Use `broadcaster` for person-added notifications.
    #[must_use]
    pub fn with_broadcaster(mut self, broadcaster: Broadcaster<Person>) -> Self {
        self.events = broadcaster;
        self
    }

    /// Use `store` for people.
    #[must_use]
    pub fn with_store(mut self, store: Arc<EntityStore<PersonFields>>) -> Self {
        self.people = store;
        self
    }

    /// Attach (or detach, with `None`) the companion client.
    #[must_use]
    pub fn with_client(mut self, client: Option<CompanionClient>) -> Self {
        self.client = client;
        self
    }

    /// The people store.
    pub const fn store(&self) -> &Arc<EntityStore<PersonFields>> {
        &self.people
    }

    /// The person-added broadcaster.
    pub const fn broadcaster(&self) -> &Broadcaster<Person> {
        &self.events
    }

    /// Whether a companion client is configured.
    pub const fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// `Query.allPeople`.
    pub async fn all_people(&self) -> Vec<Person> {
        self.people.list_all().await
    }

    /// `Query.person(id)`. A missing person is `None`.
    pub async fn person(&self, id: &RecordId) -> Option<Person> {
        self.people.get(id).await
    }

    /// `Mutation.addPerson(input)`.
    ///
    /// Stores the person first and only then publishes it on
    /// [`PERSON_ADDED`], so a subscriber reacting to the event can read the
    /// record back immediately.
    pub async fn add_person(&self, input: PersonDraft) -> RecordId {
        let person = self.people.insert(input).await;
        let id = person.id.clone();
        let delivered = self.events.publish(PERSON_ADDED, person);
        debug!(record_id = %id, delivered, "person added");
        id
    }

    /// `Subscription.personAdded`.
    ///
    /// # Errors
    ///
    /// Fails only once the broadcaster has been shut down.
    pub fn person_added(&self) -> Result<Subscription<Person>, ResolverError> {
        Ok(self.events.subscribe(PERSON_ADDED)?)
    }

    /// `Query.info`.
    pub const fn info(&self) -> &ServiceInfo {
        &self.info
    }

    /// Ask the companion service for its `info.id`.
    ///
    /// Returns `Ok(None)` without calling anything when no client is
    /// configured.
    ///
    /// # Errors
    ///
    /// Any companion failure is logged with its full error chain and
    /// reported as [`ResolverError::Downstream`].
    pub async fn companion_info(&self) -> Result<Option<String>, ResolverError> {
        let Some(client) = &self.client else {
            return Ok(None);
        };

        let request = GraphqlRequest::new(COMPANION_INFO_QUERY).operation("info");
        let outcome = client.query(&request).await.and_then(|data| {
            data.pointer("/info/id")
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned)
                .ok_or_else(|| ClientError::Response("missing info.id".to_owned()))
        });

        match outcome {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                error!(
                    service = %self.service_id,
                    client = client.name(),
                    error = %error_chain(&e),
                    "resolver failed with exception"
                );
                Err(ResolverError::Downstream)
            }
        }
    }

    /// Stop notifications: open `personAdded` streams end and new
    /// subscriptions are refused. Returns the number of streams closed.
    pub fn shutdown(&self) -> usize {
        self.events.shutdown()
    }
}

/// Render an error and all of its sources, outermost first.
fn error_chain(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
